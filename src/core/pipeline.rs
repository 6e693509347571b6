use crate::core::line_rules::{split_lines_inclusive, LineOutcome, LineTransform, LINE_ENDING};
use crate::core::{ConfigProvider, InputLine, Pipeline, Storage, TransformResult};
use crate::domain::model::TransformStats;
use crate::utils::error::{FilterError, Result};

pub struct FilterListPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    transform: LineTransform,
}

impl<S: Storage, C: ConfigProvider> FilterListPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let transform = LineTransform::new(config.variant());
        Self {
            storage,
            config,
            transform,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

/// 把轉換結果組成輸出檔內容：標頭（若有）接著每行一條規則
pub fn render_output(result: &TransformResult) -> String {
    let mut out = String::new();
    if let Some(header) = &result.header {
        out.push_str(&header.render());
    }
    for line in &result.lines {
        out.push_str(line);
        out.push_str(LINE_ENDING);
    }
    out
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for FilterListPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<InputLine>> {
        let path = self.config.input_path();
        tracing::debug!("Reading filter list from: {}", path);

        let bytes = self.storage.read_file(path).await?;
        let content = String::from_utf8(bytes).map_err(|e| FilterError::EncodingError {
            path: path.to_string(),
            source: e,
        })?;

        let lines: Vec<InputLine> = split_lines_inclusive(&content)
            .enumerate()
            .map(|(i, raw)| InputLine {
                number: i + 1,
                raw: raw.to_string(),
            })
            .collect();

        tracing::debug!("Read {} lines ({} bytes)", lines.len(), content.len());
        Ok(lines)
    }

    async fn transform(&self, lines: Vec<InputLine>) -> Result<TransformResult> {
        let mut stats = TransformStats::default();
        let mut output = Vec::with_capacity(lines.len());

        for line in &lines {
            match self.transform.apply_with_stats(&line.raw, &mut stats) {
                LineOutcome::Emit(rule) => output.push(rule),
                LineOutcome::Blank => {
                    tracing::trace!("line {}: blank, dropped", line.number);
                }
                LineOutcome::Comment => {
                    tracing::trace!("line {}: comment, dropped", line.number);
                }
            }
        }

        let header = if self.transform.variant().writes_header() {
            Some(self.config.header())
        } else {
            None
        };

        tracing::info!(
            "Variant {}: {} read, {} dropped ({} blank, {} comment), {} rewritten, {} suffixed",
            self.transform.variant(),
            stats.lines_read,
            stats.dropped(),
            stats.blank_dropped,
            stats.comment_dropped,
            stats.hosts_rewritten,
            stats.suffix_appended
        );

        Ok(TransformResult {
            lines: output,
            header,
            stats,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.config.output_path();
        let content = render_output(&result);

        self.storage
            .write_file(output_path, content.as_bytes())
            .await?;

        tracing::debug!(
            "Wrote {} rules ({} bytes) to {}",
            result.lines.len(),
            content.len(),
            output_path
        );
        Ok(output_path.to_string())
    }
}
