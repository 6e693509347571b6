use crate::domain::model::HeaderBlock;
use crate::utils::error::{FilterError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(FilterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(FilterError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(FilterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FilterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FilterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FilterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 標頭欄位必須是單行，否則會把標頭區塊的行數弄亂
pub fn validate_single_line(field_name: &str, value: &str) -> Result<()> {
    if value.contains('\n') || value.contains('\r') {
        return Err(FilterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.escape_debug().to_string(),
            reason: "Value must not contain line breaks".to_string(),
        });
    }
    Ok(())
}

impl Validate for HeaderBlock {
    fn validate(&self) -> Result<()> {
        let fields = [
            ("header.checksum", &self.checksum),
            ("header.title", &self.title),
            ("header.description", &self.description),
            ("header.version", &self.version),
            ("header.time_updated", &self.time_updated),
            ("header.expires", &self.expires),
            ("header.homepage", &self.homepage),
            ("header.license", &self.license),
        ];
        for (name, value) in fields {
            validate_single_line(name, value)?;
        }

        validate_non_empty_string("header.title", &self.title)?;
        validate_url("header.homepage", trailing_token(&self.homepage))?;
        validate_url("header.license", trailing_token(&self.license))?;
        Ok(())
    }
}

// `! Homepage: https://...` 取最後一段當作 URL
fn trailing_token(value: &str) -> &str {
    value.trim().rsplit(' ').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("header.homepage", "https://example.com").is_ok());
        assert!(validate_url("header.homepage", "http://example.com").is_ok());
        assert!(validate_url("header.homepage", "").is_err());
        assert!(validate_url("header.homepage", "invalid-url").is_err());
        assert!(validate_url("header.homepage", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("load.output_path", "output.txt").is_ok());
        assert!(validate_path("load.output_path", "").is_err());
        assert!(validate_path("load.output_path", "out\0.txt").is_err());
    }

    #[test]
    fn test_validate_single_line() {
        assert!(validate_single_line("header.title", "Explicit list").is_ok());
        assert!(validate_single_line("header.title", "Explicit\nlist").is_err());
        assert!(validate_single_line("header.title", "Explicit\r").is_err());
    }

    #[test]
    fn test_default_header_is_valid() {
        assert!(HeaderBlock::default().validate().is_ok());

        let mut header = HeaderBlock::default();
        header.homepage = "! Homepage: not-a-url".to_string();
        assert!(header.validate().is_err());

        let mut header = HeaderBlock::default();
        header.description = "! Description: two\nlines".to_string();
        assert!(header.validate().is_err());
    }
}
