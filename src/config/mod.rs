pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{HeaderBlock, Variant};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_INPUT_PATH: &str = "../Extension/filters/chromium/explicit.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "output.txt";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "filterlist-etl")]
#[command(about = "Clean a filter list and scope its domain rules to top-level documents")]
pub struct CliConfig {
    /// Source filter list
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    pub input: String,

    /// Destination file, overwritten on every run
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: String,

    /// `metadata` rewrites `0.0.0.0 ` hosts entries and prepends the list header
    #[arg(long, value_enum, default_value_t = Variant::Plain)]
    pub variant: Variant,

    /// Replace the header's TimeUpdated line with the current UTC time
    #[arg(long)]
    pub stamp_now: bool,

    #[arg(long, help = "Log per-phase CPU and memory usage")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn variant(&self) -> Variant {
        self.variant
    }

    fn header(&self) -> HeaderBlock {
        let header = HeaderBlock::default();
        if self.stamp_now {
            header.stamped_now()
        } else {
            header
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output", &self.output)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["filterlist-etl"]);
        assert_eq!(config.input, DEFAULT_INPUT_PATH);
        assert_eq!(config.output, DEFAULT_OUTPUT_PATH);
        assert_eq!(config.variant, Variant::Plain);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_metadata_variant() {
        let config = CliConfig::parse_from([
            "filterlist-etl",
            "--input",
            "hosts.txt",
            "--variant",
            "metadata",
            "--stamp-now",
        ]);
        assert_eq!(config.input_path(), "hosts.txt");
        assert_eq!(config.variant(), Variant::Metadata);
        assert_ne!(config.header().time_updated, HeaderBlock::default().time_updated);
    }

    #[test]
    fn test_cli_rejects_empty_output() {
        let config = CliConfig::parse_from(["filterlist-etl", "--output", ""]);
        assert!(config.validate().is_err());
    }
}
