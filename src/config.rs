use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::Level;

use crate::compile::CompileOptions;

/// How the compiled command is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One POSIX shell command line.
    Shell,
    /// One argument per line.
    Args,
    /// JSON array of arguments.
    Json,
    /// The `-filter_complex` text only.
    Filter,
}

/// Command line and config file settings.
///
/// Example configuration file content
/// # ffgraph configuration
///
/// ffmpeg = "/usr/local/bin/ffmpeg"
/// format = "json"
/// overwrite = true
/// auto_split = true
/// log_level = "debug"
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(version, about, long_about = None)]
#[serde(default)]
pub struct Config {
    /// Graph document (.toml or .json)
    #[serde(skip)]
    pub graph: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Program name placed in front of the arguments
    #[arg(long, default_value = "ffmpeg")]
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Shell)]
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Pass -y to ffmpeg
    #[arg(short = 'y', long)]
    pub overwrite: bool,

    /// Insert split/asplit for outputs read more than once
    #[arg(long)]
    pub auto_split: bool,

    /// Do not check option ranges and stream usage before compiling
    #[arg(long)]
    pub skip_validation: bool,

    /// Reject filters without a typed binding
    #[arg(long)]
    pub strict: bool,

    /// Log level: trace, debug, info, warn or error
    #[arg(short, long, default_value = "warn")]
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graph: None,
            config: None,
            ffmpeg: default_ffmpeg(),
            format: default_format(),
            overwrite: false,
            auto_split: false,
            skip_validation: false,
            strict: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from CLI args, optionally merging with a config file
    pub fn load() -> Result<Self> {
        let mut config = Config::parse();

        if let Some(config_path) = &config.config {
            let file_config = Self::from_file(Path::new(config_path))?;
            config = config.merge_with_file(file_config);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Merge with file config, CLI args take precedence
    pub fn merge_with_file(mut self, file_config: Config) -> Self {
        if self.ffmpeg == default_ffmpeg() {
            self.ffmpeg = file_config.ffmpeg;
        }
        if self.format == default_format() {
            self.format = file_config.format;
        }
        if self.log_level == default_log_level() {
            self.log_level = file_config.log_level;
        }

        // A flag set in either place stays set
        self.overwrite |= file_config.overwrite;
        self.auto_split |= file_config.auto_split;
        self.skip_validation |= file_config.skip_validation;
        self.strict |= file_config.strict;

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.graph.as_deref() {
            None | Some("") => return Err(anyhow::anyhow!("A graph document is required")),
            Some(_) => {}
        }

        if self.ffmpeg.is_empty() {
            return Err(anyhow::anyhow!("ffmpeg program name cannot be empty"));
        }

        self.level()?;
        Ok(())
    }

    pub fn level(&self) -> Result<Level> {
        self.log_level
            .parse::<Level>()
            .map_err(|_| anyhow::anyhow!("Unsupported log level: {}", self.log_level))
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            program: self.ffmpeg.clone(),
            overwrite: self.overwrite,
            auto_split: self.auto_split,
            validate: !self.skip_validation,
        }
    }
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

fn default_format() -> OutputFormat {
    OutputFormat::Shell
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_cli_parsing() {
        let config = Config::parse_from(["ffgraph", "graph.toml", "-f", "json", "--auto-split"]);
        assert_eq!(config.graph.as_deref(), Some("graph.toml"));
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.auto_split);
        assert!(!config.overwrite);
        assert_eq!(config.ffmpeg, "ffmpeg");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_merge_keeps_cli_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "ffmpeg = \"/opt/ffmpeg\"\nformat = \"args\"\nstrict = true\nlog_level = \"debug\""
        )
        .unwrap();

        let file_config = Config::from_file(file.path()).unwrap();
        assert_eq!(file_config.format, OutputFormat::Args);

        let cli = Config::parse_from(["ffgraph", "graph.toml", "--format", "filter"]);
        let merged = cli.merge_with_file(file_config);
        assert_eq!(merged.ffmpeg, "/opt/ffmpeg");
        assert_eq!(merged.format, OutputFormat::Filter);
        assert!(merged.strict);
        assert_eq!(merged.level().unwrap(), Level::DEBUG);
        assert_eq!(merged.graph.as_deref(), Some("graph.toml"));
    }

    #[test]
    fn test_validation() {
        assert!(Config::default().validate().is_err());

        let config = Config {
            graph: Some("graph.toml".to_string()),
            log_level: "loud".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            graph: Some("graph.toml".to_string()),
            skip_validation: true,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(!config.compile_options().validate);
    }
}
