use crate::error::{Result, SiftError};
use crate::messages;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["linesift.toml", ".linesift.toml"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub prefix: String,
    pub append: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    pub short: bool,
    pub full: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            prefix: String::new(),
            append: false,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            short: false,
            full: false,
            format: "human".to_string(),
        }
    }
}

/// Settings for one run, fixed once the pipeline starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfiguration {
    pub output_dir: PathBuf,
    pub prefix: String,
    pub append: bool,
    pub short_stats: bool,
    pub full_stats: bool,
    pub input_files: Vec<PathBuf>,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Config::default().into_run_configuration(Vec::new())
    }
}

impl RunConfiguration {
    pub fn wants_statistics(&self) -> bool {
        self.short_stats || self.full_stats
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SiftError::Config {
                message: messages::config_not_found(path),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| SiftError::Config {
            message: messages::config_read_failed(path, e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| SiftError::Config {
            message: messages::config_parse_failed(path, e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                for default_path in &DEFAULT_CONFIG_PATHS {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref output_dir) = cli_args.output_dir {
            self.output.directory = if output_dir.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                output_dir.clone()
            };
        }

        if let Some(ref prefix) = cli_args.prefix {
            self.output.prefix = prefix.clone();
        }

        // Flags can only switch a setting on.
        if cli_args.append {
            self.output.append = true;
        }

        if cli_args.short_stats {
            self.report.short = true;
        }

        if cli_args.full_stats {
            self.report.full = true;
        }

        if let Some(ref format) = cli_args.format {
            self.report.format = format.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.output.prefix.contains('/') || self.output.prefix.contains('\\') {
            return Err(SiftError::Config {
                message: messages::prefix_has_separator(&self.output.prefix),
            });
        }

        if !matches!(
            self.report.format.to_lowercase().as_str(),
            "human" | "plain" | "json"
        ) {
            return Err(SiftError::Config {
                message: messages::unknown_report_format(&self.report.format),
            });
        }

        Ok(())
    }

    pub fn into_run_configuration(self, input_files: Vec<PathBuf>) -> RunConfiguration {
        RunConfiguration {
            output_dir: self.output.directory,
            prefix: self.output.prefix,
            append: self.output.append,
            short_stats: self.report.short,
            full_stats: self.report.full,
            input_files,
        }
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub output_dir: Option<PathBuf>,
    pub prefix: Option<String>,
    pub append: bool,
    pub short_stats: bool,
    pub full_stats: bool,
    pub format: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_prefix(mut self, prefix: Option<String>) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    pub fn with_short_stats(mut self, short: bool) -> Self {
        self.short_stats = short;
        self
    }

    pub fn with_full_stats(mut self, full: bool) -> Self {
        self.full_stats = full;
        self
    }

    pub fn with_format(mut self, format: Option<String>) -> Self {
        self.format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output.directory, PathBuf::from("."));
        assert!(config.output.prefix.is_empty());
        assert!(!config.output.append);
        assert!(!config.report.short);
        assert!(!config.report.full);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.output.prefix = "nested/".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.report.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = Config::default();
        config.output.prefix = "run_".to_string();
        config.report.full = true;
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.output.prefix, "run_");
        assert!(loaded.report.full);
    }

    #[test]
    fn test_partial_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[output]\nappend = true").unwrap();

        let loaded = Config::load_from_file(temp_file.path()).unwrap();
        assert!(loaded.output.append);
        assert_eq!(loaded.output.directory, PathBuf::from("."));
        assert_eq!(loaded.report.format, "human");
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(SiftError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();
        config.output.append = true;

        let overrides = CliOverrides::new()
            .with_output_dir(Some(PathBuf::from("results")))
            .with_prefix(Some("p_".to_string()))
            .with_short_stats(true);

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.output.directory, PathBuf::from("results"));
        assert_eq!(config.output.prefix, "p_");
        assert!(config.output.append);
        assert!(config.report.short);
        assert!(!config.report.full);
    }

    #[test]
    fn test_empty_output_dir_means_current_dir() {
        let mut config = Config::default();
        config.merge_with_cli_args(&CliOverrides::new().with_output_dir(Some(PathBuf::new())));
        assert_eq!(config.output.directory, PathBuf::from("."));
    }

    #[test]
    fn test_run_configuration() {
        let mut config = Config::default();
        config.report.full = true;
        let run = config.into_run_configuration(vec![PathBuf::from("a.txt")]);

        assert_eq!(run.input_files, vec![PathBuf::from("a.txt")]);
        assert!(run.full_stats);
        assert!(run.wants_statistics());
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(sample.contains("[output]"));
        assert!(sample.contains("[report]"));
    }
}
