use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::Deserialize;

pub const DEFAULT_INPUT_FILE: &str = "export.xml";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_MAX_CONCURRENT: usize = 8;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Download {
    /// Maximum number of images being downloaded at the same time
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    pub user_agent: Option<String>,
    /// No timeout when absent
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_input_file")]
    pub input_file: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub download: Download,
    pub log: Option<Log>,
}

fn default_input_file() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_FILE)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_max_concurrent() -> usize {
    DEFAULT_MAX_CONCURRENT
}

impl Default for Download {
    fn default() -> Self {
        Download {
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            user_agent: None,
            timeout_secs: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_file: default_input_file(),
            output_dir: default_output_dir(),
            download: Download::default(),
            log: None,
        }
    }
}

impl Config {
    /// Command line values win over the ones from the configuration file
    pub fn with_overrides(mut self, input_file: Option<PathBuf>, output_dir: Option<PathBuf>) -> Config {
        if let Some(input_file) = input_file {
            self.input_file = input_file;
        }
        if let Some(output_dir) = output_dir {
            self.output_dir = output_dir;
        }
        self
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let cfg = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    if cfg.download.max_concurrent == 0 {
        return Err(io::Error::new(
            ErrorKind::InvalidData, "download.max_concurrent must be greater than zero".to_string()));
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
