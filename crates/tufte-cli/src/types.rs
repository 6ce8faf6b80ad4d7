use std::path::{Path, PathBuf};

use org_tufte_exporter::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Toml(#[from] toml::de::Error),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{path}: {err}")]
    WithPath { err: Box<CliError>, path: PathBuf },
}

impl CliError {
    pub fn with_path(self, path: &Path) -> Self {
        Self::WithPath {
            err: Box::new(self),
            path: path.to_path_buf(),
        }
    }
}
