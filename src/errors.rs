// src/errors.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{} does not point to {what}.", path.display())]
    MissingPath { what: &'static str, path: PathBuf },

    #[error("solution {} was not read correctly, did not find finishing line \"solution end\"", path.display())]
    IncompleteSolution { path: PathBuf },

    #[error("***No solutions found.")]
    NoSolutions,

    #[error("***Found invalid solution: {}\nValidate Command:\n {command}", path.display())]
    InvalidSolution { path: PathBuf, command: String },

    #[error("Failed to run '{program}': {source}")]
    ToolSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command timed out after {seconds}s: {command}")]
    ToolTimeout { command: String, seconds: u64 },
}

pub type Result<T> = std::result::Result<T, HarnessError>;
