use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read collections file {path}: {source}")]
    CollectionsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse collections file: {0}")]
    CollectionsFileParse(#[from] serde_yaml::Error),

    #[error("collections validation failed: {0}")]
    Validation(String),
}
