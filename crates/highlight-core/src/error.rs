use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown fragmenter: '{0}'. Options are 'scan', 'sentence' or 'none'")]
    UnknownFragmenter(String),

    #[error("Invalid locale: '{0}'")]
    InvalidLocale(String),

    #[error("Failed to highlight field [{field}]")]
    Highlight {
        field: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to clean up field [{field}]")]
    Cleanup {
        field: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
