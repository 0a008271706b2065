use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("frame truncated: {0} bytes")]
    TruncatedFrame(usize),

    #[error("unknown sensor type: sensor id {0}")]
    UnknownSensor(u32),

    #[error("failed to load sensor metadata: {0}")]
    MetadataLoad(String),

    #[error("failed to load configuration: {0}")]
    ConfigLoad(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LoggerError>;
