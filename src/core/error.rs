//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    Configuration { component: String, message: String },

    /// The sink target could not be opened or created
    #[error("Failed to open log sink '{path}': {source}")]
    SinkOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    Writer(String),

    /// `log` or `terminate` called before `initialize`
    #[error("Logger has not been initialized")]
    NotInitialized,

    /// `initialize` called on a logger that was already started
    #[error("Logger has already been initialized")]
    AlreadyInitialized,

    /// `log` or `terminate` called once termination has begun
    #[error("Logger already terminated")]
    AlreadyTerminated,

    /// The consumer thread panicked instead of exiting cleanly
    #[error("Log consumer thread panicked: {0}")]
    ConsumerPanicked(String),

    /// The sink failed while the consumer was running
    #[error("Log sink '{sink}' failed: {message} ({dropped} entries dropped)")]
    SinkFailed {
        sink: String,
        message: String,
        dropped: u64,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Configuration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a sink open error for `path`
    pub fn sink_open(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SinkOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::Writer(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// The logger could not be set up from the given input
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LoggerError::Configuration { .. } | LoggerError::SinkOpen { .. }
        )
    }

    /// The lifecycle contract was violated by the caller
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            LoggerError::NotInitialized
                | LoggerError::AlreadyInitialized
                | LoggerError::AlreadyTerminated
        )
    }
}
