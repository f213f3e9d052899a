/// Result type alias for closer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error carried as the cause of a close failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Core error type for closer operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A resource failed to close
    #[error("{message}: {source}")]
    Close {
        message: String,
        #[source]
        source: BoxError,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

// Helper methods for creating errors with context
impl Error {
    /// Create a close error describing which resource failed to close
    #[must_use]
    pub fn close(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Close {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error came from a failed close
    pub fn is_close(&self) -> bool {
        matches!(self, Error::Close { .. })
    }
}

/// Extension trait for attaching a close description to a cleanup result
pub trait CloseResultExt {
    /// Wrap a close failure in [`Error::Close`] with the given message
    fn close_context(self, message: impl Into<String>) -> Result<()>;

    /// Wrap a close failure with a lazily built message
    fn with_close_context<F>(self, f: F) -> Result<()>
    where
        F: FnOnce() -> String;
}

impl<E> CloseResultExt for std::result::Result<(), E>
where
    E: Into<BoxError>,
{
    fn close_context(self, message: impl Into<String>) -> Result<()> {
        self.map_err(|e| Error::close(message, e))
    }

    fn with_close_context<F>(self, f: F) -> Result<()>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| Error::close(f(), e))
    }
}
