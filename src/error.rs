use thiserror::Error;

#[derive(Debug, Error)]
pub enum InertiaError {
    #[error("{0}")]
    SerializationError(String),
    #[error("{0}")]
    SessionError(String),
    #[error("{0}")]
    ShareHookError(String),
    #[error("{0}")]
    TemplateError(String),
    #[error("{0}")]
    ConfigurationError(String),
}

impl InertiaError {
    /// Returns the message carried by the error, whatever its kind.
    pub fn get_cause(&self) -> String {
        match self {
            Self::SerializationError(cause)
            | Self::SessionError(cause)
            | Self::ShareHookError(cause)
            | Self::TemplateError(cause)
            | Self::ConfigurationError(cause) => cause.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::InertiaError;

    #[test]
    fn cause_is_the_inner_message() {
        let err = InertiaError::SessionError("session backend is gone".into());
        assert_eq!(err.get_cause(), "session backend is gone");
        assert_eq!(err.to_string(), "session backend is gone");
    }
}
