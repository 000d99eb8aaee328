//! Domain error types.

/// Top-level error type for crossopt.
#[derive(Debug, thiserror::Error)]
pub enum CrossoptError {
    #[error("invalid series length {length}: must be positive")]
    InvalidLength { length: usize },

    #[error("invalid parameter {name} = {value}")]
    InvalidParameter { name: String, value: String },

    #[error("insufficient data: have {points} price points, need {minimum}")]
    InsufficientData { points: usize, minimum: usize },

    #[error("signal length {signals} does not match series length {series}")]
    LengthMismatch { series: usize, signals: usize },

    #[error("invalid price series at index {index}: {reason}")]
    InvalidSeries { index: usize, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CrossoptError {
    pub(crate) fn invalid_parameter(name: &str, value: impl ToString) -> Self {
        CrossoptError::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

impl From<&CrossoptError> for std::process::ExitCode {
    fn from(err: &CrossoptError) -> Self {
        let code: u8 = match err {
            CrossoptError::Io(_) => 1,
            CrossoptError::ConfigParse { .. }
            | CrossoptError::ConfigMissing { .. }
            | CrossoptError::ConfigInvalid { .. } => 2,
            CrossoptError::DataSource { .. } => 3,
            CrossoptError::InvalidLength { .. }
            | CrossoptError::InvalidParameter { .. }
            | CrossoptError::LengthMismatch { .. } => 4,
            CrossoptError::InsufficientData { .. } | CrossoptError::InvalidSeries { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::ExitCode;

    #[test]
    fn display_insufficient_data() {
        let err = CrossoptError::InsufficientData {
            points: 1,
            minimum: 2,
        };
        assert_eq!(
            err.to_string(),
            "insufficient data: have 1 price points, need 2"
        );
    }

    #[test]
    fn display_invalid_parameter() {
        let err = CrossoptError::invalid_parameter("short_window", 0);
        assert_eq!(err.to_string(), "invalid parameter short_window = 0");
    }

    #[test]
    fn exit_codes_by_category() {
        let config = CrossoptError::ConfigMissing {
            section: "grid".into(),
            key: "short_period".into(),
        };
        assert_eq!(ExitCode::from(&config), ExitCode::from(2));

        let data = CrossoptError::DataSource {
            reason: "bad csv".into(),
        };
        assert_eq!(ExitCode::from(&data), ExitCode::from(3));

        let param = CrossoptError::InvalidLength { length: 0 };
        assert_eq!(ExitCode::from(&param), ExitCode::from(4));

        let short = CrossoptError::InsufficientData {
            points: 0,
            minimum: 2,
        };
        assert_eq!(ExitCode::from(&short), ExitCode::from(5));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CrossoptError = io.into();
        assert!(matches!(err, CrossoptError::Io(_)));
        assert_eq!(ExitCode::from(&err), ExitCode::from(1));
    }
}
