use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlogError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    ApiStatusError { status: u16, body: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid data format")]
    InvalidData,

    #[error("Markup rewriting failed: {message}")]
    MarkupError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl BlogError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            BlogError::ConfigError { .. }
                | BlogError::MissingConfigError { .. }
                | BlogError::InvalidConfigValueError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BlogError::ApiError(e) if e.is_timeout() => {
                "The content service did not answer in time".to_string()
            }
            BlogError::ApiError(_) => "Could not reach the content service".to_string(),
            BlogError::ApiStatusError { status, .. } => {
                format!("The content service rejected the request (HTTP {})", status)
            }
            BlogError::InvalidData => {
                "The content service returned posts in an unexpected format".to_string()
            }
            BlogError::MarkupError { .. } => "A post body could not be processed".to_string(),
            BlogError::IoError(e) => format!("File system error: {}", e),
            BlogError::ConfigError { .. }
            | BlogError::MissingConfigError { .. }
            | BlogError::InvalidConfigValueError { .. } => format!("Invalid configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BlogError::ApiError(_) => "Check network access and the API base URL",
            BlogError::ApiStatusError { status: 401 | 403, .. } => {
                "Check AGILITY_GUID and AGILITY_API_KEY; preview mode needs a preview key"
            }
            BlogError::ApiStatusError { status: 404, .. } => {
                "Check the content reference name and locale"
            }
            BlogError::ApiStatusError { .. } => "Retry later or check the Agility status page",
            BlogError::InvalidData => {
                "Make sure every post has title, slug, date and content text fields"
            }
            BlogError::MarkupError { .. } => "Inspect the post content HTML in the CMS",
            BlogError::IoError(_) => "Check that the output path exists and is writable",
            BlogError::ConfigError { .. }
            | BlogError::MissingConfigError { .. }
            | BlogError::InvalidConfigValueError { .. } => {
                "Set the missing value via flag, environment variable or config file"
            }
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            e if e.is_config_error() => 2,
            BlogError::ApiError(_) | BlogError::ApiStatusError { .. } => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, BlogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_data_message_is_generic() {
        assert_eq!(BlogError::InvalidData.to_string(), "Invalid data format");
    }

    #[test]
    fn test_exit_codes() {
        let missing = BlogError::MissingConfigError {
            field: "guid".to_string(),
        };
        assert_eq!(missing.exit_code(), 2);
        assert!(missing.is_config_error());

        let status = BlogError::ApiStatusError {
            status: 401,
            body: String::new(),
        };
        assert_eq!(status.exit_code(), 3);
        assert!(status.recovery_suggestion().contains("AGILITY_API_KEY"));

        assert_eq!(BlogError::InvalidData.exit_code(), 1);
    }
}
