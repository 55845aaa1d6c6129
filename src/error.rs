/// Application-level failure carrying the process exit code.
///
/// Exit codes:
/// - `2`: configuration, CLI or local IO problems
/// - `3`: the storm data source could not be loaded or queried
/// - `4`: baseline/normalization could not be computed
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// A baseline window that cannot be used for normalization.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<crate::data::SourceError> for AppError {
    fn from(err: crate::data::SourceError) -> Self {
        AppError::new(3, format!("Storm data source failed: {err}"))
    }
}
