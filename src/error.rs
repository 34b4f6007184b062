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

    /// Input file unreadable or required column missing.
    pub fn input(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// No usable rows in a dataset (axis range cannot be computed).
    pub fn empty(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    /// Chart backend failed while drawing.
    pub fn render(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    /// Output artifact could not be written.
    pub fn write(message: impl Into<String>) -> Self {
        Self::new(5, message)
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
