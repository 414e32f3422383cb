use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    InvalidArgument(String),
    Decoding(String),
    Encoding(String),
    FileNotFound(String),
    FileUnreadable(String),
    FileUnwritable(String),
}

impl AppError {
    pub fn invalid_argument<M: Into<String>>(message: M) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn decoding<M: Into<String>>(message: M) -> Self {
        Self::Decoding(message.into())
    }

    pub fn encoding<M: Into<String>>(message: M) -> Self {
        Self::Encoding(message.into())
    }

    pub fn file_not_found<M: Into<String>>(message: M) -> Self {
        Self::FileNotFound(message.into())
    }

    pub fn file_unreadable<M: Into<String>>(message: M) -> Self {
        Self::FileUnreadable(message.into())
    }

    pub fn file_unwritable<M: Into<String>>(message: M) -> Self {
        Self::FileUnwritable(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Decoding(_) => "decoding_error",
            Self::Encoding(_) => "encoding_error",
            Self::FileNotFound(_) => "file_not_found",
            Self::FileUnreadable(_) => "file_unreadable",
            Self::FileUnwritable(_) => "file_unwritable",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidArgument(message) => message,
            Self::Decoding(message) => message,
            Self::Encoding(message) => message,
            Self::FileNotFound(message) => message,
            Self::FileUnreadable(message) => message,
            Self::FileUnwritable(message) => message,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}
