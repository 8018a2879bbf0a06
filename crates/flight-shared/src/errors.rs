#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Empty not allowed")]
    Empty,
    #[error("Maximum length exceeded. {max} allowed but found {actual}")]
    MaxExceeded { max: usize, actual: usize },
    #[error("Expected exactly {expected} characters but found {actual}")]
    WrongLength { expected: usize, actual: usize },
}
