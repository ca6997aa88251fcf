use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    WrongParamCount(String),
    TypeMismatch { expected: String, actual: String },
    FunctionNotFound(String),
    ColumnNotFound(usize),
    InvalidDecimal(String),
    Internal(String),
}

impl Error {
    pub fn wrong_param_count(func: impl Into<String>) -> Self {
        Error::WrongParamCount(func.into())
    }

    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Error::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn function_not_found(name: impl Into<String>) -> Self {
        Error::FunctionNotFound(name.into())
    }

    pub fn column_not_found(index: usize) -> Self {
        Error::ColumnNotFound(index)
    }

    pub fn invalid_decimal(text: impl Into<String>) -> Self {
        Error::InvalidDecimal(text.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // The exact wording is part of the client-visible contract.
            Error::WrongParamCount(func) => write!(
                f,
                "Incorrect parameter count in the call to native function '{}'",
                func
            ),
            Error::TypeMismatch { expected, actual } => {
                write!(f, "Type mismatch: expected {}, got {}", expected, actual)
            }
            Error::FunctionNotFound(name) => write!(f, "Function not found: {}", name),
            Error::ColumnNotFound(index) => write!(f, "Column not found at index {}", index),
            Error::InvalidDecimal(text) => write!(f, "Invalid decimal value: '{}'", text),
            Error::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_param_count_message() {
        let err = Error::wrong_param_count("values");
        assert_eq!(
            err.to_string(),
            "Incorrect parameter count in the call to native function 'values'"
        );
    }
}
