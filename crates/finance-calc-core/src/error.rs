use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    /// A balance or factor grew past what a 96-bit decimal can hold.
    #[error("Numeric overflow in {context}")]
    Overflow { context: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl FinanceError {
    /// Shorthand for the common `InvalidInput` case raised by `validate()`.
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        FinanceError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn overflow(context: impl Into<String>) -> Self {
        FinanceError::Overflow {
            context: context.into(),
        }
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(e: serde_json::Error) -> Self {
        FinanceError::SerializationError(e.to_string())
    }
}
