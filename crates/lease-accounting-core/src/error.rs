use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeaseError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid classification: {0}")]
    InvalidClassification(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message_names_field() {
        let err = LeaseError::InvalidInput {
            field: "lease_term_periods".into(),
            reason: "must be at least 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid input: lease_term_periods — must be at least 1"
        );
    }

    #[test]
    fn test_division_by_zero_message_names_context() {
        let err = LeaseError::DivisionByZero {
            context: "straight-line allocation over zero periods".into(),
        };
        assert_eq!(
            err.to_string(),
            "Division by zero in straight-line allocation over zero periods"
        );
    }
}
