use thiserror::Error;

/// Errors surfaced by the lookup and scoring core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RentError {
    #[error("{0}")]
    NotFound(#[from] NotFound),

    #[error("{0}")]
    InvalidInput(#[from] InvalidInput),
}

impl RentError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RentError::NotFound(_))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, RentError::InvalidInput(_))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NotFound {
    #[error("area '{0}' not found")]
    Area(String),

    #[error("no {bedrooms}-bedroom data for {area}")]
    Bedrooms { area: String, bedrooms: u8 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("asking price must be positive, got {0}")]
    NonPositiveAsking(f64),

    #[error("asking price must be a finite number, got {0}")]
    NonFiniteAsking(f64),

    #[error("bedroom count must be between 1 and 4, got {0}")]
    Bedrooms(u8),

    #[error("malformed price range: min {min}, avg {avg}, max {max} (need 0 < min <= avg <= max)")]
    MalformedRange { min: f64, avg: f64, max: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err: RentError = NotFound::Bedrooms {
            area: "Yaba".to_string(),
            bedrooms: 4,
        }
        .into();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "no 4-bedroom data for Yaba");
    }

    #[test]
    fn test_invalid_input_message() {
        let err: RentError = InvalidInput::NonPositiveAsking(-5.0).into();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("-5"));
    }

    #[test]
    fn test_bedrooms_message() {
        let err: RentError = InvalidInput::Bedrooms(7).into();
        assert!(err.is_invalid_input());
        assert_eq!(err.to_string(), "bedroom count must be between 1 and 4, got 7");
    }
}
