//! Validation helpers for DTOs.

use validator::ValidationError;

/// Validates that a penalty player number is at most two digits.
///
/// The empty string is allowed (nothing entered yet) and `"00"` is the
/// conventional placeholder for an unspecified player.
///
/// # Examples
///
/// ```ignore
/// validate_player_number("12") // Ok
/// validate_player_number("00") // Ok
/// validate_player_number("")   // Ok
/// validate_player_number("123") // Err - too long
/// validate_player_number("1a")  // Err - not numeric
/// ```
pub fn validate_player_number(value: &str) -> Result<(), ValidationError> {
    if value.len() > 2 {
        let mut err = ValidationError::new("player_number_length");
        err.message = Some(
            format!(
                "Player number must be at most 2 digits (got {})",
                value.len()
            )
            .into(),
        );
        return Err(err);
    }

    if !value.chars().all(|c| c.is_ascii_digit()) {
        let mut err = ValidationError::new("player_number_format");
        err.message = Some("Player number must contain only digits".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_player_number_valid() {
        assert!(validate_player_number("00").is_ok());
        assert!(validate_player_number("7").is_ok());
        assert!(validate_player_number("99").is_ok());
        assert!(validate_player_number("").is_ok());
    }

    #[test]
    fn test_validate_player_number_invalid_length() {
        assert!(validate_player_number("123").is_err());
        assert!(validate_player_number("0000").is_err());
    }

    #[test]
    fn test_validate_player_number_invalid_format() {
        assert!(validate_player_number("1a").is_err());
        assert!(validate_player_number("#4").is_err());
        assert!(validate_player_number(" 4").is_err());
    }
}
