use crate::error::ReviewError;

const MAX_TITLE_CHARS: usize = 255;

/// Validate a card title
///
/// # Examples
/// ```
/// use rmf_review::validation::validate_title;
///
/// assert!(validate_title("Photosynthesis").is_ok());
/// assert!(validate_title("   ").is_err());
/// ```
pub fn validate_title(title: &str) -> Result<(), ReviewError> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ReviewError::Validation(
            "Card title cannot be empty".to_string(),
        ));
    }

    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(ReviewError::Validation(format!(
            "Card title must be at most {} characters long",
            MAX_TITLE_CHARS
        )));
    }

    Ok(())
}

/// Validate a difficulty range used for filtering cards
pub fn validate_difficulty_range(min: f64, max: f64) -> Result<(), ReviewError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ReviewError::Validation(
            "Difficulty bounds must be finite numbers".to_string(),
        ));
    }

    if min > max {
        return Err(ReviewError::Validation(format!(
            "Invalid difficulty range: {} is greater than {}",
            min, max
        )));
    }

    Ok(())
}
