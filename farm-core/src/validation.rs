//! Input validation helpers

use regex::Regex;
use std::sync::OnceLock;

use crate::constants::{MAX_BOUNDARY_POINTS, MAX_CROPS_PER_FARMER};
use crate::error::{FarmError, FarmResult};
use crate::types::{Coordinates, FieldBoundary};

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+[1-9][0-9]{7,14}$").expect("static regex"))
}

/// Validate an E.164 phone number ("+919876543210")
pub fn validate_phone(phone: &str) -> FarmResult<()> {
    if phone_regex().is_match(phone) {
        Ok(())
    } else {
        Err(FarmError::Validation(format!(
            "Invalid phone number (expected E.164): {phone}"
        )))
    }
}

/// Validate WGS84 bounds
pub fn validate_coordinates(coords: &Coordinates) -> FarmResult<()> {
    if coords.is_valid() {
        Ok(())
    } else {
        Err(FarmError::Validation(format!(
            "Coordinates out of range: lat={}, lng={}",
            coords.lat, coords.lng
        )))
    }
}

/// Validate a language code: 2 to 8 lowercase ASCII letters or hyphens
pub fn validate_language(language: &str) -> FarmResult<()> {
    let ok = (2..=8).contains(&language.len())
        && language
            .chars()
            .all(|c| c.is_ascii_lowercase() || c == '-');
    if ok {
        Ok(())
    } else {
        Err(FarmError::Validation(format!(
            "Invalid language code: {language}"
        )))
    }
}

/// Validate a crop list against size limits
pub fn validate_crops(crops: &[String]) -> FarmResult<()> {
    if crops.len() > MAX_CROPS_PER_FARMER {
        return Err(FarmError::Validation(format!(
            "Too many crops: {} (max {})",
            crops.len(),
            MAX_CROPS_PER_FARMER
        )));
    }
    if crops.iter().any(|c| c.trim().is_empty()) {
        return Err(FarmError::Validation("Empty crop name".to_string()));
    }
    Ok(())
}

/// Validate field boundaries: point limits and coordinate ranges
pub fn validate_boundaries(boundaries: &[FieldBoundary]) -> FarmResult<()> {
    for boundary in boundaries {
        if boundary.ring.len() > MAX_BOUNDARY_POINTS {
            return Err(FarmError::Validation(format!(
                "Boundary '{}' has too many points: {} (max {})",
                boundary.name,
                boundary.ring.len(),
                MAX_BOUNDARY_POINTS
            )));
        }
        for point in &boundary.ring {
            validate_coordinates(point)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_phones() {
        assert!(validate_phone("+919876543210").is_ok());
        assert!(validate_phone("+15551234567").is_ok());
        assert!(validate_phone("+254712345678").is_ok());
    }

    #[test]
    fn test_invalid_phones() {
        assert!(validate_phone("9876543210").is_err());
        assert!(validate_phone("+0123").is_err());
        assert!(validate_phone("+91 98765 43210").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_language_codes() {
        assert!(validate_language("kn").is_ok());
        assert!(validate_language("en-in").is_ok());
        assert!(validate_language("EN").is_err());
        assert!(validate_language("x").is_err());
    }

    #[test]
    fn test_crop_limits() {
        assert!(validate_crops(&["ragi".to_string(), "paddy".to_string()]).is_ok());
        assert!(validate_crops(&["".to_string()]).is_err());
        let many: Vec<String> = (0..=MAX_CROPS_PER_FARMER).map(|i| format!("crop{i}")).collect();
        assert!(validate_crops(&many).is_err());
    }
}
