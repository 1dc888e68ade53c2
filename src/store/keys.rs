use crate::constants::MAX_KEY_LEN;
use crate::store::StoreError;

fn validate_key_component(kind: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("{kind} must not be empty")));
    }
    if value.len() > MAX_KEY_LEN {
        return Err(StoreError::Validation(format!(
            "{kind} exceeds {MAX_KEY_LEN} bytes"
        )));
    }
    if value.chars().any(char::is_control) {
        return Err(StoreError::Validation(format!(
            "{kind} must not contain control characters"
        )));
    }
    Ok(())
}

pub fn profile_key(key: &str) -> Result<String, StoreError> {
    validate_key_component("profile key", key)?;
    Ok(key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_key_passes_through_valid_keys() {
        assert_eq!(profile_key("masteryProfile").unwrap(), "masteryProfile");
    }

    #[test]
    fn profile_key_rejects_bad_input() {
        assert!(matches!(profile_key(""), Err(StoreError::Validation(_))));
        assert!(matches!(profile_key("   "), Err(StoreError::Validation(_))));
        assert!(matches!(profile_key("a\nb"), Err(StoreError::Validation(_))));
        let long = "k".repeat(MAX_KEY_LEN + 1);
        assert!(matches!(profile_key(&long), Err(StoreError::Validation(_))));
    }
}
