//! Configuration validation.
//!
//! Collects every out-of-range value into a single `ConfigError`.

use crate::schema::MozviewConfig;
use mozview_common::ConfigError;


const MAX_VIEW_EXTENT: f64 = 16384.0;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &MozviewConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_range_f64(&mut errors, "view.width", config.view.width, 0.0, MAX_VIEW_EXTENT);
    validate_range_f64(&mut errors, "view.height", config.view.height, 0.0, MAX_VIEW_EXTENT);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Push an error if `value` is outside `[min, max]`. NaN is always out of range.
fn validate_range_f64(errors: &mut Vec<String>, name: &str, value: f64, min: f64, max: f64) {
    if !(min..=max).contains(&value) {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
