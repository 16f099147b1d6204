//! medscale-scales
//!
//! Built-in clinical scale definitions. Pure configuration: each scale is a
//! declarative [`ScaleDefinition`] whose formula, formatter, and rule
//! predicates are plain functions, so adding a scale never touches the
//! evaluation engine.

pub mod error;
pub mod scales;
pub mod scoring;
pub mod validate;

use std::sync::LazyLock;

use medscale_core::models::definition::ScaleDefinition;

use error::ScaleError;

static SCALES: LazyLock<Vec<ScaleDefinition>> = LazyLock::new(|| {
    vec![
        scales::phoenix::definition(),
        scales::stop_bang::definition(),
        scales::ckd_epi::definition(),
        scales::cha2ds2_vasc::definition(),
    ]
});

/// Return all registered scales, in display order.
pub fn all_scales() -> &'static [ScaleDefinition] {
    &SCALES
}

/// Look up a scale by ID.
pub fn get_scale(id: &str) -> Option<&'static ScaleDefinition> {
    all_scales().iter().find(|s| s.id == id)
}

/// Look up a scale by ID, failing with [`ScaleError::UnknownScale`].
pub fn require_scale(id: &str) -> Result<&'static ScaleDefinition, ScaleError> {
    get_scale(id).ok_or_else(|| ScaleError::UnknownScale(id.to_string()))
}

/// Validate every registered scale, failing on the first problem found.
pub fn check_registry() -> Result<(), ScaleError> {
    for definition in all_scales() {
        if let Some(error) = validate::validate_definition(definition).into_iter().next() {
            return Err(error.into());
        }
    }
    Ok(())
}
