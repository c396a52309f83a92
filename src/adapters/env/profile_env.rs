//! Environment-variable boundary for profile attribute values.
//!
//! The outer chat application consumes profiles as `NEUROTYPE_*`
//! environment variables. Rendering and parsing go through the attribute
//! vocabulary tables, so every token round-trips unchanged.

use std::collections::HashMap;

use crate::domain::foundation::ValidationError;
use crate::domain::profile::{
    AttributeKind, AttributeValue, NeurotypeProfile, ProfileTemplate,
};

const ENV_PREFIX: &str = "NEUROTYPE_";

/// Environment variable name for an attribute.
pub fn env_key(kind: AttributeKind) -> String {
    format!("{}{}", ENV_PREFIX, kind.as_str().to_uppercase())
}

/// Renders a profile as an env-file template.
///
/// Unset attributes fall back to the supplied template so the rendered
/// file is always complete.
pub fn render_env_file(profile: &NeurotypeProfile, template: &ProfileTemplate) -> String {
    let mut out = String::new();
    out.push_str("# Neurotype Profile Configuration\n");
    out.push_str(&format!("# Generated for: {}\n\n", profile.user_id()));

    for kind in AttributeKind::all() {
        let value = profile
            .value_of(*kind)
            .unwrap_or_else(|| template.value_of(*kind));
        out.push_str(&format!("{}={}\n", env_key(*kind), value.as_str()));
    }
    out
}

/// Parses attribute values from an environment-variable map.
///
/// Unknown `NEUROTYPE_*` keys and out-of-domain tokens are rejected;
/// variables outside the prefix are ignored.
pub fn parse_env(
    vars: &HashMap<String, String>,
) -> Result<Vec<AttributeValue>, ValidationError> {
    let mut values = Vec::new();

    for (key, raw) in vars {
        let Some(suffix) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let kind: AttributeKind = suffix.to_lowercase().parse()?;
        values.push(AttributeValue::parse(kind, raw.trim())?);
    }

    values.sort_by_key(|v| v.kind().as_str());
    Ok(values)
}
