//! License descriptors as they arrive from upstream, and their risk class.
//!
//! GitHub reports `license` as an object carrying an `spdx_id`; the Hub
//! reports a bare lowercase string (or nothing). [`LicenseField`] closes over
//! both shapes plus absence so extraction is a total function.
//!
//! - [`classifier`]: maps a license string to a [`LicenseRisk`](crate::models::LicenseRisk).

pub mod classifier;

use serde_json::Value;

use crate::models::Payload;

/// The three shapes a license descriptor can take.
#[derive(Debug, Clone, PartialEq)]
pub enum LicenseField {
    /// `{"spdx_id": "MIT", ...}`; `identifier` is `None` when the sub-field is missing.
    Structured { identifier: Option<String> },
    Plain(String),
    Absent,
}

impl LicenseField {
    /// Classify a raw JSON value. Shapes other than object or string count as absent.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Object(map)) => LicenseField::Structured {
                identifier: map
                    .get("spdx_id")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            Some(Value::String(s)) => LicenseField::Plain(s.clone()),
            _ => LicenseField::Absent,
        }
    }
}

/// Locate the license descriptor in a raw payload.
///
/// GitHub and the Hub both use a top-level `license`; Hub payloads may instead
/// carry it inside the model card metadata (`cardData.license`).
pub fn payload_license(payload: &Payload) -> LicenseField {
    match LicenseField::from_value(payload.get("license")) {
        LicenseField::Absent => LicenseField::from_value(
            payload
                .get("cardData")
                .and_then(Value::as_object)
                .and_then(|card| card.get("license")),
        ),
        field => field,
    }
}

/// Reduce a license descriptor to a single display string.
///
/// Empty or missing identifiers become `none_label` (`"None"` by default).
pub fn extract_license(field: &LicenseField, none_label: &str) -> String {
    let name = match field {
        LicenseField::Structured { identifier } => identifier.as_deref(),
        LicenseField::Plain(s) => Some(s.as_str()),
        LicenseField::Absent => None,
    };
    match name {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => none_label.to_string(),
    }
}
