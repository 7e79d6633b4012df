//! Reconciles raw upstream payloads into canonical records.
//!
//! - [`resolve`]: ordered candidate-key lookup with a typed default.
//! - [`counts`]: total-count versus sample-list descriptions.
//! - [`repository`]: GitHub-shaped payload to a canonical repository record.
//! - [`model`]: Hub-shaped payload to a canonical model record.
//!
//! Every function here is total: a missing or mistyped field falls back to a
//! documented default and never produces an error.

pub mod counts;
pub mod model;
pub mod repository;

use serde_json::Value;

use crate::models::Payload;

/// How strict a candidate must be before it wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Any present, non-null value of the right type wins, including `0` and `""`.
    Present,
    /// Only non-blank values win: non-empty strings and lists, non-zero numbers.
    NonBlank,
}

/// A field type the resolver can extract from a JSON value.
pub trait FieldValue: Sized {
    /// Convert `value`, or `None` when it has the wrong shape.
    fn from_json(value: &Value) -> Option<Self>;

    fn is_blank(&self) -> bool;
}

impl FieldValue for String {
    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }

    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for u64 {
    fn from_json(value: &Value) -> Option<Self> {
        if let Some(n) = value.as_u64() {
            return Some(n);
        }
        // Some APIs report integral counts as floats (e.g. `12.0`).
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f < u64::MAX as f64)
            .map(|f| f as u64)
    }

    fn is_blank(&self) -> bool {
        *self == 0
    }
}

impl FieldValue for Vec<String> {
    fn from_json(value: &Value) -> Option<Self> {
        let items = value.as_array()?;
        Some(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        )
    }

    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

/// Return the value of the first candidate key that satisfies `presence`,
/// trying `keys` in priority order, or `default` when none does.
pub fn resolve<T: FieldValue>(
    payload: &Payload,
    keys: &[&str],
    default: T,
    presence: Presence,
) -> T {
    resolve_opt(payload, keys, presence).unwrap_or(default)
}

/// Like [`resolve`] but reports "nothing matched" as `None`.
pub fn resolve_opt<T: FieldValue>(
    payload: &Payload,
    keys: &[&str],
    presence: Presence,
) -> Option<T> {
    keys.iter()
        .filter_map(|key| payload.get(*key))
        .filter(|value| !value.is_null())
        .filter_map(T::from_json)
        .find(|value| presence == Presence::Present || !value.is_blank())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_first_listed_key_wins() {
        let p = payload(json!({ "stargazers_count": 5, "stargazers": 9 }));
        let stars: u64 = resolve(&p, &["stargazers_count", "stargazers"], 0, Presence::Present);
        assert_eq!(stars, 5);
    }

    #[test]
    fn test_falls_through_absent_keys() {
        let p = payload(json!({ "stars": 7 }));
        let keys = ["stargazers_count", "stargazers", "stars"];
        let stars: u64 = resolve(&p, &keys, 0, Presence::Present);
        assert_eq!(stars, 7);
    }

    #[test]
    fn test_present_zero_beats_later_key() {
        let p = payload(json!({ "forks_count": 0, "forks": 12 }));
        let forks: u64 = resolve(&p, &["forks_count", "forks"], 0, Presence::Present);
        assert_eq!(forks, 0);
    }

    #[test]
    fn test_non_blank_skips_empty_string() {
        let p = payload(json!({ "language": "", "primary_language": "Rust" }));
        let keys = ["language", "primary_language"];
        let lang = resolve(&p, &keys, "N/A".to_string(), Presence::NonBlank);
        assert_eq!(lang, "Rust");
    }

    #[test]
    fn test_null_and_wrong_type_are_skipped() {
        let p = payload(json!({ "a": null, "b": "twelve", "c": 12 }));
        let n: u64 = resolve(&p, &["a", "b", "c"], 0, Presence::Present);
        assert_eq!(n, 12);
    }

    #[test]
    fn test_negative_numbers_are_rejected() {
        let p = payload(json!({ "size": -4 }));
        let n: u64 = resolve(&p, &["size"], 0, Presence::Present);
        assert_eq!(n, 0);
    }

    #[test]
    fn test_integral_float_is_accepted() {
        let p = payload(json!({ "downloads": 12.0, "other": 1.5 }));
        assert_eq!(resolve::<u64>(&p, &["downloads"], 0, Presence::Present), 12);
        assert_eq!(resolve::<u64>(&p, &["other"], 3, Presence::Present), 3);
    }

    #[test]
    fn test_out_of_range_float_is_skipped() {
        let p = payload(json!({ "downloads": 18446744073709551616.0, "likes": 7 }));
        let n: u64 = resolve(&p, &["downloads", "likes"], 0, Presence::Present);
        assert_eq!(n, 7);
    }

    #[test]
    fn test_default_when_nothing_matches() {
        let p = Payload::new();
        let s = resolve(&p, &["x", "y"], "fallback".to_string(), Presence::NonBlank);
        assert_eq!(s, "fallback");
        assert_eq!(resolve_opt::<String>(&p, &["x"], Presence::Present), None);
    }

    #[test]
    fn test_string_list_drops_non_strings() {
        let p = payload(json!({ "tags": ["nlp", 3, null, "bert"] }));
        let tags: Vec<String> = resolve(&p, &["tags"], Vec::new(), Presence::Present);
        assert_eq!(tags, vec!["nlp", "bert"]);
    }
}
