use serde::Serialize;
use serde_json::Value;

use crate::config::Defaults;
use crate::models::Payload;
use crate::normalize::{resolve, Presence};

/// Pre-rendered count descriptions for the five countable repository attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountSummary {
    pub commits: String,
    pub contributors: String,
    pub issues: String,
    pub pulls: String,
    pub actions: String,
}

impl CountSummary {
    pub fn from_payload(payload: &Payload, defaults: &Defaults) -> Self {
        CountSummary {
            commits: describe_count(payload, "commits", "commits", defaults),
            contributors: describe_count(payload, "contributors", "contributors", defaults),
            issues: describe_count(payload, "issues", "issues", defaults),
            pulls: describe_count(payload, "pulls", "pull requests", defaults),
            actions: describe_count(payload, "actions", "actions runs", defaults),
        }
    }

    /// Descriptions in display order.
    pub fn lines(&self) -> [&str; 5] {
        [
            self.commits.as_str(),
            self.contributors.as_str(),
            self.issues.as_str(),
            self.pulls.as_str(),
            self.actions.as_str(),
        ]
    }
}

/// Describe a countable collection, preferring an exact total over a sample.
///
/// A positive `{key}_count` renders as a total. Otherwise the length of the
/// sample list under `{key}` is shown as a lower bound. An explicit zero
/// count is indistinguishable from a missing one and takes the sample path.
pub fn describe_count(
    payload: &Payload,
    key: &str,
    display_name: &str,
    defaults: &Defaults,
) -> String {
    let count_key = format!("{key}_count");
    let count: u64 = resolve(payload, &[count_key.as_str()], 0, Presence::Present);

    if count > 0 {
        return format!("Total {}: {}", display_name, group_thousands(count));
    }

    let sample = sample_len(payload, key);
    format!(
        "Recent {}: {} (showing first {})",
        display_name, sample, defaults.sample_size
    )
}

/// Best-known size of a countable collection: the total when known, else the sample length.
pub fn known_count(payload: &Payload, key: &str) -> u64 {
    let count_key = format!("{key}_count");
    let count: u64 = resolve(payload, &[count_key.as_str()], 0, Presence::Present);
    if count > 0 {
        count
    } else {
        sample_len(payload, key) as u64
    }
}

fn sample_len(payload: &Payload, key: &str) -> usize {
    payload
        .get(key)
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

/// Format an integer with `,` thousands separators.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
