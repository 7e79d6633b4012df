//! Weighted quality scoring over raw upstream payloads.
//!
//! Scorers see the raw payload, not the canonical record: they may rely on
//! upstream fields (sample lists, card metadata) that normalization drops.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use thiserror::Error;

use crate::config::ScoringConfig;
use crate::license::classifier::classify;
use crate::license::{extract_license, payload_license};
use crate::models::{LicenseRisk, Payload, ScoreBreakdown};
use crate::normalize::counts::known_count;
use crate::normalize::{resolve, resolve_opt, Presence};

const ACTIVITY: &[&str] = &["pushed_at", "updated_at", "lastModified"];
const POPULARITY: &[&str] = &["stargazers_count", "stargazers", "stars", "downloads"];

/// README length at which ramp-up is considered fully documented.
const README_FULL_CHARS: f64 = 5000.0;
/// Contributor count at which the bus factor saturates.
const CONTRIBUTORS_FULL: f64 = 10.0;
const FRESH_DAYS: i64 = 30;
const STALE_DAYS: i64 = 365;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error("invalid timestamp in `{key}`: {value}")]
    InvalidTimestamp { key: String, value: String },

    #[error("invalid scoring weights: {0}")]
    InvalidWeights(String),
}

/// Produces an ordered score breakdown from a raw payload.
pub trait Scorer {
    fn score(&self, payload: &Payload) -> Result<ScoreBreakdown, ScoreError>;
}

/// Scores license, documentation, contributor spread, activity and popularity,
/// then folds them into a weighted `net_score`.
pub struct NetScorer {
    weights: ScoringConfig,
    now: DateTime<Utc>,
}

impl NetScorer {
    pub fn new(weights: ScoringConfig) -> Self {
        Self::at(weights, Utc::now())
    }

    /// Score as of a fixed instant.
    pub fn at(weights: ScoringConfig, now: DateTime<Utc>) -> Self {
        Self { weights, now }
    }

    fn license(&self, payload: &Payload) -> f64 {
        match classify(&extract_license(&payload_license(payload), "")) {
            LicenseRisk::Permissive => 1.0,
            LicenseRisk::WeakCopyleft => 0.5,
            LicenseRisk::StrongCopyleft => 0.25,
            LicenseRisk::Proprietary | LicenseRisk::Unknown => 0.0,
        }
    }

    fn ramp_up(&self, payload: &Payload) -> f64 {
        let readme: String = resolve(payload, &["readme"], String::new(), Presence::Present);
        (readme.chars().count() as f64 / README_FULL_CHARS).min(1.0)
    }

    fn bus_factor(&self, payload: &Payload) -> f64 {
        (known_count(payload, "contributors") as f64 / CONTRIBUTORS_FULL).min(1.0)
    }

    fn responsive_maintainer(&self, payload: &Payload) -> Result<f64, ScoreError> {
        let Some((key, raw)) = ACTIVITY.iter().find_map(|key| {
            resolve_opt::<String>(payload, &[*key], Presence::NonBlank).map(|v| (*key, v))
        }) else {
            return Ok(0.0);
        };

        let last = DateTime::parse_from_rfc3339(&raw).map_err(|_| ScoreError::InvalidTimestamp {
            key: key.to_string(),
            value: raw.clone(),
        })?;
        let age_days = (self.now - last.with_timezone(&Utc)).num_days();

        Ok(if age_days <= FRESH_DAYS {
            1.0
        } else if age_days >= STALE_DAYS {
            0.0
        } else {
            1.0 - (age_days - FRESH_DAYS) as f64 / (STALE_DAYS - FRESH_DAYS) as f64
        })
    }

    fn popularity(&self, payload: &Payload) -> f64 {
        let n: u64 = resolve(payload, POPULARITY, 0, Presence::Present);
        ((n as f64 + 1.0).log10() / 5.0).min(1.0)
    }

    fn weighted(&self, metrics: &ScoreBreakdown) -> Result<f64, ScoreError> {
        let w = &self.weights;
        let pairs = [
            ("license", w.license),
            ("ramp_up", w.ramp_up),
            ("bus_factor", w.bus_factor),
            ("responsive_maintainer", w.responsive_maintainer),
            ("popularity", w.popularity),
        ];

        let invalid = pairs
            .iter()
            .find(|(_, weight)| *weight < 0.0 || !weight.is_finite());
        if let Some((name, _)) = invalid {
            return Err(ScoreError::InvalidWeights(format!(
                "`{name}` must be a non-negative number"
            )));
        }
        let total: f64 = pairs.iter().map(|(_, weight)| weight).sum();
        if total <= 0.0 {
            return Err(ScoreError::InvalidWeights("weights sum to zero".to_string()));
        }

        let sum: f64 = pairs
            .iter()
            .map(|(name, weight)| metrics.get(*name).copied().unwrap_or(0.0) * weight)
            .sum();
        Ok(sum / total)
    }
}

impl Scorer for NetScorer {
    fn score(&self, payload: &Payload) -> Result<ScoreBreakdown, ScoreError> {
        let mut scores = ScoreBreakdown::new();
        scores.insert("license".to_string(), self.license(payload));
        scores.insert("ramp_up".to_string(), self.ramp_up(payload));
        scores.insert("bus_factor".to_string(), self.bus_factor(payload));
        scores.insert(
            "responsive_maintainer".to_string(),
            self.responsive_maintainer(payload)?,
        );
        scores.insert("popularity".to_string(), self.popularity(payload));

        let net = self.weighted(&scores)?;
        scores.insert("net_score".to_string(), net);

        tracing::debug!(net_score = net, "scored payload");
        Ok(scores)
    }
}

/// Score the raw payload and format each metric with three decimals, in scorer order.
///
/// Scorer failures are returned unchanged.
pub fn render_scores(
    scorer: &dyn Scorer,
    payload: &Payload,
) -> Result<IndexMap<String, String>, ScoreError> {
    let scores = scorer.score(payload)?;
    Ok(scores
        .into_iter()
        .map(|(name, value)| (name, format!("{value:.3}")))
        .collect())
}
