use crate::config::Defaults;
use crate::license::{extract_license, LicenseField};
use crate::models::{Payload, RepositoryRecord};
use crate::normalize::{resolve, Presence};

// Candidate keys, highest priority first. The same quantity arrives under
// different names depending on which API shape produced the payload.
const FULL_NAME: &[&str] = &["full_name"];
const STARS: &[&str] = &["stargazers_count", "stargazers", "stars"];
const FORKS: &[&str] = &["forks_count", "forks"];
const LANGUAGE: &[&str] = &["language", "primary_language"];
const UPDATED: &[&str] = &["pushed_at", "updated_at", "lastModified"];
const OPEN_ISSUES: &[&str] = &["open_issues_count", "open_issues"];
const SIZE: &[&str] = &["size"];
const DESCRIPTION: &[&str] = &["description"];
const DEFAULT_BRANCH: &[&str] = &["default_branch"];
const README: &[&str] = &["readme"];

/// Build a canonical repository record from a GitHub-shaped payload.
///
/// `owner` and `repo` only serve as the identity fallback when the payload
/// carries no `full_name`.
pub fn normalize_repository(
    payload: &Payload,
    owner: &str,
    repo: &str,
    defaults: &Defaults,
) -> RepositoryRecord {
    RepositoryRecord {
        full_name: resolve(payload, FULL_NAME, format!("{owner}/{repo}"), Presence::NonBlank),
        stars: resolve(payload, STARS, 0, Presence::Present),
        forks: resolve(payload, FORKS, 0, Presence::Present),
        language: resolve(payload, LANGUAGE, defaults.not_available.clone(), Presence::NonBlank),
        updated: resolve(payload, UPDATED, defaults.not_available.clone(), Presence::NonBlank),
        open_issues: resolve(payload, OPEN_ISSUES, 0, Presence::Present),
        size: resolve(payload, SIZE, 0, Presence::Present),
        license_name: extract_license(
            &LicenseField::from_value(payload.get("license")),
            &defaults.no_license,
        ),
        description: resolve(
            payload,
            DESCRIPTION,
            defaults.no_description.clone(),
            Presence::NonBlank,
        ),
        default_branch: resolve(
            payload,
            DEFAULT_BRANCH,
            defaults.default_branch.clone(),
            Presence::NonBlank,
        ),
        readme: resolve(payload, README, String::new(), Presence::Present),
    }
}
