use crate::config::Defaults;
use crate::license::{extract_license, payload_license};
use crate::models::{ModelRecord, Payload};
use crate::normalize::{resolve, resolve_opt, Presence};

const MODEL_NAME: &[&str] = &["modelId", "id"];
const AUTHOR: &[&str] = &["author"];
const DESCRIPTION: &[&str] = &["description"];
const MODEL_SIZE: &[&str] = &["modelSize"];
const DOWNLOADS: &[&str] = &["downloads"];
const LAST_MODIFIED: &[&str] = &["lastModified"];
const README: &[&str] = &["readme"];
const TAGS: &[&str] = &["tags"];
const TASK: &[&str] = &["pipeline_tag"];

/// Build a canonical model record from a Hub-shaped payload.
///
/// `model_id` is the identity fallback when the payload names no model.
pub fn normalize_model(payload: &Payload, model_id: &str, defaults: &Defaults) -> ModelRecord {
    ModelRecord {
        model_name: resolve(payload, MODEL_NAME, model_id.to_string(), Presence::NonBlank),
        author: resolve(payload, AUTHOR, defaults.unknown.clone(), Presence::NonBlank),
        description: resolve(payload, DESCRIPTION, String::new(), Presence::Present),
        model_size: resolve(payload, MODEL_SIZE, 0, Presence::Present),
        downloads: resolve(payload, DOWNLOADS, 0, Presence::Present),
        last_modified: resolve(
            payload,
            LAST_MODIFIED,
            defaults.unknown.clone(),
            Presence::NonBlank,
        ),
        readme: resolve(payload, README, String::new(), Presence::Present),
        license_name: extract_license(&payload_license(payload), &defaults.no_license),
        tags: resolve(payload, TAGS, Vec::new(), Presence::Present),
        task: resolve_opt(payload, TASK, Presence::NonBlank),
    }
}
