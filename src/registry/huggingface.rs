use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::{check_status, into_payload, with_token, FetchError};
use crate::config::HuggingFaceConfig;
use crate::models::Payload;

/// Fetch model metadata from the Hugging Face Hub API.
///
/// The model card README is merged in under `readme` when the repository has
/// one; a missing or unreachable README is not an error.
pub async fn fetch_hf_model(
    client: &Client,
    config: &HuggingFaceConfig,
    model_id: &str,
) -> Result<Payload, FetchError> {
    let base = config.api_base.trim_end_matches('/');
    let url = format!("{base}/api/models/{model_id}");
    tracing::info!(url = %url, "fetching model");

    let response = with_token(client.get(&url), &config.token_env).send().await?;
    let value: Value = check_status(response)
        .await?
        .json()
        .await
        .map_err(|e| FetchError::Data(format!("model body: {e}")))?;
    let mut payload = into_payload(value)?;

    match fetch_readme(client, config, base, model_id).await {
        Ok(Some(text)) => {
            payload
                .entry("readme")
                .or_insert_with(|| Value::String(text));
        }
        Ok(None) => tracing::debug!(model_id, "model has no README"),
        Err(e) => tracing::warn!(model_id, error = %e, "could not fetch model README"),
    }

    Ok(payload)
}

async fn fetch_readme(
    client: &Client,
    config: &HuggingFaceConfig,
    base: &str,
    model_id: &str,
) -> Result<Option<String>, FetchError> {
    let url = format!("{base}/{model_id}/raw/main/README.md");
    let response = with_token(client.get(&url), &config.token_env).send().await?;
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    Ok(Some(check_status(response).await?.text().await?))
}
