use futures::future::join_all;
use regex::Regex;
use reqwest::header::{ACCEPT, LINK};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::{check_status, into_payload, with_token, FetchError};
use crate::config::GitHubConfig;
use crate::models::Payload;

const JSON_MEDIA: &str = "application/vnd.github+json";
const RAW_MEDIA: &str = "application/vnd.github.raw+json";

/// Countable sub-resources: payload key, endpoint path, extra query parameters.
const COLLECTIONS: &[(&str, &str, &[(&str, &str)])] = &[
    ("commits", "commits", &[]),
    ("contributors", "contributors", &[("anon", "1")]),
    ("issues", "issues", &[("state", "all")]),
    ("pulls", "pulls", &[("state", "all")]),
];

/// Fetch repository metadata from the GitHub REST API.
///
/// The repository object is fetched first; a failure there is fatal. Counts,
/// workflow runs and the README are then fetched concurrently and merged into
/// the payload. Those are best effort: a failure is logged and the keys are
/// left out, which the count reconciler renders as an empty sample.
pub async fn fetch_repo_data(
    client: &Client,
    config: &GitHubConfig,
    owner: &str,
    repo: &str,
) -> Result<Payload, FetchError> {
    let base = format!(
        "{}/repos/{}/{}",
        config.api_base.trim_end_matches('/'),
        owner,
        repo
    );
    tracing::info!(url = %base, "fetching repository");

    let response = with_token(client.get(&base).header(ACCEPT, JSON_MEDIA), &config.token_env)
        .send()
        .await?;
    let value: Value = check_status(response)
        .await?
        .json()
        .await
        .map_err(|e| FetchError::Data(format!("repository body: {e}")))?;
    let mut payload = into_payload(value)?;

    let collections = COLLECTIONS
        .iter()
        .map(|(key, path, query)| fetch_collection(client, config, &base, key, path, query));
    let (collections, actions, readme) = futures::join!(
        join_all(collections),
        fetch_actions(client, config, &base),
        fetch_readme(client, config, &base),
    );

    for ((key, _, _), result) in COLLECTIONS.iter().zip(collections) {
        merge(&mut payload, key, result);
    }
    merge(&mut payload, "actions", actions);

    match readme {
        Ok(Some(text)) => {
            payload
                .entry("readme")
                .or_insert_with(|| Value::String(text));
        }
        Ok(None) => tracing::debug!("repository has no README"),
        Err(e) => tracing::warn!(error = %e, "could not fetch README"),
    }

    Ok(payload)
}

fn merge(payload: &mut Payload, key: &str, result: Result<Vec<(String, Value)>, FetchError>) {
    match result {
        Ok(fields) => payload.extend(fields),
        Err(e) => tracing::warn!(resource = key, error = %e, "could not fetch sub-resource"),
    }
}

/// Fetch one page of size 1. With pagination, the `rel="last"` page number is
/// the exact total and lands under `{key}_count`; without it the response is
/// the whole collection and lands under `{key}` as the sample list.
async fn fetch_collection(
    client: &Client,
    config: &GitHubConfig,
    base: &str,
    key: &str,
    path: &str,
    query: &[(&str, &str)],
) -> Result<Vec<(String, Value)>, FetchError> {
    let request = client
        .get(format!("{base}/{path}"))
        .header(ACCEPT, JSON_MEDIA)
        .query(&[("per_page", "1")])
        .query(query);
    let response = check_status(with_token(request, &config.token_env).send().await?).await?;

    // Empty repositories answer the contributors endpoint with 204.
    if response.status() == StatusCode::NO_CONTENT {
        return Ok(vec![(key.to_string(), Value::Array(Vec::new()))]);
    }

    let last_page = response
        .headers()
        .get(LINK)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_last_page);
    if let Some(total) = last_page {
        return Ok(vec![(format!("{key}_count"), Value::from(total))]);
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| FetchError::Data(format!("{key} body: {e}")))?;
    match body {
        Value::Array(items) => Ok(vec![(key.to_string(), Value::Array(items))]),
        _ => Err(FetchError::Data(format!("{key}: expected a JSON array"))),
    }
}

async fn fetch_actions(
    client: &Client,
    config: &GitHubConfig,
    base: &str,
) -> Result<Vec<(String, Value)>, FetchError> {
    let request = client
        .get(format!("{base}/actions/runs"))
        .header(ACCEPT, JSON_MEDIA)
        .query(&[("per_page", "30")]);
    let response = check_status(with_token(request, &config.token_env).send().await?).await?;
    let body: Value = response
        .json()
        .await
        .map_err(|e| FetchError::Data(format!("actions body: {e}")))?;
    Ok(actions_fields(&body))
}

fn actions_fields(body: &Value) -> Vec<(String, Value)> {
    let mut fields = Vec::new();
    if let Some(total) = body.get("total_count").and_then(Value::as_u64) {
        fields.push(("actions_count".to_string(), Value::from(total)));
    }
    if let Some(runs) = body.get("workflow_runs").filter(|v| v.is_array()) {
        fields.push(("actions".to_string(), runs.clone()));
    }
    fields
}

async fn fetch_readme(
    client: &Client,
    config: &GitHubConfig,
    base: &str,
) -> Result<Option<String>, FetchError> {
    let request = client.get(format!("{base}/readme")).header(ACCEPT, RAW_MEDIA);
    let response = with_token(request, &config.token_env).send().await?;
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    Ok(Some(check_status(response).await?.text().await?))
}

/// Extract the page number of the `rel="last"` link from a `Link` header.
fn parse_last_page(link: &str) -> Option<u64> {
    let re = Regex::new(r#"<[^>]*[?&]page=(\d+)[^>]*>;\s*rel="last""#).ok()?;
    re.captures(link)?.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_last_page() {
        let link = concat!(
            r#"<https://api.github.com/repositories/1/commits?per_page=1&page=2>; rel="next", "#,
            r#"<https://api.github.com/repositories/1/commits?per_page=1&page=18234>; rel="last""#,
        );
        assert_eq!(parse_last_page(link), Some(18234));
    }

    #[test]
    fn test_parse_last_page_with_trailing_params() {
        let link =
            r#"<https://api.github.com/repos/a/b/issues?page=7&per_page=1&state=all>; rel="last""#;
        assert_eq!(parse_last_page(link), Some(7));
    }

    #[test]
    fn test_parse_last_page_missing() {
        let link = r#"<https://api.github.com/repos/a/b/commits?per_page=1&page=1>; rel="prev""#;
        assert_eq!(parse_last_page(link), None);
        assert_eq!(parse_last_page(""), None);
    }

    #[test]
    fn test_actions_fields() {
        let body = json!({ "total_count": 512, "workflow_runs": [{ "id": 1 }, { "id": 2 }] });
        let fields = actions_fields(&body);
        assert_eq!(
            fields,
            vec![
                ("actions_count".to_string(), json!(512)),
                ("actions".to_string(), json!([{ "id": 1 }, { "id": 2 }])),
            ]
        );
    }

    #[test]
    fn test_actions_fields_tolerates_missing_keys() {
        assert!(actions_fields(&json!({ "message": "Not Found" })).is_empty());
    }
}
