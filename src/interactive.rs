//! Menu-driven lookups for a human at a terminal.
//!
//! Lookup failures are reported and the menu continues; only I/O errors on
//! the prompt streams end the session early. End of input exits cleanly.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::catalog::Catalog;
use crate::registry::FetchError;

const DEFAULT_OWNER: &str = "huggingface";
const DEFAULT_REPO: &str = "transformers";
const DEFAULT_MODEL: &str = "bert-base-uncased";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Repository,
    Model,
    Exit,
}

impl Choice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Choice::Repository),
            "2" => Some(Choice::Model),
            "3" => Some(Choice::Exit),
            _ => None,
        }
    }
}

pub async fn run<R: BufRead, W: Write>(
    catalog: &Catalog,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "🤖 Welcome to AI Model Catalog!")?;
    writeln!(out, "Choose an option to explore AI models:")?;
    writeln!(out, "1. Browse GitHub repositories (e.g., Hugging Face Transformers)")?;
    writeln!(out, "2. Search Hugging Face models")?;
    writeln!(out, "3. Exit")?;

    loop {
        write!(out, "\nEnter your choice (1-3): ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            break;
        };

        match Choice::parse(&line) {
            Some(Choice::Repository) => {
                writeln!(out, "\n📁 GitHub Repository Browser")?;
                let owner = prompt(input, out, "Enter repository owner", DEFAULT_OWNER)?;
                let Some(owner) = owner else { break };
                let repo = prompt(input, out, "Enter repository name", DEFAULT_REPO)?;
                let Some(repo) = repo else { break };
                writeln!(out, "\nFetching data for {owner}/{repo}...")?;
                if let Err(e) = catalog.show_repository(&owner, &repo, out).await {
                    writeln!(out, "{}", failure_message("repository", &e))?;
                }
            }
            Some(Choice::Model) => {
                writeln!(out, "\n🤗 Hugging Face Model Search")?;
                let Some(model_id) = prompt(input, out, "Enter model ID", DEFAULT_MODEL)? else {
                    break;
                };
                writeln!(out, "\nFetching data for model: {model_id}...")?;
                if let Err(e) = catalog.show_model(&model_id, out).await {
                    writeln!(out, "{}", failure_message("model", &e))?;
                }
            }
            Some(Choice::Exit) => break,
            None => {
                writeln!(out, "❌ Invalid choice. Please enter 1, 2, or 3.")?;
                continue;
            }
        }

        write!(out, "\nWould you like to explore another model? (y/n): ")?;
        out.flush()?;
        match read_line(input)? {
            Some(answer) if wants_another(&answer) => {}
            _ => break,
        }
    }

    writeln!(out, "👋 Goodbye!")?;
    Ok(())
}

/// Rejected requests and unusable payloads get a message naming what was
/// being fetched; anything else is reported generically.
fn failure_message(what: &str, err: &anyhow::Error) -> String {
    tracing::debug!(error = ?err, "lookup failed");
    match err.downcast_ref::<FetchError>() {
        Some(e @ (FetchError::Api { .. } | FetchError::Data(_))) => {
            format!("❌ Error fetching {what} data: {e}")
        }
        Some(e @ FetchError::Http(_)) => format!("❌ Network or data error: {e}"),
        None => format!("❌ An error occurred: {err}"),
    }
}

/// Prompt with a default; an empty answer takes the default. `None` on end of input.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
    default: &str,
) -> std::io::Result<Option<String>> {
    write!(out, "{label} (default: {default}): ")?;
    out.flush()?;
    Ok(read_line(input)?.map(|answer| {
        if answer.is_empty() {
            default.to_string()
        } else {
            answer
        }
    }))
}

pub fn wants_another(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Read one trimmed line; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ReportFormat;
    use crate::config::{Config, ScoringConfig};
    use crate::scoring::{NetScorer, ScoreError};
    use std::io::Cursor;
    use std::path::PathBuf;

    fn catalog(input: Option<PathBuf>) -> Catalog {
        catalog_as(input, ReportFormat::Json, true)
    }

    fn catalog_as(input: Option<PathBuf>, format: ReportFormat, quiet: bool) -> Catalog {
        Catalog::new(
            Config::default(),
            Box::new(NetScorer::new(ScoringConfig::default())),
            input,
            format,
            quiet,
        )
        .unwrap()
    }

    async fn session(catalog: &Catalog, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        run(catalog, &mut input, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!(Choice::parse("1"), Some(Choice::Repository));
        assert_eq!(Choice::parse(" 2 "), Some(Choice::Model));
        assert_eq!(Choice::parse("3"), Some(Choice::Exit));
        assert_eq!(Choice::parse("4"), None);
        assert_eq!(Choice::parse(""), None);
    }

    #[test]
    fn test_prompt_default_and_answer() {
        let mut out = Vec::new();
        let mut input = Cursor::new(b"\nopenai\n".to_vec());
        assert_eq!(
            prompt(&mut input, &mut out, "Owner", "huggingface").unwrap(),
            Some("huggingface".to_string())
        );
        assert_eq!(
            prompt(&mut input, &mut out, "Owner", "huggingface").unwrap(),
            Some("openai".to_string())
        );
        assert_eq!(prompt(&mut input, &mut out, "Owner", "huggingface").unwrap(), None);
        assert!(String::from_utf8(out).unwrap().contains("Owner (default: huggingface): "));
    }

    #[test]
    fn test_wants_another() {
        assert!(wants_another("y"));
        assert!(wants_another("YES"));
        assert!(!wants_another("n"));
        assert!(!wants_another(""));
    }

    #[test]
    fn test_failure_messages_distinguish_kinds() {
        let api: anyhow::Error = FetchError::Api {
            status: 404,
            message: "not found".to_string(),
        }
        .into();
        let data: anyhow::Error = FetchError::Data("expected a JSON object".to_string()).into();
        let other: anyhow::Error =
            ScoreError::InvalidWeights("weights sum to zero".to_string()).into();

        assert_eq!(
            failure_message("repository", &api),
            "❌ Error fetching repository data: API error (404): not found"
        );
        assert!(failure_message("model", &data)
            .starts_with("❌ Error fetching model data: unusable payload"));
        assert!(failure_message("model", &other).starts_with("❌ An error occurred:"));
    }

    #[tokio::test]
    async fn test_invalid_choice_then_exit() {
        let out = session(&catalog(None), "9\n3\n").await;
        assert!(out.contains("❌ Invalid choice. Please enter 1, 2, or 3."));
        assert!(out.ends_with("👋 Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_end_of_input_exits() {
        let out = session(&catalog(None), "").await;
        assert!(out.contains("👋 Goodbye!"));
    }

    #[tokio::test]
    async fn test_lookup_error_keeps_menu_running() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let out = session(&catalog(Some(missing)), "2\n\ny\n3\n").await;
        assert!(out.contains("Fetching data for model: bert-base-uncased..."));
        assert!(out.contains("❌ Error fetching model data: unusable payload"));
        assert!(out.ends_with("👋 Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_successful_lookup_renders_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repo.json");
        std::fs::write(
            &path,
            r#"{ "full_name": "acme/widget", "license": { "spdx_id": "MIT" } }"#,
        )
        .unwrap();

        let c = catalog_as(Some(path), ReportFormat::Terminal, false);
        let out = session(&c, "1\nacme\nwidget\nn\n").await;
        assert!(out.contains("Fetching data for acme/widget..."));
        assert!(out.contains("acme/widget"));
        assert!(out.contains("MIT (Permissive)"));
        assert!(out.contains("NetScore Breakdown:"));
        assert!(out.contains("\nlicense: 1.000\n"));
        assert!(out.contains("\nnet_score: "));
        assert!(!out.contains("❌"));
        assert!(out.ends_with("👋 Goodbye!\n"));
    }
}
