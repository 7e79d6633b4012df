use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::cli::ReportFormat;
use crate::config::Config;
use crate::models::{Payload, Source};
use crate::normalize::counts::CountSummary;
use crate::normalize::model::normalize_model;
use crate::normalize::repository::normalize_repository;
use crate::registry::{self, FetchError};
use crate::report::json::JsonReport;
use crate::report::{json, terminal};
use crate::scoring::{render_scores, Scorer};

/// One lookup pipeline per source: fetch, normalize, render, score.
///
/// Normalization and scoring read the same raw payload independently.
pub struct Catalog {
    config: Config,
    github: Client,
    huggingface: Client,
    scorer: Box<dyn Scorer>,
    input: Option<PathBuf>,
    format: ReportFormat,
    quiet: bool,
}

impl Catalog {
    pub fn new(
        config: Config,
        scorer: Box<dyn Scorer>,
        input: Option<PathBuf>,
        format: ReportFormat,
        quiet: bool,
    ) -> Result<Self> {
        let github = registry::build_client(config.github.timeout_secs)?;
        let huggingface = registry::build_client(config.huggingface.timeout_secs)?;
        Ok(Catalog {
            config,
            github,
            huggingface,
            scorer,
            input,
            format,
            quiet,
        })
    }

    /// Look up a repository and write its report to `out`.
    pub async fn show_repository<W: Write>(
        &self,
        owner: &str,
        repo: &str,
        out: &mut W,
    ) -> Result<()> {
        let fetch =
            registry::github::fetch_repo_data(&self.github, &self.config.github, owner, repo);
        let payload = self.payload(format!("Fetching {owner}/{repo}"), fetch).await?;

        let defaults = &self.config.defaults;
        let record = normalize_repository(&payload, owner, repo, defaults);
        let counts = CountSummary::from_payload(&payload, defaults);
        tracing::info!("repo: {} ⭐ {}", record.full_name, record.stars);

        match self.format {
            ReportFormat::Terminal => {
                terminal::render_repository(out, &record, &counts, self.quiet)?;
                let scores = render_scores(self.scorer.as_ref(), &payload)?;
                terminal::render_scores(out, &scores, self.quiet)?;
            }
            ReportFormat::Json => {
                let scores = render_scores(self.scorer.as_ref(), &payload)?;
                let report = JsonReport {
                    source: Source::GitHub.to_string(),
                    record: &record,
                    counts: Some(&counts),
                    scores: &scores,
                };
                writeln!(out, "{}", json::render(&report)?)?;
            }
        }
        Ok(())
    }

    /// Look up a model and write its report to `out`.
    pub async fn show_model<W: Write>(&self, model_id: &str, out: &mut W) -> Result<()> {
        let fetch = registry::huggingface::fetch_hf_model(
            &self.huggingface,
            &self.config.huggingface,
            model_id,
        );
        let payload = self.payload(format!("Fetching {model_id}"), fetch).await?;

        let defaults = &self.config.defaults;
        let record = normalize_model(&payload, model_id, defaults);
        tracing::info!("model: {} ⬇ {}", record.model_name, record.downloads);

        match self.format {
            ReportFormat::Terminal => {
                terminal::render_model(out, &record, defaults, self.quiet)?;
                let scores = render_scores(self.scorer.as_ref(), &payload)?;
                terminal::render_scores(out, &scores, self.quiet)?;
            }
            ReportFormat::Json => {
                let scores = render_scores(self.scorer.as_ref(), &payload)?;
                let report = JsonReport {
                    source: Source::HuggingFace.to_string(),
                    record: &record,
                    counts: None,
                    scores: &scores,
                };
                writeln!(out, "{}", json::render(&report)?)?;
            }
        }
        Ok(())
    }

    /// Resolve the raw payload: the `--input` file when given, else the network.
    async fn payload<F>(&self, message: String, fetch: F) -> Result<Payload, FetchError>
    where
        F: Future<Output = Result<Payload, FetchError>>,
    {
        if let Some(path) = &self.input {
            tracing::debug!(path = %path.display(), "reading payload from file");
            return registry::load_payload(path);
        }

        let spinner = self.spinner(message);
        let result = fetch.await;
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        result
    }

    fn spinner(&self, message: String) -> Option<ProgressBar> {
        if self.quiet || self.format == ReportFormat::Json {
            return None;
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}
