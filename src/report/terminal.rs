use std::io::{self, Write};

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use indexmap::IndexMap;

use crate::config::Defaults;
use crate::license::classifier::classify;
use crate::models::{LicenseRisk, ModelRecord, RepositoryRecord};
use crate::normalize::counts::{group_thousands, CountSummary};

/// Write a repository report: details table, count lines, README length.
pub fn render_repository<W: Write>(
    out: &mut W,
    record: &RepositoryRecord,
    counts: &CountSummary,
    quiet: bool,
) -> io::Result<()> {
    if quiet {
        return Ok(());
    }
    writeln!(out, "\n {} {}\n", "📊 Repository:".bold(), record.full_name.bold())?;
    writeln!(out, "{}", repository_table(record))?;
    for line in counts.lines() {
        writeln!(out, " {line}")?;
    }
    writeln!(out, " README length: {} characters", record.readme.chars().count())
}

/// Write a model report: details table, README length, tags and task when present.
pub fn render_model<W: Write>(
    out: &mut W,
    record: &ModelRecord,
    defaults: &Defaults,
    quiet: bool,
) -> io::Result<()> {
    if quiet {
        return Ok(());
    }
    writeln!(out, "\n {} {}\n", "🤖 Model:".bold(), record.model_name.bold())?;
    writeln!(out, "{}", model_table(record, defaults))?;
    writeln!(out, " README length: {} characters", record.readme.chars().count())?;
    for line in model_extra_lines(record) {
        writeln!(out, " {line}")?;
    }
    Ok(())
}

/// Write the score breakdown; `--quiet` keeps only the `name: value` lines.
pub fn render_scores<W: Write>(
    out: &mut W,
    scores: &IndexMap<String, String>,
    quiet: bool,
) -> io::Result<()> {
    if !quiet {
        writeln!(out, "\n {}", "📈 NetScore Breakdown:".bold())?;
    }
    for line in score_lines(scores) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// `name: value` lines in scorer order.
pub fn score_lines(scores: &IndexMap<String, String>) -> Vec<String> {
    scores
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect()
}

/// `Tags:` and `Task:` lines, each only when there is something to show.
pub fn model_extra_lines(record: &ModelRecord) -> Vec<String> {
    let mut lines = Vec::new();
    if !record.tags.is_empty() {
        lines.push(format!("Tags: {}", record.tags.join(", ")));
    }
    if let Some(task) = &record.task {
        lines.push(format!("Task: {task}"));
    }
    lines
}

pub fn repository_table(record: &RepositoryRecord) -> Table {
    let mut table = details_table();
    table.add_row(vec![Cell::new("Name"), Cell::new(&record.full_name)]);
    table.add_row(vec![Cell::new("Description"), Cell::new(&record.description)]);
    table.add_row(vec![Cell::new("Default branch"), Cell::new(&record.default_branch)]);
    table.add_row(vec![Cell::new("Language"), Cell::new(&record.language)]);
    table.add_row(vec![Cell::new("Updated"), Cell::new(&record.updated)]);
    table.add_row(vec![Cell::new("Stars"), Cell::new(group_thousands(record.stars))]);
    table.add_row(vec![Cell::new("Forks"), Cell::new(group_thousands(record.forks))]);
    table.add_row(vec![Cell::new("Open issues"), Cell::new(record.open_issues)]);
    table.add_row(vec![
        Cell::new("Size"),
        Cell::new(format!("{} KB", group_thousands(record.size))),
    ]);
    table.add_row(vec![Cell::new("License"), license_cell(&record.license_name)]);
    table
}

pub fn model_table(record: &ModelRecord, defaults: &Defaults) -> Table {
    let description = if record.description.is_empty() {
        defaults.no_description.as_str()
    } else {
        record.description.as_str()
    };

    let mut table = details_table();
    table.add_row(vec![Cell::new("Model"), Cell::new(&record.model_name)]);
    table.add_row(vec![Cell::new("Author"), Cell::new(&record.author)]);
    table.add_row(vec![Cell::new("Description"), Cell::new(description)]);
    table.add_row(vec![
        Cell::new("Model size"),
        Cell::new(format!("{} bytes", group_thousands(record.model_size))),
    ]);
    table.add_row(vec![Cell::new("License"), license_cell(&record.license_name)]);
    table.add_row(vec![Cell::new("Downloads"), Cell::new(group_thousands(record.downloads))]);
    table.add_row(vec![Cell::new("Last modified"), Cell::new(&record.last_modified)]);
    table
}

fn details_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Field").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);
    table
}

fn license_cell(license: &str) -> Cell {
    let risk = classify(license);
    let color = match risk {
        LicenseRisk::Permissive => Color::Green,
        LicenseRisk::WeakCopyleft => Color::Yellow,
        LicenseRisk::StrongCopyleft => Color::Red,
        LicenseRisk::Proprietary => Color::Magenta,
        LicenseRisk::Unknown => Color::DarkGrey,
    };
    Cell::new(format!("{license} ({risk})")).fg(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Payload;
    use crate::normalize::model::normalize_model;
    use crate::normalize::repository::normalize_repository;
    use serde_json::json;

    #[test]
    fn test_score_lines_keep_order() {
        let scores: IndexMap<String, String> = [("license", "1.000"), ("ramp_up", "0.257")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(score_lines(&scores), vec!["license: 1.000", "ramp_up: 0.257"]);
    }

    #[test]
    fn test_quiet_writes_only_score_lines() {
        let record = normalize_model(&Payload::new(), "m", &Defaults::default());
        let scores: IndexMap<String, String> =
            [("net_score".to_string(), "0.000".to_string())].into_iter().collect();

        let mut out = Vec::new();
        render_model(&mut out, &record, &Defaults::default(), true).unwrap();
        render_scores(&mut out, &scores, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "net_score: 0.000\n");
    }

    #[test]
    fn test_repository_report_lists_counts() {
        let payload = json!({ "commits_count": 1234, "contributors": [{}, {}] });
        let defaults = Defaults::default();
        let payload = payload.as_object().unwrap();
        let record = normalize_repository(payload, "acme", "widget", &defaults);
        let counts = CountSummary::from_payload(payload, &defaults);

        let mut out = Vec::new();
        render_repository(&mut out, &record, &counts, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(" Total commits: 1,234"));
        assert!(text.contains(" Recent contributors: 2 (showing first 30)"));
        assert!(text.contains(" README length: 0 characters"));
    }

    #[test]
    fn test_repository_table_formats_numbers() {
        let payload = json!({
            "full_name": "huggingface/transformers",
            "stargazers_count": 130000,
            "size": 2048,
            "license": { "spdx_id": "Apache-2.0" },
        });
        let defaults = Defaults::default();
        let record = normalize_repository(payload.as_object().unwrap(), "a", "b", &defaults);
        let rendered = repository_table(&record).to_string();
        assert!(rendered.contains("huggingface/transformers"));
        assert!(rendered.contains("130,000"));
        assert!(rendered.contains("2,048 KB"));
        assert!(rendered.contains("Apache-2.0 (Permissive)"));
    }

    #[test]
    fn test_model_table_shows_description_placeholder() {
        let record = normalize_model(&Payload::new(), "bert-base-uncased", &Defaults::default());
        let rendered = model_table(&record, &Defaults::default()).to_string();
        assert!(rendered.contains("No description available"));
        assert!(rendered.contains("0 bytes"));
    }

    #[test]
    fn test_model_extra_lines_only_when_present() {
        let bare = normalize_model(&Payload::new(), "m", &Defaults::default());
        assert!(model_extra_lines(&bare).is_empty());

        let payload = json!({ "tags": ["pytorch", "bert"], "pipeline_tag": "fill-mask" });
        let record = normalize_model(payload.as_object().unwrap(), "m", &Defaults::default());
        assert_eq!(
            model_extra_lines(&record),
            vec!["Tags: pytorch, bert", "Task: fill-mask"]
        );
    }
}
