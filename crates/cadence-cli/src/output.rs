//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use cadence_domain::{Category, CloneId, WeightMatrix};
use cadence_sdk::{CloneList, CloneResponse, ProfileOutcome};
use colored::*;
use serde_json::{json, Map, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the clone list, skipping hidden clones unless `include_hidden`.
    pub fn format_clones(&self, list: &CloneList, include_hidden: bool) -> Result<String> {
        let clones: Vec<&CloneResponse> = list
            .items
            .iter()
            .filter(|c| include_hidden || !c.is_hidden)
            .collect();

        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&clones)?),
            OutputFormat::Quiet => Ok(clones
                .iter()
                .map(|c| c.id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if clones.is_empty() {
                    return Ok(self.colorize("No clones found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Type", "Samples", "Confidence"]);
                for clone in &clones {
                    builder.push_record([
                        clone.id.clone(),
                        clone.name.clone(),
                        clone.clone_type.clone(),
                        clone.sample_count.to_string(),
                        clone.confidence_score.to_string(),
                    ]);
                }

                Ok(self.render(builder))
            }
        }
    }

    /// Format per-source profile results.
    pub fn format_profiles(&self, results: &[(CloneId, ProfileOutcome)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_profiles_json(results),
            OutputFormat::Quiet => Ok(results
                .iter()
                .map(|(id, outcome)| format!("{}\t{}", id, outcome_status(outcome)))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if results.is_empty() {
                    return Ok(self.colorize("No sources given.", "yellow"));
                }

                let mut builder = Builder::default();
                let mut header = vec!["Category".to_string()];
                header.extend(results.iter().map(|(id, _)| id.to_string()));
                builder.push_record(header);

                for category in Category::ALL {
                    let mut row = vec![category.label().to_string()];
                    row.extend(results.iter().map(|(_, outcome)| match outcome {
                        ProfileOutcome::Present(p) => p.weight(category).to_string(),
                        ProfileOutcome::Absent => "-".to_string(),
                        ProfileOutcome::Failed(_) => "?".to_string(),
                    }));
                    builder.push_record(row);
                }

                let mut out = self.render(builder);
                for (id, outcome) in results {
                    match outcome {
                        ProfileOutcome::Present(_) => {}
                        ProfileOutcome::Absent => {
                            out.push('\n');
                            out.push_str(&self.warning(&format!("{}: no DNA yet", id)));
                        }
                        ProfileOutcome::Failed(e) => {
                            out.push('\n');
                            out.push_str(&self.error(&format!("{}: {}", id, e)));
                        }
                    }
                }
                Ok(out)
            }
        }
    }

    fn format_profiles_json(&self, results: &[(CloneId, ProfileOutcome)]) -> Result<String> {
        let entries: Vec<Value> = results
            .iter()
            .map(|(id, outcome)| {
                let mut entry = json!({
                    "clone_id": id.as_str(),
                    "status": outcome_status(outcome),
                });
                match outcome {
                    ProfileOutcome::Present(p) => {
                        let weights: Map<String, Value> = p
                            .weights()
                            .iter()
                            .map(|(c, w)| (c.as_str().to_string(), json!(w.value())))
                            .collect();
                        entry["weights"] = Value::Object(weights);
                    }
                    ProfileOutcome::Failed(e) => entry["error"] = json!(e.to_string()),
                    ProfileOutcome::Absent => {}
                }
                entry
            })
            .collect();

        Ok(serde_json::to_string_pretty(&entries)?)
    }

    /// Format the weight matrix with each cell's share of its category.
    pub fn format_matrix(&self, matrix: &WeightMatrix) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut categories = Map::new();
                for category in Category::ALL {
                    let pct = matrix.percentages(category);
                    let cells: Map<String, Value> = matrix
                        .rows()
                        .map(|(id, weights)| {
                            let share = pct.get(id).copied().unwrap_or(0);
                            (
                                id.to_string(),
                                json!({"weight": weights.get(category).value(), "percent": share}),
                            )
                        })
                        .collect();
                    categories.insert(category.as_str().to_string(), Value::Object(cells));
                }
                let sources: Vec<&str> = matrix.sources().map(|id| id.as_str()).collect();
                Ok(serde_json::to_string_pretty(
                    &json!({"sources": sources, "categories": categories}),
                )?)
            }
            OutputFormat::Quiet => Ok(matrix
                .sources()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if matrix.is_empty() {
                    return Ok(self.colorize("No sources selected.", "yellow"));
                }

                let mut builder = Builder::default();
                let mut header = vec!["Category".to_string()];
                header.extend(matrix.sources().map(|id| id.to_string()));
                builder.push_record(header);

                for category in Category::ALL {
                    let pct = matrix.percentages(category);
                    let mut row = vec![category.label().to_string()];
                    row.extend(matrix.rows().map(|(id, weights)| {
                        format!(
                            "{} ({}%)",
                            weights.get(category),
                            pct.get(id).copied().unwrap_or(0)
                        )
                    }));
                    builder.push_record(row);
                }

                Ok(self.render(builder))
            }
        }
    }

    /// Format a newly created clone.
    pub fn clone_created(&self, clone: &CloneResponse) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(clone)?),
            OutputFormat::Quiet => Ok(clone.id.clone()),
            OutputFormat::Table => Ok(self.success(&format!(
                "Created merged clone '{}' ({})",
                clone.name, clone.id
            ))),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn outcome_status(outcome: &ProfileOutcome) -> &'static str {
    match outcome {
        ProfileOutcome::Present(_) => "present",
        ProfileOutcome::Absent => "absent",
        ProfileOutcome::Failed(_) => "failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_domain::SourceProfile;
    use cadence_sdk::SdkError;

    fn id(s: &str) -> CloneId {
        CloneId::new(s).unwrap()
    }

    fn clone(id: &str, hidden: bool) -> CloneResponse {
        CloneResponse {
            id: id.to_string(),
            name: format!("Clone {}", id),
            description: None,
            tags: vec![],
            clone_type: "original".to_string(),
            is_demo: false,
            is_hidden: hidden,
            avatar_path: None,
            confidence_score: 72,
            sample_count: 4,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    fn sample_matrix() -> WeightMatrix {
        let mut matrix = WeightMatrix::new();
        matrix.add_source(id("a"), None);
        matrix.add_source(id("b"), None);
        matrix.set_weight(&id("a"), Category::Tone, 80.0).unwrap();
        matrix.set_weight(&id("b"), Category::Tone, 20.0).unwrap();
        matrix
    }

    #[test]
    fn test_clone_table_hides_hidden() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let list = CloneList {
            items: vec![clone("c1", false), clone("c2", true)],
            total: 2,
        };

        let output = formatter.format_clones(&list, false).unwrap();
        assert!(output.contains("Clone c1"));
        assert!(!output.contains("Clone c2"));

        let output = formatter.format_clones(&list, true).unwrap();
        assert!(output.contains("Clone c2"));
    }

    #[test]
    fn test_quiet_clones() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let list = CloneList {
            items: vec![clone("c1", false), clone("c2", false)],
            total: 2,
        };
        assert_eq!(formatter.format_clones(&list, false).unwrap(), "c1\nc2");
    }

    #[test]
    fn test_empty_clones() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let list = CloneList { items: vec![], total: 0 };
        let output = formatter.format_clones(&list, false).unwrap();
        assert!(output.contains("No clones found"));
    }

    #[test]
    fn test_matrix_table_shows_percentages() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_matrix(&sample_matrix()).unwrap();
        assert!(output.contains("Tone"));
        assert!(output.contains("80 (80%)"));
        assert!(output.contains("20 (20%)"));
        assert!(output.contains("50 (50%)"));
    }

    #[test]
    fn test_matrix_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_matrix(&sample_matrix()).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["sources"], json!(["a", "b"]));
        assert_eq!(value["categories"]["tone"]["a"]["percent"], 80);
        assert_eq!(value["categories"]["humor"]["b"]["weight"], 50);
    }

    #[test]
    fn test_profiles_json_statuses() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let results = vec![
            (
                id("a"),
                ProfileOutcome::Present(SourceProfile::from_scores(id("a"), [("tone", 70.0)])),
            ),
            (id("b"), ProfileOutcome::Absent),
            (
                id("c"),
                ProfileOutcome::Failed(SdkError::ConnectionError("refused".to_string())),
            ),
        ];

        let output = formatter.format_profiles(&results).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["status"], "present");
        assert_eq!(value[0]["weights"]["tone"], 70);
        assert_eq!(value[1]["status"], "absent");
        assert_eq!(value[2]["status"], "failed");
        assert!(value[2]["error"].as_str().unwrap().contains("refused"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let msg = formatter.success("test");
        assert_eq!(msg, "✓ test");
    }
}
