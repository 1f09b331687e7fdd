//! Formatters for search outcomes

use crate::config::OutputFormat;
use crate::error::Result;
use crate::matching::pipeline::SearchOutcome;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

/// Trait for rendering a search outcome to a displayable string.
pub trait OutputFormatter {
    fn format_outcome(&self, outcome: &SearchOutcome) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colored, operator-facing phrasing.
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting and structured consumers.
pub struct JsonFormatter {
    pretty: bool,
}

#[derive(Serialize)]
struct JsonEnvelope<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    result: &'a SearchOutcome,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        if !use_colors {
            colored::control::set_override(false);
        }
        Self { use_colors }
    }

    fn colorize(&self, text: &str, warning: bool) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        if warning {
            text.yellow().to_string()
        } else {
            text.green().bold().to_string()
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_outcome(&self, outcome: &SearchOutcome) -> Result<String> {
        let mut lines = Vec::new();

        match outcome {
            SearchOutcome::EmptyQuery => {
                lines.push(self.colorize(
                    "Enter a skill description to search for matching jobs.",
                    true,
                ));
            }
            SearchOutcome::InsufficientCandidates { found, required } => {
                lines.push(self.colorize("Too many filters, reduce filters!", true));
                lines.push(format!(
                    "Only {} posting(s) matched your filters; at least {} are needed.",
                    found, required
                ));
            }
            SearchOutcome::LowConfidence { score, threshold } => {
                lines.push(self.colorize(
                    "Your skill description is too short, add more details!",
                    true,
                ));
                lines.push(format!(
                    "Best candidate set contained a similarity of {:.2} (minimum {:.2}).",
                    score, threshold
                ));
            }
            SearchOutcome::Matches { matches } => {
                lines.push(self.colorize(
                    &format!("Top {} jobs for you:", matches.len()),
                    false,
                ));
                for m in matches {
                    lines.push(format!(
                        "{}. {} ({}, {}) [{:.2}]",
                        m.rank, m.posting.posting_url, m.posting.city, m.posting.state, m.score
                    ));
                }
            }
        }

        Ok(lines.join("\n"))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_outcome(&self, outcome: &SearchOutcome) -> Result<String> {
        let envelope = JsonEnvelope {
            generated_at: Utc::now(),
            result: outcome,
        };
        let json = if self.pretty {
            serde_json::to_string_pretty(&envelope)?
        } else {
            serde_json::to_string(&envelope)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}
