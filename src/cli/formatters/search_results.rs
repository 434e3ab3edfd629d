//! Search results formatter.
//!
//! Renders ranked matches as colored terminal output (human mode) or as a
//! single JSON envelope on stdout (robot mode).

use std::time::Duration;

use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::search::{GenreMatch, SkillMatch, TopicMatch};

/// Ranked results of one search call, ready for display.
pub struct SearchResults {
    query: String,
    search_type: &'static str,
    rows: Rows,
    duration_ms: Option<u64>,
}

enum Rows {
    Topic(Vec<TopicMatch>),
    Skill(Vec<SkillMatch>),
    Genre(Vec<GenreMatch>),
}

/// Serializable search response envelope for robot mode.
#[derive(Serialize)]
struct SearchResponseJson<'a, T: Serialize> {
    status: &'static str,
    query: &'a str,
    search_type: &'static str,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_ms: Option<u64>,
    results: &'a [T],
}

impl SearchResults {
    pub fn topic(query: impl Into<String>, matches: Vec<TopicMatch>) -> Self {
        Self::new(query, "topic", Rows::Topic(matches))
    }

    pub fn skill(query: impl Into<String>, matches: Vec<SkillMatch>) -> Self {
        Self::new(query, "skill", Rows::Skill(matches))
    }

    pub fn genre(query: impl Into<String>, matches: Vec<GenreMatch>) -> Self {
        Self::new(query, "genre", Rows::Genre(matches))
    }

    fn new(query: impl Into<String>, search_type: &'static str, rows: Rows) -> Self {
        Self {
            query: query.into(),
            search_type,
            rows,
            duration_ms: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = Some(duration.as_millis().min(u128::from(u64::MAX)) as u64);
        self
    }

    pub fn len(&self) -> usize {
        match &self.rows {
            Rows::Topic(rows) => rows.len(),
            Rows::Skill(rows) => rows.len(),
            Rows::Genre(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn render(&self, format: OutputFormat) -> Result<()> {
        debug!(
            search_type = self.search_type,
            count = self.len(),
            "rendering results"
        );
        match format {
            OutputFormat::Json => self.render_json(),
            OutputFormat::Human => {
                self.render_human();
                Ok(())
            }
        }
    }

    fn render_json(&self) -> Result<()> {
        let payload = match &self.rows {
            Rows::Topic(rows) => self.envelope_json(rows)?,
            Rows::Skill(rows) => self.envelope_json(rows)?,
            Rows::Genre(rows) => self.envelope_json(rows)?,
        };
        println!("{payload}");
        Ok(())
    }

    fn envelope_json<T: Serialize>(&self, results: &[T]) -> Result<String> {
        let envelope = SearchResponseJson {
            status: "ok",
            query: &self.query,
            search_type: self.search_type,
            count: results.len(),
            duration_ms: self.duration_ms,
            results,
        };
        Ok(serde_json::to_string(&envelope)?)
    }

    fn render_human(&self) {
        if self.is_empty() {
            println!(
                "{}",
                "No matches found. Try a different search term.".yellow()
            );
            return;
        }

        println!(
            "{} {} {}",
            "Search results for".bold(),
            self.query.cyan().bold(),
            format!("({})", self.search_type).dimmed()
        );

        match &self.rows {
            Rows::Topic(rows) => {
                for (rank, m) in rows.iter().enumerate() {
                    println!(
                        "{:>2}. {}  {}",
                        rank + 1,
                        unit_line(&m.level, &m.unit, &m.part, &m.unit_name),
                        topic_score_line(m).dimmed()
                    );
                    if !m.vocabulary.is_empty() {
                        println!("    vocabulary: {}", m.vocabulary);
                    }
                }
            }
            Rows::Skill(rows) => {
                for (rank, m) in rows.iter().enumerate() {
                    println!(
                        "{:>2}. {}  {}",
                        rank + 1,
                        unit_line(&m.level, &m.unit, &m.part, &m.unit_name),
                        format!("[score {:.1}]", m.score).dimmed()
                    );
                    println!("    {}: {}", m.field.label().green(), m.value);
                }
            }
            Rows::Genre(rows) => {
                for (rank, m) in rows.iter().enumerate() {
                    println!(
                        "{:>2}. {}  {}",
                        rank + 1,
                        unit_line(&m.level, &m.unit, &m.part, &m.unit_name),
                        format!("[score {:.1}]", m.score).dimmed()
                    );
                    println!("    genres: {}", m.genres);
                }
            }
        }

        if let Some(ms) = self.duration_ms {
            println!("{}", format!("{} results in {ms}ms", self.len()).dimmed());
        }
    }
}

fn unit_line(level: &str, unit: &str, part: &str, unit_name: &str) -> String {
    format!("Level {level} Unit {unit} Part {part}: {}", unit_name.bold())
}

fn topic_score_line(m: &TopicMatch) -> String {
    match m.composite {
        Some(composite) => format!("[composite {composite:.1}]"),
        None => format!("[overlap {}, fuzzy {:.1}]", m.overlap, m.fuzzy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic_match(unit_name: &str) -> TopicMatch {
        TopicMatch {
            level: "3".to_string(),
            unit: "1".to_string(),
            part: "2".to_string(),
            unit_name: unit_name.to_string(),
            vocabulary: "energy power".to_string(),
            overlap: 2,
            fuzzy: 87.5,
            semantic: None,
            composite: None,
        }
    }

    #[test]
    fn json_envelope_shape() {
        let results = SearchResults::topic("energy", vec![topic_match("Powering Up")]);
        let payload = match &results.rows {
            Rows::Topic(rows) => results.envelope_json(rows).unwrap(),
            _ => unreachable!(),
        };
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["query"], "energy");
        assert_eq!(value["search_type"], "topic");
        assert_eq!(value["count"], 1);
        assert_eq!(value["results"][0]["unit_name"], "Powering Up");
        assert_eq!(value["results"][0]["overlap"], 2);
        // Simple-variant matches omit semantic fields entirely.
        assert!(value["results"][0].get("composite").is_none());
    }

    #[test]
    fn empty_results_report_zero_count() {
        let results = SearchResults::genre("zzz", vec![]);
        assert!(results.is_empty());
        let payload = match &results.rows {
            Rows::Genre(rows) => results.envelope_json(rows).unwrap(),
            _ => unreachable!(),
        };
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["count"], 0);
        assert_eq!(value["results"].as_array().unwrap().len(), 0);
    }
}
