//! Curriculum dataset: typed records and CSV ingestion.
//!
//! One [`Record`] per spreadsheet row. The dataset is loaded once and
//! treated as read-only input; every search computes fresh transient score
//! structures instead of mutating shared state.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// The six named skill columns of the curriculum table, in spreadsheet
/// column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillField {
    Language,
    ThinkingMap,
    Reading,
    Grammar,
    Project,
    Phonics,
}

impl SkillField {
    pub const ALL: [Self; 6] = [
        Self::Language,
        Self::ThinkingMap,
        Self::Reading,
        Self::Grammar,
        Self::Project,
        Self::Phonics,
    ];

    /// Display label matching the source CSV header.
    pub fn label(self) -> &'static str {
        match self {
            Self::Language => "Language Skill",
            Self::ThinkingMap => "Thinking Map Skill",
            Self::Reading => "Reading Skill",
            Self::Grammar => "Grammar Skill",
            Self::Project => "Project",
            Self::Phonics => "Phonics Skill",
        }
    }
}

impl fmt::Display for SkillField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the curriculum table. Identity is row position; records are
/// immutable for the duration of a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "RH Level", default)]
    pub level: String,
    #[serde(rename = "Unit", default)]
    pub unit: String,
    #[serde(rename = "Part", default)]
    pub part: String,
    #[serde(rename = "Unit Name", default)]
    pub unit_name: String,
    #[serde(rename = "Vocabulary Words", default)]
    pub vocabulary: Option<String>,
    #[serde(rename = "Related Words", default)]
    pub related_words: Option<String>,
    #[serde(rename = "Language Skill", default)]
    pub language_skill: Option<String>,
    #[serde(rename = "Thinking Map Skill", default)]
    pub thinking_map_skill: Option<String>,
    #[serde(rename = "Reading Skill", default)]
    pub reading_skill: Option<String>,
    #[serde(rename = "Grammar Skill", default)]
    pub grammar_skill: Option<String>,
    #[serde(rename = "Project", default)]
    pub project: Option<String>,
    #[serde(rename = "Phonics Skill", default)]
    pub phonics_skill: Option<String>,
    #[serde(rename = "Genres", default)]
    pub genres: Option<String>,
}

impl Record {
    /// Vocabulary and related words joined for topic scoring. Missing
    /// fields contribute an empty string, never an error.
    pub fn combined_text(&self) -> String {
        format!(
            "{} {}",
            self.vocabulary.as_deref().unwrap_or(""),
            self.related_words.as_deref().unwrap_or("")
        )
    }

    /// Genre field text, empty when missing.
    pub fn genre_text(&self) -> &str {
        self.genres.as_deref().unwrap_or("")
    }

    /// Value of the given skill column, `None` when missing or blank.
    pub fn skill(&self, field: SkillField) -> Option<&str> {
        let value = match field {
            SkillField::Language => self.language_skill.as_deref(),
            SkillField::ThinkingMap => self.thinking_map_skill.as_deref(),
            SkillField::Reading => self.reading_skill.as_deref(),
            SkillField::Grammar => self.grammar_skill.as_deref(),
            SkillField::Project => self.project.as_deref(),
            SkillField::Phonics => self.phonics_skill.as_deref(),
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }
}

/// Immutable sequence of records, read-only during a search.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Load from a CSV file. Headers are trimmed on read: the source
    /// spreadsheet carries a literal `"Part "` header.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = Self::from_reader(file)?;
        debug!(
            path = %path.display(),
            records = dataset.len(),
            "loaded curriculum dataset"
        );
        Ok(dataset)
    }

    /// Load from any CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.deserialize() {
            let record: Record = row?;
            records.push(record);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
