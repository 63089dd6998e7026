use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use murmur_feed::Segment;

use crate::error::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptPage {
    pub segments: Vec<Segment>,
    pub current_page: u32,
    pub total_pages: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryPage {
    pub summaries: Vec<Summary>,
    pub current_page: u32,
    pub total_pages: u32,
}

/// One per-period analytic card: headline, bullets, tag and optional
/// fact-check notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub id: i64,
    pub headline: String,
    #[serde(default)]
    pub bullet_points: BulletPoints,
    pub tag: String,
    #[serde(default)]
    pub fact_checker: FactCheck,
    pub timestamp: DateTime<Utc>,
}

/// The backend serves bullet points either as an array or as one
/// newline-separated string with `- ` prefixes. Both decode here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BulletPoints {
    Many(Vec<String>),
    One(String),
}

impl Default for BulletPoints {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl BulletPoints {
    /// Individual bullet lines, prefix-stripped and trimmed.
    pub fn items(&self) -> Vec<String> {
        match self {
            Self::Many(items) => items.clone(),
            Self::One(text) => text
                .lines()
                .map(|line| {
                    let line = line.trim();
                    line.strip_prefix("- ")
                        .or_else(|| line.strip_prefix("• "))
                        .unwrap_or(line)
                        .to_string()
                })
                .filter(|line| !line.is_empty())
                .collect(),
        }
    }
}

/// Fact-check notes: a single string (possibly empty) or an array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactCheck {
    Many(Vec<String>),
    One(String),
}

impl Default for FactCheck {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl FactCheck {
    pub fn notes(&self) -> Vec<String> {
        match self {
            Self::Many(notes) => notes
                .iter()
                .filter(|n| !n.trim().is_empty())
                .cloned()
                .collect(),
            Self::One(note) if note.trim().is_empty() => Vec::new(),
            Self::One(note) => vec![note.clone()],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.notes().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordCloudEntry {
    pub text: String,
    pub value: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub most_active_hour: Option<u8>,
    pub total_segments: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: String,
}

/// Decode a response body, falling back to the backend's `{"error": ...}`
/// envelope when the expected shape does not parse.
pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Error> {
    match serde_json::from_slice::<T>(bytes) {
        Ok(value) => Ok(value),
        Err(primary) => match serde_json::from_slice::<ErrorEnvelope>(bytes) {
            Ok(envelope) => Err(Error::Api(envelope.error)),
            Err(_) => Err(Error::Json(primary)),
        },
    }
}
