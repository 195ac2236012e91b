use std::collections::BTreeMap;

use serde::Serialize;

const PREVIEW_CHARS: usize = 500;

/// Text and layout metadata extracted from one uploaded document.
///
/// The serialized form is what the analysis panel displays, so the field
/// names follow the labels shown to the user. The full extracted text is
/// kept out of the display payload and only feeds insight generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    #[serde(skip)]
    pub content: String,
    #[serde(rename = "Content Preview")]
    pub content_preview: String,
    #[serde(rename = "Statistics")]
    pub statistics: AnalysisStatistics,
    #[serde(rename = "Languages")]
    pub languages: Vec<String>,
    #[serde(rename = "Key-Value Pairs")]
    pub key_value_pairs: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisStatistics {
    #[serde(rename = "Pages")]
    pub pages: usize,
    #[serde(rename = "Tables")]
    pub tables: usize,
    #[serde(rename = "Paragraphs")]
    pub paragraphs: usize,
    #[serde(rename = "Confidence")]
    pub confidence: String,
}

impl AnalysisResult {
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Shortens extracted text for display, cutting on a char boundary.
    pub fn preview_of(content: &str) -> String {
        let trimmed = content.trim();
        match trimmed.char_indices().nth(PREVIEW_CHARS) {
            Some((idx, _)) => format!("{}...", &trimmed[..idx]),
            None => trimmed.to_string(),
        }
    }

    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl AnalysisStatistics {
    /// Formats a 0.0..=1.0 confidence as a percentage label.
    pub fn confidence_label(confidence: Option<f64>) -> String {
        match confidence {
            Some(value) => format!("{:.1}%", value * 100.0),
            None => "n/a".to_string(),
        }
    }
}
