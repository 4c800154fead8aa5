use serde::{Deserialize, Serialize};

use crate::{ids::*, model::*};

/// Constraints for one ad placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdSpec {
    pub id: SpecId,
    pub title: String,
    /// Display string, e.g. "1080×1080".
    pub dimensions: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    pub aspect_ratio: String,
    pub format: MediaFormat,
    /// Accepted extensions, e.g. ["JPG", "PNG"].
    pub file_type: Vec<String>,
    /// Display string, e.g. "30MB".
    pub max_file_size: String,
    #[serde(default)]
    pub max_file_size_bytes: Option<u64>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub settings: Option<String>,
}

impl AdSpec {
    /// Target pixel size, only when both axes are declared and non-zero.
    pub fn target_dimensions(&self) -> Option<(u32, u32)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
            _ => None,
        }
    }

    /// Byte ceiling; a zero ceiling counts as undeclared.
    pub fn byte_limit(&self) -> Option<u64> {
        self.max_file_size_bytes.filter(|b| *b > 0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlatformData {
    pub id: PlatformId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub specs: Vec<AdSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationMessage {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub text: String,
}

impl ValidationMessage {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self { severity, text: text.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub messages: Vec<ValidationMessage>,
}

impl ValidationResult {
    /// Folds messages in order; validity is lost on the first error.
    pub fn from_messages(messages: Vec<ValidationMessage>) -> Self {
        let is_valid = !messages.iter().any(|m| m.severity == Severity::Error);
        Self { is_valid, messages }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.messages.iter().filter(|m| m.severity == severity).count()
    }
}
