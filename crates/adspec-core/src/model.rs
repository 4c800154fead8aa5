use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// Creative format a placement asks for. Labels other than "Image" and
/// "Video" (e.g. "Carousel") are kept verbatim and never force a MIME family.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaFormat {
    Image,
    Video,
    Other(String),
}

impl MediaFormat {
    pub fn label(&self) -> &str {
        match self {
            MediaFormat::Image => "Image",
            MediaFormat::Video => "Video",
            MediaFormat::Other(s) => s,
        }
    }
}

impl From<String> for MediaFormat {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Image" => MediaFormat::Image,
            "Video" => MediaFormat::Video,
            _ => MediaFormat::Other(s),
        }
    }
}

impl From<&str> for MediaFormat {
    fn from(s: &str) -> Self {
        MediaFormat::from(s.to_string())
    }
}

impl From<MediaFormat> for String {
    fn from(f: MediaFormat) -> Self {
        f.label().to_string()
    }
}

impl std::fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
