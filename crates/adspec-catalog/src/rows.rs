//! Mapping of rows exported from the hosted `platforms`/`specs` tables.
//!
//! Rows arrive as one JSON array of platforms, each with its nested `specs`
//! relation. Nullable text columns become empty strings.

use anyhow::{Context, Result};
use serde::Deserialize;

use adspec_core::{AdSpec, MediaFormat, PlatformData, PlatformId, SpecId};

use crate::catalog::{validate_catalog, Catalog};

#[derive(Clone, Debug, Deserialize)]
pub struct PlatformRow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub specs: Option<Vec<SpecRow>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SpecRow {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub aspect_ratio: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub file_type: Option<FileTypeColumn>,
    #[serde(default)]
    pub max_file_size: Option<String>,
    #[serde(default)]
    pub max_file_size_bytes: Option<u64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub settings: Option<String>,
}

/// `file_type` is stored either as a native array or as JSON-encoded text.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum FileTypeColumn {
    List(Vec<String>),
    Encoded(String),
}

impl FileTypeColumn {
    fn into_list(self) -> Result<Vec<String>> {
        match self {
            FileTypeColumn::List(v) => Ok(v),
            FileTypeColumn::Encoded(s) if s.trim().is_empty() => Ok(vec![]),
            FileTypeColumn::Encoded(s) => {
                serde_json::from_str(&s).with_context(|| format!("decode file_type column {s:?}"))
            }
        }
    }
}

impl SpecRow {
    pub fn into_spec(self) -> Result<AdSpec> {
        let file_type = match self.file_type {
            Some(col) => col.into_list().with_context(|| format!("spec {}", self.id))?,
            None => vec![],
        };
        Ok(AdSpec {
            id: SpecId::from_str(self.id),
            title: self.title.unwrap_or_default(),
            dimensions: self.dimensions.unwrap_or_default(),
            width: self.width,
            height: self.height,
            aspect_ratio: self.aspect_ratio.unwrap_or_default(),
            format: MediaFormat::from(self.format.unwrap_or_default()),
            file_type,
            max_file_size: self.max_file_size.unwrap_or_default(),
            max_file_size_bytes: self.max_file_size_bytes,
            notes: self.notes.unwrap_or_default(),
            settings: self.settings,
        })
    }
}

impl PlatformRow {
    pub fn into_platform(self) -> Result<PlatformData> {
        let specs = self
            .specs
            .unwrap_or_default()
            .into_iter()
            .map(SpecRow::into_spec)
            .collect::<Result<Vec<_>>>()?;
        Ok(PlatformData {
            id: PlatformId::from_str(self.id),
            name: self.name,
            description: self.description.unwrap_or_default(),
            last_updated: self.last_updated,
            specs,
        })
    }
}

/// Builds a validated catalog from a JSON array of platform rows.
pub fn from_table_rows(json: &str) -> Result<Catalog> {
    let rows: Vec<PlatformRow> = serde_json::from_str(json).with_context(|| "parse platform rows")?;
    let platforms = rows
        .into_iter()
        .map(PlatformRow::into_platform)
        .collect::<Result<Vec<_>>>()?;
    let catalog = Catalog::new(platforms);
    validate_catalog(&catalog)?;
    Ok(catalog)
}
