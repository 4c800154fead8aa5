use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::Path;

use adspec_core::{AdSpec, PlatformData};

use crate::rows::from_table_rows;
use crate::seed::static_catalog;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub platforms: Vec<PlatformData>,
}

impl Catalog {
    pub fn new(platforms: Vec<PlatformData>) -> Self {
        let mut catalog = Self { platforms };
        catalog.sort_platforms();
        catalog
    }

    pub fn sort_platforms(&mut self) {
        self.platforms.sort_by(|a, b| a.name.cmp(&b.name));
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.iter().all(|p| p.specs.is_empty())
    }

    pub fn platform(&self, id: &str) -> Option<&PlatformData> {
        self.platforms.iter().find(|p| p.id.as_str() == id)
    }

    pub fn find_spec(&self, spec_id: &str) -> Option<(&PlatformData, &AdSpec)> {
        self.platforms
            .iter()
            .find_map(|p| p.specs.iter().find(|s| s.id.as_str() == spec_id).map(|s| (p, s)))
    }

    pub fn specs(&self) -> impl Iterator<Item = &AdSpec> {
        self.platforms.iter().flat_map(|p| p.specs.iter())
    }
}

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let s = std::fs::read_to_string(path).with_context(|| format!("read catalog: {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    let mut catalog: Catalog = match ext.as_str() {
        "json" if is_row_export(&s) => from_table_rows(&s).with_context(|| format!("map table rows in {}", path.display()))?,
        "json" => serde_json::from_str(&s).with_context(|| "parse catalog json")?,
        "yaml" | "yml" => serde_yaml::from_str(&s).with_context(|| "parse catalog yaml")?,
        other => return Err(anyhow!("unsupported catalog extension {:?} (expected .yaml, .yml or .json)", other)),
    };
    validate_catalog(&catalog)?;
    catalog.sort_platforms();
    tracing::info!(path = %path.display(), platforms = catalog.platforms.len(), "catalog loaded");
    Ok(catalog)
}

/// A table export is a bare JSON array of platform rows rather than a
/// `{ platforms: [...] }` document.
fn is_row_export(s: &str) -> bool {
    s.trim_start().starts_with('[')
}

/// Loads `path`, falling back to the built-in catalog when it is missing,
/// unreadable, invalid or empty. Errors only if the built-in catalog is broken.
pub fn load_or_static(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return static_catalog();
    };
    match load_catalog(path) {
        Ok(catalog) if !catalog.is_empty() => Ok(catalog),
        Ok(_) => {
            tracing::warn!(path = %path.display(), "catalog has no specs; using static catalog");
            static_catalog()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %format!("{e:#}"), "catalog unavailable; using static catalog");
            static_catalog()
        }
    }
}

pub fn validate_catalog(catalog: &Catalog) -> Result<()> {
    let mut spec_ids = HashSet::new();
    for p in &catalog.platforms {
        if p.id.as_str().trim().is_empty() {
            return Err(anyhow!("platform {:?} missing id", p.name));
        }
        for s in &p.specs {
            if s.id.as_str().trim().is_empty() {
                return Err(anyhow!("spec {:?} in platform {} missing id", s.title, p.id));
            }
            if !spec_ids.insert(s.id.as_str()) {
                return Err(anyhow!("duplicate spec id: {}", s.id));
            }
            if s.width.is_some() != s.height.is_some() {
                return Err(anyhow!("spec {} must declare width and height together", s.id));
            }
        }
    }
    Ok(())
}

pub fn canonical_json(catalog: &Catalog) -> Result<serde_json::Value> {
    let v = serde_json::to_value(catalog).with_context(|| "serialize catalog")?;
    Ok(sort_json(v))
}

/// Recursively sort object keys for stable hashing.
fn sort_json(v: serde_json::Value) -> serde_json::Value {
    match v {
        serde_json::Value::Object(map) => {
            let mut keys: Vec<_> = map.keys().cloned().collect();
            keys.sort();
            let mut new_map = serde_json::Map::new();
            for k in keys {
                let child = map.get(&k).cloned().unwrap_or(serde_json::Value::Null);
                new_map.insert(k, sort_json(child));
            }
            serde_json::Value::Object(new_map)
        }
        serde_json::Value::Array(arr) => serde_json::Value::Array(arr.into_iter().map(sort_json).collect()),
        other => other,
    }
}

pub fn catalog_hash(catalog: &Catalog) -> Result<String> {
    let v = canonical_json(catalog)?;
    let bytes = serde_json::to_vec(&v).with_context(|| "encode canonical catalog")?;
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use adspec_core::{MediaFormat, PlatformId, SpecId};

    fn spec(id: &str) -> AdSpec {
        AdSpec {
            id: SpecId::from_str(id),
            title: "t".into(),
            dimensions: "100×100".into(),
            width: Some(100),
            height: Some(100),
            aspect_ratio: "1:1".into(),
            format: MediaFormat::Image,
            file_type: vec!["PNG".into()],
            max_file_size: "1MB".into(),
            max_file_size_bytes: Some(1_048_576),
            notes: String::new(),
            settings: None,
        }
    }

    fn platform(id: &str, name: &str, specs: Vec<AdSpec>) -> PlatformData {
        PlatformData {
            id: PlatformId::from_str(id),
            name: name.into(),
            description: String::new(),
            last_updated: None,
            specs,
        }
    }

    #[test]
    fn hash_is_stable() {
        let catalog = Catalog::new(vec![platform("p", "P", vec![spec("a")])]);
        let h1 = catalog_hash(&catalog).unwrap();
        let h2 = catalog_hash(&catalog.clone()).unwrap();
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
    }

    #[test]
    fn hash_changes_with_content() {
        let a = Catalog::new(vec![platform("p", "P", vec![spec("a")])]);
        let mut b = a.clone();
        b.platforms[0].specs[0].max_file_size_bytes = Some(2);
        assert_ne!(catalog_hash(&a).unwrap(), catalog_hash(&b).unwrap());
    }

    #[test]
    fn rejects_duplicate_spec_ids_across_platforms() {
        let catalog = Catalog::new(vec![
            platform("p1", "A", vec![spec("dup")]),
            platform("p2", "B", vec![spec("dup")]),
        ]);
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("duplicate spec id"));
    }

    #[test]
    fn rejects_half_declared_dimensions() {
        let mut s = spec("a");
        s.height = None;
        let catalog = Catalog::new(vec![platform("p", "P", vec![s])]);
        assert!(validate_catalog(&catalog).is_err());
    }

    #[test]
    fn accepts_empty_file_type() {
        let mut s = spec("a");
        s.file_type.clear();
        let catalog = Catalog::new(vec![platform("p", "P", vec![s])]);
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn detects_row_exports() {
        assert!(is_row_export("  [ {\"id\": \"p\"} ]"));
        assert!(!is_row_export("{\"platforms\": []}"));
    }

    #[test]
    fn find_spec_returns_owner() {
        let catalog = Catalog::new(vec![
            platform("p2", "Zeta", vec![spec("z1")]),
            platform("p1", "Alpha", vec![spec("a1"), spec("a2")]),
        ]);
        assert_eq!(catalog.platforms[0].name, "Alpha");
        let (p, s) = catalog.find_spec("a2").unwrap();
        assert_eq!(p.id.as_str(), "p1");
        assert_eq!(s.id.as_str(), "a2");
        assert!(catalog.find_spec("missing").is_none());
        assert_eq!(catalog.specs().count(), 3);
    }
}
