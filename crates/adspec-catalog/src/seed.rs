use anyhow::{Context, Result};

use crate::catalog::{validate_catalog, Catalog};

const SEED_YAML: &str = include_str!("../data/platforms.yaml");

/// Built-in catalog compiled into the binary.
pub fn static_catalog() -> Result<Catalog> {
    let mut catalog: Catalog = serde_yaml::from_str(SEED_YAML).with_context(|| "parse built-in catalog")?;
    validate_catalog(&catalog).with_context(|| "validate built-in catalog")?;
    catalog.sort_platforms();
    Ok(catalog)
}
