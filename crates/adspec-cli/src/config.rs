use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// YAML or JSON catalog; relative paths resolve against the config's directory.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_true")]
    pub fallback_to_static: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { path: None, fallback_to_static: true }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: bool,
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| "parse adspec.toml")?;
        Ok(cfg)
    }

    /// Missing config means defaults; a present but broken one is an error.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = Self::config_path(dir);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn catalog_path(&self, dir: &Path) -> Option<PathBuf> {
        let raw = self.catalog.path.as_deref()?;
        let expanded = PathBuf::from(shellexpand::tilde(raw).to_string());
        Some(if expanded.is_absolute() { expanded } else { dir.join(expanded) })
    }

    pub fn config_path(dir: &Path) -> PathBuf {
        dir.join("adspec.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = Config::default();
        cfg.catalog.path = Some("catalog.yaml".into());
        cfg.output.json = true;
        let path = Config::config_path(dir.path());
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_or_default(dir.path()).unwrap();
        assert!(cfg.catalog.fallback_to_static);
        assert!(cfg.catalog.path.is_none());
        assert!(!cfg.output.json);
    }

    #[test]
    fn empty_file_equals_default() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert!(Config::default().catalog.fallback_to_static);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(Config::config_path(dir.path()), "[catalog]\npath = \"specs.json\"\n").unwrap();
        let cfg = Config::load_or_default(dir.path()).unwrap();
        assert!(cfg.catalog.fallback_to_static);
        assert_eq!(cfg.catalog_path(dir.path()), Some(dir.path().join("specs.json")));
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(Config::config_path(dir.path()), "[catalog\n").unwrap();
        assert!(Config::load_or_default(dir.path()).is_err());
    }

    #[test]
    fn absolute_catalog_path_kept() {
        let dir = tempfile::tempdir().unwrap();
        let abs = dir.path().join("abs.yaml");
        let mut cfg = Config::default();
        cfg.catalog.path = Some(abs.to_string_lossy().into_owned());
        assert_eq!(cfg.catalog_path(Path::new("/elsewhere")), Some(abs));
    }
}
