use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Paths and knobs for a run. Sources in order: built-in defaults, an
/// optional `jobs_digest.toml` in the working directory, then `JOBS_*`
/// environment variables. Paths left unset live under `data_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub raw_dir: PathBuf,
    pub companies_file: PathBuf,
    pub descriptions_cache: PathBuf,
    pub top_n: usize,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    data_dir: PathBuf,
    raw_dir: Option<PathBuf>,
    companies_file: Option<PathBuf>,
    descriptions_cache: Option<PathBuf>,
    top_n: usize,
}

impl From<RawSettings> for Settings {
    fn from(raw: RawSettings) -> Self {
        let under = |name: &str| raw.data_dir.join(name);
        Settings {
            raw_dir: raw.raw_dir.unwrap_or_else(|| under("raw")),
            companies_file: raw.companies_file.unwrap_or_else(|| under("companies.json")),
            descriptions_cache: raw
                .descriptions_cache
                .unwrap_or_else(|| under("descriptions_cache.json")),
            top_n: raw.top_n,
            data_dir: raw.data_dir,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from("jobs_digest")
    }

    /// `file` is a config base name without extension.
    pub fn load_from(file: &str) -> Result<Self> {
        let raw: RawSettings = Config::builder()
            .set_default("data_dir", "data")?
            .set_default("top_n", 15)?
            .add_source(File::with_name(file).required(false))
            .add_source(Environment::with_prefix("JOBS").try_parsing(true))
            .build()
            .context("building settings")?
            .try_deserialize()
            .context("reading settings")?;
        Ok(raw.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_file(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("jobs_digest_{}_{}.toml", name, std::process::id()));
        std::fs::write(&path, body).unwrap();
        path
    }

    fn load(path: &std::path::Path) -> Settings {
        Settings::load_from(path.with_extension("").to_str().unwrap()).unwrap()
    }

    #[test]
    fn defaults_without_file() {
        let s = Settings::load_from("no_such_settings_file").unwrap();
        assert_eq!(s.raw_dir, s.data_dir.join("raw"));
        assert_eq!(s.companies_file, s.data_dir.join("companies.json"));
        assert_eq!(s.descriptions_cache, s.data_dir.join("descriptions_cache.json"));
        assert!(s.top_n > 0);
    }

    #[test]
    fn paths_follow_data_dir() {
        let path = settings_file("data_dir", "data_dir = \"archive\"\n");
        let s = load(&path);
        assert_eq!(s.raw_dir, PathBuf::from("archive/raw"));
        assert_eq!(s.companies_file, PathBuf::from("archive/companies.json"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn explicit_paths_win() {
        let path = settings_file(
            "explicit",
            "data_dir = \"archive\"\nraw_dir = \"editions\"\ntop_n = 5\n",
        );
        let s = load(&path);
        assert_eq!(s.raw_dir, PathBuf::from("editions"));
        assert_eq!(s.companies_file, PathBuf::from("archive/companies.json"));
        assert_eq!(s.top_n, 5);
        std::fs::remove_file(&path).unwrap();
    }
}
