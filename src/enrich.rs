use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::model::CanonicalCompany;

/// Produces a short company description. An empty string is a valid answer.
pub trait Describe {
    fn describe(&self, company: &CanonicalCompany, key: &str) -> Result<String>;
}

/// Descriptions already generated, by company key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionCache {
    entries: HashMap<String, String>,
}

impl DescriptionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Missing file is an empty cache.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading description cache {}", path.display()))?;
        let entries = serde_json::from_str(&raw)
            .with_context(|| format!("parsing description cache {}", path.display()))?;
        Ok(DescriptionCache { entries })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        // sorted keys keep the file diff-friendly
        let sorted: std::collections::BTreeMap<_, _> = self.entries.iter().collect();
        fs::write(path, serde_json::to_string_pretty(&sorted)?)
            .with_context(|| format!("writing description cache {}", path.display()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|d| !d.is_empty())
    }

    pub fn insert(&mut self, key: String, description: String) {
        self.entries.insert(key, description);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fills `description` from the cache, asking `describer` for misses.
/// Returns how many descriptions were newly generated.
pub fn enrich(
    companies: &mut [CanonicalCompany],
    cache: &mut DescriptionCache,
    describer: Option<&dyn Describe>,
) -> usize {
    let total = companies.len();
    let mut generated = 0;

    for (i, company) in companies.iter_mut().enumerate() {
        let key = company.key();
        if let Some(cached) = cache.get(&key) {
            company.description = cached.to_string();
            continue;
        }
        let Some(describer) = describer else {
            company.description.clear();
            continue;
        };

        info!(company = %company.company, "describing {}/{}", i + 1, total);
        let description = match describer.describe(company, &key) {
            Ok(d) => d.trim().to_string(),
            Err(e) => {
                warn!(company = %company.company, error = %e, "description failed");
                company.description.clear();
                continue;
            }
        };
        company.description = description.clone();
        cache.insert(key, description);
        generated += 1;
    }

    generated
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Fixed {
        calls: Cell<usize>,
    }

    impl Describe for Fixed {
        fn describe(&self, company: &CanonicalCompany, key: &str) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(format!(" {} ({}) builds {} tools. ", company.company, key, company.industry))
        }
    }

    struct Down;

    impl Describe for Down {
        fn describe(&self, _: &CanonicalCompany, _: &str) -> Result<String> {
            anyhow::bail!("service unavailable")
        }
    }

    fn company(name: &str) -> CanonicalCompany {
        CanonicalCompany {
            company: name.into(),
            industry: "AI".into(),
            location: "SF".into(),
            ..Default::default()
        }
    }

    #[test]
    fn cache_hit_skips_describer() {
        let mut cache = DescriptionCache::new();
        cache.insert("acme".into(), "Makes anvils.".into());
        let describer = Fixed { calls: Cell::new(0) };
        let mut companies = vec![company("Acme"), company("Beta")];

        let generated = enrich(&mut companies, &mut cache, Some(&describer));
        assert_eq!(generated, 1);
        assert_eq!(describer.calls.get(), 1);
        assert_eq!(companies[0].description, "Makes anvils.");
        assert_eq!(companies[1].description, "Beta (beta) builds AI tools.");
        assert_eq!(cache.get("beta"), Some("Beta (beta) builds AI tools."));
    }

    #[test]
    fn no_describer_leaves_empty() {
        let mut cache = DescriptionCache::new();
        let mut companies = vec![company("Acme")];
        assert_eq!(enrich(&mut companies, &mut cache, None), 0);
        assert_eq!(companies[0].description, "");
        assert!(cache.is_empty());
    }

    #[test]
    fn failing_describer_is_tolerated() {
        let mut cache = DescriptionCache::new();
        let mut companies = vec![company("Acme"), company("Beta")];
        companies[1].description = "stale".into();
        assert_eq!(enrich(&mut companies, &mut cache, Some(&Down)), 0);
        assert_eq!(companies[0].description, "");
        assert_eq!(companies[1].description, "");
        assert!(cache.is_empty());
    }

    #[test]
    fn cache_file_round_trip() {
        let path = std::env::temp_dir().join(format!("jobs_digest_cache_{}.json", std::process::id()));
        let mut cache = DescriptionCache::new();
        cache.insert("acme".into(), "Makes anvils.".into());
        cache.save(&path).unwrap();
        let loaded = DescriptionCache::load(&path).unwrap();
        assert_eq!(loaded, cache);
        std::fs::remove_file(&path).unwrap();

        assert!(DescriptionCache::load(&path).unwrap().is_empty());
    }
}
