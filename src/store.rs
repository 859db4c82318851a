use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{CanonicalCompany, EditionText, RawListing};

static EDITION_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^edition_(\d+)\.(?:html|md|txt)$").unwrap());

/// On-disk companies dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompaniesFile {
    pub last_updated: String,
    pub total_companies: usize,
    pub companies: Vec<CanonicalCompany>,
}

impl CompaniesFile {
    /// Stamps the current time.
    pub fn new(companies: Vec<CanonicalCompany>) -> Self {
        CompaniesFile {
            last_updated: Utc::now().to_rfc3339(),
            total_companies: companies.len(),
            companies,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading companies file {}", path.display()))?;
        let mut file: CompaniesFile = serde_json::from_str(&raw)
            .with_context(|| format!("parsing companies file {}", path.display()))?;
        file.total_companies = file.companies.len();
        Ok(file)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing companies file {}", path.display()))
    }

    /// Highest edition any stored company was seen in.
    pub fn max_edition(&self) -> Option<u32> {
        self.companies
            .iter()
            .filter_map(|c| c.editions.iter().next_back().copied())
            .max()
    }
}

/// Stored companies back to listings, one per recorded edition, so they can
/// be folded again together with newer editions.
pub fn expand_to_listings(companies: &[CanonicalCompany]) -> Vec<RawListing> {
    companies
        .iter()
        .flat_map(|c| {
            c.editions.iter().map(move |&edition| RawListing {
                job_title: String::new(),
                company: c.company.clone(),
                industry: c.industry.clone(),
                stage: c.stage.clone(),
                investors: c.investors.clone(),
                location: c.location.clone(),
                edition,
                date: c.latest_date.clone(),
                role_category: c.role_categories.first().copied(),
            })
        })
        .collect()
}

/// Edition number from an `edition_<N>.{html,md,txt}` file name.
pub fn edition_number(path: &Path) -> Option<u32> {
    let name = path.file_name()?.to_str()?;
    EDITION_FILE_RE.captures(name)?.get(1)?.as_str().parse().ok()
}

/// Reads every edition file in `dir`, sorted by edition number. Unreadable
/// files are skipped.
pub fn load_raw_editions(dir: &Path) -> Result<Vec<EditionText>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("listing raw editions in {}", dir.display()))?;

    let mut files: Vec<(u32, PathBuf)> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter_map(|p| edition_number(&p).map(|n| (n, p)))
        .collect();
    files.sort();

    let mut editions = Vec::with_capacity(files.len());
    for (number, path) in files {
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(edition = number, bytes = content.len(), "loaded edition");
                editions.push(EditionText::new(number, "", content));
            }
            Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable edition"),
        }
    }
    Ok(editions)
}

// ── Tests ──
