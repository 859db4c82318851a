use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Field, Reject};
use crate::merge::{CompanyIndex, FoldOutcome};
use crate::model::{CanonicalCompany, EditionText, RawListing};
use crate::parser::{parse_edition, EditionScan};
use crate::taxonomy::{industry, location, validate};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub editions: usize,
    pub lines_scanned: usize,
    pub listings_parsed: usize,
    pub rejected_invalid: usize,
    pub rejected_duplicate: usize,
    pub companies: usize,
}

#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    pub companies: Vec<CanonicalCompany>,
    pub stats: RunStats,
}

/// Runs the three filters, then returns the canonical (industry, location).
pub fn clean_fields(company: &str, raw_industry: &str, raw_location: &str) -> Result<(String, String), Reject> {
    validate::check_company(company)?;
    validate::check_industry(raw_industry)?;
    validate::check_location(raw_location)?;

    let industry = industry::normalize_industry(raw_industry).ok_or(Reject::NormalizationEmpty {
        field: Field::Industry,
    })?;
    Ok((industry, location::normalize_location(raw_location)))
}

pub fn clean_listing(mut listing: RawListing) -> Result<RawListing, Reject> {
    let (industry, location) = clean_fields(&listing.company, &listing.industry, &listing.location)?;
    listing.industry = industry;
    listing.location = location;
    Ok(listing)
}

#[cfg(feature = "rayon")]
fn scan_all(editions: &[EditionText]) -> Vec<EditionScan> {
    editions.par_iter().map(parse_edition).collect()
}

#[cfg(not(feature = "rayon"))]
fn scan_all(editions: &[EditionText]) -> Vec<EditionScan> {
    editions.iter().map(parse_edition).collect()
}

/// Parses editions independently, then folds them in ascending edition order.
pub fn run(editions: &[EditionText]) -> BuildOutput {
    let mut index = CompanyIndex::new();
    let stats = fold_editions(&mut index, editions);
    BuildOutput {
        companies: index.into_sorted(),
        stats,
    }
}

/// Like [`run`] but folds onto an existing index. `stats.companies` is the
/// index size afterwards.
pub fn fold_editions(index: &mut CompanyIndex, editions: &[EditionText]) -> RunStats {
    fold_editions_with(index, editions, |_| {})
}

/// `on_folded` is called after each edition is merged.
pub fn fold_editions_with<F>(index: &mut CompanyIndex, editions: &[EditionText], mut on_folded: F) -> RunStats
where
    F: FnMut(&EditionText),
{
    let mut ordered: Vec<EditionText> = editions.to_vec();
    ordered.sort_by_key(|e| e.number);
    let scans = scan_all(&ordered);

    let mut stats = RunStats {
        editions: ordered.len(),
        ..Default::default()
    };
    for (edition, scan) in ordered.iter().zip(scans) {
        stats.lines_scanned += scan.lines;
        let parsed = scan.listings.len();
        let before = stats;
        fold_listings(index, scan.listings, &mut stats);
        info!(
            edition = edition.number,
            parsed,
            rejected = stats.rejected_invalid - before.rejected_invalid,
            "edition folded"
        );
        on_folded(edition);
    }
    stats.companies = index.len();
    stats
}

/// Sequential fold of already-parsed listings.
pub fn fold_listings(index: &mut CompanyIndex, listings: Vec<RawListing>, stats: &mut RunStats) {
    for listing in listings {
        stats.listings_parsed += 1;
        let company = listing.company.clone();
        let edition = listing.edition;
        let folded = clean_listing(listing).and_then(|l| index.fold(&l));
        match folded {
            Ok(FoldOutcome::Duplicate) => stats.rejected_duplicate += 1,
            Ok(_) => {}
            Err(reason) => {
                debug!(%company, edition, %reason, "listing rejected");
                stats.rejected_invalid += 1;
            }
        }
    }
}
