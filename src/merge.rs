use std::collections::HashMap;

use crate::error::Reject;
use crate::model::{CanonicalCompany, RawListing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldOutcome {
    /// First sighting of the company.
    Created,
    /// Known company, edition not seen for it before.
    NewEdition,
    /// Company already recorded in this edition.
    Duplicate,
}

/// The listing that currently supplies a record's latest-edition fields, and
/// the record as it stood before that edition promoted it.
#[derive(Debug, Clone)]
struct LatestSighting {
    before: Option<CanonicalCompany>,
    best: RawListing,
}

/// Folds listings into one record per company key, keeping first-seen order.
#[derive(Debug, Clone, Default)]
pub struct CompanyIndex {
    positions: HashMap<String, usize>,
    companies: Vec<CanonicalCompany>,
    sightings: Vec<Option<LatestSighting>>,
}

impl CompanyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&CanonicalCompany> {
        self.positions.get(key).map(|&i| &self.companies[i])
    }

    pub fn max_edition(&self) -> Option<u32> {
        self.companies.iter().map(|c| c.latest_edition).max()
    }

    pub fn fold(&mut self, listing: &RawListing) -> Result<FoldOutcome, Reject> {
        if listing.edition == 0 {
            return Err(Reject::MergeAnomaly("edition must be positive"));
        }
        let key = listing.key();
        if key.is_empty() {
            return Err(Reject::MergeAnomaly("empty company key"));
        }

        let Some(&i) = self.positions.get(&key) else {
            self.positions.insert(key, self.companies.len());
            self.companies.push(CanonicalCompany::from_listing(listing));
            self.sightings.push(Some(LatestSighting {
                before: None,
                best: listing.clone(),
            }));
            return Ok(FoldOutcome::Created);
        };

        let record = &mut self.companies[i];
        let sighting = &mut self.sightings[i];

        if listing.edition > record.latest_edition {
            *sighting = Some(LatestSighting {
                before: Some(record.clone()),
                best: listing.clone(),
            });
            return Ok(merge_into(record, listing));
        }

        let outcome = merge_into(record, listing);
        if listing.edition == record.latest_edition {
            if let Some(s) = sighting.as_mut().filter(|s| outranks(listing, &s.best)) {
                s.best = listing.clone();
                let rebuilt = match &s.before {
                    None => CanonicalCompany::from_listing(listing),
                    Some(before) => {
                        let mut r = before.clone();
                        merge_into(&mut r, listing);
                        r
                    }
                };
                record.company = rebuilt.company;
                record.industry = rebuilt.industry;
                record.stage = rebuilt.stage;
                record.location = rebuilt.location;
                record.investors = rebuilt.investors;
                record.latest_date = rebuilt.latest_date;
            }
        }
        Ok(outcome)
    }

    /// Merges a whole stored record. Returns `true` when the key was already
    /// present.
    pub fn absorb(&mut self, company: CanonicalCompany) -> bool {
        let key = company.key();
        match self.positions.get(&key) {
            Some(&i) => {
                merge_records(&mut self.companies[i], company);
                self.sightings[i] = None;
                true
            }
            None => {
                self.positions.insert(key, self.companies.len());
                self.companies.push(company);
                self.sightings.push(None);
                false
            }
        }
    }

    /// Records in first-seen order.
    pub fn companies(&self) -> &[CanonicalCompany] {
        &self.companies
    }

    /// Latest edition first; equal editions keep first-seen order.
    pub fn into_sorted(self) -> Vec<CanonicalCompany> {
        let mut companies = self.companies;
        companies.sort_by(|a, b| b.latest_edition.cmp(&a.latest_edition));
        companies
    }
}

fn filled(listing: &RawListing) -> usize {
    [
        &listing.industry,
        &listing.stage,
        &listing.location,
        &listing.investors,
    ]
    .iter()
    .filter(|f| !f.is_empty())
    .count()
}

fn spelling(l: &RawListing) -> (&str, &str, &str, &str, &str) {
    (&l.company, &l.industry, &l.stage, &l.location, &l.investors)
}

/// More filled fields wins; ties go to the lexicographically smaller listing.
fn outranks(candidate: &RawListing, current: &RawListing) -> bool {
    match filled(candidate).cmp(&filled(current)) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => spelling(candidate) < spelling(current),
    }
}

/// Same rules as [`merge_into`], applied to a full record.
fn merge_records(existing: &mut CanonicalCompany, other: CanonicalCompany) {
    if other.latest_edition > existing.latest_edition {
        existing.latest_edition = other.latest_edition;
        existing.latest_date = other.latest_date;
        backfill(&mut existing.industry, &other.industry);
        backfill(&mut existing.stage, &other.stage);
        backfill(&mut existing.location, &other.location);
    }
    existing.editions.extend(other.editions);
    for category in other.role_categories {
        if !existing.role_categories.contains(&category) {
            existing.role_categories.push(category);
        }
    }
    backfill(&mut existing.description, &other.description);
}

/// A strictly newer edition promotes the record and fills its empty fields.
/// Anything else only extends the edition set and categories.
pub fn merge_into(existing: &mut CanonicalCompany, listing: &RawListing) -> FoldOutcome {
    let outcome = if existing.editions.insert(listing.edition) {
        FoldOutcome::NewEdition
    } else {
        FoldOutcome::Duplicate
    };

    if listing.edition > existing.latest_edition {
        existing.latest_edition = listing.edition;
        existing.latest_date = listing.date.clone();
        backfill(&mut existing.industry, &listing.industry);
        backfill(&mut existing.stage, &listing.stage);
        backfill(&mut existing.location, &listing.location);
    }

    if let Some(category) = listing.role_category {
        if !existing.role_categories.contains(&category) {
            existing.role_categories.push(category);
        }
    }

    outcome
}

fn backfill(field: &mut String, candidate: &str) {
    if field.is_empty() && !candidate.is_empty() {
        *field = candidate.to_string();
    }
}
