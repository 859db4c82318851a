use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::merge::CompanyIndex;
use crate::model::CanonicalCompany;
use crate::pipeline::clean_fields;

/// Tokens at or above this many chars are left out of location counts.
const MAX_TOKEN_LEN: usize = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_companies: usize,
    pub unique_industries: usize,
    pub unique_locations: usize,
    pub top_industries: Vec<(String, usize)>,
    pub top_locations: Vec<(String, usize)>,
}

impl Summary {
    pub fn from_companies(companies: &[CanonicalCompany], top_n: usize) -> Self {
        let mut industries: HashMap<&str, usize> = HashMap::new();
        let mut locations: HashMap<&str, usize> = HashMap::new();

        for c in companies {
            if !c.industry.is_empty() {
                *industries.entry(c.industry.as_str()).or_default() += 1;
            }
            for token in location_tokens(&c.location) {
                *locations.entry(token).or_default() += 1;
            }
        }

        Summary {
            total_companies: companies.len(),
            unique_industries: industries.len(),
            unique_locations: locations.len(),
            top_industries: top(industries, top_n),
            top_locations: top(locations, top_n),
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("## Company Stats\n");
        out.push_str(&format!(
            "- Companies: {}\n- Unique industries: {}\n- Unique locations: {}\n",
            self.total_companies, self.unique_industries, self.unique_locations
        ));

        out.push_str(&format!("\n### Top {} industries\n", self.top_industries.len()));
        for (label, count) in &self.top_industries {
            out.push_str(&format!("- {}: {}\n", label, count));
        }

        out.push_str(&format!("\n### Top {} locations\n", self.top_locations.len()));
        for (label, count) in &self.top_locations {
            out.push_str(&format!("- {}: {}\n", label, count));
        }
        out
    }
}

fn location_tokens(location: &str) -> impl Iterator<Item = &str> {
    location
        .split('/')
        .map(|t| t.split(',').next().unwrap_or_default().trim())
        .filter(|t| !t.is_empty() && t.chars().count() < MAX_TOKEN_LEN)
}

/// Highest count first, ties alphabetical.
fn top(counts: HashMap<&str, usize>, n: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(n)
        .map(|(label, count)| (label.to_string(), count))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanCounts {
    pub removed_invalid: usize,
    pub removed_duplicate: usize,
    pub kept: usize,
}

/// Re-applies the filters and normalizers to stored records, then merges
/// records that share a key so each company appears once.
pub fn clean_companies(companies: Vec<CanonicalCompany>) -> (Vec<CanonicalCompany>, CleanCounts) {
    let mut counts = CleanCounts::default();
    let mut index = CompanyIndex::new();

    for mut company in companies {
        let (industry, location) = match clean_fields(&company.company, &company.industry, &company.location) {
            Ok(fields) => fields,
            Err(reason) => {
                debug!(company = %company.company, %reason, "stored record removed");
                counts.removed_invalid += 1;
                continue;
            }
        };
        company.industry = industry;
        company.location = location;
        if index.absorb(company) {
            counts.removed_duplicate += 1;
        }
    }

    let kept = index.into_sorted();
    counts.kept = kept.len();
    (kept, counts)
}
