use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Role section a listing was found under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleCategory {
    #[serde(rename = "Chief of Staff")]
    ChiefOfStaff,
    #[serde(rename = "BizOps")]
    BizOps,
    #[serde(rename = "VC")]
    Vc,
}

impl RoleCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            RoleCategory::ChiefOfStaff => "Chief of Staff",
            RoleCategory::BizOps => "BizOps",
            RoleCategory::Vc => "VC",
        }
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw text of one newsletter edition.
#[derive(Debug, Clone, Default)]
pub struct EditionText {
    pub number: u32,
    /// May be empty; the scan falls back to a date found in `content`.
    pub date: String,
    pub content: String,
}

impl EditionText {
    pub fn new(number: u32, date: impl Into<String>, content: impl Into<String>) -> Self {
        EditionText {
            number,
            date: date.into(),
            content: content.into(),
        }
    }
}

/// One matched listing line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawListing {
    pub job_title: String,
    pub company: String,
    pub industry: String,
    pub stage: String,
    pub investors: String,
    pub location: String,
    pub edition: u32,
    pub date: String,
    pub role_category: Option<RoleCategory>,
}

impl RawListing {
    pub fn key(&self) -> String {
        identity_key(&self.company)
    }
}

/// Merged record for one company across every edition it appeared in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalCompany {
    pub company: String,
    pub industry: String,
    #[serde(default)]
    pub stage: String,
    pub location: String,
    #[serde(default)]
    pub investors: String,
    pub editions: BTreeSet<u32>,
    pub latest_edition: u32,
    #[serde(default)]
    pub latest_date: String,
    #[serde(default)]
    pub role_categories: Vec<RoleCategory>,
    #[serde(default)]
    pub description: String,
}

impl CanonicalCompany {
    /// First sighting of a company.
    pub fn from_listing(listing: &RawListing) -> Self {
        CanonicalCompany {
            company: listing.company.clone(),
            industry: listing.industry.clone(),
            stage: listing.stage.clone(),
            location: listing.location.clone(),
            investors: listing.investors.clone(),
            editions: BTreeSet::from([listing.edition]),
            latest_edition: listing.edition,
            latest_date: listing.date.clone(),
            role_categories: listing.role_category.into_iter().collect(),
            description: String::new(),
        }
    }

    pub fn key(&self) -> String {
        identity_key(&self.company)
    }
}

/// Lowercase, trimmed company name.
pub fn identity_key(company: &str) -> String {
    company.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_lowercase_trimmed() {
        assert_eq!(identity_key("  Acme Health "), "acme health");
    }

    #[test]
    fn role_category_serializes_as_display_name() {
        let json = serde_json::to_string(&RoleCategory::ChiefOfStaff).unwrap();
        assert_eq!(json, "\"Chief of Staff\"");
        let back: RoleCategory = serde_json::from_str("\"VC\"").unwrap();
        assert_eq!(back, RoleCategory::Vc);
    }

    #[test]
    fn company_serializes_flat() {
        let listing = RawListing {
            company: "Acme".into(),
            industry: "AI".into(),
            location: "SF".into(),
            edition: 7,
            date: "Jan 5, 2025".into(),
            role_category: Some(RoleCategory::BizOps),
            ..Default::default()
        };
        let c = CanonicalCompany::from_listing(&listing);
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v["editions"], serde_json::json!([7]));
        assert_eq!(v["latest_edition"], 7);
        assert_eq!(v["role_categories"], serde_json::json!(["BizOps"]));
        assert_eq!(v["description"], "");
    }

    #[test]
    fn old_records_without_optional_fields_load() {
        let json = r#"{"company":"Acme","industry":"AI","location":"SF","editions":[3],"latest_edition":3}"#;
        let c: CanonicalCompany = serde_json::from_str(json).unwrap();
        assert!(c.stage.is_empty());
        assert!(c.role_categories.is_empty());
        assert!(c.description.is_empty());
    }
}
