use std::sync::LazyLock;

use regex::Regex;

/// `Title, Company (details), Location`
static LISTING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^,]+),\s*([^(]+?)\s*\(([^)]+)\),?\s*(.+?)$").unwrap()
});
static COMPANY_TAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,\s]+$").unwrap());
static LOCATION_EDGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[/\s]+|[/\s]+$").unwrap());

const MIN_LINE_LEN: usize = 15;
const MIN_COMPANY_LEN: usize = 2;
const MAX_COMPANY_LEN: usize = 100;
const MAX_LOCATION_LEN: usize = 100;

const NOISE_PHRASES: &[&str] = &["subscribe", "click here", "fill out", "form here", "newsletter"];
const STAGE_KEYWORDS: &[&str] = &[
    "series",
    "seed",
    "public",
    "early-stage",
    "early stage",
    "late-stage",
    "acquired",
];
const INVESTOR_KEYWORD: &str = "backed";

/// Fields of one listing line, before edition context is attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLine {
    pub job_title: String,
    pub company: String,
    pub industry: String,
    pub stage: String,
    pub investors: String,
    pub location: String,
}

pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let line = line.trim();
    if line.chars().count() < MIN_LINE_LEN {
        return None;
    }

    let caps = LISTING_RE.captures(line)?;
    let job_title = caps[1].trim();
    let company = caps[2].trim();
    let details = caps[3].trim();
    let location = caps[4].trim();

    let company_len = company.chars().count();
    if !(MIN_COMPANY_LEN..=MAX_COMPANY_LEN).contains(&company_len) {
        return None;
    }
    if location.chars().count() > MAX_LOCATION_LEN {
        return None;
    }
    let company_lower = company.to_lowercase();
    if NOISE_PHRASES.iter().any(|p| company_lower.contains(p)) {
        return None;
    }

    let (industry, stage, investors) = split_details(details);

    Some(ParsedLine {
        job_title: job_title.to_string(),
        company: COMPANY_TAIL_RE.replace(company, "").trim().to_string(),
        industry,
        stage,
        investors,
        location: LOCATION_EDGE_RE.replace_all(location, "").trim().to_string(),
    })
}

/// `Industry, Stage, X-backed` → (industry, stage, investors).
fn split_details(details: &str) -> (String, String, String) {
    let mut parts = details.split(',').map(str::trim);
    let industry = parts.next().unwrap_or_default().to_string();
    let mut stage = String::new();
    let mut investors = String::new();

    for part in parts {
        let lower = part.to_lowercase();
        if STAGE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            if stage.is_empty() {
                stage = part.to_string();
            }
        } else if lower.contains(INVESTOR_KEYWORD) && investors.is_empty() {
            investors = part.to_string();
        }
    }

    (industry, stage, investors)
}
