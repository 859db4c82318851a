pub mod line;
pub mod markup;
pub mod sections;

use crate::model::{EditionText, RawListing};
use line::parse_line;
use sections::{LineKind, SectionTracker};

/// Scan result for one edition.
#[derive(Debug, Clone, Default)]
pub struct EditionScan {
    pub lines: usize,
    pub listings: Vec<RawListing>,
}

/// Edition text → lines → category-tagged listings.
pub fn parse_edition(edition: &EditionText) -> EditionScan {
    let date = if edition.date.trim().is_empty() {
        markup::extract_date(&edition.content)
    } else {
        edition.date.trim().to_string()
    };

    let lines = markup::to_lines(&edition.content);
    let line_count = lines.len();

    let (_, listings) = lines.iter().fold(
        (SectionTracker::new(), Vec::new()),
        |(mut tracker, mut out), line| {
            if let LineKind::Body(category) = tracker.observe(line) {
                if let Some(p) = parse_line(line) {
                    out.push(RawListing {
                        job_title: p.job_title,
                        company: p.company,
                        industry: p.industry,
                        stage: p.stage,
                        investors: p.investors,
                        location: p.location,
                        edition: edition.number,
                        date: date.clone(),
                        role_category: category,
                    });
                }
            }
            (tracker, out)
        },
    );

    EditionScan {
        lines: line_count,
        listings,
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoleCategory;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
    }

    #[test]
    fn edition_241_fixture() {
        let ed = EditionText::new(241, "", fixture("edition_241.html"));
        let scan = parse_edition(&ed);
        assert!(scan.lines > scan.listings.len());

        let companies: Vec<&str> = scan.listings.iter().map(|l| l.company.as_str()).collect();
        assert!(companies.contains(&"Acme Health"));
        assert!(companies.contains(&"Ledgerly"));
        assert!(!companies.iter().any(|c| c.to_lowercase().contains("subscribe")));

        assert!(scan.listings.iter().all(|l| l.edition == 241));
        assert!(scan.listings.iter().all(|l| l.date == "Mar 3, 2025"));
    }

    #[test]
    fn categories_follow_headings() {
        let ed = EditionText::new(241, "", fixture("edition_241.html"));
        let scan = parse_edition(&ed);
        let by_company = |name: &str| {
            scan.listings
                .iter()
                .find(|l| l.company == name)
                .unwrap()
                .role_category
        };
        assert_eq!(by_company("Acme Health"), Some(RoleCategory::ChiefOfStaff));
        assert_eq!(by_company("Ledgerly"), Some(RoleCategory::BizOps));
        assert_eq!(by_company("Northstar Ventures"), Some(RoleCategory::Vc));
    }

    #[test]
    fn category_resets_between_editions() {
        let first = EditionText::new(1, "Jan 1, 2025", "VC Roles\nAssociate, Fund One (Venture Capital), NYC");
        let second = EditionText::new(2, "Jan 8, 2025", "Analyst, Fund Two (Venture Capital), SF");
        assert_eq!(parse_edition(&first).listings[0].role_category, Some(RoleCategory::Vc));
        assert_eq!(parse_edition(&second).listings[0].role_category, None);
    }

    #[test]
    fn supplied_date_wins() {
        let ed = EditionText::new(9, "Feb 2, 2024", "Mar 3, 2025\nPM, Acme (AI, Seed), SF");
        let scan = parse_edition(&ed);
        assert_eq!(scan.listings[0].date, "Feb 2, 2024");
    }

    #[test]
    fn markdown_edition() {
        let md = "## Chief of Staff Roles\n\n- [Chief of Staff](https://jobs.example/1), Pylon (Developer Tools, Series A), SF\n";
        let scan = parse_edition(&EditionText::new(3, "", md));
        assert_eq!(scan.listings.len(), 1);
        assert_eq!(scan.listings[0].job_title, "Chief of Staff");
        assert_eq!(scan.listings[0].role_category, Some(RoleCategory::ChiefOfStaff));
    }
}
