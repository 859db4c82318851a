use std::sync::LazyLock;

use super::rules::{first_match, reject_list, Rule};
use crate::error::{Field, Reject};

const MIN_LEN: usize = 2;
const MAX_INDUSTRY_LEN: usize = 50;
const MAX_LOCATION_LEN: usize = 60;

/// The only two-letter locations worth keeping; other pairs are state codes.
const TWO_LETTER_LOCATIONS: &[&str] = &["SF", "LA", "NY", "DC", "UK"];

static COMPANY_REJECTS: LazyLock<Vec<Rule<()>>> = LazyLock::new(|| {
    reject_list(&[
        "^@",
        r"^\d{4}$",
        "^it was",
        "^she is",
        "^he is",
        "respond to this email",
        "check out my friend",
        "hosted earlier",
        "which teaches",
    ])
});

static INDUSTRY_REJECTS: LazyLock<Vec<Rule<()>>> = LazyLock::new(|| {
    reject_list(&[
        // years, handles, sentence starts
        r"^\d{4}$",
        "^@",
        "^it was",
        "^she is",
        "^he is",
        "^up to",
        "^applications",
        "^i (added|invest)",
        "^backed by",
        r"^\(",
        r"^\.$",
        "^h/t ",
        "respond to",
        "check out",
        // acquisitions and funding
        r"acq\s+by",
        "acquired by",
        r"acq\.",
        "just raised",
        r"raised \$",
        "series [a-h]",
        "seed.?stage",
        "pre.?seed",
        "yc/",
        // postings and asides
        "hiring for",
        "backgrounds welcome",
        "always free",
        "preferred",
        "'s (new )?fund",
        "'s (chocolate|aerospace|social impact)",
        // org structure
        "spin-off",
        "division",
        "unit within",
        "arm of",
        "incubation",
        "new body",
        "make binding",
        "venture fund$",
        "^holding company",
        "^startup studio",
        "^accelerator$",
        "^incubator$",
        "fka ",
        "former ",
        "fund led by",
        // funds and programs, not industries
        "^era$",
        "^wil$",
        "^iqt$",
        "^czi$",
        "^scf$",
        "^usdr$",
        "nonprofit that provides",
        "company covering the",
    ])
});

static LOCATION_REJECTS: LazyLock<Vec<Rule<()>>> = LazyLock::new(|| {
    reject_list(&[
        r"^\.",
        "^@",
        r"^\(",
        r"\($",
        "^it was",
        "^she is",
        "^he is",
        // investor and firm names
        "capital",
        "ventures",
        "partners",
        "collective",
        "group$",
        "next$",
        "fund",
        "respond to",
        "check out",
        "^and ",
        "^or ",
        // people and roles
        "ceo ",
        "founder",
        "announcement",
        "how it works",
        "jobs!",
        "for grabs",
        // stage and details spilled out of the parens
        "series [a-f]",
        "stage$",
        "seed",
        "acquired",
        r"public\)",
        r"healthcare\)",
        r"fintech\)",
        r"saas\)",
        r"edtech\)",
        "language learning",
        r"contract\)",
        "manager",
        "associate",
        "relations",
        // organizations
        "holdings",
        "institute",
        "company",
    ])
});

fn check_min(value: &str, field: Field) -> Result<usize, Reject> {
    let len = value.chars().count();
    if len < MIN_LEN {
        return Err(Reject::TooShort { field });
    }
    Ok(len)
}

fn check_rules(rules: &[Rule<()>], lower: &str, field: Field) -> Result<(), Reject> {
    match first_match(rules, lower) {
        Some(rule) => Err(Reject::Pattern {
            field,
            rule: rule.name,
        }),
        None => Ok(()),
    }
}

pub fn check_company(company: &str) -> Result<(), Reject> {
    check_min(company, Field::Company)?;
    check_rules(&COMPANY_REJECTS, &company.to_lowercase(), Field::Company)
}

pub fn check_industry(industry: &str) -> Result<(), Reject> {
    let len = check_min(industry, Field::Industry)?;
    check_rules(&INDUSTRY_REJECTS, &industry.to_lowercase(), Field::Industry)?;
    if len > MAX_INDUSTRY_LEN {
        return Err(Reject::TooLong {
            field: Field::Industry,
            len,
        });
    }
    Ok(())
}

pub fn check_location(location: &str) -> Result<(), Reject> {
    let len = check_min(location, Field::Location)?;
    check_rules(&LOCATION_REJECTS, &location.to_lowercase(), Field::Location)?;
    if len > MAX_LOCATION_LEN {
        return Err(Reject::TooLong {
            field: Field::Location,
            len,
        });
    }
    if len == 2 && !TWO_LETTER_LOCATIONS.contains(&location.to_uppercase().as_str()) {
        return Err(Reject::Pattern {
            field: Field::Location,
            rule: "two-letter code",
        });
    }
    Ok(())
}

pub fn is_valid_company(company: &str) -> bool {
    check_company(company).is_ok()
}

pub fn is_valid_industry(industry: &str) -> bool {
    check_industry(industry).is_ok()
}

pub fn is_valid_location(location: &str) -> bool {
    check_location(location).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_rejects_noise() {
        assert!(is_valid_company("Acme Health"));
        assert!(!is_valid_company(""));
        assert!(!is_valid_company("A"));
        assert!(!is_valid_company("@acme"));
        assert!(!is_valid_company("2024"));
        assert!(!is_valid_company("It was a great week"));
        assert!(!is_valid_company("Please RESPOND TO THIS EMAIL"));
    }

    #[test]
    fn industry_rejects_funding_and_structure() {
        assert!(is_valid_industry("Healthcare"));
        assert!(is_valid_industry("B2B SaaS"));
        for bad in [
            "Series A",
            "seed-stage",
            "Pre-seed",
            "just raised $20M",
            "Acquired by Stripe",
            "spin-off of Google",
            "research arm of MIT",
            "IQT",
            "2025",
            "@handle",
            "x",
        ] {
            assert!(!is_valid_industry(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn industry_length_bound() {
        let long = "a".repeat(51);
        assert_eq!(
            check_industry(&long),
            Err(Reject::TooLong {
                field: Field::Industry,
                len: 51
            })
        );
        assert!(is_valid_industry(&"a".repeat(50)));
    }

    #[test]
    fn industry_reports_rule() {
        assert_eq!(
            check_industry("Series B"),
            Err(Reject::Pattern {
                field: Field::Industry,
                rule: "series [a-h]"
            })
        );
    }

    #[test]
    fn location_rejects_firms_and_roles() {
        assert!(is_valid_location("San Francisco"));
        assert!(is_valid_location("Palo Alto / Remote"));
        for bad in [
            "Sequoia Capital",
            "a16z ventures",
            "Founders Fund",
            "Foo Group",
            "CEO Jane",
            "Product Manager",
            "Series B",
            "Acme Holdings",
            "Broad Institute",
        ] {
            assert!(!is_valid_location(bad), "{bad} should be rejected");
        }
        assert!(!is_valid_location(&"x".repeat(61)));
    }

    #[test]
    fn two_letter_allow_list() {
        for ok in ["SF", "LA", "NY", "DC", "UK", "sf"] {
            assert!(is_valid_location(ok), "{ok}");
        }
        for bad in ["CA", "TX", "MA"] {
            assert!(!is_valid_location(bad), "{bad}");
        }
    }
}
