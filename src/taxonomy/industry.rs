use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::rules::{first_match, Pattern, Rule};

/// A canonical tag plus narrower tags that take over when they also match.
#[derive(Debug)]
pub struct Family {
    pub tag: &'static str,
    pub overrides: Vec<Rule<&'static str>>,
}

impl Family {
    fn plain(tag: &'static str) -> Self {
        Family {
            tag,
            overrides: Vec::new(),
        }
    }

    fn with(tag: &'static str, overrides: Vec<Rule<&'static str>>) -> Self {
        Family { tag, overrides }
    }

    pub fn resolve(&self, lower: &str) -> &'static str {
        first_match(&self.overrides, lower)
            .map(|r| r.outcome)
            .unwrap_or(self.tag)
    }
}

fn family(name: &'static str, pattern: Pattern, family: Family) -> Rule<Family> {
    Rule::new(name, pattern, family)
}

static FAMILIES: LazyLock<Vec<Rule<Family>>> = LazyLock::new(|| {
    use Pattern::{AllOf, AnyOf, Contains, Equals};
    vec![
        family(
            "healthcare",
            Contains(&[
                "health",
                "medtech",
                "medical",
                "clinical",
                "behavioral health",
                "wellness",
                "fitness",
                "hospital",
                "pharma",
                "therapeutic",
                "biopharma",
                "drug development",
            ]),
            Family::with(
                "Healthcare",
                vec![
                    Rule::new("mental health", Contains(&["mental health"]), "Mental Health"),
                    Rule::new("dental", Contains(&["dental", "dentis"]), "Healthcare"),
                    Rule::new("veterinary", Contains(&["veterinary", "vet "]), "Healthcare"),
                ],
            ),
        ),
        family(
            "ai",
            Pattern::re(
                r"\bai\b|artificial intelligence|machine learning|deep learning|llm|\bml\b|computer vision|nlp",
            ),
            Family::with("AI", vec![Rule::new("robotics", Contains(&["robot"]), "Robotics")]),
        ),
        family(
            "fintech",
            Contains(&[
                "fintech",
                "financial",
                "banking",
                "payment",
                "wealth",
                "crypto",
                "bitcoin",
                "trading",
                "investing",
            ]),
            Family::with(
                "Fintech",
                vec![Rule::new(
                    "web3",
                    Contains(&["crypto", "blockchain", "web3", "web 3"]),
                    "Web3",
                )],
            ),
        ),
        family(
            "biotech",
            Contains(&[
                "biotech",
                "bio tech",
                "life science",
                "bioinformatics",
                "genetic",
                "biopharm",
            ]),
            Family::plain("Biotech"),
        ),
        family(
            "e-commerce",
            Contains(&["commerce", "retail", "marketplace"]),
            Family::plain("E-commerce"),
        ),
        family(
            "edtech",
            Contains(&["edtech", "education", "e-learning", "learning"]),
            Family::plain("Edtech"),
        ),
        family("insurtech", Contains(&["insur"]), Family::plain("Insurtech")),
        family(
            "cybersecurity",
            AnyOf(vec![Contains(&["security", "cybersec"]), Equals(&["cyber"])]),
            Family::plain("Cybersecurity"),
        ),
        family(
            "marketing",
            Contains(&["marketing", "martech", "adtech", "advertising"]),
            Family::plain("Marketing"),
        ),
        family(
            "logistics",
            Contains(&["logistic", "supply chain", "shipping", "delivery", "fleet"]),
            Family::plain("Logistics"),
        ),
        family(
            "real estate",
            Contains(&["real estate", "proptech", "property"]),
            Family::plain("Real Estate"),
        ),
        family(
            "hrtech",
            Contains(&[
                "hrtech",
                "hr tech",
                "recruiting",
                "recruitment",
                "talent",
                "human resources",
                "hiring",
                "staffing",
            ]),
            Family::plain("HRTech"),
        ),
        family(
            "legal",
            Contains(&["legal", "legaltech", "law"]),
            Family::plain("Legal"),
        ),
        family(
            "climate",
            Contains(&[
                "climate",
                "clean energy",
                "cleantech",
                "greentech",
                "renewable",
                "solar",
                "sustainable energy",
            ]),
            Family::plain("Climate"),
        ),
        family(
            "energy",
            AllOf(vec![
                Contains(&["energy"]),
                Pattern::not(Contains(&["renewable", "clean"])),
            ]),
            Family::plain("Energy"),
        ),
        family(
            "food",
            Contains(&["food", "restaurant", "beverage", "meal", "catering", "grocery"]),
            Family::plain("Food & Beverage"),
        ),
        family(
            "defense",
            Contains(&["defense", "aerospace", "space", "satellite"]),
            Family::with(
                "Defense",
                vec![Rule::new(
                    "aerospace",
                    Contains(&["space", "satellite", "aerospace"]),
                    "Aerospace",
                )],
            ),
        ),
        family(
            "travel",
            Contains(&[
                "travel",
                "hospitality",
                "hotel",
                "ride",
                "mobility",
                "transportation",
            ]),
            Family::plain("Travel"),
        ),
        family(
            "media",
            Contains(&[
                "media",
                "entertainment",
                "video",
                "streaming",
                "content",
                "publishing",
                "podcast",
            ]),
            Family::with(
                "Media",
                vec![
                    Rule::new("gaming", Contains(&["gaming", "game", "esport"]), "Gaming"),
                    Rule::new("social media", Contains(&["social"]), "Social Media"),
                ],
            ),
        ),
        family(
            "developer tools",
            Contains(&["developer", "devtools", "dev tools", "devops", "api"]),
            Family::plain("Developer Tools"),
        ),
        family(
            "infrastructure",
            Contains(&[
                "infrastructure",
                "cloud",
                "data center",
                "datacenter",
                "edge computing",
            ]),
            Family::plain("Infrastructure"),
        ),
        family(
            "hardware",
            Contains(&[
                "hardware",
                "iot",
                "semiconductor",
                "electronics",
                "sensor",
                "wearable",
            ]),
            Family::plain("Hardware"),
        ),
        family(
            "robotics",
            Contains(&["automat", "robot", "autonomous", "drone"]),
            Family::plain("Robotics"),
        ),
        family(
            "manufacturing",
            Contains(&["manufacturing", "construction", "industrial"]),
            Family::plain("Manufacturing"),
        ),
        family(
            "government",
            AnyOf(vec![
                Contains(&["government", "govtech", "civic"]),
                Equals(&["public"]),
            ]),
            Family::plain("Government"),
        ),
        family(
            "nonprofit",
            Contains(&["nonprofit", "non-profit", "philanthrop", "charity"]),
            Family::plain("Nonprofit"),
        ),
        family(
            "agriculture",
            Contains(&["agri", "agtech", "farm"]),
            Family::plain("Agriculture"),
        ),
        family(
            "productivity",
            Contains(&["future of work", "collaboration", "productivity", "workflow"]),
            Family::plain("Productivity"),
        ),
        family("quantum", Contains(&["quantum"]), Family::plain("Quantum Computing")),
    ]
});

/// Whole-string synonyms. An empty value means "not an industry".
const EXACT: &[(&str, &str)] = &[
    ("web3", "Web3"),
    ("web 3", "Web3"),
    ("blockchain", "Web3"),
    ("blockchains", "Web3"),
    ("crypto", "Web3"),
    ("cryptocurrency", "Web3"),
    ("nft", "Web3"),
    ("dao", "Web3"),
    ("saas", "SaaS"),
    ("software", "SaaS"),
    ("b2b saas", "SaaS"),
    ("enterprise saas", "SaaS"),
    ("enterprise software", "SaaS"),
    ("software development", "Developer Tools"),
    ("data", "Data"),
    ("analytics", "Data"),
    ("big data", "Data"),
    ("data analytics", "Data"),
    ("business intelligence", "Data"),
    ("infrastructure", "Infrastructure"),
    ("devtools", "Developer Tools"),
    ("developer tools", "Developer Tools"),
    ("dev tools", "Developer Tools"),
    ("api", "Developer Tools"),
    ("apis", "Developer Tools"),
    ("robotics", "Robotics"),
    ("hardware", "Hardware"),
    ("iot", "Hardware"),
    ("semiconductor", "Hardware"),
    ("semiconductors", "Hardware"),
    ("climate", "Climate"),
    ("climate tech", "Climate"),
    ("climatetech", "Climate"),
    ("cleantech", "Climate"),
    ("greentech", "Climate"),
    ("sustainability", "Climate"),
    ("energy", "Energy"),
    ("marketplace", "E-commerce"),
    ("marketplaces", "E-commerce"),
    ("consumer", "Consumer"),
    ("consumer goods", "Consumer"),
    ("cpg", "Consumer"),
    ("social", "Social Media"),
    ("social media", "Social Media"),
    ("social network", "Social Media"),
    ("media", "Media"),
    ("digital media", "Media"),
    ("entertainment", "Media"),
    ("gaming", "Gaming"),
    ("games", "Gaming"),
    ("esports", "Gaming"),
    ("e-sports", "Gaming"),
    ("sports", "Sports"),
    ("food", "Food & Beverage"),
    ("food tech", "Food & Beverage"),
    ("foodtech", "Food & Beverage"),
    ("agriculture", "Agriculture"),
    ("agtech", "Agriculture"),
    ("construction", "Manufacturing"),
    ("manufacturing", "Manufacturing"),
    ("automotive", "Automotive"),
    ("electric vehicle", "Automotive"),
    ("electric vehicles", "Automotive"),
    ("ev", "Automotive"),
    ("transportation", "Travel"),
    ("mobility", "Travel"),
    ("travel", "Travel"),
    ("hospitality", "Travel"),
    ("government", "Government"),
    ("govtech", "Government"),
    ("nonprofit", "Nonprofit"),
    ("non-profit", "Nonprofit"),
    ("venture capital", "VC"),
    ("vc", "VC"),
    ("venture fund", "VC"),
    ("investing", "VC"),
    ("investments", "VC"),
    ("pet", "Consumer"),
    ("pets", "Consumer"),
    ("pet care", "Consumer"),
    ("fashion", "Consumer"),
    ("apparel", "Consumer"),
    ("beauty", "Consumer"),
    ("wellness", "Healthcare"),
    ("fitness", "Healthcare"),
    ("mental health", "Mental Health"),
    ("dental", "Healthcare"),
    ("veterinary", "Healthcare"),
    ("legal", "Legal"),
    ("legaltech", "Legal"),
    ("sales", "SaaS"),
    ("crm", "SaaS"),
    ("database", "Data"),
    ("databases", "Data"),
    ("deeptech", "Hardware"),
    ("deep tech", "Hardware"),
    ("quantum computing", "Quantum Computing"),
    ("quantum", "Quantum Computing"),
    ("design", "Consumer"),
    ("community", "Social Media"),
    ("communities", "Social Media"),
    ("messaging", "Social Media"),
    ("dating", "Social Media"),
    ("creator economy", "Media"),
    ("enterprise", "SaaS"),
    ("b2b", "SaaS"),
    ("consulting", "Services"),
    ("agency", "Services"),
    ("services", "Services"),
    ("operations", "SaaS"),
    ("compliance", "SaaS"),
    ("procurement", "SaaS"),
    ("accounting", "SaaS"),
    ("home services", "Services"),
    ("home", "Consumer"),
    ("internet", "SaaS"),
    ("platform", "SaaS"),
    ("tech", "SaaS"),
    ("technology", "SaaS"),
    ("information technology", "SaaS"),
    ("it services", "SaaS"),
    ("voice", "AI"),
    ("speech", "AI"),
    ("vr", "Hardware"),
    ("ar", "Hardware"),
    ("augmented reality", "Hardware"),
    ("virtual reality", "Hardware"),
    ("ar/vr", "Hardware"),
    ("vr/xr", "Hardware"),
    ("mobile", "SaaS"),
    ("mobile apps", "SaaS"),
    ("apps", "SaaS"),
    ("website", "SaaS"),
    ("websites", "SaaS"),
    // stages, programs and company types
    ("seed", ""),
    ("pre-seed", ""),
    ("pre seed", ""),
    ("seed stage", ""),
    ("seed-stage", ""),
    ("series a", ""),
    ("series b", ""),
    ("series c", ""),
    ("series d", ""),
    ("series e", ""),
    ("series f", ""),
    ("series g", ""),
    ("series h", ""),
    ("early-stage", ""),
    ("early stage", ""),
    ("late-stage", ""),
    ("late stage", ""),
    ("later-stage", ""),
    ("yc", ""),
    ("y combinator", ""),
    ("public", ""),
    ("acquired", ""),
    ("pe-backed", ""),
    ("startup studio", ""),
    ("accelerator", ""),
    ("incubator", ""),
    ("holding company", ""),
    ("remote", ""),
];

static EXACT_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| EXACT.iter().copied().collect());

static ACRONYMS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    ["AI", "SaaS", "Web3", "B2B", "B2C"]
        .into_iter()
        .map(|a| (Regex::new(&format!(r"(?i)\b{a}\b")).unwrap(), a))
        .collect()
});

/// Where a normalized value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndustryMatch {
    Family(&'static str),
    Exact,
    PassThrough,
}

/// Maps a raw industry to its canonical tag. `None` means the value is not an
/// industry at all and the listing should be dropped.
pub fn normalize_industry(industry: &str) -> Option<String> {
    classify(industry).map(|(tag, _)| tag)
}

pub fn classify(industry: &str) -> Option<(String, IndustryMatch)> {
    let industry = industry.trim();
    if industry.is_empty() {
        return None;
    }
    let lower = industry.to_lowercase();

    if let Some(rule) = first_match(&FAMILIES, &lower) {
        return Some((
            rule.outcome.resolve(&lower).to_string(),
            IndustryMatch::Family(rule.name),
        ));
    }

    if let Some(mapped) = EXACT_MAP.get(lower.as_str()) {
        return (!mapped.is_empty()).then(|| (mapped.to_string(), IndustryMatch::Exact));
    }

    let fixed = ACRONYMS
        .iter()
        .fold(industry.to_string(), |acc, (re, canonical)| {
            re.replace_all(&acc, *canonical).into_owned()
        });
    Some((fixed, IndustryMatch::PassThrough))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(s: &str) -> Option<String> {
        normalize_industry(s)
    }

    #[test]
    fn mental_health_overrides_healthcare() {
        assert_eq!(norm("Digital Health, mental health support").as_deref(), Some("Mental Health"));
        assert_eq!(norm("Digital Health").as_deref(), Some("Healthcare"));
        assert_eq!(norm("Dental health").as_deref(), Some("Healthcare"));
        assert_eq!(norm("Veterinary").as_deref(), Some("Healthcare"));
    }

    #[test]
    fn ai_and_robotics() {
        assert_eq!(norm("Generative AI").as_deref(), Some("AI"));
        assert_eq!(norm("AI robotics").as_deref(), Some("Robotics"));
        assert_eq!(norm("LLM infra").as_deref(), Some("AI"));
        // "ai" inside a word is not AI
        assert_eq!(norm("Retail").as_deref(), Some("E-commerce"));
    }

    #[test]
    fn fintech_and_web3() {
        assert_eq!(norm("Payments").as_deref(), Some("Fintech"));
        assert_eq!(norm("Crypto trading").as_deref(), Some("Web3"));
        assert_eq!(norm("Blockchain payments").as_deref(), Some("Web3"));
    }

    #[test]
    fn defense_and_media_overrides() {
        assert_eq!(norm("Defense tech").as_deref(), Some("Defense"));
        assert_eq!(norm("Space").as_deref(), Some("Aerospace"));
        assert_eq!(norm("Video games media").as_deref(), Some("Gaming"));
        assert_eq!(norm("Social media").as_deref(), Some("Social Media"));
        assert_eq!(norm("Streaming").as_deref(), Some("Media"));
    }

    #[test]
    fn energy_excludes_clean() {
        assert_eq!(norm("Energy storage").as_deref(), Some("Energy"));
        assert_eq!(norm("Clean energy").as_deref(), Some("Climate"));
    }

    #[test]
    fn exact_table_and_nulls() {
        assert_eq!(norm("B2B SaaS").as_deref(), Some("SaaS"));
        assert_eq!(norm("software").as_deref(), Some("SaaS"));
        assert_eq!(norm("Consumer").as_deref(), Some("Consumer"));
        assert_eq!(norm("Series A"), None);
        assert_eq!(norm("YC"), None);
        assert_eq!(norm("Remote"), None);
        assert_eq!(norm(""), None);
    }

    #[test]
    fn family_wins_over_exact_table() {
        // "public" is caught by the government family before the exact table
        assert_eq!(classify("public"), Some(("Government".into(), IndustryMatch::Family("government"))));
    }

    #[test]
    fn pass_through_fixes_acronyms() {
        assert_eq!(norm("saas for dentists").as_deref(), Some("SaaS for dentists"));
        assert_eq!(norm("b2c apps").as_deref(), Some("B2C apps"));
        assert_eq!(norm("Tools").as_deref(), Some("Tools"));
    }

    #[test]
    fn canonical_values_are_fixed_points() {
        for tag in [
            "Healthcare", "Mental Health", "AI", "Robotics", "Fintech", "Web3", "Biotech",
            "E-commerce", "Edtech", "Insurtech", "Cybersecurity", "Marketing", "Logistics",
            "Real Estate", "HRTech", "Legal", "Climate", "Energy", "Food & Beverage",
            "Aerospace", "Defense", "Travel", "Media", "Gaming", "Social Media",
            "Developer Tools", "Infrastructure", "Hardware", "Manufacturing", "Government",
            "Nonprofit", "Agriculture", "Productivity", "Quantum Computing", "SaaS", "Data",
            "Consumer", "Sports", "Automotive", "VC", "Services",
        ] {
            assert_eq!(norm(tag).as_deref(), Some(tag), "{tag} is not a fixed point");
        }
    }
}
