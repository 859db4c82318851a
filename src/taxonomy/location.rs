use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

use super::rules::{first_match, Pattern, Rule};

pub const REMOTE: &str = "Remote";
pub const SEPARATOR: &str = " / ";

const MAX_PART_LEN: usize = 30;

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static PARENS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.*?\)").unwrap());
static EDGE_SLASH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[/\s]+|[/\s]+$").unwrap());
static TRAILING_COMMA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,\s*$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Place {
    Tag(&'static str),
    /// Recognized but carries no place of its own.
    Skip,
}

/// Metro areas first, then single cities, then international.
const GAZETTEER: &[(&str, &[&str])] = &[
    (
        "SF",
        &[
            "sf", "san francisco", "sf bay area", "bay area", "palo alto", "menlo park",
            "mountain view", "san jose", "san mateo", "redwood city", "oakland", "sunnyvale",
            "santa clara", "cupertino", "fremont", "burlingame", "san bruno", "san carlos",
            "foster city", "daly city", "millbrae", "berkeley", "emeryville", "alameda",
            "hayward", "san leandro", "milpitas", "santa cruz", "sausalito", "scotts valley",
            "pleasanton", "los altos",
        ],
    ),
    (
        "NYC",
        &[
            "ny", "nyc", "new york", "new york city", "brooklyn", "manhattan", "queens",
            "jersey city", "hoboken", "williamsburg", "secaucus",
        ],
    ),
    (
        "Los Angeles",
        &[
            "la", "los angeles", "santa monica", "culver city", "pasadena", "venice",
            "playa vista", "long beach", "glendale", "burbank", "beverly hills",
            "west hollywood", "el segundo", "torrance", "sherman oaks", "costa mesa", "irvine",
        ],
    ),
    (
        "Boston",
        &[
            "boston", "cambridge", "somerville", "waltham", "needham", "newton", "quincy",
            "natick", "woburn",
        ],
    ),
    (
        "DC",
        &["dc", "washington", "washington dc", "mclean", "bethesda", "arlington", "alexandria"],
    ),
    ("Denver", &["denver", "boulder", "broomfield", "arvada", "englewood"]),
    ("Seattle", &["seattle", "bellevue", "redmond", "kirkland", "everett", "woodinville"]),
    (
        "Miami",
        &["miami", "fort lauderdale", "boca raton", "aventura", "west palm beach", "plantation"],
    ),
    ("Chicago", &["chicago", "evanston", "oak park"]),
    ("Austin", &["austin"]),
    ("Atlanta", &["atlanta", "marietta", "norcross"]),
    ("Philadelphia", &["philadelphia", "philly"]),
    ("Portland", &["portland"]),
    ("Phoenix", &["phoenix", "scottsdale", "tempe"]),
    ("San Diego", &["san diego", "carlsbad"]),
    ("Dallas", &["dallas", "plano", "coppell"]),
    ("Houston", &["houston"]),
    ("Nashville", &["nashville"]),
    ("Salt Lake City", &["salt lake city", "lehi", "provo", "south jordan", "lindon"]),
    ("Raleigh", &["raleigh", "durham", "morrisville"]),
    ("Detroit", &["detroit", "novi", "troy"]),
    ("Minneapolis", &["minneapolis"]),
    ("Pittsburgh", &["pittsburgh"]),
    ("Columbus", &["columbus"]),
    ("Charlotte", &["charlotte"]),
    ("Baltimore", &["baltimore"]),
    ("Milwaukee", &["milwaukee"]),
    ("St. Louis", &["st. louis", "st louis"]),
    ("Richmond", &["richmond"]),
    ("Omaha", &["omaha"]),
    ("Reno", &["reno", "sparks"]),
    ("Toronto", &["toronto"]),
    ("Montreal", &["montreal"]),
    ("Vancouver", &["vancouver"]),
    ("Calgary", &["calgary"]),
    ("Ottawa", &["ottawa"]),
    ("Canada", &["canada", "canada)"]),
    ("London", &["london"]),
    ("Paris", &["paris"]),
    ("Berlin", &["berlin"]),
    ("Singapore", &["singapore"]),
    ("Stockholm", &["stockholm"]),
    ("Dublin", &["dublin", "ireland"]),
    ("UK", &["uk", "united kingdom)"]),
    ("Australia", &["australia"]),
];

static PLACES: LazyLock<Vec<Rule<Place>>> = LazyLock::new(|| {
    use Pattern::{AnyOf, Contains, Equals};
    let mut rules = vec![
        Rule::new(
            "remote",
            Contains(&["remote", "anywhere", "global", "worldwide", "various"]),
            Place::Tag(REMOTE),
        ),
        Rule::new("hybrid", Contains(&["hybrid"]), Place::Skip),
        Rule::new(
            "multi-state",
            AnyOf(vec![
                Contains(&["us states", "multiple states"]),
                Equals(&["united states"]),
            ]),
            Place::Tag(REMOTE),
        ),
        Rule::new("coast", Contains(&["east coast", "west coast"]), Place::Tag(REMOTE)),
    ];
    rules.extend(
        GAZETTEER
            .iter()
            .map(|&(tag, aliases)| Rule::new(tag, Equals(aliases), Place::Tag(tag))),
    );
    rules
});

/// Every value a normalized location token can take.
pub fn canonical_locations() -> impl Iterator<Item = &'static str> {
    std::iter::once(REMOTE).chain(GAZETTEER.iter().map(|&(tag, _)| tag))
}

fn collapse_ws(s: &str) -> String {
    WS_RE.replace_all(s.trim(), " ").into_owned()
}

fn clean_whole(location: &str) -> String {
    let collapsed = collapse_ws(location);
    let trimmed = EDGE_SLASH_RE.replace_all(&collapsed, "");
    let trimmed: &str = trimmed.as_ref();
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    TRAILING_COMMA_RE.replace(trimmed, "").into_owned()
}

fn clean_part(part: &str) -> String {
    let head = part.split(',').next().unwrap_or_default().trim();
    let head = PARENS_RE.replace_all(head, "");
    collapse_ws(&head)
}

fn place_of(part: &str) -> Option<&'static str> {
    let part = clean_part(part);
    if part.is_empty() || part.chars().count() > MAX_PART_LEN {
        return None;
    }
    match first_match(&PLACES, &part.to_lowercase())?.outcome {
        Place::Tag(tag) => Some(tag),
        Place::Skip => None,
    }
}

/// Maps a raw location to `" / "`-joined canonical tags. Unknown places are
/// dropped; if nothing survives the result is `"Remote"`.
pub fn normalize_location(location: &str) -> String {
    let tags: Vec<&str> = clean_whole(location)
        .split('/')
        .filter_map(place_of)
        .unique()
        .collect();
    if tags.is_empty() {
        REMOTE.to_string()
    } else {
        tags.join(SEPARATOR)
    }
}
