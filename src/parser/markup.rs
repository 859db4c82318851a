use std::sync::LazyLock;

use regex::Regex;

static MD_LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static BLOCK_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(p|li|div|h[1-6]|tr)\s*>|<br\s*/?>").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:#{1,6}|[-*•]|\d+\.)\s+").unwrap());
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+\d+,?\s*\d{4}").unwrap()
});

const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&rsquo;", "'"),
    ("&lsquo;", "'"),
    ("&quot;", "\""),
    ("&ldquo;", "\""),
    ("&rdquo;", "\""),
    ("&ndash;", "-"),
    ("&mdash;", "-"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    // last, so "&amp;lt;" stays literal
    ("&amp;", "&"),
];

/// `[text](url)` → `text`.
pub fn strip_links(line: &str) -> String {
    MD_LINK_RE.replace_all(line, "$1").into_owned()
}

fn decode_entities(s: &str) -> String {
    ENTITIES
        .iter()
        .fold(s.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Edition content (HTML or markdown) → trimmed, non-empty plain text lines.
pub fn to_lines(content: &str) -> Vec<String> {
    let broken = BLOCK_END_RE.replace_all(content, "\n");
    let untagged = TAG_RE.replace_all(&broken, "");
    let decoded = decode_entities(&untagged);

    decoded
        .replace("\r\n", "\n")
        .split('\n')
        .map(|l| {
            let l = BULLET_RE.replace(l.trim(), "");
            strip_links(&l).trim().to_string()
        })
        .filter(|l| !l.is_empty())
        .collect()
}

/// First "Mon DD, YYYY" style date in the content, or empty.
pub fn extract_date(content: &str) -> String {
    DATE_RE
        .find(content)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_keep_their_text() {
        assert_eq!(
            strip_links("[Senior PM](https://x.com/jobs/1), Acme (AI), SF"),
            "Senior PM, Acme (AI), SF"
        );
        assert_eq!(strip_links("no links here"), "no links here");
    }

    #[test]
    fn html_becomes_lines() {
        let html = "<ul><li><a href=\"https://a\">Chief of Staff</a>, Acme &amp; Co (AI, Seed), NYC</li>\
                    <li>Ops Lead, Beta (Fintech), SF</li></ul><p>Subscribe&nbsp;now<br>thanks</p>";
        let lines = to_lines(html);
        assert_eq!(
            lines,
            vec![
                "Chief of Staff, Acme & Co (AI, Seed), NYC",
                "Ops Lead, Beta (Fintech), SF",
                "Subscribe now",
                "thanks",
            ]
        );
    }

    #[test]
    fn bullets_and_heading_marks_removed() {
        assert_eq!(
            to_lines("## VC Roles\n- PM, Acme (AI), SF\n* Ops, Beta (AI), LA\n3. CoS, Gamma (AI), NYC"),
            vec!["VC Roles", "PM, Acme (AI), SF", "Ops, Beta (AI), LA", "CoS, Gamma (AI), NYC"]
        );
    }

    #[test]
    fn blank_lines_dropped() {
        assert_eq!(to_lines("a\r\n\r\n   \nb"), vec!["a", "b"]);
        assert!(to_lines("").is_empty());
    }

    #[test]
    fn date_extraction() {
        assert_eq!(extract_date("<p>Edition 241 · Mar 3, 2025</p>"), "Mar 3, 2025");
        assert_eq!(extract_date("Sent Jan 12 2024"), "Jan 12 2024");
        assert_eq!(extract_date("nothing"), "");
    }
}
