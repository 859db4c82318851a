use regex::Regex;

/// A test against an already-lowercased string.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Any needle is a substring.
    Contains(&'static [&'static str]),
    /// The whole string equals one of the values.
    Equals(&'static [&'static str]),
    Regex(Regex),
    AnyOf(Vec<Pattern>),
    AllOf(Vec<Pattern>),
    Not(Box<Pattern>),
}

impl Pattern {
    /// Compiles a literal pattern. Only called on patterns written in this crate.
    pub fn re(pattern: &str) -> Pattern {
        Pattern::Regex(Regex::new(pattern).unwrap())
    }

    pub fn not(inner: Pattern) -> Pattern {
        Pattern::Not(Box::new(inner))
    }

    pub fn matches(&self, s: &str) -> bool {
        match self {
            Pattern::Contains(needles) => needles.iter().any(|n| s.contains(n)),
            Pattern::Equals(values) => values.iter().any(|v| s == *v),
            Pattern::Regex(re) => re.is_match(s),
            Pattern::AnyOf(ps) => ps.iter().any(|p| p.matches(s)),
            Pattern::AllOf(ps) => ps.iter().all(|p| p.matches(s)),
            Pattern::Not(p) => !p.matches(s),
        }
    }
}

/// One row of an ordered table. `name` shows up in rejection logs.
#[derive(Debug, Clone)]
pub struct Rule<T> {
    pub name: &'static str,
    pub pattern: Pattern,
    pub outcome: T,
}

impl<T> Rule<T> {
    pub fn new(name: &'static str, pattern: Pattern, outcome: T) -> Self {
        Rule {
            name,
            pattern,
            outcome,
        }
    }
}

/// Evaluates rows in order and returns the first that matches.
pub fn first_match<'a, T>(rules: &'a [Rule<T>], input: &str) -> Option<&'a Rule<T>> {
    rules.iter().find(|r| r.pattern.matches(input))
}

/// Builds a reject list where each regex is its own rule name.
pub fn reject_list(patterns: &[&'static str]) -> Vec<Rule<()>> {
    patterns
        .iter()
        .map(|&p| Rule::new(p, Pattern::re(p), ()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_rule_wins() {
        let rules = vec![
            Rule::new("a", Pattern::Contains(&["health"]), 1),
            Rule::new("b", Pattern::Contains(&["mental"]), 2),
        ];
        let hit = first_match(&rules, "mental health").unwrap();
        assert_eq!(hit.outcome, 1);
        assert_eq!(hit.name, "a");
    }

    #[test]
    fn no_match_is_none() {
        let rules = vec![Rule::new("a", Pattern::Equals(&["sf"]), ())];
        assert!(first_match(&rules, "sfo").is_none());
    }

    #[test]
    fn combinators() {
        let p = Pattern::AllOf(vec![
            Pattern::Contains(&["energy"]),
            Pattern::not(Pattern::Contains(&["clean"])),
        ]);
        assert!(p.matches("energy storage"));
        assert!(!p.matches("clean energy"));

        let any = Pattern::AnyOf(vec![Pattern::Equals(&["ai"]), Pattern::re(r"\bml\b")]);
        assert!(any.matches("ai"));
        assert!(any.matches("ml ops"));
        assert!(!any.matches("html"));
    }

    #[test]
    fn reject_list_names_rules_by_pattern() {
        let rules = reject_list(&["^@", r"^\d{4}$"]);
        assert_eq!(first_match(&rules, "2024").map(|r| r.name), Some(r"^\d{4}$"));
    }
}
