use crate::model::RoleCategory;

/// Heading needles in precedence order; every needle must appear.
const HEADINGS: &[(&[&str], RoleCategory)] = &[
    (&["chief of staff", "role"], RoleCategory::ChiefOfStaff),
    (&["bizops", "role"], RoleCategory::BizOps),
    (&["vc", "role"], RoleCategory::Vc),
];

/// Returns the category a heading line opens, if the line is a heading.
pub fn detect_heading(line: &str) -> Option<RoleCategory> {
    let lower = line.to_lowercase();
    HEADINGS
        .iter()
        .find(|(needles, _)| needles.iter().all(|n| lower.contains(n)))
        .map(|&(_, category)| category)
}

/// Category scan state for one edition. Start a fresh tracker per edition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionTracker {
    current: Option<RoleCategory>,
}

/// What the tracker made of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Section heading; consumed, not a listing candidate.
    Heading(RoleCategory),
    /// Candidate listing under the given category.
    Body(Option<RoleCategory>),
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<RoleCategory> {
        self.current
    }

    /// Feeds one line; a heading replaces the current category.
    pub fn observe(&mut self, line: &str) -> LineKind {
        match detect_heading(line) {
            Some(category) => {
                self.current = Some(category);
                LineKind::Heading(category)
            }
            None => LineKind::Body(self.current),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_detected_case_insensitively() {
        assert_eq!(detect_heading("CHIEF OF STAFF ROLES"), Some(RoleCategory::ChiefOfStaff));
        assert_eq!(detect_heading("BizOps roles (12)"), Some(RoleCategory::BizOps));
        assert_eq!(detect_heading("VC Roles"), Some(RoleCategory::Vc));
        assert_eq!(detect_heading("Chief of Staff, Acme (AI), SF"), None);
    }

    #[test]
    fn chief_of_staff_wins_over_vc() {
        // mentions both; the first heading rule takes it
        assert_eq!(
            detect_heading("Chief of Staff roles at VC firms"),
            Some(RoleCategory::ChiefOfStaff)
        );
    }

    #[test]
    fn last_heading_wins_until_next() {
        let mut t = SectionTracker::new();
        assert_eq!(t.observe("PM, Acme (AI), SF"), LineKind::Body(None));
        assert_eq!(t.observe("Chief of Staff Roles"), LineKind::Heading(RoleCategory::ChiefOfStaff));
        assert_eq!(t.observe("VC Roles"), LineKind::Heading(RoleCategory::Vc));
        assert_eq!(t.observe("Associate, Fund (VC), NYC"), LineKind::Body(Some(RoleCategory::Vc)));
        assert_eq!(t.current(), Some(RoleCategory::Vc));
    }
}
