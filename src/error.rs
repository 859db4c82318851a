use thiserror::Error;

/// Field a filter or normalizer ran against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Company,
    Industry,
    Location,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Company => "company",
            Field::Industry => "industry",
            Field::Location => "location",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a listing was dropped. None of these abort a run; they are counted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Reject {
    #[error("{field} is too short")]
    TooShort { field: Field },

    #[error("{field} is too long ({len} chars)")]
    TooLong { field: Field, len: usize },

    #[error("{field} matched reject rule `{rule}`")]
    Pattern { field: Field, rule: &'static str },

    #[error("{field} normalized to nothing")]
    NormalizationEmpty { field: Field },

    #[error("merge anomaly: {0}")]
    MergeAnomaly(&'static str),
}

impl Reject {
    pub fn field(&self) -> Option<Field> {
        match self {
            Reject::TooShort { field }
            | Reject::TooLong { field, .. }
            | Reject::Pattern { field, .. }
            | Reject::NormalizationEmpty { field } => Some(*field),
            Reject::MergeAnomaly(_) => None,
        }
    }
}
