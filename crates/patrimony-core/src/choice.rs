use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}', expected one of: {allowed}")]
pub struct ParseChoiceError {
    pub kind: &'static str,
    pub value: String,
    pub allowed: String,
}

/// A closed set of values stored as a short code and shown with a label.
pub trait Choice: Copy + Sized + 'static {
    /// Human name of the set, used in error messages.
    const NAME: &'static str;
    const ALL: &'static [Self];

    /// Stored code, e.g. `open_space`.
    fn code(self) -> &'static str;

    /// Display label, e.g. `Open space`.
    fn label(self) -> &'static str;

    /// True when the code or the label contains `needle`, ignoring case.
    /// `needle` must already be lowercase.
    fn matches_text(self, needle: &str) -> bool {
        self.code().contains(needle) || self.label().to_lowercase().contains(needle)
    }

    /// Parses a code or a label. Case is ignored and `-` is accepted for `_`.
    fn parse_choice(value: &str) -> Result<Self, ParseChoiceError> {
        let wanted = value.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.code() == wanted || c.label().to_lowercase() == wanted)
            .ok_or_else(|| ParseChoiceError {
                kind: Self::NAME,
                value: value.to_string(),
                allowed: Self::ALL
                    .iter()
                    .map(|c| c.code())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}
