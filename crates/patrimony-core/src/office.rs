use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::choice::{Choice, ParseChoiceError};
use crate::ids::OfficeId;

/// Layout of an office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum OfficeKind {
    BoxOffice,
    Partitioned,
    OpenSpace,
    WholeFloor,
}

impl Choice for OfficeKind {
    const NAME: &'static str = "office type";
    const ALL: &'static [Self] = &[
        OfficeKind::BoxOffice,
        OfficeKind::Partitioned,
        OfficeKind::OpenSpace,
        OfficeKind::WholeFloor,
    ];

    fn code(self) -> &'static str {
        match self {
            OfficeKind::BoxOffice => "box_office",
            OfficeKind::Partitioned => "partitioned",
            OfficeKind::OpenSpace => "open_space",
            OfficeKind::WholeFloor => "whole_floor",
        }
    }

    fn label(self) -> &'static str {
        match self {
            OfficeKind::BoxOffice => "Box office",
            OfficeKind::Partitioned => "Partitioned",
            OfficeKind::OpenSpace => "Open space",
            OfficeKind::WholeFloor => "Whole floor",
        }
    }
}

impl fmt::Display for OfficeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OfficeKind {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_choice(s)
    }
}

/// Raw office form, as submitted by a client before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct OfficeInput {
    pub kind: OfficeKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub surface_area: Option<Decimal>,
    #[serde(default)]
    pub capacity: Option<i64>,
}

impl OfficeInput {
    pub fn new(kind: OfficeKind) -> Self {
        Self {
            kind,
            name: String::new(),
            level: String::new(),
            surface_area: None,
            capacity: None,
        }
    }
}

/// A stored office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct Office {
    pub id: OfficeId,
    pub kind: OfficeKind,
    pub name: String,
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_area: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Office> for OfficeInput {
    /// Pre-fills an edit form with the stored values.
    fn from(office: &Office) -> Self {
        Self {
            kind: office.kind,
            name: office.name.clone(),
            level: office.level.clone(),
            surface_area: office.surface_area,
            capacity: office.capacity.map(i64::from),
        }
    }
}

impl fmt::Display for Office {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "Office {}", self.kind.code())
        } else {
            f.write_str(&self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::code("open_space", OfficeKind::OpenSpace)]
    #[case::kebab("whole-floor", OfficeKind::WholeFloor)]
    #[case::label("Box office", OfficeKind::BoxOffice)]
    #[case::upper("PARTITIONED", OfficeKind::Partitioned)]
    fn parses_codes_and_labels(#[case] raw: &str, #[case] expected: OfficeKind) {
        assert_eq!(raw.parse::<OfficeKind>().unwrap(), expected);
    }

    #[test]
    fn unknown_kind_lists_allowed_codes() {
        let err = "cubicle".parse::<OfficeKind>().unwrap_err();
        assert!(err.to_string().contains("box_office, partitioned, open_space, whole_floor"));
    }

    #[test]
    fn input_defaults_missing_text_fields() {
        let input: OfficeInput = serde_json::from_str(r#"{"kind":"open_space"}"#).unwrap();
        assert_eq!(input, OfficeInput::new(OfficeKind::OpenSpace));
    }

    #[test]
    fn display_falls_back_to_kind() {
        let now = Utc::now();
        let mut office = Office {
            id: OfficeId(1),
            kind: OfficeKind::BoxOffice,
            name: String::new(),
            level: String::new(),
            surface_area: None,
            capacity: None,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(office.to_string(), "Office box_office");
        office.name = "Bureau 101".into();
        assert_eq!(office.to_string(), "Bureau 101");
    }
}
