use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(VerseId);

/// Column arrangement of the published sheet. Both layouts start with
/// `id, text, reference`; they differ in the optional trailing columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetLayout {
    /// `id, text, reference, reflection 1, reflection 2`
    #[default]
    Reflections,
    /// `id, text, reference, comment`
    Comment,
}

impl SheetLayout {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reflections" | "reflection" => Some(Self::Reflections),
            "comment" | "comments" => Some(Self::Comment),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// One decoded spreadsheet row.
///
/// Optional trailing columns are `None` when the row did not carry the
/// column at all and `Some("")` when the cell was present but blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub id: VerseId,
    pub text: String,
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection_primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection_secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl VerseRecord {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            id: VerseId(id.into()),
            text: text.into(),
            reference: reference.into(),
            reflection_primary: None,
            reflection_secondary: None,
            comment: None,
        }
    }

    /// Pre-authored reflection texts that are worth showing, in column order.
    pub fn reflection_paragraphs(&self) -> Vec<&str> {
        [
            self.reflection_primary.as_deref(),
            self.reflection_secondary.as_deref(),
            self.comment.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|text| !text.trim().is_empty())
        .collect()
    }

    pub fn has_reflection(&self) -> bool {
        !self.reflection_paragraphs().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflection_paragraphs_skip_absent_and_blank_columns() {
        let mut verse = VerseRecord::new("1", "A", "B");
        assert!(!verse.has_reflection());

        verse.reflection_primary = Some(String::new());
        verse.reflection_secondary = Some("segunda".to_string());
        assert_eq!(verse.reflection_paragraphs(), vec!["segunda"]);
        assert!(verse.has_reflection());
    }

    #[test]
    fn theme_round_trips_through_its_persisted_value() {
        assert_eq!(Theme::parse(Theme::Dark.as_str()), Some(Theme::Dark));
        assert_eq!(Theme::parse(" LIGHT "), Some(Theme::Light));
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
