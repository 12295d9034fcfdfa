use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The form's sections, in page order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Personal,
    Experience,
    Education,
    Skills,
    Certifications,
    References,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown section '{0}'")]
pub struct UnknownSection(pub String);

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Personal,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Certifications,
        Section::References,
    ];

    /// Region id the rendering layer uses for this section.
    pub fn id(self) -> &'static str {
        match self {
            Section::Personal => "personal",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Certifications => "certifications",
            Section::References => "references",
        }
    }

    /// Navigation label.
    pub fn label(self) -> &'static str {
        match self {
            Section::Personal => "Personal Info",
            Section::Experience => "Experience",
            Section::Education => "Education",
            Section::Skills => "Skills",
            Section::Certifications => "Certifications",
            Section::References => "References",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.id() == s)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_order() {
        let ids: Vec<_> = Section::ALL.iter().map(|s| s.id()).collect();
        assert_eq!(
            ids,
            vec![
                "personal",
                "experience",
                "education",
                "skills",
                "certifications",
                "references"
            ]
        );
    }

    #[test]
    fn test_from_str_matches_id() {
        assert_eq!("skills".parse::<Section>().unwrap(), Section::Skills);
        assert!("projects".parse::<Section>().is_err());
    }

    #[test]
    fn test_serde_matches_id() {
        for section in Section::ALL {
            let json = serde_json::to_string(&section).unwrap();
            assert_eq!(json, format!("\"{}\"", section.id()));
        }
    }
}
