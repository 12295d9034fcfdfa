//! Closed field selectors for the scalar fields of each entity.
//!
//! Wire names match the document's JSON keys, so `"startDate"` selects
//! `ExperienceField::StartDate`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::resume::{
    CertificationEntry, EducationEntry, ExperienceEntry, PersonalInfo, ReferenceEntry,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {entity} field '{name}'")]
pub struct UnknownField {
    pub entity: &'static str,
    pub name: String,
}

macro_rules! field_selector {
    (
        $(#[$meta:meta])*
        $name:ident for $target:ty, $entity:literal {
            $($variant:ident => $field:ident : $wire:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant,)*
        }

        impl $name {
            #[cfg(test)]
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)*
                }
            }

            /// Overwrites the selected field of `target`.
            pub fn assign(self, target: &mut $target, value: String) {
                match self {
                    $($name::$variant => target.$field = value,)*
                }
            }

            #[cfg(test)]
            pub fn read(self, target: &$target) -> &str {
                match self {
                    $($name::$variant => &target.$field,)*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownField;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)*
                    other => Err(UnknownField {
                        entity: $entity,
                        name: other.to_string(),
                    }),
                }
            }
        }
    };
}

field_selector! {
    /// Scalar fields of `PersonalInfo`.
    PersonalField for PersonalInfo, "personal" {
        Name => name: "name",
        Title => title: "title",
        Email => email: "email",
        Phone => phone: "phone",
        Location => location: "location",
        Linkedin => linkedin: "linkedin",
        Github => github: "github",
        Portfolio => portfolio: "portfolio",
        Summary => summary: "summary",
    }
}

field_selector! {
    /// Scalar fields of an experience entry. Bullets are edited through their own operations.
    ExperienceField for ExperienceEntry, "experience" {
        Company => company: "company",
        Position => position: "position",
        StartDate => start_date: "startDate",
        EndDate => end_date: "endDate",
        Description => description: "description",
    }
}

field_selector! {
    EducationField for EducationEntry, "education" {
        School => school: "school",
        Degree => degree: "degree",
        StartDate => start_date: "startDate",
        EndDate => end_date: "endDate",
        Gpa => gpa: "gpa",
    }
}

field_selector! {
    CertificationField for CertificationEntry, "certification" {
        Name => name: "name",
        Issuer => issuer: "issuer",
        Date => date: "date",
    }
}

field_selector! {
    ReferenceField for ReferenceEntry, "reference" {
        Name => name: "name",
        Position => position: "position",
        Company => company: "company",
        Email => email: "email",
        Phone => phone: "phone",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip_through_from_str() {
        for field in ExperienceField::ALL {
            assert_eq!(field.as_str().parse::<ExperienceField>().unwrap(), *field);
        }
        for field in PersonalField::ALL {
            assert_eq!(field.as_str().parse::<PersonalField>().unwrap(), *field);
        }
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = "start_date".parse::<EducationField>().unwrap_err();
        assert_eq!(err.entity, "education");
        assert_eq!(err.to_string(), "unknown education field 'start_date'");
    }

    #[test]
    fn test_serde_uses_camel_case_names() {
        let json = serde_json::to_string(&ExperienceField::EndDate).unwrap();
        assert_eq!(json, "\"endDate\"");
        let parsed: ReferenceField = serde_json::from_str("\"phone\"").unwrap();
        assert_eq!(parsed, ReferenceField::Phone);
    }

    #[test]
    fn test_assign_touches_only_selected_field() {
        let mut entry = CertificationEntry::blank(3);
        CertificationField::Issuer.assign(&mut entry, "CNCF".to_string());
        assert_eq!(entry.issuer, "CNCF");
        assert_eq!(entry.name, "");
        assert_eq!(CertificationField::Issuer.read(&entry), "CNCF");
    }
}
