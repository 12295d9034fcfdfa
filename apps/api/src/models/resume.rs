//! Resume document model.
//!
//! A `Document` is a total value: every scalar is a `String` (empty when unset) and every
//! list is a `Vec` (empty when unset). `#[serde(default)]` on every struct keeps that true
//! for partially specified JSON as well.

use serde::{Deserialize, Serialize};

/// Identity of an entry within its owning sequence.
pub type EntryId = u64;

/// Anything that lives in an id-keyed sequence of the document.
pub trait Identified {
    fn id(&self) -> EntryId;
}

// ────────────────────────────────────────────────────────────────────────────
// Entities
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
    pub portfolio: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub id: EntryId,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    /// Insertion order is meaningful and preserved.
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: EntryId,
    pub school: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCategory {
    pub id: EntryId,
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationEntry {
    pub id: EntryId,
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceEntry {
    pub id: EntryId,
    pub name: String,
    pub position: String,
    pub company: String,
    pub email: String,
    pub phone: String,
}

macro_rules! impl_identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> EntryId {
                self.id
            }
        })*
    };
}

impl_identified!(
    ExperienceEntry,
    EducationEntry,
    SkillCategory,
    CertificationEntry,
    ReferenceEntry,
);

impl ExperienceEntry {
    pub fn blank(id: EntryId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

impl EducationEntry {
    pub fn blank(id: EntryId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

impl SkillCategory {
    pub fn named(id: EntryId, category: &str) -> Self {
        Self {
            id,
            category: category.to_string(),
            items: Vec::new(),
        }
    }
}

impl CertificationEntry {
    pub fn blank(id: EntryId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

impl ReferenceEntry {
    pub fn blank(id: EntryId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Id bookkeeping
// ────────────────────────────────────────────────────────────────────────────

/// High-water mark of ids ever issued, per sequence.
///
/// Removed ids are never handed out again because the next id is always
/// `max(issued, max present) + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdCounters {
    pub experience: EntryId,
    pub education: EntryId,
    pub skills: EntryId,
    pub certifications: EntryId,
    pub references: EntryId,
}

/// Returns the next id for `entries` and records it in `issued`.
pub fn issue_id<T: Identified>(issued: &mut EntryId, entries: &[T]) -> EntryId {
    let present = entries.iter().map(Identified::id).max().unwrap_or(0);
    let next = (*issued).max(present) + 1;
    *issued = next;
    next
}

// ────────────────────────────────────────────────────────────────────────────
// Document aggregate
// ────────────────────────────────────────────────────────────────────────────

pub const TECHNICAL_SKILLS: &str = "Technical Skills";
pub const SOFT_SKILLS: &str = "Soft Skills";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub personal: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillCategory>,
    pub certifications: Vec<CertificationEntry>,
    pub references: Vec<ReferenceEntry>,
    pub issued: IdCounters,
}

impl Default for Document {
    /// The session-start shape: one blank experience entry (id 1) and the two
    /// stock skill categories.
    fn default() -> Self {
        Self {
            personal: PersonalInfo::default(),
            experience: vec![ExperienceEntry::blank(1)],
            education: Vec::new(),
            skills: vec![
                SkillCategory::named(1, TECHNICAL_SKILLS),
                SkillCategory::named(2, SOFT_SKILLS),
            ],
            certifications: Vec::new(),
            references: Vec::new(),
            issued: IdCounters {
                experience: 1,
                skills: 2,
                ..IdCounters::default()
            },
        }
    }
}

#[cfg(test)]
impl Document {
    pub fn experience_entry(&self, id: EntryId) -> Option<&ExperienceEntry> {
        self.experience.iter().find(|e| e.id == id)
    }

    pub fn skill_category(&self, id: EntryId) -> Option<&SkillCategory> {
        self.skills.iter().find(|c| c.id == id)
    }

    /// Looks up a skill category by its label.
    pub fn skill_category_named(&self, label: &str) -> Option<&SkillCategory> {
        self.skills.iter().find(|c| c.category == label)
    }
}
