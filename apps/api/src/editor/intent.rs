//! Edit intents: named, serializable mutation requests.
//!
//! An intent describes an edit without performing it; `apply` hands it to the store.
//! Wire form: `{"op": "update_bullet", "experienceId": 1, "index": 0, "value": "Led migration"}`.

use serde::{Deserialize, Serialize};

use crate::editor::fields::{
    CertificationField, EducationField, ExperienceField, PersonalField, ReferenceField,
};
use crate::editor::ops;
use crate::models::resume::{Document, EntryId};
use crate::navigator::section::Section;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum EditIntent {
    UpdatePersonal {
        field: PersonalField,
        value: String,
    },
    AddExperience,
    UpdateExperience {
        id: EntryId,
        field: ExperienceField,
        value: String,
    },
    AddBullet {
        experience_id: EntryId,
    },
    UpdateBullet {
        experience_id: EntryId,
        index: usize,
        value: String,
    },
    RemoveBullet {
        experience_id: EntryId,
        index: usize,
    },
    AddEducation,
    UpdateEducation {
        id: EntryId,
        field: EducationField,
        value: String,
    },
    RemoveEducation {
        id: EntryId,
    },
    AddSkill {
        category_id: EntryId,
        skill: String,
    },
    RemoveSkill {
        category_id: EntryId,
        index: usize,
    },
    AddCertification,
    UpdateCertification {
        id: EntryId,
        field: CertificationField,
        value: String,
    },
    RemoveCertification {
        id: EntryId,
    },
    AddReference,
    UpdateReference {
        id: EntryId,
        field: ReferenceField,
        value: String,
    },
    RemoveReference {
        id: EntryId,
    },
}

impl EditIntent {
    /// Produces the next document. The input is left as is.
    pub fn apply(&self, doc: &Document) -> Document {
        match self {
            EditIntent::UpdatePersonal { field, value } => {
                ops::update_personal_field(doc, *field, value)
            }
            EditIntent::AddExperience => ops::add_experience(doc),
            EditIntent::UpdateExperience { id, field, value } => {
                ops::update_experience_field(doc, *id, *field, value)
            }
            EditIntent::AddBullet { experience_id } => ops::add_bullet(doc, *experience_id),
            EditIntent::UpdateBullet {
                experience_id,
                index,
                value,
            } => ops::update_bullet(doc, *experience_id, *index, value),
            EditIntent::RemoveBullet {
                experience_id,
                index,
            } => ops::remove_bullet(doc, *experience_id, *index),
            EditIntent::AddEducation => ops::add_education(doc),
            EditIntent::UpdateEducation { id, field, value } => {
                ops::update_education_field(doc, *id, *field, value)
            }
            EditIntent::RemoveEducation { id } => ops::remove_education(doc, *id),
            EditIntent::AddSkill { category_id, skill } => {
                ops::add_skill(doc, *category_id, skill)
            }
            EditIntent::RemoveSkill { category_id, index } => {
                ops::remove_skill(doc, *category_id, *index)
            }
            EditIntent::AddCertification => ops::add_certification(doc),
            EditIntent::UpdateCertification { id, field, value } => {
                ops::update_certification_field(doc, *id, *field, value)
            }
            EditIntent::RemoveCertification { id } => ops::remove_certification(doc, *id),
            EditIntent::AddReference => ops::add_reference(doc),
            EditIntent::UpdateReference { id, field, value } => {
                ops::update_reference_field(doc, *id, *field, value)
            }
            EditIntent::RemoveReference { id } => ops::remove_reference(doc, *id),
        }
    }

    /// Op name as it appears on the wire, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            EditIntent::UpdatePersonal { .. } => "update_personal",
            EditIntent::AddExperience => "add_experience",
            EditIntent::UpdateExperience { .. } => "update_experience",
            EditIntent::AddBullet { .. } => "add_bullet",
            EditIntent::UpdateBullet { .. } => "update_bullet",
            EditIntent::RemoveBullet { .. } => "remove_bullet",
            EditIntent::AddEducation => "add_education",
            EditIntent::UpdateEducation { .. } => "update_education",
            EditIntent::RemoveEducation { .. } => "remove_education",
            EditIntent::AddSkill { .. } => "add_skill",
            EditIntent::RemoveSkill { .. } => "remove_skill",
            EditIntent::AddCertification => "add_certification",
            EditIntent::UpdateCertification { .. } => "update_certification",
            EditIntent::RemoveCertification { .. } => "remove_certification",
            EditIntent::AddReference => "add_reference",
            EditIntent::UpdateReference { .. } => "update_reference",
            EditIntent::RemoveReference { .. } => "remove_reference",
        }
    }

    /// The form section this intent edits.
    pub fn section(&self) -> Section {
        match self {
            EditIntent::UpdatePersonal { .. } => Section::Personal,
            EditIntent::AddExperience
            | EditIntent::UpdateExperience { .. }
            | EditIntent::AddBullet { .. }
            | EditIntent::UpdateBullet { .. }
            | EditIntent::RemoveBullet { .. } => Section::Experience,
            EditIntent::AddEducation
            | EditIntent::UpdateEducation { .. }
            | EditIntent::RemoveEducation { .. } => Section::Education,
            EditIntent::AddSkill { .. } | EditIntent::RemoveSkill { .. } => Section::Skills,
            EditIntent::AddCertification
            | EditIntent::UpdateCertification { .. }
            | EditIntent::RemoveCertification { .. } => Section::Certifications,
            EditIntent::AddReference
            | EditIntent::UpdateReference { .. }
            | EditIntent::RemoveReference { .. } => Section::References,
        }
    }
}
