//! Document Model Store operations.
//!
//! Every operation borrows the current `Document` and returns the next one. The input is
//! never touched, so callers can compare old and new values (or `Arc` pointers) to detect
//! changes. Lookups by id or index that miss are silent no-ops: the returned document is
//! equal to the input.
//!
//! No I/O and no logging happen here; callers log at the session layer.

use crate::editor::fields::{
    CertificationField, EducationField, ExperienceField, PersonalField, ReferenceField,
};
use crate::models::resume::{
    issue_id, CertificationEntry, Document, EducationEntry, EntryId, ExperienceEntry, Identified,
    ReferenceEntry,
};

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

/// Applies `edit` to the entry with `id`, if any. Other entries and order are untouched.
fn edit_entry<T: Identified>(entries: &mut [T], id: EntryId, edit: impl FnOnce(&mut T)) {
    if let Some(entry) = entries.iter_mut().find(|e| e.id() == id) {
        edit(entry);
    }
}

fn remove_entry<T: Identified>(entries: &mut Vec<T>, id: EntryId) {
    entries.retain(|e| e.id() != id);
}

/// Removes `items[index]`. No-op when out of range.
fn remove_at(items: &mut Vec<String>, index: usize) {
    if index < items.len() {
        items.remove(index);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info
// ────────────────────────────────────────────────────────────────────────────

pub fn update_personal_field(doc: &Document, field: PersonalField, value: &str) -> Document {
    let mut next = doc.clone();
    field.assign(&mut next.personal, value.to_string());
    next
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

pub fn add_experience(doc: &Document) -> Document {
    let mut next = doc.clone();
    let id = issue_id(&mut next.issued.experience, &next.experience);
    next.experience.push(ExperienceEntry::blank(id));
    next
}

pub fn update_experience_field(
    doc: &Document,
    id: EntryId,
    field: ExperienceField,
    value: &str,
) -> Document {
    let mut next = doc.clone();
    edit_entry(&mut next.experience, id, |e| field.assign(e, value.to_string()));
    next
}

/// Appends an empty bullet to the experience entry `experience_id`.
pub fn add_bullet(doc: &Document, experience_id: EntryId) -> Document {
    let mut next = doc.clone();
    edit_entry(&mut next.experience, experience_id, |e| {
        e.bullets.push(String::new())
    });
    next
}

/// Replaces the bullet at `index`. An index past the end leaves the document unchanged.
pub fn update_bullet(doc: &Document, experience_id: EntryId, index: usize, value: &str) -> Document {
    let mut next = doc.clone();
    edit_entry(&mut next.experience, experience_id, |e| {
        if let Some(bullet) = e.bullets.get_mut(index) {
            *bullet = value.to_string();
        }
    });
    next
}

/// Removes the bullet at `index`; later bullets shift down by one.
pub fn remove_bullet(doc: &Document, experience_id: EntryId, index: usize) -> Document {
    let mut next = doc.clone();
    edit_entry(&mut next.experience, experience_id, |e| {
        remove_at(&mut e.bullets, index)
    });
    next
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

pub fn add_education(doc: &Document) -> Document {
    let mut next = doc.clone();
    let id = issue_id(&mut next.issued.education, &next.education);
    next.education.push(EducationEntry::blank(id));
    next
}

pub fn update_education_field(
    doc: &Document,
    id: EntryId,
    field: EducationField,
    value: &str,
) -> Document {
    let mut next = doc.clone();
    edit_entry(&mut next.education, id, |e| field.assign(e, value.to_string()));
    next
}

pub fn remove_education(doc: &Document, id: EntryId) -> Document {
    let mut next = doc.clone();
    remove_entry(&mut next.education, id);
    next
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// Appends `skill` to the category's items. Blank text is ignored; anything else is
/// stored verbatim.
pub fn add_skill(doc: &Document, category_id: EntryId, skill: &str) -> Document {
    let mut next = doc.clone();
    if skill.trim().is_empty() {
        return next;
    }
    edit_entry(&mut next.skills, category_id, |c| c.items.push(skill.to_string()));
    next
}

pub fn remove_skill(doc: &Document, category_id: EntryId, index: usize) -> Document {
    let mut next = doc.clone();
    edit_entry(&mut next.skills, category_id, |c| remove_at(&mut c.items, index));
    next
}

// ────────────────────────────────────────────────────────────────────────────
// Certifications
// ────────────────────────────────────────────────────────────────────────────

pub fn add_certification(doc: &Document) -> Document {
    let mut next = doc.clone();
    let id = issue_id(&mut next.issued.certifications, &next.certifications);
    next.certifications.push(CertificationEntry::blank(id));
    next
}

pub fn update_certification_field(
    doc: &Document,
    id: EntryId,
    field: CertificationField,
    value: &str,
) -> Document {
    let mut next = doc.clone();
    edit_entry(&mut next.certifications, id, |e| {
        field.assign(e, value.to_string())
    });
    next
}

pub fn remove_certification(doc: &Document, id: EntryId) -> Document {
    let mut next = doc.clone();
    remove_entry(&mut next.certifications, id);
    next
}

// ────────────────────────────────────────────────────────────────────────────
// References
// ────────────────────────────────────────────────────────────────────────────

pub fn add_reference(doc: &Document) -> Document {
    let mut next = doc.clone();
    let id = issue_id(&mut next.issued.references, &next.references);
    next.references.push(ReferenceEntry::blank(id));
    next
}

pub fn update_reference_field(
    doc: &Document,
    id: EntryId,
    field: ReferenceField,
    value: &str,
) -> Document {
    let mut next = doc.clone();
    edit_entry(&mut next.references, id, |e| field.assign(e, value.to_string()));
    next
}

pub fn remove_reference(doc: &Document, id: EntryId) -> Document {
    let mut next = doc.clone();
    remove_entry(&mut next.references, id);
    next
}
