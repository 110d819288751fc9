//! Fixed resume template rendered to PDF.
//!
//! `template` walks a [`ResumeDocument`] in template order and writes typst
//! markup; `render` compiles it. Typst flows the content onto as many A4
//! pages as it needs, splitting rows that are taller than a page. Both are
//! pure: the same document always yields the same bytes.

mod compile;
pub mod theme;

pub use compile::{compile, RenderedPdf};

use crate::error::RenderError;
use crate::markup::{escape, normalize, string_literal};
use crate::model::{ContactBlock, EducationEntry, ExperienceEntry, ProjectEntry, ResumeDocument, SkillsBlock};

use theme::Theme;

const SEPARATOR: &str = " | ";

/// Renders `doc` with the standard theme.
///
/// An error here means the template produced markup typst rejected, which
/// is a bug rather than bad input.
pub fn render(doc: &ResumeDocument) -> Result<Vec<u8>, RenderError> {
    Ok(compile(&template(doc, Theme::standard()))?.pdf)
}

pub fn document_title(doc: &ResumeDocument) -> String {
    format!("{} - Resume", doc.name)
}

/// Typst source for `doc`.
pub fn template(doc: &ResumeDocument, theme: &Theme) -> String {
    let mut sheet = Sheet::new(theme, &document_title(doc));

    sheet.name(&normalize(&doc.name));
    let contact = contact_line(&doc.contact);
    if !contact.is_empty() {
        sheet.contact(&contact);
    }

    if !doc.education.is_empty() {
        sheet.section("EDUCATION");
        for entry in &doc.education {
            education(&mut sheet, entry);
        }
    }
    if !doc.experience.is_empty() {
        sheet.section("EXPERIENCE");
        for entry in &doc.experience {
            experience(&mut sheet, entry);
        }
    }
    if !doc.projects.is_empty() {
        sheet.section("PROJECTS");
        for entry in &doc.projects {
            project(&mut sheet, entry);
        }
    }
    if !doc.skills.is_empty() {
        sheet.section("SKILLS");
        skills(&mut sheet, &doc.skills);
        sheet.space();
    }

    let certifications: Vec<&String> = doc
        .certifications
        .iter()
        .filter(|c| !c.trim().is_empty())
        .collect();
    if !certifications.is_empty() {
        sheet.section("CERTIFICATIONS");
        for cert in certifications {
            // Certification names are shown exactly as given.
            sheet.bullet(&escape(cert));
        }
        sheet.space();
    }

    sheet.finish()
}

/// Typst markup under construction, one block per line.
struct Sheet<'a> {
    theme: &'a Theme,
    out: String,
}

impl<'a> Sheet<'a> {
    fn new(theme: &'a Theme, title: &str) -> Self {
        Self {
            theme,
            out: theme.preamble(title),
        }
    }

    fn name(&mut self, content: &str) {
        let t = self.theme;
        self.out.push_str(&format!(
            "#align(center, block(below: {}pt, text(size: {}pt, weight: \"bold\")[{content}]))\n",
            t.name_space_after, t.name_size
        ));
    }

    fn contact(&mut self, content: &str) {
        self.out.push_str(&format!(
            "#align(center, block(below: {}pt)[{content}])\n",
            self.theme.contact_space_after
        ));
    }

    fn section(&mut self, heading: &str) {
        let t = self.theme;
        self.out.push_str(&format!(
            "#block(above: {}pt, below: {}pt, text(size: {}pt, weight: \"bold\")[{heading}])\n\
             #line(length: 100%, stroke: {}pt)\n\
             #v({}pt)\n",
            t.section_space_before,
            t.section_space_after,
            t.section_size,
            t.rule_thickness,
            t.rule_space_after
        ));
    }

    fn paragraph(&mut self, content: &str) {
        self.out.push_str(&format!("#block[{content}]\n"));
    }

    fn bullet(&mut self, content: &str) {
        let t = self.theme;
        self.out.push_str(&format!(
            "#block(inset: (left: {}pt))[{}{content}]\n",
            t.bullet_indent, t.bullet_glyph
        ));
    }

    fn labelled_bullet(&mut self, label: &str, value: &str) {
        self.bullet(&format!("#strong[{}] {}", escape(label), normalize(value)));
    }

    fn markup_bullets(&mut self, bullets: &[String]) {
        for text in bullets.iter().filter(|b| !b.trim().is_empty()) {
            self.bullet(&normalize(text));
        }
    }

    /// Two cells, left-aligned and right-aligned. Rows are breakable, so a
    /// cell taller than a page continues on the next one.
    fn row(&mut self, left: &str, right: &str) {
        let t = self.theme;
        self.out.push_str(&format!(
            "#grid(columns: ({}%, {}%), inset: (x: {}pt), align: (left, right), [{left}], [{right}])\n",
            t.left_column,
            100 - u16::from(t.left_column),
            t.cell_padding
        ));
    }

    fn space(&mut self) {
        self.out.push_str(&format!("#v({}pt)\n", self.theme.entry_gap));
    }

    fn finish(self) -> String {
        self.out
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Template pieces
// ────────────────────────────────────────────────────────────────────────────

fn strip_scheme(url: &str) -> String {
    url.replace("https://", "").replace("http://", "")
}

fn link(target: &str, display: &str) -> String {
    format!("#link({})[{}]", string_literal(target), normalize(display))
}

fn strong(text: &str) -> String {
    if text.trim().is_empty() {
        String::new()
    } else {
        format!("#strong[{}]", normalize(text))
    }
}

fn emph(text: &str) -> String {
    if text.trim().is_empty() {
        String::new()
    } else {
        format!("#emph[{}]", normalize(text))
    }
}

fn contact_line(contact: &ContactBlock) -> String {
    let mut parts: Vec<String> = Vec::new();
    let email = contact.email.trim();
    if !email.is_empty() {
        parts.push(link(&format!("mailto:{email}"), email));
    }
    let phone = contact.phone.trim();
    if !phone.is_empty() {
        parts.push(normalize(phone));
    }
    for profile in [contact.linkedin.trim(), contact.github.trim()] {
        if !profile.is_empty() {
            parts.push(link(profile, &strip_scheme(profile)));
        }
    }
    let location = contact.location.trim();
    if !location.is_empty() {
        parts.push(normalize(location));
    }
    parts.join(SEPARATOR)
}

fn row(sheet: &mut Sheet<'_>, left: String, right: String) {
    if left.trim().is_empty() && right.trim().is_empty() {
        return;
    }
    sheet.row(&left, &right);
}

fn education(sheet: &mut Sheet<'_>, entry: &EducationEntry) {
    row(sheet, strong(&entry.institution), strong(&entry.graduation_date));
    if !entry.degree.trim().is_empty() {
        sheet.paragraph(&normalize(&entry.degree));
    }
    if !entry.gpa.trim().is_empty() {
        sheet.labelled_bullet("GPA:", &entry.gpa);
    }
    if !entry.relevant_coursework.trim().is_empty() {
        sheet.labelled_bullet("Relevant Coursework:", &entry.relevant_coursework);
    }
    sheet.space();
}

fn experience(sheet: &mut Sheet<'_>, entry: &ExperienceEntry) {
    row(sheet, strong(&entry.company), normalize(&entry.location));
    row(sheet, emph(&entry.title), normalize(&entry.duration));
    sheet.markup_bullets(&entry.bullets);
    sheet.space();
}

fn project(sheet: &mut Sheet<'_>, entry: &ProjectEntry) {
    row(sheet, strong(&entry.name), normalize(&entry.location));
    if !entry.technologies.trim().is_empty() || !entry.duration.trim().is_empty() {
        row(sheet, emph(&entry.technologies), normalize(&entry.duration));
    }
    if !entry.description.trim().is_empty() {
        sheet.paragraph(&normalize(&entry.description));
    }
    sheet.markup_bullets(&entry.bullets);
    sheet.space();
}

fn skills(sheet: &mut Sheet<'_>, skills: &SkillsBlock) {
    let groups = [
        ("Technical:", &skills.technical),
        ("Tools & Frameworks:", &skills.tools),
        ("Programming Languages:", &skills.programming_languages),
    ];
    for (label, values) in groups {
        let present: Vec<&str> = values
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .collect();
        if !present.is_empty() {
            sheet.labelled_bullet(label, &present.join(", "));
        }
    }
}
