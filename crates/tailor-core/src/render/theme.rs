//! Visual constants for the resume template.
//!
//! One immutable [`Theme`] lives for the whole process; the template borrows
//! it instead of rebuilding styles per document.

use crate::markup::string_literal;

/// Points per inch.
pub const INCH: f32 = 72.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Typst paper name.
    pub paper: &'static str,
    pub margin: f32,
    /// Only fonts bundled into the binary are searched, so output never
    /// depends on the host.
    pub font: &'static str,
    pub body_size: f32,
    pub name_size: f32,
    pub section_size: f32,
    pub name_space_after: f32,
    pub contact_space_after: f32,
    pub section_space_before: f32,
    pub section_space_after: f32,
    pub block_spacing: f32,
    pub rule_thickness: f32,
    pub rule_space_after: f32,
    pub entry_gap: f32,
    pub bullet_indent: f32,
    /// Horizontal padding on both sides of each row cell.
    pub cell_padding: f32,
    /// Percentage of the content width taken by the left cell of a row.
    pub left_column: u8,
    pub link_color: &'static str,
    pub bullet_glyph: &'static str,
}

/// A4, half-inch margins, 9pt body.
pub static STANDARD: Theme = Theme {
    paper: "a4",
    margin: 0.5 * INCH,
    font: "Libertinus Serif",
    body_size: 9.0,
    name_size: 16.0,
    section_size: 11.0,
    name_space_after: 4.0,
    contact_space_after: 12.0,
    section_space_before: 10.0,
    section_space_after: 4.0,
    block_spacing: 2.0,
    rule_thickness: 1.0,
    rule_space_after: 6.0,
    entry_gap: 4.0,
    bullet_indent: 15.0,
    cell_padding: 6.0,
    left_column: 75,
    link_color: "blue",
    bullet_glyph: "\u{2022} ",
};

impl Theme {
    pub fn standard() -> &'static Theme {
        &STANDARD
    }

    /// Document-wide `set` rules that open every rendered resume.
    pub fn preamble(&self, title: &str) -> String {
        format!(
            "#set document(title: {title})\n\
             #set page(paper: \"{paper}\", margin: {margin}pt)\n\
             #set text(font: \"{font}\", size: {size}pt)\n\
             #set par(spacing: {spacing}pt)\n\
             #set block(spacing: {spacing}pt)\n\
             #show link: set text(fill: {link})\n\n",
            title = string_literal(title),
            paper = self.paper,
            margin = self.margin,
            font = self.font,
            size = self.body_size,
            spacing = self.block_spacing,
            link = self.link_color,
        )
    }
}
