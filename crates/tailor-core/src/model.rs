//! Resume Document Model — the structured, render-ready shape of a tailored resume.
//!
//! The JSON comes from an LLM, so every field is read leniently: a missing or
//! wrong-typed leaf falls back to an empty value instead of failing the parse.
//! Only a non-object top level is rejected.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::llm::strip_json_fences;

pub const DEFAULT_NAME: &str = "Your Name";

// ────────────────────────────────────────────────────────────────────────────
// Schema
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    #[serde(default = "default_name", deserialize_with = "name_or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_object")]
    pub contact: ContactBlock,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub education: Vec<EducationEntry>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub projects: Vec<ProjectEntry>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub skills: SkillsBlock,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub certifications: Vec<String>,
    /// Metadata only: surfaced to the caller, never drawn on the page.
    #[serde(
        default,
        alias = "keywordsAdded",
        deserialize_with = "lenient_strings"
    )]
    pub keywords_added: Vec<String>,
}

impl Default for ResumeDocument {
    fn default() -> Self {
        Self {
            name: default_name(),
            contact: ContactBlock::default(),
            education: Vec::new(),
            experience: Vec::new(),
            projects: Vec::new(),
            skills: SkillsBlock::default(),
            certifications: Vec::new(),
            keywords_added: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactBlock {
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub linkedin: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub github: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub degree: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub institution: String,
    #[serde(
        default,
        rename = "graduation",
        alias = "graduationDate",
        alias = "graduation_date",
        deserialize_with = "lenient_string"
    )]
    pub graduation_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gpa: String,
    #[serde(
        default,
        alias = "relevantCoursework",
        deserialize_with = "lenient_string"
    )]
    pub relevant_coursework: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub technologies: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillsBlock {
    #[serde(default, deserialize_with = "lenient_strings")]
    pub technical: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub tools: Vec<String>,
    #[serde(
        default,
        alias = "programmingLanguages",
        deserialize_with = "lenient_strings"
    )]
    pub programming_languages: Vec<String>,
}

impl SkillsBlock {
    /// True when no group holds a non-blank value.
    pub fn is_empty(&self) -> bool {
        [&self.technical, &self.tools, &self.programming_languages]
            .iter()
            .flat_map(|group| group.iter())
            .all(|s| s.trim().is_empty())
    }
}

impl ContactBlock {
    pub fn is_empty(&self) -> bool {
        [
            &self.email,
            &self.phone,
            &self.linkedin,
            &self.github,
            &self.location,
        ]
        .iter()
        .all(|s| s.trim().is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Construction
// ────────────────────────────────────────────────────────────────────────────

/// Builds a `ResumeDocument` from an already-decoded JSON value.
pub fn parse_resume_document(raw: Value) -> Result<ResumeDocument, ValidationError> {
    if !raw.is_object() {
        return Err(ValidationError::MalformedResponse(json_type_name(&raw)));
    }
    // Every field deserializer accepts any `Value`, so this only fails if the
    // schema itself is broken.
    serde_json::from_value(raw).map_err(|e| ValidationError::InvalidJson(e.to_string()))
}

/// Strips optional code fences from raw LLM text, then parses it.
pub fn parse_resume_json(text: &str) -> Result<ResumeDocument, ValidationError> {
    let value: Value = serde_json::from_str(strip_json_fences(text))
        .map_err(|e| ValidationError::InvalidJson(e.to_string()))?;
    parse_resume_document(value)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient field readers
// ────────────────────────────────────────────────────────────────────────────

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

/// Scalars become text; anything structured reads as empty.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(scalar_text(&value).unwrap_or_default())
}

fn name_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(default_name))
}

fn lenient_strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(value
        .as_array()
        .map(|items| items.iter().filter_map(scalar_text).collect())
        .unwrap_or_default())
}

fn lenient_object<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(d)?;
    Ok(object_or_default(value))
}

fn lenient_entries<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .map(object_or_default)
            .collect(),
        _ => Vec::new(),
    })
}

fn object_or_default<T: DeserializeOwned + Default>(value: Value) -> T {
    if value.is_object() {
        serde_json::from_value(value).unwrap_or_default()
    } else {
        T::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_document_parses() {
        let raw = json!({
            "name": "Ada Lovelace",
            "contact": {
                "email": "ada@example.com",
                "phone": "+44 20 0000",
                "linkedin": "https://linkedin.com/in/ada",
                "github": "https://github.com/ada",
                "location": "London"
            },
            "education": [{
                "degree": "Mathematics",
                "institution": "University of London",
                "graduation": "1835",
                "gpa": "4.0",
                "relevant_coursework": "Analysis"
            }],
            "experience": [{
                "title": "Analyst",
                "company": "Analytical Engine Co",
                "duration": "1842 - 1843",
                "location": "London",
                "bullets": ["Wrote the first **algorithm**"]
            }],
            "projects": [{
                "name": "Notes",
                "description": "Translation with notes",
                "technologies": "Punch cards",
                "duration": "1843",
                "bullets": ["Note G"]
            }],
            "skills": {
                "technical": ["Mathematics"],
                "tools": ["Difference Engine"],
                "programming_languages": ["Punch cards"]
            },
            "certifications": ["Royal Society"],
            "keywords_added": ["algorithm", "analysis"]
        });

        let doc = parse_resume_document(raw).unwrap();
        assert_eq!(doc.name, "Ada Lovelace");
        assert_eq!(doc.contact.github, "https://github.com/ada");
        assert_eq!(doc.education[0].graduation_date, "1835");
        assert_eq!(doc.education[0].relevant_coursework, "Analysis");
        assert_eq!(doc.experience[0].bullets, vec!["Wrote the first **algorithm**"]);
        assert_eq!(doc.projects[0].location, "");
        assert_eq!(doc.skills.programming_languages, vec!["Punch cards"]);
        assert_eq!(doc.certifications, vec!["Royal Society"]);
        assert_eq!(doc.keywords_added, vec!["algorithm", "analysis"]);
    }

    #[test]
    fn test_non_object_top_level_is_malformed() {
        assert_eq!(
            parse_resume_document(json!([1, 2])),
            Err(ValidationError::MalformedResponse("array"))
        );
        assert_eq!(
            parse_resume_document(json!("resume")),
            Err(ValidationError::MalformedResponse("string"))
        );
    }

    #[test]
    fn test_empty_object_gets_defaults() {
        let doc = parse_resume_document(json!({})).unwrap();
        assert_eq!(doc.name, DEFAULT_NAME);
        assert!(doc.contact.is_empty());
        assert!(doc.education.is_empty());
        assert!(doc.skills.is_empty());
    }

    #[test]
    fn test_blank_skill_values_count_as_empty() {
        let doc = parse_resume_document(json!({ "skills": { "technical": [" ", ""] } })).unwrap();
        assert!(doc.skills.is_empty());
        let doc = parse_resume_document(json!({ "skills": { "tools": ["", "cargo"] } })).unwrap();
        assert!(!doc.skills.is_empty());
    }

    #[test]
    fn test_blank_or_wrong_typed_name_falls_back() {
        let doc = parse_resume_document(json!({ "name": "  " })).unwrap();
        assert_eq!(doc.name, DEFAULT_NAME);
        let doc = parse_resume_document(json!({ "name": 42 })).unwrap();
        assert_eq!(doc.name, DEFAULT_NAME);
    }

    #[test]
    fn test_wrong_typed_leaves_degrade_instead_of_failing() {
        let raw = json!({
            "contact": "ada@example.com",
            "education": { "degree": "BSc" },
            "experience": [
                "not an object",
                { "title": ["nested"], "company": "Acme", "bullets": "one bullet" }
            ],
            "skills": { "technical": "Rust", "tools": [1, null, "cargo", {"x": 1}] },
            "certifications": null
        });

        let doc = parse_resume_document(raw).unwrap();
        assert!(doc.contact.is_empty());
        assert!(doc.education.is_empty());
        assert_eq!(doc.experience.len(), 1);
        assert_eq!(doc.experience[0].title, "");
        assert_eq!(doc.experience[0].company, "Acme");
        assert!(doc.experience[0].bullets.is_empty());
        assert!(doc.skills.technical.is_empty());
        assert_eq!(doc.skills.tools, vec!["1", "cargo"]);
        assert!(doc.certifications.is_empty());
    }

    #[test]
    fn test_numeric_gpa_is_stringified() {
        let doc = parse_resume_document(json!({
            "education": [{ "institution": "MIT", "gpa": 3.8 }]
        }))
        .unwrap();
        assert_eq!(doc.education[0].gpa, "3.8");
    }

    #[test]
    fn test_camel_case_keys_are_accepted() {
        let doc = parse_resume_document(json!({
            "education": [{ "graduationDate": "2020", "relevantCoursework": "OS" }],
            "skills": { "programmingLanguages": ["Rust"] },
            "keywordsAdded": ["tokio"]
        }))
        .unwrap();
        assert_eq!(doc.education[0].graduation_date, "2020");
        assert_eq!(doc.education[0].relevant_coursework, "OS");
        assert_eq!(doc.skills.programming_languages, vec!["Rust"]);
        assert_eq!(doc.keywords_added, vec!["tokio"]);
    }

    #[test]
    fn test_entry_order_is_preserved() {
        let doc = parse_resume_document(json!({
            "certifications": ["B", "A", "B"]
        }))
        .unwrap();
        assert_eq!(doc.certifications, vec!["B", "A", "B"]);
    }

    #[test]
    fn test_parse_resume_json_strips_fences() {
        let bare = parse_resume_json(r#"{"name": "Ada"}"#).unwrap();
        let fenced = parse_resume_json("```json\n{\"name\": \"Ada\"}\n```").unwrap();
        assert_eq!(bare, fenced);
    }

    #[test]
    fn test_parse_resume_json_rejects_prose() {
        let err = parse_resume_json("Sure! Here is your resume.").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidJson(_)));
    }
}
