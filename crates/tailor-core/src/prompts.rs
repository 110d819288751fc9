// All LLM prompt text used by the tailoring pipeline.
// Templates carry `{placeholder}` markers; `fill` substitutes them. Keeping the
// wording here lets it change without touching the orchestration code.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const UNKNOWN_POSITION: &str = "Unknown Position";

pub const JOB_DETAILS_MAX_TOKENS: u32 = 500;
pub const TAILOR_MAX_TOKENS: u32 = 4000;

/// Job detail extraction. Replace `{job_description}`.
pub const JOB_DETAILS_PROMPT_TEMPLATE: &str = r#"Analyze this job description and extract the company name and job title.

JOB DESCRIPTION:
{job_description}

Return ONLY a JSON object with this exact structure (no markdown, no code blocks):
{
  "company_name": "Company Name",
  "job_title": "Job Title/Position"
}

If you cannot find the company name or job title, use "Unknown Company" or "Unknown Position" respectively."#;

/// Anti-fabrication directive. Always part of the tailoring prompt.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
CRITICAL RULE - ABSOLUTE TRUTH REQUIREMENT:
You must ONLY use information that exists in the original resume below. DO NOT FABRICATE, INVENT, OR MAKE UP any information whatsoever. This includes:
- Do NOT invent job titles, companies, dates, or experiences
- Do NOT fabricate skills, technologies, or certifications the person doesn't have
- Do NOT make up metrics, numbers, or achievements
- Do NOT add education, degrees, or coursework not in the original
- If information is missing from the original resume, leave it out - DO NOT GUESS";

/// Output schema the renderer expects. Keys match the document model.
pub const RESUME_SCHEMA: &str = r#"{
  "name": "Full Name",
  "contact": {
    "email": "email@example.com",
    "phone": "phone number",
    "linkedin": "LinkedIn URL (optional)",
    "github": "GitHub URL (optional)",
    "location": "City, State (optional)"
  },
  "education": [
    {
      "degree": "Degree Name",
      "institution": "University Name",
      "graduation": "Graduation Date",
      "gpa": "GPA (if mentioned)",
      "relevant_coursework": "Relevant courses (optional)"
    }
  ],
  "experience": [
    {
      "title": "Job Title",
      "company": "Company Name",
      "duration": "Start Date - End Date",
      "location": "City, State (optional)",
      "bullets": [
        "Achievement-focused bullet with **bolded tech** and **bolded metrics**",
        "Another achievement with **important keywords bolded**"
      ]
    }
  ],
  "skills": {
    "technical": ["Skill1", "Skill2", "Skill3"],
    "tools": ["Tool1", "Tool2", "Tool3"],
    "programming_languages": ["ProgrammingLanguage1", "ProgrammingLanguage2"]
  },
  "projects": [
    {
      "name": "Project Name",
      "description": "Brief description",
      "technologies": "Technologies used",
      "duration": "Date range (optional)",
      "location": "City, State (optional)",
      "bullets": [
        "Key achievement with **bolded technologies** and **metrics**"
      ]
    }
  ],
  "certifications": [
    "Certification Name 1",
    "Certification Name 2"
  ],
  "keywords_added": ["keyword1", "keyword2", "keyword3"]
}"#;

/// Resume tailoring prompt.
/// Replace: {no_fabrication}, {resume_text}, {company_name}, {job_title},
///          {job_description}, {schema}
pub const TAILOR_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer and ATS optimization specialist. Your task is to tailor a resume for a specific job application.

{no_fabrication}

ORIGINAL RESUME:
{resume_text}

JOB DETAILS:
Company: {company_name}
Position: {job_title}

JOB DESCRIPTION:
{job_description}

TASK:
Analyze the job description and tailor the resume to be ATS-optimized for this specific position. Follow these guidelines:

1. **NO PROFESSIONAL SUMMARY**: Do not include a professional summary section. Incorporate keywords naturally into experience and project bullet points instead.
2. **Keyword Integration**: Identify key skills, technologies, and requirements from the job description and weave them naturally into bullet points - BUT ONLY if those skills actually exist in the original resume
3. **Strategic Bolding**: Mark items to be bolded by wrapping them in **bold markers**. Bold the following:
   - Technologies and tools (e.g., **Python**, **React**, **AWS**) - only ones actually mentioned in original resume
   - Programming languages from tech stack
   - Frameworks and libraries
   - Key performance indicators and metrics (e.g., **50% improvement**, **$2M revenue**, **10,000 users**) - only real numbers from original
   - Important achievements that should pop to hiring managers
   - Quantifiable results and impact numbers
4. **Relevance**: Emphasize experiences and skills most relevant to this position
5. **ATS-Friendly**: Use standard section headings and formatting
6. **Achievements**: Quantify achievements where possible - USE ONLY REAL NUMBERS FROM THE ORIGINAL RESUME
7. **ABSOLUTELY NO FABRICATION**: You must ONLY include information that was explicitly stated in the original resume. If something isn't in the original resume, DO NOT ADD IT.

Return ONLY a JSON object with the following structure (no markdown, no code blocks):

{schema}

IMPORTANT: Wrap items to be bolded with **double asterisks** in the bullet points. Include all relevant sections that exist in the original resume. Focus on making this resume highly tailored to the {job_title} position at {company_name}.

FINAL REMINDER: DO NOT FABRICATE ANYTHING. Every single piece of information in your response MUST come directly from the original resume provided above. Accuracy and truthfulness are more important than completeness."#;

/// Substitutes `{key}` markers in one pass, so substituted text is never
/// rescanned (a resume that itself contains `{job_title}` stays literal).
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let matched = after.find('}').and_then(|end| {
            let key = &after[..end];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, end))
        });
        match matched {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn job_details_prompt(job_description: &str) -> String {
    fill(
        JOB_DETAILS_PROMPT_TEMPLATE,
        &[("job_description", job_description)],
    )
}

pub fn tailor_prompt(
    resume_text: &str,
    job_description: &str,
    company_name: &str,
    job_title: &str,
) -> String {
    fill(
        TAILOR_PROMPT_TEMPLATE,
        &[
            ("no_fabrication", NO_FABRICATION_INSTRUCTION),
            ("resume_text", resume_text),
            ("company_name", company_name),
            ("job_title", job_title),
            ("job_description", job_description),
            ("schema", RESUME_SCHEMA),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_known_keys_only() {
        assert_eq!(fill("{a} and {b} {c}", &[("a", "1"), ("b", "2")]), "1 and 2 {c}");
    }

    #[test]
    fn test_fill_does_not_rescan_substituted_text() {
        assert_eq!(
            fill("{x}/{y}", &[("x", "{y}"), ("y", "Y")]),
            "{y}/Y"
        );
    }

    #[test]
    fn test_job_details_prompt_keeps_json_braces() {
        let prompt = job_details_prompt("Rust engineer at Ferrous");
        assert!(prompt.contains("Rust engineer at Ferrous"));
        assert!(prompt.contains("\"company_name\": \"Company Name\""));
        assert!(!prompt.contains("{job_description}"));
    }

    #[test]
    fn test_tailor_prompt_always_forbids_fabrication() {
        let prompt = tailor_prompt("resume body", "jd body", "Acme", "Engineer");
        assert!(prompt.contains("DO NOT FABRICATE"));
        assert!(prompt.contains("resume body"));
        assert!(prompt.contains("jd body"));
        assert!(prompt.contains("Position: Engineer"));
        assert!(prompt.contains("the Engineer position at Acme"));
        assert!(prompt.contains("\"keywords_added\""));
        assert!(!prompt.contains("{schema}"));
    }
}
