//! Analysis requests — the tagged union accepted by the pipeline, plus per-field caps.

use serde::{Deserialize, Serialize};

use crate::analysis::error::AnalysisError;

// Field caps, in characters. Beyond a cap the field is silently cut.
pub const RESUME_TEXT_CAP: usize = 30_000;
pub const PAPER_TEXT_CAP: usize = 30_000;
pub const JOB_DESCRIPTION_CAP: usize = 10_000;
pub const BUSINESS_FIELD_CAP: usize = 2_000;
pub const JOB_POSITION_CAP: usize = 200;
pub const YEARS_OF_EXPERIENCE_CAP: usize = 50;

// Missing fields deserialize to empty strings so that they are reported by
// `validate()` as InvalidInput rather than as a body rejection.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeInput {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchInput {
    #[serde(default, alias = "pdfText")]
    pub paper_text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessIdeaInput {
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub interests: String,
    #[serde(default)]
    pub budget: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewInput {
    #[serde(default)]
    pub job_position: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub years_of_experience: String,
}

/// One request to the analysis pipeline. Tagged on `kind` in JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AnalysisRequest {
    #[serde(rename = "resume")]
    Resume(ResumeInput),
    #[serde(rename = "research")]
    Research(ResearchInput),
    #[serde(rename = "businessIdea")]
    BusinessIdea(BusinessIdeaInput),
    #[serde(rename = "interview")]
    Interview(InterviewInput),
}

impl AnalysisRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisRequest::Resume(_) => "resume",
            AnalysisRequest::Research(_) => "research",
            AnalysisRequest::BusinessIdea(_) => "businessIdea",
            AnalysisRequest::Interview(_) => "interview",
        }
    }

    /// Checks that every required field is non-empty after trimming.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        match self {
            AnalysisRequest::Resume(r) => require(&[
                ("resumeText", &r.resume_text),
                ("jobDescription", &r.job_description),
            ]),
            AnalysisRequest::Research(r) => require(&[("paperText", &r.paper_text)]),
            AnalysisRequest::BusinessIdea(b) => require(&[
                ("industry", &b.industry),
                ("interests", &b.interests),
                ("budget", &b.budget),
            ]),
            AnalysisRequest::Interview(i) => require(&[
                ("jobPosition", &i.job_position),
                ("jobDescription", &i.job_description),
                ("yearsOfExperience", &i.years_of_experience),
            ]),
        }
    }
}

fn require(fields: &[(&str, &String)]) -> Result<(), AnalysisError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::InvalidInput(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Trims `text` and keeps at most `max_chars` characters, cutting on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    let text = text.trim();
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
