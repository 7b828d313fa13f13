//! Prompt Builder — renders the per-tool template from a request. Pure; no I/O.

use crate::analysis::prompts::{
    BUSINESS_IDEA_PROMPT_TEMPLATE, INTERVIEW_PROMPT_TEMPLATE, JSON_ONLY_INSTRUCTION,
    RESEARCH_PROMPT_TEMPLATE, RESUME_PROMPT_TEMPLATE,
};
use crate::analysis::request::{
    truncate_chars, AnalysisRequest, BUSINESS_FIELD_CAP, JOB_DESCRIPTION_CAP, JOB_POSITION_CAP,
    PAPER_TEXT_CAP, RESUME_TEXT_CAP, YEARS_OF_EXPERIENCE_CAP,
};

/// Builds prompts. Holds only the knobs that are configured at startup.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    interview_question_count: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            interview_question_count: 5,
        }
    }
}

impl PromptBuilder {
    pub fn new(interview_question_count: usize) -> Self {
        Self {
            interview_question_count: interview_question_count.max(1),
        }
    }

    pub fn build(&self, request: &AnalysisRequest) -> String {
        match request {
            AnalysisRequest::Resume(r) => render(
                RESUME_PROMPT_TEMPLATE,
                &[
                    ("resume_text", truncate_chars(&r.resume_text, RESUME_TEXT_CAP)),
                    (
                        "job_description",
                        truncate_chars(&r.job_description, JOB_DESCRIPTION_CAP),
                    ),
                    ("json_only", JSON_ONLY_INSTRUCTION),
                ],
            ),
            AnalysisRequest::Research(r) => render(
                RESEARCH_PROMPT_TEMPLATE,
                &[
                    ("paper_text", truncate_chars(&r.paper_text, PAPER_TEXT_CAP)),
                    ("json_only", JSON_ONLY_INSTRUCTION),
                ],
            ),
            AnalysisRequest::BusinessIdea(b) => render(
                BUSINESS_IDEA_PROMPT_TEMPLATE,
                &[
                    ("industry", truncate_chars(&b.industry, BUSINESS_FIELD_CAP)),
                    ("interests", truncate_chars(&b.interests, BUSINESS_FIELD_CAP)),
                    ("budget", truncate_chars(&b.budget, BUSINESS_FIELD_CAP)),
                ],
            ),
            AnalysisRequest::Interview(i) => {
                let count = self.interview_question_count.to_string();
                render(
                    INTERVIEW_PROMPT_TEMPLATE,
                    &[
                        ("job_position", truncate_chars(&i.job_position, JOB_POSITION_CAP)),
                        (
                            "job_description",
                            truncate_chars(&i.job_description, JOB_DESCRIPTION_CAP),
                        ),
                        (
                            "years_of_experience",
                            truncate_chars(&i.years_of_experience, YEARS_OF_EXPERIENCE_CAP),
                        ),
                        ("question_count", count.as_str()),
                        ("json_only", JSON_ONLY_INSTRUCTION),
                    ],
                )
            }
        }
    }
}

/// Fills `{name}` placeholders in a single left-to-right pass, so text that
/// happens to contain a placeholder is never expanded a second time.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];

        let hit = values.iter().find(|(name, _)| {
            tail.strip_prefix(*name)
                .is_some_and(|after| after.starts_with('}'))
        });

        match hit {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::request::{
        BusinessIdeaInput, InterviewInput, ResearchInput, ResumeInput,
    };

    fn resume(resume_text: &str, job_description: &str) -> AnalysisRequest {
        AnalysisRequest::Resume(ResumeInput {
            resume_text: resume_text.to_string(),
            job_description: job_description.to_string(),
        })
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = PromptBuilder::default();
        let req = resume("5 years React", "Need React dev");
        assert_eq!(builder.build(&req), builder.build(&req));
    }

    #[test]
    fn test_resume_prompt_contains_inputs_and_contract() {
        let prompt = PromptBuilder::default().build(&resume("5 years React", "Need React dev"));
        assert!(prompt.contains("Resume:\n5 years React"));
        assert!(prompt.contains("Job Description:\nNeed React dev"));
        assert!(prompt.contains("\"overallScore\": number"));
        assert!(prompt.contains("from 0 to 100"));
        assert!(prompt.ends_with(JSON_ONLY_INSTRUCTION));
    }

    #[test]
    fn test_resume_text_is_capped() {
        let long_resume = "r".repeat(50_000);
        let prompt = PromptBuilder::default().build(&resume(&long_resume, "jd"));
        assert!(prompt.contains(&"r".repeat(RESUME_TEXT_CAP)));
        assert!(!prompt.contains(&"r".repeat(RESUME_TEXT_CAP + 1)));
    }

    #[test]
    fn test_job_description_is_capped() {
        let long_jd = "j".repeat(12_000);
        let prompt = PromptBuilder::default().build(&resume("resume", &long_jd));
        assert!(prompt.contains(&"j".repeat(JOB_DESCRIPTION_CAP)));
        assert!(!prompt.contains(&"j".repeat(JOB_DESCRIPTION_CAP + 1)));
    }

    #[test]
    fn test_research_prompt_states_cardinality() {
        let req = AnalysisRequest::Research(ResearchInput {
            paper_text: "We study caching.".into(),
        });
        let prompt = PromptBuilder::default().build(&req);
        assert!(prompt.contains("exactly 3 contributions and exactly 3 limitations"));
        assert!(prompt.contains("Research Paper:\nWe study caching."));
    }

    #[test]
    fn test_business_idea_prompt_has_no_json_contract() {
        let req = AnalysisRequest::BusinessIdea(BusinessIdeaInput {
            industry: "Food".into(),
            interests: "Baking".into(),
            budget: "$5k".into(),
        });
        let prompt = PromptBuilder::default().build(&req);
        assert!(prompt.contains("Industry: Food"));
        assert!(prompt.contains("Available Budget: $5k"));
        assert!(!prompt.contains(JSON_ONLY_INSTRUCTION));
    }

    #[test]
    fn test_interview_prompt_uses_configured_count() {
        let req = AnalysisRequest::Interview(InterviewInput {
            job_position: "Backend Engineer".into(),
            job_description: "Rust services".into(),
            years_of_experience: "4".into(),
        });
        let prompt = PromptBuilder::new(8).build(&req);
        assert!(prompt.contains("write 8 interview questions"));
        assert!(prompt.contains("Job Position: Backend Engineer"));
    }

    #[test]
    fn test_placeholders_inside_inputs_are_not_expanded() {
        let prompt = PromptBuilder::default().build(&resume("see {job_description}", "SECRET JD"));
        assert!(prompt.contains("Resume:\nsee {job_description}"));
        assert_eq!(prompt.matches("SECRET JD").count(), 1);
    }

    #[test]
    fn test_render_leaves_unknown_braces_alone() {
        let out = render("{ \"a\": {x} } {y", &[("x", "1")]);
        assert_eq!(out, "{ \"a\": 1 } {y");
    }
}
