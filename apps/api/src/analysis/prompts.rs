// All LLM prompt templates for the analysis tools.
// Placeholders are `{name}` and are filled by `prompt_builder::render`.

/// Common closing instruction for every tool that expects JSON back.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY the JSON object. \
    Do NOT include any text outside the JSON. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Resume vs job description scoring.
/// Replace: {resume_text}, {job_description}, {json_only}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Analyze this resume against the job description and provide a JSON response.

Resume:
{resume_text}

Job Description:
{job_description}

Return a valid JSON object with this EXACT structure:
{
  "overallScore": number,
  "skills": {
    "matched": string[],
    "missing": string[]
  },
  "experience": {
    "score": number,
    "feedback": string
  },
  "education": {
    "score": number,
    "feedback": string
  },
  "recommendations": string[]
}

Rules:
- "overallScore", "experience.score" and "education.score" are numbers from 0 to 100.
- "skills.matched" lists skills from the job description that the resume demonstrates.
- "skills.missing" lists skills the job description requires that the resume lacks.
- Both skills lists must be present, even when empty.
- "recommendations" are specific, actionable improvements to the resume.

{json_only}"#;

/// Research paper summary.
/// Replace: {paper_text}, {json_only}
pub const RESEARCH_PROMPT_TEMPLATE: &str = r#"Analyze this research paper and provide a JSON response.

Research Paper:
{paper_text}

Return a valid JSON object with this EXACT structure:
{
  "title": string,
  "journal": string,
  "year": string,
  "contributions": [
    { "point": string, "description": string },
    { "point": string, "description": string },
    { "point": string, "description": string }
  ],
  "limitations": [
    { "point": string, "description": string },
    { "point": string, "description": string },
    { "point": string, "description": string }
  ],
  "areaOfFocus": string,
  "methodology": {
    "approach": string,
    "tools": string[]
  },
  "futureWork": string[]
}

Ensure exactly 3 contributions and exactly 3 limitations are provided, each with a brief point and a detailed description.
"year" is a string. If the journal or year cannot be determined, write "Unknown".

{json_only}"#;

/// Business idea generation. Free-form text output.
/// Replace: {industry}, {interests}, {budget}
pub const BUSINESS_IDEA_PROMPT_TEMPLATE: &str = r#"Generate a detailed business idea based on the following criteria:
Industry: {industry}
Personal Interests & Skills: {interests}
Available Budget: {budget}

Please provide a structured response that includes:
1. Business Concept
2. Target Market
3. Initial Setup Requirements
4. Marketing Strategy
5. Potential Challenges
6. Estimated Timeline
7. Budget Allocation
8. Growth Opportunities"#;

/// Mock interview question generation.
/// Replace: {job_position}, {job_description}, {years_of_experience}, {question_count}, {json_only}
pub const INTERVIEW_PROMPT_TEMPLATE: &str = r#"Prepare a mock interview for the following role.

Job Position: {job_position}
Job Description: {job_description}
Years of Experience: {years_of_experience}

Based on this information, write {question_count} interview questions with model answers.

Return a valid JSON object with this EXACT structure:
{
  "questions": [
    { "question": string, "answer": string }
  ]
}

{json_only}"#;
