//! Result types returned by the analysis tools. Field names follow the JSON contract (camelCase).

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A 0–100 score. Range is enforced by the schema check before decoding.
/// Integral values serialize as integers so results round-trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    #[cfg(test)]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0 >= 0.0 {
            serializer.serialize_u64(self.0 as u64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsMatch {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub score: Score,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub overall_score: Score,
    pub skills: SkillsMatch,
    pub experience: SectionScore,
    pub education: SectionScore,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPoint {
    pub point: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Methodology {
    pub approach: String,
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchAnalysis {
    pub title: String,
    pub journal: String,
    #[serde(deserialize_with = "text_or_integer")]
    pub year: String,
    /// Always exactly 3.
    pub contributions: Vec<KeyPoint>,
    /// Always exactly 3.
    pub limitations: Vec<KeyPoint>,
    pub area_of_focus: String,
    pub methodology: Methodology,
    pub future_work: Vec<String>,
}

/// Accepts `"2023"` or `2023`; both decode to `"2023"`.
fn text_or_integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrInteger {
        Text(String),
        Integer(u64),
    }

    Ok(match TextOrInteger::deserialize(deserializer)? {
        TextOrInteger::Text(text) => text,
        TextOrInteger::Integer(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessIdeaResult {
    pub idea: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestions {
    pub questions: Vec<InterviewQuestion>,
}

/// Any tool's result. Serializes as the inner object, without a tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Resume(ResumeAnalysis),
    Research(ResearchAnalysis),
    BusinessIdea(BusinessIdeaResult),
    Interview(InterviewQuestions),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_integral_score_serializes_as_integer() {
        let score: Score = serde_json::from_value(json!(82)).unwrap();
        assert_eq!(serde_json::to_value(score).unwrap(), json!(82));
    }

    #[test]
    fn test_fractional_score_is_preserved() {
        let score: Score = serde_json::from_value(json!(72.5)).unwrap();
        assert_eq!(score, Score(72.5));
        assert_eq!(serde_json::to_value(score).unwrap(), json!(72.5));
    }

    #[test]
    fn test_result_union_serializes_untagged() {
        let result = AnalysisResult::BusinessIdea(BusinessIdeaResult {
            idea: "Bakery".into(),
        });
        assert_eq!(serde_json::to_value(result).unwrap(), json!({"idea": "Bakery"}));
    }
}
