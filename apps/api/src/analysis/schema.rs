//! Schema Validator — declarative result schemas and the one routine that checks them.
//!
//! Every tool describes its expected JSON as a `Shape` tree. `validate` parses the
//! candidate, walks the tree, and only then decodes into the typed result. The
//! contract is all-or-nothing: a result is returned only if every check passed.
//! Unknown extra keys are ignored and dropped on decode.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::analysis::error::ValidationError;
use crate::analysis::models::{
    AnalysisResult, BusinessIdeaResult, InterviewQuestions, ResearchAnalysis, ResumeAnalysis,
};

const ROOT: &str = "$";

/// Exact number of contributions and limitations in a research analysis.
pub const RESEARCH_POINT_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Any,
    Exactly(usize),
    AtLeast(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Text { non_empty: bool },
    /// Non-empty string or positive integer, decoded as text.
    TextOrInteger,
    /// Number in 0..=100.
    Score,
    List { item: Box<Shape>, cardinality: Cardinality },
    Object(Vec<Field>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub shape: Shape,
}

fn text() -> Shape {
    Shape::Text { non_empty: false }
}

fn required_text() -> Shape {
    Shape::Text { non_empty: true }
}

fn list(item: Shape, cardinality: Cardinality) -> Shape {
    Shape::List {
        item: Box::new(item),
        cardinality,
    }
}

fn object(fields: Vec<(&'static str, Shape)>) -> Shape {
    Shape::Object(
        fields
            .into_iter()
            .map(|(name, shape)| Field { name, shape })
            .collect(),
    )
}

/// Which result a candidate must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Resume,
    Research,
    BusinessIdea,
    Interview,
}

impl SchemaKind {
    /// Whether the provider is asked for JSON. Business ideas come back as prose.
    pub fn expects_json(&self) -> bool {
        !matches!(self, SchemaKind::BusinessIdea)
    }

    pub fn shape(&self) -> Shape {
        match self {
            SchemaKind::Resume => {
                let section = || object(vec![("score", Shape::Score), ("feedback", text())]);
                object(vec![
                    ("overallScore", Shape::Score),
                    (
                        "skills",
                        object(vec![
                            ("matched", list(text(), Cardinality::Any)),
                            ("missing", list(text(), Cardinality::Any)),
                        ]),
                    ),
                    ("experience", section()),
                    ("education", section()),
                    ("recommendations", list(text(), Cardinality::Any)),
                ])
            }
            SchemaKind::Research => {
                let key_point = || {
                    object(vec![
                        ("point", required_text()),
                        ("description", required_text()),
                    ])
                };
                object(vec![
                    ("title", required_text()),
                    ("journal", required_text()),
                    ("year", Shape::TextOrInteger),
                    (
                        "contributions",
                        list(key_point(), Cardinality::Exactly(RESEARCH_POINT_COUNT)),
                    ),
                    (
                        "limitations",
                        list(key_point(), Cardinality::Exactly(RESEARCH_POINT_COUNT)),
                    ),
                    ("areaOfFocus", required_text()),
                    (
                        "methodology",
                        object(vec![
                            ("approach", required_text()),
                            ("tools", list(text(), Cardinality::Any)),
                        ]),
                    ),
                    ("futureWork", list(text(), Cardinality::Any)),
                ])
            }
            SchemaKind::BusinessIdea => object(vec![("idea", required_text())]),
            SchemaKind::Interview => object(vec![(
                "questions",
                list(
                    object(vec![
                        ("question", required_text()),
                        ("answer", required_text()),
                    ]),
                    Cardinality::AtLeast(1),
                ),
            )]),
        }
    }
}

/// A result type with a declared schema.
pub trait Validated: DeserializeOwned {
    const SCHEMA: SchemaKind;
}

impl Validated for ResumeAnalysis {
    const SCHEMA: SchemaKind = SchemaKind::Resume;
}

impl Validated for ResearchAnalysis {
    const SCHEMA: SchemaKind = SchemaKind::Research;
}

impl Validated for BusinessIdeaResult {
    const SCHEMA: SchemaKind = SchemaKind::BusinessIdea;
}

impl Validated for InterviewQuestions {
    const SCHEMA: SchemaKind = SchemaKind::Interview;
}

/// Strictly parses `candidate` as JSON and checks it against `T`'s schema.
pub fn validate<T: Validated>(candidate: &str) -> Result<T, ValidationError> {
    let value: Value =
        serde_json::from_str(candidate).map_err(|e| ValidationError::Malformed(e.to_string()))?;
    validate_value(value)
}

/// Checks an already-parsed value against `T`'s schema and decodes it.
pub fn validate_value<T: Validated>(value: Value) -> Result<T, ValidationError> {
    check(&value, &T::SCHEMA.shape(), ROOT)?;
    serde_json::from_value(value).map_err(|e| ValidationError::SchemaMismatch {
        path: ROOT.to_string(),
        expected: std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("result")
            .to_string(),
        actual: e.to_string(),
    })
}

/// Validates a candidate for `kind` and wraps it in the result union.
/// Business ideas are prose: the whole candidate becomes the `idea` text.
pub fn validate_result(candidate: &str, kind: SchemaKind) -> Result<AnalysisResult, ValidationError> {
    match kind {
        SchemaKind::Resume => validate::<ResumeAnalysis>(candidate).map(AnalysisResult::Resume),
        SchemaKind::Research => {
            validate::<ResearchAnalysis>(candidate).map(AnalysisResult::Research)
        }
        SchemaKind::BusinessIdea => {
            let value = serde_json::json!({ "idea": candidate.trim() });
            validate_value::<BusinessIdeaResult>(value).map(AnalysisResult::BusinessIdea)
        }
        SchemaKind::Interview => {
            validate::<InterviewQuestions>(candidate).map(AnalysisResult::Interview)
        }
    }
}

fn check(value: &Value, shape: &Shape, path: &str) -> Result<(), ValidationError> {
    match shape {
        Shape::Text { non_empty } => match value {
            Value::String(s) if *non_empty && s.trim().is_empty() => {
                mismatch(path, describe(shape), "empty string")
            }
            Value::String(_) => Ok(()),
            other => mismatch(path, describe(shape), type_name(other)),
        },
        Shape::TextOrInteger => match value {
            Value::String(s) if s.trim().is_empty() => {
                mismatch(path, describe(shape), "empty string")
            }
            Value::String(_) => Ok(()),
            Value::Number(n) if n.as_u64().is_some_and(|n| n > 0) => Ok(()),
            Value::Number(n) => mismatch(path, describe(shape), n.to_string()),
            other => mismatch(path, describe(shape), type_name(other)),
        },
        Shape::Score => match value.as_f64() {
            Some(n) if (0.0..=100.0).contains(&n) => Ok(()),
            Some(_) => mismatch(path, describe(shape), value.to_string()),
            None => mismatch(path, describe(shape), type_name(value)),
        },
        Shape::List { item, cardinality } => {
            let Some(items) = value.as_array() else {
                return mismatch(path, describe(shape), type_name(value));
            };
            match *cardinality {
                Cardinality::Exactly(n) if items.len() != n => {
                    return mismatch(path, format!("exactly {}", item_count(n)), item_count(items.len()));
                }
                Cardinality::AtLeast(n) if items.len() < n => {
                    return mismatch(path, format!("at least {}", item_count(n)), item_count(items.len()));
                }
                _ => {}
            }
            for (i, element) in items.iter().enumerate() {
                check(element, item, &format!("{path}[{i}]"))?;
            }
            Ok(())
        }
        Shape::Object(fields) => {
            let Some(map) = value.as_object() else {
                return mismatch(path, describe(shape), type_name(value));
            };
            for field in fields {
                let field_path = format!("{path}.{}", field.name);
                match map.get(field.name) {
                    Some(v) => check(v, &field.shape, &field_path)?,
                    None => return mismatch(&field_path, describe(&field.shape), "missing"),
                }
            }
            Ok(())
        }
    }
}

fn mismatch(
    path: &str,
    expected: impl Into<String>,
    actual: impl Into<String>,
) -> Result<(), ValidationError> {
    Err(ValidationError::SchemaMismatch {
        path: path.to_string(),
        expected: expected.into(),
        actual: actual.into(),
    })
}

fn describe(shape: &Shape) -> String {
    match shape {
        Shape::Text { non_empty: true } => "non-empty string".to_string(),
        Shape::Text { non_empty: false } => "string".to_string(),
        Shape::TextOrInteger => "non-empty string or positive integer".to_string(),
        Shape::Score => "number between 0 and 100".to_string(),
        Shape::List { item, .. } => format!("array of {}", describe(item)),
        Shape::Object(_) => "object".to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn item_count(n: usize) -> String {
    if n == 1 {
        "1 item".to_string()
    } else {
        format!("{n} items")
    }
}
