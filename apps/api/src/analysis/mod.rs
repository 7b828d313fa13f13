// AI career tools: resume scoring, research paper analysis, business ideas, mock interviews.
// Every provider call goes through llm_client — no direct HTTP calls here.

pub mod error;
pub mod extractor;
pub mod handlers;
pub mod models;
pub mod prompt_builder;
pub mod prompts;
pub mod request;
pub mod schema;
pub mod service;
