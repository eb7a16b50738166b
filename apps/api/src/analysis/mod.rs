//! Resume analysis pipeline — upload intake, text extraction, LLM analysis.

pub mod extract;
pub mod handlers;
