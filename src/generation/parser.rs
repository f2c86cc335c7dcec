//! Model output parsing.
//!
//! Chat models reliably wrap JSON in prose or code fences. The parser is
//! maximally tolerant of formatting, but fails loudly when the payload is
//! not JSON at all, since downstream persistence requires structured data.

use crate::error::{FieldcastError, Result};
use serde::Deserialize;

/// Maximum raw model text carried in a parse error, for diagnostics.
const MAX_DIAGNOSTIC_CHARS: usize = 500;

/// Structured episode content extracted from a model response.
///
/// Missing fields default to empty rather than failing: a partially usable
/// episode beats a hard failure once JSON parsing itself has succeeded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EpisodeDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub script: String,
    #[serde(default, alias = "keyInsights")]
    pub key_insights: Vec<String>,
}

/// Parse a free-text model response into an [`EpisodeDraft`].
pub fn parse_episode_draft(raw: &str) -> Result<EpisodeDraft> {
    parse_json_object(raw)
}

/// Parse any JSON-object response with the same formatting tolerance.
pub fn parse_json_object<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T> {
    let cleaned = extract_json_object(raw)?;
    serde_json::from_str(&cleaned).map_err(|e| unparseable(raw, &e.to_string()))
}

/// Recover the JSON object embedded in a model response.
///
/// Strips code fences (with an optional language tag) case-insensitively,
/// then falls back to the window between the first `{` and the last `}`.
fn extract_json_object(raw: &str) -> Result<String> {
    let mut text = raw.trim();

    // Leading fence, with or without a language tag
    for prefix in ["```json", "```", "json"] {
        let matches = text
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
        if matches {
            text = text[prefix.len()..].trim_start();
            break;
        }
    }
    if let Some(stripped) = text.strip_suffix("```") {
        text = stripped.trim_end();
    }

    if serde_json::from_str::<serde_json::Value>(text)
        .map(|v| v.is_object())
        .unwrap_or(false)
    {
        return Ok(text.to_string());
    }

    // Recovery attempt: take the substring between the outermost braces
    let start = text.find('{');
    let end = text.rfind('}');
    match (start, end) {
        (Some(s), Some(e)) if e > s => Ok(text[s..=e].to_string()),
        _ => Err(unparseable(raw, "no JSON object found")),
    }
}

fn unparseable(raw: &str, reason: &str) -> FieldcastError {
    FieldcastError::UnparseableModelOutput {
        reason: reason.to_string(),
        raw: raw.chars().take(MAX_DIAGNOSTIC_CHARS).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARE: &str = r#"{"title":"A","summary":"B","script":"C","keyInsights":["D"]}"#;

    #[test]
    fn test_parse_bare_json() {
        let draft = parse_episode_draft(BARE).unwrap();
        assert_eq!(draft.title, "A");
        assert_eq!(draft.summary, "B");
        assert_eq!(draft.script, "C");
        assert_eq!(draft.key_insights, vec!["D"]);
    }

    #[test]
    fn test_parse_fenced_json_matches_bare() {
        let fenced = format!("```json\n{}\n```", BARE);
        let draft = parse_episode_draft(&fenced).unwrap();
        assert_eq!(draft.title, "A");
        assert_eq!(draft.key_insights, vec!["D"]);
    }

    #[test]
    fn test_parse_fence_without_language_tag() {
        let fenced = format!("```\n{}\n```", BARE);
        assert_eq!(parse_episode_draft(&fenced).unwrap().title, "A");
    }

    #[test]
    fn test_parse_fence_case_insensitive() {
        let fenced = format!("```JSON\n{}\n```", BARE);
        assert_eq!(parse_episode_draft(&fenced).unwrap().title, "A");
    }

    #[test]
    fn test_parse_bare_language_tag() {
        let tagged = format!("json\n{}", BARE);
        assert_eq!(parse_episode_draft(&tagged).unwrap().title, "A");
    }

    #[test]
    fn test_parse_leading_prose() {
        let prose = r#"Here you go:
{"title":"A","summary":"B","script":"C","keyInsights":[]}"#;
        let draft = parse_episode_draft(prose).unwrap();
        assert_eq!(draft.title, "A");
        assert!(draft.key_insights.is_empty());
    }

    #[test]
    fn test_parse_missing_fields_default() {
        let draft = parse_episode_draft(r#"{"title":"Only title"}"#).unwrap();
        assert_eq!(draft.title, "Only title");
        assert_eq!(draft.summary, "");
        assert_eq!(draft.script, "");
        assert!(draft.key_insights.is_empty());
    }

    #[test]
    fn test_parse_snake_case_insights() {
        let draft =
            parse_episode_draft(r#"{"title":"T","key_insights":["x","y"]}"#).unwrap();
        assert_eq!(draft.key_insights.len(), 2);
    }

    #[test]
    fn test_parse_no_brace_fails_structured() {
        match parse_episode_draft("I could not produce the episode, sorry.") {
            Err(FieldcastError::UnparseableModelOutput { raw, .. }) => {
                assert!(raw.contains("could not produce"));
            }
            other => panic!("expected UnparseableModelOutput, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_garbage_between_braces_fails() {
        assert!(matches!(
            parse_episode_draft("prefix { this is not json } suffix"),
            Err(FieldcastError::UnparseableModelOutput { .. })
        ));
    }

    #[test]
    fn test_diagnostic_text_is_truncated() {
        let long = "x".repeat(2000);
        match parse_episode_draft(&long) {
            Err(FieldcastError::UnparseableModelOutput { raw, .. }) => {
                assert_eq!(raw.chars().count(), MAX_DIAGNOSTIC_CHARS);
            }
            other => panic!("expected UnparseableModelOutput, got {:?}", other),
        }
    }
}
