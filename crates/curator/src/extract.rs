//! Strategies for locating a JSON object inside free-form model output.
//!
//! Each strategy only finds a candidate span; parsing and schema checks
//! happen in the [`ResponseNormalizer`](crate::ResponseNormalizer).

/// Markdown code fence delimiter.
pub const FENCE: &str = "```";

/// Locates candidate JSON text inside a model reply.
///
/// ## Design Note
/// - Strategies return borrowed slices of the input, nothing is copied
/// - Returning `None` means "this strategy does not apply", not an error
pub trait ExtractionStrategy: Send + Sync {
    /// Returns the name of this strategy (for logging/debugging)
    fn name(&self) -> &str;

    /// Find the candidate JSON text, if this strategy applies.
    fn extract<'a>(&self, text: &'a str) -> Option<&'a str>;
}

/// Takes the content between the first fence and the next one.
///
/// A language tag on the opening fence (```` ```json ````) is dropped.
/// An opening fence without a closing one does not apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct FencedBlock;

impl ExtractionStrategy for FencedBlock {
    fn name(&self) -> &str {
        "FencedBlock"
    }

    fn extract<'a>(&self, text: &'a str) -> Option<&'a str> {
        let open = text.find(FENCE)?;
        let after_open = &text[open + FENCE.len()..];
        let close = after_open.find(FENCE)?;

        let block = strip_info_string(&after_open[..close]).trim();
        if block.is_empty() { None } else { Some(block) }
    }
}

/// Takes everything from the first `{` to the last `}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BraceBoundary;

impl ExtractionStrategy for BraceBoundary {
    fn name(&self) -> &str {
        "BraceBoundary"
    }

    fn extract<'a>(&self, text: &'a str) -> Option<&'a str> {
        let start = text.find('{')?;
        let end = text.rfind('}')?;
        if start < end {
            Some(&text[start..=end])
        } else {
            None
        }
    }
}

/// Drop a leading language tag such as `json` or `JSON5`.
fn strip_info_string(block: &str) -> &str {
    let tag_len = block
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(block.len());
    &block[tag_len..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_with_language_tag() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(FencedBlock.extract(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_fenced_without_tag_and_with_prose() {
        let text = "Sure! Here you go:\n```\n{\"a\": 1}\n```\nEnjoy.";
        assert_eq!(FencedBlock.extract(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_fenced_same_line() {
        assert_eq!(FencedBlock.extract("```json {\"a\":1}```"), Some("{\"a\":1}"));
    }

    #[test]
    fn test_fenced_takes_first_block() {
        let text = "```json\n{\"first\": true}\n```\n```json\n{\"second\": true}\n```";
        assert_eq!(FencedBlock.extract(text), Some("{\"first\": true}"));
    }

    #[test]
    fn test_unclosed_fence_does_not_apply() {
        assert_eq!(FencedBlock.extract("```json\n{\"a\": 1}"), None);
        assert_eq!(FencedBlock.extract("no fences at all"), None);
    }

    #[test]
    fn test_brace_boundary() {
        let text = "Here is the result: {\"recommendations\":[]} Thanks!";
        assert_eq!(
            BraceBoundary.extract(text),
            Some("{\"recommendations\":[]}")
        );
    }

    #[test]
    fn test_brace_boundary_spans_nested_objects() {
        let text = "x {\"a\": {\"b\": 1}} y";
        assert_eq!(BraceBoundary.extract(text), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_brace_boundary_requires_both_braces_in_order() {
        assert_eq!(BraceBoundary.extract("I could not find any songs."), None);
        assert_eq!(BraceBoundary.extract("} backwards {"), None);
        assert_eq!(BraceBoundary.extract("only { open"), None);
    }
}
