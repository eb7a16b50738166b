//! Analysis text renderer — turns the free-form analysis string returned by
//! the LLM into an ordered sequence of typed display blocks.
//!
//! The upstream generator does not guarantee strict markdown, so this is a
//! lenient single forward pass over lines rather than a grammar: each line is
//! matched against a fixed precedence of patterns (score, numbered bold
//! heading, bold sub-heading, bullet, paragraph fallback) and consecutive
//! bullets are buffered into one list. The renderer is total — any input,
//! however malformed, produces blocks and never an error.
//!
//! Blocks are pure data. No markup is generated here; the consumer owns all
//! styling and escaping, so leaked generator text can never inject markup.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// One unit of renderable content, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayBlock {
    /// Emitted alone when there is no analysis text yet (empty input).
    Pending,
    /// The overall match score, e.g. "82%".
    Score { value: String },
    /// A section heading. Level 2 for numbered top-level sections,
    /// level 3 for bold sub-labels.
    Heading { level: u8, title: String },
    Paragraph { text: String },
    List { items: Vec<String> },
}

// Line patterns, in match order. The score pattern runs before the generic
// numbered heading so "N. **Overall Match Score:** 82%" is never demoted to a
// plain heading. The generator emits the colon both inside and outside the
// bold span, so both are accepted.
static SCORE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\d+\.\s*\*\*\s*overall match score\s*:?\s*\*\*\s*:?\s*([\d.%]+)").unwrap()
});
static TOP_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*\*\*(.*?)\*\*\s*:(.*)$").unwrap());
static SUB_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*\s*(.*?)\s*\*\*:\s*(.*)$").unwrap());
static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[*-]\s+(.*)$").unwrap());

// Cleaning patterns. Leading bullet markers are consumed greedily, including
// any whitespace around them (removing `**` can expose a space-prefixed
// marker), so that cleaning is idempotent. The meta-suffix pattern drops
// prompt-authoring directives the generator occasionally echoes back into its
// answer.
static LEADING_BULLETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\s*[*-]\s*)+").unwrap());
static META_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:bullet points|max 3-6|keep concise)\b.*$").unwrap());

/// Renders raw analysis text into display blocks.
///
/// Empty or whitespace-only input yields exactly one [`DisplayBlock::Pending`].
/// Everything else degrades to the most general applicable block; there is no
/// failure path.
pub fn render(text: &str) -> Vec<DisplayBlock> {
    if text.trim().is_empty() {
        return vec![DisplayBlock::Pending];
    }

    let mut blocks: Vec<DisplayBlock> = Vec::new();
    let mut pending_items: Vec<String> = Vec::new();

    for line in text.trim().split('\n') {
        let line = line.trim();
        if line.is_empty() {
            // Blank lines emit nothing and do not close an open list.
            continue;
        }

        if let Some(caps) = SCORE_LINE.captures(line) {
            flush_list(&mut blocks, &mut pending_items);
            blocks.push(DisplayBlock::Score {
                value: caps[1].to_string(),
            });
            continue;
        }

        if let Some(caps) = TOP_HEADING.captures(line) {
            flush_list(&mut blocks, &mut pending_items);
            let title = clean_text(&caps[1]);
            let rest = clean_text(&caps[2]);
            blocks.push(DisplayBlock::Heading { level: 2, title });
            if !rest.is_empty() {
                blocks.push(DisplayBlock::Paragraph { text: rest });
            }
            continue;
        }

        if let Some(caps) = SUB_HEADING.captures(line) {
            flush_list(&mut blocks, &mut pending_items);
            let title = clean_text(&caps[1]);
            let content = clean_text(&caps[2]);
            blocks.push(DisplayBlock::Heading { level: 3, title });
            if !content.is_empty() {
                blocks.push(DisplayBlock::Paragraph { text: content });
            }
            continue;
        }

        if let Some(caps) = BULLET.captures(line) {
            pending_items.push(clean_text(&caps[1]));
            continue;
        }

        flush_list(&mut blocks, &mut pending_items);
        blocks.push(DisplayBlock::Paragraph {
            text: clean_text(line),
        });
    }

    flush_list(&mut blocks, &mut pending_items);
    blocks
}

/// Emits the buffered bullet items as a single list block, if any.
fn flush_list(blocks: &mut Vec<DisplayBlock>, pending_items: &mut Vec<String>) {
    if !pending_items.is_empty() {
        blocks.push(DisplayBlock::List {
            items: std::mem::take(pending_items),
        });
    }
}

/// Cleans an extracted label or content fragment: removes `**` emphasis
/// markers, strips leading bullet markers, and drops trailing echoed
/// formatting directives. Idempotent — the `**` removal runs first so a
/// stripped fragment never regains a leading marker.
pub fn clean_text(text: &str) -> String {
    let text = text.replace("**", "");
    let text = LEADING_BULLETS.replace(&text, "");
    let text = META_SUFFIX.replace(&text, "");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(value: &str) -> DisplayBlock {
        DisplayBlock::Score {
            value: value.to_string(),
        }
    }

    fn heading(level: u8, title: &str) -> DisplayBlock {
        DisplayBlock::Heading {
            level,
            title: title.to_string(),
        }
    }

    fn paragraph(text: &str) -> DisplayBlock {
        DisplayBlock::Paragraph {
            text: text.to_string(),
        }
    }

    fn list(items: &[&str]) -> DisplayBlock {
        DisplayBlock::List {
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_input_yields_single_pending_block() {
        assert_eq!(render(""), vec![DisplayBlock::Pending]);
    }

    #[test]
    fn test_whitespace_only_input_yields_single_pending_block() {
        assert_eq!(render("  \n\t\n  "), vec![DisplayBlock::Pending]);
    }

    #[test]
    fn test_score_line_colon_inside_bold() {
        assert_eq!(
            render("1. **Overall Match Score:** 82%"),
            vec![score("82%")]
        );
    }

    #[test]
    fn test_score_line_colon_outside_bold() {
        assert_eq!(render("1. **Overall Match Score**: 75%"), vec![score("75%")]);
    }

    #[test]
    fn test_score_line_case_insensitive_and_any_number() {
        assert_eq!(render("3. **OVERALL MATCH SCORE:** 60%"), vec![score("60%")]);
    }

    #[test]
    fn test_score_without_percent_sign() {
        assert_eq!(render("1. **Overall Match Score:** 82"), vec![score("82")]);
    }

    #[test]
    fn test_score_wins_over_top_heading() {
        // A score line also loosely resembles a numbered heading; the score
        // pattern must claim it first.
        let blocks = render("1. **Overall Match Score**: 90%");
        assert_eq!(blocks, vec![score("90%")]);
    }

    #[test]
    fn test_top_heading_with_trailing_text() {
        assert_eq!(
            render("2. **Strengths**: Good formatting"),
            vec![heading(2, "Strengths"), paragraph("Good formatting")]
        );
    }

    #[test]
    fn test_top_heading_without_trailing_text() {
        assert_eq!(
            render("4. **Key Highlights & Gaps**:"),
            vec![heading(2, "Key Highlights & Gaps")]
        );
    }

    #[test]
    fn test_sub_heading_with_content() {
        assert_eq!(
            render("**Keywords**: Missing 'Docker' and 'Kubernetes'"),
            vec![
                heading(3, "Keywords"),
                paragraph("Missing 'Docker' and 'Kubernetes'")
            ]
        );
    }

    #[test]
    fn test_sub_heading_without_content() {
        assert_eq!(render("**Key Skills Match**:"), vec![heading(3, "Key Skills Match")]);
    }

    #[test]
    fn test_consecutive_bullets_group_into_one_list() {
        let blocks = render("* one\n* two\n* three\nafter");
        assert_eq!(
            blocks,
            vec![list(&["one", "two", "three"]), paragraph("after")]
        );
    }

    #[test]
    fn test_dash_bullets_are_accepted() {
        assert_eq!(render("- alpha\n- beta"), vec![list(&["alpha", "beta"])]);
    }

    #[test]
    fn test_blank_line_does_not_split_a_list() {
        assert_eq!(
            render("* one\n\n* two"),
            vec![list(&["one", "two"])]
        );
    }

    #[test]
    fn test_trailing_list_flushed_at_end_of_input() {
        assert_eq!(render("intro\n* a\n* b"), vec![paragraph("intro"), list(&["a", "b"])]);
    }

    #[test]
    fn test_heading_flushes_open_list_first() {
        assert_eq!(
            render("* item\n**Gaps**: none"),
            vec![list(&["item"]), heading(3, "Gaps"), paragraph("none")]
        );
    }

    #[test]
    fn test_fallback_paragraph_for_plain_prose() {
        assert_eq!(
            render("Consider adding metrics."),
            vec![paragraph("Consider adding metrics.")]
        );
    }

    #[test]
    fn test_bold_line_without_colon_falls_back_to_paragraph() {
        assert_eq!(render("**just emphasis**"), vec![paragraph("just emphasis")]);
    }

    #[test]
    fn test_full_analysis_scenario() {
        let input = "1. **Overall Match Score:** 82%\n\n2. **Strengths**: Good formatting\n* Clear structure\n* Strong action verbs\n\nConsider adding metrics.";
        assert_eq!(
            render(input),
            vec![
                score("82%"),
                heading(2, "Strengths"),
                paragraph("Good formatting"),
                list(&["Clear structure", "Strong action verbs"]),
                paragraph("Consider adding metrics."),
            ]
        );
    }

    #[test]
    fn test_block_order_follows_line_order() {
        let input = "first\n2. **Mid**: note\n* a\nlast";
        let blocks = render(input);
        let flattened: Vec<String> = blocks
            .iter()
            .flat_map(|b| match b {
                DisplayBlock::Pending => vec![],
                DisplayBlock::Score { value } => vec![value.clone()],
                DisplayBlock::Heading { title, .. } => vec![title.clone()],
                DisplayBlock::Paragraph { text } => vec![text.clone()],
                DisplayBlock::List { items } => items.clone(),
            })
            .collect();
        assert_eq!(flattened, vec!["first", "Mid", "note", "a", "last"]);
    }

    #[test]
    fn test_never_fails_on_arbitrary_input() {
        for input in [
            "****",
            "* ",
            "1.",
            "1. ****: ",
            "***mixed** markers*",
            "::::",
            "\u{0}\u{1}binary-ish\u{2}",
        ] {
            assert!(!render(input).is_empty());
        }
    }

    #[test]
    fn test_clean_removes_emphasis_markers() {
        assert_eq!(clean_text("**bold** and **more**"), "bold and more");
    }

    #[test]
    fn test_clean_strips_leading_bullet_markers() {
        assert_eq!(clean_text("* item"), "item");
        assert_eq!(clean_text("- item"), "item");
        assert_eq!(clean_text("* * doubled"), "doubled");
        // `**` removal exposes a space-prefixed marker; it must go too.
        assert_eq!(clean_text("** * x"), "x");
    }

    #[test]
    fn test_bullet_with_exposed_marker_cleans_fully() {
        assert_eq!(render("* ** * remove"), vec![list(&["remove"])]);
    }

    #[test]
    fn test_clean_strips_echoed_meta_instructions() {
        assert_eq!(
            clean_text("Highlight impact (bullet points max, keep it short)"),
            "Highlight impact ("
        );
        assert_eq!(clean_text("Summary: keep concise and focused"), "Summary:");
        assert_eq!(clean_text("List max 3-6 items here"), "List");
    }

    #[test]
    fn test_clean_is_idempotent() {
        for input in [
            "* **bold** item",
            "**Keywords**",
            "- - nested markers",
            "** * x",
            "plain text",
            "tips bullet points max 3-6",
            "  padded  ",
        ] {
            let once = clean_text(input);
            assert_eq!(clean_text(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_pending_block_serializes_with_type_tag() {
        let json = serde_json::to_value(DisplayBlock::Pending).unwrap();
        assert_eq!(json, serde_json::json!({"type": "pending"}));
    }

    #[test]
    fn test_score_block_serializes_with_fields_inline() {
        let json = serde_json::to_value(score("82%")).unwrap();
        assert_eq!(json, serde_json::json!({"type": "score", "value": "82%"}));
    }
}
