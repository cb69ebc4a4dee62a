//! Range resolver
//!
//! Applies an [`EditPlan`] to the original text. Ranges are spliced from
//! the end of the document towards the start, so offsets of ranges not yet
//! processed stay valid. Kept fragments are joined with `", "` and inserted
//! where their deleted range started.

use super::plan::{DeleteRange, EditPlan, KeepFragment};
use crate::parse::Span;
use std::collections::HashMap;

/// Separator between re-inserted fragments
pub const FRAGMENT_SEPARATOR: &str = ", ";

/// Produce the edited text. The input is never modified.
pub fn apply(source: &str, plan: &EditPlan) -> String {
    if plan.is_empty() {
        return source.to_string();
    }
    render(source, Span::new(0, source.len()), plan)
}

/// Number of ranges [`apply`] removes at the top level
pub fn top_level_count(source: &str, plan: &EditPlan) -> usize {
    plan.outermost_within(Span::new(0, source.len())).len()
}

/// Render `window` of the source with every plan range inside it applied.
///
/// A kept fragment can contain deletions of its own, so windows are rendered
/// innermost first from an explicit stack and looked up by span afterwards.
fn render(source: &str, window: Span, plan: &EditPlan) -> String {
    let mut rendered: HashMap<Span, String> = HashMap::new();
    let mut stack = vec![(window, false)];

    while let Some((current, ready)) = stack.pop() {
        if rendered.contains_key(&current) {
            continue;
        }
        let ranges = plan.outermost_within(current);

        if !ready {
            stack.push((current, true));
            for fragment in ranges.iter().filter_map(|range| plan.fragments(range)).flatten() {
                if plan.has_ranges_within(fragment.span) && !rendered.contains_key(&fragment.span) {
                    stack.push((fragment.span, false));
                }
            }
            continue;
        }

        let text = splice(source, current, &ranges, plan, &rendered);
        rendered.insert(current, text);
    }

    rendered.remove(&window).unwrap_or_default()
}

/// Replace each of `ranges` inside `window` with its joined fragments
fn splice(
    source: &str,
    window: Span,
    ranges: &[DeleteRange],
    plan: &EditPlan,
    rendered: &HashMap<Span, String>,
) -> String {
    let Some(text) = window.slice(source) else {
        return String::new();
    };
    let mut out = text.to_string();

    for range in ranges.iter().rev() {
        let local = (range.start - window.start)..(range.end - window.start);
        if out.get(local.clone()).is_none() {
            tracing::warn!(start = range.start, end = range.end, "Delete range not on a char boundary");
            continue;
        }

        let replacement = plan
            .fragments(range)
            .map(|fragments| join_fragments(fragments, rendered))
            .unwrap_or_default();
        out.replace_range(local, &replacement);
    }

    out
}

fn join_fragments(fragments: &[KeepFragment], rendered: &HashMap<Span, String>) -> String {
    fragments
        .iter()
        // A kept call that contained a logging call was rendered first
        .map(|fragment| rendered.get(&fragment.span).unwrap_or(&fragment.text).as_str())
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(source: &str, text: &str) -> KeepFragment {
        let start = source.find(text).unwrap();
        KeepFragment {
            span: Span::new(start, start + text.len()),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_empty_plan_returns_input() {
        let plan = EditPlan::new();
        assert_eq!(apply("let a = 1;", &plan), "let a = 1;");
        assert_eq!(top_level_count("let a = 1;", &plan), 0);
    }

    #[test]
    fn test_deletes_in_reverse_order() {
        let source = "aaXbbYcc";
        let mut plan = EditPlan::new();
        plan.delete(Span::new(2, 3));
        plan.delete(Span::new(5, 6));
        assert_eq!(apply(source, &plan), "aabbcc");
        assert_eq!(top_level_count(source, &plan), 2);
    }

    #[test]
    fn test_fragments_replace_range() {
        let source = "x; log(a(1), b(2)); y;";
        let range = Span::new(3, 19);
        let mut plan = EditPlan::new();
        plan.delete(range);
        plan.retain(
            range,
            vec![fragment(source, "a(1)"), fragment(source, "b(2)")],
        );
        assert_eq!(apply(source, &plan), "x; a(1), b(2) y;");
    }

    #[test]
    fn test_nested_ranges_apply_once() {
        let source = "0123456789";
        let mut plan = EditPlan::new();
        plan.delete(Span::new(2, 8));
        plan.delete(Span::new(3, 5));
        assert_eq!(apply(source, &plan), "0189");
        assert_eq!(top_level_count(source, &plan), 1);
    }

    #[test]
    fn test_fragment_with_inner_deletion() {
        let source = "log(keep(log(1)));";
        let outer = Span::new(0, source.len());
        let inner_start = source.find("log(1)").unwrap();
        let mut plan = EditPlan::new();
        plan.delete(outer);
        plan.delete(Span::new(inner_start, inner_start + "log(1)".len()));
        plan.retain(outer, vec![fragment(source, "keep(log(1))")]);
        assert_eq!(apply(source, &plan), "keep()");
    }

    #[test]
    fn test_multibyte_text_is_preserved() {
        let source = "é; drop; ü";
        let start = source.find("drop;").unwrap();
        let mut plan = EditPlan::new();
        plan.delete(Span::new(start, start + "drop;".len()));
        assert_eq!(apply(source, &plan), "é;  ü");
    }

    #[test]
    fn test_whole_document_range() {
        let source = "gone();";
        let mut plan = EditPlan::new();
        plan.delete(Span::new(0, source.len()));
        assert_eq!(apply(source, &plan), "");
    }
}
