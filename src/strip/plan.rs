//! Edit plan
//!
//! The complete description of one rewrite: which byte ranges to delete and
//! which source fragments to re-insert where a deleted range used to start.
//! Built once by the walker and only read afterwards.

use crate::parse::Span;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// A byte range marked for removal, identified by its `(start, end)` pair
pub type DeleteRange = Span;

/// Source text that must survive the deletion of the range containing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeepFragment {
    /// Where the fragment sits in the original text
    pub span: Span,
    /// Copied out of the original text when the fragment was found
    pub text: String,
}

/// Delete ranges plus the fragments to re-insert for each of them
#[derive(Debug, Clone, Default)]
pub struct EditPlan {
    ranges: BTreeSet<DeleteRange>,
    retention: HashMap<DeleteRange, Vec<KeepFragment>>,
}

impl EditPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a range for deletion. Returns false if it was already marked.
    pub fn delete(&mut self, range: DeleteRange) -> bool {
        self.ranges.insert(range)
    }

    /// Record the fragments to re-insert when `range` is deleted
    pub fn retain(&mut self, range: DeleteRange, fragments: Vec<KeepFragment>) {
        if fragments.is_empty() {
            return;
        }
        self.retention.insert(range, fragments);
    }

    pub fn ranges(&self) -> impl DoubleEndedIterator<Item = &DeleteRange> {
        self.ranges.iter()
    }

    pub fn fragments(&self, range: &DeleteRange) -> Option<&[KeepFragment]> {
        self.retention.get(range).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Outermost ranges lying inside `window`, in ascending order.
    ///
    /// A range nested in another one is dropped, as is a range that
    /// straddles the end of an earlier kept range.
    pub fn outermost_within(&self, window: Span) -> Vec<DeleteRange> {
        let mut inside: Vec<DeleteRange> = self
            .ranges
            .iter()
            .filter(|range| range.start <= range.end && window.contains(range))
            .copied()
            .collect();
        // Outer ranges sort before the ranges they contain
        inside.sort_by_key(|range| (range.start, std::cmp::Reverse(range.end)));

        let mut kept: Vec<DeleteRange> = Vec::with_capacity(inside.len());
        for range in inside {
            match kept.last() {
                Some(last) if range.start < last.end => {
                    if !last.contains(&range) {
                        tracing::warn!(
                            start = range.start,
                            end = range.end,
                            "Skipping delete range that overlaps another"
                        );
                    }
                }
                _ => kept.push(range),
            }
        }
        kept
    }

    /// True if a marked range other than `window` itself lies inside `window`
    pub fn has_ranges_within(&self, window: Span) -> bool {
        self.ranges
            .range(Span::new(window.start, 0)..)
            .take_while(|range| range.start <= window.end)
            .any(|range| *range != window && window.contains(range))
    }
}

/// A logging reference the walker left in place, 1-based position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceSite {
    pub line: usize,
    pub column: usize,
}

impl ReferenceSite {
    /// Locate byte `offset` of `source` as a line/column pair
    pub fn at(source: &str, offset: usize) -> Self {
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        Self {
            line,
            column: before[line_start..].chars().count() + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_dedups_by_identity() {
        let mut plan = EditPlan::new();
        assert!(plan.delete(Span::new(1, 4)));
        assert!(!plan.delete(Span::new(1, 4)));
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_retain_ignores_empty_fragment_lists() {
        let mut plan = EditPlan::new();
        plan.delete(Span::new(0, 3));
        plan.retain(Span::new(0, 3), Vec::new());
        assert!(plan.fragments(&Span::new(0, 3)).is_none());
    }

    #[test]
    fn test_outermost_drops_nested_ranges() {
        let mut plan = EditPlan::new();
        plan.delete(Span::new(0, 20));
        plan.delete(Span::new(5, 10));
        plan.delete(Span::new(0, 8));
        plan.delete(Span::new(25, 30));
        let top = plan.outermost_within(Span::new(0, 40));
        assert_eq!(top, vec![Span::new(0, 20), Span::new(25, 30)]);
    }

    #[test]
    fn test_outermost_respects_window() {
        let mut plan = EditPlan::new();
        plan.delete(Span::new(0, 20));
        plan.delete(Span::new(5, 10));
        assert_eq!(plan.outermost_within(Span::new(4, 12)), vec![Span::new(5, 10)]);
    }

    #[test]
    fn test_outermost_skips_straddling_ranges() {
        let mut plan = EditPlan::new();
        plan.delete(Span::new(0, 10));
        plan.delete(Span::new(8, 15));
        assert_eq!(plan.outermost_within(Span::new(0, 15)), vec![Span::new(0, 10)]);
    }

    #[test]
    fn test_has_ranges_within() {
        let mut plan = EditPlan::new();
        plan.delete(Span::new(4, 6));
        assert!(plan.has_ranges_within(Span::new(2, 8)));
        assert!(!plan.has_ranges_within(Span::new(4, 6)));
        assert!(!plan.has_ranges_within(Span::new(7, 9)));
        assert!(!plan.has_ranges_within(Span::new(0, 5)));
    }

    #[test]
    fn test_reference_site_position() {
        let source = "let a;\nfoo(console.log);";
        let offset = source.find("console").unwrap();
        assert_eq!(ReferenceSite::at(source, offset), ReferenceSite { line: 2, column: 5 });
        assert_eq!(ReferenceSite::at(source, 0), ReferenceSite { line: 1, column: 1 });
    }
}
