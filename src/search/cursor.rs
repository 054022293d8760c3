//! Bounded find cursor
//!
//! Visits text-bearing runs in traversal order (forward or reverse), applies
//! the pattern matcher to each, and reports the first match found before a
//! limit location is passed. The caller-facing contract:
//!
//! - One cursor per search invocation; start and limit never change after
//!   construction.
//! - Each [`FindCursor::search`] call returns a [`Step`]: keep going, stop
//!   with a match, or stop because the limit was passed.
//! - Once the limit has been passed the cursor is terminal; the traversal
//!   driver must not call `search` again.
//!
//! The limit policy that keeps a wrapped search from looping forever lives
//! in [`FindCursor::passed_limit`]; the `has_wrapped` flag is what turns the
//! pre-limit fast path off once the traversal has gone past the document
//! boundary and is re-approaching the limit from the other side.

use crate::models::document::{ObjId, PropTag, RichText};
use crate::models::location::{CharRange, Location, PathStep};
use crate::text::pattern::{MatchRange, Pattern};
use crate::text::source::RunSource;

/// Traversal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Address of one text-bearing run within the document tree
///
/// Maintained by the traversal driver as its descent stack; offsets are not
/// part of the address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunAddress {
    pub root: ObjId,
    pub path: Vec<PathStep>,
    pub tag: PropTag,
    pub occurrence: usize,
}

impl RunAddress {
    pub fn new(root: ObjId, path: Vec<PathStep>, tag: PropTag, occurrence: usize) -> Self {
        Self {
            root,
            path,
            tag,
            occurrence,
        }
    }

    /// Check whether this address names the run a location lies in
    pub fn names(&self, loc: &Location) -> bool {
        self.root == loc.root
            && self.tag == loc.tag
            && self.occurrence == loc.occurrence
            && self.path == loc.path
    }

    /// Build a location for a char range within this run
    pub fn location(&self, range: CharRange) -> Location {
        Location::new(self.root, self.path.clone(), self.tag, self.occurrence, range)
    }
}

/// Outcome of one `search` call
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Nothing found in this run; visit the next one
    Continue,

    /// Search is over: `Some` carries the match, `None` means the limit was
    /// passed without one
    Stop(Option<Location>),
}

/// Search state for one find invocation
pub struct FindCursor<'p> {
    pattern: &'p dyn Pattern,
    direction: Direction,
    start: Option<Location>,
    limit: Option<Location>,
    has_wrapped: bool,
    stopped_at_limit: bool,
    location_found: Option<Location>,
}

impl<'p> FindCursor<'p> {
    pub fn new(pattern: &'p dyn Pattern, direction: Direction) -> Self {
        Self {
            pattern,
            direction,
            start: None,
            limit: None,
            has_wrapped: false,
            stopped_at_limit: false,
            location_found: None,
        }
    }

    /// Reverse-direction cursor (find previous)
    pub fn reverse(pattern: &'p dyn Pattern) -> Self {
        Self::new(pattern, Direction::Reverse)
    }

    /// Forward-direction cursor (find next)
    pub fn forward(pattern: &'p dyn Pattern) -> Self {
        Self::new(pattern, Direction::Forward)
    }

    /// Resume point: the run and offset the previous find ended at
    pub fn with_start(mut self, start: Location) -> Self {
        self.start = Some(start);
        self
    }

    /// Stop boundary: the search ends once this location is passed
    pub fn with_limit(mut self, limit: Location) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The match recorded by this search, if any
    pub fn location_found(&self) -> Option<&Location> {
        self.location_found.as_ref()
    }

    /// True once the limit has been passed; terminal
    pub fn stopped_at_limit(&self) -> bool {
        self.stopped_at_limit
    }

    pub fn has_wrapped(&self) -> bool {
        self.has_wrapped
    }

    /// Record that the traversal wrapped past the document boundary
    ///
    /// Called by the traversal driver, at most once per search.
    pub fn mark_wrapped(&mut self) {
        debug_assert!(!self.has_wrapped, "traversal wrapped twice");
        self.has_wrapped = true;
    }

    /// Examine one text-bearing run
    ///
    /// Invoked by the traversal driver once per run, with `at` reflecting
    /// the run's position in the tree.
    pub fn search(&mut self, run: &RichText, at: &RunAddress) -> Step {
        debug_assert!(
            !self.stopped_at_limit,
            "search called after the limit was passed"
        );
        if self.stopped_at_limit {
            return Step::Stop(None);
        }

        let source = RunSource::new(run);
        let origin = self.scan_origin(&source, at);

        let hit = match self.direction {
            Direction::Reverse => self.pattern.find_backward(&source, origin),
            Direction::Forward => self.pattern.find_forward(&source, origin),
        };

        if self.passed_limit(at, hit) {
            self.stopped_at_limit = true;
            return Step::Stop(None);
        }

        if let Some(m) = hit {
            let found = at.location(CharRange::new(m.begin, m.end));
            self.location_found = Some(found.clone());
            return Step::Stop(Some(found));
        }

        Step::Continue
    }

    /// Limit policy: has the search reached or passed the stop boundary?
    ///
    /// `candidate` is the match produced for the current run, or `None` when
    /// the run's remaining text held no match. Rules, in order:
    ///
    /// 1. No limit configured: never passed; the caller wants an unbounded
    ///    search and stops by other means.
    /// 2. A start is configured in the limit's own run, strictly before the
    ///    limit in traversal order, and the traversal has not wrapped yet:
    ///    the limit cannot have been reached. For a reverse search that
    ///    means the limit sits after the start in document order, so a
    ///    backward scan only comes back to it once it has wrapped past the
    ///    document start; mirrored for forward.
    /// 3. The current run is not the limit's run: the limit is elsewhere.
    /// 4. Same run as the limit: reverse passes once the candidate begins at
    ///    or before the limit's end; forward passes once it ends at or
    ///    after the limit's end. No candidate at all means the remaining
    ///    text is exhausted, which also passes.
    pub fn passed_limit(&self, at: &RunAddress, candidate: Option<MatchRange>) -> bool {
        let limit = match &self.limit {
            Some(limit) => limit,
            None => return false,
        };

        if let Some(start) = &self.start {
            if !self.has_wrapped
                && start.same_run(limit)
                && self.limit_lies_beyond(start, limit)
            {
                return false;
            }
        }

        if !at.names(limit) {
            return false;
        }

        match candidate {
            None => true,
            Some(m) => match self.direction {
                Direction::Reverse => m.begin <= limit.range.end,
                Direction::Forward => m.end >= limit.range.end,
            },
        }
    }

    /// True when the limit is only reachable after wrapping, given the start
    fn limit_lies_beyond(&self, start: &Location, limit: &Location) -> bool {
        match self.direction {
            Direction::Reverse => start.precedes(limit),
            Direction::Forward => limit.precedes(start),
        }
    }

    /// Scan origin for the current run
    ///
    /// The run holding the start location resumes at the start's offset
    /// (begin for reverse, end for forward) until the traversal wraps; every
    /// other run scans from its direction-appropriate edge.
    fn scan_origin(&self, source: &RunSource<'_>, at: &RunAddress) -> usize {
        if !self.has_wrapped {
            if let Some(start) = &self.start {
                if at.names(start) {
                    let resume = match self.direction {
                        Direction::Reverse => start.range.begin,
                        Direction::Forward => start.range.end,
                    };
                    debug_assert!(
                        resume <= source.char_len(),
                        "start location offset lies outside its run"
                    );
                    return resume.min(source.char_len());
                }
            }
        }
        match self.direction {
            Direction::Reverse => source.char_len(),
            Direction::Forward => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::pattern::LiteralPattern;

    fn addr(occurrence: usize) -> RunAddress {
        RunAddress::new(ObjId(1), Vec::new(), PropTag(100), occurrence)
    }

    fn loc(occurrence: usize, begin: usize, end: usize) -> Location {
        Location::in_root(ObjId(1), PropTag(100), occurrence, CharRange::new(begin, end))
    }

    #[test]
    fn test_no_limit_never_passes() {
        let pattern = LiteralPattern::new("x").unwrap();
        let cursor = FindCursor::reverse(&pattern);

        assert!(!cursor.passed_limit(&addr(0), None));
        assert!(!cursor.passed_limit(&addr(0), Some(MatchRange::new(0, 1))));
        assert!(!cursor.passed_limit(&addr(5), Some(MatchRange::new(99, 100))));
    }

    #[test]
    fn test_exact_run_limit_reverse() {
        let pattern = LiteralPattern::new("x").unwrap();
        let cursor = FindCursor::reverse(&pattern).with_limit(loc(0, 8, 10));

        // Candidate beginning at or before the limit's end has crossed it
        assert!(cursor.passed_limit(&addr(0), Some(MatchRange::new(10, 13))));
        assert!(cursor.passed_limit(&addr(0), Some(MatchRange::new(4, 7))));
        // Candidate strictly beyond the limit's end is still in bounds
        assert!(!cursor.passed_limit(&addr(0), Some(MatchRange::new(11, 14))));
        // No match left in the run: the limit is passed
        assert!(cursor.passed_limit(&addr(0), None));
    }

    #[test]
    fn test_exact_run_limit_forward() {
        let pattern = LiteralPattern::new("x").unwrap();
        let cursor = FindCursor::forward(&pattern).with_limit(loc(0, 8, 10));

        // Candidate ending at the limit's end has reached it
        assert!(cursor.passed_limit(&addr(0), Some(MatchRange::new(7, 10))));
        // Candidate ending short of the limit's end has not
        assert!(!cursor.passed_limit(&addr(0), Some(MatchRange::new(6, 9))));
        assert!(cursor.passed_limit(&addr(0), None));
    }

    #[test]
    fn test_path_mismatch_bypasses_limit() {
        let pattern = LiteralPattern::new("x").unwrap();
        let cursor = FindCursor::reverse(&pattern).with_limit(loc(1, 8, 10));

        // Same object and tag, different occurrence: the limit is elsewhere
        assert!(!cursor.passed_limit(&addr(2), Some(MatchRange::new(0, 1))));
        assert!(!cursor.passed_limit(&addr(2), None));
    }

    #[test]
    fn test_pre_limit_fast_path_reverse() {
        // Start strictly before the limit in traversal order, no wrap yet:
        // never passed, even in the limit's own run with a candidate that
        // rule 4 would otherwise reject.
        let pattern = LiteralPattern::new("x").unwrap();
        let cursor = FindCursor::reverse(&pattern)
            .with_start(loc(0, 2, 2))
            .with_limit(loc(0, 9, 10));

        assert!(!cursor.passed_limit(&addr(0), Some(MatchRange::new(0, 1))));
        assert!(!cursor.passed_limit(&addr(0), None));
    }

    #[test]
    fn test_fast_path_off_after_wrap() {
        let pattern = LiteralPattern::new("x").unwrap();
        let mut cursor = FindCursor::reverse(&pattern)
            .with_start(loc(0, 2, 2))
            .with_limit(loc(0, 9, 10));

        cursor.mark_wrapped();
        assert!(cursor.has_wrapped());
        assert!(cursor.passed_limit(&addr(0), Some(MatchRange::new(0, 1))));
        assert!(cursor.passed_limit(&addr(0), None));
    }

    #[test]
    fn test_fast_path_inactive_when_start_at_or_past_limit() {
        let pattern = LiteralPattern::new("x").unwrap();
        // Start at the same offset as the limit: not strictly before it
        let cursor = FindCursor::reverse(&pattern)
            .with_start(loc(0, 9, 9))
            .with_limit(loc(0, 9, 10));

        assert!(cursor.passed_limit(&addr(0), Some(MatchRange::new(3, 4))));
    }

    #[test]
    fn test_resume_from_start_reverse() {
        // Run text: "cat cat cat"; start at offset 8 means only the matches
        // ending at or before 8 are eligible on the first visit.
        let text = RichText::plain("cat cat cat");
        let pattern = LiteralPattern::new("cat").unwrap();
        let mut cursor = FindCursor::reverse(&pattern).with_start(loc(0, 8, 8));

        match cursor.search(&text, &addr(0)) {
            Step::Stop(Some(found)) => assert_eq!(found.range, CharRange::new(4, 7)),
            other => panic!("expected a match, got {:?}", other),
        }
        assert_eq!(
            cursor.location_found().map(|l| l.range),
            Some(CharRange::new(4, 7))
        );
    }

    #[test]
    fn test_non_start_run_scans_from_end_reverse() {
        let text = RichText::plain("cat cat cat");
        let pattern = LiteralPattern::new("cat").unwrap();
        // Start lies in occurrence 1; occurrence 0 scans from its end.
        let mut cursor = FindCursor::reverse(&pattern).with_start(loc(1, 2, 2));

        match cursor.search(&text, &addr(0)) {
            Step::Stop(Some(found)) => assert_eq!(found.range, CharRange::new(8, 11)),
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[test]
    fn test_resume_from_start_forward() {
        let text = RichText::plain("cat cat cat");
        let pattern = LiteralPattern::new("cat").unwrap();
        // Forward resumes at the start's end offset
        let mut cursor = FindCursor::forward(&pattern).with_start(loc(0, 0, 3));

        match cursor.search(&text, &addr(0)) {
            Step::Stop(Some(found)) => assert_eq!(found.range, CharRange::new(4, 7)),
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[test]
    fn test_limit_stop_suppresses_match() {
        // The candidate crosses the limit, so the cursor stops without
        // recording it.
        let text = RichText::plain("cat and more");
        let pattern = LiteralPattern::new("cat").unwrap();
        let mut cursor = FindCursor::reverse(&pattern).with_limit(loc(0, 9, 11));

        assert_eq!(cursor.search(&text, &addr(0)), Step::Stop(None));
        assert!(cursor.stopped_at_limit());
        assert!(cursor.location_found().is_none());
    }

    #[test]
    fn test_continue_when_run_has_no_match() {
        let text = RichText::plain("nothing here");
        let pattern = LiteralPattern::new("cat").unwrap();
        let mut cursor = FindCursor::reverse(&pattern);

        assert_eq!(cursor.search(&text, &addr(0)), Step::Continue);
        assert!(!cursor.stopped_at_limit());
        assert!(cursor.location_found().is_none());
    }

    #[test]
    fn test_wrapped_visit_of_start_run_scans_full_run() {
        // After wrapping, the start run no longer resumes at the start
        // offset; matches past the start become reachable.
        let text = RichText::plain("cat cat cat");
        let pattern = LiteralPattern::new("cat").unwrap();
        let mut cursor = FindCursor::reverse(&pattern).with_start(loc(0, 2, 2));

        cursor.mark_wrapped();
        match cursor.search(&text, &addr(0)) {
            Step::Stop(Some(found)) => assert_eq!(found.range, CharRange::new(8, 11)),
            other => panic!("expected a match, got {:?}", other),
        }
    }
}
