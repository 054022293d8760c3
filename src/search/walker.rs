//! Reverse/forward traversal over a document's text runs
//!
//! Flattens the tree into its text-bearing runs in document order and drives
//! a [`FindCursor`] over them: start at the run holding the start location,
//! walk to the document edge, wrap once, and come back to the start run.
//! The driver ceases calling the cursor the moment it reports a stop, so a
//! cursor whose limit has been passed is never consulted again.

use std::collections::HashMap;

use crate::models::document::{DocObject, Document, ObjId, PropTag, PropValue, RichText};
use crate::models::location::{Location, PathStep};
use crate::text::pattern::Pattern;

use super::cursor::{Direction, FindCursor, RunAddress, Step};

/// One flattened text run with its tree address
#[derive(Debug)]
pub struct FlatRun<'d> {
    pub address: RunAddress,
    pub text: &'d RichText,
}

/// Terminal state of a document search
#[derive(Debug, Clone, PartialEq)]
pub enum FindOutcome {
    /// A match was found before the limit
    Found(Location),

    /// The limit was passed without a match
    StoppedAtLimit,

    /// Every run was visited without a match or a limit stop
    Exhausted,
}

/// Flatten a document into its text-bearing runs in document order
///
/// Depth-first over each root, properties in declaration order. Occurrence
/// indices count instances of a tag per parent object; path-step indices
/// count children of a tag per parent object.
pub fn collect_runs(doc: &Document) -> Vec<FlatRun<'_>> {
    let mut runs = Vec::new();
    for root in &doc.roots {
        let mut path = Vec::new();
        collect_object(root.id, root, &mut path, &mut runs);
    }
    runs
}

fn collect_object<'d>(
    root: ObjId,
    obj: &'d DocObject,
    path: &mut Vec<PathStep>,
    runs: &mut Vec<FlatRun<'d>>,
) {
    let mut text_occurrences: HashMap<PropTag, usize> = HashMap::new();
    let mut child_indices: HashMap<PropTag, usize> = HashMap::new();

    for prop in &obj.props {
        match &prop.value {
            PropValue::Text(text) => {
                let slot = text_occurrences.entry(prop.tag).or_insert(0);
                let occurrence = *slot;
                *slot += 1;
                runs.push(FlatRun {
                    address: RunAddress::new(root, path.clone(), prop.tag, occurrence),
                    text,
                });
            }
            PropValue::Children(children) => {
                for child in children {
                    let slot = child_indices.entry(prop.tag).or_insert(0);
                    let index = *slot;
                    *slot += 1;
                    path.push(PathStep::new(prop.tag, index));
                    collect_object(root, child, path, runs);
                    path.pop();
                }
            }
        }
    }
}

/// Run a bounded find over a whole document
///
/// Visits runs in `direction` order starting at the run containing `start`
/// (or the direction-appropriate document edge when `start` is absent),
/// wraps once past the document boundary, and finishes back at the start
/// run. Without a start there is nothing to resume from and nothing to wrap
/// to, so the document gets a single pass.
///
/// Termination is bounded by one visit per run on each side of the wrap;
/// no run is visited twice after wrapping.
pub fn find_in_document(
    doc: &Document,
    pattern: &dyn Pattern,
    direction: Direction,
    start: Option<Location>,
    limit: Option<Location>,
) -> FindOutcome {
    let runs = collect_runs(doc);
    if runs.is_empty() {
        return FindOutcome::Exhausted;
    }

    let start_index = match &start {
        Some(start) => {
            let index = runs.iter().position(|r| r.address.names(start));
            if index.is_none() {
                // Precondition violation: the start does not address any run
                debug_assert!(false, "start location does not match the document tree");
                log::warn!("start location addresses no run; searching the whole document");
            }
            index
        }
        None => None,
    };

    let mut cursor = FindCursor::new(pattern, direction);
    if let Some(start) = start {
        cursor = cursor.with_start(start);
    }
    if let Some(limit) = limit {
        cursor = cursor.with_limit(limit);
    }

    match start_index {
        Some(at) => {
            let first_leg: Vec<usize> = match direction {
                Direction::Reverse => (0..=at).rev().collect(),
                Direction::Forward => (at..runs.len()).collect(),
            };
            if let Some(outcome) = visit(&mut cursor, &runs, &first_leg) {
                return outcome;
            }

            cursor.mark_wrapped();
            log::debug!("find wrapped past the document boundary");

            let second_leg: Vec<usize> = match direction {
                Direction::Reverse => (at..runs.len()).rev().collect(),
                Direction::Forward => (0..=at).collect(),
            };
            if let Some(outcome) = visit(&mut cursor, &runs, &second_leg) {
                return outcome;
            }
        }
        None => {
            let order: Vec<usize> = match direction {
                Direction::Reverse => (0..runs.len()).rev().collect(),
                Direction::Forward => (0..runs.len()).collect(),
            };
            if let Some(outcome) = visit(&mut cursor, &runs, &order) {
                return outcome;
            }
        }
    }

    FindOutcome::Exhausted
}

fn visit(cursor: &mut FindCursor<'_>, runs: &[FlatRun<'_>], order: &[usize]) -> Option<FindOutcome> {
    for &index in order {
        let run = &runs[index];
        match cursor.search(run.text, &run.address) {
            Step::Continue => {}
            Step::Stop(Some(found)) => return Some(FindOutcome::Found(found)),
            Step::Stop(None) => return Some(FindOutcome::StoppedAtLimit),
        }
    }
    None
}
