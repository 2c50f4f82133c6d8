//! Tests for the history module

use super::*;

/// Host that records everything the history reports
#[derive(Debug)]
struct Log {
    trail: Vec<String>,
    unsaved: usize,
    menu: MenuLabels,
    max: usize,
}

impl Log {
    fn with_capacity(max: usize) -> Self {
        Self {
            trail: Vec::new(),
            unsaved: 0,
            menu: MenuLabels::default(),
            max,
        }
    }
}

impl HistoryHost for Log {
    fn mark_unsaved(&mut self) {
        self.unsaved += 1;
    }

    fn update_menu(&mut self, labels: &MenuLabels) {
        self.menu = labels.clone();
    }

    fn max_history(&self) -> usize {
        self.max
    }
}

/// Pushes its name onto the trail, pops it on revert
#[derive(Debug)]
struct Step(&'static str);

impl Command<Log> for Step {
    fn apply(&mut self, log: &mut Log) {
        log.trail.push(self.0.to_string());
    }

    fn revert(&mut self, log: &mut Log) {
        let popped = log.trail.pop();
        assert_eq!(popped.as_deref(), Some(self.0), "revert out of order");
    }

    fn description(&self) -> String {
        self.0.to_string()
    }
}

fn step(name: &'static str) -> Box<dyn Command<Log>> {
    Box::new(Step(name))
}

fn committed(names: &[&'static str], max: usize) -> (History<Log>, Log) {
    let mut history = History::new();
    let mut log = Log::with_capacity(max);
    for name in names {
        history.commit(step(name), CommitMode::ApplyNow, &mut log);
    }
    (history, log)
}

// ============================================================================
// Commit / undo / redo
// ============================================================================

#[test]
fn test_commit_applies_and_moves_cursor() {
    let (history, log) = committed(&["A", "B"], 10);
    assert_eq!(log.trail, vec!["A", "B"]);
    assert_eq!(history.cursor(), Some(1));
    assert!(history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn test_already_applied_is_recorded_without_apply() {
    let mut history = History::new();
    let mut log = Log::with_capacity(10);
    log.trail.push("A".to_string());
    history.commit(step("A"), CommitMode::AlreadyApplied, &mut log);

    assert_eq!(log.trail, vec!["A"]);
    assert_eq!(log.unsaved, 1);
    assert!(history.undo(&mut log));
    assert!(log.trail.is_empty());
}

#[test]
fn test_undo_redo_walks_cursor() {
    let (mut history, mut log) = committed(&["A", "B", "C"], 10);

    assert!(history.undo(&mut log));
    assert_eq!(history.cursor(), Some(1));
    assert!(history.undo(&mut log));
    assert!(history.undo(&mut log));
    assert_eq!(history.cursor(), None);
    assert!(log.trail.is_empty());

    assert!(history.redo(&mut log));
    assert_eq!(history.cursor(), Some(0));
    assert_eq!(log.trail, vec!["A"]);
}

#[test]
fn test_commit_after_undo_truncates_redo_branch() {
    let (mut history, mut log) = committed(&["A", "B", "C"], 10);
    history.undo(&mut log);
    history.undo(&mut log);
    history.commit(step("D"), CommitMode::ApplyNow, &mut log);

    assert_eq!(history.descriptions(), vec!["A", "D"]);
    assert_eq!(history.cursor(), Some(1));
    assert!(!history.can_redo());
    assert_eq!(log.trail, vec!["A", "D"]);
}

#[test]
fn test_boundary_calls_are_noops() {
    let mut history: History<Log> = History::new();
    let mut log = Log::with_capacity(10);
    assert!(!history.undo(&mut log));
    assert!(!history.redo(&mut log));
    assert_eq!(log.unsaved, 0);

    history.commit(step("A"), CommitMode::ApplyNow, &mut log);
    assert!(!history.redo(&mut log));
    assert_eq!(log.unsaved, 1);
    assert_eq!(log.trail, vec!["A"]);
}

#[test]
fn test_every_transition_marks_unsaved() {
    let (mut history, mut log) = committed(&["A"], 10);
    history.undo(&mut log);
    history.redo(&mut log);
    assert_eq!(log.unsaved, 3);
}

// ============================================================================
// Capacity
// ============================================================================

#[test]
fn test_capacity_evicts_oldest() {
    let (history, _) = committed(&["A", "B", "C", "D"], 3);
    assert_eq!(history.descriptions(), vec!["B", "C", "D"]);
    assert_eq!(history.cursor(), Some(2));
}

#[test]
fn test_evicted_entries_cannot_be_undone() {
    let (mut history, mut log) = committed(&["A", "B", "C"], 2);
    assert!(history.undo(&mut log));
    assert!(history.undo(&mut log));
    assert!(!history.undo(&mut log));
    // A was evicted and stays applied
    assert_eq!(log.trail, vec!["A"]);
}

#[test]
fn test_capacity_change_applies_on_next_commit() {
    let (mut history, mut log) = committed(&["A", "B", "C", "D"], 10);
    log.max = 2;
    assert_eq!(history.len(), 4);
    history.commit(step("E"), CommitMode::ApplyNow, &mut log);
    assert_eq!(history.descriptions(), vec!["D", "E"]);
}

// ============================================================================
// Labels
// ============================================================================

#[test]
fn test_plain_labels_follow_cursor() {
    let (mut history, mut log) = committed(&["Rename Style \"x\""], 10);
    assert_eq!(log.menu.undo_text, "Undo Rename Style \"x\"");
    assert!(log.menu.undo_enabled);
    assert_eq!(log.menu.redo_text, "Redo");
    assert!(!log.menu.redo_enabled);

    history.undo(&mut log);
    assert_eq!(log.menu.undo_text, "Undo");
    assert!(!log.menu.undo_enabled);
    assert_eq!(log.menu.redo_text, "Redo Rename Style \"x\"");
    assert!(log.menu.redo_enabled);
}

#[test]
fn test_quoted_labels() {
    let mut history = History::with_format(LabelFormat::Quoted);
    let mut log = Log::with_capacity(10);
    history.commit(step("Delete TextButton"), CommitMode::ApplyNow, &mut log);
    assert_eq!(log.menu.undo_text, "Undo \"Delete TextButton\"");
    assert_eq!(log.menu.redo_text, "Redo");

    history.undo(&mut log);
    assert_eq!(log.menu.undo_text, "Undo");
    assert_eq!(log.menu.redo_text, "Redo \"Delete TextButton\"");
}

#[test]
fn test_clear_resets_and_publishes() {
    let (mut history, mut log) = committed(&["A", "B"], 10);
    history.undo(&mut log);
    let unsaved = log.unsaved;
    history.clear(&mut log);

    assert!(history.is_empty());
    assert_eq!(history.cursor(), None);
    assert_eq!(log.menu, MenuLabels::default());
    assert_eq!(log.unsaved, unsaved);
    // The model is left as it was
    assert_eq!(log.trail, vec!["A"]);
}

// ============================================================================
// BatchCmd
// ============================================================================

#[test]
fn test_batch_reverts_in_reverse_order() {
    let mut batch = BatchCmd::new("Both");
    assert!(batch.is_empty());
    batch.push(step("A"));
    batch.push(step("B"));

    let mut history = History::new();
    let mut log = Log::with_capacity(10);
    history.commit(Box::new(batch), CommitMode::ApplyNow, &mut log);
    assert_eq!(log.trail, vec!["A", "B"]);
    assert_eq!(log.menu.undo_text, "Undo Both");

    // Step::revert asserts LIFO order
    history.undo(&mut log);
    assert!(log.trail.is_empty());
    history.redo(&mut log);
    assert_eq!(log.trail, vec!["A", "B"]);
}
