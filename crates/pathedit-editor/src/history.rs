//! The command history engine: execution, coalescing, undo/redo stacks,
//! and dirty tracking.

use std::mem::discriminant;
use std::time::{Duration, Instant};

use pathedit_core::Document;

use crate::commands::PathCommand;

/// Default window for coalescing repeats of a mergeable command.
pub const DEFAULT_MERGE_TIMEOUT: Duration = Duration::from_millis(500);

const DEFAULT_MAX_HISTORY: usize = 100;

/// The pending, not-yet-committed execution frame.
#[derive(Debug)]
struct Execution {
    title: String,
    command: PathCommand,
    time: Instant,
    merge_timeout: Duration,
}

/// Orchestrates command execution and undo/redo.
///
/// Every `execute` produces a pending frame that stays open for coalescing
/// until a non-matching command, an explicit [`CommandHistory::commit`], a
/// save, or an undo closes it. The undo stack is capped at `max_history`
/// frames, oldest dropped first. A signed step counter tracks how far the
/// document has drifted from the last save point; it is counter-based, so
/// steps that happen to cancel out content-wise still count as
/// modifications.
#[derive(Debug)]
pub struct CommandHistory {
    last_execution: Option<Execution>,
    history: Vec<PathCommand>,
    redo_history: Vec<PathCommand>,
    save_step_counter: i64,
    max_history: usize,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::with_max_history(DEFAULT_MAX_HISTORY)
    }

    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            last_execution: None,
            history: Vec::new(),
            redo_history: Vec::new(),
            save_step_counter: 0,
            max_history,
        }
    }

    /// Executes a command with the default merge window.
    pub fn execute(
        &mut self,
        doc: &mut Document,
        title: impl Into<String>,
        command: impl Into<PathCommand>,
    ) {
        self.execute_with_timeout(doc, title, command, DEFAULT_MERGE_TIMEOUT);
    }

    /// Executes a command. If it reports no effect the command is discarded
    /// entirely. Otherwise it either merges into the pending frame (same
    /// title, same mergeable kind, within the merge window) or commits the
    /// pending frame and becomes the new one. The redo lineage is always
    /// invalidated.
    pub fn execute_with_timeout(
        &mut self,
        doc: &mut Document,
        title: impl Into<String>,
        command: impl Into<PathCommand>,
        merge_timeout: Duration,
    ) {
        let title = title.into();
        let mut command = command.into();
        if !command.execute(doc) {
            return;
        }

        let exe = Execution {
            title,
            command,
            time: Instant::now(),
            merge_timeout,
        };

        let mut merged = false;
        if let Some(last) = self.last_execution.as_mut() {
            if last.title == exe.title
                && exe.command.is_mergeable()
                && last.command.is_mergeable()
                && discriminant(&last.command) == discriminant(&exe.command)
                && exe.time.duration_since(last.time) < exe.merge_timeout
                && last.command.merge(&exe.command)
            {
                // sliding window: a successful merge keeps the frame open
                last.time = exe.time;
                merged = true;
            }
        }
        if !merged {
            self.commit();
            tracing::debug!(title = %exe.title, "execute");
            self.last_execution = Some(exe);
        }

        self.redo_history.clear();
    }

    /// Closes the pending frame into the undo stack.
    pub fn commit(&mut self) {
        if let Some(exe) = self.last_execution.take() {
            self.history.push(exe.command);
            self.save_step_counter += 1;
            if self.history.len() > self.max_history {
                self.history.remove(0);
            }
        }
    }

    /// Undoes the most recent step, committing any in-progress coalescable
    /// frame first. Replaces the document selection with the command's
    /// affected entities when it exposes them.
    pub fn undo(&mut self, doc: &mut Document) {
        self.commit();
        if let Some(mut command) = self.history.pop() {
            command.undo(doc);
            if let Some(entities) = command.entities() {
                doc.set_selected(entities);
            }
            self.redo_history.push(command);
            self.save_step_counter -= 1;
        }
        tracing::debug!(
            undo = self.history.len(),
            redo = self.redo_history.len(),
            "undo"
        );
    }

    /// Redoes the most recently undone step.
    pub fn redo(&mut self, doc: &mut Document) {
        if let Some(mut command) = self.redo_history.pop() {
            command.redo(doc);
            if let Some(entities) = command.entities() {
                doc.set_selected(entities);
            }
            self.history.push(command);
            self.save_step_counter += 1;
        }
        tracing::debug!(
            undo = self.history.len(),
            redo = self.redo_history.len(),
            "redo"
        );
    }

    /// Drops all history, e.g. when the document is replaced.
    pub fn clear_history(&mut self) {
        self.last_execution = None;
        self.history.clear();
        self.redo_history.clear();
        self.save_step_counter = 0;
    }

    /// Marks the current state as the clean baseline.
    pub fn save(&mut self) {
        self.commit();
        self.save_step_counter = 0;
    }

    /// Whether the document has stepped away from the last save point.
    pub fn is_modified(&mut self) -> bool {
        self.commit();
        self.save_step_counter != 0
    }

    pub fn can_undo(&self) -> bool {
        self.last_execution.is_some() || !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_history.is_empty()
    }

    /// Number of undoable steps, including the pending frame.
    pub fn undo_count(&self) -> usize {
        self.history.len() + usize::from(self.last_execution.is_some())
    }

    pub fn redo_count(&self) -> usize {
        self.redo_history.len()
    }

    /// Adjusts the undo stack cap, trimming oldest entries if needed.
    pub fn set_max_history(&mut self, max_history: usize) {
        self.max_history = max_history;
        while self.history.len() > self.max_history {
            self.history.remove(0);
        }
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}
