use super::orders::OrderType;
use super::response::{null_as_default, string_or_number};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskComment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub task_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentThread {
    Loading,
    Loaded(Vec<TaskComment>),
    Failed,
}

impl CommentThread {
    /// All comments of an order belong to one task; new comments go there too
    pub fn task_id(&self) -> Option<&str> {
        match self {
            Self::Loaded(comments) => comments
                .first()
                .map(|c| c.task_id.as_str())
                .filter(|id| !id.is_empty()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// `load` is set when the thread has not been fetched yet
    Opened { load: bool },
    Closed,
    /// Row has no comment thread
    Ignored,
}

/// Which order row is expanded, plus the comment threads fetched so far.
/// At most one row is open at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccordionState {
    enabled: bool,
    open: Option<String>,
    threads: HashMap<String, CommentThread>,
}

impl Default for AccordionState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AccordionState {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            open: None,
            threads: HashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_expandable(&self, order_type: OrderType) -> bool {
        self.enabled && order_type.supports_comments()
    }

    pub fn open_row(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn is_open(&self, order_id: &str) -> bool {
        self.open.as_deref() == Some(order_id)
    }

    pub fn thread(&self, order_id: &str) -> Option<&CommentThread> {
        self.threads.get(order_id)
    }

    pub fn toggle(&mut self, order_id: &str, order_type: OrderType) -> ToggleOutcome {
        if !self.is_expandable(order_type) {
            return ToggleOutcome::Ignored;
        }
        if self.is_open(order_id) {
            self.open = None;
            return ToggleOutcome::Closed;
        }
        self.open = Some(order_id.to_string());
        let load = matches!(self.threads.get(order_id), None | Some(CommentThread::Failed));
        if load {
            self.threads
                .insert(order_id.to_string(), CommentThread::Loading);
        }
        ToggleOutcome::Opened { load }
    }

    /// Mark a thread for a forced reload, e.g. after a comment was added
    pub fn begin_reload(&mut self, order_id: &str) {
        self.threads
            .insert(order_id.to_string(), CommentThread::Loading);
    }

    pub fn finish_load(&mut self, order_id: &str, result: Result<Vec<TaskComment>>) {
        let thread = match result {
            Ok(comments) => CommentThread::Loaded(comments),
            Err(_) => CommentThread::Failed,
        };
        self.threads.insert(order_id.to_string(), thread);
    }

    /// Rows are rebuilt on every filter change; forget all of them
    pub fn close_all(&mut self) {
        self.open = None;
        self.threads.clear();
    }
}
