//! In-memory [`Connection`] that records every statement instead of running it.
//!
//! Queued row sets are handed out by `fetch_all` in FIFO order (empty when the
//! queue runs dry). Each `execute` reports one affected row and hands out the
//! next insert id, starting at 1.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{Connection, Outcome};
use crate::{Result, Rows, Value};

#[derive(Debug, Default)]
pub struct MockConnection {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    statements: Vec<(String, Vec<Value>)>,
    results: VecDeque<Rows>,
    next_insert_id: i64,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the rows returned by the next `fetch_all`.
    pub fn push_rows(&self, rows: Rows) {
        self.state().results.push_back(rows);
    }

    /// Every statement seen so far, in call order.
    pub fn statements(&self) -> Vec<(String, Vec<Value>)> {
        self.state().statements.clone()
    }

    pub fn last_statement(&self) -> Option<(String, Vec<Value>)> {
        self.state().statements.last().cloned()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, sql: &str, params: &[Value]) -> MutexGuard<'_, State> {
        log::debug!("{sql}");
        log::trace!("{params:?}");
        let mut state = self.state();
        state.statements.push((sql.to_string(), params.to_vec()));
        state
    }
}

impl Connection for MockConnection {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<Outcome> {
        let mut state = self.record(sql, params);
        state.next_insert_id += 1;
        Ok(Outcome {
            rows_affected: 1,
            last_insert_id: Some(state.next_insert_id),
        })
    }

    fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Rows> {
        let mut state = self.record(sql, params);
        Ok(state.results.pop_front().unwrap_or_default())
    }
}
