//! The `db` module holds the attribute container, the record mapper, the
//! query builder and the connection contract they all execute against.

use std::sync::Arc;

use crate::{Result, Rows, Value};

/// Named-attribute storage and dispatch.
pub mod attributes;

/// Active-record CRUD and upsert.
pub mod model;

/// Ready-made record type with a runtime table name.
pub mod record;

/// SQL rendering and the select-query builder.
pub mod query;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub const PLACEHOLDER: &str = "?";

/// What an executed statement reports back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    pub rows_affected: u64,
    /// Identifier generated by the most recent insert, when the store has one.
    pub last_insert_id: Option<i64>,
}

/// The store collaborator every operation runs against.
///
/// `sql` carries positional `?` placeholders; `params` binds them in order.
/// Implementations must be safe for however the host shares them; the core
/// adds no locking of its own.
pub trait Connection {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<Outcome>;

    fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Rows>;
}

impl<C: Connection + ?Sized> Connection for &C {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<Outcome> {
        (**self).execute(sql, params)
    }

    fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Rows> {
        (**self).fetch_all(sql, params)
    }
}

impl<C: Connection + ?Sized> Connection for Arc<C> {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<Outcome> {
        (**self).execute(sql, params)
    }

    fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Rows> {
        (**self).fetch_all(sql, params)
    }
}
