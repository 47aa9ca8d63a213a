//! Programmatic construction of a SQL `SELECT`.

use std::fmt;

use sqlformat::{FormatOptions, QueryParams};

use super::condition::{Clause, Conditions, Joiner, Logic};
use super::Statement;
use crate::db::Connection;
use crate::{Error, Result, Rows, Value};

/// Source written by the debug rendering when `from()` was never called.
const UNKNOWN_TABLE: &str = "`UNKNOWN_TABLE`";

/// One or many column expressions.
pub trait IntoColumns {
    fn into_columns(self) -> Vec<String>;
}

impl IntoColumns for &str {
    fn into_columns(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoColumns for String {
    fn into_columns(self) -> Vec<String> {
        vec![self]
    }
}

impl<S: Into<String>> IntoColumns for Vec<S> {
    fn into_columns(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String>, const N: usize> IntoColumns for [S; N] {
    fn into_columns(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

/// One value or a list of values to filter against.
pub trait IntoValues {
    fn into_values(self) -> Vec<Value>;
}

impl IntoValues for Value {
    fn into_values(self) -> Vec<Value> {
        vec![self]
    }
}

impl<T: Into<Value>> IntoValues for Vec<T> {
    fn into_values(self) -> Vec<Value> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Value>, const N: usize> IntoValues for [T; N] {
    fn into_values(self) -> Vec<Value> {
        self.into_iter().map(Into::into).collect()
    }
}

macro_rules! scalar_values {
    ($($ty:ty),*) => {
        $(
            impl IntoValues for $ty {
                fn into_values(self) -> Vec<Value> {
                    vec![Value::from(self)]
                }
            }
        )*
    };
}

scalar_values!(&str, String, bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

/// A parameterized `SELECT <columns> FROM <source> WHERE <groups>`.
///
/// # Example
///
/// ```
/// use coligo::db::query::statement::SelectQuery;
///
/// let query = SelectQuery::new()
///     .select(["id", "name"])
///     .from("users")
///     .r#where("role", ["admin", "staff"])
///     .where_not("id", 1)
///     .or_where("name", "root")
///     .unwrap();
///
/// let statement = query.statement().unwrap();
/// assert_eq!(
///     statement.sql,
///     "SELECT id, name FROM users WHERE (role = ? OR role = ?) AND (id != ?) OR (name = ?)"
/// );
/// assert_eq!(statement.params.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectQuery {
    columns: Vec<String>,
    from: Option<String>,
    conditions: Conditions,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds columns; repeated calls accumulate.
    pub fn select(mut self, columns: impl IntoColumns) -> Self {
        self.columns.extend(columns.into_columns());
        self
    }

    /// Sets the source expression, replacing any earlier one. Do not include
    /// the `FROM` keyword.
    pub fn from(mut self, source: impl Into<String>) -> Self {
        self.from = Some(source.into());
        self
    }

    /// Rows where `column` equals any of `values`, AND-combined with earlier groups.
    pub fn r#where(self, column: &str, values: impl IntoValues) -> Self {
        self.where_with(column, values, Logic::Include, false)
    }

    /// Rows where `column` equals none of `values`, AND-combined with earlier groups.
    pub fn where_not(self, column: &str, values: impl IntoValues) -> Self {
        self.where_with(column, values, Logic::Exclude, false)
    }

    /// Adds one clause-group. With `or_group` the group is OR-combined with
    /// the earlier ones; on the first group the flag has no effect.
    pub fn where_with(
        mut self,
        column: &str,
        values: impl IntoValues,
        logic: Logic,
        or_group: bool,
    ) -> Self {
        let joiner = if or_group { Joiner::Or } else { Joiner::And };
        self.conditions
            .push(joiner, Clause::group(column, values.into_values(), logic));
        self
    }

    /// Include-logic group OR-combined with the earlier ones.
    pub fn or_where(self, column: &str, values: impl IntoValues) -> Result<Self> {
        self.or_where_with(column, values, Logic::Include)
    }

    pub fn or_where_with(self, column: &str, values: impl IntoValues, logic: Logic) -> Result<Self> {
        if self.conditions.is_empty() {
            return Err(Error::NoPriorWhereClause);
        }
        Ok(self.where_with(column, values, logic, true))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn source(&self) -> Option<&str> {
        self.from.as_deref()
    }

    /// Bound values in placeholder order.
    pub fn parameters(&self) -> Vec<Value> {
        let mut statement = Statement::new();
        self.conditions.render(&mut statement);
        statement.params
    }

    /// Rendered SQL and parameters; fails when no source was set.
    pub fn statement(&self) -> Result<Statement> {
        let source = self.from.as_deref().ok_or(Error::QueryIncomplete)?;
        let mut statement = Statement::new();
        self.render(&mut statement, source);
        Ok(statement)
    }

    pub fn execute<C: Connection + ?Sized>(&self, conn: &C) -> Result<Rows> {
        let statement = self.statement()?;
        conn.fetch_all(&statement.sql, &statement.params)
    }

    fn render(&self, statement: &mut Statement, source: &str) {
        statement.push("SELECT ");
        if self.columns.is_empty() {
            statement.push("*");
        } else {
            statement.push_list(&self.columns, ", ", |s, column| {
                s.push(column);
            });
        }
        statement.push(" FROM ").push(source);
        if !self.conditions.is_empty() {
            statement.push(" WHERE ");
            self.conditions.render(statement);
        }
    }
}

/// Human-readable SQL with values inlined as quoted literals. Not escaped and
/// never executed. The alternate form (`{:#}`) is pretty-printed.
impl fmt::Display for SelectQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut statement = Statement::inlined();
        self.render(&mut statement, self.from.as_deref().unwrap_or(UNKNOWN_TABLE));
        if f.alternate() {
            let formatted =
                sqlformat::format(&statement.sql, &QueryParams::None, &FormatOptions::default());
            f.write_str(&formatted)
        } else {
            f.write_str(&statement.sql)
        }
    }
}
