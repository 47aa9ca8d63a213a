//! SQL rendering.
//!
//! Every statement is written through [`Statement`], which appends a
//! placeholder and its value in the same call so the i-th `?` always binds
//! the i-th parameter.

use std::fmt;

use crate::{utils, Value};

use super::PLACEHOLDER;

pub mod builder;
pub mod condition;
pub mod statement;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
    inline: bool,
}

impl Statement {
    pub fn new() -> Self {
        Self::default()
    }

    /// A statement that writes values as quoted literals instead of
    /// placeholders. For display only; nothing is escaped.
    pub fn inlined() -> Self {
        Self {
            inline: true,
            ..Self::default()
        }
    }

    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Back-quoted identifier, embedded back-quotes doubled.
    pub fn push_ident(&mut self, name: &str) -> &mut Self {
        self.sql.push('`');
        self.sql.push_str(&name.replace('`', "``"));
        self.sql.push('`');
        self
    }

    pub fn push_param(&mut self, value: Value) -> &mut Self {
        if self.inline {
            self.sql.push_str(&utils::to_literal(&value));
        } else {
            self.sql.push_str(PLACEHOLDER);
        }
        self.params.push(value);
        self
    }

    /// Writes `items` separated by `separator`.
    pub fn push_list<T>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        separator: &str,
        mut write: impl FnMut(&mut Self, T),
    ) -> &mut Self {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.sql.push_str(separator);
            }
            write(self, item);
        }
        self
    }

    pub fn placeholder_count(&self) -> usize {
        self.sql.matches(PLACEHOLDER).count()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_follow_placeholders() {
        let mut statement = Statement::new();
        statement
            .push("SELECT * FROM ")
            .push_ident("users")
            .push(" WHERE ")
            .push_ident("id")
            .push(" = ")
            .push_param(json!(7));
        assert_eq!(statement.sql, "SELECT * FROM `users` WHERE `id` = ?");
        assert_eq!(statement.params, vec![json!(7)]);
        assert_eq!(statement.placeholder_count(), statement.params.len());
    }

    #[test]
    fn test_ident_escaping() {
        let mut statement = Statement::new();
        statement.push_ident("odd`name");
        assert_eq!(statement.sql, "`odd``name`");
    }

    #[test]
    fn test_inlined_values() {
        let mut statement = Statement::inlined();
        statement
            .push("a = ")
            .push_param(json!("x"))
            .push(" AND b = ")
            .push_param(Value::Null);
        assert_eq!(statement.sql, "a = 'x' AND b = NULL");
        assert_eq!(statement.params.len(), 2);
    }
}
