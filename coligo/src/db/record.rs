use std::fmt;

use lazy_static::lazy_static;
use serde::Serialize;

use super::attributes::{Accessors, Attributed, Attributes};
use super::model::Model;

lazy_static! {
    static ref ACCESSORS: Accessors<Record> = Accessors::new();
}

/// A record with no accessor overrides, for tables that need no custom type.
///
/// The primary key defaults to the first field; prefer setting it explicitly
/// with [`Record::with_primary_key`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    table: String,
    primary_key: Option<String>,
    attributes: Attributes,
}

impl Record {
    pub fn new(table: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            table: table.into(),
            primary_key: None,
            attributes,
        }
    }

    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = Some(primary_key.into());
        self
    }
}

impl Attributed for Record {
    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    fn accessors() -> &'static Accessors<Self> {
        &ACCESSORS
    }
}

impl Model for Record {
    fn table(&self) -> &str {
        &self.table
    }

    fn primary_key(&self) -> &str {
        match &self.primary_key {
            Some(primary_key) => primary_key.as_str(),
            None => self.attributes.first_key().unwrap_or_default(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.attributes, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::mock::MockConnection;
    use crate::{fields, Error, Row, Value};
    use serde_json::json;

    fn row(value: Value) -> Row {
        serde_json::from_value(value).unwrap()
    }

    fn user() -> Record {
        Record::new(
            "users",
            fields!(id = 7, name = "joe", email = "joe@example.com", age = 19),
        )
    }

    #[test]
    fn test_primary_key_defaults_to_first_field() {
        assert_eq!(user().primary_key(), "id");
        assert_eq!(user().with_primary_key("email").primary_key(), "email");
    }

    #[test]
    fn test_create_omits_empty_fields() {
        let conn = MockConnection::new();
        let record = Record::new(
            "users",
            fields!(id = Value::Null, name = "joe", email = "", age = 0),
        );

        assert_eq!(record.create(&conn).unwrap(), Some(1));
        let (sql, params) = conn.last_statement().unwrap();
        assert_eq!(sql, "INSERT INTO `users` (`name`,`age`) VALUES (?,?)");
        assert_eq!(params, vec![json!("joe"), json!(0)]);
    }

    #[test]
    fn test_create_returns_generated_id() {
        let conn = MockConnection::new();
        let first = Record::new("users", fields!(id = Value::Null, name = "ann"));
        let second = Record::new("users", fields!(id = Value::Null, name = "bob"));

        assert_eq!(first.create(&conn).unwrap(), Some(1));
        assert_eq!(second.create(&conn).unwrap(), Some(2));
        assert_eq!(second.save(&conn).unwrap(), Some(3));
    }

    #[test]
    fn test_retrieve_hydrates_fields() {
        let conn = MockConnection::new();
        conn.push_rows(vec![row(json!({
            "id": 7, "name": "Joe", "email": "joe@example.org", "age": 20
        }))]);

        let mut record = user();
        record.retrieve(&conn).unwrap();

        let (sql, params) = conn.last_statement().unwrap();
        assert_eq!(
            sql,
            "SELECT `id`,`name`,`email`,`age` FROM `users` WHERE `id` = ? LIMIT 1"
        );
        assert_eq!(params, vec![json!(7)]);
        assert_eq!(record.get("name").unwrap(), json!("Joe"));
        assert_eq!(record.get("age").unwrap(), json!(20));
    }

    #[test]
    fn test_retrieve_not_found() {
        let conn = MockConnection::new();
        let mut record = user();
        let err = record.retrieve(&conn).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("record ID = 7"), "{err}");
    }

    #[test]
    fn test_retrieve_unknown_column() {
        let conn = MockConnection::new();
        conn.push_rows(vec![row(json!({"id": 7, "nickname": "jo"}))]);
        let mut record = user();
        assert!(record.retrieve(&conn).unwrap_err().is_attribute_not_found());
    }

    #[test]
    fn test_key_checks_issue_no_statement() {
        let conn = MockConnection::new();
        let mut blank = Record::new("users", fields!(id = "", name = "joe"));
        let mut null = Record::new("users", fields!(id = Value::Null, name = "joe"));
        let mut missing = Record::new("users", fields!(name = "joe")).with_primary_key("id");

        for record in [&mut blank, &mut null, &mut missing] {
            assert!(matches!(
                record.retrieve(&conn),
                Err(Error::PrimaryKeyNotSet { .. })
            ));
            assert!(matches!(
                record.update(&conn),
                Err(Error::PrimaryKeyNotSet { .. })
            ));
            assert!(matches!(
                record.delete(&conn),
                Err(Error::PrimaryKeyNotSet { .. })
            ));
        }
        assert!(conn.statements().is_empty());
    }

    #[test]
    fn test_update_writes_every_field() {
        let conn = MockConnection::new();
        let mut record = user();
        record.set("email", "").unwrap();
        record.set("age", Value::Null).unwrap();

        assert_eq!(record.update(&conn).unwrap(), json!(7));
        let (sql, params) = conn.last_statement().unwrap();
        assert_eq!(
            sql,
            "UPDATE `users` SET `id` = ?, `name` = ?, `email` = ?, `age` = ? WHERE `id` = ? LIMIT 1"
        );
        assert_eq!(
            params,
            vec![json!(7), json!("joe"), json!(""), Value::Null, json!(7)]
        );
    }

    #[test]
    fn test_delete() {
        let conn = MockConnection::new();
        user().delete(&conn).unwrap();
        let (sql, params) = conn.last_statement().unwrap();
        assert_eq!(sql, "DELETE FROM `users` WHERE `id` = ? LIMIT 1");
        assert_eq!(params, vec![json!(7)]);
    }

    #[test]
    fn test_save_binds_values_twice() {
        let conn = MockConnection::new();
        let record = Record::new("users", fields!(id = 7, name = "joe", email = Value::Null));

        assert_eq!(record.save(&conn).unwrap(), Some(1));
        let (sql, params) = conn.last_statement().unwrap();
        assert_eq!(
            sql,
            "INSERT INTO `users` (`id`,`name`) VALUES (?,?) ON DUPLICATE KEY UPDATE `id` = ?, `name` = ?"
        );
        assert_eq!(params, vec![json!(7), json!("joe"), json!(7), json!("joe")]);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            user().to_string(),
            r#"{"id":7,"name":"joe","email":"joe@example.com","age":19}"#
        );
    }
}
