//! Coligo: active-record persistence over an attribute container
//!
//! This module turns a record's current field values into parameterized
//! INSERT, SELECT, UPDATE, DELETE and upsert statements and writes query
//! results back through attribute dispatch.

use super::attributes::Attributed;
use super::query::{builder, Statement};
use super::Connection;
use crate::{utils, Error, Result, Value};

/// Trait for database model operations.
pub trait Model: Attributed {
    /// Backing table name.
    fn table(&self) -> &str;

    /// Field acting as the row identifier.
    fn primary_key(&self) -> &str;

    /// Raw primary-key value; null, empty or missing fails with
    /// [`Error::PrimaryKeyNotSet`].
    fn key_value(&self) -> Result<Value> {
        match self.attributes().field(self.primary_key()) {
            Some(value) if !utils::is_blank(value) => Ok(value.clone()),
            _ => Err(Error::PrimaryKeyNotSet {
                table: self.table().to_string(),
                primary_key: self.primary_key().to_string(),
            }),
        }
    }

    /// Inserts the non-empty fields and returns the generated identifier.
    ///
    /// Null and empty-string fields are left out of the statement entirely,
    /// so the store applies its column defaults.
    ///
    /// # Example
    /// ```
    /// # #[cfg(feature = "mock")]
    /// # {
    /// use coligo::db::mock::MockConnection;
    /// use coligo::prelude::*;
    ///
    /// let conn = MockConnection::new();
    /// let user = Record::new("users", fields!(id = Value::Null, name = "joe", email = ""));
    /// let id = user.create(&conn).unwrap();
    /// assert_eq!(id, Some(1));
    /// assert_eq!(
    ///     conn.last_statement().unwrap().0,
    ///     "INSERT INTO `users` (`name`) VALUES (?)"
    /// );
    /// # }
    /// ```
    fn create<C: Connection + ?Sized>(&self, conn: &C) -> Result<Option<i64>> {
        let statement = builder::to_insert_query(self.table(), self.present_fields()?);
        Ok(execute(conn, &statement)?.last_insert_id)
    }

    /// Loads the row identified by the primary key into this record.
    ///
    /// Every returned column is written through [`Attributed::set`], so setter
    /// overrides run during hydration.
    fn retrieve<C: Connection + ?Sized>(&mut self, conn: &C) -> Result<()> {
        let key = self.key_value()?;
        let statement = builder::to_select_query(
            self.table(),
            self.attributes().keys(),
            self.primary_key(),
            key.clone(),
        );

        let row = fetch_all(conn, &statement)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::RecordNotFound {
                table: self.table().to_string(),
                key,
            })?;

        for (column, value) in row {
            self.set(&column, value)?;
        }
        Ok(())
    }

    /// Writes every field, empty or not, to the identified row and returns
    /// the key value.
    fn update<C: Connection + ?Sized>(&self, conn: &C) -> Result<Value> {
        let key = self.key_value()?;
        let statement = builder::to_update_query(
            self.table(),
            self.all_fields()?,
            self.primary_key(),
            key.clone(),
        );
        execute(conn, &statement)?;
        Ok(key)
    }

    fn delete<C: Connection + ?Sized>(&self, conn: &C) -> Result<()> {
        let key = self.key_value()?;
        let statement = builder::to_delete_query(self.table(), self.primary_key(), key);
        execute(conn, &statement)?;
        Ok(())
    }

    /// Inserts the non-empty fields, or updates them on the row that already
    /// holds the same unique key. Returns the generated-or-existing identifier.
    fn save<C: Connection + ?Sized>(&self, conn: &C) -> Result<Option<i64>> {
        let statement = builder::to_upsert_query(self.table(), self.present_fields()?);
        Ok(execute(conn, &statement)?.last_insert_id)
    }

    /// Field names and dispatched values, in declaration order.
    fn all_fields(&self) -> Result<Vec<(String, Value)>> {
        self.attributes()
            .keys()
            .map(|name| Ok((name.to_string(), self.get(name)?)))
            .collect()
    }

    /// Like [`Model::all_fields`], without null and empty-string values.
    fn present_fields(&self) -> Result<Vec<(String, Value)>> {
        let mut fields = self.all_fields()?;
        fields.retain(|(_, value)| !utils::is_blank(value));
        Ok(fields)
    }
}

fn execute<C: Connection + ?Sized>(conn: &C, statement: &Statement) -> Result<super::Outcome> {
    conn.execute(&statement.sql, &statement.params)
}

fn fetch_all<C: Connection + ?Sized>(conn: &C, statement: &Statement) -> Result<crate::Rows> {
    conn.fetch_all(&statement.sql, &statement.params)
}
