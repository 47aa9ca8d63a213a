//! Statement shapes used by the record mapper.

use super::Statement;
use crate::Value;

/// `INSERT INTO `table` (`c1`,`c2`) VALUES (?,?)`
pub fn to_insert_query(table: &str, fields: Vec<(String, Value)>) -> Statement {
    let mut statement = Statement::new();
    write_insert(&mut statement, table, fields);
    statement
}

/// `SELECT `c1`,`c2` FROM `table` WHERE `pk` = ? LIMIT 1`
pub fn to_select_query<'a>(
    table: &str,
    columns: impl IntoIterator<Item = &'a str>,
    primary_key: &str,
    key: Value,
) -> Statement {
    let mut statement = Statement::new();
    statement
        .push("SELECT ")
        .push_list(columns, ",", |s, column| {
            s.push_ident(column);
        })
        .push(" FROM ")
        .push_ident(table);
    write_key_filter(&mut statement, primary_key, key);
    statement
}

/// `UPDATE `table` SET `c1` = ?, `c2` = ? WHERE `pk` = ? LIMIT 1`
pub fn to_update_query(
    table: &str,
    fields: Vec<(String, Value)>,
    primary_key: &str,
    key: Value,
) -> Statement {
    let mut statement = Statement::new();
    statement.push("UPDATE ").push_ident(table).push(" SET ");
    write_assignments(&mut statement, fields);
    write_key_filter(&mut statement, primary_key, key);
    statement
}

/// `DELETE FROM `table` WHERE `pk` = ? LIMIT 1`
pub fn to_delete_query(table: &str, primary_key: &str, key: Value) -> Statement {
    let mut statement = Statement::new();
    statement.push("DELETE FROM ").push_ident(table);
    write_key_filter(&mut statement, primary_key, key);
    statement
}

/// Insert clause followed by `ON DUPLICATE KEY UPDATE` over the same fields;
/// every value is bound twice, insert side first.
pub fn to_upsert_query(table: &str, fields: Vec<(String, Value)>) -> Statement {
    let mut statement = Statement::new();
    write_insert(&mut statement, table, fields.clone());
    statement.push(" ON DUPLICATE KEY UPDATE ");
    write_assignments(&mut statement, fields);
    statement
}

fn write_insert(statement: &mut Statement, table: &str, fields: Vec<(String, Value)>) {
    let (columns, values): (Vec<String>, Vec<Value>) = fields.into_iter().unzip();
    statement
        .push("INSERT INTO ")
        .push_ident(table)
        .push(" (")
        .push_list(&columns, ",", |s, column| {
            s.push_ident(column);
        })
        .push(") VALUES (")
        .push_list(values, ",", |s, value| {
            s.push_param(value);
        })
        .push(")");
}

fn write_assignments(statement: &mut Statement, fields: Vec<(String, Value)>) {
    statement.push_list(fields, ", ", |s, (column, value)| {
        s.push_ident(&column).push(" = ").push_param(value);
    });
}

fn write_key_filter(statement: &mut Statement, primary_key: &str, key: Value) {
    statement
        .push(" WHERE ")
        .push_ident(primary_key)
        .push(" = ")
        .push_param(key)
        .push(" LIMIT 1");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields() -> Vec<(String, Value)> {
        vec![("f1".into(), json!("a")), ("f2".into(), json!(2))]
    }

    #[test]
    fn test_insert() {
        let statement = to_insert_query("table", fields());
        assert_eq!(statement.sql, "INSERT INTO `table` (`f1`,`f2`) VALUES (?,?)");
        assert_eq!(statement.params, vec![json!("a"), json!(2)]);
    }

    #[test]
    fn test_select() {
        let statement = to_select_query("table", ["f1", "f2"], "pk", json!(9));
        assert_eq!(
            statement.sql,
            "SELECT `f1`,`f2` FROM `table` WHERE `pk` = ? LIMIT 1"
        );
        assert_eq!(statement.params, vec![json!(9)]);
    }

    #[test]
    fn test_update_binds_key_last() {
        let statement = to_update_query("table", fields(), "pk", json!(9));
        assert_eq!(
            statement.sql,
            "UPDATE `table` SET `f1` = ?, `f2` = ? WHERE `pk` = ? LIMIT 1"
        );
        assert_eq!(statement.params, vec![json!("a"), json!(2), json!(9)]);
    }

    #[test]
    fn test_delete() {
        let statement = to_delete_query("table", "pk", json!(9));
        assert_eq!(statement.sql, "DELETE FROM `table` WHERE `pk` = ? LIMIT 1");
        assert_eq!(statement.params, vec![json!(9)]);
    }

    #[test]
    fn test_upsert_binds_twice() {
        let statement = to_upsert_query("table", fields());
        assert_eq!(
            statement.sql,
            "INSERT INTO `table` (`f1`,`f2`) VALUES (?,?) ON DUPLICATE KEY UPDATE `f1` = ?, `f2` = ?"
        );
        assert_eq!(
            statement.params,
            vec![json!("a"), json!(2), json!("a"), json!(2)]
        );
        assert_eq!(statement.placeholder_count(), 4);
    }
}
