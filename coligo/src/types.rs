/// A single field or parameter value. Scalars are `Null`, `Bool`, `Number`
/// and `String`; arrays and objects travel as JSON text.
pub use serde_json::Value;

/// One result row: column name to value, in select order.
pub type Row = serde_json::Map<String, Value>;

pub type Rows = Vec<Row>;
