pub use super::db::{attributes::*, model::Model, query::condition::Logic, record::Record};
pub use super::db::{Connection, Outcome};
pub use super::{fields, Config, Context, Database, Error, Result, SelectQuery};
pub use super::{Row, Rows, Value};
pub use coligo_derive::Model;
