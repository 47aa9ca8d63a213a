//! Named-attribute storage with per-type override points.
//!
//! Every record type owns an [`Attributes`] set and a static [`Accessors`]
//! table. Reads and writes by name resolve in a fixed order:
//!
//! 1. an accessor override registered for the name,
//! 2. a shadow property (a struct field named `_<name>`),
//! 3. an entry in the ordered field map,
//! 4. otherwise [`Error::AttributeNotFound`].

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::{Error, Result, Row, Value};

/// Ordered field map. Keys are fixed at construction; writes only replace
/// values of existing keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Attributes {
    fields: Row,
}

impl Attributes {
    pub fn new(fields: Row) -> Self {
        Self { fields }
    }

    /// Generic field read, bypassing overrides and shadows.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Generic field write, bypassing overrides and shadows.
    pub fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
        match self.fields.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Error::attribute_not_found(name)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn first_key(&self) -> Option<&str> {
        self.keys().next()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn as_map(&self) -> &Row {
        &self.fields
    }

    pub fn into_map(self) -> Row {
        self.fields
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Flat JSON object of the fields, in declaration order.
impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.fields).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

pub type Getter<R> = fn(&R) -> Result<Value>;
pub type Setter<R> = fn(&mut R, Value) -> Result<()>;

struct Shadow<R> {
    get: fn(&R) -> &Value,
    get_mut: fn(&mut R) -> &mut Value,
}

/// Per-type dispatch table, built once and read-only afterwards.
pub struct Accessors<R> {
    getters: HashMap<&'static str, Getter<R>>,
    setters: HashMap<&'static str, Setter<R>>,
    shadows: HashMap<&'static str, Shadow<R>>,
}

impl<R> Default for Accessors<R> {
    fn default() -> Self {
        Self {
            getters: HashMap::new(),
            setters: HashMap::new(),
            shadows: HashMap::new(),
        }
    }
}

impl<R> Accessors<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a read override for `name`.
    pub fn getter(mut self, name: &'static str, getter: Getter<R>) -> Self {
        self.getters.insert(name, getter);
        self
    }

    /// Registers a write override for `name`.
    pub fn setter(mut self, name: &'static str, setter: Setter<R>) -> Self {
        self.setters.insert(name, setter);
        self
    }

    /// Registers a shadow property answering to `name`.
    pub fn shadow(
        mut self,
        name: &'static str,
        get: fn(&R) -> &Value,
        get_mut: fn(&mut R) -> &mut Value,
    ) -> Self {
        self.shadows.insert(name, Shadow { get, get_mut });
        self
    }

    pub fn has_getter(&self, name: &str) -> bool {
        self.getters.contains_key(name)
    }

    pub fn has_setter(&self, name: &str) -> bool {
        self.setters.contains_key(name)
    }
}

impl<R: Attributed> Accessors<R> {
    pub fn get(&self, record: &R, name: &str) -> Result<Value> {
        if let Some(getter) = self.getters.get(name) {
            return getter(record);
        }
        if let Some(shadow) = self.shadows.get(name) {
            return Ok((shadow.get)(record).clone());
        }
        record
            .attributes()
            .field(name)
            .cloned()
            .ok_or_else(|| Error::attribute_not_found(name))
    }

    pub fn set(&self, record: &mut R, name: &str, value: Value) -> Result<()> {
        if let Some(setter) = self.setters.get(name) {
            return setter(record, value);
        }
        if let Some(shadow) = self.shadows.get(name) {
            *(shadow.get_mut)(record) = value;
            return Ok(());
        }
        record.attributes_mut().set_field(name, value)
    }

    /// Shadow property or field entry; overrides are not consulted.
    pub fn has(&self, record: &R, name: &str) -> bool {
        self.shadows.contains_key(name) || record.attributes().contains(name)
    }
}

/// A type that owns an [`Attributes`] set and a dispatch table.
///
/// Implemented by `#[derive(Model)]`; implement by hand when the derive does
/// not fit.
pub trait Attributed: Sized + 'static {
    fn attributes(&self) -> &Attributes;

    fn attributes_mut(&mut self) -> &mut Attributes;

    fn accessors() -> &'static Accessors<Self>;

    /// Resolves `name` through override, shadow, then field.
    fn get(&self, name: &str) -> Result<Value> {
        Self::accessors().get(self, name)
    }

    /// Writes `name` through override, shadow, then field.
    fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        Self::accessors().set(self, name, value.into())
    }

    fn has(&self, name: &str) -> bool {
        Self::accessors().has(self, name)
    }
}
