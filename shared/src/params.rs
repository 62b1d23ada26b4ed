//! Parameter sources and the string-only parameter bag built from them.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

use crate::{Error, Result};

/// Synthetic attribute every object source exposes, never copied into a bag
pub const CLASS_ATTRIBUTE: &str = "class";

/// Shape of a parameter source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Key/value mapping, every key is kept
    Map,
    /// Object with named attributes, `class` is skipped
    Object,
}

/// One readable attribute of a parameter source
#[derive(Debug)]
pub struct Attribute {
    pub name: String,
    pub value: Result<Value>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: Ok(value.into()),
        }
    }

    /// Attribute whose value could not be read
    pub fn failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            value: Err(Error::AttributeRead {
                name: name.clone(),
                reason: reason.into(),
            }),
            name,
        }
    }

    /// The value, if it was read and is a string
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Ok(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

/// Anything that can hand out named attributes for a redirect or forward.
///
/// Implemented for string-keyed maps, for the [`Attributes`] builder and for
/// serialisable structs wrapped in [`Bean`].
pub trait ParamSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Object
    }

    /// Attributes in enumeration order. An `Err` means the source could not
    /// be enumerated at all; per-attribute failures live in
    /// [`Attribute::value`].
    fn attributes(&self) -> Result<Vec<Attribute>>;
}

impl ParamSource for Map<String, Value> {
    fn kind(&self) -> SourceKind {
        SourceKind::Map
    }

    fn attributes(&self) -> Result<Vec<Attribute>> {
        Ok(self
            .iter()
            .map(|(k, v)| Attribute::new(k.clone(), v.clone()))
            .collect())
    }
}

impl<V: Clone + Into<Value>> ParamSource for HashMap<String, V> {
    fn kind(&self) -> SourceKind {
        SourceKind::Map
    }

    fn attributes(&self) -> Result<Vec<Attribute>> {
        Ok(self
            .iter()
            .map(|(k, v)| Attribute::new(k.clone(), v.clone()))
            .collect())
    }
}

impl<V: Clone + Into<Value>> ParamSource for BTreeMap<String, V> {
    fn kind(&self) -> SourceKind {
        SourceKind::Map
    }

    fn attributes(&self) -> Result<Vec<Attribute>> {
        Ok(self
            .iter()
            .map(|(k, v)| Attribute::new(k.clone(), v.clone()))
            .collect())
    }
}

#[derive(Debug, Clone)]
enum Entry {
    Value(String, Value),
    Failed(String, String),
}

/// Attribute list supplied by the caller in place of runtime introspection
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    entries: Vec<Entry>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.push(Entry::Value(name.into(), value.into()));
        self
    }

    /// Record an attribute whose read failed
    pub fn with_failed(mut self, name: impl Into<String>, reason: impl Into<String>) -> Self {
        self.entries.push(Entry::Failed(name.into(), reason.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ParamSource for Attributes {
    fn attributes(&self) -> Result<Vec<Attribute>> {
        Ok(self
            .entries
            .iter()
            .map(|e| match e {
                Entry::Value(name, value) => Attribute::new(name.clone(), value.clone()),
                Entry::Failed(name, reason) => Attribute::failed(name.clone(), reason.clone()),
            })
            .collect())
    }
}

/// Object source backed by `serde`: the struct's serialised fields are its
/// readable attributes.
#[derive(Debug, Clone)]
pub struct Bean<T>(pub T);

impl<T: Serialize> ParamSource for Bean<T> {
    fn attributes(&self) -> Result<Vec<Attribute>> {
        match serde_json::to_value(&self.0)? {
            Value::Object(fields) => Ok(fields
                .into_iter()
                .map(|(k, v)| Attribute::new(k, v))
                .collect()),
            _ => Err(Error::NotAnObject),
        }
    }
}

/// String-keyed, string-valued parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParamBag(HashMap<String, String>);

impl ParamBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }
}

impl FromIterator<(String, String)> for ParamBag {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ParamBag {
    type Item = (String, String);
    type IntoIter = std::collections::hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<HashMap<String, String>> for ParamBag {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}
