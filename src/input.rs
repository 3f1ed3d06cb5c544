//! Partial node input authored by callers
//!
//! Fields are either plain JSON values or computed thunks. Thunks model
//! values that may change between passes (reactive page data): resolution
//! calls each exactly once per pass and works on the snapshot.

use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde_json::{Map, Value};

use crate::node::Node;

/// A single input field
#[derive(Clone)]
pub enum Field {
    Static(Value),
    Computed(Rc<dyn Fn() -> Value>),
}

impl Field {
    /// Unwrap-if-callable
    pub fn snapshot(&self) -> Value {
        match self {
            Field::Static(value) => value.clone(),
            Field::Computed(f) => f(),
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Static(value) => write!(f, "Static({})", value),
            Field::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Ordered partial fields for one node
#[derive(Debug, Clone, Default)]
pub struct NodeInput {
    fields: Vec<(String, Field)>,
}

impl NodeInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a plain value, replacing an earlier field with the same key
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key.into(), Field::Static(value.into()));
        self
    }

    /// Set a value computed at resolution time
    pub fn computed<F>(mut self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> Value + 'static,
    {
        self.insert(key.into(), Field::Computed(Rc::new(f)));
        self
    }

    /// Set a date field from a chrono timestamp
    pub fn date<Tz: TimeZone>(self, key: impl Into<String>, date: DateTime<Tz>) -> Self {
        let iso = date.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true);
        self.set(key, iso)
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, f)| f)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Evaluate every field once, preserving authoring order
    pub fn snapshot(&self) -> Node {
        self.fields
            .iter()
            .map(|(key, field)| (key.clone(), field.snapshot()))
            .collect()
    }

    fn insert(&mut self, key: String, field: Field) {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = field,
            None => self.fields.push((key, field)),
        }
    }
}

impl From<Map<String, Value>> for NodeInput {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            fields: map
                .into_iter()
                .map(|(k, v)| (k, Field::Static(v)))
                .collect(),
        }
    }
}

/// Objects become fields; any other value yields an empty input
impl From<Value> for NodeInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => map.into(),
            _ => Self::default(),
        }
    }
}

impl From<()> for NodeInput {
    fn from(_: ()) -> Self {
        Self::default()
    }
}
