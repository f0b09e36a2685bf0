use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::value::{IntoValue, Value};

/// Column to value mapping kept sorted by column name, so that rendering
/// order never depends on insertion order.
#[derive(Debug, Default, Clone)]
pub struct Row {
    values: IndexMap<SmolStr, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    pub fn field<K, V>(&mut self, column: K, value: V) -> &mut Self
    where
        K: Into<SmolStr>,
        V: IntoValue,
    {
        self.values.insert_sorted(column.into(), value.into_value());
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &SmolStr> {
        self.values.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
