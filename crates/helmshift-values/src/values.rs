//! Override values container
//!
//! `Values` owns one override tree under construction. Each tree belongs to
//! exactly one override-generation operation; nothing here shares state, so
//! `&mut` exclusivity is the only synchronization. Writes are not atomic —
//! snapshot with [`Values::deep_clone`] first when a failed write must not
//! leave traces.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::Result;
use crate::path::Path;
use crate::tree;

/// A map/array/scalar tree addressed through the dotted path language.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values(pub JsonValue);

impl Values {
    /// Create an empty tree (an empty map).
    pub fn new() -> Self {
        Self(JsonValue::Object(Map::new()))
    }

    /// Wrap an already-decoded tree.
    pub fn from_value(value: JsonValue) -> Self {
        Self(value)
    }

    /// Write `value` at a dotted path string, e.g. `image.tag` or
    /// `spec.containers[0].image`.
    pub fn set(&mut self, path: &str, value: JsonValue) -> Result<()> {
        let path = Path::parse(path)?;
        tree::set_value_at_path(&mut self.0, &path, value)
    }

    /// Write `value` at an already-parsed path.
    pub fn set_at(&mut self, path: &Path, value: JsonValue) -> Result<()> {
        tree::set_value_at_path(&mut self.0, path, value)
    }

    /// Read the value at a dotted path string.
    pub fn get(&self, path: &str) -> Result<&JsonValue> {
        let path = Path::parse(path)?;
        tree::get_value_at_path(&self.0, &path)
    }

    /// Read the value at an already-parsed path.
    pub fn get_at(&self, path: &Path) -> Result<&JsonValue> {
        tree::get_value_at_path(&self.0, path)
    }

    /// Deep-merge another tree into this one.
    ///
    /// Rules:
    /// - nested maps merge recursively
    /// - everything else is replaced by the overlay, arrays included
    pub fn merge(&mut self, overlay: &Values) {
        tree::merge_values(&mut self.0, &overlay.0);
    }

    /// Merge multiple trees in order, later ones winning.
    pub fn merge_all(values: Vec<Values>) -> Self {
        let mut result = Values::new();
        for v in values {
            result.merge(&v);
        }
        result
    }

    /// A structurally independent copy: deeply equal, shares no container.
    pub fn deep_clone(&self) -> Values {
        Values(tree::deep_clone(&self.0))
    }

    pub fn is_empty(&self) -> bool {
        match &self.0 {
            JsonValue::Object(map) => map.is_empty(),
            JsonValue::Null => true,
            _ => false,
        }
    }

    /// Borrow the inner tree.
    pub fn inner(&self) -> &JsonValue {
        &self.0
    }

    /// Unwrap into the inner tree.
    pub fn into_inner(self) -> JsonValue {
        self.0
    }
}

impl Default for Values {
    fn default() -> Self {
        Self::new()
    }
}
