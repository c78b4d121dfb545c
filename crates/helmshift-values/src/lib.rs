//! Helmshift Values - Path-addressed tree engine for Helm override values
//!
//! This crate is the write/read/merge core under every override helmshift
//! generates:
//! - `Path`/`Segment`: the dotted path language (`spec.containers[0].image`)
//! - `set_value_at_path`: writes with auto-vivification and array growth
//! - `get_value_at_path`: mutation-free reads
//! - `merge_values`: recursive map merge with replace-on-conflict
//! - `deep_clone`: structurally independent tree copies
//! - `Values`: a container tying the above to one tree under construction

pub mod error;
pub mod path;
pub mod tree;
pub mod values;

pub use error::{Result, ValuesError};
pub use path::{Path, Segment};
pub use tree::{deep_clone, get_value_at_path, merge_values, set_value_at_path};
pub use values::Values;
