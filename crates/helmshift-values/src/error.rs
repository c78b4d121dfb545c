//! Engine error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValuesError {
    #[error("data map cannot be null")]
    NilDataMap,

    #[error("empty path")]
    EmptyPath,

    #[error("error parsing path part '{part}': {reason}")]
    PathParsing { part: String, reason: String },

    #[error("negative array index {index}")]
    NegativeArrayIndex { index: i64 },

    #[error("path element '{key}' exists but is not an array")]
    NotAnArray { key: String },

    #[error("cannot traverse through non-map at '{segment}' which holds {kind}")]
    NonMapTraversal { segment: String, kind: &'static str },

    #[error("path not found: segment '{path}' missing")]
    PathNotFound { path: String },

    #[error("array index out of bounds: index {index} requested, length is {length}")]
    ArrayIndexOutOfBounds { index: i64, length: usize },

    #[error("cannot traverse through non-map or non-array at path '{path}'")]
    NonMapOrArrayTraversal { path: String },
}

pub type Result<T> = std::result::Result<T, ValuesError>;
