//! Dotted path language for addressing locations inside a value tree
//!
//! A path is a `.`-separated list of segments. A segment is a plain map key,
//! optionally carrying one trailing `[index]` suffix for array access:
//! `spec.containers[0].image`. There is no escape mechanism, so keys that
//! themselves contain `.`, `[`, or `]` cannot be addressed.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ValuesError};

/// One dot-separated unit of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Plain map key.
    Key(String),
    /// Map key followed by an array index, written `key[index]`.
    IndexedKey(String, usize),
}

impl Segment {
    /// The key part of the segment, without any index suffix.
    pub fn name(&self) -> &str {
        match self {
            Segment::Key(key) => key,
            Segment::IndexedKey(key, _) => key,
        }
    }

    /// Parse a single path part, detecting a trailing `[index]` suffix.
    pub fn parse(part: &str) -> Result<Segment> {
        let open = part.rfind('[');
        let closed = part.ends_with(']');

        match (open, closed) {
            (Some(open), true) => {
                // Need at least one index character between the brackets
                if open + 2 >= part.len() {
                    return Err(ValuesError::PathParsing {
                        part: part.to_string(),
                        reason: "malformed brackets".to_string(),
                    });
                }

                let key = &part[..open];
                let index_str = &part[open + 1..part.len() - 1];
                let index: i64 =
                    index_str
                        .parse()
                        .map_err(|_| ValuesError::PathParsing {
                            part: part.to_string(),
                            reason: format!("invalid non-integer array index '{index_str}'"),
                        })?;
                if index < 0 {
                    return Err(ValuesError::NegativeArrayIndex { index });
                }

                Ok(Segment::IndexedKey(key.to_string(), index as usize))
            }
            (None, false) => Ok(Segment::Key(part.to_string())),
            _ => Err(ValuesError::PathParsing {
                part: part.to_string(),
                reason: "mismatched brackets".to_string(),
            }),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::IndexedKey(key, index) => write!(f, "{key}[{index}]"),
        }
    }
}

/// An ordered list of segments addressing a location inside a value tree.
///
/// An empty path addresses the tree itself; writes require at least one
/// segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(Vec<Segment>);

impl Path {
    /// The empty path, addressing the whole tree (reads only).
    pub fn root() -> Self {
        Path(Vec::new())
    }

    /// Parse a dotted path string like `spec.containers[0].image`.
    pub fn parse(input: &str) -> Result<Self> {
        input
            .split('.')
            .map(Segment::parse)
            .collect::<Result<Vec<_>>>()
            .map(Path)
    }

    /// Build a path from already-constructed segments.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Path(segments)
    }

    /// Append one segment.
    pub fn push(&mut self, segment: Segment) {
        self.0.push(segment);
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dot-joined rendering of the first `count` segments, for error context.
    pub(crate) fn join_prefix(&self, count: usize) -> String {
        self.0[..count.min(self.0.len())]
            .iter()
            .map(Segment::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl FromStr for Path {
    type Err = ValuesError;

    fn from_str(input: &str) -> Result<Self> {
        Path::parse(input)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join_prefix(self.0.len()))
    }
}
