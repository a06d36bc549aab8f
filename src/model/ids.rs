// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// A stable identifier shared between the model and the render boundary.
///
/// This is intentionally std-only and does not enforce any particular format;
/// it only enforces that the id is a non-empty token without `/` or whitespace,
/// so ids survive verbatim through flat source records, minted nested-form ids,
/// and the serialized scene output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_id_token(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    ContainsSlash,
    ContainsWhitespace,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("id must not be empty"),
            Self::ContainsSlash => f.write_str("id must not contain '/'"),
            Self::ContainsWhitespace => f.write_str("id must not contain whitespace"),
        }
    }
}

impl std::error::Error for IdError {}

fn validate_id_token(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.contains('/') {
        return Err(IdError::ContainsSlash);
    }
    if value.chars().any(char::is_whitespace) {
        return Err(IdError::ContainsWhitespace);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdTag {}
pub type NodeId = Id<NodeIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeIdTag {}
pub type EdgeId = Id<EdgeIdTag>;

impl Id<NodeIdTag> {
    /// Mints the deterministic id for a nested-form node from its traversal
    /// path of sibling indices (`[0]` is the root, `[0, 2, 1]` the second child
    /// of the root's third child).
    pub fn from_path(path: &[usize]) -> Self {
        let mut value = String::from("n");
        for (idx, segment) in path.iter().enumerate() {
            if idx > 0 {
                value.push('-');
            }
            value.push_str(&segment.to_string());
        }
        Self {
            value,
            _marker: PhantomData,
        }
    }
}

impl Id<EdgeIdTag> {
    /// The id of the single edge entering `child`. Every non-root node has
    /// exactly one incoming edge, so the child id identifies it.
    pub fn for_child(child: &NodeId) -> Self {
        Self {
            value: format!("e-{child}"),
            _marker: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EdgeId, Id, IdError, NodeId};

    #[test]
    fn id_rejects_empty() {
        let result: Result<Id<()>, _> = Id::new("");
        assert_eq!(result, Err(IdError::Empty));
    }

    #[test]
    fn id_rejects_slash() {
        let result: Result<Id<()>, _> = Id::new("a/b");
        assert_eq!(result, Err(IdError::ContainsSlash));
    }

    #[test]
    fn id_rejects_whitespace() {
        let result: Result<Id<()>, _> = Id::new("a b");
        assert_eq!(result, Err(IdError::ContainsWhitespace));
    }

    #[test]
    fn node_id_from_path_is_deterministic() {
        assert_eq!(NodeId::from_path(&[0]).as_str(), "n0");
        assert_eq!(NodeId::from_path(&[0, 2, 1]).as_str(), "n0-2-1");
        assert_eq!(NodeId::from_path(&[0, 2, 1]), NodeId::from_path(&[0, 2, 1]));
    }

    #[test]
    fn edge_id_for_child_embeds_child_id() {
        let child = NodeId::new("n0-3").expect("node id");
        assert_eq!(EdgeId::for_child(&child).as_str(), "e-n0-3");
    }
}
