// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a node in a coin hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// One node of the input hierarchy: a group of outputs or a single output.
///
/// Deserializes from `{ "id": 1, "name": "...", "value": 123, "children": [...] }`
/// with `value` and `children` optional. A node with an empty `children` list
/// is a leaf.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoinNode {
    /// Unique identifier, used for selection.
    pub id: NodeId,
    /// Display label.
    pub name: String,
    /// Own value (for outputs, the amount). Missing counts as zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Nested nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

impl CoinNode {
    /// A leaf node with a value.
    #[must_use]
    pub fn leaf(id: impl Into<NodeId>, name: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value: Some(value),
            children: Vec::new(),
        }
    }

    /// A group node without a value of its own.
    #[must_use]
    pub fn group(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        children: impl IntoIterator<Item = Self>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value: None,
            children: children.into_iter().collect(),
        }
    }

    /// Returns `true` if this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Own value plus the total of every descendant.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.value.unwrap_or(0.0) + self.children.iter().map(Self::total_value).sum::<f64>()
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_include_group_values() {
        let mut tree = CoinNode::group(1, "root", [
            CoinNode::leaf(2, "a", 3.0),
            CoinNode::group(3, "g", [CoinNode::leaf(4, "b", 4.0)]),
        ]);
        assert_eq!(tree.total_value(), 7.0);
        tree.value = Some(1.0);
        assert_eq!(tree.total_value(), 8.0);
        assert_eq!(tree.count(), 4);
    }

    #[test]
    fn display_id() {
        assert_eq!(NodeId(12).to_string(), "#12");
    }
}
