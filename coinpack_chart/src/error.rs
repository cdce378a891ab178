// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

use crate::NodeId;

/// Reasons a hierarchy cannot be packed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PackError {
    /// The layout box has a non-positive or non-finite dimension.
    #[error("layout size {width}x{height} must be positive and finite")]
    InvalidSize {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
    /// Padding is negative or non-finite.
    #[error("padding {0} must be non-negative and finite")]
    InvalidPadding(f64),
    /// A node carries a negative value.
    #[error("node {id} has negative value {value}")]
    NegativeValue {
        /// The offending node.
        id: NodeId,
        /// Its value.
        value: f64,
    },
    /// A node carries NaN or an infinity.
    #[error("node {id} has a non-finite value")]
    NonFiniteValue {
        /// The offending node.
        id: NodeId,
    },
    /// Two nodes share an identifier.
    #[error("node id {id} appears more than once")]
    DuplicateId {
        /// The repeated identifier.
        id: NodeId,
    },
    /// The hierarchy sums to zero, so there is nothing to size circles by.
    #[error("hierarchy has no positive value to pack")]
    EmptyHierarchy,
    /// The enclosing-circle search failed to converge on a basis.
    #[error("could not find an enclosing circle for sibling group")]
    DegenerateEnclosure,
}
