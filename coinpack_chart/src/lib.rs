// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coinpack Chart: circle-packed views of hierarchical coin/output data.
//!
//! The chart shows spendable outputs as circles whose area is proportional
//! to their value, nested inside circles for their groups. This crate owns
//! the headless parts of that chart:
//!
//! - [`CoinNode`]: the input tree (`{id, name, value?, children?}`, serde-ready).
//! - [`PackLayout`]: hierarchical circle packing into a box with fixed padding
//!   between siblings.
//! - [`PackedChart`]: the laid-out nodes, lookup by id, and hit testing.
//! - [`CoinSelection`]: toggling nodes by id, with a summary for display.
//!
//! Rendering, text and gesture handling live elsewhere. To hit test a touch
//! under a pan/zoom transform, map the touch through the inverse transform
//! first and pass the result to [`PackedChart::hit_test`].
//!
//! ```rust
//! use coinpack_chart::{CoinNode, CoinSelection, NodeId, PackLayout, Toggle};
//! use kurbo::Size;
//!
//! let outputs = CoinNode::group(1, "Spendable Outputs", [
//!     CoinNode::leaf(2, "biggest", 20511.0),
//!     CoinNode::leaf(3, "medium", 743.0),
//!     CoinNode::leaf(4, "small", 343.0),
//! ]);
//! let chart = PackLayout::new(Size::new(390.0, 844.0)).pack(&outputs)?;
//!
//! let mut selection = CoinSelection::new();
//! assert_eq!(selection.toggle(&chart, NodeId(3)), Toggle::Selected);
//! assert_eq!(selection.summary(&chart).selectable, 3);
//! # Ok::<(), coinpack_chart::PackError>(())
//! ```

mod enclose;
mod error;
mod node;
mod pack;
mod selection;
mod siblings;

pub use error::PackError;
pub use node::{CoinNode, NodeId};
pub use pack::{DEFAULT_PADDING, PackLayout, PackedChart, PackedCircle};
pub use selection::{CoinSelection, SelectionSummary, Toggle};
