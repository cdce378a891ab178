// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{NodeId, PackedChart};

/// What [`CoinSelection::toggle`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    /// The node was added.
    Selected,
    /// The node was removed.
    Deselected,
    /// The node is the root or not part of the chart.
    Ignored,
}

/// Counts shown above the chart ("3 of 12 selected").
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionSummary {
    /// Number of selected nodes.
    pub selected: usize,
    /// Number of nodes that can be selected (everything but the root).
    pub selectable: usize,
    /// Sum of the selected nodes' values.
    pub selected_value: f64,
}

/// The set of chart nodes picked by the user.
///
/// Keys are kept in the order they were selected. The root node can never
/// be selected. Like other selection containers, a revision counter is
/// bumped only when the contents actually change.
#[derive(Clone, Debug, Default)]
pub struct CoinSelection {
    items: Vec<NodeId>,
    revision: u64,
}

impl CoinSelection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            revision: 0,
        }
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of selected nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Selected ids in selection order.
    #[must_use]
    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    /// Returns `true` if `id` is selected.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.items.contains(&id)
    }

    /// Returns the revision counter.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Adds `id` if absent, removes it if present.
    ///
    /// The root and ids that are not in `chart` are ignored.
    pub fn toggle(&mut self, chart: &PackedChart, id: NodeId) -> Toggle {
        if chart.is_root(id) || chart.get(id).is_none() {
            return Toggle::Ignored;
        }
        let toggle = if let Some(idx) = self.items.iter().position(|&item| item == id) {
            self.items.remove(idx);
            Toggle::Deselected
        } else {
            self.items.push(id);
            Toggle::Selected
        };
        self.bump_revision();
        tracing::trace!(%id, ?toggle, "selection toggled");
        toggle
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.bump_revision();
    }

    /// Drops ids that no longer exist in `chart` (for example after re-packing
    /// new data).
    pub fn retain_known(&mut self, chart: &PackedChart) {
        let before = self.items.len();
        self.items
            .retain(|&id| !chart.is_root(id) && chart.get(id).is_some());
        if self.items.len() != before {
            self.bump_revision();
        }
    }

    /// Counts and totals for display.
    #[must_use]
    pub fn summary(&self, chart: &PackedChart) -> SelectionSummary {
        SelectionSummary {
            selected: self.items.len(),
            selectable: chart.len().saturating_sub(1),
            selected_value: self
                .items
                .iter()
                .filter_map(|&id| chart.get(id))
                .map(|c| c.value)
                .sum(),
        }
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
