// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::{HashMap, HashSet, VecDeque};

use kurbo::{Circle, Point, Rect, Size};

use crate::enclose::{Disc, Lcg};
use crate::siblings::pack_siblings;
use crate::{CoinNode, NodeId, PackError};

/// Padding between sibling circles used by the coin chart.
pub const DEFAULT_PADDING: f64 = 8.0;

/// Hierarchical circle-packing layout.
///
/// Leaves get an area proportional to their value; each group circle
/// encloses its children with `padding` between siblings; the root circle is
/// scaled to fit `size` and centred in it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PackLayout {
    /// Box to fit the root circle into.
    pub size: Size,
    /// Gap between sibling circles, in output units.
    pub padding: f64,
}

impl PackLayout {
    /// A layout for `size` with [`DEFAULT_PADDING`].
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            padding: DEFAULT_PADDING,
        }
    }

    /// Sets the gap between sibling circles.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Lays out `root` and every descendant.
    ///
    /// # Errors
    ///
    /// Returns [`PackError`] if the size or padding is unusable, a value is
    /// negative or non-finite, ids repeat, or the hierarchy sums to zero.
    pub fn pack(&self, root: &CoinNode) -> Result<PackedChart, PackError> {
        let Size { width, height } = self.size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(PackError::InvalidSize { width, height });
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(PackError::InvalidPadding(self.padding));
        }

        let mut slots = flatten(root)?;
        sum_values(&mut slots);
        if slots[0].value <= 0.0 {
            return Err(PackError::EmptyHierarchy);
        }

        for slot in slots.iter_mut().filter(|s| s.children.is_empty()) {
            slot.disc.r = slot.value.max(0.0).sqrt();
        }

        let extent = width.min(height);
        let mut rng = Lcg::new();
        pack_groups(&mut slots, 0.0, &mut rng)?;
        let padding = self.padding * slots[0].disc.r / extent;
        pack_groups(&mut slots, padding, &mut rng)?;

        // Scale into the box; parents precede children in breadth-first order.
        let k = extent / (2.0 * slots[0].disc.r);
        slots[0].disc.x = width / 2.0;
        slots[0].disc.y = height / 2.0;
        for i in 0..slots.len() {
            slots[i].disc.r *= k;
            if let Some(parent) = slots[i].parent {
                let origin = slots[parent].disc;
                slots[i].disc.x = origin.x + k * slots[i].disc.x;
                slots[i].disc.y = origin.y + k * slots[i].disc.y;
            }
        }

        let circles: Vec<PackedCircle> = slots
            .into_iter()
            .map(|slot| PackedCircle {
                id: slot.id,
                name: slot.name,
                depth: slot.depth,
                value: slot.value,
                circle: Circle::new(Point::new(slot.disc.x, slot.disc.y), slot.disc.r),
                parent: slot.parent,
                children: slot.children,
            })
            .collect();
        tracing::debug!(
            nodes = circles.len(),
            width,
            height,
            padding = self.padding,
            "packed hierarchy"
        );
        Ok(PackedChart::new(circles, self.size))
    }
}

/// Working state for one node during layout.
struct Slot {
    id: NodeId,
    name: String,
    depth: usize,
    own: f64,
    value: f64,
    parent: Option<usize>,
    children: Vec<usize>,
    disc: Disc,
}

/// Flattens the tree breadth-first, validating values and ids on the way.
fn flatten(root: &CoinNode) -> Result<Vec<Slot>, PackError> {
    let mut slots: Vec<Slot> = Vec::with_capacity(root.count());
    let mut seen = HashSet::new();
    let mut queue: VecDeque<(&CoinNode, Option<usize>, usize)> = VecDeque::new();
    queue.push_back((root, None, 0));

    while let Some((node, parent, depth)) = queue.pop_front() {
        let own = node.value.unwrap_or(0.0);
        if !own.is_finite() {
            return Err(PackError::NonFiniteValue { id: node.id });
        }
        if own < 0.0 {
            return Err(PackError::NegativeValue {
                id: node.id,
                value: own,
            });
        }
        if !seen.insert(node.id) {
            return Err(PackError::DuplicateId { id: node.id });
        }

        let index = slots.len();
        if let Some(parent) = parent {
            slots[parent].children.push(index);
        }
        slots.push(Slot {
            id: node.id,
            name: node.name.clone(),
            depth,
            own,
            value: 0.0,
            parent,
            children: Vec::new(),
            disc: Disc::default(),
        });
        for child in &node.children {
            queue.push_back((child, Some(index), depth + 1));
        }
    }
    Ok(slots)
}

/// Own value plus descendants, children first.
fn sum_values(slots: &mut [Slot]) {
    for i in (0..slots.len()).rev() {
        let below: f64 = slots[i].children.iter().map(|&c| slots[c].value).sum();
        slots[i].value = slots[i].own + below;
    }
}

/// Packs every group's children, deepest groups first, and sets group radii.
///
/// Each child is inflated by `padding` while packing and the group keeps that
/// margin, so the gap to the group's edge equals the gap between siblings.
fn pack_groups(slots: &mut [Slot], padding: f64, rng: &mut Lcg) -> Result<(), PackError> {
    let mut discs = Vec::new();
    for i in (0..slots.len()).rev() {
        if slots[i].children.is_empty() {
            continue;
        }
        discs.clear();
        discs.extend(slots[i].children.iter().map(|&c| {
            let d = slots[c].disc;
            Disc::new(d.x, d.y, d.r + padding)
        }));
        let enclosing = pack_siblings(&mut discs, rng).ok_or(PackError::DegenerateEnclosure)?;
        for (n, d) in discs.iter().enumerate() {
            let c = slots[i].children[n];
            slots[c].disc = Disc::new(d.x, d.y, d.r - padding);
        }
        slots[i].disc.r = enclosing + padding;
    }
    Ok(())
}

/// One laid-out node.
#[derive(Clone, Debug, PartialEq)]
pub struct PackedCircle {
    /// Identifier from the input.
    pub id: NodeId,
    /// Label from the input.
    pub name: String,
    /// Distance from the root (the root is at depth 0).
    pub depth: usize,
    /// Own value plus every descendant's.
    pub value: f64,
    /// Position and radius in layout coordinates.
    pub circle: Circle,
    /// Index of the parent in [`PackedChart::circles`].
    pub parent: Option<usize>,
    /// Indices of the children in [`PackedChart::circles`].
    pub children: Vec<usize>,
}

impl PackedCircle {
    /// Returns `true` if this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if `point` lies inside or on this circle.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        (point - self.circle.center).hypot2() <= self.circle.radius * self.circle.radius
    }
}

/// The result of [`PackLayout::pack`]: every node in breadth-first order,
/// root first.
#[derive(Clone, Debug)]
pub struct PackedChart {
    circles: Vec<PackedCircle>,
    by_id: HashMap<NodeId, usize>,
    size: Size,
}

impl PackedChart {
    fn new(circles: Vec<PackedCircle>, size: Size) -> Self {
        let by_id = circles
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id, i))
            .collect();
        Self {
            circles,
            by_id,
            size,
        }
    }

    /// All nodes, root first, then breadth-first.
    #[must_use]
    pub fn circles(&self) -> &[PackedCircle] {
        &self.circles
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> &PackedCircle {
        &self.circles[0]
    }

    /// Number of nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.circles.len()
    }

    /// Always `false`: a packed chart has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    /// The layout box.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.size.to_rect()
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&PackedCircle> {
        self.index_of(id).map(|i| &self.circles[i])
    }

    /// Position of `id` in [`circles`](Self::circles).
    #[must_use]
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    /// Returns `true` if `id` is the root.
    #[must_use]
    pub fn is_root(&self, id: NodeId) -> bool {
        self.root().id == id
    }

    /// Nodes without children.
    pub fn leaves(&self) -> impl Iterator<Item = &PackedCircle> {
        self.circles.iter().filter(|c| c.is_leaf())
    }

    /// The deepest non-root node containing `point`, in layout coordinates.
    ///
    /// To hit test a screen point under a gesture transform, map it through
    /// the inverse of that transform first.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<&PackedCircle> {
        self.circles
            .iter()
            .skip(1)
            .filter(|c| c.contains(point))
            .max_by_key(|c| c.depth)
    }
}
