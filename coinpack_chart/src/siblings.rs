// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Front-chain packing of sibling circles (Wang et al.).
//!
//! Circles are placed one at a time tangent to two neighbours on the current
//! front chain. If the new circle overlaps something on the chain, the chain
//! is cut back to the overlapping circle and placement retries.

use crate::enclose::{Disc, Lcg, enclose};

/// Places `c` tangent to both `a` and `b`.
fn place(b: Disc, a: Disc, c: &mut Disc) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let d2 = dx * dx + dy * dy;
    if d2 != 0.0 {
        let a2 = (a.r + c.r) * (a.r + c.r);
        let b2 = (b.r + c.r) * (b.r + c.r);
        if a2 > b2 {
            let x = (d2 + b2 - a2) / (2.0 * d2);
            let y = (b2 / d2 - x * x).max(0.0).sqrt();
            c.x = b.x - x * dx - y * dy;
            c.y = b.y - x * dy + y * dx;
        } else {
            let x = (d2 + a2 - b2) / (2.0 * d2);
            let y = (a2 / d2 - x * x).max(0.0).sqrt();
            c.x = a.x + x * dx - y * dy;
            c.y = a.y + x * dy + y * dx;
        }
    } else {
        c.x = a.x + c.r;
        c.y = a.y;
    }
}

fn intersects(a: Disc, b: Disc) -> bool {
    let dr = a.r + b.r - 1e-6;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

/// Circular doubly linked list over indices into the sibling slice.
struct FrontChain {
    next: Vec<usize>,
    prev: Vec<usize>,
}

impl FrontChain {
    fn new(len: usize) -> Self {
        Self {
            next: vec![0; len],
            prev: vec![0; len],
        }
    }

    fn link(&mut self, a: usize, b: usize) {
        self.next[a] = b;
        self.prev[b] = a;
    }
}

/// Squared distance from the origin of the weighted midpoint of `node` and its successor.
fn score(discs: &[Disc], chain: &FrontChain, node: usize) -> f64 {
    let a = discs[node];
    let b = discs[chain.next[node]];
    let ab = a.r + b.r;
    let dx = (a.x * b.r + b.x * a.r) / ab;
    let dy = (a.y * b.r + b.y * a.r) / ab;
    dx * dx + dy * dy
}

/// Packs `discs` (radii set, positions ignored) around the origin.
///
/// On return the discs do not overlap and the smallest circle enclosing them
/// is centred on the origin. Returns that circle's radius, or `None` if no
/// enclosing circle could be found.
pub(crate) fn pack_siblings(discs: &mut [Disc], rng: &mut Lcg) -> Option<f64> {
    let n = discs.len();
    if n == 0 {
        return Some(0.0);
    }

    discs[0].x = 0.0;
    discs[0].y = 0.0;
    if n == 1 {
        return Some(discs[0].r);
    }

    discs[0].x = -discs[1].r;
    discs[1].x = discs[0].r;
    discs[1].y = 0.0;
    if n == 2 {
        return Some(discs[0].r + discs[1].r);
    }

    let (first, second) = (discs[0], discs[1]);
    place(second, first, &mut discs[2]);

    let mut chain = FrontChain::new(n);
    chain.link(0, 1);
    chain.link(1, 2);
    chain.link(2, 0);
    let (mut a, mut b) = (0, 1);

    let mut i = 3;
    'pack: while i < n {
        let (da, db) = (discs[a], discs[b]);
        place(da, db, &mut discs[i]);
        let c = i;

        // Look for the closest circle on the chain that intersects `c`,
        // walking forward from `b` and backward from `a` by arc length.
        let (mut j, mut k) = (chain.next[b], chain.prev[a]);
        let (mut sj, mut sk) = (discs[b].r, discs[a].r);
        loop {
            if sj <= sk {
                if intersects(discs[j], discs[c]) {
                    b = j;
                    chain.link(a, b);
                    continue 'pack;
                }
                sj += discs[j].r;
                j = chain.next[j];
            } else {
                if intersects(discs[k], discs[c]) {
                    a = k;
                    chain.link(a, b);
                    continue 'pack;
                }
                sk += discs[k].r;
                k = chain.prev[k];
            }
            if j == chain.next[k] {
                break;
            }
        }

        // Insert `c` between `a` and `b`.
        chain.link(a, c);
        chain.link(c, b);
        b = c;

        // The new pair to place against is the one closest to the centroid.
        let mut best = score(discs, &chain, a);
        let mut node = chain.next[c];
        while node != b {
            let s = score(discs, &chain, node);
            if s < best {
                a = node;
                best = s;
            }
            node = chain.next[node];
        }
        b = chain.next[a];
        i += 1;
    }

    let mut front = vec![discs[b]];
    let mut node = chain.next[b];
    while node != b {
        front.push(discs[node]);
        node = chain.next[node];
    }
    let enclosing = enclose(&front, rng)?;

    for disc in discs.iter_mut() {
        disc.x -= enclosing.x;
        disc.y -= enclosing.y;
    }
    Some(enclosing.r)
}
