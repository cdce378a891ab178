// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use coinpack_matrix::Matrix4;

use crate::SharedTransform;

/// A value derived from a [`SharedTransform`], recomputed only when the
/// shared revision moves.
///
/// This is the reader side of the cell: a view keeps one of these and asks
/// for its style every frame; the derivation runs once per write.
#[derive(Clone, Debug, Default)]
pub struct DerivedTransform<T> {
    cached: Option<(u64, T)>,
    recomputations: u64,
}

impl<T> DerivedTransform<T> {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cached: None,
            recomputations: 0,
        }
    }

    /// Returns the derived value, running `derive` if `shared` changed since
    /// the previous call.
    pub fn get(&mut self, shared: &SharedTransform, derive: impl FnOnce(Matrix4) -> T) -> &T {
        let snapshot = shared.snapshot();
        let stale = self
            .cached
            .as_ref()
            .is_none_or(|(revision, _)| *revision != snapshot.revision);
        if stale {
            self.cached = None;
            self.recomputations += 1;
        }
        let (_, value) = self
            .cached
            .get_or_insert_with(|| (snapshot.revision, derive(snapshot.matrix)));
        value
    }

    /// Returns the revision the cached value was derived from, if any.
    #[must_use]
    pub fn revision(&self) -> Option<u64> {
        self.cached.as_ref().map(|(revision, _)| *revision)
    }

    /// Returns how many times the derivation has run.
    #[must_use]
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Drops the cached value so the next read recomputes.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
