// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use coinpack_matrix::Matrix4;

type Observer = Arc<dyn Fn(&Matrix4) + Send + Sync>;

/// Handle returned by [`SharedTransform::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// A matrix value together with the revision it was read at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    /// The matrix at the time of the read.
    pub matrix: Matrix4,
    /// The revision of that matrix.
    pub revision: u64,
}

struct Cell {
    matrix: Matrix4,
    revision: u64,
}

struct Inner {
    cell: RwLock<Cell>,
    observers: Mutex<Vec<(ObserverId, Observer)>>,
    next_observer: AtomicU64,
}

/// The single current transform of a visual element.
///
/// Cloning a `SharedTransform` clones the handle, not the value: all clones
/// observe and mutate the same cell. Writes always replace the whole matrix,
/// so readers on another thread see either the old or the new value, never a
/// mix of the two.
///
/// Every write bumps [`revision`](Self::revision) and then runs the
/// subscribed observers synchronously on the writing thread. Observers run
/// after the value lock is released and may read the cell.
///
/// The cell expects a single writer (the gesture composer). Reads are safe
/// from any thread, but if two threads write concurrently their observer
/// notifications may arrive out of order, so the last notification can carry
/// the older matrix. Observers that need the latest value should call
/// [`snapshot`](Self::snapshot) and compare revisions.
#[derive(Clone)]
pub struct SharedTransform {
    inner: Arc<Inner>,
}

impl fmt::Debug for SharedTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("SharedTransform")
            .field("matrix", &snapshot.matrix)
            .field("revision", &snapshot.revision)
            .field("observers", &self.observer_count())
            .finish()
    }
}

impl Default for SharedTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedTransform {
    /// Creates a cell holding the identity transform at revision 0.
    #[must_use]
    pub fn new() -> Self {
        Self::with_value(Matrix4::IDENTITY)
    }

    /// Creates a cell holding `matrix` at revision 0.
    #[must_use]
    pub fn with_value(matrix: Matrix4) -> Self {
        Self {
            inner: Arc::new(Inner {
                cell: RwLock::new(Cell {
                    matrix,
                    revision: 0,
                }),
                observers: Mutex::new(Vec::new()),
                next_observer: AtomicU64::new(0),
            }),
        }
    }

    /// Returns the current matrix.
    #[must_use]
    pub fn get(&self) -> Matrix4 {
        self.snapshot().matrix
    }

    /// Returns the current matrix and its revision, read together.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        // The matrix is `Copy` and only ever replaced whole, so a poisoned
        // lock still guards a complete value.
        let cell = self.inner.cell.read().unwrap_or_else(PoisonError::into_inner);
        Snapshot {
            matrix: cell.matrix,
            revision: cell.revision,
        }
    }

    /// Returns the number of writes made to this cell.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.snapshot().revision
    }

    /// Replaces the current matrix and notifies observers.
    ///
    /// No validation is performed.
    pub fn set(&self, matrix: Matrix4) {
        self.update(|_| matrix);
    }

    /// Replaces the current matrix with `f(current)` under one write lock,
    /// then notifies observers. Returns the new matrix.
    pub fn update(&self, f: impl FnOnce(Matrix4) -> Matrix4) -> Matrix4 {
        let (matrix, revision) = {
            let mut cell = self
                .inner
                .cell
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            cell.matrix = f(cell.matrix);
            cell.revision = cell.revision.wrapping_add(1);
            (cell.matrix, cell.revision)
        };
        tracing::trace!(revision, "shared transform updated");
        self.notify(&matrix);
        matrix
    }

    /// Registers `observer` to run after every write.
    pub fn subscribe(&self, observer: impl Fn(&Matrix4) + Send + Sync + 'static) -> ObserverId {
        let id = ObserverId(self.inner.next_observer.fetch_add(1, Ordering::Relaxed));
        self.observers().push((id, Arc::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.observers();
        let before = observers.len();
        observers.retain(|(other, _)| *other != id);
        observers.len() != before
    }

    /// Returns the number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers().len()
    }

    /// Returns `true` if `self` and `other` are handles to the same cell.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn observers(&self) -> std::sync::MutexGuard<'_, Vec<(ObserverId, Observer)>> {
        self.inner
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, matrix: &Matrix4) {
        // Snapshot the list so observers may subscribe or unsubscribe.
        let observers: Vec<Observer> = self
            .observers()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(matrix);
        }
    }
}
