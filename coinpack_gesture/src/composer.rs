// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use coinpack_state::SharedTransform;
use kurbo::Vec2;

use crate::compose::{PivotSession, compose_pan};
use crate::events::{GestureEvent, GestureKind, GestureStart, GestureUpdate};
use crate::race::{ActivationCriteria, Arbitration, GestureMask};

/// What [`GestureComposer::handle`] did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The recognizer is tracking but has not claimed the sequence yet.
    Pending,
    /// The recognizer claimed the sequence and its change was applied.
    Activated,
    /// The active recognizer's change was applied.
    Applied,
    /// Another recognizer owns the sequence; the event had no effect.
    Suppressed,
    /// The active recognizer ended or was cancelled; the sequence is over.
    Released,
    /// A pending recognizer ended before claiming the sequence.
    Dropped,
    /// The event did not apply to any tracked recognizer.
    Ignored,
}

/// Pending recognizers for the current touch sequence.
#[derive(Clone, Copy, Debug, Default)]
struct Candidates {
    /// Travel accumulated while the pan is pending.
    pan: Option<Vec2>,
    pinch: Option<PivotSession>,
    rotate: Option<PivotSession>,
}

impl Candidates {
    fn is_empty(&self) -> bool {
        self.pan.is_none() && self.pinch.is_none() && self.rotate.is_none()
    }

    fn contains(&self, kind: GestureKind) -> bool {
        match kind {
            GestureKind::Pan => self.pan.is_some(),
            GestureKind::Pinch => self.pinch.is_some(),
            GestureKind::Rotate => self.rotate.is_some(),
        }
    }

    fn remove(&mut self, kind: GestureKind) -> bool {
        match kind {
            GestureKind::Pan => self.pan.take().is_some(),
            GestureKind::Pinch => self.pinch.take().is_some(),
            GestureKind::Rotate => self.rotate.take().is_some(),
        }
    }
}

/// Turns gesture events into writes on a [`SharedTransform`].
///
/// Pan, pinch and rotate recognizers race for each touch sequence. The first
/// one whose change meets its [`ActivationCriteria`] claims the sequence;
/// the others are suppressed until the winner ends. This keeps two
/// recognizers from interleaving writes from the same touch stream.
///
/// Ending or cancelling a gesture never rolls the transform back.
#[derive(Debug)]
pub struct GestureComposer {
    transform: SharedTransform,
    enabled: GestureMask,
    criteria: ActivationCriteria,
    candidates: Candidates,
    arbitration: Arbitration,
}

impl GestureComposer {
    /// Creates a composer writing to `transform`, with every recognizer
    /// enabled and zero activation thresholds.
    #[must_use]
    pub fn new(transform: SharedTransform) -> Self {
        Self {
            transform,
            enabled: GestureMask::default(),
            criteria: ActivationCriteria::default(),
            candidates: Candidates::default(),
            arbitration: Arbitration::NoneActive,
        }
    }

    /// Restricts the race to the recognizers in `enabled`.
    #[must_use]
    pub fn with_enabled(mut self, enabled: GestureMask) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the activation thresholds.
    #[must_use]
    pub fn with_criteria(mut self, criteria: ActivationCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// The shared transform this composer writes to.
    #[must_use]
    pub fn transform(&self) -> &SharedTransform {
        &self.transform
    }

    /// The enabled recognizers.
    #[must_use]
    pub fn enabled(&self) -> GestureMask {
        self.enabled
    }

    /// The activation thresholds.
    #[must_use]
    pub fn criteria(&self) -> ActivationCriteria {
        self.criteria
    }

    /// The current arbitration state.
    #[must_use]
    pub fn arbitration(&self) -> &Arbitration {
        &self.arbitration
    }

    /// The recognizer that owns the current sequence, if any.
    #[must_use]
    pub fn active(&self) -> Option<GestureKind> {
        self.arbitration.active_kind()
    }

    /// Returns `true` if `kind` has begun but not yet claimed the sequence.
    #[must_use]
    pub fn is_pending(&self, kind: GestureKind) -> bool {
        self.candidates.contains(kind)
    }

    /// Returns `true` if no recognizer is pending or active.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.arbitration == Arbitration::NoneActive && self.candidates.is_empty()
    }

    /// Processes one event of the current touch sequence.
    pub fn handle(&mut self, event: GestureEvent) -> Outcome {
        let kind = event.kind();
        if !self.enabled.allows(kind) {
            tracing::trace!(?kind, "recognizer disabled");
            return Outcome::Ignored;
        }
        match event {
            GestureEvent::Begin(start) => self.begin(start),
            GestureEvent::Change(update) => self.change(update),
            GestureEvent::End(kind) => self.finish(kind, false),
            GestureEvent::Cancel(kind) => self.finish(kind, true),
        }
    }

    /// Ends the touch sequence (all pointers lifted).
    ///
    /// Drops every pending recognizer and the active session. The shared
    /// transform keeps its last value.
    pub fn end_sequence(&mut self) {
        if let Some(kind) = self.active() {
            tracing::debug!(?kind, "touch sequence ended while active");
        }
        self.candidates = Candidates::default();
        self.arbitration = Arbitration::NoneActive;
    }

    fn begin(&mut self, start: GestureStart) -> Outcome {
        let kind = start.kind();
        match self.active() {
            Some(active) if active == kind => return Outcome::Ignored,
            Some(active) => {
                tracing::trace!(?kind, ?active, "begin suppressed");
                return Outcome::Suppressed;
            }
            None => {}
        }
        self.register(start);
        tracing::debug!(?kind, "recognizer began");
        Outcome::Pending
    }

    fn register(&mut self, start: GestureStart) {
        let offset = self.transform.get();
        match start {
            GestureStart::Pan => self.candidates.pan = Some(Vec2::ZERO),
            GestureStart::Pinch { focal } => {
                self.candidates.pinch = Some(PivotSession::new(focal, offset));
            }
            GestureStart::Rotate { anchor } => {
                self.candidates.rotate = Some(PivotSession::new(anchor, offset));
            }
        }
    }

    fn change(&mut self, update: GestureUpdate) -> Outcome {
        let kind = update.kind();
        match self.active() {
            Some(active) if active == kind => {
                self.apply(update);
                return Outcome::Applied;
            }
            Some(active) => {
                tracing::trace!(?kind, ?active, "change suppressed");
                return Outcome::Suppressed;
            }
            None => {}
        }

        if !self.candidates.contains(kind) {
            self.register(update.implied_start());
        }
        if !self.meets_criteria(update) {
            return Outcome::Pending;
        }

        self.arbitration = match update {
            GestureUpdate::Pan(_) => Arbitration::PanActive,
            GestureUpdate::Pinch(_) => self
                .candidates
                .pinch
                .map_or(Arbitration::NoneActive, Arbitration::PinchActive),
            GestureUpdate::Rotate(_) => self
                .candidates
                .rotate
                .map_or(Arbitration::NoneActive, Arbitration::RotateActive),
        };
        // Losers are out for the rest of the sequence.
        self.candidates = Candidates::default();
        tracing::debug!(?kind, "recognizer activated");
        self.apply(update);
        Outcome::Activated
    }

    fn meets_criteria(&mut self, update: GestureUpdate) -> bool {
        match update {
            GestureUpdate::Pan(delta) => {
                let travel = self.candidates.pan.get_or_insert(Vec2::ZERO);
                *travel += delta.change;
                travel.hypot() >= self.criteria.pan_min_distance
            }
            GestureUpdate::Pinch(pinch) => {
                (pinch.scale - 1.0).abs() >= self.criteria.pinch_min_scale_delta
            }
            GestureUpdate::Rotate(rotate) => {
                rotate.rotation.abs() >= self.criteria.rotate_min_radians
            }
        }
    }

    fn apply(&self, update: GestureUpdate) {
        match (update, &self.arbitration) {
            (GestureUpdate::Pan(delta), Arbitration::PanActive) => {
                self.transform.update(|m| compose_pan(m, delta.change));
            }
            (GestureUpdate::Pinch(pinch), Arbitration::PinchActive(session)) => {
                self.transform.set(session.pinch(pinch.scale));
            }
            (GestureUpdate::Rotate(rotate), Arbitration::RotateActive(session)) => {
                self.transform.set(session.rotate(rotate.rotation));
            }
            _ => return,
        }
        tracing::trace!(kind = ?update.kind(), "change applied");
    }

    fn finish(&mut self, kind: GestureKind, cancelled: bool) -> Outcome {
        if self.active() == Some(kind) {
            if cancelled {
                tracing::debug!(?kind, "active gesture cancelled; keeping last transform");
            } else {
                tracing::debug!(?kind, "active gesture ended");
            }
            self.end_sequence();
            return Outcome::Released;
        }
        if self.candidates.remove(kind) {
            tracing::debug!(?kind, cancelled, "pending recognizer dropped");
            return Outcome::Dropped;
        }
        Outcome::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{PanDelta, PinchUpdate, RotateUpdate};
    use coinpack_matrix::Matrix4;
    use kurbo::Point;

    fn composer() -> GestureComposer {
        GestureComposer::new(SharedTransform::new())
    }

    fn pan(dx: f64, dy: f64) -> GestureEvent {
        GestureEvent::Change(PanDelta::new(dx, dy).into())
    }

    fn pinch(x: f64, y: f64, scale: f64) -> GestureEvent {
        GestureEvent::Change(PinchUpdate::new(Point::new(x, y), scale).into())
    }

    #[test]
    fn first_pan_change_activates() {
        let mut c = composer();
        assert_eq!(c.handle(GestureEvent::Begin(GestureStart::Pan)), Outcome::Pending);
        assert!(c.is_pending(GestureKind::Pan));
        assert_eq!(c.handle(pan(3.0, 4.0)), Outcome::Activated);
        assert_eq!(c.active(), Some(GestureKind::Pan));
        assert_eq!(c.handle(pan(1.0, 0.0)), Outcome::Applied);
        assert_eq!(c.transform().get().translation(), Vec2::new(4.0, 4.0));
    }

    #[test]
    fn pinch_captures_pivot_and_snapshot_at_begin() {
        let shared = SharedTransform::with_value(Matrix4::translate(Vec2::new(5.0, 0.0)));
        let mut c = GestureComposer::new(shared.clone());
        let focal = Point::new(10.0, 10.0);
        c.handle(GestureEvent::Begin(GestureStart::Pinch { focal }));
        // The focal point drifts during the gesture; the pivot does not.
        assert_eq!(c.handle(pinch(30.0, 30.0, 2.0)), Outcome::Activated);
        let session = c.arbitration().session().copied().unwrap();
        assert_eq!(session.pivot, focal);
        assert_eq!(session.offset, Matrix4::translate(Vec2::new(5.0, 0.0)));
        assert_eq!(shared.get(), session.pinch(2.0));
    }

    #[test]
    fn losers_are_suppressed_until_release() {
        let mut c = composer();
        c.handle(GestureEvent::Begin(GestureStart::Pan));
        c.handle(GestureEvent::Begin(GestureStart::Pinch {
            focal: Point::new(1.0, 1.0),
        }));
        assert_eq!(c.handle(pinch(1.0, 1.0, 1.5)), Outcome::Activated);
        assert!(!c.is_pending(GestureKind::Pan));
        assert_eq!(c.handle(pan(10.0, 0.0)), Outcome::Suppressed);
        assert_eq!(
            c.handle(GestureEvent::Begin(GestureStart::Rotate {
                anchor: Point::ZERO
            })),
            Outcome::Suppressed
        );
        assert_eq!(c.handle(GestureEvent::End(GestureKind::Pan)), Outcome::Ignored);
        assert_eq!(
            c.handle(GestureEvent::End(GestureKind::Pinch)),
            Outcome::Released
        );
        assert!(c.is_idle());
    }

    #[test]
    fn cancel_keeps_last_value() {
        let mut c = composer();
        c.handle(GestureEvent::Begin(GestureStart::Rotate {
            anchor: Point::new(2.0, 3.0),
        }));
        c.handle(GestureEvent::Change(
            RotateUpdate::new(Point::new(2.0, 3.0), 0.5).into(),
        ));
        let before = c.transform().get();
        assert_eq!(
            c.handle(GestureEvent::Cancel(GestureKind::Rotate)),
            Outcome::Released
        );
        assert_eq!(c.transform().get(), before);
        assert_ne!(before, Matrix4::IDENTITY);
    }

    #[test]
    fn pending_candidate_can_be_dropped() {
        let mut c = composer();
        c.handle(GestureEvent::Begin(GestureStart::Pan));
        assert_eq!(c.handle(GestureEvent::End(GestureKind::Pan)), Outcome::Dropped);
        assert!(c.is_idle());
        assert_eq!(c.transform().revision(), 0);
    }

    #[test]
    fn disabled_recognizer_is_ignored() {
        let mut c = composer().with_enabled(GestureMask::PAN | GestureMask::PINCH);
        let rotate = GestureEvent::Change(RotateUpdate::new(Point::ZERO, 1.0).into());
        assert_eq!(c.handle(rotate), Outcome::Ignored);
        assert!(c.is_idle());
    }

    #[test]
    fn pan_threshold_accumulates_travel() {
        let criteria = ActivationCriteria::default().with_pan_min_distance(10.0);
        let mut c = composer().with_criteria(criteria);
        assert_eq!(c.handle(pan(3.0, 4.0)), Outcome::Pending);
        assert_eq!(c.transform().revision(), 0);
        // 5 + 5 = 10 of travel; this change activates and only it is applied.
        assert_eq!(c.handle(pan(3.0, 4.0)), Outcome::Activated);
        assert_eq!(c.transform().get().translation(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn pinch_threshold_holds_until_crossed() {
        let criteria = ActivationCriteria::default().with_pinch_min_scale_delta(0.2);
        let mut c = composer().with_criteria(criteria);
        let focal = Point::new(4.0, 6.0);
        c.handle(GestureEvent::Begin(GestureStart::Pinch { focal }));
        assert_eq!(c.handle(pinch(4.0, 6.0, 1.1)), Outcome::Pending);
        assert_eq!(c.handle(pinch(4.0, 6.0, 0.9)), Outcome::Pending);
        assert!(c.is_pending(GestureKind::Pinch));
        assert_eq!(c.transform().revision(), 0);

        assert_eq!(c.handle(pinch(4.0, 6.0, 1.3)), Outcome::Activated);
        assert_eq!(c.active(), Some(GestureKind::Pinch));
        assert_eq!(
            c.transform().get(),
            Matrix4::scale_about(1.3, 1.3, focal),
            "scale is cumulative from the begin snapshot"
        );
    }

    #[test]
    fn rotate_threshold_holds_until_crossed() {
        let criteria = ActivationCriteria::default().with_rotate_min_radians(0.3);
        let mut c = composer().with_criteria(criteria);
        let anchor = Point::new(1.0, 2.0);
        c.handle(GestureEvent::Begin(GestureStart::Rotate { anchor }));
        let rotate = |radians| GestureEvent::Change(RotateUpdate::new(anchor, radians).into());
        assert_eq!(c.handle(rotate(0.1)), Outcome::Pending);
        assert_eq!(c.handle(rotate(-0.2)), Outcome::Pending);
        assert_eq!(c.transform().revision(), 0);

        assert_eq!(c.handle(rotate(-0.35)), Outcome::Activated);
        assert_eq!(c.active(), Some(GestureKind::Rotate));
        assert_eq!(c.transform().get(), Matrix4::rotate_z_about(-0.35, anchor));
    }

    #[test]
    fn pan_beats_pinch_below_its_threshold() {
        let criteria = ActivationCriteria::default().with_pinch_min_scale_delta(0.5);
        let mut c = composer().with_criteria(criteria);
        c.handle(GestureEvent::Begin(GestureStart::Pinch {
            focal: Point::new(10.0, 10.0),
        }));
        c.handle(GestureEvent::Begin(GestureStart::Pan));
        assert_eq!(c.handle(pinch(10.0, 10.0, 1.2)), Outcome::Pending);
        assert_eq!(c.handle(pan(2.0, 0.0)), Outcome::Activated);
        assert_eq!(c.active(), Some(GestureKind::Pan));
        assert!(!c.is_pending(GestureKind::Pinch));

        // The pinch now crosses its threshold, but the sequence is taken.
        assert_eq!(c.handle(pinch(10.0, 10.0, 2.0)), Outcome::Suppressed);
        assert_eq!(c.transform().get(), Matrix4::translate(Vec2::new(2.0, 0.0)));
        assert_eq!(c.transform().revision(), 1);
    }

    #[test]
    fn change_without_begin_implies_begin() {
        let mut c = composer();
        assert_eq!(c.handle(pinch(8.0, 8.0, 3.0)), Outcome::Activated);
        let session = c.arbitration().session().copied().unwrap();
        assert_eq!(session.pivot, Point::new(8.0, 8.0));
        assert_eq!(session.offset, Matrix4::IDENTITY);
    }

    #[test]
    fn end_sequence_resets_arbitration() {
        let mut c = composer();
        c.handle(pan(1.0, 1.0));
        c.end_sequence();
        assert!(c.is_idle());
        assert_eq!(c.handle(pinch(0.0, 0.0, 2.0)), Outcome::Activated);
    }
}
