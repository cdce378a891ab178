// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless replay of the coin chart.
//!
//! Packs a dataset of spendable outputs, replays a scripted sequence of
//! touches through the gesture composer, then taps a circle through the
//! resulting transform and selects it.
//!
//! Run:
//! - `cargo run -p coinpack_demos`
//! - `cargo run -p coinpack_demos -- path/to/outputs.json`
//! - `RUST_LOG=coinpack=trace cargo run -p coinpack_demos` for every event

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, bail};
use coinpack_chart::{CoinNode, CoinSelection, PackLayout, PackedChart};
use coinpack_gesture::{
    ActivationCriteria, GestureComposer, GestureEvent, GestureKind, GestureStart, GestureUpdate,
    PanDelta, PinchUpdate, RotateUpdate,
};
use coinpack_matrix::{DisplayTransform, MatrixLayout};
use coinpack_state::{DerivedTransform, SharedTransform};
use kurbo::{Point, Size};

const BUNDLED: &str = include_str!("../data/outputs.json");
const SCREEN: Size = Size::new(390.0, 844.0);

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coinpack=debug,info".into()),
        )
        .init();

    let outputs = load(std::env::args().nth(1))?;
    let chart = PackLayout::new(SCREEN)
        .pack(&outputs)
        .context("packing outputs")?;
    tracing::info!(
        nodes = chart.len(),
        total = chart.root().value,
        radius = chart.root().circle.radius,
        "chart ready"
    );

    let transform = SharedTransform::new();
    let writes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&writes);
    transform.subscribe(move |_| {
        counter.fetch_add(1, Ordering::Relaxed);
    });

    let mut composer = GestureComposer::new(transform.clone())
        .with_criteria(ActivationCriteria::default().with_pan_min_distance(4.0));
    for (name, script) in scripts() {
        replay(&mut composer, name, &script);
    }

    let mut style = DerivedTransform::new();
    for layout in [MatrixLayout::ColumnMajor, MatrixLayout::Affine2D] {
        let display = style.get(&transform, |m| DisplayTransform::new(m, SCREEN));
        let cells = display.export(layout);
        tracing::info!(?layout, cells = ?cells.as_slice(), "display transform");
    }
    tracing::debug!(recomputations = style.recomputations(), "style derivation");
    tracing::info!(
        revision = transform.revision(),
        observed = writes.load(Ordering::Relaxed),
        "shared transform writes"
    );

    tap_and_select(&chart, &transform)
}

fn load(path: Option<String>) -> anyhow::Result<CoinNode> {
    let root: CoinNode = match path {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => serde_json::from_str(BUNDLED).context("parsing bundled outputs")?,
    };
    if root.is_leaf() {
        bail!("dataset {} has no outputs", root.id);
    }
    Ok(root)
}

/// Touch sequences, each ending with every finger lifted.
fn scripts() -> Vec<(&'static str, Vec<GestureEvent>)> {
    let focal = Point::new(195.0, 300.0);
    vec![
        (
            // Two fingers land, but they drag before they spread: pan wins.
            "drag",
            vec![
                GestureEvent::Begin(GestureStart::Pan),
                GestureEvent::Begin(GestureStart::Pinch { focal }),
                PanDelta::new(2.0, 1.0).into_event(),
                PanDelta::new(6.0, 3.0).into_event(),
                PinchUpdate::new(focal, 1.4).into_event(),
                PanDelta::new(-10.0, 20.0).into_event(),
                GestureEvent::End(GestureKind::Pan),
            ],
        ),
        (
            "zoom",
            vec![
                GestureEvent::Begin(GestureStart::Pinch { focal }),
                GestureEvent::Begin(GestureStart::Pan),
                PinchUpdate::new(focal, 1.25).into_event(),
                PanDelta::new(3.0, 3.0).into_event(),
                PinchUpdate::new(focal, 1.8).into_event(),
                PinchUpdate::new(focal, 2.0).into_event(),
                GestureEvent::End(GestureKind::Pinch),
            ],
        ),
        (
            // The system steals the touches mid-rotation; the last angle sticks.
            "twist",
            vec![
                GestureEvent::Begin(GestureStart::Rotate { anchor: focal }),
                RotateUpdate::new(focal, 0.1).into_event(),
                RotateUpdate::new(focal, 0.25).into_event(),
                GestureEvent::Cancel(GestureKind::Rotate),
            ],
        ),
    ]
}

trait IntoEvent {
    fn into_event(self) -> GestureEvent;
}

impl<T: Into<GestureUpdate>> IntoEvent for T {
    fn into_event(self) -> GestureEvent {
        GestureEvent::Change(self.into())
    }
}

fn replay(composer: &mut GestureComposer, name: &str, script: &[GestureEvent]) {
    let span = tracing::info_span!("sequence", name);
    let _guard = span.enter();
    for event in script {
        let outcome = composer.handle(*event);
        tracing::info!(kind = ?event.kind(), ?outcome, "event");
    }
    composer.end_sequence();
    let m = composer.transform().get();
    tracing::info!(
        translation = ?m.translation(),
        determinant = m.determinant_2d(),
        "sequence finished"
    );
}

fn tap_and_select(chart: &PackedChart, transform: &SharedTransform) -> anyhow::Result<()> {
    let gesture = transform.get().to_affine();
    if gesture.determinant() == 0.0 {
        bail!("gesture transform collapsed to a degenerate matrix");
    }
    let inverse = gesture.inverse();

    let mut selection = CoinSelection::new();
    for leaf in chart.leaves().take(3) {
        // Where the user sees this output after the gestures above.
        let screen = gesture * leaf.circle.center;
        let Some(hit) = chart.hit_test(inverse * screen) else {
            tracing::warn!(id = %leaf.id, "tap missed");
            continue;
        };
        let toggle = selection.toggle(chart, hit.id);
        tracing::info!(id = %hit.id, name = %hit.name, ?toggle, "tapped");
    }

    let summary = selection.summary(chart);
    tracing::info!(
        "{} of {} selected, {} total",
        summary.selected,
        summary.selectable,
        summary.selected_value
    );
    Ok(())
}
