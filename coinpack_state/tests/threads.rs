// Copyright 2025 the Coinpack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-thread behavior of `SharedTransform`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;

use coinpack_matrix::Matrix4;
use coinpack_state::SharedTransform;
use kurbo::Vec2;

#[test]
fn readers_never_observe_a_torn_matrix() {
    let shared = SharedTransform::new();
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut reads = 0_u64;
                while !done.load(Ordering::Acquire) {
                    let m = shared.get();
                    // Every value ever written is a pure translation along x
                    // with the same offset on y.
                    let t = m.translation();
                    assert_eq!(t.x, t.y, "torn read: {m:?}");
                    assert!(m.is_affine());
                    reads += 1;
                }
                reads
            })
        })
        .collect();

    for i in 1..=2_000 {
        let v = f64::from(i);
        shared.set(Matrix4::translate(Vec2::new(v, v)));
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        reader.join().expect("reader thread panicked");
    }
    assert_eq!(shared.revision(), 2_000);
    assert_eq!(shared.get().translation(), Vec2::new(2_000.0, 2_000.0));
}

#[test]
fn observer_runs_on_the_writing_thread() {
    let shared = SharedTransform::new();
    let writer_id = Arc::new(std::sync::Mutex::new(None));
    let sink = Arc::clone(&writer_id);
    shared.subscribe(move |_| {
        *sink.lock().unwrap() = Some(thread::current().id());
    });

    let handle = {
        let shared = shared.clone();
        thread::spawn(move || {
            shared.set(Matrix4::scale(2.0, 2.0));
            thread::current().id()
        })
    };
    let spawned = handle.join().expect("writer thread panicked");
    assert_eq!(*writer_id.lock().unwrap(), Some(spawned));
}

#[test]
fn concurrent_writers_can_recover_latest_through_snapshot() {
    let shared = SharedTransform::new();
    let latest = Arc::new(AtomicU64::new(0));
    let (reader, sink) = (shared.clone(), Arc::clone(&latest));
    // Notifications from two writers may interleave; the revision read back
    // inside the observer still converges on the final write.
    let observer = shared.subscribe(move |_| {
        sink.fetch_max(reader.snapshot().revision, Ordering::AcqRel);
    });

    let writers: Vec<_> = (0..2)
        .map(|w| {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 0..500 {
                    let v = f64::from(w * 1_000 + i);
                    shared.set(Matrix4::translate(Vec2::new(v, v)));
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().expect("writer thread panicked");
    }

    assert_eq!(shared.revision(), 1_000);
    assert_eq!(latest.load(Ordering::Acquire), 1_000);
    assert!(shared.unsubscribe(observer));
}
