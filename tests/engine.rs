use liveheat::{
    FadePolicy, GridSpec, HeatmapConfig, HeatmapEngine, Smoothing, EPSILON,
};

fn tiny_config(alpha_value: f64, fade: FadePolicy) -> HeatmapConfig {
    HeatmapConfig {
        grid: GridSpec::new(2, 2),
        smoothing: Smoothing { alpha_value, ..Smoothing::default() },
        fade,
        ..HeatmapConfig::classic()
    }
}

fn snapshot_bytes(counts: &[u32]) -> Vec<u8> {
    counts.iter().flat_map(|c| c.to_le_bytes()).collect()
}

#[test]
fn ingestion_halves_the_distance_each_time() {
    let mut engine =
        HeatmapEngine::new(tiny_config(0.5, FadePolicy::Hold)).expect("valid config");
    let snapshot = snapshot_bytes(&[100, 0, 0, 0]);

    assert!(engine.ingest_raw(&snapshot), "well-formed snapshot must apply");
    assert_eq!(engine.values()[0], 50.0);

    assert!(engine.ingest_raw(&snapshot));
    assert_eq!(engine.values()[0], 75.0);

    for i in 1..4 {
        assert_eq!(engine.values()[i], 0.0, "untouched cells must stay exactly zero");
    }
}

#[test]
fn undersized_snapshot_is_a_bitwise_noop() {
    let mut engine =
        HeatmapEngine::new(tiny_config(0.5, FadePolicy::Hold)).expect("valid config");
    engine.ingest_raw(&snapshot_bytes(&[7, 13, 0, 42]));
    for _ in 0..3 {
        engine.tick();
    }

    let values_before = engine.values().to_vec();
    let visibility_before = engine.visibilities().to_vec();
    let radii_before = engine.radii().to_vec();

    let mut truncated = snapshot_bytes(&[1, 2, 3, 4]);
    truncated.pop();
    assert!(!engine.ingest_raw(&truncated), "short buffer must be discarded");

    let mut oversized = snapshot_bytes(&[1, 2, 3, 4]);
    oversized.push(0);
    assert!(!engine.ingest_raw(&oversized), "long buffer must be discarded");

    assert!(!engine.ingest_counts(&[1, 2, 3]), "short count slice must be discarded");

    assert_eq!(engine.values(), values_before.as_slice());
    assert_eq!(engine.visibilities(), visibility_before.as_slice());
    assert_eq!(engine.radii(), radii_before.as_slice());
}

#[test]
fn value_converges_monotonically_without_overshoot() {
    let mut engine =
        HeatmapEngine::new(tiny_config(0.2, FadePolicy::Hold)).expect("valid config");
    let counts = [80u32, 0, 0, 0];

    let mut previous_distance = 80.0;
    for _ in 0..200 {
        engine.ingest_counts(&counts);
        let value = engine.values()[0];
        assert!(value <= 80.0, "smoothing must never overshoot its target");
        let distance = 80.0 - value;
        assert!(distance <= previous_distance, "convergence must be monotone");
        previous_distance = distance;
    }
    assert!(previous_distance < 1e-10, "value should have converged to the raw count");
}

#[test]
fn identical_snapshots_hold_a_fixed_point() {
    // With a unit coefficient the value lands on the raw count immediately
    // and every further identical snapshot leaves it exactly in place.
    let mut engine =
        HeatmapEngine::new(tiny_config(1.0, FadePolicy::Hold)).expect("valid config");
    let counts = [42u32, 7, 0, 9];

    engine.ingest_counts(&counts);
    let settled = engine.values().to_vec();
    assert_eq!(settled, vec![42.0, 7.0, 0.0, 9.0]);

    for _ in 0..10 {
        engine.ingest_counts(&counts);
        assert_eq!(engine.values(), settled.as_slice(), "fixed point must not oscillate");
    }
}

#[test]
fn visibility_gates_drawing() {
    let mut engine =
        HeatmapEngine::new(tiny_config(1.0, FadePolicy::Hold)).expect("valid config");

    // Nothing has ever been active: no cell is drawn.
    assert!(engine.visuals().all(|c| !c.drawn));

    engine.ingest_counts(&[50, 0, 0, 0]);
    engine.tick();
    let cells: Vec<_> = engine.visuals().collect();
    assert!(cells[0].drawn, "active cell must be drawn once visibility rises");
    assert!(!cells[1].drawn, "idle cell must stay undrawn");
}

#[test]
fn hold_policy_never_fades() {
    let mut engine =
        HeatmapEngine::new(tiny_config(1.0, FadePolicy::Hold)).expect("valid config");
    engine.ingest_counts(&[50, 0, 0, 0]);
    for _ in 0..20 {
        engine.tick();
    }
    let risen = engine.visibilities()[0];
    assert!(risen > EPSILON);

    // Count drops to zero; visibility must hold its level regardless.
    engine.ingest_counts(&[0, 0, 0, 0]);
    assert!(engine.values()[0] <= EPSILON);
    for _ in 0..100 {
        engine.tick();
        assert!(
            engine.visibilities()[0] >= risen,
            "visibility must never decrease under the hold policy"
        );
    }
    assert!(
        engine.visuals().next().expect("cell 0").drawn,
        "a once-active cell keeps rendering under the hold policy"
    );
}

#[test]
fn decay_policy_fades_out_and_stops_drawing() {
    let mut engine =
        HeatmapEngine::new(tiny_config(1.0, FadePolicy::Decay(0.9))).expect("valid config");
    engine.ingest_counts(&[50, 0, 0, 0]);
    for _ in 0..5 {
        engine.tick();
    }
    assert!(engine.visibilities()[0] > EPSILON);

    engine.ingest_counts(&[0, 0, 0, 0]);
    assert!(engine.values()[0] <= EPSILON);

    // Immediately after the count drops the cell is still fading out, so it
    // keeps being drawn for a while.
    engine.tick();
    assert!(
        engine.visuals().next().expect("cell 0").drawn,
        "cell must keep rendering while fading out"
    );

    let mut previous = engine.visibilities()[0];
    for _ in 0..200 {
        engine.tick();
        let visibility = engine.visibilities()[0];
        assert!(visibility <= previous, "decay must be monotone");
        previous = visibility;
    }
    assert!(previous <= EPSILON, "visibility must eventually cross epsilon");
    assert!(
        !engine.visuals().next().expect("cell 0").drawn,
        "a fully faded cell must stop being drawn"
    );
}

#[test]
fn radius_stays_within_profile_bounds() {
    let config = tiny_config(1.0, FadePolicy::Hold);
    let profile = config.radius;
    let mut engine = HeatmapEngine::new(config).expect("valid config");

    // Extreme counts on one cell, nothing on the rest.
    engine.ingest_counts(&[u32::MAX, 0, 0, 1]);
    for _ in 0..500 {
        engine.tick();
        for &radius in engine.radii() {
            assert!(
                radius >= profile.min - 1e-9 && radius <= profile.max + 1e-9,
                "radius {radius} escaped [{}, {}]",
                profile.min,
                profile.max
            );
        }
    }
    // The saturated cell should have relaxed all the way to the cap.
    assert!((engine.radii()[0] - profile.max).abs() < 1e-6);
}

#[test]
fn normalization_max_latches_with_one_frame_lag() {
    let mut engine =
        HeatmapEngine::new(tiny_config(1.0, FadePolicy::Hold)).expect("valid config");
    engine.ingest_counts(&[30, 10, 0, 0]);

    // The first tick scans the new values but still serves the previous
    // (empty) frame's max.
    engine.tick();
    assert_eq!(engine.latched_max(), 0.0);

    engine.tick();
    assert_eq!(engine.latched_max(), 30.0);
}
