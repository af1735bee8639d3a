//! End-to-end scenarios: fixed inputs with known graphs, and full runs of
//! generate -> build -> perturb -> rebuild.

use proxima::{
    build_graph, select_attractors, simulate_multiverse, Error, GraphBuilder, GraphStats, Gravity,
    PointSet, SimulationConfig,
};
use rand::{rngs::StdRng, SeedableRng};

// =============================================================================
// Fixed inputs
// =============================================================================

#[test]
fn three_point_median() {
    // Entries: 0 (x3), 1 (x2), √297 (x2), √300 (x2). Median (rank 4) is 1,
    // and 1 is not strictly below 1.
    let s = build_graph(&[[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [10.0, 10.0, 10.0]], 50.0).unwrap();
    assert_eq!(s.threshold(), 1.0);
    assert_eq!(s.graph().edges().count(), 0);
    assert_eq!(s.graph().vertex_count(), 3);
}

#[test]
fn three_point_sixtieth() {
    let s = build_graph(&[[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [10.0, 10.0, 10.0]], 60.0).unwrap();
    assert_eq!(s.graph().edges().collect::<Vec<_>>(), vec![(0, 1)]);
}

#[test]
fn single_point_graph() {
    let s = build_graph(&[[3.0, 1.0, 4.0]], 100.0).unwrap();
    assert_eq!(s.graph().vertex_count(), 1);
    assert!(s.graph().is_edgeless());
}

#[test]
fn duplicate_points_connected() {
    for p in [0.5, 5.0, 50.0, 100.0] {
        let s = build_graph(&[[1.0, 1.0, 1.0], [1.0, 1.0, 1.0]], p).unwrap();
        assert!(s.graph().has_edge(0, 1), "p = {p}");
        assert!(s.graph().has_edge(1, 0), "p = {p}");
    }
}

#[test]
fn well_separated_points_low_percentile_is_edgeless() {
    let rows: Vec<[f64; 3]> = (0..10).map(|i| [i as f64 * 100.0, 0.0, 0.0]).collect();
    // 10 zeros out of 100 entries: any p below 10 gives threshold 0
    let s = build_graph(&rows, 5.0).unwrap();
    assert_eq!(s.threshold(), 0.0);
    assert!(s.graph().is_edgeless());
    assert_eq!(s.stats().isolated, 10);
}

#[test]
fn high_percentile_approaches_complete() {
    let mut rng = StdRng::seed_from_u64(1);
    let points = PointSet::random_unit_cube(30, 3, &mut rng).unwrap();
    let s = GraphBuilder::new(100.0).unwrap().build(points);
    let n = 30;
    // only pairs at exactly the max distance are dropped
    assert!(s.graph().edge_count() >= n * (n - 1) / 2 - 1);
    assert_eq!(s.stats().components, 1);
}

#[test]
fn invalid_inputs_fail_fast() {
    let empty: Vec<Vec<f64>> = Vec::new();
    assert!(matches!(build_graph(&empty, 5.0), Err(Error::EmptyPointSet)));
    assert!(matches!(
        build_graph(&[[0.0, 0.0]], -1.0),
        Err(Error::PercentileOutOfRange(_))
    ));
    assert!(matches!(
        build_graph(&[[0.0, 0.0]], f64::NAN),
        Err(Error::PercentileOutOfRange(_))
    ));
    assert!(matches!(
        build_graph(&[vec![0.0, 0.0], vec![0.0, 0.0, 0.0]], 5.0),
        Err(Error::DimensionMismatch {
            index: 1,
            expected: 2,
            found: 3
        })
    ));
    assert!(matches!(
        build_graph(&[[0.0, f64::INFINITY]], 5.0),
        Err(Error::NonFiniteCoordinate { index: 0, axis: 1 })
    ));
}

#[test]
fn higher_dimensions() {
    // D = 1 and D = 8 are as valid as D = 3
    let s = build_graph(&[[0.0], [0.5], [10.0]], 60.0).unwrap();
    assert_eq!(s.graph().edges().collect::<Vec<_>>(), vec![(0, 1)]);

    let mut rng = StdRng::seed_from_u64(8);
    let points = PointSet::random_unit_cube(40, 8, &mut rng).unwrap();
    let s = GraphBuilder::new(20.0).unwrap().build(points);
    assert_eq!(s.points().dimension(), 8);
    assert!(s.graph().edge_count() > 0);
}

// =============================================================================
// Full runs
// =============================================================================

#[test]
fn default_run_five_percent() {
    let mut rng = StdRng::seed_from_u64(42);
    let points = PointSet::random_unit_cube(300, 3, &mut rng).unwrap();
    let s = GraphBuilder::new(5.0).unwrap().build(points);

    // 300 zeros of 90 000 entries; the 5th percentile sits among the
    // smallest ~4.7% of off-diagonal entries.
    let stats: GraphStats = s.stats();
    let pairs = 300 * 299 / 2;
    assert!(stats.edges > 0);
    assert!((stats.edges as f64) < 0.06 * pairs as f64, "{} edges", stats.edges);
    assert!(s.threshold() > 0.0 && s.threshold() < 1.0);
}

#[test]
fn perturb_then_rebuild() {
    let mut rng = StdRng::seed_from_u64(42);
    let points = PointSet::random_unit_cube(200, 3, &mut rng).unwrap();
    let builder = GraphBuilder::new(5.0).unwrap();
    let mut structure = builder.build(points);
    let original = structure.points().clone();

    let attractors = select_attractors(200, 5, &mut rng).unwrap();
    structure
        .perturb(&Gravity::default(), &attractors, &builder)
        .unwrap();

    let mut expected = original.clone();
    Gravity::default().apply(&mut expected, &attractors).unwrap();
    assert_eq!(structure.points(), &expected);
    assert_ne!(structure.points(), &original);
    assert_eq!(
        structure.graph(),
        builder.build(structure.points().clone()).graph()
    );
}

#[test]
fn sequential_attractors_move_exactly() {
    // 0 pulls first; 2 then pulls from its already-moved position and 0 is
    // dragged toward it. 2 is never pulled by itself.
    let builder = GraphBuilder::new(50.0).unwrap();
    let mut structure = build_graph(&[[0.0], [1.0], [3.0]], 50.0).unwrap();
    let gravity = Gravity {
        strength: 1.0,
        step: 0.5,
        softening: 1.0,
    };
    structure.perturb(&gravity, &[0, 2], &builder).unwrap();

    let p2 = 3.0 - 0.5 / 4.0 * 3.0;
    let p1 = 1.0 - 0.5 / 2.0 * 1.0;
    let expected = [
        0.5 / (p2 + 1.0) * p2,
        p1 + 0.5 / (p2 - p1 + 1.0) * (p2 - p1),
        p2,
    ];
    for (i, e) in expected.iter().enumerate() {
        let got = structure.points().point(i)[0];
        assert!((got - e).abs() < 1e-12, "point {i}: {got} vs {e}");
    }
}

#[test]
fn overflowing_gravity_config_is_rejected_before_perturbing() {
    let err = SimulationConfig::from_toml(
        "points = 3\nattractors = 1\n[gravity]\nstrength = 1e300\nstep = 1e300\n",
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidGravity(_)));

    // same parameters handed straight to perturb
    let builder = GraphBuilder::new(50.0).unwrap();
    let mut structure = build_graph(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]], 50.0).unwrap();
    let before = structure.clone();
    let gravity = Gravity {
        strength: 1e300,
        step: 1e300,
        ..Gravity::default()
    };
    assert!(structure.perturb(&gravity, &[0], &builder).is_err());
    assert_eq!(structure, before);
}

#[test]
fn extreme_but_finite_points_survive_a_failed_perturbation() {
    let builder = GraphBuilder::new(50.0).unwrap();
    let mut structure = build_graph(&[[1e308], [-1e308]], 50.0).unwrap();
    let before = structure.clone();
    let err = structure
        .perturb(&Gravity::default(), &[0], &builder)
        .unwrap_err();
    assert!(matches!(err, Error::PerturbationOverflow { index: 1, axis: 0 }));
    assert_eq!(structure, before);
    assert!(structure.threshold() >= 0.0);
}

#[test]
fn multiverse_universes_differ() {
    let builder = GraphBuilder::new(5.0).unwrap();
    let run = simulate_multiverse(3, 120, 3, &builder, 42).unwrap();
    assert_eq!(run.len(), 3);
    for pair in run.windows(2) {
        assert_ne!(pair[0].structure.points(), pair[1].structure.points());
    }
    for u in &run {
        assert_eq!(u.structure.points().len(), 120);
    }
}

#[test]
fn config_drives_a_run() {
    let config = SimulationConfig::from_toml(
        "points = 80\npercentile = 10.0\nattractors = 3\nuniverses = 2\npoints_per_universe = 40\nseed = 5\n",
    )
    .unwrap();
    let builder = config.builder().unwrap();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let points = PointSet::random_unit_cube(config.points, config.dimension, &mut rng).unwrap();
    let mut s = builder.build(points);
    let attractors = select_attractors(config.points, config.attractors, &mut rng).unwrap();
    s.perturb(&config.gravity, &attractors, &builder).unwrap();
    assert_eq!(s.percentile(), 10.0);

    let run = simulate_multiverse(
        config.universes,
        config.points_per_universe,
        config.dimension,
        &builder,
        config.seed,
    )
    .unwrap();
    assert_eq!(run.len(), 2);
}
