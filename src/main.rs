//! Command-line driver: build a structure, perturb it, then run the multiverse.

use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use proxima::{
    select_attractors, simulate_multiverse, GraphStats, PointSet, SimulationConfig, Structure,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to config TOML (defaults are used if it does not exist)
    #[arg(long, default_value = "proxima.toml")]
    config: String,

    /// RNG seed (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Points in the main structure (overrides config)
    #[arg(long)]
    points: Option<usize>,

    /// Edge percentile in [0, 100] (overrides config)
    #[arg(long)]
    percentile: Option<f64>,

    /// Attractors for the perturbation step (overrides config)
    #[arg(long)]
    attractors: Option<usize>,

    /// Universes to generate (overrides config)
    #[arg(long)]
    universes: Option<usize>,

    /// Compute distance matrices in parallel
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Print a JSON report on stdout
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Serialize)]
struct StageReport {
    threshold: f64,
    stats: GraphStats,
}

impl StageReport {
    fn of(structure: &Structure) -> Self {
        Self {
            threshold: structure.threshold(),
            stats: structure.stats(),
        }
    }
}

#[derive(Serialize)]
struct UniverseReport {
    index: usize,
    seed: u64,
    #[serde(flatten)]
    stage: StageReport,
}

#[derive(Serialize)]
struct Report {
    config: SimulationConfig,
    initial: StageReport,
    attractors: Vec<usize>,
    perturbed: StageReport,
    universes: Vec<UniverseReport>,
}

fn apply_overrides(config: &mut SimulationConfig, args: &Args) {
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(points) = args.points {
        config.points = points;
    }
    if let Some(percentile) = args.percentile {
        config.percentile = percentile;
    }
    if let Some(attractors) = args.attractors {
        config.attractors = attractors;
    }
    if let Some(universes) = args.universes {
        config.universes = universes;
    }
    if args.parallel {
        config.parallel = true;
    }
}

fn log_stage(stage: &str, report: &StageReport) {
    let s = &report.stats;
    info!(
        stage,
        threshold = report.threshold,
        vertices = s.vertices,
        edges = s.edges,
        mean_degree = s.mean_degree,
        components = s.components,
        isolated = s.isolated,
        "graph summary"
    );
}

fn run(args: &Args) -> Result<Report> {
    let mut config = SimulationConfig::load_or_default(&args.config)
        .with_context(|| format!("loading config {}", args.config))?;
    apply_overrides(&mut config, args);
    config.validate().context("invalid configuration")?;

    let builder = config.builder()?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let points = PointSet::random_unit_cube(config.points, config.dimension, &mut rng)?;
    let mut structure = builder.build(points);
    let initial = StageReport::of(&structure);
    log_stage("initial", &initial);

    let attractors = select_attractors(config.points, config.attractors, &mut rng)?;
    info!(?attractors, "selected attractors");
    structure
        .perturb(&config.gravity, &attractors, &builder)
        .context("perturbing structure")?;
    let perturbed = StageReport::of(&structure);
    log_stage("perturbed", &perturbed);

    // Offset so universe 0 does not replay the main structure's stream.
    let universes = simulate_multiverse(
        config.universes,
        config.points_per_universe,
        config.dimension,
        &builder,
        config.seed.wrapping_add(1),
    )?
    .into_iter()
    .map(|u| UniverseReport {
        index: u.index,
        seed: u.seed,
        stage: StageReport::of(&u.structure),
    })
    .collect();

    Ok(Report {
        config,
        initial,
        attractors,
        perturbed,
        universes,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("proxima=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let report = run(&args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
