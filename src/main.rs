use anyhow::Result;
use clap::Parser;

use louvain_clusterer::cluster::{LevelDriver, MaxDegree};
use louvain_clusterer::{data, storage, Config};

#[derive(Parser, Debug)]
#[clap(
    name = "louvain-clusterer",
    about = "Hierarchical Louvain clustering of weighted edge lists"
)]
struct Cli {
    /// Path to a whitespace-separated edge list (`source target [weight]`)
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "cluster_results")]
    output_dir: String,

    /// JSON file with configuration overrides
    #[clap(long)]
    config: Option<String>,

    /// Maximum number of coarsening levels
    #[clap(long)]
    max_levels: Option<usize>,

    /// Maximum optimisation passes per level
    #[clap(long)]
    max_passes: Option<usize>,

    /// Shuffle node order with this seed instead of sweeping in index order
    #[clap(long)]
    seed: Option<u64>,

    /// Aggregate levels on a single thread
    #[clap(long)]
    sequential: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    if let Some(max_levels) = args.max_levels {
        config.max_levels = max_levels;
    }
    if let Some(max_passes) = args.max_passes {
        config.max_passes = max_passes;
    }
    if args.seed.is_some() {
        config.shuffle_seed = args.seed;
    }
    if args.sequential {
        config.parallel = false;
    }
    log::debug!("Configuration: {:?}", config);

    log::info!("Starting clustering");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    // 1. Load data
    let graph = data::load_edge_list(&args.input)?;
    let leaf_ids: Vec<String> = graph.nodes().iter().map(|n| n.payload().clone()).collect();

    log::info!(
        "Loaded graph with {} nodes and total weight {}",
        graph.node_count(),
        graph.total_weight()
    );

    // 2. Cluster level by level
    let hierarchy = LevelDriver::from_config(&config).run(graph, &MaxDegree)?;

    log::info!(
        "Found {} clusters after {} levels",
        hierarchy.graph().node_count(),
        hierarchy.level_count()
    );

    // 3. Save results
    storage::save_results(&hierarchy, &leaf_ids, &args.output_dir)?;

    log::info!("Clustering complete. Results saved to {}", args.output_dir);

    Ok(())
}
