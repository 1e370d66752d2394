//! Cross-section Mover's Distance
//!
//! Samples random 2-D events, splits them into two datasets, computes every
//! EMD between the datasets, then uses those EMDs as ground distances for
//! one more EMD between the datasets themselves.
//!
//! Options: --events, --particles, --jobs, --config

use clap::Parser;
use wasserstein::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Total events, split evenly into two datasets
    #[arg(short, long, default_value_t = 200)]
    events: usize,
    /// Particles per event
    #[arg(short, long, default_value_t = 25)]
    particles: usize,
    /// Worker threads, 0 for every CPU
    #[arg(short, long, default_value_t = 0)]
    jobs: usize,
    /// JSON file of event-level EMD parameters
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

type Event2 = VectorEvent<Euclidean2>;

fn main() -> anyhow::Result<()> {
    wasserstein::log(log::LevelFilter::Info)?;
    let args = Args::parse();
    anyhow::ensure!(args.events >= 2, "need at least two events");
    let params = match args.config {
        Some(ref path) => serde_json::from_str::<Params>(&std::fs::read_to_string(path)?)?,
        None => Params::from((0.4, 1., true)),
    };
    let events = (0..args.events)
        .map(|_| Event2::random(args.particles))
        .collect::<Vec<_>>();
    let (a, b) = events.split_at(events.len() / 2);

    let batch = Batch {
        n_jobs: args.jobs,
        ..Batch::default()
    };
    let ref mut pairwise =
        PairwiseEmd::<EuclideanDistance2, Event2>::new(params, EuclideanDistance2::default(), batch)?;
    pairwise.preprocess(CenterWeightedCentroid);
    log::info!("\n{}", pairwise.description());
    pairwise.compute(a, Some(b))?;
    let emds = pairwise.emds();
    let min = emds.iter().copied().fold(Energy::INFINITY, Energy::min);
    let max = emds.iter().copied().fold(Energy::NEG_INFINITY, Energy::max);
    log::info!("{:<32}{:<32}", "min emd", min);
    log::info!("{:<32}{:<32}", "max emd", max);
    log::info!("{:<32}{:<32}", "emds", emds.len());

    let sigma = Params {
        do_timing: true,
        ..Params::from((1., 1., true))
    };
    let ground = Precomputed::new(pairwise.n_a(), pairwise.n_b(), emds.to_vec())?;
    let ref mut sigmamd = Emd::<Precomputed>::new(sigma, ground)?;
    log::info!("\n{}", sigmamd.description());
    let result = sigmamd.compute(
        &VectorEvent::uniform(pairwise.n_a()),
        &VectorEvent::uniform(pairwise.n_b()),
    );
    let duration = result.duration().unwrap_or_default();
    let distance = result.into_result()?;
    log::info!("{:<32}{:<32}", "cross-section mover's distance", distance);
    log::info!("{:<32}{:<32}", "done in", format!("{:.3?}", duration));
    Ok(())
}
