mod analysis;
mod config;
mod engine;
mod model;
mod stats;

use crate::analysis::Report;
use crate::config::Config;
use crate::engine::Community;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[arg(long, default_value_t = 20)]
    population: usize,

    #[arg(long, default_value_t = 10.0)]
    price: f64,

    #[arg(long, default_value_t = 0.02)]
    tax_rate: f64,

    #[arg(long, default_value_t = 30)]
    rounds: usize,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let cfg = Config {
        population: args.population,
        transaction_price: args.price,
        tax_rate: args.tax_rate,
        seed: args.seed,
    };

    let mut community = Community::new(cfg).context("failed to construct community")?;
    community.run_rounds(args.rounds);
    community.prune_insolvent();

    let report = Report::new(&community);
    for agt in &report.agt_vec {
        log::info!(
            "agent {}: propensity {}, asset {:.2}, total consumption {:.2}, transactions {}",
            agt.id(),
            agt.propensity(),
            agt.asset(),
            agt.total_consumption(),
            agt.transaction_count()
        );
    }
    for group in &report.groups {
        log::info!(
            "propensity {:+}: {} agents, mean asset {:.2}, mean consumption {:.2}, mean transactions {:.2}",
            group.propensity,
            group.n_agt,
            group.asset.mean,
            group.total_consumption.mean,
            group.transaction_count.mean
        );
    }
    log::info!(
        "{} of {} agents survived {} rounds at price {} and tax rate {}",
        report.agt_vec.len(),
        community.population(),
        report.rounds,
        community.transaction_price(),
        community.tax_rate()
    );
    log::info!(
        "total tax {:.4} ({:.4} per sale)",
        report.total_tax,
        community.cfg().tax_per_sale()
    );

    if let Some(file) = args.report {
        report
            .save(&file)
            .with_context(|| format!("failed to save report to {file:?}"))?;
        log::info!("saved {file:?}");
    }

    Ok(())
}
