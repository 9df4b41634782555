use crate::config::Config;
use crate::model::Agent;
use anyhow::{Context, Result};
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use rand_distr::Uniform;

/// Inclusive bounds of the propensity drawn for each new agent.
pub const PROPENSITY_RANGE: (i32, i32) = (-5, 5);

/// Simulation engine.
///
/// Holds the configuration, the live agents, the accrued tax and the random
/// number generator, and provides methods to run rounds and prune agents.
pub struct Community {
    cfg: Config,
    agt_vec: Vec<Agent>,
    total_tax: f64,
    next_id: u64,
    rounds_completed: usize,
    rng: ChaCha12Rng,
}

impl Community {
    /// Create a new `Community` with `cfg.population` freshly drawn agents.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn new(cfg: Config) -> Result<Self> {
        cfg.validate().context("failed to validate config")?;

        let rng = match cfg.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::try_from_os_rng()?,
        };

        let mut community = Self {
            agt_vec: Vec::with_capacity(cfg.population),
            cfg,
            total_tax: 0.0,
            next_id: 0,
            rounds_completed: 0,
            rng,
        };

        let (lo, hi) = PROPENSITY_RANGE;
        let propensity_dist = Uniform::new_inclusive(lo, hi)?;
        for _ in 0..community.cfg.population {
            let propensity = propensity_dist.sample(&mut community.rng);
            let id = community.next_id();
            community.agt_vec.push(Agent::new(id, propensity));
        }

        log::info!(
            "initialized community of {} agents",
            community.agt_vec.len()
        );

        Ok(community)
    }

    /// Perform `n_rounds` rounds of shuffling and pairwise trading.
    pub fn run_rounds(&mut self, n_rounds: usize) {
        for i_round in 0..n_rounds {
            self.agt_vec.shuffle(&mut self.rng);
            self.settle_round();
            self.rounds_completed += 1;

            log::debug!(
                "completed round {} (total tax {:.4})",
                self.rounds_completed,
                self.total_tax
            );

            let progress = 100.0 * (i_round + 1) as f64 / n_rounds as f64;
            if (i_round + 1) % (n_rounds / 10).max(1) == 0 {
                log::info!("completed {progress:06.2}%");
            }
        }
    }

    /// Remove every agent whose asset is zero or negative.
    ///
    /// Returns the number of removed agents.
    pub fn prune_insolvent(&mut self) -> usize {
        let n_agt = self.agt_vec.len();
        self.agt_vec.retain(|agt| !agt.is_insolvent());
        let n_removed = n_agt - self.agt_vec.len();
        log::info!(
            "removed {n_removed} insolvent agents, {} remain",
            self.agt_vec.len()
        );
        n_removed
    }

    /// Live agents in their current order.
    pub fn agents(&self) -> &[Agent] {
        &self.agt_vec
    }

    pub fn total_tax(&self) -> f64 {
        self.total_tax
    }

    /// Number of agents at initialization.
    pub fn population(&self) -> usize {
        self.cfg.population
    }

    pub fn transaction_price(&self) -> f64 {
        self.cfg.transaction_price
    }

    pub fn tax_rate(&self) -> f64 {
        self.cfg.tax_rate
    }

    pub fn rounds_completed(&self) -> usize {
        self.rounds_completed
    }

    pub fn cfg(&self) -> &Config {
        &self.cfg
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // Adjacent windows: every agent but the last consumes, every agent but the
    // first serves, so interior agents trade twice per round.
    fn settle_round(&mut self) {
        let price = self.cfg.transaction_price;
        let tax_rate = self.cfg.tax_rate;
        for i_agt in 1..self.agt_vec.len() {
            self.agt_vec[i_agt - 1].consume(price);
            self.total_tax += self.agt_vec[i_agt].serve(price, tax_rate);
        }
    }
}
