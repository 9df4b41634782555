use crate::engine::Community;
use crate::model::Agent;
use crate::stats::{Accumulator, AccumulatorReport};
use anyhow::{Context, Result};
use rmp_serde::encode;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Statistics of all agents sharing one propensity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropensityGroup {
    pub propensity: i32,
    pub n_agt: usize,
    pub asset: AccumulatorReport,
    pub total_consumption: AccumulatorReport,
    pub transaction_count: AccumulatorReport,
}

struct GroupAccumulator {
    asset: Accumulator,
    total_consumption: Accumulator,
    transaction_count: Accumulator,
}

impl GroupAccumulator {
    fn new() -> Self {
        Self {
            asset: Accumulator::new(),
            total_consumption: Accumulator::new(),
            transaction_count: Accumulator::new(),
        }
    }

    fn add(&mut self, agt: &Agent) {
        self.asset.add(agt.asset());
        self.total_consumption.add(agt.total_consumption());
        self.transaction_count.add(agt.transaction_count() as f64);
    }
}

/// Group agents by propensity, in ascending order, skipping empty groups.
pub fn summarize(agt_vec: &[Agent]) -> Vec<PropensityGroup> {
    let mut acc_map: BTreeMap<i32, GroupAccumulator> = BTreeMap::new();
    for agt in agt_vec {
        acc_map
            .entry(agt.propensity())
            .or_insert_with(GroupAccumulator::new)
            .add(agt);
    }

    acc_map
        .into_iter()
        .map(|(propensity, acc)| PropensityGroup {
            propensity,
            n_agt: acc.asset.n_vals(),
            asset: acc.asset.report(),
            total_consumption: acc.total_consumption.report(),
            transaction_count: acc.transaction_count.report(),
        })
        .collect()
}

/// Final state of a run, handed to external reporting and plotting tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub rounds: usize,
    pub total_tax: f64,
    pub agt_vec: Vec<Agent>,
    pub groups: Vec<PropensityGroup>,
}

impl Report {
    pub fn new(community: &Community) -> Self {
        let agt_vec = community.agents().to_vec();
        let groups = summarize(&agt_vec);
        Self {
            rounds: community.rounds_completed(),
            total_tax: community.total_tax(),
            agt_vec,
            groups,
        }
    }

    /// Write the report to a MessagePack-encoded file.
    pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let file = file.as_ref();
        let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
        let mut writer = BufWriter::new(file);
        encode::write_named(&mut writer, self).context("failed to serialize report")?;
        writer.flush().context("failed to flush writer stream")?;
        Ok(())
    }
}
