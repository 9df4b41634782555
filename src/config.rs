use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, ops::RangeBounds};

/// Largest number of agents a community may start with.
pub const MAX_POPULATION: usize = 1_000_000;

/// Community parameters.
///
/// Passed directly by the caller and validated before use.
/// See [`Config::validate`].
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Initial number of agents.
    pub population: usize,

    /// Nominal price of one transaction.
    pub transaction_price: f64,
    /// Fraction of each sale collected as tax.
    pub tax_rate: f64,

    /// Seed of the random number generator (drawn from the OS if absent).
    pub seed: Option<u64>,
}

impl Config {
    /// Check that every parameter is in its valid range.
    ///
    /// # Errors
    /// Returns an error if the population exceeds [`MAX_POPULATION`],
    /// if the price is negative or not finite,
    /// or if the tax rate is outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        check_num(self.population, 0..=MAX_POPULATION).context("invalid population")?;
        check_num(self.transaction_price, 0.0..f64::INFINITY)
            .context("invalid transaction price")?;
        check_num(self.tax_rate, 0.0..=1.0).context("invalid tax rate")?;
        Ok(())
    }

    /// Tax owed on a single sale.
    pub fn tax_per_sale(&self) -> f64 {
        self.transaction_price * self.tax_rate
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    // NaN is never contained in any range.
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
