use serde::{Deserialize, Serialize};

/// Starting asset balance of every agent.
pub const INITIAL_ASSET: f64 = 100.0;

/// Consumer of the community.
///
/// Each agent has a fixed propensity (`propensity`) that shifts the amount it
/// spends whenever it consumes, and keeps running totals of its activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    id: u64,
    propensity: i32,
    asset: f64,
    total_consumption: f64,
    transaction_count: u64,
}

impl Agent {
    /// Create a new agent with the initial asset balance and no activity.
    pub fn new(id: u64, propensity: i32) -> Self {
        Self {
            id,
            propensity,
            asset: INITIAL_ASSET,
            total_consumption: 0.0,
            transaction_count: 0,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn propensity(&self) -> i32 {
        self.propensity
    }

    pub fn asset(&self) -> f64 {
        self.asset
    }

    pub fn total_consumption(&self) -> f64 {
        self.total_consumption
    }

    pub fn transaction_count(&self) -> u64 {
        self.transaction_count
    }

    /// Buy one transaction at `price`, shifted by the agent's propensity.
    ///
    /// The amount may be negative, in which case the agent gains assets.
    pub fn consume(&mut self, price: f64) {
        let amount = price + self.propensity as f64;
        self.asset -= amount;
        self.total_consumption += amount;
        self.transaction_count += 1;
    }

    /// Sell one transaction at `price` and return the tax owed on it.
    pub fn serve(&mut self, price: f64, tax_rate: f64) -> f64 {
        self.asset += price * (1.0 - tax_rate);
        self.transaction_count += 1;
        price * tax_rate
    }

    pub fn is_insolvent(&self) -> bool {
        self.asset <= 0.0
    }
}
