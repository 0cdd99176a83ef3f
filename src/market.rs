use std::collections::VecDeque;

use rand::Rng;

/// Tuning for the simulated pack market.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimParams {
    pub seed_points: usize,
    pub seed_volatility: f64,
    pub seed_floor: f64,
    /// Centre of the tick draw. Anything below 0.5 drifts the walk upward.
    pub tick_bias: f64,
    pub tick_volatility: f64,
    pub tick_floor: f64,
    pub window: usize,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            seed_points: 20,
            seed_volatility: 0.1,
            seed_floor: 0.01,
            tick_bias: 0.48,
            tick_volatility: 0.05,
            tick_floor: 0.001,
            window: 50,
        }
    }
}

pub type PriceHistory = VecDeque<f64>;

/// Builds the synthetic backstory a pack is minted with: the base price
/// followed by `seed_points` random-walk steps.
pub fn seed_history<R: Rng + ?Sized>(base: f64, params: &SimParams, rng: &mut R) -> PriceHistory {
    let mut history = VecDeque::with_capacity(params.seed_points + 1);
    history.push_back(base);
    let mut current = base;
    for _ in 0..params.seed_points {
        let change = (rng.gen_range(0.0..1.0) - 0.5) * base * params.seed_volatility;
        current += change;
        if current < params.seed_floor {
            current = params.seed_floor;
        }
        history.push_back(current);
    }
    history
}

/// Percent move between the last two samples. Zero when there is no previous
/// sample to compare against.
pub fn percent_change(history: &PriceHistory) -> f64 {
    let len = history.len();
    if len < 2 {
        return 0.0;
    }
    let prev = history[len - 2];
    let last = history[len - 1];
    if prev == 0.0 {
        return 0.0;
    }
    (last - prev) / prev * 100.0
}

#[derive(Debug, Clone)]
pub struct PriceFeed {
    history: PriceHistory,
    price: f64,
    params: SimParams,
}

impl PriceFeed {
    pub fn new(history: PriceHistory, params: SimParams) -> Self {
        let mut feed = Self {
            price: history.back().copied().unwrap_or(params.tick_floor),
            history,
            params,
        };
        if feed.history.is_empty() {
            feed.history.push_back(feed.price);
        }
        feed.trim();
        feed
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn history(&self) -> &PriceHistory {
        &self.history
    }

    pub fn percent_change(&self) -> f64 {
        percent_change(&self.history)
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let delta = (rng.gen_range(0.0..1.0) - self.params.tick_bias)
            * self.price
            * self.params.tick_volatility;
        self.price = (self.price + delta).max(self.params.tick_floor);
        self.history.push_back(self.price);
        self.trim();
        self.price
    }

    fn trim(&mut self) {
        while self.history.len() > self.params.window.max(1) {
            self.history.pop_front();
        }
    }
}
