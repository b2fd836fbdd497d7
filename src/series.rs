//! Synthetic memory series
//!
//! Each tracked process gets a [`SeriesRule`]: a pure function from the row
//! index (and the row's seeded generator) to a `Private Bytes` value.
//!
//! Before each row the generator is re-seeded with the row index, so a value
//! depends only on its index, never on how many rows were produced before it.
//! Randomized rules draw from that generator in column order, which means two
//! noisy columns in the same row share one stream.
//!
//! # Example
//!
//! ```
//! use perfmon_fixtures::series::{row_rng, SeriesRule};
//!
//! let leak = SeriesRule::Linear { baseline: 10_000_000, slope: 5120 };
//! let mut rng = row_rng(3);
//! assert_eq!(leak.value(3, &mut rng), 10_015_360);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Growth pattern of one synthetic series
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SeriesRule {
    /// Steady leak: `baseline + i * slope`
    Linear { baseline: u64, slope: u64 },

    /// No trend: `baseline + R(i)` with `R(i)` in `[-amplitude, amplitude]`
    Noise { baseline: u64, amplitude: u64 },

    /// Stepwise leak: a new plateau of `increment` every `every` samples,
    /// plus jitter in `[-jitter, jitter]`
    Step {
        baseline: u64,
        every: u64,
        increment: u64,
        #[serde(default)]
        jitter: u64,
    },

    /// Saw-tooth oscillation over `period` samples, no randomness
    Periodic {
        baseline: u64,
        period: u64,
        increment: u64,
    },
}

/// Generator for row `index`, seeded with the index itself
pub fn row_rng(index: u64) -> StdRng {
    StdRng::seed_from_u64(index)
}

impl SeriesRule {
    /// Compute the value at `index`
    ///
    /// Randomized rules consume from `rng`; deterministic rules leave it
    /// untouched. The result saturates at zero and at `u64::MAX`.
    pub fn value(&self, index: u64, rng: &mut StdRng) -> u64 {
        let index = i128::from(index);
        let raw = match *self {
            SeriesRule::Linear { baseline, slope } => {
                i128::from(baseline).saturating_add(index.saturating_mul(i128::from(slope)))
            }
            SeriesRule::Noise {
                baseline,
                amplitude,
            } => i128::from(baseline).saturating_add(jitter(rng, amplitude)),
            SeriesRule::Step {
                baseline,
                every,
                increment,
                jitter: spread,
            } => {
                let step = index / i128::from(every.max(1));
                i128::from(baseline)
                    .saturating_add(step.saturating_mul(i128::from(increment)))
                    .saturating_add(jitter(rng, spread))
            }
            SeriesRule::Periodic {
                baseline,
                period,
                increment,
            } => {
                let phase = index % i128::from(period.max(1));
                i128::from(baseline).saturating_add(phase.saturating_mul(i128::from(increment)))
            }
        };

        u64::try_from(raw.max(0)).unwrap_or(u64::MAX)
    }

    /// The trend component at `index`, ignoring any jitter
    pub fn trend(&self, index: u64) -> u64 {
        let mut rng = row_rng(index);
        self.without_jitter().value(index, &mut rng)
    }

    /// Whether this rule draws from the row generator
    pub fn is_randomized(&self) -> bool {
        match *self {
            SeriesRule::Noise { amplitude, .. } => amplitude > 0,
            SeriesRule::Step { jitter, .. } => jitter > 0,
            SeriesRule::Linear { .. } | SeriesRule::Periodic { .. } => false,
        }
    }

    /// Largest downward deviation from the baseline this rule can produce
    pub fn max_jitter(&self) -> u64 {
        match *self {
            SeriesRule::Noise { amplitude, .. } => amplitude,
            SeriesRule::Step { jitter, .. } => jitter,
            SeriesRule::Linear { .. } | SeriesRule::Periodic { .. } => 0,
        }
    }

    /// The rule's baseline value
    pub fn baseline(&self) -> u64 {
        match *self {
            SeriesRule::Linear { baseline, .. }
            | SeriesRule::Noise { baseline, .. }
            | SeriesRule::Step { baseline, .. }
            | SeriesRule::Periodic { baseline, .. } => baseline,
        }
    }

    fn without_jitter(self) -> Self {
        match self {
            SeriesRule::Noise { baseline, .. } => SeriesRule::Noise {
                baseline,
                amplitude: 0,
            },
            SeriesRule::Step {
                baseline,
                every,
                increment,
                ..
            } => SeriesRule::Step {
                baseline,
                every,
                increment,
                jitter: 0,
            },
            other => other,
        }
    }
}

fn jitter(rng: &mut StdRng, spread: u64) -> i128 {
    if spread == 0 {
        return 0;
    }
    let spread = i128::from(spread);
    rng.gen_range(-spread..=spread)
}
