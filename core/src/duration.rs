//! Session length sampling.

use crate::{
    config::DurationPolicy,
    error::{GenError, GenResult},
    rng::SimRng,
    types::SimTime,
};
use rand_distr::LogNormal;

/// Median session length for the continuous policy, seconds.
pub const LOGNORMAL_MEDIAN: f64 = 0.1;
pub const LOGNORMAL_SIGMA: f64 = 0.05;

/// Discrete lengths are drawn from [DISCRETE_MIN, DISCRETE_MAX).
pub const DISCRETE_MIN: u64 = 1;
pub const DISCRETE_MAX: u64 = 10;

/// A pluggable session-length policy. Every draw is strictly positive.
pub trait DurationSampler {
    fn name(&self) -> &'static str;

    /// True when this policy works in whole seconds; start instants are
    /// then floored to match.
    fn integral(&self) -> bool;

    fn sample(&self, rng: &mut SimRng) -> SimTime;
}

pub struct LogNormalDuration {
    dist: LogNormal<f64>,
}

impl LogNormalDuration {
    pub fn new() -> GenResult<Self> {
        let dist = LogNormal::new(LOGNORMAL_MEDIAN.ln(), LOGNORMAL_SIGMA)
            .map_err(|e| GenError::distribution("log-normal", e))?;
        Ok(Self { dist })
    }
}

impl DurationSampler for LogNormalDuration {
    fn name(&self) -> &'static str { "lognormal" }

    fn integral(&self) -> bool { false }

    fn sample(&self, rng: &mut SimRng) -> SimTime {
        rng.sample(&self.dist)
    }
}

pub struct DiscreteDuration;

impl DurationSampler for DiscreteDuration {
    fn name(&self) -> &'static str { "discrete" }

    fn integral(&self) -> bool { true }

    fn sample(&self, rng: &mut SimRng) -> SimTime {
        (DISCRETE_MIN + rng.next_u64_below(DISCRETE_MAX - DISCRETE_MIN)) as SimTime
    }
}

pub fn sampler_for(policy: DurationPolicy) -> GenResult<Box<dyn DurationSampler>> {
    Ok(match policy {
        DurationPolicy::LogNormal => Box::new(LogNormalDuration::new()?),
        DurationPolicy::Discrete  => Box::new(DiscreteDuration),
    })
}
