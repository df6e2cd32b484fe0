//! The generation engine.
//!
//! STAGE ORDER (fixed, never reordered; the RNG stream depends on it):
//!   1. Interval partitioner
//!   2. Popularity model + user assignment
//!   3. Arrival process
//!   4. Duration sampler
//!   5. Assembler (stable sort, no randomness)
//!
//! RULES:
//!   - All randomness flows through the single SimRng owned here.
//!   - A run is one-shot: `run` consumes the engine.

use crate::{
    arrival::{self, ArrivalContext, ArrivalProcess},
    config::SimulationConfig,
    duration::{self, DurationSampler},
    error::GenResult,
    interval,
    output::SimulationOutput,
    popularity::{self, PopularityDistribution},
    rng::SimRng,
    session,
};

pub struct WorkloadEngine {
    config:    SimulationConfig,
    rng:       SimRng,
    arrivals:  Box<dyn ArrivalProcess>,
    durations: Box<dyn DurationSampler>,
}

impl WorkloadEngine {
    /// Wire the arrival and duration strategies named by the config.
    pub fn build(config: SimulationConfig) -> GenResult<Self> {
        let arrivals = arrival::process_for(&config);
        let durations = duration::sampler_for(config.params().duration)?;
        Ok(Self::with_strategies(config, arrivals, durations))
    }

    /// Wire explicit strategies, ignoring the config's selectors.
    pub fn with_strategies(
        config: SimulationConfig,
        arrivals: Box<dyn ArrivalProcess>,
        durations: Box<dyn DurationSampler>,
    ) -> Self {
        Self {
            rng: SimRng::from_seed(config.seed()),
            config,
            arrivals,
            durations,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn run(mut self) -> GenResult<SimulationOutput> {
        let p = self.config.params();
        let rng = &mut self.rng;

        // 1.
        let partition = interval::partition(p.horizon, rng);

        // 2.
        let popularity = PopularityDistribution::zipf(p.content_count, p.zipf_exponent);
        let assignment = popularity::assign_users(&popularity, p.popularity, p.user_count, rng)?;

        // 3.
        let ctx = ArrivalContext {
            partition:  &partition,
            assignment: &assignment,
        };
        let arrivals = self.arrivals.generate(&ctx, rng)?;
        log::debug!(
            "engine: {} produced {} open instants",
            self.arrivals.name(),
            arrivals.sessions.len()
        );

        // 4.
        let records = session::attach_durations(arrivals.sessions, self.durations.as_ref(), rng);

        // 5.
        let sessions = session::assemble(records);

        log::info!(
            "seed={} arrivals={} durations={} intervals={} sessions={}",
            rng.seed(),
            self.arrivals.name(),
            self.durations.name(),
            partition.interval_count(),
            sessions.len()
        );

        Ok(SimulationOutput::new(
            popularity.exponent(),
            &partition,
            &arrivals.intervals,
            sessions,
        ))
    }
}

/// Build and run in one call.
pub fn generate(config: SimulationConfig) -> GenResult<SimulationOutput> {
    WorkloadEngine::build(config)?.run()
}
