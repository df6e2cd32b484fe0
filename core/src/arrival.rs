//! Arrival processes: when sessions open, and for whom.
//!
//! Two disciplines share one trait so the engine can swap them from
//! config:
//!   - SinusoidalArrivals: one global non-homogeneous Poisson process,
//!     stepped by exponential gaps at the current rate.
//!   - PerIntervalArrivals: a baseline session per user, then
//!     homogeneous Poisson extras in each partition interval.

use crate::{
    config::{ArrivalDiscipline, BaselinePlacement, SimulationConfig},
    error::{GenError, GenResult},
    interval::{Interval, Partition},
    popularity::UserAssignment,
    rng::SimRng,
    session::{PendingSession, SessionKind},
    types::{SimTime, UserId},
};
use rand_distr::{Exp, Poisson};
use std::f64::consts::PI;

/// Any computed rate at or below this is clamped up to it.
pub const RATE_FLOOR: f64 = 1e-4;

/// Inputs an arrival process may read. Built once per run by the engine.
pub struct ArrivalContext<'a> {
    pub partition:  &'a Partition,
    pub assignment: &'a UserAssignment,
}

/// What an arrival process hands back.
#[derive(Debug, Clone, Default)]
pub struct Arrivals {
    /// Open instants in generation order.
    pub sessions:  Vec<PendingSession>,
    /// Partition intervals with their drawn rates. Empty when the
    /// discipline does not use per-interval rates.
    pub intervals: Vec<Interval>,
}

/// The contract every arrival discipline fulfils.
pub trait ArrivalProcess {
    fn name(&self) -> &'static str;

    fn generate(&self, ctx: &ArrivalContext<'_>, rng: &mut SimRng) -> GenResult<Arrivals>;
}

pub fn process_for(config: &SimulationConfig) -> Box<dyn ArrivalProcess> {
    let p = config.params();
    match p.arrival {
        ArrivalDiscipline::Sinusoidal => Box::new(SinusoidalArrivals {
            base_rate: p.base_rate,
            amplitude: p.amplitude,
            period:    p.period,
            target:    p.session_count,
        }),
        ArrivalDiscipline::PerInterval => Box::new(PerIntervalArrivals {
            rate_min: p.interval_rate_min,
            rate_max: p.interval_rate_max,
            baseline: p.baseline,
        }),
    }
}

fn clamp_rate(rate: f64) -> f64 {
    if rate > RATE_FLOOR {
        rate
    } else {
        log::debug!("arrivals: rate {rate} clamped to {RATE_FLOOR}");
        RATE_FLOOR
    }
}

fn pick_user(assignment: &UserAssignment, rng: &mut SimRng) -> UserId {
    rng.next_u64_below(assignment.user_count() as u64) as UserId
}

// ── Sinusoidal NHPP ────────────────────────────────────────────────

pub struct SinusoidalArrivals {
    pub base_rate: f64,
    pub amplitude: f64,
    pub period:    f64,
    /// Exactly this many arrivals are produced. The horizon does not
    /// bound them.
    pub target:    usize,
}

impl SinusoidalArrivals {
    /// λ(t) = base · (1 + amplitude · sin(2π · (t mod period) / period)),
    /// floored at RATE_FLOOR.
    pub fn rate_at(&self, t: SimTime) -> f64 {
        let phase = 2.0 * PI * (t % self.period) / self.period;
        clamp_rate(self.base_rate * (1.0 + self.amplitude * phase.sin()))
    }
}

impl ArrivalProcess for SinusoidalArrivals {
    fn name(&self) -> &'static str { "sinusoidal" }

    fn generate(&self, ctx: &ArrivalContext<'_>, rng: &mut SimRng) -> GenResult<Arrivals> {
        let mut sessions = Vec::new();
        let mut t: SimTime = 0.0;

        while sessions.len() < self.target {
            let gap_dist = Exp::new(self.rate_at(t))
                .map_err(|e| GenError::distribution("exponential", e))?;
            let gap: f64 = rng.sample(&gap_dist);
            t += gap;
            let user_id = pick_user(ctx.assignment, rng);
            sessions.push(PendingSession {
                content_id: ctx.assignment.content_of(user_id),
                user_id,
                start_time: t,
                kind: SessionKind::Sampled,
            });
        }

        Ok(Arrivals {
            sessions,
            intervals: Vec::new(),
        })
    }
}

// ── Per-interval homogeneous Poisson ───────────────────────────────

pub struct PerIntervalArrivals {
    pub rate_min: f64,
    pub rate_max: f64,
    pub baseline: BaselinePlacement,
}

impl PerIntervalArrivals {
    /// One session per user, placed per `self.baseline`.
    pub fn baseline_sessions(
        &self,
        partition: &Partition,
        assignment: &UserAssignment,
        rng: &mut SimRng,
    ) -> Vec<PendingSession> {
        let spans: Vec<(SimTime, SimTime)> = partition.spans().collect();
        assignment
            .iter()
            .map(|(user_id, content_id)| {
                let (lo, hi) = match self.baseline {
                    BaselinePlacement::Horizon => (0.0, partition.horizon()),
                    BaselinePlacement::DesignatedInterval => {
                        spans[user_id as usize % spans.len()]
                    }
                };
                PendingSession {
                    content_id,
                    user_id,
                    start_time: rng.uniform(lo, hi),
                    kind: SessionKind::Baseline,
                }
            })
            .collect()
    }

    /// Poisson(rate) extra sessions uniform inside `interval`, each for a
    /// uniformly drawn user. Degenerate intervals yield nothing.
    pub fn extra_sessions(
        &self,
        interval: &Interval,
        assignment: &UserAssignment,
        rng: &mut SimRng,
    ) -> GenResult<Vec<PendingSession>> {
        if interval.is_degenerate() {
            log::debug!(
                "arrivals: skipping degenerate interval [{}, {})",
                interval.start,
                interval.end
            );
            return Ok(Vec::new());
        }
        let count_dist = Poisson::new(clamp_rate(interval.rate))
            .map_err(|e| GenError::distribution("poisson", e))?;
        let count: f64 = rng.sample(&count_dist);
        let count = count as u64;

        let sessions = (0..count)
            .map(|_| {
                let start_time = rng.uniform(interval.start, interval.end);
                let user_id = pick_user(assignment, rng);
                PendingSession {
                    content_id: assignment.content_of(user_id),
                    user_id,
                    start_time,
                    kind: SessionKind::Sampled,
                }
            })
            .collect();
        Ok(sessions)
    }
}

impl ArrivalProcess for PerIntervalArrivals {
    fn name(&self) -> &'static str { "per_interval" }

    fn generate(&self, ctx: &ArrivalContext<'_>, rng: &mut SimRng) -> GenResult<Arrivals> {
        let mut sessions = self.baseline_sessions(ctx.partition, ctx.assignment, rng);
        let mut intervals = Vec::with_capacity(ctx.partition.interval_count());

        for (start, end) in ctx.partition.spans() {
            let interval = Interval {
                start,
                end,
                rate: clamp_rate(rng.uniform(self.rate_min, self.rate_max)),
            };
            let extras = self.extra_sessions(&interval, ctx.assignment, rng)?;
            log::debug!(
                "arrivals: interval [{start}, {end}) rate={:.3} extras={}",
                interval.rate,
                extras.len()
            );
            sessions.extend(extras);
            intervals.push(interval);
        }

        Ok(Arrivals {
            sessions,
            intervals,
        })
    }
}
