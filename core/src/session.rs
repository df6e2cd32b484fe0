//! Session records, duration attachment and final ordering.

use crate::{
    duration::DurationSampler,
    rng::SimRng,
    types::{ContentId, SimTime, UserId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    /// The one guaranteed session every user gets.
    #[default]
    Baseline,
    /// Produced by an arrival process.
    Sampled,
}

/// A session open instant that has not been given a length yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingSession {
    pub content_id: ContentId,
    pub user_id:    UserId,
    pub start_time: SimTime,
    pub kind:       SessionKind,
}

/// One finished session. `end_time > start_time` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "video_id")]
    pub content_id: ContentId,
    pub user_id:    UserId,
    pub start_time: SimTime,
    pub end_time:   SimTime,
    #[serde(skip)]
    pub kind:       SessionKind,
}

/// Give every pending session a length, in generation order.
pub fn attach_durations(
    pending: Vec<PendingSession>,
    sampler: &dyn DurationSampler,
    rng: &mut SimRng,
) -> Vec<SessionRecord> {
    let integral = sampler.integral();
    pending
        .into_iter()
        .map(|p| {
            let start_time = if integral { p.start_time.floor() } else { p.start_time };
            let duration = sampler.sample(rng);
            let end_time = start_time + duration;
            debug_assert!(
                end_time > start_time,
                "{} duration {duration} vanished at start {start_time}",
                sampler.name()
            );
            SessionRecord {
                content_id: p.content_id,
                user_id:    p.user_id,
                start_time,
                end_time,
                kind:       p.kind,
            }
        })
        .collect()
}

/// Stable sort ascending by start time. No filtering, no deduplication:
/// ties keep generation order.
pub fn assemble(mut records: Vec<SessionRecord>) -> Vec<SessionRecord> {
    records.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
    records
}
