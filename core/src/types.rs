//! Shared primitive types used across the generator.

/// A point on the simulated timeline, in seconds from 0.
pub type SimTime = f64;

/// Content identifier. Content of popularity rank `r` has id `r - 1`.
pub type ContentId = u32;

/// User identifier, `0..user_count`.
pub type UserId = u32;
