//! Synthetic video-on-demand workload generation.
//!
//! Produces per-session open/close instants, Zipf content popularity and
//! user -> content mappings for downstream cache and CDN simulators.

pub mod arrival;
pub mod config;
pub mod duration;
pub mod engine;
pub mod error;
pub mod interval;
pub mod output;
pub mod popularity;
pub mod rng;
pub mod session;
pub mod types;
