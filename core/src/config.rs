//! Run configuration.
//!
//! `ConfigParams` is the raw, unchecked parameter set (JSON file, CLI
//! flags or prompts). `SimulationConfig::new` is the only way to obtain
//! a config the engine accepts, and it rejects bad input before any
//! sampling happens.

use crate::error::{GenError, GenResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Largest accepted horizon, seconds. Below this a 0.05 s duration is
/// still representable on top of any start instant, and whole-second cut
/// points stay exact.
pub const MAX_HORIZON: f64 = 1e12;

/// Largest accepted sinusoidal session target.
pub const MAX_SESSION_COUNT: usize = 50_000_000;

/// How session start instants are produced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalDiscipline {
    /// One global non-homogeneous Poisson process with a sinusoidal rate.
    Sinusoidal,
    /// Baseline session per user plus homogeneous Poisson extras per interval.
    PerInterval,
}

/// How session lengths are drawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DurationPolicy {
    /// Log-normal, fractional seconds.
    LogNormal,
    /// Uniform integer in [1, 10); start instants become whole seconds.
    Discrete,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PopularityPolicy {
    /// rank^-a weights normalised into a pmf. Canonical.
    Normalized,
    /// Unbounded Zeta variate reduced modulo the content count.
    /// Skews mass toward low ids; kept for comparison runs only.
    LegacyModulo,
}

/// Where a user's guaranteed baseline session may start.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BaselinePlacement {
    /// Anywhere in [0, horizon).
    Horizon,
    /// Inside interval `user_id mod interval_count`.
    DesignatedInterval,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Fixed-width ` ID     AS       FS` table.
    Table,
    /// JSON document with partition, rates and sessions.
    Document,
}

impl OutputFormat {
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Table    => "dados_videos.txt",
            Self::Document => "dados_videos.json",
        }
    }
}

macro_rules! selector_from_str {
    ($ty:ty, $param:literal, { $($text:literal => $variant:expr),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = GenError;

            fn from_str(s: &str) -> GenResult<Self> {
                match s.to_ascii_lowercase().as_str() {
                    $($text => Ok($variant),)+
                    other => Err(GenError::invalid($param, format!("unknown selector '{other}'"))),
                }
            }
        }
    };
}

selector_from_str!(ArrivalDiscipline, "arrival", {
    "sinusoidal"   => ArrivalDiscipline::Sinusoidal,
    "interval"     => ArrivalDiscipline::PerInterval,
    "per_interval" => ArrivalDiscipline::PerInterval,
});

selector_from_str!(DurationPolicy, "duration", {
    "lognormal"  => DurationPolicy::LogNormal,
    "log_normal" => DurationPolicy::LogNormal,
    "discrete"   => DurationPolicy::Discrete,
});

selector_from_str!(PopularityPolicy, "popularity", {
    "normalized"    => PopularityPolicy::Normalized,
    "legacy"        => PopularityPolicy::LegacyModulo,
    "legacy_modulo" => PopularityPolicy::LegacyModulo,
});

selector_from_str!(BaselinePlacement, "baseline", {
    "horizon"             => BaselinePlacement::Horizon,
    "designated_interval" => BaselinePlacement::DesignatedInterval,
});

selector_from_str!(OutputFormat, "format", {
    "table"    => OutputFormat::Table,
    "document" => OutputFormat::Document,
    "json"     => OutputFormat::Document,
});

/// Raw parameters as supplied by the user. Nothing here is trusted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigParams {
    pub seed:              u64,
    /// Simulated time span, seconds.
    pub horizon:           f64,
    pub content_count:     u32,
    pub user_count:        u32,
    pub zipf_exponent:     f64,
    /// Target arrivals for the sinusoidal discipline.
    pub session_count:     usize,
    pub base_rate:         f64,
    /// Relative swing of the sinusoidal rate, [0, 1].
    pub amplitude:         f64,
    /// Sinusoidal rate period, seconds.
    pub period:            f64,
    pub interval_rate_min: f64,
    pub interval_rate_max: f64,
    pub arrival:           ArrivalDiscipline,
    pub duration:          DurationPolicy,
    pub popularity:        PopularityPolicy,
    pub baseline:          BaselinePlacement,
    pub output:            OutputFormat,
}

impl Default for ConfigParams {
    fn default() -> Self {
        Self {
            seed:              42,
            horizon:           100.0,
            content_count:     1000,
            user_count:        100,
            zipf_exponent:     1.2,
            session_count:     100,
            base_rate:         1.0,
            amplitude:         0.5,
            period:            24.0,
            interval_rate_min: 0.5,
            interval_rate_max: 5.0,
            arrival:           ArrivalDiscipline::PerInterval,
            duration:          DurationPolicy::LogNormal,
            popularity:        PopularityPolicy::Normalized,
            baseline:          BaselinePlacement::Horizon,
            output:            OutputFormat::Document,
        }
    }
}

impl ConfigParams {
    /// Load parameters from a JSON file. Missing keys take their defaults.
    pub fn load(path: &str) -> GenResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let params: Self = serde_json::from_str(&content)?;
        Ok(params)
    }
}

/// A validated, immutable run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    params: ConfigParams,
}

impl SimulationConfig {
    /// Validate `params`. Every range and positivity check lives here.
    pub fn new(params: ConfigParams) -> GenResult<Self> {
        require_positive("horizon", params.horizon)?;
        if params.horizon > MAX_HORIZON {
            return Err(GenError::invalid(
                "horizon",
                format!("must be <= {MAX_HORIZON:e}, got {}", params.horizon),
            ));
        }
        if params.content_count == 0 {
            return Err(GenError::invalid("content_count", "must be at least 1"));
        }
        if params.user_count == 0 {
            return Err(GenError::invalid("user_count", "must be at least 1"));
        }
        require_positive("zipf_exponent", params.zipf_exponent)?;
        if params.popularity == PopularityPolicy::LegacyModulo && params.zipf_exponent <= 1.0 {
            return Err(GenError::invalid(
                "zipf_exponent",
                format!(
                    "legacy modulo popularity needs an exponent > 1, got {}",
                    params.zipf_exponent
                ),
            ));
        }
        if params.session_count == 0 || params.session_count > MAX_SESSION_COUNT {
            return Err(GenError::invalid(
                "session_count",
                format!(
                    "must lie in [1, {MAX_SESSION_COUNT}], got {}",
                    params.session_count
                ),
            ));
        }
        require_positive("base_rate", params.base_rate)?;
        if !(0.0..=1.0).contains(&params.amplitude) {
            return Err(GenError::invalid(
                "amplitude",
                format!("must lie in [0, 1], got {}", params.amplitude),
            ));
        }
        require_positive("period", params.period)?;
        require_positive("interval_rate_min", params.interval_rate_min)?;
        require_positive("interval_rate_max", params.interval_rate_max)?;
        if params.interval_rate_max < params.interval_rate_min {
            return Err(GenError::invalid(
                "interval_rate_max",
                format!(
                    "must be >= interval_rate_min ({}), got {}",
                    params.interval_rate_min, params.interval_rate_max
                ),
            ));
        }
        Ok(Self { params })
    }

    pub fn params(&self) -> &ConfigParams {
        &self.params
    }

    pub fn seed(&self) -> u64 {
        self.params.seed
    }

    pub fn horizon(&self) -> f64 {
        self.params.horizon
    }

    /// Small fixed config for tests: horizon 100, 5 contents, 10 users.
    pub fn default_test() -> Self {
        let params = ConfigParams {
            seed:          7,
            horizon:       100.0,
            content_count: 5,
            user_count:    10,
            zipf_exponent: 1.2,
            ..ConfigParams::default()
        };
        Self { params }
    }
}

fn require_positive(parameter: &'static str, value: f64) -> GenResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GenError::invalid(
            parameter,
            format!("must be a finite value > 0, got {value}"),
        ))
    }
}
