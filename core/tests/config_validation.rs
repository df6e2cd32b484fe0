//! Parameter validation happens before any sampling.

use vod_workload_core::{
    config::{
        ArrivalDiscipline, ConfigParams, DurationPolicy, OutputFormat, PopularityPolicy,
        SimulationConfig, MAX_HORIZON, MAX_SESSION_COUNT,
    },
    error::GenError,
};

fn rejected_param(params: ConfigParams) -> &'static str {
    match SimulationConfig::new(params) {
        Err(GenError::InvalidParameter { parameter, .. }) => parameter,
        Err(other) => panic!("expected InvalidParameter, got {other}"),
        Ok(_) => panic!("expected rejection"),
    }
}

#[test]
fn defaults_are_valid() {
    let config = SimulationConfig::new(ConfigParams::default()).expect("defaults validate");
    assert_eq!(config.params().arrival, ArrivalDiscipline::PerInterval);
    assert_eq!(config.params().popularity, PopularityPolicy::Normalized);
}

#[test]
fn non_positive_horizon_is_rejected() {
    for horizon in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let p = ConfigParams { horizon, ..ConfigParams::default() };
        assert_eq!(rejected_param(p), "horizon");
    }
}

#[test]
fn horizon_above_precision_bound_is_rejected() {
    let p = ConfigParams { horizon: 1e17, ..ConfigParams::default() };
    assert_eq!(rejected_param(p), "horizon");

    let p = ConfigParams { horizon: MAX_HORIZON * 1.5, ..ConfigParams::default() };
    assert_eq!(rejected_param(p), "horizon");

    let p = ConfigParams { horizon: MAX_HORIZON, ..ConfigParams::default() };
    assert!(SimulationConfig::new(p).is_ok());
}

#[test]
fn oversized_session_count_is_rejected() {
    let p = ConfigParams {
        arrival: ArrivalDiscipline::Sinusoidal,
        session_count: 1usize << 62,
        ..ConfigParams::default()
    };
    assert_eq!(rejected_param(p), "session_count");

    let p = ConfigParams { session_count: MAX_SESSION_COUNT, ..ConfigParams::default() };
    assert!(SimulationConfig::new(p).is_ok());
}

#[test]
fn zero_counts_are_rejected() {
    let p = ConfigParams { content_count: 0, ..ConfigParams::default() };
    assert_eq!(rejected_param(p), "content_count");

    let p = ConfigParams { user_count: 0, ..ConfigParams::default() };
    assert_eq!(rejected_param(p), "user_count");

    let p = ConfigParams { session_count: 0, ..ConfigParams::default() };
    assert_eq!(rejected_param(p), "session_count");
}

#[test]
fn exponent_must_be_positive() {
    let p = ConfigParams { zipf_exponent: 0.0, ..ConfigParams::default() };
    assert_eq!(rejected_param(p), "zipf_exponent");
}

#[test]
fn legacy_popularity_needs_exponent_above_one() {
    let p = ConfigParams {
        zipf_exponent: 0.9,
        popularity: PopularityPolicy::LegacyModulo,
        ..ConfigParams::default()
    };
    assert_eq!(rejected_param(p), "zipf_exponent");

    let p = ConfigParams {
        zipf_exponent: 1.1,
        popularity: PopularityPolicy::LegacyModulo,
        ..ConfigParams::default()
    };
    assert!(SimulationConfig::new(p).is_ok());
}

#[test]
fn amplitude_is_bounded_to_unit_interval() {
    for amplitude in [-0.1, 1.01, f64::NAN] {
        let p = ConfigParams { amplitude, ..ConfigParams::default() };
        assert_eq!(rejected_param(p), "amplitude");
    }
    for amplitude in [0.0, 1.0] {
        let p = ConfigParams { amplitude, ..ConfigParams::default() };
        assert!(SimulationConfig::new(p).is_ok(), "amplitude {amplitude} should pass");
    }
}

#[test]
fn rates_and_period_must_be_positive() {
    let p = ConfigParams { base_rate: 0.0, ..ConfigParams::default() };
    assert_eq!(rejected_param(p), "base_rate");

    let p = ConfigParams { period: -24.0, ..ConfigParams::default() };
    assert_eq!(rejected_param(p), "period");

    let p = ConfigParams { interval_rate_min: 0.0, ..ConfigParams::default() };
    assert_eq!(rejected_param(p), "interval_rate_min");

    let p = ConfigParams {
        interval_rate_min: 4.0,
        interval_rate_max: 2.0,
        ..ConfigParams::default()
    };
    assert_eq!(rejected_param(p), "interval_rate_max");
}

#[test]
fn error_message_names_the_parameter() {
    let p = ConfigParams { amplitude: 2.0, ..ConfigParams::default() };
    let err = SimulationConfig::new(p).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("amplitude"), "message was: {msg}");
    assert!(msg.contains('2'), "message was: {msg}");
}

#[test]
fn params_parse_from_json_with_defaults() {
    let json = r#"{
        "seed": 9,
        "horizon": 3600,
        "arrival": "sinusoidal",
        "duration": "discrete",
        "output": "table"
    }"#;
    let p: ConfigParams = serde_json::from_str(json).unwrap();
    assert_eq!(p.seed, 9);
    assert_eq!(p.horizon, 3600.0);
    assert_eq!(p.arrival, ArrivalDiscipline::Sinusoidal);
    assert_eq!(p.duration, DurationPolicy::Discrete);
    assert_eq!(p.output, OutputFormat::Table);
    assert_eq!(p.user_count, ConfigParams::default().user_count);
}

#[test]
fn selectors_parse_from_cli_text() {
    assert_eq!("Sinusoidal".parse::<ArrivalDiscipline>().unwrap(), ArrivalDiscipline::Sinusoidal);
    assert_eq!("interval".parse::<ArrivalDiscipline>().unwrap(), ArrivalDiscipline::PerInterval);
    assert_eq!("legacy".parse::<PopularityPolicy>().unwrap(), PopularityPolicy::LegacyModulo);
    assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Document);
    assert!(matches!(
        "weibull".parse::<DurationPolicy>(),
        Err(GenError::InvalidParameter { parameter: "duration", .. })
    ));
}

fn scratch_path(tag: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("vod-config-{tag}-{}.json", std::process::id()))
}

#[test]
fn load_reads_params_from_file() {
    let path = scratch_path("ok");
    std::fs::write(&path, r#"{ "seed": 5, "user_count": 12 }"#).unwrap();
    let p = ConfigParams::load(path.to_str().unwrap()).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(p.seed, 5);
    assert_eq!(p.user_count, 12);
}

#[test]
fn load_reports_missing_file_with_its_path() {
    let path = scratch_path("missing");
    let err = ConfigParams::load(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, GenError::Other(_)), "got {err:?}");
    assert!(err.to_string().contains("vod-config-missing"), "message was: {err}");
}

#[test]
fn load_reports_malformed_json_as_serialization_error() {
    let path = scratch_path("bad");
    std::fs::write(&path, "{ not json").unwrap();
    let err = ConfigParams::load(path.to_str().unwrap()).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, GenError::Serialization(_)), "got {err:?}");
}
