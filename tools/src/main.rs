//! workload-gen: headless runner for the VoD workload generator.
//!
//! Usage:
//!   workload-gen --seed 12345 --horizon 3600 --contents 500 --users 200
//!   workload-gen --arrival sinusoidal --sessions 1000 --format table
//!   workload-gen --config run.json --out trace.json
//!   workload-gen --interactive

use anyhow::Result;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use vod_workload_core::{
    config::{ConfigParams, SimulationConfig},
    engine::generate,
    output::{persist, sink_for},
};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut params = match flag_value(&args, "--config") {
        Some(path) => ConfigParams::load(path)?,
        None => ConfigParams::default(),
    };

    if args.iter().any(|a| a == "--interactive") {
        prompt_params(&mut params)?;
    }
    apply_overrides(&args, &mut params)?;

    let config = SimulationConfig::new(params)?;
    log::debug!("validated config: {:?}", config.params());
    let format = config.params().output;
    let out = flag_value(&args, "--out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format.default_file_name()));

    println!("VoD workload generator");
    println!("  seed:       {}", config.seed());
    println!("  horizon:    {}", config.horizon());
    println!("  arrival:    {:?}", config.params().arrival);
    println!("  duration:   {:?}", config.params().duration);
    println!("  output:     {}", out.display());
    println!();

    let output = generate(config)?;
    persist(sink_for(format), &output, &out)?;

    let summary = output.summary();
    println!("=== RUN SUMMARY ===");
    println!("  sessions:       {}", summary.records);
    println!("  baseline:       {}", summary.baseline);
    println!("  sampled:        {}", summary.sampled);
    println!("  intervals:      {}", summary.intervals);
    println!("  distinct users: {}", summary.distinct_users);
    if let Some(last) = summary.last_start {
        println!("  last start:     {last:.3}");
    }
    Ok(())
}

fn apply_overrides(args: &[String], p: &mut ConfigParams) -> Result<()> {
    override_with(args, "--seed", &mut p.seed)?;
    override_with(args, "--horizon", &mut p.horizon)?;
    override_with(args, "--contents", &mut p.content_count)?;
    override_with(args, "--users", &mut p.user_count)?;
    override_with(args, "--zipf", &mut p.zipf_exponent)?;
    override_with(args, "--sessions", &mut p.session_count)?;
    override_with(args, "--base-rate", &mut p.base_rate)?;
    override_with(args, "--amplitude", &mut p.amplitude)?;
    override_with(args, "--period", &mut p.period)?;
    override_with(args, "--rate-min", &mut p.interval_rate_min)?;
    override_with(args, "--rate-max", &mut p.interval_rate_max)?;
    override_with(args, "--arrival", &mut p.arrival)?;
    override_with(args, "--duration", &mut p.duration)?;
    override_with(args, "--popularity", &mut p.popularity)?;
    override_with(args, "--baseline", &mut p.baseline)?;
    override_with(args, "--format", &mut p.output)?;
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn override_with<T>(args: &[String], flag: &str, slot: &mut T) -> Result<()>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(raw) = flag_value(args, flag) {
        *slot = raw
            .parse()
            .map_err(|e| anyhow::anyhow!("{flag} {raw}: {e}"))?;
    }
    Ok(())
}

/// Ask for the core scalars on stdin. Empty input keeps the current value.
fn prompt_params(p: &mut ConfigParams) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    println!("=== VoD workload generator ===");
    prompt(&mut input, "Number of sessions (sinusoidal arrivals)", &mut p.session_count)?;
    prompt(&mut input, "Base session open rate", &mut p.base_rate)?;
    prompt(&mut input, "Daily rate amplitude (0 to 1)", &mut p.amplitude)?;
    prompt(&mut input, "Rate period (seconds)", &mut p.period)?;
    prompt(&mut input, "Horizon", &mut p.horizon)?;
    prompt(&mut input, "Number of contents", &mut p.content_count)?;
    prompt(&mut input, "Number of users", &mut p.user_count)?;
    prompt(&mut input, "Zipf exponent", &mut p.zipf_exponent)?;
    prompt(&mut input, "Arrival discipline (sinusoidal|interval)", &mut p.arrival)?;
    prompt(&mut input, "Duration policy (lognormal|discrete)", &mut p.duration)?;
    prompt(&mut input, "Output format (table|document)", &mut p.output)?;
    Ok(())
}

fn prompt<T>(input: &mut impl BufRead, label: &str, slot: &mut T) -> Result<()>
where
    T: FromStr + std::fmt::Debug,
    T::Err: std::fmt::Display,
{
    loop {
        print!("{label} [{slot:?}]: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(()); // EOF keeps the default
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        match trimmed.parse() {
            Ok(v) => {
                *slot = v;
                return Ok(());
            }
            Err(e) => println!("  could not parse '{trimmed}': {e}"),
        }
    }
}
