//! The finished dataset and the sinks that persist it.
//!
//! RULE: A run's artifact is written exactly once. `persist` takes the
//! sink by value; there is no append or update path.

use crate::{
    config::OutputFormat,
    error::GenResult,
    interval::{Interval, Partition},
    session::{SessionKind, SessionRecord},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Config-derived echo plus the ordered session list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub zipf_param: f64,
    #[serde(rename = "taxas_poisson")]
    pub rates: Vec<f64>,
    #[serde(rename = "particionamento")]
    pub boundaries: Vec<f64>,
    #[serde(rename = "dados_videos")]
    pub sessions: Vec<SessionRecord>,
}

impl SimulationOutput {
    pub fn new(
        zipf_param: f64,
        partition: &Partition,
        intervals: &[Interval],
        sessions: Vec<SessionRecord>,
    ) -> Self {
        Self {
            zipf_param,
            rates: intervals.iter().map(|i| i.rate).collect(),
            boundaries: partition.boundaries().to_vec(),
            sessions,
        }
    }

    pub fn summary(&self) -> RunSummary {
        let baseline = self
            .sessions
            .iter()
            .filter(|s| s.kind == SessionKind::Baseline)
            .count();
        let distinct_users = self
            .sessions
            .iter()
            .map(|s| s.user_id)
            .collect::<BTreeSet<_>>()
            .len();
        RunSummary {
            records: self.sessions.len(),
            baseline,
            sampled: self.sessions.len() - baseline,
            intervals: self.boundaries.len().saturating_sub(1),
            distinct_users,
            last_start: self.sessions.last().map(|s| s.start_time),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub records:        usize,
    pub baseline:       usize,
    pub sampled:        usize,
    pub intervals:      usize,
    pub distinct_users: usize,
    pub last_start:     Option<f64>,
}

/// Renders a finished dataset.
pub trait OutputSink {
    fn name(&self) -> &'static str;

    fn render(&self, output: &SimulationOutput, out: &mut dyn Write) -> GenResult<()>;
}

/// ` ID     AS       FS` header, one zero-padded row per session.
pub struct FixedWidthTable;

impl OutputSink for FixedWidthTable {
    fn name(&self) -> &'static str { "table" }

    fn render(&self, output: &SimulationOutput, out: &mut dyn Write) -> GenResult<()> {
        writeln!(out, " ID     AS       FS")?;
        for s in &output.sessions {
            writeln!(
                out,
                "{:03}    {:.3}    {:.3}",
                s.content_id, s.start_time, s.end_time
            )?;
        }
        Ok(())
    }
}

/// Pretty-printed JSON document.
pub struct JsonDocument;

impl OutputSink for JsonDocument {
    fn name(&self) -> &'static str { "document" }

    fn render(&self, output: &SimulationOutput, out: &mut dyn Write) -> GenResult<()> {
        serde_json::to_writer_pretty(&mut *out, output)?;
        writeln!(out)?;
        Ok(())
    }
}

pub fn sink_for(format: OutputFormat) -> Box<dyn OutputSink> {
    match format {
        OutputFormat::Table    => Box::new(FixedWidthTable),
        OutputFormat::Document => Box::new(JsonDocument),
    }
}

/// Render `output` into memory.
pub fn render_to_bytes(sink: &dyn OutputSink, output: &SimulationOutput) -> GenResult<Vec<u8>> {
    let mut buf = Vec::new();
    sink.render(output, &mut buf)?;
    Ok(buf)
}

/// Write the artifact to `path`, consuming the sink.
pub fn persist(sink: Box<dyn OutputSink>, output: &SimulationOutput, path: &Path) -> GenResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    sink.render(output, &mut writer)?;
    writer.flush()?;
    log::info!(
        "wrote {} sessions to {} ({})",
        output.sessions.len(),
        path.display(),
        sink.name()
    );
    Ok(())
}
