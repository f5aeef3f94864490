//! Report rendering.

use std::io::Write;

use voxdiff_core::ScoreReport;

/// What to print on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Volume summary, timings, first and last score.
    Summary,
    /// One `t<TAB>score` line per frame.
    All,
    /// The whole report as pretty JSON.
    Json,
}

pub fn render<W: Write>(report: &ScoreReport, mode: OutputMode, out: &mut W) -> anyhow::Result<()> {
    match mode {
        OutputMode::Summary => render_summary(report, out)?,
        OutputMode::All => {
            for (t, score) in report.scores.frames() {
                writeln!(out, "{}\t{}", t, score)?;
            }
        }
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn render_summary<W: Write>(report: &ScoreReport, out: &mut W) -> std::io::Result<()> {
    let meta = &report.metadata;
    writeln!(out, "volume: {}", report.path)?;
    writeln!(
        out,
        "shape: {} {}, data offset {} ({})",
        report.shape,
        meta.datatype,
        meta.data_offset,
        meta.offset_source.as_str()
    )?;
    writeln!(out, "elapsed load: {:.6}s", report.load_timing.total.as_secs_f64())?;
    writeln!(
        out,
        "elapsed score ({}, {} run(s)): mean {:.6}s, min {:.6}s",
        report.strategy,
        report.score_timing.runs,
        report.score_timing.mean().as_secs_f64(),
        report.score_timing.min.as_secs_f64()
    )?;
    if let (Some(first), Some(last)) = (report.scores.first(), report.scores.last()) {
        writeln!(out, "ssd_first: {}", first)?;
        writeln!(out, "ssd_last: {}", last)?;
    }
    Ok(())
}
