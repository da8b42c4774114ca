use channel_core::ChannelAnalysis;
use serde::Serialize;
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
struct ExportRow {
    index: usize,
    time: String,
    value: f64,
    fitted: f64,
    upper: f64,
    lower: f64,
    residual: f64,
}

/// `.json` writes the whole analysis, anything else the per-point CSV.
pub fn export(path: &Path, analysis: &ChannelAnalysis) -> Result<(), Box<dyn Error>> {
    let writer = BufWriter::new(File::create(path)?);
    if path.extension().and_then(|s| s.to_str()) == Some("json") {
        write_json(writer, analysis)
    } else {
        write_csv(writer, analysis)
    }
}

pub fn write_json<W: Write>(mut writer: W, analysis: &ChannelAnalysis) -> Result<(), Box<dyn Error>> {
    serde_json::to_writer_pretty(&mut writer, analysis)?;
    writer.flush()?;
    Ok(())
}

pub fn write_csv<W: Write>(writer: W, analysis: &ChannelAnalysis) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (row, klu) in analysis.fit.rows().zip(analysis.window.iter()) {
        wtr.serialize(ExportRow {
            index: row.index,
            time: klu.time.to_str(),
            value: row.value,
            fitted: row.fitted,
            upper: row.upper,
            lower: row.lower,
            residual: row.residual,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
