use channel_core::common::time::Time;
use channel_core::{ChannelConfig, ChannelError, KLineList, KLineUnit};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Load `datetime;open;high;low;close[;volume]` bars, sorted by time.
pub fn load_csv(path: &Path, config: &ChannelConfig) -> Result<KLineList, Box<dyn Error>> {
    let file = File::open(path)?;
    let klines = read_klines(file, config)?;
    info!(path = %path.display(), bars = klines.len(), "bars loaded");
    Ok(klines)
}

pub fn read_klines<R: Read>(reader: R, config: &ChannelConfig) -> Result<KLineList, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(config.has_header)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut kline_units = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let klu = parse_csv_record(&record, config).map_err(|e| {
            ChannelError::SrcDataFormat(format!("record {}: {}", line + 1, e))
        })?;
        kline_units.push(klu);
    }

    if kline_units.is_empty() {
        return Err(ChannelError::NoData("source contains no bars".to_string()).into());
    }
    Ok(KLineList::from_units(kline_units))
}

fn parse_csv_record(record: &StringRecord, config: &ChannelConfig) -> Result<KLineUnit, ChannelError> {
    let time = Time::parse(field(record, 0, "datetime")?, &config.datetime_format)?;
    let volume = match record.get(5) {
        Some(v) if !v.is_empty() => number(v, "volume")?,
        _ => 0.0,
    };

    KLineUnit::new(
        time,
        number(field(record, 1, "open")?, "open")?,
        number(field(record, 2, "high")?, "high")?,
        number(field(record, 3, "low")?, "low")?,
        number(field(record, 4, "close")?, "close")?,
        volume,
        config.autofix,
    )
}

fn field<'a>(record: &'a StringRecord, idx: usize, name: &str) -> Result<&'a str, ChannelError> {
    record
        .get(idx)
        .ok_or_else(|| ChannelError::SrcDataFormat(format!("missing {} column", name)))
}

fn number(s: &str, name: &str) -> Result<f64, ChannelError> {
    s.parse::<f64>()
        .map_err(|e| ChannelError::SrcDataFormat(format!("{} {:?}: {}", name, s, e)))
}
