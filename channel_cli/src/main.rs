mod export;
mod loader;
mod logging;
mod sample;

use channel_core::common::time::Time;
use channel_core::{Analyzer, ChannelAnalysis, ChannelConfig, KLineList};
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::sample::SampleSpec;

const USAGE: &str = "usage: channel_cli <csv-file | csv-dir> [config.json]
       channel_cli --sample [n] [config.json]
env:   CHANNEL_EXPORT=<path>  export channel rows (.csv) or full analysis (.json)
       RUST_LOG=<filter>      log filter";

fn main() -> Result<(), Box<dyn Error>> {
    logging::init_tracing()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let export_path = std::env::var("CHANNEL_EXPORT").ok().map(PathBuf::from);

    match args.first().map(String::as_str) {
        None | Some("-h") | Some("--help") => {
            println!("{}", USAGE);
            Ok(())
        }
        Some("--sample") => {
            let n = args.get(1).map(|s| s.parse::<usize>()).transpose()?.unwrap_or(200);
            let config = load_config(args.get(2).map(Path::new))?;
            let start = Time::from_str("20240101 000000")?;
            let klines = SampleSpec::new(n, start).build()?;
            let analysis = run(&klines, config)?;
            if let Some(path) = export_path {
                export::export(&path, &analysis)?;
                info!(path = %path.display(), "channel exported");
            }
            Ok(())
        }
        Some(input) => {
            let config = load_config(args.get(1).map(Path::new))?;
            let input = Path::new(input);
            if input.is_dir() {
                process_dir(input, config, export_path.as_deref())
            } else {
                process_csv_file(input, config, export_path.as_deref())
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ChannelConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            let config = ChannelConfig::from_json_str(&json)?;
            info!(path = %path.display(), "config loaded");
            Ok(config)
        }
        None => Ok(ChannelConfig::default()),
    }
}

fn run(klines: &KLineList, config: ChannelConfig) -> Result<ChannelAnalysis, Box<dyn Error>> {
    let analyzer = Analyzer::new(config)?;
    let conf = analyzer.config();
    info!(
        k = conf.k,
        window_days = ?conf.window_days,
        price_field = %conf.price_field,
        "analyzer ready"
    );
    let analysis = analyzer.analyze(klines).map_err(|e| {
        error!(errcode = %e.errcode(), "{}", e);
        e
    })?;
    println!("{}", analysis.report);
    Ok(analysis)
}

fn process_csv_file(
    path: &Path,
    config: ChannelConfig,
    export_path: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    println!("Processing file: {:?}", path);
    let klines = loader::load_csv(path, &config)?;
    let analysis = run(&klines, config)?;
    if let Some(out) = export_path {
        export::export(out, &analysis)?;
        info!(path = %out.display(), "channel exported");
    }
    Ok(())
}

/// Analyse every csv in `dir`; one bad file does not stop the others.
fn process_dir(
    dir: &Path,
    config: ChannelConfig,
    export_dir: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("csv"))
        .collect();
    paths.sort();

    if let Some(out) = export_dir {
        std::fs::create_dir_all(out)?;
    }

    let mut failed = 0;
    for path in &paths {
        let export_path = export_dir.map(|out| {
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("channel");
            out.join(format!("{}_channel.csv", stem))
        });
        if let Err(e) = process_csv_file(path, config.clone(), export_path.as_deref()) {
            error!(path = %path.display(), "{}", e);
            failed += 1;
        }
    }

    info!(files = paths.len(), failed, "directory processed");
    if failed > 0 {
        return Err(format!("{} of {} files failed", failed, paths.len()).into());
    }
    Ok(())
}
