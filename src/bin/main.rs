// File: src/bin/main.rs
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tajweed_core::persistence::{load_config, save_to_disk};
use tajweed_core::record::SurahRecord;
use tajweed_core::{QalqalahEngine, QalqalahError, Result, RuleConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qalqalah")]
#[command(about = "Annotate Qalqalah occurrences in vocalised Quranic text")]
#[command(version)]
struct Cli {
    /// Surah number stamped on every record
    #[arg(short, long)]
    surah: u32,

    /// Surah name recorded in the metadata block
    #[arg(long)]
    surah_name: Option<String>,

    /// Text file with one ayah per line (stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the JSON annotations (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON rule config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of the first ayah in the input
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    first_ayah: u32,

    /// Only count letters with a written sukoon as silent mid-ayah
    #[arg(long)]
    no_cluster_heuristic: bool,

    /// Also recognise the Uthmani sukoon glyph
    #[arg(long)]
    uthmani: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("qalqalah=info,tajweed_core=info")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RuleConfig::default(),
    };
    if cli.uthmani {
        config.recognise_uthmani_sukoon();
    }
    if cli.no_cluster_heuristic {
        config.quiescence.unmarked_cluster = false;
    }
    config.validate()?;

    let text = match &cli.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let engine = QalqalahEngine::with_config(config);
    let mut record = SurahRecord::new(
        cli.surah,
        cli.surah_name.clone(),
        engine.config().trigger_letters.clone(),
    );

    let lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
    let mut next_ayah = Some(cli.first_ayah);
    for line in lines {
        let ayah_number = next_ayah.ok_or(QalqalahError::AyahNumberOverflow(cli.first_ayah))?;
        next_ayah = ayah_number.checked_add(1);

        let ayah = engine.ayah_from_text(cli.surah, ayah_number, line);
        let analysis = engine.analyze(&ayah);
        info!(
            surah = cli.surah,
            ayah = ayah_number,
            strong = analysis.strong_count,
            light = analysis.light_count,
            "annotated ayah"
        );
        record.push(analysis.annotation.to_record());
    }

    info!(
        ayahs = record.ayahs.len(),
        occurrences = record.total_occurrences(),
        "surah {} done",
        cli.surah
    );

    match &cli.output {
        Some(path) => save_to_disk(&record, path)?,
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            serde_json::to_writer_pretty(&mut out, &record)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
