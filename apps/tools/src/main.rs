use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::domain::{SheetLayout, VerseRecord};
use tracing_subscriber::EnvFilter;
use verse_core::{decode_with_report, DecodeReport, HttpVerseSource, SheetSource, VerseSource};

/// Sheet maintenance helpers: check what the app would keep from a sheet.
#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "reflections", value_parser = parse_layout)]
    layout: SheetLayout,
    /// Print the kept records as JSON instead of a summary line per verse.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a CSV export saved on disk.
    Decode { file: PathBuf },
    /// Download and decode the published sheet.
    Fetch {
        #[arg(long, default_value = "1y35vZaHK_zv1-aylHYMk92FwHFpqk5aPzeEyO9BLk1Q")]
        sheet_id: String,
        #[arg(long, default_value = "Activo")]
        sheet_name: String,
    },
}

fn parse_layout(value: &str) -> Result<SheetLayout, String> {
    SheetLayout::parse(value).ok_or_else(|| format!("unknown layout '{value}', expected reflections or comment"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let raw = match &cli.command {
        Command::Decode { file } => fs::read_to_string(file)
            .with_context(|| format!("failed to read '{}'", file.display()))?,
        Command::Fetch {
            sheet_id,
            sheet_name,
        } => {
            let sheet = SheetSource::new(sheet_id, sheet_name);
            let source = HttpVerseSource::for_sheet(&sheet)?;
            eprintln!("fetching {}", source.url());
            source.fetch_csv().await?
        }
    };

    let (verses, report) = decode_with_report(&raw, cli.layout);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&verses)?);
    } else {
        print_verses(&verses);
    }
    print_report(&report);
    Ok(())
}

fn print_verses(verses: &[VerseRecord]) {
    for verse in verses {
        let marker = if verse.has_reflection() { "+" } else { " " };
        println!("{marker} {:>4}  {}  {}", verse.id, verse.reference, verse.text);
    }
}

fn print_report(report: &DecodeReport) {
    eprintln!(
        "rows seen={} kept={} dropped={} (too few columns={}, missing required={}, unreadable={})",
        report.rows_seen,
        report.rows_kept,
        report.rows_dropped(),
        report.too_few_columns,
        report.missing_required,
        report.unreadable
    );
}
