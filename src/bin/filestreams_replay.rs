use std::error::Error;

use filestreams::cli::{ReplayArgs, run_replay};
use filestreams::format::RecordFormat;
use sarge::prelude::*;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  filestreams_replay --path <file> [--loop] [--header] [--offset <bytes>] [--mode line|csv] [--count <n>]"
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --loop             Rewind to the start of the file after end-of-input");
    eprintln!("  --header           Capture the first CSV record as the header");
    eprintln!("  --offset <bytes>   Start at the first line beginning at or after this offset");
    eprintln!("  --mode line|csv    Read interpretation (default: line)");
    eprintln!("  --count <n>        Number of records to print (default: one pass)");
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut reader = ArgumentReader::new();

    let path_ref = reader.add::<String>(tag::both('p', "path"));
    let loop_ref = reader.add::<bool>(tag::long("loop"));
    let header_ref = reader.add::<bool>(tag::long("header"));
    let offset_ref = reader.add::<u64>(tag::long("offset"));
    let mode_ref = reader.add::<RecordFormat>(tag::both('m', "mode"));
    let count_ref = reader.add::<usize>(tag::both('n', "count"));

    let args = reader.parse()?;

    let path = match path_ref.get(&args) {
        Some(Ok(p)) => p,
        _ => return Err("missing --path".into()),
    };

    let mode = match mode_ref.get(&args) {
        Some(Ok(m)) => m,
        Some(Err(e)) => return Err(e.into()),
        None => RecordFormat::Line,
    };

    let offset = match offset_ref.get(&args) {
        Some(Ok(o)) => o,
        Some(Err(_)) => return Err("--offset expects a byte count".into()),
        None => 0,
    };

    let mut replay = ReplayArgs::new(path)
        .with_loop(matches!(loop_ref.get(&args), Some(Ok(true))))
        .with_header(matches!(header_ref.get(&args), Some(Ok(true))))
        .with_start_offset(offset)
        .with_mode(mode);

    match count_ref.get(&args) {
        Some(Ok(n)) => replay = replay.with_count(n),
        Some(Err(_)) => return Err("--count expects a number".into()),
        None => {}
    }

    let mut stdout = std::io::stdout().lock();
    let summary = run_replay(&replay, &mut stdout)?;
    tracing::info!(
        records = summary.records,
        position = summary.position,
        "replay finished"
    );

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("filestreams_replay error: {e}");
        print_usage();
        std::process::exit(1);
    }
}
