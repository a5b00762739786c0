//! Counts the records in a file, reporting how many exceeded the capacity.
//!
//! Run with
//!
//! ```bash
//! cargo run -p lineframe --example count_records -- /var/log/syslog 256
//! ```
//!
//! The second argument is the maximum record length in bytes (default 4096).
//! Records that are too long are counted but never buffered beyond that
//! length, so arbitrarily long lines cost no extra memory.

use std::{env, process::ExitCode};

use lineframe::{DelimitedScanner, FileSource, Line, ScannerOptions, TrailingRecord};

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: count_records <path> [capacity]");
        return ExitCode::FAILURE;
    };
    let capacity = match args.next().map(|s| s.parse::<usize>()) {
        None => lineframe::DEFAULT_CAPACITY,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            eprintln!("invalid capacity: {e}");
            return ExitCode::FAILURE;
        }
    };

    let options = ScannerOptions {
        capacity,
        trailing: TrailingRecord::NonEmpty,
        ..Default::default()
    };
    let mut scanner = match DelimitedScanner::new(FileSource::new(&path), options) {
        Ok(scanner) => scanner,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let (counts, elapsed) = lineframe::timed(|| {
        let mut counts = (0usize, 0usize, 0usize);
        let session = match scanner.session() {
            Ok(session) => session,
            Err(e) => {
                eprintln!("{path}: {e}");
                return None;
            }
        };
        for line in session {
            match line {
                Ok(Line::Record(bytes)) => {
                    counts.0 += 1;
                    counts.2 = counts.2.max(bytes.len());
                }
                Ok(Line::TooLong) => counts.1 += 1,
                Err(e) => {
                    eprintln!("{path}: {e}");
                    return None;
                }
            }
        }
        Some(counts)
    });
    let Some((records, too_long, longest)) = counts else {
        return ExitCode::FAILURE;
    };

    println!(
        "{records} records, {too_long} longer than {capacity} bytes (longest kept: {longest})"
    );
    println!("scanned in {elapsed:?}");
    ExitCode::SUCCESS
}
