use alloc::{string::String, vec::Vec};
use core::fmt::Write;

use crate::{ByteSource, DelimitedScanner, Scan, ScannerOptions, TrailingRecord};

/// What a scan must produce, computed by splitting the whole input at once.
pub fn expected_scans(
    bytes: &[u8],
    separator: u8,
    capacity: usize,
    trailing: TrailingRecord,
) -> Vec<Scan> {
    let mut pieces: Vec<&[u8]> = bytes.split(|&b| b == separator).collect();
    if trailing == TrailingRecord::NonEmpty && pieces.last().is_some_and(|p| p.is_empty()) {
        pieces.pop();
    }
    pieces
        .into_iter()
        .map(|piece| {
            if piece.len() > capacity {
                Scan::TooLong
            } else {
                Scan::Record(piece.into())
            }
        })
        .collect()
}

/// Runs `scanner` until `EndOfStream`, panicking on errors.
pub fn scan_to_end<S>(scanner: &mut DelimitedScanner<S>) -> Vec<Scan>
where
    S: ByteSource,
    S::Error: core::fmt::Debug,
{
    let mut out = Vec::new();
    loop {
        match scanner.next_scan().expect("scan error") {
            Scan::EndOfStream => return out,
            scan => out.push(scan),
        }
    }
}

pub fn scan_slice(bytes: &[u8], options: ScannerOptions) -> Vec<Scan> {
    let mut scanner = DelimitedScanner::new(bytes, options).expect("valid options");
    scanner.open().expect("slices always open");
    scan_to_end(&mut scanner)
}

/// One line per result, with the scanner position after it was reported.
pub fn render_transcript(bytes: &[u8], options: ScannerOptions) -> String {
    let mut scanner = DelimitedScanner::new(bytes, options).expect("valid options");
    scanner.open().expect("slices always open");
    let mut out = String::new();
    loop {
        let scan = scanner.next_scan().expect("scan error");
        let at = scanner.position();
        match scan {
            Scan::Record(r) => writeln!(out, "record {r:?} @ {at}").unwrap(),
            Scan::TooLong => writeln!(out, "too long @ {at}").unwrap(),
            Scan::EndOfStream => {
                writeln!(out, "end @ {at}").unwrap();
                return out;
            }
        }
    }
}
