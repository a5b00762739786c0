#![no_main]

use arbitrary::Arbitrary;
use lineframe::{DelimitedScanner, Scan, ScannerOptions, TrailingRecord};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    capacity: u8,
    separator: u8,
    keep_trailing_empty: bool,
    // Number of scans to run before rewinding for a second pass.
    rewind_after: u8,
    bytes: &'a [u8],
}

/// Reference results: split the whole input at once.
fn model(bytes: &[u8], options: &ScannerOptions) -> Vec<Scan> {
    let mut pieces: Vec<&[u8]> = bytes.split(|&b| b == options.separator).collect();
    if options.trailing == TrailingRecord::NonEmpty && pieces.last().is_some_and(|p| p.is_empty()) {
        pieces.pop();
    }
    pieces
        .into_iter()
        .map(|p| {
            if p.len() > options.capacity {
                Scan::TooLong
            } else {
                Scan::Record(p.into())
            }
        })
        .collect()
}

fn scan_to_end(scanner: &mut DelimitedScanner<&[u8]>) -> Vec<Scan> {
    let mut out = Vec::new();
    loop {
        match scanner.next_scan().unwrap() {
            Scan::EndOfStream => return out,
            scan => out.push(scan),
        }
    }
}

fn scanner(input: Input<'_>) {
    let options = ScannerOptions {
        capacity: usize::from(input.capacity) + 1,
        separator: input.separator,
        trailing: if input.keep_trailing_empty {
            TrailingRecord::Always
        } else {
            TrailingRecord::NonEmpty
        },
    };
    let expected = model(input.bytes, &options);

    let mut scanner = DelimitedScanner::new(input.bytes, options).unwrap();
    scanner.open().unwrap();

    for _ in 0..input.rewind_after {
        if scanner.next_scan().unwrap().is_end() {
            break;
        }
        assert!(scanner.position() >= scanner.record_start());
    }
    scanner.reset();

    let got = scan_to_end(&mut scanner);
    assert_eq!(got, expected);
    assert_eq!(scanner.next_scan().unwrap(), Scan::EndOfStream);
}

fuzz_target!(|input: Input<'_>| scanner(input));
