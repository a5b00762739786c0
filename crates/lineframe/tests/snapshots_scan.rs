#![expect(missing_docs)]

use core::fmt::Write;

use lineframe::{DelimitedScanner, Line, ScannerOptions, TrailingRecord};

// A syslog-style capture with one runaway line in the middle and no newline
// after the last entry.
const CAPTURE: &[u8] = b"\
Oct 16 09:00:01 host sshd[811]: Accepted publickey
Oct 16 09:00:02 host kernel: [ 0.000000] BIOS-e820: mem 0x0000000000000000-0x000000000009fbff usable
Oct 16 09:00:03 host cron[42]: (root) CMD (run-parts)

Oct 16 09:00:04 host sshd[811]: Disconnected";

fn render(capacity: usize, trailing: TrailingRecord) -> String {
    let options = ScannerOptions {
        capacity,
        trailing,
        ..Default::default()
    };
    let mut scanner = DelimitedScanner::new(CAPTURE, options).unwrap();
    let mut out = String::new();
    for (i, line) in scanner.session().unwrap().enumerate() {
        match line.unwrap() {
            Line::Record(bytes) => writeln!(out, "{i}: {bytes:?}").unwrap(),
            Line::TooLong => writeln!(out, "{i}: <too long>").unwrap(),
        }
    }
    out
}

#[test]
fn snapshot_syslog_capture() {
    insta::assert_snapshot!(render(64, TrailingRecord::Always), @r#"
    0: "Oct 16 09:00:01 host sshd[811]: Accepted publickey"
    1: <too long>
    2: "Oct 16 09:00:03 host cron[42]: (root) CMD (run-parts)"
    3: ""
    4: "Oct 16 09:00:04 host sshd[811]: Disconnected"
    "#);
    insta::assert_snapshot!(render(16, TrailingRecord::NonEmpty), @r#"
    0: <too long>
    1: <too long>
    2: <too long>
    3: ""
    4: <too long>
    "#);
}
