//! A minimal demonstration binary: infer format candidates for each
//! argument given on the command line, one per line of output.
//!
//! This is not the interactive shell the original tooling offered — that
//! remains out of scope for this crate. It exists the way `time-fmt`'s
//! workspace carries a `fuzz` target: an ambient, runnable entry point
//! alongside the library, not the library's public surface.

use std::process::ExitCode;

use strftime_infer::{DateParser, LocaleSet};

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let inputs: Vec<String> = std::env::args().skip(1).collect();
    if inputs.is_empty() {
        eprintln!("usage: percentagent <date/time string>...");
        return ExitCode::FAILURE;
    }

    let parser = DateParser::new(Some(LocaleSet::default_bundled()));
    let mut found_any = false;

    for input in &inputs {
        let candidates = parser.parse(input);
        if candidates.is_empty() {
            tracing::debug!(%input, "no candidates");
            continue;
        }
        found_any = true;
        for candidate in candidates {
            match (candidate.value, candidate.locales) {
                (Some(value), Some(locales)) => {
                    println!(
                        "{}\t{}\t{:?}\t{}",
                        input,
                        candidate.format,
                        value,
                        locales.into_iter().collect::<Vec<_>>().join(",")
                    );
                }
                (Some(value), None) => println!("{}\t{}\t{:?}", input, candidate.format, value),
                (None, Some(locales)) => {
                    println!(
                        "{}\t{}\t-\t{}",
                        input,
                        candidate.format,
                        locales.into_iter().collect::<Vec<_>>().join(",")
                    );
                }
                (None, None) => println!("{}\t{}", input, candidate.format),
            }
        }
    }

    if found_any {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
