//! Trace replay driver for the LFU cache.
//!
//! Reads a workload from stdin and reports wall-clock time for the
//! replay. Format: the first line is the operation count, then one
//! operation per line:
//!
//! ```text
//! g <key>            lookup
//! p <key> <value>    insert/update
//! ```
//!
//! Run with: `cargo run --bin lfu_trace --release -- [capacity] < trace.txt`
//! (capacity defaults to 10).

use std::io::{self, BufRead};
use std::process::ExitCode;
use std::time::Instant;

use lfukit::policy::lfu::LfuCache;
use lfukit::traits::CoreCache;

fn run() -> Result<(), String> {
    let capacity = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<usize>()
            .map_err(|_| format!("invalid capacity: {arg}"))?,
        None => 10,
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let count_line = lines
        .next()
        .ok_or("empty input: expected operation count")?
        .map_err(|e| e.to_string())?;
    let count: usize = count_line
        .trim()
        .parse()
        .map_err(|_| format!("invalid operation count: {count_line}"))?;

    let mut cache: LfuCache<u64, u64> = LfuCache::new(capacity);
    let mut hits = 0u64;
    let mut gets = 0u64;

    let start = Instant::now();
    for _ in 0..count {
        let line = lines
            .next()
            .ok_or("trace shorter than declared operation count")?
            .map_err(|e| e.to_string())?;
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("g") => {
                let key = parse_field(parts.next(), &line)?;
                gets += 1;
                if cache.get(&key).is_some() {
                    hits += 1;
                }
            },
            Some("p") => {
                let key = parse_field(parts.next(), &line)?;
                let value = parse_field(parts.next(), &line)?;
                cache.insert(key, value);
            },
            _ => return Err(format!("unrecognized trace line: {line}")),
        }
    }
    let elapsed = start.elapsed();

    println!("replayed {count} ops in {:.6} s", elapsed.as_secs_f64());
    if gets > 0 {
        println!(
            "hit ratio: {:.4} ({hits}/{gets} gets), final size {}",
            hits as f64 / gets as f64,
            cache.len()
        );
    }
    Ok(())
}

fn parse_field(field: Option<&str>, line: &str) -> Result<u64, String> {
    field
        .ok_or_else(|| format!("truncated trace line: {line}"))?
        .parse()
        .map_err(|_| format!("invalid number in trace line: {line}"))
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("lfu_trace: {msg}");
            ExitCode::FAILURE
        },
    }
}
