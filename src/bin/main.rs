use std::io::{self, BufRead, Write};

use clap::{clap_app, crate_version};
use windowstats::window::{WindowTracker, MAX_READING, MIN_READING};

const DEFAULT_WINDOW: i64 = 3;

fn main() {
    pretty_env_logger::init();

    let app = clap_app!(windowstats =>
        (version: crate_version!())
        (about: "Feed readings through a sliding-window tracker and report averages.")
        (@setting AllowNegativeNumbers)
        (@arg READINGS: ... "Readings to ingest. Read from stdin when none are given.")
        (@arg window: -k --window +takes_value "Window size to report on (default 3).")
    );

    let cmd_args = app.get_matches();

    let k = match parse_window(cmd_args.value_of("window")) {
        Ok(k) => k,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(2);
        }
    };

    let tokens: Vec<String> = match cmd_args.values_of("READINGS") {
        Some(values) => values.map(str::to_string).collect(),
        None => read_tokens(io::stdin().lock()),
    };

    let mut tracker = WindowTracker::new();
    let stdout = io::stdout();
    let stderr = io::stderr();
    if let Err(e) = run(&mut tracker, &tokens, k, &mut stdout.lock(), &mut stderr.lock()) {
        log::error!("output err: {}", e);
        std::process::exit(1);
    }
}

fn parse_window(value: Option<&str>) -> Result<i64, String> {
    match value {
        None => Ok(DEFAULT_WINDOW),
        Some(v) => match v.parse::<i64>() {
            Ok(k) if k > 0 => Ok(k),
            Ok(k) => Err(format!("invalid window size {}: must be a positive integer", k)),
            Err(e) => Err(format!("invalid window size {:?}: {}", v, e)),
        },
    }
}

/// Ingest every token, reporting the k-average and max k-window after each
/// accepted reading once k readings exist
fn run<W: Write, E: Write>(
    tracker: &mut WindowTracker,
    tokens: &[String],
    k: i64,
    out: &mut W,
    err: &mut E,
) -> io::Result<()> {
    writeln!(
        out,
        "Tracking readings in [{}, {}] with window size {}",
        MIN_READING, MAX_READING, k
    )?;

    for token in tokens {
        let temp = match token.parse::<i64>() {
            Ok(t) => t,
            Err(_) => {
                writeln!(err, "skipping {:?}: not an integer", token)?;
                continue;
            }
        };

        if let Err(e) = tracker.add_reading(temp) {
            writeln!(err, "skipping {}: {}", temp, e)?;
            continue;
        }
        writeln!(out, "Reading {}: {} added", tracker.len(), temp)?;

        if tracker.len() as i64 >= k {
            match (tracker.average(k), tracker.max_window(k)) {
                (Ok(avg), Ok(best)) => {
                    writeln!(out, "  -> Last {} average: {:.2}", k, avg)?;
                    writeln!(out, "  -> Max {}-reading window: {:.2}", k, best)?;
                }
                (Err(e), _) | (_, Err(e)) => writeln!(err, "  -> {}", e)?,
            }
        }
    }

    writeln!(out, "{}", tracker.stats())
}

fn read_tokens<R: BufRead>(input: R) -> Vec<String> {
    let mut tokens = Vec::new();
    for line in input.lines() {
        match line {
            Ok(line) => tokens.extend(line.split_whitespace().map(str::to_string)),
            Err(e) => {
                log::error!("stdin err: {}", e);
                break;
            }
        }
    }
    tokens
}
