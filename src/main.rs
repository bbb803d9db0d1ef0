//! Command line front end: explains lines given as arguments, or every line
//! read from stdin. Each line is explained on its own.

use clap::Parser;
use riscv_explain::{Config, Explainer};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

/// Explain RISC-V assembly instructions in plain English
#[derive(Parser, Debug)]
#[command(name = "riscv-explain")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Instruction lines, e.g. "add t0, t1, t2". Reads stdin when empty.
    lines: Vec<String>,

    /// Reject `lui` and `auipc` the way older versions did
    #[arg(long)]
    legacy_upper_fallthrough: bool,

    /// Don't print lines that failed to explain
    #[arg(short, long)]
    quiet_errors: bool,
}

/// Counts lines that could not be explained.
struct Report<W> {
    out: W,
    quiet_errors: bool,
    failures: usize,
}

impl<W: Write> Report<W> {
    fn line(&mut self, explainer: &Explainer, line: &str) -> io::Result<()> {
        match explainer.try_explain(line) {
            Ok(explanation) => writeln!(self.out, "{explanation}"),
            Err(err) => {
                self.failures += 1;
                if self.quiet_errors {
                    Ok(())
                } else {
                    writeln!(self.out, "Error in {line}: {err}")
                }
            }
        }
    }
}

fn run(args: Args) -> Result<usize, Box<dyn Error>> {
    let config = Config::default().upper_immediate_fallthrough(args.legacy_upper_fallthrough);
    let explainer = Explainer::new(config);
    log::debug!("Using {config:?}");

    let mut report = Report {
        out: io::stdout().lock(),
        quiet_errors: args.quiet_errors,
        failures: 0,
    };

    if args.lines.is_empty() {
        for line in io::stdin().lock().lines() {
            report.line(&explainer, &line?)?;
        }
    } else {
        for line in &args.lines {
            report.line(&explainer, line)?;
        }
    }

    report.out.flush()?;
    Ok(report.failures)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    match run(Args::parse()) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            log::info!("{failures} line(s) could not be explained");
            ExitCode::FAILURE
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
