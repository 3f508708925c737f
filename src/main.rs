use clap::Parser;
use period::Period;
use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "period", version, about = "Parse and normalise ISO-8601 periods")]
struct Cli {
    /// Periods to parse, e.g. P1Y2M3DT4H5M6.7S
    periods: Vec<String>,

    /// Keep the fields as written instead of folding months into years
    #[arg(short = 'r', long = "raw")]
    raw: bool,

    /// Also print each signed field
    #[arg(short = 'c', long = "components")]
    components: bool,
}

fn describe(cli: &Cli, input: &str) -> Result<(), period::ParseError> {
    let parsed = period::parse_strict(input, !cli.raw)?;
    println!("{input} => {parsed}");
    if cli.components {
        print_components(&parsed);
    }
    Ok(())
}

fn print_components(p: &Period) {
    println!("  years:   {}", p.years());
    println!("  months:  {}", p.months());
    println!("  days:    {}", p.days());
    println!("  hours:   {}", p.hours());
    println!("  minutes: {}", p.minutes());
    let millis = p.millis();
    let sign = if millis < 0 { "-" } else { "" };
    let millis = millis.unsigned_abs();
    println!("  seconds: {sign}{}.{:03}", millis / 1000, millis % 1000);
}

/// Describes one input, reporting a failure on stderr. Returns whether it parsed.
fn report(cli: &Cli, input: &str) -> bool {
    match describe(cli, input) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Error: {e}");
            false
        }
    }
}

fn status(failures: usize) -> ExitCode {
    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn prompt(interactive: bool) -> io::Result<()> {
    if interactive {
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}

/// Reads one period per line until EOF, counting the lines that failed.
/// Blank lines are skipped. The prompt is only shown on a terminal.
fn read_periods(cli: &Cli) -> io::Result<usize> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut failures = 0;

    prompt(interactive)?;
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if !input.is_empty() && !report(cli, input) {
            failures += 1;
        }
        prompt(interactive)?;
    }
    if interactive {
        println!();
    }
    Ok(failures)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if !cli.periods.is_empty() {
        let failures = cli.periods.iter().filter(|p| !report(&cli, p)).count();
        return status(failures);
    }

    match read_periods(&cli) {
        Ok(failures) => status(failures),
        Err(e) => {
            eprintln!("Read error: {e}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_each_input_once() {
        let cli = Cli::parse_from(["period", "--raw", "P1Y14M", "PX", "P1D"]);
        assert!(cli.raw);
        let failures = cli.periods.iter().filter(|p| !report(&cli, p)).count();
        assert_eq!(failures, 1);
        assert!(!report(&cli, ""));
    }
}
