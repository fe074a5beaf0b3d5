use std::env;
use std::io::{self, BufRead};
use std::process::ExitCode;

use ckp_align::{align, CostModel};

/// Align two strings read from stdin (one per line) and print the alignment
/// column by column, gaps as `-`.
fn main() -> ExitCode {
    let costs = match parse_costs(env::args().skip(1)) {
        Ok(costs) => costs,
        Err(err) => {
            eprintln!("align2str: {err}");
            print_usage();
            return ExitCode::from(2);
        }
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let seq_a = match lines.next() {
        Some(Ok(line)) => line.trim().as_bytes().to_vec(),
        Some(Err(err)) => {
            eprintln!("align2str: failed to read first sequence: {err}");
            return ExitCode::from(1);
        }
        None => {
            eprintln!("align2str: expected two input lines, got none");
            return ExitCode::from(1);
        }
    };
    let seq_b = match lines.next() {
        Some(Ok(line)) => line.trim().as_bytes().to_vec(),
        Some(Err(err)) => {
            eprintln!("align2str: failed to read second sequence: {err}");
            return ExitCode::from(1);
        }
        None => {
            eprintln!("align2str: expected two input lines, got one");
            return ExitCode::from(1);
        }
    };

    let result = match align(&seq_a, &seq_b, &costs) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("align2str: {err}");
            return ExitCode::from(1);
        }
    };

    for (a, b) in result.aligned_a.iter().zip(&result.aligned_b) {
        let a = a.map_or('-', char::from);
        let b = b.map_or('-', char::from);
        println!("<{a},{b}>");
    }
    println!("Edit cost = {}", result.cost);
    ExitCode::SUCCESS
}

/// Zero or four positional integers: match, mismatch, gap open, gap extend.
fn parse_costs<I, T>(args: I) -> Result<CostModel, String>
where
    I: Iterator<Item = T>,
    T: Into<String>,
{
    let mut values = Vec::new();
    for arg in args {
        let arg = arg.into();
        if arg == "--help" || arg == "-h" {
            print_usage();
            std::process::exit(0);
        }
        let value = arg
            .parse::<i32>()
            .map_err(|_| format!("cost argument '{arg}' is not an integer"))?;
        values.push(value);
    }

    match values[..] {
        [] => Ok(CostModel::default()),
        [match_cost, mismatch_cost, gap_open, gap_extend] => {
            CostModel::new(match_cost, mismatch_cost, gap_open, gap_extend)
                .map_err(|err| err.to_string())
        }
        _ => Err(format!(
            "expected zero or four cost arguments, got {}",
            values.len()
        )),
    }
}

fn print_usage() {
    println!(
        "\
Usage: align2str [<match> <mismatch> <gap_open> <gap_extend>]

Reads two sequences from stdin, one per line, and prints their optimal
global alignment as one <a,b> column per line followed by the total cost.
Without arguments the default model is used: 0 1 3 1.

Example:
  printf 'ACGTAC\\nAGTAC\\n' | align2str
"
    );
}
