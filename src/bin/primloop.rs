/*!

Command-line front end over the `primloop` library: parse or build a
program, optionally print it, and optionally evaluate or search with it.

*/

use std::fs;
use std::process::ExitCode;

use clap::{Args, Parser};
use log::error;

use primloop::enumerate::create;
use primloop::interpreter::{evaluate, Outcome};
use primloop::parser::parse;
use primloop::printer::{to_tokens, to_tree};
use primloop::search::search;
use primloop::term::Term;

#[derive(Parser, Debug)]
#[command(name = "primloop", version, about = "Interpreter and enumerator for a six-combinator primitive-recursive language")]
struct Cli {
  #[command(flatten)]
  source: ProgramSource,

  #[command(flatten)]
  scan: Scan,

  /// Print the program as an indented tree instead of running it.
  #[arg(long)]
  tree: bool,

  /// Print the program's `hash(t)` index instead of running it.
  #[arg(long)]
  hashcode: bool,

  /// Sweep `gen_main(1, CLASS_SIZE)` against 0..RANGE using the search driver.
  #[arg(long, num_args = 2, value_names = ["CLASS_SIZE", "RANGE"])]
  search: Option<Vec<u64>>,

  /// Per-evaluation step budget (shared by direct evaluation and --search).
  #[arg(long, default_value_t = 1_000_000)]
  step_budget: u64,
}

#[derive(Args, Debug)]
#[group(required = false, multiple = false)]
struct ProgramSource {
  /// Read program text from a file.
  #[arg(long)]
  filename: Option<String>,

  /// Parse program text given directly on the command line.
  #[arg(long)]
  program: Option<String>,

  /// Build `create(1, N)`.
  #[arg(long)]
  create: Option<u64>,

  /// Search increasing indices of `create(1, _)` for a program matching a
  /// named target function over `0..RANGE`.
  #[arg(long, num_args = 2, value_names = ["FUNC", "RANGE"])]
  generate: Option<Vec<String>>,
}

#[derive(Args, Debug)]
#[group(required = false, multiple = false)]
struct Scan {
  /// Evaluate the program on these inputs directly.
  #[arg(long, num_args = 1..)]
  input: Option<Vec<u64>>,

  /// Evaluate the program once per value in `START..STOP` (step `STEP`, default 1).
  #[arg(long, num_args = 2..=3, value_names = ["START", "STOP", "STEP"])]
  range: Option<Vec<u64>>,
}

#[derive(Debug, Clone, Copy)]
enum TargetFunction {
  Identity,
  Successor,
  Fibonacci,
  Factorial,
}

impl TargetFunction {
  fn parse_name(name: &str) -> Option<TargetFunction> {
    match name {
      "identity" => Some(TargetFunction::Identity),
      "successor" => Some(TargetFunction::Successor),
      "fibonacci" => Some(TargetFunction::Fibonacci),
      "factorial" => Some(TargetFunction::Factorial),
      _ => None,
    }
  }

  fn value_at(self, k: u64) -> u64 {
    match self {
      TargetFunction::Identity => k,
      TargetFunction::Successor => k + 1,
      TargetFunction::Factorial => (1..=k).product::<u64>().max(1),
      TargetFunction::Fibonacci => {
        let (mut a, mut b) = (0u64, 1u64);
        for _ in 0..k {
          let next = a + b;
          a = b;
          b = next;
        }
        a
      }
    }
  }
}

fn main() -> ExitCode {
  env_logger::init();
  let cli = Cli::parse();
  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(CliError::Usage(message)) => {
      eprintln!("{message}");
      ExitCode::from(1)
    }
    Err(CliError::Io(message)) => {
      eprintln!("{message}");
      ExitCode::from(2)
    }
  }
}

enum CliError {
  Usage(String),
  Io(String),
}

fn run(cli: Cli) -> Result<(), CliError> {
  if let Some(class_and_range) = &cli.search {
    let (class_size, range) = (class_and_range[0], class_and_range[1]);
    let report = search(class_size, range, cli.step_budget);
    print_search_report(class_size, &report);
    return Ok(());
  }

  let program = resolve_program(&cli.source, cli.step_budget)?;

  if cli.tree {
    print!("{}", to_tree(&program));
    return Ok(());
  }
  if cli.hashcode {
    let (_, index) = primloop::hasher::hash(&program);
    println!("{index}");
    return Ok(());
  }

  let inputs = resolve_inputs(&cli.scan);
  if inputs.is_empty() {
    println!("{}", to_tokens(&program));
    return Ok(());
  }
  for input in inputs {
    match evaluate(&program, &input, cli.step_budget) {
      Ok((_, Outcome::Value(n))) => println!("{n}"),
      Ok((_, Outcome::Overflow)) => println!("overflow"),
      Ok((_, Outcome::NonZero(_))) => unreachable!("direct evaluation never requests the binary shortcut"),
      Err(err) => {
        error!("{err}");
        return Err(CliError::Usage(err.to_string()));
      }
    }
  }
  Ok(())
}

fn resolve_program(source: &ProgramSource, step_budget: u64) -> Result<Term, CliError> {
  if let Some(path) = &source.filename {
    let text = fs::read_to_string(path).map_err(|e| CliError::Io(format!("reading {path}: {e}")))?;
    return parse(&text).map_err(|e| CliError::Usage(e.to_string()));
  }
  if let Some(text) = &source.program {
    return parse(text).map_err(|e| CliError::Usage(e.to_string()));
  }
  if let Some(n) = source.create {
    return Ok(create(1, n));
  }
  if let Some(args) = &source.generate {
    let (name, range) = (&args[0], &args[1]);
    let func = TargetFunction::parse_name(name)
      .ok_or_else(|| CliError::Usage(format!("unknown target function {name:?}")))?;
    let range: u64 = range.parse().map_err(|_| CliError::Usage(format!("invalid range {range:?}")))?;
    return generate_matching(func, range, step_budget)
      .ok_or_else(|| CliError::Usage(format!("no arity-1 program matched {name} over 0..{range} within search bounds")));
  }
  Err(CliError::Usage("one of --filename, --program, --create, --generate is required".to_string()))
}

/// Searches increasing indices of `create(1, _)` for the first program whose
/// outputs over `0..range` match `target`, bounded to a generous but finite
/// number of candidate indices so a non-matching target terminates.
fn generate_matching(target: TargetFunction, range: u64, step_budget: u64) -> Option<Term> {
  const MAX_CANDIDATES: u64 = 200_000;
  'candidates: for n in 0..MAX_CANDIDATES {
    let candidate = create(1, n);
    for k in 0..range {
      match evaluate(&candidate, &[k], step_budget) {
        Ok((_, Outcome::Value(v))) if v == target.value_at(k) => continue,
        _ => continue 'candidates,
      }
    }
    return Some(candidate);
  }
  None
}

fn resolve_inputs(scan: &Scan) -> Vec<Vec<u64>> {
  if let Some(values) = &scan.input {
    return vec![values.clone()];
  }
  if let Some(bounds) = &scan.range {
    let (start, stop) = (bounds[0], bounds[1]);
    let step = bounds.get(2).copied().unwrap_or(1).max(1);
    let mut out = Vec::new();
    let mut k = start;
    while k < stop {
      out.push(vec![k]);
      k += step;
    }
    return out;
  }
  vec![]
}

fn print_search_report(class_size: u64, report: &primloop::search::SearchReport) {
  match report.best {
    Some(best) => println!("class {class_size}: best={best}"),
    None => println!("class {class_size}: best=none"),
  }
  for winner in &report.winners {
    println!("  winner: {}", to_tokens(winner));
  }
  for overflowed in &report.overflow {
    println!("  overflow: {}", to_tokens(overflowed));
  }
}
