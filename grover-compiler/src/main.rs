//! Command line interface for compiling Exact Cover instances into Grover
//! search circuits.
mod tracing;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use xc_grover::encoding::{Encoding, ExactCoverProblem};
use xc_grover::serialize::save_tk1_json_file;
use xc_grover::{ExactCoverSolver, GroverOptions, Precision};

use crate::tracing::{init_logging, LogGuard};

/// An element of the universe, as read from the problem file.
///
/// Elements may be integers, strings or (nested) lists of them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
enum Label {
    Int(i64),
    Text(String),
    Tuple(Vec<Label>),
}

/// Compile Exact Cover instances into Grover search circuits.
#[derive(Parser, Debug)]
#[clap(version = "1.0", long_about = None)]
#[clap(about = "Compiles Exact Cover instances into Grover search circuits in pytket JSON format.")]
struct CmdLineArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the circuit and save it as pytket JSON.
    Build(BuildArgs),
    /// Print the resource estimate of the circuit as JSON.
    Estimate(EstimateArgs),
}

#[derive(Args, Debug)]
struct ProblemArgs {
    /// Input problem file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Exact Cover problem in JSON format."
    )]
    input: PathBuf,
    /// Subset encoding.
    #[arg(
        long,
        default_value = "simple",
        value_name = "ENCODING",
        help = "The subset collection to search over: 'simple' or 'pattern'."
    )]
    encoding: String,
    /// Number of solutions.
    #[arg(
        short = 'm',
        long,
        value_name = "M",
        help = "Number of exact covers. Overrides the count in the problem file."
    )]
    num_solutions: Option<f64>,
    /// Log file.
    #[arg(
        short,
        long,
        value_name = "LOGFILE",
        help = "Log file for detailed progress, including every Grover iteration."
    )]
    logfile: Option<PathBuf>,
    /// Verbose console log.
    #[arg(
        short,
        long,
        help = "Also print debug events, such as block sizes and estimates, to stderr."
    )]
    verbose: bool,
}

#[derive(Args, Debug)]
struct BuildArgs {
    #[command(flatten)]
    problem: ProblemArgs,
    /// Output circuit file.
    #[arg(
        short,
        long,
        default_value = "grover.json",
        value_name = "FILE",
        help = "Output file for the circuit in pytket JSON format."
    )]
    output: PathBuf,
    /// Number of Grover iterations.
    #[arg(
        short = 'k',
        long,
        value_name = "K",
        help = "Number of Grover iterations. Derived from the number of solutions if missing."
    )]
    iterations: Option<usize>,
}

#[derive(Args, Debug)]
struct EstimateArgs {
    #[command(flatten)]
    problem: ProblemArgs,
    /// Decimal digits of precision.
    #[arg(
        short,
        long,
        default_value_t = Precision::DEFAULT_DIGITS,
        value_name = "DIGITS",
        help = "Decimal digits of precision for the iteration count."
    )]
    precision: u32,
}

impl ProblemArgs {
    fn init_logging(&self) -> std::io::Result<LogGuard> {
        init_logging(self.logfile.as_deref(), self.verbose)
    }

    fn load(&self) -> Result<ExactCoverProblem<Label>, Box<dyn std::error::Error>> {
        let reader = BufReader::new(File::open(&self.input)?);
        Ok(serde_json::from_reader(reader)?)
    }

    fn options(&self) -> Result<GroverOptions, Box<dyn std::error::Error>> {
        let encoding: Encoding = self.encoding.parse()?;
        Ok(GroverOptions {
            encoding,
            num_solutions: self.num_solutions,
            ..Default::default()
        })
    }
}

fn build(args: BuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    let _log = args.problem.init_logging()?;

    let problem = args.problem.load()?;
    let options = GroverOptions {
        num_iterations: args.iterations,
        ..args.problem.options()?
    };
    let solver = ExactCoverSolver::new(&problem, options)?;

    println!("Building circuit...");
    let grover = solver.build()?;
    let circ = grover.circuit();
    println!(
        "Built {} iterations: {} qubits, {} operations.",
        grover.num_iterations(),
        circ.qubit_count(),
        circ.num_operations()
    );

    println!("Saving result");
    save_tk1_json_file(circ, &args.output)?;
    println!("Done.");
    Ok(())
}

fn estimate(args: EstimateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let _log = args.problem.init_logging()?;

    let problem = args.problem.load()?;
    let options = GroverOptions {
        precision: Precision::new(args.precision)?,
        ..args.problem.options()?
    };
    let solver = ExactCoverSolver::new(&problem, options)?;
    let estimate = solver.estimate()?;
    println!("{}", serde_json::to_string_pretty(&estimate)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = CmdLineArgs::parse();

    match opts.command {
        Command::Build(args) => build(args),
        Command::Estimate(args) => estimate(args),
    }
}
