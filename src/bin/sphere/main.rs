extern crate sphere;
extern crate structopt;
extern crate tracing;

use sphere::{
    resolve_optima, Config, Error, Evaluation, Evaluator, LogConfig, Verbosity, OPTIMA_ENV_VAR,
};
use std::path::PathBuf;
use structopt::clap::{AppSettings, ErrorKind};
use structopt::StructOpt;
use tracing::{debug, error, info};

/// Evaluate the sphere function for one candidate.
///
/// Prints a single JSON line `{"objective": ...}` to stdout.
/// On failure, the objective is null and an `error` is added.
#[derive(Debug, StructOpt)]
#[structopt(name = "sphere", setting = AppSettings::ColorNever)]
struct CliApp {
    /// Show more diagnostics on stderr. Can be repeated.
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u64,

    /// Show fewer diagnostics on stderr. Can be repeated.
    #[structopt(short, long, parse(from_occurrences))]
    quiet: u64,

    /// Optima as JSON, e.g. `[[0, 0], [1, 1]]`, or a YAML/JSON file containing them.
    /// Takes precedence over $SPHERE_OPTIMA and the config file.
    #[structopt(long)]
    optima: Option<String>,

    /// YAML or JSON file with defaults for `optima` and `verbosity`.
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Candidate as JSON. If absent, one line is read from stdin.
    #[structopt(short = "x", long, allow_hyphen_values = true)]
    variable: Option<String>,

    /// Verbosity as a word of `v` and `q` characters, e.g. `vv`.
    verbosity: Option<Verbosity>,
}

fn main() {
    let args = match CliApp::from_iter_safe(std::env::args_os()) {
        Ok(args) => args,
        Err(err) => match err.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => err.exit(),
            _ => {
                eprintln!("{}", err.message);
                let summary = err.message.lines().next().unwrap_or_default();
                let summary = summary.trim_start_matches("error:").trim();
                println!(
                    "{}",
                    Evaluation::Failure(format!("invalid arguments: {}", summary))
                );
                return;
            }
        },
    };

    // handled errors are part of the result line; the exit status stays 0
    println!("{}", run(args));
}

fn run(args: CliApp) -> Evaluation {
    let config = args.config.as_ref().map(Config::load).transpose();

    let verbosity = Verbosity::from_counts(args.verbose, args.quiet)
        + args.verbosity.unwrap_or_default()
        + config
            .as_ref()
            .ok()
            .and_then(Option::as_ref)
            .map(Config::verbosity)
            .unwrap_or_default();

    LogConfig::new(verbosity).scope(|| {
        let result = command_evaluate(&args, config);
        if let Err(err) = &result {
            error!("{}", err);
        }
        Evaluation::from(result)
    })
}

fn command_evaluate(args: &CliApp, config: Result<Option<Config>, Error>) -> Result<Vec<f64>, Error> {
    debug!("args: {:?}", args);
    let config = config?;

    let env_optima = std::env::var(OPTIMA_ENV_VAR).ok();
    let (optima, source) = resolve_optima(
        args.optima.as_deref(),
        env_optima.as_deref(),
        config.as_ref(),
    )?;
    info!(
        "{} optima of dimension {} from {:?}",
        optima.len(),
        optima.dim(),
        source
    );

    let evaluator = Evaluator::new(optima);
    let objectives = match &args.variable {
        Some(variable) => evaluator.evaluate_str(variable)?,
        None => {
            let stdin = std::io::stdin();
            let stdin = stdin.lock();
            evaluator.evaluate_reader(stdin)?
        }
    };

    info!("objectives: {:?}", objectives);
    Ok(objectives)
}
