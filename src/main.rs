use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use strips_planner::config::PlannerConfig;
use strips_planner::pddl;
use strips_planner::strips::STRIPSPlanner;

const USAGE: &str = "usage: strips-planner <domain.pddl> <problem.pddl> [--config planner.toml]";

#[derive(Debug, PartialEq)]
struct Args {
    domain: PathBuf,
    problem: PathBuf,
    config: Option<PathBuf>,
}

/// `Ok(None)` when help was requested.
fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Option<Args>> {
    let mut positional = Vec::new();
    let mut config = None;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => config = Some(PathBuf::from(args.next().context("--config needs a file")?)),
            "--help" | "-h" => return Ok(None),
            _ => positional.push(PathBuf::from(&arg)),
        }
    }
    if positional.len() != 2 {
        bail!(USAGE);
    }
    let problem = positional.pop().context(USAGE)?;
    let domain = positional.pop().context(USAGE)?;
    Ok(Some(Args { domain, problem, config }))
}

fn run() -> anyhow::Result<ExitCode> {
    let args = match parse_args(std::env::args().skip(1))? {
        Some(args) => args,
        None => {
            println!("{}", USAGE);
            return Ok(ExitCode::SUCCESS);
        },
    };
    let config = match &args.config {
        Some(path) => PlannerConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => PlannerConfig::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .context("invalid log level")?;
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let problem = pddl::load_files(&args.domain, &args.problem)?;
    info!(init = problem.init.len(), goal = problem.goal.len(), actions = problem.actions.len(), "problem loaded");

    let mut planner = STRIPSPlanner::with_config(&problem, config);
    debug!(problem = %planner.problem(), "planning");
    match planner.forward_search()? {
        Some(plan) => {
            for action in &plan {
                println!("{}", action);
            }
            Ok(ExitCode::SUCCESS)
        },
        None => {
            println!("no plan found");
            Ok(ExitCode::from(1))
        },
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::from(2)
        },
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{parse_args, Args};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_help_is_not_an_error() {
        assert_eq!(parse_args(args(&["--help"])).unwrap(), None);
        assert_eq!(parse_args(args(&["domain.pddl", "-h"])).unwrap(), None);
    }

    #[test]
    fn test_positional_and_config() {
        let parsed = parse_args(args(&["d.pddl", "--config", "planner.toml", "p.pddl"])).unwrap();
        assert_eq!(parsed, Some(Args {
            domain: PathBuf::from("d.pddl"),
            problem: PathBuf::from("p.pddl"),
            config: Some(PathBuf::from("planner.toml")),
        }));
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse_args(args(&["d.pddl"])).is_err());
        assert!(parse_args(args(&["d.pddl", "p.pddl", "extra.pddl"])).is_err());
        assert!(parse_args(args(&["d.pddl", "p.pddl", "--config"])).is_err());
    }
}
