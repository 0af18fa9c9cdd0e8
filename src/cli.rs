// src/cli.rs
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::conjure::Conjure;
use crate::errors::{HarnessError, Result};
use crate::validator::{ValidationMode, ValidatorOptions};

const VALIDATOR_USAGE: &str = "validate-solutions [num_head_tail_sols] solution_dest_directory conjure_exec_command essence_file [essence_param_file]";

/// Command line of the `validate-solutions` binary.
#[derive(Parser, Debug)]
#[command(
    name = "validate-solutions",
    version,
    about = "Split a stream of conjure solutions into files and validate them",
    override_usage = VALIDATOR_USAGE,
    after_help = "num_head_tail_sols should be a number. If it is not given, each solution is \
                  validated before the next one is read. If it is an int > 0, all solutions are \
                  read first and then the first and last n/2 (rounded up) are validated."
)]
pub struct ValidatorCli {
    #[arg(
        required = true,
        num_args = 3..=5,
        value_name = "ARGS",
        allow_negative_numbers = true
    )]
    pub args: Vec<String>,

    /// Give up on a single validation after this many seconds.
    #[arg(long, env = "CONJURE_TOOL_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl ValidatorCli {
    /// Interprets the positional arguments. A leading integer is the
    /// head/tail sample size, everything after it is positional.
    pub fn into_options(self) -> Result<ValidatorOptions> {
        let mut args = self.args;
        let head_tail = match args.first().and_then(|first| first.trim().parse::<i64>().ok()) {
            Some(n) => {
                args.remove(0);
                n
            }
            None => 0,
        };

        if !(3..=4).contains(&args.len()) {
            return Err(HarnessError::Config(format!("usage:\n{}", VALIDATOR_USAGE)));
        }

        let mut args = args.into_iter();
        let solution_dir = args.next().map(PathBuf::from).unwrap_or_default();
        let conjure_path = args.next().map(PathBuf::from).unwrap_or_default();
        let essence = args.next().map(PathBuf::from).unwrap_or_default();
        let param = args.next().map(PathBuf::from);

        let timeout = self.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs);

        Ok(ValidatorOptions {
            mode: ValidationMode::from_count(head_tail),
            solution_dir,
            conjure: Conjure::new(conjure_path).with_timeout(timeout),
            essence,
            param,
        })
    }
}

/// Command line of the `conjure-server` binary.
#[derive(Parser, Debug)]
#[command(name = "conjure-server", version, about = "Serve the essence front end and convert models through conjure")]
pub struct ServerCli {
    /// Path to the conjure executable, overriding the configured one.
    pub conjure_exec: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(args: &[&str]) -> std::result::Result<ValidatorCli, clap::Error> {
        ValidatorCli::try_parse_from(std::iter::once("validate-solutions").chain(args.iter().copied()))
    }

    #[test]
    fn test_plain_arguments() {
        let opts = parse(&["out", "conjure", "model.essence"])
            .unwrap()
            .into_options()
            .unwrap();
        assert_eq!(opts.mode, ValidationMode::Immediate);
        assert_eq!(opts.solution_dir, PathBuf::from("out"));
        assert_eq!(opts.conjure.program(), Path::new("conjure"));
        assert_eq!(opts.essence, PathBuf::from("model.essence"));
        assert!(opts.param.is_none());
    }

    #[test]
    fn test_leading_count_and_param() {
        let opts = parse(&["6", "out", "conjure", "model.essence", "inst.param"])
            .unwrap()
            .into_options()
            .unwrap();
        assert_eq!(opts.mode, ValidationMode::HeadTail(6));
        assert_eq!(opts.param, Some(PathBuf::from("inst.param")));
    }

    #[test]
    fn test_negative_count_means_immediate() {
        let opts = parse(&["-2", "out", "conjure", "model.essence"])
            .unwrap()
            .into_options()
            .unwrap();
        assert_eq!(opts.mode, ValidationMode::Immediate);
        assert_eq!(opts.solution_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_missing_arguments_rejected() {
        assert!(parse(&["out", "conjure"]).is_err());
        // The count does not count towards the required positionals.
        let err = parse(&["4", "out", "conjure"])
            .unwrap()
            .into_options()
            .unwrap_err();
        assert!(err.to_string().contains("usage"));
    }

    #[test]
    fn test_server_override() {
        let cli = ServerCli::try_parse_from(["conjure-server", "/opt/conjure"]).unwrap();
        assert_eq!(cli.conjure_exec, Some(PathBuf::from("/opt/conjure")));
        let cli = ServerCli::try_parse_from(["conjure-server"]).unwrap();
        assert!(cli.conjure_exec.is_none());
    }
}
