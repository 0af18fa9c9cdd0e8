// src/bin/validate_solutions.rs
use clap::Parser;
use conjure_harness::cli::ValidatorCli;
use conjure_harness::errors::HarnessError;
use conjure_harness::validator;

const PROGRAM: &str = "validate-solutions";

fn report(err: &HarnessError) {
    match err {
        // These carry their own "***" banner.
        HarnessError::NoSolutions | HarnessError::InvalidSolution { .. } => eprintln!("{}", err),
        _ => eprintln!("Error: {}: {}", PROGRAM, err),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = ValidatorCli::parse();
    let options = match cli.into_options() {
        Ok(options) => options,
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    };

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    if let Err(e) = validator::run(&options, stdin).await {
        report(&e);
        std::process::exit(1);
    }
}
