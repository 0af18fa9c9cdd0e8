// src/validator.rs

use std::path::{Path, PathBuf};

use tokio::io::AsyncBufRead;

use crate::conjure::Conjure;
use crate::errors::{HarnessError, Result};
use crate::solutions::{solution_path, SolutionStream};

/// When solutions get validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Validate each solution as soon as it has been captured.
    Immediate,
    /// Capture everything first, then validate the first and last
    /// `ceil(n / 2)` solutions.
    HeadTail(usize),
}

impl ValidationMode {
    /// Non-positive counts select immediate validation.
    pub fn from_count(n: i64) -> Self {
        if n > 0 {
            ValidationMode::HeadTail(n as usize)
        } else {
            ValidationMode::Immediate
        }
    }
}

/// Everything one validation run needs.
#[derive(Debug, Clone)]
pub struct ValidatorOptions {
    pub mode: ValidationMode,
    pub solution_dir: PathBuf,
    pub conjure: Conjure,
    pub essence: PathBuf,
    pub param: Option<PathBuf>,
}

/// Indices (1-based) checked in head/tail mode.
pub fn sample_indices(total: usize, n: usize) -> Vec<usize> {
    if total <= n {
        return (1..=total).collect();
    }
    let k = n.div_ceil(2);
    // total > n >= 2k - 1, so the two ranges never overlap.
    (1..=k).chain(total + 1 - k..=total).collect()
}

/// Fails before any input is read if a required path is missing.
pub fn verify_paths(options: &ValidatorOptions) -> Result<()> {
    if !options.solution_dir.is_dir() {
        return Err(HarnessError::MissingPath {
            what: "an existing directory",
            path: options.solution_dir.clone(),
        });
    }
    if !options.essence.exists() {
        return Err(HarnessError::MissingPath {
            what: "a conjure essence file",
            path: options.essence.clone(),
        });
    }
    if let Some(param) = &options.param {
        if !param.exists() {
            return Err(HarnessError::MissingPath {
                what: "a conjure essence parameter file",
                path: param.clone(),
            });
        }
    }
    Ok(())
}

/// Runs conjure's validator on one captured solution.
pub async fn validate_solution(options: &ValidatorOptions, solution: &Path) -> Result<()> {
    println!("Validating solution at {}", solution.display());
    let output = options
        .conjure
        .validate_solution(&options.essence, options.param.as_deref(), solution)
        .await?;
    if !output.success {
        log::debug!("conjure output:\n{}", output.combined());
        return Err(HarnessError::InvalidSolution {
            path: solution.to_path_buf(),
            command: output.command,
        });
    }
    println!("solution valid");
    Ok(())
}

/// Reads solutions from `input`, validates them according to the mode and
/// returns how many solutions were found.
pub async fn run<R>(options: &ValidatorOptions, input: R) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    verify_paths(options)?;

    println!("Waiting for solutions\n");
    let mut stream = SolutionStream::new(input, &options.solution_dir);
    while let Some(path) = stream.next_solution().await? {
        if options.mode == ValidationMode::Immediate {
            validate_solution(options, &path).await?;
        }
    }

    let total = stream.count();
    if total == 0 {
        return Err(HarnessError::NoSolutions);
    }

    if let ValidationMode::HeadTail(n) = options.mode {
        let indices = sample_indices(total, n);
        log::info!("Validating {} of {} solutions", indices.len(), total);
        for index in indices {
            validate_solution(options, &solution_path(&options.solution_dir, index)).await?;
        }
    }

    println!("Success, all solutions valid.\nNumber solutions found: {}", total);
    Ok(total)
}
