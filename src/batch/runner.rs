//! Run every input file of a directory as an independent simulation
//!
//! Files are processed in parallel with rayon. The working unit system is the
//! only shared state besides the progress counter; a failing file is logged
//! and recorded without stopping its siblings.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{debug, error, info};

use crate::simulation::errors::SimError;
use crate::simulation::params::Parameters;
use crate::simulation::system::{ParticleSystem, RunSummary};

#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub result: Result<(PathBuf, RunSummary), SimError>, // output path on success
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>, // same order as the sorted input listing
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

/// Regular files directly inside `dir`, sorted by path
pub fn input_files(dir: &Path) -> Result<Vec<PathBuf>, SimError> {
    let resource = |source| SimError::Resource {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(resource)? {
        let entry = entry.map_err(resource)?;
        if entry.file_type().map_err(resource)?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

fn run_file(
    params: &Parameters,
    input: &Path,
    output_dir: &Path,
) -> Result<(PathBuf, RunSummary), SimError> {
    let mut system = ParticleSystem::from_path(input, params.unit_system.clone())?;
    system.simulate_to_dir(params, output_dir)
}

pub fn run_directory(
    params: &Parameters,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<BatchReport, SimError> {
    let files = input_files(input_dir)?;
    let total = files.len();
    let progress = AtomicUsize::new(0);

    info!(files = total, input_dir = %input_dir.display(), "starting batch");

    let outcomes = files
        .into_par_iter()
        .map(|input| {
            let result = run_file(params, &input, output_dir);

            match &result {
                Ok((output, summary)) => debug!(
                    input = %input.display(),
                    output = %output.display(),
                    termination = ?summary.termination,
                    records = summary.records,
                    "finished"
                ),
                Err(e) => error!(input = %input.display(), "simulation failed: {e}"),
            }

            let done = progress.fetch_add(1, Ordering::SeqCst) + 1;
            info!(
                "Progress: {done}/{total} ({:.2} %)",
                done as f64 / total as f64 * 100.0
            );

            FileOutcome { input, result }
        })
        .collect();

    Ok(BatchReport { outcomes })
}
