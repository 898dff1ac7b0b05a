//! Configuration types for loading a simulation run from YAML.
//!
//! A run configuration names the working unit system, where input particle
//! files are read from and output trajectories are written to, and the
//! integration parameters shared by every file in the batch.
//!
//! # YAML format
//!
//! ```yaml
//! unitSystem: "solsys"          # working unit system, see UnitSystem::available_ids
//! inputFilesDir: "input"        # every regular file in here is one simulation
//! outputDir: "output"           # <stem>_output.txt is written here per input file
//! fixedTimeStep: 0.001          # step size, also the fallback under adaptive stepping
//! maxVelocityStep: 0.01         # largest velocity change per step when adaptive
//! enableAdaptiveTimeStep: false
//! maxTime: 100.0
//! maxIterations: 0              # 0 -> unbounded
//! writeStatePeriod: 0.1
//! integrationMethod: "kdk"      # euler | kdk | dkd | rk4
//! ```
//!
//! The run resolves this into [`Parameters`](crate::simulation::params::Parameters)
//! before any input file is touched.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::simulation::errors::ConfigError;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    pub unit_system: String,
    pub input_files_dir: PathBuf,
    pub output_dir: PathBuf,
    pub fixed_time_step: f64,
    pub max_velocity_step: f64,
    pub enable_adaptive_time_step: bool,
    pub max_time: f64,
    #[serde(default)]
    pub max_iterations: u64, // 0 = unbounded
    pub write_state_period: f64,
    pub integration_method: String,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);

        serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}
