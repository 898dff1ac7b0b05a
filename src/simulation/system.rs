//! One simulation run: the particles read from a single input file
//!
//! Input format, one record per line:
//! - line 1: unit system id the file's values are expressed in
//! - after that: `mass posX posY velX velY`, whitespace separated
//!
//! Values are converted into the run's working unit system as they are read.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::simulation::errors::{InputFormatError, NumericDegeneracy, SimError};
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::output::{format_float, StateWriter, ITERATION_LIMIT_TIME};
use crate::simulation::params::Parameters;
use crate::simulation::particle::Particle;
use crate::simulation::units::UnitSystem;
use crate::simulation::vector::Vector2D;

const RECORD_FIELDS: [&str; 5] = ["mass", "posX", "posY", "velX", "velY"];

/// Why the time loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    TimeExceeded,
    IterationExceeded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub termination: Termination,
    pub iterations: u64,
    pub records: usize, // state records written, sentinel included
    pub final_time: f64,
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    label: String, // input file stem, names the output file
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new(label: impl Into<String>, particles: Vec<Particle>) -> Self {
        Self {
            label: label.into(),
            particles,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Read particles from `path`, labelled with the file stem
    pub fn from_path(path: &Path, unit_system: Arc<UnitSystem>) -> Result<Self, SimError> {
        let file = File::open(path).map_err(|source| SimError::Resource {
            path: path.to_path_buf(),
            source,
        })?;
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self::from_reader(label, BufReader::new(file), unit_system)
    }

    pub fn from_reader<R: BufRead>(
        label: impl Into<String>,
        reader: R,
        unit_system: Arc<UnitSystem>,
    ) -> Result<Self, SimError> {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => return Err(InputFormatError::MissingUnitSystem.into()),
        };
        let id = header.trim();
        if id.is_empty() {
            return Err(InputFormatError::MissingUnitSystem.into());
        }
        let file_units = UnitSystem::new(id)
            .map_err(|source| InputFormatError::UnknownUnitSystem { line: 1, source })?;

        let mut particles = Vec::new();
        for (index, line) in lines.enumerate() {
            let line = line?;
            let line_number = index + 2;
            if line.trim().is_empty() {
                continue;
            }
            let raw = parse_record(&line, line_number)?;
            if raw[0] <= 0.0 {
                return Err(InputFormatError::NonPositiveMass {
                    line: line_number,
                    mass: raw[0],
                }
                .into());
            }

            let [mass, pos_x, pos_y, vel_x, vel_y] =
                convert_record(raw, line_number, &file_units, &unit_system)?;
            particles.push(Particle::new(
                mass,
                Vector2D::new(pos_x, pos_y),
                Vector2D::new(vel_x, vel_y),
                unit_system.clone(),
            ));
        }

        if particles.is_empty() {
            return Err(InputFormatError::NoParticles.into());
        }

        Ok(Self::new(label, particles))
    }

    /// Sum of all pairwise potential energies plus all kinetic energies
    pub fn total_energy(&self) -> Result<f64, NumericDegeneracy> {
        let n = self.particles.len();
        let mut potential = 0.0;

        for i in 0..n {
            for j in (i + 1)..n {
                potential += self.particles[i]
                    .potential_energy(&self.particles[j])
                    .map_err(|e| e.between(i, j))?;
            }
        }

        let kinetic: f64 = self.particles.iter().map(Particle::kinetic_energy).sum();

        Ok(potential + kinetic)
    }

    /// Integrate until `max_time` is passed or the iteration cap is exceeded,
    /// writing a record to `out` every `write_state_period`.
    ///
    /// A run stopped by the iteration cap ends with one record stamped
    /// [`ITERATION_LIMIT_TIME`].
    pub fn simulate<W: Write>(
        &mut self,
        params: &Parameters,
        out: W,
    ) -> Result<RunSummary, SimError> {
        let gravity = NewtonianGravity;
        let policy = params.step_policy();
        let method = params.integration_method;
        let mut writer = StateWriter::new(out);

        debug!(
            label = %self.label,
            particles = self.particles.len(),
            method = %method,
            "starting simulation"
        );

        let field = gravity.accelerations(&self.particles, &policy)?;
        let mut accelerations = field.accelerations;
        let mut time_step = field.time_step;

        let mut current_time = 0.0;
        let mut write_counter: u64 = 0;
        let mut iteration: u64 = 0;

        let termination = loop {
            if !(current_time <= params.max_time) {
                break Termination::TimeExceeded;
            }

            iteration += 1;

            if current_time >= write_counter as f64 * params.write_state_period {
                self.write_state(&mut writer, current_time)?;
                write_counter += 1;
            }

            let step = method.advance(
                &mut self.particles,
                &mut accelerations,
                time_step,
                &gravity,
                &policy,
            )?;

            if params.max_iterations > 0 && iteration > params.max_iterations {
                self.write_state(&mut writer, ITERATION_LIMIT_TIME)?;
                break Termination::IterationExceeded;
            }

            current_time += step.taken;
            time_step = step.next;
        };

        writer.flush()?;

        debug!(label = %self.label, ?termination, iteration, current_time, "simulation finished");

        Ok(RunSummary {
            termination,
            iterations: iteration,
            records: writer.records(),
            final_time: current_time,
        })
    }

    /// Run [`simulate`](Self::simulate) into `<dir>/<label>_output.txt`
    pub fn simulate_to_dir(
        &mut self,
        params: &Parameters,
        dir: &Path,
    ) -> Result<(PathBuf, RunSummary), SimError> {
        fs::create_dir_all(dir).map_err(|source| SimError::Resource {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(format!("{}_output.txt", self.label));
        let file = File::create(&path).map_err(|source| SimError::Resource {
            path: path.clone(),
            source,
        })?;

        // BufWriter flushes on drop when simulate bails out early
        let summary = self.simulate(params, BufWriter::new(file))?;
        Ok((path, summary))
    }

    fn write_state<W: Write>(
        &self,
        writer: &mut StateWriter<W>,
        time: f64,
    ) -> Result<(), SimError> {
        let energy = self.total_energy()?;
        writer.write_state(time, &self.particles, energy)?;
        Ok(())
    }
}

fn parse_record(line: &str, line_number: usize) -> Result<[f64; 5], InputFormatError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != RECORD_FIELDS.len() {
        return Err(InputFormatError::RecordFormat {
            line: line_number,
            found: fields.len(),
        });
    }

    let mut values = [0.0; 5];
    for ((value, raw), name) in values.iter_mut().zip(&fields).zip(RECORD_FIELDS) {
        *value = raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| InputFormatError::InvalidNumber {
                line: line_number,
                field: name,
                value: raw.to_string(),
            })?;
    }
    Ok(values)
}

/// Record values in the working units. A value that is fine in the file's units
/// may still overflow, or a mass underflow to zero, once converted
fn convert_record(
    raw: [f64; 5],
    line_number: usize,
    file_units: &UnitSystem,
    working: &UnitSystem,
) -> Result<[f64; 5], InputFormatError> {
    let converted = [
        working.convert_mass(raw[0], file_units),
        working.convert_length(raw[1], file_units),
        working.convert_length(raw[2], file_units),
        working.convert_velocity(raw[3], file_units),
        working.convert_velocity(raw[4], file_units),
    ];

    for (k, (value, field)) in converted.iter().zip(RECORD_FIELDS).enumerate() {
        let mass_lost = k == 0 && *value <= 0.0;
        if !value.is_finite() || mass_lost {
            return Err(InputFormatError::Unrepresentable {
                line: line_number,
                field,
                value: format_float(raw[k]),
                unit_system: working.id.clone(),
            });
        }
    }
    Ok(converted)
}
