//! Error taxonomy for configuration, input parsing and integration
//!
//! - [`ConfigError`]       – bad run configuration, aborts before any file is touched
//! - [`InputFormatError`]  – malformed particle file, fatal for that file only
//! - [`NumericDegeneracy`] – coincident particles during force or energy evaluation
//! - [`SimError`]          – everything that can end a single file's run

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum VectorError {
    IndexOutOfRange(usize),
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorError::IndexOutOfRange(i) => {
                write!(f, "index {i} out of range, expected 0 (x) or 1 (y)")
            }
        }
    }
}

impl std::error::Error for VectorError {}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownUnitSystem(pub String);

impl fmt::Display for UnknownUnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown unit system '{}', expected one of: {}",
            self.0,
            crate::simulation::units::UnitSystem::available_ids().join(", ")
        )
    }
}

impl std::error::Error for UnknownUnitSystem {}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_yaml::Error },
    UnknownUnitSystem(UnknownUnitSystem),
    UnsupportedIntegrationMethod(String),
    InvalidParameter {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, .. } => {
                write!(f, "could not read config file '{}'", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "could not parse config file '{}': {source}", path.display())
            }
            ConfigError::UnknownUnitSystem(e) => write!(f, "config parameter 'unitSystem': {e}"),
            ConfigError::UnsupportedIntegrationMethod(name) => write!(
                f,
                "config parameter 'integrationMethod': unsupported integration method '{name}', \
                 expected one of: euler, kdk, dkd, rk4"
            ),
            ConfigError::InvalidParameter { name, value, expected } => {
                write!(f, "config parameter '{name} = {value}' is invalid, expected {expected}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::UnknownUnitSystem(e) => Some(e),
            _ => None,
        }
    }
}

impl From<UnknownUnitSystem> for ConfigError {
    fn from(e: UnknownUnitSystem) -> Self {
        ConfigError::UnknownUnitSystem(e)
    }
}

/// Malformed particle input. Line numbers are 1-based
#[derive(Debug, Clone, PartialEq)]
pub enum InputFormatError {
    MissingUnitSystem,
    UnknownUnitSystem { line: usize, source: UnknownUnitSystem },
    RecordFormat { line: usize, found: usize },
    InvalidNumber { line: usize, field: &'static str, value: String },
    NonPositiveMass { line: usize, mass: f64 },
    /// Valid in the file's units but zero mass or non-finite once converted
    Unrepresentable { line: usize, field: &'static str, value: String, unit_system: String },
    NoParticles,
}

impl fmt::Display for InputFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormatError::MissingUnitSystem => {
                write!(f, "missing unit system id on line 1")
            }
            InputFormatError::UnknownUnitSystem { line, source } => {
                write!(f, "line {line}: {source}")
            }
            InputFormatError::RecordFormat { line, found } => write!(
                f,
                "line {line}: expected 5 fields 'mass posX posY velX velY', found {found}"
            ),
            InputFormatError::InvalidNumber { line, field, value } => {
                write!(f, "line {line}: field '{field}' = '{value}' is not a finite number")
            }
            InputFormatError::NonPositiveMass { line, mass } => {
                write!(f, "line {line}: mass must be positive, got {mass}")
            }
            InputFormatError::Unrepresentable { line, field, value, unit_system } => write!(
                f,
                "line {line}: field '{field}' = '{value}' is out of range in unit system '{unit_system}'"
            ),
            InputFormatError::NoParticles => {
                write!(f, "no particle records after the unit system line")
            }
        }
    }
}

impl std::error::Error for InputFormatError {}

#[derive(Debug, Clone, PartialEq)]
pub enum NumericDegeneracy {
    /// Zero separation between two particles, before the pair is identified
    ZeroSeparation,
    /// Particles `first` and `second` of a system share a position
    CoincidentParticles { first: usize, second: usize },
}

impl NumericDegeneracy {
    /// Attach the system indices of the offending pair
    pub fn between(self, first: usize, second: usize) -> Self {
        match self {
            NumericDegeneracy::ZeroSeparation => {
                NumericDegeneracy::CoincidentParticles { first, second }
            }
            other => other,
        }
    }
}

impl fmt::Display for NumericDegeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericDegeneracy::ZeroSeparation => {
                write!(f, "zero separation, gravity is singular")
            }
            NumericDegeneracy::CoincidentParticles { first, second } => write!(
                f,
                "particles {first} and {second} coincide, gravity is singular at zero separation"
            ),
        }
    }
}

impl std::error::Error for NumericDegeneracy {}

#[derive(Debug)]
pub enum SimError {
    Input(InputFormatError),
    Numeric(NumericDegeneracy),
    Resource { path: PathBuf, source: io::Error },
    /// Unit system named outside of any input file, e.g. by a scenario
    UnknownUnitSystem(UnknownUnitSystem),
    Io(io::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Input(e) => write!(f, "invalid input: {e}"),
            SimError::Numeric(e) => write!(f, "numeric degeneracy: {e}"),
            SimError::Resource { path, source } => {
                write!(f, "could not access '{}': {source}", path.display())
            }
            SimError::UnknownUnitSystem(e) => write!(f, "{e}"),
            SimError::Io(e) => write!(f, "i/o error: {e}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Input(e) => Some(e),
            SimError::Numeric(e) => Some(e),
            SimError::Resource { source, .. } => Some(source),
            SimError::UnknownUnitSystem(e) => Some(e),
            SimError::Io(e) => Some(e),
        }
    }
}

impl From<InputFormatError> for SimError {
    fn from(e: InputFormatError) -> Self {
        SimError::Input(e)
    }
}

impl From<NumericDegeneracy> for SimError {
    fn from(e: NumericDegeneracy) -> Self {
        SimError::Numeric(e)
    }
}

impl From<UnknownUnitSystem> for SimError {
    fn from(e: UnknownUnitSystem) -> Self {
        SimError::UnknownUnitSystem(e)
    }
}

impl From<io::Error> for SimError {
    fn from(e: io::Error) -> Self {
        SimError::Io(e)
    }
}
