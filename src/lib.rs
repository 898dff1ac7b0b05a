pub mod simulation;
pub mod configuration;
pub mod batch;
pub mod benchmark;

pub use simulation::vector::Vector2D;
pub use simulation::units::UnitSystem;
pub use simulation::particle::Particle;
pub use simulation::system::{ParticleSystem, RunSummary, Termination};
pub use simulation::forces::{Acceleration, AccelerationField, NewtonianGravity, StepPolicy};
pub use simulation::integrator::{IntegrationMethod, Step};
pub use simulation::params::Parameters;
pub use simulation::scenario::ThreeBodyFractal;
pub use simulation::errors::{
    ConfigError, InputFormatError, NumericDegeneracy, SimError, UnknownUnitSystem, VectorError,
};

pub use configuration::config::RunConfig;

pub use batch::runner::{run_directory, BatchReport};

pub use benchmark::benchmark::{bench_gravity, bench_methods};
