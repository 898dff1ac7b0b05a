pub mod constants;
pub mod errors;
pub mod forces;
pub mod integrator;
pub mod output;
pub mod params;
pub mod particle;
pub mod scenario;
pub mod system;
pub mod units;
pub mod vector;
