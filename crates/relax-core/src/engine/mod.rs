pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
