//! Component models for sparnet.
//!
//! This crate provides:
//! - The per-frequency s-parameter container ([`SMatrix`])
//! - Frequency grids built from wavelength sweeps
//! - Simulation configuration
//! - The straight-waveguide polynomial regression
//! - Analytic s-parameter models for every known component kind

pub mod config;
pub mod error;
pub mod frequency;
pub mod models;
pub mod regression;
pub mod smatrix;

pub use config::{ModelConfig, SimulationConfig, WavelengthSweep};
pub use error::{Error, Result};
pub use frequency::{FrequencyGrid, SPEED_OF_LIGHT};
pub use models::{ModelLibrary, SParameterModel};
pub use regression::{cartesian_product, PolynomialRegression, StraightWaveguideRegression};
pub use smatrix::SMatrix;
