//! Simulation configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Wavelength sweep over which component models are evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WavelengthSweep {
    /// First wavelength (m).
    pub start: f64,
    /// Last wavelength (m).
    pub stop: f64,
    /// Number of points, endpoints included.
    pub points: usize,
}

impl Default for WavelengthSweep {
    fn default() -> Self {
        Self {
            start: 1.5e-6,
            stop: 1.6e-6,
            points: 500,
        }
    }
}

/// Parameters of the analytic component models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Waveguide effective index, used when no regression model is loaded.
    pub effective_index: f64,
    /// Waveguide propagation loss (dB/m).
    pub waveguide_loss_db_per_m: f64,
    /// Waveguide thickness fed to the regression (um).
    pub waveguide_thickness: f64,
    /// Waveguide sidewall angle fed to the regression (degrees).
    pub sidewall_angle: f64,
    /// Power fraction crossing over in the broadband coupler.
    pub coupler_ratio: f64,
    /// Power fraction coupled between bus and ring in the half-ring.
    pub half_ring_coupling: f64,
    /// Peak power transmission of the grating coupler.
    pub grating_peak_efficiency: f64,
    /// Grating coupler center wavelength (m).
    pub grating_center_wavelength: f64,
    /// Grating coupler 1 dB bandwidth (m).
    pub grating_bandwidth_1db: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            effective_index: 2.44,
            waveguide_loss_db_per_m: 300.0,
            waveguide_thickness: 0.22,
            sidewall_angle: 90.0,
            coupler_ratio: 0.5,
            half_ring_coupling: 0.1,
            grating_peak_efficiency: 0.3,
            grating_center_wavelength: 1.55e-6,
            grating_bandwidth_1db: 35e-9,
        }
    }
}

impl ModelConfig {
    /// Check that every parameter is physically meaningful.
    pub fn validate(&self) -> Result<()> {
        let fraction = |name: &str, value: f64| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(Error::InvalidParameter(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )))
            }
        };
        fraction("coupler_ratio", self.coupler_ratio)?;
        fraction("half_ring_coupling", self.half_ring_coupling)?;
        fraction("grating_peak_efficiency", self.grating_peak_efficiency)?;

        if self.effective_index <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "effective_index must be positive, got {}",
                self.effective_index
            )));
        }
        if self.grating_bandwidth_1db <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "grating_bandwidth_1db must be positive, got {}",
                self.grating_bandwidth_1db
            )));
        }
        Ok(())
    }
}

/// Complete simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Wavelength sweep.
    #[serde(default)]
    pub sweep: WavelengthSweep,
    /// Component model parameters.
    #[serde(default)]
    pub models: ModelConfig,
}

impl SimulationConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.models.validate()?;
        Ok(config)
    }

    /// Create with a custom wavelength sweep.
    pub fn with_sweep(mut self, sweep: WavelengthSweep) -> Self {
        self.sweep = sweep;
        self
    }

    /// Create with custom model parameters.
    pub fn with_models(mut self, models: ModelConfig) -> Self {
        self.models = models;
        self
    }
}
