//! Frequency grids shared by every component in a simulation.

use std::sync::Arc;

use crate::config::WavelengthSweep;
use crate::error::{Error, Result};

/// Speed of light in vacuum (m/s).
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// The frequency points at which every component is evaluated.
///
/// Cloning is cheap; all clones share one frequency vector.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyGrid {
    frequencies: Arc<[f64]>,
}

impl FrequencyGrid {
    /// Build a grid linearly spaced in wavelength, endpoints included.
    pub fn from_sweep(sweep: &WavelengthSweep) -> Result<Self> {
        if sweep.points == 0 {
            return Err(Error::InvalidParameter(
                "wavelength sweep needs at least one point".to_string(),
            ));
        }
        if sweep.start <= 0.0 || sweep.stop <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "wavelengths must be positive, got {} .. {}",
                sweep.start, sweep.stop
            )));
        }

        let wavelengths: Vec<f64> = if sweep.points == 1 {
            vec![sweep.start]
        } else {
            let step = (sweep.stop - sweep.start) / (sweep.points as f64 - 1.0);
            (0..sweep.points)
                .map(|i| sweep.start + step * i as f64)
                .collect()
        };

        Ok(Self {
            frequencies: wavelengths.iter().map(|w| SPEED_OF_LIGHT / w).collect(),
        })
    }

    /// Build a grid from explicit frequencies (Hz).
    pub fn from_frequencies(frequencies: impl Into<Arc<[f64]>>) -> Self {
        Self {
            frequencies: frequencies.into(),
        }
    }

    /// Number of frequency points.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// True when the grid has no points.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Frequencies in Hz.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// A shared handle to the frequency vector.
    pub fn shared(&self) -> Arc<[f64]> {
        Arc::clone(&self.frequencies)
    }

    /// Wavelengths in meters, in grid order.
    pub fn wavelengths(&self) -> Vec<f64> {
        self.frequencies.iter().map(|f| SPEED_OF_LIGHT / f).collect()
    }
}
