//! Analytic s-parameter models for the known component kinds.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use num_complex::Complex64;
use sparnet_core::component::DEFAULT_WAVEGUIDE_WIDTH;
use sparnet_core::{Component, ComponentKind};

use crate::config::ModelConfig;
use crate::error::{Error, Result};
use crate::frequency::FrequencyGrid;
use crate::regression::StraightWaveguideRegression;
use crate::smatrix::SMatrix;

/// Anything that can produce the s-parameters of a component.
pub trait SParameterModel {
    /// Evaluate the component at every point of the grid.
    ///
    /// The returned matrix has one port per entry of the component's kind
    /// port count, in the kind's port order.
    fn s_parameters(&self, component: &Component, grid: &FrequencyGrid) -> Result<SMatrix>;
}

/// The default model set, parameterised by a [`ModelConfig`].
#[derive(Debug, Clone, Default)]
pub struct ModelLibrary {
    config: ModelConfig,
    regression: Option<StraightWaveguideRegression>,
}

impl ModelLibrary {
    /// Create a library with the given model parameters.
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            regression: None,
        }
    }

    /// Use a loaded regression for waveguide effective indices.
    pub fn with_regression(mut self, regression: StraightWaveguideRegression) -> Self {
        self.regression = Some(regression);
        self
    }

    /// The model parameters.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// The waveguide regression, if one is loaded.
    pub fn regression(&self) -> Option<&StraightWaveguideRegression> {
        self.regression.as_ref()
    }

    /// Effective index at each wavelength (m) for a waveguide of the given
    /// width (um).
    fn effective_index(&self, wavelengths: &[f64], width: f64) -> Result<Vec<f64>> {
        match &self.regression {
            Some(regression) => {
                let wavelengths_um: Vec<f64> = wavelengths.iter().map(|w| w * 1e6).collect();
                log::debug!(
                    "regression effective index for width {} um over {} points",
                    width,
                    wavelengths.len()
                );
                regression.effective_index(
                    &wavelengths_um,
                    width,
                    self.config.waveguide_thickness,
                    self.config.sidewall_angle,
                )
            }
            None => Ok(vec![self.config.effective_index; wavelengths.len()]),
        }
    }

    fn waveguide(&self, length: f64, width: f64, grid: &FrequencyGrid) -> Result<SMatrix> {
        if length < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "waveguide length must be non-negative, got {}",
                length
            )));
        }
        let wavelengths = grid.wavelengths();
        let neff = self.effective_index(&wavelengths, width)?;
        let amplitude = 10f64.powf(-self.config.waveguide_loss_db_per_m * length / 20.0);

        Ok(SMatrix::reciprocal(grid.len(), 2, |k| {
            let phase = 2.0 * PI * neff[k] * length / wavelengths[k];
            vec![(0, 1, Complex64::from_polar(amplitude, -phase))]
        }))
    }

    fn y_branch(&self, grid: &FrequencyGrid) -> SMatrix {
        let split = Complex64::new(FRAC_1_SQRT_2, 0.0);
        SMatrix::reciprocal(grid.len(), 3, |_| vec![(0, 1, split), (0, 2, split)])
    }

    /// Ports (0, 1) on the left, (2, 3) on the right. 0-2 and 1-3 are the
    /// through paths.
    fn bidirectional_coupler(&self, grid: &FrequencyGrid) -> SMatrix {
        let k = self.config.coupler_ratio;
        let through = Complex64::new((1.0 - k).sqrt(), 0.0);
        let cross = Complex64::new(0.0, k.sqrt());
        SMatrix::reciprocal(grid.len(), 4, |_| {
            vec![(0, 2, through), (1, 3, through), (0, 3, cross), (1, 2, cross)]
        })
    }

    /// Bus on ports (0, 2), ring ends on ports (1, 3). The ring side carries
    /// the half-circumference phase, split evenly across the coupling paths.
    fn half_ring(&self, radius: f64, grid: &FrequencyGrid) -> Result<SMatrix> {
        if radius <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "half-ring radius must be positive, got {}",
                radius
            )));
        }
        let k = self.config.half_ring_coupling;
        let t = (1.0 - k).sqrt();
        let kappa = k.sqrt();

        let wavelengths = grid.wavelengths();
        // The netlist carries no ring width for this kind.
        let neff = self.effective_index(&wavelengths, DEFAULT_WAVEGUIDE_WIDTH)?;
        let path = PI * radius;

        Ok(SMatrix::reciprocal(grid.len(), 4, |f| {
            let phi = 2.0 * PI * neff[f] * path / wavelengths[f];
            let half = Complex64::from_polar(1.0, -phi / 2.0);
            let coupled = Complex64::new(0.0, kappa) * half;
            vec![
                (0, 2, Complex64::new(t, 0.0)),
                (1, 3, Complex64::new(t, 0.0) * half * half),
                (0, 3, coupled),
                (1, 2, coupled),
            ]
        }))
    }

    /// Port 0 is the fiber, port 1 the waveguide.
    fn grating_coupler(&self, grid: &FrequencyGrid) -> SMatrix {
        let peak_db = 10.0 * self.config.grating_peak_efficiency.log10();
        let half_bw = self.config.grating_bandwidth_1db / 2.0;
        let center = self.config.grating_center_wavelength;
        let wavelengths = grid.wavelengths();

        SMatrix::reciprocal(grid.len(), 2, |k| {
            let detune = (wavelengths[k] - center) / half_bw;
            let power_db = peak_db - detune * detune;
            let amplitude = 10f64.powf(power_db / 20.0);
            vec![(0, 1, Complex64::new(amplitude, 0.0))]
        })
    }
}

impl SParameterModel for ModelLibrary {
    fn s_parameters(&self, component: &Component, grid: &FrequencyGrid) -> Result<SMatrix> {
        let s = match &component.kind {
            ComponentKind::Waveguide { length, width, .. } => self.waveguide(*length, *width, grid)?,
            ComponentKind::YBranch => self.y_branch(grid),
            ComponentKind::BidirectionalCoupler => self.bidirectional_coupler(grid),
            ComponentKind::HalfRing { radius } => self.half_ring(*radius, grid)?,
            ComponentKind::GratingCoupler => self.grating_coupler(grid),
            ComponentKind::Terminator => SMatrix::reciprocal(grid.len(), 1, |_| Vec::new()),
        };
        log::debug!(
            "evaluated {} ({}) at {} points",
            component.instance,
            component.type_name(),
            grid.len()
        );
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WavelengthSweep;
    use crate::regression::PolynomialRegression;
    use nalgebra::DMatrix;

    fn grid() -> FrequencyGrid {
        FrequencyGrid::from_sweep(&WavelengthSweep {
            start: 1.5e-6,
            stop: 1.6e-6,
            points: 5,
        })
        .unwrap()
    }

    fn assert_unitary(m: &DMatrix<Complex64>) {
        let product = m.adjoint() * m;
        for i in 0..m.nrows() {
            for j in 0..m.ncols() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (product[(i, j)] - Complex64::new(expected, 0.0)).norm() < 1e-12,
                    "not unitary at ({}, {}): {}",
                    i,
                    j,
                    product[(i, j)]
                );
            }
        }
    }

    fn lossless() -> ModelLibrary {
        ModelLibrary::new(ModelConfig {
            waveguide_loss_db_per_m: 0.0,
            ..Default::default()
        })
    }

    #[test]
    fn test_port_counts_match_kinds() {
        let library = ModelLibrary::default();
        let grid = grid();
        let kinds = [
            ComponentKind::Waveguide {
                length: 10e-6,
                width: 0.5,
                points: Vec::new(),
            },
            ComponentKind::YBranch,
            ComponentKind::BidirectionalCoupler,
            ComponentKind::HalfRing { radius: 5e-6 },
            ComponentKind::GratingCoupler,
            ComponentKind::Terminator,
        ];
        for kind in kinds {
            let component = Component::new("c", kind);
            let s = library.s_parameters(&component, &grid).unwrap();
            assert_eq!(s.nports(), component.expected_ports());
            assert_eq!(s.nfreq(), grid.len());
        }
    }

    #[test]
    fn test_lossless_waveguide_phase() {
        let library = lossless();
        let grid = grid();
        let length = 100e-6;
        let component = Component::new(
            "wg",
            ComponentKind::Waveguide {
                length,
                width: 0.5,
                points: Vec::new(),
            },
        );
        let s = library.s_parameters(&component, &grid).unwrap();

        for (k, wl) in grid.wavelengths().iter().enumerate() {
            let s21 = s.at(k)[(1, 0)];
            assert!((s21.norm() - 1.0).abs() < 1e-12);
            let expected = Complex64::from_polar(1.0, -2.0 * PI * 2.44 * length / wl);
            assert!((s21 - expected).norm() < 1e-9);
            assert_unitary(s.at(k));
        }
    }

    #[test]
    fn test_waveguide_loss() {
        let library = ModelLibrary::default();
        let component = Component::new(
            "wg",
            ComponentKind::Waveguide {
                length: 1e-3,
                width: 0.5,
                points: Vec::new(),
            },
        );
        let s = library.s_parameters(&component, &grid()).unwrap();
        // 300 dB/m over 1 mm
        assert!((s.magnitude_db(1, 0)[0] + 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_waveguide_uses_regression() {
        let mut coef = vec![0.0; 5];
        coef[2] = 1.0; // neff = width + 1.9
        let model = PolynomialRegression::new(1, true, 4, vec![coef], vec![1.9]).unwrap();
        let regression = StraightWaveguideRegression::from_model(model).unwrap();
        let library = lossless().with_regression(regression);

        let grid = FrequencyGrid::from_frequencies(vec![crate::SPEED_OF_LIGHT / 1.55e-6]);
        let length = 10e-6;
        let component = Component::new(
            "wg",
            ComponentKind::Waveguide {
                length,
                width: 0.6,
                points: Vec::new(),
            },
        );
        let s = library.s_parameters(&component, &grid).unwrap();
        let expected = Complex64::from_polar(1.0, -2.0 * PI * 2.5 * length / 1.55e-6);
        assert!((s.at(0)[(1, 0)] - expected).norm() < 1e-9);
    }

    #[test]
    fn test_splitters_are_unitary() {
        let library = ModelLibrary::default();
        let grid = grid();
        for kind in [
            ComponentKind::BidirectionalCoupler,
            ComponentKind::HalfRing { radius: 10e-6 },
        ] {
            let s = library.s_parameters(&Component::new("c", kind), &grid).unwrap();
            for m in s.matrices() {
                assert_unitary(m);
            }
        }
    }

    #[test]
    fn test_y_branch_split() {
        let s = ModelLibrary::default()
            .s_parameters(&Component::new("y", ComponentKind::YBranch), &grid())
            .unwrap();
        let m = s.at(0);
        assert!((m[(1, 0)].norm_sqr() - 0.5).abs() < 1e-12);
        assert!((m[(2, 0)].norm_sqr() - 0.5).abs() < 1e-12);
        assert_eq!(m[(1, 2)], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_grating_coupler_bandwidth() {
        let library = ModelLibrary::default();
        let config = library.config().clone();
        let grid = FrequencyGrid::from_frequencies(vec![
            crate::SPEED_OF_LIGHT / config.grating_center_wavelength,
            crate::SPEED_OF_LIGHT
                / (config.grating_center_wavelength + config.grating_bandwidth_1db / 2.0),
        ]);
        let s = library
            .s_parameters(&Component::new("gc", ComponentKind::GratingCoupler), &grid)
            .unwrap();
        let db = s.magnitude_db(1, 0);
        let peak_db = 10.0 * config.grating_peak_efficiency.log10();
        assert!((db[0] - peak_db).abs() < 1e-6);
        assert!((db[1] - (peak_db - 1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_terminator_absorbs() {
        let s = ModelLibrary::default()
            .s_parameters(&Component::new("t", ComponentKind::Terminator), &grid())
            .unwrap();
        assert_eq!(s.nports(), 1);
        assert_eq!(s.at(0)[(0, 0)], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let library = ModelLibrary::default();
        let ring = Component::new("r", ComponentKind::HalfRing { radius: 0.0 });
        assert!(matches!(
            library.s_parameters(&ring, &grid()),
            Err(Error::InvalidParameter(_))
        ));
    }
}
