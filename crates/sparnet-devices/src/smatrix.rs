//! Frequency-indexed s-parameter matrices.

use std::f64::consts::PI;

use nalgebra::DMatrix;
use num_complex::Complex64;

use crate::error::{Error, Result};

/// One complex `nports x nports` s-parameter matrix per frequency point.
#[derive(Debug, Clone, PartialEq)]
pub struct SMatrix {
    nports: usize,
    matrices: Vec<DMatrix<Complex64>>,
}

impl SMatrix {
    /// Wrap a list of per-frequency matrices, checking that each is
    /// `nports x nports`.
    pub fn new(nports: usize, matrices: Vec<DMatrix<Complex64>>) -> Result<Self> {
        if let Some(bad) = matrices
            .iter()
            .find(|m| m.nrows() != nports || m.ncols() != nports)
        {
            return Err(Error::InvalidParameter(format!(
                "expected {n}x{n} s-matrix, got {}x{}",
                bad.nrows(),
                bad.ncols(),
                n = nports
            )));
        }
        Ok(Self { nports, matrices })
    }

    /// Build from a function of `(frequency index, row, column)`.
    pub fn from_fn<F>(nfreq: usize, nports: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> Complex64,
    {
        let matrices = (0..nfreq)
            .map(|k| DMatrix::from_fn(nports, nports, |i, j| f(k, i, j)))
            .collect();
        Self { nports, matrices }
    }

    /// Build a reciprocal matrix from its upper-triangle entries at each
    /// frequency. Unlisted entries are zero.
    pub fn reciprocal<F>(nfreq: usize, nports: usize, mut entries: F) -> Self
    where
        F: FnMut(usize) -> Vec<(usize, usize, Complex64)>,
    {
        let matrices = (0..nfreq)
            .map(|k| {
                let mut m = DMatrix::from_element(nports, nports, Complex64::new(0.0, 0.0));
                for (i, j, value) in entries(k) {
                    m[(i, j)] = value;
                    m[(j, i)] = value;
                }
                m
            })
            .collect();
        Self { nports, matrices }
    }

    /// Number of ports.
    pub fn nports(&self) -> usize {
        self.nports
    }

    /// Number of frequency points.
    pub fn nfreq(&self) -> usize {
        self.matrices.len()
    }

    /// The matrix at frequency index `k`.
    pub fn at(&self, k: usize) -> &DMatrix<Complex64> {
        &self.matrices[k]
    }

    /// All per-frequency matrices.
    pub fn matrices(&self) -> &[DMatrix<Complex64>] {
        &self.matrices
    }

    /// `|S[i, j]|` in dB across all frequencies.
    pub fn magnitude_db(&self, i: usize, j: usize) -> Vec<f64> {
        self.matrices
            .iter()
            .map(|m| 20.0 * m[(i, j)].norm().log10())
            .collect()
    }

    /// Phase of `S[i, j]` in degrees across all frequencies.
    pub fn phase_deg(&self, i: usize, j: usize) -> Vec<f64> {
        self.matrices
            .iter()
            .map(|m| m[(i, j)].arg() * 180.0 / PI)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_shape() {
        let ok = SMatrix::new(2, vec![DMatrix::from_element(2, 2, Complex64::new(0.0, 0.0))]);
        assert!(ok.is_ok());

        let bad = SMatrix::new(3, vec![DMatrix::from_element(2, 2, Complex64::new(0.0, 0.0))]);
        assert!(matches!(bad, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_reciprocal_fills_both_triangles() {
        let s = SMatrix::reciprocal(3, 2, |k| vec![(0, 1, Complex64::new(k as f64, 1.0))]);
        assert_eq!(s.nfreq(), 3);
        assert_eq!(s.nports(), 2);
        assert_eq!(s.at(2)[(1, 0)], Complex64::new(2.0, 1.0));
        assert_eq!(s.at(2)[(0, 1)], Complex64::new(2.0, 1.0));
        assert_eq!(s.at(2)[(0, 0)], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_magnitude_and_phase() {
        let s = SMatrix::from_fn(1, 1, |_, _, _| Complex64::new(0.0, 0.1));
        assert!((s.magnitude_db(0, 0)[0] + 20.0).abs() < 1e-12);
        assert!((s.phase_deg(0, 0)[0] - 90.0).abs() < 1e-12);
    }
}
