//! Polynomial regression models for waveguide properties.
//!
//! A trained model is a polynomial feature expansion followed by a linear
//! regression, stored as JSON:
//!
//! ```json
//! {
//!   "degree": 2,
//!   "include_bias": true,
//!   "n_features": 4,
//!   "coef": [[...], ...],
//!   "intercept": [...]
//! }
//! ```
//!
//! `coef` has one row per output, one column per expanded feature. The
//! expansion enumerates monomials by total degree, and within a degree by
//! nondecreasing feature index combinations (`1, x0, x1, x0^2, x0 x1, x1^2`
//! for two features at degree 2).

use std::fs;
use std::path::Path;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Every combination of the input values, one row per combination.
///
/// The first array varies slowest, the last fastest. Any empty input gives
/// an empty (zero-row) result.
pub fn cartesian_product(arrays: &[&[f64]]) -> DMatrix<f64> {
    let ncols = arrays.len();
    let nrows: usize = if ncols == 0 {
        0
    } else {
        arrays.iter().map(|a| a.len()).product()
    };

    let mut out = DMatrix::zeros(nrows, ncols);
    for r in 0..nrows {
        let mut rem = r;
        for c in (0..ncols).rev() {
            let len = arrays[c].len();
            out[(r, c)] = arrays[c][rem % len];
            rem /= len;
        }
    }
    out
}

fn default_include_bias() -> bool {
    true
}

/// A polynomial-feature plus linear-regression pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolynomialRegression {
    /// Maximum monomial degree.
    pub degree: usize,
    /// Whether the constant term is part of the expansion.
    #[serde(default = "default_include_bias")]
    pub include_bias: bool,
    /// Number of raw input features.
    pub n_features: usize,
    /// Coefficients, `[output][expanded feature]`.
    pub coef: Vec<Vec<f64>>,
    /// Per-output intercept.
    pub intercept: Vec<f64>,
    /// Monomial exponent index lists, derived from the fields above.
    #[serde(skip)]
    terms: Vec<Vec<usize>>,
}

impl PolynomialRegression {
    /// Create a model and check its coefficient shapes.
    pub fn new(
        degree: usize,
        include_bias: bool,
        n_features: usize,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    ) -> Result<Self> {
        let mut model = Self {
            degree,
            include_bias,
            n_features,
            coef,
            intercept,
            terms: Vec::new(),
        };
        model.prepare()?;
        Ok(model)
    }

    /// Load a model from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("loading regression model {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse a model from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let mut model: Self = serde_json::from_str(text)?;
        model.prepare()?;
        Ok(model)
    }

    fn prepare(&mut self) -> Result<()> {
        self.terms = polynomial_terms(self.n_features, self.degree, self.include_bias);

        if self.coef.len() != self.intercept.len() {
            return Err(Error::Regression(format!(
                "{} coefficient rows but {} intercepts",
                self.coef.len(),
                self.intercept.len()
            )));
        }
        if let Some(row) = self.coef.iter().find(|row| row.len() != self.terms.len()) {
            return Err(Error::Regression(format!(
                "expected {} coefficients per output for degree {} over {} features, got {}",
                self.terms.len(),
                self.degree,
                self.n_features,
                row.len()
            )));
        }
        Ok(())
    }

    /// Number of predicted outputs.
    pub fn n_outputs(&self) -> usize {
        self.intercept.len()
    }

    /// Expand one input row into its polynomial features.
    pub fn expand(&self, x: &[f64]) -> Vec<f64> {
        self.terms
            .iter()
            .map(|term| term.iter().map(|&i| x[i]).product())
            .collect()
    }

    /// Predict every output for every input row.
    pub fn predict(&self, inputs: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        if inputs.ncols() != self.n_features {
            return Err(Error::Regression(format!(
                "model takes {} features, got {}",
                self.n_features,
                inputs.ncols()
            )));
        }

        let mut out = DMatrix::zeros(inputs.nrows(), self.n_outputs());
        for r in 0..inputs.nrows() {
            let row: Vec<f64> = inputs.row(r).iter().copied().collect();
            let features = self.expand(&row);
            for (o, coef) in self.coef.iter().enumerate() {
                let dot: f64 = coef.iter().zip(&features).map(|(c, f)| c * f).sum();
                out[(r, o)] = dot + self.intercept[o];
            }
        }
        Ok(out)
    }
}

/// Monomials as lists of feature indices, ordered by degree and then
/// lexicographically.
fn polynomial_terms(n_features: usize, degree: usize, include_bias: bool) -> Vec<Vec<usize>> {
    fn extend(start: usize, n: usize, d: usize, cur: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if cur.len() == d {
            out.push(cur.clone());
            return;
        }
        for i in start..n {
            cur.push(i);
            extend(i, n, d, cur, out);
            cur.pop();
        }
    }

    let first = if include_bias { 0 } else { 1 };
    let mut terms = Vec::new();
    for d in first..=degree {
        extend(0, n_features, d, &mut Vec::with_capacity(d), &mut terms);
    }
    terms
}

/// Regression of straight-waveguide properties over
/// (wavelength, width, thickness, sidewall angle).
///
/// Load once and hand the model to whatever needs predictions.
#[derive(Debug, Clone)]
pub struct StraightWaveguideRegression {
    model: PolynomialRegression,
}

impl StraightWaveguideRegression {
    /// Number of inputs the regression expects.
    pub const N_FEATURES: usize = 4;

    /// Wrap a loaded polynomial model.
    pub fn from_model(model: PolynomialRegression) -> Result<Self> {
        if model.n_features != Self::N_FEATURES {
            return Err(Error::Regression(format!(
                "straight waveguide regression takes {} features, model has {}",
                Self::N_FEATURES,
                model.n_features
            )));
        }
        if model.n_outputs() == 0 {
            return Err(Error::Regression("model has no outputs".to_string()));
        }
        Ok(Self { model })
    }

    /// Load the regression from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_model(PolynomialRegression::load(path)?)
    }

    /// The underlying polynomial model.
    pub fn model(&self) -> &PolynomialRegression {
        &self.model
    }

    /// Predict over the Cartesian product of the inputs.
    ///
    /// Wavelength, width and thickness are in microns, angle in degrees.
    /// Pass one-element slices for scalar inputs. Rows follow
    /// [`cartesian_product`] order.
    pub fn predict(
        &self,
        wavelength: &[f64],
        width: &[f64],
        thickness: &[f64],
        angle: &[f64],
    ) -> Result<DMatrix<f64>> {
        let inputs = cartesian_product(&[wavelength, width, thickness, angle]);
        self.model.predict(&inputs)
    }

    /// Effective index (first output) at each wavelength for one geometry.
    pub fn effective_index(
        &self,
        wavelengths_um: &[f64],
        width: f64,
        thickness: f64,
        angle: f64,
    ) -> Result<Vec<f64>> {
        let out = self.predict(wavelengths_um, &[width], &[thickness], &[angle])?;
        Ok(out.column(0).iter().copied().collect())
    }
}
