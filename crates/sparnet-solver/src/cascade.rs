//! Port connection of s-parameter networks.
//!
//! Both operations follow the usual sub-network growth formulation: joining
//! two ports of one network eliminates them, and joining ports of two
//! networks is the same operation on their block-diagonal composition.

use nalgebra::DMatrix;
use num_complex::Complex64;
use sparnet_devices::SMatrix;

use crate::error::{Error, Result};

/// Determinants below this magnitude are treated as singular.
const SINGULAR_TOLERANCE: f64 = 1e-15;

fn check_ports(nports: usize, k: usize, l: usize) -> Result<()> {
    for port in [k, l] {
        if port >= nports {
            return Err(Error::PortOutOfRange { port, nports });
        }
    }
    if k == l {
        return Err(Error::SamePort(k));
    }
    Ok(())
}

/// Connect ports `k` and `l` of the matrix at frequency index `frequency`
/// and remove them. Remaining ports keep their relative order.
fn innerconnect_at(
    s: &DMatrix<Complex64>,
    k: usize,
    l: usize,
    frequency: usize,
) -> Result<DMatrix<Complex64>> {
    let n = s.nrows();
    check_ports(n, k, l)?;

    let one = Complex64::new(1.0, 0.0);
    let det = (one - s[(k, l)]) * (one - s[(l, k)]) - s[(k, k)] * s[(l, l)];
    if det.norm() < SINGULAR_TOLERANCE {
        return Err(Error::SingularConnection { k, l, frequency });
    }

    let keep: Vec<usize> = (0..n).filter(|&p| p != k && p != l).collect();
    Ok(DMatrix::from_fn(keep.len(), keep.len(), |r, c| {
        let (i, j) = (keep[r], keep[c]);
        let num = s[(k, j)] * s[(i, l)] * (one - s[(l, k)])
            + s[(l, j)] * s[(i, k)] * (one - s[(k, l)])
            + s[(k, j)] * s[(l, l)] * s[(i, k)]
            + s[(l, j)] * s[(k, k)] * s[(i, l)];
        s[(i, j)] + num / det
    }))
}

/// Connect ports `k` and `l` of a network at every frequency.
pub fn innerconnect_s(s: &SMatrix, k: usize, l: usize) -> Result<SMatrix> {
    check_ports(s.nports(), k, l)?;
    let matrices = s
        .matrices()
        .iter()
        .enumerate()
        .map(|(f, m)| innerconnect_at(m, k, l, f))
        .collect::<Result<Vec<_>>>()?;
    Ok(SMatrix::new(s.nports() - 2, matrices)?)
}

/// Connect port `k` of `a` to port `l` of `b`.
///
/// The result has `a`'s remaining ports first, then `b`'s.
pub fn connect_s(a: &SMatrix, k: usize, b: &SMatrix, l: usize) -> Result<SMatrix> {
    if a.nfreq() != b.nfreq() {
        return Err(Error::FrequencyMismatch);
    }
    if k >= a.nports() {
        return Err(Error::PortOutOfRange {
            port: k,
            nports: a.nports(),
        });
    }
    if l >= b.nports() {
        return Err(Error::PortOutOfRange {
            port: l,
            nports: b.nports(),
        });
    }

    let na = a.nports();
    let n = na + b.nports();
    let matrices = a
        .matrices()
        .iter()
        .zip(b.matrices())
        .enumerate()
        .map(|(f, (ma, mb))| {
            let mut c = DMatrix::from_element(n, n, Complex64::new(0.0, 0.0));
            c.view_mut((0, 0), (na, na)).copy_from(ma);
            c.view_mut((na, na), (mb.nrows(), mb.ncols())).copy_from(mb);
            innerconnect_at(&c, k, na + l, f)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(SMatrix::new(n - 2, matrices)?)
}
