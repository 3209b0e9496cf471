//! Simulation units: a network together with the nets on its ports.

use std::sync::Arc;

use sparnet_core::{Component, NetId};
use sparnet_devices::{FrequencyGrid, SMatrix, SParameterModel};

use crate::error::{Error, Result};

/// A network whose port `i` is attached to `nets[i]`.
///
/// Every unit in one reduction shares the same frequency vector.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationUnit {
    nets: Vec<NetId>,
    frequencies: Arc<[f64]>,
    s: SMatrix,
}

impl SimulationUnit {
    /// Create a unit, checking that the net list and frequencies match the
    /// matrix dimensions.
    pub fn new(nets: Vec<NetId>, frequencies: Arc<[f64]>, s: SMatrix) -> Result<Self> {
        if nets.len() != s.nports() {
            return Err(Error::InvalidUnit(format!(
                "{} nets for a {}-port matrix",
                nets.len(),
                s.nports()
            )));
        }
        if frequencies.len() != s.nfreq() {
            return Err(Error::InvalidUnit(format!(
                "{} frequencies for {} matrices",
                frequencies.len(),
                s.nfreq()
            )));
        }
        Ok(Self {
            nets,
            frequencies,
            s,
        })
    }

    /// Evaluate a component's model and attach its nets.
    pub fn from_component<M: SParameterModel + ?Sized>(
        component: &Component,
        model: &M,
        grid: &FrequencyGrid,
    ) -> Result<Self> {
        let s = model.s_parameters(component, grid)?;
        if s.nports() != component.nets.len() {
            return Err(Error::PortCountMismatch {
                instance: component.instance.clone(),
                nets: component.nets.len(),
                ports: s.nports(),
            });
        }
        Self::new(component.nets.clone(), grid.shared(), s)
    }

    /// Nets in port order.
    pub fn nets(&self) -> &[NetId] {
        &self.nets
    }

    /// Number of ports.
    pub fn nports(&self) -> usize {
        self.nets.len()
    }

    /// Frequencies (Hz).
    pub fn frequencies(&self) -> &Arc<[f64]> {
        &self.frequencies
    }

    /// The s-parameters.
    pub fn s(&self) -> &SMatrix {
        &self.s
    }

    /// Split into nets, frequencies and s-parameters.
    pub fn into_parts(self) -> (Vec<NetId>, Arc<[f64]>, SMatrix) {
        (self.nets, self.frequencies, self.s)
    }

    /// True when both units were evaluated on the same frequencies.
    pub(crate) fn same_frequencies(&self, other: &SimulationUnit) -> bool {
        Arc::ptr_eq(&self.frequencies, &other.frequencies) || self.frequencies == other.frequencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use sparnet_core::ComponentKind;
    use sparnet_devices::ModelLibrary;

    fn grid() -> FrequencyGrid {
        FrequencyGrid::from_frequencies(vec![193e12, 194e12])
    }

    #[test]
    fn test_new_checks_dimensions() {
        let s = SMatrix::reciprocal(2, 2, |_| vec![(0, 1, Complex64::new(1.0, 0.0))]);
        let nets = vec![NetId::new(0), NetId::new(1)];

        assert!(SimulationUnit::new(nets.clone(), grid().shared(), s.clone()).is_ok());
        assert!(matches!(
            SimulationUnit::new(nets[..1].to_vec(), grid().shared(), s.clone()),
            Err(Error::InvalidUnit(_))
        ));
        assert!(matches!(
            SimulationUnit::new(nets, Arc::from(vec![1.0]), s),
            Err(Error::InvalidUnit(_))
        ));
    }

    #[test]
    fn test_from_component_port_mismatch() {
        let component = Component::new("y0", ComponentKind::YBranch)
            .with_nets([NetId::new(0), NetId::new(1)]);
        match SimulationUnit::from_component(&component, &ModelLibrary::default(), &grid()) {
            Err(Error::PortCountMismatch {
                instance,
                nets,
                ports,
            }) => {
                assert_eq!(instance, "y0");
                assert_eq!(nets, 2);
                assert_eq!(ports, 3);
            }
            other => panic!("expected port count mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_from_component_shares_frequencies() {
        let grid = grid();
        let component = Component::new("gc", ComponentKind::GratingCoupler)
            .with_nets([NetId::new(-1), NetId::new(0)]);
        let unit = SimulationUnit::from_component(&component, &ModelLibrary::default(), &grid)
            .unwrap();
        assert_eq!(unit.nports(), 2);
        assert!(Arc::ptr_eq(unit.frequencies(), &grid.shared()));
    }
}
