//! Reduction of a netlist to a single network on its external ports.

use std::sync::Arc;

use sparnet_core::{Component, NetId, Netlist};
use sparnet_devices::{FrequencyGrid, SMatrix, SParameterModel, SPEED_OF_LIGHT};

use crate::cascade::{connect_s, innerconnect_s};
use crate::error::{Error, Result};
use crate::matcher::{match_ports, PortMatch};
use crate::unit::SimulationUnit;
use crate::worklist::WorkList;

/// S-parameters of a whole circuit.
#[derive(Debug, Clone)]
pub struct CircuitSParameters {
    /// One matrix per frequency, rows and columns ordered as `externals`.
    pub s: SMatrix,
    /// Frequencies (Hz).
    pub frequencies: Arc<[f64]>,
    /// External nets in port order.
    pub externals: Vec<NetId>,
    /// Components with at least one external net.
    pub edge_components: Vec<Component>,
}

impl CircuitSParameters {
    /// Number of external ports.
    pub fn nports(&self) -> usize {
        self.externals.len()
    }

    /// Wavelengths (m) in frequency order.
    pub fn wavelengths(&self) -> Vec<f64> {
        self.frequencies.iter().map(|f| SPEED_OF_LIGHT / f).collect()
    }

    /// Port index of an external net.
    pub fn port_of(&self, net: NetId) -> Option<usize> {
        self.externals.iter().position(|n| *n == net)
    }
}

fn without_ports(nets: &[NetId], ports: &[usize]) -> Vec<NetId> {
    nets.iter()
        .enumerate()
        .filter(|(i, _)| !ports.contains(i))
        .map(|(_, net)| *net)
        .collect()
}

/// Evaluate every component into a unit.
fn build_units<M: SParameterModel + ?Sized>(
    netlist: &Netlist,
    model: &M,
    grid: &FrequencyGrid,
) -> Result<Vec<SimulationUnit>> {
    netlist
        .components()
        .iter()
        .map(|component| SimulationUnit::from_component(component, model, grid))
        .collect()
}

/// Connect every internal net `0..=last_net`, one at a time.
///
/// Exactly one unit must remain at the end; its nets are the circuit's
/// external ports.
pub fn reduce(units: Vec<SimulationUnit>, last_net: u32) -> Result<SimulationUnit> {
    let mut work: WorkList = units.into_iter().collect();

    for n in 0..=last_net {
        let net = NetId::internal(n);
        let ports_before = work.total_ports();

        match match_ports(net, &work)? {
            PortMatch::SelfLoop { unit, a, b } => {
                let (nets, frequencies, s) = work
                    .take(unit)
                    .ok_or(Error::MalformedNetlist {
                        net,
                        references: 0,
                    })?
                    .into_parts();
                log::debug!("net {}: closing ports {} and {} of unit {}", net, a, b, unit);
                let s = innerconnect_s(&s, a, b)?;
                // Reduced in place so later nets see the same unit order.
                let closed = SimulationUnit::new(without_ports(&nets, &[a, b]), frequencies, s)?;
                work.replace(unit, closed);
            }
            PortMatch::Pair {
                a: (ua, pa),
                b: (ub, pb),
            } => {
                let missing = || Error::MalformedNetlist {
                    net,
                    references: 1,
                };
                let first = work.take(ua).ok_or_else(missing)?;
                let second = work.take(ub).ok_or_else(missing)?;
                if !first.same_frequencies(&second) {
                    return Err(Error::FrequencyMismatch);
                }
                log::debug!(
                    "net {}: joining port {} of unit {} to port {} of unit {}",
                    net,
                    pa,
                    ua,
                    pb,
                    ub
                );

                let s = connect_s(first.s(), pa, second.s(), pb)?;
                let mut nets = without_ports(first.nets(), &[pa]);
                nets.extend(without_ports(second.nets(), &[pb]));
                work.push(SimulationUnit::new(nets, Arc::clone(first.frequencies()), s)?);
            }
        }

        debug_assert_eq!(work.total_ports() + 2, ports_before);
    }

    let remaining = work.live();
    if remaining != 1 {
        return Err(Error::DisconnectedCircuit { remaining });
    }
    work.into_live()
        .next()
        .ok_or(Error::DisconnectedCircuit { remaining: 0 })
}

/// Reduce a netlist to one network.
///
/// Returns `Ok(None)` when the netlist records no internal nets beyond the
/// initial count of zero; [`get_sparameters`] resolves that case.
pub fn connect_circuit<M: SParameterModel + ?Sized>(
    netlist: &Netlist,
    model: &M,
    grid: &FrequencyGrid,
) -> Result<Option<SimulationUnit>> {
    if netlist.net_count() == 0 {
        return Ok(None);
    }
    let units = build_units(netlist, model, grid)?;
    log::info!(
        "reducing {} components over {} internal nets",
        units.len(),
        netlist.net_count() + 1
    );
    reduce(units, netlist.net_count()).map(Some)
}

/// Compute the s-parameters of a netlist at its external ports.
pub fn get_sparameters<M: SParameterModel + ?Sized>(
    netlist: &Netlist,
    model: &M,
    grid: &FrequencyGrid,
) -> Result<CircuitSParameters> {
    let unit = match connect_circuit(netlist, model, grid)? {
        Some(unit) => unit,
        None if netlist.has_internal_nets() => reduce(build_units(netlist, model, grid)?, 0)?,
        None => match netlist.components() {
            [only] => {
                log::info!("{} has no internal nets, using its own model", only.instance);
                SimulationUnit::from_component(only, model, grid)?
            }
            _ => return Err(Error::NoInternalNets),
        },
    };

    let (externals, frequencies, s) = unit.into_parts();
    if let Some(net) = externals.iter().find(|net| !net.is_external()) {
        log::warn!("internal net {} left unconnected after reduction", net);
    }

    Ok(CircuitSParameters {
        s,
        frequencies,
        externals,
        edge_components: netlist.external_components().into_iter().cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use sparnet_core::ComponentKind;
    use sparnet_devices::ModelLibrary;

    fn freqs() -> Arc<[f64]> {
        Arc::from(vec![193e12, 194e12])
    }

    fn thru_unit(nets: [i64; 2], t: Complex64, frequencies: &Arc<[f64]>) -> SimulationUnit {
        let s = SMatrix::reciprocal(frequencies.len(), 2, |_| vec![(0, 1, t)]);
        SimulationUnit::new(nets.map(NetId::new).to_vec(), Arc::clone(frequencies), s).unwrap()
    }

    #[test]
    fn test_self_loop_reduces_to_zero_ports() {
        let f = freqs();
        let unit = thru_unit([0, 0], Complex64::new(0.5, 0.0), &f);
        let out = reduce(vec![unit], 0).unwrap();

        assert!(out.nets().is_empty());
        assert_eq!(out.nports(), 0);
        assert_eq!(out.s().nfreq(), 2);
    }

    #[test]
    fn test_two_component_cascade() {
        let f = freqs();
        let a = thru_unit([-1, 0], Complex64::new(0.0, 1.0), &f);
        let b = thru_unit([0, -2], Complex64::new(0.5, 0.0), &f);
        let out = reduce(vec![a, b], 0).unwrap();

        assert_eq!(out.nets(), &[NetId::new(-1), NetId::new(-2)]);
        assert_eq!(out.nports(), 2);
        assert!((out.s().at(0)[(1, 0)] - Complex64::new(0.0, 0.5)).norm() < 1e-12);
    }

    #[test]
    fn test_chain_keeps_external_order() {
        let f = freqs();
        let t = Complex64::new(0.9, 0.0);
        let units = vec![
            thru_unit([1, -2], t, &f),
            thru_unit([-1, 0], t, &f),
            thru_unit([0, 1], t, &f),
        ];
        let out = reduce(units, 1).unwrap();
        // Net 0 merges units 2 and 3 into [-1, 1]; net 1 then joins
        // [-2] with [-1].
        assert_eq!(out.nets(), &[NetId::new(-2), NetId::new(-1)]);
        assert!((out.s().at(1)[(0, 1)].norm() - 0.729).abs() < 1e-12);
    }

    #[test]
    fn test_self_loop_keeps_unit_position() {
        let f = freqs();
        let t = Complex64::new(0.5, 0.0);
        // Ports 1 and 2 joined by net 0 form a lossy loop; net 1 then
        // joins what is left of the first unit to the second.
        let looped = SimulationUnit::new(
            [-1, 0, 0, 1].map(NetId::new).to_vec(),
            Arc::clone(&f),
            SMatrix::reciprocal(f.len(), 4, |_| vec![(0, 1, t), (2, 3, t)]),
        )
        .unwrap();
        let tail = thru_unit([1, -2], t, &f);

        let out = reduce(vec![looped, tail], 1).unwrap();
        assert_eq!(out.nets(), &[NetId::new(-1), NetId::new(-2)]);
        // 0.5 through each of the three sections.
        assert!((out.s().at(0)[(1, 0)].norm() - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_dangling_net_rejected() {
        let f = freqs();
        let a = thru_unit([-1, 0], Complex64::new(1.0, 0.0), &f);
        match reduce(vec![a], 0) {
            Err(Error::MalformedNetlist { references, .. }) => assert_eq!(references, 1),
            other => panic!("expected malformed netlist, got {:?}", other),
        }
    }

    #[test]
    fn test_disconnected_circuit() {
        let f = freqs();
        let units = vec![
            thru_unit([-1, 0], Complex64::new(1.0, 0.0), &f),
            thru_unit([0, -2], Complex64::new(1.0, 0.0), &f),
            thru_unit([-3, -4], Complex64::new(1.0, 0.0), &f),
        ];
        assert!(matches!(
            reduce(units, 0),
            Err(Error::DisconnectedCircuit { remaining: 2 })
        ));
    }

    #[test]
    fn test_frequency_mismatch() {
        let a = thru_unit([-1, 0], Complex64::new(1.0, 0.0), &freqs());
        let b = thru_unit([0, -2], Complex64::new(1.0, 0.0), &Arc::from(vec![1e14, 2e14]));
        assert!(matches!(reduce(vec![a, b], 0), Err(Error::FrequencyMismatch)));
    }

    fn waveguide(name: &str, nets: [i64; 2]) -> Component {
        Component::new(
            name,
            ComponentKind::Waveguide {
                length: 10e-6,
                width: 0.5,
                points: Vec::new(),
            },
        )
        .with_nets(nets.map(NetId::new))
    }

    #[test]
    fn test_connect_circuit_without_internal_nets() {
        let netlist = Netlist::from_components([waveguide("wg0", [-1, -2])]);
        let grid = FrequencyGrid::from_frequencies(freqs());
        let out = connect_circuit(&netlist, &ModelLibrary::default(), &grid).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn test_get_sparameters_single_component() {
        let netlist = Netlist::from_components([waveguide("wg0", [-1, -2])]);
        let grid = FrequencyGrid::from_frequencies(freqs());
        let result = get_sparameters(&netlist, &ModelLibrary::default(), &grid).unwrap();

        assert_eq!(result.externals, vec![NetId::new(-1), NetId::new(-2)]);
        assert_eq!(result.nports(), 2);
        assert_eq!(result.edge_components.len(), 1);
    }

    #[test]
    fn test_get_sparameters_over_net_zero() {
        let netlist = Netlist::from_components([
            waveguide("wg0", [-1, 0]),
            waveguide("wg1", [0, -2]),
        ]);
        assert_eq!(netlist.net_count(), 0);

        let grid = FrequencyGrid::from_frequencies(freqs());
        let result = get_sparameters(&netlist, &ModelLibrary::default(), &grid).unwrap();
        assert_eq!(result.externals, vec![NetId::new(-1), NetId::new(-2)]);
        assert_eq!(result.port_of(NetId::new(-2)), Some(1));
        assert_eq!(result.s.nfreq(), 2);
    }

    #[test]
    fn test_get_sparameters_no_internal_nets() {
        let netlist = Netlist::from_components([
            waveguide("wg0", [-1, -2]),
            waveguide("wg1", [-3, -4]),
        ]);
        let grid = FrequencyGrid::from_frequencies(freqs());
        assert!(matches!(
            get_sparameters(&netlist, &ModelLibrary::default(), &grid),
            Err(Error::NoInternalNets)
        ));
    }
}
