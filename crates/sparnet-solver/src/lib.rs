//! Circuit reduction for sparnet.
//!
//! This crate provides:
//! - S-matrix port connection ([`cascade`])
//! - Simulation units pairing a network with the nets on its ports
//! - The port matcher that finds the two ends of a net
//! - Netlist reduction to a single network on the external ports

pub mod cascade;
pub mod error;
pub mod matcher;
pub mod reduce;
pub mod unit;
pub mod worklist;

pub use cascade::{connect_s, innerconnect_s};
pub use error::{Error, Result};
pub use matcher::{match_ports, PortMatch};
pub use reduce::{connect_circuit, get_sparameters, reduce, CircuitSParameters};
pub use unit::SimulationUnit;
pub use worklist::{UnitId, WorkList};
