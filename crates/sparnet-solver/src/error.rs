//! Error types for sparnet-solver.

use sparnet_core::NetId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("net {net} has {references} references, expected 1 or 2")]
    MalformedNetlist { net: NetId, references: usize },

    #[error("{instance} has {nets} nets but its model has {ports} ports")]
    PortCountMismatch {
        instance: String,
        nets: usize,
        ports: usize,
    },

    #[error("port {port} out of range for {nports}-port network")]
    PortOutOfRange { port: usize, nports: usize },

    #[error("cannot connect port {0} to itself")]
    SamePort(usize),

    #[error("singular connection between ports {k} and {l} at frequency index {frequency}")]
    SingularConnection { k: usize, l: usize, frequency: usize },

    #[error("frequency vectors of connected networks differ")]
    FrequencyMismatch,

    #[error("invalid simulation unit: {0}")]
    InvalidUnit(String),

    #[error("circuit is disconnected: {remaining} networks remain after reduction")]
    DisconnectedCircuit { remaining: usize },

    #[error("netlist has no internal nets to connect")]
    NoInternalNets,

    #[error("device error: {0}")]
    Device(#[from] sparnet_devices::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
