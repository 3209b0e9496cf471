//! # sparnet
//!
//! S-parameter simulation of photonic circuits described by layout-tool
//! netlists.
//!
//! sparnet provides:
//! - Netlist parsing into typed photonic components
//! - JSON export and netlist text re-export
//! - Analytic component models and a waveguide regression
//! - Circuit reduction to the s-parameters of the external ports
//!
//! ## Quick Start
//!
//! ```rust
//! use sparnet::prelude::*;
//!
//! let netlist = parse(
//!     " gc0 N$-1 N$0 ebeam_gc_te1550\n\
//!       wg0 N$0 N$1 ebeam_wg_integral_1550 wg_length=20u wg_width=0.5u\n\
//!       gc1 N$-2 N$1 ebeam_gc_te1550\n",
//! )
//! .unwrap();
//!
//! let grid = FrequencyGrid::from_sweep(&WavelengthSweep::default()).unwrap();
//! let result = get_sparameters(&netlist, &ModelLibrary::default(), &grid).unwrap();
//! assert_eq!(result.nports(), 2);
//! ```

// Re-export member crates
pub use sparnet_core as core;
pub use sparnet_devices as devices;
pub use sparnet_parser as parser;
pub use sparnet_solver as solver;

// ============================================================================
// Convenient re-exports from sparnet_core
// ============================================================================

pub use sparnet_core::{
    Component,
    ComponentKind,
    ComponentType,
    // Errors
    Error as CoreError,
    NetId,
    Netlist,
};

// Unit helpers
pub use sparnet_core::units::{format_sci, str_to_sci};

// ============================================================================
// Convenient re-exports from sparnet_parser
// ============================================================================

pub use sparnet_parser::{
    // Errors
    Error as ParseError,
    parse,
    parse_file,
    write_netlist,
};

// ============================================================================
// Convenient re-exports from sparnet_devices
// ============================================================================

pub use sparnet_devices::{
    cartesian_product,
    // Errors
    Error as DeviceError,
    FrequencyGrid,
    ModelConfig,
    ModelLibrary,
    PolynomialRegression,
    SMatrix,
    SParameterModel,
    SimulationConfig,
    StraightWaveguideRegression,
    WavelengthSweep,
};

// ============================================================================
// Convenient re-exports from sparnet_solver
// ============================================================================

pub use sparnet_solver::{
    CircuitSParameters,
    // Errors
    Error as SolverError,
    SimulationUnit,
    connect_circuit,
    get_sparameters,
    reduce,
};

/// Re-export of nalgebra's dynamic matrix type.
pub use nalgebra::DMatrix;

/// Re-export of num_complex's Complex type.
pub use num_complex::Complex;

/// Prelude module containing commonly used types and traits.
///
/// ```rust
/// use sparnet::prelude::*;
/// ```
pub mod prelude {
    // Netlist model
    pub use crate::{Component, ComponentKind, NetId, Netlist};

    // Parser
    pub use crate::{parse, parse_file, write_netlist};

    // Models
    pub use crate::{
        FrequencyGrid, ModelConfig, ModelLibrary, SParameterModel, SimulationConfig,
        WavelengthSweep,
    };

    // Solver
    pub use crate::{CircuitSParameters, get_sparameters};

    // Common external types
    pub use crate::{Complex, DMatrix};
}
