//! Core netlist representation for sparnet.
//!
//! This crate provides the object model of a photonic circuit netlist:
//! net identifiers, typed component records, the netlist container and its
//! JSON interchange form, plus engineering-unit handling shared by the
//! parser and the device models.

pub mod component;
pub mod error;
pub mod net;
pub mod netlist;
pub mod units;

pub use component::{Component, ComponentKind, ComponentParams, ComponentType, Point};
pub use error::{Error, Result};
pub use net::NetId;
pub use netlist::Netlist;
