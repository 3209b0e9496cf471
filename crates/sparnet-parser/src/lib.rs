//! Photonic netlist parser for sparnet.
//!
//! This crate turns the SPICE-like netlist emitted by a layout tool into a
//! [`Netlist`](sparnet_core::Netlist) of typed components, and writes
//! netlists back out in the same format.
//!
//! # Example
//!
//! ```
//! use sparnet_parser::parse;
//!
//! let netlist = parse(r#"
//! * Spice output
//!  ebeam_gc_te1550_0 N$-1 N$0 ebeam_gc_te1550 lay_x=0 lay_y=0
//!  ebeam_terminator_te1550_1 N$0 ebeam_terminator_te1550 lay_x=10 lay_y=0
//! .ends
//! "#).unwrap();
//!
//! assert_eq!(netlist.len(), 2);
//! assert_eq!(netlist.net_count(), 0);
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod writer;

pub use error::{Error, Result};
pub use parser::{parse, parse_file, RawComponentLine};
pub use writer::write_netlist;
