//! Locating the two ports joined by a net.

use sparnet_core::NetId;

use crate::error::{Error, Result};
use crate::worklist::{UnitId, WorkList};

/// Where the two references to a net were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortMatch {
    /// Both references are ports `a` and `b` of one unit.
    SelfLoop { unit: UnitId, a: usize, b: usize },
    /// The references are on two different units, as `(unit, port)`.
    Pair {
        a: (UnitId, usize),
        b: (UnitId, usize),
    },
}

/// Find the ports that `net` connects among the live units.
///
/// A net must be referenced exactly twice; anything else is a malformed
/// netlist.
pub fn match_ports(net: NetId, units: &WorkList) -> Result<PortMatch> {
    let hits: Vec<(UnitId, usize)> = units
        .iter()
        .flat_map(|(id, unit)| {
            unit.nets()
                .iter()
                .enumerate()
                .filter(move |(_, n)| **n == net)
                .map(move |(port, _)| (id, port))
        })
        .collect();

    match hits.as_slice() {
        [(ua, pa), (ub, pb)] if ua == ub => Ok(PortMatch::SelfLoop {
            unit: *ua,
            a: *pa,
            b: *pb,
        }),
        [a, b] => Ok(PortMatch::Pair { a: *a, b: *b }),
        _ => Err(Error::MalformedNetlist {
            net,
            references: hits.len(),
        }),
    }
}
