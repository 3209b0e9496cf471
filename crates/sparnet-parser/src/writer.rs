//! Netlist text writer.
//!
//! Renders a [`Netlist`] back into the line format accepted by
//! [`parse`](crate::parse), so a model can be edited and re-read.

use std::fmt::Write;

use sparnet_core::units::format_sci;
use sparnet_core::{Component, ComponentKind, Netlist};

/// Render a netlist as text.
pub fn write_netlist(netlist: &Netlist) -> String {
    let mut out = format!(
        "* Spice output from sparnet v{}.\n\n",
        env!("CARGO_PKG_VERSION")
    );
    for component in netlist.components() {
        write_component(&mut out, component);
    }
    out
}

fn write_component(out: &mut String, component: &Component) {
    // Writing into a String cannot fail.
    let _ = write!(out, " {}", component.instance);
    for net in &component.nets {
        let _ = write!(out, " N${}", net);
    }
    let _ = write!(out, " {}", component.type_name());

    match &component.kind {
        ComponentKind::Waveguide {
            length,
            width,
            points,
        } => {
            let _ = write!(
                out,
                " wg_length={} wg_width={}",
                format_sci(*length),
                format_sci(width * 1e-6)
            );
            if !points.is_empty() {
                let vertices: Vec<String> = points
                    .iter()
                    .map(|(x, y)| format!("[{},{}]", x, y))
                    .collect();
                let _ = write!(out, " points=\"[{}]\"", vertices.join(","));
            }
        }
        ComponentKind::HalfRing { radius } => {
            let _ = write!(out, " radius={}", radius);
        }
        ComponentKind::YBranch
        | ComponentKind::BidirectionalCoupler
        | ComponentKind::GratingCoupler
        | ComponentKind::Terminator => {}
    }

    let _ = writeln!(out, " lay_x={} lay_y={}", component.lay_x, component.lay_y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparnet_core::NetId;

    #[test]
    fn test_write_line_format() {
        let netlist = Netlist::from_components([Component::new(
            "wg_3",
            ComponentKind::Waveguide {
                length: 1.5e-5,
                width: 0.5,
                points: vec![(0.0, 0.0), (15.0, 0.0)],
            },
        )
        .with_nets([NetId::new(-1), NetId::new(0)])
        .at(7.5, 0.0)]);

        let text = write_netlist(&netlist);
        let line = text.lines().find(|l| l.contains("wg_3")).unwrap();
        assert_eq!(
            line,
            r#" wg_3 N$-1 N$0 ebeam_wg_integral_1550 wg_length=15u wg_width=500n points="[[0,0],[15,0]]" lay_x=7.5 lay_y=0"#
        );
    }

    #[test]
    fn test_header_is_comment() {
        let text = write_netlist(&Netlist::new());
        assert!(text.starts_with("* Spice output"));
    }
}
