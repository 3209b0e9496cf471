//! Typed photonic component records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::net::NetId;

/// A layout coordinate pair (x, y) in microns.
pub type Point = (f64, f64);

/// Waveguide width used when the netlist does not give one (um).
pub const DEFAULT_WAVEGUIDE_WIDTH: f64 = 0.5;

/// Half-ring radius used when the netlist does not give one (m).
pub const DEFAULT_HALF_RING_RADIUS: f64 = 10e-6;

/// The component kinds known to the model library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Waveguide,
    YBranch,
    BidirectionalCoupler,
    HalfRing,
    GratingCoupler,
    Terminator,
}

impl ComponentType {
    /// Every known component type.
    pub const ALL: [ComponentType; 6] = [
        ComponentType::Waveguide,
        ComponentType::YBranch,
        ComponentType::BidirectionalCoupler,
        ComponentType::HalfRing,
        ComponentType::GratingCoupler,
        ComponentType::Terminator,
    ];

    /// The type name used in netlists and in the JSON interchange form.
    pub fn type_name(self) -> &'static str {
        match self {
            ComponentType::Waveguide => "ebeam_wg_integral_1550",
            ComponentType::YBranch => "ebeam_y_1550",
            ComponentType::BidirectionalCoupler => "ebeam_bdc_te1550",
            ComponentType::HalfRing => "ebeam_dc_halfring_te1550",
            ComponentType::GratingCoupler => "ebeam_gc_te1550",
            ComponentType::Terminator => "ebeam_terminator_te1550",
        }
    }

    /// Number of optical ports of this kind.
    pub fn port_count(self) -> usize {
        match self {
            ComponentType::Terminator => 1,
            ComponentType::Waveguide | ComponentType::GratingCoupler => 2,
            ComponentType::YBranch => 3,
            ComponentType::BidirectionalCoupler | ComponentType::HalfRing => 4,
        }
    }

    /// Look up a component type by its netlist name.
    pub fn lookup(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.type_name() == name)
            .ok_or_else(|| Error::UnknownComponentType(name.to_string()))
    }

    /// Construct the typed component kind from parsed parameters.
    ///
    /// Parameters that this kind does not use are dropped with a warning.
    pub fn build(self, params: &ComponentParams) -> ComponentKind {
        let unused = |key: &str, present: bool| {
            if present {
                log::warn!("{} does not use parameter '{}', ignoring it", self, key);
            }
        };

        match self {
            ComponentType::Waveguide => {
                unused("radius", params.radius.is_some());
                ComponentKind::Waveguide {
                    length: params.length.unwrap_or(0.0),
                    width: params.width.unwrap_or(DEFAULT_WAVEGUIDE_WIDTH),
                    points: params.points.clone().unwrap_or_default(),
                }
            }
            ComponentType::HalfRing => {
                unused("wg_length", params.length.is_some());
                unused("wg_width", params.width.is_some());
                unused("points", params.points.is_some());
                ComponentKind::HalfRing {
                    radius: params.radius.unwrap_or(DEFAULT_HALF_RING_RADIUS),
                }
            }
            other => {
                unused("radius", params.radius.is_some());
                unused("wg_length", params.length.is_some());
                unused("wg_width", params.width.is_some());
                unused("points", params.points.is_some());
                match other {
                    ComponentType::YBranch => ComponentKind::YBranch,
                    ComponentType::BidirectionalCoupler => ComponentKind::BidirectionalCoupler,
                    ComponentType::GratingCoupler => ComponentKind::GratingCoupler,
                    _ => ComponentKind::Terminator,
                }
            }
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for ComponentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::lookup(s)
    }
}

/// Key-value parameters collected from a netlist line, before the component
/// kind decides which of them apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentParams {
    /// Layout x position of the component center.
    pub lay_x: Option<f64>,
    /// Layout y position of the component center.
    pub lay_y: Option<f64>,
    /// Bend radius (m).
    pub radius: Option<f64>,
    /// Waveguide length (m).
    pub length: Option<f64>,
    /// Waveguide width (um).
    pub width: Option<f64>,
    /// Waveguide path vertices.
    pub points: Option<Vec<Point>>,
}

/// Component kind together with its kind-specific parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ComponentKind {
    /// Straight or routed waveguide.
    #[serde(rename = "ebeam_wg_integral_1550")]
    Waveguide {
        /// Length in meters.
        length: f64,
        /// Width in microns.
        width: f64,
        /// Path vertices.
        #[serde(default)]
        points: Vec<Point>,
    },
    /// 1x2 Y-branch splitter.
    #[serde(rename = "ebeam_y_1550")]
    YBranch,
    /// 2x2 broadband directional coupler.
    #[serde(rename = "ebeam_bdc_te1550")]
    BidirectionalCoupler,
    /// Half-ring coupled to a bus waveguide.
    #[serde(rename = "ebeam_dc_halfring_te1550")]
    HalfRing {
        /// Ring radius in meters.
        radius: f64,
    },
    /// Fiber grating coupler.
    #[serde(rename = "ebeam_gc_te1550")]
    GratingCoupler,
    /// Absorbing terminator.
    #[serde(rename = "ebeam_terminator_te1550")]
    Terminator,
}

impl ComponentKind {
    /// The fieldless type tag of this kind.
    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentKind::Waveguide { .. } => ComponentType::Waveguide,
            ComponentKind::YBranch => ComponentType::YBranch,
            ComponentKind::BidirectionalCoupler => ComponentType::BidirectionalCoupler,
            ComponentKind::HalfRing { .. } => ComponentType::HalfRing,
            ComponentKind::GratingCoupler => ComponentType::GratingCoupler,
            ComponentKind::Terminator => ComponentType::Terminator,
        }
    }

    /// The netlist type name of this kind.
    pub fn type_name(&self) -> &'static str {
        self.component_type().type_name()
    }
}

/// A photonic component instance in the netlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Instance name (e.g. "ebeam_y_1550_3").
    pub instance: String,
    /// Kind and kind-specific parameters.
    #[serde(flatten)]
    pub kind: ComponentKind,
    /// Ordered nets, one per port.
    pub nets: Vec<NetId>,
    /// Layout x position.
    #[serde(default)]
    pub lay_x: f64,
    /// Layout y position.
    #[serde(default)]
    pub lay_y: f64,
}

impl Component {
    /// Create a component with no nets at the layout origin.
    pub fn new(instance: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            instance: instance.into(),
            kind,
            nets: Vec::new(),
            lay_x: 0.0,
            lay_y: 0.0,
        }
    }

    /// Build a component from the pieces of a parsed netlist line.
    pub fn from_params(
        instance: impl Into<String>,
        ty: ComponentType,
        nets: Vec<NetId>,
        params: &ComponentParams,
    ) -> Self {
        Self {
            instance: instance.into(),
            kind: ty.build(params),
            nets,
            lay_x: params.lay_x.unwrap_or(0.0),
            lay_y: params.lay_y.unwrap_or(0.0),
        }
    }

    /// Replace the net list.
    pub fn with_nets(mut self, nets: impl IntoIterator<Item = NetId>) -> Self {
        self.nets = nets.into_iter().collect();
        self
    }

    /// Set the layout position.
    pub fn at(mut self, lay_x: f64, lay_y: f64) -> Self {
        self.lay_x = lay_x;
        self.lay_y = lay_y;
        self
    }

    /// The fieldless type tag of this component.
    pub fn component_type(&self) -> ComponentType {
        self.kind.component_type()
    }

    /// The netlist type name of this component.
    pub fn type_name(&self) -> &'static str {
        self.component_type().type_name()
    }

    /// Number of ports the component's model exposes.
    pub fn expected_ports(&self) -> usize {
        self.component_type().port_count()
    }

    /// True when any of the component's nets is a circuit-boundary port.
    pub fn is_external(&self) -> bool {
        self.nets.iter().any(|net| net.is_external())
    }

    /// Indices of the internal nets this component touches.
    pub fn internal_nets(&self) -> impl Iterator<Item = u32> + '_ {
        self.nets.iter().filter_map(|net| net.internal_index())
    }
}
