//! Netlist: the object model of a photonic circuit.

use crate::component::Component;
use crate::error::Result;
use crate::net::NetId;

/// An ordered list of components plus the highest internal net seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Netlist {
    /// All components, in netlist order.
    components: Vec<Component>,
    /// Highest internal net id (0-indexed).
    net_count: u32,
}

impl Netlist {
    /// Create a new empty netlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a netlist from a list of components.
    pub fn from_components(components: impl IntoIterator<Item = Component>) -> Self {
        let mut netlist = Self::new();
        for component in components {
            netlist.push(component);
        }
        netlist
    }

    /// Register a net, updating net_count if necessary.
    pub fn register_net(&mut self, net: NetId) {
        if let Some(index) = net.internal_index() {
            if index > self.net_count {
                self.net_count = index;
            }
        }
    }

    /// Add a component to the netlist.
    pub fn push(&mut self, component: Component) {
        for &net in &component.nets {
            self.register_net(net);
        }
        self.components.push(component);
    }

    /// All components, in netlist order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True when the netlist has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Highest internal net id observed (0-indexed).
    pub fn net_count(&self) -> u32 {
        self.net_count
    }

    /// True when some component references an internal net.
    pub fn has_internal_nets(&self) -> bool {
        self.components
            .iter()
            .any(|c| c.internal_nets().next().is_some())
    }

    /// Components with at least one port on the circuit boundary.
    pub fn external_components(&self) -> Vec<&Component> {
        self.components.iter().filter(|c| c.is_external()).collect()
    }

    /// Serialize the component list to compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.components)?)
    }

    /// Serialize the component list to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.components)?)
    }

    /// Rebuild a netlist from its JSON component list.
    pub fn from_json(json: &str) -> Result<Self> {
        let components: Vec<Component> = serde_json::from_str(json)?;
        Ok(Self::from_components(components))
    }
}
