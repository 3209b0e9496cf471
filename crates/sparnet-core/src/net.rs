//! Net identifiers for photonic circuit graphs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Identifier of a net in the circuit.
///
/// Non-negative values are internal nets, shared by the ports of one or two
/// components. Negative values are external ports on the circuit boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetId(i64);

impl NetId {
    /// Create a new NetId from a raw value.
    pub fn new(id: i64) -> Self {
        NetId(id)
    }

    /// Create the internal net with the given index.
    pub fn internal(index: u32) -> Self {
        NetId(i64::from(index))
    }

    /// Get the raw net value.
    pub fn as_i64(self) -> i64 {
        self.0
    }

    /// Check if this net is a circuit-boundary port.
    pub fn is_external(self) -> bool {
        self.0 < 0
    }

    /// Index of an internal net, `None` for external ports.
    pub fn internal_index(self) -> Option<u32> {
        u32::try_from(self.0).ok()
    }
}

impl fmt::Display for NetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NetId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(NetId)
            .map_err(|_| Error::InvalidNet(s.to_string()))
    }
}

impl From<i64> for NetId {
    fn from(id: i64) -> Self {
        NetId(id)
    }
}

// Nets travel as strings ("-1") in the JSON interchange form.
impl Serialize for NetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(i64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
            Repr::Number(id) => Ok(NetId(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_net() {
        let port = NetId::new(-2);
        assert!(port.is_external());
        assert_eq!(port.internal_index(), None);
        assert_eq!(port.to_string(), "-2");
    }

    #[test]
    fn test_internal_net() {
        let net = NetId::internal(7);
        assert!(!net.is_external());
        assert_eq!(net.internal_index(), Some(7));
        assert_eq!(net.as_i64(), 7);
    }

    #[test]
    fn test_parse_net() {
        assert_eq!("12".parse::<NetId>().unwrap(), NetId::new(12));
        assert_eq!("-1".parse::<NetId>().unwrap(), NetId::new(-1));
        assert!("x1".parse::<NetId>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let nets = vec![NetId::new(-1), NetId::new(0)];
        let json = serde_json::to_string(&nets).unwrap();
        assert_eq!(json, r#"["-1","0"]"#);

        let back: Vec<NetId> = serde_json::from_str(r#"["-1", 3]"#).unwrap();
        assert_eq!(back, vec![NetId::new(-1), NetId::new(3)]);
    }
}
