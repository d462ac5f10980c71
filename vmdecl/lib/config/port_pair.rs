use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::VmdeclError;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A forwarded port mapping between the host and the guest.
///
/// ## Format
/// A port pair is written as:
/// - `host:guest` - forwards a host port to a different guest port (e.g., "8080:80")
/// - `port` or `port:port` - forwards the same port number on both sides (e.g., "7007" or "7007:7007")
///
/// ## Examples
///
/// ```
/// use vmdecl::config::PortPair;
///
/// // Same port on host and guest (7007:7007)
/// let same_port = PortPair::with_same(7007);
///
/// // Host 8080 forwards to guest 80
/// let distinct_ports = PortPair::with_distinct(8080, 80);
///
/// let from_str = "8080:80".parse::<PortPair>().unwrap();
/// assert_eq!(from_str, distinct_ports);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortPair {
    /// The guest port and the host port are distinct.
    Distinct {
        /// The host port.
        host: u16,

        /// The guest port.
        guest: u16,
    },

    /// The guest port and the host port are the same.
    Same(u16),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl PortPair {
    /// Creates a new `PortPair` with the same guest and host port.
    pub fn with_same(port: u16) -> Self {
        Self::Same(port)
    }

    /// Creates a new `PortPair` with distinct guest and host ports.
    pub fn with_distinct(host: u16, guest: u16) -> Self {
        Self::Distinct { host, guest }
    }

    /// Creates a `PortPair` from a host and guest port, collapsing equal ports to `Same`.
    pub fn from_ports(host: u16, guest: u16) -> Self {
        if host == guest {
            Self::Same(host)
        } else {
            Self::Distinct { host, guest }
        }
    }

    /// Returns the host port.
    pub fn get_host(&self) -> u16 {
        match self {
            Self::Distinct { host, .. } | Self::Same(host) => *host,
        }
    }

    /// Returns the guest port.
    pub fn get_guest(&self) -> u16 {
        match self {
            Self::Distinct { guest, .. } | Self::Same(guest) => *guest,
        }
    }

    /// Returns true if either side of the mapping is port 0.
    pub fn has_zero_port(&self) -> bool {
        self.get_host() == 0 || self.get_guest() == 0
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl FromStr for PortPair {
    type Err = VmdeclError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |port: &str| {
            port.parse::<u16>()
                .map_err(|_| VmdeclError::InvalidPortPair(s.to_string()))
        };

        match s.split_once(':') {
            Some((host, guest)) => {
                if host.is_empty() || guest.is_empty() {
                    return Err(VmdeclError::InvalidPortPair(s.to_string()));
                }

                Ok(Self::from_ports(parse(host)?, parse(guest)?))
            }
            None => Ok(Self::Same(parse(s)?)),
        }
    }
}

impl fmt::Display for PortPair {
    /// Formats the port pair following the format "host:guest".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.get_host(), self.get_guest())
    }
}

impl Serialize for PortPair {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PortPair {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
