use std::{
    error::Error,
    fmt::{self, Display},
};
use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The result of a vmdecl-related operation.
pub type VmdeclResult<T> = Result<T, VmdeclError>;

/// An error that occurred while loading or resolving a VM declaration.
#[derive(pretty_error_debug::Debug, Error)]
pub enum VmdeclError {
    /// An I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An error that can represent any error.
    #[error(transparent)]
    Custom(#[from] AnyError),

    /// The declaration violates one or more configuration invariants.
    #[error("invalid configuration: {}", format_violations(.0))]
    InvalidConfiguration(Vec<ConfigViolation>),

    /// An invalid port pair string was used.
    #[error("invalid port pair: {0}")]
    InvalidPortPair(String),

    /// No declaration file was found at the expected location.
    #[error("declaration not found: {0}")]
    DeclarationNotFound(String),

    /// A declaration file already exists where a new one would be written.
    #[error("declaration already exists: {0}")]
    DeclarationAlreadyExists(String),

    /// The declaration file could not be parsed.
    #[error("declaration parse error: {0}")]
    DeclarationParse(String),

    /// The resolved configuration could not be rendered for a driver.
    #[error("plan render error: {0}")]
    PlanRender(String),
}

/// A single invariant violation found while resolving a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigViolation {
    /// The base image is missing or its name is empty.
    #[error("base image is missing or empty")]
    MissingBaseImage,

    /// The base image source url is present but empty.
    #[error("base image url is empty")]
    EmptyImageUrl,

    /// Two forwarded ports bind the same host port and protocol.
    #[error("host port {host}/{protocol} is forwarded to both guest port {first_guest} and guest port {second_guest}")]
    HostPortCollision {
        /// The contested host port.
        host: u16,

        /// The protocol both forwards use.
        protocol: String,

        /// The guest port of the first forward.
        first_guest: u16,

        /// The guest port of the conflicting forward.
        second_guest: u16,
    },

    /// A forwarded port uses port zero.
    #[error("forwarded port {0} uses port 0")]
    ZeroPort(String),

    /// A provider resource is zero or negative.
    #[error("provider resource '{resource}' must be positive, got {value}")]
    NonPositiveResource {
        /// The resource name.
        resource: &'static str,

        /// The declared value.
        value: i64,
    },

    /// A provider resource does not fit the provider's range.
    #[error("provider resource '{resource}' is out of range, got {value}")]
    ResourceOutOfRange {
        /// The resource name.
        resource: &'static str,

        /// The declared value.
        value: i64,
    },

    /// A private network prefix is out of range.
    #[error("private network {ip}/{prefix} has an invalid prefix")]
    InvalidNetworkPrefix {
        /// The declared address.
        ip: String,

        /// The declared prefix length.
        prefix: u8,
    },

    /// The cache mount uses an unsupported NFS version.
    #[error("unsupported nfs version: {0}")]
    UnsupportedNfsVersion(u8),

    /// A provisioner names an empty path.
    #[error("provisioner #{0} has an empty path")]
    EmptyProvisionerPath(usize),
}

/// An error that can represent any error.
#[derive(Debug)]
pub struct AnyError {
    error: anyhow::Error,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl VmdeclError {
    /// Wraps any error as a `Custom` error.
    pub fn custom(error: impl Into<anyhow::Error>) -> VmdeclError {
        VmdeclError::Custom(AnyError {
            error: error.into(),
        })
    }

    /// Returns the violations if this is an `InvalidConfiguration` error.
    pub fn violations(&self) -> Option<&[ConfigViolation]> {
        match self {
            VmdeclError::InvalidConfiguration(violations) => Some(violations.as_slice()),
            _ => None,
        }
    }
}

impl AnyError {
    /// Downcasts the error to a `T`.
    pub fn downcast<T>(&self) -> Option<&T>
    where
        T: Display + fmt::Debug + Send + Sync + 'static,
    {
        self.error.downcast_ref::<T>()
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn format_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl PartialEq for AnyError {
    fn eq(&self, other: &Self) -> bool {
        self.error.to_string() == other.error.to_string()
    }
}

impl Display for AnyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl Error for AnyError {}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
