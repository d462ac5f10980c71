//! The seam between resolution and the VM driver that provisions the machine.

use std::{fmt, io::Write};

use crate::{config::VmConfig, VmdeclError, VmdeclResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The output format of a [`PlanDriver`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PlanFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,

    /// YAML.
    Yaml,
}

/// A driver that renders the resolved configuration for a downstream tool instead of
/// provisioning anything.
pub struct PlanDriver<W> {
    writer: W,
    format: PlanFormat,
}

//--------------------------------------------------------------------------------------------------
// Traits
//--------------------------------------------------------------------------------------------------

/// Consumes a resolved configuration: fetches and boots the image, attaches networks, sets
/// resource limits and runs the provisioners.
pub trait VmDriver {
    /// Provisions a VM from the resolved configuration.
    fn provision(&mut self, config: &VmConfig) -> VmdeclResult<()>;
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<W: Write> PlanDriver<W> {
    /// Creates a new plan driver writing to `writer`.
    pub fn new(writer: W, format: PlanFormat) -> Self {
        Self { writer, format }
    }

    /// Consumes the driver, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl<W: Write> VmDriver for PlanDriver<W> {
    fn provision(&mut self, config: &VmConfig) -> VmdeclResult<()> {
        let rendered = match self.format {
            PlanFormat::Json => serde_json::to_string_pretty(config)
                .map(|json| json + "\n")
                .map_err(|e| VmdeclError::PlanRender(e.to_string()))?,
            PlanFormat::Yaml => {
                serde_yaml::to_string(config).map_err(|e| VmdeclError::PlanRender(e.to_string()))?
            }
        };

        self.writer.write_all(rendered.as_bytes())?;
        self.writer.flush()?;

        tracing::debug!(format = %self.format, "rendered plan");

        Ok(())
    }
}

impl fmt::Display for PlanFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
