pub mod alaveteli;
pub mod nomenklatura;
pub mod public_bodies;

use anyhow::Result;
use pb_core::{Database, ExportConfig};
use std::io::Write;

/// The CSV formats this tool can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    PublicBodies,
    Nomenklatura,
    Alaveteli,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [
        ExportFormat::Alaveteli,
        ExportFormat::Nomenklatura,
        ExportFormat::PublicBodies,
    ];

    /// Action name used on the command line and in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::PublicBodies => "public_bodies",
            Self::Nomenklatura => "nomenklatura",
            Self::Alaveteli => "alaveteli",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::PublicBodies => "Output CSV in publicbodies.org format",
            Self::Nomenklatura => "Output CSV in Nomenklatura format",
            Self::Alaveteli => "Output CSV in Alaveteli format",
        }
    }

    /// Looks up a format by action name; `-` and `_` are interchangeable.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.replace('-', "_");
        Self::ALL.into_iter().find(|format| format.name() == normalized)
    }

    /// Validates `config` and writes the whole document to `out`.
    /// Returns the number of data rows.
    pub fn export<W: Write>(self, db: &Database, config: &ExportConfig, out: W) -> Result<usize> {
        config.validate()?;
        match self {
            Self::PublicBodies => public_bodies::export(db, config, out),
            Self::Nomenklatura => nomenklatura::export(db, config, out),
            Self::Alaveteli => alaveteli::export(db, config, out),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
