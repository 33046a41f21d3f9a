//! Container kinds understood by the converter.

use serde::{Deserialize, Serialize};

/// The two on-disk representations of a fault log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// Uppercase hex text holding one transmission's worth of records
    Online,
    /// Fixed-size binary snapshot of a device's configuration and event ring
    Offline,
}

impl ContainerKind {
    /// Human-readable name used in logs and summaries.
    pub const fn label(self) -> &'static str {
        match self {
            ContainerKind::Online => "online",
            ContainerKind::Offline => "offline",
        }
    }
}

impl std::fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
