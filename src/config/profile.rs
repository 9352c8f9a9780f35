//! Shipped evaluation profiles

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::vocab::{arco, ANNEX_III_1A_SYSTEM};

/// Default directory the profile sources are resolved against
pub const DEFAULT_DATA_DIR: &str = "./ontology";

const CORE_SOURCES: [&str; 2] = ["arco_core.nt", "arco_governance.nt"];

/// A named subject with its instance data and default target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Remote biometric identification system
    Sentinel,
    /// General-purpose model family, documented only at the capability level
    Claude3,
}

impl Profile {
    /// All profiles, in listing order
    pub const ALL: [Profile; 2] = [Profile::Sentinel, Profile::Claude3];

    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Sentinel => "sentinel",
            Profile::Claude3 => "claude3",
        }
    }

    /// One-line description
    pub fn description(&self) -> &'static str {
        match self {
            Profile::Sentinel => "Sentinel ID remote biometric identification system",
            Profile::Claude3 => "Claude 3 model family (capability-level documentation only)",
        }
    }

    /// Entity under evaluation
    pub fn subject(&self) -> String {
        match self {
            Profile::Sentinel => arco("Sentinel_ID_System"),
            Profile::Claude3 => arco("Claude3_System"),
        }
    }

    /// Category evaluated unless overridden
    pub fn default_target(&self) -> &'static str {
        ANNEX_III_1A_SYSTEM
    }

    /// Source file names, relative to the data directory
    pub fn source_names(&self) -> Vec<&'static str> {
        let instances = match self {
            Profile::Sentinel => "arco_instances_sentinel.json",
            Profile::Claude3 => "arco_instances_claude3.json",
        };
        CORE_SOURCES.iter().copied().chain([instances]).collect()
    }

    /// Source paths under `data_dir`
    pub fn sources(&self, data_dir: &Path) -> Vec<PathBuf> {
        self.source_names()
            .into_iter()
            .map(|name| data_dir.join(name))
            .collect()
    }
}
