use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("SerializationError: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("YamlError: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No Cluster document was provided")]
    MissingCluster,

    #[error("Expected exactly one Cluster document, found {}", .0.join(", "))]
    MultipleClusters(Vec<String>),

    #[error("The InstanceGroup {0} does not exist")]
    InstanceGroupNotFound(String),

    #[error("The InstanceGroup {0} is defined more than once")]
    DuplicateInstanceGroup(String),

    #[error("Invalid node label {key:?}: {reason}")]
    InvalidNodeLabel { key: String, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Cluster and InstanceGroup document loading
pub mod loader;

/// Typed structural merge of configuration layers
pub mod merge;

/// Node label derivation
pub mod nodelabels;

pub use nodelabels::{build_mandatory_control_plane_labels, build_node_labels, node_label_patch};

/// kops resource definitions
pub mod resources;

/// Log integrations
pub mod telemetry;
