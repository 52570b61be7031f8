use crate::node::NodeId;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a connection between two connectors is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("cannot connect two connectors of the same kind")]
    SameKind,
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),
    #[error("node {0} cannot connect to itself")]
    SelfConnection(NodeId),
    #[error("connection from node {from} to node {to} already exists")]
    Duplicate { from: NodeId, to: NodeId },
    #[error("node {node} already has the maximum of {max} incoming connections")]
    CapacityReached { node: NodeId, max: u32 },
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unknown key name {0:?} in chord")]
    UnknownKey(String),
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),
    #[error("node {0} already exists")]
    DuplicateNode(NodeId),
    #[error(transparent)]
    Connection(#[from] ConnectionError),
}

pub type Result<T, E = EditorError> = std::result::Result<T, E>;
