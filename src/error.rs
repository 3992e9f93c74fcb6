use thiserror::Error;

use crate::PodRef;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid command-line arguments: {0}")]
    Usage(#[from] clap::Error),
    #[error("failed to parse pod namespace and name from {0:?}: expected namespace/name")]
    InvalidPodRef(String),
    #[error("invalid value {value:?} for --{flag}: expected a boolean")]
    InvalidFlag { flag: &'static str, value: String },
    #[error("failed to get kubeconfig: {0}")]
    ConfigDiscovery(#[from] kube::config::InferConfigError),
    #[error("failed to init kubernetes client: {0}")]
    ClientBuild(#[source] kube::Error),
    #[error("failed to get node info for {node:?}: {source}")]
    GetNode {
        node: String,
        #[source]
        source: kube::Error,
    },
    #[error("failed to marshal patch request body: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to make patch request for pod {pod}: {source}")]
    PatchPod {
        pod: PodRef,
        #[source]
        source: kube::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
