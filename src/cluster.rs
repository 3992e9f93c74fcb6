use k8s_openapi::api::core::v1::{Node, NodeAddress, Pod};
use kube::{
    api::{Api, Patch, PatchParams},
    Client,
};
use serde_json::value::RawValue;
use tracing::*;

use crate::error::{Error, Result};

/// The two cluster calls the propagation needs.
#[allow(async_fn_in_trait)]
pub trait NodePodApi {
    /// Addresses reported in the node status, in reported order.
    async fn node_addresses(&self, node_name: &str) -> Result<Vec<NodeAddress>, kube::Error>;

    /// Sends `body` verbatim as a JSON merge patch to the pod.
    async fn merge_patch_pod(
        &self,
        namespace: &str,
        name: &str,
        body: &RawValue,
    ) -> Result<(), kube::Error>;
}

impl NodePodApi for Client {
    async fn node_addresses(&self, node_name: &str) -> Result<Vec<NodeAddress>, kube::Error> {
        let nodes: Api<Node> = Api::all(self.clone());
        let node = nodes.get(node_name).await?;
        Ok(node
            .status
            .and_then(|status| status.addresses)
            .unwrap_or_default())
    }

    async fn merge_patch_pod(
        &self,
        namespace: &str,
        name: &str,
        body: &RawValue,
    ) -> Result<(), kube::Error> {
        let pods: Api<Pod> = Api::namespaced(self.clone(), namespace);
        pods.patch(name, &PatchParams::default(), &Patch::Merge(body))
            .await?;
        Ok(())
    }
}

/// Finds cluster credentials (in-cluster service account or kubeconfig) and
/// builds a client from them.
pub async fn connect() -> Result<Client> {
    let config = kube::Config::infer().await?;
    debug!("Using cluster {}", config.cluster_url);
    Client::try_from(config).map_err(Error::ClientBuild)
}
