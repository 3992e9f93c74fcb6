//! Node address labels and the merge patch that carries them.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::NodeAddress;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Pod labels, keyed the same way `ObjectMeta::labels` is.
pub type Labels = BTreeMap<String, String>;

/// Address type as reported in `node.status.addresses` → pod label key.
pub const ADDRESS_LABEL_KEYS: [(&str, &str); 5] = [
    ("Hostname", "node.status.addresses/hostname"),
    ("InternalIP", "node.status.addresses/internal-ip"),
    ("ExternalIP", "node.status.addresses/external-ip"),
    ("InternalDNS", "node.status.addresses/internal-dns"),
    ("ExternalDNS", "node.status.addresses/external-dns"),
];

/// Label key for a node address type, `None` for types we don't propagate.
pub fn address_label_key(address_type: &str) -> Option<&'static str> {
    ADDRESS_LABEL_KEYS
        .iter()
        .find(|(type_, _)| *type_ == address_type)
        .map(|(_, key)| *key)
}

/// Builds one label per recognized address type. A later address of the same
/// type overwrites an earlier one; unknown types are skipped.
pub fn node_address_labels(addresses: &[NodeAddress]) -> Labels {
    let mut labels = Labels::new();
    for addr in addresses {
        if let Some(key) = address_label_key(&addr.type_) {
            labels.insert(key.to_string(), addr.address.clone());
        }
    }
    labels
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PatchMetadata {
    pub labels: Labels,
}

/// `{"metadata":{"labels":{...}}}`, sent to the pod as a JSON merge patch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelPatch {
    pub metadata: PatchMetadata,
}

impl LabelPatch {
    pub fn new(labels: Labels) -> Self {
        LabelPatch {
            metadata: PatchMetadata { labels },
        }
    }

    pub fn labels(&self) -> &Labels {
        &self.metadata.labels
    }

    /// Serializes the patch once; the result is sent as-is.
    pub fn to_body(&self) -> serde_json::Result<Box<RawValue>> {
        serde_json::value::to_raw_value(self)
    }
}
