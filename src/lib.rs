use clap::{App, Arg};
use std::ffi::OsString;
use std::fmt;
use std::str::FromStr;
use tracing::*;

pub mod cluster;
pub mod error;
pub mod labels;

use cluster::NodePodApi;
pub use error::{Error, Result};
use labels::{LabelPatch, Labels};

/// Pod addressed as `namespace/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodRef {
    pub namespace: String,
    pub name: String,
}

impl FromStr for PodRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidPodRef(s.to_string());
        let (namespace, name) = s.split_once('/').ok_or_else(invalid)?;
        // Stricter than a plain two-way split: an empty namespace would address
        // the cluster-wide pods path instead of failing.
        if namespace.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }
        Ok(PodRef {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for PodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

#[derive(Debug)]
pub struct Config {
    node_name: String,
    pod: PodRef,
    add_addresses: bool,
}

impl Config {
    pub fn build() -> Result<Config> {
        Config::build_from(std::env::args_os())
    }

    pub fn build_from<I, T>(args: I) -> Result<Config>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = App::new("k8s-propagate-node-status")
            .version(env!("CARGO_PKG_VERSION"))
            .arg(
                Arg::with_name("node-name")
                    .long("node-name")
                    .takes_value(true)
                    .default_value("")
                    .help("this node status will be used"),
            )
            .arg(
                Arg::with_name("pod-namespaced-name")
                    .long("pod-namespaced-name")
                    .takes_value(true)
                    .default_value("")
                    .help("this pod labels will be updated (use namespace/pod format)"),
            )
            .arg(
                Arg::with_name("add-addresses")
                    .long("add-addresses")
                    .takes_value(true)
                    .default_value("true")
                    .help("node addresses will be added into pod labels"),
            )
            .get_matches_from_safe(args)?;

        let add_addresses = matches.value_of("add-addresses").unwrap_or("true");

        Ok(Config {
            node_name: matches.value_of("node-name").unwrap_or("").to_string(),
            pod: matches
                .value_of("pod-namespaced-name")
                .unwrap_or("")
                .parse()?,
            add_addresses: parse_bool(add_addresses).ok_or_else(|| Error::InvalidFlag {
                flag: "add-addresses",
                value: add_addresses.to_string(),
            })?,
        })
    }

    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    pub fn pod(&self) -> &PodRef {
        &self.pod
    }

    pub fn add_addresses(&self) -> bool {
        self.add_addresses
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Reads the node addresses and merge-patches them onto the pod as labels.
/// Returns the labels that were sent.
pub async fn propagate<A: NodePodApi>(api: &A, config: &Config) -> Result<Labels> {
    let addresses = api
        .node_addresses(&config.node_name)
        .await
        .map_err(|source| Error::GetNode {
            node: config.node_name.clone(),
            source,
        })?;
    debug!(
        "Node {} reports {} addresses",
        config.node_name,
        addresses.len()
    );

    let labels = if config.add_addresses {
        labels::node_address_labels(&addresses)
    } else {
        Labels::new()
    };

    let patch = LabelPatch::new(labels);
    let body = patch.to_body()?;
    info!("patch request body: {}", body);

    api.merge_patch_pod(&config.pod.namespace, &config.pod.name, &body)
        .await
        .map_err(|source| Error::PatchPod {
            pod: config.pod.clone(),
            source,
        })?;

    Ok(patch.metadata.labels)
}

pub async fn run(config: Config) -> Result<()> {
    let client = cluster::connect().await?;
    propagate(&client, &config).await?;
    info!("successfully patched pod {}", config.pod);
    Ok(())
}
