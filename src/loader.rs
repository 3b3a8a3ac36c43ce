use std::collections::HashSet;
use std::fs;
use std::path::Path;

use kube::ResourceExt;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::resources::{Cluster, InstanceGroup};
use crate::{Error, Result};

/// One cluster and the instance groups that belong to it, as read from kops YAML documents
#[derive(Clone, Debug)]
pub struct ClusterDocuments {
    pub cluster: Cluster,
    pub instance_groups: Vec<InstanceGroup>,
}

#[derive(Default)]
struct Documents {
    clusters: Vec<Cluster>,
    instance_groups: Vec<InstanceGroup>,
}

impl Documents {
    fn parse(&mut self, content: &str) -> Result<()> {
        for document in serde_yaml::Deserializer::from_str(content) {
            let value = serde_yaml::Value::deserialize(document)?;
            if value.is_null() {
                continue;
            }
            let kind = value
                .get("kind")
                .and_then(serde_yaml::Value::as_str)
                .map(str::to_owned);
            match kind.as_deref() {
                Some("Cluster") => self.clusters.push(serde_yaml::from_value(value)?),
                Some("InstanceGroup") => {
                    self.instance_groups.push(serde_yaml::from_value(value)?)
                }
                other => warn!(
                    kind = other.unwrap_or_default(),
                    "Skipping unsupported document"
                ),
            }
        }
        Ok(())
    }

    fn into_cluster_documents(mut self) -> Result<ClusterDocuments> {
        let cluster = match self.clusters.len() {
            0 => return Err(Error::MissingCluster),
            1 => self.clusters.remove(0),
            _ => {
                return Err(Error::MultipleClusters(
                    self.clusters.iter().map(|c| c.name_any()).collect(),
                ))
            }
        };

        let cluster_name = cluster.name_any();
        let instance_groups: Vec<InstanceGroup> = self
            .instance_groups
            .into_iter()
            .filter(|ig| match ig.cluster_name() {
                Some(name) if name != cluster_name => {
                    warn!(
                        instance_group = %ig.name_any(),
                        cluster = name,
                        "Skipping InstanceGroup belonging to another cluster"
                    );
                    false
                }
                _ => true,
            })
            .collect();

        let mut seen = HashSet::new();
        if let Some(duplicate) = instance_groups
            .iter()
            .map(|ig| ig.name_any())
            .find(|name| !seen.insert(name.clone()))
        {
            return Err(Error::DuplicateInstanceGroup(duplicate));
        }

        Ok(ClusterDocuments {
            cluster,
            instance_groups,
        })
    }
}

impl ClusterDocuments {
    /// Parse a stream of `---` separated YAML documents
    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut documents = Documents::default();
        documents.parse(content)?;
        documents.into_cluster_documents()
    }

    /// Read and parse every file, treating them as one stream of documents
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut documents = Documents::default();
        for path in paths {
            let path = path.as_ref();
            let content = fs::read_to_string(path).map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })?;
            debug!(path = %path.display(), "Read documents");
            documents.parse(&content)?;
        }
        documents.into_cluster_documents()
    }

    pub fn instance_group(&self, name: &str) -> Result<&InstanceGroup> {
        self.instance_groups
            .iter()
            .find(|ig| ig.name_any() == name)
            .ok_or_else(|| Error::InstanceGroupNotFound(name.to_owned()))
    }
}
