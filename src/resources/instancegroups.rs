use std::collections::BTreeMap;
use std::fmt;

use kube::{CustomResource, ResourceExt};
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::kubelet::KubeletConfigSpec;

/// Label kops sets on an InstanceGroup to name the cluster it belongs to
pub const CLUSTER_NAME_LABEL: &str = "kops.k8s.io/cluster";

/// Represents a group of nodes sharing a role and a machine template
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[cfg_attr(test, derive(Default))]
#[kube(
    kind = "InstanceGroup",
    group = "kops.k8s.io",
    version = "v1alpha2",
    shortname = "ig",
    printcolumn = r#"{"name":"Role", "type":"string", "jsonPath":".spec.role"}"#,
    printcolumn = r#"{"name":"MachineType", "type":"string", "jsonPath":".spec.machineType"}"#,
    printcolumn = r#"{"name":"Min", "type":"integer", "jsonPath":".spec.minSize"}"#,
    printcolumn = r#"{"name":"Max", "type":"integer", "jsonPath":".spec.maxSize"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct InstanceGroupSpec {
    /// role is the type of node this group runs: ControlPlane, APIServer, Node or Bastion.
    pub role: InstanceGroupRole,
    /// machineType is the instance type to use.
    pub machine_type: Option<String>,
    /// minSize is the minimum size of the pool.
    pub min_size: Option<i32>,
    /// maxSize is the maximum size of the pool.
    pub max_size: Option<i32>,
    /// subnets is the names of the subnets this group is placed in.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subnets: Vec<String>,
    /// kubelet overrides the cluster-level kubelet configuration for this group.
    pub kubelet: Option<KubeletConfigSpec>,
    /// nodeLabels are applied to every node of this group and take precedence over all other labels.
    #[schemars(default, schema_with = "node_labels_schema")]
    pub node_labels: Option<BTreeMap<String, String>>,
}

fn node_labels_schema(_g: &mut schemars::gen::SchemaGenerator) -> Schema {
    serde_json::from_value(json!({
        "description": "nodeLabels are applied to every node of this group and take precedence over all other labels.",
        "additionalProperties": {
            "type": "string"
        },
        "nullable": true,
        "type": "object",
        "x-kubernetes-map-type": "atomic"
    }))
    .unwrap()
}

/// The role of the nodes in an InstanceGroup
#[derive(Deserialize, Serialize, Clone, Copy, Default, Debug, PartialEq, Eq, Hash, JsonSchema)]
pub enum InstanceGroupRole {
    #[serde(alias = "Master")]
    ControlPlane,
    #[serde(rename = "APIServer")]
    ApiServer,
    #[default]
    Node,
    Bastion,
}

impl InstanceGroupRole {
    pub fn is_control_plane(self) -> bool {
        self == InstanceGroupRole::ControlPlane
    }
}

impl fmt::Display for InstanceGroupRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InstanceGroupRole::ControlPlane => "ControlPlane",
            InstanceGroupRole::ApiServer => "APIServer",
            InstanceGroupRole::Node => "Node",
            InstanceGroupRole::Bastion => "Bastion",
        })
    }
}

impl InstanceGroup {
    /// The cluster this group claims to belong to, if labelled
    pub fn cluster_name(&self) -> Option<&str> {
        self.labels().get(CLUSTER_NAME_LABEL).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_accepts_current_and_legacy_names() {
        let role = |s: &str| serde_yaml::from_str::<InstanceGroupRole>(s).unwrap();
        assert_eq!(role("ControlPlane"), InstanceGroupRole::ControlPlane);
        assert_eq!(role("Master"), InstanceGroupRole::ControlPlane);
        assert_eq!(role("APIServer"), InstanceGroupRole::ApiServer);
        assert_eq!(role("Node"), InstanceGroupRole::Node);
        assert_eq!(role("Bastion"), InstanceGroupRole::Bastion);
        assert!(serde_yaml::from_str::<InstanceGroupRole>("Worker").is_err());
    }

    #[test]
    fn role_serializes_to_current_name() {
        assert_eq!(
            serde_json::to_value(InstanceGroupRole::ControlPlane).unwrap(),
            json!("ControlPlane")
        );
        assert_eq!(
            serde_json::to_value(InstanceGroupRole::ApiServer).unwrap(),
            json!("APIServer")
        );
        assert_eq!(InstanceGroupRole::ApiServer.to_string(), "APIServer");
    }

    #[test]
    fn only_control_plane_is_control_plane() {
        assert!(InstanceGroupRole::ControlPlane.is_control_plane());
        assert!(!InstanceGroupRole::ApiServer.is_control_plane());
        assert!(!InstanceGroupRole::Node.is_control_plane());
        assert!(!InstanceGroupRole::Bastion.is_control_plane());
    }

    #[test]
    fn parses_instance_group_document() {
        let ig: InstanceGroup = serde_yaml::from_str(
            r#"
            apiVersion: kops.k8s.io/v1alpha2
            kind: InstanceGroup
            metadata:
              name: nodes-us-east-1a
              labels:
                kops.k8s.io/cluster: example.k8s.local
            spec:
              role: Node
              machineType: t3.medium
              minSize: 1
              maxSize: 3
              subnets:
              - us-east-1a
              nodeLabels:
                kops.k8s.io/instancegroup: nodes-us-east-1a
            "#,
        )
        .unwrap();

        assert_eq!(ig.name_any(), "nodes-us-east-1a");
        assert_eq!(ig.cluster_name(), Some("example.k8s.local"));
        assert_eq!(ig.spec.role, InstanceGroupRole::Node);
        assert_eq!(ig.spec.subnets, vec!["us-east-1a"]);
        assert_eq!(
            ig.spec.node_labels.unwrap().get("kops.k8s.io/instancegroup"),
            Some(&"nodes-us-east-1a".to_string())
        );
    }
}
