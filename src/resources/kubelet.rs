use std::collections::BTreeMap;

use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::merge::{merge_list, merge_map, merge_string, merge_value, Merge};

/// Kubelet configuration, shared by the cluster-wide defaults and per-InstanceGroup overrides.
/// Only the fields that matter to node bootstrap are modelled; unknown fields are ignored on input.
#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KubeletConfigSpec {
    /// nodeLabels to add when registering the node in the cluster.
    #[schemars(default, schema_with = "string_map_schema")]
    pub node_labels: Option<BTreeMap<String, String>>,
    /// taints to add when registering the node, in `key=value:Effect` form.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taints: Vec<String>,
    /// maxPods is the number of pods that can run on this kubelet.
    pub max_pods: Option<i32>,
    /// featureGates is a set of key=value pairs that describe feature gates for alpha/experimental features.
    #[schemars(default, schema_with = "string_map_schema")]
    pub feature_gates: Option<BTreeMap<String, String>>,
    /// kubeReserved is the resource reservation for kubernetes system daemons.
    #[schemars(default, schema_with = "string_map_schema")]
    pub kube_reserved: Option<BTreeMap<String, String>>,
    /// systemReserved is the resource reservation for non-kubernetes system daemons.
    #[schemars(default, schema_with = "string_map_schema")]
    pub system_reserved: Option<BTreeMap<String, String>>,
    /// cgroupDriver allows the explicit setting of the kubelet cgroup driver.
    pub cgroup_driver: Option<String>,
    /// clusterDNS is the IP address for a cluster DNS server.
    #[serde(rename = "clusterDNS")]
    pub cluster_dns: Option<String>,
    /// logLevel is the logging level of the kubelet.
    pub log_level: Option<i32>,
    /// anonymousAuth permits you to control auth to the kubelet api.
    pub anonymous_auth: Option<bool>,
    /// registerSchedulable registers the node as schedulable.
    pub register_schedulable: Option<bool>,
    /// podInfraContainerImage is the image whose network/ipc containers in each pod will use.
    pub pod_infra_container_image: Option<String>,
}

impl Merge for KubeletConfigSpec {
    fn merge_from(&mut self, other: &Self) {
        merge_map(&mut self.node_labels, &other.node_labels);
        merge_list(&mut self.taints, &other.taints);
        merge_value(&mut self.max_pods, &other.max_pods);
        merge_map(&mut self.feature_gates, &other.feature_gates);
        merge_map(&mut self.kube_reserved, &other.kube_reserved);
        merge_map(&mut self.system_reserved, &other.system_reserved);
        merge_string(&mut self.cgroup_driver, &other.cgroup_driver);
        merge_string(&mut self.cluster_dns, &other.cluster_dns);
        merge_value(&mut self.log_level, &other.log_level);
        merge_value(&mut self.anonymous_auth, &other.anonymous_auth);
        merge_value(&mut self.register_schedulable, &other.register_schedulable);
        merge_string(
            &mut self.pod_infra_container_image,
            &other.pod_infra_container_image,
        );
    }
}

fn string_map_schema(_g: &mut schemars::gen::SchemaGenerator) -> Schema {
    serde_json::from_value(json!({
        "additionalProperties": {
            "type": "string"
        },
        "nullable": true,
        "type": "object"
    }))
    .unwrap()
}
