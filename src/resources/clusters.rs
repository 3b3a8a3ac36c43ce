use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::instancegroups::InstanceGroupRole;
use super::kubelet::KubeletConfigSpec;

/// Represents the cluster-wide configuration of a kops cluster
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[cfg_attr(test, derive(Default))]
#[kube(
    kind = "Cluster",
    group = "kops.k8s.io",
    version = "v1alpha2",
    printcolumn = r#"{"name":"Version", "type":"string", "jsonPath":".spec.kubernetesVersion"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    /// kubernetesVersion is the version of Kubernetes to install.
    pub kubernetes_version: Option<String>,
    /// kubelet is the kubelet configuration for nodes not belonging to the control plane.
    pub kubelet: Option<KubeletConfigSpec>,
    /// controlPlaneKubelet is the kubelet configuration for control-plane nodes.
    #[serde(alias = "masterKubelet")]
    pub control_plane_kubelet: Option<KubeletConfigSpec>,
}

impl ClusterSpec {
    /// The cluster-level kubelet defaults that apply to an InstanceGroup of the given role
    pub fn kubelet_for(&self, role: InstanceGroupRole) -> &Option<KubeletConfigSpec> {
        if role.is_control_plane() {
            &self.control_plane_kubelet
        } else {
            &self.kubelet
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn accepts_legacy_master_kubelet_name() {
        let cluster: Cluster = serde_yaml::from_str(
            r#"
            apiVersion: kops.k8s.io/v1alpha2
            kind: Cluster
            metadata:
              name: example.k8s.local
            spec:
              kubernetesVersion: 1.30.2
              masterKubelet:
                nodeLabels:
                  tier: control
            "#,
        )
        .unwrap();

        let kubelet = cluster.spec.control_plane_kubelet.unwrap();
        assert_eq!(
            kubelet.node_labels,
            Some(BTreeMap::from([("tier".to_string(), "control".to_string())]))
        );
        assert!(cluster.spec.kubelet.is_none());
    }

    #[test]
    fn kubelet_for_picks_by_role() {
        let spec = ClusterSpec {
            kubelet: Some(KubeletConfigSpec {
                max_pods: Some(1),
                ..Default::default()
            }),
            control_plane_kubelet: Some(KubeletConfigSpec {
                max_pods: Some(2),
                ..Default::default()
            }),
            ..Default::default()
        };

        let max_pods = |role| spec.kubelet_for(role).as_ref().and_then(|k| k.max_pods);
        assert_eq!(max_pods(InstanceGroupRole::ControlPlane), Some(2));
        assert_eq!(max_pods(InstanceGroupRole::Node), Some(1));
        assert_eq!(max_pods(InstanceGroupRole::ApiServer), Some(1));
        assert_eq!(max_pods(InstanceGroupRole::Bastion), Some(1));
    }
}
