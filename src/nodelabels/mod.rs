use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Node;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::ResourceExt;
use tracing::debug;

use crate::merge::Merge;
use crate::resources::{Cluster, InstanceGroup, KubeletConfigSpec};

pub mod validation;

/// Legacy role label, carried since kubernetes 1.5
pub const ROLE_LABEL_NAME: &str = "kubernetes.io/role";
pub const ROLE_MASTER_LABEL_VALUE: &str = "master";
pub const ROLE_NODE_LABEL_VALUE: &str = "node";

pub const ROLE_LABEL_MASTER: &str = "node-role.kubernetes.io/master";
pub const ROLE_LABEL_NODE: &str = "node-role.kubernetes.io/node";
pub const ROLE_LABEL_CONTROL_PLANE: &str = "node-role.kubernetes.io/control-plane";

/// Marks nodes that kops-controller may issue PKI material to
pub const KOPS_CONTROLLER_PKI_LABEL: &str = "kops.k8s.io/kops-controller-pki";

/// Returns the labels for the nodes of the specified instance group.
///
/// Layers, lowest precedence first: the cluster kubelet nodeLabels for the group's role, the
/// group's own kubelet nodeLabels, the labels mandated by the role, and finally the group's
/// explicit nodeLabels.
pub fn build_node_labels(
    cluster: &Cluster,
    instance_group: &InstanceGroup,
) -> BTreeMap<String, String> {
    let role = instance_group.spec.role;
    let is_control_plane = role.is_control_plane();

    let mut c: Option<KubeletConfigSpec> = None;
    c.merge_from(cluster.spec.kubelet_for(role));
    c.merge_from(&instance_group.spec.kubelet);

    let mut node_labels = c.and_then(|c| c.node_labels).unwrap_or_default();

    if is_control_plane {
        node_labels.extend(build_mandatory_control_plane_labels());
    } else {
        node_labels.insert(ROLE_LABEL_NODE.into(), String::new());
        node_labels.insert(ROLE_LABEL_NAME.into(), ROLE_NODE_LABEL_VALUE.into());
    }

    if let Some(overrides) = &instance_group.spec.node_labels {
        node_labels.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    debug!(
        instance_group = %instance_group.name_any(),
        %role,
        labels = node_labels.len(),
        "Built node labels"
    );

    node_labels
}

/// Returns the labels every control-plane node must have
pub fn build_mandatory_control_plane_labels() -> BTreeMap<String, String> {
    BTreeMap::from([
        (ROLE_LABEL_MASTER.into(), String::new()),
        (ROLE_LABEL_CONTROL_PLANE.into(), String::new()),
        (ROLE_LABEL_NAME.into(), ROLE_MASTER_LABEL_VALUE.into()),
        (KOPS_CONTROLLER_PKI_LABEL.into(), String::new()),
    ])
}

/// A Node carrying only the given labels, for use as a merge patch against the node object
pub fn node_label_patch(labels: &BTreeMap<String, String>) -> Node {
    Node {
        metadata: ObjectMeta {
            labels: Some(labels.clone()),
            ..Default::default()
        },
        ..Default::default()
    }
}
