pub mod clusters;
pub mod instancegroups;
pub mod kubelet;

pub use clusters::{Cluster, ClusterSpec};
pub use instancegroups::{InstanceGroup, InstanceGroupRole, InstanceGroupSpec};
pub use kubelet::KubeletConfigSpec;
