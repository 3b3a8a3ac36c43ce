use kube::CustomResourceExt;
fn main() {
    print!(
        "{}",
        serde_yaml::to_string(&nodelabels::resources::instancegroups::InstanceGroup::crd()).unwrap()
    )
}
