use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use kube::ResourceExt;
use tracing::info;

use nodelabels::loader::ClusterDocuments;
use nodelabels::nodelabels::validation::validate_instance_group;
use nodelabels::resources::InstanceGroup;
use nodelabels::telemetry::{self, LogFormat};
use nodelabels::{build_node_labels, node_label_patch};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum Output {
    /// The label map itself
    Labels,
    /// A Node object carrying the labels, usable as a merge patch
    NodePatch,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum Format {
    Yaml,
    Json,
}

/// Print the labels kops applies to the nodes of an instance group
#[derive(Debug, clap::Parser)]
#[command(version, about)]
struct Arguments {
    /// Files holding the Cluster and InstanceGroup documents
    #[arg(
        short = 'f',
        long = "filename",
        env = "NODELABELS_FILES",
        value_name = "FILE",
        value_delimiter = ',',
        required = true
    )]
    files: Vec<PathBuf>,

    /// Only print the labels of this instance group
    #[arg(
        short = 'i',
        long = "instance-group",
        env = "NODELABELS_INSTANCE_GROUP",
        value_name = "NAME"
    )]
    instance_group: Option<String>,

    #[arg(long, env = "NODELABELS_OUTPUT", value_enum, default_value_t = Output::Labels)]
    output: Output,

    #[arg(long, env = "NODELABELS_FORMAT", value_enum, default_value_t = Format::Yaml)]
    format: Format,

    #[arg(long, env = "NODELABELS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

fn render(
    docs: &ClusterDocuments,
    instance_group: &InstanceGroup,
    output: Output,
) -> anyhow::Result<serde_json::Value> {
    let name = instance_group.name_any();
    validate_instance_group(&docs.cluster, instance_group)
        .with_context(|| format!("InstanceGroup {name} has invalid node labels"))?;

    let labels = build_node_labels(&docs.cluster, instance_group);
    info!(
        instance_group = %name,
        role = %instance_group.spec.role,
        labels = labels.len(),
        "Derived node labels"
    );

    Ok(match output {
        Output::Labels => serde_json::to_value(labels)?,
        Output::NodePatch => serde_json::to_value(node_label_patch(&labels))?,
    })
}

fn main() -> anyhow::Result<()> {
    let args: Arguments = Arguments::parse();
    telemetry::init(args.log_format);

    let docs = ClusterDocuments::from_paths(&args.files)?;
    info!(
        cluster = %docs.cluster.name_any(),
        instance_groups = docs.instance_groups.len(),
        "Loaded cluster documents"
    );

    let result = match &args.instance_group {
        Some(name) => render(&docs, docs.instance_group(name)?, args.output)?,
        None => {
            let all = docs
                .instance_groups
                .iter()
                .map(|ig| -> anyhow::Result<_> {
                    Ok((ig.name_any(), render(&docs, ig, args.output)?))
                })
                .collect::<anyhow::Result<BTreeMap<_, _>>>()?;
            serde_json::to_value(all)?
        }
    };

    match args.format {
        Format::Yaml => print!("{}", serde_yaml::to_string(&result)?),
        Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}
