use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::resources::{Cluster, InstanceGroup};
use crate::{Error, Result};

const QUALIFIED_NAME_MAX_LENGTH: usize = 63;
const LABEL_VALUE_MAX_LENGTH: usize = 63;
const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;

fn name_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$").unwrap())
}

fn dns1123_subdomain_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$").unwrap()
    })
}

fn invalid(key: &str, reason: impl Into<String>) -> Error {
    Error::InvalidNodeLabel {
        key: key.into(),
        reason: reason.into(),
    }
}

/// Checks a label key: an optional DNS subdomain prefix and `/`, followed by a name.
pub fn validate_label_key(key: &str) -> Result<()> {
    let name = match key.split_once('/') {
        Some((prefix, name)) => {
            if prefix.is_empty() {
                return Err(invalid(key, "prefix part must be non-empty"));
            }
            if prefix.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
                return Err(invalid(
                    key,
                    format!("prefix part must be no more than {DNS1123_SUBDOMAIN_MAX_LENGTH} characters"),
                ));
            }
            if !dns1123_subdomain_regex().is_match(prefix) {
                return Err(invalid(
                    key,
                    "prefix part must consist of lower case alphanumeric characters, '-' or '.', and must start and end with an alphanumeric character",
                ));
            }
            name
        }
        None => key,
    };

    if name.is_empty() {
        return Err(invalid(key, "name part must be non-empty"));
    }
    if name.len() > QUALIFIED_NAME_MAX_LENGTH {
        return Err(invalid(
            key,
            format!("name part must be no more than {QUALIFIED_NAME_MAX_LENGTH} characters"),
        ));
    }
    if !name_regex().is_match(name) {
        return Err(invalid(
            key,
            "name part must consist of alphanumeric characters, '-', '_' or '.', and must start and end with an alphanumeric character",
        ));
    }
    Ok(())
}

/// Checks a label value; the empty string is allowed.
pub fn validate_label_value(key: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    if value.len() > LABEL_VALUE_MAX_LENGTH {
        return Err(invalid(
            key,
            format!("value must be no more than {LABEL_VALUE_MAX_LENGTH} characters"),
        ));
    }
    if !name_regex().is_match(value) {
        return Err(invalid(
            key,
            format!("value {value:?} must consist of alphanumeric characters, '-', '_' or '.', and must start and end with an alphanumeric character"),
        ));
    }
    Ok(())
}

pub fn validate_node_labels(labels: &BTreeMap<String, String>) -> Result<()> {
    for (key, value) in labels {
        validate_label_key(key)?;
        validate_label_value(key, value)?;
    }
    Ok(())
}

/// Validates every label source that feeds the nodes of this instance group
pub fn validate_instance_group(cluster: &Cluster, instance_group: &InstanceGroup) -> Result<()> {
    let spec = &instance_group.spec;
    let sources = [
        cluster
            .spec
            .kubelet_for(spec.role)
            .as_ref()
            .and_then(|k| k.node_labels.as_ref()),
        spec.kubelet.as_ref().and_then(|k| k.node_labels.as_ref()),
        spec.node_labels.as_ref(),
    ];
    sources.into_iter().flatten().try_for_each(validate_node_labels)
}
