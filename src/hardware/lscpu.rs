//! Flattening of the labeled tree printed by `lscpu -J`.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer};

use crate::config::LabelMatch;
use crate::hardware::types::CpuInfo;

#[derive(Debug, Default, Deserialize)]
pub struct LscpuOutput {
    #[serde(default)]
    pub lscpu: Vec<LabeledField>,
}

/// One node of the lscpu tree. Section headers such as
/// `"Caches (sum of all):"` carry `null` data and hold their entries as
/// children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LabeledField {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub field: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: String,
    #[serde(default)]
    pub children: Vec<LabeledField>,
}

#[cfg(test)]
impl LabeledField {
    pub fn new(field: &str, data: &str) -> Self {
        Self {
            field: field.to_string(),
            data: data.to_string(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<LabeledField>) -> Self {
        self.children = children;
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A record whose fields are filled from labels in a tree.
pub trait LabeledRecord {
    /// The field a label feeds, or `None` for labels the record ignores.
    fn slot(&mut self, label: &str) -> Option<&mut String>;
}

impl LabeledRecord for CpuInfo {
    fn slot(&mut self, label: &str) -> Option<&mut String> {
        let slot = match label {
            "Architecture:" => &mut self.architecture,
            "Vendor ID:" => &mut self.vendor_id,
            "Model name:" => &mut self.model_name,
            "CPU family:" => &mut self.cpu_family,
            "Model:" => &mut self.model,
            "Stepping:" => &mut self.stepping,
            "Thread(s) per core:" => &mut self.threads_per_core,
            "Core(s) per socket:" => &mut self.cores_per_socket,
            "Socket(s):" => &mut self.sockets,
            "NUMA node(s):" => &mut self.numa_nodes,
            "CPU min MHz:" => &mut self.cpu_frequency_min_mhz,
            "CPU max MHz:" => &mut self.cpu_frequency_max_mhz,
            "Virtualization:" => &mut self.virtualization,
            _ => return None,
        };
        Some(slot)
    }
}

pub fn parse_lscpu(payload: &[u8]) -> Result<Vec<LabeledField>, serde_json::Error> {
    serde_json::from_slice::<LscpuOutput>(payload).map(|output| output.lscpu)
}

/// Walks the tree depth first, parent before children, and copies the
/// data of every recognised label into `record`. Unknown labels are
/// ignored and unmatched fields keep their current value.
pub fn extract_fields<T: LabeledRecord>(fields: &[LabeledField], record: &mut T, policy: LabelMatch) {
    let mut seen = HashSet::new();
    visit(fields, record, policy, &mut seen);
}

fn visit<'a, T: LabeledRecord>(
    fields: &'a [LabeledField],
    record: &mut T,
    policy: LabelMatch,
    seen: &mut HashSet<&'a str>,
) {
    for field in fields {
        if let Some(slot) = record.slot(&field.field) {
            let first = seen.insert(field.field.as_str());
            if first || policy == LabelMatch::Last {
                *slot = field.data.clone();
            }
        }
        visit(&field.children, record, policy, seen);
    }
}
