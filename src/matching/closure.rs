//! Dependency key serialization
//!
//! A dependency key is the canonical text form of a package's transitive
//! build-time dependencies, as compact nested JSON arrays:
//!
//! ```text
//! [["pkg2","v2"],["pkg3","v3"]]
//! [["pkg1","v1",[["pkg2","v2"],["pkg3","v3"]]]]
//! ```
//!
//! Each dependency is `[name, version]`, or `[name, version, [...]]` when it
//! has dependencies of its own. Declaration order is kept at every level and
//! is part of the key. Keys recorded by the upload pipeline are compared
//! against these strings byte for byte, so the rendering must not change.

use crate::manifest::CompiledEntry;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Name lookup over the entries of a single request
pub struct RequestIndex<'a> {
    entries: HashMap<&'a str, &'a CompiledEntry>,
}

impl<'a> RequestIndex<'a> {
    /// Index entries by name; on duplicate names the first entry wins
    pub fn new(entries: &'a [CompiledEntry]) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for entry in entries {
            index.entry(entry.name.as_str()).or_insert(entry);
        }
        Self { entries: index }
    }

    pub fn get(&self, name: &str) -> Option<&'a CompiledEntry> {
        self.entries.get(name).copied()
    }
}

/// Compute the dependency key for `entry` against the request it came from
pub fn dependency_key<'a>(entry: &'a CompiledEntry, index: &RequestIndex<'a>) -> String {
    let mut path = vec![entry.name.as_str()];
    Value::Array(closure(&entry.dependencies, index, &mut path)).to_string()
}

fn closure<'a>(
    dependencies: &'a [String],
    index: &RequestIndex<'a>,
    path: &mut Vec<&'a str>,
) -> Vec<Value> {
    dependencies
        .iter()
        .map(|name| {
            // Not part of this request: nothing known beyond the name
            let Some(dep) = index.get(name) else {
                return json!([name, Value::Null]);
            };

            // Cycle guard
            if path.contains(&dep.name.as_str()) {
                return json!([dep.name, dep.version]);
            }

            path.push(dep.name.as_str());
            let nested = closure(&dep.dependencies, index, path);
            path.pop();

            if nested.is_empty() {
                json!([dep.name, dep.version])
            } else {
                json!([dep.name, dep.version, nested])
            }
        })
        .collect()
}
