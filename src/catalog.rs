//! Registry → discovered catalog
//!
//! Walks the client library's registry once per run and produces the read-only
//! `Catalog` the command tree is built from: operation groups with their parsed
//! parameter lists, and the model schemas. An operation whose documentation
//! fails to parse is reported and dropped; the rest of the catalog survives.

use crate::params::{parse_doc, Parameter};
use crate::registry::Registry;

/// The shared low-level transport type generated alongside the groups. It is
/// plumbing, not an operation group.
const TRANSPORT_CLIENT: &str = "ApiClient";
/// Generated raw-response variants, excluded from the command surface.
const RAW_VARIANT_SUFFIX: &str = "_with_http_info";
/// Internal-marker prefix for non-operation members.
const INTERNAL_PREFIX: &str = "__";

/// One callable remote action with its parsed metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub name: String,
    /// One-line description shown as command help.
    pub summary: String,
    /// Declaration order, which becomes flag order.
    pub parameters: Vec<Parameter>,
}

/// A named collection of discovered operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationGroup {
    pub name: String,
    pub operations: Vec<Operation>,
}

/// A named data shape, inspectable via `model <name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelType {
    pub name: String,
    pub fields: Vec<(String, String)>,
}

/// The full discovery result, built once per process run.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub groups: Vec<OperationGroup>,
    pub models: Vec<ModelType>,
}

impl Catalog {
    /// Discover groups, operations, and models from the registry.
    ///
    /// `prefix` restricts which operation names are surfaced; `None` keeps
    /// them all.
    pub fn build(registry: &Registry, prefix: Option<&str>) -> Catalog {
        let mut groups = Vec::new();

        for entry in &registry.groups {
            if entry.name == TRANSPORT_CLIENT {
                continue;
            }

            let mut operations = Vec::new();
            for op in &entry.operations {
                if !is_candidate_operation(&op.name, prefix) {
                    continue;
                }
                match parse_doc(&op.doc) {
                    Ok(doc) => operations.push(Operation {
                        name: op.name.clone(),
                        summary: doc.summary,
                        parameters: doc.parameters,
                    }),
                    Err(err) => {
                        log::warn!(
                            "dropping operation {} {}: {err}",
                            entry.name,
                            op.name
                        );
                    }
                }
            }

            groups.push(OperationGroup {
                name: entry.name.clone(),
                operations,
            });
        }

        let models = registry
            .models
            .iter()
            .map(|m| ModelType {
                name: m.name.clone(),
                fields: m.fields.clone(),
            })
            .collect::<Vec<_>>();

        log::debug!(
            "discovered {} groups, {} models",
            groups.len(),
            models.len()
        );

        Catalog { groups, models }
    }

    pub fn find_operation(&self, group: &str, operation: &str) -> Option<&Operation> {
        self.groups
            .iter()
            .find(|g| g.name == group)?
            .operations
            .iter()
            .find(|o| o.name == operation)
    }

    pub fn model(&self, name: &str) -> Option<&ModelType> {
        self.models.iter().find(|m| m.name == name)
    }
}

fn is_candidate_operation(name: &str, prefix: Option<&str>) -> bool {
    if name.starts_with(INTERNAL_PREFIX) || name.ends_with(RAW_VARIANT_SUFFIX) {
        return false;
    }
    match prefix {
        Some(p) => name.starts_with(p),
        None => true,
    }
}
