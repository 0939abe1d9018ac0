//! Statically declared client-library registry
//!
//! A generated client library registers itself here instead of being walked by
//! reflection: an ordered list of operation-group entries, each holding ordered
//! operation entries with their structured documentation and a uniform
//! positional invoker, plus the model-type field tables. The catalog and the
//! dispatcher only ever enumerate this table.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::Configuration;
use crate::error::ApiError;

/// Uniform calling convention for every registered operation: the invocation's
/// `Configuration` plus the bound arguments in declared parameter order.
pub type Invoker = Arc<dyn Fn(&Configuration, &[Value]) -> Result<Value, ApiError> + Send + Sync>;

/// One callable remote operation.
#[derive(Clone)]
pub struct OperationEntry {
    pub name: String,
    /// Structured-comment documentation carrying the parameter metadata.
    pub doc: String,
    pub invoke: Invoker,
}

impl fmt::Debug for OperationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A named collection of operations (one REST resource/tag).
#[derive(Debug, Clone)]
pub struct GroupEntry {
    pub name: String,
    pub operations: Vec<OperationEntry>,
}

/// A named data shape with its declared field-to-type table.
#[derive(Debug, Clone)]
pub struct ModelEntry {
    pub name: String,
    pub fields: Vec<(String, String)>,
}

/// The client library's published surface, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub groups: Vec<GroupEntry>,
    pub models: Vec<ModelEntry>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Resolve an operation's invoker with two ordered lookups: group name,
    /// then operation name.
    pub fn find_invoker(&self, group: &str, operation: &str) -> Option<&Invoker> {
        self.groups
            .iter()
            .find(|g| g.name == group)?
            .operations
            .iter()
            .find(|o| o.name == operation)
            .map(|o| &o.invoke)
    }

    pub fn model_fields(&self, name: &str) -> Option<&[(String, String)]> {
        self.models
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.fields.as_slice())
    }
}

/// Chained construction API for generated registration code.
#[derive(Default)]
pub struct RegistryBuilder {
    groups: Vec<GroupEntry>,
    models: Vec<ModelEntry>,
}

impl RegistryBuilder {
    pub fn group(
        mut self,
        name: impl Into<String>,
        build: impl FnOnce(GroupBuilder) -> GroupBuilder,
    ) -> Self {
        let group = build(GroupBuilder::default());
        self.groups.push(GroupEntry {
            name: name.into(),
            operations: group.operations,
        });
        self
    }

    pub fn model(mut self, name: impl Into<String>, fields: &[(&str, &str)]) -> Self {
        self.models.push(ModelEntry {
            name: name.into(),
            fields: fields
                .iter()
                .map(|(field, ty)| (field.to_string(), ty.to_string()))
                .collect(),
        });
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            groups: self.groups,
            models: self.models,
        }
    }
}

/// Accumulates one group's operations in declaration order.
#[derive(Default)]
pub struct GroupBuilder {
    operations: Vec<OperationEntry>,
}

impl GroupBuilder {
    pub fn operation(
        mut self,
        name: impl Into<String>,
        doc: impl Into<String>,
        invoke: impl Fn(&Configuration, &[Value]) -> Result<Value, ApiError> + Send + Sync + 'static,
    ) -> Self {
        self.operations.push(OperationEntry {
            name: name.into(),
            doc: doc.into(),
            invoke: Arc::new(invoke),
        });
        self
    }
}
