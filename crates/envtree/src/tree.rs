//! Field tree derived from config metadata.

use std::{any, collections::HashSet, fmt};

use serde::Serialize;

use crate::{
    DescribeConfig, KeySnapshot,
    de::{ParamValue, coerce},
    error::{BuildError, CoercionError, InvalidTargetReason, ParseError},
    metadata::{ConfigMetadata, FieldKind, FieldMetadata, ParamKind, ParamMetadata, RustType},
    required::RequiredExpr,
};

/// Maximum supported nesting depth of configs.
pub const MAX_NESTING_DEPTH: usize = 32;

/// Set of allowed raw values for a param. An empty set means that any value is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AllowedValues(Vec<&'static str>);

impl fmt::Display for AllowedValues {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                formatter.write_str(", ")?;
            }
            formatter.write_str(value)?;
        }
        Ok(())
    }
}

impl AllowedValues {
    /// Parses values from a comma-separated list. Values are not trimmed; duplicates are removed.
    pub fn parse(raw: &'static str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }
        let mut values = Vec::new();
        for value in raw.split(',') {
            if !values.contains(&value) {
                values.push(value);
            }
        }
        Self(values)
    }

    /// Checks whether any value is allowed.
    pub fn is_unrestricted(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks whether the specified raw value is allowed. Comparison is case-sensitive.
    pub fn allows(&self, raw: &str) -> bool {
        self.is_unrestricted() || self.0.contains(&raw)
    }

    /// Iterates over allowed values in the declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }
}

/// Descriptor of a param read from a single env variable.
#[derive(Debug, Clone, Serialize)]
pub struct LeafDescriptor {
    /// Env variable to read the param from. Leaves with an empty key are not read.
    pub key: &'static str,
    /// Allowed raw values.
    pub allowed: AllowedValues,
    /// Kind of the param.
    pub param_kind: ParamKind,
    /// Rust type of the param.
    pub rust_type: RustType,
}

impl LeafDescriptor {
    fn new(param: &ParamMetadata) -> Self {
        Self {
            key: param.env,
            allowed: AllowedValues::parse(param.allowed),
            param_kind: param.kind,
            rust_type: param.rust_type,
        }
    }

    /// Checks whether this leaf is bound to an env variable.
    pub fn is_bound(&self) -> bool {
        !self.key.is_empty()
    }

    /// Checks the raw value against allowed values and coerces it to the param kind.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::DisallowedValue`] or [`ParseError::Coercion`].
    pub fn check(&self, raw: &str) -> Result<ParamValue, ParseError> {
        if !self.allowed.allows(raw) {
            return Err(ParseError::DisallowedValue {
                key: self.key,
                allowed: self.allowed.clone(),
                actual: raw.to_owned(),
            });
        }
        coerce(self.param_kind, raw)
            .map_err(|cause| CoercionError::new(self.key, raw, self.param_kind, cause).into())
    }
}

/// Descriptor of a nested config.
#[derive(Debug, Clone, Serialize)]
pub struct GroupDescriptor {
    /// Type of the nested config.
    pub ty: RustType,
    /// Help for the nested config type.
    pub help: &'static str,
    /// Fields of the nested config in the declaration order.
    pub subfields: Vec<FieldDescriptor>,
}

/// Kind of a [`FieldDescriptor`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DescriptorKind {
    /// Param.
    Leaf(LeafDescriptor),
    /// Nested config.
    Group(GroupDescriptor),
}

/// Descriptor of a single config field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    /// Name of the field in Rust code.
    pub name: &'static str,
    /// Help for the field.
    pub help: &'static str,
    /// Required expression of the field.
    pub required: RequiredExpr,
    /// Field kind.
    #[serde(flatten)]
    pub kind: DescriptorKind,
}

impl FieldDescriptor {
    /// Returns the leaf descriptor if this field is a param.
    pub fn as_leaf(&self) -> Option<&LeafDescriptor> {
        match &self.kind {
            DescriptorKind::Leaf(leaf) => Some(leaf),
            DescriptorKind::Group(_) => None,
        }
    }

    /// Returns the group descriptor if this field is a nested config.
    pub fn as_group(&self) -> Option<&GroupDescriptor> {
        match &self.kind {
            DescriptorKind::Group(group) => Some(group),
            DescriptorKind::Leaf(_) => None,
        }
    }
}

/// Reference to a param in a [`FieldTree`], together with its location.
#[derive(Debug, Clone)]
pub struct LeafRef<'a> {
    /// Dotted path to the field in Rust code, e.g. `database.url`.
    pub path: String,
    /// Field descriptor.
    pub field: &'a FieldDescriptor,
    /// Leaf descriptor for the field.
    pub leaf: &'a LeafDescriptor,
    /// Required expressions of the enclosing groups, from the outermost one.
    pub group_requirements: Vec<RequiredExpr>,
}

impl LeafRef<'_> {
    /// Checks whether the param is effectively required, i.e., its own expression or an expression
    /// of any enclosing group holds.
    pub fn is_required(&self, snapshot: &KeySnapshot) -> bool {
        let force = self
            .group_requirements
            .iter()
            .any(|expr| expr.is_required(snapshot));
        self.field.required.effective(snapshot, force)
    }
}

/// Runtime tree of config fields built from [`ConfigMetadata`].
///
/// Building a tree is relatively expensive, so it makes sense to build it once and reuse for multiple populate calls.
#[derive(Debug, Clone, Serialize)]
pub struct FieldTree {
    ty: RustType,
    help: &'static str,
    fields: Vec<FieldDescriptor>,
}

impl FieldTree {
    /// Builds a tree from the provided metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the configs are recursively nested, or nested too deeply.
    pub fn new(metadata: &'static ConfigMetadata) -> Result<Self, BuildError> {
        TreeBuilder::new(MAX_NESTING_DEPTH).build(metadata)
    }

    /// Builds a tree for the specified config type.
    ///
    /// # Errors
    ///
    /// Wraps the [`BuildError`] into [`ParseError::InvalidTarget`].
    pub fn for_config<C: DescribeConfig>() -> Result<Self, ParseError> {
        let metadata = &C::DESCRIPTION;
        Self::new(metadata).map_err(|err| ParseError::InvalidTarget {
            ty: metadata.ty,
            reason: InvalidTargetReason::Build(err),
        })
    }

    /// Returns the root config type.
    pub fn ty(&self) -> RustType {
        self.ty
    }

    /// Returns help for the root config type.
    pub fn help(&self) -> &'static str {
        self.help
    }

    /// Returns the top-level fields in the declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns env variables for all bound params in the tree. Keys used only in required conditions
    /// are not included; such conditions never hold. Keys are deduplicated and listed in the order
    /// they are encountered in a depth-first walk.
    pub fn referenced_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        let mut seen = HashSet::new();
        Self::collect_keys(&self.fields, &mut keys, &mut seen);
        keys
    }

    fn collect_keys(
        fields: &[FieldDescriptor],
        keys: &mut Vec<&'static str>,
        seen: &mut HashSet<&'static str>,
    ) {
        for field in fields {
            match &field.kind {
                DescriptorKind::Leaf(leaf) => {
                    if leaf.is_bound() && seen.insert(leaf.key) {
                        keys.push(leaf.key);
                    }
                }
                DescriptorKind::Group(group) => Self::collect_keys(&group.subfields, keys, seen),
            }
        }
    }

    /// Lists all bound params in the tree in a depth-first walk.
    pub fn leaves(&self) -> Vec<LeafRef<'_>> {
        let mut leaves = Vec::new();
        Self::collect_leaves(&self.fields, "", &mut Vec::new(), &mut leaves);
        leaves
    }

    fn collect_leaves<'a>(
        fields: &'a [FieldDescriptor],
        prefix: &str,
        group_requirements: &mut Vec<RequiredExpr>,
        leaves: &mut Vec<LeafRef<'a>>,
    ) {
        for field in fields {
            let path = if prefix.is_empty() {
                field.name.to_owned()
            } else {
                format!("{prefix}.{}", field.name)
            };
            match &field.kind {
                DescriptorKind::Leaf(leaf) if leaf.is_bound() => leaves.push(LeafRef {
                    path,
                    field,
                    leaf,
                    group_requirements: group_requirements.clone(),
                }),
                // Unbound leaves are never read.
                DescriptorKind::Leaf(_) => {}
                DescriptorKind::Group(group) => {
                    group_requirements.push(field.required);
                    Self::collect_leaves(&group.subfields, &path, group_requirements, leaves);
                    group_requirements.pop();
                }
            }
        }
    }
}

#[derive(Debug)]
struct TreeBuilder {
    max_depth: usize,
    path: Vec<&'static str>,
    types: Vec<any::TypeId>,
}

impl TreeBuilder {
    fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            path: vec![],
            types: vec![],
        }
    }

    fn build(mut self, metadata: &'static ConfigMetadata) -> Result<FieldTree, BuildError> {
        self.types.push(metadata.ty.id());
        let fields = self.build_fields(metadata)?;
        tracing::debug!(
            config = %metadata.ty,
            field_count = fields.len(),
            "built field tree"
        );
        Ok(FieldTree {
            ty: metadata.ty,
            help: metadata.help,
            fields,
        })
    }

    fn build_fields(
        &mut self,
        metadata: &'static ConfigMetadata,
    ) -> Result<Vec<FieldDescriptor>, BuildError> {
        metadata
            .fields
            .iter()
            .map(|field| self.build_field(field))
            .collect()
    }

    fn build_field(&mut self, field: &'static FieldMetadata) -> Result<FieldDescriptor, BuildError> {
        let kind = match &field.kind {
            FieldKind::Param(param) => DescriptorKind::Leaf(LeafDescriptor::new(param)),
            FieldKind::Nested(nested) => {
                self.path.push(field.rust_field_name);
                let group = self.build_group(nested);
                self.path.pop();
                DescriptorKind::Group(group?)
            }
        };
        Ok(FieldDescriptor {
            name: field.rust_field_name,
            help: field.help,
            required: RequiredExpr::parse(field.required),
            kind,
        })
    }

    fn build_group(
        &mut self,
        metadata: &'static ConfigMetadata,
    ) -> Result<GroupDescriptor, BuildError> {
        let type_id = metadata.ty.id();
        if self.types.contains(&type_id) {
            return Err(BuildError::RecursiveConfig {
                ty: metadata.ty,
                path: self.path.join("."),
            });
        }
        if self.path.len() > self.max_depth {
            return Err(BuildError::TooDeep {
                path: self.path.join("."),
                max_depth: self.max_depth,
            });
        }

        self.types.push(type_id);
        let subfields = self.build_fields(metadata);
        self.types.pop();
        Ok(GroupDescriptor {
            ty: metadata.ty,
            help: metadata.help,
            subfields: subfields?,
        })
    }
}
