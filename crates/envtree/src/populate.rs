//! Populating configs by walking a field tree.

use std::any;

use crate::{
    ConfigSource, KeySnapshot, PopulateConfig,
    de::WellKnown,
    error::{InvalidTargetReason, ParseError},
    metadata::RustType,
    tree::{DescriptorKind, FieldDescriptor, FieldTree},
};

impl FieldTree {
    /// Populates `target` from the provided source. All referenced env variables are read once
    /// into a [`KeySnapshot`] before populating.
    ///
    /// # Errors
    ///
    /// Returns the first encountered error. The `target` may be partially populated in this case.
    #[tracing::instrument(
        level = "debug",
        name = "FieldTree::populate",
        skip_all,
        fields(config = %self.ty())
    )]
    pub fn populate<C, S>(&self, target: &mut C, source: &S) -> Result<(), ParseError>
    where
        C: PopulateConfig,
        S: ConfigSource + ?Sized,
    {
        let snapshot = KeySnapshot::resolve(self.referenced_keys(), source);
        self.populate_from_snapshot(target, &snapshot)
    }

    /// Populates `target` from a previously resolved snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first encountered error. The `target` may be partially populated in this case.
    pub fn populate_from_snapshot<C: PopulateConfig>(
        &self,
        target: &mut C,
        snapshot: &KeySnapshot,
    ) -> Result<(), ParseError> {
        if !self.ty().is::<C>() {
            return Err(ParseError::InvalidTarget {
                ty: self.ty(),
                reason: InvalidTargetReason::TypeMismatch {
                    actual: any::type_name::<C>(),
                },
            });
        }

        let group = GroupPopulator {
            ty: self.ty(),
            fields: self.fields(),
            snapshot,
            force: false,
        };
        target.populate_config(&group)
    }
}

/// Populator for a single config in a [`FieldTree`], passed to [`PopulateConfig::populate_config()`].
#[derive(Debug)]
pub struct GroupPopulator<'a> {
    ty: RustType,
    fields: &'a [FieldDescriptor],
    snapshot: &'a KeySnapshot,
    force: bool,
}

impl<'a> GroupPopulator<'a> {
    /// Returns the snapshot of env variables used for populating.
    pub fn snapshot(&self) -> &'a KeySnapshot {
        self.snapshot
    }

    /// Checks whether all params in this config are required because of an enclosing group.
    pub fn is_forced(&self) -> bool {
        self.force
    }

    fn invalid(&self, reason: InvalidTargetReason) -> ParseError {
        ParseError::InvalidTarget {
            ty: self.ty,
            reason,
        }
    }

    fn field(&self, index: usize) -> Result<&'a FieldDescriptor, ParseError> {
        self.fields.get(index).ok_or_else(|| {
            self.invalid(InvalidTargetReason::FieldOutOfRange {
                index,
                len: self.fields.len(),
            })
        })
    }

    /// Populates a param field with the specified index.
    ///
    /// # Errors
    ///
    /// - Returns [`ParseError::MissingRequired`] if the variable is effectively required, but not set.
    /// - Returns [`ParseError::DisallowedValue`] or [`ParseError::Coercion`] if the variable value is invalid.
    /// - Returns [`ParseError::InvalidTarget`] if the field doesn't correspond to the field tree.
    pub fn param<T: WellKnown>(&self, index: usize, target: &mut T) -> Result<(), ParseError> {
        let field = self.field(index)?;
        let DescriptorKind::Leaf(leaf) = &field.kind else {
            return Err(self.invalid(InvalidTargetReason::NotALeaf { field: field.name }));
        };
        if !leaf.rust_type.is::<T>() {
            return Err(self.invalid(InvalidTargetReason::FieldTypeMismatch {
                field: field.name,
                expected: leaf.rust_type,
                actual: any::type_name::<T>(),
            }));
        }
        if !leaf.is_bound() {
            tracing::trace!(config = %self.ty, field = field.name, "skipped unbound param");
            return Ok(());
        }

        let Some(raw) = self.snapshot.get(leaf.key) else {
            if field.required.effective(self.snapshot, self.force) {
                return Err(ParseError::MissingRequired { key: leaf.key });
            }
            tracing::trace!(
                config = %self.ty,
                field = field.name,
                key = leaf.key,
                "param is not set; leaving it untouched"
            );
            return Ok(());
        };

        let value = leaf.check(raw)?;
        *target = T::from_value(value).ok_or_else(|| {
            self.invalid(InvalidTargetReason::ValueMismatch {
                field: field.name,
                kind: leaf.param_kind,
            })
        })?;
        tracing::trace!(
            config = %self.ty,
            field = field.name,
            key = leaf.key,
            "populated param"
        );
        Ok(())
    }

    /// Populates a nested config field with the specified index.
    ///
    /// # Errors
    ///
    /// Propagates errors populating the nested config. Returns [`ParseError::InvalidTarget`]
    /// if the field doesn't correspond to the field tree.
    pub fn nested<C: PopulateConfig>(&self, index: usize, target: &mut C) -> Result<(), ParseError> {
        let field = self.field(index)?;
        let DescriptorKind::Group(group) = &field.kind else {
            return Err(self.invalid(InvalidTargetReason::NotAGroup { field: field.name }));
        };
        if !group.ty.is::<C>() {
            return Err(self.invalid(InvalidTargetReason::FieldTypeMismatch {
                field: field.name,
                expected: group.ty,
                actual: any::type_name::<C>(),
            }));
        }

        let force = field.required.effective(self.snapshot, self.force);
        tracing::trace!(
            config = %self.ty,
            field = field.name,
            force,
            "populating nested config"
        );
        let nested = GroupPopulator {
            ty: group.ty,
            fields: &group.subfields,
            snapshot: self.snapshot,
            force,
        };
        target.populate_config(&nested)
    }
}
