//! The protocol shared by typed archetype wrappers.

use arche_common::Result;
use arche_components::FieldInput;

use crate::{
    batch::ComponentBatch, column_list::ComponentColumnList, diagnostics::Diagnostics,
    instance::ArchetypeInstance, spec::ArchetypeSpec, update::FieldUpdate,
};

/// Named field values of a typed archetype, one `Option` per declared field.
pub trait ArchetypeFields: Default {
    /// `(field name, value)` pairs in declaration order.
    fn into_entries(self) -> Vec<(&'static str, Option<FieldInput>)>;
}

/// A typed archetype: a thin wrapper around an [`ArchetypeInstance`] of a
/// fixed [`ArchetypeSpec`].
///
/// Implementors provide the spec and the conversions to and from the
/// instance; construction, clearing, updates and both output forms are
/// provided. Constructors without a `_with` suffix report diagnostics through
/// [`Diagnostics::global`].
pub trait Archetype: Sized {
    type Fields: ArchetypeFields;

    fn spec() -> &'static ArchetypeSpec;

    fn from_instance(instance: ArchetypeInstance) -> Self;

    fn instance(&self) -> &ArchetypeInstance;

    /// Converts the given fields; a conversion failure yields the unset
    /// archetype.
    fn construct(fields: Self::Fields) -> Self {
        Self::construct_with(fields, Diagnostics::global())
    }

    fn construct_with(fields: Self::Fields, diagnostics: &Diagnostics) -> Self {
        Self::from_fields_with(false, fields, diagnostics)
    }

    fn try_construct(fields: Self::Fields) -> Result<Self> {
        ArchetypeInstance::try_construct(Self::spec(), given(fields)).map(Self::from_instance)
    }

    /// Builds the archetype with every field taking part: fields without a
    /// value are cleared when `clear_unset` is set.
    fn from_fields(clear_unset: bool, fields: Self::Fields) -> Self {
        Self::from_fields_with(clear_unset, fields, Diagnostics::global())
    }

    fn from_fields_with(clear_unset: bool, fields: Self::Fields, diagnostics: &Diagnostics) -> Self {
        Self::from_instance(ArchetypeInstance::from_fields(
            Self::spec(),
            clear_unset,
            given(fields),
            diagnostics,
        ))
    }

    /// The archetype with every field explicitly cleared.
    fn cleared() -> Self {
        Self::from_instance(ArchetypeInstance::cleared(Self::spec()))
    }

    fn with_updates(&self, update: &FieldUpdate) -> Self {
        self.with_updates_with(update, Diagnostics::global())
    }

    fn with_updates_with(&self, update: &FieldUpdate, diagnostics: &Diagnostics) -> Self {
        Self::from_instance(self.instance().with_updates(update, diagnostics))
    }

    /// Column form with one row per value.
    fn columns(&self) -> Result<ComponentColumnList> {
        ComponentColumnList::from_instance(self.instance())
    }

    /// Column form with the given row lengths.
    fn columns_with(&self, lengths: &[usize]) -> Result<ComponentColumnList> {
        ComponentColumnList::from_instance_partitioned(self.instance(), lengths)
    }

    fn as_component_batches(&self) -> Vec<ComponentBatch> {
        self.instance().as_component_batches()
    }

    fn num_instances(&self) -> usize {
        self.instance().num_instances()
    }
}

fn given<F: ArchetypeFields>(fields: F) -> impl Iterator<Item = (&'static str, FieldInput)> {
    fields
        .into_entries()
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
}
