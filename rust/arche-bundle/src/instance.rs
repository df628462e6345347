//! Archetype instances: one [`FieldSlot`] per declared field.

use arche_common::{Result, error::Error};
use arche_components::FieldInput;

use crate::{
    batch::ComponentBatch,
    diagnostics::Diagnostics,
    slot::FieldSlot,
    spec::{ArchetypeSpec, FieldSpec},
    update::FieldUpdate,
};

/// A record of one archetype: its spec and the state of every field, in
/// declaration order.
///
/// Instances are immutable. Clearing and updating produce new instances.
#[derive(Debug, Clone)]
pub struct ArchetypeInstance {
    spec: &'static ArchetypeSpec,
    slots: Vec<FieldSlot>,
}

impl ArchetypeInstance {
    /// An instance with every field unset.
    ///
    /// This is the fallback produced when construction fails.
    pub fn unset(spec: &'static ArchetypeSpec) -> ArchetypeInstance {
        ArchetypeInstance {
            spec,
            slots: vec![FieldSlot::Unset; spec.fields.len()],
        }
    }

    /// An instance with every field explicitly cleared.
    pub fn cleared(spec: &'static ArchetypeSpec) -> ArchetypeInstance {
        ArchetypeInstance {
            spec,
            slots: spec
                .fields
                .iter()
                .map(|field| FieldSlot::Cleared(spec.empty_batch(field)))
                .collect(),
        }
    }

    /// Converts the given field values; fields not given stay unset.
    pub fn try_construct<K, V>(
        spec: &'static ArchetypeSpec,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> Result<ArchetypeInstance>
    where
        K: Into<String>,
        V: Into<FieldInput>,
    {
        Self::try_from_fields(spec, false, fields)
    }

    /// Like [`ArchetypeInstance::try_construct`], but a conversion failure
    /// yields the unset instance and a diagnostic instead of an error.
    pub fn construct<K, V>(
        spec: &'static ArchetypeSpec,
        fields: impl IntoIterator<Item = (K, V)>,
        diagnostics: &Diagnostics,
    ) -> ArchetypeInstance
    where
        K: Into<String>,
        V: Into<FieldInput>,
    {
        Self::from_fields(spec, false, fields, diagnostics)
    }

    /// Builds an instance where every declared field takes part in the
    /// update: given fields are converted, the others are cleared when
    /// `clear_unset` is set and unset otherwise.
    pub fn try_from_fields<K, V>(
        spec: &'static ArchetypeSpec,
        clear_unset: bool,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> Result<ArchetypeInstance>
    where
        K: Into<String>,
        V: Into<FieldInput>,
    {
        let entries = collect_entries(fields);
        Self::initial(spec, clear_unset).apply(&entries, clear_unset)
    }

    /// Fallible-free variant of [`ArchetypeInstance::try_from_fields`].
    pub fn from_fields<K, V>(
        spec: &'static ArchetypeSpec,
        clear_unset: bool,
        fields: impl IntoIterator<Item = (K, V)>,
        diagnostics: &Diagnostics,
    ) -> ArchetypeInstance
    where
        K: Into<String>,
        V: Into<FieldInput>,
    {
        let entries = collect_entries(fields);
        let result = Self::initial(spec, clear_unset).apply(&entries, clear_unset);
        recover(spec, result, &entries, diagnostics)
    }

    /// Applies a field-scoped update, leaving fields the update does not name
    /// untouched.
    pub fn try_with_updates(&self, update: &FieldUpdate) -> Result<ArchetypeInstance> {
        self.apply(update.entries(), update.is_clear_unset())
    }

    /// Fallible-free variant of [`ArchetypeInstance::try_with_updates`].
    pub fn with_updates(
        &self,
        update: &FieldUpdate,
        diagnostics: &Diagnostics,
    ) -> ArchetypeInstance {
        let result = self.try_with_updates(update);
        recover(self.spec, result, update.entries(), diagnostics)
    }

    pub fn spec(&self) -> &'static ArchetypeSpec {
        self.spec
    }

    /// Field slots in declaration order.
    pub fn slots(&self) -> &[FieldSlot] {
        &self.slots
    }

    pub fn slot(&self, field: &str) -> Option<&FieldSlot> {
        self.spec.field_index(field).map(|index| &self.slots[index])
    }

    /// The batch to emit for `field`, if the field is set.
    pub fn batch(&self, field: &str) -> Option<&ComponentBatch> {
        self.slot(field).and_then(FieldSlot::batch)
    }

    /// Returns `true` if every field is unset.
    pub fn is_unset(&self) -> bool {
        self.slots.iter().all(FieldSlot::is_unset)
    }

    /// Batches of all cleared and present fields, in declaration order.
    pub fn set_batches(&self) -> impl Iterator<Item = &ComponentBatch> + '_ {
        self.slots.iter().filter_map(FieldSlot::batch)
    }

    /// Row form: the indicator batch followed by every set batch.
    pub fn as_component_batches(&self) -> Vec<ComponentBatch> {
        std::iter::once(self.spec.indicator_batch())
            .chain(self.set_batches().cloned())
            .collect()
    }

    /// Number of instances described by the record: the longest set batch.
    pub fn num_instances(&self) -> usize {
        self.set_batches().map(ComponentBatch::len).max().unwrap_or(0)
    }

    fn initial(spec: &'static ArchetypeSpec, clear_unset: bool) -> ArchetypeInstance {
        if clear_unset {
            Self::cleared(spec)
        } else {
            Self::unset(spec)
        }
    }

    fn apply(
        &self,
        entries: &[(String, Option<FieldInput>)],
        clear_unset: bool,
    ) -> Result<ArchetypeInstance> {
        let spec = self.spec;
        let mut slots = self.slots.clone();
        for (name, value) in entries {
            let index = spec
                .field_index(name)
                .ok_or_else(|| Error::unknown_field(spec.short_name(), name.as_str()))?;
            let field = &spec.fields[index];
            slots[index] = match value {
                Some(value) => convert_field(spec, field, value)?,
                None if clear_unset => FieldSlot::Cleared(spec.empty_batch(field)),
                None => FieldSlot::Unset,
            };
        }
        Ok(ArchetypeInstance { spec, slots })
    }
}

impl PartialEq for ArchetypeInstance {
    fn eq(&self, other: &Self) -> bool {
        self.spec.name == other.spec.name && self.slots == other.slots
    }
}

fn convert_field(
    spec: &ArchetypeSpec,
    field: &FieldSpec,
    value: &FieldInput,
) -> Result<FieldSlot> {
    let array = field
        .component
        .convert(value)
        .map_err(|e| Error::in_field(spec.short_name(), field.name, e))?;
    Ok(FieldSlot::from_batch(ComponentBatch::new(
        spec.descriptor(field),
        array,
    )))
}

fn collect_entries<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Vec<(String, Option<FieldInput>)>
where
    K: Into<String>,
    V: Into<FieldInput>,
{
    fields
        .into_iter()
        .map(|(name, value)| (name.into(), Some(value.into())))
        .collect()
}

/// The construction boundary: errors become a diagnostic plus the unset
/// instance.
fn recover(
    spec: &'static ArchetypeSpec,
    result: Result<ArchetypeInstance>,
    entries: &[(String, Option<FieldInput>)],
    diagnostics: &Diagnostics,
) -> ArchetypeInstance {
    match result {
        Ok(instance) => instance,
        Err(error) => {
            let value = error.field_name().and_then(|field| {
                entries
                    .iter()
                    .find(|(name, _)| name == field)
                    .and_then(|(_, value)| value.as_ref())
            });
            diagnostics.report_error(spec.short_name(), &error, value);
            ArchetypeInstance::unset(spec)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arche_common::error::ErrorKind;
    use arrow_array::{cast::AsArray, types::Float64Type};
    use serde_json::json;

    use super::*;
    use crate::{
        diagnostics::{CollectingSink, DiagnosticsConfig},
        spec::test_specs::POINTS,
    };

    fn collecting() -> (Arc<CollectingSink>, Diagnostics) {
        let sink = Arc::new(CollectingSink::new());
        let diagnostics = Diagnostics::with_sink(DiagnosticsConfig::default(), sink.clone());
        (sink, diagnostics)
    }

    #[test]
    fn test_construct_converts_given_fields() {
        let instance =
            ArchetypeInstance::try_construct(&POINTS, [("values", vec![1.0f64, 2.0, 3.0])])
                .unwrap();
        assert!(instance.slot("values").unwrap().is_present());
        assert!(instance.slot("opacity").unwrap().is_unset());
        let values = instance.batch("values").unwrap();
        assert_eq!(
            values.array().as_primitive::<Float64Type>().values(),
            &[1.0, 2.0, 3.0]
        );
        assert_eq!(instance.num_instances(), 3);
    }

    #[test]
    fn test_unknown_field() {
        let err = ArchetypeInstance::try_construct(&POINTS, [("radius", 1.0f64)]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnknownField { .. }));

        let (sink, diagnostics) = collecting();
        let instance = ArchetypeInstance::construct(&POINTS, [("radius", 1.0f64)], &diagnostics);
        assert!(instance.is_unset());
        assert_eq!(sink.diagnostics()[0].field.as_deref(), Some("radius"));
    }

    #[test]
    fn test_conversion_failure_falls_back_to_unset() {
        let (sink, diagnostics) = collecting();
        let instance = ArchetypeInstance::construct(
            &POINTS,
            [
                ("values", json!([1.0, 2.0])),
                ("opacity", json!("opaque")),
            ],
            &diagnostics,
        );
        assert_eq!(instance, ArchetypeInstance::unset(&POINTS));

        let reported = sink.diagnostics();
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].archetype, "Points");
        assert_eq!(reported[0].field.as_deref(), Some("opacity"));
        assert_eq!(reported[0].value.as_deref(), Some("\"opaque\""));
    }

    #[test]
    fn test_successful_construct_reports_nothing() {
        let (sink, diagnostics) = collecting();
        let instance = ArchetypeInstance::construct(&POINTS, [("opacity", 0.5f32)], &diagnostics);
        assert!(instance.slot("opacity").unwrap().is_present());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_from_fields_clear_unset() {
        let instance =
            ArchetypeInstance::try_from_fields(&POINTS, true, [("values", 1.0f64)]).unwrap();
        assert!(instance.slot("values").unwrap().is_present());
        assert!(instance.slot("opacity").unwrap().is_cleared());

        let instance =
            ArchetypeInstance::try_from_fields(&POINTS, false, [("values", 1.0f64)]).unwrap();
        assert!(instance.slot("opacity").unwrap().is_unset());
    }

    #[test]
    fn test_cleared_vs_unset() {
        let cleared = ArchetypeInstance::cleared(&POINTS);
        assert!(cleared.slots().iter().all(FieldSlot::is_cleared));
        assert_eq!(cleared.set_batches().count(), 2);
        assert!(cleared.set_batches().all(ComponentBatch::is_empty));

        let unset = ArchetypeInstance::unset(&POINTS);
        assert!(unset.is_unset());
        assert_eq!(unset.set_batches().count(), 0);
        assert_ne!(cleared, unset);
    }

    #[test]
    fn test_empty_input_clears() {
        let instance = ArchetypeInstance::try_construct(&POINTS, [("values", json!([]))]).unwrap();
        assert!(instance.slot("values").unwrap().is_cleared());
    }

    #[test]
    fn test_with_updates_three_way() {
        let prior = ArchetypeInstance::try_construct(
            &POINTS,
            [("values", json!([1.0, 2.0])), ("opacity", json!(0.5))],
        )
        .unwrap();

        let update = FieldUpdate::new().clear_unset(true).reset("values");
        let updated = prior.try_with_updates(&update).unwrap();
        assert!(updated.slot("values").unwrap().is_cleared());
        assert_eq!(updated.slot("opacity"), prior.slot("opacity"));

        let update = FieldUpdate::new().reset("values");
        let updated = prior.try_with_updates(&update).unwrap();
        assert!(updated.slot("values").unwrap().is_unset());
        assert_eq!(updated.slot("opacity"), prior.slot("opacity"));

        let update = FieldUpdate::new().set("opacity", 0.25f32);
        let updated = prior.try_with_updates(&update).unwrap();
        assert_eq!(updated.slot("values"), prior.slot("values"));
        let opacity = updated.batch("opacity").unwrap();
        assert_eq!(opacity.len(), 1);

        // the prior instance is untouched
        assert!(prior.slot("values").unwrap().is_present());
    }

    #[test]
    fn test_with_updates_failure() {
        let prior = ArchetypeInstance::try_construct(&POINTS, [("values", 1.0f64)]).unwrap();
        let (sink, diagnostics) = collecting();
        let update = FieldUpdate::new().set("opacity", json!({"alpha": 1}));
        let updated = prior.with_updates(&update, &diagnostics);
        assert!(updated.is_unset());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_row_form() {
        let instance = ArchetypeInstance::try_from_fields(&POINTS, true, [("values", 1.0f64)])
            .unwrap();
        let batches = instance.as_component_batches();
        assert_eq!(batches.len(), 3);
        assert!(batches[0].descriptor().is_indicator());
        assert_eq!(batches[0].len(), 0);
        assert_eq!(batches[1].descriptor().field, Some("values"));
        assert_eq!(batches[2].descriptor().field, Some("opacity"));
        assert!(batches[2].is_empty());

        let unset = ArchetypeInstance::unset(&POINTS);
        assert_eq!(unset.as_component_batches().len(), 1);
        assert_eq!(unset.num_instances(), 0);
    }
}
