use arche_components::FieldInput;

/// A field-scoped update of an archetype instance.
///
/// Each entry names a field and optionally supplies a value:
/// - named with a value: the field is converted and replaced;
/// - named without a value: the field becomes cleared when
///   [`FieldUpdate::clear_unset`] is set, unset otherwise;
/// - not named: the field keeps its prior state.
#[derive(Debug, Clone, Default)]
pub struct FieldUpdate {
    entries: Vec<(String, Option<FieldInput>)>,
    clear_unset: bool,
}

impl FieldUpdate {
    pub fn new() -> FieldUpdate {
        Default::default()
    }

    pub fn set(self, field: impl Into<String>, value: impl Into<FieldInput>) -> FieldUpdate {
        self.entry(field, Some(value.into()))
    }

    /// Names `field` without giving it a value.
    pub fn reset(self, field: impl Into<String>) -> FieldUpdate {
        self.entry(field, None)
    }

    pub fn entry(mut self, field: impl Into<String>, value: Option<FieldInput>) -> FieldUpdate {
        let field = field.into();
        self.entries.retain(|(name, _)| *name != field);
        self.entries.push((field, value));
        self
    }

    /// If set, fields named without a value are explicitly cleared.
    pub fn clear_unset(mut self, clear_unset: bool) -> FieldUpdate {
        self.clear_unset = clear_unset;
        self
    }

    pub fn is_clear_unset(&self) -> bool {
        self.clear_unset
    }

    pub fn entries(&self) -> &[(String, Option<FieldInput>)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
