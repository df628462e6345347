//! Static archetype definitions.

use arche_components::{ComponentDescriptor, ComponentType};

use crate::batch::ComponentBatch;

/// One field of an archetype, in declaration order.
#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub component: &'static ComponentType,
    pub doc: &'static str,
}

/// The static table describing an archetype: its name, indicator component
/// and fields in declaration order.
#[derive(Debug)]
pub struct ArchetypeSpec {
    /// Fully qualified name, e.g. `arche.archetypes.Scalar`.
    pub name: &'static str,
    /// Component name of the archetype's indicator.
    pub indicator: &'static str,
    pub doc: &'static str,
    pub fields: &'static [FieldSpec],
}

impl ArchetypeSpec {
    /// Name without the namespace, e.g. `Scalar`.
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit('.').next().unwrap_or(self.name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn descriptor(&self, field: &FieldSpec) -> ComponentDescriptor {
        ComponentDescriptor::for_field(self.name, field.name, field.component.name)
    }

    /// Descriptors of all fields, in declaration order.
    pub fn field_descriptors(&self) -> impl Iterator<Item = ComponentDescriptor> + '_ {
        self.fields.iter().map(|field| self.descriptor(field))
    }

    pub fn indicator_descriptor(&self) -> ComponentDescriptor {
        ComponentDescriptor::for_indicator(self.name, self.indicator)
    }

    pub fn indicator_batch(&self) -> ComponentBatch {
        ComponentBatch::indicator(self.indicator_descriptor())
    }

    /// A zero-length batch for `field`.
    pub fn empty_batch(&self, field: &FieldSpec) -> ComponentBatch {
        ComponentBatch::new(self.descriptor(field), field.component.empty_array())
    }
}


#[cfg(test)]
mod tests {
    use super::test_specs::POINTS;

    #[test]
    fn test_lookup() {
        assert_eq!(POINTS.short_name(), "Points");
        assert_eq!(POINTS.field_index("opacity"), Some(1));
        assert!(POINTS.field("missing").is_none());

        let descriptors: Vec<_> = POINTS.field_descriptors().collect();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].field, Some("values"));
        assert_eq!(descriptors[1].component, "arche.components.Opacity");

        let indicator = POINTS.indicator_descriptor();
        assert!(indicator.is_indicator());
        assert!(POINTS.indicator_batch().is_empty());

        let empty = POINTS.empty_batch(&POINTS.fields[1]);
        assert!(empty.is_empty());
        assert_eq!(empty.data_type(), &arrow_schema::DataType::Float32);
    }
}
