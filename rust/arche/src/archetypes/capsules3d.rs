//! 3D capsules: cylinders with hemispherical caps.

use arche_bundle::{
    Archetype, ArchetypeFields, ArchetypeInstance, ArchetypeSpec, ComponentBatch, FieldSpec,
    FieldUpdate,
};
use arche_components::{FieldInput, component_type};

pub static SPEC: ArchetypeSpec = ArchetypeSpec {
    name: "arche.archetypes.Capsules3D",
    indicator: "arche.components.Capsules3DIndicator",
    doc: "3D capsules; cylinders with hemispherical caps. Each capsule is aligned \
          with the local Z axis, its base cap centered on the origin.",
    fields: &[
        FieldSpec {
            name: "lengths",
            component: &component_type::LENGTH,
            doc: "Lengths of the capsules, between the centers of their caps.",
        },
        FieldSpec {
            name: "radii",
            component: &component_type::RADIUS,
            doc: "Radii of the capsules.",
        },
        FieldSpec {
            name: "translations",
            component: &component_type::TRANSLATION3D,
            doc: "Optional translations of the capsules.",
        },
    ],
};

#[derive(Debug, Clone, Default)]
pub struct Capsules3DFields {
    pub lengths: Option<FieldInput>,
    pub radii: Option<FieldInput>,
    pub translations: Option<FieldInput>,
}

impl ArchetypeFields for Capsules3DFields {
    fn into_entries(self) -> Vec<(&'static str, Option<FieldInput>)> {
        vec![
            ("lengths", self.lengths),
            ("radii", self.radii),
            ("translations", self.translations),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Capsules3D(ArchetypeInstance);

impl Capsules3D {
    /// Axis-aligned capsules with the given lengths and radii.
    ///
    /// For several capsules, follow with [`Capsules3D::with_translations`] to
    /// move them apart.
    pub fn from_lengths_and_radii(
        lengths: impl Into<FieldInput>,
        radii: impl Into<FieldInput>,
    ) -> Capsules3D {
        Capsules3D::construct(Capsules3DFields {
            lengths: Some(lengths.into()),
            radii: Some(radii.into()),
            ..Default::default()
        })
    }

    pub fn with_translations(&self, translations: impl Into<FieldInput>) -> Capsules3D {
        self.with_updates(&FieldUpdate::new().set("translations", translations))
    }

    pub fn lengths(&self) -> Option<&ComponentBatch> {
        self.0.batch("lengths")
    }

    pub fn radii(&self) -> Option<&ComponentBatch> {
        self.0.batch("radii")
    }

    pub fn translations(&self) -> Option<&ComponentBatch> {
        self.0.batch("translations")
    }
}

impl Archetype for Capsules3D {
    type Fields = Capsules3DFields;

    fn spec() -> &'static ArchetypeSpec {
        &SPEC
    }

    fn from_instance(instance: ArchetypeInstance) -> Self {
        Capsules3D(instance)
    }

    fn instance(&self) -> &ArchetypeInstance {
        &self.0
    }
}
