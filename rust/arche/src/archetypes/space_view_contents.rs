//! Blueprint archetype: the contents of a space view.

use arche_bundle::{
    Archetype, ArchetypeFields, ArchetypeInstance, ArchetypeSpec, ComponentBatch, FieldSpec,
};
use arche_components::{FieldInput, component_type};

pub static SPEC: ArchetypeSpec = ArchetypeSpec {
    name: "arche.blueprint.archetypes.SpaceViewContents",
    indicator: "arche.blueprint.components.SpaceViewContentsIndicator",
    doc: "The contents of a space view.",
    fields: &[FieldSpec {
        name: "query",
        component: &component_type::QUERY_EXPRESSION,
        doc: "The query expressions that determine which entities are part of the space view.",
    }],
};

#[derive(Debug, Clone, Default)]
pub struct SpaceViewContentsFields {
    pub query: Option<FieldInput>,
}

impl ArchetypeFields for SpaceViewContentsFields {
    fn into_entries(self) -> Vec<(&'static str, Option<FieldInput>)> {
        vec![("query", self.query)]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpaceViewContents(ArchetypeInstance);

impl SpaceViewContents {
    /// `query` is one expression or a list of them, e.g. `+ /world/**`.
    pub fn new(query: impl Into<FieldInput>) -> SpaceViewContents {
        SpaceViewContents::construct(SpaceViewContentsFields {
            query: Some(query.into()),
        })
    }

    pub fn query(&self) -> Option<&ComponentBatch> {
        self.0.batch("query")
    }
}

impl Archetype for SpaceViewContents {
    type Fields = SpaceViewContentsFields;

    fn spec() -> &'static ArchetypeSpec {
        &SPEC
    }

    fn from_instance(instance: ArchetypeInstance) -> Self {
        SpaceViewContents(instance)
    }

    fn instance(&self) -> &ArchetypeInstance {
        &self.0
    }
}
