//! A double-precision scalar.

use arche_bundle::{
    Archetype, ArchetypeFields, ArchetypeInstance, ArchetypeSpec, ComponentBatch, FieldSpec,
};
use arche_components::{FieldInput, component_type};

pub static SPEC: ArchetypeSpec = ArchetypeSpec {
    name: "arche.archetypes.Scalar",
    indicator: "arche.components.ScalarIndicator",
    doc: "A double-precision scalar, e.g. one sample of a time series. \
          Log a sequence of scalars over a timeline to plot it.",
    fields: &[FieldSpec {
        name: "scalar",
        component: &component_type::SCALAR,
        doc: "The scalar value to log.",
    }],
};

#[derive(Debug, Clone, Default)]
pub struct ScalarFields {
    pub scalar: Option<FieldInput>,
}

impl ArchetypeFields for ScalarFields {
    fn into_entries(self) -> Vec<(&'static str, Option<FieldInput>)> {
        vec![("scalar", self.scalar)]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scalar(ArchetypeInstance);

impl Scalar {
    /// Logs `scalar`; several values make one row each in the column form.
    pub fn new(scalar: impl Into<FieldInput>) -> Scalar {
        Scalar::construct(ScalarFields {
            scalar: Some(scalar.into()),
        })
    }

    pub fn scalar(&self) -> Option<&ComponentBatch> {
        self.0.batch("scalar")
    }
}

impl Archetype for Scalar {
    type Fields = ScalarFields;

    fn spec() -> &'static ArchetypeSpec {
        &SPEC
    }

    fn from_instance(instance: ArchetypeInstance) -> Self {
        Scalar(instance)
    }

    fn instance(&self) -> &ArchetypeInstance {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use arche_bundle::{Archetype, FieldUpdate};
    use arrow_array::{cast::AsArray, types::Float64Type};
    use serde_json::json;

    use super::{Scalar, ScalarFields};

    #[test]
    fn test_columns() {
        let scalar = Scalar::new(vec![1.0f64, 2.0, 3.0]);
        let columns = scalar.columns().unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(
            columns.columns()[0].descriptor().component,
            "arche.components.ScalarIndicator"
        );
        let rows: Vec<Vec<f64>> = columns
            .field("scalar")
            .unwrap()
            .sub_batches()
            .map(|b| b.as_primitive::<Float64Type>().values().to_vec())
            .collect();
        assert_eq!(rows, vec![vec![1.0], vec![2.0], vec![3.0]]);
    }

    #[test]
    fn test_from_json_and_clear() {
        let scalar = Scalar::construct(ScalarFields {
            scalar: Some(json!(0.25).into()),
        });
        assert_eq!(scalar.num_instances(), 1);

        let cleared = scalar.with_updates(&FieldUpdate::new().clear_unset(true).reset("scalar"));
        assert!(cleared.scalar().unwrap().is_empty());
        assert_eq!(cleared, Scalar::cleared());
    }

    #[test]
    fn test_rejected_value_yields_unset() {
        let scalar = Scalar::new(json!({"value": 1}));
        assert!(scalar.instance().is_unset());
        assert!(scalar.scalar().is_none());
        assert_eq!(scalar.as_component_batches().len(), 1);
    }
}
