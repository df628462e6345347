//! Bulk ingestion chunks: partitioned component columns paired with index
//! columns.

use std::{collections::HashMap, sync::Arc};

use arche_common::{Result, error::Error, verify_arg};
use arrow_array::{Array, ArrayRef, Int64Array, RecordBatch, RecordBatchOptions};
use arrow_schema::{DataType, Field, Schema};

use crate::{column::ComponentColumn, column_list::ComponentColumnList};

pub const ENTITY_PATH_METADATA_KEY: &str = "arche.entity_path";
pub const INDEX_KIND_METADATA_KEY: &str = "arche.index.kind";
pub const ARCHETYPE_METADATA_KEY: &str = "arche.archetype";
pub const FIELD_METADATA_KEY: &str = "arche.field";
pub const COMPONENT_METADATA_KEY: &str = "arche.component";

/// Interpretation of the values of an index column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// A monotonic counter, e.g. a frame or step number.
    Sequence,
    DurationNanos,
    TimestampNanos,
}

impl IndexKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Sequence => "sequence",
            IndexKind::DurationNanos => "duration_ns",
            IndexKind::TimestampNanos => "timestamp_ns",
        }
    }
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IndexKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<IndexKind> {
        match s {
            "sequence" => Ok(IndexKind::Sequence),
            "duration_ns" => Ok(IndexKind::DurationNanos),
            "timestamp_ns" => Ok(IndexKind::TimestampNanos),
            _ => Err(Error::invalid_arg(
                "index kind",
                format!("expected sequence, duration_ns or timestamp_ns, got '{s}'"),
            )),
        }
    }
}

/// One value per row of a chunk, on a named timeline.
#[derive(Debug, Clone)]
pub struct IndexColumn {
    timeline: String,
    kind: IndexKind,
    values: Int64Array,
}

impl IndexColumn {
    pub fn new(
        timeline: impl Into<String>,
        kind: IndexKind,
        values: impl Into<Int64Array>,
    ) -> IndexColumn {
        IndexColumn {
            timeline: timeline.into(),
            kind,
            values: values.into(),
        }
    }

    pub fn sequence(timeline: impl Into<String>, values: Vec<i64>) -> IndexColumn {
        IndexColumn::new(timeline, IndexKind::Sequence, values)
    }

    pub fn timeline(&self) -> &str {
        &self.timeline
    }

    pub fn kind(&self) -> IndexKind {
        self.kind
    }

    pub fn values(&self) -> &Int64Array {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn arrow_field(&self) -> Field {
        Field::new(&self.timeline, DataType::Int64, false).with_metadata(HashMap::from([(
            INDEX_KIND_METADATA_KEY.to_string(),
            self.kind.as_str().to_string(),
        )]))
    }
}

/// A set of component columns for one entity, with the index columns that
/// place each row in time.
#[derive(Debug, Clone)]
pub struct ColumnarChunk {
    entity_path: String,
    indexes: Vec<IndexColumn>,
    columns: ComponentColumnList,
}

impl ColumnarChunk {
    /// Pairs `columns` with `indexes`.
    ///
    /// Every index must have exactly one value per row and timeline names
    /// must be unique.
    pub fn try_new(
        entity_path: impl Into<String>,
        indexes: Vec<IndexColumn>,
        columns: ComponentColumnList,
    ) -> Result<ColumnarChunk> {
        let entity_path = entity_path.into();
        verify_arg!(entity_path, !entity_path.is_empty());

        let num_rows = columns.num_rows();
        for (i, index) in indexes.iter().enumerate() {
            if indexes[..i]
                .iter()
                .any(|other| other.timeline == index.timeline)
            {
                return Err(Error::invalid_arg(
                    "indexes",
                    format!("duplicate timeline '{}'", index.timeline),
                ));
            }
            if index.len() != num_rows {
                return Err(Error::length_mismatch(
                    format!("index '{}'", index.timeline),
                    num_rows,
                    index.len(),
                ));
            }
        }
        Ok(ColumnarChunk {
            entity_path,
            indexes,
            columns,
        })
    }

    pub fn entity_path(&self) -> &str {
        &self.entity_path
    }

    pub fn indexes(&self) -> &[IndexColumn] {
        &self.indexes
    }

    pub fn columns(&self) -> &ComponentColumnList {
        &self.columns
    }

    pub fn num_rows(&self) -> usize {
        self.columns.num_rows()
    }

    /// Renders the chunk as one record batch row per partition: index columns
    /// first, then one list column per component column.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let mut fields = Vec::with_capacity(self.indexes.len() + self.columns.len());
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(fields.capacity());
        for index in &self.indexes {
            fields.push(index.arrow_field());
            arrays.push(Arc::new(index.values.clone()));
        }
        for column in &self.columns {
            fields.push(component_field(column));
            arrays.push(Arc::new(column.list_array().clone()));
        }

        let schema = Schema::new_with_metadata(
            fields,
            HashMap::from([(
                ENTITY_PATH_METADATA_KEY.to_string(),
                self.entity_path.clone(),
            )]),
        );
        let options = RecordBatchOptions::new().with_row_count(Some(self.num_rows()));
        RecordBatch::try_new_with_options(Arc::new(schema), arrays, &options)
            .map_err(|e| Error::arrow(format!("record batch for {}", self.entity_path), e))
    }
}

fn component_field(column: &ComponentColumn) -> Field {
    let descriptor = column.descriptor();
    let mut metadata = HashMap::from([(
        COMPONENT_METADATA_KEY.to_string(),
        descriptor.component.to_string(),
    )]);
    if let Some(archetype) = descriptor.archetype {
        metadata.insert(ARCHETYPE_METADATA_KEY.to_string(), archetype.to_string());
    }
    if let Some(field) = descriptor.field {
        metadata.insert(FIELD_METADATA_KEY.to_string(), field.to_string());
    }
    Field::new(
        descriptor.to_string(),
        column.list_array().data_type().clone(),
        true,
    )
    .with_metadata(metadata)
}

#[cfg(test)]
mod tests {
    use arche_common::error::ErrorKind;
    use arrow_array::{cast::AsArray, types::Float64Type};

    use super::*;
    use crate::{instance::ArchetypeInstance, spec::test_specs::POINTS};

    fn points_columns() -> ComponentColumnList {
        let instance = ArchetypeInstance::try_construct(
            &POINTS,
            [("values", vec![1.0f64, 2.0, 3.0])],
        )
        .unwrap();
        ComponentColumnList::from_instance(&instance).unwrap()
    }

    #[test]
    fn test_record_batch_layout() {
        let chunk = ColumnarChunk::try_new(
            "world/points",
            vec![IndexColumn::sequence("step", vec![10, 11, 12])],
            points_columns(),
        )
        .unwrap();
        assert_eq!(chunk.num_rows(), 3);

        let batch = chunk.to_record_batch().unwrap();
        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.num_columns(), 3);

        let schema = batch.schema();
        assert_eq!(
            schema.metadata().get(ENTITY_PATH_METADATA_KEY).map(String::as_str),
            Some("world/points")
        );

        let step = schema.field(0);
        assert_eq!(step.name(), "step");
        assert_eq!(step.data_type(), &DataType::Int64);
        assert_eq!(
            step.metadata().get(INDEX_KIND_METADATA_KEY).map(String::as_str),
            Some("sequence")
        );

        let indicator = schema.field(1);
        assert!(indicator.metadata().get(FIELD_METADATA_KEY).is_none());
        assert_eq!(
            indicator.metadata().get(COMPONENT_METADATA_KEY).map(String::as_str),
            Some("test.components.PointsIndicator")
        );

        let values = schema.field(2);
        assert_eq!(values.name(), "test.archetypes.Points:values#arche.components.Scalar");
        assert_eq!(
            values.metadata().get(FIELD_METADATA_KEY).map(String::as_str),
            Some("values")
        );
        let list = batch.column(2).as_list::<i32>();
        assert_eq!(
            list.value(1).as_primitive::<Float64Type>().values(),
            &[2.0]
        );
    }

    #[test]
    fn test_index_length_mismatch() {
        let err = ColumnarChunk::try_new(
            "world/points",
            vec![IndexColumn::sequence("step", vec![10, 11])],
            points_columns(),
        )
        .unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::LengthMismatch {
                expected: 3,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_timeline_and_empty_path() {
        let indexes = vec![
            IndexColumn::sequence("step", vec![1, 2, 3]),
            IndexColumn::new("step", IndexKind::DurationNanos, vec![1i64, 2, 3]),
        ];
        let err = ColumnarChunk::try_new("world/points", indexes, points_columns()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));

        let err = ColumnarChunk::try_new("", vec![], points_columns()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
    }

    #[test]
    fn test_repartitioned_chunk() {
        let columns = points_columns().repartitioned(&[2, 1]).unwrap();
        let chunk = ColumnarChunk::try_new(
            "world/points",
            vec![IndexColumn::new(
                "log_time",
                IndexKind::TimestampNanos,
                vec![1_000i64, 2_000],
            )],
            columns,
        )
        .unwrap();
        let batch = chunk.to_record_batch().unwrap();
        assert_eq!(batch.num_rows(), 2);
        let list = batch.column(2).as_list::<i32>();
        assert_eq!(list.value(0).len(), 2);
    }

    #[test]
    fn test_index_kind_parse() {
        for kind in [
            IndexKind::Sequence,
            IndexKind::DurationNanos,
            IndexKind::TimestampNanos,
        ] {
            assert_eq!(kind.as_str().parse::<IndexKind>().unwrap(), kind);
        }
        assert!("frames".parse::<IndexKind>().is_err());
    }
}
