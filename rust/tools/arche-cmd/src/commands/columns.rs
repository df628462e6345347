//! Columns command implementation

use anyhow::{Context, Result};
use arrow::{array::RecordBatch, util::pretty::print_batches};
use serde::Serialize;

use arche::{
    ArchetypeInstance, ColumnarChunk, ComponentColumnList, IndexColumn, IndexKind,
    components::FieldInput,
};

use crate::{
    IndexKindArg,
    utils::{read_json, resolve_archetype},
};

pub struct ColumnsArgs {
    pub archetype: String,
    pub input: String,
    pub partition: Option<Vec<usize>>,
    pub timeline: Option<String>,
    pub index_file: Option<String>,
    pub index_kind: IndexKindArg,
    pub entity_path: String,
    pub json: bool,
}

#[derive(Serialize)]
struct ColumnsSummary {
    archetype: &'static str,
    num_rows: usize,
    columns: Vec<ColumnInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<IndexInfo>,
}

#[derive(Serialize)]
struct ColumnInfo {
    name: String,
    component: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
    value_type: String,
    lengths: Vec<usize>,
}

#[derive(Serialize)]
struct IndexInfo {
    timeline: String,
    kind: &'static str,
    values: Vec<i64>,
}

struct ColumnsOutput {
    summary: ColumnsSummary,
    record_batch: Option<RecordBatch>,
}

/// Run the columns command
pub fn run(args: ColumnsArgs) -> Result<()> {
    let output = build(&args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&output.summary)?);
        return Ok(());
    }

    let summary = &output.summary;
    println!("{}: {} row(s)", summary.archetype, summary.num_rows);
    for column in &summary.columns {
        println!(
            "  {:<64} {:<12} {:?}",
            column.name, column.value_type, column.lengths
        );
    }
    if let Some(batch) = &output.record_batch {
        print_batches(std::slice::from_ref(batch))?;
    }
    Ok(())
}

fn build(args: &ColumnsArgs) -> Result<ColumnsOutput> {
    let spec = resolve_archetype(&args.archetype)?;
    let fields = read_fields(&args.input)?;
    let instance = ArchetypeInstance::try_construct(spec, fields)
        .with_context(|| format!("Invalid field values in {}", args.input))?;

    let columns = match &args.partition {
        Some(lengths) => ComponentColumnList::from_instance_partitioned(&instance, lengths),
        None => ComponentColumnList::from_instance(&instance),
    }
    .with_context(|| format!("Failed to partition {}", spec.short_name()))?;
    log::debug!(
        "{}: {} column(s), {} row(s)",
        spec.short_name(),
        columns.len(),
        columns.num_rows()
    );

    let (index, record_batch) = match &args.timeline {
        Some(timeline) => {
            let values = match &args.index_file {
                Some(path) => read_index_values(path)?,
                None => (0..columns.num_rows() as i64).collect(),
            };
            let kind = index_kind(args.index_kind);
            let chunk = ColumnarChunk::try_new(
                args.entity_path.as_str(),
                vec![IndexColumn::new(timeline.as_str(), kind, values.clone())],
                columns.clone(),
            )
            .with_context(|| format!("Failed to index columns on timeline '{}'", timeline))?;
            let batch = chunk.to_record_batch()?;
            let index = IndexInfo {
                timeline: timeline.clone(),
                kind: kind.as_str(),
                values,
            };
            (Some(index), Some(batch))
        }
        None => (None, None),
    };

    let summary = ColumnsSummary {
        archetype: spec.name,
        num_rows: columns.num_rows(),
        columns: columns
            .iter()
            .map(|column| ColumnInfo {
                name: column.descriptor().to_string(),
                component: column.descriptor().component,
                field: column.descriptor().field,
                value_type: column.value_type().to_string(),
                lengths: column.lengths(),
            })
            .collect(),
        index,
    };
    Ok(ColumnsOutput {
        summary,
        record_batch,
    })
}

fn read_fields(path: &str) -> Result<Vec<(String, FieldInput)>> {
    match read_json(path)? {
        serde_json::Value::Object(map) => Ok(map
            .into_iter()
            .map(|(name, value)| (name, FieldInput::Json(value)))
            .collect()),
        _ => anyhow::bail!("Expected a JSON object of field values in {}", path),
    }
}

fn read_index_values(path: &str) -> Result<Vec<i64>> {
    let value = read_json(path)?;
    let items = value
        .as_array()
        .with_context(|| format!("Expected a JSON array of index values in {}", path))?;
    items
        .iter()
        .map(|item| {
            item.as_i64()
                .with_context(|| format!("Index value {} is not an integer", item))
        })
        .collect()
}

fn index_kind(arg: IndexKindArg) -> IndexKind {
    match arg {
        IndexKindArg::Sequence => IndexKind::Sequence,
        IndexKindArg::DurationNs => IndexKind::DurationNanos,
        IndexKindArg::TimestampNs => IndexKind::TimestampNanos,
    }
}
