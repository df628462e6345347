//! Component bundle assembly for archetypes.
//!
//! An archetype is a named, schema-defined bundle of typed fields. This crate
//! implements the protocol every archetype shares:
//!
//! - **Validated construction** ([`instance::ArchetypeInstance`]): raw field
//!   values are converted into typed [`batch::ComponentBatch`]es. Conversion
//!   failures never cross the logging boundary: the instance falls back to the
//!   unset state and a [`diagnostics::ConversionDiagnostic`] is reported.
//! - **Clearing and partial updates** ([`update::FieldUpdate`]): every field is
//!   a three-state [`slot::FieldSlot`] (`Unset`, `Cleared`, `Present`).
//! - **Row form**: [`instance::ArchetypeInstance::as_component_batches`] yields
//!   the indicator followed by every set batch.
//! - **Column form** ([`column_list::ComponentColumnList`]): every set batch is
//!   partitioned into per-row sub-batches for bulk, time-indexed ingestion, and
//!   can be regrouped afterwards without copying values.
//! - **Bulk ingestion chunks** ([`chunk::ColumnarChunk`]): columns paired with
//!   index columns and rendered as an Arrow `RecordBatch`.
//!
//! Archetype definitions are static tables ([`spec::ArchetypeSpec`]); typed
//! wrappers implement [`archetype::Archetype`].

pub mod archetype;
pub mod batch;
pub mod chunk;
pub mod column;
pub mod column_list;
pub mod diagnostics;
pub mod instance;
pub mod slot;
pub mod spec;
pub mod update;

pub use archetype::{Archetype, ArchetypeFields};
pub use batch::ComponentBatch;
pub use chunk::{ColumnarChunk, IndexColumn, IndexKind};
pub use column::ComponentColumn;
pub use column_list::ComponentColumnList;
pub use diagnostics::{ConversionDiagnostic, DiagnosticSink, Diagnostics, DiagnosticsConfig};
pub use instance::ArchetypeInstance;
pub use slot::FieldSlot;
pub use spec::{ArchetypeSpec, FieldSpec};
pub use update::FieldUpdate;
