//! # Arche: typed archetype bundles
//!
//! An archetype is a named bundle of typed component fields, e.g. a
//! [`Scalar`](archetypes::Scalar) or a
//! [`SegmentationImage`](archetypes::SegmentationImage). Every archetype
//! supports the same protocol:
//!
//! * validated construction from raw values, falling back to an unset
//!   instance plus a logged diagnostic when a value is rejected;
//! * explicit clearing and field-scoped updates;
//! * a row form ([`Archetype::as_component_batches`]) and a column form
//!   ([`Archetype::columns`]) for bulk, time-indexed ingestion.
//!
//! ## Module Organization
//!
//! * [`archetypes`] - the concrete archetypes and their static definitions
//! * [`registry`] - lookup of archetype definitions by name
//! * [`bundle`] - the shared construction and partitioning machinery
//! * [`components`] - component descriptors, types and converters
//! * [`common`] - error type and result alias
//!
//! ## Example
//!
//! ```
//! use arche::{Archetype, archetypes::Scalar};
//!
//! let scalar = Scalar::new(vec![1.0f64, 2.0, 3.0]);
//! let columns = scalar.columns().unwrap();
//! assert_eq!(columns.num_rows(), 3);
//!
//! let regrouped = columns.repartitioned(&[2, 1]).unwrap();
//! assert_eq!(regrouped.num_rows(), 2);
//! ```

pub mod archetypes;
pub mod registry;

pub use arche_bundle as bundle;
pub use arche_common as common;
pub use arche_components as components;

pub use arche_bundle::{
    Archetype, ArchetypeFields, ArchetypeInstance, ArchetypeSpec, ColumnarChunk, ComponentBatch,
    ComponentColumn, ComponentColumnList, Diagnostics, DiagnosticsConfig, FieldUpdate,
    IndexColumn, IndexKind,
};
pub use arche_common::{Result, error::Error};
pub use arche_components::FieldInput;
pub use registry::{find_archetype, registry};
