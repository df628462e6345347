//! Component-level building blocks for archetype bundles.
//!
//! This crate holds everything a field needs before it becomes part of an
//! archetype instance:
//! - [`descriptor::ComponentDescriptor`]: the stable `(archetype, field, component)`
//!   identifier attached to every batch.
//! - [`component_type::ComponentType`]: the static table entry for a semantic
//!   component type, pairing its Arrow data type with a converter.
//! - [`input::FieldInput`]: raw user input, either JSON or an Arrow array.
//! - [`convert`]: the converters that normalize a [`input::FieldInput`] into a
//!   canonical Arrow array.
//! - [`datatypes`]: Arrow data type definitions and the [`datatypes::ImageFormat`]
//!   value type.

pub mod component_type;
pub mod convert;
pub mod datatypes;
pub mod descriptor;
pub mod input;

pub use component_type::ComponentType;
pub use descriptor::ComponentDescriptor;
pub use input::FieldInput;
