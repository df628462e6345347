//! Typed component batches.

use arche_common::Result;
use arche_components::{ComponentDescriptor, datatypes};
use arrow_array::{Array, ArrayRef};
use arrow_schema::DataType;

use crate::column::ComponentColumn;

/// An immutable typed sequence of values for one component, tagged with its
/// descriptor.
///
/// A zero-length batch is a valid state meaning "explicitly cleared".
#[derive(Debug, Clone)]
pub struct ComponentBatch {
    descriptor: ComponentDescriptor,
    array: ArrayRef,
}

impl ComponentBatch {
    pub fn new(descriptor: ComponentDescriptor, array: ArrayRef) -> ComponentBatch {
        ComponentBatch { descriptor, array }
    }

    /// A zero-length batch of the given data type.
    pub fn empty(descriptor: ComponentDescriptor, data_type: &DataType) -> ComponentBatch {
        ComponentBatch {
            descriptor,
            array: arrow_array::new_empty_array(data_type),
        }
    }

    /// The zero-length marker batch tagging an archetype.
    pub fn indicator(descriptor: ComponentDescriptor) -> ComponentBatch {
        ComponentBatch::empty(descriptor, &datatypes::indicator())
    }

    pub fn descriptor(&self) -> &ComponentDescriptor {
        &self.descriptor
    }

    pub fn array(&self) -> &ArrayRef {
        &self.array
    }

    pub fn into_array(self) -> ArrayRef {
        self.array
    }

    pub fn data_type(&self) -> &DataType {
        self.array.data_type()
    }

    pub fn len(&self) -> usize {
        self.array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// Splits the batch into consecutive sub-batches of the given lengths.
    ///
    /// See [`ComponentColumn::from_batch`].
    pub fn partitioned(&self, lengths: &[usize]) -> Result<ComponentColumn> {
        ComponentColumn::from_batch(self, lengths)
    }
}

impl PartialEq for ComponentBatch {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor && self.array.as_ref() == other.array.as_ref()
    }
}
