//! Partitioned component columns.

use std::sync::Arc;

use arche_common::{Result, error::Error, verify_arg};
use arche_components::{ComponentDescriptor, datatypes};
use arrow_array::{Array, ArrayRef, ListArray};
use arrow_buffer::OffsetBuffer;
use arrow_schema::{DataType, Field};

use crate::batch::ComponentBatch;

/// A component batch split into consecutive sub-batches, one per row.
///
/// The sub-batches are stored as an Arrow `ListArray`: the list offsets
/// encode the partition lengths, and the child array holds the batch values
/// unchanged. Regrouping rows only rebuilds the offsets.
#[derive(Debug, Clone)]
pub struct ComponentColumn {
    descriptor: ComponentDescriptor,
    list: ListArray,
}

impl ComponentColumn {
    /// Splits `batch` into consecutive sub-batches whose lengths are given by
    /// `lengths`.
    ///
    /// An empty batch (an explicitly cleared field, or an indicator) yields
    /// one zero-length sub-batch per entry of `lengths`. Otherwise the
    /// lengths must add up to the batch length.
    pub fn from_batch(batch: &ComponentBatch, lengths: &[usize]) -> Result<ComponentColumn> {
        if batch.is_empty() {
            return Self::from_parts(
                *batch.descriptor(),
                batch.array().clone(),
                std::iter::repeat_n(0, lengths.len()),
            );
        }
        let total = checked_total(lengths.iter().copied())?;
        if total != batch.len() {
            return Err(Error::length_mismatch(
                batch.descriptor().to_string(),
                total,
                batch.len(),
            ));
        }
        Self::from_parts(
            *batch.descriptor(),
            batch.array().clone(),
            lengths.iter().copied(),
        )
    }

    /// An indicator column of `num_rows` zero-length entries.
    pub fn indicator(descriptor: ComponentDescriptor, num_rows: usize) -> ComponentColumn {
        let list = ListArray::new(
            list_item_field(&datatypes::indicator()),
            OffsetBuffer::new_zeroed(num_rows),
            arrow_array::new_empty_array(&datatypes::indicator()),
            None,
        );
        ComponentColumn { descriptor, list }
    }

    fn from_parts(
        descriptor: ComponentDescriptor,
        values: ArrayRef,
        lengths: impl Iterator<Item = usize> + Clone,
    ) -> Result<ComponentColumn> {
        let total = checked_total(lengths.clone())?;
        verify_arg!(lengths, total <= i32::MAX as usize);
        let offsets = OffsetBuffer::<i32>::from_lengths(lengths);
        let list = ListArray::try_new(list_item_field(values.data_type()), offsets, values, None)
            .map_err(|e| Error::arrow(format!("partition {descriptor}"), e))?;
        Ok(ComponentColumn { descriptor, list })
    }

    pub fn descriptor(&self) -> &ComponentDescriptor {
        &self.descriptor
    }

    pub fn list_array(&self) -> &ListArray {
        &self.list
    }

    pub fn into_list_array(self) -> ListArray {
        self.list
    }

    /// Data type of the sub-batch values.
    pub fn value_type(&self) -> DataType {
        self.list.value_type()
    }

    /// Number of sub-batches (rows).
    pub fn num_rows(&self) -> usize {
        self.list.len()
    }

    /// Total number of values across all sub-batches.
    pub fn total_len(&self) -> usize {
        let offsets = self.list.value_offsets();
        match (offsets.first(), offsets.last()) {
            (Some(&first), Some(&last)) => (last - first) as usize,
            _ => 0,
        }
    }

    /// Length of every sub-batch.
    pub fn lengths(&self) -> Vec<usize> {
        self.list.offsets().lengths().collect()
    }

    pub fn sub_batch(&self, row: usize) -> ArrayRef {
        self.list.value(row)
    }

    pub fn sub_batches(&self) -> impl Iterator<Item = ArrayRef> + '_ {
        (0..self.num_rows()).map(|row| self.sub_batch(row))
    }

    /// All values in row order; this is the batch the column was partitioned
    /// from.
    pub fn flatten(&self) -> ArrayRef {
        let offsets = self.list.value_offsets();
        let start = offsets.first().copied().unwrap_or(0) as usize;
        self.list.values().slice(start, self.total_len())
    }

    /// Regroups the values into sub-batches of the given lengths.
    ///
    /// Columns without values (indicators, cleared fields) accept any lengths
    /// and produce one zero-length entry per row. Otherwise the lengths must
    /// add up to [`ComponentColumn::total_len`].
    pub fn repartitioned(&self, lengths: &[usize]) -> Result<ComponentColumn> {
        let batch = ComponentBatch::new(self.descriptor, self.flatten());
        Self::from_batch(&batch, lengths)
    }
}

fn checked_total(mut lengths: impl Iterator<Item = usize>) -> Result<usize> {
    lengths
        .try_fold(0usize, |acc, len| acc.checked_add(len))
        .ok_or_else(|| Error::invalid_arg("lengths", "partition lengths overflow usize"))
}

fn list_item_field(data_type: &DataType) -> Arc<Field> {
    Arc::new(Field::new("item", data_type.clone(), true))
}
