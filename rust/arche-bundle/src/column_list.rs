//! Column-oriented component bundles for bulk ingestion.

use arche_common::Result;
use arche_components::ComponentDescriptor;

use crate::{batch::ComponentBatch, column::ComponentColumn, instance::ArchetypeInstance};

/// An ordered list of partitioned columns: the archetype indicator first,
/// then one column per set field in declaration order.
///
/// All columns have the same number of rows, which is what a bulk ingestion
/// call pairs with its index (e.g. a time sequence).
#[derive(Debug, Clone, Default)]
pub struct ComponentColumnList(Vec<ComponentColumn>);

impl ComponentColumnList {
    pub fn new(columns: Vec<ComponentColumn>) -> ComponentColumnList {
        ComponentColumnList(columns)
    }

    /// Partitions every set field of `instance` into unit-length sub-batches.
    ///
    /// The row count is the length of the first non-empty set batch. Cleared
    /// fields and the indicator get one zero-length entry per row. An
    /// instance with no set fields yields an empty list.
    ///
    /// All non-empty set batches must have the same length; a mismatch is
    /// reported as [`ErrorKind::LengthMismatch`].
    ///
    /// [`ErrorKind::LengthMismatch`]: arche_common::error::ErrorKind::LengthMismatch
    pub fn from_instance(instance: &ArchetypeInstance) -> Result<ComponentColumnList> {
        let batches: Vec<&ComponentBatch> = instance.set_batches().collect();
        if batches.is_empty() {
            return Ok(ComponentColumnList::default());
        }
        let num_rows = batches
            .iter()
            .map(|batch| batch.len())
            .find(|&len| len > 0)
            .unwrap_or(0);
        Self::assemble(instance, &batches, &vec![1; num_rows])
    }

    /// Partitions every set field of `instance` with the given lengths.
    ///
    /// The lengths must add up to the length of every non-empty set batch.
    pub fn from_instance_partitioned(
        instance: &ArchetypeInstance,
        lengths: &[usize],
    ) -> Result<ComponentColumnList> {
        let batches: Vec<&ComponentBatch> = instance.set_batches().collect();
        if batches.is_empty() {
            return Ok(ComponentColumnList::default());
        }
        Self::assemble(instance, &batches, lengths)
    }

    fn assemble(
        instance: &ArchetypeInstance,
        batches: &[&ComponentBatch],
        lengths: &[usize],
    ) -> Result<ComponentColumnList> {
        let spec = instance.spec();
        let mut columns = Vec::with_capacity(batches.len() + 1);
        columns.push(ComponentColumn::indicator(
            spec.indicator_descriptor(),
            lengths.len(),
        ));
        for batch in batches {
            columns.push(batch.partitioned(lengths)?);
        }
        log::debug!(
            "{}: partitioned {} columns into {} rows",
            spec.short_name(),
            columns.len(),
            lengths.len()
        );
        Ok(ComponentColumnList(columns))
    }

    /// Regroups the rows of every column without touching the values.
    ///
    /// The lengths must add up to the total length of every column that has
    /// values; indicator and cleared columns take one zero-length entry per
    /// new row.
    pub fn repartitioned(&self, lengths: &[usize]) -> Result<ComponentColumnList> {
        let columns = self
            .0
            .iter()
            .map(|column| column.repartitioned(lengths))
            .collect::<Result<Vec<_>>>()?;
        Ok(ComponentColumnList(columns))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of rows shared by all columns; zero for an empty list.
    pub fn num_rows(&self) -> usize {
        self.0.first().map_or(0, ComponentColumn::num_rows)
    }

    pub fn columns(&self) -> &[ComponentColumn] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComponentColumn> {
        self.0.iter()
    }

    pub fn get(&self, descriptor: &ComponentDescriptor) -> Option<&ComponentColumn> {
        self.0.iter().find(|column| column.descriptor() == descriptor)
    }

    /// The column of the archetype field named `field`.
    pub fn field(&self, field: &str) -> Option<&ComponentColumn> {
        self.0
            .iter()
            .find(|column| column.descriptor().field == Some(field))
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &ComponentDescriptor> + '_ {
        self.0.iter().map(ComponentColumn::descriptor)
    }

    pub fn into_inner(self) -> Vec<ComponentColumn> {
        self.0
    }
}

impl IntoIterator for ComponentColumnList {
    type Item = ComponentColumn;
    type IntoIter = std::vec::IntoIter<ComponentColumn>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ComponentColumnList {
    type Item = &'a ComponentColumn;
    type IntoIter = std::slice::Iter<'a, ComponentColumn>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
