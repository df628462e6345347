use crate::batch::ComponentBatch;

/// State of one archetype field.
///
/// `Unset` and `Cleared` are deliberately distinct: an unset field is not
/// part of the record at all, while a cleared field is logged as an empty
/// batch and erases whatever value was previously stored.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldSlot {
    #[default]
    Unset,
    /// Explicitly empty. The batch is always zero-length.
    Cleared(ComponentBatch),
    /// Holds a non-empty batch.
    Present(ComponentBatch),
}

impl FieldSlot {
    /// Wraps a converted batch; an empty batch becomes [`FieldSlot::Cleared`].
    pub fn from_batch(batch: ComponentBatch) -> FieldSlot {
        if batch.is_empty() {
            FieldSlot::Cleared(batch)
        } else {
            FieldSlot::Present(batch)
        }
    }

    /// The batch to emit for this field, if any.
    pub fn batch(&self) -> Option<&ComponentBatch> {
        match self {
            FieldSlot::Unset => None,
            FieldSlot::Cleared(batch) | FieldSlot::Present(batch) => Some(batch),
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, FieldSlot::Unset)
    }

    pub fn is_cleared(&self) -> bool {
        matches!(self, FieldSlot::Cleared(_))
    }

    pub fn is_present(&self) -> bool {
        matches!(self, FieldSlot::Present(_))
    }
}
