//! Stable identifiers for component batches.

use std::fmt;

use serde::Serialize;

/// Identifies a component batch within the wire/storage format.
///
/// A descriptor is the triple `(archetype, field, component)`. The archetype
/// and field are absent for bare components that are not part of an
/// archetype; an indicator has an archetype but no field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ComponentDescriptor {
    /// Fully qualified archetype name, e.g. `arche.archetypes.Scalar`.
    pub archetype: Option<&'static str>,
    /// Name of the archetype field the batch was produced for.
    pub field: Option<&'static str>,
    /// Fully qualified component name, e.g. `arche.components.Scalar`.
    pub component: &'static str,
}

impl ComponentDescriptor {
    /// Descriptor of a component that does not belong to an archetype.
    pub const fn new(component: &'static str) -> ComponentDescriptor {
        ComponentDescriptor {
            archetype: None,
            field: None,
            component,
        }
    }

    /// Descriptor of an archetype field.
    pub const fn for_field(
        archetype: &'static str,
        field: &'static str,
        component: &'static str,
    ) -> ComponentDescriptor {
        ComponentDescriptor {
            archetype: Some(archetype),
            field: Some(field),
            component,
        }
    }

    /// Descriptor of the indicator of an archetype.
    pub const fn for_indicator(
        archetype: &'static str,
        component: &'static str,
    ) -> ComponentDescriptor {
        ComponentDescriptor {
            archetype: Some(archetype),
            field: None,
            component,
        }
    }

    /// Returns `true` if this descriptor tags an archetype rather than a field.
    pub fn is_indicator(&self) -> bool {
        self.archetype.is_some() && self.field.is_none()
    }

    /// Archetype name without its namespace (`Scalar` for `arche.archetypes.Scalar`).
    pub fn archetype_short_name(&self) -> Option<&'static str> {
        self.archetype
            .map(|name| name.rsplit('.').next().unwrap_or(name))
    }
}

impl fmt::Display for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.archetype, self.field) {
            (Some(archetype), Some(field)) => {
                write!(f, "{archetype}:{field}#{}", self.component)
            }
            (Some(archetype), None) => write!(f, "{archetype}#{}", self.component),
            (None, Some(field)) => write!(f, "{field}#{}", self.component),
            (None, None) => f.write_str(self.component),
        }
    }
}
