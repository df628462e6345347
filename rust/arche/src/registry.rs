//! Lookup of archetype definitions by name.

use arche_bundle::ArchetypeSpec;

use crate::archetypes::{capsules3d, scalar, segmentation_image, space_view_contents};

static REGISTRY: [&ArchetypeSpec; 4] = [
    &capsules3d::SPEC,
    &scalar::SPEC,
    &segmentation_image::SPEC,
    &space_view_contents::SPEC,
];

/// All known archetypes, ordered by full name.
pub fn registry() -> &'static [&'static ArchetypeSpec] {
    &REGISTRY
}

/// Resolves an archetype by its full name (`arche.archetypes.Scalar`) or its
/// short name (`Scalar`, case-insensitive).
pub fn find_archetype(name: &str) -> Option<&'static ArchetypeSpec> {
    REGISTRY
        .iter()
        .copied()
        .find(|spec| spec.name == name)
        .or_else(|| {
            REGISTRY
                .iter()
                .copied()
                .find(|spec| spec.short_name().eq_ignore_ascii_case(name))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_archetype() {
        assert_eq!(
            find_archetype("arche.archetypes.Scalar").map(|s| s.name),
            Some("arche.archetypes.Scalar")
        );
        assert_eq!(
            find_archetype("segmentationimage").map(|s| s.name),
            Some("arche.archetypes.SegmentationImage")
        );
        assert_eq!(
            find_archetype("SpaceViewContents").map(|s| s.name),
            Some("arche.blueprint.archetypes.SpaceViewContents")
        );
        assert!(find_archetype("Points3D").is_none());
    }

    #[test]
    fn test_registry_is_consistent() {
        let names: Vec<_> = registry().iter().map(|s| s.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);

        for spec in registry() {
            assert!(spec.indicator.ends_with("Indicator"));
            assert!(!spec.fields.is_empty());
            for (i, field) in spec.fields.iter().enumerate() {
                assert_eq!(spec.field_index(field.name), Some(i));
            }
        }
    }
}
