//! Concrete archetypes.
//!
//! Each module holds the static [`ArchetypeSpec`](arche_bundle::ArchetypeSpec)
//! of one archetype as `SPEC`, its `Fields` struct and the typed wrapper.

pub mod capsules3d;
pub mod scalar;
pub mod segmentation_image;
pub mod space_view_contents;

pub use capsules3d::{Capsules3D, Capsules3DFields};
pub use scalar::{Scalar, ScalarFields};
pub use segmentation_image::{SegmentationImage, SegmentationImageFields};
pub use space_view_contents::{SpaceViewContents, SpaceViewContentsFields};
