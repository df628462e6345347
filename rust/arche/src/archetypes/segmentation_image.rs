//! An image of integer class ids.

use arche_bundle::{
    Archetype, ArchetypeFields, ArchetypeInstance, ArchetypeSpec, ComponentBatch, Diagnostics,
    FieldSpec, FieldUpdate,
};
use arche_common::{Result, error::Error};
use arche_components::{
    FieldInput, component_type,
    datatypes::{ChannelDatatype, ImageFormat},
};

pub static SPEC: ArchetypeSpec = ArchetypeSpec {
    name: "arche.archetypes.SegmentationImage",
    indicator: "arche.components.SegmentationImageIndicator",
    doc: "An image made up of integer class ids. Each pixel is mapped to a color \
          through the annotation context.",
    fields: &[
        FieldSpec {
            name: "buffer",
            component: &component_type::IMAGE_BUFFER,
            doc: "The raw image data.",
        },
        FieldSpec {
            name: "format",
            component: &component_type::IMAGE_FORMAT,
            doc: "The format of the image.",
        },
        FieldSpec {
            name: "opacity",
            component: &component_type::OPACITY,
            doc: "Opacity of the image, useful for layering it on top of another image.",
        },
        FieldSpec {
            name: "draw_order",
            component: &component_type::DRAW_ORDER,
            doc: "2D drawing order. Higher values are drawn on top of lower ones.",
        },
    ],
};

#[derive(Debug, Clone, Default)]
pub struct SegmentationImageFields {
    pub buffer: Option<FieldInput>,
    pub format: Option<FieldInput>,
    pub opacity: Option<FieldInput>,
    pub draw_order: Option<FieldInput>,
}

impl ArchetypeFields for SegmentationImageFields {
    fn into_entries(self) -> Vec<(&'static str, Option<FieldInput>)> {
        vec![
            ("buffer", self.buffer),
            ("format", self.format),
            ("opacity", self.opacity),
            ("draw_order", self.draw_order),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationImage(ArchetypeInstance);

impl SegmentationImage {
    pub fn new(buffer: impl Into<FieldInput>, format: impl Into<FieldInput>) -> SegmentationImage {
        SegmentationImage::construct(SegmentationImageFields {
            buffer: Some(buffer.into()),
            format: Some(format.into()),
            ..Default::default()
        })
    }

    /// A `width` x `height` image of `u16` class ids in row-major order.
    ///
    /// A pixel count that does not match the dimensions is reported against
    /// the `buffer` field and yields the unset image.
    pub fn from_class_ids(width: u32, height: u32, class_ids: &[u16]) -> SegmentationImage {
        Self::from_class_ids_with(width, height, class_ids, Diagnostics::global())
    }

    pub fn from_class_ids_with(
        width: u32,
        height: u32,
        class_ids: &[u16],
        diagnostics: &Diagnostics,
    ) -> SegmentationImage {
        match Self::try_from_class_ids(width, height, class_ids) {
            Ok(image) => image,
            Err(error) => {
                diagnostics.report_error(SPEC.short_name(), &error, None);
                Self::from_instance(ArchetypeInstance::unset(&SPEC))
            }
        }
    }

    pub fn try_from_class_ids(
        width: u32,
        height: u32,
        class_ids: &[u16],
    ) -> Result<SegmentationImage> {
        let num_pixels = width as usize * height as usize;
        if class_ids.len() != num_pixels {
            return Err(Error::in_field(
                SPEC.short_name(),
                "buffer",
                Error::length_mismatch(
                    format!("{width}x{height} class ids"),
                    num_pixels,
                    class_ids.len(),
                ),
            ));
        }
        let buffer: Vec<u8> = class_ids.iter().flat_map(|id| id.to_le_bytes()).collect();
        let format = ImageFormat::segmentation(width, height, ChannelDatatype::U16);
        SegmentationImage::try_construct(SegmentationImageFields {
            buffer: Some(buffer.into()),
            format: Some(format.into()),
            ..Default::default()
        })
    }

    pub fn with_opacity(&self, opacity: f32) -> SegmentationImage {
        self.with_updates(&FieldUpdate::new().set("opacity", opacity))
    }

    pub fn with_draw_order(&self, draw_order: f32) -> SegmentationImage {
        self.with_updates(&FieldUpdate::new().set("draw_order", draw_order))
    }

    pub fn buffer(&self) -> Option<&ComponentBatch> {
        self.0.batch("buffer")
    }

    pub fn format(&self) -> Option<&ComponentBatch> {
        self.0.batch("format")
    }

    pub fn opacity(&self) -> Option<&ComponentBatch> {
        self.0.batch("opacity")
    }

    pub fn draw_order(&self) -> Option<&ComponentBatch> {
        self.0.batch("draw_order")
    }
}

impl Archetype for SegmentationImage {
    type Fields = SegmentationImageFields;

    fn spec() -> &'static ArchetypeSpec {
        &SPEC
    }

    fn from_instance(instance: ArchetypeInstance) -> Self {
        SegmentationImage(instance)
    }

    fn instance(&self) -> &ArchetypeInstance {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arche_bundle::{DiagnosticsConfig, diagnostics::CollectingSink};
    use arche_common::error::ErrorKind;
    use arche_testkit::data_gen::random_class_ids;
    use arrow_array::{
        Array,
        cast::AsArray,
        types::{UInt8Type, UInt32Type},
    };
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_class_ids() {
        let ids = random_class_ids(4, 3, 8);
        let image = SegmentationImage::try_from_class_ids(4, 3, &ids).unwrap();

        let buffer = image.buffer().unwrap();
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.array().as_binary::<i32>().value(0).len(), 4 * 3 * 2);

        let format = image.format().unwrap().array().as_struct().clone();
        assert_eq!(format.column(0).as_primitive::<UInt32Type>().value(0), 4);
        assert_eq!(format.column(1).as_primitive::<UInt32Type>().value(0), 3);
        assert_eq!(
            format.column(3).as_primitive::<UInt8Type>().value(0),
            ChannelDatatype::U16.code()
        );
        assert!(format.column(2).is_null(0));

        assert!(image.opacity().is_none());
        assert_eq!(image.num_instances(), 1);
    }

    #[test]
    fn test_pixel_count_mismatch() {
        let err = SegmentationImage::try_from_class_ids(2, 2, &[1, 2, 3]).unwrap_err();
        assert_eq!(err.field_name(), Some("buffer"));
        let ErrorKind::Field { source, .. } = err.kind() else {
            panic!("unexpected error: {err}");
        };
        assert!(matches!(
            source.kind(),
            ErrorKind::LengthMismatch {
                expected: 4,
                actual: 3,
                ..
            }
        ));

        let sink = Arc::new(CollectingSink::new());
        let diagnostics = Diagnostics::with_sink(DiagnosticsConfig::default(), sink.clone());
        let image = SegmentationImage::from_class_ids_with(2, 2, &[1, 2, 3], &diagnostics);
        assert!(image.instance().is_unset());

        let reported = sink.diagnostics();
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].archetype, "SegmentationImage");
        assert_eq!(reported[0].field.as_deref(), Some("buffer"));
    }

    #[test]
    fn test_new_from_json_and_builders() {
        let image = SegmentationImage::new(
            json!([0, 1, 1, 0]),
            json!({"width": 2, "height": 2, "channel_datatype": "U8"}),
        )
        .with_opacity(0.5)
        .with_draw_order(2.0);
        assert!(image.buffer().is_some());
        assert!(image.opacity().is_some());
        assert!(image.draw_order().is_some());

        let batches = image.as_component_batches();
        let fields: Vec<_> = batches.iter().map(|b| b.descriptor().field).collect();
        assert_eq!(
            fields,
            vec![
                None,
                Some("buffer"),
                Some("format"),
                Some("opacity"),
                Some("draw_order")
            ]
        );
    }

    #[test]
    fn test_bad_format_rejected() {
        let image = SegmentationImage::new(json!([0, 1]), json!({"width": 2, "depth": 1}));
        assert!(image.instance().is_unset());
    }
}
