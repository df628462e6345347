use std::sync::Arc;

use arche::{
    Archetype, ArchetypeInstance, ComponentColumnList, Diagnostics, DiagnosticsConfig,
    FieldUpdate,
    archetypes::{Scalar, ScalarFields, SegmentationImage, SegmentationImageFields},
    bundle::diagnostics::CollectingSink,
    find_archetype, registry,
};
use serde_json::json;

fn collecting() -> (Arc<CollectingSink>, Diagnostics) {
    let sink = Arc::new(CollectingSink::new());
    let diagnostics = Diagnostics::with_sink(DiagnosticsConfig::default(), sink.clone());
    (sink, diagnostics)
}

#[test]
fn test_conversion_failure_reports_once_and_falls_back() {
    let (sink, diagnostics) = collecting();
    let image = SegmentationImage::construct_with(
        SegmentationImageFields {
            buffer: Some(json!([1, 2, 3]).into()),
            format: Some(json!({"width": 3, "height": 1}).into()),
            opacity: Some(json!("half").into()),
            draw_order: None,
        },
        &diagnostics,
    );
    assert!(image.instance().is_unset());

    let reported = sink.diagnostics();
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].archetype, "SegmentationImage");
    assert_eq!(reported[0].field.as_deref(), Some("opacity"));
    assert_eq!(reported[0].value.as_deref(), Some("\"half\""));
}

#[test]
fn test_value_preview_is_truncated() {
    let sink = Arc::new(CollectingSink::new());
    let diagnostics = Diagnostics::with_sink(
        DiagnosticsConfig {
            value_preview_len: 10,
            ..Default::default()
        },
        sink.clone(),
    );
    let long = "x".repeat(100);
    Scalar::construct_with(
        ScalarFields {
            scalar: Some(json!(long).into()),
        },
        &diagnostics,
    );
    let preview = sink.diagnostics()[0].value.clone().unwrap();
    assert_eq!(preview.chars().count(), 13);
    assert!(preview.ends_with("..."));
}

#[test]
fn test_clear_versus_unset_updates() {
    let image = SegmentationImage::from_class_ids(2, 1, &[0, 1]).with_opacity(0.5);

    let cleared = image.with_updates(&FieldUpdate::new().clear_unset(true).reset("opacity"));
    assert!(cleared.opacity().unwrap().is_empty());
    assert!(cleared.buffer().is_some());

    let unset = image.with_updates(&FieldUpdate::new().reset("opacity"));
    assert!(unset.opacity().is_none());
    assert!(unset.buffer().is_some());

    // a cleared field produces a column of empty rows, an unset one none
    let cleared_columns = cleared.columns().unwrap();
    assert_eq!(cleared_columns.len(), 4);
    assert_eq!(cleared_columns.field("opacity").unwrap().lengths(), vec![0]);
    let unset_columns = unset.columns().unwrap();
    assert_eq!(unset_columns.len(), 3);
    assert!(unset_columns.field("opacity").is_none());
}

#[test]
fn test_from_fields_clears_every_missing_field() {
    let image = SegmentationImage::from_fields(
        true,
        SegmentationImageFields {
            opacity: Some(0.75f32.into()),
            ..Default::default()
        },
    );
    assert!(image.buffer().unwrap().is_empty());
    assert!(image.format().unwrap().is_empty());
    assert!(image.draw_order().unwrap().is_empty());
    assert_eq!(image.opacity().unwrap().len(), 1);

    let image = SegmentationImage::from_fields(false, SegmentationImageFields::default());
    assert!(image.instance().is_unset());
}

#[test]
fn test_dynamic_construction_through_registry() {
    for spec in registry() {
        let cleared = ArchetypeInstance::cleared(spec);
        let columns = ComponentColumnList::from_instance(&cleared).unwrap();
        assert_eq!(columns.len(), spec.fields.len() + 1);
    }

    let spec = find_archetype("Capsules3D").unwrap();
    let instance = ArchetypeInstance::try_construct(
        spec,
        [
            ("lengths", json!([1.0, 2.0])),
            ("radii", json!([0.5, 0.5])),
            ("translations", json!([[0, 0, 0], [1, 0, 0]])),
        ],
    )
    .unwrap();
    let columns = ComponentColumnList::from_instance(&instance).unwrap();
    assert_eq!(columns.num_rows(), 2);

    let err = ArchetypeInstance::try_construct(spec, [("colors", json!([1]))]).unwrap_err();
    assert!(err.is_conversion());
}
