//! Static table of semantic component types.

use arche_common::{Result, error::Error};
use arrow_array::{Array, ArrayRef};
use arrow_schema::DataType;

use crate::convert::{self, ConvertFn};
use crate::datatypes;
use crate::input::FieldInput;

/// A semantic component type: a name, its canonical Arrow data type and the
/// converter that normalizes raw input into it.
#[derive(Debug)]
pub struct ComponentType {
    pub name: &'static str,
    pub data_type: fn() -> DataType,
    pub converter: ConvertFn,
}

impl ComponentType {
    /// Converts `input` into an array of this component's data type.
    ///
    /// The converter output is verified against [`ComponentType::data_type`],
    /// so a misbehaving converter surfaces as a conversion error rather than
    /// as a mistyped batch.
    pub fn convert(&self, input: &FieldInput) -> Result<ArrayRef> {
        let array = (self.converter)(input)?;
        let expected = (self.data_type)();
        if array.data_type() != &expected {
            return Err(Error::conversion(
                self.name,
                format!(
                    "converter produced {}, expected {expected}",
                    array.data_type()
                ),
            ));
        }
        Ok(array)
    }

    /// A zero-length array of this component's data type.
    pub fn empty_array(&self) -> ArrayRef {
        arrow_array::new_empty_array(&(self.data_type)())
    }
}

/// A double-precision scalar, e.g. a time-series sample.
pub static SCALAR: ComponentType = ComponentType {
    name: "arche.components.Scalar",
    data_type: datatypes::float64,
    converter: convert::float64,
};

/// Opacity of a layer, `0.0` (transparent) to `1.0` (opaque).
pub static OPACITY: ComponentType = ComponentType {
    name: "arche.components.Opacity",
    data_type: datatypes::float32,
    converter: convert::float32,
};

/// 2D drawing order; higher values are drawn on top.
pub static DRAW_ORDER: ComponentType = ComponentType {
    name: "arche.components.DrawOrder",
    data_type: datatypes::float32,
    converter: convert::float32,
};

pub static RADIUS: ComponentType = ComponentType {
    name: "arche.components.Radius",
    data_type: datatypes::float32,
    converter: convert::float32,
};

pub static LENGTH: ComponentType = ComponentType {
    name: "arche.components.Length",
    data_type: datatypes::float32,
    converter: convert::float32,
};

/// Raw bytes of an image.
pub static IMAGE_BUFFER: ComponentType = ComponentType {
    name: "arche.components.ImageBuffer",
    data_type: datatypes::blob,
    converter: convert::blob,
};

pub static IMAGE_FORMAT: ComponentType = ComponentType {
    name: "arche.components.ImageFormat",
    data_type: datatypes::image_format,
    converter: convert::image_format,
};

pub static TRANSLATION3D: ComponentType = ComponentType {
    name: "arche.components.Translation3D",
    data_type: datatypes::vec3d,
    converter: convert::vec3d,
};

/// An entity query expression, one rule per element.
pub static QUERY_EXPRESSION: ComponentType = ComponentType {
    name: "arche.components.QueryExpression",
    data_type: datatypes::utf8,
    converter: convert::utf8,
};

/// All known component types.
pub fn all() -> [&'static ComponentType; 9] {
    [
        &SCALAR,
        &OPACITY,
        &DRAW_ORDER,
        &RADIUS,
        &LENGTH,
        &IMAGE_BUFFER,
        &IMAGE_FORMAT,
        &TRANSLATION3D,
        &QUERY_EXPRESSION,
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use arrow_array::Array;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_component_names_unique() {
        let names: HashSet<_> = all().iter().map(|c| c.name).collect();
        assert_eq!(names.len(), all().len());
    }

    #[test]
    fn test_empty_array_matches_data_type() {
        for component in all() {
            let empty = component.empty_array();
            assert_eq!(empty.len(), 0);
            assert_eq!(empty.data_type(), &(component.data_type)());
        }
    }

    #[test]
    fn test_convert_checks_output_type() {
        fn broken(_: &FieldInput) -> Result<ArrayRef> {
            convert::utf8(&json!("not a float").into())
        }
        let component = ComponentType {
            name: "test.components.Broken",
            data_type: datatypes::float64,
            converter: broken,
        };
        let err = component.convert(&json!(1.0).into()).unwrap_err();
        assert!(err.is_conversion());

        let array = SCALAR.convert(&json!([1.0, 2.0]).into()).unwrap();
        assert_eq!(array.len(), 2);
    }
}
