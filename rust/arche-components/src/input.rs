//! Raw, not yet validated field input.

use std::sync::Arc;

use arrow_array::{
    Array, ArrayRef, BinaryArray, FixedSizeListArray, Float32Array, Float64Array, Int64Array,
    StringArray, UInt16Array,
};
use serde_json::Value;

use crate::datatypes::{self, ImageFormat};

/// A raw value supplied for an archetype field.
///
/// Converters accept either a JSON value (numbers, strings, arrays and
/// objects, the way a dynamic caller or a file would supply them) or an
/// Arrow array, which is cast to the component's data type when compatible.
#[derive(Debug, Clone)]
pub enum FieldInput {
    Json(Value),
    Arrow(ArrayRef),
}

impl FieldInput {
    /// Short human-readable rendering of the value, used in diagnostics.
    ///
    /// JSON values are printed and truncated to `max_chars` characters, Arrow
    /// arrays are summarized by type and length.
    pub fn preview(&self, max_chars: usize) -> String {
        match self {
            FieldInput::Json(value) => {
                let text = value.to_string();
                if text.chars().count() <= max_chars {
                    text
                } else {
                    let mut truncated: String = text.chars().take(max_chars).collect();
                    truncated.push_str("...");
                    truncated
                }
            }
            FieldInput::Arrow(array) => {
                format!("<{} array of {} values>", array.data_type(), array.len())
            }
        }
    }
}

impl From<Value> for FieldInput {
    fn from(value: Value) -> Self {
        FieldInput::Json(value)
    }
}

impl From<ArrayRef> for FieldInput {
    fn from(array: ArrayRef) -> Self {
        FieldInput::Arrow(array)
    }
}

macro_rules! impl_from_primitive {
    ($($native:ty => $array:ty),* $(,)?) => {
        $(
            impl From<$native> for FieldInput {
                fn from(value: $native) -> Self {
                    FieldInput::Arrow(Arc::new(<$array>::from(vec![value])))
                }
            }

            impl From<Vec<$native>> for FieldInput {
                fn from(values: Vec<$native>) -> Self {
                    FieldInput::Arrow(Arc::new(<$array>::from(values)))
                }
            }

            impl From<&[$native]> for FieldInput {
                fn from(values: &[$native]) -> Self {
                    FieldInput::Arrow(Arc::new(<$array>::from(values.to_vec())))
                }
            }
        )*
    };
}

impl_from_primitive!(
    f64 => Float64Array,
    f32 => Float32Array,
    i64 => Int64Array,
    u16 => UInt16Array,
);

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        FieldInput::Arrow(Arc::new(StringArray::from(vec![value])))
    }
}

impl From<String> for FieldInput {
    fn from(value: String) -> Self {
        FieldInput::Arrow(Arc::new(StringArray::from(vec![value])))
    }
}

impl From<Vec<String>> for FieldInput {
    fn from(values: Vec<String>) -> Self {
        FieldInput::Arrow(Arc::new(StringArray::from(values)))
    }
}

/// A byte vector is a single blob.
impl From<Vec<u8>> for FieldInput {
    fn from(bytes: Vec<u8>) -> Self {
        FieldInput::Arrow(Arc::new(BinaryArray::from_iter_values([bytes])))
    }
}

impl From<[f32; 3]> for FieldInput {
    fn from(value: [f32; 3]) -> Self {
        FieldInput::from(vec![value])
    }
}

impl From<Vec<[f32; 3]>> for FieldInput {
    fn from(values: Vec<[f32; 3]>) -> Self {
        let flat = Float32Array::from_iter_values(values.iter().flatten().copied());
        FieldInput::Arrow(Arc::new(FixedSizeListArray::new(
            datatypes::vec3d_item_field(),
            3,
            Arc::new(flat),
            None,
        )))
    }
}

impl From<ImageFormat> for FieldInput {
    fn from(format: ImageFormat) -> Self {
        FieldInput::Arrow(datatypes::image_format_array(&[format]))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::FieldInput;

    #[test]
    fn test_preview_truncates_json() {
        let input = FieldInput::from(json!([1, 2, 3, 4, 5, 6]));
        assert_eq!(input.preview(64), "[1,2,3,4,5,6]");
        assert_eq!(input.preview(5), "[1,2,...");
    }

    #[test]
    fn test_preview_arrow() {
        let input = FieldInput::from(vec![1.0f64, 2.0]);
        assert_eq!(input.preview(64), "<Float64 array of 2 values>");
    }
}
