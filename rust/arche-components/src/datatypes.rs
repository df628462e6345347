//! Arrow data types of the semantic components, and the value types that do
//! not map onto a single Arrow primitive.

use std::sync::Arc;

use arrow_array::{ArrayRef, StructArray, UInt8Array, UInt32Array};
use arrow_schema::{DataType, Field, Fields};
use serde::{Deserialize, Serialize};

pub fn float64() -> DataType {
    DataType::Float64
}

pub fn float32() -> DataType {
    DataType::Float32
}

pub fn utf8() -> DataType {
    DataType::Utf8
}

/// A blob is an opaque byte buffer; one element per blob.
pub fn blob() -> DataType {
    DataType::Binary
}

/// Element field of a three-component float vector.
pub fn vec3d_item_field() -> Arc<Field> {
    Arc::new(Field::new("item", DataType::Float32, false))
}

pub fn vec3d() -> DataType {
    DataType::FixedSizeList(vec3d_item_field(), 3)
}

pub fn image_format_fields() -> Fields {
    Fields::from(vec![
        Field::new("width", DataType::UInt32, false),
        Field::new("height", DataType::UInt32, false),
        Field::new("color_model", DataType::UInt8, true),
        Field::new("channel_datatype", DataType::UInt8, true),
    ])
}

pub fn image_format() -> DataType {
    DataType::Struct(image_format_fields())
}

/// The data type of indicator batches. Indicators carry no values.
pub fn indicator() -> DataType {
    DataType::Null
}

/// Element type of an image channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelDatatype {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F16,
    F32,
    F64,
}

impl ChannelDatatype {
    /// Stable wire code of the channel datatype.
    pub fn code(self) -> u8 {
        match self {
            ChannelDatatype::U8 => 6,
            ChannelDatatype::I8 => 7,
            ChannelDatatype::U16 => 8,
            ChannelDatatype::I16 => 9,
            ChannelDatatype::U32 => 10,
            ChannelDatatype::I32 => 11,
            ChannelDatatype::U64 => 12,
            ChannelDatatype::I64 => 13,
            ChannelDatatype::F16 => 33,
            ChannelDatatype::F32 => 34,
            ChannelDatatype::F64 => 35,
        }
    }

    pub fn bytes_per_element(self) -> usize {
        match self {
            ChannelDatatype::U8 | ChannelDatatype::I8 => 1,
            ChannelDatatype::U16 | ChannelDatatype::I16 | ChannelDatatype::F16 => 2,
            ChannelDatatype::U32 | ChannelDatatype::I32 | ChannelDatatype::F32 => 4,
            ChannelDatatype::U64 | ChannelDatatype::I64 | ChannelDatatype::F64 => 8,
        }
    }
}

/// Interpretation of the channels of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorModel {
    L,
    #[serde(rename = "RGB")]
    Rgb,
    #[serde(rename = "RGBA")]
    Rgba,
    #[serde(rename = "BGR")]
    Bgr,
    #[serde(rename = "BGRA")]
    Bgra,
}

impl ColorModel {
    pub fn code(self) -> u8 {
        match self {
            ColorModel::L => 1,
            ColorModel::Rgb => 2,
            ColorModel::Rgba => 3,
            ColorModel::Bgr => 4,
            ColorModel::Bgra => 5,
        }
    }

    pub fn num_channels(self) -> usize {
        match self {
            ColorModel::L => 1,
            ColorModel::Rgb | ColorModel::Bgr => 3,
            ColorModel::Rgba | ColorModel::Bgra => 4,
        }
    }
}

/// Size and element layout of an image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageFormat {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub color_model: Option<ColorModel>,
    #[serde(default)]
    pub channel_datatype: Option<ChannelDatatype>,
}

impl ImageFormat {
    /// Format of a single-channel image of class ids.
    pub fn segmentation(width: u32, height: u32, datatype: ChannelDatatype) -> ImageFormat {
        ImageFormat {
            width,
            height,
            color_model: None,
            channel_datatype: Some(datatype),
        }
    }

    /// Expected size of the image buffer in bytes, if the layout is known.
    pub fn num_bytes(&self) -> Option<usize> {
        let datatype = self.channel_datatype?;
        let channels = self.color_model.map_or(1, ColorModel::num_channels);
        Some(self.width as usize * self.height as usize * channels * datatype.bytes_per_element())
    }
}

/// Builds the struct array holding `formats`, one element per format.
pub fn image_format_array(formats: &[ImageFormat]) -> ArrayRef {
    let width = UInt32Array::from_iter_values(formats.iter().map(|f| f.width));
    let height = UInt32Array::from_iter_values(formats.iter().map(|f| f.height));
    let color_model: UInt8Array = formats
        .iter()
        .map(|f| f.color_model.map(ColorModel::code))
        .collect();
    let channel_datatype: UInt8Array = formats
        .iter()
        .map(|f| f.channel_datatype.map(ChannelDatatype::code))
        .collect();
    Arc::new(StructArray::new(
        image_format_fields(),
        vec![
            Arc::new(width),
            Arc::new(height),
            Arc::new(color_model),
            Arc::new(channel_datatype),
        ],
        None,
    ))
}

#[cfg(test)]
mod tests {
    use arrow_array::{Array, cast::AsArray, types::UInt32Type};

    use super::*;

    #[test]
    fn test_image_format_json() {
        let format: ImageFormat = serde_json::from_str(
            r#"{"width": 4, "height": 2, "color_model": "RGB", "channel_datatype": "U16"}"#,
        )
        .unwrap();
        assert_eq!(format.color_model, Some(ColorModel::Rgb));
        assert_eq!(format.num_bytes(), Some(4 * 2 * 3 * 2));

        let err = serde_json::from_str::<ImageFormat>(r#"{"width": 4, "height": 2, "depth": 1}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_image_format_array() {
        let array = image_format_array(&[
            ImageFormat::segmentation(3, 2, ChannelDatatype::U8),
            ImageFormat {
                width: 5,
                height: 5,
                color_model: Some(ColorModel::L),
                channel_datatype: None,
            },
        ]);
        assert_eq!(array.data_type(), &image_format());
        let array = array.as_struct();
        assert_eq!(array.len(), 2);
        let width = array.column(0).as_primitive::<UInt32Type>();
        assert_eq!(width.values(), &[3, 5]);
        assert!(array.column(3).is_null(1));
        assert!(array.column(2).is_null(0));
    }
}
