//! Converters from [`FieldInput`] to canonical Arrow arrays.
//!
//! Every converter is a pure function that either produces an array of the
//! component's data type or fails with [`ErrorKind::Conversion`]. Converters
//! never produce nulls: null elements in the input are rejected.
//!
//! [`ErrorKind::Conversion`]: arche_common::error::ErrorKind::Conversion

use std::sync::Arc;

use arche_common::{Result, error::Error};
use arrow_array::{
    Array, ArrayRef, BinaryArray, FixedSizeListArray, Float32Array, Float64Array, StringArray,
    cast::AsArray,
    types::{Float32Type, Float64Type, UInt8Type},
};
use arrow_cast::{CastOptions, cast_with_options};
use arrow_schema::DataType;
use serde::Deserialize;
use serde_json::{Number, Value};

use crate::datatypes::{self, ImageFormat};
use crate::input::FieldInput;

const FLOAT64: &str = "arche.datatypes.Float64";
const FLOAT32: &str = "arche.datatypes.Float32";
const UTF8: &str = "arche.datatypes.Utf8";
const BLOB: &str = "arche.datatypes.Blob";
const VEC3D: &str = "arche.datatypes.Vec3D";
const IMAGE_FORMAT: &str = "arche.datatypes.ImageFormat";

/// Signature shared by all converters.
pub type ConvertFn = fn(&FieldInput) -> Result<ArrayRef>;

pub fn float64(input: &FieldInput) -> Result<ArrayRef> {
    match input {
        FieldInput::Json(value) => {
            let values = json_numbers(FLOAT64, value)?;
            Ok(Arc::new(Float64Array::from(values)))
        }
        FieldInput::Arrow(array) => cast_numeric(FLOAT64, array, &DataType::Float64),
    }
}

pub fn float32(input: &FieldInput) -> Result<ArrayRef> {
    match input {
        FieldInput::Json(value) => {
            let values = json_numbers(FLOAT32, value)?
                .into_iter()
                .map(|v| narrow_f32(FLOAT32, v))
                .collect::<Result<Vec<_>>>()?;
            Ok(Arc::new(Float32Array::from(values)))
        }
        FieldInput::Arrow(array) => {
            if !array.data_type().is_numeric() {
                return Err(unsupported_type(FLOAT32, array.data_type()));
            }
            reject_nulls(FLOAT32, array)?;
            Ok(Arc::new(narrow_array_f32(FLOAT32, array)?))
        }
    }
}

pub fn utf8(input: &FieldInput) -> Result<ArrayRef> {
    match input {
        FieldInput::Json(Value::String(s)) => Ok(Arc::new(StringArray::from(vec![s.as_str()]))),
        FieldInput::Json(Value::Array(items)) => {
            let values = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.as_str()),
                    other => Err(unexpected(UTF8, "a string", other)),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Arc::new(StringArray::from(values)))
        }
        FieldInput::Json(other) => Err(unexpected(UTF8, "a string or an array of strings", other)),
        FieldInput::Arrow(array) => match array.data_type() {
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
                reject_nulls(UTF8, array)?;
                cast_checked(UTF8, array, &DataType::Utf8)
            }
            other => Err(unsupported_type(UTF8, other)),
        },
    }
}

/// Blobs: a flat array of bytes is one blob, an array of byte arrays is one
/// blob per element.
pub fn blob(input: &FieldInput) -> Result<ArrayRef> {
    match input {
        FieldInput::Json(Value::Array(items)) => {
            if !items.is_empty() && items.iter().all(Value::is_array) {
                let blobs = items
                    .iter()
                    .map(|item| match item {
                        Value::Array(bytes) => json_bytes(bytes),
                        other => Err(unexpected(BLOB, "an array of bytes", other)),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Arc::new(BinaryArray::from_iter_values(blobs)))
            } else if items.is_empty() {
                Ok(arrow_array::new_empty_array(&datatypes::blob()))
            } else {
                let bytes = json_bytes(items)?;
                Ok(Arc::new(BinaryArray::from_iter_values([bytes])))
            }
        }
        FieldInput::Json(other) => Err(unexpected(BLOB, "an array of bytes", other)),
        FieldInput::Arrow(array) => {
            reject_nulls(BLOB, array)?;
            match array.data_type() {
                DataType::Binary => Ok(array.clone()),
                DataType::LargeBinary | DataType::BinaryView => {
                    cast_checked(BLOB, array, &DataType::Binary)
                }
                DataType::UInt8 => {
                    let bytes = array.as_primitive::<UInt8Type>();
                    Ok(Arc::new(BinaryArray::from_iter_values([bytes
                        .values()
                        .as_ref()])))
                }
                other => Err(unsupported_type(BLOB, other)),
            }
        }
    }
}

/// Three-component float vectors: `[x, y, z]` is one vector, an array of
/// triples is one vector per element.
pub fn vec3d(input: &FieldInput) -> Result<ArrayRef> {
    match input {
        FieldInput::Json(Value::Array(items)) => {
            let mut flat = Vec::with_capacity(items.len() * 3);
            if !items.is_empty() && items.iter().all(Value::is_number) {
                push_triple(&mut flat, items)?;
            } else {
                for item in items {
                    match item {
                        Value::Array(components) => push_triple(&mut flat, components)?,
                        other => return Err(unexpected(VEC3D, "an array of 3 numbers", other)),
                    }
                }
            }
            Ok(Arc::new(FixedSizeListArray::new(
                datatypes::vec3d_item_field(),
                3,
                Arc::new(Float32Array::from(flat)),
                None,
            )))
        }
        FieldInput::Json(other) => Err(unexpected(VEC3D, "an array of 3 numbers", other)),
        FieldInput::Arrow(array) => {
            reject_nulls(VEC3D, array)?;
            match array.data_type() {
                DataType::FixedSizeList(item, 3) if item.data_type().is_numeric() => {
                    let values = array.as_fixed_size_list().values();
                    reject_nulls(VEC3D, values)?;
                    Ok(Arc::new(FixedSizeListArray::new(
                        datatypes::vec3d_item_field(),
                        3,
                        Arc::new(narrow_array_f32(VEC3D, values)?),
                        None,
                    )))
                }
                other => Err(unsupported_type(VEC3D, other)),
            }
        }
    }
}

/// Image formats: a JSON object is one format, an array of objects is one
/// format per element.
pub fn image_format(input: &FieldInput) -> Result<ArrayRef> {
    match input {
        FieldInput::Json(value @ Value::Object(_)) => {
            let format = parse_image_format(value)?;
            Ok(datatypes::image_format_array(&[format]))
        }
        FieldInput::Json(Value::Array(items)) => {
            let formats = items
                .iter()
                .map(parse_image_format)
                .collect::<Result<Vec<_>>>()?;
            Ok(datatypes::image_format_array(&formats))
        }
        FieldInput::Json(other) => Err(unexpected(IMAGE_FORMAT, "an image format object", other)),
        FieldInput::Arrow(array) => {
            if array.data_type() != &datatypes::image_format() {
                return Err(unsupported_type(IMAGE_FORMAT, array.data_type()));
            }
            reject_nulls(IMAGE_FORMAT, array)?;
            Ok(array.clone())
        }
    }
}

fn parse_image_format(value: &Value) -> Result<ImageFormat> {
    ImageFormat::deserialize(value).map_err(|e| Error::conversion(IMAGE_FORMAT, e.to_string()))
}

fn json_numbers(datatype: &str, value: &Value) -> Result<Vec<f64>> {
    match value {
        Value::Number(n) => Ok(vec![number_to_f64(datatype, n)?]),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Number(n) => number_to_f64(datatype, n),
                other => Err(unexpected(datatype, "a number", other)),
            })
            .collect(),
        other => Err(unexpected(datatype, "a number or an array of numbers", other)),
    }
}

fn number_to_f64(datatype: &str, n: &Number) -> Result<f64> {
    n.as_f64()
        .ok_or_else(|| Error::conversion(datatype, format!("{n} is not representable as f64")))
}

fn narrow_f32(datatype: &str, value: f64) -> Result<f32> {
    let narrowed = value as f32;
    if value.is_finite() && !narrowed.is_finite() {
        return Err(Error::conversion(
            datatype,
            format!("{value} is out of range for f32"),
        ));
    }
    Ok(narrowed)
}

/// Converts a null-free numeric array to `f32`, rejecting finite values
/// that do not fit.
fn narrow_array_f32(datatype: &str, array: &ArrayRef) -> Result<Float32Array> {
    if array.data_type() == &DataType::Float32 {
        return Ok(array.as_primitive::<Float32Type>().clone());
    }
    let wide = cast_checked(datatype, array, &DataType::Float64)?;
    wide.as_primitive::<Float64Type>()
        .values()
        .iter()
        .map(|&v| narrow_f32(datatype, v))
        .collect::<Result<Vec<_>>>()
        .map(Float32Array::from)
}

fn json_bytes(items: &[Value]) -> Result<Vec<u8>> {
    items
        .iter()
        .map(|item| {
            item.as_u64()
                .and_then(|b| u8::try_from(b).ok())
                .ok_or_else(|| unexpected(BLOB, "a byte (0..=255)", item))
        })
        .collect()
}

fn push_triple(flat: &mut Vec<f32>, components: &[Value]) -> Result<()> {
    if components.len() != 3 {
        return Err(Error::conversion(
            VEC3D,
            format!("expected 3 components, got {}", components.len()),
        ));
    }
    for component in components {
        let Value::Number(n) = component else {
            return Err(unexpected(VEC3D, "a number", component));
        };
        flat.push(narrow_f32(VEC3D, number_to_f64(VEC3D, n)?)?);
    }
    Ok(())
}

fn cast_numeric(datatype: &str, array: &ArrayRef, to_type: &DataType) -> Result<ArrayRef> {
    if !array.data_type().is_numeric() {
        return Err(unsupported_type(datatype, array.data_type()));
    }
    reject_nulls(datatype, array)?;
    cast_checked(datatype, array, to_type)
}

fn cast_checked(datatype: &str, array: &ArrayRef, to_type: &DataType) -> Result<ArrayRef> {
    if array.data_type() == to_type {
        return Ok(array.clone());
    }
    cast_with_options(
        array,
        to_type,
        &CastOptions {
            safe: false,
            format_options: Default::default(),
        },
    )
    .map_err(|e| Error::conversion(datatype, e.to_string()))
}

fn reject_nulls(datatype: &str, array: &ArrayRef) -> Result<()> {
    if array.logical_null_count() > 0 {
        return Err(Error::conversion(
            datatype,
            format!("input contains {} null values", array.logical_null_count()),
        ));
    }
    Ok(())
}

fn unexpected(datatype: &str, expected: &str, got: &Value) -> Error {
    Error::conversion(datatype, format!("expected {expected}, got {}", json_kind(got)))
}

fn unsupported_type(datatype: &str, data_type: &DataType) -> Error {
    Error::conversion(datatype, format!("unsupported Arrow type {data_type}"))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
