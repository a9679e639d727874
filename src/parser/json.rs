// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON bridge: binary-to-JSON and JSON-to-binary over the same schema
//! traversal as the flat walker.
//!
//! The JSON document is the bare message object; keys are exactly the
//! field names from the definition. Time and duration appear as
//! `{"secs", "nsecs"}` objects (`"sec"`/`"nanosec"` are accepted on
//! input). Missing members encode as zero values; shape disagreements are
//! typed errors.

use serde_json::Value;

use crate::core::{BuiltinType, CodecError, Result, RosTime, Variant};
use crate::encoding::json::JsonWriter;
use crate::encoding::traits::{Decoder, Encoder};
use crate::schema::{RosField, RosMessage, ARRAY_DYNAMIC};

use super::Parser;

impl Parser {
    /// Decode `buffer` into a JSON document.
    ///
    /// `indent == 0` produces compact output. With `ignore_constants` the
    /// constant fields of the definition are omitted; otherwise their
    /// literal values are emitted alongside the decoded fields.
    pub fn deserialize_into_json<'a>(
        &self,
        buffer: &'a [u8],
        decoder: &mut dyn Decoder<'a>,
        indent: usize,
        ignore_constants: bool,
    ) -> Result<String> {
        decoder.init(buffer)?;
        let mut writer = JsonWriter::new(indent);
        let root = self.schema().root_message().clone();
        self.write_json_message(&root, decoder, &mut writer, ignore_constants)?;
        Ok(writer.into_string())
    }

    fn write_json_message<'a>(
        &self,
        msg: &RosMessage,
        decoder: &mut dyn Decoder<'a>,
        writer: &mut JsonWriter,
        ignore_constants: bool,
    ) -> Result<()> {
        writer.begin_object();
        for field in msg.fields() {
            if field.is_constant() {
                if !ignore_constants {
                    writer.key(field.name());
                    write_constant(writer, field);
                }
                continue;
            }

            let type_id = field.ty().type_id();
            let dynamic = field.array_size() == ARRAY_DYNAMIC;
            let array_size = if dynamic {
                i64::from(decoder.decode_u32()?)
            } else {
                i64::from(field.array_size())
            };

            // Oversized byte arrays are blobs; they have no JSON rendering.
            if dynamic
                && array_size > i64::from(self.max_array_size())
                && type_id.size() == Some(1)
            {
                decoder.jump(array_size as usize)?;
                continue;
            }

            writer.key(field.name());
            if field.is_array() {
                writer.begin_array();
            }
            for _ in 0..array_size {
                self.write_json_value(field, type_id, decoder, writer, ignore_constants)?;
            }
            if field.is_array() {
                writer.end_array();
            }
        }
        writer.end_object();
        Ok(())
    }

    fn write_json_value<'a>(
        &self,
        field: &RosField,
        type_id: BuiltinType,
        decoder: &mut dyn Decoder<'a>,
        writer: &mut JsonWriter,
        ignore_constants: bool,
    ) -> Result<()> {
        match type_id {
            BuiltinType::Bool => {
                writer.bool_value(decoder.decode(type_id)?.extract_bool()?);
            }
            BuiltinType::Char => {
                let byte = match decoder.decode(type_id)? {
                    Variant::Char(b) => b,
                    other => other.to_i64()? as u8,
                };
                let mut tmp = [0u8; 4];
                writer.string_value(char::from(byte).encode_utf8(&mut tmp));
            }
            BuiltinType::Byte
            | BuiltinType::UInt8
            | BuiltinType::UInt16
            | BuiltinType::UInt32
            | BuiltinType::UInt64 => {
                writer.uint_value(decoder.decode(type_id)?.to_u64()?);
            }
            BuiltinType::Int8
            | BuiltinType::Int16
            | BuiltinType::Int32
            | BuiltinType::Int64 => {
                writer.int_value(decoder.decode(type_id)?.to_i64()?);
            }
            BuiltinType::Float32 => match decoder.decode(type_id)? {
                Variant::Float32(v) => writer.float32_value(v),
                other => writer.float64_value(other.to_f64()?),
            },
            BuiltinType::Float64 => {
                writer.float64_value(decoder.decode(type_id)?.to_f64()?);
            }
            BuiltinType::Time | BuiltinType::Duration => {
                let t = match decoder.decode(type_id)? {
                    Variant::Time(t) | Variant::Duration(t) => t,
                    other => {
                        return Err(CodecError::unsupported(format!(
                            "time decode produced {other:?}"
                        )))
                    }
                };
                writer.begin_object();
                writer.key("secs");
                writer.int_value(i64::from(t.sec as i32));
                writer.key("nsecs");
                writer.int_value(i64::from(t.nsec as i32));
                writer.end_object();
            }
            BuiltinType::String => {
                writer.string_value(&decoder.decode_string()?);
            }
            BuiltinType::Other => {
                let sub = self
                    .message_by_type(field.ty())
                    .ok_or_else(|| CodecError::undefined_type(field.ty().base_name()))?
                    .clone();
                self.write_json_message(&sub, decoder, writer, ignore_constants)?;
            }
        }
        Ok(())
    }

    /// Encode a JSON document into `encoder`'s wire format.
    ///
    /// The document must be the bare message object. Missing members
    /// contribute zero values; fixed-array length disagreements and
    /// scalar/array shape conflicts fail.
    pub fn serialize_from_json(&self, json_text: &str, encoder: &mut dyn Encoder) -> Result<()> {
        let doc: Value = serde_json::from_str(json_text)
            .map_err(|e| CodecError::json_parse(e.to_string()))?;
        if !doc.is_object() {
            return Err(CodecError::json_shape(
                &self.schema().topic_name,
                "document root must be an object",
            ));
        }

        encoder.write_header();
        let root = self.schema().root_message().clone();
        self.encode_json_message(&root, Some(&doc), encoder)
    }

    fn encode_json_message(
        &self,
        msg: &RosMessage,
        json: Option<&Value>,
        encoder: &mut dyn Encoder,
    ) -> Result<()> {
        for field in msg.fields() {
            if field.is_constant() {
                continue;
            }
            let member = match json.and_then(|j| j.get(field.name())) {
                Some(Value::Null) | None => None,
                Some(v) => Some(v),
            };

            if field.is_array() {
                let elements = match member {
                    None => None,
                    Some(Value::Array(items)) => Some(items),
                    Some(_) => {
                        return Err(CodecError::json_shape(field.name(), "expected an array"))
                    }
                };
                let declared = field.array_size();
                let count = if declared == ARRAY_DYNAMIC {
                    let len = elements.map_or(0, |e| e.len());
                    encoder.encode_u32(len as u32)?;
                    len
                } else {
                    let declared = declared as usize;
                    if let Some(elements) = elements {
                        if elements.len() != declared {
                            return Err(CodecError::json_shape(
                                field.name(),
                                format!(
                                    "fixed array of {declared} elements, got {}",
                                    elements.len()
                                ),
                            ));
                        }
                    }
                    declared
                };
                for i in 0..count {
                    let element = elements.map(|e| &e[i]);
                    self.encode_json_value(field, element, encoder)?;
                }
            } else {
                self.encode_json_value(field, member, encoder)?;
            }
        }
        Ok(())
    }

    fn encode_json_value(
        &self,
        field: &RosField,
        json: Option<&Value>,
        encoder: &mut dyn Encoder,
    ) -> Result<()> {
        let type_id = field.ty().type_id();
        match type_id {
            BuiltinType::Bool => {
                let v = match json {
                    None => false,
                    Some(Value::Bool(b)) => *b,
                    Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0) != 0.0,
                    Some(_) => {
                        return Err(CodecError::json_shape(field.name(), "expected a boolean"))
                    }
                };
                encoder.encode(type_id, &Variant::Bool(v))
            }
            BuiltinType::Char => {
                let v = match json {
                    None => 0,
                    Some(Value::String(s)) => s.as_bytes().first().copied().unwrap_or(0),
                    Some(Value::Number(n)) => n.as_u64().unwrap_or(0) as u8,
                    Some(_) => {
                        return Err(CodecError::json_shape(
                            field.name(),
                            "expected a one-character string",
                        ))
                    }
                };
                encoder.encode(type_id, &Variant::Char(v))
            }
            BuiltinType::Byte
            | BuiltinType::UInt8
            | BuiltinType::UInt16
            | BuiltinType::UInt32
            | BuiltinType::UInt64 => {
                let v = json_as_u64(field, json)?;
                encoder.encode(type_id, &Variant::UInt64(v))
            }
            BuiltinType::Int8
            | BuiltinType::Int16
            | BuiltinType::Int32
            | BuiltinType::Int64 => {
                let v = json_as_i64(field, json)?;
                encoder.encode(type_id, &Variant::Int64(v))
            }
            BuiltinType::Float32 => {
                let v = json_as_f64(field, json)?;
                encoder.encode(type_id, &Variant::Float32(v as f32))
            }
            BuiltinType::Float64 => {
                let v = json_as_f64(field, json)?;
                encoder.encode(type_id, &Variant::Float64(v))
            }
            BuiltinType::Time => {
                let t = json_as_time(field, json)?;
                encoder.encode(type_id, &Variant::Time(t))
            }
            BuiltinType::Duration => {
                let t = json_as_time(field, json)?;
                encoder.encode(type_id, &Variant::Duration(t))
            }
            BuiltinType::String => {
                let v = match json {
                    None => "",
                    Some(Value::String(s)) => s.as_str(),
                    Some(_) => {
                        return Err(CodecError::json_shape(field.name(), "expected a string"))
                    }
                };
                encoder.encode_string(v)
            }
            BuiltinType::Other => {
                if let Some(v) = json {
                    if !v.is_object() {
                        return Err(CodecError::json_shape(field.name(), "expected an object"));
                    }
                }
                let sub = self
                    .message_by_type(field.ty())
                    .ok_or_else(|| CodecError::undefined_type(field.ty().base_name()))?
                    .clone();
                self.encode_json_message(&sub, json, encoder)
            }
        }
    }
}

fn write_constant(writer: &mut JsonWriter, field: &RosField) {
    let literal = field.value().unwrap_or("");
    match field.ty().type_id() {
        BuiltinType::String => writer.string_value(literal),
        BuiltinType::Bool => {
            writer.bool_value(matches!(literal.to_ascii_lowercase().as_str(), "true" | "1"))
        }
        BuiltinType::Float32 | BuiltinType::Float64 => {
            match literal.parse::<f64>() {
                Ok(v) => writer.float64_value(v),
                Err(_) => writer.string_value(literal),
            }
        }
        BuiltinType::Int8 | BuiltinType::Int16 | BuiltinType::Int32 | BuiltinType::Int64 => {
            match literal.parse::<i64>() {
                Ok(v) => writer.int_value(v),
                Err(_) => writer.string_value(literal),
            }
        }
        _ => match literal.parse::<u64>() {
            Ok(v) => writer.uint_value(v),
            Err(_) => writer.string_value(literal),
        },
    }
}

fn json_as_f64(field: &RosField, json: Option<&Value>) -> Result<f64> {
    match json {
        None => Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| CodecError::json_shape(field.name(), "number out of range")),
        Some(_) => Err(CodecError::json_shape(field.name(), "expected a number")),
    }
}

fn json_as_i64(field: &RosField, json: Option<&Value>) -> Result<i64> {
    match json {
        None => Ok(0),
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_i64() {
                Ok(v)
            } else if let Some(v) = n.as_f64() {
                Ok(v as i64)
            } else {
                Err(CodecError::json_shape(field.name(), "number out of range"))
            }
        }
        Some(_) => Err(CodecError::json_shape(field.name(), "expected a number")),
    }
}

fn json_as_u64(field: &RosField, json: Option<&Value>) -> Result<u64> {
    match json {
        None => Ok(0),
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                Ok(v)
            } else if let Some(v) = n.as_f64() {
                if v < 0.0 {
                    Err(CodecError::json_shape(field.name(), "expected unsigned"))
                } else {
                    Ok(v as u64)
                }
            } else {
                Err(CodecError::json_shape(field.name(), "number out of range"))
            }
        }
        Some(_) => Err(CodecError::json_shape(field.name(), "expected a number")),
    }
}

fn json_as_time(field: &RosField, json: Option<&Value>) -> Result<RosTime> {
    match json {
        None => Ok(RosTime::new(0, 0)),
        Some(Value::Object(members)) => {
            let sec = members.get("secs").or_else(|| members.get("sec"));
            let nsec = members.get("nsecs").or_else(|| members.get("nanosec"));
            let sec = sec.and_then(Value::as_i64).unwrap_or(0);
            let nsec = nsec.and_then(Value::as_i64).unwrap_or(0);
            Ok(RosTime::new(sec as u32, nsec as u32))
        }
        Some(_) => Err(CodecError::json_shape(
            field.name(),
            "expected a {secs, nsecs} object",
        )),
    }
}
