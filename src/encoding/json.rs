// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Streaming JSON writer.
//!
//! Emits either compact output or pretty output with a configurable indent.
//! Non-finite floats are written as the `NaN` / `Infinity` / `-Infinity`
//! literals, which the binary-to-JSON bridge requires and `serde_json`
//! cannot produce.

use std::fmt::Write as _;

/// Incremental JSON text builder.
#[derive(Debug)]
pub struct JsonWriter {
    out: String,
    indent: usize,
    counts: Vec<usize>,
    pending_value: bool,
}

impl JsonWriter {
    /// `indent == 0` produces compact output; otherwise each nesting level
    /// is indented by `indent` spaces.
    pub fn new(indent: usize) -> Self {
        Self {
            out: String::new(),
            indent,
            counts: Vec::new(),
            pending_value: false,
        }
    }

    /// Finish and return the document text.
    pub fn into_string(self) -> String {
        self.out
    }

    fn pad(&mut self) {
        self.out.push('\n');
        let pad = self.indent * self.counts.len();
        self.out.extend(std::iter::repeat(' ').take(pad));
    }

    fn separator(&mut self) {
        if self.pending_value {
            self.pending_value = false;
            return;
        }
        if let Some(count) = self.counts.last_mut() {
            let first = *count == 0;
            *count += 1;
            if !first {
                self.out.push(',');
            }
            if self.indent > 0 {
                self.pad();
            }
        }
    }

    /// Start an object value.
    pub fn begin_object(&mut self) {
        self.separator();
        self.out.push('{');
        self.counts.push(0);
    }

    /// Close the current object.
    pub fn end_object(&mut self) {
        let count = self.counts.pop().unwrap_or(0);
        if self.indent > 0 && count > 0 {
            self.pad();
        }
        self.out.push('}');
    }

    /// Start an array value.
    pub fn begin_array(&mut self) {
        self.separator();
        self.out.push('[');
        self.counts.push(0);
    }

    /// Close the current array.
    pub fn end_array(&mut self) {
        let count = self.counts.pop().unwrap_or(0);
        if self.indent > 0 && count > 0 {
            self.pad();
        }
        self.out.push(']');
    }

    /// Write an object member key; the next value attaches to it.
    pub fn key(&mut self, name: &str) {
        self.separator();
        self.write_escaped(name);
        self.out.push(':');
        if self.indent > 0 {
            self.out.push(' ');
        }
        self.pending_value = true;
    }

    /// Write a string value.
    pub fn string_value(&mut self, s: &str) {
        self.separator();
        self.write_escaped(s);
    }

    /// Write a boolean value.
    pub fn bool_value(&mut self, v: bool) {
        self.separator();
        self.out.push_str(if v { "true" } else { "false" });
    }

    /// Write an unsigned integer value.
    pub fn uint_value(&mut self, v: u64) {
        self.separator();
        let _ = write!(self.out, "{v}");
    }

    /// Write a signed integer value.
    pub fn int_value(&mut self, v: i64) {
        self.separator();
        let _ = write!(self.out, "{v}");
    }

    /// Write a 32-bit float with round-trippable text.
    pub fn float32_value(&mut self, v: f32) {
        self.separator();
        if v.is_nan() {
            self.out.push_str("NaN");
        } else if v == f32::INFINITY {
            self.out.push_str("Infinity");
        } else if v == f32::NEG_INFINITY {
            self.out.push_str("-Infinity");
        } else {
            let _ = write!(self.out, "{v}");
        }
    }

    /// Write a 64-bit float with round-trippable text.
    pub fn float64_value(&mut self, v: f64) {
        self.separator();
        if v.is_nan() {
            self.out.push_str("NaN");
        } else if v == f64::INFINITY {
            self.out.push_str("Infinity");
        } else if v == f64::NEG_INFINITY {
            self.out.push_str("-Infinity");
        } else {
            let _ = write!(self.out, "{v}");
        }
    }

    fn write_escaped(&mut self, s: &str) {
        self.out.push('"');
        for c in s.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                '\u{08}' => self.out.push_str("\\b"),
                '\u{0C}' => self.out.push_str("\\f"),
                c if (c as u32) < 0x20 => {
                    let _ = write!(self.out, "\\u{:04x}", c as u32);
                }
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_object() {
        let mut w = JsonWriter::new(0);
        w.begin_object();
        w.key("a");
        w.int_value(1);
        w.key("b");
        w.begin_array();
        w.uint_value(2);
        w.uint_value(3);
        w.end_array();
        w.end_object();
        assert_eq!(w.into_string(), r#"{"a":1,"b":[2,3]}"#);
    }

    #[test]
    fn test_pretty_object() {
        let mut w = JsonWriter::new(2);
        w.begin_object();
        w.key("a");
        w.int_value(1);
        w.key("b");
        w.begin_object();
        w.key("c");
        w.int_value(2);
        w.end_object();
        w.end_object();
        assert_eq!(
            w.into_string(),
            "{\n  \"a\": 1,\n  \"b\": {\n    \"c\": 2\n  }\n}"
        );
    }

    #[test]
    fn test_empty_containers() {
        let mut w = JsonWriter::new(2);
        w.begin_object();
        w.key("arr");
        w.begin_array();
        w.end_array();
        w.end_object();
        assert_eq!(w.into_string(), "{\n  \"arr\": []\n}");
    }

    #[test]
    fn test_non_finite_floats() {
        let mut w = JsonWriter::new(0);
        w.begin_array();
        w.float64_value(f64::NAN);
        w.float64_value(f64::INFINITY);
        w.float64_value(f64::NEG_INFINITY);
        w.float32_value(f32::NAN);
        w.end_array();
        assert_eq!(w.into_string(), "[NaN,Infinity,-Infinity,NaN]");
    }

    #[test]
    fn test_float_text_round_trips() {
        let mut w = JsonWriter::new(0);
        w.float64_value(0.1);
        let text = w.into_string();
        assert_eq!(text.parse::<f64>().unwrap(), 0.1);

        let mut w = JsonWriter::new(0);
        w.float32_value(0.1_f32);
        let text = w.into_string();
        assert_eq!(text.parse::<f64>().unwrap() as f32, 0.1_f32);
    }

    #[test]
    fn test_string_escapes() {
        let mut w = JsonWriter::new(0);
        w.string_value("a\"b\\c\nd\u{01}");
        assert_eq!(w.into_string(), "\"a\\\"b\\\\c\\nd\\u0001\"");
    }

    #[test]
    fn test_scalar_root() {
        let mut w = JsonWriter::new(0);
        w.uint_value(42);
        assert_eq!(w.into_string(), "42");
    }
}
