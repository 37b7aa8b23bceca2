use alloc::string::String;
use alloc::vec::Vec;
use std::io;

use serde_json::ser::{CharEscape, CompactFormatter, Formatter, PrettyFormatter};
use serde_json::{Map, Number, Value};

use crate::JsonError;
use crate::settings::Formatting;

static SPACES: &[u8; 16] = b"                ";

enum Style {
    Compact(CompactFormatter),
    Pretty(PrettyFormatter<'static>),
}

macro_rules! format_call {
    ($self:ident.$method:ident($($arg:expr),*)) => {
        match &mut $self.style {
            Style::Compact(f) => f.$method(&mut $self.buf $(, $arg)*),
            Style::Pretty(f) => f.$method(&mut $self.buf $(, $arg)*),
        }
    };
}

/// A JSON text sink.
///
/// Tracks whether the open object or array already holds an entry, so
/// callers only announce keys and elements.
pub struct Output {
    buf: Vec<u8>,
    style: Style,
    // One flag per open container: `true` until its first entry.
    first: Vec<bool>,
    escape_unicode: bool,
}

impl Output {
    pub fn new(formatting: Formatting) -> Self {
        let style = match formatting {
            Formatting::None => Style::Compact(CompactFormatter),
            Formatting::Tab => Style::Pretty(PrettyFormatter::with_indent(b"\t")),
            Formatting::Spaces(n) => {
                let n = usize::from(n).min(SPACES.len());
                Style::Pretty(PrettyFormatter::with_indent(&SPACES[..n]))
            }
        };
        Self {
            buf: Vec::new(),
            style,
            first: Vec::new(),
            escape_unicode: false,
        }
    }

    /// Writes every non-ASCII character as a `\uXXXX` escape, using
    /// surrogate pairs outside the basic plane.
    #[inline]
    pub fn with_escape_unicode(mut self, value: bool) -> Self {
        self.escape_unicode = value;
        self
    }

    pub fn into_string(self) -> String {
        // Every fragment written is either formatter punctuation or a `&str`.
        match String::from_utf8(self.buf) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }

    // -------------------------------------------------------------------------
    // Scalars

    pub fn null(&mut self) -> Result<(), JsonError> {
        Ok(format_call!(self.write_null())?)
    }

    pub fn bool(&mut self, value: bool) -> Result<(), JsonError> {
        Ok(format_call!(self.write_bool(value))?)
    }

    pub fn i64(&mut self, value: i64) -> Result<(), JsonError> {
        Ok(format_call!(self.write_i64(value))?)
    }

    pub fn u64(&mut self, value: u64) -> Result<(), JsonError> {
        Ok(format_call!(self.write_u64(value))?)
    }

    /// Writes a finite float. Non-finite values become strings.
    pub fn f64(&mut self, value: f64) -> Result<(), JsonError> {
        if value.is_finite() {
            Ok(format_call!(self.write_f64(value))?)
        } else {
            self.str(&alloc::format!("{value}"))
        }
    }

    pub fn f32(&mut self, value: f32) -> Result<(), JsonError> {
        if value.is_finite() {
            Ok(format_call!(self.write_f32(value))?)
        } else {
            self.str(&alloc::format!("{value}"))
        }
    }

    pub fn str(&mut self, value: &str) -> Result<(), JsonError> {
        format_call!(self.begin_string())?;
        self.escaped(value)?;
        Ok(format_call!(self.end_string())?)
    }

    fn escaped(&mut self, value: &str) -> io::Result<()> {
        let mut last = 0;
        for (index, byte) in value.bytes().enumerate() {
            if self.escape_unicode && !byte.is_ascii() {
                // Continuation bytes of a char that is already escaped.
                if index < last {
                    continue;
                }
                if last < index {
                    format_call!(self.write_string_fragment(&value[last..index]))?;
                }
                let Some(ch) = value[index..].chars().next() else {
                    break;
                };
                let mut units = [0_u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    format_call!(self.write_string_fragment(&alloc::format!("\\u{unit:04x}")))?;
                }
                last = index + ch.len_utf8();
                continue;
            }
            let escape = match byte {
                b'"' => CharEscape::Quote,
                b'\\' => CharEscape::ReverseSolidus,
                b'\n' => CharEscape::LineFeed,
                b'\r' => CharEscape::CarriageReturn,
                b'\t' => CharEscape::Tab,
                0x08 => CharEscape::Backspace,
                0x0C => CharEscape::FormFeed,
                0x00..=0x1F => CharEscape::AsciiControl(byte),
                _ => continue,
            };
            if last < index {
                format_call!(self.write_string_fragment(&value[last..index]))?;
            }
            format_call!(self.write_char_escape(escape))?;
            last = index + 1;
        }
        if last < value.len() {
            format_call!(self.write_string_fragment(&value[last..]))?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Containers

    pub fn begin_object(&mut self) -> Result<(), JsonError> {
        self.first.push(true);
        Ok(format_call!(self.begin_object())?)
    }

    /// Starts the next member. The value must be written right after.
    pub fn key(&mut self, key: &str) -> Result<(), JsonError> {
        let first = self.take_first();
        if !first {
            format_call!(self.end_object_value())?;
        }
        format_call!(self.begin_object_key(first))?;
        self.str(key)?;
        format_call!(self.end_object_key())?;
        Ok(format_call!(self.begin_object_value())?)
    }

    pub fn end_object(&mut self) -> Result<(), JsonError> {
        if !self.first.pop().unwrap_or(true) {
            format_call!(self.end_object_value())?;
        }
        Ok(format_call!(self.end_object())?)
    }

    pub fn begin_array(&mut self) -> Result<(), JsonError> {
        self.first.push(true);
        Ok(format_call!(self.begin_array())?)
    }

    /// Starts the next element. The value must be written right after.
    pub fn element(&mut self) -> Result<(), JsonError> {
        let first = self.take_first();
        if !first {
            format_call!(self.end_array_value())?;
        }
        Ok(format_call!(self.begin_array_value(first))?)
    }

    pub fn end_array(&mut self) -> Result<(), JsonError> {
        if !self.first.pop().unwrap_or(true) {
            format_call!(self.end_array_value())?;
        }
        Ok(format_call!(self.end_array())?)
    }

    fn take_first(&mut self) -> bool {
        match self.first.last_mut() {
            Some(first) => core::mem::replace(first, false),
            None => true,
        }
    }

    // -------------------------------------------------------------------------
    // Trees

    /// Writes an already built value.
    pub fn value(&mut self, value: &Value) -> Result<(), JsonError> {
        match value {
            Value::Null => self.null(),
            Value::Bool(b) => self.bool(*b),
            Value::Number(n) => self.number(n),
            Value::String(s) => self.str(s),
            Value::Array(items) => {
                self.begin_array()?;
                for item in items {
                    self.element()?;
                    self.value(item)?;
                }
                self.end_array()
            }
            Value::Object(map) => self.map(map),
        }
    }

    fn number(&mut self, number: &Number) -> Result<(), JsonError> {
        if let Some(n) = number.as_u64() {
            self.u64(n)
        } else if let Some(n) = number.as_i64() {
            self.i64(n)
        } else {
            self.f64(number.as_f64().unwrap_or(f64::NAN))
        }
    }

    fn map(&mut self, map: &Map<String, Value>) -> Result<(), JsonError> {
        self.begin_object()?;
        for (key, value) in map {
            self.key(key)?;
            self.value(value)?;
        }
        self.end_object()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Output;
    use crate::settings::Formatting;

    fn compact(f: impl FnOnce(&mut Output)) -> alloc::string::String {
        let mut out = Output::new(Formatting::None);
        f(&mut out);
        out.into_string()
    }

    #[test]
    fn escapes_strings() {
        let text = compact(|out| out.str("a\"b\\c\n\u{1}é").unwrap());
        assert_eq!(text, r#""a\"b\\c\n\u0001é""#);
    }

    #[test]
    fn escapes_non_ascii_on_request() {
        let mut out = Output::new(Formatting::None).with_escape_unicode(true);
        out.str("aé\"😀b").unwrap();
        assert_eq!(out.into_string(), r#""a\u00e9\"\ud83d\ude00b""#);
    }

    #[test]
    fn nested_containers() {
        let text = compact(|out| {
            out.begin_object().unwrap();
            out.key("a").unwrap();
            out.begin_array().unwrap();
            out.element().unwrap();
            out.i64(-1).unwrap();
            out.element().unwrap();
            out.f64(f64::INFINITY).unwrap();
            out.end_array().unwrap();
            out.key("b").unwrap();
            out.begin_object().unwrap();
            out.end_object().unwrap();
            out.end_object().unwrap();
        });
        assert_eq!(text, r#"{"a":[-1,"inf"],"b":{}}"#);
    }

    #[test]
    fn pretty_indent() {
        let mut out = Output::new(Formatting::Spaces(2));
        out.value(&json!({"a": [1, true]})).unwrap();
        assert_eq!(out.into_string(), "{\n  \"a\": [\n    1,\n    true\n  ]\n}");

        let mut out = Output::new(Formatting::Tab);
        out.value(&json!({"a": null})).unwrap();
        assert_eq!(out.into_string(), "{\n\t\"a\": null\n}");
    }
}
