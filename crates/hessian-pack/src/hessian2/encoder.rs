//! `Hessian2Encoder` — Hessian 2.0 serialization writer.

use std::fs;
use std::io::Write;
use std::rc::Rc;

use hessian_buffers::Writer;
use hessian_util::{double_bytes, is_high_surrogate, is_valid_utf8, short_bytes, write_hessian_utf8};
use tracing::{debug, trace};

use super::constants::*;
use super::error::EncodeError;
use crate::filter::FilterContainer;
use crate::options::EncoderOptions;
use crate::registry::{ClassDef, ReferenceRegistry};
use crate::shape::{classify, Shape};
use crate::type_map::TypeResolver;
use crate::value::{Map, Record, Resource, Shared, Value};

fn wire_int(len: usize) -> Result<i32, EncodeError> {
    i32::try_from(len).map_err(|_| EncodeError::LengthOverflow(len))
}

/// Hessian 2 encoder.
///
/// The encoder owns one reference registry: composites, class definitions
/// and type names written by successive [`encode`](Self::encode) calls share
/// one numbering space until [`reset_session`](Self::reset_session). Use one
/// encoder (or one session) per message.
///
/// ```
/// use hessian_pack::{Hessian2Encoder, Value};
///
/// let mut encoder = Hessian2Encoder::new();
/// let bytes = encoder.encode(&Value::list(vec![Value::Int(1), Value::Bool(true)])).unwrap();
/// assert_eq!(bytes, [0x7a, 0x91, b'T']);
/// ```
pub struct Hessian2Encoder {
    pub writer: Writer,
    registry: ReferenceRegistry,
    type_map: Box<dyn TypeResolver>,
    filters: Option<Rc<FilterContainer>>,
    options: EncoderOptions,
    // Number of `encode` calls currently running, e.g. from inside a filter.
    depth: usize,
}

impl Default for Hessian2Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Hessian2Encoder {
    pub fn new() -> Self {
        Self::with_options(EncoderOptions::default())
    }

    pub fn with_options(options: EncoderOptions) -> Self {
        Self {
            writer: Writer::with_alloc_size(options.buffer_size),
            registry: ReferenceRegistry::new(),
            type_map: Box::new(options.type_map.clone()),
            filters: None,
            options,
            depth: 0,
        }
    }

    pub fn with_type_map(mut self, type_map: impl TypeResolver + 'static) -> Self {
        self.set_type_map(type_map);
        self
    }

    pub fn with_filters(mut self, filters: FilterContainer) -> Self {
        self.set_filters(filters);
        self
    }

    pub fn set_type_map(&mut self, type_map: impl TypeResolver + 'static) {
        self.type_map = Box::new(type_map);
    }

    pub fn set_filters(&mut self, filters: FilterContainer) {
        self.filters = Some(Rc::new(filters));
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    pub fn registry(&self) -> &ReferenceRegistry {
        &self.registry
    }

    /// Starts a new reference-numbering space.
    pub fn reset_session(&mut self) {
        self.registry.clear();
    }

    /// Encodes one value. On error nothing of the value is kept in the
    /// output, but references registered before the failure stay registered.
    ///
    /// Called while another `encode` is running (from a filter), this behaves
    /// as [`encode_fragment`](Self::encode_fragment) and leaves the enclosing
    /// message's pending bytes in place.
    pub fn encode(&mut self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        if self.depth > 0 {
            return self.encode_fragment(value);
        }
        self.depth += 1;
        self.writer.reset();
        let result = self.write_any(value);
        self.depth -= 1;
        match result {
            Ok(()) => Ok(self.writer.flush()),
            Err(err) => {
                self.writer.rewind(0);
                Err(err)
            }
        }
    }

    /// Encodes one value and appends it to `sink`. Returns the byte count.
    pub fn encode_into<W: Write>(&mut self, value: &Value, sink: &mut W) -> Result<usize, EncodeError> {
        let bytes = self.encode(value)?;
        sink.write_all(&bytes).map_err(EncodeError::SinkFault)?;
        Ok(bytes.len())
    }

    /// Encodes `value` in the middle of another value without touching the
    /// pending output, and returns its bytes.
    ///
    /// The fragment shares this session's reference numbering, so it is only
    /// meaningful spliced into the message being written, e.g. returned from
    /// a filter as [`Value::Raw`].
    pub fn encode_fragment(&mut self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        let mark = self.writer.position();
        let result = self.write_any(value);
        let bytes = self.writer.written_since(mark).to_vec();
        self.writer.rewind(mark);
        result.map(|()| bytes)
    }

    pub fn write_any(&mut self, value: &Value) -> Result<(), EncodeError> {
        if let Value::Record(_) = value {
            if let Some(filters) = self.filters.clone() {
                if let Some(callback) = filters.callback(value) {
                    let replacement = filters.invoke(callback, value, self)?;
                    debug!(
                        from = value.kind(),
                        to = replacement.kind(),
                        "filter replaced value"
                    );
                    return self.write_value(&replacement);
                }
            }
        }
        self.write_value(value)
    }

    fn write_value(&mut self, value: &Value) -> Result<(), EncodeError> {
        trace!(kind = value.kind(), "dispatch");
        match value {
            Value::Null => self.write_null(),
            Value::Bool(b) => self.write_boolean(*b),
            Value::Int(i) => self.write_int(*i),
            Value::Double(f) => self.write_double(*f),
            Value::Date(ms) => self.write_date(*ms),
            Value::Text(bytes) => return self.write_text(bytes),
            Value::Binary(bytes) => self.write_binary(bytes),
            Value::List(list) => return self.write_list(list),
            Value::Map(map) => return self.write_map(map),
            Value::Record(record) => return self.write_record(record),
            Value::Resource(resource) => return self.write_resource(resource),
            Value::Raw(bytes) => self.writer.buf(bytes),
        }
        Ok(())
    }

    pub fn write_null(&mut self) {
        self.writer.u8(NULL);
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.u8(if b { TRUE } else { FALSE });
    }

    pub fn write_int(&mut self, int: i32) {
        let writer = &mut self.writer;
        if (INT_BYTE_MIN..=INT_BYTE_MAX).contains(&int) {
            writer.u8((int + i32::from(INT_ZERO)) as u8);
        } else if (INT_SHORT_MIN..=INT_SHORT_MAX).contains(&int) {
            writer.u8((INT_BYTE_ZERO + (int >> 8)) as u8);
            writer.u8(int as u8);
        } else if (INT_TRIPLE_MIN..=INT_TRIPLE_MAX).contains(&int) {
            writer.u8((INT_SHORT_ZERO + (int >> 16)) as u8);
            writer.u8((int >> 8) as u8);
            writer.u8(int as u8);
        } else {
            writer.u8i32(INT, int);
        }
    }

    /// Writes a double in the smallest form that represents it exactly.
    /// The forms are tried in order, so 0.0 never reaches the byte form.
    pub fn write_double(&mut self, float: f64) {
        let integral = float.fract() == 0.0;
        if float == 0.0 {
            self.writer.u8(DOUBLE_ZERO);
        } else if float == 1.0 {
            self.writer.u8(DOUBLE_ONE);
        } else if integral && (-127.0..=128.0).contains(&float) {
            self.writer.u8(DOUBLE_BYTE);
            self.writer.u8(float as i32 as u8);
        } else if integral && (-32768.0..=32767.0).contains(&float) {
            self.writer.u8(DOUBLE_SHORT);
            self.writer.buf(&short_bytes(float as i16));
        } else {
            let mills = (float * 1000.0) as i32;
            if 0.001 * f64::from(mills) == float {
                self.writer.u8i32(DOUBLE_MILL, mills);
            } else {
                self.writer.u8(DOUBLE);
                self.writer.buf(&double_bytes(float));
            }
        }
    }

    /// Writes a timestamp in epoch milliseconds; whole minutes use the
    /// compact form.
    pub fn write_date(&mut self, millis: i64) {
        if millis % MILLIS_PER_MINUTE == 0 {
            if let Ok(minutes) = i32::try_from(millis / MILLIS_PER_MINUTE) {
                self.writer.u8i32(DATE_MINUTES, minutes);
                return;
            }
        }
        self.writer.u8(DATE_MILLIS);
        self.writer.i64(millis);
    }

    /// Writes text given as UTF-8 bytes, rejecting malformed input.
    pub fn write_text(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        if bytes.is_empty() {
            self.write_null();
            return Ok(());
        }
        if !is_valid_utf8(bytes) {
            return Err(EncodeError::InvalidEncoding);
        }
        let text = std::str::from_utf8(bytes).map_err(|_| EncodeError::InvalidEncoding)?;
        self.write_str(text);
        Ok(())
    }

    /// Writes a string. Lengths count UTF-16 code units; an empty string is
    /// written as null.
    pub fn write_str(&mut self, s: &str) {
        if s.is_empty() {
            self.write_null();
            return;
        }
        let units: Vec<u16> = s.encode_utf16().collect();
        let mut rest = units.as_slice();
        if rest.len() > STRING_CHUNK_UNITS {
            debug!(units = rest.len(), "writing chunked string");
        }
        while rest.len() > STRING_CHUNK_UNITS {
            let mut size = STRING_CHUNK_UNITS;
            // A chunk never ends between the two halves of a surrogate pair.
            if is_high_surrogate(rest[size - 1]) {
                size -= 1;
            }
            self.writer.u8u16(STRING_CHUNK, size as u16);
            write_hessian_utf8(&mut self.writer, &rest[..size]);
            rest = &rest[size..];
        }
        self.write_str_hdr(rest.len());
        write_hessian_utf8(&mut self.writer, rest);
    }

    fn write_str_hdr(&mut self, length: usize) {
        if length <= STRING_DIRECT_MAX {
            self.writer.u8(length as u8);
        } else if length <= STRING_SHORT_MAX {
            self.writer.u8(STRING_SHORT + (length >> 8) as u8);
            self.writer.u8(length as u8);
        } else {
            self.writer.u8u16(STRING_FINAL, length as u16);
        }
    }

    pub fn write_binary(&mut self, buf: &[u8]) {
        let mut rest = buf;
        if rest.len() > BINARY_CHUNK_SIZE {
            debug!(bytes = rest.len(), "writing chunked binary");
        }
        while rest.len() > BINARY_CHUNK_SIZE {
            self.writer.u8u16(BINARY_CHUNK, BINARY_CHUNK_SIZE as u16);
            self.writer.buf(&rest[..BINARY_CHUNK_SIZE]);
            rest = &rest[BINARY_CHUNK_SIZE..];
        }
        let length = rest.len();
        if length <= BINARY_DIRECT_MAX {
            self.writer.u8(BINARY_DIRECT + length as u8);
        } else if length <= BINARY_SHORT_MAX {
            self.writer.u8(BINARY_SHORT + (length >> 8) as u8);
            self.writer.u8(length as u8);
        } else {
            self.writer.u8u16(BINARY_FINAL, length as u16);
        }
        self.writer.buf(rest);
    }

    /// Writes a back-reference to the `index`-th registered composite.
    pub fn write_reference(&mut self, index: u32) -> Result<(), EncodeError> {
        trace!(index, "back-reference");
        let index = wire_int(index as usize)?;
        self.writer.u8(REF);
        self.write_int(index);
        Ok(())
    }

    /// Writes a type name, or its index when the name was already written
    /// in this session.
    pub fn write_type(&mut self, type_name: &str) -> Result<(), EncodeError> {
        match self.registry.get_type_index(type_name) {
            Some(index) => {
                trace!(type_name, index, "type reference");
                self.write_int(wire_int(index as usize)?);
            }
            None => {
                self.registry.add_type(type_name);
                self.write_str(type_name);
            }
        }
        Ok(())
    }

    fn write_list_hdr(&mut self, length: usize) -> Result<(), EncodeError> {
        if length <= LIST_DIRECT_MAX {
            self.writer.u8(LIST_DIRECT + length as u8);
        } else {
            let length = wire_int(length)?;
            self.writer.u8(LIST_FIXED);
            self.write_int(length);
        }
        Ok(())
    }

    pub fn write_list(&mut self, list: &Shared<Vec<Value>>) -> Result<(), EncodeError> {
        let items = list.borrow();
        if items.is_empty() {
            self.write_null();
            return Ok(());
        }
        if let Some(index) = self.registry.get_reference(list.id()) {
            return self.write_reference(index);
        }
        self.registry.register(list);
        self.write_list_hdr(items.len())?;
        for item in items.iter() {
            self.write_any(item)?;
        }
        Ok(())
    }

    /// Writes a map. An untyped map whose keys pass the configured list test
    /// is written as a list of its values.
    pub fn write_map(&mut self, map: &Shared<Map>) -> Result<(), EncodeError> {
        let inner = map.borrow();
        if inner.entries.is_empty() {
            self.write_null();
            return Ok(());
        }
        if let Some(index) = self.registry.get_reference(map.id()) {
            return self.write_reference(index);
        }
        self.registry.register(map);
        match &inner.type_name {
            Some(type_name) => {
                self.writer.u8(MAP_TYPED);
                self.write_type(type_name)?;
                self.write_map_pairs(&inner.entries)
            }
            None => match classify(&inner.entries, self.options.list_shape) {
                Shape::List => {
                    trace!(len = inner.entries.len(), "map written as list");
                    self.write_list_hdr(inner.entries.len())?;
                    for (_, value) in &inner.entries {
                        self.write_any(value)?;
                    }
                    Ok(())
                }
                Shape::Map => {
                    self.writer.u8(MAP_UNTYPED);
                    self.write_map_pairs(&inner.entries)
                }
            },
        }
    }

    fn write_map_pairs(&mut self, entries: &[(Value, Value)]) -> Result<(), EncodeError> {
        for (key, value) in entries {
            self.write_any(key)?;
            self.write_any(value)?;
        }
        self.writer.u8(END);
        Ok(())
    }

    pub fn write_record(&mut self, record: &Shared<Record>) -> Result<(), EncodeError> {
        if let Some(index) = self.registry.get_reference(record.id()) {
            return self.write_reference(index);
        }
        let inner = record.borrow();
        let shape = ClassDef::new(inner.type_name.clone(), inner.field_names());
        let class_index = match self.registry.get_class_index(&shape) {
            Some(index) => index,
            None => self.write_class_def(shape)?,
        };
        if class_index <= OBJECT_DIRECT_MAX {
            self.writer.u8(OBJECT_DIRECT + class_index as u8);
        } else {
            let class_index = wire_int(class_index as usize)?;
            self.writer.u8(OBJECT);
            self.write_int(class_index);
        }
        self.registry.register(record);
        // Definitions are keyed by the exact field list, so the record's
        // field order is the definition's order.
        for (_, value) in &inner.fields {
            self.write_any(value)?;
        }
        Ok(())
    }

    /// Writes a class definition block and registers it. Returns its index.
    fn write_class_def(&mut self, def: ClassDef) -> Result<u32, EncodeError> {
        let field_count = wire_int(def.fields.len())?;
        let wire_name = self
            .type_map
            .remote_type(&def.type_name)
            .unwrap_or(def.type_name.as_str())
            .to_owned();
        self.writer.u8(CLASS_DEF);
        self.write_str(&wire_name);
        self.write_int(field_count);
        for field in &def.fields {
            self.write_str(field);
        }
        Ok(self.registry.add_class_def(def))
    }

    /// Writes the contents of a plain file as binary.
    pub fn write_resource(&mut self, resource: &Resource) -> Result<(), EncodeError> {
        match resource {
            Resource::File(path) => {
                let read_error = |source| EncodeError::Resource {
                    path: path.clone(),
                    source,
                };
                let metadata = fs::metadata(path).map_err(read_error)?;
                if !metadata.is_file() {
                    return Err(EncodeError::UnsupportedType(format!(
                        "resource {} is not a plain file",
                        path.display()
                    )));
                }
                if metadata.len() > self.options.max_resource_size {
                    return Err(EncodeError::UnsupportedType(format!(
                        "resource {} is bigger than {} bytes",
                        path.display(),
                        self.options.max_resource_size
                    )));
                }
                let data = fs::read(path).map_err(read_error)?;
                self.write_binary(&data);
                Ok(())
            }
            Resource::Stream { kind } => Err(EncodeError::UnsupportedType(format!(
                "resource of type '{kind}'"
            ))),
        }
    }
}
