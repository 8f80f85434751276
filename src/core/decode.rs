// Fixed-width record decoding: column slices to typed values.
use bstr::ByteSlice;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use tracing::warn;

use crate::core::error::Error;
use crate::core::field::{
    CoordinateColumns, FieldDescriptor, FieldKind, Justify, RecordSchema, ValueType,
};

/// TIGER stores coordinates as integers in millionths of a degree.
pub const COORDINATE_SCALE: f64 = 1_000_000.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Real(f64),
    String(String),
    IntegerList(Vec<i64>),
}

impl Value {
    pub fn zero(value_type: ValueType) -> Self {
        match value_type {
            ValueType::Integer => Value::Integer(0),
            ValueType::Real => Value::Real(0.0),
            ValueType::String => Value::String(String::new()),
            ValueType::IntegerList => Value::IntegerList(Vec::new()),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

// GeoJSON position order: `[x, y]`.
impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.x, self.y).serialize(serializer)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Point),
    LineString(Vec<Point>),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecodedRecord {
    values: Vec<(&'static str, Value)>,
    short_fields: usize,
}

impl DecodedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    pub fn push(&mut self, name: &'static str, value: Value) {
        self.values.push((name, value));
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let pos = self.values.iter().position(|(field, _)| *field == name)?;
        Some(self.values.remove(pos).1)
    }

    /// Reorder values to `layout`, dropping names it does not list. Listed names with
    /// no value (absent companion record or file) get their type's zero value.
    pub fn conform(&mut self, layout: impl IntoIterator<Item = (&'static str, ValueType)>) {
        let mut values = Vec::with_capacity(self.values.len());
        for (name, value_type) in layout {
            let value = self
                .remove(name)
                .unwrap_or_else(|| Value::zero(value_type));
            values.push((name, value));
        }
        self.values = values;
    }

    /// Append another record's values; names already present keep their first value.
    pub fn merge(&mut self, other: DecodedRecord) {
        self.short_fields += other.short_fields;
        for (name, value) in other.values {
            if self.get(name).is_none() {
                self.values.push((name, value));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> + '_ {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fields left at their zero value because the record ended before them.
    pub fn short_fields(&self) -> usize {
        self.short_fields
    }
}

impl Serialize for DecodedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DecodeOptions {
    /// Decode left-justified numeric columns as strings (keeps leading zeros).
    pub lfield_as_string: bool,
}

impl DecodeOptions {
    pub fn value_type(&self, field: &FieldDescriptor) -> ValueType {
        if self.lfield_as_string
            && field.kind == FieldKind::Numeric
            && field.justify == Justify::Left
        {
            return ValueType::String;
        }
        field.value_type
    }
}

pub fn decode(
    raw: &[u8],
    schema: &RecordSchema,
    options: DecodeOptions,
) -> Result<DecodedRecord, Error> {
    let mut record = DecodedRecord {
        values: Vec::with_capacity(schema.fields.len()),
        short_fields: 0,
    };
    for field in schema.fields.iter().filter(|field| field.set) {
        let value = match decode_field(raw, field, options)? {
            Some(value) => value,
            None => {
                record.short_fields += 1;
                Value::zero(options.value_type(field))
            }
        };
        record.push(field.name, value);
    }
    if record.short_fields > 0 {
        warn!(
            record_type = %schema.record_type,
            len = raw.len(),
            expected = schema.record_length,
            short_fields = record.short_fields,
            "short record; trailing fields left empty"
        );
    }
    Ok(record)
}

/// Decode one column range; `Ok(None)` when the record ends before the field does.
pub fn decode_field(
    raw: &[u8],
    field: &FieldDescriptor,
    options: DecodeOptions,
) -> Result<Option<Value>, Error> {
    field.validate()?;
    let Some(bytes) = raw.get(field.byte_range()) else {
        return Ok(None);
    };
    let value = match (field.kind, options.value_type(field)) {
        (FieldKind::Numeric, ValueType::String) => {
            Value::String(trim_padding(bytes).to_str_lossy().into_owned())
        }
        (FieldKind::Numeric, ValueType::Real) => Value::Real(parse_real(bytes, field.name)),
        (FieldKind::Numeric, _) => Value::Integer(parse_integer(bytes, field.name)),
        (FieldKind::Alpha, _) => {
            let text = match field.justify {
                Justify::Left => bytes.trim_end_with(|c| c == ' '),
                Justify::Right => bytes.trim_start_with(|c| c == ' '),
            };
            Value::String(text.to_str_lossy().into_owned())
        }
    };
    Ok(Some(value))
}

/// Read an X/Y pair; `None` for a short record or the `(0, 0)` "no point" marker.
pub fn decode_point(raw: &[u8], columns: &CoordinateColumns) -> Option<Point> {
    let x = parse_integer(raw.get(columns.x_range())?, "x");
    let y = parse_integer(raw.get(columns.y_range())?, "y");
    if x == 0 && y == 0 {
        return None;
    }
    Some(Point {
        x: x as f64 / COORDINATE_SCALE,
        y: y as f64 / COORDINATE_SCALE,
    })
}

fn trim_padding(bytes: &[u8]) -> &[u8] {
    bytes.trim_with(|c| c == ' ')
}

fn parse_integer(bytes: &[u8], name: &str) -> i64 {
    let text = trim_padding(bytes);
    if text.is_empty() {
        return 0;
    }
    match text.to_str().ok().and_then(|text| text.parse::<i64>().ok()) {
        Some(value) => value,
        None => {
            warn!(field = name, value = %text.as_bstr(), "unparsable numeric field; using 0");
            0
        }
    }
}

fn parse_real(bytes: &[u8], name: &str) -> f64 {
    let text = trim_padding(bytes);
    if text.is_empty() {
        return 0.0;
    }
    match text.to_str().ok().and_then(|text| text.parse::<f64>().ok()) {
        Some(value) => value,
        None => {
            warn!(field = name, value = %text.as_bstr(), "unparsable numeric field; using 0");
            0.0
        }
    }
}
