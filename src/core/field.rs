// Fixed-width field descriptors, record schemas, and coordinate column pairs.
use crate::core::error::{Error, ErrorKind};
use crate::core::schema::RecordType;

pub const MAX_FIELD_NAME_LEN: usize = 10;

/// Which side of the column range carries the value; the other side is padding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Justify {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Alpha,
    Numeric,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize)]
pub enum ValueType {
    Integer,
    Real,
    String,
    IntegerList,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub justify: Justify,
    pub kind: FieldKind,
    pub value_type: ValueType,
    pub begin: u8,
    pub end: u8,
    pub len: u8,
    /// Listed in the layer's field definitions.
    pub define: bool,
    /// Populated by `decode`.
    pub set: bool,
}

/// Attribute column: defined and decoded, typed from its kind.
pub const fn field(
    name: &'static str,
    justify: Justify,
    kind: FieldKind,
    begin: u8,
    end: u8,
    len: u8,
) -> FieldDescriptor {
    let value_type = match kind {
        FieldKind::Alpha => ValueType::String,
        FieldKind::Numeric => ValueType::Integer,
    };
    FieldDescriptor {
        name,
        justify,
        kind,
        value_type,
        begin,
        end,
        len,
        define: true,
        set: true,
    }
}

impl FieldDescriptor {
    /// Decoded for internal use (keys, list members) but not a layer attribute.
    pub const fn internal(mut self) -> Self {
        self.define = false;
        self
    }

    /// Occupies columns but is neither defined nor decoded.
    pub const fn skipped(mut self) -> Self {
        self.define = false;
        self.set = false;
        self
    }

    pub const fn real(mut self) -> Self {
        self.value_type = ValueType::Real;
        self
    }

    /// Zero-based half-open byte range of the field within a record.
    pub fn byte_range(&self) -> std::ops::Range<usize> {
        (self.begin as usize - 1)..(self.end as usize)
    }

    pub fn validate(&self) -> Result<(), Error> {
        let problem = if self.name.is_empty() || self.name.len() > MAX_FIELD_NAME_LEN {
            Some("field name must be 1-10 characters")
        } else if self.begin == 0 {
            Some("begin column is 1-based")
        } else if self.begin > self.end {
            Some("begin column after end column")
        } else if self.len == 0
            || u16::from(self.end) - u16::from(self.begin) + 1 != u16::from(self.len)
        {
            Some("field length does not match its column range")
        } else {
            None
        };
        match problem {
            Some(problem) => Err(Error::new(ErrorKind::Schema).with_message(format!(
                "{problem}: {} [{}, {}] len {}",
                self.name, self.begin, self.end, self.len
            ))),
            None => Ok(()),
        }
    }
}

#[derive(Debug)]
pub struct RecordSchema {
    pub record_type: RecordType,
    pub fields: &'static [FieldDescriptor],
    pub record_length: u8,
}

impl RecordSchema {
    pub const fn new(
        record_type: RecordType,
        fields: &'static [FieldDescriptor],
        record_length: u8,
    ) -> Self {
        Self {
            record_type,
            fields,
            record_length,
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn defined_fields(&self) -> impl Iterator<Item = &'static FieldDescriptor> + '_ {
        self.fields.iter().filter(|field| field.define)
    }

    pub fn validate(&self) -> Result<(), Error> {
        let mut max_end = 0u8;
        for (i, field) in self.fields.iter().enumerate() {
            field.validate()?;
            max_end = max_end.max(field.end);
            for other in &self.fields[i + 1..] {
                if field.begin <= other.end && other.begin <= field.end {
                    return Err(Error::new(ErrorKind::Schema).with_message(format!(
                        "{:?}: {} overlaps {}",
                        self.record_type, field.name, other.name
                    )));
                }
                if field.name == other.name {
                    return Err(Error::new(ErrorKind::Schema).with_message(format!(
                        "{:?}: duplicate field {}",
                        self.record_type, field.name
                    )));
                }
            }
        }
        if self.record_length < max_end {
            return Err(Error::new(ErrorKind::Schema).with_message(format!(
                "{:?}: record length {} shorter than last column {max_end}",
                self.record_type, self.record_length
            )));
        }
        Ok(())
    }
}

/// An X/Y column pair holding longitude/latitude in millionths of a degree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CoordinateColumns {
    pub x_begin: u8,
    pub x_end: u8,
    pub y_begin: u8,
    pub y_end: u8,
}

impl CoordinateColumns {
    pub const fn new(x_begin: u8, x_end: u8, y_begin: u8, y_end: u8) -> Self {
        Self {
            x_begin,
            x_end,
            y_begin,
            y_end,
        }
    }

    pub fn x_range(&self) -> std::ops::Range<usize> {
        (self.x_begin as usize - 1)..(self.x_end as usize)
    }

    pub fn y_range(&self) -> std::ops::Range<usize> {
        (self.y_begin as usize - 1)..(self.y_end as usize)
    }
}
