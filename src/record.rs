use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A single input record: two integer fields that are summed together.
///
/// Keys are matched case-insensitively (`a` or `A`). A field that is missing
/// or `null` keeps its previous value (0 unless set earlier in the object), a
/// repeated key overwrites the earlier value, and unknown keys are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Record {
    pub a: i64,
    pub b: i64,
}

enum Field {
    A,
    B,
    Other,
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = Field;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a field name")
            }

            fn visit_str<E: de::Error>(self, key: &str) -> Result<Field, E> {
                Ok(if key.eq_ignore_ascii_case("a") {
                    Field::A
                } else if key.eq_ignore_ascii_case("b") {
                    Field::B
                } else {
                    Field::Other
                })
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with integer fields a and b")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::default();
        while let Some(field) = map.next_key::<Field>()? {
            let slot = match field {
                Field::A => &mut record.a,
                Field::B => &mut record.b,
                Field::Other => {
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
            };
            if let Some(value) = map.next_value::<Option<i64>>()? {
                *slot = value;
            }
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

impl Record {
    pub fn new(a: i64, b: i64) -> Self {
        Self { a, b }
    }

    /// Contribution of this record to a sum, wrapping at the `i64` width
    #[inline]
    pub fn value(&self) -> i64 {
        self.a.wrapping_add(self.b)
    }
}

impl From<(i64, i64)> for Record {
    fn from((a, b): (i64, i64)) -> Self {
        Self { a, b }
    }
}
