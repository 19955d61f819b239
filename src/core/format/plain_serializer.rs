//! A `serde::Serializer` that produces a plain `serde_json::Value` tree.
//!
//! Compared to `serde_json::to_value` it:
//! - renders unit enum variants as `"<Enum>.<VARIANT>"`,
//! - drops struct fields whose name starts with `_`,
//! - can replace long sequences with a length placeholder,
//! - can tag every struct with its type name under a caller-chosen key.
//!
//! Types that want a different shape in the output simply implement
//! `Serialize` to emit it; the serializer recurses into whatever they produce.

use serde::ser::{self, Serialize};
use serde_json::{Map, Number, Value};

use super::FormatError;

/// Knobs for [`object_to_value`].
#[derive(Debug, Clone, Default)]
pub struct PlainOptions {
    /// Sequences longer than this are collapsed into a placeholder string.
    /// `None` and `Some(0)` both disable the collapse.
    pub abbreviation: Option<usize>,

    /// When set, every struct gets its type name stored under this key.
    pub class_key: Option<String>,
}

/// Converts any serializable value into a plain nested structure.
pub fn object_to_value<T: Serialize + ?Sized>(
    obj: &T,
    options: &PlainOptions,
) -> Result<Value, FormatError> {
    obj.serialize(PlainSerializer { options })
}

fn abbreviated(len: usize) -> Value {
    Value::String(format!(" --- length of element {} ---,", len))
}

fn float(v: f64) -> Value {
    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}

#[derive(Clone, Copy)]
struct PlainSerializer<'a> {
    options: &'a PlainOptions,
}

impl<'a> PlainSerializer<'a> {
    fn finish_seq(&self, items: Vec<Value>) -> Value {
        match self.options.abbreviation {
            Some(limit) if limit > 0 && items.len() > limit => abbreviated(items.len()),
            _ => Value::Array(items),
        }
    }

    fn tag(&self, map: &mut Map<String, Value>, name: &'static str) {
        if let Some(key) = &self.options.class_key {
            map.insert(key.clone(), Value::String(name.to_string()));
        }
    }
}

impl<'a> ser::Serializer for PlainSerializer<'a> {
    type Ok = Value;
    type Error = FormatError;

    type SerializeSeq = SeqBuilder<'a>;
    type SerializeTuple = SeqBuilder<'a>;
    type SerializeTupleStruct = SeqBuilder<'a>;
    type SerializeTupleVariant = VariantSeqBuilder<'a>;
    type SerializeMap = MapBuilder<'a>;
    type SerializeStruct = StructBuilder<'a>;
    type SerializeStructVariant = VariantStructBuilder<'a>;

    fn serialize_bool(self, v: bool) -> Result<Value, FormatError> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, FormatError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, FormatError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, FormatError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, FormatError> {
        Ok(Value::Number(v.into()))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, FormatError> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, FormatError> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, FormatError> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, FormatError> {
        Ok(Value::Number(v.into()))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, FormatError> {
        Ok(float(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, FormatError> {
        Ok(float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, FormatError> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, FormatError> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, FormatError> {
        let items = v.iter().map(|b| Value::Number((*b).into())).collect();
        Ok(self.finish_seq(items))
    }

    fn serialize_none(self) -> Result<Value, FormatError> {
        Ok(Value::Null)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Value, FormatError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, FormatError> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value, FormatError> {
        let mut map = Map::new();
        self.tag(&mut map, name);
        Ok(Value::Object(map))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, FormatError> {
        // Member names are upper case whatever the serde renaming.
        Ok(Value::String(format!(
            "{}.{}",
            name,
            variant.to_ascii_uppercase()
        )))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, FormatError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, FormatError> {
        let mut map = Map::new();
        map.insert(variant.to_string(), value.serialize(self)?);
        Ok(Value::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqBuilder<'a>, FormatError> {
        Ok(SeqBuilder {
            ser: self,
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqBuilder<'a>, FormatError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqBuilder<'a>, FormatError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<VariantSeqBuilder<'a>, FormatError> {
        Ok(VariantSeqBuilder {
            variant,
            inner: self.serialize_seq(Some(len))?,
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapBuilder<'a>, FormatError> {
        Ok(MapBuilder {
            ser: self,
            map: Map::new(),
            pending_key: None,
        })
    }

    fn serialize_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<StructBuilder<'a>, FormatError> {
        Ok(StructBuilder {
            ser: self,
            name,
            map: Map::new(),
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<VariantStructBuilder<'a>, FormatError> {
        Ok(VariantStructBuilder {
            variant,
            inner: self.serialize_struct(name, len)?,
        })
    }
}

// ============================================================================
// COMPOUND BUILDERS
// ============================================================================

pub(crate) struct SeqBuilder<'a> {
    ser: PlainSerializer<'a>,
    items: Vec<Value>,
}

impl<'a> SeqBuilder<'a> {
    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), FormatError> {
        self.items.push(value.serialize(self.ser)?);
        Ok(())
    }

    fn finish(self) -> Value {
        self.ser.finish_seq(self.items)
    }
}

impl<'a> ser::SerializeSeq for SeqBuilder<'a> {
    type Ok = Value;
    type Error = FormatError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), FormatError> {
        self.push(value)
    }

    fn end(self) -> Result<Value, FormatError> {
        Ok(self.finish())
    }
}

impl<'a> ser::SerializeTuple for SeqBuilder<'a> {
    type Ok = Value;
    type Error = FormatError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), FormatError> {
        self.push(value)
    }

    fn end(self) -> Result<Value, FormatError> {
        Ok(self.finish())
    }
}

impl<'a> ser::SerializeTupleStruct for SeqBuilder<'a> {
    type Ok = Value;
    type Error = FormatError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), FormatError> {
        self.push(value)
    }

    fn end(self) -> Result<Value, FormatError> {
        Ok(self.finish())
    }
}

pub(crate) struct VariantSeqBuilder<'a> {
    variant: &'static str,
    inner: SeqBuilder<'a>,
}

impl<'a> ser::SerializeTupleVariant for VariantSeqBuilder<'a> {
    type Ok = Value;
    type Error = FormatError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), FormatError> {
        self.inner.push(value)
    }

    fn end(self) -> Result<Value, FormatError> {
        let mut map = Map::new();
        map.insert(self.variant.to_string(), self.inner.finish());
        Ok(Value::Object(map))
    }
}

pub(crate) struct MapBuilder<'a> {
    ser: PlainSerializer<'a>,
    map: Map<String, Value>,
    pending_key: Option<String>,
}

impl<'a> ser::SerializeMap for MapBuilder<'a> {
    type Ok = Value;
    type Error = FormatError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), FormatError> {
        let key = match key.serialize(self.ser)? {
            Value::String(s) => s,
            Value::Null => "None".to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Number(n) => n.to_string(),
            _ => return Err(FormatError::Custom("map key must be a scalar".to_string())),
        };
        self.pending_key = Some(key);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), FormatError> {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| FormatError::Custom("map value without a key".to_string()))?;
        self.map.insert(key, value.serialize(self.ser)?);
        Ok(())
    }

    fn end(self) -> Result<Value, FormatError> {
        Ok(Value::Object(self.map))
    }
}

pub(crate) struct StructBuilder<'a> {
    ser: PlainSerializer<'a>,
    name: &'static str,
    map: Map<String, Value>,
}

impl<'a> StructBuilder<'a> {
    fn field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), FormatError> {
        // Private-by-convention fields stay out of the output.
        if key.starts_with('_') {
            return Ok(());
        }
        self.map.insert(key.to_string(), value.serialize(self.ser)?);
        Ok(())
    }

    fn finish(mut self) -> Value {
        self.ser.tag(&mut self.map, self.name);
        Value::Object(self.map)
    }
}

impl<'a> ser::SerializeStruct for StructBuilder<'a> {
    type Ok = Value;
    type Error = FormatError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), FormatError> {
        self.field(key, value)
    }

    fn end(self) -> Result<Value, FormatError> {
        Ok(self.finish())
    }
}

pub(crate) struct VariantStructBuilder<'a> {
    variant: &'static str,
    inner: StructBuilder<'a>,
}

impl<'a> ser::SerializeStructVariant for VariantStructBuilder<'a> {
    type Ok = Value;
    type Error = FormatError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), FormatError> {
        self.inner.field(key, value)
    }

    fn end(self) -> Result<Value, FormatError> {
        let mut map = Map::new();
        map.insert(self.variant.to_string(), self.inner.finish());
        Ok(Value::Object(map))
    }
}
