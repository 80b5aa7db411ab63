use super::types::{Definition, EnumId, StructId};

/// Numeric IDL primitives. `bool` and `string` are separate `Type` variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Char,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
}

impl Scalar {
    pub const ALL: [Scalar; 10] = [
        Scalar::Char,
        Scalar::UChar,
        Scalar::Short,
        Scalar::UShort,
        Scalar::Int,
        Scalar::UInt,
        Scalar::Long,
        Scalar::ULong,
        Scalar::Float,
        Scalar::Double,
    ];

    /// Canonical name, used as the primitive's definition key.
    pub fn name(self) -> &'static str {
        match self {
            Scalar::Char => "char",
            Scalar::UChar => "uchar",
            Scalar::Short => "short",
            Scalar::UShort => "ushort",
            Scalar::Int => "int",
            Scalar::UInt => "uint",
            Scalar::Long => "long",
            Scalar::ULong => "ulong",
            Scalar::Float => "float",
            Scalar::Double => "double",
        }
    }

    /// Parse any IDL spelling of a numeric primitive (`byte`, `int8`, `char`, ...).
    pub fn from_idl(name: &str) -> Option<Self> {
        let scalar = match name {
            "byte" | "int8" | "char" => Scalar::Char,
            "ubyte" | "uint8" | "uchar" => Scalar::UChar,
            "short" | "int16" => Scalar::Short,
            "ushort" | "uint16" => Scalar::UShort,
            "int" | "int32" => Scalar::Int,
            "uint" | "uint32" => Scalar::UInt,
            "long" | "int64" => Scalar::Long,
            "ulong" | "uint64" => Scalar::ULong,
            "float" | "float32" => Scalar::Float,
            "double" | "float64" => Scalar::Double,
            _ => return None,
        };
        Some(scalar)
    }

    pub fn is_integer(self) -> bool {
        !matches!(self, Scalar::Float | Scalar::Double)
    }

    /// True when `value` is representable by this integer type.
    pub fn fits(self, value: i64) -> bool {
        match self {
            Scalar::Char => i8::try_from(value).is_ok(),
            Scalar::UChar => u8::try_from(value).is_ok(),
            Scalar::Short => i16::try_from(value).is_ok(),
            Scalar::UShort => u16::try_from(value).is_ok(),
            Scalar::Int => i32::try_from(value).is_ok(),
            Scalar::UInt => u32::try_from(value).is_ok(),
            Scalar::ULong => value >= 0,
            Scalar::Long | Scalar::Float | Scalar::Double => true,
        }
    }
}

/// A resolved field or element type.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Bool,
    Scalar(Scalar),
    String,
    /// An integer field typed by a (non-union) enum.
    Enum { underlying: Scalar, def: EnumId },
    Vector(Box<Type>),
    /// Reference to a struct or a table.
    Struct(StructId),
    /// Union payload field.
    Union(EnumId),
    /// Union discriminator (`<field>_type`) field.
    UnionType(EnumId),
}

impl Type {
    /// True for types stored inline as a scalar value.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Type::Bool | Type::Scalar(_) | Type::Enum { .. } | Type::UnionType(_)
        )
    }
}

/// A single enum or union member.
#[derive(Debug, Clone)]
pub struct EnumVal {
    pub name: String,
    pub value: i64,
    /// Payload type of a union member; `None` for `NONE` and for plain enums.
    pub union_type: Option<Type>,
}

/// An enum or a union.
#[derive(Debug, Clone)]
pub struct EnumDef {
    pub def: Definition,
    pub underlying: Scalar,
    pub values: Vec<EnumVal>,
    pub is_union: bool,
}

/// A struct (`fixed`) or a table.
#[derive(Debug, Clone)]
pub struct StructDef {
    pub def: Definition,
    pub fields: Vec<FieldDef>,
    pub fixed: bool,
    /// Index into `fields` of the field marked `key`.
    pub key_field: Option<usize>,
}

impl StructDef {
    pub fn has_key(&self) -> bool {
        self.key_field.is_some()
    }

    pub fn key_field(&self) -> Option<&FieldDef> {
        self.key_field.and_then(|i| self.fields.get(i))
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.required)
    }
}

/// A field on a struct or table.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub ty: Type,
    pub required: bool,
    pub key: bool,
    pub doc_comment: Vec<String>,
}
