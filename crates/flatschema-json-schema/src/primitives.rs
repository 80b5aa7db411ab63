use flatschema_core::ir::Scalar;

/// Bounds of an integer primitive, emitted as a `definitions` entry of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerInfo {
    pub scalar: Scalar,
    pub min_value: i64,
    pub max_value: u64,
}

impl IntegerInfo {
    pub fn name(&self) -> &'static str {
        self.scalar.name()
    }
}

/// Width of a floating point primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalInfo {
    pub scalar: Scalar,
    pub bits: u32,
}

impl DecimalInfo {
    pub fn name(&self) -> &'static str {
        self.scalar.name()
    }
}

pub static INTEGER_INFOS: [IntegerInfo; 8] = [
    IntegerInfo {
        scalar: Scalar::Char,
        min_value: i8::MIN as i64,
        max_value: i8::MAX as u64,
    },
    IntegerInfo {
        scalar: Scalar::UChar,
        min_value: u8::MIN as i64,
        max_value: u8::MAX as u64,
    },
    IntegerInfo {
        scalar: Scalar::Short,
        min_value: i16::MIN as i64,
        max_value: i16::MAX as u64,
    },
    IntegerInfo {
        scalar: Scalar::UShort,
        min_value: u16::MIN as i64,
        max_value: u16::MAX as u64,
    },
    IntegerInfo {
        scalar: Scalar::Int,
        min_value: i32::MIN as i64,
        max_value: i32::MAX as u64,
    },
    IntegerInfo {
        scalar: Scalar::UInt,
        min_value: u32::MIN as i64,
        max_value: u32::MAX as u64,
    },
    IntegerInfo {
        scalar: Scalar::Long,
        min_value: i64::MIN,
        max_value: i64::MAX as u64,
    },
    IntegerInfo {
        scalar: Scalar::ULong,
        min_value: u64::MIN as i64,
        max_value: u64::MAX,
    },
];

pub static DECIMAL_INFOS: [DecimalInfo; 2] = [
    DecimalInfo {
        scalar: Scalar::Float,
        bits: 32,
    },
    DecimalInfo {
        scalar: Scalar::Double,
        bits: 64,
    },
];

pub fn integer_info(scalar: Scalar) -> Option<&'static IntegerInfo> {
    INTEGER_INFOS.iter().find(|info| info.scalar == scalar)
}

pub fn decimal_info(scalar: Scalar) -> Option<&'static DecimalInfo> {
    DECIMAL_INFOS.iter().find(|info| info.scalar == scalar)
}

/// Definition key of a numeric primitive, if the catalog carries it.
pub fn primitive_name(scalar: Scalar) -> Option<&'static str> {
    integer_info(scalar)
        .map(IntegerInfo::name)
        .or_else(|| decimal_info(scalar).map(DecimalInfo::name))
}
