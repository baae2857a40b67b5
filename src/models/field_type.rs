use serde::{Deserialize, Serialize};

/// Wire-format field type tag.
///
/// The tag space is the classic MySQL column type numbering, which the
/// sharded backends report unchanged. Tags without a registered
/// conversion (strings, blobs, anything unrecognized) materialize as
/// raw bytes; see [`crate::convert`].
///
/// Unknown tags survive a round trip through [`FieldType::Unknown`],
/// so a newer gateway never breaks an older client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub enum FieldType {
    /// Legacy decimal.
    Decimal,
    /// 8-bit integer.
    Tiny,
    /// 16-bit integer.
    Short,
    /// 32-bit integer.
    Long,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Explicit NULL column.
    Null,
    /// Timestamp.
    Timestamp,
    /// 64-bit integer.
    LongLong,
    /// 24-bit integer.
    Int24,
    /// Date.
    Date,
    /// Time of day / interval.
    Time,
    /// Date and time.
    DateTime,
    /// Year.
    Year,
    /// Date, newer encoding.
    NewDate,
    /// Variable-length character data.
    VarChar,
    /// Bit field.
    Bit,
    /// Fixed-point decimal, newer encoding.
    NewDecimal,
    /// Enumeration.
    Enum,
    /// Set.
    Set,
    /// Tiny blob.
    TinyBlob,
    /// Medium blob.
    MediumBlob,
    /// Long blob.
    LongBlob,
    /// Blob.
    Blob,
    /// Variable-length string.
    VarString,
    /// Fixed-length string.
    String,
    /// Spatial data.
    Geometry,
    /// Tag this client does not know; passed through untouched.
    Unknown(u16),
}

impl FieldType {
    /// The numeric wire tag.
    pub fn tag(self) -> u16 {
        self.into()
    }
}

impl From<u16> for FieldType {
    fn from(tag: u16) -> Self {
        match tag {
            0 => FieldType::Decimal,
            1 => FieldType::Tiny,
            2 => FieldType::Short,
            3 => FieldType::Long,
            4 => FieldType::Float,
            5 => FieldType::Double,
            6 => FieldType::Null,
            7 => FieldType::Timestamp,
            8 => FieldType::LongLong,
            9 => FieldType::Int24,
            10 => FieldType::Date,
            11 => FieldType::Time,
            12 => FieldType::DateTime,
            13 => FieldType::Year,
            14 => FieldType::NewDate,
            15 => FieldType::VarChar,
            16 => FieldType::Bit,
            246 => FieldType::NewDecimal,
            247 => FieldType::Enum,
            248 => FieldType::Set,
            249 => FieldType::TinyBlob,
            250 => FieldType::MediumBlob,
            251 => FieldType::LongBlob,
            252 => FieldType::Blob,
            253 => FieldType::VarString,
            254 => FieldType::String,
            255 => FieldType::Geometry,
            other => FieldType::Unknown(other),
        }
    }
}

impl From<FieldType> for u16 {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Decimal => 0,
            FieldType::Tiny => 1,
            FieldType::Short => 2,
            FieldType::Long => 3,
            FieldType::Float => 4,
            FieldType::Double => 5,
            FieldType::Null => 6,
            FieldType::Timestamp => 7,
            FieldType::LongLong => 8,
            FieldType::Int24 => 9,
            FieldType::Date => 10,
            FieldType::Time => 11,
            FieldType::DateTime => 12,
            FieldType::Year => 13,
            FieldType::NewDate => 14,
            FieldType::VarChar => 15,
            FieldType::Bit => 16,
            FieldType::NewDecimal => 246,
            FieldType::Enum => 247,
            FieldType::Set => 248,
            FieldType::TinyBlob => 249,
            FieldType::MediumBlob => 250,
            FieldType::LongBlob => 251,
            FieldType::Blob => 252,
            FieldType::VarString => 253,
            FieldType::String => 254,
            FieldType::Geometry => 255,
            FieldType::Unknown(tag) => tag,
        }
    }
}
