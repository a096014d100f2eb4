use std::fmt;
use std::str::FromStr;

use crate::error::OptColError;

/// SQL column type codes, numbered as in `java.sql.Types`.
///
/// A declared column type travels with every parameter write so that an
/// absent value can be bound as a correctly typed NULL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    Array,
    BigInt,
    Binary,
    Bit,
    Blob,
    Boolean,
    Char,
    Clob,
    Date,
    Decimal,
    Double,
    Float,
    Integer,
    LongVarChar,
    NChar,
    Null,
    Numeric,
    NVarChar,
    Other,
    Real,
    SmallInt,
    Struct,
    Time,
    TimeWithTimezone,
    Timestamp,
    TimestampWithTimezone,
    TinyInt,
    VarBinary,
    VarChar,
}

const ALL: [SqlType; 29] = [
    SqlType::Array,
    SqlType::BigInt,
    SqlType::Binary,
    SqlType::Bit,
    SqlType::Blob,
    SqlType::Boolean,
    SqlType::Char,
    SqlType::Clob,
    SqlType::Date,
    SqlType::Decimal,
    SqlType::Double,
    SqlType::Float,
    SqlType::Integer,
    SqlType::LongVarChar,
    SqlType::NChar,
    SqlType::Null,
    SqlType::Numeric,
    SqlType::NVarChar,
    SqlType::Other,
    SqlType::Real,
    SqlType::SmallInt,
    SqlType::Struct,
    SqlType::Time,
    SqlType::TimeWithTimezone,
    SqlType::Timestamp,
    SqlType::TimestampWithTimezone,
    SqlType::TinyInt,
    SqlType::VarBinary,
    SqlType::VarChar,
];

impl SqlType {
    /// Returns the numeric type code.
    pub fn code(self) -> i32 {
        match self {
            SqlType::Array => 2003,
            SqlType::BigInt => -5,
            SqlType::Binary => -2,
            SqlType::Bit => -7,
            SqlType::Blob => 2004,
            SqlType::Boolean => 16,
            SqlType::Char => 1,
            SqlType::Clob => 2005,
            SqlType::Date => 91,
            SqlType::Decimal => 3,
            SqlType::Double => 8,
            SqlType::Float => 6,
            SqlType::Integer => 4,
            SqlType::LongVarChar => -1,
            SqlType::NChar => -15,
            SqlType::Null => 0,
            SqlType::Numeric => 2,
            SqlType::NVarChar => -9,
            SqlType::Other => 1111,
            SqlType::Real => 7,
            SqlType::SmallInt => 5,
            SqlType::Struct => 2002,
            SqlType::Time => 92,
            SqlType::TimeWithTimezone => 2013,
            SqlType::Timestamp => 93,
            SqlType::TimestampWithTimezone => 2014,
            SqlType::TinyInt => -6,
            SqlType::VarBinary => -3,
            SqlType::VarChar => 12,
        }
    }

    /// Looks up a type by its numeric code.
    pub fn from_code(code: i32) -> Option<SqlType> {
        ALL.iter().copied().find(|t| t.code() == code)
    }

    /// Returns the upper-case type name, e.g. `VARCHAR`.
    pub fn name(self) -> &'static str {
        match self {
            SqlType::Array => "ARRAY",
            SqlType::BigInt => "BIGINT",
            SqlType::Binary => "BINARY",
            SqlType::Bit => "BIT",
            SqlType::Blob => "BLOB",
            SqlType::Boolean => "BOOLEAN",
            SqlType::Char => "CHAR",
            SqlType::Clob => "CLOB",
            SqlType::Date => "DATE",
            SqlType::Decimal => "DECIMAL",
            SqlType::Double => "DOUBLE",
            SqlType::Float => "FLOAT",
            SqlType::Integer => "INTEGER",
            SqlType::LongVarChar => "LONGVARCHAR",
            SqlType::NChar => "NCHAR",
            SqlType::Null => "NULL",
            SqlType::Numeric => "NUMERIC",
            SqlType::NVarChar => "NVARCHAR",
            SqlType::Other => "OTHER",
            SqlType::Real => "REAL",
            SqlType::SmallInt => "SMALLINT",
            SqlType::Struct => "STRUCT",
            SqlType::Time => "TIME",
            SqlType::TimeWithTimezone => "TIME_WITH_TIMEZONE",
            SqlType::Timestamp => "TIMESTAMP",
            SqlType::TimestampWithTimezone => "TIMESTAMP_WITH_TIMEZONE",
            SqlType::TinyInt => "TINYINT",
            SqlType::VarBinary => "VARBINARY",
            SqlType::VarChar => "VARCHAR",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SqlType {
    type Err = OptColError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALL.iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| OptColError::UnknownSqlType(s.to_string()))
    }
}
