use std::fmt::{self, Write};

// max size is 32 bytes
#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    Null,
    String(String),
    Bool(bool),
    F32(f32),
    F64(f64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
}

pub type Binds = Vec<Bind>;

impl Bind {
    pub fn is_null(&self) -> bool {
        matches!(self, Bind::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Bind::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Writes the value as an inline sql literal.
    ///
    /// Strings are single quoted as-is, embedded quotes are not escaped. The
    /// output is meant for display and debugging, never for a driver.
    pub fn write_literal<W: Write>(&self, writer: &mut W) -> fmt::Result {
        match self {
            Bind::Null => writer.write_str("NULL"),
            Bind::String(value) => write!(writer, "'{value}'"),
            Bind::Bool(value) => writer.write_str(if *value { "true" } else { "false" }),
            Bind::F32(value) => write!(writer, "{value}"),
            Bind::F64(value) => write!(writer, "{value}"),
            Bind::I8(value) => write!(writer, "{value}"),
            Bind::I16(value) => write!(writer, "{value}"),
            Bind::I32(value) => write!(writer, "{value}"),
            Bind::I64(value) => write!(writer, "{value}"),
            Bind::U8(value) => write!(writer, "{value}"),
            Bind::U16(value) => write!(writer, "{value}"),
            Bind::U32(value) => write!(writer, "{value}"),
            Bind::U64(value) => write!(writer, "{value}"),
        }
    }
}

pub trait IntoBind {
    fn into_bind(self) -> Bind;
}

impl IntoBind for Bind {
    fn into_bind(self) -> Bind {
        self
    }
}

impl<T> IntoBind for Option<T>
where
    T: IntoBind,
{
    fn into_bind(self) -> Bind {
        if let Some(value) = self {
            value.into_bind()
        } else {
            Bind::Null
        }
    }
}

macro_rules! impl_into_bind {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl IntoBind for $ty {
                #[inline]
                fn into_bind(self) -> Bind {
                    Bind::$variant(self)
                }
            }

            impl From<$ty> for Bind {
                #[inline]
                fn from(value: $ty) -> Self {
                    Bind::$variant(value)
                }
            }
        )+
    };
}

impl_into_bind! {
    bool => Bool,
    f32 => F32,
    f64 => F64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    String => String,
}

impl IntoBind for &str {
    fn into_bind(self) -> Bind {
        Bind::String(self.to_owned())
    }
}

impl From<&str> for Bind {
    fn from(value: &str) -> Self {
        Bind::String(value.to_owned())
    }
}

impl IntoBind for &String {
    fn into_bind(self) -> Bind {
        Bind::String(self.clone())
    }
}

impl IntoBind for smol_str::SmolStr {
    fn into_bind(self) -> Bind {
        Bind::String(self.to_string())
    }
}
