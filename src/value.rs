use crate::{
    bind::{Bind, IntoBind},
    builder::Builder,
    raw::Raw,
};

/// What a column can be compared with or assigned to.
#[derive(Debug, Clone)]
pub enum Value {
    Bind(Bind),
    /// A homogeneous list, rendered as an `IN` set.
    List(Vec<Bind>),
    Raw(Raw),
    Sub(Box<Builder>),
}

impl Value {
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }
}

pub trait IntoValue {
    fn into_value(self) -> Value;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for Bind {
    fn into_value(self) -> Value {
        Value::Bind(self)
    }
}

impl IntoValue for Raw {
    fn into_value(self) -> Value {
        Value::Raw(self)
    }
}

impl IntoValue for Builder {
    fn into_value(self) -> Value {
        Value::Sub(Box::new(self))
    }
}

impl<T> IntoValue for Option<T>
where
    T: IntoBind,
{
    fn into_value(self) -> Value {
        Value::Bind(self.into_bind())
    }
}

impl<T> IntoValue for Vec<T>
where
    T: IntoBind,
{
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(IntoBind::into_bind).collect())
    }
}

impl<T, const N: usize> IntoValue for [T; N]
where
    T: IntoBind,
{
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(IntoBind::into_bind).collect())
    }
}

impl<T> IntoValue for &[T]
where
    T: IntoBind + Clone,
{
    fn into_value(self) -> Value {
        Value::List(self.iter().cloned().map(IntoBind::into_bind).collect())
    }
}

macro_rules! impl_scalar_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntoValue for $ty {
                #[inline]
                fn into_value(self) -> Value {
                    Value::Bind(self.into_bind())
                }
            }
        )+
    };
}

impl_scalar_value!(
    bool,
    f32,
    f64,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    String,
    &str,
    &String,
    smol_str::SmolStr,
);
