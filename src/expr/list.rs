use crate::{
    bind::Bind,
    builder::Builder,
    raw::Raw,
    value::{IntoValue, Value},
};

/// Right hand side of an `IN` predicate.
#[derive(Debug, Clone)]
pub enum InList {
    Binds(Vec<Bind>),
    Raw(Raw),
    Sub(Box<Builder>),
}

pub trait IntoInList {
    fn into_in_list(self) -> InList;
}

impl IntoInList for InList {
    fn into_in_list(self) -> InList {
        self
    }
}

impl<T> IntoInList for T
where
    T: IntoValue,
{
    fn into_in_list(self) -> InList {
        match self.into_value() {
            Value::Bind(bind) => InList::Binds(vec![bind]),
            Value::List(items) => InList::Binds(items),
            Value::Raw(raw) => InList::Raw(raw),
            Value::Sub(builder) => InList::Sub(builder),
        }
    }
}
