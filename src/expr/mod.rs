//! Condition trees.
//!
//! A [`Cond`] is a plain value: combining two conditions builds a fresh
//! composite and never touches either operand. Same-kind composites are
//! flattened when combined, and a composite only parenthesizes children of
//! the other kind, so `AND` of `AND`s renders without redundant parentheses.

use smol_str::SmolStr;

use crate::{
    bind::Binds,
    error::{Error, Result},
    placeholder,
    raw::Raw,
    value::{IntoValue, Value},
    writer::{self, FormatContext, FormatWriter},
};

pub mod between;
pub mod binary;
pub mod cond;
pub mod r#in;
pub mod list;
pub mod unary;

pub use between::Between;
pub use binary::{Compare, Eq, Gt, Gte, Like, Lt, Lte, Neq, Operator};
pub use cond::Conjunction;
pub use r#in::{In, InOperator};
pub use list::{InList, IntoInList};
pub use unary::{Null, UnaryOperator};

#[derive(Debug, Clone)]
pub enum Cond {
    Compare(Compare),
    Between(Between),
    In(In),
    Like(Like),
    Null(Null),
    Not(Box<Cond>),
    Raw(Raw),
    And(Vec<Cond>),
    Or(Vec<Cond>),
}

impl Default for Cond {
    fn default() -> Self {
        Self::new()
    }
}

impl Cond {
    /// The empty condition. It renders as nothing and is skipped when
    /// combined with anything else.
    pub fn new() -> Self {
        Cond::And(Vec::new())
    }

    /// `then` when `flag` holds, the empty condition otherwise.
    pub fn when<T: Into<Cond>>(flag: bool, then: T) -> Self {
        if flag { then.into() } else { Cond::new() }
    }

    pub fn when_else<T, O>(flag: bool, then: T, otherwise: O) -> Self
    where
        T: Into<Cond>,
        O: Into<Cond>,
    {
        if flag { then.into() } else { otherwise.into() }
    }

    pub fn and<C: Into<Cond>>(self, other: C) -> Self {
        let mut list = Vec::new();
        cond::push_flat(&mut list, Conjunction::And, self);
        cond::push_flat(&mut list, Conjunction::And, other.into());
        Cond::And(list)
    }

    pub fn or<C: Into<Cond>>(self, other: C) -> Self {
        let mut list = Vec::new();
        cond::push_flat(&mut list, Conjunction::Or, self);
        cond::push_flat(&mut list, Conjunction::Or, other.into());
        Cond::Or(list)
    }

    /// Whether the condition renders to anything at all.
    pub fn is_valid(&self) -> bool {
        match self {
            Cond::Compare(compare) => !compare.row.is_empty(),
            Cond::Between(between) => !between.column.is_empty(),
            Cond::In(inc) => !inc.column.is_empty(),
            Cond::Like(like) => !like.column.is_empty(),
            Cond::Null(null) => !null.column.is_empty(),
            Cond::Not(inner) => inner.is_valid(),
            Cond::Raw(raw) => !raw.is_empty(),
            Cond::And(list) | Cond::Or(list) => list.iter().any(Cond::is_valid),
        }
    }

    /// Whether the rendered text joins several predicates with a conjunction.
    pub(crate) fn is_composite(&self) -> bool {
        match self {
            Cond::And(list) | Cond::Or(list) => list.iter().filter(|c| c.is_valid()).count() > 1,
            Cond::Compare(compare) => compare.row.len() > 1,
            _ => false,
        }
    }

    pub fn to_sql(&self) -> Result<(String, Binds)> {
        writer::render(self, None)
    }

    /// The condition with its values inlined, for display only.
    pub fn to_bound_sql(&self) -> Result<String> {
        let (sql, binds) = self.to_sql()?;
        placeholder::to_bound_sql(&sql, &binds)
    }
}

impl FormatWriter for Cond {
    fn format_writer(&self, context: &mut FormatContext) -> Result<()> {
        match self {
            Cond::Compare(compare) => compare.format_writer(context),
            Cond::Between(between) => between.format_writer(context),
            Cond::In(inc) => inc.format_writer(context),
            Cond::Like(like) => like.format_writer(context),
            Cond::Null(null) => null.format_writer(context),
            Cond::Not(inner) => cond::write_not(inner, context),
            Cond::Raw(raw) => raw.format_writer(context),
            Cond::And(list) => cond::write_list(list, Conjunction::And, context),
            Cond::Or(list) => cond::write_list(list, Conjunction::Or, context),
        }
    }
}

impl From<Raw> for Cond {
    fn from(value: Raw) -> Self {
        Cond::Raw(value)
    }
}

impl From<&str> for Cond {
    fn from(value: &str) -> Self {
        Cond::Raw(Raw::new(value))
    }
}

impl From<String> for Cond {
    fn from(value: String) -> Self {
        Cond::Raw(Raw::new(value))
    }
}

/// Writes the right hand side of a single-value predicate: a marker, or a
/// parenthesized raw fragment or sub-query.
pub(crate) fn write_operand(
    column: &SmolStr,
    value: &Value,
    context: &mut FormatContext,
) -> Result<()> {
    match value {
        Value::Bind(bind) => context.write_placeholder(bind.clone()),
        Value::List(_) => {
            return Err(Error::UnexpectedValueList {
                column: column.clone(),
            });
        }
        Value::Raw(raw) => {
            context.write_char('(');
            raw.format_writer(context)?;
            context.write_char(')');
        }
        Value::Sub(builder) => {
            context.write_char('(');
            builder.format_subquery(context)?;
            context.write_char(')');
        }
    }
    Ok(())
}

pub fn eq<K: Into<SmolStr>, V: IntoValue>(column: K, value: V) -> Cond {
    Eq::new(column, value).into()
}

pub fn neq<K: Into<SmolStr>, V: IntoValue>(column: K, value: V) -> Cond {
    Neq::new(column, value).into()
}

pub fn lt<K: Into<SmolStr>, V: IntoValue>(column: K, value: V) -> Cond {
    Lt::new(column, value).into()
}

pub fn lte<K: Into<SmolStr>, V: IntoValue>(column: K, value: V) -> Cond {
    Lte::new(column, value).into()
}

pub fn gt<K: Into<SmolStr>, V: IntoValue>(column: K, value: V) -> Cond {
    Gt::new(column, value).into()
}

pub fn gte<K: Into<SmolStr>, V: IntoValue>(column: K, value: V) -> Cond {
    Gte::new(column, value).into()
}

pub fn between<K, L, H>(column: K, low: L, high: H) -> Cond
where
    K: Into<SmolStr>,
    L: IntoValue,
    H: IntoValue,
{
    Between::new(column, low, high).into()
}

pub fn in_list<K: Into<SmolStr>, L: IntoInList>(column: K, values: L) -> Cond {
    In::new(InOperator::In, column, values).into()
}

pub fn not_in<K: Into<SmolStr>, L: IntoInList>(column: K, values: L) -> Cond {
    In::new(InOperator::NotIn, column, values).into()
}

/// `column LIKE '%pattern%'`. The pattern is always wrapped on both sides;
/// anchored matches need a raw condition.
pub fn like<K: Into<SmolStr>, P: Into<String>>(column: K, pattern: P) -> Cond {
    Like::new(column, pattern).into()
}

pub fn is_null<K: Into<SmolStr>>(column: K) -> Cond {
    Null::new(UnaryOperator::Null, column).into()
}

pub fn not_null<K: Into<SmolStr>>(column: K) -> Cond {
    Null::new(UnaryOperator::NotNull, column).into()
}

pub fn not<C: Into<Cond>>(cond: C) -> Cond {
    Cond::Not(Box::new(cond.into()))
}

pub fn and<I>(conds: I) -> Cond
where
    I: IntoIterator,
    I::Item: Into<Cond>,
{
    let mut list = Vec::new();
    for cond in conds {
        cond::push_flat(&mut list, Conjunction::And, cond.into());
    }
    Cond::And(list)
}

pub fn or<I>(conds: I) -> Cond
where
    I: IntoIterator,
    I::Item: Into<Cond>,
{
    let mut list = Vec::new();
    for cond in conds {
        cond::push_flat(&mut list, Conjunction::Or, cond.into());
    }
    Cond::Or(list)
}
