use smol_str::SmolStr;

use crate::{
    bind::Bind,
    error::{Error, Result},
    writer::{FormatContext, FormatWriter},
};

use super::{Cond, InList, IntoInList};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InOperator {
    In,
    NotIn,
}

impl InOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            InOperator::In => " IN ",
            InOperator::NotIn => " NOT IN ",
        }
    }
}

#[derive(Debug, Clone)]
pub struct In {
    pub(crate) operator: InOperator,
    pub(crate) column: SmolStr,
    pub(crate) list: InList,
}

impl In {
    pub fn new<K, L>(operator: InOperator, column: K, list: L) -> Self
    where
        K: Into<SmolStr>,
        L: IntoInList,
    {
        Self {
            operator,
            column: column.into(),
            list: list.into_in_list(),
        }
    }
}

impl From<In> for Cond {
    fn from(value: In) -> Self {
        Cond::In(value)
    }
}

/// `column IN (?,?,...)`. An empty set has no valid rendering.
pub(crate) fn write_bind_set(
    operator: InOperator,
    column: &SmolStr,
    items: &[Bind],
    context: &mut FormatContext,
) -> Result<()> {
    if items.is_empty() {
        return Err(Error::EmptyValueSet {
            column: column.clone(),
        });
    }
    context.write_str(column);
    context.write_str(operator.as_str());
    context.write_char('(');
    context.write_placeholders(items.iter().cloned());
    context.write_char(')');
    Ok(())
}

impl FormatWriter for In {
    fn format_writer(&self, context: &mut FormatContext) -> Result<()> {
        match &self.list {
            InList::Binds(items) => write_bind_set(self.operator, &self.column, items, context),
            InList::Raw(raw) => {
                context.write_str(&self.column);
                context.write_str(self.operator.as_str());
                context.write_char('(');
                raw.format_writer(context)?;
                context.write_char(')');
                Ok(())
            }
            InList::Sub(builder) => {
                context.write_str(&self.column);
                context.write_str(self.operator.as_str());
                context.write_char('(');
                builder.format_subquery(context)?;
                context.write_char(')');
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Builder,
        expr::{eq, in_list, not_in},
        raw::Raw,
        tests::format_writer,
    };

    use super::*;

    #[test]
    fn test_in_binds() {
        let (sql, binds) = format_writer(&in_list("id", [1, 2]), None);
        assert_eq!("id IN (?,?)", sql);
        assert_eq!(vec![Bind::I32(1), Bind::I32(2)], binds);

        let (sql, _) = format_writer(&not_in("name", vec!["a"]), None);
        assert_eq!("name NOT IN (?)", sql);
    }

    #[test]
    fn test_empty_set_is_an_error() {
        let err = in_list("id", Vec::<i32>::new()).to_sql().unwrap_err();
        assert_eq!(
            Error::EmptyValueSet {
                column: SmolStr::new_static("id")
            },
            err
        );
    }

    #[test]
    fn test_in_raw() {
        let raw = Raw::new("SELECT id FROM t WHERE k=?").bind(3);
        let (sql, binds) = format_writer(&in_list("id", raw), None);
        assert_eq!("id IN (SELECT id FROM t WHERE k=?)", sql);
        assert_eq!(vec![Bind::I32(3)], binds);
    }

    #[test]
    fn test_in_sub_query() {
        let mut sub = Builder::new();
        sub.select("user_id").from("bans").where_(eq("active", true));
        let (sql, binds) = format_writer(&not_in("id", sub), None);
        assert_eq!("id NOT IN (SELECT user_id FROM bans WHERE active=?)", sql);
        assert_eq!(vec![Bind::Bool(true)], binds);
    }
}
