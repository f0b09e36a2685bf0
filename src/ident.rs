use smol_str::SmolStr;

use crate::{
    builder::Builder,
    error::Result,
    writer::{FormatContext, FormatWriter},
};

/// What a statement reads from or writes to.
#[derive(Debug, Clone)]
pub enum TableRef {
    /// A table name, optionally followed by an alias (`table1 t1`).
    Name(SmolStr),
    /// A derived table: `(<sub-query>) alias`.
    Sub { builder: Box<Builder>, alias: SmolStr },
}

impl TableRef {
    pub fn name<T: Into<SmolStr>>(value: T) -> Self {
        TableRef::Name(value.into())
    }

    pub fn sub<A: Into<SmolStr>>(alias: A, builder: Builder) -> Self {
        TableRef::Sub {
            builder: Box::new(builder),
            alias: alias.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TableRef::Name(name) => name.trim().is_empty(),
            TableRef::Sub { .. } => false,
        }
    }
}

impl FormatWriter for TableRef {
    fn format_writer(&self, context: &mut FormatContext) -> Result<()> {
        match self {
            TableRef::Name(name) => context.write_str(name),
            TableRef::Sub { builder, alias } => {
                context.write_char('(');
                builder.format_subquery(context)?;
                context.write_str(") ");
                context.write_str(alias);
            }
        }
        Ok(())
    }
}

pub trait IntoTable {
    fn into_table(self) -> TableRef;
}

impl IntoTable for TableRef {
    fn into_table(self) -> TableRef {
        self
    }
}

impl IntoTable for &str {
    fn into_table(self) -> TableRef {
        TableRef::Name(SmolStr::new(self))
    }
}

impl IntoTable for &String {
    fn into_table(self) -> TableRef {
        TableRef::Name(SmolStr::new(self))
    }
}

impl IntoTable for String {
    fn into_table(self) -> TableRef {
        TableRef::Name(SmolStr::from(self))
    }
}

impl IntoTable for SmolStr {
    fn into_table(self) -> TableRef {
        TableRef::Name(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::Error, expr::eq, sub, tests::format_writer};

    use super::*;

    #[test]
    fn test_named_table() {
        assert_eq!("table1 t1", format_writer(&"table1 t1".into_table(), None).0);
        assert!("  ".into_table().is_empty());
    }

    #[test]
    fn test_derived_table() {
        let derived = TableRef::sub(
            "sub",
            sub(|b| {
                b.select("id").from("table1").where_(eq("a", 1));
            }),
        );
        let (sql, binds) = format_writer(&derived, None);
        assert_eq!("(SELECT id FROM table1 WHERE a=?) sub", sql);
        assert_eq!(1, binds.len());
    }

    #[test]
    fn test_derived_table_must_be_a_query() {
        let derived = TableRef::sub(
            "sub",
            sub(|b| {
                b.insert(crate::expr::Eq::new("a", 1)).into_table("table1");
            }),
        );
        let err = crate::writer::render(&derived, None).unwrap_err();
        assert_eq!(Error::UnsupportedStatementKind("INSERT"), err);
    }
}
