use smol_str::SmolStr;

use crate::{
    builder::Builder,
    dialect::Dialect,
    error::{Error, Result},
    expr::Eq,
    row::Row,
    update::write_assignments,
    writer::{FormatContext, FormatWriter},
};

/// One item of a MySQL `REPLACE`. All items of a statement must be of the
/// same kind.
#[derive(Debug, Clone)]
pub enum Replacement {
    Set(Row),
    Column(SmolStr),
}

impl From<Eq> for Replacement {
    fn from(value: Eq) -> Self {
        Replacement::Set(value.into_row())
    }
}

impl From<Row> for Replacement {
    fn from(value: Row) -> Self {
        Replacement::Set(value)
    }
}

impl From<&str> for Replacement {
    fn from(value: &str) -> Self {
        Replacement::Column(SmolStr::new(value))
    }
}

impl From<String> for Replacement {
    fn from(value: String) -> Self {
        Replacement::Column(SmolStr::from(value))
    }
}

impl From<SmolStr> for Replacement {
    fn from(value: SmolStr) -> Self {
        Replacement::Column(value)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ReplaceStatement {
    items: Vec<Replacement>,
    pub(crate) query: Option<Box<Builder>>,
}

enum Shape<'a> {
    Sets(Vec<&'a Row>),
    Columns(Vec<&'a SmolStr>),
}

impl ReplaceStatement {
    pub(crate) fn new(items: Vec<Replacement>) -> Self {
        Self { items, query: None }
    }

    fn shape(&self) -> Result<Shape<'_>> {
        match self.items.first() {
            None | Some(Replacement::Column(_)) => {
                let mut columns = Vec::with_capacity(self.items.len());
                for item in &self.items {
                    let Replacement::Column(column) = item else {
                        return Err(Error::NonUniformReplacementType);
                    };
                    columns.push(column);
                }
                Ok(Shape::Columns(columns))
            }
            Some(Replacement::Set(_)) => {
                let mut sets = Vec::with_capacity(self.items.len());
                for item in &self.items {
                    let Replacement::Set(row) = item else {
                        return Err(Error::NonUniformReplacementType);
                    };
                    sets.push(row);
                }
                Ok(Shape::Sets(sets))
            }
        }
    }

    pub(crate) fn write(&self, builder: &Builder, context: &mut FormatContext) -> Result<()> {
        let table = builder.table_ref()?;
        if self.items.is_empty() && self.query.is_none() {
            return Err(Error::EmptyReplacement);
        }
        let shape = self.shape()?;
        let dialect = context.dialect()?;
        if dialect != Dialect::MySql {
            return Err(Error::UnsupportedDialect(SmolStr::new_static(dialect.as_str())));
        }

        context.write_str("REPLACE INTO ");
        table.format_writer(context)?;
        match shape {
            Shape::Sets(sets) => {
                context.write_str(" SET ");
                for (index, row) in sets.into_iter().enumerate() {
                    if index > 0 {
                        context.write_char(',');
                    }
                    write_assignments(row, context)?;
                }
            }
            Shape::Columns(columns) => {
                let Some(ref query) = self.query else {
                    return Err(Error::MissingDerivedTable);
                };
                if !columns.is_empty() {
                    context.write_char('(');
                    for (index, column) in columns.into_iter().enumerate() {
                        if index > 0 {
                            context.write_char(',');
                        }
                        context.write_str(column);
                    }
                    context.write_char(')');
                }
                context.write_char(' ');
                query.format_subquery(context)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{bind::Bind, expr::neq};

    use super::*;

    fn mysql() -> Builder {
        Builder::dialect(Dialect::MySql)
    }

    #[test]
    fn test_replace_sets() {
        let mut builder = mysql();
        builder
            .replace([Eq::new("a", 1), Eq::new("b", 2), Eq::new("c", "3")])
            .into_table("table1");
        assert_eq!(
            "REPLACE INTO table1 SET a=1,b=2,c='3'",
            builder.to_bound_sql().unwrap()
        );
        let (_, binds) = builder.to_sql().unwrap();
        assert_eq!(vec![Bind::I32(1), Bind::I32(2), Bind::from("3")], binds);
    }

    #[test]
    fn test_replace_from_select() {
        let mut builder = mysql();
        builder.into_table("table1").replace_from(|b| {
            b.select(["a", "b", "c"]).from("table2");
        });
        assert_eq!(
            "REPLACE INTO table1 SELECT a,b,c FROM table2",
            builder.to_bound_sql().unwrap()
        );

        let mut builder = mysql();
        builder
            .replace(["a", "b", "c"])
            .into_table("table1")
            .replace_from(|b| {
                b.select(["a", "b", "c"]).from("table2").where_(neq("a", 1));
            });
        assert_eq!(
            "REPLACE INTO table1(a,b,c) SELECT a,b,c FROM table2 WHERE a<>1",
            builder.to_bound_sql().unwrap()
        );
    }

    #[test]
    fn test_replace_errors() {
        let mut builder = mysql();
        builder.replace(Vec::<Replacement>::new()).into_table("t");
        assert_eq!(Error::EmptyReplacement, builder.to_sql().unwrap_err());

        let mut builder = mysql();
        builder
            .replace([Replacement::from(Eq::new("a", 1)), Replacement::from("b")])
            .into_table("t");
        assert_eq!(Error::NonUniformReplacementType, builder.to_sql().unwrap_err());

        let mut builder = mysql();
        builder.replace(["a", "b"]).into_table("t");
        assert_eq!(Error::MissingDerivedTable, builder.to_sql().unwrap_err());

        let mut builder = mysql();
        builder.replace([Eq::new("a", 1)]);
        assert_eq!(Error::NoTableName, builder.to_sql().unwrap_err());
    }

    #[test]
    fn test_replace_is_mysql_only() {
        let mut builder = Builder::dialect(Dialect::Postgres);
        builder.replace([Eq::new("a", 1)]).into_table("t");
        assert_eq!(
            Error::UnsupportedDialect(SmolStr::new_static("postgres")),
            builder.to_sql().unwrap_err()
        );

        let mut builder = Builder::new();
        builder.replace([Eq::new("a", 1)]).into_table("t");
        assert_eq!(Error::DialectNotConfigured, builder.to_sql().unwrap_err());
    }
}
