use crate::{
    error::Result,
    expr::Cond,
    ident::TableRef,
    writer::{FormatContext, FormatWriter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// Bare `JOIN`.
    Plain,
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinType::Plain => " JOIN ",
            JoinType::Inner => " INNER JOIN ",
            JoinType::Left => " LEFT JOIN ",
            JoinType::Right => " RIGHT JOIN ",
            JoinType::Full => " FULL JOIN ",
            JoinType::Cross => " CROSS JOIN ",
        }
    }
}

#[derive(Debug, Clone)]
pub struct JoinClause {
    pub(crate) ty: JoinType,
    pub(crate) table: TableRef,
    pub(crate) on: Cond,
}

impl JoinClause {
    pub fn new<C: Into<Cond>>(ty: JoinType, table: TableRef, on: C) -> Self {
        Self {
            ty,
            table,
            on: on.into(),
        }
    }
}

impl FormatWriter for JoinClause {
    fn format_writer(&self, context: &mut FormatContext) -> Result<()> {
        context.write_str(self.ty.as_str());
        self.table.format_writer(context)?;
        // a cross join may come without a condition
        if self.on.is_valid() {
            context.write_str(" ON ");
            self.on.format_writer(context)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        bind::Bind,
        expr::{eq, lt},
        ident::IntoTable,
        tests::format_writer,
    };

    use super::*;

    #[test]
    fn test_join_with_cond() {
        let join = JoinClause::new(
            JoinType::Left,
            "table2".into_table(),
            eq("table1.id", 1).and(lt("table2.id", 3)),
        );
        let (sql, binds) = format_writer(&join, None);
        assert_eq!(" LEFT JOIN table2 ON table1.id=? AND table2.id<?", sql);
        assert_eq!(vec![Bind::I32(1), Bind::I32(3)], binds);
    }

    #[test]
    fn test_join_with_raw_on() {
        let join = JoinClause::new(JoinType::Inner, "table3".into_table(), "table2.id = table3.tid");
        assert_eq!(
            " INNER JOIN table3 ON table2.id = table3.tid",
            format_writer(&join, None).0
        );
    }

    #[test]
    fn test_cross_join_without_cond() {
        let join = JoinClause::new(JoinType::Cross, "t2".into_table(), Cond::new());
        assert_eq!(" CROSS JOIN t2", format_writer(&join, None).0);
    }
}
