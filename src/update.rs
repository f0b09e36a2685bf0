use crate::{
    builder::{Builder, write_where},
    error::{Error, Result},
    expr::{Eq, write_operand},
    raw::Raw,
    row::Row,
    writer::{FormatContext, FormatWriter},
};

/// One entry of a `SET` list.
#[derive(Debug, Clone)]
pub enum Assignment {
    /// `a=?,b=?` for every column of the row.
    Set(Row),
    /// A verbatim assignment such as `hits=hits+1`.
    Raw(Raw),
}

impl Assignment {
    fn is_empty(&self) -> bool {
        match self {
            Assignment::Set(row) => row.is_empty(),
            Assignment::Raw(raw) => raw.is_empty(),
        }
    }
}

impl From<Eq> for Assignment {
    fn from(value: Eq) -> Self {
        Assignment::Set(value.into_row())
    }
}

impl From<Row> for Assignment {
    fn from(value: Row) -> Self {
        Assignment::Set(value)
    }
}

impl From<Raw> for Assignment {
    fn from(value: Raw) -> Self {
        Assignment::Raw(value)
    }
}

impl From<&str> for Assignment {
    fn from(value: &str) -> Self {
        Assignment::Raw(Raw::new(value))
    }
}

pub trait IntoAssignments {
    fn into_assignments(self) -> Vec<Assignment>;
}

impl IntoAssignments for Assignment {
    fn into_assignments(self) -> Vec<Assignment> {
        vec![self]
    }
}

impl IntoAssignments for Eq {
    fn into_assignments(self) -> Vec<Assignment> {
        vec![self.into()]
    }
}

impl IntoAssignments for Row {
    fn into_assignments(self) -> Vec<Assignment> {
        vec![self.into()]
    }
}

impl IntoAssignments for Raw {
    fn into_assignments(self) -> Vec<Assignment> {
        vec![self.into()]
    }
}

impl<T> IntoAssignments for Vec<T>
where
    T: Into<Assignment>,
{
    fn into_assignments(self) -> Vec<Assignment> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T, const N: usize> IntoAssignments for [T; N]
where
    T: Into<Assignment>,
{
    fn into_assignments(self) -> Vec<Assignment> {
        self.into_iter().map(Into::into).collect()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct UpdateStatement {
    assignments: Vec<Assignment>,
}

impl UpdateStatement {
    pub(crate) fn new(assignments: Vec<Assignment>) -> Self {
        Self { assignments }
    }

    pub(crate) fn write(&self, builder: &Builder, context: &mut FormatContext) -> Result<()> {
        let table = builder.table_ref()?;
        if self.assignments.iter().all(Assignment::is_empty) {
            return Err(Error::NoColumnToUpdate);
        }
        context.write_str("UPDATE ");
        table.format_writer(context)?;
        context.write_str(" SET ");
        let assignments = self.assignments.iter().filter(|a| !a.is_empty());
        for (index, assignment) in assignments.enumerate() {
            if index > 0 {
                context.write_char(',');
            }
            match assignment {
                Assignment::Set(row) => write_assignments(row, context)?,
                Assignment::Raw(raw) => raw.format_writer(context)?,
            }
        }
        write_where(&builder.cond, context)
    }
}

/// `a=?,b=?` in column order.
pub(crate) fn write_assignments(row: &Row, context: &mut FormatContext) -> Result<()> {
    for (index, (column, value)) in row.iter().enumerate() {
        if index > 0 {
            context.write_char(',');
        }
        context.write_str(column);
        context.write_char('=');
        write_operand(column, value, context)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{bind::Bind, expr::eq, raw};

    use super::*;

    #[test]
    fn test_update() {
        let mut builder = Builder::new();
        builder
            .update(Eq::new("b", "x").set("a", 1))
            .from("table1")
            .where_(eq("id", 3));
        let (sql, binds) = builder.to_sql().unwrap();
        assert_eq!("UPDATE table1 SET a=?,b=? WHERE id=?", sql);
        assert_eq!(vec![Bind::I32(1), Bind::from("x"), Bind::I32(3)], binds);
    }

    #[test]
    fn test_update_raw_assignment() {
        let mut builder = Builder::new();
        builder
            .update([
                Assignment::from(Eq::new("name", "n")),
                Assignment::from(raw("hits=hits+?", [1])),
            ])
            .from("pages")
            .where_(eq("id", 7));
        assert_eq!(
            "UPDATE pages SET name='n',hits=hits+1 WHERE id=7",
            builder.to_bound_sql().unwrap()
        );
    }

    #[test]
    fn test_update_errors() {
        let mut builder = Builder::new();
        builder.update(Eq::new("a", 1));
        assert_eq!(Error::NoTableName, builder.to_sql().unwrap_err());

        let mut builder = Builder::new();
        builder.update(Eq::default()).from("t");
        assert_eq!(Error::NoColumnToUpdate, builder.to_sql().unwrap_err());

        let mut builder = Builder::new();
        builder.update(Vec::<Assignment>::new()).from("t");
        assert_eq!(Error::NoColumnToUpdate, builder.to_sql().unwrap_err());
    }
}
