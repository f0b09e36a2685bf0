use crate::{
    builder::Builder,
    col::Columns,
    error::{Error, Result},
    expr::write_operand,
    row::Row,
    writer::{FormatContext, FormatWriter},
};

#[derive(Debug, Clone)]
pub(crate) enum InsertSource {
    Values(Row),
    Select { columns: Columns, query: Box<Builder> },
}

#[derive(Debug, Clone)]
pub(crate) struct InsertStatement {
    source: InsertSource,
}

impl InsertStatement {
    pub(crate) fn values(row: Row) -> Self {
        Self {
            source: InsertSource::Values(row),
        }
    }

    pub(crate) fn select(columns: Columns, query: Builder) -> Self {
        Self {
            source: InsertSource::Select {
                columns,
                query: Box::new(query),
            },
        }
    }

    pub(crate) fn write(&self, builder: &Builder, context: &mut FormatContext) -> Result<()> {
        let table = builder.table_ref()?;
        match &self.source {
            InsertSource::Values(row) => {
                if row.is_empty() {
                    return Err(Error::NoColumnToInsert);
                }
                context.write_str("INSERT INTO ");
                table.format_writer(context)?;
                context.write_str(" (");
                for (index, column) in row.columns().enumerate() {
                    if index > 0 {
                        context.write_char(',');
                    }
                    context.write_str(column);
                }
                context.write_str(") Values (");
                for (index, (column, value)) in row.iter().enumerate() {
                    if index > 0 {
                        context.write_char(',');
                    }
                    write_operand(column, value, context)?;
                }
                context.write_char(')');
            }
            InsertSource::Select { columns, query } => {
                context.write_str("INSERT INTO ");
                table.format_writer(context)?;
                if !columns.is_empty() {
                    context.write_str(" (");
                    columns.write_list(context);
                    context.write_char(')');
                }
                context.write_char(' ');
                query.format_subquery(context)?;
            }
        }
        Ok(())
    }
}
