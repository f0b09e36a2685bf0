use crate::{
    builder::{Builder, write_where},
    error::Result,
    writer::{FormatContext, FormatWriter},
};

pub(crate) fn write_delete(builder: &Builder, context: &mut FormatContext) -> Result<()> {
    let table = builder.table_ref()?;
    context.write_str("DELETE FROM ");
    table.format_writer(context)?;
    write_where(&builder.cond, context)
}

#[cfg(test)]
mod tests {
    use crate::{
        Builder,
        bind::Bind,
        error::Error,
        expr::{eq, in_list},
    };

    #[test]
    fn test_delete() {
        let mut builder = Builder::new();
        builder
            .delete(eq("a", 1).and(in_list("b", [2, 3])))
            .from("table1");
        let (sql, binds) = builder.to_sql().unwrap();
        assert_eq!("DELETE FROM table1 WHERE a=? AND b IN (?,?)", sql);
        assert_eq!(vec![Bind::I32(1), Bind::I32(2), Bind::I32(3)], binds);
    }

    #[test]
    fn test_delete_without_table() {
        let mut builder = Builder::new();
        builder.delete(eq("a", 1));
        assert_eq!(Error::NoTableName, builder.to_sql().unwrap_err());
    }
}
