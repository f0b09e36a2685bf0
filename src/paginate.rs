//! Row windowing for every dialect.
//!
//! MySQL, Postgres and SQLite get a native `LIMIT n OFFSET m` suffix with
//! literal numbers. Oracle and MSSQL have no such clause in the versions
//! targeted here, so the select is nested inside queries filtering on a
//! synthetic row number, whose bounds are passed as bound values.

use std::fmt::Write;

use tracing::debug;

use crate::{
    bind::Bind,
    builder::{Builder, SelectStatement},
    dialect::Dialect,
    error::{Error, Result},
    writer::{FormatContext, FormatWriter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub(crate) row_count: u64,
    pub(crate) offset: u64,
}

impl Limit {
    pub fn new(row_count: u64, offset: u64) -> Self {
        Self { row_count, offset }
    }

    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// `row_count + offset`, the last row number kept.
    fn end(&self) -> Result<u64> {
        if self.row_count == 0 {
            return Err(self.invalid());
        }
        self.row_count
            .checked_add(self.offset)
            .ok_or_else(|| self.invalid())
    }

    fn invalid(&self) -> Error {
        Error::InvalidLimitSpec {
            row_count: self.row_count,
            offset: self.offset,
        }
    }
}

/// Writes `select` windowed by `limit` in the dialect of `context`.
///
/// The rewrite is drafted apart and only committed once complete.
pub(crate) fn write_limited(
    builder: &Builder,
    select: &SelectStatement,
    limit: Limit,
    context: &mut FormatContext,
) -> Result<()> {
    let end = limit.end()?;
    let dialect = context.dialect()?;
    debug!(
        %dialect,
        row_count = limit.row_count,
        offset = limit.offset,
        "paginating select"
    );

    let mut draft = context.draft();
    match dialect {
        Dialect::MySql | Dialect::Postgres | Dialect::Sqlite => {
            write_native(builder, select, limit, &mut draft)?
        }
        Dialect::Oracle => write_rownum(builder, select, limit, end, &mut draft)?,
        Dialect::Mssql => write_top(builder, select, limit, end, &mut draft)?,
    }
    context.commit(draft);
    Ok(())
}

fn write_native(
    builder: &Builder,
    select: &SelectStatement,
    limit: Limit,
    context: &mut FormatContext,
) -> Result<()> {
    builder.write_select(select, context, |context| {
        select.columns.format_writer(context)
    })?;
    write!(context, " LIMIT {}", limit.row_count)?;
    if limit.offset > 0 {
        write!(context, " OFFSET {}", limit.offset)?;
    }
    Ok(())
}

/// `ROWNUM` can only be compared with `>` once an inner query has
/// materialized it, hence the second level of nesting for offsets.
fn write_rownum(
    builder: &Builder,
    select: &SelectStatement,
    limit: Limit,
    end: u64,
    context: &mut FormatContext,
) -> Result<()> {
    if select.columns.is_empty() {
        return Err(Error::UnsupportedStatementKind("SELECT * with ROWNUM pagination"));
    }
    context.write_str("SELECT ");
    select.columns.write_list(context);
    context.write_str(" FROM (");
    if limit.offset > 0 {
        context.write_str("SELECT * FROM (");
    }
    builder.write_select(select, context, |context| {
        select.columns.write_list(context);
        context.write_str(",ROWNUM RN");
        Ok(())
    })?;
    context.write_str(") at WHERE at.RN<=");
    context.write_placeholder(Bind::U64(end));
    if limit.offset > 0 {
        context.write_str(") att WHERE att.RN>");
        context.write_placeholder(Bind::U64(limit.offset));
    }
    Ok(())
}

fn write_top(
    builder: &Builder,
    select: &SelectStatement,
    limit: Limit,
    end: u64,
    context: &mut FormatContext,
) -> Result<()> {
    if limit.offset == 0 {
        return builder.write_select(select, context, |context| {
            write!(context, "TOP {} ", limit.row_count)?;
            select.columns.format_writer(context)
        });
    }
    if select.primary_key.is_empty() {
        return Err(Error::MissingPrimaryKeyForPagination);
    }
    if select.columns.is_empty() {
        return Err(Error::UnsupportedStatementKind("SELECT * with ROW_NUMBER pagination"));
    }
    // the inner TOP follows the window order
    let inner = SelectStatement {
        order_by: None,
        ..select.clone()
    };
    context.write_str("SELECT ");
    select.columns.write_list(context);
    context.write_str(" FROM (");
    builder.write_select(&inner, context, |context| {
        context.write_str("TOP (");
        context.write_placeholder(Bind::U64(end));
        context.write_str(") ");
        select.columns.write_list(context);
        context.write_str(",ROW_NUMBER() OVER (ORDER BY ");
        write_row_order(select, context);
        context.write_str(") AS RN");
        Ok(())
    })?;
    context.write_str(" ORDER BY ");
    write_row_order(select, context);
    context.write_str(") at WHERE at.RN>");
    context.write_placeholder(Bind::U64(limit.offset));
    Ok(())
}

/// `<order_by>,<pk>`, the primary key breaks ties.
fn write_row_order(select: &SelectStatement, context: &mut FormatContext) {
    if let Some(ref order_by) = select.order_by {
        context.write_str(order_by);
        context.write_char(',');
    }
    select.primary_key.write_list(context);
}
