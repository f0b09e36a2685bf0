use smol_str::SmolStr;
use tracing::{trace, warn};

use crate::{
    bind::Binds,
    col::{Columns, IntoColumns},
    delete,
    dialect::{Dialect, HasDialect},
    error::{Error, Result},
    expr::Cond,
    ident::{IntoTable, TableRef},
    insert::InsertStatement,
    join::{JoinClause, JoinType},
    paginate::{self, Limit},
    placeholder,
    replace::{ReplaceStatement, Replacement},
    row::Row,
    union::{UnionKind, UnionStatement},
    update::{IntoAssignments, UpdateStatement},
    writer::{self, FormatContext, FormatWriter},
};

#[derive(Debug, Default, Clone)]
pub(crate) struct SelectStatement {
    pub(crate) columns: Columns,
    pub(crate) joins: Vec<JoinClause>,
    pub(crate) group_by: Option<SmolStr>,
    pub(crate) having: Cond,
    pub(crate) order_by: Option<SmolStr>,
    pub(crate) limit: Option<Limit>,
    pub(crate) primary_key: Columns,
}

/// The statement kind together with the payload only that kind reads.
#[derive(Debug, Default, Clone)]
pub(crate) enum Statement {
    #[default]
    Condition,
    Select(SelectStatement),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete,
    Replace(ReplaceStatement),
    Union(UnionStatement),
}

impl Statement {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Statement::Condition => "CONDITION",
            Statement::Select(_) => "SELECT",
            Statement::Insert(_) => "INSERT",
            Statement::Update(_) => "UPDATE",
            Statement::Delete => "DELETE",
            Statement::Replace(_) => "REPLACE",
            Statement::Union(_) => "UNION",
        }
    }
}

/// A mutable description of one sql statement.
///
/// Every kind setter (`select`, `insert`, `update`, `delete`, `replace`,
/// `union`) replaces whatever payload the previous one left behind. The
/// table and the `WHERE` condition are shared by all kinds. A builder with
/// no kind set serializes its condition alone.
#[derive(Debug, Default, Clone)]
pub struct Builder {
    pub(crate) dialect: Option<Dialect>,
    pub(crate) table: Option<TableRef>,
    pub(crate) cond: Cond,
    pub(crate) statement: Statement,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialect(dialect: Dialect) -> Self {
        Self {
            dialect: Some(dialect),
            ..Self::default()
        }
    }

    pub fn for_dialect<D: HasDialect>() -> Self {
        Self::dialect(D::DIALECT)
    }

    pub fn set_dialect(&mut self, dialect: Dialect) -> &mut Self {
        self.dialect = Some(dialect);
        self
    }

    pub fn current_dialect(&self) -> Option<Dialect> {
        self.dialect
    }

    // statement kinds

    pub fn select<C: IntoColumns>(&mut self, columns: C) -> &mut Self {
        let columns = columns.into_columns();
        self.leave_union();
        match &mut self.statement {
            Statement::Select(select) => select.columns = columns,
            _ => {
                self.statement = Statement::Select(SelectStatement {
                    columns,
                    ..SelectStatement::default()
                })
            }
        }
        self
    }

    pub fn insert<R: Into<Row>>(&mut self, values: R) -> &mut Self {
        self.leave_union();
        self.statement = Statement::Insert(InsertStatement::values(values.into()));
        self
    }

    /// `INSERT INTO t[ (columns)] SELECT ...`
    pub fn insert_select<C, F>(&mut self, columns: C, build: F) -> &mut Self
    where
        C: IntoColumns,
        F: FnOnce(&mut Builder),
    {
        let query = sub(build);
        self.leave_union();
        self.statement = Statement::Insert(InsertStatement::select(columns.into_columns(), query));
        self
    }

    pub fn update<A: IntoAssignments>(&mut self, assignments: A) -> &mut Self {
        self.leave_union();
        self.statement = Statement::Update(UpdateStatement::new(assignments.into_assignments()));
        self
    }

    pub fn delete<C: Into<Cond>>(&mut self, cond: C) -> &mut Self {
        self.leave_union();
        self.statement = Statement::Delete;
        self.and_where(cond)
    }

    /// Either `Eq` sets (`REPLACE INTO t SET ...`) or plain column names
    /// completed by [`replace_from`](Self::replace_from). MySQL only.
    pub fn replace<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Replacement>,
    {
        let items = items.into_iter().map(Into::into).collect();
        self.leave_union();
        self.statement = Statement::Replace(ReplaceStatement::new(items));
        self
    }

    /// The derived table a `REPLACE` copies its rows from.
    pub fn replace_from<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Builder),
    {
        let query = Box::new(sub(build));
        self.leave_union();
        match &mut self.statement {
            Statement::Replace(replace) => replace.query = Some(query),
            _ => {
                let mut replace = ReplaceStatement::new(Vec::new());
                replace.query = Some(query);
                self.statement = Statement::Replace(replace);
            }
        }
        self
    }

    /// Unions the statement built so far with another one.
    ///
    /// The first call moves the current statement, its table and condition
    /// into the first member. Members are serialized as `(<member>)`. Any
    /// later kind setter hands the table and condition back to the builder.
    pub fn union<F>(&mut self, kind: UnionKind, build: F) -> &mut Self
    where
        F: FnOnce(&mut Builder),
    {
        let member = sub(build);
        match &mut self.statement {
            Statement::Union(union) => union.push(kind, member),
            _ => {
                let first = Builder {
                    dialect: self.dialect,
                    table: self.table.take(),
                    cond: std::mem::take(&mut self.cond),
                    statement: std::mem::take(&mut self.statement),
                };
                self.statement = Statement::Union(UnionStatement::new(first, kind, member));
            }
        }
        self
    }

    /// Drops a union payload, restoring the table and condition its first
    /// member took over.
    fn leave_union(&mut self) {
        if !matches!(self.statement, Statement::Union(_)) {
            return;
        }
        let Statement::Union(union) = std::mem::take(&mut self.statement) else {
            return;
        };
        if let Some(first) = union.into_first() {
            if self.table.is_none() {
                self.table = first.table;
            }
            self.cond = first.cond.and(std::mem::take(&mut self.cond));
        }
    }

    // tables

    pub fn from<T: IntoTable>(&mut self, table: T) -> &mut Self {
        self.union_clause();
        self.table = Some(table.into_table());
        self
    }

    /// `FROM (<sub-query>) alias`
    pub fn from_sub<A, F>(&mut self, alias: A, build: F) -> &mut Self
    where
        A: Into<SmolStr>,
        F: FnOnce(&mut Builder),
    {
        self.union_clause();
        self.table = Some(TableRef::sub(alias, sub(build)));
        self
    }

    /// Same as [`from`](Self::from), reads better for inserts.
    pub fn into_table<T: IntoTable>(&mut self, table: T) -> &mut Self {
        self.from(table)
    }

    // conditions

    pub fn where_<C: Into<Cond>>(&mut self, cond: C) -> &mut Self {
        self.and_where(cond)
    }

    pub fn and_where<C: Into<Cond>>(&mut self, cond: C) -> &mut Self {
        self.cond = std::mem::take(&mut self.cond).and(cond);
        self
    }

    pub fn or_where<C: Into<Cond>>(&mut self, cond: C) -> &mut Self {
        self.cond = std::mem::take(&mut self.cond).or(cond);
        self
    }

    // select clauses

    pub fn join<T, C>(&mut self, ty: JoinType, table: T, on: C) -> &mut Self
    where
        T: IntoTable,
        C: Into<Cond>,
    {
        let join = JoinClause::new(ty, table.into_table(), on);
        if let Some(select) = self.select_clauses("JOIN") {
            select.joins.push(join);
        }
        self
    }

    pub fn inner_join<T: IntoTable, C: Into<Cond>>(&mut self, table: T, on: C) -> &mut Self {
        self.join(JoinType::Inner, table, on)
    }

    pub fn left_join<T: IntoTable, C: Into<Cond>>(&mut self, table: T, on: C) -> &mut Self {
        self.join(JoinType::Left, table, on)
    }

    pub fn right_join<T: IntoTable, C: Into<Cond>>(&mut self, table: T, on: C) -> &mut Self {
        self.join(JoinType::Right, table, on)
    }

    pub fn full_join<T: IntoTable, C: Into<Cond>>(&mut self, table: T, on: C) -> &mut Self {
        self.join(JoinType::Full, table, on)
    }

    pub fn cross_join<T: IntoTable, C: Into<Cond>>(&mut self, table: T, on: C) -> &mut Self {
        self.join(JoinType::Cross, table, on)
    }

    pub fn group_by<T: Into<SmolStr>>(&mut self, group_by: T) -> &mut Self {
        if let Some(select) = self.select_clauses("GROUP BY") {
            select.group_by = Some(group_by.into());
        }
        self
    }

    pub fn having<C: Into<Cond>>(&mut self, having: C) -> &mut Self {
        if let Some(select) = self.select_clauses("HAVING") {
            select.having = std::mem::take(&mut select.having).and(having);
        }
        self
    }

    pub fn order_by<T: Into<SmolStr>>(&mut self, order_by: T) -> &mut Self {
        if let Some(select) = self.select_clauses("ORDER BY") {
            select.order_by = Some(order_by.into());
        }
        self
    }

    /// Keeps `row_count` rows after skipping `offset` of them. How this is
    /// expressed depends on the dialect, see [`paginate`](crate::paginate).
    pub fn limit(&mut self, row_count: u64, offset: u64) -> &mut Self {
        if let Some(select) = self.select_clauses("LIMIT") {
            select.limit = Some(Limit::new(row_count, offset));
        }
        self
    }

    /// Primary key columns, needed by MSSQL to paginate with an offset.
    pub fn pk<C: IntoColumns>(&mut self, columns: C) -> &mut Self {
        if let Some(select) = self.select_clauses("PK") {
            select.primary_key = columns.into_columns();
        }
        self
    }

    /// A union takes its table from its members, one of its own is an error.
    fn union_clause(&mut self) {
        if let Statement::Union(union) = &mut self.statement {
            union.own_clauses = true;
        }
    }

    fn select_clauses(&mut self, clause: &'static str) -> Option<&mut SelectStatement> {
        if matches!(self.statement, Statement::Condition) {
            self.statement = Statement::Select(SelectStatement::default());
        }
        match &mut self.statement {
            Statement::Select(select) => Some(select),
            Statement::Union(union) => {
                union.own_clauses = true;
                None
            }
            other => {
                warn!(clause, statement = other.name(), "clause ignored");
                None
            }
        }
    }

    // output

    /// The statement with canonical `?` markers and its values in marker
    /// order.
    pub fn to_sql(&self) -> Result<(String, Binds)> {
        let (sql, binds) = writer::render(self, self.dialect)?;
        trace!(sql = %sql, args = binds.len(), "compiled statement");
        Ok((sql, binds))
    }

    /// Like [`to_sql`](Self::to_sql) with the markers of the configured
    /// dialect (`$1`, `@p1`, `:1` or `?`).
    pub fn to_native_sql(&self) -> Result<(String, Binds)> {
        let dialect = self.dialect.ok_or(Error::DialectNotConfigured)?;
        let (sql, binds) = self.to_sql()?;
        let sql = placeholder::convert_placeholder(&sql, dialect, &binds)?;
        Ok((sql, binds))
    }

    /// The statement with every value inlined as a literal. For display
    /// only, strings are not escaped.
    pub fn to_bound_sql(&self) -> Result<String> {
        let (sql, binds) = self.to_sql()?;
        placeholder::to_bound_sql(&sql, &binds)
    }

    pub(crate) fn table_ref(&self) -> Result<&TableRef> {
        self.table
            .as_ref()
            .filter(|table| !table.is_empty())
            .ok_or(Error::NoTableName)
    }

    /// Writes a builder nested inside another statement. Only queries can
    /// be nested.
    pub(crate) fn format_subquery(&self, context: &mut FormatContext) -> Result<()> {
        match self.statement {
            Statement::Select(_) | Statement::Union(_) => self.format_scoped(context),
            ref other => Err(Error::UnsupportedStatementKind(other.name())),
        }
    }

    /// A nested builder follows the dialect of the statement it is written
    /// into, its own dialect only applies when the outer one has none.
    pub(crate) fn format_scoped(&self, context: &mut FormatContext) -> Result<()> {
        match (context.dialect, self.dialect) {
            (None, Some(own)) => {
                let mut scoped = FormatContext::new(Some(own));
                self.format_writer(&mut scoped)?;
                context.commit(scoped);
                Ok(())
            }
            _ => self.format_writer(context),
        }
    }

    pub(crate) fn write_select_statement(
        &self,
        select: &SelectStatement,
        context: &mut FormatContext,
    ) -> Result<()> {
        match select.limit {
            Some(limit) => paginate::write_limited(self, select, limit, context),
            None => self.write_select(select, context, |context| {
                select.columns.format_writer(context)
            }),
        }
    }

    /// `SELECT <projection> FROM t ...` without any pagination. The
    /// projection is left to the caller so rewrites can extend it.
    pub(crate) fn write_select<F>(
        &self,
        select: &SelectStatement,
        context: &mut FormatContext,
        projection: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut FormatContext) -> Result<()>,
    {
        let table = self.table_ref()?;
        context.write_str("SELECT ");
        projection(context)?;
        context.write_str(" FROM ");
        table.format_writer(context)?;
        for join in &select.joins {
            join.format_writer(context)?;
        }
        write_where(&self.cond, context)?;
        if let Some(ref group_by) = select.group_by {
            context.write_str(" GROUP BY ");
            context.write_str(group_by);
        }
        if select.having.is_valid() {
            context.write_str(" HAVING ");
            select.having.format_writer(context)?;
        }
        if let Some(ref order_by) = select.order_by {
            context.write_str(" ORDER BY ");
            context.write_str(order_by);
        }
        Ok(())
    }
}

/// ` WHERE <cond>`, or nothing for a condition that renders empty.
pub(crate) fn write_where(cond: &Cond, context: &mut FormatContext) -> Result<()> {
    if cond.is_valid() {
        context.write_str(" WHERE ");
        cond.format_writer(context)?;
    }
    Ok(())
}

impl FormatWriter for Builder {
    fn format_writer(&self, context: &mut FormatContext) -> Result<()> {
        match &self.statement {
            Statement::Condition => self.cond.format_writer(context),
            Statement::Select(select) => self.write_select_statement(select, context),
            Statement::Insert(insert) => insert.write(self, context),
            Statement::Update(update) => update.write(self, context),
            Statement::Delete => delete::write_delete(self, context),
            Statement::Replace(replace) => replace.write(self, context),
            Statement::Union(union) => union.write(self, context),
        }
    }
}

/// Builds a standalone builder, usually to nest it in another one.
pub fn sub<F>(build: F) -> Builder
where
    F: FnOnce(&mut Builder),
{
    let mut builder = Builder::new();
    build(&mut builder);
    builder
}
