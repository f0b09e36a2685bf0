//! Dialect-aware sql statement compiler.
//!
//! A [`Builder`] describes one statement and compiles it to sql text with
//! `?` markers plus the values bound to them, in marker order. Conditions
//! ([`Cond`]) are plain values combined with `and` / `or`. Pagination is
//! emulated for the dialects that lack `LIMIT ... OFFSET ...`.

use smol_str::SmolStr;

mod bind;
mod builder;
mod col;
mod delete;
mod dialect;
mod error;
pub mod expr;
mod ident;
mod insert;
mod join;
pub mod paginate;
pub mod placeholder;
mod raw;
mod replace;
mod row;
mod union;
mod update;
mod value;
mod writer;

pub use bind::{Bind, Binds, IntoBind};
pub use builder::{Builder, sub};
pub use col::{Columns, IntoColumns};
pub use dialect::{Dialect, HasDialect, Mssql, MySql, Oracle, Postgres, Sqlite};
pub use error::{Error, Result};
pub use expr::{
    Cond, and, between, eq, gt, gte, in_list, is_null, like, lt, lte, neq, not, not_in,
    not_null, or,
};
pub use ident::{IntoTable, TableRef};
pub use join::{JoinClause, JoinType};
pub use paginate::Limit;
pub use placeholder::{convert_placeholder, to_bound_sql};
pub use raw::{IntoRaw, Raw};
pub use replace::Replacement;
pub use row::Row;
pub use union::UnionKind;
pub use update::{Assignment, IntoAssignments};
pub use value::{IntoValue, Value};

/// A verbatim fragment with the values bound to its `?` markers.
pub fn raw<T, I>(sql: T, binds: I) -> Raw
where
    T: Into<SmolStr>,
    I: IntoIterator,
    I::Item: IntoBind,
{
    Raw::new(sql).with_binds(binds)
}
