use smol_str::SmolStr;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while compiling a statement.
///
/// Errors are only produced at serialization time, never while a builder is
/// being configured, and a failed serialization yields no partial output.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("no table indicated")]
    NoTableName,

    #[error("no column to be inserted")]
    NoColumnToInsert,

    #[error("no column to be updated")]
    NoColumnToUpdate,

    /// `IN` / `NOT IN` with zero values.
    #[error("empty value set for column `{column}`")]
    EmptyValueSet { column: SmolStr },

    /// A list value where only a single value makes sense (`<`, `BETWEEN`, ...).
    #[error("column `{column}` does not accept a list of values")]
    UnexpectedValueList { column: SmolStr },

    #[error("replacements must all be columns or all be assignments")]
    NonUniformReplacementType,

    #[error("replace needs assignments or a derived table")]
    EmptyReplacement,

    #[error("replacing by column list needs a derived table")]
    MissingDerivedTable,

    #[error("union is only allowed among select statements")]
    UnionOnNonSelect,

    #[error("union cannot carry its own where, group, having, order or limit clause")]
    UnionWithOwnClauses,

    #[error("no dialect configured")]
    DialectNotConfigured,

    #[error("invalid limit: row count {row_count}, offset {offset}")]
    InvalidLimitSpec { row_count: u64, offset: u64 },

    #[error("mssql pagination with an offset needs a primary key")]
    MissingPrimaryKeyForPagination,

    #[error("unsupported dialect `{0}`")]
    UnsupportedDialect(SmolStr),

    #[error("need more sql arguments: {markers} placeholders, {supplied} arguments")]
    NeedMoreArguments { markers: usize, supplied: usize },

    #[error("too many sql arguments: {markers} placeholders, {supplied} arguments")]
    TooManyArguments { markers: usize, supplied: usize },

    #[error("unsupported statement kind: {0}")]
    UnsupportedStatementKind(&'static str),

    #[error("failed to write sql")]
    Format(#[from] std::fmt::Error),
}
