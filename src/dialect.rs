use std::{fmt, str::FromStr};

use smol_str::SmolStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    MySql,
    Postgres,
    Sqlite,
    Mssql,
    Oracle,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::Postgres => "postgres",
            Dialect::Sqlite => "sqlite",
            Dialect::Mssql => "mssql",
            Dialect::Oracle => "oracle",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        let dialect = if tag.eq_ignore_ascii_case("mysql") {
            Dialect::MySql
        } else if tag.eq_ignore_ascii_case("postgres") {
            Dialect::Postgres
        } else if tag.eq_ignore_ascii_case("sqlite") {
            Dialect::Sqlite
        } else if tag.eq_ignore_ascii_case("mssql") {
            Dialect::Mssql
        } else if tag.eq_ignore_ascii_case("oracle") {
            Dialect::Oracle
        } else {
            return Err(Error::UnsupportedDialect(SmolStr::new(tag)));
        };
        Ok(dialect)
    }
}

pub trait HasDialect {
    const DIALECT: Dialect;
}

pub struct Postgres;

impl HasDialect for Postgres {
    const DIALECT: Dialect = Dialect::Postgres;
}

pub struct MySql;

impl HasDialect for MySql {
    const DIALECT: Dialect = Dialect::MySql;
}

pub struct Sqlite;

impl HasDialect for Sqlite {
    const DIALECT: Dialect = Dialect::Sqlite;
}

pub struct Mssql;

impl HasDialect for Mssql {
    const DIALECT: Dialect = Dialect::Mssql;
}

pub struct Oracle;

impl HasDialect for Oracle {
    const DIALECT: Dialect = Dialect::Oracle;
}
