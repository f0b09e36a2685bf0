//! Post-processing of compiled sql: native bind markers and inlined
//! literals.
//!
//! Both walk the canonical `?` markers of a statement, skipping quoted
//! literals (`'...'`) and quoted identifiers (`"..."`). Every other `?` is a
//! marker, except for the doubled `??` which passes through untouched.

use std::fmt::Write;

use tracing::trace;

use crate::{
    bind::Bind,
    dialect::Dialect,
    error::{Error, Result},
};

enum State {
    Normal,
    Lit,
    Ident,
}

/// Copies `sql`, letting `marker` write each bind marker with its index.
/// Returns the copy and the number of markers met.
fn rewrite_markers<F>(sql: &str, mut marker: F) -> Result<(String, usize)>
where
    F: FnMut(&mut String, usize) -> Result<()>,
{
    let mut out = String::with_capacity(sql.len() + 16);
    let mut count = 0;
    let mut state = State::Normal;

    let mut chars = sql.chars().peekable();
    while let Some(char) = chars.next() {
        match state {
            State::Normal => match char {
                '\'' => {
                    out.push(char);
                    state = State::Lit;
                }
                '"' => {
                    out.push(char);
                    state = State::Ident;
                }
                '?' => match chars.peek() {
                    Some('?') => {
                        out.push_str("??");
                        chars.next();
                    }
                    _ => {
                        marker(&mut out, count)?;
                        count += 1;
                    }
                },
                _ => out.push(char),
            },
            State::Lit | State::Ident => {
                let quote = if matches!(state, State::Lit) { '\'' } else { '"' };
                out.push(char);
                if char == quote {
                    // doubled quote
                    if chars.peek() == Some(&quote) {
                        out.push(quote);
                        chars.next();
                    } else {
                        state = State::Normal;
                    }
                }
            }
        }
    }

    Ok((out, count))
}

fn check_arguments(markers: usize, supplied: usize) -> Result<()> {
    if markers > supplied {
        return Err(Error::NeedMoreArguments { markers, supplied });
    }
    if markers < supplied {
        return Err(Error::TooManyArguments { markers, supplied });
    }
    Ok(())
}

/// Rewrites the `?` markers of `sql` into the markers `dialect` expects:
/// `$1` for Postgres, `@p1` for MSSQL, `:1` for Oracle and `?` elsewhere.
///
/// `binds` must hold exactly one value per marker.
pub fn convert_placeholder(sql: &str, dialect: Dialect, binds: &[Bind]) -> Result<String> {
    let (sql, markers) = rewrite_markers(sql, |out, index| {
        match dialect {
            Dialect::Postgres => write!(out, "${}", index + 1)?,
            Dialect::Mssql => write!(out, "@p{}", index + 1)?,
            Dialect::Oracle => write!(out, ":{}", index + 1)?,
            Dialect::MySql | Dialect::Sqlite => out.push('?'),
        }
        Ok(())
    })?;
    check_arguments(markers, binds.len())?;
    trace!(%dialect, markers, "converted placeholders");
    Ok(sql)
}

/// Inlines every bound value of `sql` as a literal.
///
/// Strings are quoted but not escaped, so the result is meant for logs and
/// debugging, never for execution with untrusted values.
pub fn to_bound_sql(sql: &str, binds: &[Bind]) -> Result<String> {
    let (sql, markers) = rewrite_markers(sql, |out, index| {
        if let Some(bind) = binds.get(index) {
            bind.write_literal(out)?;
        }
        Ok(())
    })?;
    check_arguments(markers, binds.len())?;
    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQL: &str = "SELECT a, b FROM table_a WHERE b_id=(SELECT id FROM table_b WHERE b=?) AND id=? AND c=? AND d=? AND e=? AND f=?";

    fn args() -> Vec<Bind> {
        vec![
            Bind::I32(1),
            Bind::F64(2.1),
            Bind::from("3"),
            Bind::U32(4),
            Bind::from("5"),
            Bind::Bool(true),
        ]
    }

    #[test]
    fn test_convert_postgres() {
        assert_eq!(
            "SELECT a, b FROM table_a WHERE b_id=(SELECT id FROM table_b WHERE b=$1) AND id=$2 AND c=$3 AND d=$4 AND e=$5 AND f=$6",
            convert_placeholder(SQL, Dialect::Postgres, &args()).unwrap()
        );
    }

    #[test]
    fn test_convert_other_dialects() {
        let binds = [Bind::I32(1), Bind::I32(2)];
        let sql = "a=? AND b=?";
        assert_eq!(
            "a=@p1 AND b=@p2",
            convert_placeholder(sql, Dialect::Mssql, &binds).unwrap()
        );
        assert_eq!(
            "a=:1 AND b=:2",
            convert_placeholder(sql, Dialect::Oracle, &binds).unwrap()
        );
        assert_eq!(sql, convert_placeholder(sql, Dialect::MySql, &binds).unwrap());
        assert_eq!(sql, convert_placeholder(sql, Dialect::Sqlite, &binds).unwrap());
    }

    #[test]
    fn test_argument_count_mismatch() {
        let mut binds = args();
        binds.pop();
        assert_eq!(
            Err(Error::NeedMoreArguments {
                markers: 6,
                supplied: 5
            }),
            convert_placeholder(SQL, Dialect::Postgres, &binds)
        );

        assert_eq!(
            Err(Error::TooManyArguments {
                markers: 1,
                supplied: 2
            }),
            convert_placeholder("a=?", Dialect::Oracle, &[Bind::I32(1), Bind::I32(2)])
        );
    }

    #[test]
    fn test_quoted_markers_are_kept() {
        let sql = r#"SELECT '?', 'it''s ?', "col?" FROM t WHERE a=?"#;
        assert_eq!(
            r#"SELECT '?', 'it''s ?', "col?" FROM t WHERE a=$1"#,
            convert_placeholder(sql, Dialect::Postgres, &[Bind::I32(1)]).unwrap()
        );
    }

    #[test]
    fn test_doubled_mark_is_not_a_marker() {
        let sql = "SELECT 1 FROM t WHERE j ?? 'k' AND id=?";
        assert_eq!(
            "SELECT 1 FROM t WHERE j ?? 'k' AND id=$1",
            convert_placeholder(sql, Dialect::Postgres, &[Bind::I32(7)]).unwrap()
        );
    }

    #[test]
    fn test_marker_before_concatenation() {
        let binds = [Bind::I32(1), Bind::from("x")];
        let sql = "a=? AND b LIKE ?||'%' AND c=d&?";
        assert_eq!(
            Err(Error::NeedMoreArguments {
                markers: 3,
                supplied: 2
            }),
            convert_placeholder(sql, Dialect::Postgres, &binds)
        );

        let sql = "a=? AND b LIKE ?||'%'";
        assert_eq!(
            "a=$1 AND b LIKE $2||'%'",
            convert_placeholder(sql, Dialect::Postgres, &binds).unwrap()
        );
        assert_eq!(
            "a=:1 AND b LIKE :2||'%'",
            convert_placeholder(sql, Dialect::Oracle, &binds).unwrap()
        );
        assert_eq!(
            "a=1 AND b LIKE 'x'||'%'",
            to_bound_sql(sql, &binds).unwrap()
        );
    }

    #[test]
    fn test_bound_sql() {
        assert_eq!(
            "SELECT a, b FROM table_a WHERE b_id=(SELECT id FROM table_b WHERE b=1) AND id=2.1 AND c='3' AND d=4 AND e='5' AND f=true",
            to_bound_sql(SQL, &args()).unwrap()
        );
    }

    #[test]
    fn test_bound_sql_null_and_mismatch() {
        assert_eq!(
            "UPDATE t SET a=NULL",
            to_bound_sql("UPDATE t SET a=?", &[Bind::Null]).unwrap()
        );
        assert!(matches!(
            to_bound_sql("a=? AND b=?", &[Bind::I32(1)]),
            Err(Error::NeedMoreArguments { .. })
        ));
    }
}
