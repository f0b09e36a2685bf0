use smol_str::SmolStr;

use crate::{
    bind::Bind,
    error::{Error, Result},
    row::Row,
    value::{IntoValue, Value},
    writer::{FormatContext, FormatWriter},
};

use super::{Cond, InOperator, r#in, write_operand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "<>",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
        }
    }

    /// The set operator a list value turns this comparison into, if any.
    fn set_operator(&self) -> Option<InOperator> {
        match self {
            Operator::Eq => Some(InOperator::In),
            Operator::NotEq => Some(InOperator::NotIn),
            _ => None,
        }
    }
}

/// One operator applied to every column of a row, the columns joined with
/// `AND` in column order.
#[derive(Debug, Clone)]
pub struct Compare {
    pub(crate) operator: Operator,
    pub(crate) row: Row,
}

impl Compare {
    pub fn new(operator: Operator, row: Row) -> Self {
        Self { operator, row }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn row(&self) -> &Row {
        &self.row
    }
}

impl FormatWriter for Compare {
    fn format_writer(&self, context: &mut FormatContext) -> Result<()> {
        for (index, (column, value)) in self.row.iter().enumerate() {
            if index > 0 {
                context.write_str(" AND ");
            }
            if let Value::List(items) = value {
                let Some(operator) = self.operator.set_operator() else {
                    return Err(Error::UnexpectedValueList {
                        column: column.clone(),
                    });
                };
                r#in::write_bind_set(operator, column, items, context)?;
                continue;
            }
            context.write_str(column);
            context.write_str(self.operator.as_str());
            write_operand(column, value, context)?;
        }
        Ok(())
    }
}

macro_rules! comparison {
    ($(#[$meta:meta])* $name:ident => $operator:ident) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone)]
        pub struct $name(pub(crate) Row);

        impl $name {
            pub fn new<K, V>(column: K, value: V) -> Self
            where
                K: Into<SmolStr>,
                V: IntoValue,
            {
                Self::default().set(column, value)
            }

            pub fn set<K, V>(mut self, column: K, value: V) -> Self
            where
                K: Into<SmolStr>,
                V: IntoValue,
            {
                self.0.field(column, value);
                self
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn row(&self) -> &Row {
                &self.0
            }

            pub fn into_row(self) -> Row {
                self.0
            }
        }

        impl From<$name> for Cond {
            fn from(value: $name) -> Self {
                Cond::Compare(Compare::new(Operator::$operator, value.0))
            }
        }

        impl From<$name> for Row {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

comparison! {
    /// `column=?`; a list value becomes `column IN (...)`.
    Eq => Eq
}

comparison! {
    /// `column<>?`; a list value becomes `column NOT IN (...)`.
    Neq => NotEq
}

comparison!(Lt => Lt);
comparison!(Lte => Lte);
comparison!(Gt => Gt);
comparison!(Gte => Gte);

#[derive(Debug, Clone)]
pub struct Like {
    pub(crate) column: SmolStr,
    pub(crate) pattern: String,
}

impl Like {
    pub fn new<K: Into<SmolStr>, P: Into<String>>(column: K, pattern: P) -> Self {
        Self {
            column: column.into(),
            pattern: pattern.into(),
        }
    }
}

impl From<Like> for Cond {
    fn from(value: Like) -> Self {
        Cond::Like(value)
    }
}

impl FormatWriter for Like {
    fn format_writer(&self, context: &mut FormatContext) -> Result<()> {
        context.write_str(&self.column);
        context.write_str(" LIKE ");
        context.write_placeholder(Bind::String(format!("%{}%", self.pattern)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{expr::eq, tests::format_writer};

    use super::*;

    #[test]
    fn test_scalar_eq() {
        let (sql, binds) = format_writer(&Cond::from(Eq::new("k", 7)), None);
        assert_eq!("k=?", sql);
        assert_eq!(vec![Bind::I32(7)], binds);
    }

    #[test]
    fn test_list_eq_becomes_in() {
        let (sql, binds) = format_writer(&eq("k", vec![1, 2, 3]), None);
        assert_eq!("k IN (?,?,?)", sql);
        assert_eq!(vec![Bind::I32(1), Bind::I32(2), Bind::I32(3)], binds);

        let (sql, _) = format_writer(&Cond::from(Neq::new("k", ["a", "b"])), None);
        assert_eq!("k NOT IN (?,?)", sql);
    }

    #[test]
    fn test_multi_columns_sorted() {
        let cond = Neq::new("b", "20").set("a", "10");
        let (sql, binds) = format_writer(&Cond::from(cond), None);
        assert_eq!("a<>? AND b<>?", sql);
        assert_eq!(vec![Bind::from("10"), Bind::from("20")], binds);
    }

    #[test]
    fn test_mixed_scalar_and_list_keeps_text_order() {
        let cond = Eq::new("b", 5).set("a", [1, 2]);
        let (sql, binds) = format_writer(&Cond::from(cond), None);
        assert_eq!("a IN (?,?) AND b=?", sql);
        assert_eq!(vec![Bind::I32(1), Bind::I32(2), Bind::I32(5)], binds);
    }

    #[test]
    fn test_operators() {
        let cases = [
            (Cond::from(Lt::new("a", 1)), "a<?"),
            (Cond::from(Lte::new("a", 1)), "a<=?"),
            (Cond::from(Gt::new("a", 1)), "a>?"),
            (Cond::from(Gte::new("a", 1)), "a>=?"),
        ];
        for (cond, expected) in cases {
            assert_eq!(expected, format_writer(&cond, None).0);
        }
    }

    #[test]
    fn test_like_wraps_pattern() {
        let (sql, binds) = format_writer(&Cond::from(Like::new("name", "ovi")), None);
        assert_eq!("name LIKE ?", sql);
        assert_eq!(vec![Bind::from("%ovi%")], binds);

        let (_, binds) = format_writer(&Cond::from(Like::new("name", "ovi%")), None);
        assert_eq!(vec![Bind::from("%ovi%%")], binds);
    }
}
