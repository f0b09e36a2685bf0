use smol_str::SmolStr;

use crate::{
    error::Result,
    value::{IntoValue, Value},
    writer::{FormatContext, FormatWriter},
};

use super::{Cond, write_operand};

#[derive(Debug, Clone)]
pub struct Between {
    pub(crate) column: SmolStr,
    pub(crate) low: Value,
    pub(crate) high: Value,
}

impl Between {
    pub fn new<K, L, H>(column: K, low: L, high: H) -> Self
    where
        K: Into<SmolStr>,
        L: IntoValue,
        H: IntoValue,
    {
        Self {
            column: column.into(),
            low: low.into_value(),
            high: high.into_value(),
        }
    }
}

impl From<Between> for Cond {
    fn from(value: Between) -> Self {
        Cond::Between(value)
    }
}

impl FormatWriter for Between {
    fn format_writer(&self, context: &mut FormatContext) -> Result<()> {
        context.write_str(&self.column);
        context.write_str(" BETWEEN ");
        write_operand(&self.column, &self.low, context)?;
        context.write_str(" AND ");
        write_operand(&self.column, &self.high, context)
    }
}

#[cfg(test)]
mod tests {
    use crate::{bind::Bind, expr::between, raw::Raw, tests::format_writer};

    #[test]
    fn test_between() {
        let (sql, binds) = format_writer(&between("age", 18, 30), None);
        assert_eq!("age BETWEEN ? AND ?", sql);
        assert_eq!(vec![Bind::I32(18), Bind::I32(30)], binds);
    }

    #[test]
    fn test_between_raw_bound() {
        let (sql, binds) = format_writer(&between("at", Raw::new("now()"), "2030-01-01"), None);
        assert_eq!("at BETWEEN (now()) AND ?", sql);
        assert_eq!(vec![Bind::from("2030-01-01")], binds);
    }
}
