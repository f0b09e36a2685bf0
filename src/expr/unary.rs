use smol_str::SmolStr;

use crate::{
    error::Result,
    writer::{FormatContext, FormatWriter},
};

use super::Cond;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Null,
    NotNull,
}

impl UnaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Null => " IS NULL",
            UnaryOperator::NotNull => " IS NOT NULL",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Null {
    pub(crate) column: SmolStr,
    pub(crate) operator: UnaryOperator,
}

impl Null {
    pub fn new<K: Into<SmolStr>>(operator: UnaryOperator, column: K) -> Self {
        Self {
            column: column.into(),
            operator,
        }
    }
}

impl From<Null> for Cond {
    fn from(value: Null) -> Self {
        Cond::Null(value)
    }
}

impl FormatWriter for Null {
    fn format_writer(&self, context: &mut FormatContext) -> Result<()> {
        context.write_str(&self.column);
        context.write_str(self.operator.as_str());
        Ok(())
    }
}
