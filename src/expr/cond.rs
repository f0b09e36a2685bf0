use crate::{
    error::Result,
    writer::{FormatContext, FormatWriter},
};

use super::Cond;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    And,
    Or,
}

impl Conjunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Conjunction::And => " AND ",
            Conjunction::Or => " OR ",
        }
    }

    fn is_foreign(&self, cond: &Cond) -> bool {
        matches!(
            (self, cond),
            (Conjunction::And, Cond::Or(_)) | (Conjunction::Or, Cond::And(_))
        )
    }
}

/// Moves `cond` into `list`, splicing in its children when it is a list of
/// the same kind and dropping it when it renders to nothing.
pub(crate) fn push_flat(list: &mut Vec<Cond>, conjunction: Conjunction, cond: Cond) {
    if !cond.is_valid() {
        return;
    }
    match cond {
        Cond::And(children) if conjunction == Conjunction::And => {
            list.extend(children.into_iter().filter(Cond::is_valid));
        }
        Cond::Or(children) if conjunction == Conjunction::Or => {
            list.extend(children.into_iter().filter(Cond::is_valid));
        }
        other => list.push(other),
    }
}

pub(crate) fn write_list(
    list: &[Cond],
    conjunction: Conjunction,
    context: &mut FormatContext,
) -> Result<()> {
    for (index, cond) in list.iter().filter(|c| c.is_valid()).enumerate() {
        if index > 0 {
            context.write_str(conjunction.as_str());
        }
        let wrap = conjunction.is_foreign(cond) && cond.is_composite();
        if wrap {
            context.write_char('(');
        }
        cond.format_writer(context)?;
        if wrap {
            context.write_char(')');
        }
    }
    Ok(())
}

pub(crate) fn write_not(inner: &Cond, context: &mut FormatContext) -> Result<()> {
    context.write_str("NOT ");
    let wrap = inner.is_composite();
    if wrap {
        context.write_char('(');
    }
    inner.format_writer(context)?;
    if wrap {
        context.write_char(')');
    }
    Ok(())
}
