use std::{fmt, ops::Deref};

use crate::{
    bind::{Bind, Binds},
    dialect::Dialect,
    error::{Error, Result},
};

pub(crate) trait FormatWriter {
    fn format_writer(&self, context: &mut FormatContext) -> Result<()>;
}

/// Append-only sql text paired with the values bound to its `?` markers.
///
/// Values must be pushed left to right, one per marker already written.
#[derive(Debug, Default)]
pub(crate) struct FormatContext {
    pub(crate) writer: String,
    pub(crate) binds: Binds,
    pub(crate) dialect: Option<Dialect>,
}

impl FormatContext {
    pub fn new(dialect: Option<Dialect>) -> Self {
        Self {
            writer: String::with_capacity(64),
            binds: Binds::new(),
            dialect,
        }
    }

    /// The configured dialect, required by anything dialect specific.
    pub fn dialect(&self) -> Result<Dialect> {
        self.dialect.ok_or(Error::DialectNotConfigured)
    }

    #[inline]
    pub fn write_str(&mut self, value: &str) {
        self.writer.push_str(value);
    }

    #[inline]
    pub fn write_char(&mut self, value: char) {
        self.writer.push(value);
    }

    pub fn write_placeholder(&mut self, bind: Bind) {
        self.writer.push('?');
        self.binds.push(bind);
    }

    pub fn write_placeholders<I>(&mut self, binds: I)
    where
        I: IntoIterator<Item = Bind>,
    {
        for (index, bind) in binds.into_iter().enumerate() {
            if index > 0 {
                self.writer.push(',');
            }
            self.write_placeholder(bind);
        }
    }

    pub fn append<I>(&mut self, binds: I)
    where
        I: IntoIterator<Item = Bind>,
    {
        self.binds.extend(binds);
    }

    /// A blank context sharing this one's dialect.
    ///
    /// Rewrites render into a draft first and [`commit`](Self::commit) it
    /// once it succeeded, so a discarded draft never leaks text or binds.
    pub fn draft(&self) -> Self {
        Self::new(self.dialect)
    }

    pub fn commit(&mut self, draft: Self) {
        self.writer.push_str(&draft.writer);
        self.binds.extend(draft.binds);
    }

    pub fn finish(self) -> (String, Binds) {
        (self.writer, self.binds)
    }
}

impl fmt::Write for FormatContext {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.writer.push_str(s);
        Ok(())
    }
}

impl<D> FormatWriter for D
where
    D: Deref,
    D::Target: FormatWriter,
{
    fn format_writer(&self, context: &mut FormatContext) -> Result<()> {
        self.deref().format_writer(context)
    }
}

/// Renders `value` on its own, dropping everything on error.
pub(crate) fn render<T>(value: &T, dialect: Option<Dialect>) -> Result<(String, Binds)>
where
    T: FormatWriter + ?Sized,
{
    let mut context = FormatContext::new(dialect);
    value.format_writer(&mut context)?;
    Ok(context.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_follow_text() {
        let mut context = FormatContext::new(None);
        context.write_str("a IN (");
        context.write_placeholders([Bind::I32(1), Bind::I32(2)]);
        context.write_char(')');
        let (sql, binds) = context.finish();
        assert_eq!("a IN (?,?)", sql);
        assert_eq!(vec![Bind::I32(1), Bind::I32(2)], binds);
    }

    #[test]
    fn test_draft_is_only_visible_once_committed() {
        let mut context = FormatContext::new(Some(Dialect::Oracle));
        context.write_str("x=");
        context.write_placeholder(Bind::I32(1));

        let mut discarded = context.draft();
        discarded.write_str(" AND y=");
        discarded.write_placeholder(Bind::I32(2));
        drop(discarded);

        let mut kept = context.draft();
        assert_eq!(Some(Dialect::Oracle), kept.dialect);
        kept.write_str(" AND z=");
        kept.write_placeholder(Bind::I32(3));
        context.commit(kept);

        let (sql, binds) = context.finish();
        assert_eq!("x=? AND z=?", sql);
        assert_eq!(vec![Bind::I32(1), Bind::I32(3)], binds);
    }

    #[test]
    fn test_missing_dialect() {
        let context = FormatContext::new(None);
        assert_eq!(Err(Error::DialectNotConfigured), context.dialect());
    }
}
