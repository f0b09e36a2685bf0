use smol_str::SmolStr;

use crate::{
    bind::{Bind, Binds, IntoBind},
    error::Result,
    writer::{FormatContext, FormatWriter},
};

/// A verbatim sql fragment carrying its own bound values.
///
/// The fragment uses `?` markers; its binds are spliced into the statement
/// at the position where the fragment is written.
#[derive(Debug, Clone, PartialEq)]
pub struct Raw {
    pub(crate) sql: SmolStr,
    pub(crate) binds: Binds,
}

impl Raw {
    pub fn new<T>(sql: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self {
            sql: sql.into(),
            binds: Binds::new(),
        }
    }

    pub fn new_static(sql: &'static str) -> Self {
        Self {
            sql: SmolStr::new_static(sql),
            binds: Binds::new(),
        }
    }

    pub fn bind<B: IntoBind>(mut self, value: B) -> Self {
        self.binds.push(value.into_bind());
        self
    }

    pub fn with_binds<I>(mut self, binds: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoBind,
    {
        self.binds.extend(binds.into_iter().map(IntoBind::into_bind));
        self
    }

    pub fn sql(&self) -> &str {
        self.sql.as_str()
    }

    pub fn binds(&self) -> &[Bind] {
        &self.binds
    }

    pub fn is_empty(&self) -> bool {
        self.sql.trim().is_empty()
    }
}

pub trait IntoRaw {
    fn into_raw(self) -> Raw;
}

impl IntoRaw for Raw {
    fn into_raw(self) -> Raw {
        self
    }
}

impl IntoRaw for &str {
    fn into_raw(self) -> Raw {
        Raw::new(self)
    }
}

impl IntoRaw for String {
    fn into_raw(self) -> Raw {
        Raw::new(self)
    }
}

impl IntoRaw for SmolStr {
    fn into_raw(self) -> Raw {
        Raw::new(self)
    }
}

impl FormatWriter for Raw {
    fn format_writer(&self, context: &mut FormatContext) -> Result<()> {
        context.write_str(self.sql.as_str());
        context.append(self.binds.iter().cloned());
        Ok(())
    }
}
