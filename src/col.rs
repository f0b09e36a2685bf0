use smol_str::SmolStr;

use crate::{
    error::Result,
    writer::{FormatContext, FormatWriter},
};

/// A comma separated list of column expressions, written verbatim.
///
/// Used for projections, primary keys and the column list of
/// `INSERT ... SELECT` / `REPLACE ... SELECT`. An empty projection renders
/// as `*`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum Columns {
    #[default]
    None,
    One(SmolStr),
    Many(Vec<SmolStr>),
}

impl Columns {
    pub fn is_empty(&self) -> bool {
        match self {
            Columns::None => true,
            Columns::One(_) => false,
            Columns::Many(columns) => columns.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Columns::None => 0,
            Columns::One(_) => 1,
            Columns::Many(columns) => columns.len(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SmolStr> {
        let slice = match self {
            Columns::None => &[] as &[SmolStr],
            Columns::One(column) => std::slice::from_ref(column),
            Columns::Many(columns) => columns.as_slice(),
        };
        slice.iter()
    }

    pub fn push<T: Into<SmolStr>>(&mut self, column: T) {
        let column = column.into();
        match std::mem::take(self) {
            Columns::None => *self = Columns::One(column),
            Columns::One(first) => *self = Columns::Many(vec![first, column]),
            Columns::Many(mut columns) => {
                columns.push(column);
                *self = Columns::Many(columns);
            }
        }
    }

    /// Writes the columns joined with `,`, nothing at all when empty.
    pub(crate) fn write_list(&self, context: &mut FormatContext) {
        for (index, column) in self.iter().enumerate() {
            if index > 0 {
                context.write_char(',');
            }
            context.write_str(column);
        }
    }
}

impl FormatWriter for Columns {
    fn format_writer(&self, context: &mut FormatContext) -> Result<()> {
        if self.is_empty() {
            context.write_char('*');
        } else {
            self.write_list(context);
        }
        Ok(())
    }
}

pub trait IntoColumns {
    fn into_columns(self) -> Columns;
}

impl IntoColumns for Columns {
    fn into_columns(self) -> Columns {
        self
    }
}

impl IntoColumns for &str {
    fn into_columns(self) -> Columns {
        Columns::One(SmolStr::new(self))
    }
}

impl IntoColumns for &String {
    fn into_columns(self) -> Columns {
        Columns::One(SmolStr::new(self))
    }
}

impl IntoColumns for String {
    fn into_columns(self) -> Columns {
        Columns::One(SmolStr::from(self))
    }
}

impl IntoColumns for SmolStr {
    fn into_columns(self) -> Columns {
        Columns::One(self)
    }
}

impl<T, const N: usize> IntoColumns for [T; N]
where
    T: Into<SmolStr>,
{
    fn into_columns(self) -> Columns {
        Columns::Many(self.into_iter().map(Into::into).collect())
    }
}

impl<T> IntoColumns for Vec<T>
where
    T: Into<SmolStr>,
{
    fn into_columns(self) -> Columns {
        Columns::Many(self.into_iter().map(Into::into).collect())
    }
}

impl<T> IntoColumns for &[T]
where
    T: Into<SmolStr> + Clone,
{
    fn into_columns(self) -> Columns {
        Columns::Many(self.iter().cloned().map(Into::into).collect())
    }
}
