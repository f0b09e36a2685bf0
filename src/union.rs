use crate::{
    builder::{Builder, Statement},
    error::{Error, Result},
    writer::FormatContext,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnionKind {
    /// Bare `UNION`.
    Plain,
    All,
    Distinct,
}

impl UnionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnionKind::Plain => " UNION ",
            UnionKind::All => " UNION ALL ",
            UnionKind::Distinct => " UNION DISTINCT ",
        }
    }
}

#[derive(Debug, Clone)]
struct UnionMember {
    kind: UnionKind,
    builder: Builder,
}

#[derive(Debug, Clone)]
pub(crate) struct UnionStatement {
    members: Vec<UnionMember>,
    /// Set once a select-only clause was applied to the union itself.
    pub(crate) own_clauses: bool,
}

impl UnionStatement {
    pub(crate) fn new(first: Builder, kind: UnionKind, second: Builder) -> Self {
        let mut union = Self {
            members: Vec::with_capacity(2),
            own_clauses: false,
        };
        union.push(UnionKind::Plain, first);
        union.push(kind, second);
        union
    }

    pub(crate) fn push(&mut self, kind: UnionKind, builder: Builder) {
        self.members.push(UnionMember { kind, builder });
    }

    /// The builder the union was started from.
    pub(crate) fn into_first(self) -> Option<Builder> {
        self.members.into_iter().next().map(|member| member.builder)
    }

    pub(crate) fn write(&self, builder: &Builder, context: &mut FormatContext) -> Result<()> {
        if self.own_clauses || builder.cond.is_valid() {
            return Err(Error::UnionWithOwnClauses);
        }
        for (index, member) in self.members.iter().enumerate() {
            let Statement::Select(_) = member.builder.statement else {
                return Err(Error::UnionOnNonSelect);
            };
            if index > 0 {
                context.write_str(member.kind.as_str());
            }
            context.write_char('(');
            member.builder.format_scoped(context)?;
            context.write_char(')');
        }
        Ok(())
    }
}
