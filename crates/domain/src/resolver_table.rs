use crate::{DomainScope, ResolverGroup};

/// Domain-scoped resolver groups plus the default chain.
///
/// Built once by discovery and shared read-only by every query afterwards.
/// Scopes iterate in first-insertion order; groups under one scope keep the
/// order they were pushed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverTable {
    scoped: Vec<(DomainScope, Vec<ResolverGroup>)>,
    defaults: Vec<ResolverGroup>,
}

impl ResolverTable {
    pub fn builder() -> ResolverTableBuilder {
        ResolverTableBuilder::default()
    }

    /// A table holding only a default chain.
    pub fn with_defaults(defaults: Vec<ResolverGroup>) -> Self {
        let mut builder = Self::builder();
        for group in defaults {
            builder.push(group);
        }
        builder.build()
    }

    pub fn scoped(&self) -> impl Iterator<Item = (&DomainScope, &[ResolverGroup])> {
        self.scoped
            .iter()
            .map(|(scope, groups)| (scope, groups.as_slice()))
    }

    pub fn groups_for(&self, scope: &str) -> Option<&[ResolverGroup]> {
        let scope = DomainScope::new(scope)?;
        self.scoped
            .iter()
            .find(|(s, _)| *s == scope)
            .map(|(_, groups)| groups.as_slice())
    }

    pub fn defaults(&self) -> &[ResolverGroup] {
        &self.defaults
    }

    pub fn scope_count(&self) -> usize {
        self.scoped.len()
    }

    pub fn group_count(&self) -> usize {
        self.scoped.iter().map(|(_, g)| g.len()).sum::<usize>() + self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.group_count() == 0
    }
}

#[derive(Debug, Default)]
pub struct ResolverTableBuilder {
    table: ResolverTable,
}

impl ResolverTableBuilder {
    /// Scoped groups go under their scope, unscoped ones extend the default chain.
    pub fn push(&mut self, group: ResolverGroup) -> &mut Self {
        match group.scope().cloned() {
            Some(scope) => {
                match self.table.scoped.iter_mut().find(|(s, _)| *s == scope) {
                    Some((_, groups)) => groups.push(group),
                    None => self.table.scoped.push((scope, vec![group])),
                }
            }
            None => self.table.defaults.push(group),
        }
        self
    }

    pub fn build(self) -> ResolverTable {
        self.table
    }
}
