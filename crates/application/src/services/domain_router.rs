use hostdns_domain::{ResolverGroup, ResolverTable};
use std::sync::Arc;

/// Picks the resolver groups to try for a question name.
///
/// Every scope whose suffix matches contributes its groups, in the order the
/// scopes were first inserted into the table. There is no longest-suffix
/// preference between scopes.
#[derive(Debug, Clone)]
pub struct DomainRouter {
    table: Arc<ResolverTable>,
}

impl DomainRouter {
    pub fn new(table: Arc<ResolverTable>) -> Self {
        Self { table }
    }

    pub fn route(&self, name: &str) -> Vec<&ResolverGroup> {
        self.table
            .scoped()
            .filter(|(scope, _)| scope.matches(name))
            .flat_map(|(_, groups)| groups.iter())
            .collect()
    }

    pub fn defaults(&self) -> &[ResolverGroup] {
        self.table.defaults()
    }
}
