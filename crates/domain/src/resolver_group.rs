use crate::{DomainError, DomainScope};
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

/// An ordered set of upstream name servers sharing one domain scope, or none.
///
/// Groups are immutable once built and cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverGroup {
    label: Arc<str>,
    servers: Arc<[SocketAddr]>,
    scope: Option<DomainScope>,
}

impl ResolverGroup {
    /// Builds an unscoped group. Fails when `servers` is empty.
    pub fn new(
        label: impl Into<Arc<str>>,
        servers: Vec<SocketAddr>,
    ) -> Result<Self, DomainError> {
        let label = label.into();
        if servers.is_empty() {
            return Err(DomainError::EmptyResolverGroup(label.to_string()));
        }
        Ok(Self {
            label,
            servers: servers.into(),
            scope: None,
        })
    }

    pub fn with_scope(mut self, scope: Option<DomainScope>) -> Self {
        self.scope = scope;
        self
    }

    /// Where the group came from (`scutil#2`, `resolv.conf`, `fallback`, ...).
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn servers(&self) -> &[SocketAddr] {
        &self.servers
    }

    pub fn scope(&self) -> Option<&DomainScope> {
        self.scope.as_ref()
    }
}

impl fmt::Display for ResolverGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.label)?;
        for (i, server) in self.servers.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", server)?;
        }
        f.write_str("]")?;
        if let Some(scope) = &self.scope {
            write!(f, " for {}", scope)?;
        }
        Ok(())
    }
}
