pub mod discover_resolvers;

pub use discover_resolvers::{DiscoverResolversUseCase, DiscoverySettings};
