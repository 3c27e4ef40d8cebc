
pub use builders::ResolverGroupBuilder;
