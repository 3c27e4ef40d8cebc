pub mod domain_router;

pub use domain_router::DomainRouter;
