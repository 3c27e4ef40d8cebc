/// One resolver entry as reported by the host's split-DNS facility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformResolver {
    /// Position in the platform report (`resolver #N`), used for labels.
    pub index: usize,
    pub domain: Option<String>,
    pub nameservers: Vec<String>,
    pub port: Option<u16>,
    /// Lower values win. Entries without a hint sort as 0.
    pub order: u32,
    pub reachable: bool,
}

impl PlatformResolver {
    pub fn has_domain(&self) -> bool {
        self.domain
            .as_deref()
            .is_some_and(|d| !d.trim().trim_end_matches('.').is_empty())
    }
}
