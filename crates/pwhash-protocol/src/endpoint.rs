/// HTTP endpoint paths.
pub mod endpoints {
    pub const HASH: &str = "/hash";
    pub const HASH_BY_KEY: &str = "/hash/:key";
    pub const STATS: &str = "/stats";
    pub const SHUTDOWN: &str = "/shutdown";
    pub const HEALTH: &str = "/health";
}

/// Body returned for a key whose digest is still being computed.
pub const PENDING_BODY: &str = "pending";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths() {
        assert_eq!(endpoints::HASH, "/hash");
        assert_eq!(endpoints::HASH_BY_KEY, "/hash/:key");
        assert_eq!(endpoints::STATS, "/stats");
        assert_eq!(endpoints::SHUTDOWN, "/shutdown");
        assert_eq!(endpoints::HEALTH, "/health");
    }
}
