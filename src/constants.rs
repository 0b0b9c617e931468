pub const TWINGATE_DOMAIN: &str = "twingate.com";
pub const GRAPHQL_PATH: &str = "/api/graphql/";
pub const CONFIG_FILE: &str = ".twingate-cli-config.json";

pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Page size used by the pagination driver. Not caller-configurable.
pub const PAGE_SIZE: u32 = 50;
pub const DEFAULT_LIMIT: u32 = 50;
pub const DEFAULT_MAX_PAGES: usize = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const SUBDOMAIN_ENV: &str = "TWINGATE_SUBDOMAIN";
pub const API_KEY_ENV: &str = "TWINGATE_API_KEY";

// Query used to verify a subdomain/key pair
pub const CREDENTIAL_TEST_QUERY: &str = "{ remoteNetworks(first: 1) { edges { node { id } } } }";
