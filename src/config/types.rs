use serde::Deserialize;

/// Main configuration structure for Link-Spider
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Seed list, one URI per line (a leading `~` expands to `$HOME`)
    ///
    /// May be left out when `--uri-file` or `URI_FILE` supplies it.
    #[serde(rename = "uri-file", default)]
    pub uri_file: String,

    /// Prefix prepended to every manifest destination path
    #[serde(rename = "download-path")]
    pub download_path: String,

    /// Literal text removed (first occurrence) from each download's pathname
    #[serde(rename = "uri-strip-paths", default)]
    pub uri_strip_paths: Option<String>,

    /// Patterns tested against the absolute href
    #[serde(rename = "uri-blacklist", default)]
    pub uri_blacklist: Vec<String>,

    /// Patterns tested against the path, query and fragment
    #[serde(rename = "uri-path-blacklist", default)]
    pub uri_path_blacklist: Vec<String>,

    /// Patterns a host must match for absolute links to be followed
    #[serde(rename = "domain-whitelist", default)]
    pub domain_whitelist: Vec<String>,

    #[serde(default)]
    pub fetcher: FetcherConfig,
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_user_agent() -> String {
    format!("link-spider/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

/// HTTP basic-auth credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Builds credentials only when both parts are present and non-empty
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Option<Self> {
        match (username, password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Self { username, password })
            }
            _ => None,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
