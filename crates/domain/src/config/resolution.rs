use serde::{Deserialize, Serialize};

/// Items requested per `traverseiterator` round-trip.
pub const DEFAULT_ITERATOR_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    /// `getAllRecords` plus the type precedence policy.
    #[default]
    AllRecords,
    /// `getRecords` for exactly the requested type.
    Typed,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolutionConfig {
    #[serde(default)]
    pub mode: ResolutionMode,

    /// Host returned as CNAME for content (TXT) records outside dnslink lookups.
    #[serde(default = "default_gateway_host")]
    pub gateway_host: String,

    #[serde(default = "default_dnslink_prefix")]
    pub dnslink_prefix: String,

    #[serde(default = "default_answer_ttl")]
    pub answer_ttl: u32,

    #[serde(default = "default_iterator_page_size")]
    pub iterator_page_size: usize,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            mode: ResolutionMode::default(),
            gateway_host: default_gateway_host(),
            dnslink_prefix: default_dnslink_prefix(),
            answer_ttl: default_answer_ttl(),
            iterator_page_size: default_iterator_page_size(),
        }
    }
}

fn default_gateway_host() -> String {
    "dweb.link".to_string()
}

fn default_dnslink_prefix() -> String {
    "_dnslink.".to_string()
}

fn default_answer_ttl() -> u32 {
    3600
}

fn default_iterator_page_size() -> usize {
    DEFAULT_ITERATOR_PAGE_SIZE
}
