const DOT: char = '.';

/// Translation between the DNS zone this server answers for and the
/// name space of the NNS contract.
///
/// All suffixes are stored without leading or trailing dots. The mapping is
/// set once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainMapping {
    dns_domain: String,
    nns_domain: String,
    strip_suffix: String,
}

impl DomainMapping {
    pub fn new(dns_domain: &str, nns_domain: &str) -> Self {
        Self {
            dns_domain: trim_dots(dns_domain),
            nns_domain: trim_dots(nns_domain),
            strip_suffix: String::new(),
        }
    }

    /// Suffix removed from every lowercased query before remapping.
    pub fn with_strip_suffix(mut self, suffix: &str) -> Self {
        self.strip_suffix = trim_dots(suffix);
        self
    }

    pub fn dns_domain(&self) -> &str {
        &self.dns_domain
    }

    pub fn nns_domain(&self) -> &str {
        &self.nns_domain
    }

    pub fn strip_suffix(&self) -> &str {
        &self.strip_suffix
    }

    /// Maps a DNS query name into the contract's name space.
    ///
    /// `nicename.containers.testnet.fs.neo.org.` with dns domain
    /// `containers.testnet.fs.neo.org` and nns domain `container` becomes
    /// `nicename.container`.
    pub fn map_name(&self, query: &str) -> String {
        let mut name = query.strip_suffix(DOT).unwrap_or(query).to_lowercase();

        if self.is_in_nns_domain(&name) {
            return name;
        }

        if !self.strip_suffix.is_empty() {
            name = strip_domain_suffix(&name, &self.strip_suffix).to_string();
        }

        if !self.dns_domain.is_empty() {
            name = strip_domain_suffix(&name, &self.dns_domain).to_string();
        }

        if !self.nns_domain.is_empty() && !self.is_in_nns_domain(&name) {
            if !name.is_empty() {
                name.push(DOT);
            }
            name.push_str(&self.nns_domain);
        }

        name
    }
}

impl DomainMapping {
    /// An already mapped name keeps its suffix, which makes `map_name` idempotent.
    fn is_in_nns_domain(&self, name: &str) -> bool {
        if self.nns_domain.is_empty() {
            return false;
        }
        match name.strip_suffix(self.nns_domain.as_str()) {
            Some(rest) => rest.is_empty() || rest.ends_with(DOT),
            None => false,
        }
    }
}

fn trim_dots(value: &str) -> String {
    value.trim_matches(DOT).to_string()
}

/// Removes `suffix` and the separator right before it when it covers whole
/// labels of `name`.
fn strip_domain_suffix<'a>(name: &'a str, suffix: &str) -> &'a str {
    match name.strip_suffix(suffix) {
        Some("") => "",
        Some(rest) => rest.strip_suffix(DOT).unwrap_or(name),
        None => name,
    }
}
