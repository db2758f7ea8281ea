use tracing::{debug, info};

/// Known peer base URLs, kept in insertion order without duplicates.
///
/// URLs are compared as plain strings. A URL whose port equals the local
/// listening port is taken to be this node and never stored; the host is not
/// compared, so a remote peer that happens to share our port number is
/// skipped as well.
#[derive(Clone, Debug)]
pub struct NodeRegistry {
    local_port: String,
    nodes: Vec<String>,
}

impl NodeRegistry {
    pub fn new(local_port: u16) -> Self {
        Self {
            local_port: local_port.to_string(),
            nodes: Vec::new(),
        }
    }

    /// Returns `true` if `url` was added.
    pub fn register(&mut self, url: &str) -> bool {
        if url_port(url) == Some(self.local_port.as_str()) {
            debug!(url, "skipping registration of own address");
            return false;
        }
        if self.contains(url) {
            return false;
        }
        self.nodes.push(url.to_string());
        info!(url, "registered node");
        true
    }

    pub fn list(&self) -> &[String] {
        &self.nodes
    }

    pub fn contains(&self, url: &str) -> bool {
        self.nodes.iter().any(|n| n == url)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Port component of an absolute URL such as `http://host:5000/path`.
/// `None` when the URL has no scheme or names no explicit port.
pub fn url_port(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let authority = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    let port = match host_port.strip_prefix('[') {
        // [v6]:port
        Some(v6) => v6.split_once("]:")?.1,
        None => host_port.rsplit_once(':')?.1,
    };
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(port)
}
