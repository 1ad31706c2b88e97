use crate::conf::types::{LocationConfig, RuntimeConfig};
use anyhow::{Result, anyhow};

/// Longest-prefix location matcher over logical URI bytes.
#[derive(Debug)]
pub struct Router {
    routes: Vec<LocationConfig>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn from_config(cfg: &RuntimeConfig) -> Result<Self> {
        let mut router = Self::new();
        for location in &cfg.locations {
            router.add_route(location.clone())?;
        }
        Ok(router)
    }

    pub fn add_route(&mut self, location: LocationConfig) -> Result<()> {
        if !location.path.starts_with('/') {
            return Err(anyhow!(
                "location path must start with '/': {}",
                location.path
            ));
        }

        if self.routes.iter().any(|r| r.path == location.path) {
            return Err(anyhow!("duplicate location path: {}", location.path));
        }

        self.routes.push(location);

        // The longest prefix wins --> sort descending by path length.
        self.routes.sort_by(|a, b| b.path.len().cmp(&a.path.len()));

        Ok(())
    }

    /// `None` means the request stays in the server scope.
    pub fn match_route(&self, request_path: &[u8]) -> Option<&LocationConfig> {
        if request_path.first() != Some(&b'/') {
            return None;
        }

        self.routes
            .iter()
            .find(|route| path_matches(route.path.as_bytes(), request_path))
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}

fn path_matches(route_path: &[u8], request_path: &[u8]) -> bool {
    if route_path == b"/" || request_path == route_path {
        return true;
    }

    if !request_path.starts_with(route_path) {
        return false;
    }

    // "/docs/" already ends on a boundary; "/docs" must be followed by one.
    route_path.ends_with(b"/") || request_path.get(route_path.len()) == Some(&b'/')
}
