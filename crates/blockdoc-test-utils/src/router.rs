//! Route registrar that records what features mount

use blockdoc_core::RouteRegistrar;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRoute {
    pub method: String,
    pub path: String,
    pub name: String,
}

/// Collects every route registered through it, in call order
#[derive(Debug, Default)]
pub struct RecordingRouter {
    pub routes: Vec<RecordedRoute>,
}

impl RecordingRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> Vec<&str> {
        self.routes.iter().map(|r| r.path.as_str()).collect()
    }
}

impl RouteRegistrar for RecordingRouter {
    fn register_route(&mut self, method: &str, path: &str, name: &str) {
        self.routes.push(RecordedRoute {
            method: method.to_string(),
            path: path.to_string(),
            name: name.to_string(),
        });
    }
}
