//! Route table core - registration and hot-path lookup.

use crate::dispatcher::{spawn_handler, HandlerRequest, HandlerSender};
use crate::runtime_config::RuntimeConfig;
use http::Method;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Mapping from HTTP method to a mapping from exact path string to handler.
///
/// Built via [`register`](Self::register) calls before the listener starts
/// accepting connections; never mutated afterwards. Each (method, path) pair
/// maps to at most one handler, and the most recently registered handler for
/// a pair wins silently.
#[derive(Default)]
pub struct RouteTable {
    routes: HashMap<Method, HashMap<String, HandlerSender>>,
}

impl RouteTable {
    /// Create an empty route table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for the exact (method, path) pair.
    ///
    /// Spawns a long-lived coroutine for the handler and stores its channel
    /// sender under the pair. The path is taken as an opaque literal: no
    /// validation, no pattern syntax, compared byte-for-byte at lookup time.
    /// Registration cannot fail.
    ///
    /// Re-registering an identical pair replaces the entry. The old sender is
    /// dropped, which closes its channel and lets the old coroutine exit.
    ///
    /// # Safety
    ///
    /// Spawns a `may` coroutine; the caller must ensure the may runtime is
    /// configured before registering handlers.
    pub unsafe fn register<F>(&mut self, method: Method, path: &str, handler_fn: F)
    where
        F: Fn(HandlerRequest) -> anyhow::Result<()> + Send + 'static,
    {
        let stack_size = RuntimeConfig::from_env().stack_size;
        let name = format!("{method} {path}");
        let sender = unsafe { spawn_handler(&name, stack_size, handler_fn) };

        let replaced = self
            .routes
            .entry(method.clone())
            .or_default()
            .insert(path.to_string(), sender)
            .is_some();
        if replaced {
            warn!(
                method = %method,
                path = %path,
                "replaced existing handler - old coroutine will exit"
            );
        }

        info!(
            method = %method,
            path = %path,
            total_routes = self.len(),
            "route registered"
        );
    }

    /// The sub-table of paths routed for a method, or `None` when no route
    /// was ever registered for it.
    #[must_use]
    pub fn routes_for(&self, method: &Method) -> Option<&HashMap<String, HandlerSender>> {
        self.routes.get(method)
    }

    /// Look up the handler registered for the exact (method, path) pair.
    ///
    /// Pure read; case-sensitive, no normalization.
    #[must_use]
    pub fn lookup(&self, method: &Method, path: &str) -> Option<&HandlerSender> {
        debug!(method = %method, path = %path, "route lookup");
        self.routes.get(method)?.get(path)
    }

    /// Total number of registered (method, path) pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
