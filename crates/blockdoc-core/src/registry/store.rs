//! Feature registry storage

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::FeatureRegistration;
use crate::error::{Error, Result};
use crate::feature::{Media, RouteRegistrar};

/// Catalogue of features keyed by name.
///
/// Built once at start-up and passed by reference afterwards; nothing in
/// the engine writes to it while documents are being processed, so a shared
/// `&FeatureRegistry` (or `Arc`) can serve concurrent requests.
///
/// Iteration follows insertion order. Re-registering a name replaces the
/// stored feature in place.
#[derive(Debug, Default)]
pub struct FeatureRegistry {
    features: IndexMap<String, FeatureRegistration>,
    tune_links: IndexMap<String, Vec<String>>,
    global_tunes: Vec<String>,
}

impl FeatureRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a feature, returning the registration it replaced.
    pub fn register(&mut self, reg: FeatureRegistration) -> Option<FeatureRegistration> {
        let name = reg.name().to_string();
        let previous = self.features.insert(name.clone(), reg);
        if previous.is_some() {
            debug!(feature = %name, "feature re-registered, replacing previous entry");
        }
        previous
    }

    /// Remove a feature. Blocks of this type are dropped the next time a
    /// document containing them is encoded.
    pub fn unregister(&mut self, name: &str) -> Option<FeatureRegistration> {
        self.features.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&FeatureRegistration> {
        self.features.get(name)
    }

    /// Like [`get`](Self::get), for callers that cannot continue without
    /// the feature.
    pub fn require(&self, name: &str) -> Result<&FeatureRegistration> {
        self.features.get(name).ok_or_else(|| Error::UnknownFeature {
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.features.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Registered names in registry order
    pub fn names(&self) -> Vec<&str> {
        self.features.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureRegistration> {
        self.features.values()
    }

    /// Look up features by name.
    ///
    /// With no names, every feature is returned in registry order. Otherwise
    /// the result follows `names` exactly; unknown names are logged and
    /// left out.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Vec<&FeatureRegistration> {
        if names.is_empty() {
            return self.features.values().collect();
        }

        names
            .iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let found = self.features.get(name);
                if found.is_none() {
                    warn!(feature = %name, "requested feature is not registered");
                }
                found
            })
            .collect()
    }

    /// Resolve `names` into a lookup view scoped to those features
    pub fn scope<S: AsRef<str>>(&self, names: &[S]) -> FeatureScope<'_> {
        let features = self
            .resolve(names)
            .into_iter()
            .map(|reg| (reg.name(), reg))
            .collect();
        FeatureScope { features }
    }

    /// Offer `tune` on blocks of `feature` in the editor configuration.
    pub fn associate_tune(&mut self, feature: impl Into<String>, tune: impl Into<String>) {
        let tunes = self.tune_links.entry(feature.into()).or_default();
        let tune = tune.into();
        if !tunes.contains(&tune) {
            tunes.push(tune);
        }
    }

    /// Tunes associated with `feature`, in association order
    pub fn tunes_for(&self, feature: &str) -> &[String] {
        self.tune_links
            .get(feature)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Offer `name` as a tune on every block.
    pub fn mark_global_tune(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.global_tunes.contains(&name) {
            self.global_tunes.push(name);
        }
    }

    pub fn global_tunes(&self) -> &[String] {
        &self.global_tunes
    }

    /// Merged asset manifest for the given features
    pub fn media<S: AsRef<str>>(&self, names: &[S]) -> Media {
        let mut media = Media::new();
        for reg in self.resolve(names) {
            media.merge(&reg.media());
        }
        media
    }

    /// Run every feature's start-up hook against `router`.
    pub fn register_routes(&self, router: &mut dyn RouteRegistrar) {
        for reg in self.features.values() {
            debug!(feature = %reg.name(), "running on_register hook");
            reg.on_register(router);
        }
    }
}

/// Features active for one operation, looked up by name.
///
/// Preserves the order the scope was resolved in.
#[derive(Debug, Clone)]
pub struct FeatureScope<'r> {
    features: IndexMap<&'r str, &'r FeatureRegistration>,
}

impl<'r> FeatureScope<'r> {
    pub fn get(&self, name: &str) -> Option<&'r FeatureRegistration> {
        self.features.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.features.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'r FeatureRegistration> + '_ {
        self.features.values().copied()
    }
}
