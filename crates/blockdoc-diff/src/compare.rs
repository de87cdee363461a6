//! Field comparison dispatch for revision views
//!
//! A revision screen compares two instances of a model field by field. The
//! dispatcher picks a comparer by the runtime type of the field value and
//! returns `None` for types nobody registered, so the caller can fall back
//! to its default rendering.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use blockdoc_core::{Document, FeatureRegistry};
use tracing::debug;

use crate::engine::{DiffOptions, Differ};
use crate::error::{Error, Result};

/// Renders an HTML comparison of two values of one concrete type
pub trait FieldComparer: Send + Sync {
    /// Name of the compared type, for diagnostics
    fn type_name(&self) -> &'static str;

    fn compare(&self, old: &dyn Any, new: &dyn Any) -> Result<String>;
}

/// Comparers keyed by the [`TypeId`] of the value they compare
#[derive(Default)]
pub struct CompareDispatcher {
    comparers: HashMap<TypeId, Arc<dyn FieldComparer>>,
}

impl std::fmt::Debug for CompareDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.comparers.values().map(|c| c.type_name()).collect();
        names.sort_unstable();
        f.debug_struct("CompareDispatcher").field("comparers", &names).finish()
    }
}

impl CompareDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route comparisons of `T` values to `comparer`, returning the comparer
    /// it replaced.
    pub fn register<T: Any>(
        &mut self,
        comparer: Arc<dyn FieldComparer>,
    ) -> Option<Arc<dyn FieldComparer>> {
        debug!(value_type = type_name::<T>(), "registering field comparer");
        self.comparers.insert(TypeId::of::<T>(), comparer)
    }

    pub fn supports<T: Any>(&self) -> bool {
        self.comparers.contains_key(&TypeId::of::<T>())
    }

    /// Compare two field values of the same runtime type.
    ///
    /// Returns `Ok(None)` when no comparer handles that type.
    pub fn compare(&self, old: &dyn Any, new: &dyn Any) -> Result<Option<String>> {
        let type_id = (*old).type_id();
        if type_id != (*new).type_id() {
            return Err(Error::TypeMismatch {
                old: self.describe(type_id),
                new: self.describe((*new).type_id()),
            });
        }
        match self.comparers.get(&type_id) {
            Some(comparer) => comparer.compare(old, new).map(Some),
            None => Ok(None),
        }
    }

    fn describe(&self, type_id: TypeId) -> &'static str {
        self.comparers
            .get(&type_id)
            .map_or("unregistered", |c| c.type_name())
    }
}

/// Diffs two [`Document`] revisions into HTML
#[derive(Debug)]
pub struct DocumentComparer {
    registry: Arc<FeatureRegistry>,
    options: DiffOptions,
}

impl DocumentComparer {
    pub fn new(registry: Arc<FeatureRegistry>, options: DiffOptions) -> Self {
        Self { registry, options }
    }
}

impl FieldComparer for DocumentComparer {
    fn type_name(&self) -> &'static str {
        type_name::<Document>()
    }

    fn compare(&self, old: &dyn Any, new: &dyn Any) -> Result<String> {
        let (Some(old), Some(new)) = (old.downcast_ref::<Document>(), new.downcast_ref::<Document>())
        else {
            return Err(Error::TypeMismatch {
                old: "non-document",
                new: "non-document",
            });
        };
        Ok(Differ::new(&self.registry)
            .with_options(self.options.clone())
            .diff(old, new))
    }
}

/// Hook the document diff into `dispatcher`
pub fn register(dispatcher: &mut CompareDispatcher, registry: Arc<FeatureRegistry>, options: DiffOptions) {
    dispatcher.register::<Document>(Arc::new(DocumentComparer::new(registry, options)));
}
