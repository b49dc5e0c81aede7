//! The [`Registry`] type.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use tracing::error;

use crate::error::{RegistryError, Result};

type Instance = Box<dyn Any + Send + Sync>;

/// A map from type to one bound instance of that type.
///
/// Each binding is keyed by the exact static type it was bound as, so bind
/// trait objects through the handle callers will resolve (for example
/// `Arc<dyn Backend>`), not the concrete type behind it. Resolution hands out
/// clones.
#[derive(Default)]
pub struct Registry {
    instances: RwLock<HashMap<TypeId, Instance>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `instance` as the value for `T`, replacing and returning any
    /// previous binding.
    pub fn bind<T: Any + Send + Sync + Clone>(&self, instance: T) -> Option<T> {
        let previous = self
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TypeId::of::<T>(), Box::new(instance));
        previous.and_then(|boxed| boxed.downcast::<T>().ok().map(|b| *b))
    }

    /// Remove the binding for `T`, returning it.
    pub fn unbind<T: Any + Send + Sync + Clone>(&self) -> Option<T> {
        let removed = self
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&TypeId::of::<T>());
        removed.and_then(|boxed| boxed.downcast::<T>().ok().map(|b| *b))
    }

    /// Resolve the instance bound for `T`.
    ///
    /// A missing binding is logged as an error and yields `None`.
    pub fn resolve<T: Any + Clone>(&self) -> Option<T> {
        self.lookup(false)
    }

    /// Resolve without logging when nothing is bound. Use this where absence
    /// is expected.
    pub fn resolve_quiet<T: Any + Clone>(&self) -> Option<T> {
        self.lookup(true)
    }

    /// Resolve, or `T::default()` when nothing is bound. Logs like
    /// [`resolve`](Self::resolve).
    pub fn resolve_or_default<T: Any + Clone + Default>(&self) -> T {
        self.resolve().unwrap_or_default()
    }

    /// Resolve for `?` call sites. Logs like [`resolve`](Self::resolve).
    pub fn try_resolve<T: Any + Clone>(&self) -> Result<T> {
        self.resolve().ok_or(RegistryError::NotBound {
            type_name: type_name::<T>(),
        })
    }

    /// Whether anything is bound for `T`.
    pub fn is_bound<T: Any>(&self) -> bool {
        self.instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<T>())
    }

    /// Number of bound types.
    pub fn len(&self) -> usize {
        self.instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup<T: Any + Clone>(&self, quiet: bool) -> Option<T> {
        let found = self
            .instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<T>())
            .and_then(|instance| instance.downcast_ref::<T>())
            .cloned();
        if found.is_none() && !quiet {
            error!(type_name = type_name::<T>(), "no binding found");
        }
        found
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("bindings", &self.len())
            .finish()
    }
}
