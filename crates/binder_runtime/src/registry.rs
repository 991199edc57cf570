//! BinderRegistry - runtime resolution and dispatch of generated binders
//!
//! The registration table is populated by the `register` functions the
//! synthesis pass emits next to each generated binder. Resolution happens
//! once per target type and is cached; types with no generated binder
//! cache a single shared no-op resolution so repeated lookups
//! short-circuit.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, instrument};

use crate::{RuntimeError, SensorContext};

/// The contract every generated binder implements
///
/// State machine: `Unbound -> Bound` on `bind`, `Bound -> Unbound` on
/// `unbind`. Calling `bind` twice without an intervening `unbind`
/// double-registers listeners; that is the caller's responsibility.
/// Disposal is dropping the instance.
pub trait SensorBinder<T: ?Sized>: Send {
    /// Register all listener wrappers for the target
    fn bind(&mut self, target: &Arc<T>);

    /// Unregister all listener wrappers
    fn unbind(&mut self);
}

/// Shared placeholder for types that declare no bindings
///
/// Never driven; exists so the cache entry for a binding-free type is a
/// single reference-identical value.
#[derive(Debug)]
pub struct NoOpBinder;

trait ErasedBinder: Send {
    fn bind_any(&mut self, target: &(dyn Any + Send + Sync)) -> Result<(), RuntimeError>;
    fn unbind(&mut self);
}

struct TypedBinder<T: Send + Sync + 'static> {
    inner: Box<dyn SensorBinder<T>>,
}

impl<T: Send + Sync + 'static> ErasedBinder for TypedBinder<T> {
    fn bind_any(&mut self, target: &(dyn Any + Send + Sync)) -> Result<(), RuntimeError> {
        let target = target
            .downcast_ref::<Arc<T>>()
            .ok_or_else(RuntimeError::type_mismatch::<T>)?;
        self.inner.bind(target);
        Ok(())
    }

    fn unbind(&mut self) {
        self.inner.unbind();
    }
}

type ErasedFactory = dyn Fn(&SensorContext, &(dyn Any + Send + Sync)) -> Result<Box<dyn ErasedBinder>, RuntimeError>
    + Send
    + Sync;

#[derive(Clone)]
enum Resolution {
    Factory(Arc<ErasedFactory>),
    NoOp(Arc<NoOpBinder>),
}

/// Process-wide registry of generated binder factories
///
/// Concurrent binds for different target types are independent; the
/// resolution for one type happens-before any reuse of its cache entry
/// (both maps are mutex-guarded).
pub struct BinderRegistry {
    resolutions: Mutex<HashMap<TypeId, Resolution>>,
    bound: Mutex<HashMap<(TypeId, usize), Box<dyn ErasedBinder>>>,
    noop: Arc<NoOpBinder>,
}

impl BinderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            resolutions: Mutex::new(HashMap::new()),
            bound: Mutex::new(HashMap::new()),
            noop: Arc::new(NoOpBinder),
        }
    }

    /// Register the binder factory for a target type
    ///
    /// Called by the generated `register` functions; a later registration
    /// for the same type replaces the earlier one.
    pub fn register<T, F>(&self, factory: F)
    where
        T: Send + Sync + 'static,
        F: Fn(&SensorContext, &Arc<T>) -> Box<dyn SensorBinder<T>> + Send + Sync + 'static,
    {
        let erased: Arc<ErasedFactory> = Arc::new(move |context, any| {
            let target = any
                .downcast_ref::<Arc<T>>()
                .ok_or_else(RuntimeError::type_mismatch::<T>)?;
            Ok(Box::new(TypedBinder {
                inner: factory(context, target),
            }) as Box<dyn ErasedBinder>)
        });

        self.resolutions
            .lock()
            .unwrap()
            .insert(TypeId::of::<T>(), Resolution::Factory(erased));

        debug!(target_type = %std::any::type_name::<T>(), "binder factory registered");
    }

    /// Construct and drive a binder for the target instance
    ///
    /// One binder instance per call; only the factory resolution is
    /// cached. Binding a type with no registered factory is a no-op.
    #[instrument(
        name = "binder_registry_bind",
        skip(self, target, context),
        fields(target_type = %std::any::type_name::<T>())
    )]
    pub fn bind<T>(&self, target: &Arc<T>, context: &SensorContext) -> Result<(), RuntimeError>
    where
        T: Send + Sync + 'static,
    {
        match self.resolve(TypeId::of::<T>()) {
            Resolution::NoOp(_) => {
                debug!("no bindings declared, using shared no-op binder");
                Ok(())
            }
            Resolution::Factory(factory) => {
                let mut binder = (factory.as_ref())(context, target)?;
                binder.bind_any(target)?;
                self.bound
                    .lock()
                    .unwrap()
                    .insert(instance_key::<T>(target), binder);
                debug!("binder bound");
                Ok(())
            }
        }
    }

    /// Retrieve the binder bound to the target instance and unbind it
    #[instrument(
        name = "binder_registry_unbind",
        skip(self, target),
        fields(target_type = %std::any::type_name::<T>())
    )]
    pub fn unbind<T>(&self, target: &Arc<T>) -> Result<(), RuntimeError>
    where
        T: Send + Sync + 'static,
    {
        let binder = self.bound.lock().unwrap().remove(&instance_key::<T>(target));

        match binder {
            Some(mut binder) => {
                binder.unbind();
                debug!("binder unbound");
                Ok(())
            }
            // Unbinding a binding-free type mirrors the no-op bind.
            None if matches!(self.resolve(TypeId::of::<T>()), Resolution::NoOp(_)) => Ok(()),
            None => Err(RuntimeError::not_bound::<T>()),
        }
    }

    fn resolve(&self, type_id: TypeId) -> Resolution {
        let mut resolutions = self.resolutions.lock().unwrap();
        resolutions
            .entry(type_id)
            .or_insert_with(|| Resolution::NoOp(Arc::clone(&self.noop)))
            .clone()
    }
}

impl Default for BinderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn instance_key<T>(target: &Arc<T>) -> (TypeId, usize)
where
    T: Send + Sync + 'static,
{
    (TypeId::of::<T>(), Arc::as_ptr(target) as usize)
}
