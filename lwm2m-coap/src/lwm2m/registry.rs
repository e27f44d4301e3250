// Copyright 2019 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

use super::*;
use std::sync::{Arc, Mutex, MutexGuard};

/// Callback invoked for requests addressed to an object, or to an instance that the
/// registry does not hold.
///
/// Arguments are the object, the instance id (or [`INVALID_INSTANCE`]), the derived
/// operation and the request.
pub type ObjectCallback =
    dyn Fn(&Lwm2mObject, u16, Operation, &Message<'_>) -> Result<(), Error> + Send + Sync;

/// Callback invoked for requests addressed to an instance or one of its resources.
///
/// Arguments are the instance, the resource id (or [`INVALID_RESOURCE`]), the derived
/// operation and the request.
pub type InstanceCallback =
    dyn Fn(&Lwm2mInstance, u16, Operation, &Message<'_>) -> Result<(), Error> + Send + Sync;

/// Callback invoked for a DELETE on the root path.
pub type RootCallback = dyn Fn(Operation, &Message<'_>) -> Result<(), Error> + Send + Sync;

/// A registered LWM2M object.
#[derive(Clone)]
pub struct Lwm2mObject {
    object_id: u16,
    alias: Option<Arc<str>>,
    callback: Arc<ObjectCallback>,
}

impl Lwm2mObject {
    /// Creates an object with a numeric id.
    pub fn new<F>(object_id: u16, callback: F) -> Lwm2mObject
    where
        F: Fn(&Lwm2mObject, u16, Operation, &Message<'_>) -> Result<(), Error>
            + Send
            + Sync
            + 'static,
    {
        Lwm2mObject {
            object_id,
            alias: None,
            callback: Arc::new(callback),
        }
    }

    /// Creates a named object, reachable by a Uri-Path starting with `alias`.
    pub fn named<F>(alias: &str, callback: F) -> Lwm2mObject
    where
        F: Fn(&Lwm2mObject, u16, Operation, &Message<'_>) -> Result<(), Error>
            + Send
            + Sync
            + 'static,
    {
        Lwm2mObject {
            object_id: NAMED_OBJECT,
            alias: Some(Arc::from(alias)),
            callback: Arc::new(callback),
        }
    }

    /// Returns the object id, or [`NAMED_OBJECT`] for a named object.
    pub fn object_id(&self) -> u16 {
        self.object_id
    }

    /// Returns the alias of a named object.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_ref().map(|x| &**x)
    }

    /// Returns true if this is a named object.
    pub fn is_named(&self) -> bool {
        self.object_id == NAMED_OBJECT
    }

    pub(super) fn call(
        &self,
        instance_id: u16,
        operation: Operation,
        request: &Message<'_>,
    ) -> Result<(), Error> {
        (self.callback)(self, instance_id, operation, request)
    }

    fn same(&self, other: &Lwm2mObject) -> bool {
        self.object_id == other.object_id && self.alias == other.alias
    }
}

impl core::fmt::Debug for Lwm2mObject {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Lwm2mObject")
            .field("object_id", &self.object_id)
            .field("alias", &self.alias)
            .finish()
    }
}

/// A registered instance of an LWM2M object.
#[derive(Clone)]
pub struct Lwm2mInstance {
    object_id: u16,
    instance_id: u16,
    resources: Arc<dyn ResourceOperations>,
    callback: Arc<InstanceCallback>,
}

impl Lwm2mInstance {
    /// Creates an instance with the given resource operation table.
    pub fn new<R, F>(object_id: u16, instance_id: u16, resources: R, callback: F) -> Lwm2mInstance
    where
        R: ResourceOperations + 'static,
        F: Fn(&Lwm2mInstance, u16, Operation, &Message<'_>) -> Result<(), Error>
            + Send
            + Sync
            + 'static,
    {
        Lwm2mInstance {
            object_id,
            instance_id,
            resources: Arc::new(resources),
            callback: Arc::new(callback),
        }
    }

    /// Returns the id of the object this is an instance of.
    pub fn object_id(&self) -> u16 {
        self.object_id
    }

    /// Returns the instance id.
    pub fn instance_id(&self) -> u16 {
        self.instance_id
    }

    /// Returns the resource operation table.
    pub fn resources(&self) -> &dyn ResourceOperations {
        &*self.resources
    }

    pub(super) fn call(
        &self,
        resource_id: u16,
        operation: Operation,
        request: &Message<'_>,
    ) -> Result<(), Error> {
        (self.callback)(self, resource_id, operation, request)
    }
}

impl core::fmt::Debug for Lwm2mInstance {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Lwm2mInstance")
            .field("object_id", &self.object_id)
            .field("instance_id", &self.instance_id)
            .field("num_resources", &self.resources.num_resources())
            .finish()
    }
}

#[derive(Default)]
pub(super) struct Registry {
    pub(super) objects: Vec<Lwm2mObject>,
    pub(super) instances: Vec<Lwm2mInstance>,
    pub(super) root: Option<Arc<RootCallback>>,
}

impl Registry {
    pub(super) fn object(&self, object_id: u16) -> Result<Lwm2mObject, Error> {
        self.objects
            .iter()
            .find(|x| x.object_id == object_id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    pub(super) fn instance(&self, object_id: u16, instance_id: u16) -> Result<Lwm2mInstance, Error> {
        self.instances
            .iter()
            .find(|x| x.object_id == object_id && x.instance_id == instance_id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    pub(super) fn named_object(&self, uri: &[u8]) -> Result<Lwm2mObject, Error> {
        self.objects
            .iter()
            .filter(|x| x.is_named())
            .find(|x| x.alias().map_or(false, |alias| uri.starts_with(alias.as_bytes())))
            .cloned()
            .ok_or(Error::NotFound)
    }
}

/// The LWM2M object registry and request router.
///
/// All registry state sits behind one mutex. The lock is released before any callback
/// runs, so callbacks are free to add or delete objects and instances.
pub struct Lwm2mService<P: Lwm2mParams = StandardLwm2mParams> {
    params: P,
    registry: Mutex<Registry>,
}

impl Lwm2mService<StandardLwm2mParams> {
    /// Creates an empty service with the standard limits.
    pub fn new() -> Self {
        Lwm2mService::with_params(StandardLwm2mParams)
    }
}

impl Default for Lwm2mService<StandardLwm2mParams> {
    fn default() -> Self {
        Lwm2mService::new()
    }
}

impl<P: Lwm2mParams> core::fmt::Debug for Lwm2mService<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let registry = self.lock();
        f.debug_struct("Lwm2mService")
            .field("params", &self.params)
            .field("objects", &registry.objects)
            .field("instances", &registry.instances)
            .finish()
    }
}

impl<P: Lwm2mParams> Lwm2mService<P> {
    /// Creates an empty service with the given limits.
    pub fn with_params(params: P) -> Lwm2mService<P> {
        Lwm2mService {
            params,
            registry: Mutex::new(Registry::default()),
        }
    }

    /// Returns the limits of this service.
    pub fn params(&self) -> &P {
        &self.params
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, Registry> {
        // A panicking callback never holds the lock, so poisoning leaves the tables
        // consistent.
        match self.registry.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Sets the callback for DELETE requests on the root path.
    pub fn set_root_handler<F>(&self, callback: F)
    where
        F: Fn(Operation, &Message<'_>) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.lock().root = Some(Arc::new(callback));
    }

    /// Adds an object to the registry.
    ///
    /// Fails with [`Error::OutOfMemory`] when the registry already holds
    /// [`Lwm2mParams::MAX_OBJECTS`] objects.
    pub fn object_add(&self, object: Lwm2mObject) -> Result<(), Error> {
        let mut registry = self.lock();

        if registry.objects.len() >= self.params.max_objects() {
            warn!("object table full, dropping {:?}", object);
            return Err(Error::OutOfMemory);
        }

        debug!("object_add {:?}", object);
        registry.objects.push(object);
        Ok(())
    }

    /// Removes an object from the registry, matching on object id and alias.
    ///
    /// The last object takes the freed slot, so registration order is not preserved.
    pub fn object_delete(&self, object: &Lwm2mObject) -> Result<(), Error> {
        let mut registry = self.lock();

        let index = registry
            .objects
            .iter()
            .position(|x| x.same(object))
            .ok_or(Error::NotFound)?;

        debug!("object_delete {:?}", object);
        registry.objects.swap_remove(index);
        Ok(())
    }

    /// Adds an object instance to the registry.
    ///
    /// Fails with [`Error::OutOfMemory`] when the registry already holds
    /// [`Lwm2mParams::MAX_INSTANCES`] instances.
    pub fn instance_add(&self, instance: Lwm2mInstance) -> Result<(), Error> {
        let mut registry = self.lock();

        if registry.instances.len() >= self.params.max_instances() {
            warn!("instance table full, dropping {:?}", instance);
            return Err(Error::OutOfMemory);
        }

        debug!("instance_add {:?}", instance);
        registry.instances.push(instance);
        Ok(())
    }

    /// Removes the instance with the given object and instance id from the registry.
    ///
    /// The last instance takes the freed slot, so registration order is not preserved.
    pub fn instance_delete(&self, object_id: u16, instance_id: u16) -> Result<(), Error> {
        let mut registry = self.lock();

        let index = registry
            .instances
            .iter()
            .position(|x| x.object_id == object_id && x.instance_id == instance_id)
            .ok_or(Error::NotFound)?;

        debug!("instance_delete /{}/{}", object_id, instance_id);
        registry.instances.swap_remove(index);
        Ok(())
    }

    /// Returns a snapshot of the registered objects.
    pub fn objects(&self) -> Vec<Lwm2mObject> {
        self.lock().objects.clone()
    }

    /// Returns a snapshot of the registered instances.
    pub fn instances(&self) -> Vec<Lwm2mInstance> {
        self.lock().instances.clone()
    }
}
