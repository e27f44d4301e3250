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

/// The Uri-Path of a request, resolved to numeric LWM2M components.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Lwm2mPath {
    Numeric { ids: [u16; 3], len: usize },
    Alias,
}

fn parse_path(request: &Message<'_>) -> Result<Lwm2mPath, Error> {
    let mut ids = [0u16; 3];
    let mut len = 0;

    for segment in request.option_values(OptionNumber::URI_PATH) {
        if !segment.iter().all(u8::is_ascii_digit) {
            return Ok(Lwm2mPath::Alias);
        }

        if segment.is_empty() || len >= ids.len() {
            return Err(Error::NotFound);
        }

        ids[len] = std::str::from_utf8(segment)
            .ok()
            .and_then(|x| x.parse().ok())
            .ok_or(Error::NotFound)?;
        len += 1;
    }

    Ok(Lwm2mPath::Numeric { ids, len })
}

fn method_operation(request: &Message<'_>) -> Operation {
    match request.msg_code() {
        MsgCode::MethodGet => {
            // Discover only when link-format is the sole Content-Format.
            if ct_mask(request) == ContentFormatMask::LINK_FORMAT {
                Operation::DISCOVER
            } else {
                Operation::READ
            }
        }
        MsgCode::MethodPut | MsgCode::MethodPost => Operation::WRITE,
        MsgCode::MethodDelete => Operation::DELETE,
        _ => Operation::NONE,
    }
}

impl<P: Lwm2mParams> Lwm2mService<P> {
    /// Routes a decoded request to the registered object or instance callback.
    ///
    /// The Uri-Path selects the target: `/o` reaches the object, `/o/i` the instance and
    /// `/o/i/r` a resource of the instance. A non-numeric path reaches the first named
    /// object whose alias prefixes the first path segment. The request method selects the
    /// [`Operation`] passed along.
    ///
    /// Returns the callback's result, [`Error::NotFound`] when nothing matches, or
    /// [`Error::MethodNotAllowed`] for a DELETE on a resource.
    pub fn dispatch(&self, request: &Message<'_>) -> Result<(), Error> {
        let operation = method_operation(request);

        match parse_path(request)? {
            Lwm2mPath::Alias => self.dispatch_alias(request),
            Lwm2mPath::Numeric { ids, len } => match &ids[..len] {
                [] => self.dispatch_root(operation, request),
                &[object_id] => self.dispatch_object(object_id, operation, request),
                &[object_id, instance_id] => {
                    self.dispatch_instance(object_id, instance_id, operation, request)
                }
                &[object_id, instance_id, resource_id] => {
                    self.dispatch_resource(object_id, instance_id, resource_id, operation, request)
                }
                _ => Err(Error::NotFound),
            },
        }
    }

    fn dispatch_root(&self, operation: Operation, request: &Message<'_>) -> Result<(), Error> {
        if operation != Operation::DELETE {
            return Err(Error::NotFound);
        }

        let root = self.lock().root.clone().ok_or(Error::NotFound)?;

        debug!(">> {} root", operation);
        root(operation, request)
    }

    fn dispatch_object(
        &self,
        object_id: u16,
        operation: Operation,
        request: &Message<'_>,
    ) -> Result<(), Error> {
        let object = self.lock().object(object_id)?;

        debug!(">> {} object /{}/", operation, object_id);
        let ret = object.call(INVALID_INSTANCE, operation, request);
        trace!("<< {} object /{}/: {:?}", operation, object_id, ret);
        ret
    }

    fn dispatch_instance(
        &self,
        object_id: u16,
        instance_id: u16,
        operation: Operation,
        request: &Message<'_>,
    ) -> Result<(), Error> {
        let instance = self.lock().instance(object_id, instance_id);

        if let Ok(instance) = instance {
            debug!(">> {} instance /{}/{}/", operation, object_id, instance_id);
            let ret = instance.call(INVALID_RESOURCE, operation, request);
            trace!(
                "<< {} instance /{}/{}/: {:?}",
                operation,
                object_id,
                instance_id,
                ret
            );
            return ret;
        }

        // Writes and creates of unknown instances go to the object, which is how
        // bootstrap servers populate it.
        let operation = match (operation, request.msg_code()) {
            (Operation::WRITE, MsgCode::MethodPut) => Operation::WRITE,
            (_, MsgCode::MethodPost) => Operation::CREATE,
            _ => return Err(Error::NotFound),
        };

        let object = self.lock().object(object_id)?;

        debug!(">> {} object /{}/{}/", operation, object_id, instance_id);
        let ret = object.call(instance_id, operation, request);
        trace!(
            "<< {} object /{}/{}/: {:?}",
            operation,
            object_id,
            instance_id,
            ret
        );
        ret
    }

    fn dispatch_resource(
        &self,
        object_id: u16,
        instance_id: u16,
        resource_id: u16,
        mut operation: Operation,
        request: &Message<'_>,
    ) -> Result<(), Error> {
        if operation == Operation::DELETE {
            debug!("DELETE of resource /{}/{}/{} rejected", object_id, instance_id, resource_id);
            return Err(Error::MethodNotAllowed);
        }

        let instance = self.lock().instance(object_id, instance_id)?;

        if request.msg_code() == MsgCode::MethodPost {
            let allowed = instance
                .resources()
                .resource_operation(resource_id)
                .ok_or(Error::NotFound)?;

            if allowed.intersects(Operation::EXECUTE) {
                operation = Operation::EXECUTE;
            } else if allowed.intersects(Operation::WRITE) {
                operation = Operation::WRITE;
            }
        }

        debug!(
            ">> {} instance /{}/{}/{}/",
            operation, object_id, instance_id, resource_id
        );
        let ret = instance.call(resource_id, operation, request);
        trace!(
            "<< {} instance /{}/{}/{}/: {:?}",
            operation,
            object_id,
            instance_id,
            resource_id,
            ret
        );
        ret
    }

    fn dispatch_alias(&self, request: &Message<'_>) -> Result<(), Error> {
        let uri = request
            .option_values(OptionNumber::URI_PATH)
            .next()
            .ok_or(Error::NotFound)?;

        let object = self.lock().named_object(uri)?;

        debug!(">> {} named object {:?}", Operation::NONE, object.alias());
        object.call(INVALID_INSTANCE, Operation::NONE, request)
    }
}
