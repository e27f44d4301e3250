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
use core::fmt::Write;

/// A [`core::fmt::Write`] sink over an optional byte slice. Without a slice it only
/// counts.
struct SliceWrite<'a> {
    buffer: Option<&'a mut [u8]>,
    len: usize,
}

impl<'a> Write for SliceWrite<'a> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let dst = match self.buffer.as_mut() {
            Some(buffer) => Some(buffer.get_mut(self.len..).ok_or(core::fmt::Error)?),
            None => None,
        };

        self.len += encode_string(dst, s).map_err(|_| core::fmt::Error)?;
        Ok(())
    }
}

impl<P: Lwm2mParams> Lwm2mService<P> {
    /// Writes the CoRE link-format listing of the registry into `buffer`, returning its
    /// length.
    ///
    /// Each instance is listed as `</object/instance>`; an object without instances is
    /// listed as `</object>`. Named objects are not listed. With `None` for `buffer`
    /// nothing is written and only the length is returned. A buffer too small for the
    /// listing fails with [`Error::BufferTooSmall`].
    pub fn link_format(&self, buffer: Option<&mut [u8]>) -> Result<usize, Error> {
        let mut write = SliceWrite { buffer, len: 0 };
        let registry = self.lock();
        let mut separator = "";

        for object in registry.objects.iter().filter(|x| !x.is_named()) {
            let object_id = object.object_id();
            let mut instance_present = false;

            for instance in registry
                .instances
                .iter()
                .filter(|x| x.object_id() == object_id)
            {
                instance_present = true;
                write!(
                    write,
                    "{}</{}/{}>",
                    separator,
                    object_id,
                    instance.instance_id()
                )?;
                separator = ",";
            }

            if !instance_present {
                write!(write, "{}</{}>", separator, object_id)?;
                separator = ",";
            }
        }

        trace!("link_format: {} bytes", write.len);
        Ok(write.len)
    }

    /// Returns the CoRE link-format listing of the registry as a string.
    pub fn link_format_string(&self) -> Result<String, Error> {
        let mut buffer = vec![0u8; self.link_format(None)?];
        let len = self.link_format(Some(&mut buffer))?;
        buffer.truncate(len);
        String::from_utf8(buffer).map_err(|_| Error::InvalidData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> Lwm2mService {
        let service = Lwm2mService::new();
        for &id in &[OBJ_SECURITY, OBJ_SERVER, OBJ_DEVICE, OBJ_FIRMWARE] {
            service
                .object_add(Lwm2mObject::new(id, |_, _, _, _| Ok(())))
                .unwrap();
        }
        service
            .object_add(Lwm2mObject::named("dfu", |_, _, _, _| Ok(())))
            .unwrap();

        for &(object_id, instance_id) in &[(0, 0), (1, 0), (0, 1), (3, 0)] {
            service
                .instance_add(Lwm2mInstance::new(
                    object_id,
                    instance_id,
                    Vec::<(u16, Operation)>::new(),
                    |_, _, _, _| Ok(()),
                ))
                .unwrap();
        }
        service
    }

    #[test]
    fn listing() {
        assert_eq!(
            service().link_format_string().unwrap(),
            "</0/0>,</0/1>,</1/0>,</3/0>,</5>"
        );
    }

    #[test]
    fn dry_run_and_small_buffer() {
        let service = service();
        let len = service.link_format(None).unwrap();
        assert_eq!(len, 32);

        let mut buffer = vec![0u8; len];
        assert_eq!(service.link_format(Some(&mut buffer)), Ok(len));

        let mut short = vec![0u8; len - 1];
        assert_eq!(
            service.link_format(Some(&mut short)),
            Err(Error::BufferTooSmall)
        );
    }

    #[test]
    fn empty_registry() {
        assert_eq!(Lwm2mService::new().link_format(None), Ok(0));
    }
}
