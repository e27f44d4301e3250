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

use lwm2m_coap::lwm2m::*;
use lwm2m_coap::message::Message;
use lwm2m_coap::prelude::*;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

type Client = Lwm2mClient<LoopbackTransport>;

fn last_request(client: &Client) -> (Vec<u8>, SocketAddr) {
    client.transport().last_sent().expect("nothing sent")
}

fn strings<'a>(values: impl Iterator<Item = &'a [u8]>) -> Vec<String> {
    values
        .map(|x| String::from_utf8(x.to_vec()).unwrap())
        .collect()
}

fn device_service() -> Lwm2mService {
    let service = Lwm2mService::new();
    for &object_id in &[OBJ_SECURITY, OBJ_SERVER, OBJ_DEVICE, OBJ_LOCATION] {
        service
            .object_add(Lwm2mObject::new(object_id, |_, _, _, _| Ok(())))
            .unwrap();
    }
    for &object_id in &[OBJ_SECURITY, OBJ_SERVER, OBJ_DEVICE] {
        service
            .instance_add(Lwm2mInstance::new(
                object_id,
                0,
                Vec::<(u16, Operation)>::new(),
                |_, _, _, _| Ok(()),
            ))
            .unwrap();
    }
    service
}

#[test]
fn register_update_deregister() {
    let server: SocketAddr = "[2001:db8::1]:5683".parse().unwrap();
    let client = Client::new(LoopbackTransport::new());

    let events = Arc::new(Mutex::new(Vec::new()));
    let recorded = events.clone();
    client.set_notification_handler(move |kind, remote, code| {
        recorded.lock().unwrap().push((kind, *remote, code));
    });

    let link_format = device_service().link_format_string().unwrap();
    assert_eq!(link_format, "</0/0>,</1/0>,</3/0>,</6>");

    let config = ServerConfig {
        lifetime: 3600,
        lwm2m_version_major: 1,
        lwm2m_version_minor: 0,
        msisdn: 46700000000,
        binding: "UQ".to_string(),
    };
    client
        .register(&server, "urn:dev:1", &config, link_format.as_bytes())
        .unwrap();

    let (bytes, to) = last_request(&client);
    assert_eq!(to, server);
    let request = Message::decode(&bytes).unwrap();
    assert_eq!(
        strings(request.option_values(OptionNumber::URI_QUERY)),
        vec!["ep=urn:dev:1", "lt=3600", "lwm2m=1.0", "sms=46700000000", "b=UQ"]
    );
    assert_eq!(request.payload(), link_format.as_bytes());

    let mut created = Message::response_to(&request, MsgCode::SuccessCreated);
    created
        .append_option_with_str(OptionNumber::LOCATION_PATH, "rd")
        .unwrap();
    created
        .append_option_with_str(OptionNumber::LOCATION_PATH, "0a1b")
        .unwrap();
    let created = created.to_vec().unwrap();
    client
        .handle_response(&Message::decode(&created).unwrap(), &server)
        .unwrap();

    // A response only completes its exchange once.
    assert_eq!(
        client.handle_response(&Message::decode(&created).unwrap(), &server),
        Err(Error::NotFound)
    );

    client
        .update(
            &server,
            &ServerConfig {
                lifetime: 7200,
                ..Default::default()
            },
        )
        .unwrap();
    let (bytes, _) = last_request(&client);
    let update = Message::decode(&bytes).unwrap();
    assert_eq!(update.msg_code(), MsgCode::MethodPost);
    assert_eq!(
        strings(update.option_values(OptionNumber::URI_PATH)),
        vec!["rd", "0a1b"]
    );
    assert_eq!(
        strings(update.option_values(OptionNumber::URI_QUERY)),
        vec!["lt=7200"]
    );
    assert_eq!(update.payload(), b"");

    let changed = Message::response_to(&update, MsgCode::SuccessChanged);
    assert_eq!(
        client.handle_response(&changed, &server),
        Ok(NotificationKind::Update)
    );

    client.deregister(&server).unwrap();
    let (bytes, _) = last_request(&client);
    let deregister = Message::decode(&bytes).unwrap();
    assert_eq!(deregister.msg_code(), MsgCode::MethodDelete);

    let deleted = Message::response_to(&deregister, MsgCode::SuccessDeleted);
    assert_eq!(
        client.handle_response(&deleted, &server),
        Ok(NotificationKind::Deregister)
    );

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            (NotificationKind::Register, server, MsgCode::SuccessCreated),
            (NotificationKind::Update, server, MsgCode::SuccessChanged),
            (NotificationKind::Deregister, server, MsgCode::SuccessDeleted),
        ]
    );
}

#[test]
fn locations_per_server() {
    let first: SocketAddr = "[2001:db8::1]:5683".parse().unwrap();
    let second: SocketAddr = "[2001:db8::2]:5683".parse().unwrap();
    let client = Client::new(LoopbackTransport::new());

    for &(ref server, location) in &[(first, "aaaa"), (second, "bbbb")] {
        client
            .register(server, "ep", &ServerConfig::default(), b"")
            .unwrap();
        let (bytes, _) = last_request(&client);
        let request = Message::decode(&bytes).unwrap();

        let mut created = Message::response_to(&request, MsgCode::SuccessCreated);
        created
            .append_option_with_str(OptionNumber::LOCATION_PATH, location)
            .unwrap();
        client.handle_response(&created, server).unwrap();
    }

    assert_eq!(client.location(&first), Some(vec!["aaaa".to_string()]));
    assert_eq!(client.location(&second), Some(vec!["bbbb".to_string()]));

    // A response from the wrong server does not complete the exchange.
    client
        .register(&first, "ep", &ServerConfig::default(), b"")
        .unwrap();
    let (bytes, _) = last_request(&client);
    let request = Message::decode(&bytes).unwrap();
    let created = Message::response_to(&request, MsgCode::SuccessCreated);
    assert_eq!(
        client.handle_response(&created, &second),
        Err(Error::NotFound)
    );
}

#[test]
fn failed_registration_keeps_no_location() {
    let server: SocketAddr = "[::1]:5683".parse().unwrap();
    let client = Client::new(LoopbackTransport::new());

    client
        .register(&server, "ep", &ServerConfig::default(), b"")
        .unwrap();
    let (bytes, _) = last_request(&client);
    let request = Message::decode(&bytes).unwrap();

    let mut rejected = Message::response_to(&request, MsgCode::ClientErrorForbidden);
    rejected
        .append_option_with_str(OptionNumber::LOCATION_PATH, "rd")
        .unwrap();

    assert_eq!(
        client.handle_response(&rejected, &server),
        Ok(NotificationKind::Register)
    );
    assert_eq!(client.location(&server), None);
    assert_eq!(client.deregister(&server), Err(Error::NotFound));
}

#[test]
fn bootstrap_then_register() {
    let bootstrap_server: SocketAddr = "[2001:db8::b5]:5683".parse().unwrap();
    let client = Client::new(LoopbackTransport::new());

    client.bootstrap(&bootstrap_server, "ep").unwrap();
    let (bytes, _) = last_request(&client);
    let request = Message::decode(&bytes).unwrap();
    assert_eq!(request.token(), MsgToken::from(0x012Au16));
    assert_eq!(
        strings(request.option_values(OptionNumber::URI_PATH)),
        vec!["bs"]
    );

    let changed = Message::response_to(&request, MsgCode::SuccessChanged);
    assert_eq!(
        client.handle_response(&changed, &bootstrap_server),
        Ok(NotificationKind::Bootstrap)
    );

    // The bootstrap server writes a Server object instance as TLV.
    let server = tlv::ServerInstance {
        short_server_id: 1,
        lifetime: 600,
        binding: "U".to_string(),
        ..Default::default()
    };
    let mut payload = vec![0u8; server.encode(None).unwrap()];
    server.encode(Some(&mut payload)).unwrap();

    let mut write = Message::new(MsgType::Con, MsgCode::MethodPut, 0x7000);
    write
        .append_option_with_str(OptionNumber::URI_PATH, "1")
        .unwrap();
    write
        .append_option_with_str(OptionNumber::URI_PATH, "0")
        .unwrap();
    write
        .append_option(
            OptionNumber::CONTENT_FORMAT,
            ContentFormat::APPLICATION_VND_OMA_LWM2M_TLV.into(),
        )
        .unwrap();
    write.set_payload(&payload);

    let written = Arc::new(Mutex::new(None));
    let stored = written.clone();
    let service: Lwm2mService = Lwm2mService::new();
    service
        .object_add(Lwm2mObject::new(OBJ_SERVER, move |_, instance_id, op, request| {
            assert_eq!((instance_id, op), (0, Operation::WRITE));
            let mut instance = tlv::ServerInstance::default();
            instance.decode(request.payload())?;
            *stored.lock().unwrap() = Some(instance);
            Ok(())
        }))
        .unwrap();
    service.dispatch(&write).unwrap();
    assert_eq!(written.lock().unwrap().as_ref(), Some(&server));

    let uri = ServerUri::parse("coap://[2001:db8::1]").unwrap();
    client
        .register(&uri.socket_addr(), "ep", &ServerConfig::default(), b"")
        .unwrap();
    let (bytes, to) = last_request(&client);
    assert_eq!(to.port(), 5683);
    assert_eq!(
        Message::decode(&bytes).unwrap().token(),
        MsgToken::from(0xAE1Cu16)
    );
}
