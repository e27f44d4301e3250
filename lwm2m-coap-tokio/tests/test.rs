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

use lwm2m_coap::lwm2m::{respond_with_code, Lwm2mClient, NotificationKind, ServerConfig};
use lwm2m_coap::message::Message;
use lwm2m_coap::prelude::*;
use lwm2m_coap_tokio::TokioUdpTransport;

#[tokio::test]
async fn register_over_udp() {
    let server = TokioUdpTransport::bind("127.0.0.1:0").await.unwrap();
    let server_addr = server.local_addr().unwrap();

    let client = Lwm2mClient::new(TokioUdpTransport::bind("127.0.0.1:0").await.unwrap());
    let client_addr = client.transport().local_addr().unwrap();

    let config = ServerConfig {
        lifetime: 300,
        binding: "U".to_string(),
        ..Default::default()
    };
    client
        .register(&server_addr, "node-1", &config, b"</3/0>")
        .unwrap();

    let mut server_buffer = [0u8; 256];
    let (request, from) = server.recv_message(&mut server_buffer).await.unwrap();

    assert_eq!(from, client_addr);
    assert_eq!(request.msg_code(), MsgCode::MethodPost);
    assert_eq!(
        request.option_values(OptionNumber::URI_PATH).collect::<Vec<_>>(),
        vec![&b"rd"[..]]
    );
    assert_eq!(request.payload(), b"</3/0>");

    let mut response = Message::response_to(&request, MsgCode::SuccessCreated);
    response
        .append_option_with_str(OptionNumber::LOCATION_PATH, "rd")
        .unwrap();
    response
        .append_option_with_str(OptionNumber::LOCATION_PATH, "7f01")
        .unwrap();
    server.send_to(&response.to_vec().unwrap(), &from).unwrap();

    let mut client_buffer = [0u8; 256];
    let (response, from) = client
        .transport()
        .recv_message(&mut client_buffer)
        .await
        .unwrap();

    assert_eq!(from, server_addr);
    assert_eq!(
        client.handle_response(&response, &from),
        Ok(NotificationKind::Register)
    );
    assert_eq!(
        client.location(&server_addr),
        Some(vec!["rd".to_string(), "7f01".to_string()])
    );
}

#[tokio::test]
async fn malformed_datagram() {
    let receiver = TokioUdpTransport::bind("127.0.0.1:0").await.unwrap();
    let sender = TokioUdpTransport::bind("127.0.0.1:0").await.unwrap();

    sender
        .send_to(&[0x40, 0x01], &receiver.local_addr().unwrap())
        .unwrap();

    let mut buffer = [0u8; 64];
    assert_eq!(
        receiver.recv_message(&mut buffer).await.err(),
        Some(Error::InvalidLength)
    );
}

#[tokio::test]
async fn piggybacked_reply() {
    let device = TokioUdpTransport::bind("127.0.0.1:0").await.unwrap();
    let peer = TokioUdpTransport::bind("127.0.0.1:0").await.unwrap();

    let mut request = Message::new(MsgType::Con, MsgCode::MethodGet, 0x0101);
    request.set_token(MsgToken::from(0x55AAu16));
    peer.send_to(&request.to_vec().unwrap(), &device.local_addr().unwrap())
        .unwrap();

    let mut buffer = [0u8; 64];
    let (request, from) = device.recv_message(&mut buffer).await.unwrap();
    respond_with_code(&device, MsgCode::ClientErrorNotFound, &request, &from).unwrap();

    let mut buffer = [0u8; 64];
    let (reply, _) = peer.recv_message(&mut buffer).await.unwrap();
    assert_eq!(reply.msg_type(), MsgType::Ack);
    assert_eq!(reply.msg_code(), MsgCode::ClientErrorNotFound);
    assert_eq!(reply.msg_id(), 0x0101);
    assert_eq!(reply.token(), MsgToken::from(0x55AAu16));
}

#[tokio::test]
async fn send_right_after_bind() {
    let receiver = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
    let receiver_addr = receiver.local_addr().unwrap();

    let client = Lwm2mClient::new(TokioUdpTransport::bind("127.0.0.1:0").await.unwrap());
    assert_eq!(
        client.register(&receiver_addr, "node-2", &ServerConfig::default(), b"</3/0>"),
        Ok(())
    );

    let mut buffer = [0u8; 256];
    let (len, _) = receiver.recv_from(&mut buffer).unwrap();
    let request = Message::decode(&buffer[..len]).unwrap();
    assert_eq!(request.msg_code(), MsgCode::MethodPost);
    assert_eq!(request.payload(), b"</3/0>");
}

#[tokio::test]
async fn wrapped_std_socket() {
    let receiver = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
    let transport =
        TokioUdpTransport::from_std(std::net::UdpSocket::bind("127.0.0.1:0").unwrap()).unwrap();

    let ping = Message::new(MsgType::Con, MsgCode::Empty, 0x0202);
    let bytes = ping.to_vec().unwrap();
    assert_eq!(
        transport.send_to(&bytes, &receiver.local_addr().unwrap()),
        Ok(bytes.len())
    );

    let mut buffer = [0u8; 16];
    let (len, from) = receiver.recv_from(&mut buffer).unwrap();
    assert_eq!(&buffer[..len], &bytes[..]);
    assert_eq!(from, transport.local_addr().unwrap());
}
