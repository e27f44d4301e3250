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

use lwm2m_coap::message::{CoapByteDisplayFormatter, Message};
use lwm2m_coap::prelude::*;
use lwm2m_coap::{ct_match_select, ContentFormatMask};

fn temp_request<'a>() -> Message<'a> {
    let mut msg = Message::new(MsgType::Con, MsgCode::MethodGet, 0x1234);
    msg.set_token(MsgToken::from(0xABCDu16));
    msg.append_option_with_str(OptionNumber::URI_PATH, "temp")
        .unwrap();
    msg
}

#[test]
fn round_trip() {
    let msg = temp_request();
    let bytes = msg.to_vec().unwrap();

    assert_eq!(
        bytes,
        vec![0x42, 0x01, 0x12, 0x34, 0xAB, 0xCD, 0xB4, b't', b'e', b'm', b'p']
    );

    let decoded = Message::decode(&bytes).unwrap();
    assert_eq!(decoded.version(), 1);
    assert_eq!(decoded.msg_type(), MsgType::Con);
    assert_eq!(decoded.msg_code(), MsgCode::MethodGet);
    assert_eq!(decoded.msg_id(), 0x1234);
    assert_eq!(decoded.token(), MsgToken::from(0xABCDu16));
    assert_eq!(
        decoded
            .option_values(OptionNumber::URI_PATH)
            .collect::<Vec<_>>(),
        vec![&b"temp"[..]]
    );
    assert_eq!(decoded.payload(), b"");
    assert_eq!(decoded.to_vec().unwrap(), bytes);
}

#[test]
fn size_query() {
    let mut msg = temp_request();
    msg.append_option_with_u32(OptionNumber::URI_QUERY, 0)
        .unwrap();
    msg.set_payload(b"22.5");

    let len = msg.encode(&mut []).unwrap();
    assert_eq!(len, msg.encoded_len());

    let mut exact = vec![0u8; len];
    assert_eq!(msg.encode(&mut exact), Ok(len));

    let mut short = vec![0u8; len - 1];
    assert_eq!(msg.encode(&mut short), Err(Error::BufferTooSmall));

    let decoded = Message::decode(&exact).unwrap();
    assert_eq!(decoded.payload(), b"22.5");
    assert_eq!(decoded.option_u32(OptionNumber::URI_QUERY), Ok(0));
}

#[test]
fn out_of_order_append() {
    let mut msg = temp_request();
    assert_eq!(
        msg.append_option_with_u32(OptionNumber::IF_MATCH, 1),
        Err(Error::InvalidData)
    );

    // Repeating the last option number is allowed.
    msg.append_option_with_str(OptionNumber::URI_PATH, "1")
        .unwrap();
    assert_eq!(msg.options_count(), 2);
}

#[test]
fn piggybacked_response() {
    let request = Message::decode(&[0x42, 0x01, 0x12, 0x34, 0xAB, 0xCD]).unwrap();
    let mut response = Message::response_to(&request, MsgCode::SuccessContent);
    response.set_payload(b"ok");

    let bytes = response.to_vec().unwrap();
    assert_eq!(bytes, vec![0x62, 0x45, 0x12, 0x34, 0xAB, 0xCD, 0xFF, b'o', b'k']);
    assert_eq!(
        CoapByteDisplayFormatter(&bytes).to_string(),
        response.to_string()
    );
}

#[test]
fn corrupted_display() {
    let text = CoapByteDisplayFormatter(&[0x40, 0x01, 0x00]).to_string();
    assert!(text.starts_with("<CORRUPTED"), "{}", text);
}

#[test]
fn negotiation() {
    let mut request = temp_request();
    request
        .append_option(OptionNumber::ACCEPT, ContentFormat::APPLICATION_JSON.into())
        .unwrap();

    let supported = ContentFormatMask::TEXT_PLAIN | ContentFormatMask::JSON;
    assert_eq!(
        ct_match_select(supported, &request),
        Ok(ContentFormat::APPLICATION_JSON)
    );
    assert_eq!(
        ct_match_select(ContentFormatMask::LINK_FORMAT, &request),
        Err(Error::NotFound)
    );

    // Without Accept, plain text is assumed.
    assert_eq!(
        ct_match_select(supported, &temp_request()),
        Ok(ContentFormat::TEXT_PLAIN_UTF8)
    );
}
