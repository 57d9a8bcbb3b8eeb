//! Client orchestration against an in-memory transport.
//!
//! Run with: `cargo test --features client --test client_tests`

#![cfg(feature = "client")]

use std::cell::RefCell;

use fapiao::client::*;
use fapiao::core::*;
use fapiao::operations::*;
use fapiao::payload::{CipherService, PayloadEncoder};
use rust_decimal_macros::dec;
use serde_json::{Value, json};

const KEY: &str = "ejCk326UnaZWKisg";
const IV: &str = "q9jcZX8Ib9LM8wYk";

fn config() -> Config {
    Config::new(Environment::Staging, "2000132", KEY, IV)
}

fn encoder() -> PayloadEncoder {
    PayloadEncoder::new(CipherService::new(KEY, IV).unwrap())
}

/// Records requests and answers with a canned reply.
struct FakeTransport {
    reply: Result<Value>,
    requests: RefCell<Vec<(String, Value)>>,
}

impl FakeTransport {
    fn replying(reply: Value) -> Self {
        Self {
            reply: Ok(reply),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            reply: Err(FapiaoError::Transport(message.into())),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn with_data(data: Value) -> Self {
        let sealed = encoder().encode_data(data.as_object().unwrap()).unwrap();
        Self::replying(json!({
            "MerchantID": "2000132",
            "RpHeader": {"Timestamp": 1_700_000_000},
            "TransCode": 1,
            "TransMsg": "Success",
            "Data": sealed
        }))
    }
}

impl Transport for FakeTransport {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        self.requests.borrow_mut().push((url.to_string(), body.clone()));
        match &self.reply {
            Ok(value) => Ok(value.clone()),
            Err(err) => Err(FapiaoError::Transport(err.to_string())),
        }
    }
}

fn invoice() -> Invoice {
    Invoice::new("2000132")
        .relate_number("ORDER-2024-0001")
        .unwrap()
        .customer_email("buyer@example.com")
        .item(LineItem::new("Coffee", dec!(1), "cup", dec!(60)).unwrap())
}

#[test]
fn send_posts_encrypted_envelope_and_decodes_reply() {
    let transport = FakeTransport::with_data(json!({
        "RtnCode": 1,
        "RtnMsg": "開立發票成功",
        "InvoiceNo": "AB12345678",
        "InvoiceDate": "2024-06-01 12:00:00",
        "RandomNumber": "1234"
    }));
    let client = Client::new(config(), &transport).unwrap();

    let response = client.send(&invoice()).unwrap();
    assert!(response.is_success());
    assert_eq!(response.get("InvoiceNo"), Some(&json!("AB12345678")));

    let requests = transport.requests.borrow();
    assert_eq!(requests.len(), 1);
    let (url, body) = &requests[0];
    assert_eq!(url, "https://einvoice-stage.ecpay.com.tw/B2CInvoice/Issue");
    assert_eq!(body["MerchantID"], "2000132");
    assert_eq!(body["RqHeader"]["Revision"], "3.0.0");

    let data = encoder().decode_data(body["Data"].as_str().unwrap()).unwrap();
    assert_eq!(data["RelateNumber"], "ORDER-2024-0001");
    assert_eq!(data["SalesAmount"], 60);
}

#[test]
fn transport_level_failure_becomes_rtn_code() {
    let transport = FakeTransport::replying(json!({
        "MerchantID": "2000132",
        "TransCode": 10000006,
        "TransMsg": "MerchantID is not exist",
        "Data": ""
    }));
    let client = Client::new(config(), transport).unwrap();

    let response = client.send(&CheckLoveCode::new("2000132").love_code("168001").unwrap()).unwrap();
    assert!(!response.is_success());
    assert_eq!(response.rtn_code(), Some(10000006));
    assert_eq!(response.rtn_msg(), Some("MerchantID is not exist"));
}

#[test]
fn vendor_rejection_is_not_an_error() {
    let transport = FakeTransport::with_data(json!({"RtnCode": 5000010, "RtnMsg": "愛心碼不存在"}));
    let client = Client::new(config(), transport).unwrap();
    let response = client.send(&CheckLoveCode::new("2000132").love_code("000").unwrap()).unwrap();
    assert_eq!(response.rtn_code(), Some(5000010));
}

#[test]
fn validation_error_stops_before_transport() {
    let transport = FakeTransport::replying(json!({}));
    let client = Client::new(config(), &transport).unwrap();

    let err = client.send(&Invoice::new("2000132")).unwrap_err();
    assert!(matches!(err, FapiaoError::Validation(_)));
    assert!(transport.requests.borrow().is_empty());
}

#[test]
fn foreign_merchant_rejected_before_transport() {
    let transport = FakeTransport::replying(json!({}));
    let client = Client::new(config(), &transport).unwrap();

    let lookup = CheckLoveCode::new("3002607").love_code("168001").unwrap();
    let err = client.send(&lookup).unwrap_err();
    let violation = err.as_validation().expect("validation error");
    assert_eq!(violation.field, "MerchantID");
    assert!(violation.message.contains("3002607"));
    assert!(transport.requests.borrow().is_empty());
}

#[test]
fn transport_error_propagates() {
    let client = Client::new(config(), FakeTransport::failing("connection reset")).unwrap();
    let err = client.send(&invoice()).unwrap_err();
    assert!(matches!(err, FapiaoError::Transport(ref m) if m.contains("connection reset")));
}

#[test]
fn malformed_reply_is_payload_error() {
    let client = Client::new(config(), FakeTransport::replying(json!({"TransCode": "abc"}))).unwrap();
    assert!(matches!(
        client.send(&invoice()),
        Err(FapiaoError::Payload(_))
    ));
}

#[test]
fn bad_key_material_fails_at_construction() {
    let config = Config::new(Environment::Staging, "2000132", "short", IV);
    assert!(matches!(
        Client::new(config, FakeTransport::replying(json!({}))),
        Err(FapiaoError::Configuration(_))
    ));

    let config = Config::new(Environment::Staging, "", KEY, IV);
    assert!(matches!(
        Client::new(config, FakeTransport::replying(json!({}))),
        Err(FapiaoError::Configuration(_))
    ));
}

#[test]
fn production_server_and_dyn_operations() {
    let transport = FakeTransport::with_data(json!({"RtnCode": 1, "RtnMsg": "OK", "CompanyName": "綠界科技"}));
    let config = Config::new(Environment::Production, "2000132", KEY, IV);
    let client = Client::new(config, Box::new(transport) as Box<dyn Transport>).unwrap();

    let op: Box<dyn Operation> =
        Box::new(GetCompanyName::new("2000132").unified_business_no("97025978").unwrap());
    let response = client.send(op.as_ref()).unwrap();
    assert_eq!(response.get("CompanyName"), Some(&json!("綠界科技")));
}
