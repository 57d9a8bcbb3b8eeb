#![cfg(feature = "operations")]

use chrono::NaiveDate;
use fapiao::core::*;
use fapiao::operations::*;
use fapiao::payload::{CipherService, PayloadEncoder};
use rust_decimal_macros::dec;
use serde_json::json;

fn encoder() -> PayloadEncoder {
    PayloadEncoder::new(CipherService::new("ejCk326UnaZWKisg", "q9jcZX8Ib9LM8wYk").unwrap())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn failed_field(op: &dyn Operation) -> String {
    op.validate()
        .unwrap_err()
        .as_validation()
        .expect("validation error")
        .field
        .clone()
}

fn retail_invoice() -> Invoice {
    Invoice::new("2000132")
        .relate_number("ORDER-2024-0001")
        .unwrap()
        .customer_name("王小明")
        .customer_email("buyer@example.com")
        .carrier_type(CarrierType::Cellphone)
        .carrier_num("/ABC+123")
        .item(LineItem::new("咖啡豆", dec!(2), "包", dec!(350)).unwrap())
        .item(LineItem::new("濾紙", dec!(3), "盒", dec!(33.5)).unwrap())
}

// --- Issue ---

#[test]
fn invoice_content_decrypts_to_full_body() {
    let envelope = retail_invoice().content(&encoder()).unwrap();
    assert_eq!(envelope.merchant_id, "2000132");
    assert_eq!(envelope.rq_header.revision, "3.0.0");

    let body = encoder().decode_data(&envelope.data).unwrap();
    assert_eq!(body["RelateNumber"], "ORDER-2024-0001");
    assert_eq!(body["CarrierType"], "3");
    assert_eq!(body["SalesAmount"], 801);
    assert_eq!(body["Items"][1]["ItemSeq"], 2);
    assert_eq!(body["Items"][1]["ItemAmount"], 100.5);
    assert_eq!(body["Items"][1]["ItemTaxType"], "1");
}

#[test]
fn invalid_invoice_never_reaches_encoder() {
    let invoice = retail_invoice().carrier_num("123");
    let err = invoice.content(&encoder()).unwrap_err();
    assert!(matches!(err, FapiaoError::Validation(_)));
    assert!(err.to_string().contains("length must be 8"));
}

#[test]
fn zero_rated_invoice_needs_clearance_mark() {
    let invoice = retail_invoice().tax_type(TaxType::Zero);
    assert_eq!(failed_field(&invoice), "ClearanceMark");
    assert!(invoice.clearance_mark(ClearanceMark::ThroughCustoms).validate().is_ok());
}

#[test]
fn mixed_tax_items_keep_their_own_type() {
    let body = Invoice::new("2000132")
        .relate_number("MIX-1")
        .unwrap()
        .customer_phone("0912345678")
        .tax_type(TaxType::Mix)
        .item(LineItem::new("Taxed", dec!(1), "pc", dec!(100)).unwrap().with_tax_type(TaxType::Dutiable))
        .item(LineItem::new("Exempt", dec!(1), "pc", dec!(50)).unwrap().with_tax_type(TaxType::Free))
        .data_body()
        .unwrap();
    assert_eq!(body["TaxType"], "9");
    assert_eq!(body["Items"][0]["ItemTaxType"], "1");
    assert_eq!(body["Items"][1]["ItemTaxType"], "3");
}

#[test]
fn donated_invoice() {
    let invoice = retail_invoice()
        .carrier_type(CarrierType::None)
        .carrier_num("")
        .donation(Donation::Yes);
    assert_eq!(failed_field(&invoice), "LoveCode");

    let invoice = invoice.love_code("168001").unwrap();
    assert!(invoice.validate().is_ok());
    assert_eq!(invoice.data_body().unwrap()["LoveCode"], "168001");
}

#[test]
fn untyped_items_from_json() {
    let items = [
        json!({"name": "Pen", "quantity": 2, "unit": "支", "price": "15"}),
        json!({"name": "Ink", "quantity": "1", "unit": "瓶", "price": 80, "taxType": "3"}),
    ];
    let body = Invoice::new("2000132")
        .relate_number("UNTYPED-1")
        .unwrap()
        .customer_email("buyer@example.com")
        .items_untyped(&items)
        .unwrap()
        .data_body()
        .unwrap();
    assert_eq!(body["SalesAmount"], 110);
    assert_eq!(body["Items"][1]["ItemTaxType"], "3");

    let broken = [json!({"name": "Pen", "quantity": 0, "unit": "支", "price": 15})];
    assert!(Invoice::new("2000132").items_untyped(&broken).is_err());
}

#[test]
fn oversized_amounts_are_validation_errors() {
    let huge = dec!(100000000000000000000).to_string();
    let err = Invoice::new("2000132")
        .items_untyped(&[json!({"name": "Gold", "quantity": huge, "unit": "bar", "price": huge})])
        .unwrap_err();
    assert_eq!(err.as_validation().unwrap().field, "ItemAmount");

    let large = dec!(50000000000000000000000000000);
    let invoice = retail_invoice()
        .item(LineItem::new("Gold", large, "bar", dec!(1)).unwrap())
        .item(LineItem::new("Gold", large, "bar", dec!(1)).unwrap());
    assert_eq!(failed_field(&invoice), "Items");
    assert!(matches!(invoice.data_body(), Err(FapiaoError::Validation(_))));
    assert!(invoice.content(&encoder()).is_err());

    let allowance = AllowanceInvoice::new("2000132")
        .invoice_no("AB12345678")
        .unwrap()
        .invoice_date(date(2024, 6, 1))
        .item(LineItem::new("Gold", large, "bar", dec!(1)).unwrap())
        .item(LineItem::new("Gold", large, "bar", dec!(1)).unwrap());
    assert_eq!(failed_field(&allowance), "Items");
}

#[test]
fn prices_beyond_float_precision_rejected() {
    let err = LineItem::new("Item", dec!(1), "pc", dec!(1.0000000000000001)).unwrap_err();
    assert_eq!(err.field, "ItemPrice");
}

// --- Delayed issuance ---

#[test]
fn trigger_flow() {
    let delayed = DelayIssue::new(retail_invoice())
        .delay_flag(DelayFlag::Trigger)
        .delay_day(15)
        .unwrap()
        .tsr("TSR20240101001")
        .unwrap()
        .pay_type(PayType::Vendor)
        .pay_act("ECPAY")
        .unwrap();
    let body = encoder()
        .decode_data(&delayed.content(&encoder()).unwrap().data)
        .unwrap();
    assert_eq!(body["DelayFlag"], "2");
    assert_eq!(body["Tsr"], "TSR20240101001");
    assert_eq!(body["PayType"], "2");
    assert_eq!(body["SalesAmount"], 801);

    let trigger = TriggerIssue::new("2000132").tsr("TSR20240101001").unwrap();
    assert!(trigger.validate().is_ok());

    let cancel = CancelDelayIssue::new("2000132");
    assert_eq!(failed_field(&cancel), "Tsr");
}

// --- Void and allowance ---

#[test]
fn void_invoice() {
    let op = InvalidInvoice::new("2000132")
        .invoice_no("AB12345678")
        .unwrap()
        .invoice_date(date(2024, 6, 1));
    assert_eq!(failed_field(&op), "Reason");

    let body = op.reason("wrong buyer").data_body().unwrap();
    assert_eq!(body["InvoiceDate"], "2024-06-01");
    assert_eq!(body["Reason"], "wrong buyer");
}

#[test]
fn allowance_with_notification() {
    let op = AllowanceInvoice::new("2000132")
        .invoice_no("AB12345678")
        .unwrap()
        .invoice_date(date(2024, 6, 1))
        .allowance_notify(AllowanceNotifyType::Email)
        .customer_name("王小明")
        .unwrap()
        .item(LineItem::new("退貨", dec!(1), "包", dec!(350)).unwrap());
    assert_eq!(failed_field(&op), "NotifyMail");

    let op = op.notify_mail("buyer@example.com").unwrap();
    let body = encoder().decode_data(&op.content(&encoder()).unwrap().data).unwrap();
    assert_eq!(body["AllowanceNotify"], "E");
    assert_eq!(body["AllowanceAmount"], 350);
    assert_eq!(body["Items"][0]["ItemName"], "退貨");
}

#[test]
fn void_allowance() {
    let op = AllowanceInvalid::new("2000132")
        .invoice_no("AB12345678")
        .unwrap()
        .allowance_no("2024060112345678")
        .unwrap()
        .reason("duplicate");
    assert!(op.validate().is_ok());
    assert_eq!(op.request_path(), "/B2CInvoice/AllowanceInvalid");
}

// --- Notify and lookups ---

#[test]
fn notify_allowance_requires_number() {
    let op = InvoiceNotify::new("2000132")
        .invoice_no("AB12345678")
        .unwrap()
        .notify_mail("buyer@example.com")
        .unwrap()
        .notify(NotifyType::Email)
        .invoice_tag(InvoiceTagType::AllowanceVoid)
        .notified(NotifiedType::Customer);
    assert_eq!(failed_field(&op), "AllowanceNo");
    assert!(op.allowance_no("2024060112345678").unwrap().validate().is_ok());
}

#[test]
fn lookups() {
    let get = GetInvoice::new("2000132")
        .invoice_no("AB12345678")
        .unwrap()
        .invoice_date(date(2024, 6, 1));
    assert!(get.validate().is_ok());

    let invalid = GetInvalidInvoice::new("2000132").invoice_no("AB12345678").unwrap();
    assert!(invalid.validate().is_ok());

    let love = CheckLoveCode::new("2000132").love_code("168001").unwrap();
    assert!(love.validate().is_ok());

    let barcode = CheckBarcode::new("2000132").barcode("/abc.123").unwrap();
    assert_eq!(barcode.data_body().unwrap()["BarCode"], "/ABC.123");

    let company = GetCompanyName::new("2000132").unified_business_no("97025978").unwrap();
    assert!(company.content(&encoder()).is_ok());

    let allowances = GetAllowanceList::new("2000132")
        .search_type(AllowanceSearchType::ByInvoiceDate)
        .invoice_no("AB12345678")
        .unwrap()
        .date(date(2024, 6, 1));
    let body = encoder()
        .decode_data(&allowances.content(&encoder()).unwrap().data)
        .unwrap();
    assert_eq!(body["SearchType"], "1");
    assert_eq!(body["Date"], "2024-06-01");

    let listing = GetIssueList::new("2000132")
        .begin_date(date(2024, 6, 30))
        .end_date(date(2024, 6, 1));
    assert_eq!(failed_field(&listing), "BeginDate");
}

#[test]
fn request_paths() {
    let ops: Vec<(Box<dyn Operation>, &str)> = vec![
        (Box::new(Invoice::new("m")), "/B2CInvoice/Issue"),
        (Box::new(DelayIssue::new(Invoice::new("m"))), "/B2CInvoice/DelayIssue"),
        (Box::new(DelayIssue::edit(Invoice::new("m"))), "/B2CInvoice/EditDelayIssue"),
        (Box::new(TriggerIssue::new("m")), "/B2CInvoice/TriggerIssue"),
        (Box::new(CancelDelayIssue::new("m")), "/B2CInvoice/CancelDelayIssue"),
        (Box::new(InvalidInvoice::new("m")), "/B2CInvoice/Invalid"),
        (Box::new(AllowanceInvoice::new("m")), "/B2CInvoice/Allowance"),
        (Box::new(AllowanceInvalid::new("m")), "/B2CInvoice/AllowanceInvalid"),
        (Box::new(InvoiceNotify::new("m")), "/B2CInvoice/InvoiceNotify"),
        (Box::new(GetInvoice::new("m")), "/B2CInvoice/GetIssue"),
        (Box::new(GetInvalidInvoice::new("m")), "/B2CInvoice/GetInvalid"),
        (Box::new(CheckLoveCode::new("m")), "/B2CInvoice/CheckLoveCode"),
        (Box::new(CheckBarcode::new("m")), "/B2CInvoice/CheckBarcode"),
        (Box::new(GetCompanyName::new("m")), "/B2CInvoice/GetCompanyNameByTaxID"),
        (Box::new(GetAllowanceInvalid::new("m")), "/B2CInvoice/GetAllowanceInvalid"),
        (Box::new(GetAllowanceList::new("m")), "/B2CInvoice/GetAllowanceList"),
        (Box::new(GetIssueList::new("m")), "/B2CInvoice/GetIssueList"),
    ];
    for (op, path) in ops {
        assert_eq!(op.request_path(), path);
        assert_eq!(op.merchant_id(), "m");
    }
}

#[test]
fn empty_merchant_rejected_everywhere() {
    let ops: Vec<Box<dyn Operation>> = vec![
        Box::new(Invoice::new("")),
        Box::new(TriggerIssue::new("").tsr("T1").unwrap()),
        Box::new(CheckLoveCode::new("").love_code("168001").unwrap()),
        Box::new(GetCompanyName::new("").unified_business_no("97025978").unwrap()),
    ];
    for op in ops {
        assert_eq!(failed_field(op.as_ref()), "MerchantID");
    }
}
