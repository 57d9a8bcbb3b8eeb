use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{Operation, date_or_empty, require_date, round_amount, to_body};
use crate::core::*;

/// Maximum `NotifyMail` length for allowances.
pub const ALLOWANCE_EMAIL_MAX_LENGTH: usize = 100;

/// Issue an allowance (partial credit) against an invoice (`/B2CInvoice/Allowance`).
///
/// When no amount is set, `AllowanceAmount` is the rounded sum of the items.
#[derive(Debug, Clone, PartialEq)]
pub struct AllowanceInvoice {
    merchant_id: String,
    invoice_no: String,
    invoice_date: Option<NaiveDate>,
    allowance_notify: AllowanceNotifyType,
    customer_name: String,
    notify_mail: String,
    notify_phone: String,
    allowance_amount: Option<i64>,
    items: ItemCollection,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AllowanceBody<'a> {
    #[serde(rename = "MerchantID")]
    merchant_id: &'a str,
    invoice_no: &'a str,
    #[serde(serialize_with = "date_or_empty")]
    invoice_date: Option<NaiveDate>,
    allowance_notify: AllowanceNotifyType,
    customer_name: &'a str,
    notify_mail: &'a str,
    notify_phone: &'a str,
    allowance_amount: i64,
    items: Vec<Value>,
}

impl AllowanceInvoice {
    pub const REQUEST_PATH: &'static str = "/B2CInvoice/Allowance";

    pub fn new(merchant_id: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            invoice_no: String::new(),
            invoice_date: None,
            allowance_notify: AllowanceNotifyType::None,
            customer_name: String::new(),
            notify_mail: String::new(),
            notify_phone: String::new(),
            allowance_amount: None,
            items: ItemCollection::new(),
        }
    }

    pub fn invoice_no(mut self, number: impl Into<String>) -> Result<Self> {
        let number = number.into();
        check_invoice_no(&number)?;
        self.invoice_no = number;
        Ok(self)
    }

    pub fn invoice_date(mut self, date: NaiveDate) -> Self {
        self.invoice_date = Some(date);
        self
    }

    pub fn allowance_notify(mut self, notify: AllowanceNotifyType) -> Self {
        self.allowance_notify = notify;
        self
    }

    pub fn customer_name(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        require("CustomerName", &name)?;
        self.customer_name = name;
        Ok(self)
    }

    pub fn notify_mail(mut self, email: impl Into<String>) -> Result<Self> {
        let email = email.into();
        check_email("NotifyMail", &email, ALLOWANCE_EMAIL_MAX_LENGTH)?;
        self.notify_mail = email;
        Ok(self)
    }

    pub fn notify_phone(mut self, phone: impl Into<String>) -> Result<Self> {
        let phone = phone.into();
        check_phone("NotifyPhone", &phone)?;
        self.notify_phone = phone;
        Ok(self)
    }

    /// Override the amount otherwise derived from the items.
    pub fn allowance_amount(mut self, amount: i64) -> Self {
        self.allowance_amount = Some(amount);
        self
    }

    pub fn item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(mut self, items: ItemCollection) -> Self {
        self.items = items;
        self
    }

    pub fn items_untyped(self, items: &[Value]) -> Result<Self> {
        Ok(self.items(ItemCollection::from_untyped(items)?))
    }

    /// Explicit amount, or the rounded item total.
    pub fn effective_amount(&self) -> Result<i64> {
        match self.allowance_amount {
            Some(amount) => Ok(amount),
            None => round_amount("AllowanceAmount", self.items.sum_amount()?),
        }
    }
}

impl Operation for AllowanceInvoice {
    fn request_path(&self) -> &'static str {
        Self::REQUEST_PATH
    }

    fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    fn validate(&self) -> Result<()> {
        validate_base_params(&self.merchant_id)?;
        require("InvoiceNo", &self.invoice_no)?;
        require_date("InvoiceDate", self.invoice_date)?;

        let needs_mail = matches!(
            self.allowance_notify,
            AllowanceNotifyType::Email | AllowanceNotifyType::All
        );
        let needs_phone = matches!(
            self.allowance_notify,
            AllowanceNotifyType::Sms | AllowanceNotifyType::All
        );
        if needs_mail && self.notify_mail.is_empty() {
            return Err(ValidationError::new(
                "NotifyMail",
                "allowance notify includes e-mail, NotifyMail can not be empty",
            )
            .into());
        }
        if needs_phone && self.notify_phone.is_empty() {
            return Err(ValidationError::new(
                "NotifyPhone",
                "allowance notify includes SMS, NotifyPhone can not be empty",
            )
            .into());
        }

        if self.effective_amount()? <= 0 {
            return Err(ValidationError::new(
                "AllowanceAmount",
                "allowance amount must be greater than 0",
            )
            .into());
        }
        if self.items.is_empty() {
            return Err(ValidationError::new("Items", "allowance items empty").into());
        }
        Ok(())
    }

    fn data_body(&self) -> Result<Map<String, Value>> {
        to_body(&AllowanceBody {
            merchant_id: &self.merchant_id,
            invoice_no: &self.invoice_no,
            invoice_date: self.invoice_date,
            allowance_notify: self.allowance_notify,
            customer_name: &self.customer_name,
            notify_mail: &self.notify_mail,
            notify_phone: &self.notify_phone,
            allowance_amount: self.effective_amount()?,
            items: self.items.map_payload(|index, _, mut payload| {
                payload.insert("ItemSeq".into(), Value::from(index + 1));
                payload
            }),
        })
    }
}

/// Void an allowance (`/B2CInvoice/AllowanceInvalid`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AllowanceInvalid {
    #[serde(rename = "MerchantID")]
    merchant_id: String,
    invoice_no: String,
    allowance_no: String,
    reason: String,
}

impl AllowanceInvalid {
    pub const REQUEST_PATH: &'static str = "/B2CInvoice/AllowanceInvalid";

    pub fn new(merchant_id: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            invoice_no: String::new(),
            allowance_no: String::new(),
            reason: String::new(),
        }
    }

    pub fn invoice_no(mut self, number: impl Into<String>) -> Result<Self> {
        let number = number.into();
        check_invoice_no(&number)?;
        self.invoice_no = number;
        Ok(self)
    }

    pub fn allowance_no(mut self, number: impl Into<String>) -> Result<Self> {
        let number = number.into();
        check_allowance_no(&number)?;
        self.allowance_no = number;
        Ok(self)
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }
}

impl Operation for AllowanceInvalid {
    fn request_path(&self) -> &'static str {
        Self::REQUEST_PATH
    }

    fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    fn validate(&self) -> Result<()> {
        validate_base_params(&self.merchant_id)?;
        require("InvoiceNo", &self.invoice_no)?;
        require("AllowanceNo", &self.allowance_no)?;
        require("Reason", &self.reason)?;
        Ok(())
    }

    fn data_body(&self) -> Result<Map<String, Value>> {
        to_body(self)
    }
}
