use serde::Serialize;
use serde_json::{Map, Value};

use super::{Operation, code_or_empty, to_body};
use crate::core::*;

/// Maximum `NotifyMail` length for notifications.
pub const NOTIFY_EMAIL_MAX_LENGTH: usize = 80;

/// Ask the vendor to (re)send an invoice or allowance notice (`/B2CInvoice/InvoiceNotify`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvoiceNotify {
    #[serde(rename = "MerchantID")]
    merchant_id: String,
    invoice_no: String,
    allowance_no: String,
    phone: String,
    notify_mail: String,
    #[serde(serialize_with = "code_or_empty")]
    notify: Option<NotifyType>,
    #[serde(serialize_with = "code_or_empty")]
    invoice_tag: Option<InvoiceTagType>,
    #[serde(serialize_with = "code_or_empty")]
    notified: Option<NotifiedType>,
}

impl InvoiceNotify {
    pub const REQUEST_PATH: &'static str = "/B2CInvoice/InvoiceNotify";

    pub fn new(merchant_id: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            invoice_no: String::new(),
            allowance_no: String::new(),
            phone: String::new(),
            notify_mail: String::new(),
            notify: None,
            invoice_tag: None,
            notified: None,
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

    pub fn phone(mut self, phone: impl Into<String>) -> Result<Self> {
        let phone = phone.into();
        check_phone("Phone", &phone)?;
        self.phone = phone;
        Ok(self)
    }

    pub fn notify_mail(mut self, email: impl Into<String>) -> Result<Self> {
        let email = email.into();
        check_email("NotifyMail", &email, NOTIFY_EMAIL_MAX_LENGTH)?;
        self.notify_mail = email;
        Ok(self)
    }

    pub fn notify(mut self, notify: NotifyType) -> Self {
        self.notify = Some(notify);
        self
    }

    pub fn invoice_tag(mut self, tag: InvoiceTagType) -> Self {
        self.invoice_tag = Some(tag);
        self
    }

    pub fn notified(mut self, target: NotifiedType) -> Self {
        self.notified = Some(target);
        self
    }
}

impl Operation for InvoiceNotify {
    fn request_path(&self) -> &'static str {
        Self::REQUEST_PATH
    }

    fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    fn validate(&self) -> Result<()> {
        validate_base_params(&self.merchant_id)?;
        require("InvoiceNo", &self.invoice_no)?;

        if self.invoice_tag.is_some_and(|tag| tag.is_allowance()) && self.allowance_no.is_empty() {
            return Err(ValidationError::new(
                "AllowanceNo",
                "invoice tag refers to an allowance, AllowanceNo can not be empty",
            )
            .into());
        }
        if self.phone.is_empty() && self.notify_mail.is_empty() {
            return Err(ValidationError::new(
                "Phone",
                "either phone or notify mail must be set",
            )
            .into());
        }
        if self.notify.is_none() {
            return Err(ValidationError::new("Notify", "Notify is empty").into());
        }
        if self.invoice_tag.is_none() {
            return Err(ValidationError::new("InvoiceTag", "InvoiceTag is empty").into());
        }
        if self.notified.is_none() {
            return Err(ValidationError::new("Notified", "Notified is empty").into());
        }
        Ok(())
    }

    fn data_body(&self) -> Result<Map<String, Value>> {
        to_body(self)
    }
}
