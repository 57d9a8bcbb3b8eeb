use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{Operation, date_or_empty, require_date, to_body};
use crate::core::*;

/// Void an issued invoice (`/B2CInvoice/Invalid`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvalidInvoice {
    #[serde(rename = "MerchantID")]
    merchant_id: String,
    relate_number: String,
    invoice_no: String,
    #[serde(serialize_with = "date_or_empty")]
    invoice_date: Option<NaiveDate>,
    reason: String,
}

impl InvalidInvoice {
    pub const REQUEST_PATH: &'static str = "/B2CInvoice/Invalid";

    pub fn new(merchant_id: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            relate_number: String::new(),
            invoice_no: String::new(),
            invoice_date: None,
            reason: String::new(),
        }
    }

    pub fn relate_number(mut self, number: impl Into<String>) -> Result<Self> {
        let number = number.into();
        check_relate_number(&number)?;
        self.relate_number = number;
        Ok(self)
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

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }
}

impl Operation for InvalidInvoice {
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
        require("Reason", &self.reason)?;
        Ok(())
    }

    fn data_body(&self) -> Result<Map<String, Value>> {
        to_body(self)
    }
}
