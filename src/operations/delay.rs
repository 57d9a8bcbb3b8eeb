use serde::Serialize;
use serde_json::{Map, Value};

use super::invoice::Invoice;
use super::{Operation, code_or_empty, to_body};
use crate::core::*;

/// Delayed or trigger-based issuance of an invoice.
///
/// Wraps a fully populated [`Invoice`] and adds the delay fields. With
/// [`DelayFlag::Trigger`] the invoice is only issued once a
/// [`TriggerIssue`] with the same `Tsr` arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct DelayIssue {
    invoice: Invoice,
    delay: DelayFields,
    edit: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
struct DelayFields {
    #[serde(serialize_with = "code_or_empty")]
    delay_flag: Option<DelayFlag>,
    delay_day: u32,
    tsr: String,
    #[serde(serialize_with = "code_or_empty")]
    pay_type: Option<PayType>,
    pay_act: String,
}

impl DelayIssue {
    pub const REQUEST_PATH: &'static str = "/B2CInvoice/DelayIssue";
    pub const EDIT_REQUEST_PATH: &'static str = "/B2CInvoice/EditDelayIssue";

    pub fn new(invoice: Invoice) -> Self {
        Self {
            invoice,
            delay: DelayFields::default(),
            edit: false,
        }
    }

    /// Amend a pending delayed invoice. `Tsr` becomes mandatory.
    pub fn edit(invoice: Invoice) -> Self {
        Self {
            edit: true,
            ..Self::new(invoice)
        }
    }

    pub fn delay_flag(mut self, flag: DelayFlag) -> Self {
        self.delay.delay_flag = Some(flag);
        self
    }

    pub fn delay_day(mut self, day: u32) -> Result<Self> {
        check_delay_day(day)?;
        self.delay.delay_day = day;
        Ok(self)
    }

    pub fn tsr(mut self, tsr: impl Into<String>) -> Result<Self> {
        let tsr = tsr.into();
        check_tsr(&tsr)?;
        self.delay.tsr = tsr;
        Ok(self)
    }

    pub fn pay_type(mut self, pay_type: PayType) -> Self {
        self.delay.pay_type = Some(pay_type);
        self
    }

    pub fn pay_act(mut self, account: impl Into<String>) -> Result<Self> {
        let account = account.into();
        check_pay_act(&account)?;
        self.delay.pay_act = account;
        Ok(self)
    }

    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    pub fn is_edit(&self) -> bool {
        self.edit
    }

    fn validate_delay(&self) -> Result<()> {
        let Some(flag) = self.delay.delay_flag else {
            return Err(ValidationError::new("DelayFlag", "DelayFlag is empty").into());
        };
        check_delay_day(self.delay.delay_day)?;

        match flag {
            DelayFlag::Delay => {}
            DelayFlag::Trigger => {
                if self.delay.tsr.is_empty() {
                    return Err(ValidationError::new(
                        "Tsr",
                        "Tsr is required for trigger issuance",
                    )
                    .into());
                }
                if self.delay.pay_type != Some(PayType::Vendor) {
                    return Err(ValidationError::new(
                        "PayType",
                        "trigger issuance only supports PayType 2",
                    )
                    .into());
                }
                if self.delay.pay_act.is_empty() {
                    return Err(ValidationError::new(
                        "PayAct",
                        "PayAct is required for trigger issuance",
                    )
                    .into());
                }
            }
        }

        if self.edit && self.delay.tsr.is_empty() {
            return Err(ValidationError::new(
                "Tsr",
                "Tsr is required when editing a delayed invoice",
            )
            .into());
        }

        Ok(())
    }
}

impl Operation for DelayIssue {
    fn request_path(&self) -> &'static str {
        if self.edit {
            Self::EDIT_REQUEST_PATH
        } else {
            Self::REQUEST_PATH
        }
    }

    fn merchant_id(&self) -> &str {
        self.invoice.merchant_id()
    }

    fn validate(&self) -> Result<()> {
        self.invoice.validate()?;
        self.validate_delay()
    }

    fn data_body(&self) -> Result<Map<String, Value>> {
        let mut body = self.invoice.data_body()?;
        body.extend(to_body(&self.delay)?);
        Ok(body)
    }
}

/// Issue a previously delayed invoice (`/B2CInvoice/TriggerIssue`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TriggerIssue {
    #[serde(rename = "MerchantID")]
    merchant_id: String,
    tsr: String,
    pay_type: PayType,
}

impl TriggerIssue {
    pub const REQUEST_PATH: &'static str = "/B2CInvoice/TriggerIssue";

    pub fn new(merchant_id: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            tsr: String::new(),
            pay_type: PayType::Vendor,
        }
    }

    pub fn tsr(mut self, tsr: impl Into<String>) -> Result<Self> {
        let tsr = tsr.into();
        check_tsr(&tsr)?;
        self.tsr = tsr;
        Ok(self)
    }

    pub fn pay_type(mut self, pay_type: PayType) -> Self {
        self.pay_type = pay_type;
        self
    }
}

impl Operation for TriggerIssue {
    fn request_path(&self) -> &'static str {
        Self::REQUEST_PATH
    }

    fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    fn validate(&self) -> Result<()> {
        validate_base_params(&self.merchant_id)?;
        require("Tsr", &self.tsr)?;
        Ok(())
    }

    fn data_body(&self) -> Result<Map<String, Value>> {
        to_body(self)
    }
}

/// Cancel a pending delayed invoice (`/B2CInvoice/CancelDelayIssue`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CancelDelayIssue {
    #[serde(rename = "MerchantID")]
    merchant_id: String,
    tsr: String,
}

impl CancelDelayIssue {
    pub const REQUEST_PATH: &'static str = "/B2CInvoice/CancelDelayIssue";

    pub fn new(merchant_id: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            tsr: String::new(),
        }
    }

    pub fn tsr(mut self, tsr: impl Into<String>) -> Result<Self> {
        let tsr = tsr.into();
        check_tsr(&tsr)?;
        self.tsr = tsr;
        Ok(self)
    }
}

impl Operation for CancelDelayIssue {
    fn request_path(&self) -> &'static str {
        Self::REQUEST_PATH
    }

    fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    fn validate(&self) -> Result<()> {
        validate_base_params(&self.merchant_id)?;
        require("Tsr", &self.tsr)?;
        Ok(())
    }

    fn data_body(&self) -> Result<Map<String, Value>> {
        to_body(self)
    }
}
