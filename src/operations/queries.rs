use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{Operation, date_or_empty, require_date, to_body};
use crate::core::*;

/// Look up an issued invoice (`/B2CInvoice/GetIssue`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetInvoice {
    #[serde(rename = "MerchantID")]
    merchant_id: String,
    relate_number: String,
    invoice_no: String,
    #[serde(serialize_with = "date_or_empty")]
    invoice_date: Option<NaiveDate>,
}

impl GetInvoice {
    pub const REQUEST_PATH: &'static str = "/B2CInvoice/GetIssue";

    pub fn new(merchant_id: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            relate_number: String::new(),
            invoice_no: String::new(),
            invoice_date: None,
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
}

impl Operation for GetInvoice {
    fn request_path(&self) -> &'static str {
        Self::REQUEST_PATH
    }

    fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    fn validate(&self) -> Result<()> {
        validate_base_params(&self.merchant_id)?;
        require("InvoiceNo", &self.invoice_no)?;
        require_date("InvoiceDate", self.invoice_date)
    }

    fn data_body(&self) -> Result<Map<String, Value>> {
        to_body(self)
    }
}

/// Look up a voided invoice (`/B2CInvoice/GetInvalid`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetInvalidInvoice {
    #[serde(rename = "MerchantID")]
    merchant_id: String,
    relate_number: String,
    invoice_no: String,
    #[serde(serialize_with = "date_or_empty")]
    invoice_date: Option<NaiveDate>,
}

impl GetInvalidInvoice {
    pub const REQUEST_PATH: &'static str = "/B2CInvoice/GetInvalid";

    pub fn new(merchant_id: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            relate_number: String::new(),
            invoice_no: String::new(),
            invoice_date: None,
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
}

impl Operation for GetInvalidInvoice {
    fn request_path(&self) -> &'static str {
        Self::REQUEST_PATH
    }

    fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    fn validate(&self) -> Result<()> {
        validate_base_params(&self.merchant_id)?;
        require("InvoiceNo", &self.invoice_no)?;
        Ok(())
    }

    fn data_body(&self) -> Result<Map<String, Value>> {
        to_body(self)
    }
}

/// Check that a donation love code exists (`/B2CInvoice/CheckLoveCode`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckLoveCode {
    #[serde(rename = "MerchantID")]
    merchant_id: String,
    love_code: String,
}

impl CheckLoveCode {
    pub const REQUEST_PATH: &'static str = "/B2CInvoice/CheckLoveCode";

    pub fn new(merchant_id: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            love_code: String::new(),
        }
    }

    pub fn love_code(mut self, code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        check_love_code(&code)?;
        self.love_code = code;
        Ok(self)
    }
}

impl Operation for CheckLoveCode {
    fn request_path(&self) -> &'static str {
        Self::REQUEST_PATH
    }

    fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    fn validate(&self) -> Result<()> {
        validate_base_params(&self.merchant_id)?;
        require("LoveCode", &self.love_code)?;
        Ok(())
    }

    fn data_body(&self) -> Result<Map<String, Value>> {
        to_body(self)
    }
}

/// Check that a mobile barcode carrier exists (`/B2CInvoice/CheckBarcode`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckBarcode {
    #[serde(rename = "MerchantID")]
    merchant_id: String,
    #[serde(rename = "BarCode")]
    barcode: String,
}

impl CheckBarcode {
    pub const REQUEST_PATH: &'static str = "/B2CInvoice/CheckBarcode";

    pub fn new(merchant_id: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            barcode: String::new(),
        }
    }

    /// Upper-cased before the format check.
    pub fn barcode(mut self, code: impl AsRef<str>) -> Result<Self> {
        let code = code.as_ref().to_uppercase();
        check_barcode(&code)?;
        self.barcode = code;
        Ok(self)
    }
}

impl Operation for CheckBarcode {
    fn request_path(&self) -> &'static str {
        Self::REQUEST_PATH
    }

    fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    fn validate(&self) -> Result<()> {
        validate_base_params(&self.merchant_id)?;
        require("BarCode", &self.barcode)?;
        check_barcode(&self.barcode)?;
        Ok(())
    }

    fn data_body(&self) -> Result<Map<String, Value>> {
        to_body(self)
    }
}

/// Resolve a company name from its unified business number
/// (`/B2CInvoice/GetCompanyNameByTaxID`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetCompanyName {
    #[serde(rename = "MerchantID")]
    merchant_id: String,
    unified_business_no: String,
}

impl GetCompanyName {
    pub const REQUEST_PATH: &'static str = "/B2CInvoice/GetCompanyNameByTaxID";

    pub fn new(merchant_id: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            unified_business_no: String::new(),
        }
    }

    /// Trimmed, then must be exactly 8 digits.
    pub fn unified_business_no(mut self, tax_id: impl AsRef<str>) -> Result<Self> {
        let tax_id = tax_id.as_ref().trim();
        check_unified_business_no(tax_id)?;
        self.unified_business_no = tax_id.to_string();
        Ok(self)
    }
}

impl Operation for GetCompanyName {
    fn request_path(&self) -> &'static str {
        Self::REQUEST_PATH
    }

    fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    fn validate(&self) -> Result<()> {
        validate_base_params(&self.merchant_id)?;
        require("UnifiedBusinessNo", &self.unified_business_no)?;
        check_unified_business_no(&self.unified_business_no)?;
        Ok(())
    }

    fn data_body(&self) -> Result<Map<String, Value>> {
        to_body(self)
    }
}

/// Look up a voided allowance (`/B2CInvoice/GetAllowanceInvalid`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetAllowanceInvalid {
    #[serde(rename = "MerchantID")]
    merchant_id: String,
    invoice_no: String,
    allowance_no: String,
}

impl GetAllowanceInvalid {
    pub const REQUEST_PATH: &'static str = "/B2CInvoice/GetAllowanceInvalid";

    pub fn new(merchant_id: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            invoice_no: String::new(),
            allowance_no: String::new(),
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
}

impl Operation for GetAllowanceInvalid {
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
        Ok(())
    }

    fn data_body(&self) -> Result<Map<String, Value>> {
        to_body(self)
    }
}

/// List the allowances of an invoice, or fetch one by number
/// (`/B2CInvoice/GetAllowanceList`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetAllowanceList {
    #[serde(rename = "MerchantID")]
    merchant_id: String,
    search_type: AllowanceSearchType,
    allowance_no: String,
    invoice_no: String,
    #[serde(serialize_with = "date_or_empty")]
    date: Option<NaiveDate>,
}

impl GetAllowanceList {
    pub const REQUEST_PATH: &'static str = "/B2CInvoice/GetAllowanceList";

    pub fn new(merchant_id: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            search_type: AllowanceSearchType::default(),
            allowance_no: String::new(),
            invoice_no: String::new(),
            date: None,
        }
    }

    pub fn search_type(mut self, search_type: AllowanceSearchType) -> Self {
        self.search_type = search_type;
        self
    }

    pub fn allowance_no(mut self, number: impl Into<String>) -> Result<Self> {
        let number = number.into();
        check_allowance_no(&number)?;
        self.allowance_no = number;
        Ok(self)
    }

    pub fn invoice_no(mut self, number: impl Into<String>) -> Result<Self> {
        let number = number.into();
        check_invoice_no(&number)?;
        self.invoice_no = number;
        Ok(self)
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

impl Operation for GetAllowanceList {
    fn request_path(&self) -> &'static str {
        Self::REQUEST_PATH
    }

    fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    fn validate(&self) -> Result<()> {
        validate_base_params(&self.merchant_id)?;
        match self.search_type {
            AllowanceSearchType::ByAllowanceNo => require("AllowanceNo", &self.allowance_no)?,
            AllowanceSearchType::ByInvoiceDate | AllowanceSearchType::ByAllowanceDate => {
                require("InvoiceNo", &self.invoice_no)?;
                require_date("Date", self.date)?;
            }
        }
        Ok(())
    }

    fn data_body(&self) -> Result<Map<String, Value>> {
        to_body(self)
    }
}

/// List issued invoices in a date range, one page at a time
/// (`/B2CInvoice/GetIssueList`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetIssueList {
    #[serde(rename = "MerchantID")]
    merchant_id: String,
    #[serde(serialize_with = "date_or_empty")]
    begin_date: Option<NaiveDate>,
    #[serde(serialize_with = "date_or_empty")]
    end_date: Option<NaiveDate>,
    num_per_page: u32,
    showing_page: u32,
    format: ListFormat,
}

impl GetIssueList {
    pub const REQUEST_PATH: &'static str = "/B2CInvoice/GetIssueList";
    pub const DEFAULT_PER_PAGE: u32 = 50;
    pub const MAX_PER_PAGE: u32 = 200;

    pub fn new(merchant_id: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            begin_date: None,
            end_date: None,
            num_per_page: Self::DEFAULT_PER_PAGE,
            showing_page: 1,
            format: ListFormat::default(),
        }
    }

    pub fn begin_date(mut self, date: NaiveDate) -> Self {
        self.begin_date = Some(date);
        self
    }

    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Between 1 and [`GetIssueList::MAX_PER_PAGE`].
    pub fn num_per_page(mut self, count: u32) -> Result<Self> {
        if !(1..=Self::MAX_PER_PAGE).contains(&count) {
            return Err(ValidationError::new(
                "NumPerPage",
                format!("NumPerPage must be between 1 and {}", Self::MAX_PER_PAGE),
            )
            .into());
        }
        self.num_per_page = count;
        Ok(self)
    }

    /// 1-based.
    pub fn showing_page(mut self, page: u32) -> Result<Self> {
        if page == 0 {
            return Err(ValidationError::new("ShowingPage", "ShowingPage must be at least 1").into());
        }
        self.showing_page = page;
        Ok(self)
    }

    pub fn format(mut self, format: ListFormat) -> Self {
        self.format = format;
        self
    }
}

impl Operation for GetIssueList {
    fn request_path(&self) -> &'static str {
        Self::REQUEST_PATH
    }

    fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    fn validate(&self) -> Result<()> {
        validate_base_params(&self.merchant_id)?;
        let (Some(begin), Some(end)) = (self.begin_date, self.end_date) else {
            require_date("BeginDate", self.begin_date)?;
            return require_date("EndDate", self.end_date);
        };
        if begin > end {
            return Err(ValidationError::new(
                "BeginDate",
                format!("BeginDate {begin} is after EndDate {end}"),
            )
            .into());
        }
        Ok(())
    }

    fn data_body(&self) -> Result<Map<String, Value>> {
        to_body(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(op: &impl Operation) -> String {
        op.validate().unwrap_err().as_validation().unwrap().field.clone()
    }

    #[test]
    fn get_invoice_requires_number_and_date() {
        let op = GetInvoice::new("2000132");
        assert_eq!(field(&op), "InvoiceNo");
        let op = op.invoice_no("AB12345678").unwrap();
        assert_eq!(field(&op), "InvoiceDate");
        let op = op.invoice_date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert!(op.validate().is_ok());
        assert_eq!(op.data_body().unwrap()["InvoiceDate"], "2024-01-02");
    }

    #[test]
    fn get_invalid_invoice_requires_number_only() {
        assert_eq!(field(&GetInvalidInvoice::new("2000132")), "InvoiceNo");
        let op = GetInvalidInvoice::new("2000132").invoice_no("AB12345678").unwrap();
        assert!(op.validate().is_ok());
        assert_eq!(op.data_body().unwrap()["InvoiceDate"], "");
    }

    #[test]
    fn check_love_code() {
        assert_eq!(field(&CheckLoveCode::new("2000132")), "LoveCode");
        assert!(CheckLoveCode::new("2000132").love_code("12345678").is_err());
        let op = CheckLoveCode::new("2000132").love_code("168001").unwrap();
        assert!(op.validate().is_ok());
        assert_eq!(op.request_path(), "/B2CInvoice/CheckLoveCode");
    }

    #[test]
    fn check_barcode_upper_cases() {
        let op = CheckBarcode::new("2000132").barcode("/abc+123").unwrap();
        assert_eq!(op.data_body().unwrap()["BarCode"], "/ABC+123");
        assert!(op.validate().is_ok());

        assert!(CheckBarcode::new("2000132").barcode("ABC1234").is_err());
        assert!(CheckBarcode::new("2000132").barcode("/ABC_123").is_err());
        assert_eq!(field(&CheckBarcode::new("2000132")), "BarCode");
    }

    #[test]
    fn company_name_by_tax_id() {
        let op = GetCompanyName::new("2000132").unified_business_no(" 97025978 ").unwrap();
        assert_eq!(op.data_body().unwrap()["UnifiedBusinessNo"], "97025978");
        assert!(op.validate().is_ok());
        assert_eq!(op.request_path(), "/B2CInvoice/GetCompanyNameByTaxID");

        assert!(GetCompanyName::new("2000132").unified_business_no("1234567").is_err());
        assert!(GetCompanyName::new("2000132").unified_business_no("1234567A").is_err());
        assert_eq!(field(&GetCompanyName::new("2000132")), "UnifiedBusinessNo");
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn allowance_invalid_requires_invoice_then_allowance() {
        let op = GetAllowanceInvalid::new("2000132");
        assert_eq!(field(&op), "InvoiceNo");
        let op = op.invoice_no("AB12345678").unwrap();
        assert_eq!(field(&op), "AllowanceNo");
        let op = op.allowance_no("2024060112345678").unwrap();
        assert!(op.validate().is_ok());
        assert_eq!(op.request_path(), "/B2CInvoice/GetAllowanceInvalid");

        assert!(GetAllowanceInvalid::new("2000132").allowance_no("123").is_err());
        assert_eq!(field(&GetAllowanceInvalid::new("")), "MerchantID");
    }

    #[test]
    fn allowance_list_by_number() {
        let op = GetAllowanceList::new("2000132");
        assert_eq!(field(&op), "AllowanceNo");

        let op = op.allowance_no("2024060112345678").unwrap();
        assert!(op.validate().is_ok());
        let body = op.data_body().unwrap();
        assert_eq!(body["SearchType"], "0");
        assert_eq!(body["Date"], "");
    }

    #[test]
    fn allowance_list_by_invoice_needs_number_then_date() {
        for search_type in [
            AllowanceSearchType::ByInvoiceDate,
            AllowanceSearchType::ByAllowanceDate,
        ] {
            let op = GetAllowanceList::new("2000132")
                .search_type(search_type)
                .allowance_no("2024060112345678")
                .unwrap();
            assert_eq!(field(&op), "InvoiceNo");
            let op = op.invoice_no("AB12345678").unwrap();
            assert_eq!(field(&op), "Date");
            let op = op.date(day(1));
            assert!(op.validate().is_ok());
            assert_eq!(op.data_body().unwrap()["SearchType"], search_type.code());
        }
    }

    #[test]
    fn issue_list_validation_order() {
        let op = GetIssueList::new("2000132");
        assert_eq!(field(&op), "BeginDate");
        let op = op.begin_date(day(30));
        assert_eq!(field(&op), "EndDate");
        let op = op.end_date(day(1));
        let err = op.validate().unwrap_err();
        assert_eq!(err.as_validation().unwrap().field, "BeginDate");
        assert!(err.to_string().contains("after EndDate"));

        let op = op.begin_date(day(1));
        assert!(op.validate().is_ok());
    }

    #[test]
    fn issue_list_paging_and_format() {
        let op = GetIssueList::new("2000132").begin_date(day(1)).end_date(day(30));
        let body = op.data_body().unwrap();
        assert_eq!(body["NumPerPage"], 50);
        assert_eq!(body["ShowingPage"], 1);
        assert_eq!(body["Format"], "1");
        assert_eq!(body["BeginDate"], "2024-06-01");

        assert!(op.clone().num_per_page(0).is_err());
        assert!(op.clone().num_per_page(201).is_err());
        assert!(op.clone().showing_page(0).is_err());

        let body = op
            .num_per_page(200)
            .unwrap()
            .showing_page(3)
            .unwrap()
            .format(ListFormat::Csv)
            .data_body()
            .unwrap();
        assert_eq!(body["NumPerPage"], 200);
        assert_eq!(body["ShowingPage"], 3);
        assert_eq!(body["Format"], "2");
    }
}
