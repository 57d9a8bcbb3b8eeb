use serde::{Serialize, Serializer};
use serde_json::Value;

use super::types::*;

/// Data body of an invoice issuance request.
///
/// Field names serialize to the vendor's names, in the vendor's order.
/// Operations own an `InvoiceData` and mutate it only through their checked
/// setters; `Items` and `SalesAmount` are filled in when the body is finalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvoiceData {
    #[serde(rename = "MerchantID")]
    pub merchant_id: String,
    /// Merchant-side order number, unique per merchant.
    pub relate_number: String,
    #[serde(rename = "CustomerID")]
    pub customer_id: String,
    /// Buyer's unified business number (company tax id).
    pub customer_identifier: String,
    pub customer_name: String,
    pub customer_addr: String,
    pub customer_phone: String,
    pub customer_email: String,
    #[serde(serialize_with = "code_or_empty")]
    pub clearance_mark: Option<ClearanceMark>,
    pub print: PrintMark,
    pub donation: Donation,
    pub love_code: String,
    pub carrier_type: CarrierType,
    pub carrier_num: String,
    pub tax_type: TaxType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_tax_type: Option<SpecialTaxType>,
    pub sales_amount: i64,
    pub invoice_remark: String,
    pub items: Vec<Value>,
    pub inv_type: InvType,
    #[serde(rename = "vat")]
    pub vat: VatType,
}

impl InvoiceData {
    /// A fresh body with vendor defaults.
    pub fn new(merchant_id: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            relate_number: String::new(),
            customer_id: String::new(),
            customer_identifier: String::new(),
            customer_name: String::new(),
            customer_addr: String::new(),
            customer_phone: String::new(),
            customer_email: String::new(),
            clearance_mark: None,
            print: PrintMark::No,
            donation: Donation::No,
            love_code: String::new(),
            carrier_type: CarrierType::None,
            carrier_num: String::new(),
            tax_type: TaxType::Dutiable,
            special_tax_type: None,
            sales_amount: 0,
            invoice_remark: String::new(),
            items: Vec::new(),
            inv_type: InvType::General,
            vat: VatType::Yes,
        }
    }
}

fn code_or_empty<S: Serializer>(
    mark: &Option<ClearanceMark>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(mark.map(|m| m.code()).unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_body_serializes_in_vendor_order() {
        let body = serde_json::to_value(InvoiceData::new("2000132")).unwrap();
        let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "MerchantID",
                "RelateNumber",
                "CustomerID",
                "CustomerIdentifier",
                "CustomerName",
                "CustomerAddr",
                "CustomerPhone",
                "CustomerEmail",
                "ClearanceMark",
                "Print",
                "Donation",
                "LoveCode",
                "CarrierType",
                "CarrierNum",
                "TaxType",
                "SalesAmount",
                "InvoiceRemark",
                "Items",
                "InvType",
                "vat",
            ]
        );
        assert_eq!(body["ClearanceMark"], "");
        assert_eq!(body["Print"], "0");
        assert_eq!(body["CarrierType"], "");
        assert_eq!(body["InvType"], "07");
        assert_eq!(body["vat"], "1");
    }

    #[test]
    fn special_tax_type_only_when_set() {
        let mut data = InvoiceData::new("2000132");
        data.special_tax_type = Some(SpecialTaxType::Bank);
        data.clearance_mark = Some(ClearanceMark::ThroughCustoms);
        let body = serde_json::to_value(&data).unwrap();
        assert_eq!(body["SpecialTaxType"], "3");
        assert_eq!(body["ClearanceMark"], "2");
    }
}
