use serde_json::{Map, Value};

use super::{Operation, round_amount, to_body};
use crate::core::*;

/// Issue a B2C invoice (`/B2CInvoice/Issue`).
///
/// `Items` and `SalesAmount` are derived from the line items when the body is
/// finalized. Every item gets a 1-based `ItemSeq`; items without their own
/// tax type inherit the invoice's.
///
/// ```
/// use fapiao::core::*;
/// use fapiao::operations::{Invoice, Operation};
/// use rust_decimal_macros::dec;
///
/// let invoice = Invoice::new("2000132")
///     .relate_number("ORDER-2024-0001").unwrap()
///     .customer_email("buyer@example.com")
///     .item(LineItem::new("Coffee beans", dec!(2), "bag", dec!(350)).unwrap());
///
/// let body = invoice.data_body().unwrap();
/// assert_eq!(body["SalesAmount"], 700);
/// assert!(invoice.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    data: InvoiceData,
    items: ItemCollection,
    sales_amount: Option<i64>,
}

impl Invoice {
    pub const REQUEST_PATH: &'static str = "/B2CInvoice/Issue";

    pub fn new(merchant_id: impl Into<String>) -> Self {
        Self {
            data: InvoiceData::new(merchant_id),
            items: ItemCollection::new(),
            sales_amount: None,
        }
    }

    pub fn relate_number(mut self, number: impl Into<String>) -> Result<Self> {
        let number = number.into();
        check_relate_number(&number)?;
        self.data.relate_number = number;
        Ok(self)
    }

    pub fn customer_id(mut self, id: impl Into<String>) -> Self {
        self.data.customer_id = id.into();
        self
    }

    pub fn customer_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.data.customer_identifier = identifier.into();
        self
    }

    pub fn customer_name(mut self, name: impl Into<String>) -> Self {
        self.data.customer_name = name.into();
        self
    }

    pub fn customer_addr(mut self, address: impl Into<String>) -> Self {
        self.data.customer_addr = address.into();
        self
    }

    pub fn customer_phone(mut self, phone: impl Into<String>) -> Self {
        self.data.customer_phone = phone.into();
        self
    }

    pub fn customer_email(mut self, email: impl Into<String>) -> Self {
        self.data.customer_email = email.into();
        self
    }

    pub fn clearance_mark(mut self, mark: ClearanceMark) -> Self {
        self.data.clearance_mark = Some(mark);
        self
    }

    pub fn print(mut self, mark: PrintMark) -> Self {
        self.data.print = mark;
        self
    }

    pub fn donation(mut self, donation: Donation) -> Self {
        self.data.donation = donation;
        self
    }

    pub fn love_code(mut self, code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        check_love_code(&code)?;
        self.data.love_code = code;
        Ok(self)
    }

    pub fn carrier_type(mut self, carrier: CarrierType) -> Self {
        self.data.carrier_type = carrier;
        self
    }

    pub fn carrier_num(mut self, number: impl Into<String>) -> Self {
        self.data.carrier_num = number.into();
        self
    }

    /// Invoice tax type, also inherited by items that have none.
    pub fn tax_type(mut self, tax_type: TaxType) -> Self {
        self.data.tax_type = tax_type;
        self
    }

    pub fn special_tax_type(mut self, special: SpecialTaxType) -> Self {
        self.data.special_tax_type = Some(special);
        self
    }

    /// Expected total. Finalizing fails if it differs from the item sum.
    pub fn sales_amount(mut self, amount: i64) -> Result<Self> {
        if amount <= 0 {
            return Err(ValidationError::new("SalesAmount", "sales amount must be greater than 0").into());
        }
        self.sales_amount = Some(amount);
        Ok(self)
    }

    pub fn invoice_remark(mut self, remark: impl Into<String>) -> Self {
        self.data.invoice_remark = remark.into();
        self
    }

    pub fn inv_type(mut self, inv_type: InvType) -> Self {
        self.data.inv_type = inv_type;
        self
    }

    pub fn vat(mut self, vat: VatType) -> Self {
        self.data.vat = vat;
        self
    }

    pub fn item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Replace all items.
    pub fn items(mut self, items: ItemCollection) -> Self {
        self.items = items;
        self
    }

    /// Replace all items from loosely-typed maps.
    pub fn items_untyped(self, items: &[Value]) -> Result<Self> {
        Ok(self.items(ItemCollection::from_untyped(items)?))
    }

    pub fn data(&self) -> &InvoiceData {
        &self.data
    }

    pub fn line_items(&self) -> &ItemCollection {
        &self.items
    }

    /// The body with `Items` and `SalesAmount` filled in.
    pub fn finalized(&self) -> Result<InvoiceData> {
        let tax_type = self.data.tax_type;
        let computed = round_amount("SalesAmount", self.items.sum_amount()?)?;

        if let Some(preset) = self.sales_amount {
            if preset != computed {
                return Err(ValidationError::new(
                    "SalesAmount",
                    format!("sales amount {preset} does not match the item total {computed}"),
                )
                .into());
            }
        }

        let mut data = self.data.clone();
        data.items = self.items.map_payload(|index, _, mut payload| {
            payload
                .entry("ItemTaxType")
                .or_insert_with(|| Value::String(tax_type.code().into()));
            payload.insert("ItemSeq".into(), Value::from(index + 1));
            payload
        });
        data.sales_amount = computed;
        Ok(data)
    }
}

impl Operation for Invoice {
    fn request_path(&self) -> &'static str {
        Self::REQUEST_PATH
    }

    fn merchant_id(&self) -> &str {
        &self.data.merchant_id
    }

    fn validate(&self) -> Result<()> {
        validate_base_params(&self.data.merchant_id)?;
        let data = self.finalized()?;
        validate_invoice(&data, &self.items)?;
        Ok(())
    }

    fn data_body(&self) -> Result<Map<String, Value>> {
        to_body(&self.finalized()?)
    }
}
