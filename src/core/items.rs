use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Number, Value};

use super::error::ValidationError;
use super::types::TaxType;

/// A goods or service line on an invoice or allowance.
///
/// The line amount is always `quantity * price` and is recomputed on every
/// call; there is no way to set it independently.
///
/// ```
/// use fapiao::core::*;
/// use rust_decimal_macros::dec;
///
/// let item = LineItem::new("Coffee beans", dec!(2), "bag", dec!(350)).unwrap();
/// assert_eq!(item.amount(), dec!(700));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    name: String,
    quantity: Decimal,
    unit: String,
    price: Decimal,
    tax_type: Option<TaxType>,
}

impl LineItem {
    /// Create a line item. Name and unit are trimmed; quantity and price must be positive.
    ///
    /// Quantity, price and their product must each fit a `Decimal` and be
    /// exactly representable as a JSON number on the wire.
    pub fn new(
        name: impl Into<String>,
        quantity: Decimal,
        unit: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        let unit = unit.into().trim().to_string();

        if name.is_empty() {
            return Err(ValidationError::new("ItemName", "item name cannot be empty"));
        }
        if unit.is_empty() {
            return Err(ValidationError::new("ItemWord", "item unit cannot be empty"));
        }
        if quantity <= Decimal::ZERO {
            return Err(ValidationError::new(
                "ItemCount",
                "item quantity must be greater than 0",
            ));
        }
        if price <= Decimal::ZERO {
            return Err(ValidationError::new(
                "ItemPrice",
                "item price must be greater than 0",
            ));
        }
        check_wire_exact("ItemCount", quantity)?;
        check_wire_exact("ItemPrice", price)?;

        let Some(amount) = quantity.checked_mul(price) else {
            return Err(ValidationError::new(
                "ItemAmount",
                "item amount (quantity * price) overflows",
            ));
        };
        if amount.is_zero() {
            return Err(ValidationError::new(
                "ItemAmount",
                "item amount (quantity * price) is too small to represent",
            ));
        }
        check_wire_exact("ItemAmount", amount)?;

        Ok(Self {
            name,
            quantity,
            unit,
            price,
            tax_type: None,
        })
    }

    /// Set the item's own tax type (needed for mixed-tax invoices).
    pub fn with_tax_type(mut self, tax_type: TaxType) -> Self {
        self.tax_type = Some(tax_type);
        self
    }

    /// Normalize a loosely-typed item map into a `LineItem`.
    ///
    /// Accepts `name`, `quantity`, `unit`, `price` and an optional `taxType`
    /// vendor code. Quantities and prices may be JSON numbers or numeric strings.
    pub fn from_untyped(value: &Value) -> Result<Self, ValidationError> {
        let Some(map) = value.as_object() else {
            return Err(ValidationError::new("Items", "item must be a JSON object"));
        };

        let name = text_field(map, "name")?;
        let quantity = decimal_field(map, "quantity")?;
        let unit = text_field(map, "unit")?;
        let price = decimal_field(map, "price")?;

        let item = Self::new(name, quantity, unit, price)?;

        match map.get("taxType") {
            None | Some(Value::Null) => Ok(item),
            Some(Value::String(code)) if code.trim().is_empty() => Ok(item),
            Some(Value::String(code)) => match TaxType::from_code(code.trim()) {
                Some(tax_type) => Ok(item.with_tax_type(tax_type)),
                None => Err(ValidationError::new(
                    "ItemTaxType",
                    format!("unknown item tax type '{code}'"),
                )),
            },
            Some(other) => Err(ValidationError::new(
                "ItemTaxType",
                format!("item tax type must be a string, got {other}"),
            )),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn tax_type(&self) -> Option<TaxType> {
        self.tax_type
    }

    /// Line amount: `quantity * price`. Checked for overflow in [`LineItem::new`].
    pub fn amount(&self) -> Decimal {
        self.quantity * self.price
    }

    /// Vendor wire form of this item.
    pub fn to_payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("ItemName".into(), Value::String(self.name.clone()));
        payload.insert("ItemCount".into(), decimal_to_json(self.quantity));
        payload.insert("ItemWord".into(), Value::String(self.unit.clone()));
        payload.insert("ItemPrice".into(), decimal_to_json(self.price));
        payload.insert("ItemAmount".into(), decimal_to_json(self.amount()));
        if let Some(tax_type) = self.tax_type {
            payload.insert("ItemTaxType".into(), Value::String(tax_type.code().into()));
        }
        payload
    }
}

/// Ordered, append-only list of line items. Order becomes `ItemSeq` on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemCollection {
    items: Vec<LineItem>,
}

impl ItemCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from loosely-typed item maps, failing on the first bad item.
    pub fn from_untyped(values: &[Value]) -> Result<Self, ValidationError> {
        values.iter().map(LineItem::from_untyped).collect()
    }

    pub fn push(&mut self, item: LineItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Sum of every item's `amount()`.
    pub fn sum_amount(&self) -> Result<Decimal, ValidationError> {
        self.items.iter().try_fold(Decimal::ZERO, |total, item| {
            total
                .checked_add(item.amount())
                .ok_or_else(|| ValidationError::new("Items", "sum of item amounts overflows"))
        })
    }

    /// Wire form of every item, in insertion order.
    pub fn to_payload(&self) -> Vec<Value> {
        self.map_payload(|_, _, payload| payload)
    }

    /// Wire form of every item, passed through `transform` first.
    ///
    /// The transform receives the zero-based index, the item and its default
    /// payload. Used to inject `ItemSeq` or an inherited `ItemTaxType`.
    pub fn map_payload<F>(&self, mut transform: F) -> Vec<Value>
    where
        F: FnMut(usize, &LineItem, Map<String, Value>) -> Map<String, Value>,
    {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| Value::Object(transform(index, item, item.to_payload())))
            .collect()
    }
}

impl FromIterator<LineItem> for ItemCollection {
    fn from_iter<I: IntoIterator<Item = LineItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ItemCollection {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Render a decimal as a JSON number: integral values as integers, the rest as floats.
///
/// Item values are checked by [`check_wire_exact`] first, so the float is exact.
pub(crate) fn decimal_to_json(value: Decimal) -> Value {
    let value = value.normalize();
    if value.scale() == 0 {
        if let Some(int) = value.to_i64() {
            return Value::Number(Number::from(int));
        }
    }
    value
        .to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(value.to_string()))
}

/// Reject values that would change when rendered by [`decimal_to_json`].
fn check_wire_exact(field: &str, value: Decimal) -> Result<(), ValidationError> {
    let value = value.normalize();
    if value.scale() == 0 && value.to_i64().is_some() {
        return Ok(());
    }
    let rendered = value
        .to_f64()
        .and_then(Number::from_f64)
        .and_then(|n| parse_decimal(&n.to_string()));
    if rendered != Some(value) {
        return Err(ValidationError::new(
            field,
            format!("{field} {value} cannot be represented exactly as a JSON number"),
        ));
    }
    Ok(())
}

fn text_field(map: &Map<String, Value>, key: &str) -> Result<String, ValidationError> {
    match map.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(ValidationError::new(
            "Items",
            format!("item field '{key}' must be a string, got {other}"),
        )),
        None => Err(ValidationError::new(
            "Items",
            format!("item field '{key}' does not exist"),
        )),
    }
}

fn decimal_field(map: &Map<String, Value>, key: &str) -> Result<Decimal, ValidationError> {
    let invalid = || ValidationError::new("Items", format!("item field '{key}' is not a number"));

    match map.get(key) {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(int) => Ok(Decimal::from(int)),
            None => parse_decimal(&n.to_string()).ok_or_else(invalid),
        },
        Some(Value::String(s)) => parse_decimal(s.trim()).ok_or_else(invalid),
        Some(_) => Err(invalid()),
        None => Err(ValidationError::new(
            "Items",
            format!("item field '{key}' does not exist"),
        )),
    }
}

/// Plain or exponent notation, as JSON encoders emit floats.
fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
