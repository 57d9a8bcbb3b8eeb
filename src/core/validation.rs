use super::data::InvoiceData;
use super::error::ValidationError;
use super::items::ItemCollection;
use super::types::*;

/// Required `CarrierNum` length for a citizen digital certificate carrier.
pub const CARRIER_CITIZEN_LENGTH: usize = 16;

/// Required `CarrierNum` length for a mobile barcode carrier.
pub const CARRIER_CELLPHONE_LENGTH: usize = 8;

pub const RELATE_NUMBER_MAX_LENGTH: usize = 30;
pub const INVOICE_NO_LENGTH: usize = 10;
pub const ALLOWANCE_NO_LENGTH: usize = 16;
pub const TSR_MAX_LENGTH: usize = 30;
pub const PAY_ACT_MAX_LENGTH: usize = 16;
pub const PHONE_MAX_LENGTH: usize = 20;
pub const LOVE_CODE_LENGTH: std::ops::RangeInclusive<usize> = 3..=7;
pub const DELAY_DAY_RANGE: std::ops::RangeInclusive<u32> = 1..=15;

/// Validate an invoice body against the vendor's cross-field rules.
///
/// Checks run in a fixed order (basic parameters, customer and print mark,
/// donation, carrier, items) and stop at the first violation.
pub fn validate_invoice(data: &InvoiceData, items: &ItemCollection) -> Result<(), ValidationError> {
    validate_basic_params(data)?;
    validate_customer(data)?;
    validate_donation(data)?;
    validate_carrier(data)?;
    validate_items(items)
}

fn validate_basic_params(data: &InvoiceData) -> Result<(), ValidationError> {
    if data.relate_number.is_empty() {
        return Err(ValidationError::new("RelateNumber", "RelateNumber is empty"));
    }

    // Zero-rated sales are exports and need the customs route.
    if data.tax_type == TaxType::Zero && data.clearance_mark.is_none() {
        return Err(ValidationError::new(
            "ClearanceMark",
            "invoice is zero rated, clearance mark can not be empty",
        ));
    }

    Ok(())
}

fn validate_customer(data: &InvoiceData) -> Result<(), ValidationError> {
    if data.print == PrintMark::Yes
        && (data.customer_name.is_empty() || data.customer_addr.is_empty())
    {
        return Err(ValidationError::new(
            "Print",
            "print mark is yes, customer name and address can not be empty",
        ));
    }

    if data.customer_phone.is_empty() && data.customer_email.is_empty() {
        return Err(ValidationError::new(
            "CustomerPhone",
            "either customer phone or customer email must be set",
        ));
    }

    if !data.customer_identifier.is_empty() {
        if data.print != PrintMark::Yes {
            return Err(ValidationError::new(
                "Print",
                "customer identifier is set, print mark must be yes",
            ));
        }
        if data.donation == Donation::Yes {
            return Err(ValidationError::new(
                "Donation",
                "customer identifier is set, donation can not be yes",
            ));
        }
    }

    Ok(())
}

fn validate_donation(data: &InvoiceData) -> Result<(), ValidationError> {
    match data.donation {
        Donation::No => Ok(()),
        Donation::Yes => {
            if data.love_code.is_empty() {
                return Err(ValidationError::new(
                    "LoveCode",
                    "donation is yes, love code is required",
                ));
            }
            if data.print == PrintMark::Yes {
                return Err(ValidationError::new(
                    "Print",
                    "donation is yes, invoice can not be printed",
                ));
            }
            Ok(())
        }
    }
}

fn validate_carrier(data: &InvoiceData) -> Result<(), ValidationError> {
    if data.carrier_type != CarrierType::None && data.print == PrintMark::Yes {
        return Err(ValidationError::new(
            "Print",
            "carrier type is set, invoice can not be printed",
        ));
    }

    match data.carrier_type {
        CarrierType::None if !data.carrier_num.is_empty() => Err(ValidationError::new(
            "CarrierNum",
            "carrier type is empty, carrier number must be empty",
        )),
        CarrierType::Member if !data.carrier_num.is_empty() => Err(ValidationError::new(
            "CarrierNum",
            "carrier type is member, carrier number must be empty",
        )),
        CarrierType::Citizen if data.carrier_num.len() != CARRIER_CITIZEN_LENGTH => {
            Err(ValidationError::new(
                "CarrierNum",
                format!(
                    "carrier type is citizen, carrier number length must be {CARRIER_CITIZEN_LENGTH}"
                ),
            ))
        }
        CarrierType::Cellphone if data.carrier_num.len() != CARRIER_CELLPHONE_LENGTH => {
            Err(ValidationError::new(
                "CarrierNum",
                format!(
                    "carrier type is cellphone, carrier number length must be {CARRIER_CELLPHONE_LENGTH}"
                ),
            ))
        }
        CarrierType::None | CarrierType::Member | CarrierType::Citizen | CarrierType::Cellphone => {
            Ok(())
        }
    }
}

fn validate_items(items: &ItemCollection) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::new("Items", "invoice items empty"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Field-local checks shared by operation setters
// ---------------------------------------------------------------------------

/// Every operation carries a merchant id in both the envelope and the body.
pub fn validate_base_params(merchant_id: &str) -> Result<(), ValidationError> {
    require("MerchantID", merchant_id)
}

/// Fail with "`field` is empty" when `value` is empty.
pub fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(field, format!("{field} is empty")));
    }
    Ok(())
}

pub fn check_relate_number(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > RELATE_NUMBER_MAX_LENGTH {
        return Err(ValidationError::new(
            "RelateNumber",
            format!("RelateNumber cannot exceed {RELATE_NUMBER_MAX_LENGTH} characters"),
        ));
    }
    Ok(())
}

pub fn check_invoice_no(value: &str) -> Result<(), ValidationError> {
    check_exact_length("InvoiceNo", value, INVOICE_NO_LENGTH)
}

pub fn check_allowance_no(value: &str) -> Result<(), ValidationError> {
    check_exact_length("AllowanceNo", value, ALLOWANCE_NO_LENGTH)
}

pub fn check_love_code(value: &str) -> Result<(), ValidationError> {
    if !LOVE_CODE_LENGTH.contains(&value.len()) {
        return Err(ValidationError::new(
            "LoveCode",
            format!(
                "love code length must be between {} and {}",
                LOVE_CODE_LENGTH.start(),
                LOVE_CODE_LENGTH.end()
            ),
        ));
    }
    Ok(())
}

pub fn check_tsr(value: &str) -> Result<(), ValidationError> {
    check_bounded_length("Tsr", value, TSR_MAX_LENGTH)
}

pub fn check_pay_act(value: &str) -> Result<(), ValidationError> {
    check_bounded_length("PayAct", value, PAY_ACT_MAX_LENGTH)
}

pub fn check_delay_day(day: u32) -> Result<(), ValidationError> {
    if !DELAY_DAY_RANGE.contains(&day) {
        return Err(ValidationError::new(
            "DelayDay",
            format!(
                "delay day must be between {} and {}",
                DELAY_DAY_RANGE.start(),
                DELAY_DAY_RANGE.end()
            ),
        ));
    }
    Ok(())
}

pub fn check_phone(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.len() > PHONE_MAX_LENGTH {
        return Err(ValidationError::new(
            field,
            format!("phone number cannot exceed {PHONE_MAX_LENGTH} characters"),
        ));
    }
    Ok(())
}

/// Structural e-mail check: one `@`, non-empty local part, dotted domain, no whitespace.
pub fn check_email(field: &str, value: &str, max_length: usize) -> Result<(), ValidationError> {
    let well_formed = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && domain.split('.').all(|label| !label.is_empty())
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !well_formed {
        return Err(ValidationError::new(field, "invalid email format"));
    }
    if value.len() > max_length {
        return Err(ValidationError::new(
            field,
            format!("email cannot exceed {max_length} characters"),
        ));
    }
    Ok(())
}

/// Unified business number: exactly 8 ASCII digits.
pub fn check_unified_business_no(value: &str) -> Result<(), ValidationError> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::new(
            "UnifiedBusinessNo",
            "unified business number must be 8 digits",
        ));
    }
    Ok(())
}

/// Mobile barcode: `/` followed by 7 characters of `0-9 A-Z + - .`.
pub fn check_barcode(value: &str) -> Result<(), ValidationError> {
    let valid = value.len() == 8
        && value.starts_with('/')
        && value[1..]
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase() || matches!(b, b'+' | b'-' | b'.'));
    if !valid {
        return Err(ValidationError::new("BarCode", "mobile barcode format invalid"));
    }
    Ok(())
}

fn check_exact_length(field: &str, value: &str, length: usize) -> Result<(), ValidationError> {
    if value.len() != length {
        return Err(ValidationError::new(
            field,
            format!("{field} length should be {length}"),
        ));
    }
    Ok(())
}

fn check_bounded_length(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.is_empty() || value.len() > max {
        return Err(ValidationError::new(
            field,
            format!("{field} length must be between 1 and {max}"),
        ));
    }
    Ok(())
}
