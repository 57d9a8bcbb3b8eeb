use serde::{Deserialize, Serialize};

/// `Print`: whether a paper invoice is printed for the buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PrintMark {
    /// 0: not printed.
    #[default]
    #[serde(rename = "0")]
    No,
    /// 1: printed.
    #[serde(rename = "1")]
    Yes,
}

impl PrintMark {
    pub fn code(&self) -> &'static str {
        match self {
            Self::No => "0",
            Self::Yes => "1",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::No),
            "1" => Some(Self::Yes),
            _ => None,
        }
    }
}

/// `Donation`: whether the invoice is donated to a charity (see `LoveCode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Donation {
    /// 0: not donated.
    #[default]
    #[serde(rename = "0")]
    No,
    /// 1: donated.
    #[serde(rename = "1")]
    Yes,
}

impl Donation {
    pub fn code(&self) -> &'static str {
        match self {
            Self::No => "0",
            Self::Yes => "1",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::No),
            "1" => Some(Self::Yes),
            _ => None,
        }
    }
}

/// `CarrierType`: where an electronic invoice is stored instead of on paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CarrierType {
    /// Empty: no carrier.
    #[default]
    #[serde(rename = "")]
    None,
    /// 1: vendor member account.
    #[serde(rename = "1")]
    Member,
    /// 2: citizen digital certificate (16 characters).
    #[serde(rename = "2")]
    Citizen,
    /// 3: mobile barcode (8 characters).
    #[serde(rename = "3")]
    Cellphone,
}

impl CarrierType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Member => "1",
            Self::Citizen => "2",
            Self::Cellphone => "3",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "" => Some(Self::None),
            "1" => Some(Self::Member),
            "2" => Some(Self::Citizen),
            "3" => Some(Self::Cellphone),
            _ => None,
        }
    }
}

/// `ClearanceMark`: customs route for zero-rated (export) invoices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClearanceMark {
    /// 1: exported without passing customs.
    #[serde(rename = "1")]
    NotThroughCustoms,
    /// 2: exported through customs.
    #[serde(rename = "2")]
    ThroughCustoms,
}

impl ClearanceMark {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotThroughCustoms => "1",
            Self::ThroughCustoms => "2",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::NotThroughCustoms),
            "2" => Some(Self::ThroughCustoms),
            _ => None,
        }
    }
}

/// `TaxType`: invoice (or item) tax category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaxType {
    /// 1: taxable at the standard rate.
    #[default]
    #[serde(rename = "1")]
    Dutiable,
    /// 2: zero rated (exports, requires a clearance mark).
    #[serde(rename = "2")]
    Zero,
    /// 3: tax free.
    #[serde(rename = "3")]
    Free,
    /// 9: mixed; each item carries its own tax type.
    #[serde(rename = "9")]
    Mix,
}

impl TaxType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Dutiable => "1",
            Self::Zero => "2",
            Self::Free => "3",
            Self::Mix => "9",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Dutiable),
            "2" => Some(Self::Zero),
            "3" => Some(Self::Free),
            "9" => Some(Self::Mix),
            _ => None,
        }
    }
}

/// `SpecialTaxType`: special-rate industries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialTaxType {
    /// 1: bars and tea houses with hostess service.
    #[serde(rename = "1")]
    Bar,
    /// 2: nightclubs.
    #[serde(rename = "2")]
    Nightclub,
    /// 3: banking.
    #[serde(rename = "3")]
    Bank,
    /// 4: insurance.
    #[serde(rename = "4")]
    Insurance,
}

impl SpecialTaxType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Bar => "1",
            Self::Nightclub => "2",
            Self::Bank => "3",
            Self::Insurance => "4",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Bar),
            "2" => Some(Self::Nightclub),
            "3" => Some(Self::Bank),
            "4" => Some(Self::Insurance),
            _ => None,
        }
    }
}

/// `InvType`: invoice form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InvType {
    /// 07: general tax invoice.
    #[default]
    #[serde(rename = "07")]
    General,
    /// 08: special tax invoice.
    #[serde(rename = "08")]
    Special,
}

impl InvType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::General => "07",
            Self::Special => "08",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "07" => Some(Self::General),
            "08" => Some(Self::Special),
            _ => None,
        }
    }
}

/// `vat`: whether item prices include VAT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VatType {
    /// 0: prices exclude VAT.
    #[serde(rename = "0")]
    No,
    /// 1: prices include VAT.
    #[default]
    #[serde(rename = "1")]
    Yes,
}

impl VatType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::No => "0",
            Self::Yes => "1",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::No),
            "1" => Some(Self::Yes),
            _ => None,
        }
    }
}

/// `AllowanceNotify`: how the buyer is told about an allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AllowanceNotifyType {
    #[serde(rename = "S")]
    Sms,
    #[serde(rename = "E")]
    Email,
    /// A: both SMS and e-mail.
    #[serde(rename = "A")]
    All,
    #[default]
    #[serde(rename = "N")]
    None,
}

impl AllowanceNotifyType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sms => "S",
            Self::Email => "E",
            Self::All => "A",
            Self::None => "N",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(Self::Sms),
            "E" => Some(Self::Email),
            "A" => Some(Self::All),
            "N" => Some(Self::None),
            _ => None,
        }
    }
}

/// `Notify`: channel used by the notification operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotifyType {
    #[serde(rename = "S")]
    Sms,
    #[serde(rename = "E")]
    Email,
    #[serde(rename = "A")]
    All,
}

impl NotifyType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sms => "S",
            Self::Email => "E",
            Self::All => "A",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(Self::Sms),
            "E" => Some(Self::Email),
            "A" => Some(Self::All),
            _ => None,
        }
    }
}

/// `Notified`: who receives a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotifiedType {
    #[serde(rename = "C")]
    Customer,
    /// M: the merchant.
    #[serde(rename = "M")]
    Vendor,
    #[serde(rename = "A")]
    All,
}

impl NotifiedType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Customer => "C",
            Self::Vendor => "M",
            Self::All => "A",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "C" => Some(Self::Customer),
            "M" => Some(Self::Vendor),
            "A" => Some(Self::All),
            _ => None,
        }
    }
}

/// `InvoiceTag`: the event a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceTagType {
    /// I: invoice issued.
    #[serde(rename = "I")]
    Invoice,
    /// II: invoice voided.
    #[serde(rename = "II")]
    InvoiceVoid,
    /// A: allowance issued.
    #[serde(rename = "A")]
    Allowance,
    /// AI: allowance voided.
    #[serde(rename = "AI")]
    AllowanceVoid,
    /// AW: invoice won the lottery.
    #[serde(rename = "AW")]
    InvoiceWinning,
}

impl InvoiceTagType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invoice => "I",
            Self::InvoiceVoid => "II",
            Self::Allowance => "A",
            Self::AllowanceVoid => "AI",
            Self::InvoiceWinning => "AW",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "I" => Some(Self::Invoice),
            "II" => Some(Self::InvoiceVoid),
            "A" => Some(Self::Allowance),
            "AI" => Some(Self::AllowanceVoid),
            "AW" => Some(Self::InvoiceWinning),
            _ => None,
        }
    }

    /// Tags that refer to an allowance and therefore need an `AllowanceNo`.
    pub fn is_allowance(&self) -> bool {
        matches!(self, Self::Allowance | Self::AllowanceVoid)
    }
}

/// `DelayFlag`: delayed issuance mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DelayFlag {
    /// 1: issue automatically after `DelayDay` days.
    #[serde(rename = "1")]
    Delay,
    /// 2: wait for an explicit trigger carrying the `Tsr`.
    #[serde(rename = "2")]
    Trigger,
}

impl DelayFlag {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Delay => "1",
            Self::Trigger => "2",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Delay),
            "2" => Some(Self::Trigger),
            _ => None,
        }
    }
}

/// `PayType`: who collected the payment for a triggered issuance.
/// The vendor currently accepts only its own collection service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PayType {
    /// 2: collected by the vendor.
    #[default]
    #[serde(rename = "2")]
    Vendor,
}

impl PayType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Vendor => "2",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "2" => Some(Self::Vendor),
            _ => None,
        }
    }
}

/// `SearchType`: how allowances are looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AllowanceSearchType {
    /// 0: by allowance number.
    #[default]
    #[serde(rename = "0")]
    ByAllowanceNo,
    /// 1: by invoice number and invoice date.
    #[serde(rename = "1")]
    ByInvoiceDate,
    /// 2: by invoice number and allowance date.
    #[serde(rename = "2")]
    ByAllowanceDate,
}

impl AllowanceSearchType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ByAllowanceNo => "0",
            Self::ByInvoiceDate => "1",
            Self::ByAllowanceDate => "2",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::ByAllowanceNo),
            "1" => Some(Self::ByInvoiceDate),
            "2" => Some(Self::ByAllowanceDate),
            _ => None,
        }
    }
}

/// `Format`: response format of the issued-invoice listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ListFormat {
    #[default]
    #[serde(rename = "1")]
    Json,
    #[serde(rename = "2")]
    Csv,
}

impl ListFormat {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Json => "1",
            Self::Csv => "2",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Json),
            "2" => Some(Self::Csv),
            _ => None,
        }
    }
}
