//! Invoice data model
//!
//! `InvoiceRecord` mirrors the flat row the invoice store hands out.
//! `InvoiceDocument` is the normalised shape the renderer lays out.

use chrono::NaiveDate;
use invoice_text::{due_date, parse_date, Currency};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::Result;

/// Half a cent: stored totals closer than this to the line amount match
const TOTAL_TOLERANCE: f64 = 0.005;

/// Sender or recipient of an invoice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Party {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl Party {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn address(&self) -> &str {
        self.address.as_deref().unwrap_or("")
    }

    /// Email, if one was given and is not blank
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }
}

/// The single billed line of an invoice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub quantity: f64,
    #[serde(alias = "rate", deserialize_with = "lenient_f64")]
    pub unit_rate: f64,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: f64, unit_rate: f64) -> Self {
        Self {
            description: Some(description.into()),
            quantity,
            unit_rate,
        }
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Line amount, always recomputed from quantity and rate
    pub fn amount(&self) -> f64 {
        self.quantity * self.unit_rate
    }
}

/// Tax shown in the totals block; both fields default to zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tax {
    #[serde(deserialize_with = "lenient_f64")]
    pub percentage: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub amount: f64,
}

impl Tax {
    /// The tax row is only shown for a positive percentage
    pub fn is_shown(&self) -> bool {
        self.percentage > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    /// Case-insensitive lookup of a stored status
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Some(InvoiceStatus::Pending),
            "PAID" => Some(InvoiceStatus::Paid),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "PENDING",
            InvoiceStatus::Paid => "PAID",
        }
    }
}

/// Normalised invoice, immutable for the duration of one render
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceDocument {
    #[serde(deserialize_with = "lenient_string")]
    pub invoice_number: String,
    #[serde(deserialize_with = "lenient_string")]
    pub invoice_name: String,
    /// Raw issue date; rendered empty when it does not parse
    pub issue_date: Option<String>,
    #[serde(deserialize_with = "lenient_days")]
    pub due_date_offset_days: u32,
    pub from: Party,
    pub to: Party,
    /// Exactly one line item per invoice
    pub line_items: [LineItem; 1],
    #[serde(with = "currency_code")]
    pub currency: Currency,
    #[serde(deserialize_with = "lenient_f64")]
    pub total: f64,
    pub tax: Option<Tax>,
    pub note: Option<String>,
    pub status: Option<InvoiceStatus>,
}

impl InvoiceDocument {
    /// Parse a normalised document from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn line_item(&self) -> &LineItem {
        let [item] = &self.line_items;
        item
    }

    pub fn issue_date(&self) -> Option<NaiveDate> {
        self.issue_date.as_deref().and_then(parse_date)
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.issue_date()
            .and_then(|issue| due_date(issue, self.due_date_offset_days))
    }

    pub fn tax(&self) -> Tax {
        self.tax.unwrap_or_default()
    }

    /// Stored total minus the tax amount
    pub fn sub_total(&self) -> f64 {
        self.total - self.tax().amount
    }

    /// Note text, if it has anything besides whitespace
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref().filter(|n| !n.trim().is_empty())
    }

    /// Difference between the stored total and the recomputed line amount
    ///
    /// Returns `None` when they agree to within half a cent.
    pub fn total_mismatch(&self) -> Option<f64> {
        let computed: f64 = self.line_items.iter().map(LineItem::amount).sum();
        let expected = computed + self.tax().amount;
        let diff = self.total - expected;
        (diff.abs() > TOTAL_TOLERANCE).then_some(diff)
    }

    /// `Invoice-<number>.pdf`, without characters that would break a header value
    pub fn file_name(&self) -> String {
        let number: String = self
            .invoice_number
            .trim()
            .chars()
            .filter(|c| !c.is_control() && !matches!(c, '"' | '\\' | '/'))
            .collect();
        format!("Invoice-{number}.pdf")
    }
}

/// Flat invoice row as stored (camelCase keys)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub invoice_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub invoice_number: String,
    pub currency: Option<String>,
    pub from_name: Option<String>,
    pub from_email: Option<String>,
    pub from_address: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_address: Option<String>,
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_days")]
    pub due_date: u32,
    pub invoice_item_description: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub invoice_item_quantity: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub invoice_item_rate: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub total: f64,
    pub note: Option<String>,
    pub status: Option<String>,
}

impl InvoiceRecord {
    /// Parse a stored row from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<InvoiceRecord> for InvoiceDocument {
    fn from(record: InvoiceRecord) -> Self {
        let currency = Currency::from_code(record.currency.as_deref().unwrap_or(""));

        let status = record.status.as_deref().and_then(|code| {
            let status = InvoiceStatus::from_code(code);
            if status.is_none() && !code.trim().is_empty() {
                warn!("Invoice {}: unknown status {:?}", record.invoice_number, code);
            }
            status
        });

        InvoiceDocument {
            invoice_number: record.invoice_number,
            invoice_name: record.invoice_name,
            issue_date: record.date,
            due_date_offset_days: record.due_date,
            from: Party {
                name: record.from_name,
                email: record.from_email,
                address: record.from_address,
            },
            to: Party {
                name: record.client_name,
                email: record.client_email,
                address: record.client_address,
            },
            line_items: [LineItem {
                description: record.invoice_item_description,
                quantity: record.invoice_item_quantity,
                unit_rate: record.invoice_item_rate,
            }],
            currency,
            total: record.total,
            tax: None,
            note: record.note,
            status,
        }
    }
}

/// Numbers, numeric strings, `""` and `null` all load; anything else is 0
fn number_from_value(value: &Value) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite()).unwrap_or(0.0)
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(number_from_value).unwrap_or(0.0))
}

/// Day offsets are whole and non-negative
fn lenient_days<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let days = lenient_f64(deserializer)?;
    Ok(if days > 0.0 { days as u32 } else { 0 })
}

/// Accept a string or a number (invoice numbers are stored as integers)
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

mod currency_code {
    use invoice_text::Currency;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(currency: &Currency, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(currency.code())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Currency, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = Option::<String>::deserialize(deserializer)?;
        Ok(Currency::from_code(code.as_deref().unwrap_or("")))
    }
}
