use std::io::{Read, Write};
use std::str::FromStr;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{format_date, format_money, parse_date};
use crate::core::{Invoice, InvoiceNumber, Receivable, SynthError};

#[derive(Serialize)]
struct InvoiceRow<'a> {
    #[serde(rename = "Invoice Date")]
    date: String,
    #[serde(rename = "Invoice No")]
    number: String,
    #[serde(rename = "Party Name")]
    party: &'a str,
    #[serde(rename = "Product")]
    product: &'a str,
    #[serde(rename = "Quantity")]
    quantity: u64,
    #[serde(rename = "Purchase Rate")]
    purchase_rate: String,
    #[serde(rename = "Invoice Value")]
    value: String,
    #[serde(rename = "Sale Rate")]
    sale_rate: String,
    #[serde(rename = "Margin (%)")]
    margin_pct: String,
    #[serde(rename = "Balance Remaining")]
    remaining_balance: String,
}

impl<'a> From<&'a Invoice> for InvoiceRow<'a> {
    fn from(inv: &'a Invoice) -> Self {
        Self {
            date: format_date(inv.date),
            number: inv.number.to_string(),
            party: &inv.party,
            product: &inv.product,
            quantity: inv.quantity,
            purchase_rate: format_money(inv.purchase_rate),
            value: format_money(inv.value),
            sale_rate: format_money(inv.sale_rate),
            margin_pct: format_money(inv.margin_pct),
            remaining_balance: format_money(inv.remaining_balance),
        }
    }
}

/// Write the ledger as a CSV table with a header row.
pub fn write_invoices<W: Write>(writer: W, invoices: &[Invoice]) -> Result<(), SynthError> {
    let mut wrt = WriterBuilder::new().from_writer(writer);
    for inv in invoices {
        wrt.serialize(InvoiceRow::from(inv))?;
    }
    wrt.flush()?;
    Ok(())
}

/// Receivable columns of an invoice table. Everything else is ignored.
#[derive(Deserialize)]
struct ReceivableRow {
    #[serde(rename = "Invoice Date", default)]
    date: Option<String>,
    #[serde(rename = "Invoice No", default)]
    number: Option<String>,
    #[serde(rename = "Party Name", default)]
    party: Option<String>,
    #[serde(rename = "Invoice Value", default)]
    value: Option<String>,
}

/// Read an invoice table into receivables.
///
/// Rows whose `Invoice Date` is not a date (totals, notes) are skipped. Any
/// other malformed field is an error naming the line.
pub fn read_receivables<R: Read>(reader: R) -> Result<Vec<Receivable>, SynthError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    for column in ["Invoice Date", "Invoice No", "Party Name", "Invoice Value"] {
        if !headers.iter().any(|h| h == column) {
            return Err(SynthError::Parse(format!("missing column '{column}'")));
        }
    }

    let mut receivables = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(idx as u64 + 2, |p| p.line());
        let row: ReceivableRow = record.deserialize(Some(&headers))?;

        let Some(date) = row.date.as_deref().and_then(parse_date) else {
            warn!(line, value = row.date.as_deref().unwrap_or(""), "skipping row without an invoice date");
            continue;
        };
        let number = InvoiceNumber::from_str(required(&row.number, "Invoice No", line)?)?;
        let party = required(&row.party, "Party Name", line)?.to_string();
        let value = required(&row.value, "Invoice Value", line)?;
        let amount = Decimal::from_str(value)
            .map_err(|e| SynthError::Parse(format!("line {line}: invoice value '{value}': {e}")))?;

        receivables.push(Receivable {
            party,
            number,
            date,
            amount,
        });
    }

    if receivables.is_empty() {
        return Err(SynthError::EmptyInput("no invoice rows found".into()));
    }
    Ok(receivables)
}

fn required<'a>(field: &'a Option<String>, column: &str, line: u64) -> Result<&'a str, SynthError> {
    match field.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(SynthError::Parse(format!("line {line}: '{column}' is empty"))),
    }
}
