use std::io::Write;

use csv::WriterBuilder;
use serde::Serialize;

use super::{format_date, format_money};
use crate::core::{PaymentRecord, SynthError};

#[derive(Serialize)]
struct PaymentRow<'a> {
    #[serde(rename = "Party Name")]
    party: &'a str,
    #[serde(rename = "Invoice No")]
    invoice_number: String,
    #[serde(rename = "Invoice Date")]
    invoice_date: String,
    #[serde(rename = "Invoice Amount")]
    invoice_amount: String,
    #[serde(rename = "Payment Date")]
    payment_date: String,
    #[serde(rename = "Payment Amount")]
    payment_amount: String,
}

/// Write the payment schedule as a CSV table with a header row.
pub fn write_payments<W: Write>(writer: W, records: &[PaymentRecord]) -> Result<(), SynthError> {
    let mut wrt = WriterBuilder::new().from_writer(writer);
    for r in records {
        wrt.serialize(PaymentRow {
            party: &r.party,
            invoice_number: r.invoice_number.to_string(),
            invoice_date: format_date(r.invoice_date),
            invoice_amount: format_money(r.invoice_amount),
            payment_date: format_date(r.payment_date),
            payment_amount: format_money(r.payment_amount),
        })?;
    }
    wrt.flush()?;
    Ok(())
}
