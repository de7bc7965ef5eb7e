//! Fiscal-year ordering of the invoice ledger.

use crate::core::{Invoice, InvoiceNumber, SynthError};

/// Order invoices by fiscal month (April first) and then by sequence.
///
/// The sort is stable, so invoices with equal keys keep their issue order.
pub fn sort_ledger(mut invoices: Vec<Invoice>) -> Vec<Invoice> {
    invoices.sort_by_key(|inv| inv.number.fiscal_key());
    invoices
}

/// Parse and order raw invoice numbers the same way as [`sort_ledger`].
///
/// Any number outside the `{MON}-{digits}` scheme is rejected.
pub fn sort_invoice_numbers<S: AsRef<str>>(
    numbers: &[S],
) -> Result<Vec<InvoiceNumber>, SynthError> {
    let mut parsed = numbers
        .iter()
        .map(|n| n.as_ref().parse::<InvoiceNumber>())
        .collect::<Result<Vec<_>, _>>()?;
    parsed.sort_by_key(InvoiceNumber::fiscal_key);
    Ok(parsed)
}
