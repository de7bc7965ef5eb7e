use thiserror::Error;

/// Fatal errors that abort a generation or allocation run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// Run parameters violate an invariant (date order, rate bounds, ...).
    #[error("configuration error: {0}")]
    Config(String),

    /// No party has a balance large enough for a single invoice.
    #[error("no eligible parties: every balance is below the minimum invoice value")]
    NoEligibleParties,

    /// The scheduler finished without issuing a single invoice.
    #[error("no invoices could be generated")]
    NoInvoices,

    /// The allocator finished without emitting a single payment.
    #[error("no payment records generated")]
    NoPayments,

    /// The input source contained no usable rows.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Invoice number could not be parsed or sequenced.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// A random draw failed outside the per-invoice recovery path.
    #[error("draw failed: {0}")]
    Draw(#[from] InvoiceError),

    /// A receivable cannot be paid off within the allowed number of days.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// Input row could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// CSV reading or writing failed.
    #[cfg(feature = "csv")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Recoverable failure while building a single invoice.
///
/// The scheduler logs these and drops the party for the rest of the run;
/// they never abort generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// The drawn purchase rate rounded to zero or below.
    #[error("purchase rate {0} is not positive")]
    NonPositiveRate(String),

    /// A random draw was requested from a range with no representable value.
    #[error("empty range [{lo}, {hi}] at {dp} decimal places")]
    EmptyRange { lo: String, hi: String, dp: u32 },

    /// Decimal arithmetic overflowed or produced an unrepresentable value.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),
}
