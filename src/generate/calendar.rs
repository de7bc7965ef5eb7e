//! Invoice date cursor.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};

use crate::core::{DateStrategy, InvoiceConfig, RandomSource};

/// Invoices a mid-month day (5th to 25th) can absorb in the weighted pool.
const MID_MONTH_WEIGHT: u32 = 3;
/// Invoices any other day can absorb in the weighted pool.
const EDGE_WEIGHT: u32 = 1;

/// Run-wide date cursor. Dates it proposes never decrease and never leave
/// `[start_date, end_date]`.
///
/// Proposal and commit are split so that an invoice attempt that fails
/// after picking its date leaves the cursor untouched.
#[derive(Debug, Clone)]
pub struct Calendar {
    cursor: NaiveDate,
    end: NaiveDate,
    mode: Mode,
}

#[derive(Debug, Clone)]
enum Mode {
    Stepped { max_step: u32 },
    Pool { slots: BTreeMap<NaiveDate, u32> },
}

impl Calendar {
    pub fn new(config: &InvoiceConfig) -> Self {
        let mode = match config.date_strategy {
            DateStrategy::Stepped { max_step } => Mode::Stepped {
                max_step: max_step.max(1),
            },
            DateStrategy::WeightedPool => Mode::Pool {
                slots: build_pool(config.start_date, config.end_date),
            },
        };
        Self {
            cursor: config.start_date,
            end: config.end_date,
            mode,
        }
    }

    /// Date of the most recently committed invoice (start date before any).
    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    /// Pick the date for the next invoice without consuming it.
    pub fn propose(&self, rng: &mut dyn RandomSource) -> NaiveDate {
        match &self.mode {
            Mode::Stepped { max_step } => {
                let step = rng.int_inclusive(1, i64::from(*max_step)) as u64;
                self.cursor
                    .checked_add_days(Days::new(step))
                    .map_or(self.end, |next| next.min(self.end))
            }
            Mode::Pool { slots } => slots
                .range(self.cursor..)
                .next()
                .map_or(self.end, |(date, _)| *date),
        }
    }

    /// Move the cursor to `date`, consuming one pool slot if applicable.
    pub fn commit(&mut self, date: NaiveDate) {
        if let Mode::Pool { slots } = &mut self.mode {
            if let Some(left) = slots.get_mut(&date) {
                *left -= 1;
                if *left == 0 {
                    slots.remove(&date);
                }
            }
        }
        self.cursor = self.cursor.max(date);
    }
}

fn build_pool(start: NaiveDate, end: NaiveDate) -> BTreeMap<NaiveDate, u32> {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|d| {
            let weight = if (5..=25).contains(&d.day()) {
                MID_MONTH_WEIGHT
            } else {
                EDGE_WEIGHT
            };
            (d, weight)
        })
        .collect()
}
