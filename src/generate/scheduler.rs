use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::sequencer::{EngineContext, InvoiceSequencer};
use crate::core::random::{pick_index, round_half_up};
use crate::core::{Invoice, InvoiceConfig, Party, RandomSource, SynthError, normalize_party_name};

/// Bills parties in random order until every balance is exhausted.
#[derive(Debug, Clone, Copy)]
pub struct PartyScheduler<'a> {
    sequencer: InvoiceSequencer<'a>,
}

impl<'a> PartyScheduler<'a> {
    pub fn new(config: &'a InvoiceConfig) -> Self {
        Self {
            sequencer: InvoiceSequencer::new(config),
        }
    }

    /// Generate invoices for `parties` in issue order (unsorted).
    ///
    /// Each round picks one active party uniformly at random and asks the
    /// sequencer for one invoice. A party goes back into the pool only while
    /// its balance still covers the minimum invoice value; a party whose
    /// attempt fails is dropped for the rest of the run.
    pub fn run(
        &self,
        parties: Vec<Party>,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<Invoice>, SynthError> {
        let config = self.sequencer.config();
        config.validate()?;

        let mut active = self.eligible(parties);
        if active.is_empty() {
            return Err(SynthError::NoEligibleParties);
        }
        let party_count = active.len();

        let mut ctx = EngineContext::new(config);
        let mut invoices = Vec::new();

        while !active.is_empty() {
            let idx = pick_index(rng, active.len());
            let mut party = active.remove(idx);

            match self
                .sequencer
                .next_invoice(&mut ctx, rng, &party.name, party.remaining)
            {
                Ok(Some(invoice)) => {
                    debug!(
                        invoice = %invoice.number,
                        party = %party.name,
                        value = %invoice.value,
                        remaining = %invoice.remaining_balance,
                        "invoice issued"
                    );
                    party.remaining = invoice.remaining_balance;
                    invoices.push(invoice);
                    if party.remaining >= config.min_invoice_value {
                        active.push(party);
                    }
                }
                Ok(None) => {
                    debug!(party = %party.name, remaining = %party.remaining, "party exhausted");
                }
                Err(error) => {
                    warn!(party = %party.name, error = %error, "invoice attempt failed; dropping party");
                }
            }
        }

        if invoices.is_empty() {
            return Err(SynthError::NoInvoices);
        }
        info!(
            parties = party_count,
            invoices = invoices.len(),
            "invoice generation finished"
        );
        Ok(invoices)
    }

    fn eligible(&self, parties: Vec<Party>) -> Vec<Party> {
        eligible_parties(self.sequencer.config(), parties)
    }
}

/// Sum of the balances that will actually be billed.
pub fn billable_total(config: &InvoiceConfig, parties: &[Party]) -> Decimal {
    eligible_parties(config, parties.to_vec())
        .iter()
        .map(|p| p.remaining)
        .sum()
}

/// Parties as the scheduler bills them: named, rounded to cents, prefixed,
/// merged by final name and at least one minimum invoice.
///
/// Names that only differ by prefix spelling become one party; their
/// balances are added and the first position is kept.
fn eligible_parties(config: &InvoiceConfig, parties: Vec<Party>) -> Vec<Party> {
    let mut merged: Vec<Party> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for mut party in parties {
        if party.name.trim().is_empty() {
            warn!(balance = %party.remaining, "skipping party without a name");
            continue;
        }
        party.remaining = round_half_up(party.remaining, 2);
        if let Some(prefix) = &config.party_prefix {
            party.name = normalize_party_name(&party.name, prefix);
        }
        match index.get(&party.name) {
            Some(&pos) => {
                debug!(party = %party.name, balance = %party.remaining, "merging balance into existing party");
                merged[pos].remaining += party.remaining;
            }
            None => {
                index.insert(party.name.clone(), merged.len());
                merged.push(party);
            }
        }
    }

    merged.retain(|party| {
        let keep = party.remaining >= config.min_invoice_value;
        if !keep {
            debug!(
                party = %party.name,
                balance = %party.remaining,
                "balance below minimum invoice value"
            );
        }
        keep
    });
    merged
}
