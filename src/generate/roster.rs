//! Synthetic party rosters.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::info;

use crate::core::random::{pick_index, uniform_decimal};
use crate::core::{InvoiceError, Party, RandomSource, RosterConfig, SynthError};

const NAME_STEMS: &[&str] = &[
    "Shree Ganesh",
    "Lakshmi",
    "Balaji",
    "Sai Krishna",
    "Annapurna",
    "Venkateswara",
    "Durga",
    "Kaveri",
    "Godavari",
    "Sri Rama",
    "Mahalakshmi",
    "Nandi",
    "Vijaya",
    "Srinivasa",
    "Padmavathi",
    "Tirumala",
];

const NAME_TRADES: &[&str] = &[
    "Traders",
    "Rice Mill",
    "Agro Industries",
    "Enterprises",
    "Grain Merchants",
    "Agencies",
    "Commodities",
    "Food Products",
];

/// Split `config.total` into party balances of at most `config.party_limit`.
///
/// Balances are whole amounts of at least `min_balance`; whatever is left
/// once less than `min_balance` remains is not assigned to anyone.
pub fn generate_roster(
    config: &RosterConfig,
    min_balance: Decimal,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Party>, SynthError> {
    config.validate()?;
    if config.party_limit < min_balance {
        return Err(SynthError::NoEligibleParties);
    }

    let mut remaining = config.total;
    let mut used = HashSet::new();
    let mut parties = Vec::new();

    while remaining >= min_balance {
        let hi = config.party_limit.min(remaining);
        let balance = match uniform_decimal(rng, min_balance, hi, 0) {
            Ok(balance) => balance,
            Err(InvoiceError::EmptyRange { .. }) => uniform_decimal(rng, min_balance, hi, 2)?,
            Err(e) => return Err(e.into()),
        };
        remaining -= balance;
        parties.push(Party::new(unique_name(rng, &mut used), balance));
    }

    if parties.is_empty() {
        return Err(SynthError::NoEligibleParties);
    }
    info!(
        parties = parties.len(),
        unassigned = %remaining,
        "synthetic roster generated"
    );
    Ok(parties)
}

fn unique_name(rng: &mut dyn RandomSource, used: &mut HashSet<String>) -> String {
    let base = format!(
        "{} {}",
        NAME_STEMS[pick_index(rng, NAME_STEMS.len())],
        NAME_TRADES[pick_index(rng, NAME_TRADES.len())]
    );
    let mut name = base.clone();
    let mut n = 2;
    while used.contains(&name) {
        name = format!("{base} {n}");
        n += 1;
    }
    used.insert(name.clone());
    name
}
