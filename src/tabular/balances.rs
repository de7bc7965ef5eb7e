use std::collections::HashMap;
use std::io::Read;
use std::str::FromStr;

use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::core::{Party, SynthError};

/// Read headerless `name,balance` lines into a party list.
///
/// Malformed lines and non-positive balances are skipped with a warning. A
/// repeated name replaces the earlier balance but keeps its position.
pub fn read_balances<R: Read>(reader: R) -> Result<Vec<Party>, SynthError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut parties: Vec<Party> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(idx as u64 + 1, |p| p.line());

        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() != 2 {
            warn!(line, fields = record.len(), "skipping balance line without exactly two fields");
            continue;
        }
        let name = &record[0];
        if name.is_empty() {
            warn!(line, "skipping balance line with an empty party name");
            continue;
        }
        let balance = match Decimal::from_str(&record[1]) {
            Ok(balance) => balance,
            Err(e) => {
                warn!(line, value = &record[1], error = %e, "skipping balance that does not parse");
                continue;
            }
        };
        if balance <= Decimal::ZERO {
            warn!(line, party = name, balance = %balance, "skipping non-positive balance");
            continue;
        }

        match index.get(name) {
            Some(&pos) => {
                debug!(line, party = name, "duplicate party replaces earlier balance");
                parties[pos].remaining = balance;
            }
            None => {
                index.insert(name.to_string(), parties.len());
                parties.push(Party::new(name, balance));
            }
        }
    }

    if parties.is_empty() {
        return Err(SynthError::EmptyInput(
            "no valid party balances found".into(),
        ));
    }
    Ok(parties)
}
