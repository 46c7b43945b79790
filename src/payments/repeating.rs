use log::{info, warn};
use std::collections::BTreeMap;

use crate::loan::EarlyPayment;
use crate::types::RepeatingStrategy;

/// resolve repeating early payment declarations into one payment per number
///
/// Single payments are kept as they are. Of the repeating declarations only
/// the first one (by ascending payment number) is expanded; the rest are
/// dropped, since overlapping repeat ranges contradict each other. Expanded
/// entries take precedence over single payments on the same number.
///
/// Every number in the result is below `term`: single payments past the end
/// of the loan are dropped and repeat ranges stop at the term.
pub fn expand_early_payments(raw: &BTreeMap<u32, EarlyPayment>, term: u32) -> BTreeMap<u32, EarlyPayment> {
    let mut resolved = BTreeMap::new();
    for (&number, payment) in raw.iter().filter(|(_, payment)| payment.repeating_strategy.is_single()) {
        if number < term {
            resolved.insert(number, payment.clone());
        } else {
            warn!("ignoring early payment at {}: the loan ends after {} payments", number, term);
        }
    }

    let mut repeating = raw
        .iter()
        .filter(|(_, payment)| !payment.repeating_strategy.is_single());

    if let Some((&start, payment)) = repeating.next() {
        info!(
            "repeating early payment {} from payment {} with {:?}",
            payment.amount, start, payment.repeating_strategy
        );
        resolved.extend(repeated(payment, start, term));
    }

    for (number, payment) in repeating {
        warn!(
            "ignoring repeating early payment at {} ({:?}): only the first repeating declaration is expanded",
            number, payment.repeating_strategy
        );
    }

    info!("early payments after applying repeating strategy: {:?}", resolved);
    resolved
}

/// copies of `payment` for every number its repeating strategy covers, never
/// past the end of the term
pub fn repeated(payment: &EarlyPayment, start: u32, term: u32) -> BTreeMap<u32, EarlyPayment> {
    match payment.repeating_strategy {
        RepeatingStrategy::Single => BTreeMap::new(),
        RepeatingStrategy::ToEnd => repeat(payment, start, term),
        RepeatingStrategy::ToCertainMonth { repeat_to_month } => {
            if repeat_to_month <= start {
                warn!(
                    "repeat_to_month {} is not after payment {}, nothing to repeat",
                    repeat_to_month, start
                );
            } else if repeat_to_month > term {
                warn!("repeat_to_month {} is past the term of {}, stopping at the term", repeat_to_month, term);
            }
            repeat(payment, start, repeat_to_month.min(term))
        }
    }
}

fn repeat(payment: &EarlyPayment, from: u32, to: u32) -> BTreeMap<u32, EarlyPayment> {
    (from..to).map(|number| (number, payment.as_single())).collect()
}
