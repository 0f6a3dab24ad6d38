//! Settlement calculation - who should pay whom to zero every balance.
//!
//! Players are sorted by ascending balance once, split into a debtor queue and a creditor
//! queue, and the front of each queue is matched greedily until one queue runs dry. The
//! queues are not re-sorted while balances shrink.
//!
//! This keeps the number of transfers low for the balance spreads a small table produces,
//! but it is not guaranteed to find the minimum transfer count for every distribution.

use crate::core::game::Player;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Balances closer to zero than this count as settled.
///
/// Well below any real amount, so it only absorbs floating-point noise. A sub-cent balance
/// is still a debt and still gets a transfer; rounding to cents is left to display code.
pub const EPSILON: f64 = 1e-9;

/// One suggested payment. Derived on demand, never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDebt {
    /// Player who pays
    pub from_player_id: String,
    /// Player who gets paid
    pub to_player_id: String,
    /// Positive amount to transfer
    pub amount: f64,
}

/// Whether a balance is zero up to floating-point noise.
#[must_use]
pub fn is_settled(balance: f64) -> bool {
    balance.abs() < EPSILON
}

/// Whether nobody owes anybody anything.
#[must_use]
pub fn all_settled(players: &[Player]) -> bool {
    players.iter().all(|p| is_settled(p.balance))
}

/// Computes the transfers that bring every balance back to zero.
///
/// The input is only read; the greedy loop works on its own copy of the balances. Balances
/// are expected to net to zero overall; that is not re-checked here.
#[must_use]
pub fn compute_settlement(players: &[Player]) -> Vec<PlayerDebt> {
    let mut sorted: Vec<(&str, f64)> = players
        .iter()
        .map(|p| (p.id.as_str(), p.balance))
        .collect();
    sorted.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut debtors: VecDeque<(&str, f64)> = sorted
        .iter()
        .copied()
        .filter(|(_, balance)| *balance <= -EPSILON)
        .collect();
    let mut creditors: VecDeque<(&str, f64)> = sorted
        .iter()
        .copied()
        .filter(|(_, balance)| *balance >= EPSILON)
        .collect();

    let mut debts = Vec::new();

    loop {
        let (Some(debtor), Some(creditor)) = (debtors.front_mut(), creditors.front_mut()) else {
            break;
        };
        let settle_amount = debtor.1.abs().min(creditor.1);

        if settle_amount >= EPSILON {
            debts.push(PlayerDebt {
                from_player_id: debtor.0.to_string(),
                to_player_id: creditor.0.to_string(),
                amount: settle_amount,
            });
        }

        debtor.1 += settle_amount;
        creditor.1 -= settle_amount;

        let debtor_done = debtor.1 > -EPSILON;
        let creditor_done = creditor.1 < EPSILON;

        if debtor_done {
            debtors.pop_front();
        }
        if creditor_done {
            creditors.pop_front();
        }
    }

    debts
}
