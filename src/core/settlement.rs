//! Settlement resolution - a greedy plan for clearing a room's balances.
//!
//! `compute_settlements` is pure: it consumes balance rows and emits transfer
//! instructions, largest debts against largest credits first. The plan is
//! deterministic and short in practice, but greedy matching does not promise
//! a globally minimal transaction count.

use crate::{
    core::balance::{self, MemberBalance, SplitMode},
    core::room,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Balances closer to zero than this are treated as settled.
///
/// Currency rounding makes exact zeros rare; a remainder below one cent is
/// not worth a transfer.
pub const SETTLEMENT_EPSILON: f64 = 0.01;

/// A suggested transfer clearing part of a room's outstanding balances.
///
/// `from` and `to` are member display names, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementInstruction {
    /// Display name of the member who pays
    pub from: String,
    /// Display name of the member who receives
    pub to: String,
    /// Transfer amount, always positive
    pub amount: f64,
}

/// Computes a greedy settlement plan for a set of member balances.
///
/// Debtors (balance strictly negative) are matched against creditors
/// (strictly positive), most indebted against most owed first; each step
/// transfers `min(owed, credit)` and whichever side drops below
/// [`SETTLEMENT_EPSILON`] advances. Rows at exactly zero never appear in an
/// instruction, and sub-epsilon remainders are forgiven rather than
/// transferred, so a room where everyone is within a cent of even yields an
/// empty plan.
///
/// The sort is stable over rows in room member order, which fixes the
/// ordering among equal balances. Non-finite balances are tolerated: NaN
/// fails both strict sign tests and is left out.
#[must_use]
pub fn compute_settlements(balances: &[MemberBalance]) -> Vec<SettlementInstruction> {
    let mut debtors: Vec<(&str, f64)> = balances
        .iter()
        .filter(|b| b.balance < 0.0)
        .map(|b| (b.name.as_str(), b.balance))
        .collect();
    debtors.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut creditors: Vec<(&str, f64)> = balances
        .iter()
        .filter(|b| b.balance > 0.0)
        .map(|b| (b.name.as_str(), b.balance))
        .collect();
    creditors.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut instructions = Vec::new();
    let mut debtor_idx = 0;
    let mut creditor_idx = 0;

    while debtor_idx < debtors.len() && creditor_idx < creditors.len() {
        let owed = -debtors[debtor_idx].1;
        let credit = creditors[creditor_idx].1;

        if owed < SETTLEMENT_EPSILON {
            debtor_idx += 1;
            continue;
        }
        if credit < SETTLEMENT_EPSILON {
            creditor_idx += 1;
            continue;
        }

        let amount = owed.min(credit);
        instructions.push(SettlementInstruction {
            from: debtors[debtor_idx].0.to_string(),
            to: creditors[creditor_idx].0.to_string(),
            amount,
        });
        debtors[debtor_idx].1 += amount;
        creditors[creditor_idx].1 -= amount;
    }

    instructions
}

/// Loads a room, computes its balances, and resolves a settlement plan.
///
/// This is the one call most screens need.
pub async fn settle_room(
    db: &DatabaseConnection,
    room_id: i64,
    mode: SplitMode,
) -> Result<Vec<SettlementInstruction>> {
    let balances = balance::room_balances(db, room_id, mode).await?;
    Ok(compute_settlements(&balances))
}

/// Convenience wrapper resolving settlements from an already-loaded snapshot.
#[must_use]
pub fn settle_snapshot(
    snapshot: &room::RoomSnapshot,
    mode: SplitMode,
) -> Vec<SettlementInstruction> {
    compute_settlements(&balance::compute_balances(snapshot, mode))
}
