//! Balance derivation - each member's net position in a split room.
//!
//! `compute_balances` is a pure function over a [`RoomSnapshot`]: no I/O, no
//! caching, recomputed fresh on every call. It never fails; structurally odd
//! rooms (no members, no expenses, dangling member ids left behind by
//! removals) degrade to well-defined results instead of errors.

use crate::{
    core::room::{self, RoomSnapshot},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;

/// How a room's expenses are divided among members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitMode {
    /// Every expense is shared equally by all current room members, as a
    /// single room-wide average over the expense total.
    #[default]
    WholeRoom,
    /// Each expense is shared equally by its recorded participant set; the
    /// payer is credited the full amount. Expenses stored without
    /// participants fall back to whole-room division.
    PerExpense,
}

/// One member's net position in a room.
///
/// `balance` positive means the room owes the member money, negative means
/// the member owes the room, zero means settled.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberBalance {
    /// The member's id
    pub member_id: i64,
    /// The member's display name, carried for presentation
    pub name: String,
    /// Total this member paid out of pocket
    pub paid: f64,
    /// Net position: `paid` minus the member's share of the costs
    pub balance: f64,
}

/// Computes per-member balances for a room snapshot.
///
/// Returns one row per current member, in room member order. Expenses whose
/// payer id no longer matches a member still count toward what the room
/// consumed, but their payment is credited to nobody; shares recorded
/// against removed participants are likewise dropped. Such rooms no longer
/// sum to zero, which is the honest answer rather than a redistribution.
#[must_use]
pub fn compute_balances(snapshot: &RoomSnapshot, mode: SplitMode) -> Vec<MemberBalance> {
    match mode {
        SplitMode::WholeRoom => whole_room_balances(snapshot),
        SplitMode::PerExpense => per_expense_balances(snapshot),
    }
}

fn whole_room_balances(snapshot: &RoomSnapshot) -> Vec<MemberBalance> {
    let total: f64 = snapshot.expenses.iter().map(|e| e.amount).sum();
    // Member counts are tiny; the cast cannot lose precision in practice.
    #[allow(clippy::cast_precision_loss)]
    let fair_share = total / snapshot.members.len().max(1) as f64;

    snapshot
        .members
        .iter()
        .map(|member| {
            let paid: f64 = snapshot
                .expenses
                .iter()
                .filter(|e| e.payer_member_id == member.id)
                .map(|e| e.amount)
                .sum();
            MemberBalance {
                member_id: member.id,
                name: member.name.clone(),
                paid,
                balance: paid - fair_share,
            }
        })
        .collect()
}

fn per_expense_balances(snapshot: &RoomSnapshot) -> Vec<MemberBalance> {
    let mut participants_by_expense: HashMap<i64, Vec<i64>> = HashMap::new();
    for row in &snapshot.participants {
        participants_by_expense
            .entry(row.expense_id)
            .or_default()
            .push(row.member_id);
    }

    let mut paid: HashMap<i64, f64> = HashMap::new();
    let mut owed: HashMap<i64, f64> = HashMap::new();
    let member_count = snapshot.members.len().max(1);

    for expense in &snapshot.expenses {
        *paid.entry(expense.payer_member_id).or_insert(0.0) += expense.amount;

        match participants_by_expense.get(&expense.id) {
            Some(ids) if !ids.is_empty() => {
                // The divisor is the recorded participant count, so a share
                // attributed to a removed member vanishes instead of being
                // redistributed across the survivors.
                #[allow(clippy::cast_precision_loss)]
                let share = expense.amount / ids.len() as f64;
                for id in ids {
                    *owed.entry(*id).or_insert(0.0) += share;
                }
            }
            _ => {
                #[allow(clippy::cast_precision_loss)]
                let share = expense.amount / member_count as f64;
                for member in &snapshot.members {
                    *owed.entry(member.id).or_insert(0.0) += share;
                }
            }
        }
    }

    // Rows are emitted for current members only; accumulated entries keyed
    // by dangling ids drop out here.
    snapshot
        .members
        .iter()
        .map(|member| {
            let paid_amount = paid.get(&member.id).copied().unwrap_or(0.0);
            let owed_amount = owed.get(&member.id).copied().unwrap_or(0.0);
            MemberBalance {
                member_id: member.id,
                name: member.name.clone(),
                paid: paid_amount,
                balance: paid_amount - owed_amount,
            }
        })
        .collect()
}

/// Loads a room snapshot and computes its balances.
pub async fn room_balances(
    db: &DatabaseConnection,
    room_id: i64,
    mode: SplitMode,
) -> Result<Vec<MemberBalance>> {
    let snapshot = room::load_room_snapshot(db, room_id).await?;
    Ok(compute_balances(&snapshot, mode))
}
