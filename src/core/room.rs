//! Split room business logic - rooms, their members, and shared expenses.
//!
//! A room exclusively owns its members and split expenses. Members are
//! referenced by id everywhere; display names are presentation data and may
//! repeat within a room. Expense attribution is deliberately permissive:
//! recording an expense does not check that the payer or participant ids
//! belong to the room, and removing a member does not touch the expenses
//! that reference them. Balance computation is where dangling ids get
//! resolved (by ignoring them), not here.

use crate::{
    entities::{
        ExpenseParticipant, RoomMember, SplitExpense, SplitRoom, expense_participant,
        room_member, split_expense, split_room,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Everything needed to record a shared expense in a room.
#[derive(Debug, Clone)]
pub struct NewSplitExpense {
    /// Short description of what was paid for
    pub title: String,
    /// Amount paid
    pub amount: f64,
    /// Member id of whoever fronted the money
    pub payer_member_id: i64,
    /// Member ids the expense is split among; empty means the whole room
    pub participant_member_ids: Vec<i64>,
    /// When the expense occurred
    pub date: DateTimeUtc,
    /// Free-form notes
    pub notes: String,
}

/// A consistent read of one room and everything recorded in it.
///
/// Balance and settlement computations run over an owned snapshot, so writes
/// that land after the load cannot shift the numbers mid-computation.
#[derive(Debug, Clone)]
pub struct RoomSnapshot {
    /// The room itself
    pub room: split_room::Model,
    /// Members in insertion order
    pub members: Vec<room_member::Model>,
    /// Split expenses in insertion order
    pub expenses: Vec<split_expense::Model>,
    /// Participant rows for every expense in the room
    pub participants: Vec<expense_participant::Model>,
}

/// Headline figures for a room card or detail header.
#[derive(Debug, Clone)]
pub struct RoomSummary {
    /// The room itself
    pub room: split_room::Model,
    /// Number of current members
    pub member_count: usize,
    /// Number of recorded split expenses
    pub expense_count: usize,
    /// Sum of all split expense amounts
    pub total_spent: f64,
    /// Equal whole-room share: `total_spent / max(1, member_count)`
    pub share_per_member: f64,
}

/// Creates a room together with its initial members in one database transaction.
///
/// The room name and every member name must be non-empty after trimming.
/// Members are created with empty contact fields; use [`add_member`] when
/// phone or email is known.
pub async fn create_room(
    db: &DatabaseConnection,
    name: String,
    member_names: Vec<String>,
) -> Result<(split_room::Model, Vec<room_member::Model>)> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Room name cannot be empty".to_string(),
        });
    }

    if member_names.iter().any(|n| n.trim().is_empty()) {
        return Err(Error::Config {
            message: "Member name cannot be empty".to_string(),
        });
    }

    let txn = db.begin().await?;

    let room = split_room::ActiveModel {
        name: Set(name.trim().to_string()),
        created_date: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut members = Vec::with_capacity(member_names.len());
    for member_name in member_names {
        let member = room_member::ActiveModel {
            room_id: Set(room.id),
            name: Set(member_name.trim().to_string()),
            phone_number: Set(String::new()),
            email: Set(String::new()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        members.push(member);
    }

    txn.commit().await?;

    info!(
        "Created room {} '{}' with {} members",
        room.id,
        room.name,
        members.len()
    );
    Ok((room, members))
}

/// Appends a member to an existing room.
///
/// Display names may repeat within a room: the member id, not the name, is
/// what expenses reference.
pub async fn add_member(
    db: &DatabaseConnection,
    room_id: i64,
    name: String,
    phone_number: String,
    email: String,
) -> Result<room_member::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Member name cannot be empty".to_string(),
        });
    }

    SplitRoom::find_by_id(room_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::RoomNotFound {
            name: room_id.to_string(),
        })?;

    let member = room_member::ActiveModel {
        room_id: Set(room_id),
        name: Set(name.trim().to_string()),
        phone_number: Set(phone_number),
        email: Set(email),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Added member {} '{}' to room {}", member.id, member.name, room_id);
    Ok(member)
}

/// Removes a member from a room.
///
/// Only the member row is deleted. Split expenses keep their recorded payer
/// and participant ids, which from this point on dangle; balances simply
/// stop attributing money to the removed member.
pub async fn remove_member(db: &DatabaseConnection, room_id: i64, member_id: i64) -> Result<()> {
    let member = RoomMember::find_by_id(member_id)
        .one(db)
        .await?
        .filter(|m| m.room_id == room_id)
        .ok_or_else(|| Error::MemberNotFound {
            name: member_id.to_string(),
        })?;

    member.delete(db).await?;

    info!("Removed member {member_id} from room {room_id}");
    Ok(())
}

/// Records a shared expense and its participant rows in one database transaction.
///
/// The title must be non-empty and the amount finite. The payer and
/// participant ids are stored exactly as given, without checking that they
/// reference current members of the room.
pub async fn add_expense(
    db: &DatabaseConnection,
    room_id: i64,
    new_expense: NewSplitExpense,
) -> Result<split_expense::Model> {
    if new_expense.title.trim().is_empty() {
        return Err(Error::Config {
            message: "Expense title cannot be empty".to_string(),
        });
    }

    if !new_expense.amount.is_finite() {
        return Err(Error::InvalidAmount {
            amount: new_expense.amount,
        });
    }

    let txn = db.begin().await?;

    SplitRoom::find_by_id(room_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::RoomNotFound {
            name: room_id.to_string(),
        })?;

    let expense = split_expense::ActiveModel {
        room_id: Set(room_id),
        title: Set(new_expense.title.trim().to_string()),
        amount: Set(new_expense.amount),
        payer_member_id: Set(new_expense.payer_member_id),
        date: Set(new_expense.date),
        notes: Set(new_expense.notes),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for member_id in &new_expense.participant_member_ids {
        expense_participant::ActiveModel {
            expense_id: Set(expense.id),
            member_id: Set(*member_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    info!(
        "Recorded expense {} '{}' ({}) in room {}",
        expense.id, expense.title, expense.amount, room_id
    );
    Ok(expense)
}

/// Deletes a split expense together with its participant rows.
pub async fn remove_expense(db: &DatabaseConnection, expense_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let expense = SplitExpense::find_by_id(expense_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::ExpenseNotFound {
            name: expense_id.to_string(),
        })?;

    ExpenseParticipant::delete_many()
        .filter(expense_participant::Column::ExpenseId.eq(expense_id))
        .exec(&txn)
        .await?;
    expense.delete(&txn).await?;

    txn.commit().await?;

    info!("Removed expense {expense_id}");
    Ok(())
}

/// Finds a room by its unique ID, returning None if it does not exist.
pub async fn get_room_by_id(
    db: &DatabaseConnection,
    room_id: i64,
) -> Result<Option<split_room::Model>> {
    SplitRoom::find_by_id(room_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a room by name, returning None if no room has that name.
pub async fn get_room_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<split_room::Model>> {
    SplitRoom::find()
        .filter(split_room::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all rooms in insertion order.
pub async fn list_rooms(db: &DatabaseConnection) -> Result<Vec<split_room::Model>> {
    SplitRoom::find()
        .order_by_asc(split_room::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a room's members in insertion order.
pub async fn list_members(
    db: &DatabaseConnection,
    room_id: i64,
) -> Result<Vec<room_member::Model>> {
    RoomMember::find()
        .filter(room_member::Column::RoomId.eq(room_id))
        .order_by_asc(room_member::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds the first member with a given display name in a room.
///
/// Names are not unique; when duplicates exist the earliest-added member
/// wins. Prefer id-based lookups wherever an id is available.
pub async fn get_member_by_name(
    db: &DatabaseConnection,
    room_id: i64,
    name: &str,
) -> Result<Option<room_member::Model>> {
    RoomMember::find()
        .filter(room_member::Column::RoomId.eq(room_id))
        .filter(room_member::Column::Name.eq(name))
        .order_by_asc(room_member::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a room's split expenses ordered by date (newest first).
///
/// This is the display ordering; snapshot loading uses insertion order.
pub async fn list_expenses(
    db: &DatabaseConnection,
    room_id: i64,
) -> Result<Vec<split_expense::Model>> {
    SplitExpense::find()
        .filter(split_expense::Column::RoomId.eq(room_id))
        .order_by_desc(split_expense::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Loads a consistent snapshot of a room: the room row, its members, its
/// expenses, and every participant row, all in insertion order.
pub async fn load_room_snapshot(db: &DatabaseConnection, room_id: i64) -> Result<RoomSnapshot> {
    let room = SplitRoom::find_by_id(room_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::RoomNotFound {
            name: room_id.to_string(),
        })?;

    let members = list_members(db, room_id).await?;

    let expenses = SplitExpense::find()
        .filter(split_expense::Column::RoomId.eq(room_id))
        .order_by_asc(split_expense::Column::Id)
        .all(db)
        .await?;

    let participants = if expenses.is_empty() {
        Vec::new()
    } else {
        let expense_ids: Vec<i64> = expenses.iter().map(|e| e.id).collect();
        ExpenseParticipant::find()
            .filter(expense_participant::Column::ExpenseId.is_in(expense_ids))
            .order_by_asc(expense_participant::Column::Id)
            .all(db)
            .await?
    };

    Ok(RoomSnapshot {
        room,
        members,
        expenses,
        participants,
    })
}

/// Computes the headline figures for a room.
pub async fn room_summary(db: &DatabaseConnection, room_id: i64) -> Result<RoomSummary> {
    let snapshot = load_room_snapshot(db, room_id).await?;

    let total_spent: f64 = snapshot.expenses.iter().map(|e| e.amount).sum();
    // Member counts are tiny; the cast cannot lose precision in practice.
    #[allow(clippy::cast_precision_loss)]
    let share_per_member = total_spent / snapshot.members.len().max(1) as f64;

    Ok(RoomSummary {
        member_count: snapshot.members.len(),
        expense_count: snapshot.expenses.len(),
        total_spent,
        share_per_member,
        room: snapshot.room,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_room_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_room(&db, "  ".to_string(), vec![]).await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = create_room(
            &db,
            "Trip".to_string(),
            vec!["Alice".to_string(), String::new()],
        )
        .await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_room_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let (room, members) = create_test_room(&db, "Ski trip", &["Alice", "Bob", "Carol"]).await?;

        assert_eq!(room.name, "Ski trip");
        assert_eq!(members.len(), 3);
        assert_eq!(members[0].name, "Alice");
        assert_eq!(members[0].room_id, room.id);

        // Insertion order is id order
        let listed = list_members(&db, room.id).await?;
        assert_eq!(listed, members);
        assert!(listed.windows(2).all(|w| w[0].id < w[1].id));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_member_appends() -> Result<()> {
        let db = setup_test_db().await?;
        let (room, _) = create_test_room(&db, "Flat", &["Alice"]).await?;

        let bob = add_member(
            &db,
            room.id,
            "Bob".to_string(),
            "555-0100".to_string(),
            "bob@example.com".to_string(),
        )
        .await?;
        assert_eq!(bob.phone_number, "555-0100");

        let members = list_members(&db, room.id).await?;
        assert_eq!(members.len(), 2);
        assert_eq!(members[1], bob);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_member_duplicate_names_allowed() -> Result<()> {
        let db = setup_test_db().await?;
        let (room, members) = create_test_room(&db, "Flat", &["Sam"]).await?;

        let second_sam = add_member(
            &db,
            room.id,
            "Sam".to_string(),
            String::new(),
            String::new(),
        )
        .await?;

        assert_ne!(second_sam.id, members[0].id);
        assert_eq!(second_sam.name, members[0].name);

        // Name lookup resolves to the earliest-added member
        let found = get_member_by_name(&db, room.id, "Sam").await?.unwrap();
        assert_eq!(found.id, members[0].id);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_member_room_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = add_member(
            &db,
            999,
            "Alice".to_string(),
            String::new(),
            String::new(),
        )
        .await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), Error::RoomNotFound { name: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_member_no_cascade() -> Result<()> {
        let db = setup_test_db().await?;
        let (room, members) = create_test_room(&db, "Flat", &["Alice", "Bob"]).await?;

        let expense = add_expense(
            &db,
            room.id,
            NewSplitExpense {
                title: "Groceries".to_string(),
                amount: 60.0,
                payer_member_id: members[0].id,
                participant_member_ids: vec![members[0].id, members[1].id],
                date: chrono::Utc::now(),
                notes: String::new(),
            },
        )
        .await?;

        remove_member(&db, room.id, members[0].id).await?;

        // The member row is gone
        let remaining = list_members(&db, room.id).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, members[1].id);

        // The expense and its participant rows survive with dangling ids
        let snapshot = load_room_snapshot(&db, room.id).await?;
        assert_eq!(snapshot.expenses.len(), 1);
        assert_eq!(snapshot.expenses[0].payer_member_id, members[0].id);
        assert_eq!(snapshot.participants.len(), 2);
        assert_eq!(snapshot.expenses[0].id, expense.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_member_wrong_room() -> Result<()> {
        let db = setup_test_db().await?;
        let (room_a, members_a) = create_test_room(&db, "A", &["Alice"]).await?;
        let (room_b, _) = create_test_room(&db, "B", &["Bob"]).await?;

        // Alice is not in room B
        let result = remove_member(&db, room_b.id, members_a[0].id).await;
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            Error::MemberNotFound { name: _ }
        ));

        // Alice is still in room A
        let members = list_members(&db, room_a.id).await?;
        assert_eq!(members.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_expense_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let (room, members) = create_test_room(&db, "Flat", &["Alice"]).await?;

        let result = add_expense(
            &db,
            room.id,
            NewSplitExpense {
                title: String::new(),
                amount: 10.0,
                payer_member_id: members[0].id,
                participant_member_ids: vec![],
                date: chrono::Utc::now(),
                notes: String::new(),
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = add_expense(
            &db,
            room.id,
            NewSplitExpense {
                title: "Rent".to_string(),
                amount: f64::NAN,
                payer_member_id: members[0].id,
                participant_member_ids: vec![],
                date: chrono::Utc::now(),
                notes: String::new(),
            },
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_expense_permissive_about_ids() -> Result<()> {
        let db = setup_test_db().await?;
        let (room, _) = create_test_room(&db, "Flat", &["Alice"]).await?;

        // Neither payer nor participants are checked against the member list
        let expense = add_expense(
            &db,
            room.id,
            NewSplitExpense {
                title: "Mystery".to_string(),
                amount: 30.0,
                payer_member_id: 4242,
                participant_member_ids: vec![4242, 4343],
                date: chrono::Utc::now(),
                notes: String::new(),
            },
        )
        .await?;

        assert_eq!(expense.payer_member_id, 4242);

        let snapshot = load_room_snapshot(&db, room.id).await?;
        assert_eq!(snapshot.participants.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_expense_room_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = add_expense(
            &db,
            999,
            NewSplitExpense {
                title: "Rent".to_string(),
                amount: 100.0,
                payer_member_id: 1,
                participant_member_ids: vec![],
                date: chrono::Utc::now(),
                notes: String::new(),
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::RoomNotFound { name: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_expense_deletes_participants() -> Result<()> {
        let db = setup_test_db().await?;
        let (room, members) = create_test_room(&db, "Flat", &["Alice", "Bob"]).await?;

        let expense = add_expense(
            &db,
            room.id,
            NewSplitExpense {
                title: "Dinner".to_string(),
                amount: 40.0,
                payer_member_id: members[0].id,
                participant_member_ids: vec![members[0].id, members[1].id],
                date: chrono::Utc::now(),
                notes: String::new(),
            },
        )
        .await?;

        remove_expense(&db, expense.id).await?;

        let snapshot = load_room_snapshot(&db, room.id).await?;
        assert!(snapshot.expenses.is_empty());
        assert!(snapshot.participants.is_empty());

        let result = remove_expense(&db, expense.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ExpenseNotFound { name: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_room_lookups() -> Result<()> {
        let db = setup_test_db().await?;
        let (first, _) = create_test_room(&db, "First", &[]).await?;
        let (second, _) = create_test_room(&db, "Second", &[]).await?;

        let by_id = get_room_by_id(&db, second.id).await?.unwrap();
        assert_eq!(by_id, second);

        let by_name = get_room_by_name(&db, "First").await?.unwrap();
        assert_eq!(by_name, first);

        assert!(get_room_by_name(&db, "Missing").await?.is_none());

        let rooms = list_rooms(&db).await?;
        assert_eq!(rooms, vec![first, second]);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_expenses_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let (room, members) = create_test_room(&db, "Flat", &["Alice"]).await?;

        let older = add_expense(
            &db,
            room.id,
            NewSplitExpense {
                title: "Last week".to_string(),
                amount: 10.0,
                payer_member_id: members[0].id,
                participant_member_ids: vec![],
                date: days_ago(7),
                notes: String::new(),
            },
        )
        .await?;
        let newer = add_expense(
            &db,
            room.id,
            NewSplitExpense {
                title: "Today".to_string(),
                amount: 20.0,
                payer_member_id: members[0].id,
                participant_member_ids: vec![],
                date: days_ago(0),
                notes: String::new(),
            },
        )
        .await?;

        let listed = list_expenses(&db, room.id).await?;
        assert_eq!(listed, vec![newer, older]);

        Ok(())
    }

    #[tokio::test]
    async fn test_load_room_snapshot_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = load_room_snapshot(&db, 999).await;
        assert!(matches!(result.unwrap_err(), Error::RoomNotFound { name: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_room_summary_figures() -> Result<()> {
        let db = setup_test_db().await?;
        let (room, members) = create_test_room(&db, "Flat", &["Alice", "Bob"]).await?;

        add_test_split_expense(&db, room.id, members[0].id, 60.0).await?;
        add_test_split_expense(&db, room.id, members[1].id, 30.0).await?;

        let summary = room_summary(&db, room.id).await?;
        assert_eq!(summary.member_count, 2);
        assert_eq!(summary.expense_count, 2);
        assert_eq!(summary.total_spent, 90.0);
        assert_eq!(summary.share_per_member, 45.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_room_summary_empty_room() -> Result<()> {
        let db = setup_test_db().await?;
        let (room, _) = create_test_room(&db, "Empty", &[]).await?;

        let summary = room_summary(&db, room.id).await?;
        assert_eq!(summary.member_count, 0);
        assert_eq!(summary.expense_count, 0);
        assert_eq!(summary.total_spent, 0.0);
        assert_eq!(summary.share_per_member, 0.0);

        Ok(())
    }
}
