//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod credit;
pub mod expense;
pub mod expense_participant;
pub mod room_member;
pub mod split_expense;
pub mod split_room;
pub mod wishlist_item;

// Re-export specific types to avoid conflicts
pub use credit::{Column as CreditColumn, Entity as Credit, Model as CreditModel};
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use expense_participant::{
    Column as ExpenseParticipantColumn, Entity as ExpenseParticipant,
    Model as ExpenseParticipantModel,
};
pub use room_member::{Column as RoomMemberColumn, Entity as RoomMember, Model as RoomMemberModel};
pub use split_expense::{
    Column as SplitExpenseColumn, Entity as SplitExpense, Model as SplitExpenseModel,
};
pub use split_room::{Column as SplitRoomColumn, Entity as SplitRoom, Model as SplitRoomModel};
pub use wishlist_item::{
    Column as WishlistItemColumn, Entity as WishlistItem, Model as WishlistItemModel,
};
