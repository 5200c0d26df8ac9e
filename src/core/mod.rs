/// Balance calculation for split rooms
pub mod balance;

/// Credit (income) tracking operations
pub mod credit;

/// Personal expense tracking operations
pub mod expense;

/// CSV export of the personal ledger
pub mod export;

/// Read-only analytics over expenses and credits
pub mod ledger;

/// Split room and shared expense management
pub mod room;

/// Settlement resolution for split rooms
pub mod settlement;

/// Wishlist item management
pub mod wishlist;
