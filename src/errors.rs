//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result`]. Variants use
//! struct syntax so call sites can match on the offending value directly.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration problem (missing file, bad TOML, empty required field).
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// Database error from the SeaORM layer.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error, e.g. while writing an export file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An amount was NaN or infinite.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// No split room matched the given identifier or name.
    #[error("Split room not found: {name}")]
    RoomNotFound {
        /// Identifier or name used in the lookup
        name: String,
    },

    /// No room member matched the given identifier or name.
    #[error("Room member not found: {name}")]
    MemberNotFound {
        /// Identifier or name used in the lookup
        name: String,
    },

    /// No personal expense matched the given identifier.
    #[error("Expense not found: {name}")]
    ExpenseNotFound {
        /// Identifier used in the lookup
        name: String,
    },

    /// No credit entry matched the given identifier.
    #[error("Credit not found: {name}")]
    CreditNotFound {
        /// Identifier used in the lookup
        name: String,
    },

    /// No wishlist item matched the given identifier.
    #[error("Wishlist item not found: {name}")]
    WishlistItemNotFound {
        /// Identifier used in the lookup
        name: String,
    },
}

/// Convenience `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
