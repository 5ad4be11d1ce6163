//! Shared data model for the hledger viewer.
//!
//! This crate owns the typed representation of hledger-web's JSON payloads
//! (amounts, accounts, transactions, postings) and the display formatting
//! that reproduces hledger's own textual output: grouped digits, decimal
//! points, commodity placement, and `@`/`@@` price annotations.
//!
//! Everything here is pure value code. Talking to the hledger-web process,
//! reading journal files, and rendering UI all live elsewhere; this layer
//! only decodes what the backend sends and formats it for display.

pub mod amount;
pub mod format;
pub mod mixed;
pub mod model;
pub mod quantity;

pub use amount::{Amount, AmountPrice, AmountStyle, Commodity, DigitGroups, ParseAmountError, Side};
pub use mixed::MixedAmount;
pub use model::{
    Account, AccountDeclarationInfo, AccountName, BalanceAssertion, MarketPrice,
    ParseAccountNameError, Posting, PostingType, SourcePosition, SourceRange, Status, Tag,
    Transaction,
};
pub use quantity::Quantity;
