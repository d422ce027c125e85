//! Shopping cart aggregate and related types.

mod aggregate;
mod line;
mod snapshot;

pub use aggregate::Cart;
pub use line::OrderLine;
pub use snapshot::{CheckoutSnapshot, SnapshotLine};
