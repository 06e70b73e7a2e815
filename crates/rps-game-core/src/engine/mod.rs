//! Game state machine and escrow accounting.

mod escrow;
mod registry;
mod shared;

pub use escrow::EscrowLedger;
pub use registry::GameRegistry;
pub use shared::SharedRegistry;
