use commons::Token;
use concordium_std::*;

/// Type of the parameter to the `init` function.
#[derive(Debug, Clone, Serialize, SchemaType)]
pub struct InitParams {
    /// The item to be sold. The instance must be holding it for the
    /// duration of the auction.
    pub item: Token,
    /// Smallest acceptable opening price. Must be non-zero.
    pub min_bid: Amount,
    /// Length of the bidding window, starting now. Must be non-zero.
    pub duration: Duration,
}

/// Snapshot of the auction returned by the `view` entrypoint.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct ViewState {
    /// The item being sold.
    pub item: Token,
    /// Account that created the auction.
    pub seller: AccountAddress,
    /// Smallest acceptable opening price.
    pub min_bid: Amount,
    /// Time at which the bidding window closes.
    pub end_time: Timestamp,
    /// The leading bid; `min_bid` until the first bid is placed.
    pub current_bid: Amount,
    /// The leading bidder; the seller until the first bid is placed.
    pub highest_bidder: AccountAddress,
    /// Funds currently held by the auction.
    pub escrow_balance: Amount,
    /// Whether the auction has been settled.
    pub ended: bool,
}
