use commons::{CustomContractError, Token};
use concordium_std::*;

/// Lifecycle phase of the auction.
///
/// The phase also doubles as the escrow record for the item: the item is
/// held by the instance exactly while the phase is `Open` or
/// `AwaitingClaim`, and each release transition can be taken once.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub enum AuctionPhase {
    /// The bidding window is open and the item is in escrow.
    Open,
    /// Settled without a single bid; the item went back to the seller.
    /// Terminal.
    AssetReturned,
    /// Settled with a winner. The seller has been paid and the item stays
    /// in escrow until the winner claims it.
    AwaitingClaim,
    /// The winner collected the item. Terminal.
    Claimed,
}

/// The standing bid.
///
/// `NoBid` replaces the convention of recording the seller as their own
/// highest bidder: whether a real bid exists is a tag, not an address
/// comparison.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub enum BidState {
    /// No bid has been placed yet.
    NoBid,
    /// The current leading bid. Its full amount is held in escrow.
    Bid {
        bidder: AccountAddress,
        amount: Amount,
    },
}

/// A bid that was beaten and must be refunded in full.
#[must_use]
pub struct DisplacedBid {
    pub bidder: AccountAddress,
    pub amount: Amount,
}

/// Outcome of a successful settlement. Funds or item must be released
/// accordingly.
#[must_use]
pub enum SettleOutcome {
    /// No bids were placed; the item must be returned to the seller.
    ReturnToSeller(AccountAddress),
    /// The winning bid; its amount must be paid out to the seller.
    PayOut {
        seller: AccountAddress,
        winner: AccountAddress,
        price: Amount,
    },
}

/// The state of one auction instance.
#[derive(Debug, Serialize, SchemaType)]
pub struct State {
    /// The escrowed item this auction sells.
    pub item: Token,
    /// Account that created the auction.
    pub seller: AccountAddress,
    /// Smallest acceptable opening price.
    pub min_bid: Amount,
    /// Time at which the bidding window closes.
    pub end_time: Timestamp,
    /// The standing bid.
    pub bid_state: BidState,
    /// Lifecycle phase.
    pub phase: AuctionPhase,
}

impl State {
    /// Creates the state of a freshly opened auction.
    pub fn new(item: Token, seller: AccountAddress, min_bid: Amount, end_time: Timestamp) -> Self {
        Self {
            item,
            seller,
            min_bid,
            end_time,
            bid_state: BidState::NoBid,
            phase: AuctionPhase::Open,
        }
    }

    /// The price a new bid has to beat. Reads as `min_bid` until the first
    /// bid is placed.
    pub fn current_bid(&self) -> Amount {
        match self.bid_state {
            BidState::NoBid => self.min_bid,
            BidState::Bid { amount, .. } => amount,
        }
    }

    /// The leading bidder. Reads as the seller until the first bid is
    /// placed.
    pub fn highest_bidder(&self) -> AccountAddress {
        match self.bid_state {
            BidState::NoBid => self.seller,
            BidState::Bid { bidder, .. } => bidder,
        }
    }

    /// Whether the auction has been settled.
    pub fn ended(&self) -> bool {
        !matches!(self.phase, AuctionPhase::Open)
    }

    /// Funds held by the auction. Equals the standing bid while the
    /// bidding window is open and zero once the proceeds are paid out.
    pub fn escrow_balance(&self) -> Amount {
        match (self.phase, self.bid_state) {
            (AuctionPhase::Open, BidState::Bid { amount, .. }) => amount,
            _ => Amount::zero(),
        }
    }

    /// Record a new leading bid.
    ///
    /// Returns the bid that was beaten, which MUST be refunded in the same
    /// call.
    pub fn bid(
        &mut self,
        bidder: AccountAddress,
        amount: Amount,
        slot_time: Timestamp,
    ) -> Result<Option<DisplacedBid>, CustomContractError> {
        ensure!(amount > Amount::zero(), CustomContractError::ZeroBid);

        // The deadline is exclusive for bidding. A settled auction implies
        // the deadline has passed, since slot time never decreases.
        ensure!(
            matches!(self.phase, AuctionPhase::Open) && slot_time < self.end_time,
            CustomContractError::Expired
        );

        // Ties are rejected. The opening bid has to beat `min_bid`.
        ensure!(amount > self.current_bid(), CustomContractError::BidTooLow);

        let displaced = match self.bid_state {
            BidState::NoBid => None,
            BidState::Bid { bidder, amount } => Some(DisplacedBid { bidder, amount }),
        };
        self.bid_state = BidState::Bid { bidder, amount };

        Ok(displaced)
    }

    /// Close the bidding window.
    ///
    /// Effectful once; the deadline is inclusive for settlement.
    pub fn settle(&mut self, slot_time: Timestamp) -> Result<SettleOutcome, CustomContractError> {
        ensure!(
            matches!(self.phase, AuctionPhase::Open),
            CustomContractError::AlreadyEnded
        );
        ensure!(slot_time >= self.end_time, CustomContractError::NotYetEnded);

        match self.bid_state {
            BidState::NoBid => {
                self.phase = AuctionPhase::AssetReturned;
                Ok(SettleOutcome::ReturnToSeller(self.seller))
            }
            BidState::Bid { bidder, amount } => {
                self.phase = AuctionPhase::AwaitingClaim;
                Ok(SettleOutcome::PayOut {
                    seller: self.seller,
                    winner: bidder,
                    price: amount,
                })
            }
        }
    }

    /// Hand the escrowed item over to the winner.
    ///
    /// Returns the winner whose claim was accepted. The winner check comes
    /// before the already-claimed check, so a second claim by the winner
    /// fails with `AlreadyClaimed` while everyone else gets `NotWinner`.
    pub fn claim(&mut self, caller: AccountAddress) -> Result<AccountAddress, CustomContractError> {
        match self.phase {
            AuctionPhase::Open => Err(CustomContractError::NotYetEnded),
            // The item went back to the seller; there is no winner to be.
            AuctionPhase::AssetReturned => Err(CustomContractError::NotWinner),
            AuctionPhase::AwaitingClaim => match self.bid_state {
                BidState::Bid { bidder, .. } if bidder == caller => {
                    self.phase = AuctionPhase::Claimed;
                    Ok(bidder)
                }
                _ => Err(CustomContractError::NotWinner),
            },
            AuctionPhase::Claimed => match self.bid_state {
                BidState::Bid { bidder, .. } if bidder == caller => {
                    Err(CustomContractError::AlreadyClaimed)
                }
                _ => Err(CustomContractError::NotWinner),
            },
        }
    }
}
