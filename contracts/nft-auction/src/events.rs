use commons::{
    Token, ASSET_CLAIMED_TAG, AUCTION_CREATED_TAG, AUCTION_ENDED_NO_BID_TAG, AUCTION_ENDED_TAG,
    BID_PLACED_TAG,
};
use concordium_std::*;

/// Auction creation event data.
#[derive(Debug, Serial)]
pub struct CreatedEvent<'a> {
    /// The item placed in escrow.
    pub item: &'a Token,
    /// Account selling the item.
    pub seller: &'a AccountAddress,
    /// Smallest acceptable opening price.
    pub min_bid: Amount,
    /// Time at which the bidding window closes.
    pub end_time: Timestamp,
}

/// Bid event data.
#[derive(Debug, Serial)]
pub struct BidEvent<'a> {
    /// The item being sold.
    pub item: &'a Token,
    /// Bidder account address.
    pub bidder: &'a AccountAddress,
    /// Bid amount.
    pub amount: Amount,
}

/// Settlement event data for an auction that received bids.
#[derive(Debug, Serial)]
pub struct EndedEvent<'a> {
    /// The item being sold.
    pub item: &'a Token,
    /// Address of the auction winner.
    pub winner: &'a AccountAddress,
    /// Winning bid, paid out to the seller.
    pub price: Amount,
}

/// Settlement event data for an auction without bids.
#[derive(Debug, Serial)]
pub struct EndedNoBidEvent<'a> {
    /// The item being sold.
    pub item: &'a Token,
    /// Account the item was returned to.
    pub seller: &'a AccountAddress,
}

/// Claim event data.
#[derive(Debug, Serial)]
pub struct ClaimedEvent<'a> {
    /// The item that was handed over.
    pub item: &'a Token,
    /// Address of the auction winner.
    pub winner: &'a AccountAddress,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug)]
pub enum AuctionEvents<'a> {
    Created(CreatedEvent<'a>),
    Bid(BidEvent<'a>),
    Ended(EndedEvent<'a>),
    EndedNoBid(EndedNoBidEvent<'a>),
    Claimed(ClaimedEvent<'a>),
}

impl<'a> AuctionEvents<'a> {
    pub fn created(
        item: &'a Token,
        seller: &'a AccountAddress,
        min_bid: Amount,
        end_time: Timestamp,
    ) -> Self {
        Self::Created(CreatedEvent {
            item,
            seller,
            min_bid,
            end_time,
        })
    }

    pub fn bid(item: &'a Token, bidder: &'a AccountAddress, amount: Amount) -> Self {
        Self::Bid(BidEvent {
            item,
            bidder,
            amount,
        })
    }

    pub fn ended(item: &'a Token, winner: &'a AccountAddress, price: Amount) -> Self {
        Self::Ended(EndedEvent {
            item,
            winner,
            price,
        })
    }

    pub fn ended_no_bid(item: &'a Token, seller: &'a AccountAddress) -> Self {
        Self::EndedNoBid(EndedNoBidEvent { item, seller })
    }

    pub fn claimed(item: &'a Token, winner: &'a AccountAddress) -> Self {
        Self::Claimed(ClaimedEvent { item, winner })
    }
}

impl<'a> Serial for AuctionEvents<'a> {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            AuctionEvents::Created(event) => {
                out.write_u8(AUCTION_CREATED_TAG)?;
                event.serial(out)
            }
            AuctionEvents::Bid(event) => {
                out.write_u8(BID_PLACED_TAG)?;
                event.serial(out)
            }
            AuctionEvents::Ended(event) => {
                out.write_u8(AUCTION_ENDED_TAG)?;
                event.serial(out)
            }
            AuctionEvents::EndedNoBid(event) => {
                out.write_u8(AUCTION_ENDED_NO_BID_TAG)?;
                event.serial(out)
            }
            AuctionEvents::Claimed(event) => {
                out.write_u8(ASSET_CLAIMED_TAG)?;
                event.serial(out)
            }
        }
    }
}
