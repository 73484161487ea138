/// Tag for the AuctionCreated event.
pub const AUCTION_CREATED_TAG: u8 = u8::MAX - 5;

/// Tag for the BidPlaced event.
pub const BID_PLACED_TAG: u8 = u8::MAX - 6;

/// Tag for the AuctionEnded event.
pub const AUCTION_ENDED_TAG: u8 = u8::MAX - 7;

/// Tag for the AuctionEndedNoBid event.
pub const AUCTION_ENDED_NO_BID_TAG: u8 = u8::MAX - 8;

/// Tag for the AssetClaimed event.
pub const ASSET_CLAIMED_TAG: u8 = u8::MAX - 9;
