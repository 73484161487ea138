//! It exposes a single-item open auction with on-chain escrow: the seller
//! locks an NFT with the contract instance, bidders raise the price with
//! their funds held in escrow, and after the deadline the proceeds go to
//! the seller while the item awaits the winner's claim.
#![cfg_attr(not(feature = "std"), no_std)]

mod contract;
mod events;
mod external;
mod nft;
mod state;
