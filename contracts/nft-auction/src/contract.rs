use commons::{ContractResult, CustomContractError};
use concordium_std::*;

use crate::events::*;
use crate::external::*;
use crate::nft;
use crate::state::{SettleOutcome, State};

/// Init function that opens a new auction.
///
/// The instance sells exactly one item; the bidding window opens at the
/// creation slot time and closes `duration` later.
#[init(contract = "NftAuction", parameter = "InitParams", enable_logger)]
fn contract_init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    _state_builder: &mut StateBuilder<S>,
    logger: &mut impl HasLogger,
) -> InitResult<State> {
    let params = InitParams::deserial(&mut ctx.parameter_cursor())?;

    ensure!(
        params.min_bid > Amount::zero(),
        CustomContractError::InvalidParameters.into()
    );
    ensure!(
        params.duration.millis() > 0,
        CustomContractError::InvalidParameters.into()
    );

    let slot_time = ctx.metadata().slot_time();
    let end_time = slot_time
        .checked_add(params.duration)
        .ok_or(CustomContractError::InvalidParameters)?;
    let seller = ctx.init_origin();

    logger
        .log(&AuctionEvents::created(
            &params.item,
            &seller,
            params.min_bid,
            end_time,
        ))
        .map_err(CustomContractError::from)?;

    Ok(State::new(params.item, seller, params.min_bid, end_time))
}

/// Receive function in which accounts can bid before the auction deadline.
///
/// The attached amount is the bid. The standing bid, if any, is refunded
/// in full within the same call.
#[receive(
    mutable,
    payable,
    contract = "NftAuction",
    name = "bid",
    enable_logger
)]
fn contract_bid<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let bidder = if let Address::Account(bidder) = ctx.sender() {
        bidder
    } else {
        bail!(CustomContractError::OnlyAccountAddress.into());
    };

    let displaced = host
        .state_mut()
        .bid(bidder, amount, ctx.metadata().slot_time())?;

    logger.log(&AuctionEvents::bid(&host.state().item, &bidder, amount))?;

    // Refund the beaten bid
    if let Some(displaced) = displaced {
        host.invoke_transfer(&displaced.bidder, displaced.amount)?;
    }

    Ok(())
}

/// Receive function used to settle the auction once the deadline has
/// passed. Callable by anyone; effectful only on the first successful
/// call.
///
/// With no bids the item goes back to the seller. Otherwise the winning
/// bid is paid out to the seller and the item stays in escrow until the
/// winner claims it.
#[receive(mutable, contract = "NftAuction", name = "settle", enable_logger)]
fn contract_settle<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let outcome = host.state_mut().settle(ctx.metadata().slot_time())?;
    let item = host.state().item.clone();

    match outcome {
        SettleOutcome::ReturnToSeller(seller) => {
            nft::transfer(host, &item, Address::Contract(ctx.self_address()), seller)?;
            logger.log(&AuctionEvents::ended_no_bid(&item, &seller))?;
        }
        SettleOutcome::PayOut {
            seller,
            winner,
            price,
        } => {
            host.invoke_transfer(&seller, price)?;
            logger.log(&AuctionEvents::ended(&item, &winner, price))?;
        }
    }

    Ok(())
}

/// Receive function in which the auction winner collects the escrowed
/// item after settlement.
#[receive(mutable, contract = "NftAuction", name = "claim", enable_logger)]
fn contract_claim<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let caller = if let Address::Account(caller) = ctx.sender() {
        caller
    } else {
        bail!(CustomContractError::OnlyAccountAddress.into());
    };

    let winner = host.state_mut().claim(caller)?;
    let item = host.state().item.clone();

    nft::transfer(host, &item, Address::Contract(ctx.self_address()), winner)?;

    logger.log(&AuctionEvents::claimed(&item, &winner))?;

    Ok(())
}

/// View function that returns a snapshot of the auction.
#[receive(contract = "NftAuction", name = "view", return_value = "ViewState")]
fn contract_view<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State, StateApiType = S>,
) -> ReceiveResult<ViewState> {
    let state = host.state();
    Ok(ViewState {
        item: state.item.clone(),
        seller: state.seller,
        min_bid: state.min_bid,
        end_time: state.end_time,
        current_bid: state.current_bid(),
        highest_bidder: state.highest_bidder(),
        escrow_balance: state.escrow_balance(),
        ended: state.ended(),
    })
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::state::{AuctionPhase, BidState};
    use commons::{ContractTokenId, Token, TransferParameter};
    use concordium_cis2::TokenIdVec;
    use core::fmt::Debug;
    use test_infrastructure::*;

    const SELLER: AccountAddress = AccountAddress([1; 32]);
    const BIDDER_1: AccountAddress = AccountAddress([2; 32]);
    const BIDDER_2: AccountAddress = AccountAddress([3; 32]);
    const OUTSIDER: AccountAddress = AccountAddress([4; 32]);

    const NFT_CONTRACT: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };

    const SELF_ADDRESS: ContractAddress = ContractAddress {
        index: 7,
        subindex: 0,
    };

    /// Bidding window used throughout: opens at slot time 0, closes at
    /// slot time 1000.
    const AUCTION_END: u64 = 1_000;
    const MIN_BID: u64 = 100;

    fn token_0() -> ContractTokenId {
        TokenIdVec(vec![0, 1])
    }

    fn item() -> Token {
        Token {
            contract: NFT_CONTRACT,
            id: token_0(),
        }
    }

    fn init_params() -> InitParams {
        InitParams {
            item: item(),
            min_bid: Amount::from_micro_ccd(MIN_BID),
            duration: Duration::from_millis(AUCTION_END),
        }
    }

    fn init_ctx<'a>(parameter_bytes: &'a [u8]) -> TestInitContext<'a> {
        let mut ctx = TestInitContext::empty();
        ctx.set_init_origin(SELLER)
            .set_parameter(parameter_bytes)
            .set_metadata_slot_time(Timestamp::from_timestamp_millis(0));
        ctx
    }

    fn fresh_host() -> TestHost<State> {
        let parameter_bytes = to_bytes(&init_params());
        let ctx = init_ctx(&parameter_bytes);
        let mut state_builder = TestStateBuilder::new();
        let mut logger = TestLogger::init();

        let state = contract_init(&ctx, &mut state_builder, &mut logger)
            .expect_report("Opening the auction should pass");
        TestHost::new(state, state_builder)
    }

    fn receive_ctx<'a>(sender: AccountAddress, slot_time: u64) -> TestReceiveContext<'a> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(sender))
            .set_self_address(SELF_ADDRESS)
            .set_metadata_slot_time(Timestamp::from_timestamp_millis(slot_time));
        ctx
    }

    /// Let the mocked NFT contract accept item transfers.
    fn mock_item_transfer(host: &mut TestHost<State>) {
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            MockFn::new(|param, _amount, _balance, _state| {
                TransferParameter::deserial(&mut Cursor::new(param.as_ref()))
                    .map_err(|_| CallContractError::Trap)?;
                Ok((true, ()))
            }),
        );
    }

    /// Attach `amount` micro CCD and bid as `bidder` at `slot_time`. The
    /// instance balance is topped up the way the chain would on a payable
    /// call, so refunds of the beaten bid can go through.
    fn place_bid(
        host: &mut TestHost<State>,
        bidder: AccountAddress,
        amount: u64,
        slot_time: u64,
        logger: &mut TestLogger,
    ) -> ContractResult<()> {
        let ctx = receive_ctx(bidder, slot_time);
        let amount = Amount::from_micro_ccd(amount);
        host.set_self_balance(host.state().escrow_balance() + amount);
        contract_bid(&ctx, host, amount, logger)
    }

    fn expect_error<E, T>(expr: Result<T, E>, err: E, msg: &str)
    where
        E: Eq + Debug,
        T: Debug,
    {
        let actual = expr.expect_err(msg);
        assert_eq!(actual, err);
    }

    #[concordium_test]
    /// Test that initialization opens the bidding window with no bids,
    /// the indicated deadline and the creator recorded as seller.
    fn test_init() {
        let parameter_bytes = to_bytes(&init_params());
        let ctx = init_ctx(&parameter_bytes);
        let mut state_builder = TestStateBuilder::new();
        let mut logger = TestLogger::init();

        let state = contract_init(&ctx, &mut state_builder, &mut logger)
            .expect_report("Opening the auction should pass");

        claim_eq!(state.phase, AuctionPhase::Open);
        claim_eq!(state.bid_state, BidState::NoBid);
        claim_eq!(state.item, item());
        claim_eq!(state.seller, SELLER);
        claim_eq!(state.min_bid, Amount::from_micro_ccd(MIN_BID));
        claim_eq!(
            state.end_time,
            Timestamp::from_timestamp_millis(AUCTION_END)
        );
        claim_eq!(state.current_bid(), Amount::from_micro_ccd(MIN_BID));
        claim_eq!(state.highest_bidder(), SELLER);
        claim_eq!(state.escrow_balance(), Amount::zero());
        claim!(!state.ended());
    }

    #[concordium_test]
    /// Opening price of zero should be rejected.
    fn test_init_zero_min_bid() {
        let mut params = init_params();
        params.min_bid = Amount::zero();
        let parameter_bytes = to_bytes(&params);
        let ctx = init_ctx(&parameter_bytes);
        let mut state_builder = TestStateBuilder::new();
        let mut logger = TestLogger::init();

        let result = contract_init(&ctx, &mut state_builder, &mut logger);
        expect_error(
            result,
            CustomContractError::InvalidParameters.into(),
            "Opening an auction with a zero opening price should fail",
        );
    }

    #[concordium_test]
    /// Bidding window of zero length should be rejected.
    fn test_init_zero_duration() {
        let mut params = init_params();
        params.duration = Duration::from_millis(0);
        let parameter_bytes = to_bytes(&params);
        let ctx = init_ctx(&parameter_bytes);
        let mut state_builder = TestStateBuilder::new();
        let mut logger = TestLogger::init();

        let result = contract_init(&ctx, &mut state_builder, &mut logger);
        expect_error(
            result,
            CustomContractError::InvalidParameters.into(),
            "Opening an auction with a zero duration should fail",
        );
    }

    #[concordium_test]
    /// Bids of zero are rejected before any other check, even after the
    /// deadline.
    fn test_bid_zero() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        let result = place_bid(&mut host, BIDDER_1, 0, 10, &mut logger);
        expect_error(
            result,
            CustomContractError::ZeroBid.into(),
            "Bidding zero should fail",
        );

        let result = place_bid(&mut host, BIDDER_1, 0, AUCTION_END + 500, &mut logger);
        expect_error(
            result,
            CustomContractError::ZeroBid.into(),
            "Bidding zero after the deadline should still fail with ZeroBid",
        );
    }

    #[concordium_test]
    /// The opening bid has to beat the opening price; a bid equal to it
    /// is a tie and ties are rejected.
    fn test_opening_bid_too_low() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        let result = place_bid(&mut host, BIDDER_1, MIN_BID, 10, &mut logger);
        expect_error(
            result,
            CustomContractError::BidTooLow.into(),
            "Matching the opening price should fail",
        );

        let result = place_bid(&mut host, BIDDER_1, MIN_BID - 1, 10, &mut logger);
        expect_error(
            result,
            CustomContractError::BidTooLow.into(),
            "Underbidding the opening price should fail",
        );

        claim_eq!(host.state().bid_state, BidState::NoBid);
    }

    #[concordium_test]
    /// Test a sequence of bids:
    /// 1. BIDDER_1 takes the lead with 150.
    /// 2. BIDDER_2 underbids with 120 and is rejected.
    /// 3. BIDDER_2 ties with 150 and is rejected.
    /// 4. BIDDER_2 takes the lead with 200; BIDDER_1 gets refunded 150.
    fn test_bid_sequence() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        place_bid(&mut host, BIDDER_1, 150, 10, &mut logger).expect_report("First bid should pass");
        claim_eq!(host.state().current_bid(), Amount::from_micro_ccd(150));
        claim_eq!(host.state().highest_bidder(), BIDDER_1);
        claim_eq!(host.state().escrow_balance(), Amount::from_micro_ccd(150));

        let result = place_bid(&mut host, BIDDER_2, 120, 20, &mut logger);
        expect_error(
            result,
            CustomContractError::BidTooLow.into(),
            "Underbidding the standing bid should fail",
        );

        let result = place_bid(&mut host, BIDDER_2, 150, 25, &mut logger);
        expect_error(
            result,
            CustomContractError::BidTooLow.into(),
            "Matching the standing bid should fail",
        );
        claim_eq!(host.state().highest_bidder(), BIDDER_1);

        place_bid(&mut host, BIDDER_2, 200, 30, &mut logger)
            .expect_report("Raising the standing bid should pass");
        claim_eq!(host.state().current_bid(), Amount::from_micro_ccd(200));
        claim_eq!(host.state().highest_bidder(), BIDDER_2);
        claim_eq!(host.state().escrow_balance(), Amount::from_micro_ccd(200));
    }

    #[concordium_test]
    /// The deadline is exclusive for bidding: a bid at the deadline slot
    /// is already too late.
    fn test_bid_at_deadline() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        let result = place_bid(&mut host, BIDDER_1, 150, AUCTION_END, &mut logger);
        expect_error(
            result,
            CustomContractError::Expired.into(),
            "Bidding at the deadline should fail",
        );

        let result = place_bid(&mut host, BIDDER_1, 150, AUCTION_END + 1, &mut logger);
        expect_error(
            result,
            CustomContractError::Expired.into(),
            "Bidding after the deadline should fail",
        );
    }

    #[concordium_test]
    /// Settling without bids returns the item to the seller and is
    /// effectful exactly once.
    fn test_settle_no_bids() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();
        mock_item_transfer(&mut host);

        let ctx = receive_ctx(OUTSIDER, AUCTION_END);
        contract_settle(&ctx, &mut host, &mut logger)
            .expect_report("Settling without bids should pass");

        claim_eq!(host.state().phase, AuctionPhase::AssetReturned);
        claim!(host.state().ended());
        claim_eq!(host.state().escrow_balance(), Amount::zero());

        let result = contract_settle(&ctx, &mut host, &mut logger);
        expect_error(
            result,
            CustomContractError::AlreadyEnded.into(),
            "Settling a second time should fail",
        );
    }

    #[concordium_test]
    /// Settlement before the deadline is rejected; the deadline slot
    /// itself is settleable.
    fn test_settle_before_deadline() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();
        mock_item_transfer(&mut host);

        let ctx = receive_ctx(OUTSIDER, AUCTION_END - 1);
        let result = contract_settle(&ctx, &mut host, &mut logger);
        expect_error(
            result,
            CustomContractError::NotYetEnded.into(),
            "Settling before the deadline should fail",
        );

        let ctx = receive_ctx(OUTSIDER, AUCTION_END);
        contract_settle(&ctx, &mut host, &mut logger)
            .expect_report("Settling at the deadline should pass");
    }

    #[concordium_test]
    /// Test the full winning path:
    /// 1. Two bids; BIDDER_2 leads with 200.
    /// 2. Settlement pays 200 to the seller, item stays in escrow.
    /// 3. BIDDER_1 cannot claim; BIDDER_2 collects the item.
    /// 4. A second claim by the winner fails, as does everyone else's.
    fn test_settle_and_claim() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        place_bid(&mut host, BIDDER_1, 150, 10, &mut logger).expect_report("First bid should pass");
        place_bid(&mut host, BIDDER_2, 200, 30, &mut logger)
            .expect_report("Second bid should pass");

        let ctx = receive_ctx(OUTSIDER, AUCTION_END);
        contract_settle(&ctx, &mut host, &mut logger).expect_report("Settling should pass");

        claim_eq!(host.state().phase, AuctionPhase::AwaitingClaim);
        claim!(host.state().ended());
        claim_eq!(host.state().highest_bidder(), BIDDER_2);
        claim_eq!(host.state().escrow_balance(), Amount::zero());

        let ctx = receive_ctx(BIDDER_1, AUCTION_END + 10);
        let result = contract_claim(&ctx, &mut host, &mut logger);
        expect_error(
            result,
            CustomContractError::NotWinner.into(),
            "Claiming as the beaten bidder should fail",
        );

        mock_item_transfer(&mut host);
        let ctx = receive_ctx(BIDDER_2, AUCTION_END + 10);
        contract_claim(&ctx, &mut host, &mut logger).expect_report("The winner's claim should pass");
        claim_eq!(host.state().phase, AuctionPhase::Claimed);

        let result = contract_claim(&ctx, &mut host, &mut logger);
        expect_error(
            result,
            CustomContractError::AlreadyClaimed.into(),
            "Claiming a second time should fail",
        );

        let ctx = receive_ctx(BIDDER_1, AUCTION_END + 20);
        let result = contract_claim(&ctx, &mut host, &mut logger);
        expect_error(
            result,
            CustomContractError::NotWinner.into(),
            "Claiming as a non-winner after the claim should fail",
        );
    }

    #[concordium_test]
    /// Claims are gated on settlement, not on the deadline alone.
    fn test_claim_before_settlement() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        place_bid(&mut host, BIDDER_1, 150, 10, &mut logger).expect_report("Bid should pass");

        let ctx = receive_ctx(BIDDER_1, AUCTION_END + 10);
        let result = contract_claim(&ctx, &mut host, &mut logger);
        expect_error(
            result,
            CustomContractError::NotYetEnded.into(),
            "Claiming before settlement should fail",
        );
    }

    #[concordium_test]
    /// After a no-bid settlement there is no winner, so every claim is
    /// rejected, including the seller's.
    fn test_claim_after_no_bid_settlement() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();
        mock_item_transfer(&mut host);

        let ctx = receive_ctx(OUTSIDER, AUCTION_END);
        contract_settle(&ctx, &mut host, &mut logger)
            .expect_report("Settling without bids should pass");

        let ctx = receive_ctx(SELLER, AUCTION_END + 10);
        let result = contract_claim(&ctx, &mut host, &mut logger);
        expect_error(
            result,
            CustomContractError::NotWinner.into(),
            "Claiming as the seller should fail",
        );

        let ctx = receive_ctx(OUTSIDER, AUCTION_END + 10);
        let result = contract_claim(&ctx, &mut host, &mut logger);
        expect_error(
            result,
            CustomContractError::NotWinner.into(),
            "Claiming as an outsider should fail",
        );
    }

    #[concordium_test]
    /// The view reports the seller as leading bidder until the first bid
    /// is placed, and tracks the standing bid afterwards.
    fn test_view() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();

        let ctx = receive_ctx(OUTSIDER, 10);
        let view = contract_view(&ctx, &host).expect_report("View should pass");
        claim_eq!(
            view,
            ViewState {
                item: item(),
                seller: SELLER,
                min_bid: Amount::from_micro_ccd(MIN_BID),
                end_time: Timestamp::from_timestamp_millis(AUCTION_END),
                current_bid: Amount::from_micro_ccd(MIN_BID),
                highest_bidder: SELLER,
                escrow_balance: Amount::zero(),
                ended: false,
            }
        );

        place_bid(&mut host, BIDDER_1, 150, 10, &mut logger).expect_report("Bid should pass");

        let view = contract_view(&ctx, &host).expect_report("View should pass");
        claim_eq!(view.current_bid, Amount::from_micro_ccd(150));
        claim_eq!(view.highest_bidder, BIDDER_1);
        claim_eq!(view.escrow_balance, Amount::from_micro_ccd(150));
        claim!(!view.ended);
    }
}
