use commons::{ContractTokenAmount, CustomContractError, Token, TransferParameter};
use concordium_cis2::{AdditionalData, Receiver, Transfer, TransferParams};
use concordium_std::*;

/// Move the token through its CIS2 contract.
///
/// The auction instance holds the item while it is in escrow, so `from`
/// is the instance address for every release.
pub fn transfer<T>(
    host: &mut impl HasHost<T>,
    token: &Token,
    from: Address,
    to: AccountAddress,
) -> Result<(), CustomContractError> {
    let parameter: TransferParameter = TransferParams(vec![Transfer {
        token_id: token.id.clone(),
        amount: ContractTokenAmount::from(1),
        from,
        to: Receiver::Account(to),
        data: AdditionalData::empty(),
    }]);

    host.invoke_contract(
        &token.contract,
        &parameter,
        EntrypointName::new_unchecked("transfer"),
        Amount::zero(),
    )?;

    Ok(())
}

#[concordium_cfg_test]
mod tests {
    use concordium_cis2::TokenIdVec;
    use concordium_std::test_infrastructure::*;

    use super::*;

    const NFT_CONTRACT: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };

    const USER_1: AccountAddress = AccountAddress([1; 32]);

    #[concordium_test]
    fn test_transfer() {
        let state = ();
        let state_builder = TestStateBuilder::default();
        let mut host = TestHost::new(state, state_builder);

        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            MockFn::new(|param, _amount, _balance, _state| {
                TransferParameter::deserial(&mut Cursor::new(param.as_ref()))
                    .map_err(|_| CallContractError::Trap)?;
                Ok((true, ()))
            }),
        );

        let response = transfer(
            &mut host,
            &Token {
                contract: NFT_CONTRACT,
                id: TokenIdVec([1; 32].into()),
            },
            Address::Contract(NFT_CONTRACT),
            USER_1,
        );

        claim_eq!(response, Ok(()))
    }
}
