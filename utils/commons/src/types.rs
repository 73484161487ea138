use super::*;

pub type ContractResult<A> = Result<A, ContractError>;

/// Contract token ID type.
/// Token identifiers are issued by the NFT contract, so the unrestricted
/// variable-length representation is used here.
pub type ContractTokenId = TokenIdVec;

/// Contract token amount type.
pub type ContractTokenAmount = TokenAmountU64;

/// Wrapping the custom errors in a type with CIS2 errors.
pub type ContractError = Cis2Error<CustomContractError>;

pub type TransferParameter = TransferParams<ContractTokenId, ContractTokenAmount>;
