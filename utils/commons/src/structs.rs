use super::*;

/// Reference to a non-fungible token held by a CIS2 compatible contract.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct Token {
    /// NFT contract address.
    pub contract: ContractAddress,
    /// NFT token identifier.
    pub id: ContractTokenId,
}
