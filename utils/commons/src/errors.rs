use super::*;

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Only account addresses can interact with the auction (Error code: -4).
    OnlyAccountAddress,
    /// Opening price or bidding window duration is zero (Error code: -5).
    InvalidParameters,
    /// A bid of zero was placed (Error code: -6).
    ZeroBid,
    /// Bid does not exceed the standing bid (Error code: -7).
    BidTooLow,
    /// Bid was placed at or after the auction deadline (Error code: -8).
    Expired,
    /// Settlement was attempted before the deadline, or a claim was
    /// attempted before settlement (Error code: -9).
    NotYetEnded,
    /// The auction was already settled (Error code: -10).
    AlreadyEnded,
    /// The escrowed item was already claimed (Error code: -11).
    AlreadyClaimed,
    /// Caller is not the auction winner (Error code: -12).
    NotWinner,
    /// Failed to invoke a contract (Error code: -13).
    InvokeContractError,
    /// Failed to invoke a transfer (Error code: -14).
    InvokeTransferError,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping errors related to transfer invocations to CustomContractError.
impl From<TransferError> for CustomContractError {
    fn from(_te: TransferError) -> Self {
        Self::InvokeTransferError
    }
}

/// Mapping CustomContractError to ContractError
impl From<CustomContractError> for ContractError {
    fn from(c: CustomContractError) -> Self {
        Cis2Error::Custom(c)
    }
}
