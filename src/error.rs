use thiserror::Error;

/// Reasons a user action is refused. None of these are fatal; they surface
/// as notices in the feed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("Insufficient funds! Need {needed:.4} ETH, have {available:.4} ETH")]
    InsufficientFunds { needed: f64, available: f64 },
    #[error("Must select between {min} and {max} coins ({selected} selected)")]
    InvalidPackSize {
        selected: usize,
        min: usize,
        max: usize,
    },
    #[error("Pack is full: at most {max} coins")]
    PackFull { max: usize },
    #[error("Mint already in progress")]
    MintInFlight,
    #[error("No packs to sell")]
    NothingToSell,
    #[error("No packs available to stake")]
    NothingToStake,
    #[error("No staked packs")]
    NothingStaked,
    #[error("No funds to withdraw.")]
    NoFundsToWithdraw,
}
