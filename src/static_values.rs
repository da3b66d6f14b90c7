// full node endpoints
pub static CREATE_TRANSACTION: &str = "wallet/createtransaction";
pub static TRANSFER_ASSET: &str = "wallet/transferasset";
pub static PARTICIPATE_ASSET_ISSUE: &str = "wallet/participateassetissue";
pub static FREEZE_BALANCE: &str = "wallet/freezebalance";
pub static UNFREEZE_BALANCE: &str = "wallet/unfreezebalance";
pub static WITHDRAW_BALANCE: &str = "wallet/withdrawbalance";
pub static CREATE_WITNESS: &str = "wallet/createwitness";
pub static VOTE_WITNESS_ACCOUNT: &str = "wallet/votewitnessaccount";
pub static DEPLOY_CONTRACT: &str = "wallet/deploycontract";
pub static TRIGGER_SMART_CONTRACT: &str = "wallet/triggersmartcontract";
pub static CREATE_ASSET_ISSUE: &str = "wallet/createassetissue";
pub static UPDATE_ASSET: &str = "wallet/updateasset";

// addresses
pub static ADDRESS_PREFIX: &str = "41";
pub static ADDRESS_PREFIX_BYTE: u8 = 0x41;
pub static ADDRESS_SIZE: usize = 21;
pub static BASE58_ADDRESS_LENGTH: usize = 34;
pub static CHECKSUM_SIZE: usize = 4;
pub static ABI_ADDRESS_PREFIX: &str = "0x";

// network policy
pub static MIN_FREEZE_DURATION: i64 = 3;
pub static DEFAULT_FEE_LIMIT: i64 = 1_000_000_000;
pub static MAX_FEE_LIMIT: i64 = 1_000_000_000;
pub static MAX_USER_FEE_PERCENTAGE: i64 = 100;

// http provider
pub static DEFAULT_NODE_URL: &str = "http://127.0.0.1:8090";
pub static DEFAULT_TIMEOUT_SECS: u64 = 30;
