//! Request payloads understood by the full node.
//!
//! Field names are the node's wire keys and must not be renamed. Every
//! address is in canonical hex form and every human readable string is
//! already hex encoded when one of these structs is built.

use crate::response::Envelope;
use crate::static_values::*;
use crate::types::Resource;
use serde::Serialize;

pub trait Contract: Serialize + Send + Sync {
    /// Endpoint path, relative to the node url.
    fn endpoint(&self) -> &'static str;

    /// How to tell a failed answer from an unsigned transaction.
    fn envelope(&self) -> Envelope {
        Envelope::Plain
    }
}

macro_rules! contracts {
    [$(
        $name:ident => $endpoint:ident {
            $(
                $field:ident : $ty:ty
            ),*
        }
    ),*] => {
        $(
            #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
            pub struct $name {
                $(
                    pub $field: $ty,
                )*
            }

            impl Contract for $name {
                fn endpoint(&self) -> &'static str {
                    $endpoint
                }
            }
        )*
    };
}

contracts![
    TransferContract => CREATE_TRANSACTION {
        to_address: String,
        owner_address: String,
        amount: i64
    },

    TransferAssetContract => TRANSFER_ASSET {
        to_address: String,
        owner_address: String,
        asset_name: String,
        amount: i64
    },

    ParticipateAssetIssueContract => PARTICIPATE_ASSET_ISSUE {
        to_address: String,
        owner_address: String,
        asset_name: String,
        amount: i64
    },

    FreezeBalanceContract => FREEZE_BALANCE {
        owner_address: String,
        frozen_balance: i64,
        frozen_duration: i64,
        resource: Resource
    },

    UnfreezeBalanceContract => UNFREEZE_BALANCE {
        owner_address: String
    },

    WithdrawBalanceContract => WITHDRAW_BALANCE {
        owner_address: String
    },

    WitnessCreateContract => CREATE_WITNESS {
        owner_address: String,
        url: String
    },

    VoteWitnessContract => VOTE_WITNESS_ACCOUNT {
        owner_address: String,
        votes: Vec<VoteEntry>
    },

    CreateSmartContract => DEPLOY_CONTRACT {
        owner_address: String,
        fee_limit: i64,
        call_value: i64,
        consume_user_resource_percent: i64,
        abi: String,
        bytecode: String,
        parameter: String
    },

    AssetIssueContract => CREATE_ASSET_ISSUE {
        owner_address: String,
        name: String,
        abbr: String,
        description: String,
        url: String,
        total_supply: i64,
        trx_num: i64,
        num: i64,
        start_time: i64,
        end_time: i64,
        free_asset_net_limit: i64,
        public_free_asset_net_limit: i64,
        frozen_supply: FrozenSupply
    },

    UpdateAssetContract => UPDATE_ASSET {
        owner_address: String,
        description: String,
        url: String,
        new_limit: i64,
        new_public_limit: i64
    }
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteEntry {
    pub vote_address: String,
    pub vote_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrozenSupply {
    pub frozen_amount: i64,
    pub frozen_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerSmartContract {
    pub contract_address: String,
    pub owner_address: String,
    pub function_selector: String,
    pub fee_limit: i64,
    pub call_value: i64,
    pub parameter: String,
}

impl Contract for TriggerSmartContract {
    fn endpoint(&self) -> &'static str {
        TRIGGER_SMART_CONTRACT
    }

    fn envelope(&self) -> Envelope {
        Envelope::Flagged
    }
}
