use crate::abi::{AbiEncoder, StandardAbiEncoder};
use crate::address::{AddressFormat, Base58Address};
use crate::errors::*;
use crate::provider::{HttpMethod, NodeRequest};
use crate::response;
use crate::static_values::*;
use crate::tools;
use crate::transaction::*;
use crate::types::*;

use error_stack::{IntoReport, Report, Result, ResultExt};
use log::{debug, info};
use serde_json::Value;
use std::sync::Arc;

/// Builds unsigned transactions through a full node.
///
/// Each operation validates its arguments in a fixed order, normalizes
/// addresses to canonical hex and strings to their raw encoding, and only
/// then sends exactly one request. A failed check returns before anything
/// is sent.
///
/// Optional owner addresses fall back to the default address set with
/// [`TransactionBuilder::with_default_address`]; without one, omitting the
/// owner fails that operation's address check.
#[derive(Clone)]
pub struct TransactionBuilder {
    node: Arc<dyn NodeRequest>,
    address: Arc<dyn AddressFormat>,
    abi: Arc<dyn AbiEncoder>,
    default_address: Option<String>,
}

fn invalid<T>(kind: ValidationErrorKind) -> Result<T, BuilderError> {
    debug!("rejected: {}", kind);
    Err(Report::new(BuilderError::Validation(kind)))
}

fn ensure(condition: bool, kind: ValidationErrorKind) -> Result<(), BuilderError> {
    if condition {
        return Ok(());
    }
    invalid(kind)
}

fn reject<T>(kind: ValidationErrorKind, value: &str) -> Result<T, BuilderError> {
    let detail = format!("{}: {}", kind, value);
    debug!("rejected: {}", detail);
    Err(with_detail(
        Report::new(BuilderError::Validation(kind)),
        detail,
    ))
}

impl TransactionBuilder {
    pub fn new(node: Arc<dyn NodeRequest>) -> TransactionBuilder {
        TransactionBuilder {
            node,
            address: Arc::new(Base58Address),
            abi: Arc::new(StandardAbiEncoder),
            default_address: None,
        }
    }

    pub fn with_default_address(mut self, address: impl Into<String>) -> Self {
        self.default_address = Some(address.into());
        self
    }

    pub fn with_address_format(mut self, format: Arc<dyn AddressFormat>) -> Self {
        self.address = format;
        self
    }

    pub fn with_abi_encoder(mut self, encoder: Arc<dyn AbiEncoder>) -> Self {
        self.abi = encoder;
        self
    }

    pub fn default_address(&self) -> Option<&str> {
        self.default_address.as_deref()
    }

    fn owner<'a>(&'a self, address: Option<&'a str>) -> &'a str {
        address.or(self.default_address.as_deref()).unwrap_or("")
    }

    fn is_address(&self, address: &str) -> bool {
        self.address.is_valid(address)
    }

    fn hex(&self, address: &str) -> String {
        self.address.to_hex(address)
    }

    async fn submit<C: Contract>(&self, contract: C) -> Result<UnsignedTransaction, BuilderError> {
        let endpoint = contract.endpoint();
        let payload = serde_json::to_value(&contract)
            .into_report()
            .change_context(BuilderError::Encoding(EncodingErrorKind::Payload))?;

        info!("requesting {}", endpoint);
        debug!("payload: {}", payload);

        let answer = self
            .node
            .request(endpoint, payload, HttpMethod::Post)
            .await
            .map_err(|report| {
                let message = report.current_context().to_string();
                with_detail(
                    report.change_context(BuilderError::Transport(TransportErrorKind::Request)),
                    message,
                )
            })?;

        response::classify(answer, contract.envelope()).into_result()
    }

    /// Canonical hex re-framed the way ABI addresses are written.
    fn abi_address(&self, value: &Value) -> Value {
        match value {
            Value::String(address) => {
                let hex = self.hex(address);
                match hex.strip_prefix(ADDRESS_PREFIX) {
                    Some(body) if hex.len() == ADDRESS_SIZE * 2 => {
                        Value::String(format!("{}{}", ABI_ADDRESS_PREFIX, body))
                    }
                    _ => Value::String(hex),
                }
            }
            Value::Array(items) => Value::Array(items.iter().map(|v| self.abi_address(v)).collect()),
            other => other.clone(),
        }
    }

    /// Packs constructor or call parameters; an empty list encodes to `""`.
    pub fn encode_parameters(
        &self,
        parameters: &[ContractParameter],
    ) -> Result<String, BuilderError> {
        if parameters.is_empty() {
            return Ok(String::new());
        }

        let mut types = Vec::with_capacity(parameters.len());
        let mut values = Vec::with_capacity(parameters.len());

        for parameter in parameters {
            if parameter.kind.is_empty() {
                return reject(ValidationErrorKind::InvalidParameterType, &parameter.kind);
            }

            let value = if parameter.is_address() {
                self.abi_address(&parameter.value)
            } else {
                parameter.value.clone()
            };

            types.push(parameter.kind.clone());
            values.push(value);
        }

        let encoded = self.abi.encode(&types, &values).map_err(|report| {
            let message = report.current_context().to_string();
            debug!("parameter encoding failed: {}", message);
            with_detail(
                report.change_context(BuilderError::Encoding(EncodingErrorKind::Parameters)),
                message,
            )
        })?;

        Ok(encoded.trim_start_matches("0x").to_string())
    }

    pub async fn send_trx(
        &self,
        to: &str,
        amount: i64,
        from: Option<&str>,
    ) -> Result<UnsignedTransaction, BuilderError> {
        let from = self.owner(from);

        ensure(self.is_address(to), ValidationErrorKind::InvalidRecipient)?;
        ensure(amount > 0, ValidationErrorKind::InvalidAmount)?;
        ensure(self.is_address(from), ValidationErrorKind::InvalidOrigin)?;

        let to = self.hex(to);
        let from = self.hex(from);
        ensure(to != from, ValidationErrorKind::SameAccountTrx)?;

        self.submit(TransferContract {
            to_address: to,
            owner_address: from,
            amount,
        })
        .await
    }

    pub async fn send_token(
        &self,
        to: &str,
        amount: i64,
        token_id: &str,
        from: Option<&str>,
    ) -> Result<UnsignedTransaction, BuilderError> {
        let from = self.owner(from);

        ensure(self.is_address(to), ValidationErrorKind::InvalidRecipient)?;
        ensure(amount > 0, ValidationErrorKind::InvalidAmount)?;
        ensure(!token_id.is_empty(), ValidationErrorKind::InvalidTokenId)?;
        ensure(self.is_address(from), ValidationErrorKind::InvalidOrigin)?;

        let to = self.hex(to);
        let from = self.hex(from);
        ensure(to != from, ValidationErrorKind::SameAccountToken)?;

        self.submit(TransferAssetContract {
            to_address: to,
            owner_address: from,
            asset_name: tools::from_utf8(token_id),
            amount,
        })
        .await
    }

    pub async fn send_asset(
        &self,
        to: &str,
        amount: i64,
        token_id: &str,
        from: Option<&str>,
    ) -> Result<UnsignedTransaction, BuilderError> {
        self.send_token(to, amount, token_id, from).await
    }

    /// Buys into a token sale; `amount` is paid in sun to the issuer.
    pub async fn purchase_token(
        &self,
        issuer: &str,
        token_id: &str,
        amount: i64,
        buyer: Option<&str>,
    ) -> Result<UnsignedTransaction, BuilderError> {
        let buyer = self.owner(buyer);

        ensure(self.is_address(issuer), ValidationErrorKind::InvalidIssuer)?;
        ensure(!token_id.is_empty(), ValidationErrorKind::InvalidTokenId)?;
        ensure(amount > 0, ValidationErrorKind::InvalidAmount)?;
        ensure(self.is_address(buyer), ValidationErrorKind::InvalidBuyer)?;

        self.submit(ParticipateAssetIssueContract {
            to_address: self.hex(issuer),
            owner_address: self.hex(buyer),
            asset_name: tools::from_utf8(token_id),
            amount,
        })
        .await
    }

    pub async fn purchase_asset(
        &self,
        issuer: &str,
        token_id: &str,
        amount: i64,
        buyer: Option<&str>,
    ) -> Result<UnsignedTransaction, BuilderError> {
        self.purchase_token(issuer, token_id, amount, buyer).await
    }

    /// Stakes `amount` sun for `duration` days (at least 3) in exchange for
    /// bandwidth or energy.
    pub async fn freeze_balance(
        &self,
        amount: i64,
        duration: Option<i64>,
        resource: Option<Resource>,
        address: Option<&str>,
    ) -> Result<UnsignedTransaction, BuilderError> {
        let address = self.owner(address);
        let duration = duration.unwrap_or(MIN_FREEZE_DURATION);

        ensure(self.is_address(address), ValidationErrorKind::InvalidAddress)?;
        ensure(amount > 0, ValidationErrorKind::InvalidAmount)?;
        ensure(
            duration >= MIN_FREEZE_DURATION,
            ValidationErrorKind::InvalidDuration,
        )?;

        self.submit(FreezeBalanceContract {
            owner_address: self.hex(address),
            frozen_balance: amount,
            frozen_duration: duration,
            resource: resource.unwrap_or_default(),
        })
        .await
    }

    pub async fn unfreeze_balance(
        &self,
        address: Option<&str>,
    ) -> Result<UnsignedTransaction, BuilderError> {
        let address = self.owner(address);
        ensure(self.is_address(address), ValidationErrorKind::InvalidAddress)?;

        self.submit(UnfreezeBalanceContract {
            owner_address: self.hex(address),
        })
        .await
    }

    pub async fn withdraw_block_rewards(
        &self,
        address: Option<&str>,
    ) -> Result<UnsignedTransaction, BuilderError> {
        let address = self.owner(address);
        ensure(self.is_address(address), ValidationErrorKind::InvalidAddress)?;

        self.submit(WithdrawBalanceContract {
            owner_address: self.hex(address),
        })
        .await
    }

    /// Registers `address` as a super representative candidate.
    pub async fn apply_for_sr(
        &self,
        url: &str,
        address: Option<&str>,
    ) -> Result<UnsignedTransaction, BuilderError> {
        let address = self.owner(address);

        ensure(self.is_address(address), ValidationErrorKind::InvalidAddress)?;
        ensure(tools::is_valid_url(url), ValidationErrorKind::InvalidUrl)?;

        self.submit(WitnessCreateContract {
            owner_address: self.hex(address),
            url: tools::from_utf8(url),
        })
        .await
    }

    /// Casts votes for candidates. Every entry is checked before the
    /// request is sent; one bad entry fails the whole vote.
    pub async fn vote(
        &self,
        votes: &[Vote<'_>],
        voter: Option<&str>,
    ) -> Result<UnsignedTransaction, BuilderError> {
        let voter = self.owner(voter);

        ensure(!votes.is_empty(), ValidationErrorKind::InvalidVotes)?;
        ensure(self.is_address(voter), ValidationErrorKind::InvalidVoter)?;

        let mut entries = Vec::with_capacity(votes.len());
        for (candidate, count) in votes.iter().copied() {
            if !self.is_address(candidate) {
                return reject(ValidationErrorKind::InvalidCandidate, candidate);
            }
            if count <= 0 {
                return reject(ValidationErrorKind::InvalidVoteCount, candidate);
            }
            entries.push(VoteEntry {
                vote_address: self.hex(candidate),
                vote_count: count,
            });
        }

        self.submit(VoteWitnessContract {
            owner_address: self.hex(voter),
            votes: entries,
        })
        .await
    }

    pub async fn create_smart_contract(
        &self,
        options: SmartContractOptions,
        issuer: Option<&str>,
    ) -> Result<UnsignedTransaction, BuilderError> {
        let issuer = self.owner(issuer);
        let SmartContractOptions {
            abi,
            bytecode,
            fee_limit,
            call_value,
            user_fee_percentage,
            parameters,
        } = options;

        let abi = match abi.map(ContractAbi::entries) {
            Some(Ok(entries)) => entries,
            Some(Err(err)) => {
                debug!("rejected abi: {}", err);
                return Err(Report::new(err)
                    .change_context(BuilderError::Validation(ValidationErrorKind::InvalidAbi)));
            }
            None => return invalid(ValidationErrorKind::InvalidAbi),
        };
        let payable = abi.iter().any(AbiEntry::is_payable_constructor);

        ensure(tools::is_hex(&bytecode), ValidationErrorKind::InvalidBytecode)?;
        ensure(
            fee_limit > 0 && fee_limit <= MAX_FEE_LIMIT,
            ValidationErrorKind::InvalidFeeLimitOption,
        )?;
        ensure(call_value >= 0, ValidationErrorKind::InvalidCallValueOption)?;
        ensure(
            !payable || call_value > 0,
            ValidationErrorKind::PayableWithoutValue,
        )?;
        ensure(
            payable || call_value == 0,
            ValidationErrorKind::NotPayableWithValue,
        )?;
        ensure(
            (0..=MAX_USER_FEE_PERCENTAGE).contains(&user_fee_percentage),
            ValidationErrorKind::InvalidUserFeePercentage,
        )?;
        ensure(self.is_address(issuer), ValidationErrorKind::InvalidIssuer)?;

        let parameter = self.encode_parameters(&parameters)?;
        let abi = serde_json::to_string(&abi)
            .into_report()
            .change_context(BuilderError::Encoding(EncodingErrorKind::Abi))?;

        self.submit(CreateSmartContract {
            owner_address: self.hex(issuer),
            fee_limit,
            call_value,
            consume_user_resource_percent: user_fee_percentage,
            abi,
            bytecode,
            parameter,
        })
        .await
    }

    /// Calls `function_selector` (e.g. `transfer(address,uint256)`) on a
    /// deployed contract. The node answers with a result envelope; a false
    /// result flag or a message in it fails the call.
    pub async fn trigger_smart_contract(
        &self,
        contract_address: &str,
        function_selector: &str,
        options: TriggerOptions,
        issuer: Option<&str>,
    ) -> Result<UnsignedTransaction, BuilderError> {
        let issuer = self.owner(issuer);
        let TriggerOptions {
            fee_limit,
            call_value,
            parameters,
        } = options;
        let function_selector: String = function_selector
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        ensure(
            self.is_address(contract_address),
            ValidationErrorKind::InvalidContractAddress,
        )?;
        ensure(
            !function_selector.is_empty(),
            ValidationErrorKind::InvalidFunctionSelector,
        )?;
        ensure(call_value >= 0, ValidationErrorKind::InvalidCallValue)?;
        ensure(
            fee_limit > 0 && fee_limit <= MAX_FEE_LIMIT,
            ValidationErrorKind::InvalidFeeLimit,
        )?;
        ensure(self.is_address(issuer), ValidationErrorKind::InvalidIssuer)?;

        let parameter = self.encode_parameters(&parameters)?;

        self.submit(TriggerSmartContract {
            contract_address: self.hex(contract_address),
            owner_address: self.hex(issuer),
            function_selector,
            fee_limit,
            call_value,
            parameter,
        })
        .await
    }

    /// Issues a new token with a sale window starting in the future.
    pub async fn create_token(
        &self,
        options: CreateTokenOptions,
        issuer: Option<&str>,
    ) -> Result<UnsignedTransaction, BuilderError> {
        let now = tools::now_millis();
        let issuer = self.owner(issuer);
        let sale_start = options.sale_start.unwrap_or(now);

        ensure(!options.name.is_empty(), ValidationErrorKind::InvalidTokenName)?;
        ensure(
            !options.abbreviation.is_empty(),
            ValidationErrorKind::InvalidTokenAbbreviation,
        )?;
        ensure(options.total_supply > 0, ValidationErrorKind::InvalidSupply)?;
        ensure(options.trx_ratio > 0, ValidationErrorKind::InvalidTrxRatio)?;
        ensure(options.token_ratio > 0, ValidationErrorKind::InvalidTokenRatio)?;
        ensure(sale_start >= now, ValidationErrorKind::InvalidSaleStart)?;
        let sale_end = match options.sale_end {
            Some(end) if end > sale_start => end,
            _ => return invalid(ValidationErrorKind::InvalidSaleEnd),
        };
        ensure(
            !options.description.is_empty(),
            ValidationErrorKind::InvalidTokenDescription,
        )?;
        ensure(
            tools::is_valid_url(&options.url),
            ValidationErrorKind::InvalidTokenUrl,
        )?;
        ensure(
            options.free_bandwidth >= 0,
            ValidationErrorKind::InvalidFreeBandwidth,
        )?;
        ensure(
            options.free_bandwidth_limit >= 0
                && !(options.free_bandwidth > 0 && options.free_bandwidth_limit == 0),
            ValidationErrorKind::InvalidFreeBandwidthLimit,
        )?;
        ensure(
            options.frozen_amount >= 0
                && !(options.frozen_duration == 0 && options.frozen_amount > 0),
            ValidationErrorKind::InvalidFrozenSupply,
        )?;
        ensure(
            options.frozen_duration >= 0
                && !(options.frozen_duration > 0 && options.frozen_amount == 0),
            ValidationErrorKind::InvalidFrozenDuration,
        )?;
        ensure(self.is_address(issuer), ValidationErrorKind::InvalidIssuer)?;

        self.submit(AssetIssueContract {
            owner_address: self.hex(issuer),
            name: tools::from_utf8(&options.name),
            abbr: tools::from_utf8(&options.abbreviation),
            description: tools::from_utf8(&options.description),
            url: tools::from_utf8(&options.url),
            total_supply: options.total_supply,
            trx_num: options.trx_ratio,
            num: options.token_ratio,
            start_time: sale_start,
            end_time: sale_end,
            free_asset_net_limit: options.free_bandwidth,
            public_free_asset_net_limit: options.free_bandwidth_limit,
            frozen_supply: FrozenSupply {
                frozen_amount: options.frozen_amount,
                frozen_days: options.frozen_duration,
            },
        })
        .await
    }

    pub async fn create_asset(
        &self,
        options: CreateTokenOptions,
        issuer: Option<&str>,
    ) -> Result<UnsignedTransaction, BuilderError> {
        self.create_token(options, issuer).await
    }

    pub async fn update_token(
        &self,
        options: UpdateTokenOptions,
        issuer: Option<&str>,
    ) -> Result<UnsignedTransaction, BuilderError> {
        let issuer = self.owner(issuer);

        ensure(
            !options.description.is_empty(),
            ValidationErrorKind::InvalidTokenDescription,
        )?;
        ensure(
            tools::is_valid_url(&options.url),
            ValidationErrorKind::InvalidTokenUrl,
        )?;
        ensure(
            options.free_bandwidth >= 0,
            ValidationErrorKind::InvalidFreeBandwidth,
        )?;
        ensure(
            options.free_bandwidth_limit >= 0
                && !(options.free_bandwidth > 0 && options.free_bandwidth_limit == 0),
            ValidationErrorKind::InvalidFreeBandwidthLimit,
        )?;
        ensure(self.is_address(issuer), ValidationErrorKind::InvalidIssuer)?;

        self.submit(UpdateAssetContract {
            owner_address: self.hex(issuer),
            description: tools::from_utf8(&options.description),
            url: tools::from_utf8(&options.url),
            new_limit: options.free_bandwidth,
            new_public_limit: options.free_bandwidth_limit,
        })
        .await
    }

    pub async fn update_asset(
        &self,
        options: UpdateTokenOptions,
        issuer: Option<&str>,
    ) -> Result<UnsignedTransaction, BuilderError> {
        self.update_token(options, issuer).await
    }
}
