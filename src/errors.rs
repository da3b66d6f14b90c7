use error_stack::{Context, Report};
use std::fmt;
use thiserror::Error;

macro_rules! root_errors {
    [$(
        $errname:ident : $msg:literal {
            $(
                $var:ident($nested:ident)
            ),*
        }

    ),*] => {
        $(
            #[derive(Debug, Error)]
            pub enum $errname {
                $(
                    #[error("{} -> {}: {0}", $msg, stringify!($var))]
                    $var($nested),
                )*
            }
        )*
    };
}

macro_rules! sub_errors {
    [$(
        $name:ident {
            $(
                $var:ident : $msg:literal
            ),*
        }
    ),*] => {
        $(
            #[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
            pub enum $name {
                $(
                    #[error($msg)]
                    $var,
                )*
            }
        )*
    }
}

root_errors![

    BuilderError : "Error ocurred while building a transaction request" {
        Validation(ValidationErrorKind),
        Encoding(EncodingErrorKind),
        Remote(RemoteErrorKind),
        Transport(TransportErrorKind)
    },

    ProviderError : "Error ocurred while requesting the full node" {
        Http(HttpErrorKind)
    }
];

sub_errors![
    ValidationErrorKind {
        InvalidRecipient: "Invalid recipient address provided",
        InvalidAmount: "Invalid amount provided",
        InvalidOrigin: "Invalid origin address provided",
        SameAccountTrx: "Cannot transfer TRX to the same account",
        SameAccountToken: "Cannot transfer tokens to the same account",
        InvalidTokenId: "Invalid token ID provided",
        InvalidIssuer: "Invalid issuer address provided",
        InvalidBuyer: "Invalid buyer address provided",
        InvalidAddress: "Invalid address provided",
        InvalidDuration: "Invalid duration provided, minimum of 3 days",
        InvalidUrl: "Invalid url provided",
        InvalidVotes: "Invalid votes object provided",
        InvalidVoter: "Invalid voter address provided",
        InvalidCandidate: "Invalid SR address provided",
        InvalidVoteCount: "Invalid vote count provided for SR",
        InvalidAbi: "Invalid options.abi provided",
        InvalidBytecode: "Invalid options.bytecode provided",
        InvalidFeeLimitOption: "Invalid options.feeLimit provided",
        InvalidCallValueOption: "Invalid options.callValue provided",
        PayableWithoutValue: "When contract is payable, options.callValue must be a positive integer",
        NotPayableWithValue: "When contract is not payable, options.callValue must be 0",
        InvalidUserFeePercentage: "Invalid options.userFeePercentage provided",
        InvalidParameterType: "Invalid parameter type provided",
        InvalidContractAddress: "Invalid contract address provided",
        InvalidFunctionSelector: "Invalid function selector provided",
        InvalidCallValue: "Invalid call value provided",
        InvalidFeeLimit: "Invalid fee limit provided",
        InvalidTokenName: "Invalid token name provided",
        InvalidTokenAbbreviation: "Invalid token abbreviation provided",
        InvalidSupply: "Invalid supply amount provided",
        InvalidTrxRatio: "TRX ratio must be a positive integer",
        InvalidTokenRatio: "Token ratio must be a positive integer",
        InvalidSaleStart: "Invalid sale start timestamp provided",
        InvalidSaleEnd: "Invalid sale end timestamp provided",
        InvalidTokenDescription: "Invalid token description provided",
        InvalidTokenUrl: "Invalid token url provided",
        InvalidFreeBandwidth: "Invalid free bandwidth amount provided",
        InvalidFreeBandwidthLimit: "Invalid free bandwidth limit provided",
        InvalidFrozenSupply: "Invalid frozen supply provided",
        InvalidFrozenDuration: "Invalid frozen duration provided"
    },
    EncodingErrorKind {
        Parameters: "failed to encode contract parameters",
        Abi: "failed to serialize contract abi",
        Payload: "failed to serialize request payload"
    },
    RemoteErrorKind {
        Protocol: "full node returned an error",
        Application: "full node rejected the transaction"
    },
    TransportErrorKind {
        Request: "request to the full node failed"
    },
    HttpErrorKind {
        Config: "failed to configure http client",
        Url: "invalid full node url",
        Send: "failed to send request",
        Status: "full node answered with an error status",
        Decode: "failed to decode full node response"
    }
];

/// Human readable failure reason carried by a report.
///
/// Validation errors naming an offending value, encoder messages and
/// messages returned by the full node are attached as a `Detail` so the
/// caller gets them back verbatim through [`reason`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail(pub String);

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl BuilderError {
    /// Message of the innermost kind, without the root prefix.
    pub fn message(&self) -> String {
        match self {
            BuilderError::Validation(kind) => kind.to_string(),
            BuilderError::Encoding(kind) => kind.to_string(),
            BuilderError::Remote(kind) => kind.to_string(),
            BuilderError::Transport(kind) => kind.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, BuilderError::Validation(_))
    }
}

/// Short description of why an operation failed.
pub fn reason(report: &Report<BuilderError>) -> String {
    match report.downcast_ref::<Detail>() {
        Some(detail) => detail.0.clone(),
        None => report.current_context().message(),
    }
}

pub(crate) fn with_detail<C: Context>(report: Report<C>, detail: String) -> Report<C> {
    report.attach(Detail(detail.clone())).attach_printable(detail)
}
