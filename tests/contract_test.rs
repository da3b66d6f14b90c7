mod common;

use common::*;
use serde_json::{json, Value};
use trx_transaction_builder::abi::AbiError;
use trx_transaction_builder::errors::*;
use trx_transaction_builder::tools;
use trx_transaction_builder::types::*;

static BYTECODE: &str = "608060405234801561001057600080fd5b50";

fn constructor_abi(payable: bool) -> String {
    json!([
        {"type": "constructor", "payable": payable, "inputs": [], "stateMutability": if payable { "payable" } else { "nonpayable" }},
        {"type": "function", "name": "owner", "inputs": [], "outputs": [{"type": "address"}], "constant": true}
    ])
    .to_string()
}

fn deploy(payable: bool, call_value: i64) -> SmartContractOptions {
    SmartContractOptions {
        abi: Some(constructor_abi(payable).into()),
        bytecode: BYTECODE.to_string(),
        call_value,
        ..Default::default()
    }
}

#[tokio::test]
async fn deploy_payable_contract() {
    let node = MockNode::new();

    builder(&node)
        .create_smart_contract(deploy(true, 100), None)
        .await
        .unwrap();

    let request = node.last();
    assert_eq!(request.path, "wallet/deploycontract");
    let payload = request.payload;
    assert_eq!(payload["owner_address"], OWNER_HEX);
    assert_eq!(payload["call_value"], 100);
    assert_eq!(payload["fee_limit"], 1_000_000_000);
    assert_eq!(payload["consume_user_resource_percent"], 0);
    assert_eq!(payload["bytecode"], BYTECODE);
    assert_eq!(payload["parameter"], "");

    // the abi goes out as a json string with every key kept
    let abi: Value = serde_json::from_str(payload["abi"].as_str().unwrap()).unwrap();
    assert_eq!(abi, serde_json::from_str::<Value>(&constructor_abi(true)).unwrap());
}

#[tokio::test]
async fn payability_must_match_call_value() {
    let node = MockNode::new();

    let report = builder(&node)
        .create_smart_contract(deploy(true, 0), None)
        .await
        .unwrap_err();
    assert!(matches!(
        report.current_context(),
        BuilderError::Validation(ValidationErrorKind::PayableWithoutValue)
    ));
    assert_eq!(
        reason(&report),
        "When contract is payable, options.callValue must be a positive integer"
    );

    let report = builder(&node)
        .create_smart_contract(deploy(false, 10), None)
        .await
        .unwrap_err();
    assert!(matches!(
        report.current_context(),
        BuilderError::Validation(ValidationErrorKind::NotPayableWithValue)
    ));

    builder(&node)
        .create_smart_contract(deploy(false, 0), None)
        .await
        .unwrap();
    assert_eq!(node.count(), 1);
}

#[tokio::test]
async fn deploy_accepts_parsed_abi() {
    let node = MockNode::new();
    let abi = vec![AbiEntry {
        kind: Some("constructor".to_string()),
        payable: Some(true),
        ..Default::default()
    }];

    builder(&node)
        .create_smart_contract(
            SmartContractOptions {
                abi: Some(abi.into()),
                bytecode: format!("0x{}", BYTECODE),
                call_value: 1,
                user_fee_percentage: 30,
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();

    let payload = node.last().payload;
    assert_eq!(payload["abi"], r#"[{"type":"constructor","payable":true}]"#);
    assert_eq!(payload["consume_user_resource_percent"], 30);
}

#[tokio::test]
async fn deploy_option_validation() {
    let node = MockNode::new();
    let cases: Vec<(SmartContractOptions, &str)> = vec![
        (
            SmartContractOptions {
                abi: Some("{not json".into()),
                ..deploy(false, 0)
            },
            "Invalid options.abi provided",
        ),
        (
            SmartContractOptions {
                abi: Some(r#"{"type": "constructor"}"#.into()),
                ..deploy(false, 0)
            },
            "Invalid options.abi provided",
        ),
        (
            SmartContractOptions {
                abi: None,
                ..deploy(false, 0)
            },
            "Invalid options.abi provided",
        ),
        (
            SmartContractOptions {
                bytecode: "not hex".into(),
                ..deploy(false, 0)
            },
            "Invalid options.bytecode provided",
        ),
        (
            SmartContractOptions {
                fee_limit: 0,
                ..deploy(false, 0)
            },
            "Invalid options.feeLimit provided",
        ),
        (
            SmartContractOptions {
                fee_limit: 1_000_000_001,
                ..deploy(false, 0)
            },
            "Invalid options.feeLimit provided",
        ),
        (deploy(false, -1), "Invalid options.callValue provided"),
        (
            SmartContractOptions {
                user_fee_percentage: 101,
                ..deploy(false, 0)
            },
            "Invalid options.userFeePercentage provided",
        ),
        (
            SmartContractOptions {
                parameters: vec![ContractParameter::new("", 1)],
                ..deploy(false, 0)
            },
            "Invalid parameter type provided: ",
        ),
    ];

    for (options, expected) in cases {
        let report = builder(&node)
            .create_smart_contract(options, None)
            .await
            .unwrap_err();
        assert_eq!(reason(&report), expected);
    }

    let report = builder(&node)
        .create_smart_contract(deploy(false, 0), Some("issuer"))
        .await
        .unwrap_err();
    assert_eq!(reason(&report), "Invalid issuer address provided");

    assert_eq!(node.count(), 0);
}

#[tokio::test]
async fn constructor_parameters_are_encoded() {
    let node = MockNode::new();
    let (holder, holder_hex) = random_address();

    builder(&node)
        .create_smart_contract(
            SmartContractOptions {
                parameters: vec![
                    ContractParameter::new("address", holder.as_str()),
                    ContractParameter::new("uint256", 1000),
                ],
                ..deploy(false, 0)
            },
            None,
        )
        .await
        .unwrap();

    let parameter = node.last().payload["parameter"].as_str().unwrap().to_string();
    assert_eq!(
        parameter,
        format!("{:0>64}{:0>64}", &holder_hex[2..], "3e8")
    );
}

#[test]
fn address_parameters_use_abi_framing() {
    let node = MockNode::new();
    let builder = builder(&node);

    let encoded = builder
        .encode_parameters(&[ContractParameter::new("address", OWNER_BASE58)])
        .unwrap();

    assert!(!encoded.is_empty());
    assert!(!encoded.starts_with("0x"));
    assert_eq!(encoded, format!("{:0>64}", &OWNER_HEX[2..]));

    let encoded = builder
        .encode_parameters(&[ContractParameter::new(
            "address[]",
            json!([OWNER_BASE58, OWNER_HEX]),
        )])
        .unwrap();
    assert_eq!(
        encoded,
        format!(
            "{:0>64}{:0>64}{:0>64}{:0>64}",
            "20",
            "2",
            &OWNER_HEX[2..],
            &OWNER_HEX[2..]
        )
    );

    assert_eq!(builder.encode_parameters(&[]).unwrap(), "");
}

#[test]
fn encoder_errors_are_passed_through() {
    let node = MockNode::new();

    let report = builder(&node)
        .encode_parameters(&[ContractParameter::new("uint8", 300)])
        .unwrap_err();
    assert!(matches!(
        report.current_context(),
        BuilderError::Encoding(EncodingErrorKind::Parameters)
    ));
    let cause = report.downcast_ref::<AbiError>().unwrap();
    assert_eq!(reason(&report), cause.to_string());

    let report = builder(&node)
        .encode_parameters(&[ContractParameter::new("address", "not an address")])
        .unwrap_err();
    assert!(matches!(
        report.downcast_ref::<AbiError>(),
        Some(AbiError::InvalidValue { .. })
    ));
}

#[tokio::test]
async fn oversized_array_types_fail_without_request() {
    let node = MockNode::new();

    for kind in ["uint256[18446744073709551615]", "uint256[4294967296][4294967296]"] {
        let report = builder(&node)
            .create_smart_contract(
                SmartContractOptions {
                    parameters: vec![ContractParameter::new(kind, json!([]))],
                    ..deploy(false, 0)
                },
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(
            report.current_context(),
            BuilderError::Encoding(EncodingErrorKind::Parameters)
        ));
        assert!(report.downcast_ref::<AbiError>().is_some());
    }
    assert_eq!(node.count(), 0);
}

#[tokio::test]
async fn trigger_smart_contract() {
    let node = MockNode::answering(json!({
        "result": {"result": true},
        "transaction": {"txID": "aa", "raw_data": {}}
    }));
    let (contract, contract_hex) = random_address();
    let (recipient, recipient_hex) = random_address();

    let answer = builder(&node)
        .trigger_smart_contract(
            contract.as_str(),
            "transfer(address, uint256)",
            TriggerOptions {
                fee_limit: 10_000_000,
                parameters: vec![
                    ContractParameter::new("address", recipient.as_str()),
                    ContractParameter::new("uint256", "100"),
                ],
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(answer["transaction"]["txID"], "aa");

    let request = node.last();
    assert_eq!(request.path, "wallet/triggersmartcontract");
    assert_eq!(
        request.payload,
        json!({
            "contract_address": contract_hex,
            "owner_address": OWNER_HEX,
            "function_selector": "transfer(address,uint256)",
            "fee_limit": 10_000_000,
            "call_value": 0,
            "parameter": format!("{:0>64}{:0>64}", &recipient_hex[2..], "64")
        })
    );
}

#[tokio::test]
async fn trigger_validation() {
    let node = MockNode::new();
    let (contract, _) = random_address();

    let cases: Vec<(&str, &str, TriggerOptions, Option<&str>, &str)> = vec![
        ("x", "f()", TriggerOptions::default(), None, "Invalid contract address provided"),
        (contract.as_str(), " ", TriggerOptions::default(), None, "Invalid function selector provided"),
        (
            contract.as_str(),
            "f()",
            TriggerOptions {
                call_value: -1,
                ..Default::default()
            },
            None,
            "Invalid call value provided",
        ),
        (
            contract.as_str(),
            "f()",
            TriggerOptions {
                fee_limit: 2_000_000_000,
                ..Default::default()
            },
            None,
            "Invalid fee limit provided",
        ),
        (contract.as_str(), "f()", TriggerOptions::default(), Some("me"), "Invalid issuer address provided"),
    ];

    for (address, selector, options, issuer, expected) in cases {
        let report = builder(&node)
            .trigger_smart_contract(address, selector, options, issuer)
            .await
            .unwrap_err();
        assert_eq!(reason(&report), expected);
    }
    assert_eq!(node.count(), 0);
}

#[tokio::test]
async fn trigger_result_envelope() {
    let (contract, _) = random_address();

    let message = tools::from_utf8("REVERT opcode executed");
    let node = MockNode::answering(json!({"result": {"code": "CONTRACT_EXE_ERROR", "message": message}}));
    let report = builder(&node)
        .trigger_smart_contract(contract.as_str(), "f()", TriggerOptions::default(), None)
        .await
        .unwrap_err();
    assert!(matches!(
        report.current_context(),
        BuilderError::Remote(RemoteErrorKind::Application)
    ));
    assert_eq!(reason(&report), "REVERT opcode executed");

    let rejected = json!({"result": {"result": false}, "transaction": {}});
    let node = MockNode::answering(rejected.clone());
    let report = builder(&node)
        .trigger_smart_contract(contract.as_str(), "f()", TriggerOptions::default(), None)
        .await
        .unwrap_err();
    assert_eq!(report.downcast_ref::<Value>(), Some(&rejected));
}
