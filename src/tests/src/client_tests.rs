//! End-to-end tests of the ledger client against a mock node.

use mockito::{Matcher, Mock, Server};
use pigeonium_client::{ClientConfig, ClientError, CurrencyLookup, LedgerClient};
use pigeonium_core::{
    derive_address, Address, CurrencyId, CurrencyQuery, Transaction, UnsignedTransaction, Wallet,
};
use serde_json::{json, Value};

fn network_json(deploy_cost: u64) -> Value {
    json!({
        "networkName": "Pigeonium Testnet",
        "networkId": 11,
        "contractDeployCost": deploy_cost,
        "adminPublicKey": "ab".repeat(32),
        "baseCurrency": {
            "currencyId": "00".repeat(16),
            "name": "Pigeon",
            "symbol": "PGN",
            "issuer": "00".repeat(16),
            "supply": 1_000_000_000_000u64
        }
    })
}

fn mock_network(server: &mut Server, deploy_cost: u64) -> Mock {
    server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(network_json(deploy_cost).to_string())
        .create()
}

fn connect(server: &Server) -> LedgerClient {
    LedgerClient::connect(ClientConfig::for_node(server.url())).unwrap()
}

/// Returns `tx` as the node would after accepting it.
fn finalize(tx: &Transaction, index_id: u64) -> String {
    let mut finalized = tx.clone();
    finalized.index_id = Some(index_id);
    finalized.timestamp = Some(1_700_000_000 + index_id);
    serde_json::to_string(&finalized.to_wire()).unwrap()
}

/// Tests that connecting populates the network parameters.
#[test]
fn test_connect_synchronizes_network() {
    let mut server = Server::new();
    let mock = mock_network(&mut server, 1_000_000);

    let client = connect(&server);
    let network = client.network_info();

    assert_eq!(network.network_name, "Pigeonium Testnet");
    assert_eq!(network.network_id, 11);
    assert_eq!(network.contract_deploy_cost, 1_000_000);
    assert_eq!(network.admin_public_key, vec![0xab; 32]);
    assert_eq!(network.base_currency.currency_id, CurrencyId::ZERO);
    mock.assert();
}

/// Tests that a failed refresh keeps the previous parameters.
#[test]
fn test_refresh_is_all_or_nothing() {
    let mut server = Server::new();
    let first = mock_network(&mut server, 1_000_000);
    let mut client = connect(&server);
    first.assert();

    server
        .mock("GET", "/")
        .with_status(200)
        .with_body(r#"{"networkName": "Half", "networkId": 12}"#)
        .create();

    assert!(matches!(client.refresh_network_info(), Err(ClientError::Decode(_))));
    assert_eq!(client.network_info().network_name, "Pigeonium Testnet");
    assert_eq!(client.network_info().network_id, 11);
}

/// Tests that two clients keep their own network parameters.
#[test]
fn test_clients_are_scoped_per_network() {
    let mut cheap = Server::new();
    let mut dear = Server::new();
    mock_network(&mut cheap, 10);
    mock_network(&mut dear, 10_000);

    let a = connect(&cheap);
    let b = connect(&dear);
    assert_eq!(a.network_info().contract_deploy_cost, 10);
    assert_eq!(b.network_info().contract_deploy_cost, 10_000);
}

/// Tests that an unreachable node is a connectivity error.
#[test]
fn test_unreachable_node() {
    let config = ClientConfig {
        node: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
        page_limit: 20,
    };
    assert!(matches!(LedgerClient::connect(config), Err(ClientError::Connectivity(_))));
}

/// Tests that a submitted transfer carries a valid signature.
#[test]
fn test_send_transaction_signature_verifies() {
    let mut server = Server::new();
    mock_network(&mut server, 1_000_000);
    let wallet = Wallet::generate().unwrap();
    let dest = Address([0x5e; 16]);

    let expected = UnsignedTransaction::new(
        wallet.address(),
        dest,
        CurrencyId::ZERO,
        3_000_000,
        1_000,
        Vec::new(),
    )
    .sign(&wallet)
    .unwrap();

    let mock = server
        .mock("POST", "/transaction")
        .match_body(Matcher::Json(serde_json::to_value(expected.to_wire()).unwrap()))
        .with_status(200)
        .with_body(finalize(&expected, 301))
        .create();

    let client = connect(&server);
    let tx = client
        .send_transaction(&wallet, &dest, &CurrencyId::ZERO, 3_000_000, 1_000, &[])
        .unwrap();

    mock.assert();
    assert_eq!(tx.index_id, Some(301));
    assert_eq!(tx.timestamp, Some(1_700_000_301));
    assert!(tx.verify().is_ok());
}

/// Tests that error bodies reach the caller verbatim.
#[test]
fn test_http_error_body_is_verbatim() {
    let mut server = Server::new();
    mock_network(&mut server, 1_000_000);
    let body = r#"{"detail": "Insufficient balance: 12 < 3000000"}"#;
    server
        .mock("POST", "/transaction")
        .with_status(400)
        .with_body(body)
        .create();

    let wallet = Wallet::generate().unwrap();
    let client = connect(&server);
    let result = client.send_transaction(&wallet, &Address([1; 16]), &CurrencyId::ZERO, 3_000_000, 0, &[]);

    match result {
        Err(ClientError::Http { status, body: received }) => {
            assert_eq!(status, 400);
            assert_eq!(received, body);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

/// Tests contract calls carry the call data to the contract address.
#[test]
fn test_invoke_contract() {
    let mut server = Server::new();
    mock_network(&mut server, 1_000_000);
    let wallet = Wallet::generate().unwrap();
    let contract = derive_address("setVariable(transaction.inputData, b'1')");

    let mock = server
        .mock("POST", "/transaction")
        .match_body(Matcher::PartialJson(json!({
            "dest": contract.to_hex(),
            "inputData": hex::encode(b"vote:yes"),
            "amount": 0,
            "feeAmount": 0
        })))
        .with_status(200)
        .with_body({
            let tx = UnsignedTransaction::new(
                wallet.address(),
                contract,
                CurrencyId::ZERO,
                0,
                0,
                b"vote:yes".to_vec(),
            )
            .sign(&wallet)
            .unwrap();
            finalize(&tx, 9)
        })
        .create();

    let client = connect(&server);
    let tx = client
        .invoke_contract(&wallet, &contract, &CurrencyId::ZERO, 0, b"vote:yes")
        .unwrap();

    mock.assert();
    assert_eq!(tx.dest, contract);
    assert_eq!(tx.input_data, b"vote:yes".to_vec());
}

/// Tests that deploying a script twice targets the same address.
#[test]
fn test_deploy_same_script_twice() {
    let mut server = Server::new();
    mock_network(&mut server, 1_000_000);
    let wallet = Wallet::generate().unwrap();
    let script = "if transaction.inputData:\n    setVariable(transaction.inputData, b'Hello')";
    let address = derive_address(script);

    let payment = UnsignedTransaction::new(
        wallet.address(),
        Address::ZERO,
        CurrencyId::ZERO,
        1_000_000,
        0,
        address.as_bytes().to_vec(),
    )
    .sign(&wallet)
    .unwrap();

    let body_matcher = || Matcher::PartialJson(json!({
        "sender": wallet.address().to_hex(),
        "script": script,
        "deployTransaction": {
            "dest": "00".repeat(16),
            "amount": 1_000_000,
            "inputData": address.to_hex()
        }
    }));
    let first = server
        .mock("POST", "/contract")
        .match_body(body_matcher())
        .with_status(200)
        .with_body(finalize(&payment, 20))
        .create();

    let client = connect(&server);
    let deployed_first = client.deploy_contract(&wallet, script).unwrap();
    first.assert();

    server
        .mock("POST", "/contract")
        .match_body(body_matcher())
        .with_status(200)
        .with_body(finalize(&payment, 21))
        .create();
    let deployed_second = client.deploy_contract(&wallet, script).unwrap();

    assert_eq!(deployed_first.address, address);
    assert_eq!(deployed_first.address, deployed_second.address);
    assert_ne!(
        (deployed_first.transaction.index_id, deployed_first.transaction.timestamp),
        (deployed_second.transaction.index_id, deployed_second.transaction.timestamp)
    );
}

/// Tests that a refused deployment is reported with the node's message.
#[test]
fn test_deploy_rejected() {
    let mut server = Server::new();
    mock_network(&mut server, 1_000_000);
    server
        .mock("POST", "/contract")
        .with_status(403)
        .with_body("Contract already exists")
        .create();

    let wallet = Wallet::generate().unwrap();
    let result = connect(&server).deploy_contract(&wallet, "pass");
    match result {
        Err(ClientError::DeploymentRejected { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "Contract already exists");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

/// Tests that currency lookups keep "not found" apart from failures.
#[test]
fn test_currency_lookup_distinguishes_failures() {
    let mut server = Server::new();
    mock_network(&mut server, 1_000_000);
    let issuer = Address([0x77; 16]);
    server
        .mock("GET", "/currency")
        .match_query(Matcher::UrlEncoded("issuer".into(), issuer.to_hex()))
        .with_status(200)
        .with_body(
            json!({
                "currencyId": "0d".repeat(16),
                "name": "Token",
                "symbol": "TKN",
                "issuer": issuer.to_hex(),
                "supply": 5000
            })
            .to_string(),
        )
        .create();
    server
        .mock("GET", "/currency")
        .match_query(Matcher::UrlEncoded("name".into(), "Ghost".into()))
        .with_status(200)
        .with_body("null")
        .create();
    server
        .mock("GET", "/currency")
        .match_query(Matcher::UrlEncoded("symbol".into(), "BAD".into()))
        .with_status(200)
        .with_body(r#"{"currencyId": "zz"}"#)
        .create();

    let client = connect(&server);

    let found = client.lookup_currency(&CurrencyQuery::Issuer(issuer));
    assert!(found.is_found());
    assert_eq!(found.found().unwrap().currency_id, CurrencyId([0x0d; 16]));

    let ghost = client.lookup_currency(&CurrencyQuery::Name("Ghost".to_string()));
    assert!(matches!(ghost, CurrencyLookup::NotFound));

    let bad = client.lookup_currency(&CurrencyQuery::Symbol("BAD".to_string()));
    assert!(matches!(bad, CurrencyLookup::LookupFailed(ClientError::Decode(_))));
}

/// Tests single transaction retrieval.
#[test]
fn test_get_transaction() {
    let mut server = Server::new();
    mock_network(&mut server, 1_000_000);
    let wallet = Wallet::generate().unwrap();
    let tx = UnsignedTransaction::new(wallet.address(), Address([2; 16]), CurrencyId::ZERO, 5, 0, Vec::new())
        .sign(&wallet)
        .unwrap();

    server
        .mock("GET", "/transaction/4")
        .with_status(200)
        .with_body(finalize(&tx, 4))
        .create();
    server
        .mock("GET", "/transaction/5")
        .with_status(404)
        .with_body(r#"{"detail": "Transaction not found"}"#)
        .create();

    let client = connect(&server);
    let fetched = client.get_transaction(4).unwrap().unwrap();
    assert_eq!(fetched.index_id, Some(4));
    assert!(fetched.verify().is_ok());

    assert!(client.get_transaction(5).unwrap().is_none());
}

/// Tests balance endpoints.
#[test]
fn test_balances() {
    let mut server = Server::new();
    mock_network(&mut server, 1_000_000);
    let address = Address([0x31; 16]);
    server
        .mock("GET", format!("/balance/{}/{}", address.to_hex(), "00".repeat(16)).as_str())
        .with_status(200)
        .with_body(r#"{"amount": 4200}"#)
        .create();
    server
        .mock("GET", format!("/balances/{}", address.to_hex()).as_str())
        .with_status(200)
        .with_body(format!(r#"{{"{}": 4200, "{}": 3}}"#, "00".repeat(16), "0d".repeat(16)))
        .create();

    let client = connect(&server);
    assert_eq!(client.get_balance(&address, &CurrencyId::ZERO).unwrap(), 4200);

    let balances = client.get_balances(&address).unwrap();
    let entries: Vec<_> = balances.into_iter().collect();
    assert_eq!(entries, vec![(CurrencyId::ZERO, 4200), (CurrencyId([0x0d; 16]), 3)]);
}
