//! Tests for the command line wallet commands.

use mockito::{Matcher, Server};
use pigeonium_cli::commands::history::HistoryArgs;
use pigeonium_cli::commands::{address, export_key, history, import_key, init_wallet, transaction};
use pigeonium_cli::{CliError, KeyStore};
use pigeonium_client::ClientConfig;
use serde_json::json;
use tempfile::tempdir;

fn mock_network(server: &mut Server) {
    server
        .mock("GET", "/")
        .with_status(200)
        .with_body(
            json!({
                "networkName": "Pigeonium",
                "networkId": 1,
                "contractDeployCost": 1000,
                "adminPublicKey": "00".repeat(32),
                "baseCurrency": {
                    "currencyId": "00".repeat(16),
                    "name": "Pigeon",
                    "symbol": "PGN",
                    "issuer": "00".repeat(16),
                    "supply": 1000000
                }
            })
            .to_string(),
        )
        .create();
}

/// Tests moving a wallet between key stores.
#[test]
fn test_export_then_import_keeps_address() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("original.json");
    let copy = dir.path().join("copy.json");
    let from_phrase = dir.path().join("phrase.json");

    let (created, mnemonic) = init_wallet::run(&original, 0).unwrap();
    assert_eq!(address::run(&original).unwrap(), created);

    let exported = export_key::run(&original).unwrap();
    let imported = import_key::run(&copy, Some(exported.private_key.as_str()), None, 0).unwrap();
    assert_eq!(imported, created);

    let restored = import_key::run(&from_phrase, None, Some(mnemonic.as_str()), 0).unwrap();
    assert_eq!(restored, created);

    // Neither target may be overwritten
    let again = import_key::run(&copy, Some(exported.private_key.as_str()), None, 0);
    assert!(matches!(again, Err(CliError::KeyStoreError(_))));
}

/// Tests that an imported key is stored without a mnemonic.
#[test]
fn test_imported_key_store_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wallet.json");
    KeyStore::from_private_hex(&"07".repeat(32))
        .unwrap()
        .save(&path)
        .unwrap();

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored["private_key"], "07".repeat(32));
    assert!(stored.get("mnemonic").is_none());
}

/// Tests that the history of the wallet's own address is requested.
#[test]
fn test_history_of_own_address() {
    let dir = tempdir().unwrap();
    let wallet_path = dir.path().join("wallet.json");
    let (own, _) = init_wallet::run(&wallet_path, 0).unwrap();

    let mut server = Server::new();
    mock_network(&mut server);
    let mock = server
        .mock("GET", "/transactions")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("address".into(), own.to_hex()),
            Matcher::UrlEncoded("sort_order".into(), "ASC".into()),
        ]))
        .with_status(200)
        .with_body(
            json!([{
                "source": own.to_hex(),
                "dest": "02".repeat(16),
                "currencyId": "00".repeat(16),
                "amount": 10,
                "feeAmount": 0,
                "inputData": "",
                "publicKey": "",
                "signature": "",
                "indexId": 1,
                "timestamp": 1700000001u64
            }])
            .to_string(),
        )
        .create();

    let args = HistoryArgs {
        mine: true,
        asc: true,
        sort: "indexId".to_string(),
        max: 10,
        ..HistoryArgs::default()
    };
    let transactions = history::run(&ClientConfig::for_node(server.url()), &wallet_path, &args).unwrap();

    mock.assert();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].source, own);
}

/// Tests that a missing transaction is reported as not found.
#[test]
fn test_transaction_not_found() {
    let mut server = Server::new();
    mock_network(&mut server);
    server.mock("GET", "/transaction/404").with_status(404).create();

    let result = transaction::run(&ClientConfig::for_node(server.url()), 404);
    assert!(matches!(result, Err(CliError::NotFound(_))));
}
