//! Tests for transaction history traversal over HTTP.

use mockito::{Matcher, Mock, Server};
use pigeonium_client::{ClientConfig, ClientError, LedgerClient, PagerState};
use pigeonium_core::{CurrencyId, IndexId, NetworkInfo, SortBy, SortOrder, TransactionFilter};
use serde_json::{json, Value};

const CURRENCY: [u8; 16] = [0x0c; 16];

fn record(index_id: IndexId) -> Value {
    json!({
        "source": "01".repeat(16),
        "dest": "02".repeat(16),
        "currencyId": hex::encode(CURRENCY),
        "amount": 100 * index_id,
        "feeAmount": 1,
        "inputData": "",
        "publicKey": "",
        "signature": "",
        "indexId": index_id,
        "timestamp": 1_700_000_000u64 + index_id
    })
}

fn page(ids: &[IndexId]) -> String {
    Value::Array(ids.iter().map(|id| record(*id)).collect()).to_string()
}

fn client(server: &Server) -> LedgerClient {
    let network: NetworkInfo = serde_json::from_value(json!({
        "networkName": "Pigeonium",
        "networkId": 1,
        "contractDeployCost": 0,
        "adminPublicKey": "",
        "baseCurrency": {
            "currencyId": "00".repeat(16),
            "name": "Pigeon",
            "symbol": "PGN",
            "issuer": "00".repeat(16),
            "supply": 0
        }
    }))
    .unwrap();
    LedgerClient::with_network(ClientConfig::for_node(server.url()), network).unwrap()
}

fn page_mock(
    server: &mut Server,
    mut params: Vec<(&str, String)>,
    ids: &[IndexId],
    hits: usize,
) -> Mock {
    params.push(("currencyId", hex::encode(CURRENCY)));
    let matchers = params
        .into_iter()
        .map(|(key, value)| Matcher::UrlEncoded(key.into(), value))
        .collect();
    server
        .mock("GET", "/transactions")
        .match_query(Matcher::AllOf(matchers))
        .with_status(200)
        .with_body(page(ids))
        .expect(hits)
        .create()
}

fn ids(results: Vec<Result<pigeonium_core::Transaction, ClientError>>) -> Vec<IndexId> {
    results
        .into_iter()
        .map(|tx| tx.unwrap().index_id.unwrap())
        .collect()
}

/// Tests the boundary pinning sequence for a descending traversal.
#[test]
fn test_descending_traversal_pins_boundaries() {
    let mut server = Server::new();
    let first = page_mock(
        &mut server,
        vec![
            ("limit", "2".into()),
            ("offset", "0".into()),
            ("sort_by", "indexId".into()),
            ("sort_order", "DESC".into()),
        ],
        &[5, 4],
        1,
    );
    let second = page_mock(
        &mut server,
        vec![("indexId_start", "3".into()), ("offset", "0".into())],
        &[3, 2],
        1,
    );
    let third = page_mock(
        &mut server,
        vec![("indexId_start", "1".into()), ("offset", "0".into())],
        &[1],
        1,
    );

    let client = client(&server);
    let filter = TransactionFilter::new()
        .currency(CurrencyId(CURRENCY))
        .limit(2);
    let mut pager = client.transactions(filter);

    let yielded = ids(pager.by_ref().collect());
    assert_eq!(yielded, vec![5, 4, 3, 2, 1]);
    assert_eq!(pager.cursor().state(), PagerState::Exhausted);
    assert_eq!(pager.cursor().index_id_start(), Some(0));

    first.assert();
    second.assert();
    third.assert();
}

/// Tests that a restarted traversal repeats the same requests and items.
#[test]
fn test_restart_repeats_traversal() {
    let mut server = Server::new();
    // Boundary pages first, so that they win over the broader first-page mock
    let last = page_mock(&mut server, vec![("indexId_start", "0".into())], &[], 2);
    let second = page_mock(&mut server, vec![("indexId_start", "3".into())], &[3, 2, 1], 2);
    let first = page_mock(
        &mut server,
        vec![("limit", "3".into()), ("offset", "0".into())],
        &[6, 5, 4],
        2,
    );

    let client = client(&server);
    let filter = TransactionFilter::new()
        .currency(CurrencyId(CURRENCY))
        .limit(3);
    let mut pager = client.transactions(filter);

    let run_one = ids(pager.by_ref().collect());
    pager.restart();
    let run_two = ids(pager.by_ref().collect());

    assert_eq!(run_one, vec![6, 5, 4, 3, 2, 1]);
    assert_eq!(run_one, run_two);
    first.assert();
    second.assert();
    last.assert();
}

/// Tests that a caller supplied boundary is kept and paging moves the offset.
#[test]
fn test_explicit_boundary_pages_by_offset() {
    let mut server = Server::new();
    let first = page_mock(
        &mut server,
        vec![
            ("indexId_start", "10".into()),
            ("sort_order", "ASC".into()),
            ("offset", "0".into()),
        ],
        &[10, 11],
        1,
    );
    let second = page_mock(
        &mut server,
        vec![("indexId_start", "10".into()), ("offset", "2".into())],
        &[12],
        1,
    );

    let client = client(&server);
    let filter = TransactionFilter::new()
        .currency(CurrencyId(CURRENCY))
        .index_range(Some(10), None)
        .sort(SortBy::IndexId, SortOrder::Asc)
        .limit(2);

    let yielded = ids(client.transactions(filter).collect());
    assert_eq!(yielded, vec![10, 11, 12]);
    first.assert();
    second.assert();
}

/// Tests that abandoning a traversal early issues no further requests.
#[test]
fn test_stopping_early_fetches_only_needed_pages() {
    let mut server = Server::new();
    let first = page_mock(&mut server, vec![("offset", "0".into())], &[9, 8], 1);
    let unused = page_mock(&mut server, vec![("indexId_start", "7".into())], &[7, 6], 0);

    let client = client(&server);
    let filter = TransactionFilter::new()
        .currency(CurrencyId(CURRENCY))
        .limit(2);
    let taken = ids(client.transactions(filter).take(2).collect());

    assert_eq!(taken, vec![9, 8]);
    first.assert();
    unused.assert();
}

/// Tests that a failing page is reported and ends the traversal.
#[test]
fn test_server_error_ends_traversal() {
    let mut server = Server::new();
    server
        .mock("GET", "/transactions")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("database unavailable")
        .create();

    let client = client(&server);
    let mut pager = client.transactions(TransactionFilter::new());

    match pager.next() {
        Some(Err(ClientError::Http { status, body })) => {
            assert_eq!(status, 500);
            assert_eq!(body, "database unavailable");
        }
        other => panic!("unexpected item: {:?}", other),
    }
    assert!(pager.next().is_none());
}
