mod utils;
#[allow(unused)]
use utils::*;

use gotobank::console::Console;
use gotobank::Error;
use std::io::Cursor;

async fn run_session(host: &str, script: &str) -> (Result<(), Error>, String) {
    let mut console = Console::new(Cursor::new(script.to_string()), Vec::new());
    let res = console.run(host).await;
    (res, String::from_utf8(console.into_output()).unwrap())
}

#[tokio::test]
async fn every_operation_once() {
    let bank = init().await;

    let script = "\
tok-1
account
balance
codes
transaction
55
transfer
7
100
rent
payment
8
20
tea
verify
1
9999
cls
clear
exit
";
    let (res, output) = run_session(&bank.url(), script).await;
    assert!(res.is_ok());

    let seen: Vec<_> = bank
        .requests()
        .into_iter()
        .map(|r| (r.method, r.path))
        .collect();
    let expected = [
        ("GET", "/api/account"),
        ("GET", "/api/balance"),
        ("GET", "/api/codes"),
        ("GET", "/api/transaction"),
        ("POST", "/api/transfer"),
        ("POST", "/api/payment"),
        ("POST", "/api/verify"),
    ];
    assert_eq!(seen.len(), expected.len());
    for ((method, path), (want_method, want_path)) in seen.iter().zip(expected) {
        assert_eq!(method, want_method);
        assert_eq!(path, want_path);
    }

    assert!(bank
        .requests()
        .iter()
        .all(|r| r.authorization.as_deref() == Some("tok-1")));

    // Every network operation prints a status line.
    assert_eq!(output.matches("200\n").count(), expected.len());
}

#[tokio::test]
async fn unknown_operations_never_reach_the_bank() {
    let bank = init().await;

    let (res, _) = run_session(&bank.url(), "tok\nfrobnicate\nBALANCE\n\nexit\n").await;
    assert!(res.is_ok());
    assert!(bank.requests().is_empty());
}

#[tokio::test]
async fn non_numeric_code_aborts_before_sending() {
    let bank = init().await;

    let (res, output) = run_session(&bank.url(), "tok\nbalance\nverify\n1\nabc\nexit\n").await;
    assert!(matches!(res, Err(Error::InvalidNumber { .. })));
    assert_eq!(bank.requests().len(), 1);
    assert!(output.contains("Code: "));
}

#[tokio::test]
async fn unreachable_bank_ends_the_session() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let (res, _) = run_session(&format!("http://{addr}"), "tok\nbalance\nexit\n").await;
    assert!(matches!(res, Err(Error::Http(_))));
}
