//! End-to-end poll cycles over scripted adapters.

use std::sync::Arc;

use dexwatch::adapter::outbound::ledger::{JsonFileStore, MemoryStore};
use dexwatch::application::{
    Dispatcher, DispatchPolicy, Fetcher, Ledger, Notifier, NotifyPolicy, RetryPolicy,
};
use dexwatch::error::FeedError;
use dexwatch::port::LedgerStore;
use dexwatch::testkit::feed::ScriptedFeed;
use dexwatch::testkit::record;
use dexwatch::testkit::sender::RecordingSender;
use tokio::sync::watch;

fn dispatcher(
    feed: ScriptedFeed,
    sender: &RecordingSender,
    store: Box<dyn LedgerStore>,
) -> Dispatcher {
    Dispatcher::new(
        Fetcher::new(Arc::new(feed), RetryPolicy::immediate(3)),
        Notifier::new(
            Arc::new(sender.clone()),
            NotifyPolicy {
                retry: RetryPolicy::immediate(3),
                max_chars: 4096,
            },
        ),
        Ledger::load(store),
        DispatchPolicy::immediate(3),
    )
}

fn ledger_keys(ledger: &Ledger) -> Vec<String> {
    ledger.keys().map(str::to_string).collect()
}

#[tokio::test]
async fn only_tokens_with_contact_link_are_announced() {
    let store = Arc::new(MemoryStore::new());
    let sender = RecordingSender::new();
    let feed = ScriptedFeed::always(vec![
        record::listed("addr-a", "Alpha"),
        record::without_contact("addr-b", "Beta"),
    ]);
    let mut dispatcher = dispatcher(feed, &sender, Box::new(store.clone()));

    let summary = dispatcher.run_cycle().await;

    assert_eq!(summary.notified, 1);
    assert_eq!(summary.skipped_no_contact, 1);
    let attempts = sender.attempts();
    assert_eq!(attempts.len(), 1);
    assert!(attempts[0].contains("Alpha"));
    assert_eq!(ledger_keys(dispatcher.ledger()), vec!["addr-a"]);
    assert_eq!(store.snapshot(), Some(vec!["addr-a".to_string()]));
}

#[tokio::test]
async fn known_token_is_not_announced_again() {
    let store = Arc::new(MemoryStore::with_keys(["addr-c"]));
    let sender = RecordingSender::new();
    let feed = ScriptedFeed::always(vec![record::listed("addr-c", "Gamma")]);
    let mut dispatcher = dispatcher(feed, &sender, Box::new(store.clone()));

    let summary = dispatcher.run_cycle().await;

    assert_eq!(summary.skipped_seen, 1);
    assert!(sender.attempts().is_empty());
    assert_eq!(ledger_keys(dispatcher.ledger()), vec!["addr-c"]);
}

#[tokio::test]
async fn exhausted_fetch_skips_processing() {
    let store = Arc::new(MemoryStore::with_keys(["addr-x"]));
    let sender = RecordingSender::new();
    let feed = ScriptedFeed::failing(FeedError::Transport("connection refused".into()));
    let calls = feed.calls();
    let mut dispatcher = dispatcher(feed, &sender, Box::new(store.clone()));

    let summary = dispatcher.run_cycle().await;

    assert!(summary.fetch_failed);
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 3);
    assert!(sender.attempts().is_empty());
    assert_eq!(store.write_count(), 0);
    assert_eq!(ledger_keys(dispatcher.ledger()), vec!["addr-x"]);
}

#[tokio::test]
async fn failed_delivery_is_retried_next_cycle() {
    let store = Arc::new(MemoryStore::new());
    let sender = RecordingSender::failing();
    let feed = ScriptedFeed::always(vec![record::listed("addr-d", "Delta")]);
    let mut dispatcher = dispatcher(feed, &sender, Box::new(store.clone()));

    let first = dispatcher.run_cycle().await;
    assert_eq!(first.failed, 1);
    assert_eq!(sender.attempts().len(), 3);
    assert!(dispatcher.ledger().is_empty());

    sender.recover();
    let second = dispatcher.run_cycle().await;
    assert_eq!(second.notified, 1);
    assert_eq!(sender.delivered().len(), 1);
    assert_eq!(ledger_keys(dispatcher.ledger()), vec!["addr-d"]);
}

#[tokio::test]
async fn one_failing_record_does_not_block_the_rest() {
    let store = Arc::new(MemoryStore::new());
    let sender = RecordingSender::failing_when_containing("Broken");
    let feed = ScriptedFeed::always(vec![
        record::listed("addr-1", "Broken"),
        record::listed("addr-2", "Fine"),
    ]);
    let mut dispatcher = dispatcher(feed, &sender, Box::new(store));

    let summary = dispatcher.run_cycle().await;

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.notified, 1);
    assert_eq!(ledger_keys(dispatcher.ledger()), vec!["addr-2"]);
}

#[tokio::test]
async fn records_without_address_are_never_announced() {
    let sender = RecordingSender::new();
    let feed = ScriptedFeed::always(vec![record::without_identity("Nameless")]);
    let mut dispatcher = dispatcher(feed, &sender, Box::new(MemoryStore::new()));

    let summary = dispatcher.run_cycle().await;

    assert_eq!(summary.skipped_no_identity, 1);
    assert!(sender.attempts().is_empty());
    assert!(dispatcher.ledger().is_empty());
}

#[tokio::test]
async fn announcements_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state").join("notified.json");
    let records = vec![
        record::listed("addr-1", "One"),
        record::listed("addr-2", "Two"),
    ];

    let sender = RecordingSender::new();
    let mut first = dispatcher(
        ScriptedFeed::always(records.clone()),
        &sender,
        Box::new(JsonFileStore::new(&path)),
    );
    assert_eq!(first.run_cycle().await.notified, 2);
    drop(first);

    let restarted = RecordingSender::new();
    let mut second = dispatcher(
        ScriptedFeed::always(records),
        &restarted,
        Box::new(JsonFileStore::new(&path)),
    );
    let summary = second.run_cycle().await;

    assert_eq!(summary.skipped_seen, 2);
    assert!(restarted.attempts().is_empty());

    let on_disk: Vec<String> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, vec!["addr-1", "addr-2"]);
}

#[tokio::test]
async fn run_loop_stops_when_signalled() {
    let store = Arc::new(MemoryStore::new());
    let sender = RecordingSender::new();
    let feed = ScriptedFeed::always(vec![record::listed("addr-1", "One")]);
    let calls = feed.calls();
    let mut dispatcher = dispatcher(feed, &sender, Box::new(store.clone()));
    dispatcher.run_cycle().await;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    shutdown_tx.send(true).unwrap();
    let ledger = dispatcher.run(shutdown_rx).await;

    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(ledger.len(), 1);
    assert_eq!(sender.delivered().len(), 1);
    assert_eq!(store.snapshot().map(|keys| keys.len()), Some(1));
}

#[tokio::test]
async fn record_text_is_escaped_in_announcement() {
    let sender = RecordingSender::new();
    let rug = record::with_field(
        record::listed("addr-r", "Rug"),
        "name",
        serde_json::json!("<Rug & Pull>"),
    );
    let mut dispatcher = dispatcher(
        ScriptedFeed::always(vec![rug]),
        &sender,
        Box::new(MemoryStore::new()),
    );

    dispatcher.run_cycle().await;

    let delivered = sender.delivered();
    assert_eq!(delivered.len(), 1);
    assert!(delivered[0].contains("<code>&lt;Rug &amp; Pull&gt;</code>"));
    assert!(delivered[0].contains("<a href=\"https://t.me/rug\">Telegram Group</a>"));
}
