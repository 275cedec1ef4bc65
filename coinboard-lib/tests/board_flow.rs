//! End-to-end flows: load, debounced search, out-of-order responses, failures.
//!
//! Sources here are in-process fakes with scripted delays; the paused tokio
//! clock makes the timing deterministic.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use coinboard_lib::BoardState;
use coinboard_lib::CryptoRecord;
use coinboard_lib::FetchError;
use coinboard_lib::debounce::Debouncer;
use coinboard_lib::source::CachedSource;
use coinboard_lib::source::DataSource;
use coinboard_lib::state::Request;
use tokio::sync::mpsc;

fn market() -> Vec<CryptoRecord> {
    vec![
        CryptoRecord::new("Bitcoin", "btc").with_market_cap(1200.0).with_change(-1.2),
        CryptoRecord::new("Ethereum", "eth").with_market_cap(400.0).with_change(2.5),
        CryptoRecord::new("Solana", "sol").with_market_cap(90.0).with_change(7.0),
        CryptoRecord::new("Bitcoin Cash", "bch").with_market_cap(9.0),
    ]
}

/// One scripted answer: wait this long, then succeed or fail.
type Step = (Duration, bool);

struct ScriptedSource {
    steps: Mutex<VecDeque<Step>>,
    calls: Mutex<usize>,
}

impl ScriptedSource {
    fn new(steps: Vec<Step>) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into()),
            calls: Mutex::new(0),
        })
    }

    fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl DataSource for ScriptedSource {
    async fn load_all(&self) -> Result<Vec<CryptoRecord>, FetchError> {
        *self.calls.lock().unwrap() += 1;
        let (delay, ok) = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or((Duration::ZERO, true));
        tokio::time::sleep(delay).await;
        if ok {
            Ok(market())
        } else {
            Err(FetchError::http(503, "https://example.com/data.json"))
        }
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

type Outcome = (Request, Result<Vec<CryptoRecord>, FetchError>);

fn spawn_load(source: Arc<dyn DataSource>, request: Request, tx: mpsc::UnboundedSender<Outcome>) {
    tokio::spawn(async move {
        let result = source.load_all().await;
        let _ = tx.send((request, result));
    });
}

fn apply(state: &mut BoardState, (request, result): Outcome) {
    let _ = match result {
        Ok(records) => state.apply_loaded(&request, records),
        Err(err) => state.apply_failed(&request, &err),
    };
}

fn names(state: &BoardState) -> Vec<String> {
    state.rows().iter().map(|r| r.name.clone()).collect()
}

#[tokio::test(start_paused = true)]
async fn test_out_of_order_responses_show_latest_query() {
    let source = ScriptedSource::new(vec![
        (Duration::ZERO, true),
        (Duration::from_millis(500), true),
        (Duration::from_millis(50), true),
    ]);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = BoardState::new();

    spawn_load(source.clone(), state.begin_request(), tx.clone());
    apply(&mut state, rx.recv().await.unwrap());
    assert_eq!(state.rows().len(), 4);

    let _ = state.set_query("bit");
    spawn_load(source.clone(), state.begin_request(), tx.clone());
    tokio::task::yield_now().await;
    let _ = state.set_query("sol");
    spawn_load(source.clone(), state.begin_request(), tx.clone());

    // The "sol" search answers first, the slow "bit" search last.
    let first = rx.recv().await.unwrap();
    assert_eq!(first.0.query, "sol");
    apply(&mut state, first);
    assert_eq!(names(&state), ["Solana"]);

    let second = rx.recv().await.unwrap();
    assert_eq!(second.0.query, "bit");
    apply(&mut state, second);
    assert_eq!(names(&state), ["Solana"]);
    assert_eq!(state.applied_query(), "sol");
    assert_eq!(source.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_failed_search_leaves_table_unchanged() {
    let source = ScriptedSource::new(vec![(Duration::ZERO, true), (Duration::from_millis(10), false)]);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = BoardState::new();

    spawn_load(source.clone(), state.begin_request(), tx.clone());
    apply(&mut state, rx.recv().await.unwrap());
    let _ = state.sort_by_market_cap_descending();
    let before = state.body().clone();

    let _ = state.set_query("eth");
    spawn_load(source.clone(), state.begin_request(), tx.clone());
    apply(&mut state, rx.recv().await.unwrap());

    assert_eq!(state.body(), &before);
    assert_eq!(state.rows().len(), 4);
    assert!(state.last_error().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_typing_burst_issues_one_search() {
    let source = ScriptedSource::new(Vec::new());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (due_tx, mut due_rx) = mpsc::unbounded_channel::<()>();
    let mut state = BoardState::new();
    let mut debouncer = Debouncer::new(Duration::from_millis(300));

    for text in ["e", "et", "eth"] {
        let _ = state.set_query(text);
        let due_tx = due_tx.clone();
        debouncer.schedule(async move {
            let _ = due_tx.send(());
        });
        tokio::time::sleep(Duration::from_millis(120)).await;
    }

    due_rx.recv().await.unwrap();
    spawn_load(source.clone(), state.begin_request(), tx.clone());
    apply(&mut state, rx.recv().await.unwrap());

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(due_rx.try_recv().is_err());
    assert_eq!(source.calls(), 1);
    assert_eq!(names(&state), ["Ethereum"]);
}

#[tokio::test(start_paused = true)]
async fn test_enter_bypasses_debounce() {
    let (due_tx, mut due_rx) = mpsc::unbounded_channel::<()>();
    let mut debouncer = Debouncer::new(Duration::from_millis(300));

    debouncer.schedule(async move {
        let _ = due_tx.send(());
    });
    // Enter: drop the pending run and search now.
    assert!(debouncer.cancel());

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(due_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_cached_source_filters_in_memory() {
    let scripted = ScriptedSource::new(Vec::new());
    let source: Arc<dyn DataSource> = Arc::new(CachedSource::new(scripted.clone()));
    let mut state = BoardState::new();

    let request = state.begin_request();
    let _ = state.apply_loaded(&request, source.load_all().await.unwrap());

    for query in ["b", "bi", "bitcoin c"] {
        let _ = state.set_query(query);
        let request = state.begin_request();
        let _ = state.apply_loaded(&request, source.load_all().await.unwrap());
    }

    assert_eq!(names(&state), ["Bitcoin Cash"]);
    assert_eq!(scripted.calls(), 1);
}
