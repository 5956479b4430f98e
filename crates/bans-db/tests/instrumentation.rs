//! Span and call-metrics accounting for every exit path of the store
//!
//! Kept in its own test binary because it installs a scoped tracing subscriber.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::span::{Attributes, Id};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use bans_common::InMemoryMetrics;
use bans_core::{Ban, BanRepository};
use bans_db::{BansDao, ScriptedLatency};

/// Counts span opens and closes by span name
#[derive(Clone, Default)]
struct SpanCounter {
    opened: Arc<Mutex<HashMap<String, usize>>>,
    closed: Arc<Mutex<HashMap<String, usize>>>,
}

impl SpanCounter {
    fn opened(&self, name: &str) -> usize {
        self.opened.lock().get(name).copied().unwrap_or(0)
    }

    fn closed(&self, name: &str) -> usize {
        self.closed.lock().get(name).copied().unwrap_or(0)
    }
}

impl<S> Layer<S> for SpanCounter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        *self
            .opened
            .lock()
            .entry(attrs.metadata().name().to_string())
            .or_default() += 1;
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(&id) {
            *self.closed.lock().entry(span.name().to_string()).or_default() += 1;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_every_call_opens_and_closes_one_span() {
    let counter = SpanCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let sink = Arc::new(InMemoryMetrics::new());
    // add ok, add fail, get miss, get fail, get hit
    let dao = BansDao::new(sink.clone()).with_latency_source(Arc::new(
        ScriptedLatency::from_millis(&[10, 2500, 10, 2500, 10, 10]),
    ));

    dao.add_ban(Ban::new("ban-1", "user-1")).await.unwrap();
    assert!(dao.add_ban(Ban::new("ban-2", "user-2")).await.unwrap_err().is_backend_failure());
    assert!(dao.add_ban(Ban::default()).await.unwrap_err().is_validation());
    assert!(dao.get_ban("missing").await.unwrap_err().is_not_found());
    assert!(dao.get_ban("ban-1").await.unwrap_err().is_backend_failure());
    assert_eq!(dao.get_ban("ban-1").await.unwrap().id, "ban-1");

    assert_eq!(counter.opened("BansDao.add_ban"), 3);
    assert_eq!(counter.closed("BansDao.add_ban"), 3);
    assert_eq!(counter.opened("get_ban"), 3);
    assert_eq!(counter.closed("get_ban"), 3);

    // the validation failure is traced but not measured
    let add = sink.get("bans_dao", "add_ban").unwrap();
    assert_eq!((add.calls, add.errors), (2, 1));
    let get = sink.get("bans_dao", "get_ban").unwrap();
    assert_eq!((get.calls, get.errors), (3, 1));
}
