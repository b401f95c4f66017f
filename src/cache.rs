//! Remote data cache: keyed, TTL-less read caching over the REST API.
//!
//! Each shared list (all appointments, today's schedule, directories)
//! lives under one [`Query`]. Concurrent readers of the same key share
//! a single in-flight fetch; mutations call `invalidate` and every
//! observer refetches on its next read. There is no optimistic local
//! mutation — updates are only ever confirmed by refetch.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use crate::models::{Appointment, Doctor, Tenant, UserAccount};

// ═══════════════════════════════════════════════════════════
// QueryKey — names for the shared cache entries
// ═══════════════════════════════════════════════════════════

/// The shared cache entries a mutation can stale. Form controllers
/// report these after a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Appointments,
    TodayAppointments,
    Patients,
    Doctors,
    Tenants,
}

// ═══════════════════════════════════════════════════════════
// Query<T> — one cached list
// ═══════════════════════════════════════════════════════════

/// One cached remote list.
///
/// Freshness is tracked by a generation counter: `invalidate` bumps
/// it, which both stales the held value and prevents a fetch that was
/// already in flight from being cached as fresh (the racing fetch's
/// result is still handed to its caller, just not stored).
pub struct Query<T> {
    name: &'static str,
    inner: Mutex<Inner<T>>,
}

struct Inner<T> {
    generation: u64,
    value: Option<Cached<T>>,
    /// Present while a fetch is running; followers clone the receiver
    /// and wake when the leader settles.
    inflight: Option<watch::Receiver<()>>,
}

struct Cached<T> {
    generation: u64,
    value: Arc<T>,
}

enum Step {
    Wait(watch::Receiver<()>),
    Lead(watch::Sender<()>, u64),
}

impl<T> Query<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: Mutex::new(Inner {
                generation: 0,
                value: None,
                inflight: None,
            }),
        }
    }

    /// Return the cached value, or run `fetch` to fill it.
    ///
    /// Concurrent callers share one fetch: the first becomes the
    /// leader, the rest wait for it to settle and then re-check the
    /// cache. A leader's failure is returned only to the leader;
    /// waiting callers retry with their own fetch.
    pub async fn get_or_fetch<E, F, Fut>(&self, fetch: F) -> Result<Arc<T>, E>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        loop {
            let step = {
                let mut inner = self.inner.lock().await;
                if let Some(cached) = &inner.value {
                    if cached.generation == inner.generation {
                        return Ok(Arc::clone(&cached.value));
                    }
                }
                match &inner.inflight {
                    Some(rx) => Step::Wait(rx.clone()),
                    None => {
                        let (tx, rx) = watch::channel(());
                        inner.inflight = Some(rx);
                        Step::Lead(tx, inner.generation)
                    }
                }
            };

            match step {
                Step::Wait(mut rx) => {
                    // Leader settled; re-check the cache. An Err means
                    // the leader was dropped mid-fetch without ever
                    // settling, leaving an orphaned in-flight marker
                    // that would otherwise wedge this entry. Clear it
                    // so the next iteration can elect a new leader.
                    if rx.changed().await.is_err() {
                        let mut inner = self.inner.lock().await;
                        let orphaned = inner
                            .inflight
                            .as_ref()
                            .is_some_and(|r| r.has_changed().is_err());
                        if orphaned {
                            tracing::debug!(
                                query = self.name,
                                "in-flight fetch abandoned, clearing marker"
                            );
                            inner.inflight = None;
                        }
                    }
                }
                Step::Lead(tx, started_generation) => {
                    let result = fetch().await;
                    let mut inner = self.inner.lock().await;
                    inner.inflight = None;
                    match result {
                        Ok(value) => {
                            let value = Arc::new(value);
                            if inner.generation == started_generation {
                                inner.value = Some(Cached {
                                    generation: started_generation,
                                    value: Arc::clone(&value),
                                });
                            } else {
                                tracing::debug!(
                                    query = self.name,
                                    "fetch superseded by invalidation, result not cached"
                                );
                            }
                            drop(inner);
                            let _ = tx.send(());
                            return Ok(value);
                        }
                        Err(e) => {
                            drop(inner);
                            let _ = tx.send(());
                            return Err(e);
                        }
                    }
                }
            }
        }
    }

    /// Mark the entry stale. The next read refetches; an in-flight
    /// fetch that started before this call will not be cached.
    pub async fn invalidate(&self) {
        let mut inner = self.inner.lock().await;
        inner.generation += 1;
        tracing::debug!(query = self.name, generation = inner.generation, "invalidated");
    }

    /// Current value if fresh, without fetching.
    pub async fn peek(&self) -> Option<Arc<T>> {
        let inner = self.inner.lock().await;
        inner
            .value
            .as_ref()
            .filter(|c| c.generation == inner.generation)
            .map(|c| Arc::clone(&c.value))
    }
}

// ═══════════════════════════════════════════════════════════
// QueryCache — the named shared entries
// ═══════════════════════════════════════════════════════════

/// The dashboards' shared cache entries. Multiple sections observe the
/// same entry, so a mutation in one section is seen by all of them
/// after invalidation.
pub struct QueryCache {
    pub appointments: Query<Vec<Appointment>>,
    pub today_appointments: Query<Vec<Appointment>>,
    pub patients: Query<Vec<UserAccount>>,
    pub doctors: Query<Vec<Doctor>>,
    pub tenants: Query<Vec<Tenant>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            appointments: Query::new("appointments"),
            today_appointments: Query::new("today_appointments"),
            patients: Query::new("patients"),
            doctors: Query::new("doctors"),
            tenants: Query::new("tenants"),
        }
    }

    pub async fn invalidate(&self, key: QueryKey) {
        match key {
            QueryKey::Appointments => self.appointments.invalidate().await,
            QueryKey::TodayAppointments => self.today_appointments.invalidate().await,
            QueryKey::Patients => self.patients.invalidate().await,
            QueryKey::Doctors => self.doctors.invalidate().await,
            QueryKey::Tenants => self.tenants.invalidate().await,
        }
    }

    pub async fn invalidate_keys(&self, keys: &[QueryKey]) {
        for key in keys {
            self.invalidate(*key).await;
        }
    }

    /// Any appointment mutation stales both appointment lists.
    pub async fn invalidate_appointments(&self) {
        self.appointments.invalidate().await;
        self.today_appointments.invalidate().await;
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Notify;

    #[tokio::test]
    async fn second_read_is_a_cache_hit() {
        let query: Query<Vec<i64>> = Query::new("test");
        let fetches = AtomicUsize::new(0);

        let fetch = || async {
            fetches.fetch_add(1, Ordering::SeqCst);
            Ok::<_, &'static str>(vec![1, 2, 3])
        };

        let first = query.get_or_fetch(fetch).await.unwrap();
        let second = query.get_or_fetch(fetch).await.unwrap();
        assert_eq!(*first, vec![1, 2, 3]);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let query: Query<usize> = Query::new("test");
        let fetches = AtomicUsize::new(0);

        let fetch = || async { Ok::<_, &'static str>(fetches.fetch_add(1, Ordering::SeqCst)) };

        assert_eq!(*query.get_or_fetch(fetch).await.unwrap(), 0);
        query.invalidate().await;
        assert_eq!(*query.get_or_fetch(fetch).await.unwrap(), 1);
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn concurrent_readers_share_one_fetch() {
        let query: Arc<Query<&'static str>> = Arc::new(Query::new("test"));
        let fetches = Arc::new(AtomicUsize::new(0));
        let gate = Arc::new(Notify::new());

        let mut handles = Vec::new();
        for _ in 0..3 {
            let query = Arc::clone(&query);
            let fetches = Arc::clone(&fetches);
            let gate = Arc::clone(&gate);
            handles.push(tokio::spawn(async move {
                query
                    .get_or_fetch(|| {
                        let fetches = Arc::clone(&fetches);
                        let gate = Arc::clone(&gate);
                        async move {
                            fetches.fetch_add(1, Ordering::SeqCst);
                            gate.notified().await;
                            Ok::<_, &'static str>("shared")
                        }
                    })
                    .await
            }));
        }

        // Let every task register against the in-flight fetch.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(fetches.load(Ordering::SeqCst), 1, "only the leader fetches");
        gate.notify_one();

        for handle in handles {
            assert_eq!(*handle.await.unwrap().unwrap(), "shared");
        }
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidation_during_fetch_is_not_lost() {
        let query: Arc<Query<&'static str>> = Arc::new(Query::new("test"));
        let fetches = Arc::new(AtomicUsize::new(0));
        let gate = Arc::new(Notify::new());

        let reader = {
            let query = Arc::clone(&query);
            let fetches = Arc::clone(&fetches);
            let gate = Arc::clone(&gate);
            tokio::spawn(async move {
                query
                    .get_or_fetch(|| {
                        let fetches = Arc::clone(&fetches);
                        let gate = Arc::clone(&gate);
                        async move {
                            fetches.fetch_add(1, Ordering::SeqCst);
                            gate.notified().await;
                            Ok::<_, &'static str>("stale-by-arrival")
                        }
                    })
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        query.invalidate().await;
        gate.notify_one();

        // The racing caller still gets its result.
        assert_eq!(*reader.await.unwrap().unwrap(), "stale-by-arrival");
        // But the entry stayed stale: the next read refetches.
        assert!(query.peek().await.is_none());
        let fresh = query
            .get_or_fetch(|| async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok::<_, &'static str>("fresh")
            })
            .await
            .unwrap();
        assert_eq!(*fresh, "fresh");
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn dropped_leader_does_not_wedge_the_entry() {
        let query: Arc<Query<&'static str>> = Arc::new(Query::new("test"));
        let gate = Arc::new(Notify::new());

        // A leader whose fetch never resolves, then aborted mid-fetch.
        let leader = {
            let query = Arc::clone(&query);
            let gate = Arc::clone(&gate);
            tokio::spawn(async move {
                query
                    .get_or_fetch(|| {
                        let gate = Arc::clone(&gate);
                        async move {
                            gate.notified().await;
                            Ok::<_, &'static str>("never delivered")
                        }
                    })
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        leader.abort();
        let _ = leader.await;

        // A later reader must elect itself leader, not spin on the
        // abandoned in-flight marker.
        let value = tokio::time::timeout(
            Duration::from_secs(2),
            query.get_or_fetch(|| async { Ok::<_, &'static str>("recovered") }),
        )
        .await
        .expect("entry must recover after the leader future is dropped")
        .unwrap();
        assert_eq!(*value, "recovered");
    }

    #[tokio::test]
    async fn waiting_reader_survives_leader_abort() {
        let query: Arc<Query<&'static str>> = Arc::new(Query::new("test"));
        let gate = Arc::new(Notify::new());

        let leader = {
            let query = Arc::clone(&query);
            let gate = Arc::clone(&gate);
            tokio::spawn(async move {
                query
                    .get_or_fetch(|| {
                        let gate = Arc::clone(&gate);
                        async move {
                            gate.notified().await;
                            Ok::<_, &'static str>("never delivered")
                        }
                    })
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        // A follower registered against the in-flight fetch.
        let follower = {
            let query = Arc::clone(&query);
            tokio::spawn(async move {
                query
                    .get_or_fetch(|| async { Ok::<_, &'static str>("follower fetch") })
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        leader.abort();
        let _ = leader.await;

        let value = tokio::time::timeout(Duration::from_secs(2), follower)
            .await
            .expect("follower must not livelock")
            .unwrap()
            .unwrap();
        assert_eq!(*value, "follower fetch");
    }

    #[tokio::test]
    async fn fetch_error_is_not_cached() {
        let query: Query<usize> = Query::new("test");
        let calls = AtomicUsize::new(0);

        let result = query
            .get_or_fetch(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<usize, _>("backend down")
            })
            .await;
        assert_eq!(result.unwrap_err(), "backend down");
        assert!(query.peek().await.is_none());

        let ok = query
            .get_or_fetch(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, &'static str>(7)
            })
            .await
            .unwrap();
        assert_eq!(*ok, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn peek_reports_freshness() {
        let query: Query<u8> = Query::new("test");
        assert!(query.peek().await.is_none());

        query
            .get_or_fetch(|| async { Ok::<_, &'static str>(1) })
            .await
            .unwrap();
        assert_eq!(*query.peek().await.unwrap(), 1);

        query.invalidate().await;
        assert!(query.peek().await.is_none());
    }

    #[tokio::test]
    async fn query_cache_invalidates_by_key() {
        let cache = QueryCache::new();
        cache
            .appointments
            .get_or_fetch(|| async { Ok::<_, &'static str>(Vec::new()) })
            .await
            .unwrap();
        assert!(cache.appointments.peek().await.is_some());

        cache.invalidate(QueryKey::Appointments).await;
        assert!(cache.appointments.peek().await.is_none());
    }

    #[tokio::test]
    async fn appointment_mutation_stales_both_lists() {
        let cache = QueryCache::new();
        cache
            .appointments
            .get_or_fetch(|| async { Ok::<_, &'static str>(Vec::new()) })
            .await
            .unwrap();
        cache
            .today_appointments
            .get_or_fetch(|| async { Ok::<_, &'static str>(Vec::new()) })
            .await
            .unwrap();

        cache.invalidate_appointments().await;
        assert!(cache.appointments.peek().await.is_none());
        assert!(cache.today_appointments.peek().await.is_none());
    }
}
