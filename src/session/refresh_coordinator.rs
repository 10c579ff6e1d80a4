use crate::application_port::RefreshError;
use crate::domain_model::AccessToken;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;

pub type RefreshOutcome = Result<AccessToken, RefreshError>;

#[derive(Default)]
struct RefreshState {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

/// Single-flight gate for token refresh. The first caller to `acquire` while
/// idle becomes the leader and owns the refresh; everyone else queues until the
/// leader settles.
#[derive(Default)]
pub struct RefreshCoordinator {
    state: Arc<Mutex<RefreshState>>,
}

pub enum RefreshTicket {
    Leader(RefreshLease),
    Follower(RefreshWaiter),
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check-and-set of the in-flight flag, or enqueue, under one lock.
    pub fn acquire(&self) -> RefreshTicket {
        match self.acquire_unless(|| None::<()>) {
            Ok(ticket) => ticket,
            Err(()) => unreachable!("no veto"),
        }
    }

    /// Like `acquire`, but while idle `veto` runs under the same lock. When it
    /// returns `Some`, no refresh is started and the value comes back as `Err`.
    /// A caller that arrives while a refresh is in flight always queues.
    pub fn acquire_unless<T>(&self, veto: impl FnOnce() -> Option<T>) -> Result<RefreshTicket, T> {
        let mut state = lock(&self.state);
        if state.in_flight {
            let (tx, rx) = oneshot::channel();
            state.waiters.push(tx);
            tracing::debug!(queued = state.waiters.len(), "queued behind in-flight refresh");
            return Ok(RefreshTicket::Follower(RefreshWaiter { rx }));
        }
        if let Some(skip) = veto() {
            return Err(skip);
        }

        state.in_flight = true;
        Ok(RefreshTicket::Leader(RefreshLease {
            state: self.state.clone(),
            settled: false,
        }))
    }

    pub fn is_in_flight(&self) -> bool {
        lock(&self.state).in_flight
    }

    pub fn queued(&self) -> usize {
        lock(&self.state).waiters.len()
    }
}

/// Held by the refresh leader. Settling clears the flag and hands the outcome
/// to every queued waiter in arrival order.
pub struct RefreshLease {
    state: Arc<Mutex<RefreshState>>,
    settled: bool,
}

impl RefreshLease {
    /// Returns the number of waiters that were released.
    pub fn settle(mut self, outcome: &RefreshOutcome) -> usize {
        self.settled = true;
        drain(&self.state, outcome)
    }
}

impl Drop for RefreshLease {
    fn drop(&mut self) {
        if !self.settled {
            let released = drain(&self.state, &Err(RefreshError::Abandoned));
            tracing::warn!(released, "refresh leader dropped before settling");
        }
    }
}

pub struct RefreshWaiter {
    rx: oneshot::Receiver<RefreshOutcome>,
}

impl RefreshWaiter {
    /// Waits for the leader's outcome, for at most `limit` when given.
    pub async fn wait(self, limit: Option<Duration>) -> RefreshOutcome {
        let received = match limit {
            Some(limit) => match tokio::time::timeout(limit, self.rx).await {
                Ok(received) => received,
                Err(_) => return Err(RefreshError::TimedOut),
            },
            None => self.rx.await,
        };
        received.unwrap_or(Err(RefreshError::Abandoned))
    }
}

fn drain(state: &Mutex<RefreshState>, outcome: &RefreshOutcome) -> usize {
    let waiters = {
        let mut state = lock(state);
        state.in_flight = false;
        std::mem::take(&mut state.waiters)
    };
    let released = waiters.len();
    for waiter in waiters {
        // The waiter may have given up (timeout or dropped future).
        let _ = waiter.send(outcome.clone());
    }
    released
}

fn lock(state: &Mutex<RefreshState>) -> MutexGuard<'_, RefreshState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leader(ticket: RefreshTicket) -> RefreshLease {
        match ticket {
            RefreshTicket::Leader(lease) => lease,
            RefreshTicket::Follower(_) => panic!("expected leader"),
        }
    }

    fn follower(ticket: RefreshTicket) -> RefreshWaiter {
        match ticket {
            RefreshTicket::Follower(waiter) => waiter,
            RefreshTicket::Leader(_) => panic!("expected follower"),
        }
    }

    #[tokio::test]
    async fn first_acquire_leads_and_the_rest_follow() {
        let coordinator = RefreshCoordinator::new();
        let lease = leader(coordinator.acquire());
        let a = follower(coordinator.acquire());
        let b = follower(coordinator.acquire());
        assert!(coordinator.is_in_flight());
        assert_eq!(coordinator.queued(), 2);

        let released = lease.settle(&Ok(AccessToken::new("T2")));
        assert_eq!(released, 2);
        assert!(!coordinator.is_in_flight());
        assert_eq!(coordinator.queued(), 0);

        assert_eq!(a.wait(None).await.unwrap(), AccessToken::new("T2"));
        assert_eq!(b.wait(None).await.unwrap(), AccessToken::new("T2"));
    }

    #[tokio::test]
    async fn failure_reaches_every_waiter() {
        let coordinator = RefreshCoordinator::new();
        let lease = leader(coordinator.acquire());
        let waiters: Vec<_> = (0..3).map(|_| follower(coordinator.acquire())).collect();

        lease.settle(&Err(RefreshError::Rejected { status: 401 }));

        for waiter in waiters {
            assert_eq!(
                waiter.wait(None).await,
                Err(RefreshError::Rejected { status: 401 })
            );
        }
    }

    #[tokio::test]
    async fn next_episode_gets_a_new_leader() {
        let coordinator = RefreshCoordinator::new();
        leader(coordinator.acquire()).settle(&Ok(AccessToken::new("T2")));
        let lease = leader(coordinator.acquire());
        drop(lease);
        assert!(!coordinator.is_in_flight());
    }

    #[tokio::test]
    async fn dropped_leader_releases_waiters() {
        let coordinator = RefreshCoordinator::new();
        let lease = leader(coordinator.acquire());
        let waiter = follower(coordinator.acquire());

        drop(lease);

        assert_eq!(waiter.wait(None).await, Err(RefreshError::Abandoned));
        assert!(!coordinator.is_in_flight());
    }

    #[test]
    fn veto_applies_only_while_idle() {
        let coordinator = RefreshCoordinator::new();
        assert!(matches!(coordinator.acquire_unless(|| Some("replay")), Err("replay")));
        assert!(!coordinator.is_in_flight());

        let lease = leader(coordinator.acquire_unless(|| None::<()>).ok().unwrap());
        let vetoed = coordinator.acquire_unless(|| -> Option<()> { panic!("checked while in flight") });
        assert!(matches!(vetoed, Ok(RefreshTicket::Follower(_))));
        assert_eq!(lease.settle(&Err(RefreshError::Abandoned)), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn waiter_times_out_without_disturbing_the_leader() {
        let coordinator = RefreshCoordinator::new();
        let lease = leader(coordinator.acquire());
        let waiter = follower(coordinator.acquire());

        let outcome = waiter.wait(Some(Duration::from_secs(30))).await;
        assert_eq!(outcome, Err(RefreshError::TimedOut));
        assert!(coordinator.is_in_flight());

        // The timed-out receiver is gone; settling still succeeds.
        assert_eq!(lease.settle(&Ok(AccessToken::new("T2"))), 1);
    }
}
