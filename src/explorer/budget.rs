use parking_lot::Mutex;
use serde::Serialize;
use strum::IntoStaticStr;
use tracing::{debug, warn};


#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RequestKind {
    Search,
    Fetch,
}


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BudgetSnapshot {
    pub limit: usize,
    pub used: usize,
    pub searches: usize,
    pub fetches: usize,
    pub failed_fetches: usize,
}

impl BudgetSnapshot {
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.used)
    }
}


/// Hard cap on remote calls for one run. The check and the increment share
/// one lock, so concurrent callers can never overshoot the limit.
#[derive(Debug)]
pub struct Budget {
    state: Mutex<BudgetSnapshot>,
}

impl Budget {
    pub fn new(limit: usize) -> Self {
        Self {
            state: Mutex::new(BudgetSnapshot {
                limit,
                ..BudgetSnapshot::default()
            }),
        }
    }

    /// Reserves one request unit. Returns false once the limit is reached.
    pub fn try_charge(&self, kind: RequestKind) -> bool {
        let mut state = self.state.lock();
        if state.used >= state.limit {
            return false;
        }
        state.used += 1;
        match kind {
            RequestKind::Search => state.searches += 1,
            RequestKind::Fetch => state.fetches += 1,
        }
        debug!(
            "Charged {} ({}/{})",
            <&str>::from(kind),
            state.used,
            state.limit
        );
        true
    }

    /// Releases the unit held by a fetch that produced nothing usable.
    /// Returns false, leaving the counters untouched, when every charged
    /// fetch has already been refunded.
    pub fn refund_fetch(&self) -> bool {
        let mut state = self.state.lock();
        if state.failed_fetches >= state.fetches || state.used == 0 {
            warn!("Refund without a matching fetch charge ignored");
            return false;
        }
        state.used -= 1;
        state.failed_fetches += 1;
        true
    }


    pub fn is_exhausted(&self) -> bool {
        let state = self.state.lock();
        state.used >= state.limit
    }

    pub fn remaining(&self) -> usize {
        self.state.lock().remaining()
    }

    pub fn snapshot(&self) -> BudgetSnapshot {
        *self.state.lock()
    }
}
