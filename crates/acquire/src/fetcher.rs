//! Background acquisition worker.
//!
//! [`spawn`] runs every request on a detached worker thread and hands back a
//! [`FetchHandle`]. The handle exposes completion as a polled flag (check
//! [`FetchHandle::is_complete`] between other work, or block on
//! [`FetchHandle::collect`]) and delivers each request's bars as one
//! complete, static series. There is no partial-result contract: a key is
//! either absent or fully fetched.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, bounded};
use parking_lot::Mutex;
use tracing::{debug, warn};
use types::Bar;

use crate::provider::{AcquireError, BarProvider, FetchRequest};

type FetchResult = (String, Result<Vec<Bar>, AcquireError>);

/// Results drained from the worker so far.
#[derive(Debug, Default)]
struct Drained {
    ready: HashMap<String, Vec<Bar>>,
    errors: Vec<AcquireError>,
}

/// Handle to an in-flight background acquisition.
pub struct FetchHandle {
    rx: Receiver<FetchResult>,
    expected: usize,
    drained: Mutex<Drained>,
}

/// Start fetching every request on a background worker thread.
pub fn spawn(provider: Arc<dyn BarProvider>, requests: Vec<FetchRequest>) -> FetchHandle {
    let expected = requests.len();
    let (tx, rx) = bounded::<FetchResult>(expected.max(1));

    thread::spawn(move || {
        for request in requests {
            let key = request.key();
            debug!(key, "fetching historical bars");
            let result = provider.fetch(&request);
            if tx.send((key, result)).is_err() {
                // Handle dropped; nobody is listening anymore.
                break;
            }
        }
    });

    FetchHandle {
        rx,
        expected,
        drained: Mutex::new(Drained::default()),
    }
}

impl FetchHandle {
    /// Poll whether every request has been delivered (successfully or not).
    pub fn is_complete(&self) -> bool {
        let mut drained = self.drained.lock();
        self.drain_into(&mut drained);
        drained.ready.len() + drained.errors.len() >= self.expected
    }

    /// Block until every request is delivered, then return the bar series
    /// keyed by `{symbol}_{timeframe}`.
    ///
    /// The first provider error wins; a worker that dies early surfaces as
    /// [`AcquireError::Disconnected`].
    pub fn collect(self) -> Result<HashMap<String, Vec<Bar>>, AcquireError> {
        let mut drained = self.drained.into_inner();
        while drained.ready.len() + drained.errors.len() < self.expected {
            match self.rx.recv() {
                Ok(result) => absorb(&mut drained, result),
                Err(_) => {
                    return Err(AcquireError::Disconnected {
                        delivered: drained.ready.len() + drained.errors.len(),
                        expected: self.expected,
                    });
                }
            }
        }

        match drained.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(drained.ready),
        }
    }

    /// Move everything currently sitting in the channel into `drained`.
    fn drain_into(&self, drained: &mut Drained) {
        while let Ok(result) = self.rx.try_recv() {
            absorb(drained, result);
        }
    }
}

fn absorb(drained: &mut Drained, (key, result): FetchResult) {
    match result {
        Ok(bars) => {
            debug!(key, rows = bars.len(), "bars ready");
            drained.ready.insert(key, bars);
        }
        Err(error) => {
            warn!(key, %error, "fetch failed");
            drained.errors.push(error);
        }
    }
}
