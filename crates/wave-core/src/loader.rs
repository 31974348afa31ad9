use crate::error::WaveError;
use crate::surface::Surface;
use crossbeam::channel::{bounded, Receiver, Sender, TryRecvError};

/// What a surface producer hands back: a surface or a reason it failed.
pub type LoadResult = Result<Surface, String>;

/// Identifies one shape-change request. Tickets increase monotonically, so
/// the highest issued ticket is the only one allowed to take effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeTicket(u64);

impl ShapeTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A surface that is still being produced elsewhere (parsed, built, fetched).
///
/// Wraps the receiving end of a one-shot crossbeam channel; the core polls
/// it once per frame and never blocks on it.
pub struct ShapeLoad {
    rx: Receiver<LoadResult>,
}

/// Producer half of a [`ShapeLoad`].
pub struct ShapeLoadSender {
    tx: Sender<LoadResult>,
}

impl ShapeLoadSender {
    /// Deliver the result. Returns `false` if the receiving side is gone.
    pub fn resolve(self, result: LoadResult) -> bool {
        self.tx.try_send(result).is_ok()
    }
}

impl ShapeLoad {
    /// Create a connected producer/load pair.
    pub fn channel() -> (ShapeLoadSender, ShapeLoad) {
        let (tx, rx) = bounded(1);
        (ShapeLoadSender { tx }, ShapeLoad { rx })
    }

    /// A load that is already resolved; handy when the surface is computed
    /// synchronously but should still go through the deferred path.
    pub fn resolved(result: LoadResult) -> ShapeLoad {
        let (tx, load) = ShapeLoad::channel();
        tx.resolve(result);
        load
    }

    pub fn from_receiver(rx: Receiver<LoadResult>) -> ShapeLoad {
        ShapeLoad { rx }
    }

    fn poll(&self) -> Option<Result<Surface, WaveError>> {
        match self.rx.try_recv() {
            Ok(Ok(surface)) => Some(Ok(surface)),
            Ok(Err(reason)) => Some(Err(WaveError::ShapeLoad { reason })),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(WaveError::ShapeLoad {
                reason: "loader dropped without producing a surface".to_string(),
            })),
        }
    }
}

/// How a resolved deferred shape request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeLoadOutcome {
    /// The surface is the current shape. Positions were resampled unless it
    /// matched the shape already in place.
    Applied,
    /// A newer shape request was issued before this one resolved; the load
    /// was dropped.
    Superseded,
    /// Loading or sampler setup failed; the previous shape stays.
    Failed(WaveError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeLoadEvent {
    pub ticket: ShapeTicket,
    pub outcome: ShapeLoadOutcome,
}

/// Bookkeeping for shape requests: ticket issue plus the in-flight loads.
///
/// Only the latest request is ever kept in flight. Issuing a ticket drops
/// every older pending load (its sender's `resolve` then returns `false`)
/// and queues the old ticket to be reported as superseded.
#[derive(Default)]
pub(crate) struct ShapeRequests {
    next: u64,
    latest: Option<ShapeTicket>,
    pending: Vec<(ShapeTicket, ShapeLoad)>,
    superseded: Vec<ShapeTicket>,
}

impl ShapeRequests {
    pub fn issue(&mut self) -> ShapeTicket {
        self.next += 1;
        let ticket = ShapeTicket(self.next);
        self.latest = Some(ticket);
        self.superseded.extend(self.pending.drain(..).map(|(old, _)| old));
        ticket
    }

    pub fn is_latest(&self, ticket: ShapeTicket) -> bool {
        self.latest == Some(ticket)
    }

    pub fn defer(&mut self, ticket: ShapeTicket, load: ShapeLoad) {
        self.pending.push((ticket, load));
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Tickets whose loads were dropped by a newer request, oldest first.
    pub fn take_superseded(&mut self) -> Vec<ShapeTicket> {
        std::mem::take(&mut self.superseded)
    }

    /// Remove and return every load that has resolved, oldest ticket first.
    pub fn take_resolved(&mut self) -> Vec<(ShapeTicket, Result<Surface, WaveError>)> {
        let mut resolved = Vec::new();
        self.pending.retain(|(ticket, load)| match load.poll() {
            Some(result) => {
                resolved.push((*ticket, result));
                false
            }
            None => true,
        });
        resolved.sort_by_key(|(ticket, _)| *ticket);
        resolved
    }
}
