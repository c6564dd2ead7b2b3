//! Background image decoding and in-order completion.
//!
//! Restores (undo/redo), loads, and resize reloads decode PNG data on the
//! tokio runtime. Decodes run concurrently and may finish in any order, so
//! completions are parked in a [`DecodeQueue`] and applied strictly in the
//! order the requests were issued.

use super::options::LoadCallback;
use super::types::SurfaceError;
use crate::image::{DecodedImage, ImageSource};
use std::collections::BTreeMap;
use std::fmt;
use tokio::sync::mpsc;
use tokio::task;

/// What to do with a decoded image once it is its turn.
pub(crate) enum DecodeJob {
    /// Undo/redo: clear to background, paint unscaled at the origin
    Restore,
    /// External load: clear, paint scaled to the canvas, commit, then call back
    Load { on_complete: Option<LoadCallback> },
    /// Post-resize reload: clear, paint scaled, commit
    Reload,
}

impl DecodeJob {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            DecodeJob::Restore => "restore",
            DecodeJob::Load { .. } => "load",
            DecodeJob::Reload => "reload",
        }
    }
}

impl fmt::Debug for DecodeJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub(crate) type DecodeResult = Result<DecodedImage, SurfaceError>;

pub(crate) struct DecodeRequest {
    seq: u64,
    source: ImageSource,
}

pub(crate) struct DecodeCompletion {
    pub(crate) seq: u64,
    pub(crate) result: DecodeResult,
}

/// Sequence-numbered jobs and their (possibly early) results.
#[derive(Default)]
pub(crate) struct DecodeQueue {
    next_seq: u64,
    jobs: BTreeMap<u64, DecodeJob>,
    ready: BTreeMap<u64, DecodeResult>,
}

impl DecodeQueue {
    /// Registers a job and returns its sequence number.
    pub(crate) fn push(&mut self, job: DecodeJob) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.jobs.insert(seq, job);
        seq
    }

    /// Records a finished decode. Unknown sequence numbers are ignored.
    pub(crate) fn complete(&mut self, seq: u64, result: DecodeResult) {
        if self.jobs.contains_key(&seq) {
            self.ready.insert(seq, result);
        } else {
            log::warn!("Dropping completion for unknown decode #{seq}");
        }
    }

    /// Takes the oldest job if its result has arrived.
    pub(crate) fn pop_ready(&mut self) -> Option<(u64, DecodeJob, DecodeResult)> {
        let (&seq, _) = self.jobs.first_key_value()?;
        let result = self.ready.remove(&seq)?;
        let job = self.jobs.remove(&seq)?;
        Some((seq, job, result))
    }

    /// Removes every pending job, oldest first.
    pub(crate) fn drain(&mut self) -> Vec<(u64, DecodeJob)> {
        self.ready.clear();
        std::mem::take(&mut self.jobs).into_iter().collect()
    }

    pub(crate) fn pending(&self) -> usize {
        self.jobs.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Bridge between the single-threaded surface and the tokio runtime.
pub(crate) struct DecodeWorker {
    request_tx: mpsc::UnboundedSender<DecodeRequest>,
    completion_rx: mpsc::UnboundedReceiver<DecodeCompletion>,
}

impl DecodeWorker {
    /// Spawns the dispatcher task on `runtime_handle`.
    pub(crate) fn new(runtime_handle: &tokio::runtime::Handle) -> Self {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<DecodeRequest>();
        let (completion_tx, completion_rx) = mpsc::unbounded_channel::<DecodeCompletion>();

        runtime_handle.spawn(async move {
            while let Some(request) = request_rx.recv().await {
                let completion_tx = completion_tx.clone();
                // One task per request so a slow decode does not hold up later ones
                tokio::spawn(async move {
                    let DecodeRequest { seq, source } = request;
                    log::debug!("Decoding #{seq} from {}", source.describe());

                    let result = task::spawn_blocking(move || {
                        let encoded = source.resolve()?;
                        DecodedImage::decode(encoded.as_bytes())
                    })
                    .await
                    .unwrap_or_else(|e| Err(SurfaceError::Decode(format!("decode task failed: {e}"))));

                    let _ = completion_tx.send(DecodeCompletion { seq, result });
                });
            }
            log::debug!("Decode dispatcher shutting down");
        });

        Self {
            request_tx,
            completion_rx,
        }
    }

    pub(crate) fn submit(&self, seq: u64, source: ImageSource) -> Result<(), SurfaceError> {
        self.request_tx
            .send(DecodeRequest { seq, source })
            .map_err(|_| SurfaceError::DecoderUnavailable)
    }

    /// Non-blocking receive.
    pub(crate) fn try_recv(&mut self) -> Option<DecodeCompletion> {
        self.completion_rx.try_recv().ok()
    }

    /// Blocks the current thread until a completion arrives.
    ///
    /// Returns `None` once the worker is gone. Must not be called from
    /// inside an async context.
    pub(crate) fn recv_blocking(&mut self) -> Option<DecodeCompletion> {
        self.completion_rx.blocking_recv()
    }
}

#[cfg(test)]
impl DecodeWorker {
    /// Worker whose dispatcher is already gone.
    pub(crate) fn disconnected_for_test() -> Self {
        let (request_tx, request_rx) = mpsc::unbounded_channel::<DecodeRequest>();
        drop(request_rx);
        let (_completion_tx, completion_rx) = mpsc::unbounded_channel::<DecodeCompletion>();
        Self {
            request_tx,
            completion_rx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::EncodedImage;

    fn decoded() -> DecodeResult {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 1, 1).unwrap();
        let png = EncodedImage::encode(&surface).unwrap();
        DecodedImage::decode(png.as_bytes())
    }

    #[test]
    fn completions_are_released_in_request_order() {
        let mut queue = DecodeQueue::default();
        let first = queue.push(DecodeJob::Restore);
        let second = queue.push(DecodeJob::Reload);
        let third = queue.push(DecodeJob::Restore);

        // Later requests finish first
        queue.complete(third, decoded());
        queue.complete(second, decoded());
        assert!(queue.pop_ready().is_none());
        assert_eq!(queue.pending(), 3);

        queue.complete(first, decoded());
        let order: Vec<u64> = std::iter::from_fn(|| queue.pop_ready().map(|(seq, _, _)| seq)).collect();
        assert_eq!(order, vec![first, second, third]);
        assert!(queue.is_empty());
    }

    #[test]
    fn failed_results_still_release_their_slot() {
        let mut queue = DecodeQueue::default();
        let first = queue.push(DecodeJob::Restore);
        let second = queue.push(DecodeJob::Restore);
        queue.complete(second, decoded());
        queue.complete(first, Err(SurfaceError::Decode("corrupt".into())));

        let (seq, _, result) = queue.pop_ready().unwrap();
        assert_eq!(seq, first);
        assert!(result.is_err());
        let (seq, _, result) = queue.pop_ready().unwrap();
        assert_eq!(seq, second);
        assert!(result.is_ok());
    }

    #[test]
    fn unknown_completions_are_ignored() {
        let mut queue = DecodeQueue::default();
        queue.complete(42, decoded());
        assert!(queue.pop_ready().is_none());
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn drain_returns_jobs_oldest_first() {
        let mut queue = DecodeQueue::default();
        queue.push(DecodeJob::Reload);
        queue.push(DecodeJob::Restore);
        let drained: Vec<&str> = queue.drain().iter().map(|(_, job)| job.name()).collect();
        assert_eq!(drained, vec!["reload", "restore"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn worker_decodes_on_runtime() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut worker = DecodeWorker::new(runtime.handle());
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 2, 3).unwrap();
        let png = EncodedImage::encode(&surface).unwrap();

        worker.submit(7, ImageSource::from(png)).unwrap();
        let completion = worker.recv_blocking().unwrap();
        assert_eq!(completion.seq, 7);
        let image = completion.result.unwrap();
        assert_eq!((image.width(), image.height()), (2, 3));
    }

    #[test]
    fn disconnected_worker_rejects_requests() {
        let worker = DecodeWorker::disconnected_for_test();
        let result = worker.submit(0, ImageSource::DataUrl(String::new()));
        assert!(matches!(result, Err(SurfaceError::DecoderUnavailable)));
    }
}
