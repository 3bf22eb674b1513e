//! Cancellable background conversion with last-request-wins delivery.

use point_cloud_convert::{PointCloud, convert_image};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

/// A conversion request snapshot handed to the worker thread.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub bytes: Arc<Vec<u8>>,
    pub count: usize,
    pub scale: f32,
}

/// A finished conversion tagged with its request generation.
struct Completed {
    generation: u64,
    cloud: PointCloud,
}

/// Runs conversions off the frame loop and delivers only the newest
/// result.
///
/// One long-lived worker consumes a request channel, so at most one
/// conversion runs at a time. Every request bumps the shared
/// generation counter. Cancellation is cooperative: the decode/sample
/// pass has no internal suspension points, so the worker re-checks the
/// counter before starting and again right before handing its result
/// over, and [`CloudLoader::poll`] re-checks on the frame side. The
/// attribute arrays are therefore only ever swapped in as one atomic
/// unit from the winning request.
pub struct CloudLoader {
    generation: Arc<AtomicU64>,
    requests: Sender<(u64, ConversionRequest)>,
    results: Receiver<Completed>,
    delivered: u64,
}

impl CloudLoader {
    pub fn new() -> Self {
        let generation = Arc::new(AtomicU64::new(0));
        let (requests, request_rx) = channel();
        let (result_tx, results) = channel();
        let latest = Arc::clone(&generation);
        thread::spawn(move || convert_worker(request_rx, result_tx, latest));

        Self {
            generation,
            requests,
            results,
            delivered: 0,
        }
    }

    /// Queue a conversion, superseding any in-flight request.
    /// Returns the generation assigned to this request.
    pub fn request(&self, request: ConversionRequest) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        // A send failure means the worker is gone, which only happens
        // during teardown.
        let _ = self.requests.send((generation, request));
        generation
    }

    /// Invalidate any in-flight or undelivered conversion.
    pub fn cancel(&mut self) {
        self.delivered = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
    }

    /// Whether a request is still converting.
    pub fn in_flight(&self) -> bool {
        self.delivered < self.generation.load(Ordering::SeqCst)
    }

    /// Poll for the newest completed conversion.
    ///
    /// Drains the channel and returns a result only if it belongs to
    /// the current generation; anything older is discarded silently.
    pub fn poll(&mut self) -> Option<PointCloud> {
        let current = self.generation.load(Ordering::SeqCst);
        let mut newest = None;

        while let Ok(done) = self.results.try_recv() {
            if done.generation == current && done.generation > self.delivered {
                newest = Some(done);
            }
        }

        let done = newest?;
        self.delivered = done.generation;
        Some(done.cloud)
    }
}

impl Default for CloudLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Worker loop: collapse queued bursts to the newest request, convert,
/// and deliver unless superseded meanwhile. Exits when the loader is
/// dropped.
fn convert_worker(
    requests: Receiver<(u64, ConversionRequest)>,
    results: Sender<Completed>,
    latest: Arc<AtomicU64>,
) {
    while let Ok((mut generation, mut request)) = requests.recv() {
        while let Ok(next) = requests.try_recv() {
            (generation, request) = next;
        }
        if latest.load(Ordering::SeqCst) != generation {
            log::debug!("skipping superseded conversion, generation {generation}");
            continue;
        }

        let mut rng = rand::rng();
        let cloud = convert_image(&request.bytes, request.count, request.scale, &mut rng);

        if latest.load(Ordering::SeqCst) == generation {
            if results.send(Completed { generation, cloud }).is_err() {
                break;
            }
        } else {
            log::debug!("discarding stale conversion, generation {generation}");
        }
    }
}
