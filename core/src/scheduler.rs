//! Parallel index construction.
//!
//! The document list is cut into one contiguous partition per worker. Each
//! worker runs on its own OS thread, reads its documents in order and feeds
//! their terms into the shared [`InvertedIndex`]. `build` returns once every
//! worker has joined.

use std::collections::HashSet;
use std::io::{self, BufRead};
use std::ops::Range;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::corpus::Document;
use crate::error::{Error, Result};
use crate::index::{DocId, InvertedIndex};
use crate::tokenizer::normalize;

/// Upper bound on worker threads for a single build.
pub const MAX_WORKERS: usize = 1024;

/// Receives documents that could not be read. Called from worker threads.
pub trait FailureReporter: Sync {
    fn report(&self, doc_id: &str, err: &io::Error);
}

/// Reports failures as `warn` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl FailureReporter for LogReporter {
    fn report(&self, doc_id: &str, err: &io::Error) {
        tracing::warn!(doc = doc_id, error = %err, "failed to index document, skipping");
    }
}

fn check_workers(workers: usize) -> Result<()> {
    if workers == 0 || workers > MAX_WORKERS {
        return Err(Error::InvalidWorkerCount { requested: workers, max: MAX_WORKERS });
    }
    Ok(())
}

/// Split `0..len` into exactly `workers` contiguous ranges. With
/// `q = len / workers` and `r = len % workers`, the first `r` ranges hold
/// `q + 1` items and the rest hold `q`.
pub fn partition(len: usize, workers: usize) -> Result<Vec<Range<usize>>> {
    check_workers(workers)?;
    let q = len / workers;
    let r = len % workers;
    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for i in 0..workers {
        let size = if i < r { q + 1 } else { q };
        ranges.push(start..start + size);
        start += size;
    }
    debug_assert_eq!(start, len);
    Ok(ranges)
}

/// Read a whole document and collect its distinct indexable terms.
///
/// Bytes that are not valid UTF-8 decode to U+FFFD, which splits words like
/// any other non-word character. Only genuine I/O errors fail the document.
fn collect_terms<D: Document + ?Sized>(doc: &D) -> io::Result<HashSet<String>> {
    let mut reader = doc.open()?;
    let mut terms = HashSet::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        terms.extend(normalize(&String::from_utf8_lossy(&buf)));
    }
    Ok(terms)
}

/// Index one document. Nothing is recorded unless the whole text was read.
pub fn index_document<D: Document + ?Sized>(index: &InvertedIndex, doc: &D) -> io::Result<()> {
    let terms = collect_terms(doc)?;
    let id: DocId = Arc::from(doc.id());
    index.record_all(terms.iter().map(String::as_str), &id);
    Ok(())
}

fn run_worker<D: Document>(
    worker: usize,
    index: &InvertedIndex,
    documents: &[D],
    reporter: &dyn FailureReporter,
) {
    tracing::debug!(worker, documents = documents.len(), "worker started");
    let mut failed = 0usize;
    for doc in documents {
        if let Err(err) = index_document(index, doc) {
            reporter.report(doc.id(), &err);
            failed += 1;
        }
    }
    tracing::debug!(worker, failed, "worker finished");
}

/// Index `documents` into `index` using `workers` parallel workers.
///
/// Returns the wall-clock time between starting the first worker and joining
/// the last one. Documents that fail to read are passed to `reporter` and left
/// out of the index; they never abort the build.
pub fn build<D: Document>(
    index: &InvertedIndex,
    documents: &[D],
    workers: usize,
    reporter: &dyn FailureReporter,
) -> Result<Duration> {
    let partitions = partition(documents.len(), workers)?;

    let start = Instant::now();
    let outcome: Result<()> = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(partitions.len());
        let mut spawn_err = None;
        for (worker, range) in partitions.into_iter().enumerate() {
            if range.is_empty() {
                continue;
            }
            let slice = &documents[range];
            let spawned = thread::Builder::new()
                .name(format!("indexer-{worker}"))
                .spawn_scoped(scope, move || run_worker(worker, index, slice, reporter));
            match spawned {
                Ok(handle) => handles.push((worker, handle)),
                Err(err) => {
                    spawn_err = Some(err);
                    break;
                }
            }
        }
        // Join everything that did start before reporting any error.
        let mut panicked = None;
        for (worker, handle) in handles {
            if handle.join().is_err() && panicked.is_none() {
                panicked = Some(worker);
            }
        }
        if let Some(err) = spawn_err {
            return Err(Error::Spawn(err));
        }
        match panicked {
            Some(worker) => Err(Error::WorkerPanicked { worker }),
            None => Ok(()),
        }
    });
    let elapsed = start.elapsed();
    outcome?;

    tracing::info!(
        documents = documents.len(),
        workers,
        terms = index.len(),
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "index build complete"
    );
    Ok(elapsed)
}

impl InvertedIndex {
    /// [`build`] with failures logged through [`LogReporter`].
    pub fn build<D: Document>(&self, documents: &[D], workers: usize) -> Result<Duration> {
        build(self, documents, workers, &LogReporter)
    }
}
