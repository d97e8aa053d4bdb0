//! Consumption idioms over [`Pages`]
//!
//! - [`scan`]: plain items plus a deferred [`ScanOutcome`] error check
//! - [`scan2`]: items paired with errors (`Result<T>` per element)
//! - [`scan_and_collect`]: everything at once, or the first error

use super::driver::Pages;
use super::types::{Page, PageSelector};
use crate::error::{Error, Result};
use futures::stream::{FusedStream, Stream, TryStreamExt};
use pin_project_lite::pin_project;
use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{ready, Context, Poll};

/// How a scan ended
#[derive(Debug)]
enum Outcome {
    /// Stream still live and not terminal
    Running,
    /// All pages consumed
    Exhausted,
    /// Stream dropped before it reached the end
    Abandoned,
    /// A fetch failed
    Failed(Error),
}

fn lock(slot: &Mutex<Outcome>) -> MutexGuard<'_, Outcome> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Write side of the outcome slot, owned by the [`Scan`] stream
#[derive(Debug)]
struct OutcomeRecorder {
    slot: Arc<Mutex<Outcome>>,
    finished: bool,
}

impl OutcomeRecorder {
    fn finish(&mut self, outcome: Outcome) {
        if !self.finished {
            *lock(&self.slot) = outcome;
            self.finished = true;
        }
    }
}

impl Drop for OutcomeRecorder {
    fn drop(&mut self) {
        self.finish(Outcome::Abandoned);
    }
}

/// Deferred error check for a [`Scan`] stream
///
/// # Panics
///
/// [`ScanOutcome::err`] panics when called while its stream is still alive
/// and has not yet ended. Drain the stream, or drop it, first.
#[derive(Debug)]
#[must_use = "a scan error is only reported through ScanOutcome::err"]
pub struct ScanOutcome {
    slot: Arc<Mutex<Outcome>>,
}

impl ScanOutcome {
    /// Whether the stream has ended (drained, failed, or dropped)
    pub fn is_terminal(&self) -> bool {
        !matches!(*lock(&self.slot), Outcome::Running)
    }

    /// Report the error that ended the scan, if any
    ///
    /// Returns `Ok(())` when the stream ran out of pages or was dropped
    /// early, and the fetch error otherwise.
    ///
    /// # Panics
    ///
    /// Panics if the stream is still alive and has not yet ended.
    pub fn err(self) -> Result<()> {
        let outcome = mem::replace(&mut *lock(&self.slot), Outcome::Running);
        match outcome {
            Outcome::Running => panic!(
                "ScanOutcome::err called before the scan stream was drained or dropped"
            ),
            Outcome::Exhausted | Outcome::Abandoned => Ok(()),
            Outcome::Failed(e) => Err(e),
        }
    }
}

pin_project! {
    /// Item stream whose terminating error is reported via [`ScanOutcome`]
    #[must_use = "streams do nothing unless polled"]
    pub struct Scan<S> {
        #[pin]
        inner: S,
        recorder: OutcomeRecorder,
    }
}

impl<S> Scan<S> {
    /// Wrap any stream of `Result<T>`
    pub fn new(inner: S) -> (Self, ScanOutcome) {
        let slot = Arc::new(Mutex::new(Outcome::Running));
        let scan = Self {
            inner,
            recorder: OutcomeRecorder {
                slot: Arc::clone(&slot),
                finished: false,
            },
        };
        (scan, ScanOutcome { slot })
    }
}

impl<T, S> Stream for Scan<S>
where
    S: Stream<Item = Result<T>>,
{
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let this = self.project();
        if this.recorder.finished {
            return Poll::Ready(None);
        }

        match ready!(this.inner.poll_next(cx)) {
            Some(Ok(item)) => Poll::Ready(Some(item)),
            Some(Err(e)) => {
                this.recorder.finish(Outcome::Failed(e));
                Poll::Ready(None)
            }
            None => {
                this.recorder.finish(Outcome::Exhausted);
                Poll::Ready(None)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.recorder.finished {
            return (0, Some(0));
        }
        // an error may cut the inner stream short
        (0, self.inner.size_hint().1)
    }
}

impl<T, S> FusedStream for Scan<S>
where
    S: Stream<Item = Result<T>>,
{
    fn is_terminated(&self) -> bool {
        self.recorder.finished
    }
}

/// Iterate items, checking for a terminating error afterwards
///
/// ```rust,ignore
/// let (items, outcome) = scan(fetcher);
/// let items: Vec<_> = items.collect().await;
/// outcome.err()?;
/// ```
pub fn scan<T, F, Fut>(fetcher: F) -> (Scan<Pages<T, F, Fut>>, ScanOutcome)
where
    F: FnMut(PageSelector) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    Scan::new(Pages::new(fetcher))
}

/// Iterate `Result<T>` elements; a failure is the last element
pub fn scan2<T, F, Fut>(fetcher: F) -> Pages<T, F, Fut>
where
    F: FnMut(PageSelector) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    Pages::new(fetcher)
}

/// Fetch every page and return all items, or the first error
pub async fn scan_and_collect<T, F, Fut>(fetcher: F) -> Result<Vec<T>>
where
    F: FnMut(PageSelector) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    scan2(fetcher).try_collect().await
}
