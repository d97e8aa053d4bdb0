//! Lazy sequence driver
//!
//! [`Pages`] turns a page fetcher into a flat stream of items. It holds at
//! most one page in memory and issues at most one fetch at a time, and only
//! when the consumer pulls with an empty buffer.

use super::types::{Page, PageSelector};
use crate::error::Result;
use futures::stream::{FusedStream, Stream};
use pin_project_lite::pin_project;
use std::collections::VecDeque;
use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tracing::{debug, trace, warn};

/// Sequence state owned by a single [`Pages`] stream
#[derive(Debug)]
enum SequenceState {
    /// Waiting for the next pull; holds the selector for the next fetch
    Ready(PageSelector),
    /// A fetch is in flight
    Fetching,
    /// Last page consumed from the server
    Exhausted,
    /// A fetch failed and the error was handed to the consumer
    Failed,
}

pin_project! {
    /// Flattened stream of items across all pages of a listing
    ///
    /// Each element is `Ok(item)` until a fetch fails, at which point exactly
    /// one `Err` is yielded and the stream ends. Items are produced in fetch
    /// order, and in server order within a page.
    #[must_use = "streams do nothing unless polled"]
    pub struct Pages<T, F, Fut> {
        fetcher: F,
        #[pin]
        in_flight: Option<Fut>,
        buffer: VecDeque<T>,
        state: SequenceState,
        pages_fetched: usize,
    }
}

impl<T, F, Fut> Pages<T, F, Fut>
where
    F: FnMut(PageSelector) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    /// Create a driver that starts from the first page
    pub fn new(fetcher: F) -> Self {
        Self::starting_at(fetcher, PageSelector::First)
    }

    /// Create a driver that resumes from a known selector
    pub fn starting_at(fetcher: F, selector: PageSelector) -> Self {
        Self {
            fetcher,
            in_flight: None,
            buffer: VecDeque::new(),
            state: SequenceState::Ready(selector),
            pages_fetched: 0,
        }
    }
}

impl<T, F, Fut> Pages<T, F, Fut> {
    /// Number of fetches that have completed so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Whether a fetch error ended the sequence
    pub fn is_failed(&self) -> bool {
        matches!(self.state, SequenceState::Failed)
    }
}

impl<T, F, Fut> Stream for Pages<T, F, Fut>
where
    F: FnMut(PageSelector) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(item) = this.buffer.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            match mem::replace(this.state, SequenceState::Fetching) {
                SequenceState::Ready(selector) => {
                    trace!(%selector, "fetching page");
                    let fut = (this.fetcher)(selector);
                    this.in_flight.set(Some(fut));
                }
                SequenceState::Fetching => {
                    let Some(fut) = this.in_flight.as_mut().as_pin_mut() else {
                        *this.state = SequenceState::Exhausted;
                        return Poll::Ready(None);
                    };
                    let result = ready!(fut.poll(cx));
                    this.in_flight.set(None);
                    *this.pages_fetched += 1;

                    match result {
                        Ok(page) => {
                            let next = page.next_page();
                            debug!(
                                page = *this.pages_fetched,
                                items = page.len(),
                                next = %next,
                                "fetched page"
                            );
                            this.buffer.extend(page.items);
                            *this.state = match next.into_selector() {
                                Some(selector) => SequenceState::Ready(selector),
                                None => {
                                    debug!(pages = *this.pages_fetched, "no more pages");
                                    SequenceState::Exhausted
                                }
                            };
                        }
                        Err(e) => {
                            warn!(
                                page = *this.pages_fetched,
                                error = %e,
                                "page fetch failed, ending sequence"
                            );
                            *this.state = SequenceState::Failed;
                            return Poll::Ready(Some(Err(e)));
                        }
                    }
                }
                terminal => {
                    *this.state = terminal;
                    return Poll::Ready(None);
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.buffer.len();
        match self.state {
            SequenceState::Exhausted => (buffered, Some(buffered)),
            SequenceState::Failed => (0, Some(0)),
            _ => (buffered, None),
        }
    }
}

impl<T, F, Fut> FusedStream for Pages<T, F, Fut>
where
    F: FnMut(PageSelector) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    fn is_terminated(&self) -> bool {
        self.buffer.is_empty()
            && matches!(
                self.state,
                SequenceState::Exhausted | SequenceState::Failed
            )
    }
}
