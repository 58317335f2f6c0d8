//! Stream combinators with explicit re-trigger semantics.
//!
//! Two primitives, chosen per merge node:
//!
//! - [`combine_latest3`]: **latest-value**. Emits whenever any source emits,
//!   using the most recent value of every source. Nothing is emitted until
//!   every source has emitted once. Bursts may be coalesced by whoever drains
//!   the output.
//! - [`zip_strict`]: **strict pairing**. Emits only when both sides have a
//!   fresh, unconsumed value; values are paired in arrival order and queued
//!   per side until their partner arrives.

use std::collections::VecDeque;
use std::future;

use futures::future::Either;
use futures::stream::{self, Stream, StreamExt};

enum Slot<A, B, C> {
    A(A),
    B(B),
    C(C),
}

/// Latest-value combination of three sources.
///
/// The output ends once all three sources have ended.
pub fn combine_latest3<A, B, C>(
    a: impl Stream<Item = A> + Send + 'static,
    b: impl Stream<Item = B> + Send + 'static,
    c: impl Stream<Item = C> + Send + 'static,
) -> impl Stream<Item = (A, B, C)> + Send + 'static
where
    A: Clone + Send + 'static,
    B: Clone + Send + 'static,
    C: Clone + Send + 'static,
{
    let tagged = stream::select(
        stream::select(a.map(Slot::A), b.map(Slot::B)),
        c.map(Slot::C),
    );

    tagged
        .scan((None, None, None), |latest, slot| {
            match slot {
                Slot::A(v) => latest.0 = Some(v),
                Slot::B(v) => latest.1 = Some(v),
                Slot::C(v) => latest.2 = Some(v),
            }
            let combined = match latest {
                (Some(a), Some(b), Some(c)) => Some((a.clone(), b.clone(), c.clone())),
                _ => None,
            };
            future::ready(Some(combined))
        })
        .filter_map(future::ready)
}

/// Strict pairing of two sources.
///
/// Each output consumes exactly one value from each side. If one side stalls
/// the output stalls too, however often the other side emits.
pub fn zip_strict<A, B>(
    a: impl Stream<Item = A> + Send + 'static,
    b: impl Stream<Item = B> + Send + 'static,
) -> impl Stream<Item = (A, B)> + Send + 'static
where
    A: Send + 'static,
    B: Send + 'static,
{
    let tagged = stream::select(a.map(Either::Left), b.map(Either::Right));

    tagged
        .scan(
            (VecDeque::new(), VecDeque::new()),
            |(lefts, rights), side| {
                match side {
                    Either::Left(v) => lefts.push_back(v),
                    Either::Right(v) => rights.push_back(v),
                }
                // At most one queue is non-empty between steps.
                let pair = if lefts.is_empty() || rights.is_empty() {
                    None
                } else {
                    lefts.pop_front().zip(rights.pop_front())
                };
                future::ready(Some(pair))
            },
        )
        .filter_map(future::ready)
}
