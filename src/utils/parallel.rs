use std::future::Future;
use futures::stream::{self, StreamExt};

/// Runs `f` over every item with at most `limit` futures in flight and
/// returns the outputs in completion order.
pub async fn parallel_map_unordered<I, F, Fut, T>(items: I, limit: usize, f: F) -> Vec<T>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = T>,
{
    stream::iter(items)
        .map(f)
        .buffer_unordered(limit.max(1))
        .collect()
        .await
}
