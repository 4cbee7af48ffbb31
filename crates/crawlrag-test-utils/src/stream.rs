//! Async sequence fixture

use futures::stream::{self, BoxStream, StreamExt};

/// Stream over `items` that suspends before yielding each one
///
/// The stream owns its items and is consumed as it is read; build a new one
/// to iterate again. Once exhausted it keeps returning `None`.
pub fn async_iterator<I>(items: I) -> BoxStream<'static, I::Item>
where
    I: IntoIterator,
    I::IntoIter: Send + 'static,
    I::Item: Send + 'static,
{
    stream::unfold(items.into_iter(), |mut remaining| async move {
        tokio::task::yield_now().await;
        remaining.next().map(|item| (item, remaining))
    })
    .fuse()
    .boxed()
}
