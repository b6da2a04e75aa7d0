use futures_core::Stream;
use futures_util::future::{self, BoxFuture, FutureExt};
use futures_util::stream::StreamExt;

use crate::observable::RxStream;
use crate::optional::RxOptional;

/// Extension trait bringing stream elements back into `RxOptional`
pub trait OptionalStreamExt: Stream + Sized + Unpin + Send + 'static {
    /// Resolve to the first element, or an empty container if the stream is empty
    fn first_optional(self) -> BoxFuture<'static, RxOptional<Self::Item>>
    where
        Self::Item: Send + 'static,
    {
        RxOptional::from_stream(self).boxed()
    }

    /// Unwrap a stream of containers, dropping the empty ones
    fn present_values<T>(self) -> RxStream<T>
    where
        Self: Stream<Item = RxOptional<T>>,
        T: Send + 'static,
    {
        self.filter_map(|optional| future::ready(optional.into_option()))
            .boxed()
    }

    /// Map each element to a container and keep only the present results
    fn filter_map_optional<U, F>(self, mut f: F) -> RxStream<U>
    where
        F: FnMut(Self::Item) -> RxOptional<U> + Send + 'static,
        U: Send + 'static,
    {
        self.filter_map(move |item| future::ready(f(item).into_option()))
            .boxed()
    }
}

impl<S> OptionalStreamExt for S
where
    S: Stream + Sized + Unpin + Send + 'static,
{
}
