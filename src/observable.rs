//! Observable - a lazy, restartable stream of zero or more values
//!
//! An `Observable` is a stream factory: every `subscribe()` builds a fresh
//! stream, so re-subscribing replays the same sequence.

use async_stream::stream;
use futures::channel::mpsc::channel;
use futures_util::{
    future,
    stream::{self, BoxStream, StreamExt},
    SinkExt,
};
use std::sync::Arc;
use tokio::runtime::Handle;

use crate::optional::RxOptional;
use crate::rx_configuration::SubscribeOnConfig;

/// A boxed, heap-allocated stream handed out by each subscription
pub type RxStream<T> = BoxStream<'static, T>;

pub struct Observable<T> {
    source: Arc<dyn Fn() -> RxStream<T> + Send + Sync + 'static>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Observable {
            source: Arc::clone(&self.source),
        }
    }
}

// ================================
// Constructors
// ================================

impl<T> Observable<T>
where
    T: Send + 'static,
{
    /// Create an observable from a stream factory
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> RxStream<T> + Send + Sync + 'static,
    {
        Observable { source: Arc::new(f) }
    }

    /// Emit a single element, then complete
    pub fn just(item: T) -> Self
    where
        T: Clone + Sync,
    {
        Observable::new(move || stream::once(future::ready(item.clone())).boxed())
    }

    /// Complete immediately without emitting
    pub fn empty() -> Self {
        Observable::new(|| stream::empty().boxed())
    }

    /// Emit every element of `items`, in order
    pub fn from_iterable<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + Send + Sync + 'static,
        <I as IntoIterator>::IntoIter: Send,
    {
        Observable::new(move || stream::iter(items.clone()).boxed())
    }

    /// Start a fresh run of the sequence
    pub fn subscribe(&self) -> RxStream<T> {
        (self.source)()
    }
}

// ================================
// Combinators
// ================================

impl<T> Observable<T>
where
    T: Send + 'static,
{
    pub fn map<U, F>(self, f: F) -> Observable<U>
    where
        F: Fn(T) -> U + Send + Sync + Clone + 'static,
        U: Send + 'static,
    {
        Observable::new(move || {
            let f = f.clone();
            self.subscribe().map(move |item| f(item)).boxed()
        })
    }

    pub fn filter<F>(self, predicate: F) -> Observable<T>
    where
        F: Fn(&T) -> bool + Send + Sync + Clone + 'static,
    {
        Observable::new(move || {
            let predicate = predicate.clone();
            let upstream = self.subscribe();
            stream! {
                let mut s = upstream;
                while let Some(item) = s.next().await {
                    if predicate(&item) {
                        yield item;
                    }
                }
            }
            .boxed()
        })
    }

    /// Map each element to an observable and concatenate the results in order
    pub fn flat_map<U, F>(self, f: F) -> Observable<U>
    where
        F: Fn(T) -> Observable<U> + Send + Sync + Clone + 'static,
        U: Send + 'static,
    {
        Observable::new(move || {
            let f = f.clone();
            self.subscribe().flat_map(move |item| f(item).subscribe()).boxed()
        })
    }

    /// Map each element to an iterable and emit its items in order
    pub fn flat_map_iter<U, I, F>(self, f: F) -> Observable<U>
    where
        F: Fn(T) -> I + Send + Sync + Clone + 'static,
        I: IntoIterator<Item = U>,
        <I as IntoIterator>::IntoIter: Send + 'static,
        U: Send + 'static,
    {
        Observable::new(move || {
            let f = f.clone();
            self.subscribe()
                .flat_map(move |item| stream::iter(f(item)))
                .boxed()
        })
    }

    /// Run production on `handle`, forwarding elements through a bounded channel
    pub fn subscribe_on(self, handle: Handle) -> Observable<T> {
        self.subscribe_on_with(handle, SubscribeOnConfig::default())
    }

    pub fn subscribe_on_with(self, handle: Handle, config: SubscribeOnConfig) -> Observable<T> {
        Observable::new(move || {
            let (mut tx, rx) = channel(config.buffer_size);
            let mut upstream = self.subscribe();
            handle.spawn(async move {
                while let Some(item) = upstream.next().await {
                    if tx.send(item).await.is_err() {
                        log::debug!("Subscriber dropped, stopping upstream production");
                        break;
                    }
                }
            });
            rx.boxed()
        })
    }
}

// ================================
// Subscription
// ================================

impl<T> Observable<T>
where
    T: Send + 'static,
{
    /// Subscribe with a value callback and run the sequence to completion
    pub async fn for_each<F>(&self, mut on_next: F)
    where
        F: FnMut(T),
    {
        let mut s = self.subscribe();
        while let Some(item) = s.next().await {
            on_next(item);
        }
    }

    /// Collect one full run of the sequence
    pub async fn to_list(&self) -> Vec<T> {
        self.subscribe().collect().await
    }

    /// Blocking [`Observable::to_list`]
    pub fn blocking_to_list(&self) -> Vec<T> {
        futures::executor::block_on(self.to_list())
    }

    /// The first element, back inside a container
    pub async fn first(&self) -> RxOptional<T> {
        RxOptional::from_stream(self.subscribe()).await
    }
}
