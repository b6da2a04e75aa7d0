pub mod error;
pub mod optional;

pub mod observable;
pub mod single;

pub mod observer;
pub mod rx_configuration;
pub mod optional_stream_ext;

// Re-export the container and its boundary types at the crate root
pub use error::{OptionalError, OptionalResult};
pub use observable::{Observable, RxStream};
pub use observer::ObserverOutcome;
pub use optional::RxOptional;
pub use optional_stream_ext::OptionalStreamExt;
pub use rx_configuration::{ObserverConfig, SubscribeOnConfig};
pub use single::Single;
