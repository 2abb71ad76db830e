//! Request construction, retry policy and client reuse.

mod registry;
mod request;
mod retry;

pub use registry::ClientRegistry;
pub use request::{CLIENT_MARKER, build_client};
pub use retry::{MAX_RETRIES, backoff_delay, clamp_retries, is_transient};
