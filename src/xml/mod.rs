//! Fetching and transforming XML resources.

mod fetch;
mod payload;
mod transform;

pub use fetch::XmlClient;
pub use payload::{InvalidXml, XmlPayload};
pub use transform::{TransformArguments, TransformRequest};
