pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod proxy;
pub mod xml;

pub use api::ApiClient;
pub use config::{ApiSettings, ProxySettings, Settings};
pub use credentials::{CredentialKey, Credentials};
pub use error::FetchError;
pub use http::ClientRegistry;
pub use proxy::{ProxyDescriptor, resolve_proxy};
pub use xml::{TransformArguments, TransformRequest, XmlClient, XmlPayload};
