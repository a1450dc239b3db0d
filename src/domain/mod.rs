pub mod cache;
pub mod directive;
pub mod dispatcher;
pub mod errors;
pub mod models;
pub mod stream;
pub mod target_url;

pub use cache::ConnectorCache;
pub use directive::{select_directive, split_candidates, Directive, ProxyKind, ProxyRoute};
pub use dispatcher::Dispatcher;
pub use errors::*;
pub use models::*;
pub use stream::{ProxyIo, ProxyStream};
pub use target_url::resolver_url;
