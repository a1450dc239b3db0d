#![cfg(test)]
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod origin_server;
pub mod relay_connectors;
pub mod relay_proxy;

pub use origin_server::OriginServer;
pub use relay_connectors::RelayConnectorFactory;
pub use relay_proxy::RelayProxy;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
