/// Network adapters for the component-intelligence service
mod blackduck_client;

pub use blackduck_client::BlackDuckClient;
