pub mod http;
pub mod models;
pub mod scrub;
pub mod traits;
pub mod wait;

pub use http::HttpBackend;
pub use models::{
    App, AuthConfig, AuthField, AuthScheme, ConnectedAccount, ConnectionLookup, ConnectionRequest,
    ConnectionStatus, InitiateConnection, Integration, SaveAccessData,
};
pub use traits::Backend;
pub use wait::{WaitPolicy, wait_until_active};
