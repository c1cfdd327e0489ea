//! OAuth 1.0a credential models and the authorization handshake session.

pub mod credentials;
pub mod session;

pub use credentials::*;
pub use session::*;
