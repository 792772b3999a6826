//! Signed AssumeRole client for Alibaba Cloud STS (Security Token Service).
//!
//! Exchanges a long-lived AccessKey pair for short-lived, role-scoped
//! credentials. Each call builds a canonical request, signs it with
//! HMAC-SHA1, sends it once, and classifies the reply by the shape of its
//! JSON body:
//!
//! - a body with `Code` is a [`ServiceError`], whatever the HTTP status;
//! - a body with `RequestId`, `AssumedRoleUser` and `Credentials` is a grant;
//! - anything else is [`StsError::Decode`].
//!
//! Network failures are [`StsError::Transport`]. Nothing is retried, cached
//! or refreshed; callers request new credentials before
//! [`Credentials::expiration`].
//!
//! # Quick Start (async)
//!
//! ```no_run
//! use ali_sts_assume_role::{Client, Credential, RoleRef, StsError};
//!
//! # async fn example() -> ali_sts_assume_role::Result<()> {
//! let client = Client::new(
//!     Credential::new("your-access-key-id", "your-access-key-secret"),
//!     RoleRef::new("acs:ram::123456789012:role/example", "session"),
//! )?;
//!
//! match client.assume_role(3600, None).await {
//!     Ok(resp) => println!("Temporary AK: {}", resp.credentials.access_key_id),
//!     Err(StsError::Service(err)) => eprintln!("rejected: {} ({})", err.code, err.request_id),
//!     Err(other) => return Err(other),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod response;

#[cfg(feature = "blocking")]
pub mod blocking;

mod classify;
mod request;
mod sign;
mod transport;

pub use client::{Client, DEFAULT_DURATION_SECONDS};
pub use config::ClientConfig;
pub use credential::{
    ChainProvider, Credential, CredentialProvider, EnvProvider, RoleRef, StaticProvider,
};
pub use error::{Result, ServiceError, StsError};
pub use response::{AssumeRoleResponse, AssumedRoleUser, Credentials};

// Compile-time assertions: key types must be Send + Sync for use across threads.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    let _ = assert_send_sync::<Client>;
    let _ = assert_send_sync::<StsError>;
    let _ = assert_send_sync::<Credential>;
    let _ = assert_send_sync::<AssumeRoleResponse>;
};
