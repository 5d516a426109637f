//! # restuser - client for the user-management REST service
//!
//! Typed async access to the five user operations (create, update, get,
//! delete, list), with every HTTP outcome mapped onto a structured [`Error`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use restuser::{Client, Context, Error, User};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let client = Client::builder()
//!         .base_url("https://users.example.com")?
//!         .build()?;
//!
//!     let ctx = Context::background().with_timeout(Duration::from_secs(5));
//!
//!     let created = client
//!         .create_user(&ctx, &User::new("Pepe", "pepe@faceit.com", "fr"))
//!         .await?;
//!     println!("Created user with ID: {}", created.id);
//!
//!     let user = client.get_user(&ctx, &created.id).await?;
//!     println!("User: {} <{}>", user.name, user.email);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Each operation documents a success status and a set of failure statuses.
//! Documented failures come back as [`Error::Service`] with the decoded
//! [`ErrorResponse`]; anything else is [`Error::UnexpectedStatus`]:
//!
//! ```no_run
//! use restuser::{Client, Context, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::builder().base_url("https://users.example.com")?.build()?;
//! match client.get_user(&Context::background(), "c3e11b46").await {
//!     Ok(user) => println!("Found: {:?}", user),
//!     Err(Error::Service(err)) => {
//!         eprintln!("Service error {}: {:?}", err.status_code, err.message());
//!     }
//!     Err(Error::UnexpectedStatus(code)) => eprintln!("Undocumented status {}", code),
//!     Err(e) if e.is_cancellation() => eprintln!("Timed out"),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Transports
//!
//! Requests go through a [`Transport`]. The default is a `reqwest::Client`;
//! wrap it in a [`HeaderTransport`] to add auth headers, or supply your own
//! implementation for proxying and tests.

mod client;
mod context;
mod error;
mod model;
mod operation;
mod transport;

pub use client::{Client, ClientBuilder, Config, DEFAULT_BASE_PATH};
pub use context::Context;
pub use error::{Error, Result, ServiceError};
pub use model::{ErrorResponse, ListUsersParams, User};
pub use transport::{HeaderTransport, Transport};
