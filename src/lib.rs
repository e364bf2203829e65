//! Client for the Firebase Cloud Messaging legacy HTTP send endpoint.
//!
//! ```no_run
//! use fcm_push::{Client, Config, Message, Notification};
//!
//! # async fn run() -> Result<(), fcm_push::ClassifiedError> {
//! let client = Client::new(Config::new("your-fcm-server-key").with_max_retries(4));
//!
//! let message = Message::to_many(["registrationID1", "registrationID2"])
//!     .with_notification(Notification::new("Example FCM message", "Hello world"))
//!     .with_data("customKey", "custom value");
//!
//! let response = client.send(&message).await?;
//! for (index, result) in response.failed_results() {
//!     eprintln!("recipient {} failed: {:?}", index, result.error);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod message;
pub mod response;

pub use client::Client;
pub use config::{Config, DEFAULT_ENDPOINT, ResolvedConfig, merge_defaults};
pub use error::{ClassifiedError, ErrorKind};
pub use message::{Message, Notification, Priority};
pub use response::{Response, ResultError, SendResult};
