//! Fail-closed access gate for backoffice routes: cookie tokens, cached remote introspection,
//! and axum middleware in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod gate;
pub mod http;
#[cfg(feature = "axum")] pub mod middleware;
pub mod obs;
pub mod store;

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "axum")] pub use axum;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)]
use {color_eyre as _, dotenv as _, httpmock as _, tower as _, tracing_subscriber as _};
