#![warn(missing_docs)]

//! <div class="warning">
//!
//! Note: API is unstable, and may change in `0.x` versions.
//!
//! </div>
//!
//! # As a library
//!
//! As a library, usually you prefer to use [`api::NekosClient`]
//! to list categories, fetch or search results, and download them from nekos.best.
//!
//! See [`api::NekosClient#example`] for example.
//!
//! Requests go through a [`transport::Transport`], which is implemented by [`reqwest::Client`].
//!
//! # As a binary
//!
//! In addition to the above, you also need [`cli`] (the `cli` feature) to build the command line.
//!
//! See `main.rs` to know how to assemble these modules as a binary.

#[cfg(not(any(
    feature = "default-tls",
    feature = "native-tls",
    feature = "native-tls-vendored",
    feature = "native-tls-alpn",
    feature = "rustls-tls",
    feature = "rustls-tls-manual-roots",
    feature = "rustls-tls-webpki-roots",
    feature = "rustls-tls-native-roots",
)))]
compile_error!("at least one tls feature must be enabled, nekos.best is only served over https");

pub mod api;
#[cfg(feature = "cli")]
pub mod cli;

pub mod config;
pub mod error;
pub mod transport;
