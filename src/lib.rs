//! Appsearch - app catalog search with cancellable, cached icon loading.
//!
//! Queries run as superseding sessions: only the most recent one may publish
//! its result. Result rows load their icons through a shared fetch
//! coordinator backed by a bounded in-memory cache.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing search sessions and cancellable tasks.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing console rendering and the input loop.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "appsearch";
