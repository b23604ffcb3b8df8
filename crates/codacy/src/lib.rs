//! Codacy API infrastructure adapter.
//!
//! Implements the [`pipeline::IssueSource`] trait against the Codacy v3 REST
//! API: organization repositories, repository pull requests, and the issue
//! search restricted to the `Security` category.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, authentication headers, URL building,
//! cursor pagination, and response decoding all live here. The [`pipeline`]
//! crate sees only [`pipeline::IssueSource`].
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`config`] | `CodacyConfig` and its validation errors |
//! | [`transport`] | `Transport` seam and the `reqwest`-backed `HttpTransport` |
//! | [`pagination`] | `PaginatedFetcher`: cursor traversal shared by all endpoints |
//! | [`client`] | `CodacyClient`: the three collectors |

pub mod client;
pub mod config;
pub mod pagination;
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::{CodacyClient, SECURITY_CATEGORY};
pub use config::{CodacyConfig, ConfigError, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
pub use pagination::{PageRequest, PaginatedFetcher};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
