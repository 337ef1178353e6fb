//! Vitrina: browser regression suites for the marketing site.
//!
//! Vitrina (Spanish: "display case") drives the site at
//! `http://localhost:1337` through the Chrome DevTools Protocol and asserts
//! on what the page shows: the header masthead, the footer's copyright year
//! and support links, and the quota request form.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Suites       │     │ Session      │     │ PageDriver   │
//! │ header       │────►│ visit/stub/  │────►│ CdpDriver    │
//! │ footer       │     │ expect       │     │ MockDriver   │
//! │ quota        │     │              │     │              │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                             │
//!                       ┌─────┴──────┐
//!                       │ Stubs      │  GET **/api/support.json
//!                       │ Fixtures   │  fixtures/support.json
//!                       └────────────┘
//! ```
//!
//! Network stubbing is declared per session before navigation; the
//! `support.json` fixture answers the footer's support-team request without
//! a live backend. Suites run against [`CdpDriver`] (feature `browser`) in
//! CI and against [`MockDriver`]'s site simulation in unit tests.
//!
//! # Quick start
//!
//! ```
//! use vitrina::{Config, MockDriver, MockElement, Session};
//!
//! # fn main() -> vitrina::VitrinaResult<()> {
//! # let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
//! # rt.block_on(async {
//! let driver = MockDriver::new()
//!     .with_element(MockElement::new("header h1").with_text("Acme Widgets"));
//! let mut session = Session::new(driver, Config::default());
//! session.visit_root().await?;
//! session.expect("header h1").to_contain_text("Acme").await?;
//! # Ok(())
//! # })
//! # }
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod clock;
pub mod config;
pub mod driver;
pub mod expect;
pub mod fixture;
pub mod report;
pub mod result;
pub mod selector;
pub mod session;
pub mod stub;
pub mod suites;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, DEFAULT_BASE_URL};
#[cfg(feature = "browser")]
pub use driver::CdpDriver;
pub use driver::{MockDriver, MockElement, PageDriver};
pub use expect::Expect;
pub use fixture::FixtureDir;
pub use report::{CaseResult, SuiteReport, TestStatus};
pub use result::{VitrinaError, VitrinaResult};
pub use selector::Selector;
pub use session::Session;
pub use stub::{CapturedRequest, HttpMethod, StubRegistry, StubResponse, StubbedRoute, UrlPattern};
pub use suites::run_all;

/// Convenience glob imports for suite authors
pub mod prelude {
    pub use super::clock::*;
    pub use super::config::*;
    pub use super::driver::*;
    pub use super::expect::*;
    pub use super::fixture::*;
    pub use super::report::*;
    pub use super::result::*;
    pub use super::selector::*;
    pub use super::session::*;
    pub use super::stub::*;
    pub use super::suites::run_all;
}
