//! The site's regression suites.
//!
//! Three suites cover the marketing site: [`header`] (masthead content),
//! [`footer`] (copyright year and the support-team links rendered from
//! `/api/support.json`), and [`quota`] (the quota request form).
//!
//! Each case runs against a fresh [`Session`] produced by an async factory,
//! so navigation and form state never leak between cases. A failing case
//! never stops the rest of its suite; a factory failure (say, the browser
//! would not launch) is recorded as an errored case. The [`SuiteReport`]
//! carries every verdict.

pub mod footer;
pub mod header;
pub mod quota;

use crate::driver::PageDriver;
use crate::report::SuiteReport;
use crate::result::VitrinaResult;
use crate::session::Session;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// A case's future, borrowing the session it runs against
type CaseFuture<'a> = Pin<Box<dyn Future<Output = VitrinaResult<()>> + Send + 'a>>;

/// Run one case against a freshly built session, recording the outcome
async fn run_case<D, F, Fut, C>(
    report: &mut SuiteReport,
    make_session: &mut F,
    name: &str,
    case: C,
) where
    D: PageDriver,
    F: FnMut() -> Fut,
    Fut: Future<Output = VitrinaResult<Session<D>>>,
    C: for<'a> FnOnce(&'a mut Session<D>) -> CaseFuture<'a>,
{
    match make_session().await {
        Ok(mut session) => {
            report.run_case(name, case(&mut session)).await;
            let _ = session.close().await;
        }
        Err(e) => report.record(name, &Err(e), Duration::ZERO),
    }
}

/// Run all three suites, building a fresh session per case
pub async fn run_all<D, F, Fut>(make_session: &mut F) -> Vec<SuiteReport>
where
    D: PageDriver,
    F: FnMut() -> Fut,
    Fut: Future<Output = VitrinaResult<Session<D>>>,
{
    vec![
        header::run(make_session).await,
        footer::run(make_session).await,
        quota::run(make_session).await,
    ]
}
