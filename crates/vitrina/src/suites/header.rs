//! Header suite: the masthead carries a title and a tag line.

use crate::driver::PageDriver;
use crate::report::SuiteReport;
use crate::result::VitrinaResult;
use crate::session::Session;

const SUITE: &str = "Header";
const TITLE: &str = "header h1";
const TAGLINE: &str = "header .tagline";

/// The page has a title in the masthead
pub async fn has_title<D: PageDriver>(s: &mut Session<D>) -> VitrinaResult<()> {
    s.visit_root().await?;
    s.expect(TITLE).to_exist().await
}

/// The page has a tag line in the masthead
pub async fn has_tagline<D: PageDriver>(s: &mut Session<D>) -> VitrinaResult<()> {
    s.visit_root().await?;
    s.expect(TAGLINE).to_exist().await
}

/// Run the suite, one fresh session per case
pub async fn run<D, F, Fut>(make_session: &mut F) -> SuiteReport
where
    D: PageDriver,
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = VitrinaResult<Session<D>>>,
{
    let mut report = SuiteReport::new(SUITE);
    super::run_case(&mut report, make_session, "has a title", |s| {
        Box::pin(has_title(s))
    })
    .await;
    super::run_case(&mut report, make_session, "has a tag line", |s| {
        Box::pin(has_tagline(s))
    })
    .await;
    report
}
