//! Footer suite: copyright year and the support-team links.
//!
//! The support links are rendered client-side from `GET /api/support.json`,
//! so that endpoint is stubbed with the `support.json` fixture before
//! navigation and the rendered anchors are checked against it.

use crate::driver::PageDriver;
use crate::report::SuiteReport;
use crate::result::VitrinaResult;
use crate::session::Session;
use crate::stub::UrlPattern;
use serde::{Deserialize, Serialize};

const SUITE: &str = "Footer";
const COPYRIGHT: &str = "#company-copyright-year";
const SUPPORT_LINKS: &str = "#support-team a";
const SUPPORT_FIXTURE: &str = "support.json";
const EXPECTED_LINK_COUNT: usize = 3;

fn support_endpoint() -> UrlPattern {
    UrlPattern::Glob("**/api/support.json".to_string())
}

/// One entry of the support endpoint's payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportContact {
    /// Display name, rendered as the link text
    pub name: String,
    /// Contact address
    pub email: String,
}

/// The footer shows the current year
pub async fn shows_copyright_year<D: PageDriver>(s: &mut Session<D>) -> VitrinaResult<()> {
    let year = s.clock().current_year().to_string();
    s.visit_root().await?;
    s.expect(COPYRIGHT).to_contain_text(&year).await
}

/// The footer renders one link per support contact, in payload order
pub async fn shows_support_links<D: PageDriver>(s: &mut Session<D>) -> VitrinaResult<()> {
    s.stub_get_fixture(support_endpoint(), SUPPORT_FIXTURE)?;
    s.visit_root().await?;

    s.expect(SUPPORT_LINKS)
        .to_have_count(EXPECTED_LINK_COUNT)
        .await?;
    s.expect(SUPPORT_LINKS).nth(0).to_contain_text("Test 1").await?;
    s.assert_stubbed(&support_endpoint())
}

/// Run the suite, one fresh session per case
pub async fn run<D, F, Fut>(make_session: &mut F) -> SuiteReport
where
    D: PageDriver,
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = VitrinaResult<Session<D>>>,
{
    let mut report = SuiteReport::new(SUITE);
    super::run_case(&mut report, make_session, "shows the copyright year", |s| {
        Box::pin(shows_copyright_year(s))
    })
    .await;
    super::run_case(&mut report, make_session, "shows three support links", |s| {
        Box::pin(shows_support_links(s))
    })
    .await;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FixtureDir;

    #[test]
    fn shipped_fixture_matches_the_expected_payload_shape() {
        let contacts: Vec<SupportContact> = FixtureDir::new().load_json(SUPPORT_FIXTURE).unwrap();
        assert_eq!(contacts.len(), EXPECTED_LINK_COUNT);
        assert_eq!(contacts[0].name, "Test 1");
        assert_eq!(contacts[0].email, "test1@support.org");
    }

    #[test]
    fn endpoint_pattern_matches_the_site_url() {
        assert!(support_endpoint().matches("http://localhost:1337/api/support.json"));
        assert!(!support_endpoint().matches("http://localhost:1337/api/products.json"));
    }
}
