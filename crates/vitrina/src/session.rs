//! Test session: one page, one stub registry, one clock.
//!
//! A session wraps a [`PageDriver`] together with everything a suite case
//! needs: the resolved [`Config`], the network [`StubRegistry`], a fixture
//! directory, and an injectable [`Clock`]. Each case gets a fresh session so
//! no DOM or form state leaks between cases.

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::driver::PageDriver;
use crate::expect::Expect;
use crate::fixture::FixtureDir;
use crate::result::{VitrinaError, VitrinaResult};
use crate::selector::Selector;
use crate::stub::{HttpMethod, StubRegistry, StubResponse, StubbedRoute, UrlPattern};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// One test case's view of the browser
pub struct Session<D: PageDriver> {
    driver: D,
    config: Config,
    stubs: Arc<Mutex<StubRegistry>>,
    fixtures: FixtureDir,
    clock: Arc<dyn Clock>,
    navigated: bool,
}

impl<D: PageDriver> std::fmt::Debug for Session<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("navigated", &self.navigated)
            .finish_non_exhaustive()
    }
}

impl<D: PageDriver> Session<D> {
    /// Create a session over a driver with the given configuration
    pub fn new(driver: D, config: Config) -> Self {
        Self {
            driver,
            config,
            stubs: Arc::new(Mutex::new(StubRegistry::new())),
            fixtures: FixtureDir::new(),
            clock: Arc::new(SystemClock),
            navigated: false,
        }
    }

    /// Replace the clock (tests inject a [`crate::clock::FixedClock`])
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the fixture directory
    #[must_use]
    pub fn with_fixtures(mut self, fixtures: FixtureDir) -> Self {
        self.fixtures = fixtures;
        self
    }

    /// The session's configuration
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The session's clock
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Access the underlying driver
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the underlying driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    fn registry(&self) -> VitrinaResult<std::sync::MutexGuard<'_, StubRegistry>> {
        self.stubs.lock().map_err(|_| VitrinaError::Page {
            message: "stub registry poisoned".to_string(),
        })
    }

    /// Stub a GET endpoint with a canned response.
    ///
    /// Stubs must be declared before the first `visit`; interception is armed
    /// at navigation time and a later stub would silently never match.
    pub fn stub_get(&mut self, pattern: UrlPattern, response: StubResponse) -> VitrinaResult<()> {
        self.stub(pattern, HttpMethod::Get, response)
    }

    /// Stub an endpoint for an explicit method
    pub fn stub(
        &mut self,
        pattern: UrlPattern,
        method: HttpMethod,
        response: StubResponse,
    ) -> VitrinaResult<()> {
        if self.navigated {
            return Err(VitrinaError::StubAfterNavigation {
                pattern: pattern.to_string(),
            });
        }
        debug!(%pattern, method = method.as_str(), "stub registered");
        self.registry()?
            .register(StubbedRoute::new(pattern, method, response));
        Ok(())
    }

    /// Stub a GET endpoint, answering with a fixture file's JSON
    pub fn stub_get_fixture(&mut self, pattern: UrlPattern, fixture: &str) -> VitrinaResult<()> {
        let response = self.fixtures.stub_response(fixture)?;
        self.stub_get(pattern, response)
    }

    /// Navigate to a path under the configured base URL
    pub async fn visit(&mut self, path: &str) -> VitrinaResult<()> {
        let url = self.config.url_for(path);
        self.goto(&url).await
    }

    /// Navigate to the configured base URL
    pub async fn visit_root(&mut self) -> VitrinaResult<()> {
        let url = self.config.root_url();
        self.goto(&url).await
    }

    async fn goto(&mut self, url: &str) -> VitrinaResult<()> {
        if !self.navigated {
            self.driver.install_stubs(Arc::clone(&self.stubs));
        }
        self.navigated = true;
        self.driver.navigate(url).await
    }

    /// Begin an assertion on a selector
    pub fn expect(&mut self, selector: impl Into<Selector>) -> Expect<'_, D> {
        Expect::new(self, selector.into())
    }

    /// Click the first element matching the selector
    pub async fn click(&mut self, selector: impl Into<Selector>) -> VitrinaResult<()> {
        self.driver.click(&selector.into()).await
    }

    /// Type text into the first matching form control
    pub async fn type_text(
        &mut self,
        selector: impl Into<Selector>,
        text: &str,
    ) -> VitrinaResult<()> {
        self.driver.type_text(&selector.into(), text).await
    }

    /// Pick the option at `index` on the first matching `<select>`
    pub async fn select_option(
        &mut self,
        selector: impl Into<Selector>,
        index: usize,
    ) -> VitrinaResult<()> {
        self.driver.select_option(&selector.into(), index).await
    }

    /// Number of elements currently matching the selector
    pub async fn count(&mut self, selector: impl Into<Selector>) -> VitrinaResult<usize> {
        self.driver.count(&selector.into()).await
    }

    /// Text of the `index`-th element matching the selector
    pub async fn text_of(
        &mut self,
        selector: impl Into<Selector>,
        index: usize,
    ) -> VitrinaResult<Option<String>> {
        self.driver.text_of(&selector.into(), index).await
    }

    /// Attribute of the `index`-th element matching the selector
    pub async fn attr_of(
        &mut self,
        selector: impl Into<Selector>,
        index: usize,
        name: &str,
    ) -> VitrinaResult<Option<String>> {
        self.driver.attr_of(&selector.into(), index, name).await
    }

    /// How many requests a stubbed pattern has answered
    pub fn stub_match_count(&self, pattern: &UrlPattern) -> usize {
        self.stubs
            .lock()
            .map(|r| r.match_count(pattern))
            .unwrap_or(0)
    }

    /// Assert that a stubbed pattern answered at least one request
    pub fn assert_stubbed(&self, pattern: &UrlPattern) -> VitrinaResult<()> {
        self.registry()?.assert_stubbed(pattern)
    }

    /// Element timeout for assertion polling
    pub(crate) const fn element_timeout(&self) -> std::time::Duration {
        self.config.element_timeout
    }

    pub(crate) async fn raw_count(&mut self, selector: &Selector) -> VitrinaResult<usize> {
        self.driver.count(selector).await
    }

    pub(crate) async fn raw_text(
        &mut self,
        selector: &Selector,
        index: usize,
    ) -> VitrinaResult<Option<String>> {
        self.driver.text_of(selector, index).await
    }

    pub(crate) async fn raw_attr(
        &mut self,
        selector: &Selector,
        index: usize,
        name: &str,
    ) -> VitrinaResult<Option<String>> {
        self.driver.attr_of(selector, index, name).await
    }

    /// Tear the driver down
    pub async fn close(&mut self) -> VitrinaResult<()> {
        self.driver.close().await
    }
}
