//! Fluent assertions over page elements.
//!
//! `session.expect("header h1").to_contain_text("Acme").await?` reads the
//! page through the driver and fails with
//! [`VitrinaError::AssertionFailed`] when the page disagrees.
//!
//! Against a real browser the checks poll up to the configured element
//! timeout, since the page may still be rendering; the mock driver resolves
//! synchronously and is checked once.

use crate::driver::PageDriver;
use crate::result::{VitrinaError, VitrinaResult};
use crate::selector::Selector;
use crate::session::Session;
use std::time::Instant;

/// A pending assertion on one selector
pub struct Expect<'a, D: PageDriver> {
    session: &'a mut Session<D>,
    selector: Selector,
    index: usize,
}

impl<D: PageDriver> std::fmt::Debug for Expect<'_, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Expect")
            .field("selector", &self.selector)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<'a, D: PageDriver> Expect<'a, D> {
    pub(crate) fn new(session: &'a mut Session<D>, selector: Selector) -> Self {
        Self {
            session,
            selector,
            index: 0,
        }
    }

    /// Target the `index`-th matching element for text and attribute checks
    #[must_use]
    pub const fn nth(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    fn fail(message: String) -> VitrinaError {
        VitrinaError::AssertionFailed { message }
    }

    fn deadline(&self) -> Instant {
        if self.session.driver().settles_immediately() {
            // The first verdict is final; polling would only spin.
            Instant::now()
        } else {
            Instant::now() + self.session.element_timeout()
        }
    }

    /// Sleep one poll interval if the deadline has not lapsed. Returns false
    /// once the deadline is spent.
    async fn tick(deadline: Instant) -> bool {
        #[cfg(feature = "browser")]
        {
            if Instant::now() < deadline {
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                return true;
            }
        }
        let _ = deadline;
        false
    }

    /// Assert at least one element matches
    pub async fn to_exist(self) -> VitrinaResult<()> {
        let deadline = self.deadline();
        loop {
            let count = self.session.raw_count(&self.selector).await?;
            if count > 0 {
                return Ok(());
            }
            if !Self::tick(deadline).await {
                return Err(Self::fail(format!(
                    "expected {} to exist, found no matches",
                    self.selector
                )));
            }
        }
    }

    /// Assert no element matches
    pub async fn to_not_exist(self) -> VitrinaResult<()> {
        let deadline = self.deadline();
        loop {
            let count = self.session.raw_count(&self.selector).await?;
            if count == 0 {
                return Ok(());
            }
            if !Self::tick(deadline).await {
                return Err(Self::fail(format!(
                    "expected {} to not exist, found {count} match(es)",
                    self.selector
                )));
            }
        }
    }

    /// Assert exactly `expected` elements match
    pub async fn to_have_count(self, expected: usize) -> VitrinaResult<()> {
        let deadline = self.deadline();
        loop {
            let count = self.session.raw_count(&self.selector).await?;
            if count == expected {
                return Ok(());
            }
            if !Self::tick(deadline).await {
                return Err(Self::fail(format!(
                    "expected {} to have count {expected}, found {count}",
                    self.selector
                )));
            }
        }
    }

    /// Assert the targeted element's text contains `needle`
    pub async fn to_contain_text(self, needle: &str) -> VitrinaResult<()> {
        let deadline = self.deadline();
        loop {
            let text = self.session.raw_text(&self.selector, self.index).await?;
            match text {
                Some(ref t) if t.contains(needle) => return Ok(()),
                other => {
                    if !Self::tick(deadline).await {
                        let detail = match other {
                            Some(t) => format!("got {t:?}"),
                            None => "element not found".to_string(),
                        };
                        return Err(Self::fail(format!(
                            "expected {}[{}] to contain {needle:?}, {detail}",
                            self.selector, self.index
                        )));
                    }
                }
            }
        }
    }

    /// Assert the targeted element's text equals `expected` exactly
    pub async fn to_have_text(self, expected: &str) -> VitrinaResult<()> {
        let deadline = self.deadline();
        loop {
            let text = self.session.raw_text(&self.selector, self.index).await?;
            match text {
                Some(ref t) if t == expected => return Ok(()),
                other => {
                    if !Self::tick(deadline).await {
                        let detail = match other {
                            Some(t) => format!("got {t:?}"),
                            None => "element not found".to_string(),
                        };
                        return Err(Self::fail(format!(
                            "expected {}[{}] text {expected:?}, {detail}",
                            self.selector, self.index
                        )));
                    }
                }
            }
        }
    }

    /// Assert the targeted element carries an attribute with the given value
    pub async fn to_have_attr(self, name: &str, expected: &str) -> VitrinaResult<()> {
        let deadline = self.deadline();
        loop {
            let value = self
                .session
                .raw_attr(&self.selector, self.index, name)
                .await?;
            match value {
                Some(ref v) if v == expected => return Ok(()),
                other => {
                    if !Self::tick(deadline).await {
                        let detail = match other {
                            Some(v) => format!("got {v:?}"),
                            None => "attribute absent".to_string(),
                        };
                        return Err(Self::fail(format!(
                            "expected {}[{}] attr {name}={expected:?}, {detail}",
                            self.selector, self.index
                        )));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::driver::{MockDriver, MockElement};
    use crate::session::Session;

    fn run<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(fut)
    }

    async fn page() -> Session<MockDriver> {
        let driver = MockDriver::new()
            .with_element(MockElement::new("header h1").with_text("Acme Widgets"))
            .with_element(MockElement::new("#support-team a").with_text("Test 1"))
            .with_element(MockElement::new("#support-team a").with_text("Test 2"));
        let mut session = Session::new(driver, Config::default());
        session.visit_root().await.unwrap();
        session
    }

    #[test]
    fn exist_and_count() {
        run(async {
            let mut s = page().await;
            s.expect("header h1").to_exist().await.unwrap();
            s.expect("#support-team a").to_have_count(2).await.unwrap();
            s.expect("footer .missing").to_not_exist().await.unwrap();
            assert!(s.expect("footer .missing").to_exist().await.is_err());
        });
    }

    #[test]
    fn text_assertions_report_actual_text() {
        run(async {
            let mut s = page().await;
            s.expect("header h1")
                .to_contain_text("Widgets")
                .await
                .unwrap();
            s.expect("#support-team a")
                .nth(1)
                .to_have_text("Test 2")
                .await
                .unwrap();

            let err = s
                .expect("header h1")
                .to_have_text("Wrong")
                .await
                .unwrap_err();
            assert!(err.to_string().contains("Acme Widgets"));
            assert!(err.is_assertion());
        });
    }

    #[test]
    fn failing_assertion_against_a_synchronous_page_returns_at_once() {
        run(async {
            // Default element timeout is 5s; a driver whose reads settle
            // immediately must not poll it out before failing.
            let mut s = page().await;
            let start = std::time::Instant::now();
            assert!(s.expect("footer .missing").to_exist().await.is_err());
            assert!(start.elapsed() < std::time::Duration::from_secs(1));
        });
    }

    #[test]
    fn missing_element_fails_text_assertion() {
        run(async {
            let mut s = page().await;
            let err = s
                .expect("#support-team a")
                .nth(5)
                .to_contain_text("Test")
                .await
                .unwrap_err();
            assert!(err.to_string().contains("element not found"));
        });
    }
}
