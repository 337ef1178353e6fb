//! Page drivers.
//!
//! `PageDriver` is the abstract seam over browser automation. The real
//! implementation (`CdpDriver`, behind the `browser` feature) speaks the
//! Chrome DevTools Protocol via chromiumoxide; `MockDriver` is an in-memory
//! page model that simulates the site under test so suites can be exercised
//! without a browser or a running site.

use crate::result::{VitrinaError, VitrinaResult};
use crate::selector::Selector;
use crate::stub::{HttpMethod, StubRegistry};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Abstract driver over one browser page
#[async_trait]
pub trait PageDriver: Send {
    /// Navigate to a URL, discarding prior page and form state
    async fn navigate(&mut self, url: &str) -> VitrinaResult<()>;

    /// Number of elements matching the selector
    async fn count(&mut self, selector: &Selector) -> VitrinaResult<usize>;

    /// Trimmed text content of the `index`-th match, if present
    async fn text_of(&mut self, selector: &Selector, index: usize)
        -> VitrinaResult<Option<String>>;

    /// Attribute value on the `index`-th match, if present
    async fn attr_of(
        &mut self,
        selector: &Selector,
        index: usize,
        name: &str,
    ) -> VitrinaResult<Option<String>>;

    /// Click the first matching element
    async fn click(&mut self, selector: &Selector) -> VitrinaResult<()>;

    /// Type text into the first matching form control
    async fn type_text(&mut self, selector: &Selector, text: &str) -> VitrinaResult<()>;

    /// Select the option at `index` on the first matching `<select>`
    async fn select_option(&mut self, selector: &Selector, index: usize) -> VitrinaResult<()>;

    /// Install the session's stub registry. Must happen before `navigate`
    /// for interception to see the page's initial requests.
    fn install_stubs(&mut self, stubs: Arc<Mutex<StubRegistry>>);

    /// Whether page reads settle immediately. A live page keeps rendering
    /// after navigation, so assertions poll until the element timeout;
    /// in-memory drivers resolve in one step and a failed read is final.
    fn settles_immediately(&self) -> bool {
        false
    }

    /// Tear the driver down
    async fn close(&mut self) -> VitrinaResult<()> {
        Ok(())
    }
}

// ============================================================================
// Mock implementation (always available)
// ============================================================================

/// Value a form control currently holds
#[derive(Debug, Clone, PartialEq, Eq)]
enum FormValue {
    Text(String),
    Selected(usize),
}

impl FormValue {
    /// A control counts as filled when it has non-empty text or a non-zero
    /// selected index (index 0 is the placeholder option).
    fn is_filled(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Selected(index) => *index > 0,
        }
    }
}

/// An element in the mock page's DOM
#[derive(Debug, Clone)]
pub struct MockElement {
    /// Selector this element answers to (exact match)
    pub selector: String,
    /// Text content
    pub text: String,
    /// Attributes
    pub attrs: HashMap<String, String>,
    /// Option count, for `<select>` elements
    pub options: usize,
}

impl MockElement {
    /// Create an element answering to `selector`
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            text: String::new(),
            attrs: HashMap::new(),
            options: 0,
        }
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add an attribute
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    /// Set the number of options (for selects)
    #[must_use]
    pub const fn with_options(mut self, options: usize) -> Self {
        self.options = options;
        self
    }
}

/// Rule: clicking `trigger` reveals `reveals` iff every control in
/// `requires` is filled. Models the site's form validation.
#[derive(Debug, Clone)]
struct SubmitGate {
    trigger: String,
    reveals: MockElement,
    requires: Vec<String>,
}

/// Rule: on navigation, a stubbed JSON endpoint's entries render as one
/// element per entry (the `name` field becomes the text). Models the site
/// fetching and rendering a list.
#[derive(Debug, Clone)]
struct ListBinding {
    url: String,
    selector: String,
}

/// In-memory page model simulating the site under test
#[derive(Debug, Default)]
pub struct MockDriver {
    seed: Vec<MockElement>,
    gates: Vec<SubmitGate>,
    bindings: Vec<ListBinding>,
    dom: Vec<MockElement>,
    form: HashMap<String, FormValue>,
    stubs: Option<Arc<Mutex<StubRegistry>>>,
    navigated: bool,
    /// Current URL
    pub current_url: String,
    /// Call history for verification
    pub call_history: Vec<String>,
}

impl MockDriver {
    /// Create an empty mock page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an element present after every navigation
    #[must_use]
    pub fn with_element(mut self, element: MockElement) -> Self {
        self.seed.push(element);
        self
    }

    /// Add a submit gate
    #[must_use]
    pub fn with_gate(
        mut self,
        trigger: impl Into<String>,
        reveals: MockElement,
        requires: &[&str],
    ) -> Self {
        self.gates.push(SubmitGate {
            trigger: trigger.into(),
            reveals,
            requires: requires.iter().map(|s| (*s).to_string()).collect(),
        });
        self
    }

    /// Bind a JSON endpoint to a rendered list of elements
    #[must_use]
    pub fn with_list_binding(mut self, url: impl Into<String>, selector: impl Into<String>) -> Self {
        self.bindings.push(ListBinding {
            url: url.into(),
            selector: selector.into(),
        });
        self
    }

    /// Check if a method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.call_history.iter().any(|c| c.starts_with(method))
    }

    fn matching(&self, selector: &Selector) -> Vec<&MockElement> {
        self.dom
            .iter()
            .filter(|e| e.selector == selector.as_css())
            .collect()
    }

    fn first_matching(&self, selector: &Selector) -> VitrinaResult<&MockElement> {
        self.dom
            .iter()
            .find(|e| e.selector == selector.as_css())
            .ok_or_else(|| VitrinaError::ElementTimeout {
                selector: selector.as_css().to_string(),
                ms: 0,
            })
    }

    fn render_bindings(&mut self) {
        let Some(stubs) = self.stubs.clone() else {
            return;
        };
        for binding in self.bindings.clone() {
            let response = match stubs.lock() {
                Ok(mut registry) => registry.handle_request(&binding.url, HttpMethod::Get),
                Err(_) => None,
            };
            let Some(response) = response else {
                // No stub answered; the mock has no real network to fall
                // back to, so nothing renders.
                continue;
            };
            let Ok(entries) = serde_json::from_slice::<Vec<serde_json::Value>>(&response.body)
            else {
                continue;
            };
            for entry in entries {
                let text = entry
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string();
                self.dom
                    .push(MockElement::new(binding.selector.clone()).with_text(text));
            }
        }
    }
}

#[async_trait]
impl PageDriver for MockDriver {
    async fn navigate(&mut self, url: &str) -> VitrinaResult<()> {
        self.call_history.push(format!("navigate:{url}"));
        self.current_url = url.to_string();
        self.dom = self.seed.clone();
        self.form.clear();
        self.navigated = true;
        self.render_bindings();
        Ok(())
    }

    async fn count(&mut self, selector: &Selector) -> VitrinaResult<usize> {
        Ok(self.matching(selector).len())
    }

    async fn text_of(
        &mut self,
        selector: &Selector,
        index: usize,
    ) -> VitrinaResult<Option<String>> {
        Ok(self.matching(selector).get(index).map(|e| e.text.clone()))
    }

    async fn attr_of(
        &mut self,
        selector: &Selector,
        index: usize,
        name: &str,
    ) -> VitrinaResult<Option<String>> {
        Ok(self
            .matching(selector)
            .get(index)
            .and_then(|e| e.attrs.get(name).cloned()))
    }

    async fn click(&mut self, selector: &Selector) -> VitrinaResult<()> {
        self.call_history.push(format!("click:{selector}"));
        self.first_matching(selector)?;

        let fired: Vec<SubmitGate> = self
            .gates
            .iter()
            .filter(|g| g.trigger == selector.as_css())
            .cloned()
            .collect();
        for gate in fired {
            let satisfied = gate
                .requires
                .iter()
                .all(|req| self.form.get(req).is_some_and(FormValue::is_filled));
            if satisfied {
                self.dom.push(gate.reveals.clone());
            }
        }
        Ok(())
    }

    async fn type_text(&mut self, selector: &Selector, text: &str) -> VitrinaResult<()> {
        self.call_history.push(format!("type:{selector}"));
        self.first_matching(selector)?;
        self.form.insert(
            selector.as_css().to_string(),
            FormValue::Text(text.to_string()),
        );
        Ok(())
    }

    async fn select_option(&mut self, selector: &Selector, index: usize) -> VitrinaResult<()> {
        self.call_history.push(format!("select:{selector}:{index}"));
        let element = self.first_matching(selector)?;
        if index >= element.options {
            return Err(VitrinaError::Input {
                selector: selector.as_css().to_string(),
                message: format!(
                    "option index {index} out of range ({} options)",
                    element.options
                ),
            });
        }
        self.form
            .insert(selector.as_css().to_string(), FormValue::Selected(index));
        Ok(())
    }

    fn install_stubs(&mut self, stubs: Arc<Mutex<StubRegistry>>) {
        self.stubs = Some(stubs);
    }

    fn settles_immediately(&self) -> bool {
        true
    }

    async fn close(&mut self) -> VitrinaResult<()> {
        self.call_history.push("close".to_string());
        Ok(())
    }
}

// ============================================================================
// Real CDP implementation (feature `browser`)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::{Arc, HttpMethod, Mutex, PageDriver, Selector, StubRegistry};
    use crate::config::Config;
    use crate::result::{VitrinaError, VitrinaResult};
    use async_trait::async_trait;
    use base64::Engine;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::fetch::{
        ContinueRequestParams, EnableParams, EventRequestPaused, FulfillRequestParams, HeaderEntry,
        RequestPattern,
    };
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use std::time::{Duration, Instant};
    use tracing::{debug, warn};

    /// Shared slot the interception task reads the registry from; filled by
    /// `install_stubs` before navigation.
    type StubSlot = Arc<Mutex<Option<Arc<Mutex<StubRegistry>>>>>;

    /// Driver backed by a real Chromium instance over CDP
    pub struct CdpDriver {
        browser: Option<CdpBrowser>,
        page: CdpPage,
        stub_slot: StubSlot,
        element_timeout: Duration,
        navigation_timeout: Duration,
        handler_task: tokio::task::JoinHandle<()>,
        intercept_task: tokio::task::JoinHandle<()>,
    }

    /// Bound a navigation future by the configured timeout; elapse becomes
    /// a [`VitrinaError::Navigation`] naming the URL.
    async fn with_navigation_deadline<F>(
        timeout: Duration,
        url: &str,
        fut: F,
    ) -> VitrinaResult<()>
    where
        F: std::future::Future<Output = VitrinaResult<()>>,
    {
        match tokio::time::timeout(timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(VitrinaError::Navigation {
                url: url.to_string(),
                message: format!("timed out after {}ms", timeout.as_millis()),
            }),
        }
    }

    impl std::fmt::Debug for CdpDriver {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("CdpDriver")
                .field("element_timeout", &self.element_timeout)
                .finish_non_exhaustive()
        }
    }

    impl CdpDriver {
        /// Launch a headless (or headful) browser and open a blank page with
        /// request interception armed.
        pub async fn launch(config: &Config) -> VitrinaResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height)
                .no_sandbox();

            if !config.headless {
                builder = builder.with_head();
            }
            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder.build().map_err(|e| VitrinaError::BrowserLaunch {
                message: e.to_string(),
            })?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| VitrinaError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            let handler_task = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            let page =
                browser
                    .new_page("about:blank")
                    .await
                    .map_err(|e| VitrinaError::Page {
                        message: e.to_string(),
                    })?;

            let stub_slot: StubSlot = Arc::new(Mutex::new(None));
            let intercept_task = Self::arm_interception(&page, Arc::clone(&stub_slot)).await?;

            Ok(Self {
                browser: Some(browser),
                page,
                stub_slot,
                element_timeout: config.element_timeout,
                navigation_timeout: config.navigation_timeout,
                handler_task,
                intercept_task,
            })
        }

        /// Enable the CDP Fetch domain and answer paused requests from the
        /// installed registry; everything else continues to the network.
        async fn arm_interception(
            page: &CdpPage,
            slot: StubSlot,
        ) -> VitrinaResult<tokio::task::JoinHandle<()>> {
            let patterns = vec![RequestPattern::builder().url_pattern("*").build()];
            page.execute(EnableParams::builder().patterns(patterns).build())
                .await
                .map_err(|e| VitrinaError::Page {
                    message: format!("fetch enable failed: {e}"),
                })?;

            let mut events = page
                .event_listener::<EventRequestPaused>()
                .await
                .map_err(|e| VitrinaError::Page {
                    message: format!("fetch listener failed: {e}"),
                })?;

            let page = page.clone();
            Ok(tokio::spawn(async move {
                while let Some(event) = events.next().await {
                    let url = event.request.url.clone();
                    let method = HttpMethod::parse(&event.request.method);
                    let request_id = event.request_id.clone();

                    let canned = slot
                        .lock()
                        .ok()
                        .and_then(|s| s.clone())
                        .and_then(|registry| {
                            registry
                                .lock()
                                .ok()
                                .and_then(|mut r| r.handle_request(&url, method))
                        });

                    if let Some(response) = canned {
                        debug!(url, "fulfilling stubbed request");
                        let mut headers = vec![HeaderEntry {
                            name: "Content-Type".to_string(),
                            value: response.content_type.clone(),
                        }];
                        for (name, value) in &response.headers {
                            headers.push(HeaderEntry {
                                name: name.clone(),
                                value: value.clone(),
                            });
                        }
                        let body =
                            base64::engine::general_purpose::STANDARD.encode(&response.body);
                        let params = FulfillRequestParams::builder()
                            .request_id(request_id)
                            .response_code(i64::from(response.status))
                            .response_headers(headers)
                            .body(body)
                            .build();
                        match params {
                            Ok(params) => {
                                if let Err(e) = page.execute(params).await {
                                    warn!(url, error = %e, "fulfill failed");
                                }
                            }
                            Err(e) => warn!(url, error = %e, "bad fulfill params"),
                        }
                    } else if let Err(e) =
                        page.execute(ContinueRequestParams::new(request_id)).await
                    {
                        warn!(url, error = %e, "continue failed");
                    }
                }
            }))
        }

        async fn eval<T: serde::de::DeserializeOwned>(&self, expr: String) -> VitrinaResult<T> {
            let value = self
                .page
                .evaluate(expr)
                .await
                .map_err(|e| VitrinaError::Page {
                    message: e.to_string(),
                })?;
            value.into_value().map_err(|e| VitrinaError::Page {
                message: e.to_string(),
            })
        }

        /// Poll a boolean-returning interaction script until it reports the
        /// element was found, bounded by the element timeout.
        async fn eval_until_true(&self, selector: &Selector, script: String) -> VitrinaResult<()> {
            let deadline = Instant::now() + self.element_timeout;
            loop {
                let found: bool = self.eval(script.clone()).await?;
                if found {
                    return Ok(());
                }
                if Instant::now() >= deadline {
                    return Err(VitrinaError::ElementTimeout {
                        selector: selector.as_css().to_string(),
                        ms: self.element_timeout.as_millis() as u64,
                    });
                }
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
        }
    }

    #[async_trait]
    impl PageDriver for CdpDriver {
        async fn navigate(&mut self, url: &str) -> VitrinaResult<()> {
            debug!(url, "navigate");
            let page = &self.page;
            with_navigation_deadline(self.navigation_timeout, url, async {
                page.goto(url)
                    .await
                    .map_err(|e| VitrinaError::Navigation {
                        url: url.to_string(),
                        message: e.to_string(),
                    })?;
                page.wait_for_navigation()
                    .await
                    .map_err(|e| VitrinaError::Navigation {
                        url: url.to_string(),
                        message: e.to_string(),
                    })?;
                Ok(())
            })
            .await
        }

        async fn count(&mut self, selector: &Selector) -> VitrinaResult<usize> {
            let count: u64 = self.eval(selector.to_count_query()).await?;
            Ok(count as usize)
        }

        async fn text_of(
            &mut self,
            selector: &Selector,
            index: usize,
        ) -> VitrinaResult<Option<String>> {
            self.eval(selector.to_text_query(index)).await
        }

        async fn attr_of(
            &mut self,
            selector: &Selector,
            index: usize,
            name: &str,
        ) -> VitrinaResult<Option<String>> {
            self.eval(selector.to_attr_query(index, name)).await
        }

        async fn click(&mut self, selector: &Selector) -> VitrinaResult<()> {
            self.eval_until_true(selector, selector.to_click_script())
                .await
        }

        async fn type_text(&mut self, selector: &Selector, text: &str) -> VitrinaResult<()> {
            self.eval_until_true(selector, selector.to_type_script(text))
                .await
        }

        async fn select_option(&mut self, selector: &Selector, index: usize) -> VitrinaResult<()> {
            self.eval_until_true(selector, selector.to_select_option_script(index))
                .await
        }

        fn install_stubs(&mut self, stubs: Arc<Mutex<StubRegistry>>) {
            if let Ok(mut slot) = self.stub_slot.lock() {
                *slot = Some(stubs);
            }
        }

        async fn close(&mut self) -> VitrinaResult<()> {
            self.intercept_task.abort();
            if let Some(mut browser) = self.browser.take() {
                browser
                    .close()
                    .await
                    .map_err(|e| VitrinaError::BrowserLaunch {
                        message: e.to_string(),
                    })?;
            }
            self.handler_task.abort();
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn navigation_deadline_elapse_is_a_navigation_error() {
            let err = with_navigation_deadline(
                Duration::from_millis(10),
                "http://localhost:1337",
                std::future::pending::<VitrinaResult<()>>(),
            )
            .await
            .unwrap_err();

            match err {
                VitrinaError::Navigation { url, message } => {
                    assert_eq!(url, "http://localhost:1337");
                    assert!(message.contains("timed out after 10ms"));
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[tokio::test]
        async fn navigation_deadline_passes_outcomes_through() {
            let ok = with_navigation_deadline(
                Duration::from_secs(1),
                "http://localhost:1337",
                std::future::ready(Ok(())),
            )
            .await;
            assert!(ok.is_ok());

            let err = with_navigation_deadline(
                Duration::from_secs(1),
                "http://localhost:1337",
                std::future::ready(Err(VitrinaError::Navigation {
                    url: "http://localhost:1337".to_string(),
                    message: "refused".to_string(),
                })),
            )
            .await
            .unwrap_err();
            assert!(err.to_string().contains("refused"));
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::CdpDriver;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::{StubResponse, UrlPattern};

    fn run<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(fut)
    }

    #[test]
    fn navigation_resets_dom_and_form() {
        run(async {
            let mut driver = MockDriver::new()
                .with_element(MockElement::new("header h1").with_text("Acme"))
                .with_element(MockElement::new("input#email"));

            driver.navigate("http://localhost:1337").await.unwrap();
            driver
                .type_text(&Selector::id_of("input", "email"), "a@b.c")
                .await
                .unwrap();

            // Re-navigation discards form state
            driver.navigate("http://localhost:1337").await.unwrap();
            assert!(driver.form.is_empty());
            assert_eq!(driver.count(&Selector::css("header h1")).await.unwrap(), 1);
        });
    }

    #[test]
    fn call_history_records_every_interaction_in_order() {
        run(async {
            let mut driver = MockDriver::new()
                .with_element(MockElement::new("input#email"))
                .with_element(MockElement::new("button#send"));

            driver.navigate("http://localhost:1337").await.unwrap();
            driver
                .type_text(&Selector::id_of("input", "email"), "a@b.c")
                .await
                .unwrap();
            driver
                .click(&Selector::id_of("button", "send"))
                .await
                .unwrap();
            driver.close().await.unwrap();

            assert!(driver.was_called("navigate"));
            assert!(driver.was_called("type:input#email"));
            assert!(!driver.was_called("select"));
            assert_eq!(
                driver.call_history,
                vec![
                    "navigate:http://localhost:1337",
                    "type:input#email",
                    "click:button#send",
                    "close",
                ]
            );
        });
    }

    #[test]
    fn click_requires_a_matching_element() {
        run(async {
            let mut driver = MockDriver::new();
            driver.navigate("http://localhost:1337").await.unwrap();
            let err = driver
                .click(&Selector::id_of("button", "send"))
                .await
                .unwrap_err();
            assert!(err.is_assertion());
        });
    }

    #[test]
    fn gate_reveals_only_when_required_fields_filled() {
        run(async {
            let mut driver = MockDriver::new()
                .with_element(MockElement::new("button#send"))
                .with_element(MockElement::new("input#email"))
                .with_element(MockElement::new("select#products").with_options(3))
                .with_gate(
                    "button#send",
                    MockElement::new("p#quota-message").with_text("Thanks!"),
                    &["select#products", "input#email"],
                );

            driver.navigate("http://localhost:1337").await.unwrap();
            driver
                .click(&Selector::id_of("button", "send"))
                .await
                .unwrap();
            assert_eq!(
                driver
                    .count(&Selector::id_of("p", "quota-message"))
                    .await
                    .unwrap(),
                0
            );

            driver
                .select_option(&Selector::id_of("select", "products"), 1)
                .await
                .unwrap();
            driver
                .type_text(&Selector::id_of("input", "email"), "a@b.c")
                .await
                .unwrap();
            driver
                .click(&Selector::id_of("button", "send"))
                .await
                .unwrap();
            assert_eq!(
                driver
                    .count(&Selector::id_of("p", "quota-message"))
                    .await
                    .unwrap(),
                1
            );
        });
    }

    #[test]
    fn placeholder_option_does_not_satisfy_gate() {
        run(async {
            let mut driver = MockDriver::new()
                .with_element(MockElement::new("button#send"))
                .with_element(MockElement::new("input#email"))
                .with_element(MockElement::new("select#products").with_options(3))
                .with_gate(
                    "button#send",
                    MockElement::new("p#quota-message"),
                    &["select#products", "input#email"],
                );

            driver.navigate("http://localhost:1337").await.unwrap();
            driver
                .select_option(&Selector::id_of("select", "products"), 0)
                .await
                .unwrap();
            driver
                .type_text(&Selector::id_of("input", "email"), "a@b.c")
                .await
                .unwrap();
            driver
                .click(&Selector::id_of("button", "send"))
                .await
                .unwrap();
            assert_eq!(
                driver
                    .count(&Selector::id_of("p", "quota-message"))
                    .await
                    .unwrap(),
                0
            );
        });
    }

    #[test]
    fn select_option_out_of_range_is_an_input_error() {
        run(async {
            let mut driver =
                MockDriver::new().with_element(MockElement::new("select#products").with_options(2));
            driver.navigate("http://localhost:1337").await.unwrap();
            let err = driver
                .select_option(&Selector::id_of("select", "products"), 5)
                .await
                .unwrap_err();
            assert!(matches!(err, VitrinaError::Input { .. }));
        });
    }

    #[test]
    fn list_binding_renders_stubbed_entries() {
        run(async {
            let mut registry = StubRegistry::new();
            registry.get(
                UrlPattern::Glob("**/api/support.json".to_string()),
                StubResponse::json(&serde_json::json!([
                    {"name": "Test 1", "email": "test1@support.org"},
                    {"name": "Test 2", "email": "test2@support.org"},
                ]))
                .unwrap(),
            );
            let stubs = Arc::new(Mutex::new(registry));

            let mut driver = MockDriver::new()
                .with_list_binding("http://localhost:1337/api/support.json", "#support-team a");
            driver.install_stubs(Arc::clone(&stubs));
            driver.navigate("http://localhost:1337").await.unwrap();

            let selector = Selector::css("#support-team a");
            assert_eq!(driver.count(&selector).await.unwrap(), 2);
            assert_eq!(
                driver.text_of(&selector, 0).await.unwrap(),
                Some("Test 1".to_string())
            );
        });
    }

    #[test]
    fn list_binding_without_stub_renders_nothing() {
        run(async {
            let stubs = Arc::new(Mutex::new(StubRegistry::new()));
            let mut driver = MockDriver::new()
                .with_list_binding("http://localhost:1337/api/support.json", "#support-team a");
            driver.install_stubs(stubs);
            driver.navigate("http://localhost:1337").await.unwrap();
            assert_eq!(
                driver.count(&Selector::css("#support-team a")).await.unwrap(),
                0
            );
        });
    }
}
