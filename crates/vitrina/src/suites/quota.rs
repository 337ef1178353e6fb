//! Quota suite: the quota request form.
//!
//! Submitting the form with the required fields empty must not show the
//! confirmation message; filling the product and email (the additional
//! comments are optional) and submitting must show it.

use crate::driver::PageDriver;
use crate::report::SuiteReport;
use crate::result::VitrinaResult;
use crate::session::Session;

const SUITE: &str = "Quota";
const PRODUCTS: &str = "select#products";
const EMAIL: &str = "input#email";
const ADDITIONAL: &str = "textarea#additional";
const SEND: &str = "button#send";
const MESSAGE: &str = "p#quota-message";

const EMAIL_VALUE: &str = "a-real-email-I-swear@fakefakefake.com";
const ADDITIONAL_VALUE: &str = "I really want your awesome products!";

/// Index of the first real product; index 0 is the placeholder option
const FIRST_PRODUCT: usize = 1;

/// Submitting an empty form shows no confirmation message
pub async fn rejects_empty_form<D: PageDriver>(s: &mut Session<D>) -> VitrinaResult<()> {
    s.visit_root().await?;
    s.click(SEND).await?;
    s.expect(MESSAGE).to_not_exist().await
}

/// A fully filled form shows the confirmation message
pub async fn accepts_filled_form<D: PageDriver>(s: &mut Session<D>) -> VitrinaResult<()> {
    s.visit_root().await?;
    s.select_option(PRODUCTS, FIRST_PRODUCT).await?;
    s.type_text(EMAIL, EMAIL_VALUE).await?;
    s.type_text(ADDITIONAL, ADDITIONAL_VALUE).await?;
    s.click(SEND).await?;
    s.expect(MESSAGE).to_exist().await
}

/// The additional comments are optional; product and email suffice
pub async fn accepts_form_without_additional<D: PageDriver>(
    s: &mut Session<D>,
) -> VitrinaResult<()> {
    s.visit_root().await?;
    s.select_option(PRODUCTS, FIRST_PRODUCT).await?;
    s.type_text(EMAIL, EMAIL_VALUE).await?;
    s.click(SEND).await?;
    s.expect(MESSAGE).to_exist().await
}

/// Run the suite, one fresh session per case
pub async fn run<D, F, Fut>(make_session: &mut F) -> SuiteReport
where
    D: PageDriver,
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = VitrinaResult<Session<D>>>,
{
    let mut report = SuiteReport::new(SUITE);
    super::run_case(
        &mut report,
        make_session,
        "hides the quota message for an empty form",
        |s| Box::pin(rejects_empty_form(s)),
    )
    .await;
    super::run_case(
        &mut report,
        make_session,
        "shows the quota message for a filled form",
        |s| Box::pin(accepts_filled_form(s)),
    )
    .await;
    super::run_case(
        &mut report,
        make_session,
        "treats the additional comments as optional",
        |s| Box::pin(accepts_form_without_additional(s)),
    )
    .await;
    report
}
