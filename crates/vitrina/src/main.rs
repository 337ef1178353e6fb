//! Vitrina runner: drive the marketing-site suites against a real browser.
//!
//! ## Usage
//!
//! ```bash
//! vitrina                                    # all suites, headless
//! vitrina --suite quota                      # one suite
//! vitrina --base-url http://localhost:8080   # a different deployment
//! vitrina --headed                           # watch the browser work
//! ```

use clap::{Parser, ValueEnum};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vitrina::{suites, CdpDriver, Config, Session, SuiteReport, VitrinaResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Suite {
    Header,
    Footer,
    Quota,
}

/// Browser regression suites for the marketing site
#[derive(Debug, Parser)]
#[command(name = "vitrina", version, about)]
struct Args {
    /// Base URL of the site under test
    #[arg(long, env = "VITRINA_BASE_URL", default_value = vitrina::DEFAULT_BASE_URL)]
    base_url: String,

    /// Run only one suite
    #[arg(long, value_enum)]
    suite: Option<Suite>,

    /// Show the browser window instead of running headless
    #[arg(long)]
    headed: bool,

    /// Path to a chromium executable
    #[arg(long, env = "VITRINA_CHROMIUM")]
    chromium: Option<String>,

    /// Element timeout in milliseconds
    #[arg(long, default_value_t = vitrina::config::DEFAULT_ELEMENT_TIMEOUT_MS)]
    element_timeout: u64,
}

impl Args {
    fn config(&self) -> Config {
        let mut config = Config::default()
            .with_base_url(&self.base_url)
            .with_headless(!self.headed)
            .with_element_timeout(std::time::Duration::from_millis(self.element_timeout));
        if let Some(ref path) = self.chromium {
            config = config.with_chromium_path(path.clone());
        }
        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = args.config();

    let mut make_session = || {
        let config = config.clone();
        async move {
            let driver = CdpDriver::launch(&config).await?;
            VitrinaResult::Ok(Session::new(driver, config))
        }
    };

    let reports = match args.suite {
        Some(Suite::Header) => vec![suites::header::run(&mut make_session).await],
        Some(Suite::Footer) => vec![suites::footer::run(&mut make_session).await],
        Some(Suite::Quota) => vec![suites::quota::run(&mut make_session).await],
        None => suites::run_all(&mut make_session).await,
    };

    render(&reports)
}

fn render(reports: &[SuiteReport]) -> ExitCode {
    let mut passed = 0;
    let mut failed = 0;
    for report in reports {
        print!("{}", report.summary());
        passed += report.passed_count();
        failed += report.failed_count();
    }
    println!("total: {passed} passed, {failed} failed");

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
