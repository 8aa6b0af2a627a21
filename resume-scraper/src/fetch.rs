use std::time::Duration;

use thirtyfour::error::WebDriverError;
use thirtyfour::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request error: '{0}'")]
    Request(#[from] reqwest::Error),
    #[error("Request not successful, status {status}, url: '{url}'")]
    RequestNotOk { url: String, status: u16 },
    #[error("Webdriver error: '{0}'")]
    WebDriver(#[from] WebDriverError),
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// Transport capability the pagination walkers are written against.
///
/// `ready` is a CSS selector the page must contain before its source is
/// returned; implementations backed by a plain HTTP round trip ignore it,
/// the browser-session implementation uses it to wait out client-side
/// rendering. Walks are strictly sequential, so `fetch` takes `&mut self`
/// and no request overlaps another.
///
/// Walk futures run on the caller's task and are never spawned, so the
/// returned futures carry no `Send` bound.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch(&mut self, url: &str, ready: Option<&str>) -> Result<String>;

    /// Release any transport resource held for the walk. Must be called on
    /// every exit path of a walk that acquired a stateful fetcher.
    async fn close(self) -> Result<()>;
}

/// Stateless single-shot fetcher. One GET per call, no session kept
/// between requests.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        HttpFetcher {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&mut self, url: &str, _ready: Option<&str>) -> Result<String> {
        log::debug!("GET {}", url);
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::RequestNotOk {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }
        Ok(resp.text().await?)
    }

    async fn close(self) -> Result<()> {
        Ok(())
    }
}

const ELEMENT_WAIT: Duration = Duration::from_secs(10);
const ELEMENT_POLL: Duration = Duration::from_millis(250);

/// Session-based fetcher for pages rendered client side. One WebDriver
/// session is held open for an entire walk and navigated from URL to URL,
/// then released through [`PageFetcher::close`].
pub struct BrowserFetcher {
    driver: WebDriver,
}

impl BrowserFetcher {
    pub async fn connect(server_url: &str) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        caps.add_chrome_arg("--headless")?;
        caps.add_chrome_arg("--incognito")?;
        caps.add_chrome_arg("--disable-blink-features=AutomationControlled")?;
        let driver = WebDriver::new(server_url, caps).await?;
        Ok(BrowserFetcher { driver })
    }
}

impl PageFetcher for BrowserFetcher {
    async fn fetch(&mut self, url: &str, ready: Option<&str>) -> Result<String> {
        log::debug!("navigating browser session to {}", url);
        self.driver.goto(url).await?;
        if let Some(selector) = ready {
            self.driver
                .query(By::Css(selector))
                .wait(ELEMENT_WAIT, ELEMENT_POLL)
                .first()
                .await?;
        }
        Ok(self.driver.source().await?)
    }

    async fn close(self) -> Result<()> {
        self.driver.quit().await?;
        Ok(())
    }
}
