pub mod fetch;
pub mod query;
pub mod relevance;
pub mod resume;
pub mod robota_ua;
pub mod work_ua;

use fetch::{BrowserFetcher, HttpFetcher, PageFetcher};
use query::SearchQuery;
use resume::Resume;

pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    WorkUa,
    RobotaUa,
}

/// Run one full walk against `site` and return the ranked résumés.
///
/// This is the sole surface the front end calls. It never returns an
/// error: transport and extraction failures degrade to an empty or partial
/// result and a log line. The work.ua walk runs over stateless requests;
/// the robota.ua walk holds one browser session, released on every exit
/// path. Which WebDriver server to use comes from `WEBDRIVER_URL`.
pub async fn fetch_resumes(site: Site, query: &SearchQuery) -> Vec<Resume> {
    match site {
        Site::WorkUa => {
            let mut fetcher = HttpFetcher::new();
            let resumes = work_ua::fetch_resumes(&mut fetcher, query).await;
            if let Err(e) = fetcher.close().await {
                log::warn!("failed to release fetcher: {}", e);
            }
            resumes
        }
        Site::RobotaUa => {
            let server_url = std::env::var("WEBDRIVER_URL")
                .unwrap_or_else(|_| DEFAULT_WEBDRIVER_URL.to_owned());
            let mut fetcher = match BrowserFetcher::connect(&server_url).await {
                Ok(fetcher) => fetcher,
                Err(e) => {
                    log::error!("failed to open browser session at {}: {}", server_url, e);
                    return Vec::new();
                }
            };
            let resumes = robota_ua::fetch_resumes(&mut fetcher, query).await;
            if let Err(e) = fetcher.close().await {
                log::warn!("failed to close browser session: {}", e);
            }
            resumes
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use crate::fetch::{FetchError, PageFetcher, Result};

    /// In-memory fetcher with canned pages, for driving walker tests.
    /// URLs with no page behind them fail the way a dead request would.
    pub struct StubFetcher {
        pages: HashMap<String, String>,
        pub fetched: Vec<String>,
    }

    impl StubFetcher {
        pub fn new() -> Self {
            StubFetcher {
                pages: HashMap::new(),
                fetched: Vec::new(),
            }
        }

        pub fn page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_owned(), body.to_owned());
            self
        }
    }

    impl PageFetcher for StubFetcher {
        async fn fetch(&mut self, url: &str, _ready: Option<&str>) -> Result<String> {
            self.fetched.push(url.to_owned());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::RequestNotOk {
                    url: url.to_owned(),
                    status: 404,
                })
        }

        async fn close(self) -> Result<()> {
            Ok(())
        }
    }
}
