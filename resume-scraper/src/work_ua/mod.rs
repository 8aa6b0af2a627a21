pub mod scraper;
pub(crate) mod extract;

pub use self::scraper::fetch_resumes;

use thiserror::Error;

pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Content not found in html: '{0}'")]
    ContentNotFound(&'static str),
}
