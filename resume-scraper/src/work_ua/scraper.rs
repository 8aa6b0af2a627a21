use scraper::{Html, Selector};

use super::extract;
use crate::fetch::PageFetcher;
use crate::query::{CodeMap, SearchQuery};
use crate::relevance;
use crate::resume::Resume;

const BASE_URL: &str = "https://www.work.ua/resumes";

/// Experience bands surveyed from the site's search form. A code outside
/// the surveyed bands drops the filter entirely.
const EXPERIENCE_CODES: CodeMap = CodeMap::new(&[
    ("0", "1"),   // no experience
    ("1", "164"), // up to 1 year
    ("2", "165"), // 1 to 2 years
    ("3", "166"), // 2 to 5 years
    ("4", "167"), // over 5 years
]);

/// Salary bands, mapped to the search form's `salaryfrom` values.
const SALARY_CODES: CodeMap = CodeMap::new(&[
    ("1", "2"), // from 10 000
    ("2", "3"), // from 15 000
    ("3", "4"), // from 20 000
    ("4", "5"), // from 30 000
    ("5", "6"), // from 40 000
]);

fn encode_path_words(text: &str, separator: &str) -> String {
    text.split_whitespace()
        .map(|word| urlencoding::encode(word).into_owned())
        .collect::<Vec<_>>()
        .join(separator)
}

fn listing_url(query: &SearchQuery, page: u32) -> String {
    let position = encode_path_words(&query.position, "-");
    let mut url = match &query.location {
        Some(location) => format!(
            "{}-{}-{}/",
            BASE_URL,
            urlencoding::encode(location),
            position
        ),
        None => format!("{}/-{}/", BASE_URL, position),
    };
    url.push_str(&format!("?page={}", page));
    if let Some(code) = &query.experience {
        if let Some(value) = EXPERIENCE_CODES.get(code) {
            url.push_str(&format!("&experience={}", value));
        }
    }
    if let Some(code) = &query.salary {
        if let Some(value) = SALARY_CODES.get(code) {
            url.push_str(&format!("&salaryfrom={}", value));
        }
    }
    url
}

/// Candidate résumé ids on a listing page: anchors whose `name` attribute
/// is the numeric résumé id.
fn extract_resume_ids(doc: &Html) -> Vec<String> {
    let selector = Selector::parse("a[name]").unwrap();
    doc.select(&selector)
        .filter_map(|a| a.value().attr("name"))
        .filter(|name| !name.is_empty() && name.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_owned)
        .collect()
}

fn has_next_page(doc: &Html) -> bool {
    let selector =
        Selector::parse("ul.pagination li.add-left-default:not(.disabled) a[href]").unwrap();
    doc.select(&selector).next().is_some()
}

/// Walk the work.ua listing pages for `query`, scrape every candidate
/// résumé sequentially, then rank by keyword relevance and truncate to the
/// caller's limit. Transport failures stop the walk and return whatever
/// was accumulated; per-résumé failures are logged and skipped.
pub async fn fetch_resumes<F: PageFetcher>(fetcher: &mut F, query: &SearchQuery) -> Vec<Resume> {
    let mut resumes = Vec::new();
    let mut skipped: u32 = 0;
    let mut page: u32 = 1;
    loop {
        let url = listing_url(query, page);
        log::info!("fetching work.ua listing page {}: {}", page, url);
        let html = match fetcher.fetch(&url, None).await {
            Ok(html) => html,
            Err(e) => {
                log::error!("failed to fetch listing page {}: {}", url, e);
                break;
            }
        };
        let (ids, next_page_exists) = {
            let doc = Html::parse_document(&html);
            (extract_resume_ids(&doc), has_next_page(&doc))
        };
        if ids.is_empty() {
            log::info!("no resume links on page {}, stopping walk", page);
            break;
        }
        for id in ids {
            let link = format!("{}/{}/", BASE_URL, id);
            let html = match fetcher.fetch(&link, None).await {
                Ok(html) => html,
                Err(e) => {
                    log::error!("failed to fetch resume {}: {}", link, e);
                    skipped += 1;
                    continue;
                }
            };
            let doc = Html::parse_document(&html);
            match extract::parse_resume(&doc, &link) {
                Ok(resume) => resumes.push(resume),
                Err(e) => {
                    log::warn!("skipping resume {}: {}", link, e);
                    skipped += 1;
                }
            }
        }
        if !next_page_exists {
            log::info!("no next page control after page {}, stopping walk", page);
            break;
        }
        page += 1;
        if page > query.max_pages {
            log::warn!("page cap of {} reached, stopping walk", query.max_pages);
            break;
        }
    }
    if skipped > 0 {
        log::info!("skipped {} resumes during work.ua walk", skipped);
    }
    let mut ranked = relevance::rank(resumes, &query.keywords);
    if let Some(limit) = query.limit {
        ranked.truncate(limit);
    }
    ranked
}
