use scraper::{Html, Selector};

use super::extract;
use crate::fetch::PageFetcher;
use crate::query::{CodeMap, SearchQuery};
use crate::relevance;
use crate::resume::Resume;

const BASE_URL: &str = "https://robota.ua/candidates";

/// Listing pages render client side; the walker waits for the candidate
/// links before reading the page source.
const LISTING_READY: &str = "a.santa-no-underline";
const DETAIL_READY: &str = ".santa-typo-regular";

/// Experience ids used by the site's search query. The site bands
/// differently from work.ua; an unrecognized code is passed through
/// unmodified rather than dropped.
const EXPERIENCE_CODES: CodeMap = CodeMap::new(&[
    ("0", "0"), // no experience
    ("1", "1"), // up to 1 year
    ("2", "2"), // 1 to 2 years
    ("3", "3"), // 2 to 5 years
    ("4", "4"), // 5 to 10 years
    ("5", "6"), // over 10 years
]);

/// Salary floor values for the `salary` query fragment.
const SALARY_CODES: CodeMap = CodeMap::new(&[
    ("1", "10000"),
    ("2", "15000"),
    ("3", "20000"),
    ("4", "30000"),
    ("5", "50000"),
]);

fn encode_path_words(text: &str, separator: &str) -> String {
    text.split_whitespace()
        .map(|word| urlencoding::encode(word).into_owned())
        .collect::<Vec<_>>()
        .join(separator)
}

fn listing_url(query: &SearchQuery, page: u32) -> String {
    let position = encode_path_words(&query.position, "+");
    let location = match &query.location {
        Some(location) => urlencoding::encode(location).into_owned(),
        None => "ukraine".to_owned(),
    };
    let mut url = format!("{}/{}/{}?page={}", BASE_URL, position, location, page);
    if let Some(code) = &query.experience {
        let value: &str = match EXPERIENCE_CODES.get(code) {
            Some(value) => value,
            None => code,
        };
        url.push_str(&format!("&experienceIds={}", value));
    }
    if let Some(code) = &query.salary {
        let value: &str = match SALARY_CODES.get(code) {
            Some(value) => value,
            None => code,
        };
        url.push_str(&format!("&salary={}", value));
    }
    url
}

/// Candidate links on a listing page. The id is the last path segment of
/// each `/candidates/...` href.
fn extract_candidate_ids(doc: &Html) -> Vec<String> {
    let selector = Selector::parse("a.santa-no-underline").unwrap();
    doc.select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.starts_with("/candidates/"))
        .filter_map(|href| href.trim_end_matches('/').rsplit('/').next())
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .collect()
}

fn has_next_page(doc: &Html) -> bool {
    let selector = Selector::parse(".paginator a.next:not(.disabled)").unwrap();
    doc.select(&selector).next().is_some()
}

/// Walk the robota.ua candidate listings for `query` inside one browser
/// session, scrape every candidate page sequentially, rank by keyword
/// relevance and truncate to the caller's limit. The caller owns the
/// session and releases it after the walk, whatever way it ended.
pub async fn fetch_resumes<F: PageFetcher>(fetcher: &mut F, query: &SearchQuery) -> Vec<Resume> {
    let mut resumes = Vec::new();
    let mut skipped: u32 = 0;
    let mut page: u32 = 1;
    loop {
        let url = listing_url(query, page);
        log::info!("fetching robota.ua listing page {}: {}", page, url);
        let html = match fetcher.fetch(&url, Some(LISTING_READY)).await {
            Ok(html) => html,
            Err(e) => {
                log::error!("failed to fetch listing page {}: {}", url, e);
                break;
            }
        };
        let (ids, next_page_exists) = {
            let doc = Html::parse_document(&html);
            (extract_candidate_ids(&doc), has_next_page(&doc))
        };
        if ids.is_empty() {
            log::info!("no candidate links on page {}, stopping walk", page);
            break;
        }
        for id in ids {
            let link = format!("{}/{}/", BASE_URL, id);
            let html = match fetcher.fetch(&link, Some(DETAIL_READY)).await {
                Ok(html) => html,
                Err(e) => {
                    log::error!("failed to fetch candidate {}: {}", link, e);
                    skipped += 1;
                    continue;
                }
            };
            let doc = Html::parse_document(&html);
            match extract::parse_resume(&doc, &link) {
                Ok(resume) => resumes.push(resume),
                Err(e) => {
                    log::warn!("skipping candidate {}: {}", link, e);
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
        log::info!("skipped {} candidates during robota.ua walk", skipped);
    }
    let mut ranked = relevance::rank(resumes, &query.keywords);
    if let Some(limit) = query.limit {
        ranked.truncate(limit);
    }
    ranked
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::StubFetcher;

    #[test]
    fn test_listing_url_joins_position_with_plus() {
        let query = SearchQuery::new("data scientist");
        assert_eq!(
            listing_url(&query, 1),
            "https://robota.ua/candidates/data+scientist/ukraine?page=1"
        );
    }

    #[test]
    fn test_listing_url_embeds_location() {
        let mut query = SearchQuery::new("qa");
        query.location = Some("kyiv".to_owned());
        assert_eq!(
            listing_url(&query, 2),
            "https://robota.ua/candidates/qa/kyiv?page=2"
        );
    }

    #[test]
    fn test_listing_url_maps_filter_codes() {
        let mut query = SearchQuery::new("qa");
        query.experience = Some("5".to_owned());
        query.salary = Some("2".to_owned());
        assert_eq!(
            listing_url(&query, 1),
            "https://robota.ua/candidates/qa/ukraine?page=1&experienceIds=6&salary=15000"
        );
    }

    #[test]
    fn test_listing_url_passes_unmapped_codes_through() {
        let mut query = SearchQuery::new("qa");
        query.experience = Some("42".to_owned());
        assert_eq!(
            listing_url(&query, 1),
            "https://robota.ua/candidates/qa/ukraine?page=1&experienceIds=42"
        );
    }

    #[test]
    fn test_extract_candidate_ids_filters_foreign_links() {
        let doc = Html::parse_document(
            r#"<html><body>
                <a class="santa-no-underline" href="/candidates/123456/">one</a>
                <a class="santa-no-underline" href="/candidates/654321">two</a>
                <a class="santa-no-underline" href="/companies/99/">not a candidate</a>
                <a href="/candidates/777/">no class</a>
            </body></html>"#,
        );
        assert_eq!(extract_candidate_ids(&doc), vec!["123456", "654321"]);
    }

    fn listing_page(ids: &[&str], with_next: bool) -> String {
        let mut body = String::new();
        for id in ids {
            body.push_str(&format!(
                r#"<a class="santa-no-underline" href="/candidates/{}/">candidate</a>"#,
                id
            ));
        }
        if with_next {
            body.push_str(
                r##"<div class="paginator"><a class="next" href="#">&gt;</a></div>"##,
            );
        }
        format!("<html><body>{}</body></html>", body)
    }

    #[test]
    fn test_has_next_page_detects_enabled_control() {
        let doc = Html::parse_document(&listing_page(&[], true));
        assert!(has_next_page(&doc));
        let doc = Html::parse_document(&listing_page(&[], false));
        assert!(!has_next_page(&doc));
    }

    fn candidate_page(position: &str, skills: &[&str]) -> String {
        let items = skills
            .iter()
            .map(|skill| format!("<li>{}</li>", skill))
            .collect::<String>();
        format!(
            r#"<html><body>
                <lib-resume-main-info>
                    <p class="santa-mt-10 santa-typo-secondary santa-text-black-700">{}</p>
                </lib-resume-main-info>
                <div class="santa-list"><ul>{}</ul></div>
            </body></html>"#,
            position, items
        )
    }

    #[tokio::test]
    async fn test_walk_collects_and_ranks_candidates() {
        let mut fetcher = StubFetcher::new()
            .page(
                "https://robota.ua/candidates/qa/ukraine?page=1",
                &listing_page(&["1", "2"], false),
            )
            .page(
                "https://robota.ua/candidates/1/",
                &candidate_page("QA Engineer", &["Selenium"]),
            )
            .page(
                "https://robota.ua/candidates/2/",
                &candidate_page("QA Lead", &["Selenium", "Python"]),
            );

        let mut query = SearchQuery::new("qa");
        query.keywords = vec!["python".to_owned()];
        let resumes = fetch_resumes(&mut fetcher, &query).await;
        assert_eq!(resumes.len(), 2);
        assert_eq!(resumes[0].position, "QA Lead");
    }

    #[tokio::test]
    async fn test_walk_stops_at_first_empty_listing() {
        let mut fetcher = StubFetcher::new()
            .page(
                "https://robota.ua/candidates/qa/ukraine?page=1",
                &listing_page(&["1"], true),
            )
            .page(
                "https://robota.ua/candidates/1/",
                &candidate_page("QA", &[]),
            )
            .page(
                "https://robota.ua/candidates/qa/ukraine?page=2",
                &listing_page(&[], true),
            );

        let query = SearchQuery::new("qa");
        let resumes = fetch_resumes(&mut fetcher, &query).await;
        assert_eq!(resumes.len(), 1);
        assert!(!fetcher.fetched.iter().any(|url| url.contains("page=3")));
    }
}
