use scraper::{ElementRef, Html, Selector};

use super::{Error, Result};
use crate::resume::{Resume, UNKNOWN};

fn trimmed_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_owned()
}

/// Parse one candidate page from the browser session into a normalized
/// record. Fields degrade to their sentinel individually; a page with no
/// matching landmark at all is skipped.
pub fn parse_resume(doc: &Html, link: &str) -> Result<Resume> {
    let position = extract_position(doc);
    let experience = extract_experience(doc);
    let skills = extract_skills(doc);
    let location = extract_location(doc);
    let salary = extract_salary(doc);

    if position == UNKNOWN
        && experience == UNKNOWN
        && skills.is_empty()
        && location == UNKNOWN
        && salary == UNKNOWN
    {
        return Err(Error::ContentNotFound("resume fields"));
    }

    Ok(Resume::new(
        position,
        experience,
        skills,
        location,
        salary,
        link.to_owned(),
    ))
}

fn extract_position(doc: &Html) -> String {
    let selector =
        Selector::parse("p.santa-mt-10.santa-typo-secondary.santa-text-black-700").unwrap();
    doc.select(&selector)
        .next()
        .map(trimmed_text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_owned())
}

/// Single free-text label, no aggregation. A label that is present but
/// empty means the site rendered the slot without a value, which is still
/// unknown experience.
fn extract_experience(doc: &Html) -> String {
    let selector = Selector::parse("span.santa-text-red-500.santa-whitespace-nowrap").unwrap();
    doc.select(&selector)
        .next()
        .map(trimmed_text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_owned())
}

fn extract_skills(doc: &Html) -> Vec<String> {
    let container_selector = Selector::parse("div.santa-list").unwrap();
    let container = match doc.select(&container_selector).next() {
        Some(container) => container,
        None => return Vec::new(),
    };
    let item_selector = Selector::parse("li").unwrap();
    let tokens: Vec<String> = container
        .select(&item_selector)
        .map(|item| trimmed_text(item).to_lowercase())
        .filter(|token| !token.is_empty())
        .collect();
    if !tokens.is_empty() {
        return tokens;
    }
    // some page variants render the whole block as unstructured text
    split_flat_skills(&trimmed_text(container))
}

pub(crate) fn split_flat_skills(text: &str) -> Vec<String> {
    text.split(", ")
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Location lives inside the main-info component; when the component is
/// absent the nested lookup is never attempted.
fn extract_location(doc: &Html) -> String {
    let container_selector = Selector::parse("lib-resume-main-info").unwrap();
    let container = match doc.select(&container_selector).next() {
        Some(container) => container,
        None => return UNKNOWN.to_owned(),
    };
    let selector = Selector::parse("p.santa-typo-regular.santa-text-black-700").unwrap();
    container
        .select(&selector)
        .next()
        .map(trimmed_text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_owned())
}

/// Salary also lives inside the main-info component, prefixed with a
/// two-character currency marker that is not part of the value.
fn extract_salary(doc: &Html) -> String {
    let container_selector = Selector::parse("lib-resume-main-info").unwrap();
    let container = match doc.select(&container_selector).next() {
        Some(container) => container,
        None => return UNKNOWN.to_owned(),
    };
    let row_selector = Selector::parse("p.santa-flex.santa-items-center.santa-mb-10").unwrap();
    let row = match container.select(&row_selector).next() {
        Some(row) => row,
        None => return UNKNOWN.to_owned(),
    };
    let value_selector = Selector::parse("span.santa-typo-regular.santa-text-black-700").unwrap();
    row.select(&value_selector)
        .next()
        .map(|el| trimmed_text(el).chars().skip(2).collect::<String>())
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_owned())
}
