use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{Error, Result};
use crate::resume::{Resume, UNKNOWN};

const EXPERIENCE_HEADING: &str = "Досвід роботи";
const EDUCATION_HEADING: &str = "Освіта";

lazy_static! {
    static ref YEARS_RE: Regex = Regex::new(r"(\d+)\s*(рік|роки|років)").unwrap();
    static ref MONTHS_RE: Regex = Regex::new(r"(\d+)\s*(місяць|місяці|місяців)").unwrap();
}

fn trimmed_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_owned()
}

/// Parse one fetched résumé page into a normalized record.
///
/// Individual fields degrade to their sentinel when their landmark is
/// missing; a page where no landmark matches at all is not a résumé page
/// and is skipped with an error the walker logs against `link`.
pub fn parse_resume(doc: &Html, link: &str) -> Result<Resume> {
    let position = extract_position(doc);
    let (has_experience_section, experience) = extract_experience(doc);
    let skills = extract_skills(doc);
    let location = extract_location(doc);
    let salary = extract_salary(doc);

    if position == UNKNOWN
        && !has_experience_section
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
    let selector = Selector::parse("h2.mt-lg").unwrap();
    doc.select(&selector)
        .next()
        .map(trimmed_text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_owned())
}

/// Two-pass reduction of the labeled experience section.
///
/// Walks the siblings of the "Досвід роботи" heading up to the "Освіта"
/// heading, collecting every duration fragment, then sums and normalizes
/// them. Returns whether the section existed at all: a résumé without the
/// section has zero experience, which is not the same as unknown.
fn extract_experience(doc: &Html) -> (bool, String) {
    let heading_selector = Selector::parse("h2").unwrap();
    let heading = doc
        .select(&heading_selector)
        .find(|h| trimmed_text(*h) == EXPERIENCE_HEADING);
    let heading = match heading {
        Some(heading) => heading,
        None => return (false, "0 years, 0 months".to_owned()),
    };

    let fragment_selector = Selector::parse("span.text-default-7").unwrap();
    let mut fragments = Vec::new();
    for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
        if sibling.value().name() == "h2" && trimmed_text(sibling) == EDUCATION_HEADING {
            break;
        }
        for fragment in sibling.select(&fragment_selector) {
            fragments.push(trimmed_text(fragment));
        }
    }
    (true, aggregate_duration(&fragments))
}

/// Sum year and month counts across duration fragments and roll the month
/// overflow into years.
pub(crate) fn aggregate_duration(fragments: &[String]) -> String {
    let mut years: u32 = 0;
    let mut months: u32 = 0;
    for fragment in fragments {
        if let Some(captures) = YEARS_RE.captures(fragment) {
            years += captures[1].parse::<u32>().unwrap_or(0);
        }
        if let Some(captures) = MONTHS_RE.captures(fragment) {
            months += captures[1].parse::<u32>().unwrap_or(0);
        }
    }
    years += months / 12;
    months %= 12;
    format!("{} years, {} months", years, months)
}

/// Skill chips when the page renders them granularly, otherwise the flat
/// text blob some page variants use, split on the same delimiter.
fn extract_skills(doc: &Html) -> Vec<String> {
    let chip_selector = Selector::parse("span.label-skill span.ellipsis").unwrap();
    let tokens: Vec<String> = doc
        .select(&chip_selector)
        .map(|chip| trimmed_text(chip).to_lowercase())
        .filter(|token| !token.is_empty())
        .collect();
    if !tokens.is_empty() {
        return tokens;
    }
    let flat_selector = Selector::parse("div.js-skills-block").unwrap();
    match doc.select(&flat_selector).next() {
        Some(container) => split_flat_skills(&trimmed_text(container)),
        None => Vec::new(),
    }
}

pub(crate) fn split_flat_skills(text: &str) -> Vec<String> {
    text.split(", ")
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

fn extract_location(doc: &Html) -> String {
    let label_selector = Selector::parse("dt").unwrap();
    for label in doc.select(&label_selector) {
        if trimmed_text(label) != "Місто проживання:" {
            continue;
        }
        return label
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "dd")
            .map(trimmed_text)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_owned());
    }
    UNKNOWN.to_owned()
}

fn extract_salary(doc: &Html) -> String {
    let selector = Selector::parse("span.text-muted-print").unwrap();
    doc.select(&selector)
        .next()
        .map(trimmed_text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_owned())
}
