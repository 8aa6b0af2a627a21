use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Field value meaning "present in the schema but not found in the source".
pub const UNKNOWN: &str = "Unknown";

/// One normalized résumé, regardless of which site it was scraped from.
///
/// Every text field is always populated; missing source data is carried as
/// the [`UNKNOWN`] sentinel rather than an empty string. Skills are kept as
/// an ordered list of lowercase tokens and only joined for display, so the
/// scoring intersection never has to re-tokenize a flat string. An empty
/// skill list is the sentinel for "skills unknown".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Resume {
    pub position: String,
    pub experience: String,
    pub skills: Vec<String>,
    pub location: String,
    pub salary: String,
    pub link: String,
    /// Attached by the ranker; `None` until the record has been ranked.
    pub relevance_score: Option<u32>,
}

impl Resume {
    pub fn new(
        position: String,
        experience: String,
        skills: Vec<String>,
        location: String,
        salary: String,
        link: String,
    ) -> Self {
        Resume {
            position,
            experience,
            skills,
            location,
            salary,
            link,
            relevance_score: None,
        }
    }

    /// Relevance of this résumé against the caller's keyword list.
    ///
    /// Presence points: 2 each for position, experience and skills, 1 each
    /// for location and salary. On top of that, 2 points per distinct skill
    /// token that also appears in `keywords`.
    pub fn score(&self, keywords: &[String]) -> u32 {
        let mut score = 0;
        if self.position != UNKNOWN {
            score += 2;
        }
        if self.experience != UNKNOWN {
            score += 2;
        }
        if !self.skills.is_empty() {
            score += 2;
        }
        if self.location != UNKNOWN {
            score += 1;
        }
        if self.salary != UNKNOWN {
            score += 1;
        }
        let keywords: HashSet<&str> = keywords.iter().map(String::as_str).collect();
        let matched = self
            .skills
            .iter()
            .map(String::as_str)
            .collect::<HashSet<&str>>()
            .intersection(&keywords)
            .count() as u32;
        score + matched * 2
    }

    /// Skills as a single display string, or the sentinel when none were found.
    pub fn skills_display(&self) -> String {
        if self.skills.is_empty() {
            UNKNOWN.to_owned()
        } else {
            self.skills.join(", ")
        }
    }
}

impl Display for Resume {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position: {}, experience: {}, skills: {}, location: {}, salary expectation: {}",
            self.position,
            self.experience,
            self.skills_display(),
            self.location,
            self.salary,
        )
    }
}
