use crate::resume::Resume;

/// Score every résumé against `keywords`, attach the score and sort
/// descending. The sort is stable, so equal-score records keep their
/// accumulation order.
pub fn rank(mut resumes: Vec<Resume>, keywords: &[String]) -> Vec<Resume> {
    for resume in resumes.iter_mut() {
        resume.relevance_score = Some(resume.score(keywords));
    }
    resumes.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    resumes
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::resume::UNKNOWN;

    fn resume_with_skills(skills: &[&str]) -> Resume {
        Resume::new(
            "Engineer".to_owned(),
            UNKNOWN.to_owned(),
            skills.iter().map(|s| s.to_string()).collect(),
            UNKNOWN.to_owned(),
            UNKNOWN.to_owned(),
            String::new(),
        )
    }

    #[test]
    fn test_rank_empty_input() {
        assert!(rank(vec![], &[]).is_empty());
    }

    #[test]
    fn test_rank_single_element() {
        let ranked = rank(vec![resume_with_skills(&["python"])], &[]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].relevance_score, Some(4));
    }

    #[test]
    fn test_rank_sorts_non_increasing() {
        let keywords = vec!["python".to_owned(), "sql".to_owned()];
        let resumes = vec![
            resume_with_skills(&[]),
            resume_with_skills(&["python", "sql"]),
            resume_with_skills(&["excel"]),
            resume_with_skills(&["sql"]),
        ];
        let ranked = rank(resumes, &keywords);
        let scores: Vec<u32> = ranked
            .iter()
            .map(|r| r.relevance_score.unwrap_or(0))
            .collect();
        for pair in scores.windows(2) {
            assert!(pair[0] >= pair[1], "scores not non-increasing: {:?}", scores);
        }
        assert_eq!(scores[0], 8);
    }

    #[test]
    fn test_rank_without_keywords_uses_presence_points() {
        let resumes = vec![resume_with_skills(&["python"]), resume_with_skills(&[])];
        let ranked = rank(resumes, &[]);
        assert_eq!(ranked[0].relevance_score, Some(4));
        assert_eq!(ranked[1].relevance_score, Some(2));
    }
}
