//! Project list filtering.
//!
//! Case-insensitive substring match over a project's display name and
//! identifier. The same rule runs server-side for `?q=` and in the bundled
//! client script for search-as-you-type.

use crate::model::Project;

/// Returns `true` if `term` occurs in the project's name or slug,
/// ignoring case. A blank term matches everything.
pub fn matches(project: &Project, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    project.name.to_lowercase().contains(&needle) || project.slug.to_lowercase().contains(&needle)
}

/// Filter projects by `term`, preserving order.
pub fn filter_projects<'a, I>(projects: I, term: &str) -> Vec<&'a Project>
where
    I: IntoIterator<Item = &'a Project>,
{
    projects.into_iter().filter(|p| matches(p, term)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projects() -> Vec<Project> {
        vec![
            Project::new("voyager", "VoyagerApp"),
            Project::new("other", "Other"),
            Project::new("kit-voy", "Toolkit"),
        ]
    }

    #[test]
    fn test_filter_by_name_case_insensitive() {
        let all = vec![
            Project::new("a", "VoyagerApp"),
            Project::new("b", "Other"),
        ];
        let found = filter_projects(&all, "voy");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "VoyagerApp");
    }

    #[test]
    fn test_filter_matches_slug() {
        let all = projects();
        let names: Vec<_> = filter_projects(&all, "VOY").iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(names, vec!["voyager", "kit-voy"]);
    }

    #[test]
    fn test_blank_term_matches_all() {
        let all = projects();
        assert_eq!(filter_projects(&all, "").len(), 3);
        assert_eq!(filter_projects(&all, "   ").len(), 3);
    }

    #[test]
    fn test_no_match_is_empty() {
        let all = projects();
        assert!(filter_projects(&all, "zzz").is_empty());
    }

    #[test]
    fn test_term_is_trimmed() {
        let all = projects();
        assert_eq!(filter_projects(&all, "  other ").len(), 1);
    }
}
