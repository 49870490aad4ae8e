//! Department index and the filtered, sorted course view.

use std::collections::BTreeSet;

use super::course_code::{compare_course_codes, CourseCodeExtractor};
use crate::models::CourseRecord;

/// Result of filtering the catalog by the active department.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogView<'a> {
    /// No department has been chosen yet.
    NoDepartmentSelected,
    /// A department is chosen but no course matches it.
    ///
    /// Also produced for a stale selection that is no longer in the index.
    Empty {
        /// The active department
        department: String,
    },
    /// Courses of the active department in course-code order.
    Courses(Vec<&'a CourseRecord>),
}

impl<'a> CatalogView<'a> {
    /// Returns the visible courses, empty for the non-course states.
    pub fn courses(&self) -> &[&'a CourseRecord] {
        match self {
            Self::Courses(courses) => courses,
            Self::NoDepartmentSelected | Self::Empty { .. } => &[],
        }
    }

    /// Number of visible courses.
    pub fn len(&self) -> usize {
        self.courses().len()
    }

    /// Returns true when no course is visible.
    pub fn is_empty(&self) -> bool {
        self.courses().is_empty()
    }
}

/// Sorted, de-duplicated department codes present in the catalog.
pub fn department_index(catalog: &[CourseRecord]) -> Vec<String> {
    catalog
        .iter()
        .map(|course| course.department.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Filters the catalog to the active department and orders it by course code.
///
/// `index` must be the department index of `catalog`; a department missing
/// from it is treated as an empty result rather than an error. Courses with
/// equal codes keep their catalog order.
pub fn filtered_view<'a>(
    catalog: &'a [CourseRecord],
    index: &[String],
    active: Option<&str>,
) -> CatalogView<'a> {
    let Some(department) = active else {
        return CatalogView::NoDepartmentSelected;
    };

    if !index.iter().any(|code| code == department) {
        return CatalogView::Empty {
            department: department.to_string(),
        };
    }

    let extractor = CourseCodeExtractor::new(department);
    let mut keyed: Vec<(String, &CourseRecord)> = catalog
        .iter()
        .filter(|course| course.department == department)
        .map(|course| (extractor.extract(&course.title), course))
        .collect();

    if keyed.is_empty() {
        return CatalogView::Empty {
            department: department.to_string(),
        };
    }

    // sort_by is stable
    keyed.sort_by(|(a, _), (b, _)| compare_course_codes(a, b));

    CatalogView::Courses(keyed.into_iter().map(|(_, course)| course).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: i64, department: &str, title: &str) -> CourseRecord {
        CourseRecord {
            id,
            title: title.to_string(),
            department: department.to_string(),
            credits: 4.0,
            description: String::new(),
            enrollment: None,
        }
    }

    fn ids(view: &CatalogView) -> Vec<i64> {
        view.courses().iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_department_index_sorted_and_distinct() {
        let catalog = vec![
            course(1, "MATH", "MATH 20A"),
            course(2, "CSE", "CSE 8A"),
            course(3, "MATH", "MATH 18"),
            course(4, "BILD", "BILD 1"),
        ];
        assert_eq!(department_index(&catalog), vec!["BILD", "CSE", "MATH"]);
    }

    #[test]
    fn test_department_index_empty_catalog() {
        assert!(department_index(&[]).is_empty());
    }

    #[test]
    fn test_numeric_aware_order() {
        let catalog = vec![
            course(1, "CSE", "CSE 100: Adv"),
            course(2, "CSE", "CSE 10: Mid"),
            course(3, "CSE", "CSE 8A: Intro"),
        ];
        let index = department_index(&catalog);
        let view = filtered_view(&catalog, &index, Some("CSE"));

        // Lexical order would give 10, 100, 8A
        assert_eq!(ids(&view), vec![3, 2, 1]);
    }

    #[test]
    fn test_filters_other_departments() {
        let catalog = vec![
            course(1, "CSE", "CSE 12"),
            course(2, "MATH", "MATH 3"),
            course(3, "CSE", "CSE 11"),
        ];
        let index = department_index(&catalog);
        let view = filtered_view(&catalog, &index, Some("CSE"));
        assert_eq!(ids(&view), vec![3, 1]);
    }

    #[test]
    fn test_equal_keys_keep_catalog_order() {
        let catalog = vec![
            course(5, "CSE", "Independent Study"),
            course(1, "CSE", "CSE 8A"),
            course(9, "CSE", "Research Seminar"),
            course(2, "CSE", "CSE 8A: Alternate"),
        ];
        let index = department_index(&catalog);
        let view = filtered_view(&catalog, &index, Some("CSE"));
        assert_eq!(ids(&view), vec![1, 2, 5, 9]);
    }

    #[test]
    fn test_unparseable_titles_sort_last() {
        let catalog = vec![
            course(1, "CSE", "Special Projects"),
            course(2, "CSE", "CSE 199: Independent Study"),
        ];
        let index = department_index(&catalog);
        let view = filtered_view(&catalog, &index, Some("CSE"));
        assert_eq!(ids(&view), vec![2, 1]);
    }

    #[test]
    fn test_no_department_selected() {
        let catalog = vec![course(1, "CSE", "CSE 8A")];
        let index = department_index(&catalog);
        assert_eq!(
            filtered_view(&catalog, &index, None),
            CatalogView::NoDepartmentSelected
        );
    }

    #[test]
    fn test_stale_department_is_empty_not_error() {
        let catalog = vec![course(1, "CSE", "CSE 8A")];
        let index = department_index(&catalog);
        let view = filtered_view(&catalog, &index, Some("HIST"));
        assert_eq!(
            view,
            CatalogView::Empty {
                department: "HIST".to_string()
            }
        );
        assert!(view.is_empty());
    }

    #[test]
    fn test_view_does_not_mutate_catalog() {
        let catalog = vec![course(1, "CSE", "CSE 100"), course(2, "CSE", "CSE 8A")];
        let before = catalog.clone();
        let index = department_index(&catalog);
        let _ = filtered_view(&catalog, &index, Some("CSE"));
        assert_eq!(catalog, before);
    }
}
