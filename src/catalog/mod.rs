//! Course catalog: storage, department index and the sorted view.

pub mod course_code;
pub mod store;
pub mod view;

pub use course_code::{compare_course_codes, extract_course_code, CourseCodeExtractor};
pub use store::CatalogStore;
pub use view::{department_index, filtered_view, CatalogView};
