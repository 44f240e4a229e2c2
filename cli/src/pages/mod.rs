//! Page views for every Student Management route

pub mod create;
pub mod delete;
pub mod detail;
pub mod edit;
pub mod format;
pub mod landing;
pub mod students;

use studentdesk_core::router::{names, ViewRegistry};

pub use create::StudentCreatePageFactory;
pub use delete::StudentDeletePageFactory;
pub use detail::StudentDetailPageFactory;
pub use edit::StudentEditPageFactory;
pub use landing::LandingPageFactory;
pub use students::StudentsPageFactory;

/// One factory per route name; nothing is constructed until visited
pub fn registry() -> ViewRegistry {
    ViewRegistry::new()
        .with(names::HOME, LandingPageFactory)
        .with(names::STUDENTS, StudentsPageFactory)
        .with(names::STUDENT_CREATE, StudentCreatePageFactory)
        .with(names::STUDENT_DETAIL, StudentDetailPageFactory)
        .with(names::STUDENT_EDIT, StudentEditPageFactory)
        .with(names::STUDENT_DELETE, StudentDeletePageFactory)
}
