pub mod course_client;

pub use course_client::{CourseApi, HttpCourseClient};
