pub mod course;
pub mod insight;
pub mod section;

pub use course::{Comment, CourseIdentifier, CourseRecord};
pub use insight::{AnalyzeRequest, InsightReport};
pub use section::Section;
