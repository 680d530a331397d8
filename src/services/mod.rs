pub mod course_code;
pub mod segmenter;

pub use course_code::extract_course_code;
pub use segmenter::segment_sections;
