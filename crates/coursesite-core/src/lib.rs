//! Course Site Core Library
//!
//! Course record model, lecture schedule expansion, record persistence, and
//! configuration for the course site builder.

pub mod codec;
pub mod config;
pub mod course;
pub mod error;
pub mod schedule;

pub use codec::{RecordFormat, load_record, save_record};
pub use config::Config;
pub use course::{
    CourseEdit, CourseRecord, Instructor, LectureDay, PageType, ParseValueError, Semester,
    Subject,
};
pub use error::{CoreError, Result};
pub use schedule::{InvalidRangeError, LectureSession, expand};
