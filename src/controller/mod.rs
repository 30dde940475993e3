pub mod student;
pub mod teacher;

pub use student::StudentController;
pub use teacher::TeacherController;
