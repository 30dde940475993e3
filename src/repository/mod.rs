pub mod class;
pub mod student;
pub mod teacher;

#[allow(unused_imports)]
pub use class::{
    ClassApplicationRepository, ClassRepositoryError, MySqlClassApplicationRepository,
    MySqlTeachingClassRepository, TeachingClassRepository,
};
#[allow(unused_imports)]
pub use student::{MySqlStudentRepository, NewStudent, StudentRepository, StudentRepositoryError};
#[allow(unused_imports)]
pub use teacher::{
    ClassPage, ClassRecord, ClassSearchParams, ClassSort, MySqlTeacherRepository, NewTeacher,
    NewTeachingClass, PageRequest, TeacherRepository, TeacherRepositoryError,
};
