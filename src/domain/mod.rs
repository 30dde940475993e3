pub mod application;
pub mod student;
pub mod teacher;

#[allow(unused_imports)]
pub use application::{ClassApplication, ClassApplicationError};
#[allow(unused_imports)]
pub use student::{Email, EmailError, Student, StudentDomainError};
#[allow(unused_imports)]
pub use teacher::{
    ActiveStatus, ClassPolicy, ClassPolicyError, RecruitmentStatus, Teacher, TeacherDomainError,
    TeachingClass, TeachingClassError, MAX_CLASSES_PER_TEACHER,
};
