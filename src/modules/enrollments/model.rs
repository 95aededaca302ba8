pub use coursehub_models::{
    CreateEnrollmentDto, Enrollment, EnrollmentResponse, EnrollmentWithCourse,
};
