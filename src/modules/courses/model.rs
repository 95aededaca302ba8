pub use coursehub_models::{
    Course, CourseChanges, CourseWithSessions, CreateCourseDto, NewCourse, PublishedCoursesQuery,
    UpdateCourseDto,
};
