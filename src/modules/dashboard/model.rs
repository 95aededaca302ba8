pub use coursehub_models::{
    CompletedSession, CompletionResponse, CourseProgress, NewCompletedSession, NewRating,
    RateSessionDto, Rating,
};
