pub use coursehub_models::{
    CreateSessionDto, NewSession, Session, SessionChanges, UpdateSessionDto, next_order,
};
