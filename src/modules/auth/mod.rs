pub mod controller;
pub mod identity;
pub mod model;
pub mod router;
pub mod service;
