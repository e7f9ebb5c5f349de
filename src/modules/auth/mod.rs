pub mod confirmation;
pub mod controller;
pub mod router;
pub mod service;
