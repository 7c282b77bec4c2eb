pub mod controller;
pub mod options;
pub mod timer;
