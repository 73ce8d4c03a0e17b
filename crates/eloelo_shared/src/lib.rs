pub mod domain;
pub mod duration;
pub mod error;
pub mod protocol;
pub mod view;
