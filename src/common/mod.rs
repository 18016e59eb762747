pub mod error;
pub mod events;
pub mod object_path;
pub mod report;
pub mod response;
pub mod routing;
