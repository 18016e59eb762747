pub mod mediaconvert;
pub mod notification;
pub mod queue;
