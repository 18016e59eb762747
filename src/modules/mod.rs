pub mod completion;
pub mod submission;
