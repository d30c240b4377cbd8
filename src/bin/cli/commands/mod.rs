pub mod import;
pub mod level;
pub mod relearn;
pub mod suggest;
pub mod words;
