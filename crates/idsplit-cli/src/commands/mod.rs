pub mod index;
pub mod split;
pub mod words;
