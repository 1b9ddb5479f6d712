//! File walking with gitignore support.

mod scanner;

pub use scanner::Scanner;
