pub mod fs;
pub mod string;
