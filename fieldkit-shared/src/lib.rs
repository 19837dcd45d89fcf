pub mod graphemes;
pub mod string_ext;
