//! Demo tokenizers generated by the build script with `scanpile_generate`.
//!
//! Each module contains the generated token enum `TToken`, the state dispatch `Lexicon`, the
//! aliases `Scanner` and `Token` and the constructor function `scanner`.

/// Numbers, ranges and plus signs. Recognizing floats with exponents requires backtracking over
/// up to two characters.
pub mod backtracking {
    include!(concat!(env!("OUT_DIR"), "/backtracking.rs"));
}

/// Identifiers and integers between line comments, block comments and nestable block comments.
pub mod comments {
    include!(concat!(env!("OUT_DIR"), "/comments.rs"));
}

/// Keywords that are prefixes of identifiers, semicolons and string literals.
pub mod keywords {
    include!(concat!(env!("OUT_DIR"), "/keywords.rs"));
}
