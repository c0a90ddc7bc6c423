use std::fmt;

use proc_macro2::{Literal, TokenStream};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The code of the end of the input. It must be the same value the runtime uses.
pub const END_OF_STREAM: u32 = 0x11_0000;

const MAX_CHAR: u32 = char::MAX as u32;

/// A set of character codes that labels a transition.
///
/// The set is kept as a sorted list of maximal, non-overlapping inclusive ranges. Besides
/// Unicode scalar values it may contain [`END_OF_STREAM`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Vec<(u32, u32)>", into = "Vec<(u32, u32)>")
)]
pub struct CharSet {
    ranges: Vec<(u32, u32)>,
}

impl CharSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set from arbitrary, possibly overlapping inclusive ranges of codes.
    /// Ranges with a start behind their end are ignored.
    pub fn from_ranges<I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let mut ranges: Vec<(u32, u32)> = ranges.into_iter().filter(|(s, e)| s <= e).collect();
        ranges.sort_unstable();
        let mut normalized: Vec<(u32, u32)> = Vec::with_capacity(ranges.len());
        for (start, end) in ranges {
            match normalized.last_mut() {
                Some(last) if start <= last.1.saturating_add(1) => last.1 = last.1.max(end),
                _ => normalized.push((start, end)),
            }
        }
        Self { ranges: normalized }
    }

    /// Creates a set of the given characters.
    pub fn from_chars<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        Self::from_ranges(chars.into_iter().map(|c| (c as u32, c as u32)))
    }

    /// Creates a set of the characters from `first` to `last`, both inclusive.
    pub fn range(first: char, last: char) -> Self {
        Self::from_ranges([(first as u32, last as u32)])
    }

    /// Creates a set that only contains the end of the input.
    pub fn end_of_stream() -> Self {
        Self::from_ranges([(END_OF_STREAM, END_OF_STREAM)])
    }

    /// Creates a set of all characters except the given ones. The end of the input is not part
    /// of the result.
    pub fn any_except<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let excluded = Self::from_chars(chars);
        let mut ranges = Vec::new();
        let mut next = 0u32;
        for &(start, end) in &excluded.ranges {
            if start > next {
                ranges.push((next, start - 1));
            }
            next = end + 1;
        }
        if next <= MAX_CHAR {
            ranges.push((next, MAX_CHAR));
        }
        Self { ranges }
    }

    /// Returns the union of both sets.
    pub fn union(&self, other: &CharSet) -> CharSet {
        Self::from_ranges(self.ranges.iter().chain(other.ranges.iter()).copied())
    }

    /// Returns this set extended by the end of the input.
    pub fn with_end_of_stream(self) -> CharSet {
        self.union(&Self::end_of_stream())
    }

    /// Returns true if the set contains the given code.
    pub fn contains(&self, code: u32) -> bool {
        self.ranges
            .binary_search_by(|&(start, end)| {
                if code < start {
                    std::cmp::Ordering::Greater
                } else if code > end {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Returns true if the set contains no code at all.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Returns the ranges of the set.
    pub fn ranges(&self) -> &[(u32, u32)] {
        &self.ranges
    }

    /// Generates the test of the given code expression against this set.
    /// A range becomes a range pattern and a single code a literal pattern.
    pub(crate) fn generate_guard(&self, code: &TokenStream) -> TokenStream {
        if self.ranges.is_empty() {
            return quote::quote! { false };
        }
        let patterns = self.ranges.iter().map(|&(start, end)| {
            let start_lit = Literal::u32_suffixed(start);
            if start == end {
                quote::quote! { #start_lit }
            } else {
                let end_lit = Literal::u32_suffixed(end);
                quote::quote! { #start_lit..=#end_lit }
            }
        });
        quote::quote! { matches!(#code, #(#patterns)|*) }
    }
}

impl From<Vec<(u32, u32)>> for CharSet {
    fn from(ranges: Vec<(u32, u32)>) -> Self {
        Self::from_ranges(ranges)
    }
}

impl From<CharSet> for Vec<(u32, u32)> {
    fn from(set: CharSet) -> Self {
        set.ranges
    }
}

fn fmt_code(code: u32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if code == END_OF_STREAM {
        return write!(f, "EOS");
    }
    match char::from_u32(code) {
        Some(c) if !c.is_control() => write!(f, "{:?}", c),
        _ => write!(f, "\\u{{{:x}}}", code),
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, &(start, end)) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            fmt_code(start, f)?;
            if start != end {
                write!(f, "-")?;
                fmt_code(end, f)?;
            }
        }
        write!(f, "]")
    }
}
