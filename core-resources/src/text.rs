//! Display helpers for identifiers and option lists

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// `"camelCaseName"` → `"Camel Case Name"`
///
/// Splits before every uppercase letter, then capitalizes the first letter
/// of each word and lowercases the rest.
pub fn title_cased(input: &str) -> String {
    let mut spaced = String::with_capacity(input.len() + 4);
    for c in input.chars() {
        if c.is_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }

    spaced
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"camelCasedString"` → `"camel Cased String"`
///
/// Inserts a space before each uppercase letter after the first character,
/// unless one is already there. Letter case is left untouched.
pub fn space_separated(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut previous: Option<char> = None;

    for c in input.chars() {
        if c.is_uppercase() && previous.is_some_and(|p| !p.is_whitespace()) {
            out.push(' ');
        }
        out.push(c);
        previous = Some(c);
    }

    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// A value with a user-facing label
///
/// The default label is the title-cased `Debug` name, which suits
/// fieldless enums:
///
/// ```
/// use core_resources::text::Labelable;
///
/// #[derive(Debug)]
/// enum SortOrder {
///     DateAdded,
/// }
///
/// impl Labelable for SortOrder {}
///
/// assert_eq!(SortOrder::DateAdded.label(), "Date Added");
/// ```
pub trait Labelable: Debug {
    fn label(&self) -> String {
        title_cased(&format!("{:?}", self))
    }
}

pub trait Uniqued: Iterator {
    /// Drop repeated items, keeping the first occurrence of each
    fn uniqued(self) -> Vec<Self::Item>
    where
        Self: Sized,
        Self::Item: Eq + Hash + Clone,
    {
        let mut seen = HashSet::new();
        self.filter(|item| seen.insert(item.clone())).collect()
    }
}

impl<I: Iterator> Uniqued for I {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_cased() {
        assert_eq!(title_cased("camelCaseName"), "Camel Case Name");
        assert_eq!(title_cased("plain"), "Plain");
        assert_eq!(title_cased("AlreadyTitled"), "Already Titled");
        assert_eq!(title_cased(""), "");
    }

    #[test]
    fn test_space_separated() {
        assert_eq!(space_separated("camelCasedString"), "camel Cased String");
        assert_eq!(
            space_separated("Lorem ipsum dolor sit amet"),
            "Lorem ipsum dolor sit amet"
        );
        assert_eq!(space_separated("A"), "A");
    }

    #[test]
    fn test_space_separated_keeps_existing_spaces() {
        assert_eq!(space_separated("Hello World"), "Hello World");
    }

    #[derive(Debug)]
    enum Finish {
        Matte,
        HighGloss,
    }

    impl Labelable for Finish {}

    struct Custom;

    impl Debug for Custom {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("Custom")
        }
    }

    impl Labelable for Custom {
        fn label(&self) -> String {
            "Something else".to_string()
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Finish::Matte.label(), "Matte");
        assert_eq!(Finish::HighGloss.label(), "High Gloss");
        assert_eq!(Custom.label(), "Something else");
    }

    #[test]
    fn test_uniqued_keeps_first_occurrence_order() {
        let values = vec!["b", "a", "b", "c", "a"];
        assert_eq!(values.into_iter().uniqued(), vec!["b", "a", "c"]);
    }
}
