//! Conversion of raw resource names into bare identifiers.

use unicode_general_category::{GeneralCategory, get_general_category};

/// Identifier role of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
  /// Letters may appear anywhere in an identifier.
  Letter,
  /// Digits, connectors, combining marks and format characters may only follow a leading character.
  Continuation,
  /// Anything else never survives sanitisation.
  Other,
}

/// Classify a character by its Unicode general category.
pub fn classify(c: char) -> CharClass {
  match get_general_category(c) {
    GeneralCategory::UppercaseLetter
    | GeneralCategory::LowercaseLetter
    | GeneralCategory::TitlecaseLetter
    | GeneralCategory::ModifierLetter
    | GeneralCategory::OtherLetter => CharClass::Letter,
    GeneralCategory::ConnectorPunctuation
    | GeneralCategory::DecimalNumber
    | GeneralCategory::Format
    | GeneralCategory::LetterNumber
    | GeneralCategory::NonspacingMark
    | GeneralCategory::SpacingMark => CharClass::Continuation,
    _ => CharClass::Other,
  }
}

/// Derive an identifier from a raw resource name.
///
/// A leading `root_namespace.` prefix is removed so identifiers read relative to the project.
/// Dots become underscores, and every character that cannot appear at its position in a bare
/// identifier is replaced with `_`. Keywords and collisions are left to the caller.
pub fn sanitize(raw_name: &str, root_namespace: &str) -> String {
  let prefix = format!("{root_namespace}.");
  let relative = raw_name.strip_prefix(prefix.as_str()).unwrap_or(raw_name);

  relative
    .replace('.', "_")
    .chars()
    .enumerate()
    .map(|(index, c)| match (classify(c), index == 0) {
      (CharClass::Letter, _) => c,
      (CharClass::Continuation, false) => c,
      (CharClass::Continuation, true) | (CharClass::Other, _) => '_',
    })
    .collect()
}
