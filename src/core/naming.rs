//! Canonical resource naming
//!
//! Monitor display names are free-form. Terraform resource names and file
//! names need a stable, lowercase, underscore-separated identifier, which is
//! produced here.

use unicode_general_category::{get_general_category, GeneralCategory};

/// Convert a display name into a canonical snake_case identifier
///
/// Characters are classified by Unicode general category. In order:
/// 1. Uppercase letters (`Lu`) fold to lowercase
/// 2. Lowercase letters (`Ll`) and numbers (`Nd`, `Nl`, `No`) pass through
/// 3. Any other printable character becomes `_`
/// 4. Non-printable characters, unassigned code points included, are dropped
/// 5. Leading and trailing `_` are stripped
/// 6. Runs of `_` collapse to one
///
/// Normalizing twice yields the same string.
///
/// # Examples
///
/// ```
/// use tfsynth::core::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("Login Check"), "login_check");
/// assert_eq!(to_snake_case("  API / Health-Check!! "), "api_health_check");
/// ```
pub fn to_snake_case(input: &str) -> String {
    let mut mapped = String::with_capacity(input.len());

    for c in input.chars() {
        match get_general_category(c) {
            // Simple case mapping: the first char of the full lowercase form
            GeneralCategory::UppercaseLetter => mapped.extend(c.to_lowercase().next()),
            GeneralCategory::LowercaseLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber => mapped.push(c),
            category if c == ' ' || is_graphic(category) => mapped.push('_'),
            _ => {}
        }
    }

    mapped
        .split('_')
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Letters, marks, numbers, punctuation and symbols
///
/// Separators other than the ASCII space, controls, format, private-use,
/// surrogate and unassigned code points are not graphic.
fn is_graphic(category: GeneralCategory) -> bool {
    !matches!(
        category,
        GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
            | GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::PrivateUse
            | GeneralCategory::Surrogate
            | GeneralCategory::Unassigned
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::lorem::en::Sentence;
    use fake::{Fake, Faker};
    use test_case::test_case;

    #[test_case("Hello World", "hello_world" ; "lowercases and underscores spaces")]
    #[test_case("Hello/With-Emoji\u{1F642}And!Numb3rs", "hello_with_emoji_and_numb3rs" ; "replaces non alphanumerics")]
    #[test_case(" hello WORLD", "hello_world" ; "removes leading underscores")]
    #[test_case("Hello World\u{1F642}", "hello_world" ; "removes trailing underscores")]
    #[test_case("Hello, world", "hello_world" ; "collapses repeating underscores")]
    #[test_case("hello\u{00a0}world", "helloworld" ; "drops non printable characters")]
    #[test_case("tab\tseparated", "tabseparated" ; "drops control characters")]
    #[test_case("zero\u{200B}width", "zerowidth" ; "drops format characters")]
    #[test_case("", "" ; "empty input")]
    #[test_case("___", "" ; "only underscores")]
    #[test_case("Café Ünïcode", "café_ünïcode" ; "keeps non ascii letters")]
    #[test_case("\u{24B6} Check", "check" ; "circled letters are symbols")]
    #[test_case("\u{216B} x", "\u{216B}_x" ; "roman numerals stay numbers")]
    #[test_case("a\u{0378}b", "ab" ; "drops unassigned code points")]
    #[test_case("\u{E000}pua", "pua" ; "drops private use characters")]
    #[test_case("\u{0130}stanbul", "istanbul" ; "uses simple lowercase mapping")]
    fn test_to_snake_case(input: &str, expected: &str) {
        assert_eq!(to_snake_case(input), expected);
    }

    #[test]
    fn test_to_snake_case_is_idempotent_for_generated_names() {
        for _ in 0..200 {
            let input: String = Faker.fake();
            let once = to_snake_case(&input);
            assert_eq!(to_snake_case(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_to_snake_case_has_no_stray_underscores() {
        for _ in 0..200 {
            let sentence: String = Sentence(1..8).fake();
            let input = format!("  {sentence} -- {}", Faker.fake::<String>());
            let output = to_snake_case(&input);

            assert!(!output.starts_with('_'), "output: {output:?}");
            assert!(!output.ends_with('_'), "output: {output:?}");
            assert!(!output.contains("__"), "output: {output:?}");
        }
    }
}
