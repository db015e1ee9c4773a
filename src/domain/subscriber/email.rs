use derive_more::Display;

pub const INVALID_EMAIL: &str = "Please enter a valid email address.";

/// An address that looks like `local@domain.tld`.
///
/// The check is loose: one `@`, something on both sides, a `.`
/// inside the domain with something on both sides of it, and no whitespace.
/// The value is kept exactly as typed, with no trimming and no case folding.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
#[display(fmt = "{}", _0)]
pub struct Email(String);

impl TryFrom<String> for Email {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_plausible_address(&value) {
            Ok(Self(value))
        } else {
            Err(INVALID_EMAIL.into())
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// `@` or anything a browser's `\s` matches: Unicode `White_Space` without
/// U+0085, plus U+FEFF.
fn is_forbidden(c: char) -> bool {
    c == '@' || c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

fn is_plausible_address(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.chars().any(is_forbidden) || domain.chars().any(is_forbidden) {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
