//! Core rules from [RFC 5234 Appendix B.1](https://www.rfc-editor.org/rfc/rfc5234#appendix-B.1).
//! Single characters and character ranges are kept in their literal form
//! so they can be dropped into any rule constructor; the rest are shared
//! rules built once on first use.

use crate::Rule;
use once_cell::sync::Lazy;

/// ALPHA = %x41-5A / %x61-7A ; A-Z / a-z
pub static ALPHA: Lazy<Rule> = Lazy::new(|| alternatives![('A', 'Z'), ('a', 'z')]);

/// DIGIT = %x30-39 ; 0-9
pub const DIGIT: (char, char) = ('0', '9');

/// HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"
///
/// ABNF quoted strings are case-insensitive, so the lowercase letters are
/// accepted too.
pub static HEXDIG: Lazy<Rule> = Lazy::new(|| alternatives![DIGIT, ('A', 'F'), ('a', 'f')]);

/// SP = %x20
pub const SP: char = ' ';

/// HTAB = %x09
pub const HTAB: char = '\t';

/// DQUOTE = %x22
pub const DQUOTE: char = '"';

/// VCHAR = %x21-7E ; visible (printing) characters
pub const VCHAR: (char, char) = ('!', '~');
