//! epitaph - Fluent regular expression matching over a catalog of common patterns
//!
//! ## Usage
//!
//! ```
//! use epitaph::{Epitaph, OptionSet, RegexOption, RegexPattern};
//!
//! let mut email = Epitaph::builder()
//!     .pattern(RegexPattern::EmailAddress)
//!     .input("test@gmail.com")
//!     .build()?;
//! assert!(email.matches()?);
//!
//! let mut shout = Epitaph::builder()
//!     .pattern(RegexPattern::AlphabetLowerCase)
//!     .input("HELLO")
//!     .option(OptionSet::of([RegexOption::CaseInsensitive]))
//!     .build()?;
//! assert!(shout.find()?);
//! assert_eq!(shout.group()?, "HELLO");
//!
//! let mut dogs = Epitaph::builder()
//!     .pattern("dog")
//!     .input("zzzdogzzzdogzzz")
//!     .build()?;
//! assert_eq!(dogs.replace_first("cat")?, "zzzcatzzzdogzzz");
//! # Ok::<(), epitaph::Error>(())
//! ```
//!
//! ## Pieces
//!
//! - [`RegexPattern`]: closed catalog of pattern sources, addressed by variant
//!   or by numeric code. `UserId` takes length bounds.
//! - [`RegexOption`]: closed catalog of modifier flags, each owning one bit.
//! - [`OptionSet`]: options handed to the builder, folded into one
//!   [`RegexFlags`] mask with bitwise OR. Empty folds to 0.
//! - [`Builder`]: pattern + input + options. `build()` fails with
//!   `IllegalState` when the pattern (checked first) or the input is missing.
//! - [`Epitaph`]: stateful matcher with find / looking_at / matches /
//!   replace_first / replace_all / group.
//!
//! ## Option mapping
//!
//! ```text
//!     CaseInsensitive         (?i)
//!     Multiline               (?m)
//!     Dotall                  (?s)
//!     Comments                (?x)
//!     Literal                 pattern escaped, only (?i) survives
//!     UnixLines               no effect, '\n' is the only terminator anyway
//!     UnicodeCase             no effect, case folding is Unicode-aware
//!     CanonEq                 no effect
//!     UnicodeCharacterClass   no effect, \w \d \s are Unicode-aware
//! ```
//!
//! Matching itself is done by `fancy-regex`, which adds the look-around
//! several catalog entries rely on. An `Epitaph` is not meant to be shared
//! between threads while matching; build one per caller instead.
#[macro_use]
extern crate enum_display_derive;

mod epitaph;
mod error;
mod option;
mod pattern;

pub use epitaph::{Builder, Epitaph};
pub use error::{Error, Result, INPUT_REQUIRED, NO_MATCH_FOUND, PATTERN_REQUIRED};
pub use option::{OptionSet, RegexFlags, RegexOption};
pub use pattern::{Pattern, RegexPattern};
