use bitflags::bitflags;
use itertools::Itertools;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use std::fmt::{self, Display};

use crate::error::{self, Error};

bitflags! {
    /// Combined modifier mask, one bit per [`RegexOption`].
    #[derive(Default)]
    pub struct RegexFlags: u32 {
        const UNIX_LINES              = 0x001;   // '\n' is the only line terminator
        const CASE_INSENSITIVE        = 0x002;
        const COMMENTS                = 0x004;   // whitespace and '#' comments ignored
        const MULTILINE               = 0x008;   // ^ and $ match at line boundaries
        const LITERAL                 = 0x010;   // pattern is taken verbatim
        const DOTALL                  = 0x020;   // '.' matches '\n'
        const UNICODE_CASE            = 0x040;
        const CANON_EQ                = 0x080;
        const UNICODE_CHARACTER_CLASS = 0x100;
    }
}

impl RegexFlags {
    /// Mask from raw bits, rejecting bits no option owns.
    pub fn from_raw(bits: u32) -> error::Result<RegexFlags> {
        RegexFlags::from_bits(bits).ok_or_else(|| {
            Error::invalid_argument(format!(
                "unknown regex option bits {:#x}",
                bits & !RegexFlags::all().bits()
            ))
        })
    }

    /// The catalog entries whose bits are set, in code order.
    pub fn options(&self) -> Vec<RegexOption> {
        RegexOption::ALL
            .iter()
            .copied()
            .filter(|option| self.contains(option.flag()))
            .collect()
    }

    pub fn is_literal(&self) -> bool {
        self.contains(RegexFlags::LITERAL)
    }

    // Inline group understood by the engine, e.g. "(?im)". Options without an
    // engine counterpart contribute nothing.
    pub(crate) fn inline_prefix(&self) -> String {
        let letters: String = [
            (RegexFlags::CASE_INSENSITIVE, 'i'),
            (RegexFlags::MULTILINE, 'm'),
            (RegexFlags::DOTALL, 's'),
            (RegexFlags::COMMENTS, 'x'),
        ]
        .iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, letter)| *letter)
        .collect();
        if letters.is_empty() {
            String::new()
        } else {
            format!("(?{})", letters)
        }
    }
}

/// Option catalog: one entry per modifier flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, Display)]
#[repr(u8)]
pub enum RegexOption {
    UnixLines = 0,
    CaseInsensitive = 1,
    Comments = 2,
    Multiline = 3,
    Literal = 4,
    Dotall = 5,
    UnicodeCase = 6,
    CanonEq = 7,
    UnicodeCharacterClass = 8,
}

impl RegexOption {
    pub const ALL: [RegexOption; 9] = [
        RegexOption::UnixLines,
        RegexOption::CaseInsensitive,
        RegexOption::Comments,
        RegexOption::Multiline,
        RegexOption::Literal,
        RegexOption::Dotall,
        RegexOption::UnicodeCase,
        RegexOption::CanonEq,
        RegexOption::UnicodeCharacterClass,
    ];

    pub fn code(self) -> u8 {
        self.into()
    }

    pub fn from_code(code: u8) -> error::Result<RegexOption> {
        RegexOption::try_from(code)
            .map_err(|_| Error::invalid_argument(format!("unknown regex option code {}", code)))
    }

    pub fn flag(self) -> RegexFlags {
        match self {
            RegexOption::UnixLines => RegexFlags::UNIX_LINES,
            RegexOption::CaseInsensitive => RegexFlags::CASE_INSENSITIVE,
            RegexOption::Comments => RegexFlags::COMMENTS,
            RegexOption::Multiline => RegexFlags::MULTILINE,
            RegexOption::Literal => RegexFlags::LITERAL,
            RegexOption::Dotall => RegexFlags::DOTALL,
            RegexOption::UnicodeCase => RegexFlags::UNICODE_CASE,
            RegexOption::CanonEq => RegexFlags::CANON_EQ,
            RegexOption::UnicodeCharacterClass => RegexFlags::UNICODE_CHARACTER_CLASS,
        }
    }

    pub fn bit(self) -> u32 {
        self.flag().bits()
    }
}

/// Ordered collection of options handed to the builder.
///
/// Order and duplicates carry no meaning: the only derived value is the
/// bitwise OR computed by [`OptionSet::fold`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet(Vec<RegexOption>);

impl OptionSet {
    pub fn new() -> OptionSet {
        OptionSet(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> OptionSet {
        OptionSet(Vec::with_capacity(capacity))
    }

    pub fn of<I: IntoIterator<Item = RegexOption>>(options: I) -> OptionSet {
        options.into_iter().collect()
    }

    /// Rebuild a set from a raw mask, one entry per set bit.
    pub fn from_bits(bits: u32) -> error::Result<OptionSet> {
        Ok(OptionSet(RegexFlags::from_raw(bits)?.options()))
    }

    pub fn push(&mut self, option: RegexOption) {
        self.0.push(option);
    }

    pub fn with(mut self, option: RegexOption) -> OptionSet {
        self.push(option);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RegexOption> {
        self.0.iter()
    }

    /// Fold every entry into one mask; the empty set folds to zero.
    pub fn fold(&self) -> RegexFlags {
        self.0
            .iter()
            .fold(RegexFlags::empty(), |mask, option| mask | option.flag())
    }

    pub fn bits(&self) -> u32 {
        self.fold().bits()
    }
}

impl FromIterator<RegexOption> for OptionSet {
    fn from_iter<I: IntoIterator<Item = RegexOption>>(iter: I) -> Self {
        OptionSet(iter.into_iter().collect())
    }
}

impl Extend<RegexOption> for OptionSet {
    fn extend<I: IntoIterator<Item = RegexOption>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl From<RegexOption> for OptionSet {
    fn from(option: RegexOption) -> Self {
        OptionSet(vec![option])
    }
}

impl<const N: usize> From<[RegexOption; N]> for OptionSet {
    fn from(options: [RegexOption; N]) -> Self {
        OptionSet(options.to_vec())
    }
}

impl From<Vec<RegexOption>> for OptionSet {
    fn from(options: Vec<RegexOption>) -> Self {
        OptionSet(options)
    }
}

impl<'a> IntoIterator for &'a OptionSet {
    type Item = &'a RegexOption;
    type IntoIter = std::slice::Iter<'a, RegexOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_option_codes_follow_declaration_order() {
        for (expected, option) in RegexOption::ALL.iter().enumerate() {
            assert_eq!(option.code() as usize, expected);
            assert_eq!(RegexOption::from_code(expected as u8).unwrap(), *option);
        }
        assert!(matches!(
            RegexOption::from_code(9),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_option_bits() {
        let expected: [u32; 9] = [0x001, 0x002, 0x004, 0x008, 0x010, 0x020, 0x040, 0x080, 0x100];
        for (option, bit) in RegexOption::ALL.iter().zip(expected) {
            assert_eq!(option.bit(), bit);
            assert!(option.bit().is_power_of_two());
        }
    }

    #[test]
    fn test_empty_set_folds_to_zero() {
        assert_eq!(OptionSet::new().fold(), RegexFlags::empty());
        assert_eq!(OptionSet::default().bits(), 0);
    }

    #[test]
    fn test_fold_is_bitwise_or() {
        let set = OptionSet::of([RegexOption::CaseInsensitive, RegexOption::Multiline]);
        assert_eq!(
            set.bits(),
            RegexOption::CaseInsensitive.bit() | RegexOption::Multiline.bit()
        );
    }

    #[test]
    fn test_fold_ignores_order_and_duplicates() {
        let forward = OptionSet::of([RegexOption::CaseInsensitive, RegexOption::Dotall]);
        let backward = OptionSet::new()
            .with(RegexOption::Dotall)
            .with(RegexOption::CaseInsensitive)
            .with(RegexOption::Dotall);
        assert_eq!(forward.fold(), backward.fold());
        assert_eq!(backward.len(), 3);
    }

    #[test]
    fn test_from_bits() {
        let set = OptionSet::from_bits(0x002 | 0x020).unwrap();
        assert_eq!(
            set,
            OptionSet::of([RegexOption::CaseInsensitive, RegexOption::Dotall])
        );
        assert!(matches!(
            OptionSet::from_bits(0x200),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_inline_prefix() {
        assert_eq!(RegexFlags::empty().inline_prefix(), "");
        assert_eq!(RegexFlags::UNIX_LINES.inline_prefix(), "");
        let flags = OptionSet::of([
            RegexOption::Comments,
            RegexOption::CaseInsensitive,
            RegexOption::Multiline,
        ])
        .fold();
        assert_eq!(flags.inline_prefix(), "(?imx)");
        assert!(!flags.is_literal());
        assert!(RegexOption::Literal.flag().is_literal());
    }

    #[test]
    fn test_option_set_display() {
        let set = OptionSet::of([RegexOption::CaseInsensitive, RegexOption::Multiline]);
        assert_eq!(set.to_string(), "[CaseInsensitive, Multiline]");
        assert_eq!(OptionSet::new().to_string(), "[]");
    }
}
