use num_enum::{IntoPrimitive, TryFromPrimitive};

use std::{
    borrow::Cow,
    fmt::{self, Display},
};

use crate::error::{self, Error};

const PLACEHOLDER: &str = "%s";
const USER_ID_MIN_LENGTH: usize = 0;
const USER_ID_MAX_LENGTH: usize = 32;

/// Pattern catalog.
///
/// Character classes are spelled out in ASCII (`[0-9]`, `[A-Za-z0-9_]`) so an
/// entry behaves the same whatever the engine's Unicode defaults are. Several
/// entries are approximations (email, url) and make no claim to follow the RFCs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, Display)]
#[repr(u8)]
pub enum RegexPattern {
    EmailAddress = 0,
    DomainName = 1,
    WebUrl = 2,
    UserId = 3,
    FixedLinePhoneJp = 4,
    FixedLinePhoneWithHyphenJp = 5,
    CellPhoneJp = 6,
    CellPhoneWithHyphenJp = 7,
    Password = 8,
    Date = 9,
    DateWithHyphen = 10,
    DateWithSlash = 11,
    PostCodeJp = 12,
    Xml = 13,
    IpAddress = 14,
    IpAddressWithPort = 15,
    Numeric = 16,
    AlphanumericCharacter = 17,
    Alphabet = 18,
    AlphabetUpperCase = 19,
    AlphabetLowerCase = 20,
    FtpUrl = 21,
    JavaFile = 22,
    TextFile = 23,
}

impl RegexPattern {
    pub const ALL: [RegexPattern; 24] = [
        RegexPattern::EmailAddress,
        RegexPattern::DomainName,
        RegexPattern::WebUrl,
        RegexPattern::UserId,
        RegexPattern::FixedLinePhoneJp,
        RegexPattern::FixedLinePhoneWithHyphenJp,
        RegexPattern::CellPhoneJp,
        RegexPattern::CellPhoneWithHyphenJp,
        RegexPattern::Password,
        RegexPattern::Date,
        RegexPattern::DateWithHyphen,
        RegexPattern::DateWithSlash,
        RegexPattern::PostCodeJp,
        RegexPattern::Xml,
        RegexPattern::IpAddress,
        RegexPattern::IpAddressWithPort,
        RegexPattern::Numeric,
        RegexPattern::AlphanumericCharacter,
        RegexPattern::Alphabet,
        RegexPattern::AlphabetUpperCase,
        RegexPattern::AlphabetLowerCase,
        RegexPattern::FtpUrl,
        RegexPattern::JavaFile,
        RegexPattern::TextFile,
    ];

    pub fn all() -> impl Iterator<Item = RegexPattern> {
        RegexPattern::ALL.into_iter()
    }

    pub fn code(self) -> u8 {
        self.into()
    }

    pub fn from_code(code: u8) -> error::Result<RegexPattern> {
        RegexPattern::try_from(code)
            .map_err(|_| Error::invalid_argument(format!("unknown regex pattern code {}", code)))
    }

    /// Raw catalog text. Parameterized entries still carry their `%s` slots.
    pub fn template(self) -> &'static str {
        match self {
            RegexPattern::EmailAddress => {
                r"^[A-Za-z0-9_]+([-+.][A-Za-z0-9_]+)*@[A-Za-z0-9_]+([-.][A-Za-z0-9_]+)*\.[A-Za-z0-9_]+([-.][A-Za-z0-9_]+)*$"
            }
            RegexPattern::DomainName => r"^((?!-)[A-Za-z0-9-]{1,63}(?<!-)\.)+[A-Za-z]{2,6}$",
            RegexPattern::WebUrl => {
                r"^(http|https)://([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]+(/[A-Za-z0-9_\-./?%&=]*)?$"
            }
            RegexPattern::UserId => r"(?i)^(?=.*[a-z])[a-z0-9_.]{%s,%s}$",
            RegexPattern::FixedLinePhoneJp => r"^0[0-9][0-9]{4}[0-9]{4}$",
            RegexPattern::FixedLinePhoneWithHyphenJp => r"^0[0-9]-[0-9]{4}-[0-9]{4}$",
            RegexPattern::CellPhoneJp => r"^(070|080|090)[0-9]{4}[0-9]{4}$",
            RegexPattern::CellPhoneWithHyphenJp => r"^(070|080|090)-[0-9]{4}-[0-9]{4}$",
            RegexPattern::Password => {
                r"^((?=.*[0-9])|(?=.*[^A-Za-z0-9_]))(?![.\n])(?=.*[A-Z])(?=.*[a-z]).{8,32}$"
            }
            RegexPattern::Date => r"^[0-9]{4}(0[1-9]|1[0-2])(0[1-9]|[12][0-9]|3[01])$",
            RegexPattern::DateWithHyphen => {
                r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$"
            }
            RegexPattern::DateWithSlash => r"^[0-9]{4}/(0[1-9]|1[0-2])/(0[1-9]|[12][0-9]|3[01])$",
            RegexPattern::PostCodeJp => r"^[0-9]{3}-[0-9]{4}$",
            RegexPattern::Xml => r"^([a-zA-Z]+-?)+[a-zA-Z0-9]+\.[xX][mM][lL]$",
            RegexPattern::IpAddress => {
                r"^((25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])\.){3}(25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])$"
            }
            RegexPattern::IpAddressWithPort => {
                r"^((25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])\.){3}(25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9]):[0-9]+$"
            }
            RegexPattern::Numeric => r"^[0-9]*$",
            RegexPattern::AlphanumericCharacter => r"^[A-Za-z0-9]+$",
            RegexPattern::Alphabet => r"^[A-Za-z]+$",
            RegexPattern::AlphabetUpperCase => r"^[A-Z]+$",
            RegexPattern::AlphabetLowerCase => r"^[a-z]+$",
            // the three below are unanchored on purpose: they locate a token inside text
            RegexPattern::FtpUrl => r"ftp://[A-Za-z0-9_-]+(\.[A-Za-z0-9_-]+)*/\S*",
            RegexPattern::JavaFile => r"[A-Za-z0-9_]+\.(java|JAVA)\b",
            RegexPattern::TextFile => r"[^\s.]+\.(txt|TXT)\b",
        }
    }

    pub fn is_parameterized(self) -> bool {
        self.template().contains(PLACEHOLDER)
    }

    /// Compile-ready source. Parameterized entries get their default bounds.
    pub fn source(self) -> Cow<'static, str> {
        match self {
            RegexPattern::UserId => Cow::Owned(substitute(
                self.template(),
                USER_ID_MIN_LENGTH,
                USER_ID_MAX_LENGTH,
            )),
            _ => Cow::Borrowed(self.template()),
        }
    }

    /// Fill the `%s` slots of a parameterized entry with length bounds.
    pub fn bounded(self, min: usize, max: usize) -> error::Result<Pattern> {
        if !self.is_parameterized() {
            return Err(Error::invalid_argument(format!(
                "{} does not take length bounds",
                self
            )));
        }
        if min > max {
            return Err(Error::invalid_argument(format!(
                "minimum length {} exceeds maximum length {}",
                min, max
            )));
        }
        Ok(Pattern::new(substitute(self.template(), min, max)))
    }
}

fn substitute(template: &str, min: usize, max: usize) -> String {
    template
        .replacen(PLACEHOLDER, &min.to_string(), 1)
        .replacen(PLACEHOLDER, &max.to_string(), 1)
}

/// Source text handed to the builder: a catalog entry or a caller's own regex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    source: Cow<'static, str>,
}

impl Pattern {
    pub fn new(source: impl Into<Cow<'static, str>>) -> Pattern {
        Pattern {
            source: source.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl From<RegexPattern> for Pattern {
    fn from(pattern: RegexPattern) -> Self {
        Pattern {
            source: pattern.source(),
        }
    }
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Pattern::new(source.to_owned())
    }
}

impl From<String> for Pattern {
    fn from(source: String) -> Self {
        Pattern::new(source)
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
