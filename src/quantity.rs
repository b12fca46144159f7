use alloc::string::String;
use core::fmt;
use nom::IResult;
use nom::character::complete::{alpha0, alphanumeric1, char, u64 as decimal};
use nom::combinator::{all_consuming, recognize};
use nom::multi::separated_list1;
use nom::sequence::pair;
use snafu::{Snafu, ensure};

/// Device-class names end up in node labels and annotations, so they share
/// the label length limit.
pub const MAX_NAME_LEN: usize = 63;

fn device_class_name(input: &str) -> IResult<&str, &str> {
    recognize(separated_list1(char('-'), alphanumeric1))(input)
}

/// `[A-Za-z0-9]+(-[A-Za-z0-9]+)*`, at most [`MAX_NAME_LEN`] bytes.
pub fn is_valid_device_class_name(name: &str) -> bool {
    name.len() <= MAX_NAME_LEN && all_consuming(device_class_name)(name).is_ok()
}

/// Unit letter accepted after a stripe size. Case is ignored and every unit
/// is a power of 1024, the way lvcreate reads `--stripesize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizeUnit {
    Kilo,
    Mega,
    Giga,
    Tera,
    Peta,
    Exa,
}

impl SizeUnit {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Some(match symbol.to_ascii_lowercase() {
            'k' => SizeUnit::Kilo,
            'm' => SizeUnit::Mega,
            'g' => SizeUnit::Giga,
            't' => SizeUnit::Tera,
            'p' => SizeUnit::Peta,
            'e' => SizeUnit::Exa,
            _ => return None,
        })
    }

    pub fn symbol(self) -> char {
        match self {
            SizeUnit::Kilo => 'k',
            SizeUnit::Mega => 'm',
            SizeUnit::Giga => 'g',
            SizeUnit::Tera => 't',
            SizeUnit::Peta => 'p',
            SizeUnit::Exa => 'e',
        }
    }

    pub fn multiplier(self) -> u64 {
        let shift = match self {
            SizeUnit::Kilo => 10,
            SizeUnit::Mega => 20,
            SizeUnit::Giga => 30,
            SizeUnit::Tera => 40,
            SizeUnit::Peta => 50,
            SizeUnit::Exa => 60,
        };
        1 << shift
    }
}

#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
pub enum StripeSizeError {
    #[snafu(display("expected a number with an optional unit, got {:?}", input))]
    Syntax { input: String },
    #[snafu(display("stripe size must be positive"))]
    Zero,
    #[snafu(display("unknown size unit {:?}, expected one of k, m, g, t, p, e", unit))]
    Unit { unit: String },
}

/// A parsed `stripe_size` value such as `64`, `4m` or `1G`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StripeSize {
    pub magnitude: u64,
    pub unit: Option<SizeUnit>,
}

impl StripeSize {
    pub fn parse(input: &str) -> Result<Self, StripeSizeError> {
        let (_, (magnitude, suffix)) = all_consuming(pair(decimal, alpha0))(input)
            .map_err(|_: nom::Err<nom::error::Error<&str>>| StripeSizeError::Syntax { input: input.into() })?;
        ensure!(magnitude > 0, ZeroSnafu);

        let mut letters = suffix.chars();
        let unit = match (letters.next(), letters.next()) {
            (None, _) => None,
            (Some(symbol), None) => Some(SizeUnit::from_symbol(symbol).ok_or_else(|| StripeSizeError::Unit { unit: suffix.into() })?),
            (Some(_), Some(_)) => return UnitSnafu { unit: suffix }.fail(),
        };
        Ok(Self { magnitude, unit })
    }

    /// Size in bytes. A bare number counts KiB. `None` if it does not fit in a `u64`.
    pub fn bytes(&self) -> Option<u64> {
        self.magnitude.checked_mul(self.unit.unwrap_or(SizeUnit::Kilo).multiplier())
    }
}

impl fmt::Display for StripeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Some(unit) => write!(f, "{}{}", self.magnitude, unit.symbol()),
            None => write!(f, "{}", self.magnitude),
        }
    }
}
