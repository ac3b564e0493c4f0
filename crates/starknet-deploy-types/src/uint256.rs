//! 256-bit unsigned integers as Cairo encodes them: two 128-bit limbs.
//!
//! The low/high split is purely an encoding of the on-chain `u256`, not an approximation.

use std::fmt;

use num_bigint::BigUint;
use num_traits::{Num, ToPrimitive, Zero};
use starknet_types_core::felt::Felt;

use crate::error::Uint256Error;

/// Decimals of the Starknet fee tokens (ETH, STRK).
pub const FEE_TOKEN_DECIMALS: u32 = 18;

/// A `u256` split into `low` and `high` 128-bit limbs.
///
/// `high` is declared first so that the derived ordering compares the most significant limb
/// first.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uint256 {
    pub high: u128,
    pub low: u128,
}

fn felt_to_u128(felt: &Felt) -> Result<u128, Uint256Error> {
    let bytes = felt.to_bytes_be();
    let (upper, lower) = bytes.split_at(16);
    if upper.iter().any(|byte| *byte != 0) {
        return Err(Uint256Error::LimbOverflow(*felt));
    }
    let mut limb = [0u8; 16];
    limb.copy_from_slice(lower);
    Ok(u128::from_be_bytes(limb))
}

impl Uint256 {
    pub const ZERO: Self = Self { high: 0, low: 0 };

    #[must_use]
    pub fn from_words(low: u128, high: u128) -> Self {
        Self { high, low }
    }

    /// The calldata encoding of the value: `[low, high]`.
    #[must_use]
    pub fn to_felts(&self) -> [Felt; 2] {
        [Felt::from(self.low), Felt::from(self.high)]
    }

    /// Decodes a `u256` returned by a contract call.
    ///
    /// A single felt is read as the low limb, which is how legacy ERC20 contracts answer
    /// `balanceOf` for small balances.
    pub fn from_felts(felts: &[Felt]) -> Result<Self, Uint256Error> {
        match felts {
            [] => Err(Uint256Error::MissingLimbs),
            [low] => Ok(Self::from_words(felt_to_u128(low)?, 0)),
            [low, high] => Ok(Self::from_words(felt_to_u128(low)?, felt_to_u128(high)?)),
            _ => Err(Uint256Error::TooManyLimbs(felts.len())),
        }
    }

    #[must_use]
    pub fn to_biguint(&self) -> BigUint {
        (BigUint::from(self.high) << 128) + BigUint::from(self.low)
    }

    /// Parses a decimal token amount (e.g. `"0.25"`) into base units.
    ///
    /// The text is scaled exactly; amounts with more fractional digits than `decimals` are
    /// rejected.
    pub fn from_decimal_units(amount: &str, decimals: u32) -> Result<Self, Uint256Error> {
        let amount = amount.trim();
        let invalid = || Uint256Error::InvalidAmount(amount.to_string());

        let (integer_part, fractional_part) = match amount.split_once('.') {
            Some((integer_part, fractional_part)) => (integer_part, fractional_part),
            None => (amount, ""),
        };
        if integer_part.is_empty() && fractional_part.is_empty() {
            return Err(invalid());
        }
        if !integer_part.chars().chain(fractional_part.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let fractional_part = fractional_part.trim_end_matches('0');
        if fractional_part.len() > decimals as usize {
            return Err(Uint256Error::TooPrecise { amount: amount.to_string(), decimals });
        }

        let digits = format!("{integer_part}{fractional_part:0<width$}", width = decimals as usize);
        let digits = if digits.is_empty() { "0" } else { digits.as_str() };
        let value = BigUint::from_str_radix(digits, 10).map_err(|_| invalid())?;

        Self::try_from(&value)
    }

    /// Converts a floating-point token amount into base units.
    ///
    /// The conversion goes through the shortest decimal representation of the float, so
    /// `0.1` becomes exactly `10^17` base units for 18 decimals.
    pub fn from_f64_units(amount: f64, decimals: u32) -> Result<Self, Uint256Error> {
        if !amount.is_finite() || amount.is_sign_negative() {
            return Err(Uint256Error::InvalidAmount(amount.to_string()));
        }
        Self::from_decimal_units(&amount.to_string(), decimals)
    }

    /// Formats the value in token units, trimming trailing zeros.
    #[must_use]
    pub fn format_units(&self, decimals: u32) -> String {
        let scale = BigUint::from(10u8).pow(decimals);
        let value = self.to_biguint();
        let integer_part = &value / &scale;
        let fractional_part = &value % &scale;

        if fractional_part.is_zero() {
            return integer_part.to_string();
        }
        let fractional_digits = format!("{:0>width$}", fractional_part.to_string(), width = decimals as usize);
        format!("{integer_part}.{}", fractional_digits.trim_end_matches('0'))
    }
}

impl From<u128> for Uint256 {
    fn from(value: u128) -> Self {
        Self::from_words(value, 0)
    }
}

impl TryFrom<&BigUint> for Uint256 {
    type Error = Uint256Error;

    fn try_from(value: &BigUint) -> Result<Self, Self::Error> {
        if value.bits() > 256 {
            return Err(Uint256Error::Overflow);
        }
        let mask = BigUint::from(u128::MAX);
        let low = (value & &mask).to_u128().ok_or(Uint256Error::Overflow)?;
        let high = (value >> 128u32).to_u128().ok_or(Uint256Error::Overflow)?;
        Ok(Self::from_words(low, high))
    }
}

impl fmt::Display for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}
