//! Fixed-length numeric PIN and the entry buffer it is checked against.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Number of digits in a PIN.
pub const PIN_LENGTH: usize = 4;

/// PIN shipped with a fresh install until the user configures their own.
pub const DEFAULT_PIN: [u8; PIN_LENGTH] = [1, 0, 1, 0];

/// Errors produced when parsing a PIN from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PinError {
    #[error("PIN must be exactly 4 digits, got {0} characters")]
    WrongLength(usize),

    #[error("PIN may only contain the digits 0-9")]
    NonDigit,
}

/// A validated 4-digit PIN.
///
/// Comparison runs in constant time and the digits are wiped on drop.
/// `Debug` never prints the digits.
#[derive(Clone, Zeroize, ZeroizeOnDrop, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pin {
    digits: [u8; PIN_LENGTH],
}

impl Pin {
    /// Check a full entry buffer against this PIN.
    ///
    /// A partially filled buffer never matches, so callers cannot learn
    /// anything from a prefix.
    pub fn matches(&self, entered: &PinBuffer) -> bool {
        if !entered.is_full() {
            return false;
        }
        self.digits[..].ct_eq(&entered.digits[..]).into()
    }

    /// Take a completed entry as the new PIN. `None` until all digits are in.
    pub fn from_entry(entry: &PinBuffer) -> Option<Self> {
        entry.is_full().then(|| Self {
            digits: entry.digits,
        })
    }
}

impl Default for Pin {
    fn default() -> Self {
        Self {
            digits: DEFAULT_PIN,
        }
    }
}

impl PartialEq for Pin {
    fn eq(&self, other: &Self) -> bool {
        self.digits[..].ct_eq(&other.digits[..]).into()
    }
}

impl Eq for Pin {}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

impl FromStr for Pin {
    type Err = PinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = s.chars().count();
        if count != PIN_LENGTH {
            return Err(PinError::WrongLength(count));
        }
        let mut digits = [0u8; PIN_LENGTH];
        for (slot, ch) in digits.iter_mut().zip(s.chars()) {
            let Some(value) = ch.to_digit(10) else {
                return Err(PinError::NonDigit);
            };
            *slot = value as u8;
        }
        Ok(Self { digits })
    }
}

impl TryFrom<String> for Pin {
    type Error = PinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Pin> for String {
    fn from(pin: Pin) -> Self {
        pin.digits
            .iter()
            .map(|d| char::from(b'0' + d))
            .collect()
    }
}

/// Transient buffer holding the digits typed so far.
///
/// Never grows past [`PIN_LENGTH`]. Cleared digits are zeroized.
#[derive(Clone, Default, PartialEq, Eq, Zeroize)]
pub struct PinBuffer {
    digits: [u8; PIN_LENGTH],
    len: usize,
}

impl PinBuffer {
    /// Append a digit. Returns `false` if the buffer is full or the value
    /// is not a single decimal digit.
    pub fn push(&mut self, digit: u8) -> bool {
        if digit > 9 || self.is_full() {
            return false;
        }
        self.digits[self.len] = digit;
        self.len += 1;
        true
    }

    /// Remove the last digit. Returns `false` on an empty buffer.
    pub fn pop(&mut self) -> bool {
        if self.len == 0 {
            return false;
        }
        self.len -= 1;
        self.digits[self.len] = 0;
        true
    }

    pub fn clear(&mut self) {
        self.zeroize();
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == PIN_LENGTH
    }
}

impl fmt::Debug for PinBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinBuffer").field("len", &self.len).finish()
    }
}
