// SPDX-License-Identifier: PMPL-1.0-or-later

//! Flyer cipher
//!
//! A flyer opens with a numeric line whose digit root picks the
//! organization (1-based, in sorted order). That organization's leader key
//! picks, in every content line, which word gives up its first character.
//! Header lines end in `:` or `?` and carry nothing. A line reading exactly
//! `--` ends the message.

use crate::error::DecodeError;
use std::io::BufRead;

/// Placeholder in the numeric header, worth nothing
pub const PLACEHOLDER: char = '#';

/// Line that terminates the hidden message
pub const SENTINEL: &str = "--";

/// Repeated digit sum down to a single digit, skipping placeholders
pub fn digit_root(numbers: &str) -> Result<u8, DecodeError> {
    let mut sum = digit_sum(numbers.trim())?;
    while sum >= 10 {
        sum = digit_sum(&sum.to_string())?;
    }
    Ok(sum as u8)
}

fn digit_sum(numbers: &str) -> Result<u64, DecodeError> {
    numbers
        .chars()
        .filter(|&ch| ch != PLACEHOLDER)
        .try_fold(0u64, |sum, ch| {
            ch.to_digit(10)
                .map(|digit| sum + u64::from(digit))
                .ok_or(DecodeError::InvalidDigit { ch })
        })
}

/// Header lines are skipped without contributing to the nickname
pub fn is_header(line: &str) -> bool {
    line.ends_with(':') || line.ends_with('?')
}

/// Reads one flyer: header digit first, message lines on demand
pub struct FlyerCipher<R> {
    lines: std::io::Lines<R>,
    digit: u8,
}

impl<R: BufRead> FlyerCipher<R> {
    /// Consume the numeric header line
    pub fn open(reader: R) -> Result<Self, DecodeError> {
        let mut lines = reader.lines();
        let header = lines.next().ok_or(DecodeError::MissingHeader)??;
        let digit = digit_root(&header)?;
        Ok(Self { lines, digit })
    }

    /// Digit root of the header, selecting the 1-based organization
    pub fn digit(&self) -> u8 {
        self.digit
    }

    /// Zero-based organization index for a case holding `available`
    /// organizations
    pub fn organization_index(&self, available: usize) -> Result<usize, DecodeError> {
        let digit = usize::from(self.digit);
        if digit == 0 || digit > available {
            return Err(DecodeError::OrganizationOutOfRange {
                digit: self.digit,
                available,
            });
        }
        Ok(digit - 1)
    }

    /// Pull the nickname out of the remaining lines using a 1-based word
    /// position. Lines too short for the key contribute a space.
    pub fn reveal(self, leader_key: usize) -> Result<String, DecodeError> {
        let mut nickname = String::new();

        for line in self.lines {
            let line = line?;
            if line == SENTINEL {
                return Ok(nickname);
            }
            if is_header(&line) {
                continue;
            }

            let letter = leader_key
                .checked_sub(1)
                .and_then(|position| line.split_whitespace().nth(position))
                .and_then(|word| word.chars().next())
                .unwrap_or(' ');
            nickname.push(letter);
        }

        Err(DecodeError::MissingSentinel)
    }
}
