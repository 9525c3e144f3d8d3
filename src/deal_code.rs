//! Deal codes: a compact, shareable number for every possible deal.
//!
//! A deal is fully determined by the shuffled deck it was dealt from, so
//! we identify it by the deck permutation's rank in a mixed-radix (Lehmer)
//! numbering:
//!
//! ```text
//! code = ((p0 * 51 + p1) * 50 + p2) * 49 + ... + p51
//! ```
//!
//! where `p_i` is the position of deck card `i` among the cards not yet
//! used, in index order. Every code lies in `0..52!`, which needs ~226 bits,
//! hence `BigUint`.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use crate::card::{Card, DECK_LEN, standard_deck};
use crate::error::DealCodeError;

/// Rank of a deck permutation, printed as a decimal number.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DealCode(BigUint);

/// 52!, one more than the largest valid code.
fn deal_count() -> BigUint {
    (1u32..=DECK_LEN as u32).fold(BigUint::one(), |acc, k| acc * k)
}

impl DealCode {
    /// Compute the code of a deck in dealing order. Face state is ignored.
    pub fn from_deck(deck: &[Card]) -> Result<Self, DealCodeError> {
        if deck.len() != DECK_LEN {
            return Err(DealCodeError::InvalidDeck(format!(
                "expected {} cards, got {}",
                DECK_LEN,
                deck.len()
            )));
        }

        let mut remaining: Vec<u8> = (0..DECK_LEN as u8).collect();
        let mut code = BigUint::zero();
        for card in deck {
            let pos = remaining
                .iter()
                .position(|&i| i == card.index())
                .ok_or_else(|| DealCodeError::InvalidDeck(format!("duplicate card {card}")))?;
            code = code * BigUint::from(remaining.len()) + BigUint::from(pos);
            remaining.remove(pos);
        }
        Ok(DealCode(code))
    }

    /// Rebuild the (face-down) deck this code stands for.
    pub fn to_deck(&self) -> Result<[Card; DECK_LEN], DealCodeError> {
        let mut n = self.0.clone();
        let mut digits = [0usize; DECK_LEN];

        // Peel digits off from the least significant end: deck position i
        // has radix 52 - i.
        for i in (0..DECK_LEN).rev() {
            let radix = BigUint::from(DECK_LEN - i);
            digits[i] = (&n % &radix).to_usize().ok_or(DealCodeError::OutOfRange)?;
            n = &n / &radix;
        }
        if !n.is_zero() {
            return Err(DealCodeError::OutOfRange);
        }

        let ordered = standard_deck();
        let mut remaining: Vec<Card> = ordered.to_vec();
        let mut deck = ordered;
        for (slot, &digit) in deck.iter_mut().zip(digits.iter()) {
            *slot = remaining.remove(digit);
        }
        Ok(deck)
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }
}

impl FromStr for DealCode {
    type Err = DealCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.trim();
        if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
            return Err(DealCodeError::NotANumber(s.to_string()));
        }
        let n = BigUint::parse_bytes(cleaned.as_bytes(), 10)
            .ok_or_else(|| DealCodeError::NotANumber(s.to_string()))?;
        if n >= deal_count() {
            return Err(DealCodeError::OutOfRange);
        }
        Ok(DealCode(n))
    }
}

impl fmt::Display for DealCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
