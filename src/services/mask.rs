//! Display masks for phone and CEP inputs.
//!
//! Every input event strips the raw value down to digits and rebuilds the
//! mask from scratch, so pasted or half-edited values always converge to the
//! canonical shape. Cursor position is not tracked.

use crate::domain::constants::{CEP_DIGITS, PHONE_MAX_DIGITS};
use crate::domain::models::Mask;
use serde::Deserialize;

pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// `NNNNN-NNN`. Digits past the eighth are dropped once the hyphen is due.
pub fn mask_cep(raw: &str) -> String {
    let digits = digits_only(raw);
    if digits.len() <= 5 {
        return digits;
    }
    let end = digits.len().min(CEP_DIGITS);
    format!("{}-{}", &digits[..5], &digits[5..end])
}

/// `(NN) NNNN-NNNN` up to ten digits, `(NN) NNNNN-NNNN` at eleven.
///
/// Partial numbers are masked progressively: `119` becomes `(11) 9`.
pub fn mask_phone(raw: &str) -> String {
    let mut digits = digits_only(raw);
    digits.truncate(PHONE_MAX_DIGITS);

    match digits.len() {
        0 => String::new(),
        1..=2 => format!("({}", digits),
        len => {
            let split = if len <= 10 { 6 } else { 7 };
            if len > split {
                format!("({}) {}-{}", &digits[..2], &digits[2..split], &digits[split..])
            } else {
                format!("({}) {}", &digits[..2], &digits[2..])
            }
        }
    }
}

pub fn apply(mask: Mask, raw: &str) -> String {
    match mask {
        Mask::Cep => mask_cep(raw),
        Mask::Phone => mask_phone(raw),
    }
}

/// Browser keydown as seen by the phone field.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct KeyPress {
    pub key_code: u32,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
}

const KEY_BACKSPACE: u32 = 8;
const KEY_TAB: u32 = 9;
const KEY_ENTER: u32 = 13;
const KEY_ESCAPE: u32 = 27;
const KEY_DELETE: u32 = 46;
const KEY_END: u32 = 35;
const KEY_RIGHT: u32 = 39;
const CLIPBOARD_KEYS: [u32; 4] = [65, 67, 86, 88]; // A C V X

/// Whether the phone field lets this key through. Anything that is not a
/// digit, an editing/navigation key or a clipboard shortcut is swallowed.
pub fn accepts_phone_key(key: KeyPress) -> bool {
    let code = key.key_code;
    if matches!(
        code,
        KEY_BACKSPACE | KEY_TAB | KEY_ENTER | KEY_ESCAPE | KEY_DELETE
    ) {
        return true;
    }
    if key.ctrl && CLIPBOARD_KEYS.contains(&code) {
        return true;
    }
    if (KEY_END..=KEY_RIGHT).contains(&code) {
        return true;
    }
    let top_row = (48..=57).contains(&code) && !key.shift;
    let keypad = (96..=105).contains(&code);
    top_row || keypad
}
