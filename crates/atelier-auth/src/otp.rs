//! One-time code entry.

/// Number of digits in a signup code.
pub const DEFAULT_OTP_LENGTH: usize = 6;

/// A fixed row of single-digit slots with a focus cursor.
///
/// Typing a single digit fills the slot and moves focus right; typing or
/// pasting a complete code fills every slot at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpInput {
    slots: Vec<Option<char>>,
    focus: usize,
}

impl Default for OtpInput {
    fn default() -> Self {
        Self::new(DEFAULT_OTP_LENGTH)
    }
}

impl OtpInput {
    pub fn new(length: usize) -> Self {
        Self {
            slots: vec![None; length.max(1)],
            focus: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn focused(&self) -> usize {
        self.focus
    }

    pub fn slot(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    /// Handle a change of the slot at `index` to `value`.
    ///
    /// Non-digits are discarded. A value holding exactly a full code fills
    /// every slot; otherwise the slot keeps the first digit (or clears) and
    /// focus advances when a digit was entered.
    pub fn input(&mut self, index: usize, value: &str) {
        if index >= self.slots.len() {
            return;
        }
        let digits: Vec<char> = value.chars().filter(char::is_ascii_digit).collect();

        if digits.len() == self.slots.len() {
            self.fill(&digits);
            return;
        }

        self.slots[index] = digits.first().copied();
        if !digits.is_empty() && index + 1 < self.slots.len() {
            self.focus = index + 1;
        }
    }

    /// Handle pasted text. Applies only when the text holds a full code;
    /// returns whether it did.
    pub fn paste(&mut self, text: &str) -> bool {
        let digits: Vec<char> = text
            .trim()
            .chars()
            .filter(char::is_ascii_digit)
            .take(self.slots.len())
            .collect();
        if digits.len() != self.slots.len() {
            return false;
        }
        self.fill(&digits);
        true
    }

    /// Backspace on the slot at `index`: an empty slot hands focus back.
    pub fn backspace(&mut self, index: usize) {
        if index > 0 && index < self.slots.len() && self.slots[index].is_none() {
            self.focus = index - 1;
        }
    }

    /// Move focus explicitly (click/tab).
    pub fn focus(&mut self, index: usize) {
        if index < self.slots.len() {
            self.focus = index;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// The digits entered so far, left to right, skipping blanks.
    pub fn value(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    /// The full code, if every slot is filled.
    pub fn code(&self) -> Option<String> {
        self.is_complete().then(|| self.value())
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
        self.focus = 0;
    }

    fn fill(&mut self, digits: &[char]) {
        for (slot, digit) in self.slots.iter_mut().zip(digits) {
            *slot = Some(*digit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_advances_focus() {
        let mut otp = OtpInput::default();
        otp.input(0, "4");
        otp.input(1, "2");
        assert_eq!(otp.value(), "42");
        assert_eq!(otp.focused(), 2);
        assert!(!otp.is_complete());
    }

    #[test]
    fn test_typing_keeps_first_digit_only() {
        let mut otp = OtpInput::default();
        otp.input(0, "a79");
        assert_eq!(otp.slot(0), Some('7'));
        assert_eq!(otp.focused(), 1);

        otp.input(1, "x");
        assert_eq!(otp.slot(1), None);
        assert_eq!(otp.focused(), 1);
    }

    #[test]
    fn test_last_slot_keeps_focus() {
        let mut otp = OtpInput::default();
        otp.focus(5);
        otp.input(5, "9");
        assert_eq!(otp.focused(), 5);
    }

    #[test]
    fn test_full_code_typed_into_one_slot() {
        let mut otp = OtpInput::default();
        otp.input(3, "12-34-56");
        assert_eq!(otp.code().as_deref(), Some("123456"));
    }

    #[test]
    fn test_paste() {
        let mut otp = OtpInput::default();
        assert!(!otp.paste("12345"));
        assert!(otp.is_empty());

        assert!(otp.paste("  Your code: 987 654 (valid 5 min) "));
        assert_eq!(otp.code().as_deref(), Some("987654"));
    }

    #[test]
    fn test_backspace_moves_back_only_when_empty() {
        let mut otp = OtpInput::default();
        otp.input(0, "1");
        otp.input(1, "2");
        otp.focus(1);
        otp.backspace(1);
        assert_eq!(otp.focused(), 1);

        otp.focus(2);
        otp.backspace(2);
        assert_eq!(otp.focused(), 1);

        otp.focus(0);
        otp.input(0, "");
        otp.backspace(0);
        assert_eq!(otp.focused(), 0);
    }

    #[test]
    fn test_clear() {
        let mut otp = OtpInput::default();
        otp.paste("111111");
        otp.clear();
        assert!(otp.is_empty());
        assert_eq!(otp.code(), None);
    }
}
