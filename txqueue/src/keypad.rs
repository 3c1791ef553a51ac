use bitflags::bitflags;

bitflags! {
    /// Keys currently held down.
    pub struct Keys: u8 {
        const KEY1 = 1 << 0;
        const KEY2 = 1 << 1;
        const KEY3 = 1 << 2;
        const KEY4 = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// start the greeting sequence.
    SendGreeting,
    /// set the completion event by hand, releasing a stuck sender.
    ForceCompletion,
}

/// Turns periodic key samples into actions, once per change of key state.
#[derive(Debug)]
pub struct KeyScanner {
    previous: Keys,
}

impl KeyScanner {
    pub fn new() -> Self {
        KeyScanner {
            previous: Keys::empty(),
        }
    }

    /// Feed the latest sample. Holding a key fires once; chords and releases fire nothing.
    pub fn scan(&mut self, current: Keys) -> Option<KeyAction> {
        if current == self.previous {
            return None;
        }
        self.previous = current;

        if current == Keys::KEY1 {
            Some(KeyAction::SendGreeting)
        } else if current == Keys::KEY4 {
            Some(KeyAction::ForceCompletion)
        } else {
            None
        }
    }
}

impl Default for KeyScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_key_fires_once() {
        let mut scanner = KeyScanner::new();
        assert_eq!(scanner.scan(Keys::KEY1), Some(KeyAction::SendGreeting));
        assert_eq!(scanner.scan(Keys::KEY1), None);
        assert_eq!(scanner.scan(Keys::empty()), None);
        assert_eq!(scanner.scan(Keys::KEY1), Some(KeyAction::SendGreeting));
    }

    #[test]
    fn key4_forces_completion() {
        let mut scanner = KeyScanner::new();
        assert_eq!(scanner.scan(Keys::KEY4), Some(KeyAction::ForceCompletion));
    }

    #[test]
    fn other_keys_and_chords_do_nothing() {
        let mut scanner = KeyScanner::new();
        assert_eq!(scanner.scan(Keys::KEY2), None);
        assert_eq!(scanner.scan(Keys::KEY3), None);
        assert_eq!(scanner.scan(Keys::KEY1 | Keys::KEY2), None);
        // releasing KEY2 of the chord leaves KEY1 alone, which is a new state.
        assert_eq!(scanner.scan(Keys::KEY1), Some(KeyAction::SendGreeting));
    }
}
