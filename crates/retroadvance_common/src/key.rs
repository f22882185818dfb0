/// Keypad buttons, in KEYINPUT bit order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    A,
    B,
    Select,
    Start,
    Right,
    Left,
    Up,
    Down,
    R,
    L,
}

impl Key {
    pub const ALL: [Key; 10] = [
        Key::A,
        Key::B,
        Key::Select,
        Key::Start,
        Key::Right,
        Key::Left,
        Key::Up,
        Key::Down,
        Key::R,
        Key::L,
    ];

    /// Bit of this button in KEYINPUT / KEYCNT.
    #[inline]
    pub const fn mask(self) -> u16 {
        1 << self as u16
    }

    pub const fn name(self) -> &'static str {
        match self {
            Key::A => "a",
            Key::B => "b",
            Key::Select => "select",
            Key::Start => "start",
            Key::Right => "right",
            Key::Left => "left",
            Key::Up => "up",
            Key::Down => "down",
            Key::R => "r",
            Key::L => "l",
        }
    }

    /// Case-insensitive lookup by [`Key::name`].
    pub fn from_name(name: &str) -> Option<Key> {
        Key::ALL.into_iter().find(|key| key.name().eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::Key;

    #[test]
    fn masks_cover_the_ten_keyinput_bits() {
        let all = Key::ALL.iter().fold(0u16, |acc, key| acc | key.mask());
        assert_eq!(all, 0x03FF);
        assert_eq!(Key::Start.mask(), 0x0008);
        assert_eq!(Key::L.mask(), 0x0200);
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(Key::from_name("Start"), Some(Key::Start));
        assert_eq!(Key::from_name("UP"), Some(Key::Up));
        assert_eq!(Key::from_name("turbo"), None);
    }

    #[test]
    fn every_key_is_found_by_its_name() {
        for key in Key::ALL {
            assert_eq!(Key::from_name(key.name()), Some(key));
        }
    }
}
