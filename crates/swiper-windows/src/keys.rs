/// Named keys that are not a single letter, digit or function key.
const NAMED: &[(&[&str], u32)] = &[
    (&["ENTER", "RETURN"], 0x0D),
    (&["TAB"], 0x09),
    (&["ESCAPE", "ESC"], 0x1B),
    (&["SPACE"], 0x20),
    (&["BACKSPACE"], 0x08),
    (&["DELETE", "DEL"], 0x2E),
    (&["INSERT", "INS"], 0x2D),
    (&["HOME"], 0x24),
    (&["END"], 0x23),
    (&["PAGEUP", "PGUP"], 0x21),
    (&["PAGEDOWN", "PGDN"], 0x22),
    (&["LEFT"], 0x25),
    (&["UP"], 0x26),
    (&["RIGHT"], 0x27),
    (&["DOWN"], 0x28),
    (&["MINUS"], 0xBD),
    (&["PLUS", "EQUALS"], 0xBB),
    (&["COMMA"], 0xBC),
    (&["PERIOD", "DOT"], 0xBE),
    (&["SLASH"], 0xBF),
    (&["SEMICOLON"], 0xBA),
    (&["BACKSLASH"], 0xDC),
    (&["LBRACKET"], 0xDB),
    (&["RBRACKET"], 0xDD),
    (&["QUOTE"], 0xDE),
    (&["BACKTICK", "GRAVE"], 0xC0),
];

/// Resolves a key name from `keybindings.toml` to a virtual key code.
///
/// Accepts A-Z, 0-9, F1-F24 and the names in [`NAMED`], case-insensitively.
pub fn vk_from_name(name: &str) -> Option<u32> {
    let upper = name.trim().to_ascii_uppercase();

    if let [ch] = upper.as_bytes()
        && ch.is_ascii_alphanumeric()
    {
        // VK codes for A-Z and 0-9 equal their ASCII values.
        return Some(u32::from(*ch));
    }

    if let Some(rest) = upper.strip_prefix('F')
        && let Ok(n) = rest.parse::<u32>()
        && (1..=24).contains(&n)
    {
        return Some(0x70 + n - 1);
    }

    NAMED
        .iter()
        .find(|(names, _)| names.contains(&upper.as_str()))
        .map(|&(_, vk)| vk)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_switch_keys_resolve() {
        assert_eq!(vk_from_name("J"), Some(0x4A));
        assert_eq!(vk_from_name("k"), Some(0x4B));
    }

    #[test]
    fn digits_and_function_keys() {
        assert_eq!(vk_from_name("0"), Some(0x30));
        assert_eq!(vk_from_name("F1"), Some(0x70));
        assert_eq!(vk_from_name("f24"), Some(0x87));
        assert_eq!(vk_from_name("F25"), None);
    }

    #[test]
    fn named_keys_and_aliases() {
        assert_eq!(vk_from_name("Left"), Some(0x25));
        assert_eq!(vk_from_name("pgdn"), Some(0x22));
        assert_eq!(vk_from_name(" esc "), Some(0x1B));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(vk_from_name(""), None);
        assert_eq!(vk_from_name("Hyper"), None);
        assert_eq!(vk_from_name("!"), None);
    }
}
