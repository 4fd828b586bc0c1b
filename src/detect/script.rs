// src/detect/script.rs
//! Arabic-script test. The decisive signal: any Arabic code point wins.

/// True for code points in the Arabic blocks (base, Supplement, Extended-A/B,
/// and both Presentation Forms blocks). U+FEFF, the byte-order mark at the
/// end of Presentation Forms-B, is not Arabic.
pub fn is_arabic_char(c: char) -> bool {
    matches!(
        c,
        '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{0870}'..='\u{089F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFC}'
    )
}

pub fn contains_arabic_script(text: &str) -> bool {
    text.chars().any(is_arabic_char)
}

pub fn arabic_char_count(text: &str) -> usize {
    text.chars().filter(|&c| is_arabic_char(c)).count()
}
