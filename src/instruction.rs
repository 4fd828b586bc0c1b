// src/instruction.rs
//! Directive handed verbatim to the downstream response generator.

use crate::language::LanguageCode;

/// One fixed sentence per code, naming the language to answer in.
pub fn system_language_instruction(code: LanguageCode) -> &'static str {
    match code {
        LanguageCode::Ar => {
            "Reply only in Arabic, written in Arabic script, matching the customer's tone."
        }
        LanguageCode::En => "Reply only in English, in a clear and friendly tone.",
        LanguageCode::Fr => {
            "Réponds uniquement en français, sur un ton clair et chaleureux (reply only in French)."
        }
        LanguageCode::Franco => {
            "Reply only in Lebanese Arabic written with Latin letters (Franco-Arabic / Arabizi), \
             using digits like 2, 3 and 7 for Arabic sounds exactly as the customer does. \
             Do not switch to Arabic script."
        }
    }
}

/// Same as [`system_language_instruction`] for callers holding a string code.
pub fn instruction_for_code(code: &str) -> Option<&'static str> {
    code.parse::<LanguageCode>()
        .ok()
        .map(system_language_instruction)
}
