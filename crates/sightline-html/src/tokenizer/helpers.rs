//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling ("Consume the next input character")
//! - Token emission ("Emit the current token")
//! - Character reference decoding for text and attribute values

use sightline_common::warning::warn_once;
use sightline_dom::RAW_TEXT_ELEMENTS;

use super::core::{HTMLTokenizer, TokenizerState};
use super::named_character_references::lookup_named_character_reference;
use super::token::Token;

/// Longest entity name worth scanning for.
const MAX_ENTITY_NAME_LEN: usize = 32;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// Transitions to a new state. The next character will be consumed on the
    /// next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// Transitions to a new state without consuming the current character.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Consume the next input character"
    ///
    /// Returns None if we've reached the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// "If the next few characters are..."
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// "ASCII case-insensitive match for the word 'DOCTYPE'"
    #[must_use]
    pub fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.input[self.current_pos..]
            .get(..target.len())
            .is_some_and(|s| s.eq_ignore_ascii_case(target))
    }

    /// Consume the given string from the input.
    /// Caller must have already verified the characters are present.
    pub(super) const fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }

    /// Consume everything up to `terminator`, returning the consumed text
    /// without it. When `skip_terminator` is set the terminator is consumed
    /// too. Without a terminator the rest of the input is taken.
    pub(super) fn take_until(&mut self, terminator: &str, skip_terminator: bool) -> String {
        let rest = &self.input[self.current_pos..];
        if let Some(end) = rest.find(terminator) {
            let taken = rest[..end].to_string();
            self.current_pos += end;
            if skip_terminator {
                self.current_pos += terminator.len();
            }
            taken
        } else {
            let taken = rest.to_string();
            self.current_pos = self.input.len();
            taken
        }
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// CR never reaches the tokenizer; it is normalized on input.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name
    /// matches the tag name of the last start tag to have been emitted"
    ///
    /// Called with the `<` already consumed.
    pub(super) fn is_appropriate_end_tag_ahead(&self) -> bool {
        let Some(name) = self.last_start_tag_name.as_deref() else {
            return false;
        };
        let rest = &self.input[self.current_pos..];
        let Some(after_slash) = rest.strip_prefix('/') else {
            return false;
        };
        let matches_name = after_slash
            .get(..name.len())
            .is_some_and(|s| s.eq_ignore_ascii_case(name));
        if !matches_name {
            return false;
        }
        after_slash[name.len()..]
            .chars()
            .next()
            .is_none_or(|c| Self::is_whitespace_char(c) || c == '/' || c == '>')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Emit pending character data as a single text token.
    pub(super) fn flush_text(&mut self) {
        if !self.text_buffer.is_empty() {
            let data = std::mem::take(&mut self.text_buffer);
            self.token_stream.push(Token::Text { data });
        }
    }

    /// "Emit the current token"
    pub(super) fn emit_current_token(&mut self) {
        if let Some(token) = self.current_token.take() {
            self.token_stream.push(token);
        }
    }

    /// Emit the current tag token and return to the data state, or to the
    /// RAWTEXT state after a `script`/`style` start tag.
    pub(super) fn emit_current_tag(&mut self) {
        let mut next_state = TokenizerState::Data;
        if let Some(Token::StartTag {
            name, self_closing, ..
        }) = self.current_token.as_ref()
        {
            if !*self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                next_state = TokenizerState::RawText;
            }
            self.last_start_tag_name = Some(name.clone());
        }
        self.emit_current_token();
        self.switch_to(next_state);
    }

    /// EOF in the middle of a tag: keep what was collected.
    pub(super) fn emit_current_tag_then_eof(&mut self) {
        if let Some(token) = self.current_token.as_ref() {
            warn_once("html", &format!("EOF inside tag {token}"));
        }
        self.emit_current_token();
        self.emit_eof();
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof(&mut self) {
        self.flush_text();
        self.token_stream.push(Token::EndOfFile);
        self.at_eof = true;
    }

    pub(super) fn append_to_attribute_value(&mut self, s: &str) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_current_attribute_value(s);
        }
    }
}

// =============================================================================
// Character References
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// Called with the `&` already consumed. Returns the decoded text, or a
    /// literal `&` when nothing after it forms a reference (in which case
    /// nothing more is consumed).
    pub(super) fn consume_character_reference(&mut self, in_attribute: bool) -> String {
        let rest = &self.input[self.current_pos..];

        // "U+0023 NUMBER SIGN (#)"
        if let Some(numeric) = rest.strip_prefix('#') {
            let (radix, digits_start) = match numeric.chars().next() {
                Some('x' | 'X') => (16, 2),
                _ => (10, 1),
            };
            let digits: String = rest[digits_start..]
                .chars()
                .take_while(|c| c.is_digit(radix))
                .collect();
            if digits.is_empty() {
                return "&".to_string();
            }
            self.current_pos += digits_start + digits.len();
            if self.next_few_characters_are(";") {
                self.consume_string(";");
            }
            // [§ 13.2.5.80 Numeric character reference end state]
            // "If the number is 0x00 ... or greater than 0x10FFFF ... or a
            // surrogate, set the character reference code to 0xFFFD."
            let decoded = u32::from_str_radix(&digits, radix)
                .ok()
                .filter(|&code| code != 0)
                .and_then(char::from_u32)
                .unwrap_or('\u{FFFD}');
            return decoded.to_string();
        }

        // [§ 13.2.5.73 Named character reference state]
        let name_len = rest
            .char_indices()
            .take(MAX_ENTITY_NAME_LEN)
            .take_while(|(_, c)| c.is_ascii_alphanumeric())
            .count();
        if name_len == 0 {
            return "&".to_string();
        }
        let name = &rest[..name_len];
        let followed_by = rest[name_len..].chars().next();

        if followed_by == Some(';')
            && let Some(value) = lookup_named_character_reference(&rest[..=name_len])
        {
            self.current_pos += name_len + 1;
            return value.to_string();
        }

        // "If the character reference was consumed as part of an attribute, and
        // the last character matched is not a U+003B SEMICOLON character (;), and
        // the next input character is either a U+003D EQUALS SIGN character (=)
        // or an ASCII alphanumeric, then, for historical reasons, flush code
        // points consumed as a character reference"
        if in_attribute && followed_by == Some('=') {
            return "&".to_string();
        }
        if let Some(value) = lookup_named_character_reference(name) {
            self.current_pos += name_len;
            return value.to_string();
        }
        "&".to_string()
    }
}
