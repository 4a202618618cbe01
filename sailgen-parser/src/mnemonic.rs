use std::borrow::Cow;

use regex::{Captures, Regex};

use crate::error::{Error, Result};
use crate::table::{ClauseKind, ClauseSet};

/// Mnemonic token patterns for one architecture prefix.
#[derive(Debug, Clone)]
pub struct Mnemonics {
    prefix: String,
    /// `<prefix>\w+`
    token: Regex,
    /// `<prefix>X <-> ...;` on a single line.
    binding: Regex,
}

impl Mnemonics {
    pub fn new(prefix: &str) -> Result<Self> {
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(Error::InvalidPrefix(prefix.to_string()));
        }
        let escaped = regex::escape(prefix);
        Ok(Self {
            prefix: prefix.to_string(),
            token: Regex::new(&format!(r"{escaped}\w+"))?,
            binding: Regex::new(&format!(r"\b({escaped}\w+)\s*<->.*?;"))?,
        })
    }

    /// Distinct mnemonic tokens in `text`, first occurrence first.
    pub fn tokens<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut seen: Vec<&'t str> = Vec::new();
        for m in self.token.find_iter(text) {
            if !seen.contains(&m.as_str()) {
                seen.push(m.as_str());
            }
        }
        seen
    }

    /// Instruction key for a token: prefix removed once, lowercased.
    pub fn normalize(&self, token: &str) -> String {
        token
            .strip_prefix(self.prefix.as_str())
            .unwrap_or(token)
            .to_lowercase()
    }

    fn mentions(&self, text: &str, token: &str) -> bool {
        self.token.find_iter(text).any(|m| m.as_str() == token)
    }

    /// Clause kinds attributed to `token` using only the top-level items of
    /// `segment` that mention it or mention no mnemonic at all.
    pub fn scoped_presence(&self, segment: &str, token: &str) -> ClauseSet {
        let mut set = ClauseSet::empty();
        for item in items(segment) {
            let counts = !self.token.is_match(item) || self.mentions(item, token);
            if !counts {
                continue;
            }
            for kind in ClauseKind::ALL {
                if item.contains(kind.marker()) {
                    set.insert(kind.flag());
                }
            }
        }
        set
    }

    /// Drop every `<mnemonic> <-> ...;` line whose mnemonic is not `key`.
    pub fn retain_bindings<'t>(&self, text: &'t str, key: &str) -> Cow<'t, str> {
        self.binding.replace_all(text, |caps: &Captures<'_>| {
            if self.normalize(&caps[1]) == key {
                caps[0].to_string()
            } else {
                String::new()
            }
        })
    }
}

/// Split text into top-level items. An item starts at every line that
/// begins in the first column with anything but whitespace or a closing
/// bracket.
pub(crate) fn items(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let opens = line
            .chars()
            .next()
            .is_some_and(|c| !c.is_whitespace() && !matches!(c, '}' | ')' | ']'));
        if opens && offset > start {
            out.push(&text[start..offset]);
            start = offset;
        }
        offset += line.len();
    }
    if offset > start {
        out.push(&text[start..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn riscv() -> Mnemonics {
        Mnemonics::new("RISCV_").unwrap()
    }

    #[test]
    fn tokens_are_distinct_in_first_seen_order() {
        let text = "RISCV_LUI <-> 0b0110111,\nRISCV_AUIPC <-> 0b0010111\nRISCV_LUI";
        assert_eq!(riscv().tokens(text), ["RISCV_LUI", "RISCV_AUIPC"]);
    }

    #[test]
    fn normalize_strips_prefix_and_lowercases() {
        let m = riscv();
        assert_eq!(m.normalize("RISCV_ADDI"), "addi");
        assert_eq!(m.normalize("RISCV_FENCE_TSO"), "fence_tso");
        assert_eq!(m.normalize("RISCV_RISCV_X"), "riscv_x");
    }

    #[test]
    fn invalid_prefix() {
        assert!(matches!(Mnemonics::new(""), Err(Error::InvalidPrefix(_))));
        assert!(matches!(Mnemonics::new("RV-"), Err(Error::InvalidPrefix(_))));
        assert!(Mnemonics::new("AARCH64_").is_ok());
    }

    #[test]
    fn retain_bindings_keeps_only_key() {
        let text = "{\n  RISCV_ADD <-> 0b000;\n  RISCV_SUB <-> 0b001;\n}";
        let kept = riscv().retain_bindings(text, "add");
        assert!(kept.contains("RISCV_ADD <-> 0b000;"));
        assert!(!kept.contains("RISCV_SUB"));
    }

    #[test]
    fn retain_bindings_needs_whole_token() {
        let text = "RISCV_ADDW <-> 1;\nRISCV_ADD <-> 2;";
        let kept = riscv().retain_bindings(text, "add");
        assert!(!kept.contains("ADDW"));
        assert!(kept.contains("RISCV_ADD <-> 2;"));
    }

    #[test]
    fn items_split_at_column_zero() {
        let text = "\nmapping x = {\n  a,\n}\n\nfunction clause execute y = {\n  b\n}\n";
        let parts = items(text);
        assert_eq!(parts.len(), 3);
        assert!(parts[1].starts_with("mapping x"));
        assert!(parts[1].ends_with("}\n\n"));
        assert!(parts[2].starts_with("function clause"));
    }

    #[test]
    fn scoped_presence_ignores_other_mnemonics() {
        let segment = "\nmapping clause encdec = RISCV_A(x) <-> x\n\
                       mapping clause assembly = RISCV_B(x) <-> \"b\"\n";
        let m = riscv();
        assert_eq!(m.scoped_presence(segment, "RISCV_A"), ClauseSet::ENCDEC);
        assert_eq!(m.scoped_presence(segment, "RISCV_B"), ClauseSet::ASSEMBLY);
    }

    #[test]
    fn scoped_presence_shares_unlabelled_items() {
        let segment = "\nmapping clause encdec = UTYPE(imm, rd, op) <-> imm @ rd\n\
                       mapping encdec_uop : uop <-> bits(7) = {\n  RISCV_LUI <-> 0b0110111\n}\n";
        assert_eq!(riscv().scoped_presence(segment, "RISCV_LUI"), ClauseSet::ENCDEC);
    }
}
