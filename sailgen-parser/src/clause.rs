//! Per-instruction clause fragments.
//!
//! Each [`FragmentKind`] has one pattern. Matches are non-greedy and may
//! span lines; only the first match in a segment is taken. A kind that does
//! not match is simply absent.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::mnemonic::Mnemonics;

static UOP_ENUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)mapping encdec_uop\s*:\s*\w+\s*<->\s*bits\(\d+\)\s*=\s*\{.*?\}").unwrap()
});
static ENCDEC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)mapping clause encdec\s*=.*?<->.*?(?:\n|\z)").unwrap());
static EXECUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)function clause execute.*?=.*?\{.*?\}").unwrap());
static MNEMONIC_MAP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)mapping utype_mnemonic\s*:\s*\w+\s*<->\s*string\s*=\s*\{.*?\}").unwrap()
});
static ASSEMBLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)mapping clause assembly\s*=.*?<->.*?(?:\n|\z)").unwrap());

static TRAILING_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*\}").unwrap());
static LEADING_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\s*,").unwrap());

/// Category of an extracted fragment, in extraction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// `mapping encdec_uop : uop <-> bits(N) = { ... }`
    UopEnum,
    /// `mapping clause encdec = ... <-> ...` line.
    EncDec,
    /// `function clause execute ... = { ... }`
    Execute,
    /// `mapping utype_mnemonic : uop <-> string = { ... }`
    MnemonicMap,
    /// `mapping clause assembly = ... <-> ...` line.
    Assembly,
}

impl FragmentKind {
    pub const ALL: [FragmentKind; 5] = [
        FragmentKind::UopEnum,
        FragmentKind::EncDec,
        FragmentKind::Execute,
        FragmentKind::MnemonicMap,
        FragmentKind::Assembly,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            FragmentKind::UopEnum => &UOP_ENUM,
            FragmentKind::EncDec => &ENCDEC,
            FragmentKind::Execute => &EXECUTE,
            FragmentKind::MnemonicMap => &MNEMONIC_MAP,
            FragmentKind::Assembly => &ASSEMBLY,
        }
    }

    const fn strips_braces(self) -> bool {
        matches!(self, FragmentKind::UopEnum | FragmentKind::MnemonicMap)
    }

    const fn strips_commas(self) -> bool {
        matches!(self, FragmentKind::Execute)
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FragmentKind::UopEnum => "encdec_uop",
            FragmentKind::EncDec => "encdec",
            FragmentKind::Execute => "execute",
            FragmentKind::MnemonicMap => "utype_mnemonic",
            FragmentKind::Assembly => "assembly",
        };
        f.write_str(name)
    }
}

/// Cleaned clause text attributed to one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub text: String,
}

/// Extract every fragment kind that matches in `segment`, filtered for the
/// instruction `key`.
pub fn extract(segment: &str, key: &str, mnemonics: &Mnemonics) -> Vec<Fragment> {
    FragmentKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let m = kind.pattern().find(segment)?;
            Some(Fragment {
                kind,
                text: clean(kind, m.as_str(), key, mnemonics),
            })
        })
        .collect()
}

fn clean(kind: FragmentKind, raw: &str, key: &str, mnemonics: &Mnemonics) -> String {
    let filtered = mnemonics.retain_bindings(raw, key);
    let mut text: &str = filtered.trim_end();
    if kind.strips_braces() {
        text = strip_enclosing_braces(text);
    }
    if kind.strips_commas() {
        let text = TRAILING_COMMA.replace_all(text, "}");
        return LEADING_COMMA.replace_all(&text, "{").into_owned();
    }
    text.to_string()
}

/// Remove one leading `{` and one trailing `}`, trimming around them.
fn strip_enclosing_braces(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix('{').unwrap_or(text);
    let text = text.strip_suffix('}').unwrap_or(text);
    text.trim()
}
