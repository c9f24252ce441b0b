//! Symbol vocabulary and its bijective symbol <-> id mapping.
//!
//! A [`SymbolTable`] is an ordered set of unique `char` symbols. The symbol at
//! position `i` has id `i`; every id in `[0, len)` is assigned exactly once.
//!
//! Tables come from three places:
//! - [`SymbolTable::default`]: the built-in pad + punctuation + Latin + IPA set
//! - [`SymbolTable::new`]: any externally supplied ordered list
//! - [`SymbolTable::from_tokens`]: a `tokens.txt` file ("TOKEN ID" per line)

use std::collections::HashMap;
use std::path::Path;

use crate::error::{TextfrontError, TextfrontResult};

/// Padding symbol, always id 0 in the default table.
pub const PAD: char = '_';

const PUNCTUATION: &str = ";:,.!?¡¿—…\"«»“” ";
const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const LETTERS_IPA: &str = "ɑɐɒæɓʙβɔɕçɗɖðʤəɘɚɛɜɝɞɟʄɡɠɢʛɦɧħɥʜɨɪʝɭɬɫɮʟɱɯɰŋɳɲɴøɵɸθœɶʘɹɺɾɻʀʁɽʂʃʈʧʉʊʋⱱʌɣɤʍχʎʏʑʐʒʔʡʕʢǀǁǂǃˈˌːˑʼʴʰʱʲʷˠˤ˞↓↑→↗↘'\u{0329}ᵻ";

/// Ordered, duplicate-free symbol vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: Vec<char>,
    ids: HashMap<char, usize>,
}

impl SymbolTable {
    /// Build a table from an ordered list of symbols.
    ///
    /// Fails if the list is empty or contains the same symbol twice.
    pub fn new(symbols: impl IntoIterator<Item = char>) -> TextfrontResult<Self> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Err(TextfrontError::config("symbol table is empty"));
        }

        let mut ids = HashMap::with_capacity(symbols.len());
        for (id, &symbol) in symbols.iter().enumerate() {
            if let Some(previous) = ids.insert(symbol, id) {
                return Err(TextfrontError::config(format!(
                    "duplicate symbol {:?} at ids {} and {}",
                    symbol, previous, id
                )));
            }
        }

        Ok(Self { symbols, ids })
    }

    /// Parse a `tokens.txt` vocabulary.
    ///
    /// Format: each non-empty line is `TOKEN ID`, separated by whitespace. A
    /// line consisting of a space followed by the id (`"  3"`) maps the space
    /// symbol. Tokens must be single characters and the ids must cover
    /// `[0, N)` exactly once.
    pub fn from_tokens(tokens_content: &str) -> TextfrontResult<Self> {
        let mut slots: Vec<Option<char>> = Vec::new();

        for (line_no, raw) in tokens_content.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let (token, id) = line.rsplit_once(char::is_whitespace).ok_or_else(|| {
                TextfrontError::config(format!(
                    "tokens line {}: expected 'TOKEN ID', got {:?}",
                    line_no + 1,
                    line
                ))
            })?;

            let id: usize = id.parse().map_err(|_| {
                TextfrontError::config(format!(
                    "tokens line {}: invalid id {:?}",
                    line_no + 1,
                    id
                ))
            })?;

            let mut chars = token.chars();
            let symbol = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(TextfrontError::config(format!(
                        "tokens line {}: token {:?} is not a single character",
                        line_no + 1,
                        token
                    )))
                }
            };

            if slots.len() <= id {
                slots.resize(id + 1, None);
            }
            if let Some(existing) = slots[id] {
                return Err(TextfrontError::config(format!(
                    "tokens line {}: id {} already assigned to {:?}",
                    line_no + 1,
                    id,
                    existing
                )));
            }
            slots[id] = Some(symbol);
        }

        let mut symbols = Vec::with_capacity(slots.len());
        for (id, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(symbol) => symbols.push(symbol),
                None => {
                    return Err(TextfrontError::config(format!(
                        "tokens file leaves id {} unassigned",
                        id
                    )))
                }
            }
        }

        Self::new(symbols)
    }

    /// Load a `tokens.txt` vocabulary from disk.
    pub fn from_tokens_file(path: impl AsRef<Path>) -> TextfrontResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TextfrontError::config(format!(
                "Failed to read tokens file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_tokens(&content)
    }

    /// Id of `symbol`, if it is part of the table.
    pub fn symbol_to_id(&self, symbol: char) -> Option<usize> {
        self.ids.get(&symbol).copied()
    }

    /// Symbol with id `id`, if the id is in range.
    pub fn id_to_symbol(&self, id: usize) -> Option<char> {
        self.symbols.get(id).copied()
    }

    /// Whether `symbol` is part of the table.
    pub fn contains(&self, symbol: char) -> bool {
        self.ids.contains_key(&symbol)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a constructed table; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in id order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

impl Default for SymbolTable {
    /// Pad, punctuation (including space), Latin letters and IPA letters.
    fn default() -> Self {
        let mut symbols = Vec::new();
        let mut ids = HashMap::new();
        let all = std::iter::once(PAD)
            .chain(PUNCTUATION.chars())
            .chain(LETTERS.chars())
            .chain(LETTERS_IPA.chars());
        for symbol in all {
            if !ids.contains_key(&symbol) {
                ids.insert(symbol, symbols.len());
                symbols.push(symbol);
            }
        }
        Self { symbols, ids }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_bijective() {
        let table = SymbolTable::default();
        assert_eq!(table.id_to_symbol(0), Some(PAD));
        for (id, &symbol) in table.symbols().iter().enumerate() {
            assert_eq!(table.symbol_to_id(symbol), Some(id));
        }
        assert_eq!(table.ids.len(), table.len());
    }

    #[test]
    fn test_default_table_covers_ipa_and_space() {
        let table = SymbolTable::default();
        for c in "həlˈoʊ wˈɜːld, dʒ tʃ ə ɪ".chars() {
            assert!(table.contains(c), "missing {:?}", c);
        }
        assert!(!table.contains('#'));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let err = SymbolTable::new("abca".chars()).unwrap_err();
        assert!(matches!(err, TextfrontError::Config(_)));
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(SymbolTable::new(std::iter::empty()).is_err());
    }

    #[test]
    fn test_from_tokens() {
        let table = SymbolTable::from_tokens("$ 0\n; 1\n  2\na 3\nb 4\n").unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(table.symbol_to_id('$'), Some(0));
        assert_eq!(table.symbol_to_id(';'), Some(1));
        assert_eq!(table.symbol_to_id(' '), Some(2));
        assert_eq!(table.symbol_to_id('b'), Some(4));
    }

    #[test]
    fn test_from_tokens_out_of_order_lines() {
        let table = SymbolTable::from_tokens("b 1\na 0\r\n").unwrap();
        assert_eq!(table.symbols(), &['a', 'b']);
    }

    #[test]
    fn test_from_tokens_rejects_gap() {
        let err = SymbolTable::from_tokens("a 0\nb 2\n").unwrap_err();
        assert!(err.to_string().contains("id 1 unassigned"));
    }

    #[test]
    fn test_from_tokens_rejects_multichar_token() {
        assert!(SymbolTable::from_tokens("ab 0\n").is_err());
    }

    #[test]
    fn test_from_tokens_rejects_reused_id() {
        assert!(SymbolTable::from_tokens("a 0\nb 0\n").is_err());
    }
}
