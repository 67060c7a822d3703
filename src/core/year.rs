//! Spelled-out year normalization.
//!
//! Accepts plain digit strings, standard English cardinals
//! ("one thousand nine hundred ninety five") and the spoken year form
//! ("nineteen ninety five", "nineteen oh five", "twenty twenty").

use crate::domain::model::Value;
use crate::utils::error::ConversionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Word {
    A,
    Zero,
    Oh,
    Unit(u64),
    Teen(u64),
    Tens(u64),
    Hundred,
    Scale(u64),
}

fn lookup_word(word: &str) -> Option<Word> {
    let parsed = match word {
        "a" => Word::A,
        "zero" => Word::Zero,
        "oh" | "o" => Word::Oh,
        "one" => Word::Unit(1),
        "two" => Word::Unit(2),
        "three" => Word::Unit(3),
        "four" => Word::Unit(4),
        "five" => Word::Unit(5),
        "six" => Word::Unit(6),
        "seven" => Word::Unit(7),
        "eight" => Word::Unit(8),
        "nine" => Word::Unit(9),
        "ten" => Word::Teen(10),
        "eleven" => Word::Teen(11),
        "twelve" => Word::Teen(12),
        "thirteen" => Word::Teen(13),
        "fourteen" => Word::Teen(14),
        "fifteen" => Word::Teen(15),
        "sixteen" => Word::Teen(16),
        "seventeen" => Word::Teen(17),
        "eighteen" => Word::Teen(18),
        "nineteen" => Word::Teen(19),
        "twenty" => Word::Tens(20),
        "thirty" => Word::Tens(30),
        "forty" => Word::Tens(40),
        "fifty" => Word::Tens(50),
        "sixty" => Word::Tens(60),
        "seventy" => Word::Tens(70),
        "eighty" => Word::Tens(80),
        "ninety" => Word::Tens(90),
        "hundred" => Word::Hundred,
        "thousand" => Word::Scale(1_000),
        "million" => Word::Scale(1_000_000),
        "billion" => Word::Scale(1_000_000_000),
        _ => return None,
    };
    Some(parsed)
}

/// Splits on whitespace, hyphens and commas and drops "and". Any unknown
/// word rejects the whole phrase.
fn tokenize(text: &str) -> Option<Vec<Word>> {
    text.split(|c: char| c.is_whitespace() || c == '-' || c == ',')
        .filter(|w| !w.is_empty() && *w != "and")
        .map(lookup_word)
        .collect()
}

struct Cursor<'a> {
    words: &'a [Word],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(words: &'a [Word]) -> Self {
        Self { words, pos: 0 }
    }

    fn peek(&self) -> Option<Word> {
        self.words.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn is_done(&self) -> bool {
        self.pos >= self.words.len()
    }

    /// 1..=99: a unit, a teen, or a tens word with an optional unit.
    fn two_digit(&mut self) -> Option<u64> {
        match self.peek()? {
            Word::Unit(n) | Word::Teen(n) => {
                self.bump();
                Some(n)
            }
            Word::Tens(tens) => {
                self.bump();
                if let Some(Word::Unit(unit)) = self.peek() {
                    self.bump();
                    Some(tens + unit)
                } else {
                    Some(tens)
                }
            }
            _ => None,
        }
    }

    /// `two_digit [hundred [two_digit]]`, so "nineteen hundred eighty four" is
    /// one group. A bare or "a"-led "hundred"/"thousand" counts as one.
    fn group(&mut self) -> Option<u64> {
        let lead = match self.peek()? {
            Word::Hundred | Word::Scale(_) => 1,
            Word::A => {
                self.bump();
                match self.peek()? {
                    Word::Hundred | Word::Scale(_) => 1,
                    _ => return None,
                }
            }
            _ => self.two_digit()?,
        };
        if self.peek() != Some(Word::Hundred) {
            return Some(lead);
        }
        self.bump();
        let rest = match self.peek() {
            Some(Word::Unit(_) | Word::Teen(_) | Word::Tens(_)) => self.two_digit()?,
            _ => 0,
        };
        Some(lead * 100 + rest)
    }
}

fn parse_cardinal(words: &[Word]) -> Option<u64> {
    if let [Word::Zero] = words {
        return Some(0);
    }

    let mut cursor = Cursor::new(words);
    let mut total = 0;
    let mut last_scale = u64::MAX;

    while !cursor.is_done() {
        let group = cursor.group()?;
        match cursor.peek() {
            Some(Word::Scale(scale)) if scale < last_scale => {
                cursor.bump();
                total += group * scale;
                last_scale = scale;
            }
            None => total += group,
            _ => return None,
        }
    }

    Some(total)
}

/// Spoken year form: a 10..=99 lead followed by "hundred", "oh <unit>" or a
/// 10..=99 tail.
fn parse_year_pair(words: &[Word]) -> Option<u64> {
    let mut cursor = Cursor::new(words);

    let century = match cursor.peek()? {
        Word::Teen(_) | Word::Tens(_) => cursor.two_digit()?,
        _ => return None,
    };

    let rest = match cursor.peek()? {
        Word::Hundred => {
            cursor.bump();
            0
        }
        Word::Oh | Word::Zero => {
            cursor.bump();
            match cursor.peek()? {
                Word::Unit(unit) => {
                    cursor.bump();
                    unit
                }
                _ => return None,
            }
        }
        Word::Teen(_) | Word::Tens(_) => cursor.two_digit()?,
        _ => return None,
    };

    cursor.is_done().then_some(century * 100 + rest)
}

/// Parses a year written in digits or in English words.
pub fn parse_year(text: &str) -> Result<i64, ConversionError> {
    let normalized = text.trim().to_lowercase();

    if !normalized.is_empty() && normalized.chars().all(|c| c.is_ascii_digit()) {
        return normalized
            .parse::<i64>()
            .map_err(|_| ConversionError::overflow(text));
    }

    let words = tokenize(&normalized)
        .filter(|words| !words.is_empty())
        .ok_or_else(|| ConversionError::not_a_number(text))?;

    let value = parse_cardinal(&words)
        .or_else(|| parse_year_pair(&words))
        .ok_or_else(|| ConversionError::not_a_number(text))?;

    i64::try_from(value).map_err(|_| ConversionError::overflow(text))
}

/// Text cells are parsed into an integer year, everything else passes
/// through untouched. Failures become `Value::Missing`.
pub fn normalize_year(value: &Value) -> Value {
    let Value::Text(text) = value else {
        return value.clone();
    };

    match parse_year(text) {
        Ok(year) => Value::Integer(year),
        Err(ConversionError::NotANumber { .. }) => Value::Missing,
        Err(e) => {
            tracing::warn!("⚠️ Unexpected error converting '{}': {}", text, e);
            Value::Missing
        }
    }
}
