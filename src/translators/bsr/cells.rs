//! Braille music cells
//!
//! Cells are Unicode braille characters (U+2800 block); dot `n` is bit
//! `n - 1` of the offset. [`to_ascii`] maps them to North American
//! braille ASCII for BRF output.

use crate::msr::{AccidentalKind, DiatonicStep, MsrPitch, MsrTime, Rational, TimeSymbol};

const fn cell(bits: u32) -> char {
    match char::from_u32(0x2800 + (bits & 0x3F)) {
        Some(c) => c,
        None => ' ',
    }
}

const fn dots(numbers: &[u8]) -> char {
    let mut bits = 0u32;
    let mut i = 0;
    while i < numbers.len() {
        bits |= 1 << (numbers[i] - 1);
        i += 1;
    }
    cell(bits)
}

pub const BLANK: char = cell(0);
pub const NUMBER_SIGN: char = dots(&[3, 4, 5, 6]);
pub const WORD_SIGN: char = dots(&[3, 4, 5]);
pub const CAPITAL_SIGN: char = dots(&[6]);
pub const LETTER_SIGN: char = dots(&[5, 6]);
pub const DOT: char = dots(&[3]);
pub const SHARP: char = dots(&[1, 4, 6]);
pub const FLAT: char = dots(&[1, 2, 6]);
pub const NATURAL: char = dots(&[1, 6]);
pub const TRIPLET: char = dots(&[2, 3]);

pub const FINAL_BAR: &str = "\u{2823}\u{2805}";
pub const SECTION_BAR: &str = "\u{2823}\u{2805}\u{2804}";
pub const FORWARD_REPEAT: &str = "\u{2823}\u{2836}";
pub const BACKWARD_REPEAT: &str = "\u{2823}\u{2806}";
pub const IN_ACCORD: &str = "\u{2823}\u{281C}";
pub const TIE: &str = "\u{2808}\u{2809}";
pub const RIGHT_HAND: &str = "\u{2828}\u{281C}";
pub const LEFT_HAND: &str = "\u{2838}\u{281C}";
pub const COMMON_TIME: &str = "\u{2828}\u{2809}";
pub const CUT_TIME: &str = "\u{2838}\u{2809}";

/// Dot patterns of the letters a to j, which the rest of the alphabet
/// and the digits derive from
const FIRST_DECADE: [u32; 10] = [0x01, 0x03, 0x09, 0x19, 0x11, 0x0B, 0x1B, 0x13, 0x0A, 0x1A];

const BRF_TABLE: &[u8; 64] = b" A1B'K2L@CIF/MSP\"E3H9O6R^DJG>NTQ,*5<-U8V.%[$+X!&;:4\\0Z7(_?W]#Y)=";

fn letter_bits(letter: char) -> Option<u32> {
    let letter = letter.to_ascii_lowercase();
    if !letter.is_ascii_lowercase() {
        return None;
    }
    let index = (letter as u8 - b'a') as usize;
    Some(match letter {
        'a'..='j' => FIRST_DECADE[index],
        'k'..='t' => FIRST_DECADE[index - 10] | 0x04,
        'w' => 0x3A,
        'u' | 'v' => FIRST_DECADE[index - 20] | 0x24,
        // x, y and z skip over w
        _ => FIRST_DECADE[index - 21] | 0x24,
    })
}

/// Braille note values come in four families; the 16th, 32nd, 64th and
/// 128th reuse the whole, half, quarter and eighth cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueClass {
    Whole,
    Half,
    Quarter,
    Eighth,
}

impl ValueClass {
    pub fn of(display_whole_notes: Rational) -> Option<Self> {
        let (numer, denom) = (*display_whole_notes.numer(), *display_whole_notes.denom());
        if numer != 1 {
            return None;
        }
        match denom {
            1 | 16 => Some(ValueClass::Whole),
            2 | 32 => Some(ValueClass::Half),
            4 | 64 => Some(ValueClass::Quarter),
            8 | 128 => Some(ValueClass::Eighth),
            _ => None,
        }
    }

    fn bits(&self) -> u32 {
        match self {
            ValueClass::Eighth => 0,
            ValueClass::Quarter => 0x20,
            ValueClass::Half => 0x04,
            ValueClass::Whole => 0x24,
        }
    }
}

pub fn note_cell(step: DiatonicStep, class: ValueClass) -> char {
    // the eighth-note cells are the letters d to j
    let base = FIRST_DECADE[3 + step.index() as usize];
    cell(base | class.bits())
}

pub fn rest_cell(class: ValueClass) -> char {
    match class {
        ValueClass::Whole => dots(&[1, 3, 4]),
        ValueClass::Half => dots(&[1, 3, 6]),
        ValueClass::Quarter => dots(&[1, 2, 3, 6]),
        ValueClass::Eighth => dots(&[1, 3, 4, 6]),
    }
}

/// Octave mark; octaves below 1 and above 7 double the outer marks
pub fn octave_mark(octave: i8) -> String {
    match octave {
        i8::MIN..=0 => "\u{2808}\u{2808}".to_string(),
        1 => "\u{2808}".to_string(),
        2 => "\u{2818}".to_string(),
        3 => "\u{2838}".to_string(),
        4 => "\u{2810}".to_string(),
        5 => "\u{2828}".to_string(),
        6 => "\u{2830}".to_string(),
        7 => "\u{2820}".to_string(),
        _ => "\u{2820}\u{2820}".to_string(),
    }
}

/// Whether `current` needs an octave mark after `previous`.
/// `None` means the note opens a line or follows an in-accord sign.
pub fn needs_octave_mark(previous: Option<&MsrPitch>, current: &MsrPitch) -> bool {
    let previous = match previous {
        Some(previous) => previous,
        None => return true,
    };
    let degrees = (current.diatonic_number() - previous.diatonic_number()).abs() + 1;
    match degrees {
        1..=3 => false,
        4 | 5 => current.octave != previous.octave,
        _ => true,
    }
}

pub fn accidental_cells(kind: AccidentalKind) -> String {
    match kind {
        AccidentalKind::Sharp | AccidentalKind::QuarterSharp | AccidentalKind::ThreeQuartersSharp => {
            SHARP.to_string()
        }
        AccidentalKind::Flat | AccidentalKind::QuarterFlat | AccidentalKind::ThreeQuartersFlat => {
            FLAT.to_string()
        }
        AccidentalKind::Natural => NATURAL.to_string(),
        AccidentalKind::DoubleSharp | AccidentalKind::SharpSharp => [SHARP, SHARP].iter().collect(),
        AccidentalKind::FlatFlat => [FLAT, FLAT].iter().collect(),
        AccidentalKind::NaturalSharp => [NATURAL, SHARP].iter().collect(),
        AccidentalKind::NaturalFlat => [NATURAL, FLAT].iter().collect(),
    }
}

/// Interval sign for a distance in degrees (2 = second, 8 = octave);
/// wider intervals reduce to their simple form
pub fn interval_cell(degrees: i32) -> Option<char> {
    if degrees < 2 {
        return None;
    }
    let simple = (degrees - 2) % 7 + 2;
    Some(match simple {
        2 => dots(&[3, 4]),
        3 => dots(&[3, 4, 6]),
        4 => dots(&[3, 4, 5, 6]),
        5 => dots(&[3, 5]),
        6 => dots(&[3, 5, 6]),
        7 => dots(&[2, 5]),
        _ => dots(&[3, 6]),
    })
}

fn upper_digit(digit: u32) -> char {
    // 1..9 are a..i, 0 is j
    cell(FIRST_DECADE[((digit + 9) % 10) as usize])
}

fn lower_digit(digit: u32) -> char {
    cell(FIRST_DECADE[((digit + 9) % 10) as usize] << 1)
}

/// Number sign followed by the digits in the upper part of the cell
pub fn upper_number(value: u32) -> String {
    let mut result = String::new();
    result.push(NUMBER_SIGN);
    result.extend(value.to_string().chars().filter_map(|c| c.to_digit(10)).map(upper_digit));
    result
}

pub fn lower_number(value: u32) -> String {
    value.to_string().chars().filter_map(|c| c.to_digit(10)).map(lower_digit).collect()
}

/// Up to three sharps or flats are repeated, more are counted
pub fn key_signature(fifths: i8) -> String {
    let sign = if fifths > 0 { SHARP } else { FLAT };
    let count = fifths.unsigned_abs() as u32;
    match count {
        0 => String::new(),
        1..=3 => std::iter::repeat(sign).take(count as usize).collect(),
        _ => {
            let mut result = upper_number(count);
            result.push(sign);
            result
        }
    }
}

pub fn time_signature(time: &MsrTime) -> String {
    match time.symbol {
        Some(TimeSymbol::Common) => return COMMON_TIME.to_string(),
        Some(TimeSymbol::Cut) => return CUT_TIME.to_string(),
        _ => {}
    }
    let mut result = String::new();
    result.push(NUMBER_SIGN);
    for c in time.beats.chars() {
        match c.to_digit(10) {
            Some(digit) => result.push(upper_digit(digit)),
            None if c == '+' => result.push(dots(&[2, 3, 5])),
            None => {}
        }
    }
    result.push_str(&lower_number(time.beat_type as u32));
    result
}

/// Word sign followed by the dynamic's letters
pub fn dynamics_cells(letters: &str) -> String {
    let mut result = String::new();
    result.push(WORD_SIGN);
    result.extend(letters.chars().filter_map(letter_bits).map(cell));
    result
}

/// Grade 1 literary braille for headings and part names
pub fn literary_text(text: &str) -> String {
    let mut result = String::new();
    let mut in_number = false;
    for c in text.chars() {
        if let Some(digit) = c.to_digit(10) {
            if !in_number {
                result.push(NUMBER_SIGN);
                in_number = true;
            }
            result.push(upper_digit(digit));
            continue;
        }
        if let Some(bits) = letter_bits(c) {
            if in_number && ('a'..='j').contains(&c.to_ascii_lowercase()) {
                result.push(LETTER_SIGN);
            }
            in_number = false;
            if c.is_ascii_uppercase() {
                result.push(CAPITAL_SIGN);
            }
            result.push(cell(bits));
            continue;
        }
        in_number = false;
        match c {
            ' ' => result.push(BLANK),
            ',' => result.push(dots(&[2])),
            ';' => result.push(dots(&[2, 3])),
            ':' => result.push(dots(&[2, 5])),
            '.' => result.push(dots(&[2, 5, 6])),
            '!' => result.push(dots(&[2, 3, 5])),
            '?' => result.push(dots(&[2, 3, 6])),
            '\'' => result.push(dots(&[3])),
            '-' => result.push(dots(&[3, 6])),
            _ => log::debug!("no literary braille for '{}', dropped", c),
        }
    }
    result
}

/// Map braille cells to braille ASCII, leaving other characters alone
pub fn to_ascii(braille: &str) -> String {
    braille
        .chars()
        .map(|c| match c as u32 {
            code @ 0x2800..=0x283F => BRF_TABLE[(code - 0x2800) as usize] as char,
            _ => c,
        })
        .collect()
}

/// Number of braille cells in `text`
pub fn cell_count(text: &str) -> usize {
    text.chars().filter(|c| ('\u{2800}'..='\u{28FF}').contains(c)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msr::Alteration;

    fn pitch(step: DiatonicStep, octave: i8) -> MsrPitch {
        MsrPitch::new(step, Alteration::Natural, octave)
    }

    #[test]
    fn test_note_cells() {
        assert_eq!(note_cell(DiatonicStep::C, ValueClass::Eighth), '⠙');
        assert_eq!(note_cell(DiatonicStep::C, ValueClass::Quarter), '⠹');
        assert_eq!(note_cell(DiatonicStep::C, ValueClass::Half), '⠝');
        assert_eq!(note_cell(DiatonicStep::C, ValueClass::Whole), '⠽');
        assert_eq!(note_cell(DiatonicStep::D, ValueClass::Quarter), '⠱');
        assert_eq!(note_cell(DiatonicStep::G, ValueClass::Quarter), '⠳');
        assert_eq!(rest_cell(ValueClass::Quarter), '⠧');
    }

    #[test]
    fn test_value_classes() {
        assert_eq!(ValueClass::of(Rational::new(1, 16)), Some(ValueClass::Whole));
        assert_eq!(ValueClass::of(Rational::new(1, 4)), Some(ValueClass::Quarter));
        assert_eq!(ValueClass::of(Rational::new(3, 8)), None);
        assert_eq!(ValueClass::of(Rational::from_integer(2)), None);
    }

    #[test]
    fn test_octave_mark_rule() {
        let c4 = pitch(DiatonicStep::C, 4);
        assert!(needs_octave_mark(None, &c4));
        assert!(!needs_octave_mark(Some(&c4), &pitch(DiatonicStep::E, 4)));
        // fourth in the same octave, then across octaves
        assert!(!needs_octave_mark(Some(&c4), &pitch(DiatonicStep::F, 4)));
        assert!(needs_octave_mark(Some(&pitch(DiatonicStep::A, 4)), &pitch(DiatonicStep::D, 5)));
        // third across the octave line needs nothing
        assert!(!needs_octave_mark(Some(&pitch(DiatonicStep::B, 4)), &pitch(DiatonicStep::D, 5)));
        assert!(needs_octave_mark(Some(&c4), &pitch(DiatonicStep::A, 4)));
        assert_eq!(octave_mark(4), "⠐");
        assert_eq!(octave_mark(5), "⠨");
    }

    #[test]
    fn test_signatures() {
        assert_eq!(key_signature(2), "⠩⠩");
        assert_eq!(key_signature(-1), "⠣");
        assert_eq!(key_signature(4), "⠼⠙⠩");
        assert_eq!(key_signature(0), "");
        assert_eq!(time_signature(&MsrTime::new(3, 4)), "⠼⠉⠲");
        assert_eq!(time_signature(&MsrTime::new(6, 8)), "⠼⠋⠦");
    }

    #[test]
    fn test_intervals() {
        assert_eq!(interval_cell(3), Some('⠬'));
        assert_eq!(interval_cell(5), Some('⠔'));
        assert_eq!(interval_cell(10), Some('⠬'));
        assert_eq!(interval_cell(1), None);
    }

    #[test]
    fn test_text_and_dynamics() {
        assert_eq!(dynamics_cells("pf"), "⠜⠏⠋");
        assert_eq!(literary_text("Op 2"), "⠠⠕⠏⠀⠼⠃");
        assert_eq!(literary_text("w"), "⠺");
        assert_eq!(literary_text("z"), "⠵");
    }

    #[test]
    fn test_ascii_braille() {
        assert_eq!(to_ascii("⠼⠉⠲"), "#C4");
        assert_eq!(to_ascii("⠣⠅\n"), "<K\n");
        assert_eq!(to_ascii("⠀"), " ");
        assert_eq!(cell_count("⠼⠉ x"), 2);
    }
}
