//! Duration helpers
//!
//! Durations are exact fractions of a whole note. These helpers compute
//! common bases for them and map notated values to note type names.

use crate::msr::Rational;

/// Greatest common divisor
pub fn gcd(a: i32, b: i32) -> i32 {
    if b == 0 {
        a.abs()
    } else {
        gcd(b, a % b)
    }
}

/// Least common multiple, `None` when it does not fit in an `i32`
pub fn lcm(a: i32, b: i32) -> Option<i32> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b).and_then(i32::checked_abs)
}

fn non_negative(value: Rational) -> Rational {
    if value < Rational::from_integer(0) {
        -value
    } else {
        value
    }
}

/// Largest rational dividing both arguments an integer number of times,
/// `None` on overflow.
///
/// For reduced fractions this is gcd(numerators) / lcm(denominators).
pub fn rational_gcd(a: Rational, b: Rational) -> Option<Rational> {
    if *a.numer() == 0 {
        return Some(non_negative(b));
    }
    if *b.numer() == 0 {
        return Some(non_negative(a));
    }
    let denom = lcm(*a.denom(), *b.denom())?;
    Some(Rational::new(gcd(*a.numer(), *b.numer()), denom))
}

/// Note values from the longest (maxima) down, as (whole notes, MusicXML type)
const NOTE_TYPES: [(i32, i32, &str); 14] = [
    (8, 1, "maxima"),
    (4, 1, "long"),
    (2, 1, "breve"),
    (1, 1, "whole"),
    (1, 2, "half"),
    (1, 4, "quarter"),
    (1, 8, "eighth"),
    (1, 16, "16th"),
    (1, 32, "32nd"),
    (1, 64, "64th"),
    (1, 128, "128th"),
    (1, 256, "256th"),
    (1, 512, "512th"),
    (1, 1024, "1024th"),
];

/// MusicXML `<type>` name of an undotted notated value
pub fn note_type_name(display_whole_notes: Rational) -> Option<&'static str> {
    NOTE_TYPES
        .iter()
        .find(|(numer, denom, _)| Rational::new(*numer, *denom) == display_whole_notes)
        .map(|(_, _, name)| *name)
}

/// Notated value of a MusicXML type name
pub fn note_type_value(name: &str) -> Option<Rational> {
    NOTE_TYPES
        .iter()
        .find(|(_, _, type_name)| *type_name == name)
        .map(|(numer, denom, _)| Rational::new(*numer, *denom))
}

/// Whether a value is a power of two fraction of a whole note (1/1 ... 1/1024)
pub fn is_simple_value(value: Rational) -> bool {
    *value.numer() == 1 && (*value.denom() as u32).is_power_of_two() && *value.denom() <= 1024
}

/// Split a duration into an undotted value and its dot count, for rests and
/// fillers that only know their sounding length
pub fn value_and_dots(duration: Rational) -> Option<(Rational, u8)> {
    for (numer, denom, _) in NOTE_TYPES.iter() {
        let value = Rational::new(*numer, *denom);
        let mut total = value;
        let mut addition = value;
        for dots in 0..=3u8 {
            if total == duration {
                return Some((value, dots));
            }
            addition = addition / 2;
            total += addition;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(12, 8), 4);
        assert_eq!(gcd(17, 5), 1);
        assert_eq!(lcm(4, 6), Some(12));
        assert_eq!(lcm(3, 0), Some(0));
        assert_eq!(lcm(65_536, 65_535), None);
    }

    #[test]
    fn test_rational_gcd() {
        assert_eq!(
            rational_gcd(Rational::new(1, 4), Rational::new(1, 6)),
            Some(Rational::new(1, 12))
        );
        assert_eq!(
            rational_gcd(Rational::new(3, 8), Rational::new(1, 4)),
            Some(Rational::new(1, 8))
        );
        assert_eq!(
            rational_gcd(Rational::from_integer(0), Rational::new(-1, 16)),
            Some(Rational::new(1, 16))
        );
        assert_eq!(rational_gcd(Rational::new(1, 65_536), Rational::new(1, 65_535)), None);
    }

    #[test]
    fn test_note_type_names() {
        assert_eq!(note_type_name(Rational::new(1, 4)), Some("quarter"));
        assert_eq!(note_type_name(Rational::new(1, 16)), Some("16th"));
        assert_eq!(note_type_name(Rational::from_integer(2)), Some("breve"));
        assert_eq!(note_type_name(Rational::new(3, 8)), None);
        assert_eq!(note_type_value("eighth"), Some(Rational::new(1, 8)));
    }

    #[test]
    fn test_value_and_dots() {
        assert_eq!(value_and_dots(Rational::new(3, 8)), Some((Rational::new(1, 4), 1)));
        assert_eq!(value_and_dots(Rational::new(7, 8)), Some((Rational::new(1, 2), 2)));
        assert_eq!(value_and_dots(Rational::new(1, 1)), Some((Rational::from_integer(1), 0)));
        assert_eq!(value_and_dots(Rational::new(5, 8)), None);
        assert!(is_simple_value(Rational::new(1, 32)));
        assert!(!is_simple_value(Rational::new(1, 12)));
    }
}
