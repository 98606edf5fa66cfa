//! Divisions engine
//!
//! MusicXML expresses durations as integer counts of a per-part unit, the
//! division, declared as a number of divisions per quarter note. The unit
//! is derived once per part from the part's sounding durations so that
//! every note converts exactly.

use num_rational::Ratio;

use crate::errors::{TranslationError, TranslationResult};
use crate::msr::{MsrPart, Rational};
use crate::utils::rational_gcd;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivisionsEngine {
    /// Shortest duration every note of the part is a multiple of
    base: Rational,
    divisions_per_quarter_note: i32,
    multiplying_factor: i32,
    divisions_per_whole_note: i32,
}

impl Default for DivisionsEngine {
    fn default() -> Self {
        DivisionsEngine {
            base: Rational::new(1, 4),
            divisions_per_quarter_note: 1,
            multiplying_factor: 1,
            divisions_per_whole_note: 4,
        }
    }
}

impl DivisionsEngine {
    /// `(1/4) / base` reduced: numerator is the divisions per quarter note,
    /// denominator the multiplying factor
    pub fn from_base(base: Rational, input_line: usize) -> TranslationResult<Self> {
        let overflow = || TranslationError::internal(format!("divisions for base {} overflow", base), input_line);
        if base <= Rational::from_integer(0) {
            return Err(TranslationError::internal(
                format!("divisions base {} is not positive", base),
                input_line,
            ));
        }
        let ratio = Ratio::new(i64::from(*base.denom()), 4 * i64::from(*base.numer()));
        let divisions_per_quarter_note = i32::try_from(*ratio.numer()).map_err(|_| overflow())?;
        let multiplying_factor = i32::try_from(*ratio.denom()).map_err(|_| overflow())?;
        let divisions_per_whole_note = divisions_per_quarter_note.checked_mul(4).ok_or_else(overflow)?;
        Ok(DivisionsEngine {
            base,
            divisions_per_quarter_note,
            multiplying_factor,
            divisions_per_whole_note,
        })
    }

    /// Engine for a set of sounding durations; zero durations are ignored
    pub fn for_durations(durations: impl IntoIterator<Item = Rational>) -> TranslationResult<Self> {
        DivisionsEngine::for_located_durations(durations.into_iter().map(|duration| (duration, 0)))
    }

    /// Same as [`DivisionsEngine::for_durations`], with the input line of
    /// each duration for error reports
    fn for_located_durations(durations: impl IntoIterator<Item = (Rational, usize)>) -> TranslationResult<Self> {
        let mut base: Option<(Rational, usize)> = None;
        for (duration, input_line) in durations {
            if duration <= Rational::from_integer(0) {
                continue;
            }
            base = match base {
                None => Some((duration, input_line)),
                Some((current, _)) => {
                    let combined = rational_gcd(current, duration).ok_or_else(|| {
                        TranslationError::internal(
                            format!("common base of {} and {} overflows", current, duration),
                            input_line,
                        )
                    })?;
                    Some((combined, input_line))
                }
            };
        }
        match base {
            Some((base, input_line)) => DivisionsEngine::from_base(base, input_line),
            None => Ok(DivisionsEngine::default()),
        }
    }

    pub fn for_part(part: &MsrPart) -> TranslationResult<Self> {
        let mut durations = Vec::new();
        part.for_each_note(&mut |note| durations.push((note.sounding_whole_notes, note.input_line)));
        let engine = DivisionsEngine::for_located_durations(durations)?;
        log::debug!(
            "part {}: divisions base {} whole notes, {} per quarter note, factor {}",
            part.id,
            engine.base,
            engine.divisions_per_quarter_note,
            engine.multiplying_factor
        );
        Ok(engine)
    }

    pub fn base(&self) -> Rational {
        self.base
    }

    pub fn divisions_per_quarter_note(&self) -> i32 {
        self.divisions_per_quarter_note
    }

    pub fn multiplying_factor(&self) -> i32 {
        self.multiplying_factor
    }

    /// Convert a duration in whole notes to an exact division count
    pub fn to_divisions(&self, duration: Rational, input_line: usize) -> TranslationResult<i32> {
        let scaled = i64::from(*duration.numer()) * i64::from(self.divisions_per_whole_note);
        let denom = i64::from(*duration.denom());
        if scaled % denom != 0 {
            return Err(TranslationError::NonIntegerDivisions {
                duration,
                divisions_per_quarter_note: self.divisions_per_quarter_note,
                input_line,
            });
        }
        i32::try_from(scaled / denom).map_err(|_| {
            TranslationError::internal(format!("{} whole notes overflow the division count", duration), input_line)
        })
    }

    /// Inverse of [`DivisionsEngine::to_divisions`]
    pub fn to_whole_notes(&self, divisions: i32) -> Rational {
        Rational::new(divisions, self.divisions_per_whole_note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eighth_base() {
        let engine = DivisionsEngine::for_durations(vec![Rational::new(1, 4), Rational::new(1, 8)]).unwrap();
        assert_eq!(engine.divisions_per_quarter_note(), 2);
        assert_eq!(engine.multiplying_factor(), 1);
        assert_eq!(engine.to_divisions(Rational::new(3, 4), 1).unwrap(), 6);
    }

    #[test]
    fn test_dotted_base_has_factor() {
        let engine = DivisionsEngine::for_durations(vec![Rational::new(3, 8)]).unwrap();
        assert_eq!(engine.base(), Rational::new(3, 8));
        assert_eq!(engine.divisions_per_quarter_note(), 2);
        assert_eq!(engine.multiplying_factor(), 3);
        assert_eq!(engine.to_divisions(Rational::new(3, 8), 1).unwrap(), 3);
    }

    #[test]
    fn test_triplets_share_a_base_with_sixteenths() {
        let engine = DivisionsEngine::for_durations(vec![Rational::new(1, 12), Rational::new(1, 16)]).unwrap();
        assert_eq!(engine.divisions_per_quarter_note(), 12);
        assert_eq!(engine.to_divisions(Rational::new(1, 12), 1).unwrap(), 4);
        assert_eq!(engine.to_divisions(Rational::new(1, 16), 1).unwrap(), 3);
    }

    #[test]
    fn test_empty_part_defaults_to_quarter() {
        let engine = DivisionsEngine::for_durations(Vec::new()).unwrap();
        assert_eq!(engine.divisions_per_quarter_note(), 1);
        assert_eq!(engine.to_divisions(Rational::new(1, 2), 1).unwrap(), 2);
    }

    #[test]
    fn test_inconsistent_duration_is_fatal() {
        let engine = DivisionsEngine::from_base(Rational::new(1, 8), 0).unwrap();
        match engine.to_divisions(Rational::new(1, 12), 33) {
            Err(TranslationError::NonIntegerDivisions { input_line, .. }) => assert_eq!(input_line, 33),
            other => panic!("expected a divisions error, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_base_is_an_internal_error() {
        // 1/65536 and 1/65535 have no common base representable in i32
        let durations = vec![
            (Rational::new(1, 4), 3),
            (Rational::new(1, 65_536), 4),
            (Rational::new(1, 65_535), 5),
        ];
        match DivisionsEngine::for_located_durations(durations) {
            Err(TranslationError::Internal { input_line, .. }) => assert_eq!(input_line, 5),
            other => panic!("expected an overflow error, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_division_count_is_an_internal_error() {
        let engine = DivisionsEngine::from_base(Rational::new(1, 1 << 28), 0).unwrap();
        assert_eq!(engine.divisions_per_quarter_note(), 1 << 26);
        assert!(matches!(
            engine.to_divisions(Rational::from_integer(16), 9),
            Err(TranslationError::Internal { input_line: 9, .. })
        ));
        assert!(DivisionsEngine::from_base(Rational::new(1, i32::MAX), 2).is_err());
    }
}
