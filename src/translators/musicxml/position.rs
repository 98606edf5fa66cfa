//! Backup/forward reconciliation
//!
//! MusicXML writes the voices and staves of a measure one after the other,
//! so the writer's cursor has to be moved back (`<backup>`) or ahead
//! (`<forward>`) whenever the next note does not start where the previous
//! one ended. Each measure element keeps a [`MeasureCursor`]; skips in a
//! voice are summed in a [`SkipAccumulator`] so that a run of them turns
//! into a single forward.

use crate::msr::{MsrNote, Rational};

/// What the reconciliation needs to remember about a note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteMark {
    pub voice: u32,
    pub staff: u32,
    pub start: Rational,
    /// Start plus sounding duration (the chord's for chord members)
    pub end: Rational,
    pub input_line: usize,
}

impl NoteMark {
    pub fn of(note: &MsrNote) -> Self {
        NoteMark::with_duration(note, note.sounding_whole_notes)
    }

    pub fn with_duration(note: &MsrNote, duration: Rational) -> Self {
        NoteMark {
            voice: note.voice_number,
            staff: note.staff_number,
            start: note.position_in_measure,
            end: note.position_in_measure + duration,
            input_line: note.input_line,
        }
    }
}

/// Write position inside one measure element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureCursor {
    pub previous: Option<NoteMark>,
    pub current_position: Rational,
}

impl Default for MeasureCursor {
    fn default() -> Self {
        MeasureCursor {
            previous: None,
            current_position: Rational::from_integer(0),
        }
    }
}

impl MeasureCursor {
    /// Record a note as emitted
    pub fn advance(&mut self, mark: NoteMark) {
        self.current_position = mark.end;
        self.previous = Some(mark);
    }
}

/// Skips seen since the last emitted note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipAccumulator {
    pub duration: Rational,
    pub voice: Option<u32>,
    pub staff: Option<u32>,
}

impl Default for SkipAccumulator {
    fn default() -> Self {
        SkipAccumulator {
            duration: Rational::from_integer(0),
            voice: None,
            staff: None,
        }
    }
}

impl SkipAccumulator {
    pub fn add(&mut self, skip: &MsrNote) {
        self.duration += skip.sounding_whole_notes;
        self.voice = Some(skip.voice_number);
        self.staff = Some(skip.staff_number);
    }

    pub fn is_empty(&self) -> bool {
        self.duration == Rational::from_integer(0)
    }

    pub fn reset(&mut self) {
        *self = SkipAccumulator::default();
    }
}

/// Cursor move to emit before a note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionMarker {
    Backup(Rational),
    Forward {
        duration: Rational,
        voice: u32,
        staff: u32,
    },
}

/// Decide which marker, if any, must precede `note`
pub fn position_marker(
    cursor: &MeasureCursor,
    skips: &SkipAccumulator,
    note: &NoteMark,
) -> Option<PositionMarker> {
    let zero = Rational::from_integer(0);

    let previous = match &cursor.previous {
        // first note of the measure element: only leading skips move the cursor
        None => {
            let gap = note.start - cursor.current_position;
            return (gap > zero).then_some(PositionMarker::Forward {
                duration: gap,
                voice: note.voice,
                staff: note.staff,
            });
        }
        Some(previous) => previous,
    };

    if previous.voice == note.voice && previous.staff == note.staff {
        if skips.is_empty() {
            return None;
        }
        let position_after_note = note.end;
        if position_after_note < cursor.current_position {
            Some(PositionMarker::Backup(previous.end - note.start))
        } else if position_after_note > cursor.current_position {
            Some(PositionMarker::Forward {
                duration: skips.duration,
                voice: note.voice,
                staff: note.staff,
            })
        } else {
            log::warn!(
                "note at input line {} ends exactly at the measure cursor {} after skips of {}, no marker emitted",
                note.input_line,
                cursor.current_position,
                skips.duration
            );
            None
        }
    } else {
        // voice or staff switch: reposition explicitly
        let delta = previous.end - note.start;
        if delta > zero {
            Some(PositionMarker::Backup(delta))
        } else if delta < zero {
            Some(PositionMarker::Forward {
                duration: -delta,
                voice: note.voice,
                staff: note.staff,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(voice: u32, staff: u32, start: (i32, i32), duration: (i32, i32)) -> NoteMark {
        let start = Rational::new(start.0, start.1);
        NoteMark {
            voice,
            staff,
            start,
            end: start + Rational::new(duration.0, duration.1),
            input_line: 0,
        }
    }

    fn cursor_after(previous: NoteMark) -> MeasureCursor {
        let mut cursor = MeasureCursor::default();
        cursor.advance(previous);
        cursor
    }

    fn skips_of(duration: (i32, i32)) -> SkipAccumulator {
        SkipAccumulator {
            duration: Rational::new(duration.0, duration.1),
            voice: Some(1),
            staff: Some(1),
        }
    }

    #[test]
    fn test_first_note_needs_nothing() {
        let cursor = MeasureCursor::default();
        let note = mark(1, 1, (0, 1), (1, 4));
        assert_eq!(position_marker(&cursor, &SkipAccumulator::default(), &note), None);
    }

    #[test]
    fn test_leading_skips_become_one_forward() {
        let cursor = MeasureCursor::default();
        let note = mark(1, 1, (3, 8), (1, 4));
        assert_eq!(
            position_marker(&cursor, &skips_of((3, 8)), &note),
            Some(PositionMarker::Forward {
                duration: Rational::new(3, 8),
                voice: 1,
                staff: 1
            })
        );
    }

    #[test]
    fn test_following_note_in_same_voice() {
        let cursor = cursor_after(mark(1, 1, (0, 1), (1, 4)));
        let note = mark(1, 1, (1, 4), (1, 4));
        assert_eq!(position_marker(&cursor, &SkipAccumulator::default(), &note), None);
    }

    #[test]
    fn test_skips_in_same_voice_forward() {
        let cursor = cursor_after(mark(1, 1, (0, 1), (1, 4)));
        let note = mark(1, 1, (5, 8), (1, 8));
        assert_eq!(
            position_marker(&cursor, &skips_of((3, 8)), &note),
            Some(PositionMarker::Forward {
                duration: Rational::new(3, 8),
                voice: 1,
                staff: 1
            })
        );
    }

    #[test]
    fn test_note_ending_before_cursor_backs_up() {
        let cursor = cursor_after(mark(1, 1, (1, 2), (1, 2)));
        let note = mark(1, 1, (0, 1), (1, 4));
        assert_eq!(
            position_marker(&cursor, &skips_of((1, 8)), &note),
            Some(PositionMarker::Backup(Rational::from_integer(1)))
        );
    }

    #[test]
    fn test_exact_fill_is_a_no_op() {
        let cursor = cursor_after(mark(1, 1, (0, 1), (1, 2)));
        let note = mark(1, 1, (1, 4), (1, 4));
        assert_eq!(position_marker(&cursor, &skips_of((1, 8)), &note), None);
    }

    #[test]
    fn test_voice_switch_backs_up_to_note_start() {
        let cursor = cursor_after(mark(1, 1, (1, 2), (1, 4)));
        let note = mark(2, 1, (0, 1), (1, 2));
        assert_eq!(
            position_marker(&cursor, &SkipAccumulator::default(), &note),
            Some(PositionMarker::Backup(Rational::new(3, 4)))
        );
    }

    #[test]
    fn test_staff_switch_ignores_skips() {
        let cursor = cursor_after(mark(1, 1, (1, 2), (1, 2)));
        let note = mark(1, 2, (1, 4), (1, 4));
        assert_eq!(
            position_marker(&cursor, &skips_of((1, 4)), &note),
            Some(PositionMarker::Backup(Rational::new(3, 4)))
        );
    }

    #[test]
    fn test_voice_switch_past_cursor_forwards_the_gap() {
        let cursor = cursor_after(mark(1, 1, (0, 1), (1, 4)));
        let note = mark(2, 1, (1, 2), (1, 4));
        assert_eq!(
            position_marker(&cursor, &SkipAccumulator::default(), &note),
            Some(PositionMarker::Forward {
                duration: Rational::new(1, 4),
                voice: 2,
                staff: 1
            })
        );
    }

    #[test]
    fn test_skip_accumulator_collects_and_resets() {
        let mut skips = SkipAccumulator::default();
        assert!(skips.is_empty());
        let mut skip = MsrNote::skip(Rational::new(1, 8));
        skip.voice_number = 2;
        skip.staff_number = 1;
        for _ in 0..3 {
            skips.add(&skip);
        }
        assert_eq!(skips.duration, Rational::new(3, 8));
        assert_eq!(skips.voice, Some(2));
        skips.reset();
        assert!(skips.is_empty());
        assert_eq!(skips.voice, None);
    }
}
