//! Measure builder
//!
//! Assembles an [`MsrMeasure`] for one voice of one staff, assigning each
//! timeline entry its position in the measure, voice and staff numbers, the
//! way a score reader would have.

use super::score::*;
use super::types::*;

pub struct MeasureBuilder {
    measure: MsrMeasure,
    staff_number: u32,
    voice_number: u32,
    position: Rational,
    next_input_line: usize,
}

impl MeasureBuilder {
    pub fn new(number: impl Into<String>, staff_number: u32, voice_number: u32) -> Self {
        MeasureBuilder {
            measure: MsrMeasure::new(number),
            staff_number,
            voice_number,
            position: Rational::from_integer(0),
            next_input_line: 0,
        }
    }

    /// Number subsequent elements from this input line on
    pub fn input_lines_from(mut self, input_line: usize) -> Self {
        self.measure.input_line = input_line;
        self.next_input_line = input_line;
        self
    }

    pub fn implicit(mut self) -> Self {
        self.measure.implicit = true;
        self
    }

    pub fn print_layout(mut self, layout: MsrPrintLayout) -> Self {
        self.measure.print_layout = Some(layout);
        self
    }

    pub fn clef(mut self, kind: ClefKind) -> Self {
        let input_line = self.take_input_line();
        self.measure.elements.push(MsrMeasureElement::Clef(MsrClef {
            kind,
            staff_number: self.staff_number,
            input_line,
        }));
        self
    }

    pub fn key(mut self, fifths: i8, mode: KeyMode) -> Self {
        let input_line = self.take_input_line();
        self.measure
            .elements
            .push(MsrMeasureElement::Key(MsrKey { fifths, mode, input_line }));
        self
    }

    pub fn time(mut self, beats: u8, beat_type: u8) -> Self {
        let mut time = MsrTime::new(beats, beat_type);
        time.input_line = self.take_input_line();
        self.measure.elements.push(MsrMeasureElement::Time(time));
        self
    }

    pub fn barline(mut self, mut barline: MsrBarline) -> Self {
        barline.input_line = self.take_input_line();
        self.measure.elements.push(MsrMeasureElement::Barline(barline));
        self
    }

    pub fn tempo(mut self, beat_unit: Rational, per_minute: u32) -> Self {
        let input_line = self.take_input_line();
        self.measure.elements.push(MsrMeasureElement::Tempo(MsrTempo {
            beat_unit,
            beat_unit_dots: 0,
            per_minute,
            words: None,
            placement: Some(Placement::Above),
            input_line,
        }));
        self
    }

    pub fn rehearsal(mut self, text: impl Into<String>) -> Self {
        let input_line = self.take_input_line();
        self.measure
            .elements
            .push(MsrMeasureElement::Rehearsal(MsrRehearsal {
                text: text.into(),
                placement: Some(Placement::Above),
                input_line,
            }));
        self
    }

    pub fn segno(mut self) -> Self {
        let input_line = self.take_input_line();
        self.measure
            .elements
            .push(MsrMeasureElement::Sign(MsrSign::Segno { input_line }));
        self
    }

    pub fn coda(mut self) -> Self {
        let input_line = self.take_input_line();
        self.measure
            .elements
            .push(MsrMeasureElement::Sign(MsrSign::Coda { input_line }));
        self
    }

    pub fn note(mut self, note: MsrNote) -> Self {
        let mut note = note;
        self.place_note(&mut note);
        self.position += note.sounding_whole_notes;
        self.measure.elements.push(MsrMeasureElement::Note(note));
        self
    }

    /// Append several notes one after the other
    pub fn notes(self, notes: impl IntoIterator<Item = MsrNote>) -> Self {
        notes.into_iter().fold(self, |builder, note| builder.note(note))
    }

    pub fn chord(mut self, chord: MsrChord) -> Self {
        let mut chord = chord;
        chord.input_line = self.take_input_line();
        let duration = chord.sounding_whole_notes();
        self.place_chord(&mut chord);
        self.position += duration;
        self.measure.elements.push(MsrMeasureElement::Chord(chord));
        self
    }

    pub fn tuplet(mut self, tuplet: MsrTuplet) -> Self {
        let mut tuplet = tuplet;
        self.place_tuplet(&mut tuplet);
        self.measure.elements.push(MsrMeasureElement::Tuplet(tuplet));
        self
    }

    /// Position the next timeline entry will get
    pub fn position(&self) -> Rational {
        self.position
    }

    pub fn build(self) -> MsrMeasure {
        self.measure
    }

    fn take_input_line(&mut self) -> usize {
        if self.next_input_line == 0 {
            return 0;
        }
        let line = self.next_input_line;
        self.next_input_line += 1;
        line
    }

    /// Set position, voice and staff on a note and its grace notes
    fn place_note(&mut self, note: &mut MsrNote) {
        let position = self.position;
        let staff_number = self.staff_number;
        let voice_number = self.voice_number;
        for group in [
            note.grace_notes_group_before.as_mut(),
            note.grace_notes_group_after.as_mut(),
        ]
        .into_iter()
        .flatten()
        {
            for grace in &mut group.notes {
                grace.position_in_measure = position;
                grace.staff_number = staff_number;
                grace.voice_number = voice_number;
            }
        }
        if note.input_line == 0 {
            note.input_line = self.take_input_line();
        }
        note.position_in_measure = position;
        note.staff_number = staff_number;
        note.voice_number = voice_number;
    }

    fn place_chord(&mut self, chord: &mut MsrChord) {
        for note in &mut chord.notes {
            self.place_note(note);
        }
    }

    fn place_tuplet(&mut self, tuplet: &mut MsrTuplet) {
        tuplet.input_line = self.take_input_line();
        for element in &mut tuplet.elements {
            match element {
                MsrTupletElement::Note(note) => {
                    self.place_note(note);
                    self.position += note.sounding_whole_notes;
                }
                MsrTupletElement::Chord(chord) => {
                    let duration = chord.sounding_whole_notes();
                    self.place_chord(chord);
                    self.position += duration;
                }
                MsrTupletElement::Tuplet(nested) => self.place_tuplet(nested),
            }
        }
    }
}
