//! MSR browser
//!
//! Depth-first walk over an MSR score. For every element the browser calls
//! the visitor's start hook, browses the element's children in stored
//! order, then calls the end hook. All hooks default to doing nothing, so a
//! visitor only implements the kinds it cares about and still gets the
//! elements nested below the ones it ignores.

use super::score::*;
use super::types::*;
use crate::errors::TranslationResult;

/// Per-kind start/end hooks. The lifetime lets visitors keep references
/// into the score while the walk is running.
#[allow(unused_variables)]
pub trait MsrVisitor<'a> {
    fn visit_start_score(&mut self, score: &'a MsrScore) -> TranslationResult<()> {
        Ok(())
    }
    fn visit_end_score(&mut self, score: &'a MsrScore) -> TranslationResult<()> {
        Ok(())
    }

    fn visit_start_credit(&mut self, credit: &'a MsrCredit) -> TranslationResult<()> {
        Ok(())
    }
    fn visit_end_credit(&mut self, credit: &'a MsrCredit) -> TranslationResult<()> {
        Ok(())
    }

    fn visit_start_part_group(&mut self, group: &'a MsrPartGroup) -> TranslationResult<()> {
        Ok(())
    }
    fn visit_end_part_group(&mut self, group: &'a MsrPartGroup) -> TranslationResult<()> {
        Ok(())
    }

    fn visit_start_part(&mut self, part: &'a MsrPart) -> TranslationResult<()> {
        Ok(())
    }
    fn visit_end_part(&mut self, part: &'a MsrPart) -> TranslationResult<()> {
        Ok(())
    }

    fn visit_start_staff(&mut self, staff: &'a MsrStaff) -> TranslationResult<()> {
        Ok(())
    }
    fn visit_end_staff(&mut self, staff: &'a MsrStaff) -> TranslationResult<()> {
        Ok(())
    }

    fn visit_start_voice(&mut self, voice: &'a MsrVoice) -> TranslationResult<()> {
        Ok(())
    }
    fn visit_end_voice(&mut self, voice: &'a MsrVoice) -> TranslationResult<()> {
        Ok(())
    }

    fn visit_start_measure(&mut self, measure: &'a MsrMeasure) -> TranslationResult<()> {
        Ok(())
    }
    fn visit_end_measure(&mut self, measure: &'a MsrMeasure) -> TranslationResult<()> {
        Ok(())
    }

    fn visit_start_clef(&mut self, clef: &'a MsrClef) -> TranslationResult<()> {
        Ok(())
    }
    fn visit_end_clef(&mut self, clef: &'a MsrClef) -> TranslationResult<()> {
        Ok(())
    }

    fn visit_start_key(&mut self, key: &'a MsrKey) -> TranslationResult<()> {
        Ok(())
    }
    fn visit_end_key(&mut self, key: &'a MsrKey) -> TranslationResult<()> {
        Ok(())
    }

    fn visit_start_time(&mut self, time: &'a MsrTime) -> TranslationResult<()> {
        Ok(())
    }
    fn visit_end_time(&mut self, time: &'a MsrTime) -> TranslationResult<()> {
        Ok(())
    }

    fn visit_start_barline(&mut self, barline: &'a MsrBarline) -> TranslationResult<()> {
        Ok(())
    }
    fn visit_end_barline(&mut self, barline: &'a MsrBarline) -> TranslationResult<()> {
        Ok(())
    }

    fn visit_start_tempo(&mut self, tempo: &'a MsrTempo) -> TranslationResult<()> {
        Ok(())
    }
    fn visit_end_tempo(&mut self, tempo: &'a MsrTempo) -> TranslationResult<()> {
        Ok(())
    }

    fn visit_start_rehearsal(&mut self, rehearsal: &'a MsrRehearsal) -> TranslationResult<()> {
        Ok(())
    }
    fn visit_end_rehearsal(&mut self, rehearsal: &'a MsrRehearsal) -> TranslationResult<()> {
        Ok(())
    }

    fn visit_start_sign(&mut self, sign: &'a MsrSign) -> TranslationResult<()> {
        Ok(())
    }
    fn visit_end_sign(&mut self, sign: &'a MsrSign) -> TranslationResult<()> {
        Ok(())
    }

    fn visit_start_note(&mut self, note: &'a MsrNote) -> TranslationResult<()> {
        Ok(())
    }
    fn visit_end_note(&mut self, note: &'a MsrNote) -> TranslationResult<()> {
        Ok(())
    }

    fn visit_start_chord(&mut self, chord: &'a MsrChord) -> TranslationResult<()> {
        Ok(())
    }
    fn visit_end_chord(&mut self, chord: &'a MsrChord) -> TranslationResult<()> {
        Ok(())
    }

    fn visit_start_tuplet(&mut self, tuplet: &'a MsrTuplet) -> TranslationResult<()> {
        Ok(())
    }
    fn visit_end_tuplet(&mut self, tuplet: &'a MsrTuplet) -> TranslationResult<()> {
        Ok(())
    }

    fn visit_start_grace_notes_group(&mut self, group: &'a MsrGraceNotesGroup) -> TranslationResult<()> {
        Ok(())
    }
    fn visit_end_grace_notes_group(&mut self, group: &'a MsrGraceNotesGroup) -> TranslationResult<()> {
        Ok(())
    }
}

/// A borrowed MSR element of any kind
#[derive(Debug, Clone, Copy)]
pub enum MsrElement<'a> {
    Score(&'a MsrScore),
    Credit(&'a MsrCredit),
    PartGroup(&'a MsrPartGroup),
    Part(&'a MsrPart),
    Staff(&'a MsrStaff),
    Voice(&'a MsrVoice),
    Measure(&'a MsrMeasure),
    Clef(&'a MsrClef),
    Key(&'a MsrKey),
    Time(&'a MsrTime),
    Barline(&'a MsrBarline),
    Tempo(&'a MsrTempo),
    Rehearsal(&'a MsrRehearsal),
    Sign(&'a MsrSign),
    Note(&'a MsrNote),
    Chord(&'a MsrChord),
    Tuplet(&'a MsrTuplet),
    GraceNotesGroup(&'a MsrGraceNotesGroup),
}

impl<'a> MsrElement<'a> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            MsrElement::Score(_) => "score",
            MsrElement::Credit(_) => "credit",
            MsrElement::PartGroup(_) => "part group",
            MsrElement::Part(_) => "part",
            MsrElement::Staff(_) => "staff",
            MsrElement::Voice(_) => "voice",
            MsrElement::Measure(_) => "measure",
            MsrElement::Clef(_) => "clef",
            MsrElement::Key(_) => "key",
            MsrElement::Time(_) => "time",
            MsrElement::Barline(_) => "barline",
            MsrElement::Tempo(_) => "tempo",
            MsrElement::Rehearsal(_) => "rehearsal",
            MsrElement::Sign(_) => "sign",
            MsrElement::Note(_) => "note",
            MsrElement::Chord(_) => "chord",
            MsrElement::Tuplet(_) => "tuplet",
            MsrElement::GraceNotesGroup(_) => "grace notes group",
        }
    }

    pub fn input_line(&self) -> usize {
        match self {
            MsrElement::Score(score) => score.input_line,
            MsrElement::Credit(credit) => credit.input_line,
            MsrElement::PartGroup(group) => group.input_line,
            MsrElement::Part(part) => part.input_line,
            MsrElement::Staff(staff) => staff.input_line,
            MsrElement::Voice(voice) => voice.input_line,
            MsrElement::Measure(measure) => measure.input_line,
            MsrElement::Clef(clef) => clef.input_line,
            MsrElement::Key(key) => key.input_line,
            MsrElement::Time(time) => time.input_line,
            MsrElement::Barline(barline) => barline.input_line,
            MsrElement::Tempo(tempo) => tempo.input_line,
            MsrElement::Rehearsal(rehearsal) => rehearsal.input_line,
            MsrElement::Sign(sign) => sign.input_line(),
            MsrElement::Note(note) => note.input_line,
            MsrElement::Chord(chord) => chord.input_line,
            MsrElement::Tuplet(tuplet) => tuplet.input_line,
            MsrElement::GraceNotesGroup(group) => group.input_line,
        }
    }

    /// Structurally contained elements, in stored order
    pub fn children(&self) -> Vec<MsrElement<'a>> {
        match *self {
            MsrElement::Score(score) => score
                .credits
                .iter()
                .map(MsrElement::Credit)
                .chain(score.elements.iter().map(MsrElement::from_part_group_element))
                .collect(),
            MsrElement::PartGroup(group) => group
                .elements
                .iter()
                .map(MsrElement::from_part_group_element)
                .collect(),
            MsrElement::Part(part) => part.staves.iter().map(MsrElement::Staff).collect(),
            MsrElement::Staff(staff) => staff.voices.iter().map(MsrElement::Voice).collect(),
            MsrElement::Voice(voice) => voice.measures.iter().map(MsrElement::Measure).collect(),
            MsrElement::Measure(measure) => measure
                .elements
                .iter()
                .map(MsrElement::from_measure_element)
                .collect(),
            MsrElement::Note(note) => note
                .grace_notes_group_before
                .iter()
                .chain(note.grace_notes_group_after.iter())
                .map(|group| MsrElement::GraceNotesGroup(&**group))
                .collect(),
            MsrElement::Chord(chord) => chord.notes.iter().map(MsrElement::Note).collect(),
            MsrElement::Tuplet(tuplet) => tuplet
                .elements
                .iter()
                .map(|element| match element {
                    MsrTupletElement::Note(note) => MsrElement::Note(note),
                    MsrTupletElement::Chord(chord) => MsrElement::Chord(chord),
                    MsrTupletElement::Tuplet(nested) => MsrElement::Tuplet(nested),
                })
                .collect(),
            MsrElement::GraceNotesGroup(group) => group.notes.iter().map(MsrElement::Note).collect(),
            MsrElement::Credit(_)
            | MsrElement::Clef(_)
            | MsrElement::Key(_)
            | MsrElement::Time(_)
            | MsrElement::Barline(_)
            | MsrElement::Tempo(_)
            | MsrElement::Rehearsal(_)
            | MsrElement::Sign(_) => Vec::new(),
        }
    }

    fn from_part_group_element(element: &'a MsrPartGroupElement) -> MsrElement<'a> {
        match element {
            MsrPartGroupElement::PartGroup(group) => MsrElement::PartGroup(group),
            MsrPartGroupElement::Part(part) => MsrElement::Part(part),
        }
    }

    fn from_measure_element(element: &'a MsrMeasureElement) -> MsrElement<'a> {
        match element {
            MsrMeasureElement::Clef(clef) => MsrElement::Clef(clef),
            MsrMeasureElement::Key(key) => MsrElement::Key(key),
            MsrMeasureElement::Time(time) => MsrElement::Time(time),
            MsrMeasureElement::Barline(barline) => MsrElement::Barline(barline),
            MsrMeasureElement::Tempo(tempo) => MsrElement::Tempo(tempo),
            MsrMeasureElement::Rehearsal(rehearsal) => MsrElement::Rehearsal(rehearsal),
            MsrMeasureElement::Sign(sign) => MsrElement::Sign(sign),
            MsrMeasureElement::Note(note) => MsrElement::Note(note),
            MsrMeasureElement::Chord(chord) => MsrElement::Chord(chord),
            MsrMeasureElement::Tuplet(tuplet) => MsrElement::Tuplet(tuplet),
        }
    }
}

/// Walks an MSR score on behalf of one visitor
pub struct MsrBrowser<'v, V: ?Sized> {
    visitor: &'v mut V,
    depth: usize,
    trace: bool,
}

impl<'v, V: ?Sized> MsrBrowser<'v, V> {
    pub fn new(visitor: &'v mut V) -> Self {
        MsrBrowser {
            visitor,
            depth: 0,
            trace: false,
        }
    }

    /// Log every start/end hook at debug level
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Browse a whole score; a hook error stops the walk immediately
    pub fn browse_score<'a>(&mut self, score: &'a MsrScore) -> TranslationResult<()>
    where
        V: MsrVisitor<'a>,
    {
        self.browse(MsrElement::Score(score))
    }

    pub fn browse<'a>(&mut self, element: MsrElement<'a>) -> TranslationResult<()>
    where
        V: MsrVisitor<'a>,
    {
        if self.trace {
            log::debug!(
                "{:indent$}--> start {} (line {})",
                "",
                element.kind_name(),
                element.input_line(),
                indent = self.depth * 2
            );
        }

        visit_start(self.visitor, element)?;
        self.depth += 1;
        for child in element.children() {
            self.browse(child)?;
        }
        self.depth -= 1;
        visit_end(self.visitor, element)?;

        if self.trace {
            log::debug!(
                "{:indent$}<-- end {} (line {})",
                "",
                element.kind_name(),
                element.input_line(),
                indent = self.depth * 2
            );
        }
        Ok(())
    }
}

fn visit_start<'a, V: MsrVisitor<'a> + ?Sized>(
    visitor: &mut V,
    element: MsrElement<'a>,
) -> TranslationResult<()> {
    match element {
        MsrElement::Score(score) => visitor.visit_start_score(score),
        MsrElement::Credit(credit) => visitor.visit_start_credit(credit),
        MsrElement::PartGroup(group) => visitor.visit_start_part_group(group),
        MsrElement::Part(part) => visitor.visit_start_part(part),
        MsrElement::Staff(staff) => visitor.visit_start_staff(staff),
        MsrElement::Voice(voice) => visitor.visit_start_voice(voice),
        MsrElement::Measure(measure) => visitor.visit_start_measure(measure),
        MsrElement::Clef(clef) => visitor.visit_start_clef(clef),
        MsrElement::Key(key) => visitor.visit_start_key(key),
        MsrElement::Time(time) => visitor.visit_start_time(time),
        MsrElement::Barline(barline) => visitor.visit_start_barline(barline),
        MsrElement::Tempo(tempo) => visitor.visit_start_tempo(tempo),
        MsrElement::Rehearsal(rehearsal) => visitor.visit_start_rehearsal(rehearsal),
        MsrElement::Sign(sign) => visitor.visit_start_sign(sign),
        MsrElement::Note(note) => visitor.visit_start_note(note),
        MsrElement::Chord(chord) => visitor.visit_start_chord(chord),
        MsrElement::Tuplet(tuplet) => visitor.visit_start_tuplet(tuplet),
        MsrElement::GraceNotesGroup(group) => visitor.visit_start_grace_notes_group(group),
    }
}

fn visit_end<'a, V: MsrVisitor<'a> + ?Sized>(
    visitor: &mut V,
    element: MsrElement<'a>,
) -> TranslationResult<()> {
    match element {
        MsrElement::Score(score) => visitor.visit_end_score(score),
        MsrElement::Credit(credit) => visitor.visit_end_credit(credit),
        MsrElement::PartGroup(group) => visitor.visit_end_part_group(group),
        MsrElement::Part(part) => visitor.visit_end_part(part),
        MsrElement::Staff(staff) => visitor.visit_end_staff(staff),
        MsrElement::Voice(voice) => visitor.visit_end_voice(voice),
        MsrElement::Measure(measure) => visitor.visit_end_measure(measure),
        MsrElement::Clef(clef) => visitor.visit_end_clef(clef),
        MsrElement::Key(key) => visitor.visit_end_key(key),
        MsrElement::Time(time) => visitor.visit_end_time(time),
        MsrElement::Barline(barline) => visitor.visit_end_barline(barline),
        MsrElement::Tempo(tempo) => visitor.visit_end_tempo(tempo),
        MsrElement::Rehearsal(rehearsal) => visitor.visit_end_rehearsal(rehearsal),
        MsrElement::Sign(sign) => visitor.visit_end_sign(sign),
        MsrElement::Note(note) => visitor.visit_end_note(note),
        MsrElement::Chord(chord) => visitor.visit_end_chord(chord),
        MsrElement::Tuplet(tuplet) => visitor.visit_end_tuplet(tuplet),
        MsrElement::GraceNotesGroup(group) => visitor.visit_end_grace_notes_group(group),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TranslationError;
    use crate::msr::MeasureBuilder;

    fn sample_score() -> MsrScore {
        let quarter = Rational::new(1, 4);
        let grace = MsrGraceNotesGroup::before(vec![MsrNote::pitched(
            DiatonicStep::B,
            Alteration::Natural,
            3,
            Rational::new(1, 8),
        )]);
        let measure = MeasureBuilder::new("1", 1, 1)
            .clef(ClefKind::Treble)
            .note(MsrNote::pitched(DiatonicStep::C, Alteration::Natural, 4, quarter).with_grace_notes_before(grace))
            .chord(MsrChord::new(vec![
                MsrNote::pitched(DiatonicStep::E, Alteration::Natural, 4, quarter),
                MsrNote::pitched(DiatonicStep::G, Alteration::Natural, 4, quarter),
            ]))
            .build();
        let part = MsrPart::new("P1", "Piano")
            .with_staff(MsrStaff::new(1).with_voice(MsrVoice::new(1, vec![measure])));
        let mut score = MsrScore::new();
        score.add_part(part);
        score
    }

    /// Records only the hooks it implements
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl<'a> MsrVisitor<'a> for Recorder {
        fn visit_start_part(&mut self, part: &'a MsrPart) -> TranslationResult<()> {
            self.events.push(format!("start part {}", part.id));
            Ok(())
        }

        fn visit_start_note(&mut self, note: &'a MsrNote) -> TranslationResult<()> {
            let pitch = note.pitch.map(|p| p.step.letter()).unwrap_or("-");
            self.events.push(format!("start note {}", pitch));
            Ok(())
        }

        fn visit_end_note(&mut self, note: &'a MsrNote) -> TranslationResult<()> {
            let pitch = note.pitch.map(|p| p.step.letter()).unwrap_or("-");
            self.events.push(format!("end note {}", pitch));
            Ok(())
        }

        fn visit_start_grace_notes_group(&mut self, _group: &'a MsrGraceNotesGroup) -> TranslationResult<()> {
            self.events.push("start grace".to_string());
            Ok(())
        }

        fn visit_end_chord(&mut self, _chord: &'a MsrChord) -> TranslationResult<()> {
            self.events.push("end chord".to_string());
            Ok(())
        }
    }

    #[test]
    fn test_unhandled_kinds_still_recurse() {
        let score = sample_score();
        let mut recorder = Recorder::default();
        MsrBrowser::new(&mut recorder).browse_score(&score).unwrap();
        assert_eq!(
            recorder.events,
            vec![
                "start part P1",
                "start note C",
                "start grace",
                "start note B",
                "end note B",
                "end note C",
                "start note E",
                "end note E",
                "start note G",
                "end note G",
                "end chord",
            ]
        );
    }

    struct FailOnChord;

    impl<'a> MsrVisitor<'a> for FailOnChord {
        fn visit_start_chord(&mut self, chord: &'a MsrChord) -> TranslationResult<()> {
            Err(TranslationError::internal("chords not supported", chord.input_line))
        }
    }

    #[test]
    fn test_hook_error_stops_the_walk() {
        let score = sample_score();
        let result = MsrBrowser::new(&mut FailOnChord).browse_score(&score);
        assert!(matches!(result, Err(TranslationError::Internal { .. })));
    }

    #[test]
    fn test_children_of_leaf_kinds_are_empty() {
        let clef = MsrClef {
            kind: ClefKind::Bass,
            staff_number: 1,
            input_line: 3,
        };
        let element = MsrElement::Clef(&clef);
        assert!(element.children().is_empty());
        assert_eq!(element.input_line(), 3);
        assert_eq!(element.kind_name(), "clef");
    }
}
