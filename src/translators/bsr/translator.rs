//! MSR to braille score translator
//!
//! Measures are collected per staff while its voices are visited, then laid
//! out when the staff ends: the voices of a measure are joined with
//! full-measure in-accord signs, and octave marks are decided once the
//! measure's line is known, since every line restarts the octave context.

use std::collections::HashMap;

use super::cells;
use super::kinds::BsrKind;
use super::layout::BrailleLayout;
use crate::errors::{TranslationError, TranslationResult};
use crate::msr::*;
use crate::settings::TranslationSettings;
use crate::tree::Element;
use crate::utils::Indenter;

type BsrElement = Element<BsrKind>;

const GRACE_SIGN: &str = "\u{2810}\u{2822}";

/// Braille for one musical event, before octave marks are known
#[derive(Debug, Clone, PartialEq)]
enum Token {
    /// Cells that do not depend on the octave context
    Sign { kind: BsrKind, cells: String },
    /// A note; its octave mark goes between `prefix` and `body`
    Note {
        pitch: MsrPitch,
        prefix: String,
        body: String,
    },
}

#[derive(Debug, Default)]
struct MeasureContent {
    number: String,
    signatures: Vec<(BsrKind, String)>,
    voices: Vec<Vec<Token>>,
    barlines: Vec<String>,
}

impl MeasureContent {
    /// Render the measure. `previous` is the pitch the octave context
    /// starts from (`None` at the start of a line) and is left at the last
    /// pitch written.
    fn render(&self, previous: &mut Option<MsrPitch>) -> (BsrElement, usize) {
        let mut measure = Element::new(BsrKind::Measure).with_attribute("number", &self.number);
        let mut written_voices = 0;
        for tokens in self.voices.iter().filter(|tokens| !tokens.is_empty()) {
            if written_voices > 0 {
                measure.push_leaf(BsrKind::InAccord, cells::IN_ACCORD);
                *previous = None;
            }
            written_voices += 1;
            for token in tokens {
                match token {
                    Token::Sign { kind, cells } => measure.push_leaf(*kind, cells.as_str()),
                    Token::Note { pitch, prefix, body } => {
                        let mut text = prefix.clone();
                        if cells::needs_octave_mark(previous.as_ref(), pitch) {
                            text.push_str(&cells::octave_mark(pitch.octave));
                        }
                        text.push_str(body);
                        measure.push_leaf(BsrKind::Note, text);
                        *previous = Some(*pitch);
                    }
                }
            }
        }
        for barline in &self.barlines {
            measure.push_leaf(BsrKind::Barline, barline.as_str());
        }
        let cells = leaf_cells(&measure);
        (measure, cells)
    }

    fn signatures_element(&self) -> Option<(BsrElement, usize)> {
        if self.signatures.is_empty() {
            return None;
        }
        let mut element = Element::new(BsrKind::Signatures);
        for (kind, text) in &self.signatures {
            element.push_leaf(*kind, text.as_str());
        }
        let cells = leaf_cells(&element);
        Some((element, cells))
    }
}

fn leaf_cells(element: &BsrElement) -> usize {
    element
        .descendants()
        .iter()
        .filter_map(|node| node.text())
        .map(|text| cells::cell_count(&text))
        .sum()
}

pub struct MsrToBsrTranslator<'a> {
    settings: &'a TranslationSettings,
    indenter: Indenter,
    layout: BrailleLayout,
    root: BsrElement,

    part_staves: usize,
    current_key: Option<(i8, KeyMode)>,
    current_time: Option<(String, u8)>,

    staff_number: u32,
    measures: Vec<MeasureContent>,
    measure_by_number: HashMap<String, usize>,
    voice_index: usize,
    current_measure: Option<usize>,

    chord_notes: Option<Vec<&'a MsrNote>>,
    in_grace_group: bool,
}

impl<'a> MsrToBsrTranslator<'a> {
    pub fn new(settings: &'a TranslationSettings) -> Self {
        MsrToBsrTranslator {
            settings,
            indenter: Indenter::new(),
            layout: BrailleLayout::new(&settings.braille),
            root: Element::new(BsrKind::Score),
            part_staves: 1,
            current_key: None,
            current_time: None,
            staff_number: 1,
            measures: Vec::new(),
            measure_by_number: HashMap::new(),
            voice_index: 0,
            current_measure: None,
            chord_notes: None,
            in_grace_group: false,
        }
    }

    pub fn indenter_mut(&mut self) -> &mut Indenter {
        &mut self.indenter
    }

    pub fn into_tree(self) -> BsrElement {
        self.root
    }

    fn measure(&mut self, input_line: usize) -> TranslationResult<&mut MeasureContent> {
        let index = self
            .current_measure
            .ok_or_else(|| TranslationError::internal("element visited outside of a measure", input_line))?;
        self.measures
            .get_mut(index)
            .ok_or_else(|| TranslationError::internal("braille measure out of range", input_line))
    }

    fn push_tokens(&mut self, tokens: Vec<Token>, input_line: usize) -> TranslationResult<()> {
        let voice_index = self.voice_index;
        let measure = self.measure(input_line)?;
        if measure.voices.len() <= voice_index {
            measure.voices.resize_with(voice_index + 1, Vec::new);
        }
        measure.voices[voice_index].extend(tokens);
        Ok(())
    }

    /// Lay out the measures collected for the staff that just ended
    fn lay_out_staff(&mut self) {
        let measures = std::mem::take(&mut self.measures);
        self.measure_by_number.clear();

        self.layout.break_line();
        if self.part_staves == 2 {
            let sign = if self.staff_number == 1 {
                cells::RIGHT_HAND
            } else {
                cells::LEFT_HAND
            };
            self.layout.push(Element::leaf(BsrKind::HandSign, sign), cells::cell_count(sign));
        }

        let mut previous: Option<MsrPitch> = None;
        for measure in &measures {
            if let Some((signatures, cells)) = measure.signatures_element() {
                if !self.layout.fits(cells) {
                    self.layout.break_line();
                }
                self.layout.push(signatures, cells);
            }

            if self.layout.is_line_empty() {
                previous = None;
            }
            let mut context = previous;
            let (mut element, mut cells) = measure.render(&mut context);
            if !self.layout.fits(cells) {
                self.layout.break_line();
                context = None;
                (element, cells) = measure.render(&mut context);
            }
            self.layout.push(element, cells);
            previous = context;
        }
        self.layout.break_line();
    }

    fn value_class(note: &MsrNote) -> TranslationResult<cells::ValueClass> {
        if note.kind == NoteKind::MeasureRest {
            return Ok(cells::ValueClass::Whole);
        }
        cells::ValueClass::of(note.display_whole_notes).ok_or_else(|| {
            TranslationError::internal(
                format!("no braille value for {} whole notes", note.display_whole_notes),
                note.input_line,
            )
        })
    }

    fn dots(note: &MsrNote) -> String {
        std::iter::repeat(cells::DOT).take(note.dots as usize).collect()
    }

    /// Tokens for a single note or rest, dynamics first
    fn note_tokens(note: &MsrNote, grace: bool) -> TranslationResult<Vec<Token>> {
        let mut tokens = Vec::new();
        for dynamic in &note.dynamics {
            tokens.push(Token::Sign {
                kind: BsrKind::Dynamics,
                cells: cells::dynamics_cells(dynamic.kind.musicxml_name()),
            });
        }

        let class = Self::value_class(note)?;
        match (note.kind, note.pitch) {
            (NoteKind::Regular, Some(pitch)) | (NoteKind::Unpitched, Some(pitch)) => {
                let mut prefix = String::new();
                if grace {
                    prefix.push_str(GRACE_SIGN);
                }
                if let Some(accidental) = &note.accidental {
                    prefix.push_str(&cells::accidental_cells(accidental.kind));
                }
                let mut body = cells::note_cell(pitch.step, class).to_string();
                body.push_str(&Self::dots(note));
                tokens.push(Token::Note { pitch, prefix, body });
            }
            (NoteKind::Rest, _) | (NoteKind::MeasureRest, _) => {
                let mut text = cells::rest_cell(class).to_string();
                text.push_str(&Self::dots(note));
                tokens.push(Token::Sign {
                    kind: BsrKind::Rest,
                    cells: text,
                });
            }
            (kind, _) => {
                return Err(TranslationError::internal(
                    format!("{:?} note without a braille form", kind),
                    note.input_line,
                ))
            }
        }

        if note.ties.contains(&TieKind::Start) {
            tokens.push(Token::Sign {
                kind: BsrKind::Tie,
                cells: cells::TIE.to_string(),
            });
        }
        Ok(tokens)
    }

    /// The highest note is written, the others as intervals below it
    fn chord_tokens(notes: &[&MsrNote], input_line: usize) -> TranslationResult<Vec<Token>> {
        let mut pitched: Vec<(&MsrNote, MsrPitch)> =
            notes.iter().filter_map(|note| note.pitch.map(|pitch| (*note, pitch))).collect();
        pitched.sort_by_key(|(_, pitch)| std::cmp::Reverse(pitch.diatonic_number()));

        let (main, main_pitch) = match pitched.first() {
            Some(first) => *first,
            None => return Err(TranslationError::internal("chord without pitched notes", input_line)),
        };
        let mut main_without_tie = main.clone();
        main_without_tie.ties.clear();
        let mut tokens = Self::note_tokens(&main_without_tie, false)?;
        // dynamics may sit on any member
        for (note, _) in pitched.iter().skip(1) {
            for dynamic in &note.dynamics {
                tokens.insert(
                    0,
                    Token::Sign {
                        kind: BsrKind::Dynamics,
                        cells: cells::dynamics_cells(dynamic.kind.musicxml_name()),
                    },
                );
            }
        }

        for (note, pitch) in pitched.iter().skip(1) {
            let degrees = main_pitch.diatonic_number() - pitch.diatonic_number() + 1;
            let mut text = String::new();
            if let Some(accidental) = &note.accidental {
                text.push_str(&cells::accidental_cells(accidental.kind));
            }
            if degrees > 8 {
                text.push_str(&cells::octave_mark(pitch.octave));
            }
            match cells::interval_cell(degrees) {
                Some(interval) => text.push(interval),
                None => {
                    log::warn!("unison in chord at line {} not written", note.input_line);
                    continue;
                }
            }
            tokens.push(Token::Sign {
                kind: BsrKind::Interval,
                cells: text,
            });
        }

        if main.ties.contains(&TieKind::Start) {
            // chord tie
            tokens.push(Token::Sign {
                kind: BsrKind::Tie,
                cells: "\u{2828}\u{2809}".to_string(),
            });
        }
        Ok(tokens)
    }
}

impl<'a> MsrVisitor<'a> for MsrToBsrTranslator<'a> {
    fn visit_start_score(&mut self, score: &'a MsrScore) -> TranslationResult<()> {
        if self.settings.braille.heading {
            if let Some(title) = score.identification.title() {
                self.layout.push_text_lines(BsrKind::Heading, &cells::literary_text(title));
            }
        }
        Ok(())
    }

    fn visit_end_score(&mut self, _score: &'a MsrScore) -> TranslationResult<()> {
        let layout = std::mem::replace(&mut self.layout, BrailleLayout::new(&self.settings.braille));
        for page in layout.finish() {
            self.root.push(page);
        }
        Ok(())
    }

    fn visit_start_part(&mut self, part: &'a MsrPart) -> TranslationResult<()> {
        if self.settings.trace.parts {
            log::debug!("{}braille part {}", self.indenter.prefix(), part.id);
        }
        self.indenter.increment();
        self.part_staves = part.staves_count();
        self.current_key = None;
        self.current_time = None;
        self.layout.push_text_lines(BsrKind::PartName, &cells::literary_text(&part.name));
        Ok(())
    }

    fn visit_end_part(&mut self, _part: &'a MsrPart) -> TranslationResult<()> {
        self.indenter.decrement();
        Ok(())
    }

    fn visit_start_staff(&mut self, staff: &'a MsrStaff) -> TranslationResult<()> {
        self.staff_number = staff.number;
        self.voice_index = 0;
        self.measures.clear();
        self.measure_by_number.clear();
        Ok(())
    }

    fn visit_end_staff(&mut self, _staff: &'a MsrStaff) -> TranslationResult<()> {
        self.lay_out_staff();
        Ok(())
    }

    fn visit_end_voice(&mut self, _voice: &'a MsrVoice) -> TranslationResult<()> {
        self.voice_index += 1;
        Ok(())
    }

    fn visit_start_measure(&mut self, measure: &'a MsrMeasure) -> TranslationResult<()> {
        let index = match self.measure_by_number.get(&measure.number) {
            Some(index) => *index,
            None => {
                self.measures.push(MeasureContent {
                    number: measure.number.clone(),
                    ..Default::default()
                });
                let index = self.measures.len() - 1;
                self.measure_by_number.insert(measure.number.clone(), index);
                index
            }
        };
        if self.settings.trace.measures {
            log::debug!(
                "{}braille measure {}, voice index {}",
                self.indenter.prefix(),
                measure.number,
                self.voice_index
            );
        }
        self.current_measure = Some(index);
        Ok(())
    }

    fn visit_end_measure(&mut self, _measure: &'a MsrMeasure) -> TranslationResult<()> {
        self.current_measure = None;
        Ok(())
    }

    fn visit_start_key(&mut self, key: &'a MsrKey) -> TranslationResult<()> {
        let value = (key.fifths, key.mode);
        if self.voice_index > 0 || self.current_key == Some(value) {
            return Ok(());
        }
        self.current_key = Some(value);
        let text = cells::key_signature(key.fifths);
        if !text.is_empty() {
            self.measure(key.input_line)?.signatures.push((BsrKind::KeySignature, text));
        }
        Ok(())
    }

    fn visit_start_time(&mut self, time: &'a MsrTime) -> TranslationResult<()> {
        let value = (time.beats.clone(), time.beat_type);
        if self.voice_index > 0 || self.current_time.as_ref() == Some(&value) {
            return Ok(());
        }
        self.current_time = Some(value);
        let text = cells::time_signature(time);
        self.measure(time.input_line)?.signatures.push((BsrKind::TimeSignature, text));
        Ok(())
    }

    fn visit_start_barline(&mut self, barline: &'a MsrBarline) -> TranslationResult<()> {
        if self.voice_index > 0 {
            return Ok(());
        }
        match (&barline.repeat, barline.location) {
            (Some(repeat), BarlineLocation::Left) if repeat.direction == RepeatDirection::Forward => {
                let tokens = vec![Token::Sign {
                    kind: BsrKind::Barline,
                    cells: cells::FORWARD_REPEAT.to_string(),
                }];
                return self.push_tokens(tokens, barline.input_line);
            }
            (Some(repeat), _) if repeat.direction == RepeatDirection::Backward => {
                self.measure(barline.input_line)?
                    .barlines
                    .push(cells::BACKWARD_REPEAT.to_string());
                return Ok(());
            }
            _ => {}
        }
        let text = match barline.style {
            BarStyle::LightHeavy | BarStyle::HeavyHeavy => cells::FINAL_BAR,
            BarStyle::LightLight | BarStyle::HeavyLight => cells::SECTION_BAR,
            _ => return Ok(()),
        };
        self.measure(barline.input_line)?.barlines.push(text.to_string());
        Ok(())
    }

    fn visit_start_note(&mut self, note: &'a MsrNote) -> TranslationResult<()> {
        if let Some(chord_notes) = self.chord_notes.as_mut() {
            chord_notes.push(note);
            return Ok(());
        }
        if note.is_skip() {
            return Ok(());
        }
        if self.settings.trace.notes {
            log::debug!("{}braille note, line {}", self.indenter.prefix(), note.input_line);
        }
        let tokens = Self::note_tokens(note, self.in_grace_group)?;
        self.push_tokens(tokens, note.input_line)
    }

    fn visit_start_chord(&mut self, chord: &'a MsrChord) -> TranslationResult<()> {
        if self.chord_notes.is_some() {
            return Err(TranslationError::internal(
                "chord started while another chord is still open",
                chord.input_line,
            ));
        }
        self.chord_notes = Some(Vec::new());
        Ok(())
    }

    fn visit_end_chord(&mut self, chord: &'a MsrChord) -> TranslationResult<()> {
        let notes = self.chord_notes.take().unwrap_or_default();
        let tokens = Self::chord_tokens(&notes, chord.input_line)?;
        self.push_tokens(tokens, chord.input_line)
    }

    fn visit_start_tuplet(&mut self, tuplet: &'a MsrTuplet) -> TranslationResult<()> {
        let text = if tuplet.actual_notes == 3 {
            cells::TRIPLET.to_string()
        } else {
            format!("\u{2838}{}\u{2804}", cells::lower_number(tuplet.actual_notes))
        };
        if self.settings.trace.tuplets {
            log::debug!("{}braille tuplet {}", self.indenter.prefix(), tuplet.actual_notes);
        }
        self.push_tokens(
            vec![Token::Sign {
                kind: BsrKind::TupletSign,
                cells: text,
            }],
            tuplet.input_line,
        )
    }

    fn visit_start_grace_notes_group(&mut self, _group: &'a MsrGraceNotesGroup) -> TranslationResult<()> {
        self.in_grace_group = true;
        Ok(())
    }

    fn visit_end_grace_notes_group(&mut self, _group: &'a MsrGraceNotesGroup) -> TranslationResult<()> {
        self.in_grace_group = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ElementKind;

    fn quarter(step: DiatonicStep, octave: i8) -> MsrNote {
        MsrNote::pitched(step, Alteration::Natural, octave, Rational::new(1, 4))
    }

    fn translate(score: &MsrScore) -> BsrElement {
        let settings = TranslationSettings::default();
        let mut translator = MsrToBsrTranslator::new(&settings);
        MsrBrowser::new(&mut translator).browse_score(score).unwrap();
        translator.into_tree()
    }

    fn one_voice_score(measures: Vec<MsrMeasure>) -> MsrScore {
        let mut score = MsrScore::new();
        score.add_part(MsrPart::new("P1", "Flute").with_staff(MsrStaff::new(1).with_voice(MsrVoice::new(1, measures))));
        score
    }

    fn leaves(root: &BsrElement, kind: BsrKind) -> Vec<String> {
        root.descendants()
            .into_iter()
            .filter(|node| node.kind() == kind)
            .filter_map(|node| node.text())
            .collect()
    }

    #[test]
    fn test_octave_marks_follow_the_interval_rule() {
        let measure = MeasureBuilder::new("1", 1, 1)
            .notes(vec![
                quarter(DiatonicStep::C, 4),
                quarter(DiatonicStep::E, 4),
                quarter(DiatonicStep::C, 5),
                quarter(DiatonicStep::D, 5),
            ])
            .build();
        let root = translate(&one_voice_score(vec![measure]));
        assert_eq!(leaves(&root, BsrKind::Note), vec!["⠐⠹", "⠫", "⠨⠹", "⠱"]);
    }

    #[test]
    fn test_signatures_and_final_bar() {
        let measure = MeasureBuilder::new("1", 1, 1)
            .key(1, KeyMode::Major)
            .time(3, 4)
            .barline(MsrBarline::final_bar())
            .note(MsrNote::rest(Rational::new(1, 2)).with_dots(1))
            .build();
        let root = translate(&one_voice_score(vec![measure]));
        assert_eq!(leaves(&root, BsrKind::KeySignature), vec!["⠩"]);
        assert_eq!(leaves(&root, BsrKind::TimeSignature), vec!["⠼⠉⠲"]);
        assert_eq!(leaves(&root, BsrKind::Rest), vec!["⠥⠄"]);
        assert_eq!(leaves(&root, BsrKind::Barline), vec![cells::FINAL_BAR]);
    }

    #[test]
    fn test_voices_are_joined_in_accord() {
        let voice1 = MeasureBuilder::new("1", 1, 1)
            .note(MsrNote::pitched(DiatonicStep::E, Alteration::Natural, 5, Rational::new(1, 1)))
            .build();
        let voice2 = MeasureBuilder::new("1", 1, 2)
            .note(MsrNote::pitched(DiatonicStep::C, Alteration::Natural, 4, Rational::new(1, 1)))
            .build();
        let mut score = MsrScore::new();
        score.add_part(
            MsrPart::new("P1", "Organ").with_staff(
                MsrStaff::new(1)
                    .with_voice(MsrVoice::new(1, vec![voice1]))
                    .with_voice(MsrVoice::new(2, vec![voice2])),
            ),
        );
        let root = translate(&score);
        let measure = root
            .descendants()
            .into_iter()
            .find(|node| node.kind() == BsrKind::Measure)
            .unwrap();
        let kinds: Vec<&str> = measure.children().iter().map(|child| child.kind().tag_name()).collect();
        assert_eq!(kinds, vec!["note", "in-accord", "note"]);
        // the in-accord sign restarts the octave context
        assert_eq!(leaves(&root, BsrKind::Note), vec!["⠨⠯", "⠐⠽"]);
    }

    #[test]
    fn test_chord_written_as_intervals() {
        let measure = MeasureBuilder::new("1", 1, 1)
            .chord(MsrChord::new(vec![
                quarter(DiatonicStep::C, 4),
                quarter(DiatonicStep::E, 4),
                quarter(DiatonicStep::G, 4),
            ]))
            .build();
        let root = translate(&one_voice_score(vec![measure]));
        assert_eq!(leaves(&root, BsrKind::Note), vec!["⠐⠳"]);
        assert_eq!(leaves(&root, BsrKind::Interval), vec!["⠬", "⠔"]);
    }

    #[test]
    fn test_part_name_and_page_structure() {
        let measure = MeasureBuilder::new("1", 1, 1)
            .note(quarter(DiatonicStep::G, 4).with_dynamic(DynamicKind::P))
            .build();
        let root = translate(&one_voice_score(vec![measure]));
        let page = root.child(BsrKind::Page).unwrap();
        assert_eq!(page.children()[0].kind(), BsrKind::PageNumber);
        assert_eq!(leaves(&root, BsrKind::PartName), vec!["⠠⠋⠇⠥⠞⠑"]);
        assert_eq!(leaves(&root, BsrKind::Dynamics), vec!["⠜⠏"]);
    }
}
