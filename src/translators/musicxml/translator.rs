//! MSR to MusicXML tree translator
//!
//! Visits an MSR score and builds a `score-partwise` element tree.
//!
//! # Measures
//!
//! Voices are visited one after the other, so a measure number is met once
//! per voice. Each part keeps one measure slot per measure number: the
//! `<measure>` element under construction, its write cursor and its buffered
//! right barlines. Revisiting a measure number reuses the slot, and the
//! cursor tells the next voice how far to back up. Slots are attached to the
//! `<part>` when the part ends.
//!
//! # Deferred emission
//!
//! - A note carrying grace notes is built when visited but held back until
//!   its grace notes are in the tree: before-groups flush it when they end,
//!   after-groups when they start.
//! - The chord comment waits for the chord's first member.
//! - Attributes wait for the next note, or the end of the measure.

use std::collections::HashMap;

use super::attributes::PendingAttributes;
use super::divisions::DivisionsEngine;
use super::header;
use super::kinds::MusicXmlKind as K;
use super::notes::{self, NoteContext, TupletMarker, TupletMarkerKind};
use super::position::{position_marker, MeasureCursor, NoteMark, PositionMarker, SkipAccumulator};
use crate::errors::{TranslationError, TranslationResult};
use crate::msr::*;
use crate::settings::TranslationSettings;
use crate::tree::Element;
use crate::utils::Indenter;

type XmlElement = Element<K>;

/// One `<measure>` of the current part
struct MeasureSlot {
    element: XmlElement,
    cursor: MeasureCursor,
    /// (staff, voice) of the first visitor, which owns the barlines
    owner: (u32, u32),
    right_barlines: Vec<XmlElement>,
}

struct PartState<'a> {
    part: &'a MsrPart,
    element: XmlElement,
    divisions: DivisionsEngine,
    multi_staff: bool,
    slots: Vec<MeasureSlot>,
    slot_by_number: HashMap<String, usize>,
}

struct ChordContext {
    comment: Option<XmlElement>,
    members_seen: usize,
    duration: Rational,
}

struct TupletFrame {
    number: u8,
    actual_notes: u32,
    normal_notes: u32,
    bracket: bool,
    show_number: bool,
    placement: Option<Placement>,
    /// 1-based index of the member carrying the stop marker, trailing
    /// skips excluded
    stop_index: Option<usize>,
    /// 1-based index of the member being visited
    current_index: usize,
    start_pending: bool,
}

impl TupletFrame {
    fn marker(&self, kind: TupletMarkerKind) -> TupletMarker {
        TupletMarker {
            kind,
            number: self.number,
            bracket: self.bracket,
            show_number: self.show_number,
            placement: self.placement,
        }
    }
}

struct GraceContext {
    slashed: bool,
    beamed: bool,
    note_count: usize,
    notes_seen: usize,
}

/// A principal note waiting for its grace notes
struct PendingNote<'a> {
    note: &'a MsrNote,
    element: XmlElement,
}

pub struct MsrToMusicXmlTranslator<'a> {
    settings: &'a TranslationSettings,
    clef_replacements: HashMap<ClefKind, ClefKind>,
    indenter: Indenter,

    score: Option<&'a MsrScore>,
    root: XmlElement,
    part_list_emitted: bool,

    part: Option<PartState<'a>>,
    current_staff_number: u32,
    current_voice_number: u32,
    current_slot: Option<usize>,
    skips: SkipAccumulator,
    attributes: PendingAttributes,

    chord: Option<ChordContext>,
    tuplets: Vec<TupletFrame>,
    grace_group: Option<GraceContext>,
    pending_note: Option<PendingNote<'a>>,
}

impl<'a> MsrToMusicXmlTranslator<'a> {
    pub fn new(settings: &'a TranslationSettings, clef_replacements: HashMap<ClefKind, ClefKind>) -> Self {
        MsrToMusicXmlTranslator {
            settings,
            clef_replacements,
            indenter: Indenter::new(),
            score: None,
            root: Element::new(K::ScorePartwise),
            part_list_emitted: false,
            part: None,
            current_staff_number: 1,
            current_voice_number: 1,
            current_slot: None,
            skips: SkipAccumulator::default(),
            attributes: PendingAttributes::default(),
            chord: None,
            tuplets: Vec::new(),
            grace_group: None,
            pending_note: None,
        }
    }

    pub fn indenter_mut(&mut self) -> &mut Indenter {
        &mut self.indenter
    }

    pub fn into_tree(self) -> XmlElement {
        self.root
    }

    fn comments(&self) -> bool {
        self.settings.musicxml_comments()
    }

    fn ensure_part_list(&mut self) -> TranslationResult<()> {
        if self.part_list_emitted {
            return Ok(());
        }
        let score = self.score.ok_or(TranslationError::MissingSource)?;
        self.root.push(header::part_list_element(score));
        self.part_list_emitted = true;
        Ok(())
    }

    fn part_state(&mut self, input_line: usize) -> TranslationResult<&mut PartState<'a>> {
        self.part
            .as_mut()
            .ok_or_else(|| TranslationError::internal("element visited outside of a part", input_line))
    }

    fn slot(&mut self, input_line: usize) -> TranslationResult<&mut MeasureSlot> {
        let index = self
            .current_slot
            .ok_or_else(|| TranslationError::internal("element visited outside of a measure", input_line))?;
        let part = self.part_state(input_line)?;
        part.slots
            .get_mut(index)
            .ok_or_else(|| TranslationError::internal("measure slot out of range", input_line))
    }

    fn append(&mut self, element: XmlElement, input_line: usize) -> TranslationResult<()> {
        self.slot(input_line)?.element.push(element);
        Ok(())
    }

    fn flush_attributes(&mut self, input_line: usize) -> TranslationResult<()> {
        let multi_staff = self.part_state(input_line)?.multi_staff;
        if let Some(attributes) = self.attributes.take_element(multi_staff) {
            self.append(attributes, input_line)?;
        }
        Ok(())
    }

    fn flush_pending_note(&mut self) -> TranslationResult<()> {
        if let Some(pending) = self.pending_note.take() {
            if self.settings.trace.grace_notes {
                log::debug!(
                    "{}flushing note held for grace notes, line {}",
                    self.indenter.prefix(),
                    pending.note.input_line
                );
            }
            self.append(pending.element, pending.note.input_line)?;
        }
        Ok(())
    }

    /// Count a direct tuplet member (note, chord or nested tuplet)
    fn enter_tuplet_member(&mut self) {
        if let Some(frame) = self.tuplets.last_mut() {
            frame.current_index += 1;
        }
    }

    /// Start markers for tuplets not yet started (outermost first), then
    /// stop markers for every tuplet this member ends (innermost first)
    fn take_tuplet_markers(&mut self) -> Vec<TupletMarker> {
        let mut markers = Vec::new();
        for frame in self.tuplets.iter_mut() {
            if frame.start_pending {
                frame.start_pending = false;
                markers.push(frame.marker(TupletMarkerKind::Start));
            }
        }
        for frame in self.tuplets.iter().rev() {
            if Some(frame.current_index) != frame.stop_index {
                break;
            }
            markers.push(frame.marker(TupletMarkerKind::Stop));
        }
        markers
    }

    fn time_modification(&self) -> Option<(u32, u32)> {
        if self.tuplets.is_empty() {
            return None;
        }
        Some(self.tuplets.iter().fold((1, 1), |(actual, normal), frame| {
            (actual * frame.actual_notes, normal * frame.normal_notes)
        }))
    }

    fn marker_elements(
        &self,
        marker: PositionMarker,
        divisions: &DivisionsEngine,
        multi_staff: bool,
        input_line: usize,
    ) -> TranslationResult<Vec<XmlElement>> {
        let mut elements = Vec::new();
        match marker {
            PositionMarker::Backup(duration) => {
                if self.comments() {
                    elements.push(Element::comment(format!(" backup {} whole notes ", duration)));
                }
                let mut backup = Element::new(K::Backup);
                backup.push_leaf(K::Duration, divisions.to_divisions(duration, input_line)?);
                elements.push(backup);
            }
            PositionMarker::Forward { duration, voice, staff } => {
                if self.comments() {
                    elements.push(Element::comment(format!(" forward {} whole notes ", duration)));
                }
                let mut forward = Element::new(K::Forward);
                forward.push_leaf(K::Duration, divisions.to_divisions(duration, input_line)?);
                forward.push_leaf(K::Voice, voice);
                if multi_staff {
                    forward.push_leaf(K::Staff, staff);
                }
                elements.push(forward);
            }
        }
        Ok(elements)
    }

    fn visit_grace_note(&mut self, note: &'a MsrNote) -> TranslationResult<()> {
        let (slashed, grace_beam) = match self.grace_group.as_mut() {
            Some(group) => {
                group.notes_seen += 1;
                let beam = if group.beamed && group.note_count > 1 {
                    Some(if group.notes_seen == 1 {
                        BeamKind::Begin
                    } else if group.notes_seen == group.note_count {
                        BeamKind::End
                    } else {
                        BeamKind::Continue
                    })
                } else {
                    None
                };
                (group.slashed, beam)
            }
            None => return Err(TranslationError::internal("grace note outside of a group", note.input_line)),
        };

        if self.settings.trace.grace_notes {
            log::debug!("{}grace note, line {}", self.indenter.prefix(), note.input_line);
        }

        let part = self.part_state(note.input_line)?;
        let context = NoteContext {
            grace: Some(slashed),
            grace_beam,
            multi_staff: part.multi_staff,
            ..Default::default()
        };
        let element = notes::note_element(note, &context, &part.divisions)?;
        self.append(element, note.input_line)
    }

    fn trace_notes(&self) -> bool {
        self.settings.trace.notes
    }
}

impl<'a> MsrVisitor<'a> for MsrToMusicXmlTranslator<'a> {
    fn visit_start_score(&mut self, score: &'a MsrScore) -> TranslationResult<()> {
        self.score = Some(score);
        self.root.add_attribute("version", "4.0");
        for element in header::work_elements(&score.identification) {
            self.root.push(element);
        }
        self.root.push(header::identification_element(&score.identification));
        if let Some(defaults) = header::defaults_element(score) {
            self.root.push(defaults);
        }
        Ok(())
    }

    fn visit_end_score(&mut self, _score: &'a MsrScore) -> TranslationResult<()> {
        self.ensure_part_list()
    }

    fn visit_start_credit(&mut self, credit: &'a MsrCredit) -> TranslationResult<()> {
        self.root.push(header::credit_element(credit));
        Ok(())
    }

    fn visit_start_part_group(&mut self, _group: &'a MsrPartGroup) -> TranslationResult<()> {
        self.ensure_part_list()
    }

    fn visit_start_part(&mut self, part: &'a MsrPart) -> TranslationResult<()> {
        self.ensure_part_list()?;
        if self.part.is_some() {
            return Err(TranslationError::internal("part started inside another part", part.input_line));
        }

        let divisions = DivisionsEngine::for_part(part)?;
        let multi_staff = part.staves_count() > 1;

        if self.settings.trace.parts || self.settings.trace.divisions {
            log::debug!(
                "{}part {} '{}': {} staves, {} divisions per quarter note",
                self.indenter.prefix(),
                part.id,
                part.name,
                part.staves_count(),
                divisions.divisions_per_quarter_note()
            );
        }
        self.indenter.increment();

        self.attributes.reset_for_part();
        self.attributes.set_divisions(divisions.divisions_per_quarter_note());
        if multi_staff {
            self.attributes.set_staves(part.staves_count());
        }
        for staff in &part.staves {
            if staff.lines != 5 {
                self.attributes.set_staff_lines(staff.number, staff.lines);
            }
        }

        if self.comments() {
            self.root.push(Element::comment(format!(" part {} ({}) ", part.id, part.name)));
        }

        self.part = Some(PartState {
            part,
            element: Element::new(K::Part).with_attribute("id", &part.id),
            divisions,
            multi_staff,
            slots: Vec::new(),
            slot_by_number: HashMap::new(),
        });
        Ok(())
    }

    fn visit_end_part(&mut self, part: &'a MsrPart) -> TranslationResult<()> {
        let state = self
            .part
            .take()
            .ok_or_else(|| TranslationError::internal("part ended without being started", part.input_line))?;
        if !std::ptr::eq(state.part, part) {
            return Err(TranslationError::internal("part ended out of order", part.input_line));
        }

        let mut part_element = state.element;
        for slot in state.slots {
            let mut measure = slot.element;
            for barline in slot.right_barlines {
                measure.push(barline);
            }
            part_element.push(measure);
        }
        self.root.push(part_element);

        self.indenter.decrement();
        Ok(())
    }

    fn visit_start_staff(&mut self, staff: &'a MsrStaff) -> TranslationResult<()> {
        self.current_staff_number = staff.number;
        Ok(())
    }

    fn visit_start_voice(&mut self, voice: &'a MsrVoice) -> TranslationResult<()> {
        self.current_voice_number = voice.number;
        Ok(())
    }

    fn visit_start_measure(&mut self, measure: &'a MsrMeasure) -> TranslationResult<()> {
        let owner = (self.current_staff_number, self.current_voice_number);
        let comments = self.comments();
        let trace = self.settings.trace.measures;
        let prefix = self.indenter.prefix();
        let existing = self
            .part_state(measure.input_line)?
            .slot_by_number
            .get(&measure.number)
            .copied();

        let index = match existing {
            Some(index) => index,
            None => {
                let mut element = Element::new(K::Measure).with_attribute("number", &measure.number);
                if measure.implicit {
                    element.add_attribute("implicit", "yes");
                }
                if comments {
                    element.push(Element::comment(format!(" measure {} ", measure.number)));
                }
                if let Some(print_layout) = &measure.print_layout {
                    let mut print = Element::new(K::Print);
                    if print_layout.new_system {
                        print.add_attribute("new-system", "yes");
                    }
                    if print_layout.new_page {
                        print.add_attribute("new-page", "yes");
                    }
                    if let Some(system_layout) = &print_layout.system_layout {
                        if !system_layout.is_empty() {
                            let scaling = self
                                .score
                                .and_then(|score| score.scaling)
                                .unwrap_or_default();
                            print.push(header::system_layout_element(system_layout, &scaling));
                        }
                    }
                    element.push(print);
                }
                let state = self.part_state(measure.input_line)?;
                state.slots.push(MeasureSlot {
                    element,
                    cursor: MeasureCursor::default(),
                    owner,
                    right_barlines: Vec::new(),
                });
                let index = state.slots.len() - 1;
                state.slot_by_number.insert(measure.number.clone(), index);
                index
            }
        };

        if trace {
            log::debug!(
                "{}measure {} (staff {}, voice {}), line {}",
                prefix,
                measure.number,
                owner.0,
                owner.1,
                measure.input_line
            );
        }
        self.indenter.increment();

        self.current_slot = Some(index);
        self.skips.reset();
        Ok(())
    }

    fn visit_end_measure(&mut self, measure: &'a MsrMeasure) -> TranslationResult<()> {
        self.flush_attributes(measure.input_line)?;
        if self.pending_note.is_some() {
            return Err(TranslationError::internal(
                "note still waiting for grace notes at the end of the measure",
                measure.input_line,
            ));
        }
        if !self.skips.is_empty() && self.settings.trace.backup_forward {
            log::debug!(
                "{}{} whole notes of trailing skips in measure {}",
                self.indenter.prefix(),
                self.skips.duration,
                measure.number
            );
        }
        self.current_slot = None;
        self.indenter.decrement();
        Ok(())
    }

    fn visit_start_clef(&mut self, clef: &'a MsrClef) -> TranslationResult<()> {
        let kind = self.clef_replacements.get(&clef.kind).copied().unwrap_or(clef.kind);
        self.attributes.add_clef(clef.staff_number, kind);
        Ok(())
    }

    fn visit_start_key(&mut self, key: &'a MsrKey) -> TranslationResult<()> {
        self.attributes.add_key(key);
        Ok(())
    }

    fn visit_start_time(&mut self, time: &'a MsrTime) -> TranslationResult<()> {
        self.attributes.add_time(time);
        Ok(())
    }

    fn visit_start_barline(&mut self, barline: &'a MsrBarline) -> TranslationResult<()> {
        let visitor = (self.current_staff_number, self.current_voice_number);
        let slot = self.slot(barline.input_line)?;
        if slot.owner != visitor {
            log::debug!(
                "barline at line {} ignored, measure belongs to staff {} voice {}",
                barline.input_line,
                slot.owner.0,
                slot.owner.1
            );
            return Ok(());
        }
        let element = notes::barline_element(barline);
        match barline.location {
            BarlineLocation::Right => slot.right_barlines.push(element),
            BarlineLocation::Left | BarlineLocation::Middle => slot.element.push(element),
        }
        Ok(())
    }

    fn visit_start_tempo(&mut self, tempo: &'a MsrTempo) -> TranslationResult<()> {
        self.flush_attributes(tempo.input_line)?;
        let contents = notes::tempo_contents(tempo)?;
        let staff = self.staff_for_direction(tempo.input_line)?;
        self.append(notes::measure_direction(contents, tempo.placement, staff), tempo.input_line)
    }

    fn visit_start_rehearsal(&mut self, rehearsal: &'a MsrRehearsal) -> TranslationResult<()> {
        self.flush_attributes(rehearsal.input_line)?;
        let staff = self.staff_for_direction(rehearsal.input_line)?;
        let content = Element::leaf(K::Rehearsal, rehearsal.text.as_str());
        self.append(
            notes::measure_direction(vec![content], rehearsal.placement, staff),
            rehearsal.input_line,
        )
    }

    fn visit_start_sign(&mut self, sign: &'a MsrSign) -> TranslationResult<()> {
        self.flush_attributes(sign.input_line())?;
        let staff = self.staff_for_direction(sign.input_line())?;
        let content = match sign {
            MsrSign::Segno { .. } => Element::new(K::Segno),
            MsrSign::Coda { .. } => Element::new(K::Coda),
        };
        self.append(
            notes::measure_direction(vec![content], Some(Placement::Above), staff),
            sign.input_line(),
        )
    }

    fn visit_start_note(&mut self, note: &'a MsrNote) -> TranslationResult<()> {
        if self.grace_group.is_some() {
            return self.visit_grace_note(note);
        }

        let in_chord = self.chord.is_some();
        let chord_member = self.chord.as_ref().map_or(false, |chord| chord.members_seen > 0);
        if !in_chord {
            self.enter_tuplet_member();
        }

        if note.is_skip() {
            if in_chord {
                log::warn!("skip inside a chord ignored, line {}", note.input_line);
                return Ok(());
            }
            self.skips.add(note);
            if self.settings.trace.backup_forward {
                log::debug!(
                    "{}skip of {} whole notes, {} accumulated, line {}",
                    self.indenter.prefix(),
                    note.sounding_whole_notes,
                    self.skips.duration,
                    note.input_line
                );
            }
            return Ok(());
        }

        if self.trace_notes() {
            log::debug!(
                "{}note {:?} at {} for {}, voice {} staff {}, line {}",
                self.indenter.prefix(),
                note.kind,
                note.position_in_measure,
                note.sounding_whole_notes,
                note.voice_number,
                note.staff_number,
                note.input_line
            );
        }

        let tuplet_markers = if chord_member {
            Vec::new()
        } else {
            self.take_tuplet_markers()
        };
        if self.settings.trace.tuplets && !tuplet_markers.is_empty() {
            log::debug!("{}tuplet markers {:?}", self.indenter.prefix(), tuplet_markers);
        }
        let time_modification = self.time_modification();

        let (divisions, multi_staff) = {
            let state = self.part_state(note.input_line)?;
            (state.divisions, state.multi_staff)
        };

        let mut preceding = Vec::new();
        if !chord_member {
            let duration = self
                .chord
                .as_ref()
                .map_or(note.sounding_whole_notes, |chord| chord.duration);
            let mark = NoteMark::with_duration(note, duration);

            let cursor = self.slot(note.input_line)?.cursor;
            if let Some(marker) = position_marker(&cursor, &self.skips, &mark) {
                if self.settings.trace.backup_forward {
                    log::debug!("{}{:?} before line {}", self.indenter.prefix(), marker, note.input_line);
                }
                preceding.extend(self.marker_elements(marker, &divisions, multi_staff, note.input_line)?);
            }
            self.skips.reset();
            self.slot(note.input_line)?.cursor.advance(mark);

            if let Some(attributes) = self.attributes.take_element(multi_staff) {
                preceding.push(attributes);
            }
            if let Some(comment) = self.chord.as_mut().and_then(|chord| chord.comment.take()) {
                preceding.push(comment);
            }
            preceding.extend(notes::note_directions(note, multi_staff));
        }

        let context = NoteContext {
            chord_member,
            time_modification,
            tuplet_markers,
            grace: None,
            grace_beam: None,
            multi_staff,
        };
        let element = notes::note_element(note, &context, &divisions)?;

        if let Some(chord) = self.chord.as_mut() {
            chord.members_seen += 1;
        }

        for item in preceding {
            self.append(item, note.input_line)?;
        }

        if note.has_grace_notes() {
            if self.pending_note.is_some() {
                return Err(TranslationError::internal(
                    "a note is already waiting for grace notes",
                    note.input_line,
                ));
            }
            self.pending_note = Some(PendingNote { note, element });
        } else {
            self.append(element, note.input_line)?;
        }
        Ok(())
    }

    fn visit_end_note(&mut self, note: &'a MsrNote) -> TranslationResult<()> {
        let is_pending = self
            .pending_note
            .as_ref()
            .map_or(false, |pending| std::ptr::eq(pending.note, note));
        if is_pending {
            self.flush_pending_note()?;
        }
        Ok(())
    }

    fn visit_start_chord(&mut self, chord: &'a MsrChord) -> TranslationResult<()> {
        if self.chord.is_some() {
            return Err(TranslationError::internal(
                "chord started while another chord is still open",
                chord.input_line,
            ));
        }
        self.enter_tuplet_member();

        if self.settings.trace.chords {
            log::debug!(
                "{}chord of {} notes, line {}",
                self.indenter.prefix(),
                chord.notes.len(),
                chord.input_line
            );
        }
        self.indenter.increment();

        let comment = self
            .comments()
            .then(|| Element::comment(format!(" chord, {} notes ", chord.notes.len())));
        self.chord = Some(ChordContext {
            comment,
            members_seen: 0,
            duration: chord.sounding_whole_notes(),
        });
        Ok(())
    }

    fn visit_end_chord(&mut self, chord: &'a MsrChord) -> TranslationResult<()> {
        match self.chord.take() {
            Some(context) => {
                if context.comment.is_some() {
                    log::debug!("chord at line {} had no notes, comment dropped", chord.input_line);
                }
            }
            None => {
                return Err(TranslationError::internal(
                    "chord ended without being started",
                    chord.input_line,
                ))
            }
        }
        self.indenter.decrement();
        Ok(())
    }

    fn visit_start_tuplet(&mut self, tuplet: &'a MsrTuplet) -> TranslationResult<()> {
        if self.chord.is_some() {
            return Err(TranslationError::internal("tuplet inside a chord", tuplet.input_line));
        }
        self.enter_tuplet_member();

        if self.settings.trace.tuplets {
            log::debug!(
                "{}tuplet {}:{} with {} elements, line {}",
                self.indenter.prefix(),
                tuplet.actual_notes,
                tuplet.normal_notes,
                tuplet.elements.len(),
                tuplet.input_line
            );
        }
        self.indenter.increment();

        self.tuplets.push(TupletFrame {
            number: tuplet.number,
            actual_notes: tuplet.actual_notes,
            normal_notes: tuplet.normal_notes,
            bracket: tuplet.bracket,
            show_number: tuplet.show_number,
            placement: tuplet.placement,
            stop_index: tuplet.last_sounding_member(),
            current_index: 0,
            start_pending: true,
        });
        Ok(())
    }

    fn visit_end_tuplet(&mut self, tuplet: &'a MsrTuplet) -> TranslationResult<()> {
        if self.tuplets.pop().is_none() {
            return Err(TranslationError::internal(
                "tuplet ended without being started",
                tuplet.input_line,
            ));
        }
        self.indenter.decrement();
        Ok(())
    }

    fn visit_start_grace_notes_group(&mut self, group: &'a MsrGraceNotesGroup) -> TranslationResult<()> {
        if self.grace_group.is_some() {
            return Err(TranslationError::internal("nested grace notes groups", group.input_line));
        }
        if group.kind == GraceNotesGroupKind::After {
            self.flush_pending_note()?;
        }

        if self.settings.trace.grace_notes {
            log::debug!(
                "{}grace notes group {:?} of {} notes, line {}",
                self.indenter.prefix(),
                group.kind,
                group.notes.len(),
                group.input_line
            );
        }
        self.indenter.increment();

        if self.comments() {
            let text = match group.kind {
                GraceNotesGroupKind::Before => " grace notes before ",
                GraceNotesGroupKind::After => " grace notes after ",
            };
            self.append(Element::comment(text), group.input_line)?;
        }

        self.grace_group = Some(GraceContext {
            slashed: group.slashed,
            beamed: group.beamed,
            note_count: group.notes.len(),
            notes_seen: 0,
        });
        Ok(())
    }

    fn visit_end_grace_notes_group(&mut self, group: &'a MsrGraceNotesGroup) -> TranslationResult<()> {
        self.grace_group = None;
        self.indenter.decrement();
        if group.kind == GraceNotesGroupKind::Before {
            self.flush_pending_note()?;
        }
        Ok(())
    }
}

impl<'a> MsrToMusicXmlTranslator<'a> {
    fn staff_for_direction(&mut self, input_line: usize) -> TranslationResult<Option<u32>> {
        let staff = self.current_staff_number;
        Ok(self.part_state(input_line)?.multi_staff.then_some(staff))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ElementKind;

    fn translate(score: &MsrScore, settings: &TranslationSettings) -> TranslationResult<XmlElement> {
        let mut translator = MsrToMusicXmlTranslator::new(settings, HashMap::new());
        MsrBrowser::new(&mut translator).browse_score(score)?;
        Ok(translator.into_tree())
    }

    fn single_part_score(measures: Vec<MsrMeasure>) -> MsrScore {
        let mut score = MsrScore::new();
        score.add_part(
            MsrPart::new("P1", "Flute").with_staff(MsrStaff::new(1).with_voice(MsrVoice::new(1, measures))),
        );
        score
    }

    fn first_measure(root: &XmlElement) -> &XmlElement {
        root.child(K::Part).and_then(|part| part.child(K::Measure)).unwrap()
    }

    fn quarter(step: DiatonicStep) -> MsrNote {
        MsrNote::pitched(step, Alteration::Natural, 4, Rational::new(1, 4))
    }

    #[test]
    fn test_score_skeleton() {
        let measure = MeasureBuilder::new("1", 1, 1)
            .clef(ClefKind::Treble)
            .key(0, KeyMode::Major)
            .time(2, 4)
            .notes(vec![quarter(DiatonicStep::C), quarter(DiatonicStep::D)])
            .build();
        let root = translate(&single_part_score(vec![measure]), &TranslationSettings::default()).unwrap();
        assert_eq!(root.attribute("version"), Some("4.0"));
        let tags: Vec<&str> = root.children().iter().map(|child| child.kind().tag_name()).collect();
        assert_eq!(tags, vec!["identification", "part-list", "part"]);

        let measure = first_measure(&root);
        let tags: Vec<&str> = measure.children().iter().map(|child| child.kind().tag_name()).collect();
        assert_eq!(tags, vec!["attributes", "note", "note"]);
        let attributes = measure.child(K::Attributes).unwrap();
        assert_eq!(attributes.child_text(K::Divisions), Some("1".to_string()));
    }

    #[test]
    fn test_right_barline_comes_last() {
        let measure = MeasureBuilder::new("1", 1, 1)
            .barline(MsrBarline::final_bar())
            .note(MsrNote::rest(Rational::new(1, 1)))
            .build();
        let root = translate(&single_part_score(vec![measure]), &TranslationSettings::default()).unwrap();
        let measure = first_measure(&root);
        assert_eq!(measure.children().last().unwrap().kind(), K::Barline);
    }

    #[test]
    fn test_chord_members_marked() {
        let measure = MeasureBuilder::new("1", 1, 1)
            .chord(MsrChord::new(vec![quarter(DiatonicStep::C), quarter(DiatonicStep::E)]))
            .note(quarter(DiatonicStep::G))
            .build();
        let root = translate(&single_part_score(vec![measure]), &TranslationSettings::default()).unwrap();
        let notes: Vec<&XmlElement> = first_measure(&root).children_of(K::Note).collect();
        assert_eq!(notes.len(), 3);
        assert!(notes[0].child(K::Chord).is_none());
        assert!(notes[1].child(K::Chord).is_some());
        assert!(notes[2].child(K::Chord).is_none());
        assert!(first_measure(&root).child(K::Backup).is_none());
    }

    #[test]
    fn test_chord_comment_precedes_first_member() {
        let settings = TranslationSettings {
            musicxml_comments: true,
            ..Default::default()
        };
        let measure = MeasureBuilder::new("1", 1, 1)
            .chord(MsrChord::new(vec![quarter(DiatonicStep::C), quarter(DiatonicStep::E)]))
            .build();
        let root = translate(&single_part_score(vec![measure]), &settings).unwrap();
        let measure = first_measure(&root);
        let position = measure
            .children()
            .iter()
            .position(|child| child.is_comment() && child.text().unwrap_or_default().contains("chord"))
            .unwrap();
        assert_eq!(measure.children()[position + 1].kind(), K::Note);
    }

    #[test]
    fn test_nested_chords_are_rejected() {
        let settings = TranslationSettings::default();
        let chord = MsrChord::new(vec![quarter(DiatonicStep::C)]);
        let mut translator = MsrToMusicXmlTranslator::new(&settings, HashMap::new());
        translator.visit_start_chord(&chord).unwrap();
        let error = translator.visit_start_chord(&chord).unwrap_err();
        assert!(error.to_string().contains("another chord"));
    }

    #[test]
    fn test_clef_replacement() {
        let measure = MeasureBuilder::new("1", 1, 1)
            .clef(ClefKind::TrebleMinus8)
            .note(MsrNote::rest(Rational::new(1, 4)))
            .build();
        let score = single_part_score(vec![measure]);
        let settings = TranslationSettings::default();
        let mut replacements = HashMap::new();
        replacements.insert(ClefKind::TrebleMinus8, ClefKind::Treble);
        let mut translator = MsrToMusicXmlTranslator::new(&settings, replacements);
        MsrBrowser::new(&mut translator).browse_score(&score).unwrap();
        let root = translator.into_tree();
        let clef = first_measure(&root).child(K::Attributes).unwrap().child(K::Clef).unwrap();
        assert!(clef.child(K::ClefOctaveChange).is_none());
    }

    #[test]
    fn test_repeated_key_in_next_measure_is_dropped() {
        let first = MeasureBuilder::new("1", 1, 1)
            .key(2, KeyMode::Major)
            .note(MsrNote::rest(Rational::new(1, 4)))
            .build();
        let second = MeasureBuilder::new("2", 1, 1)
            .key(2, KeyMode::Major)
            .note(MsrNote::rest(Rational::new(1, 4)))
            .build();
        let root = translate(&single_part_score(vec![first, second]), &TranslationSettings::default()).unwrap();
        let part = root.child(K::Part).unwrap();
        let measures: Vec<&XmlElement> = part.children_of(K::Measure).collect();
        assert!(measures[0].child(K::Attributes).is_some());
        assert!(measures[1].child(K::Attributes).is_none());
    }
}
