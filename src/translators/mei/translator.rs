//! MSR to MEI translator
//!
//! MEI nests staves inside measures, the reverse of MSR. Events are
//! collected per measure number, global staff number and layer while the
//! voices are visited, and the `<section>` is assembled when the score
//! ends, with staves and layers sorted by number.

use std::collections::{BTreeMap, HashMap};

use super::kinds::MeiKind as K;
use super::score_def::{self, ScoreDefBuilder, StaffNumbers};
use crate::errors::{TranslationError, TranslationResult};
use crate::msr::*;
use crate::settings::TranslationSettings;
use crate::tree::Element;
use crate::utils::{value_and_dots, Indenter};

type MeiElement = Element<K>;

#[derive(Debug, Default)]
struct MeiMeasure {
    number: String,
    left: Option<&'static str>,
    right: Option<&'static str>,
    /// Key and meter changes, written in a `<scoreDef>` before the measure
    score_def_changes: Vec<MeiElement>,
    staves: BTreeMap<u32, BTreeMap<u32, Vec<MeiElement>>>,
    control_events: Vec<MeiElement>,
}

impl MeiMeasure {
    fn into_element(self) -> (Option<MeiElement>, MeiElement) {
        let score_def = (!self.score_def_changes.is_empty()).then(|| {
            let mut score_def = Element::new(K::ScoreDef);
            for change in self.score_def_changes {
                score_def.push(change);
            }
            score_def
        });

        let mut measure = Element::new(K::Measure).with_attribute("n", &self.number);
        if let Some(left) = self.left {
            measure.add_attribute("left", left);
        }
        if let Some(right) = self.right {
            measure.add_attribute("right", right);
        }
        for (staff_number, layers) in self.staves {
            let mut staff = Element::new(K::Staff).with_attribute("n", staff_number);
            for (layer_number, events) in layers {
                let mut layer = Element::new(K::Layer).with_attribute("n", layer_number);
                for event in events {
                    layer.push(event);
                }
                staff.push(layer);
            }
            measure.push(staff);
        }
        for event in self.control_events {
            measure.push(event);
        }
        (score_def, measure)
    }
}

/// MEI `@dur` for an undotted display value
pub fn mei_dur(display_whole_notes: Rational) -> Option<String> {
    let (numer, denom) = (*display_whole_notes.numer(), *display_whole_notes.denom());
    match (numer, denom) {
        (4, 1) => Some("long".to_string()),
        (2, 1) => Some("breve".to_string()),
        (1, d) if d > 0 && (d & (d - 1)) == 0 && d <= 2048 => Some(d.to_string()),
        _ => None,
    }
}

fn accid_value(kind: AccidentalKind) -> &'static str {
    match kind {
        AccidentalKind::Sharp => "s",
        AccidentalKind::Natural => "n",
        AccidentalKind::Flat => "f",
        AccidentalKind::DoubleSharp => "x",
        AccidentalKind::SharpSharp => "ss",
        AccidentalKind::FlatFlat => "ff",
        AccidentalKind::NaturalSharp => "ns",
        AccidentalKind::NaturalFlat => "nf",
        AccidentalKind::QuarterFlat => "1qf",
        AccidentalKind::QuarterSharp => "1qs",
        AccidentalKind::ThreeQuartersFlat => "3qf",
        AccidentalKind::ThreeQuartersSharp => "3qs",
    }
}

fn artic_value(kind: ArticulationKind) -> Option<&'static str> {
    Some(match kind {
        ArticulationKind::Accent => "acc",
        ArticulationKind::StrongAccent => "marc",
        ArticulationKind::Staccato => "stacc",
        ArticulationKind::Staccatissimo => "stacciss",
        ArticulationKind::Spiccato => "spicc",
        ArticulationKind::Tenuto => "ten",
        ArticulationKind::DetachedLegato => "ten-stacc",
        ArticulationKind::Stress => "stress",
        ArticulationKind::Unstress => "unstress",
        ArticulationKind::Scoop => "scoop",
        ArticulationKind::Plop => "plop",
        ArticulationKind::Doit => "doit",
        ArticulationKind::Falloff => "fall",
        ArticulationKind::BreathMark | ArticulationKind::Caesura => return None,
    })
}

fn tie_value(ties: &[TieKind]) -> Option<&'static str> {
    let starts = ties.contains(&TieKind::Start);
    let stops = ties.contains(&TieKind::Stop);
    match (starts, stops) {
        (true, true) => Some("m"),
        (true, false) => Some("i"),
        (false, true) => Some("t"),
        (false, false) => ties.contains(&TieKind::Continue).then_some("m"),
    }
}

fn barline_value(style: BarStyle) -> Option<&'static str> {
    match style {
        BarStyle::Dotted => Some("dotted"),
        BarStyle::Dashed => Some("dashed"),
        BarStyle::Heavy => Some("heavy"),
        BarStyle::LightLight => Some("dbl"),
        BarStyle::LightHeavy => Some("end"),
        BarStyle::HeavyHeavy => Some("dblheavy"),
        BarStyle::None => Some("invis"),
        BarStyle::Regular | BarStyle::HeavyLight | BarStyle::Tick | BarStyle::Short => None,
    }
}

fn set_duration(element: &mut MeiElement, note: &MsrNote) -> TranslationResult<()> {
    let dur = mei_dur(note.display_whole_notes).ok_or_else(|| {
        TranslationError::internal(
            format!("no MEI duration for {} whole notes", note.display_whole_notes),
            note.input_line,
        )
    })?;
    element.add_attribute("dur", dur);
    if note.dots > 0 {
        element.add_attribute("dots", note.dots);
    }
    Ok(())
}

pub struct MsrToMeiTranslator<'a> {
    settings: &'a TranslationSettings,
    clef_replacements: HashMap<ClefKind, ClefKind>,
    indenter: Indenter,

    root: MeiElement,
    score_def: Option<MeiElement>,
    staff_numbers: StaffNumbers,
    next_id: u32,

    measures: Vec<MeiMeasure>,
    measure_by_number: HashMap<String, usize>,

    part: Option<&'a MsrPart>,
    staff_number: u32,
    layer_number: u32,
    current_measure: Option<usize>,

    current_clefs: HashMap<u32, ClefKind>,
    current_keys: HashMap<String, (i8, KeyMode)>,
    current_times: HashMap<String, (String, u8)>,
    beat_type: u8,

    /// Open chord, tuplet and grace group elements, innermost last
    containers: Vec<MeiElement>,
    pending_note: Option<(&'a MsrNote, MeiElement)>,
    in_chord: bool,
}

impl<'a> MsrToMeiTranslator<'a> {
    pub fn new(settings: &'a TranslationSettings, clef_replacements: HashMap<ClefKind, ClefKind>) -> Self {
        MsrToMeiTranslator {
            settings,
            clef_replacements,
            indenter: Indenter::new(),
            root: Element::new(K::Mei),
            score_def: None,
            staff_numbers: HashMap::new(),
            next_id: 1,
            measures: Vec::new(),
            measure_by_number: HashMap::new(),
            part: None,
            staff_number: 1,
            layer_number: 1,
            current_measure: None,
            current_clefs: HashMap::new(),
            current_keys: HashMap::new(),
            current_times: HashMap::new(),
            beat_type: 4,
            containers: Vec::new(),
            pending_note: None,
            in_chord: false,
        }
    }

    pub fn indenter_mut(&mut self) -> &mut Indenter {
        &mut self.indenter
    }

    pub fn into_tree(self) -> MeiElement {
        self.root
    }

    fn new_id(&mut self) -> String {
        let id = format!("{}{}", self.settings.mei.id_prefix, self.next_id);
        self.next_id += 1;
        id
    }

    fn event(&mut self, kind: K) -> MeiElement {
        let id = self.new_id();
        Element::new(kind).with_attribute("xml:id", id)
    }

    fn part_id(&self, input_line: usize) -> TranslationResult<&'a str> {
        self.part
            .map(|part| part.id.as_str())
            .ok_or_else(|| TranslationError::internal("element visited outside of a part", input_line))
    }

    fn measure(&mut self, input_line: usize) -> TranslationResult<&mut MeiMeasure> {
        let index = self
            .current_measure
            .ok_or_else(|| TranslationError::internal("element visited outside of a measure", input_line))?;
        self.measures
            .get_mut(index)
            .ok_or_else(|| TranslationError::internal("MEI measure out of range", input_line))
    }

    /// Put an event in the innermost open container, or in the current layer
    fn emit(&mut self, element: MeiElement, input_line: usize) -> TranslationResult<()> {
        if let Some(container) = self.containers.last_mut() {
            container.push(element);
            return Ok(());
        }
        let (staff, layer) = (self.staff_number, self.layer_number);
        self.measure(input_line)?
            .staves
            .entry(staff)
            .or_default()
            .entry(layer)
            .or_default()
            .push(element);
        Ok(())
    }

    fn flush_pending_note(&mut self) -> TranslationResult<()> {
        if let Some((note, element)) = self.pending_note.take() {
            self.emit(element, note.input_line)?;
        }
        Ok(())
    }

    fn close_container(&mut self, kind: K, input_line: usize) -> TranslationResult<()> {
        match self.containers.pop() {
            Some(container) if container.kind() == kind => self.emit(container, input_line),
            _ => Err(TranslationError::internal(
                format!("{:?} closed while not the innermost open element", kind),
                input_line,
            )),
        }
    }

    fn note_element(&mut self, note: &MsrNote) -> TranslationResult<MeiElement> {
        let mut element = self.event(K::Note);
        if let Some(pitch) = note.pitch {
            element.add_attribute("pname", pitch.step.letter().to_ascii_lowercase());
            element.add_attribute("oct", pitch.octave);
        }
        if !self.in_chord {
            set_duration(&mut element, note)?;
        }
        if let Some(accidental) = &note.accidental {
            element.add_attribute("accid", accid_value(accidental.kind));
        }
        if note.grace {
            // follows the enclosing graceGrp, slashed groups being unaccented
            let grace = self
                .containers
                .iter()
                .rev()
                .find(|container| container.kind() == K::GraceGrp)
                .and_then(|group| group.attribute("grace"))
                .unwrap_or("acc")
                .to_string();
            element.add_attribute("grace", grace);
        }
        match note.stem {
            Some(StemDirection::Up) => element.add_attribute("stem.dir", "up"),
            Some(StemDirection::Down) => element.add_attribute("stem.dir", "down"),
            _ => {}
        }
        if let Some(tie) = tie_value(&note.ties) {
            element.add_attribute("tie", tie);
        }
        if !note.slurs.is_empty() {
            let slurs: Vec<String> = note
                .slurs
                .iter()
                .map(|slur| {
                    let position = match slur.kind {
                        SlurKind::Start => "i",
                        SlurKind::Continue => "m",
                        SlurKind::Stop => "t",
                    };
                    format!("{}{}", position, slur.number)
                })
                .collect();
            element.add_attribute("slur", slurs.join(" "));
        }
        let artics: Vec<&str> = note
            .articulations
            .iter()
            .filter_map(|articulation| artic_value(articulation.kind))
            .collect();
        if !artics.is_empty() {
            element.add_attribute("artic", artics.join(" "));
        }
        for syllable in &note.lyrics {
            let mut syl = Element::leaf(K::Syl, syllable.text.as_str());
            match syllable.kind {
                SyllableKind::Single => {}
                SyllableKind::Begin => syl.add_attribute("wordpos", "i"),
                SyllableKind::Middle => syl.add_attribute("wordpos", "m"),
                SyllableKind::End => syl.add_attribute("wordpos", "t"),
            }
            if matches!(syllable.kind, SyllableKind::Begin | SyllableKind::Middle) {
                syl.add_attribute("con", "d");
            } else if syllable.extend {
                syl.add_attribute("con", "u");
            }
            let mut verse = Element::new(K::Verse).with_attribute("n", &syllable.stanza);
            verse.push(syl);
            element.push(verse);
        }
        Ok(element)
    }

    fn dynamics(&mut self, note: &MsrNote, start_id: Option<&str>) -> TranslationResult<()> {
        if note.dynamics.is_empty() {
            return Ok(());
        }
        let beat = note.position_in_measure * Rational::from_integer(self.beat_type as i32) + Rational::from_integer(1);
        let tstamp = *beat.numer() as f64 / *beat.denom() as f64;
        let staff = self.staff_number;
        for dynamic in &note.dynamics {
            let mut dynam = self.event(K::Dynam);
            dynam.add_attribute("staff", staff);
            dynam.add_attribute("tstamp", crate::tree::ElementValue::Float(tstamp));
            if let Some(start_id) = start_id {
                dynam.add_attribute("startid", format!("#{}", start_id));
            }
            if let Some(placement) = dynamic.placement {
                dynam.add_attribute("place", placement.musicxml_name());
            }
            dynam.set_value(dynamic.kind.musicxml_name());
            self.measure(note.input_line)?.control_events.push(dynam);
        }
        Ok(())
    }
}

impl<'a> MsrVisitor<'a> for MsrToMeiTranslator<'a> {
    fn visit_start_score(&mut self, score: &'a MsrScore) -> TranslationResult<()> {
        self.root.add_attribute("xmlns", "http://www.music-encoding.org/ns/mei");
        self.root.add_attribute("meiversion", &self.settings.mei.version);
        self.root.push(score_def::mei_head(&score.identification));

        let mut builder = ScoreDefBuilder::new(&self.clef_replacements);
        let score_def = builder.build(score);
        let (staff_numbers, initial_clefs) = builder.into_staff_numbers();
        self.score_def = Some(score_def);
        self.staff_numbers = staff_numbers;
        self.current_clefs = initial_clefs;
        Ok(())
    }

    fn visit_end_score(&mut self, _score: &'a MsrScore) -> TranslationResult<()> {
        let mut section = Element::new(K::Section);
        for measure in std::mem::take(&mut self.measures) {
            let (score_def, measure) = measure.into_element();
            if let Some(score_def) = score_def {
                section.push(score_def);
            }
            section.push(measure);
        }

        let mut mei_score = Element::new(K::Score);
        if let Some(score_def) = self.score_def.take() {
            mei_score.push(score_def);
        }
        mei_score.push(section);
        let mut mdiv = Element::new(K::Mdiv);
        mdiv.push(mei_score);
        let mut body = Element::new(K::Body);
        body.push(mdiv);
        let mut music = Element::new(K::Music);
        music.push(body);
        self.root.push(music);
        Ok(())
    }

    fn visit_start_part(&mut self, part: &'a MsrPart) -> TranslationResult<()> {
        if self.settings.trace.parts {
            log::debug!("{}MEI part {}", self.indenter.prefix(), part.id);
        }
        self.indenter.increment();
        self.part = Some(part);
        // initial key and time are in the staff definitions
        if let Some(staff) = part.staves.first() {
            let initial = score_def::initial_attributes(staff);
            if let Some(key) = initial.key {
                self.current_keys.insert(part.id.clone(), (key.fifths, key.mode));
            }
            if let Some(time) = initial.time {
                self.current_times.insert(part.id.clone(), (time.beats.clone(), time.beat_type));
                self.beat_type = time.beat_type;
            }
        }
        Ok(())
    }

    fn visit_end_part(&mut self, _part: &'a MsrPart) -> TranslationResult<()> {
        self.part = None;
        self.indenter.decrement();
        Ok(())
    }

    fn visit_start_staff(&mut self, staff: &'a MsrStaff) -> TranslationResult<()> {
        let part_id = self.part_id(staff.input_line)?;
        self.staff_number = *self
            .staff_numbers
            .get(&(part_id.to_string(), staff.number))
            .ok_or_else(|| TranslationError::internal("staff missing from the score definition", staff.input_line))?;
        Ok(())
    }

    fn visit_start_voice(&mut self, voice: &'a MsrVoice) -> TranslationResult<()> {
        self.layer_number = voice.number;
        Ok(())
    }

    fn visit_start_measure(&mut self, measure: &'a MsrMeasure) -> TranslationResult<()> {
        let index = match self.measure_by_number.get(&measure.number) {
            Some(index) => *index,
            None => {
                self.measures.push(MeiMeasure {
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
                "{}MEI measure {}, staff {} layer {}",
                self.indenter.prefix(),
                measure.number,
                self.staff_number,
                self.layer_number
            );
        }
        self.current_measure = Some(index);
        let (staff, layer) = (self.staff_number, self.layer_number);
        self.measure(measure.input_line)?
            .staves
            .entry(staff)
            .or_default()
            .entry(layer)
            .or_default();
        Ok(())
    }

    fn visit_end_measure(&mut self, measure: &'a MsrMeasure) -> TranslationResult<()> {
        if !self.containers.is_empty() || self.pending_note.is_some() {
            return Err(TranslationError::internal(
                "measure ended with unclosed MEI elements",
                measure.input_line,
            ));
        }
        self.current_measure = None;
        Ok(())
    }

    fn visit_start_clef(&mut self, clef: &'a MsrClef) -> TranslationResult<()> {
        let part_id = self.part_id(clef.input_line)?;
        let staff = self
            .staff_numbers
            .get(&(part_id.to_string(), clef.staff_number))
            .copied()
            .unwrap_or(self.staff_number);
        let kind = self.clef_replacements.get(&clef.kind).copied().unwrap_or(clef.kind);
        if self.current_clefs.get(&staff) == Some(&kind) {
            return Ok(());
        }
        self.current_clefs.insert(staff, kind);
        let mut element = score_def::clef_element(kind);
        element.add_attribute("xml:id", self.new_id());
        self.emit(element, clef.input_line)
    }

    fn visit_start_key(&mut self, key: &'a MsrKey) -> TranslationResult<()> {
        let part_id = self.part_id(key.input_line)?;
        let value = (key.fifths, key.mode);
        if self.current_keys.get(part_id) == Some(&value) {
            return Ok(());
        }
        self.current_keys.insert(part_id.to_string(), value);
        self.measure(key.input_line)?
            .score_def_changes
            .push(score_def::key_sig_element(key));
        Ok(())
    }

    fn visit_start_time(&mut self, time: &'a MsrTime) -> TranslationResult<()> {
        let part_id = self.part_id(time.input_line)?;
        self.beat_type = time.beat_type;
        let value = (time.beats.clone(), time.beat_type);
        if self.current_times.get(part_id) == Some(&value) {
            return Ok(());
        }
        self.current_times.insert(part_id.to_string(), value);
        self.measure(time.input_line)?
            .score_def_changes
            .push(score_def::meter_sig_element(time));
        Ok(())
    }

    fn visit_start_barline(&mut self, barline: &'a MsrBarline) -> TranslationResult<()> {
        let measure = self.measure(barline.input_line)?;
        if let Some(repeat) = &barline.repeat {
            match repeat.direction {
                RepeatDirection::Forward => measure.left = Some("rptstart"),
                RepeatDirection::Backward => measure.right = Some("rptend"),
            }
            return Ok(());
        }
        if barline.location == BarlineLocation::Right && measure.right.is_none() {
            measure.right = barline_value(barline.style);
        }
        Ok(())
    }

    fn visit_start_note(&mut self, note: &'a MsrNote) -> TranslationResult<()> {
        if self.settings.trace.notes {
            log::debug!("{}MEI note, line {}", self.indenter.prefix(), note.input_line);
        }
        match note.kind {
            NoteKind::Skip => {
                if self.in_chord {
                    return Ok(());
                }
                let mut space = self.event(K::Space);
                match mei_dur(note.display_whole_notes) {
                    Some(dur) => {
                        space.add_attribute("dur", dur);
                        if note.dots > 0 {
                            space.add_attribute("dots", note.dots);
                        }
                    }
                    None => {
                        let (value, dots) = value_and_dots(note.sounding_whole_notes)
                            .and_then(|(value, dots)| mei_dur(value).map(|dur| (dur, dots)))
                            .ok_or_else(|| {
                                TranslationError::internal(
                                    format!("no MEI duration for skip of {}", note.sounding_whole_notes),
                                    note.input_line,
                                )
                            })?;
                        space.add_attribute("dur", value);
                        if dots > 0 {
                            space.add_attribute("dots", dots);
                        }
                    }
                }
                self.emit(space, note.input_line)
            }
            NoteKind::Rest => {
                let mut rest = self.event(K::Rest);
                set_duration(&mut rest, note)?;
                self.emit(rest, note.input_line)
            }
            NoteKind::MeasureRest => {
                let rest = self.event(K::MRest);
                self.emit(rest, note.input_line)
            }
            NoteKind::Regular | NoteKind::Unpitched => {
                let element = self.note_element(note)?;
                let id = element.attribute("xml:id").map(str::to_string);
                if !note.grace {
                    self.dynamics(note, id.as_deref())?;
                }
                if note.has_grace_notes() {
                    if self.pending_note.is_some() {
                        return Err(TranslationError::internal(
                            "a note is already waiting for grace notes",
                            note.input_line,
                        ));
                    }
                    self.pending_note = Some((note, element));
                    Ok(())
                } else {
                    self.emit(element, note.input_line)
                }
            }
        }
    }

    fn visit_end_note(&mut self, note: &'a MsrNote) -> TranslationResult<()> {
        let is_pending = self
            .pending_note
            .as_ref()
            .map_or(false, |(pending, _)| std::ptr::eq(*pending, note));
        if is_pending {
            self.flush_pending_note()?;
        }
        Ok(())
    }

    fn visit_start_chord(&mut self, chord: &'a MsrChord) -> TranslationResult<()> {
        if self.in_chord {
            return Err(TranslationError::internal(
                "chord started while another chord is still open",
                chord.input_line,
            ));
        }
        let mut element = self.event(K::Chord);
        if let Some(first) = chord.notes.first() {
            set_duration(&mut element, first)?;
        }
        self.in_chord = true;
        self.containers.push(element);
        Ok(())
    }

    fn visit_end_chord(&mut self, chord: &'a MsrChord) -> TranslationResult<()> {
        self.in_chord = false;
        self.close_container(K::Chord, chord.input_line)
    }

    fn visit_start_tuplet(&mut self, tuplet: &'a MsrTuplet) -> TranslationResult<()> {
        let element = self
            .event(K::Tuplet)
            .with_attribute("num", tuplet.actual_notes)
            .with_attribute("numbase", tuplet.normal_notes);
        self.containers.push(element);
        Ok(())
    }

    fn visit_end_tuplet(&mut self, tuplet: &'a MsrTuplet) -> TranslationResult<()> {
        self.close_container(K::Tuplet, tuplet.input_line)
    }

    fn visit_start_grace_notes_group(&mut self, group: &'a MsrGraceNotesGroup) -> TranslationResult<()> {
        if group.kind == GraceNotesGroupKind::After {
            self.flush_pending_note()?;
        }
        let element = self
            .event(K::GraceGrp)
            .with_attribute("grace", if group.slashed { "unacc" } else { "acc" })
            .with_attribute(
                "attach",
                match group.kind {
                    GraceNotesGroupKind::Before => "pre",
                    GraceNotesGroupKind::After => "post",
                },
            );
        self.containers.push(element);
        Ok(())
    }

    fn visit_end_grace_notes_group(&mut self, group: &'a MsrGraceNotesGroup) -> TranslationResult<()> {
        self.close_container(K::GraceGrp, group.input_line)?;
        if group.kind == GraceNotesGroupKind::Before {
            self.flush_pending_note()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ElementKind;

    fn translate(score: &MsrScore) -> MeiElement {
        let settings = TranslationSettings::default();
        let mut translator = MsrToMeiTranslator::new(&settings, HashMap::new());
        MsrBrowser::new(&mut translator).browse_score(score).unwrap();
        translator.into_tree()
    }

    fn find<'t>(root: &'t MeiElement, kind: K) -> Vec<&'t MeiElement> {
        root.descendants().into_iter().filter(|node| node.kind() == kind).collect()
    }

    fn quarter(step: DiatonicStep) -> MsrNote {
        MsrNote::pitched(step, Alteration::Natural, 4, Rational::new(1, 4))
    }

    #[test]
    fn test_durations() {
        assert_eq!(mei_dur(Rational::new(1, 4)), Some("4".to_string()));
        assert_eq!(mei_dur(Rational::from_integer(2)), Some("breve".to_string()));
        assert_eq!(mei_dur(Rational::new(3, 8)), None);
        assert_eq!(mei_dur(Rational::new(1, 6)), None);
    }

    #[test]
    fn test_document_skeleton() {
        let measure = MeasureBuilder::new("1", 1, 1)
            .clef(ClefKind::Treble)
            .time(2, 4)
            .notes(vec![quarter(DiatonicStep::C), quarter(DiatonicStep::E)])
            .barline(MsrBarline::final_bar())
            .build();
        let mut score = MsrScore::new();
        score.add_part(MsrPart::new("P1", "Flute").with_staff(MsrStaff::new(1).with_voice(MsrVoice::new(1, vec![measure]))));
        let root = translate(&score);

        assert_eq!(root.attribute("meiversion"), Some("5.0"));
        let tags: Vec<&str> = root.children().iter().map(|child| child.kind().tag_name()).collect();
        assert_eq!(tags, vec!["meiHead", "music"]);

        let measures = find(&root, K::Measure);
        assert_eq!(measures.len(), 1);
        assert_eq!(measures[0].attribute("right"), Some("end"));
        // initial clef lives in the staff definition only
        assert!(find(&root, K::Clef).iter().all(|clef| clef.attribute("xml:id").is_none()));
        assert!(find(&root, K::ScoreDef).len() == 1);

        let notes = find(&root, K::Note);
        assert_eq!(notes[0].attribute("pname"), Some("c"));
        assert_eq!(notes[0].attribute("oct"), Some("4"));
        assert_eq!(notes[0].attribute("dur"), Some("4"));
        assert_eq!(notes[0].attribute("xml:id"), Some("m1"));
    }

    #[test]
    fn test_staves_and_layers_sorted() {
        let voice2 = MeasureBuilder::new("1", 1, 2).note(MsrNote::rest(Rational::new(1, 1))).build();
        let voice1 = MeasureBuilder::new("1", 1, 1).note(MsrNote::rest(Rational::new(1, 1))).build();
        let mut score = MsrScore::new();
        score.add_part(
            MsrPart::new("P1", "Organ").with_staff(
                MsrStaff::new(1)
                    .with_voice(MsrVoice::new(2, vec![voice2]))
                    .with_voice(MsrVoice::new(1, vec![voice1])),
            ),
        );
        let root = translate(&score);
        let layers: Vec<&str> = find(&root, K::Layer).iter().filter_map(|layer| layer.attribute("n")).collect();
        assert_eq!(layers, vec!["1", "2"]);
    }

    #[test]
    fn test_chord_tuplet_and_grace() {
        let grace = MsrGraceNotesGroup::before(vec![MsrNote::pitched(
            DiatonicStep::D,
            Alteration::Natural,
            5,
            Rational::new(1, 8),
        )])
        .slashed();
        let measure = MeasureBuilder::new("1", 1, 1)
            .chord(MsrChord::new(vec![quarter(DiatonicStep::C), quarter(DiatonicStep::E)]))
            .tuplet(MsrTuplet::of_notes(
                1,
                3,
                2,
                vec![
                    MsrNote::pitched(DiatonicStep::C, Alteration::Natural, 5, Rational::new(1, 8)),
                    MsrNote::pitched(DiatonicStep::D, Alteration::Natural, 5, Rational::new(1, 8)),
                    MsrNote::pitched(DiatonicStep::E, Alteration::Natural, 5, Rational::new(1, 8)),
                ],
            ))
            .note(quarter(DiatonicStep::G).with_grace_notes_before(grace))
            .build();
        let mut score = MsrScore::new();
        score.add_part(MsrPart::new("P1", "Piano").with_staff(MsrStaff::new(1).with_voice(MsrVoice::new(1, vec![measure]))));
        let root = translate(&score);

        let layer = find(&root, K::Layer)[0];
        let tags: Vec<&str> = layer.children().iter().map(|child| child.kind().tag_name()).collect();
        assert_eq!(tags, vec!["chord", "tuplet", "graceGrp", "note"]);

        let chord = &layer.children()[0];
        assert_eq!(chord.attribute("dur"), Some("4"));
        assert!(chord.children().iter().all(|note| note.attribute("dur").is_none()));
        let tuplet = &layer.children()[1];
        assert_eq!(tuplet.attribute("num"), Some("3"));
        assert_eq!(tuplet.attribute("numbase"), Some("2"));
        assert_eq!(tuplet.children().len(), 3);
        let grace_group = &layer.children()[2];
        assert_eq!(grace_group.attribute("grace"), Some("unacc"));
        assert!(grace_group
            .children()
            .iter()
            .all(|note| note.attribute("grace") == Some("unacc")));
    }

    #[test]
    fn test_dynamics_become_control_events() {
        let measure = MeasureBuilder::new("1", 1, 1)
            .time(3, 4)
            .note(quarter(DiatonicStep::C))
            .note(quarter(DiatonicStep::D).with_dynamic(DynamicKind::MF))
            .build();
        let mut score = MsrScore::new();
        score.add_part(MsrPart::new("P1", "Flute").with_staff(MsrStaff::new(1).with_voice(MsrVoice::new(1, vec![measure]))));
        let root = translate(&score);
        let dynam = find(&root, K::Dynam)[0];
        assert_eq!(dynam.text(), Some("mf".to_string()));
        assert_eq!(dynam.attribute("tstamp"), Some("2"));
        assert_eq!(dynam.attribute("staff"), Some("1"));
        let note_id = find(&root, K::Note)[1].attribute("xml:id").unwrap().to_string();
        assert_eq!(dynam.attribute("startid"), Some(format!("#{}", note_id).as_str()));
    }
}
