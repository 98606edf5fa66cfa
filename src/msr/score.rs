//! MSR score structure
//!
//! A score holds header data (identification, layout, credits) and a tree of
//! part groups and parts. Parts hold staves, staves hold voices and voices
//! hold measures; measure contents are stored in musical order, which is the
//! order every translator visits them in.

use serde::{Deserialize, Serialize};

use super::types::*;

// ============================================================================
// HEADER: IDENTIFICATION, LAYOUT, CREDITS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsrCreator {
    /// Creator type: composer, lyricist, arranger...
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MsrIdentification {
    pub work_number: Option<String>,
    pub work_title: Option<String>,
    pub movement_number: Option<String>,
    pub movement_title: Option<String>,
    pub creators: Vec<MsrCreator>,
    pub rights: Vec<String>,
    pub software: Vec<String>,
    pub encoding_date: Option<String>,
}

impl MsrIdentification {
    /// Title to display: work title, else movement title
    pub fn title(&self) -> Option<&str> {
        self.work_title
            .as_deref()
            .or(self.movement_title.as_deref())
    }

    pub fn creators_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a MsrCreator> {
        self.creators.iter().filter(move |creator| creator.kind == kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    Millimeter,
    Centimeter,
    Inch,
}

/// A physical length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MsrLength {
    pub value: f64,
    pub unit: LengthUnit,
}

impl MsrLength {
    pub fn millimeters(value: f64) -> Self {
        MsrLength {
            value,
            unit: LengthUnit::Millimeter,
        }
    }

    pub fn to_millimeters(&self) -> f64 {
        match self.unit {
            LengthUnit::Millimeter => self.value,
            LengthUnit::Centimeter => self.value * 10.0,
            LengthUnit::Inch => self.value * 25.4,
        }
    }
}

/// Correspondence between millimeters and MusicXML tenths
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MsrScaling {
    pub millimeters: f64,
    pub tenths: f64,
}

impl Default for MsrScaling {
    fn default() -> Self {
        MsrScaling {
            millimeters: 7.2,
            tenths: 40.0,
        }
    }
}

impl MsrScaling {
    /// Convert a physical length to tenths, rounded to two decimals
    pub fn to_tenths(&self, length: &MsrLength) -> f64 {
        let tenths = length.to_millimeters() * self.tenths / self.millimeters;
        (tenths * 100.0).round() / 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MsrMargins {
    pub left: MsrLength,
    pub right: MsrLength,
    pub top: MsrLength,
    pub bottom: MsrLength,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MsrPageLayout {
    pub height: Option<MsrLength>,
    pub width: Option<MsrLength>,
    pub margins: Option<MsrMargins>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MsrSystemLayout {
    pub left_margin: Option<MsrLength>,
    pub right_margin: Option<MsrLength>,
    pub system_distance: Option<MsrLength>,
    pub top_system_distance: Option<MsrLength>,
}

impl MsrSystemLayout {
    pub fn is_empty(&self) -> bool {
        self.left_margin.is_none()
            && self.right_margin.is_none()
            && self.system_distance.is_none()
            && self.top_system_distance.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MsrStaffLayout {
    pub staff_number: Option<u32>,
    pub staff_distance: MsrLength,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrLineWidth {
    /// stem, beam, staff, light barline...
    pub kind: String,
    pub width: MsrLength,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrNoteSize {
    /// cue, grace, large...
    pub kind: String,
    /// Percentage of the regular note size
    pub size: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MsrAppearance {
    pub line_widths: Vec<MsrLineWidth>,
    pub note_sizes: Vec<MsrNoteSize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrCreditWords {
    pub text: String,
    pub default_x: Option<f64>,
    pub default_y: Option<f64>,
    pub font_size: Option<f64>,
    pub justify: Option<String>,
    pub valign: Option<String>,
}

impl MsrCreditWords {
    pub fn new(text: impl Into<String>) -> Self {
        MsrCreditWords {
            text: text.into(),
            default_x: None,
            default_y: None,
            font_size: None,
            justify: None,
            valign: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrCredit {
    pub page: u32,
    pub words: Vec<MsrCreditWords>,
    pub input_line: usize,
}

// ============================================================================
// SCORE, PART GROUPS, PARTS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MsrScore {
    pub identification: MsrIdentification,
    pub scaling: Option<MsrScaling>,
    pub page_layout: Option<MsrPageLayout>,
    pub system_layout: Option<MsrSystemLayout>,
    pub staff_layouts: Vec<MsrStaffLayout>,
    pub appearance: Option<MsrAppearance>,
    pub credits: Vec<MsrCredit>,
    /// Top-level part groups and parts, in score order
    pub elements: Vec<MsrPartGroupElement>,
    pub input_line: usize,
}

impl MsrScore {
    pub fn new() -> Self {
        MsrScore::default()
    }

    pub fn add_part(&mut self, part: MsrPart) {
        self.elements.push(MsrPartGroupElement::Part(part));
    }

    pub fn add_part_group(&mut self, group: MsrPartGroup) {
        self.elements.push(MsrPartGroupElement::PartGroup(group));
    }

    /// All parts, depth first, in score order
    pub fn parts(&self) -> Vec<&MsrPart> {
        let mut parts = Vec::new();
        collect_parts(&self.elements, &mut parts);
        parts
    }
}

fn collect_parts<'a>(elements: &'a [MsrPartGroupElement], parts: &mut Vec<&'a MsrPart>) {
    for element in elements {
        match element {
            MsrPartGroupElement::Part(part) => parts.push(part),
            MsrPartGroupElement::PartGroup(group) => collect_parts(&group.elements, parts),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartGroupSymbol {
    Brace,
    Bracket,
    Line,
    Square,
    None,
}

impl PartGroupSymbol {
    pub fn musicxml_name(&self) -> &'static str {
        match self {
            PartGroupSymbol::Brace => "brace",
            PartGroupSymbol::Bracket => "bracket",
            PartGroupSymbol::Line => "line",
            PartGroupSymbol::Square => "square",
            PartGroupSymbol::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrPartGroup {
    pub number: u32,
    pub symbol: Option<PartGroupSymbol>,
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    /// Barlines drawn through the whole group
    pub barline: bool,
    pub elements: Vec<MsrPartGroupElement>,
    pub input_line: usize,
}

impl MsrPartGroup {
    pub fn new(number: u32, symbol: Option<PartGroupSymbol>) -> Self {
        MsrPartGroup {
            number,
            symbol,
            name: None,
            abbreviation: None,
            barline: true,
            elements: Vec::new(),
            input_line: 0,
        }
    }

    pub fn add_part(&mut self, part: MsrPart) {
        self.elements.push(MsrPartGroupElement::Part(part));
    }

    pub fn add_part_group(&mut self, group: MsrPartGroup) {
        self.elements.push(MsrPartGroupElement::PartGroup(group));
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MsrPartGroupElement {
    PartGroup(MsrPartGroup),
    Part(MsrPart),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrPart {
    /// MusicXML part id, e.g. "P1"
    pub id: String,
    pub name: String,
    pub abbreviation: Option<String>,
    pub instrument_name: Option<String>,
    pub staves: Vec<MsrStaff>,
    pub input_line: usize,
}

impl MsrPart {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        MsrPart {
            id: id.into(),
            name: name.into(),
            abbreviation: None,
            instrument_name: None,
            staves: Vec::new(),
            input_line: 0,
        }
    }

    pub fn add_staff(&mut self, staff: MsrStaff) {
        self.staves.push(staff);
    }

    /// Builder-style [`MsrPart::add_staff`]
    pub fn with_staff(mut self, staff: MsrStaff) -> Self {
        self.add_staff(staff);
        self
    }

    /// Number of regular staves, as written in `<staves>`
    pub fn staves_count(&self) -> usize {
        self.staves.len()
    }

    /// Visit every note of the part, grace notes and chord members included
    pub fn for_each_note(&self, f: &mut impl FnMut(&MsrNote)) {
        for staff in &self.staves {
            for voice in &staff.voices {
                for measure in &voice.measures {
                    for element in &measure.elements {
                        element.for_each_note(f);
                    }
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrStaff {
    pub number: u32,
    pub lines: u8,
    pub voices: Vec<MsrVoice>,
    pub input_line: usize,
}

impl MsrStaff {
    pub fn new(number: u32) -> Self {
        MsrStaff {
            number,
            lines: 5,
            voices: Vec::new(),
            input_line: 0,
        }
    }

    pub fn with_voice(mut self, voice: MsrVoice) -> Self {
        self.voices.push(voice);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrVoice {
    pub number: u32,
    pub measures: Vec<MsrMeasure>,
    pub input_line: usize,
}

impl MsrVoice {
    pub fn new(number: u32, measures: Vec<MsrMeasure>) -> Self {
        MsrVoice {
            number,
            measures,
            input_line: 0,
        }
    }
}

// ============================================================================
// MEASURES AND THEIR CONTENTS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MsrPrintLayout {
    pub new_system: bool,
    pub new_page: bool,
    pub system_layout: Option<MsrSystemLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrMeasure {
    /// Measure number as written, measures are keyed by it
    pub number: String,
    /// Pickup or otherwise incomplete measure
    pub implicit: bool,
    pub print_layout: Option<MsrPrintLayout>,
    pub elements: Vec<MsrMeasureElement>,
    pub input_line: usize,
}

impl MsrMeasure {
    pub fn new(number: impl Into<String>) -> Self {
        MsrMeasure {
            number: number.into(),
            implicit: false,
            print_layout: None,
            elements: Vec::new(),
            input_line: 0,
        }
    }

    /// Sum of the sounding durations of the timeline entries
    pub fn sounding_whole_notes(&self) -> Rational {
        self.elements
            .iter()
            .map(|element| element.sounding_whole_notes())
            .fold(Rational::from_integer(0), |acc, duration| acc + duration)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MsrMeasureElement {
    Clef(MsrClef),
    Key(MsrKey),
    Time(MsrTime),
    Barline(MsrBarline),
    Tempo(MsrTempo),
    Rehearsal(MsrRehearsal),
    Sign(MsrSign),
    Note(MsrNote),
    Chord(MsrChord),
    Tuplet(MsrTuplet),
}

impl MsrMeasureElement {
    /// Time this element occupies on the voice timeline
    pub fn sounding_whole_notes(&self) -> Rational {
        match self {
            MsrMeasureElement::Note(note) => note.sounding_whole_notes,
            MsrMeasureElement::Chord(chord) => chord.sounding_whole_notes(),
            MsrMeasureElement::Tuplet(tuplet) => tuplet.sounding_whole_notes(),
            _ => Rational::from_integer(0),
        }
    }

    pub fn for_each_note(&self, f: &mut impl FnMut(&MsrNote)) {
        match self {
            MsrMeasureElement::Note(note) => note.for_each_note(f),
            MsrMeasureElement::Chord(chord) => chord.for_each_note(f),
            MsrMeasureElement::Tuplet(tuplet) => tuplet.for_each_note(f),
            _ => {}
        }
    }
}

/// A single note, rest or skip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrNote {
    pub input_line: usize,
    pub kind: NoteKind,
    /// Sounding pitch; display step/octave for unpitched notes
    pub pitch: Option<MsrPitch>,
    /// Actual time taken on the timeline, tuplet factor applied
    pub sounding_whole_notes: Rational,
    /// Notated value without dots, decides the note type
    pub display_whole_notes: Rational,
    pub dots: u8,
    pub position_in_measure: Rational,
    pub voice_number: u32,
    pub staff_number: u32,
    pub grace: bool,
    pub accidental: Option<MsrAccidental>,
    pub stem: Option<StemDirection>,
    pub beams: Vec<MsrBeam>,
    pub ties: Vec<TieKind>,
    pub slurs: Vec<MsrSlur>,
    pub articulations: Vec<MsrArticulation>,
    pub fermatas: Vec<FermataKind>,
    pub ornaments: Vec<MsrOrnament>,
    pub technicals: Vec<TechnicalKind>,
    pub dynamics: Vec<MsrDynamic>,
    pub wedges: Vec<MsrWedge>,
    pub words: Vec<MsrWords>,
    pub lyrics: Vec<MsrSyllable>,
    pub grace_notes_group_before: Option<Box<MsrGraceNotesGroup>>,
    pub grace_notes_group_after: Option<Box<MsrGraceNotesGroup>>,
}

impl MsrNote {
    fn with_kind(kind: NoteKind, pitch: Option<MsrPitch>, display_whole_notes: Rational) -> Self {
        MsrNote {
            input_line: 0,
            kind,
            pitch,
            sounding_whole_notes: display_whole_notes,
            display_whole_notes,
            dots: 0,
            position_in_measure: Rational::from_integer(0),
            voice_number: 1,
            staff_number: 1,
            grace: false,
            accidental: None,
            stem: None,
            beams: Vec::new(),
            ties: Vec::new(),
            slurs: Vec::new(),
            articulations: Vec::new(),
            fermatas: Vec::new(),
            ornaments: Vec::new(),
            technicals: Vec::new(),
            dynamics: Vec::new(),
            wedges: Vec::new(),
            words: Vec::new(),
            lyrics: Vec::new(),
            grace_notes_group_before: None,
            grace_notes_group_after: None,
        }
    }

    pub fn pitched(step: DiatonicStep, alteration: Alteration, octave: i8, value: Rational) -> Self {
        MsrNote::with_kind(
            NoteKind::Regular,
            Some(MsrPitch::new(step, alteration, octave)),
            value,
        )
    }

    pub fn rest(value: Rational) -> Self {
        MsrNote::with_kind(NoteKind::Rest, None, value)
    }

    /// Rest lasting the whole measure
    pub fn measure_rest(measure_duration: Rational) -> Self {
        let mut note = MsrNote::with_kind(NoteKind::MeasureRest, None, measure_duration);
        note.display_whole_notes = Rational::from_integer(1);
        note
    }

    pub fn skip(value: Rational) -> Self {
        MsrNote::with_kind(NoteKind::Skip, None, value)
    }

    pub fn unpitched(display_step: DiatonicStep, display_octave: i8, value: Rational) -> Self {
        MsrNote::with_kind(
            NoteKind::Unpitched,
            Some(MsrPitch::new(display_step, Alteration::Natural, display_octave)),
            value,
        )
    }

    /// Add augmentation dots, lengthening the sounding duration
    pub fn with_dots(mut self, dots: u8) -> Self {
        // value * (2 - 1/2^dots)
        let denominator = 1i32 << dots;
        let factor = Rational::new(2 * denominator - 1, denominator);
        self.sounding_whole_notes = self.sounding_whole_notes * factor;
        self.dots = dots;
        self
    }

    pub fn with_input_line(mut self, input_line: usize) -> Self {
        self.input_line = input_line;
        self
    }

    pub fn with_accidental(mut self, kind: AccidentalKind) -> Self {
        self.accidental = Some(MsrAccidental {
            kind,
            cautionary: false,
            editorial: false,
        });
        self
    }

    pub fn with_stem(mut self, stem: StemDirection) -> Self {
        self.stem = Some(stem);
        self
    }

    pub fn with_beam(mut self, number: u8, kind: BeamKind) -> Self {
        self.beams.push(MsrBeam { number, kind });
        self
    }

    pub fn with_tie(mut self, kind: TieKind) -> Self {
        self.ties.push(kind);
        self
    }

    pub fn with_slur(mut self, number: u8, kind: SlurKind) -> Self {
        self.slurs.push(MsrSlur {
            number,
            kind,
            placement: None,
        });
        self
    }

    pub fn with_articulation(mut self, kind: ArticulationKind) -> Self {
        self.articulations.push(MsrArticulation {
            kind,
            placement: None,
        });
        self
    }

    pub fn with_dynamic(mut self, kind: DynamicKind) -> Self {
        self.dynamics.push(MsrDynamic {
            kind,
            placement: Some(Placement::Below),
        });
        self
    }

    pub fn with_lyric(mut self, kind: SyllableKind, text: impl Into<String>) -> Self {
        self.lyrics.push(MsrSyllable {
            stanza: "1".to_string(),
            kind,
            text: text.into(),
            extend: false,
        });
        self
    }

    pub fn with_grace_notes_before(mut self, group: MsrGraceNotesGroup) -> Self {
        self.grace_notes_group_before = Some(Box::new(group));
        self
    }

    pub fn with_grace_notes_after(mut self, group: MsrGraceNotesGroup) -> Self {
        self.grace_notes_group_after = Some(Box::new(group));
        self
    }

    pub fn is_skip(&self) -> bool {
        self.kind == NoteKind::Skip
    }

    pub fn is_rest(&self) -> bool {
        matches!(self.kind, NoteKind::Rest | NoteKind::MeasureRest)
    }

    pub fn has_grace_notes(&self) -> bool {
        self.grace_notes_group_before.is_some() || self.grace_notes_group_after.is_some()
    }

    /// Position right after this note in its measure
    pub fn end_position(&self) -> Rational {
        self.position_in_measure + self.sounding_whole_notes
    }

    /// Shrink the sounding duration by a tuplet factor
    pub(crate) fn scale(&mut self, actual: u32, normal: u32) {
        self.sounding_whole_notes =
            self.sounding_whole_notes * Rational::new(normal as i32, actual as i32);
    }

    pub fn for_each_note(&self, f: &mut impl FnMut(&MsrNote)) {
        if let Some(group) = &self.grace_notes_group_before {
            group.notes.iter().for_each(|note| f(note));
        }
        f(self);
        if let Some(group) = &self.grace_notes_group_after {
            group.notes.iter().for_each(|note| f(note));
        }
    }
}

/// Notes sounding together; the first member carries the chord's duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrChord {
    pub notes: Vec<MsrNote>,
    pub input_line: usize,
}

impl MsrChord {
    pub fn new(notes: Vec<MsrNote>) -> Self {
        MsrChord {
            notes,
            input_line: 0,
        }
    }

    pub fn sounding_whole_notes(&self) -> Rational {
        self.notes
            .first()
            .map(|note| note.sounding_whole_notes)
            .unwrap_or_else(|| Rational::from_integer(0))
    }

    pub fn for_each_note(&self, f: &mut impl FnMut(&MsrNote)) {
        for note in &self.notes {
            note.for_each_note(f);
        }
    }

    fn scale(&mut self, actual: u32, normal: u32) {
        for note in &mut self.notes {
            note.scale(actual, normal);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MsrTupletElement {
    Note(MsrNote),
    Chord(MsrChord),
    Tuplet(MsrTuplet),
}

impl MsrTupletElement {
    pub fn sounding_whole_notes(&self) -> Rational {
        match self {
            MsrTupletElement::Note(note) => note.sounding_whole_notes,
            MsrTupletElement::Chord(chord) => chord.sounding_whole_notes(),
            MsrTupletElement::Tuplet(tuplet) => tuplet.sounding_whole_notes(),
        }
    }

    /// A skip note, or a nested tuplet holding nothing but skips
    pub fn is_skip(&self) -> bool {
        match self {
            MsrTupletElement::Note(note) => note.is_skip(),
            MsrTupletElement::Chord(_) => false,
            MsrTupletElement::Tuplet(tuplet) => tuplet.elements.iter().all(MsrTupletElement::is_skip),
        }
    }

    fn scale(&mut self, actual: u32, normal: u32) {
        match self {
            MsrTupletElement::Note(note) => note.scale(actual, normal),
            MsrTupletElement::Chord(chord) => chord.scale(actual, normal),
            MsrTupletElement::Tuplet(tuplet) => {
                for element in &mut tuplet.elements {
                    element.scale(actual, normal);
                }
            }
        }
    }
}

/// `actual` notes in the time of `normal` ones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrTuplet {
    pub number: u8,
    pub actual_notes: u32,
    pub normal_notes: u32,
    pub bracket: bool,
    pub show_number: bool,
    pub placement: Option<Placement>,
    pub elements: Vec<MsrTupletElement>,
    pub input_line: usize,
}

impl MsrTuplet {
    /// Build a tuplet from notated values; member sounding durations are
    /// scaled by `normal / actual`, nested tuplets included
    pub fn new(number: u8, actual_notes: u32, normal_notes: u32, elements: Vec<MsrTupletElement>) -> Self {
        let mut elements = elements;
        for element in &mut elements {
            element.scale(actual_notes, normal_notes);
        }
        MsrTuplet {
            number,
            actual_notes,
            normal_notes,
            bracket: true,
            show_number: true,
            placement: None,
            elements,
            input_line: 0,
        }
    }

    pub fn of_notes(number: u8, actual_notes: u32, normal_notes: u32, notes: Vec<MsrNote>) -> Self {
        MsrTuplet::new(
            number,
            actual_notes,
            normal_notes,
            notes.into_iter().map(MsrTupletElement::Note).collect(),
        )
    }

    pub fn sounding_whole_notes(&self) -> Rational {
        self.elements
            .iter()
            .map(|element| element.sounding_whole_notes())
            .fold(Rational::from_integer(0), |acc, duration| acc + duration)
    }

    /// 1-based index of the last member that is not a skip
    pub fn last_sounding_member(&self) -> Option<usize> {
        self.elements
            .iter()
            .rposition(|element| !element.is_skip())
            .map(|index| index + 1)
    }

    pub fn for_each_note(&self, f: &mut impl FnMut(&MsrNote)) {
        for element in &self.elements {
            match element {
                MsrTupletElement::Note(note) => note.for_each_note(f),
                MsrTupletElement::Chord(chord) => chord.for_each_note(f),
                MsrTupletElement::Tuplet(tuplet) => tuplet.for_each_note(f),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraceNotesGroupKind {
    Before,
    After,
}

/// Grace notes attached to a principal note; they take no measure time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrGraceNotesGroup {
    pub kind: GraceNotesGroupKind,
    pub slashed: bool,
    pub beamed: bool,
    pub notes: Vec<MsrNote>,
    pub input_line: usize,
}

impl MsrGraceNotesGroup {
    pub fn new(kind: GraceNotesGroupKind, notes: Vec<MsrNote>) -> Self {
        let notes = notes
            .into_iter()
            .map(|mut note| {
                note.grace = true;
                note.sounding_whole_notes = Rational::from_integer(0);
                note
            })
            .collect();
        MsrGraceNotesGroup {
            kind,
            slashed: false,
            beamed: false,
            notes,
            input_line: 0,
        }
    }

    pub fn before(notes: Vec<MsrNote>) -> Self {
        MsrGraceNotesGroup::new(GraceNotesGroupKind::Before, notes)
    }

    pub fn after(notes: Vec<MsrNote>) -> Self {
        MsrGraceNotesGroup::new(GraceNotesGroupKind::After, notes)
    }

    pub fn slashed(mut self) -> Self {
        self.slashed = true;
        self
    }

    pub fn beamed(mut self) -> Self {
        self.beamed = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quarter() -> Rational {
        Rational::new(1, 4)
    }

    #[test]
    fn test_dots_lengthen_sounding_duration() {
        let note = MsrNote::pitched(DiatonicStep::C, Alteration::Natural, 4, quarter()).with_dots(1);
        assert_eq!(note.sounding_whole_notes, Rational::new(3, 8));
        assert_eq!(note.display_whole_notes, quarter());

        let double = MsrNote::rest(Rational::new(1, 2)).with_dots(2);
        assert_eq!(double.sounding_whole_notes, Rational::new(7, 8));
    }

    #[test]
    fn test_tuplet_scales_members() {
        let eighth = Rational::new(1, 8);
        let notes = vec![
            MsrNote::pitched(DiatonicStep::C, Alteration::Natural, 4, eighth),
            MsrNote::pitched(DiatonicStep::D, Alteration::Natural, 4, eighth),
            MsrNote::pitched(DiatonicStep::E, Alteration::Natural, 4, eighth),
        ];
        let tuplet = MsrTuplet::of_notes(1, 3, 2, notes);
        assert_eq!(tuplet.sounding_whole_notes(), quarter());
        match &tuplet.elements[0] {
            MsrTupletElement::Note(note) => {
                assert_eq!(note.sounding_whole_notes, Rational::new(1, 12));
                assert_eq!(note.display_whole_notes, eighth);
            }
            other => panic!("unexpected tuplet element {:?}", other),
        }
    }

    #[test]
    fn test_grace_notes_take_no_time() {
        let group = MsrGraceNotesGroup::before(vec![MsrNote::pitched(
            DiatonicStep::D,
            Alteration::Natural,
            5,
            Rational::new(1, 16),
        )]);
        assert!(group.notes[0].grace);
        assert_eq!(group.notes[0].sounding_whole_notes, Rational::from_integer(0));
    }

    #[test]
    fn test_scaling_converts_to_tenths() {
        let scaling = MsrScaling::default();
        assert_eq!(scaling.to_tenths(&MsrLength::millimeters(7.2)), 40.0);
        let inch = MsrLength {
            value: 1.0,
            unit: LengthUnit::Inch,
        };
        assert_eq!(scaling.to_tenths(&inch), 141.11);
    }

    #[test]
    fn test_parts_are_collected_depth_first() {
        let mut score = MsrScore::new();
        let mut group = MsrPartGroup::new(1, Some(PartGroupSymbol::Bracket));
        group.add_part(MsrPart::new("P1", "Violin"));
        group.add_part(MsrPart::new("P2", "Viola"));
        score.add_part_group(group);
        score.add_part(MsrPart::new("P3", "Cello"));
        let ids: Vec<&str> = score.parts().iter().map(|part| part.id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P2", "P3"]);
    }
}
