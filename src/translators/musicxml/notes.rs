//! `<note>` and `<direction>` element construction
//!
//! The translator decides where an element goes; these functions only
//! build it, children in MusicXML schema order.

use super::divisions::DivisionsEngine;
use super::kinds::MusicXmlKind as K;
use crate::errors::{TranslationError, TranslationResult};
use crate::msr::*;
use crate::tree::Element;
use crate::utils::note_type_name;

type XmlElement = Element<K>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TupletMarkerKind {
    Start,
    Stop,
}

/// `<tuplet>` notation to put on a note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TupletMarker {
    pub kind: TupletMarkerKind,
    pub number: u8,
    pub bracket: bool,
    pub show_number: bool,
    pub placement: Option<Placement>,
}

/// What the translator knows about a note beyond the note itself
#[derive(Debug, Default)]
pub struct NoteContext {
    /// Not the first member of a chord
    pub chord_member: bool,
    /// Combined actual/normal factor of the enclosing tuplets
    pub time_modification: Option<(u32, u32)>,
    pub tuplet_markers: Vec<TupletMarker>,
    /// `Some(slashed)` for grace notes
    pub grace: Option<bool>,
    /// Beam to use when the note has none and its grace group is beamed
    pub grace_beam: Option<BeamKind>,
    /// Write `<staff>` (parts with several staves)
    pub multi_staff: bool,
}

/// Build a complete `<note>` element. Skips are never built.
pub fn note_element(
    note: &MsrNote,
    context: &NoteContext,
    divisions: &DivisionsEngine,
) -> TranslationResult<XmlElement> {
    let mut element = Element::new(K::Note);

    if let Some(slashed) = context.grace {
        let mut grace = Element::new(K::Grace);
        if slashed {
            grace.add_attribute("slash", "yes");
        }
        element.push(grace);
    }
    if context.chord_member {
        element.push_empty(K::Chord);
    }

    match note.kind {
        NoteKind::Regular => element.push(pitch_element(note)?),
        NoteKind::Unpitched => element.push(unpitched_element(note)?),
        NoteKind::Rest => element.push_empty(K::Rest),
        NoteKind::MeasureRest => element.push(Element::new(K::Rest).with_attribute("measure", "yes")),
        NoteKind::Skip => {
            return Err(TranslationError::internal(
                "a skip cannot become a <note>",
                note.input_line,
            ))
        }
    }

    if context.grace.is_none() {
        element.push_leaf(
            K::Duration,
            divisions.to_divisions(note.sounding_whole_notes, note.input_line)?,
        );
    }

    for tie in &note.ties {
        match tie {
            TieKind::Start => element.push(Element::new(K::Tie).with_attribute("type", "start")),
            TieKind::Stop => element.push(Element::new(K::Tie).with_attribute("type", "stop")),
            TieKind::Continue => {
                element.push(Element::new(K::Tie).with_attribute("type", "stop"));
                element.push(Element::new(K::Tie).with_attribute("type", "start"));
            }
        }
    }

    element.push_leaf(K::Voice, note.voice_number);

    if note.kind != NoteKind::MeasureRest {
        let type_name = note_type_name(note.display_whole_notes).ok_or_else(|| {
            TranslationError::internal(
                format!(
                    "no note type for a notated value of {} whole notes",
                    note.display_whole_notes
                ),
                note.input_line,
            )
        })?;
        element.push_leaf(K::Type, type_name);
        for _ in 0..note.dots {
            element.push_empty(K::Dot);
        }
    }

    if let Some(accidental) = &note.accidental {
        let mut accidental_element = Element::leaf(K::Accidental, accidental.kind.musicxml_name());
        if accidental.cautionary {
            accidental_element.add_attribute("cautionary", "yes");
        }
        if accidental.editorial {
            accidental_element.add_attribute("editorial", "yes");
        }
        element.push(accidental_element);
    }

    if let Some((actual, normal)) = context.time_modification {
        let mut time_modification = Element::new(K::TimeModification);
        time_modification.push_leaf(K::ActualNotes, actual);
        time_modification.push_leaf(K::NormalNotes, normal);
        element.push(time_modification);
    }

    if let Some(stem) = note.stem {
        element.push_leaf(K::Stem, stem.musicxml_name());
    }

    if context.multi_staff {
        element.push_leaf(K::Staff, note.staff_number);
    }

    if note.beams.is_empty() {
        if let Some(beam) = context.grace_beam {
            element.push(Element::leaf(K::Beam, beam.musicxml_name()).with_attribute("number", 1));
        }
    }
    for beam in &note.beams {
        element.push(Element::leaf(K::Beam, beam.kind.musicxml_name()).with_attribute("number", beam.number));
    }

    if let Some(notations) = notations_element(note, &context.tuplet_markers) {
        element.push(notations);
    }

    for syllable in &note.lyrics {
        let mut lyric = Element::new(K::Lyric).with_attribute("number", &syllable.stanza);
        lyric.push_leaf(K::Syllabic, syllable.kind.musicxml_name());
        lyric.push_leaf(K::Text, syllable.text.as_str());
        if syllable.extend {
            lyric.push_empty(K::Extend);
        }
        element.push(lyric);
    }

    Ok(element)
}

fn pitch_element(note: &MsrNote) -> TranslationResult<XmlElement> {
    let pitch = note
        .pitch
        .ok_or_else(|| TranslationError::internal("pitched note without a pitch", note.input_line))?;
    let mut element = Element::new(K::Pitch);
    element.push_leaf(K::Step, pitch.step.letter());
    if pitch.alteration != Alteration::Natural {
        element.push_leaf(K::Alter, pitch.alteration.semitones());
    }
    element.push_leaf(K::Octave, pitch.octave);
    Ok(element)
}

fn unpitched_element(note: &MsrNote) -> TranslationResult<XmlElement> {
    let mut element = Element::new(K::Unpitched);
    if let Some(pitch) = note.pitch {
        element.push_leaf(K::DisplayStep, pitch.step.letter());
        element.push_leaf(K::DisplayOctave, pitch.octave);
    }
    Ok(element)
}

fn placed(mut element: XmlElement, placement: Option<Placement>) -> XmlElement {
    if let Some(placement) = placement {
        element.add_attribute("placement", placement.musicxml_name());
    }
    element
}

/// `<notations>` in the order tied, slur, tuplet, ornaments, technical,
/// articulations, fermata; `None` when empty
fn notations_element(note: &MsrNote, tuplet_markers: &[TupletMarker]) -> Option<XmlElement> {
    let mut notations = Element::new(K::Notations);

    for tie in &note.ties {
        let kind = match tie {
            TieKind::Start => "start",
            TieKind::Continue => "continue",
            TieKind::Stop => "stop",
        };
        notations.push(Element::new(K::Tied).with_attribute("type", kind));
    }

    for slur in &note.slurs {
        let element = Element::new(K::Slur)
            .with_attribute("type", slur.kind.musicxml_name())
            .with_attribute("number", slur.number);
        notations.push(placed(element, slur.placement));
    }

    for marker in tuplet_markers {
        let mut element = Element::new(K::Tuplet).with_attribute(
            "type",
            match marker.kind {
                TupletMarkerKind::Start => "start",
                TupletMarkerKind::Stop => "stop",
            },
        );
        element.add_attribute("number", marker.number);
        if marker.kind == TupletMarkerKind::Start {
            element.add_attribute("bracket", if marker.bracket { "yes" } else { "no" });
            element.add_attribute("show-number", if marker.show_number { "actual" } else { "none" });
            element = placed(element, marker.placement);
        }
        notations.push(element);
    }

    if !note.ornaments.is_empty() {
        let mut ornaments = Element::new(K::Ornaments);
        for ornament in &note.ornaments {
            let element = match ornament.kind {
                OrnamentKind::Tremolo(marks) => {
                    Element::leaf(K::Tremolo, marks).with_attribute("type", "single")
                }
                kind => Element::new(K::for_ornament(kind)),
            };
            ornaments.push(placed(element, ornament.placement));
        }
        notations.push(ornaments);
    }

    if !note.technicals.is_empty() {
        let mut technical = Element::new(K::Technical);
        for kind in &note.technicals {
            let element = match kind {
                TechnicalKind::Fingering(value) | TechnicalKind::String(value) | TechnicalKind::Fret(value) => {
                    Element::leaf(K::for_technical(kind), *value)
                }
                TechnicalKind::Pluck(text) => Element::leaf(K::Pluck, text.as_str()),
                other => Element::new(K::for_technical(other)),
            };
            technical.push(element);
        }
        notations.push(technical);
    }

    if !note.articulations.is_empty() {
        let mut articulations = Element::new(K::Articulations);
        for articulation in &note.articulations {
            articulations.push(placed(
                Element::new(K::for_articulation(articulation.kind)),
                articulation.placement,
            ));
        }
        notations.push(articulations);
    }

    for fermata in &note.fermatas {
        let kind = match fermata {
            FermataKind::Upright => "upright",
            FermataKind::Inverted => "inverted",
        };
        notations.push(Element::new(K::Fermata).with_attribute("type", kind));
    }

    notations.has_children().then_some(notations)
}

/// Directions attached to a note (dynamics, wedges, words), each one a
/// `<direction>` to emit right before the note
pub fn note_directions(note: &MsrNote, multi_staff: bool) -> Vec<XmlElement> {
    let mut directions = Vec::new();

    for dynamic in &note.dynamics {
        let mut dynamics = Element::new(K::Dynamics);
        dynamics.push_empty(K::for_dynamic(dynamic.kind));
        directions.push(direction(dynamics, dynamic.placement, note, multi_staff));
    }
    for wedge in &note.wedges {
        let element = Element::new(K::Wedge)
            .with_attribute("type", wedge.kind.musicxml_name())
            .with_attribute("number", wedge.number);
        directions.push(direction(element, wedge.placement, note, multi_staff));
    }
    for words in &note.words {
        let element = Element::leaf(K::Words, words.text.as_str());
        directions.push(direction(element, words.placement, note, multi_staff));
    }

    directions
}

fn direction(content: XmlElement, placement: Option<Placement>, note: &MsrNote, multi_staff: bool) -> XmlElement {
    let mut direction_type = Element::new(K::DirectionType);
    direction_type.push(content);
    let mut element = placed(Element::new(K::Direction), placement);
    element.push(direction_type);
    element.push_leaf(K::Voice, note.voice_number);
    if multi_staff {
        element.push_leaf(K::Staff, note.staff_number);
    }
    element
}

/// Measure-level `<direction>` with a single direction type
pub fn measure_direction(content: Vec<XmlElement>, placement: Option<Placement>, staff: Option<u32>) -> XmlElement {
    let mut element = placed(Element::new(K::Direction), placement);
    for item in content {
        let mut direction_type = Element::new(K::DirectionType);
        direction_type.push(item);
        element.push(direction_type);
    }
    if let Some(staff) = staff {
        element.push_leaf(K::Staff, staff);
    }
    element
}

/// Words (optional) and metronome for a tempo
pub fn tempo_contents(tempo: &MsrTempo) -> TranslationResult<Vec<XmlElement>> {
    let mut contents = Vec::new();
    if let Some(words) = &tempo.words {
        contents.push(Element::leaf(K::Words, words.as_str()));
    }
    let beat_unit = note_type_name(tempo.beat_unit).ok_or_else(|| {
        TranslationError::internal(
            format!("no beat unit for {} whole notes", tempo.beat_unit),
            tempo.input_line,
        )
    })?;
    let mut metronome = Element::new(K::Metronome);
    metronome.push_leaf(K::BeatUnit, beat_unit);
    for _ in 0..tempo.beat_unit_dots {
        metronome.push_empty(K::BeatUnitDot);
    }
    metronome.push_leaf(K::PerMinute, tempo.per_minute);
    contents.push(metronome);
    Ok(contents)
}

pub fn barline_element(barline: &MsrBarline) -> XmlElement {
    let mut element = Element::new(K::Barline).with_attribute("location", barline.location.musicxml_name());
    element.push_leaf(K::BarStyle, barline.style.musicxml_name());
    if let Some(ending) = &barline.ending {
        element.push(
            Element::new(K::Ending)
                .with_attribute("number", &ending.number)
                .with_attribute("type", ending.kind.musicxml_name()),
        );
    }
    if let Some(repeat) = &barline.repeat {
        let mut repeat_element = Element::new(K::Repeat).with_attribute(
            "direction",
            match repeat.direction {
                RepeatDirection::Forward => "forward",
                RepeatDirection::Backward => "backward",
            },
        );
        if let Some(times) = repeat.times {
            repeat_element.add_attribute("times", times);
        }
        element.push(repeat_element);
    }
    element
}
