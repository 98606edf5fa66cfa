//! MSR value types: pitches, durations and the small enumerations notes,
//! clefs, keys and barlines are made of.

use num_rational::Rational32;
use serde::{Deserialize, Serialize};

/// Durations and positions are exact fractions of a whole note
pub type Rational = Rational32;

// ============================================================================
// PITCH
// ============================================================================

/// Diatonic step (note letter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiatonicStep {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl DiatonicStep {
    pub fn letter(&self) -> &'static str {
        match self {
            DiatonicStep::C => "C",
            DiatonicStep::D => "D",
            DiatonicStep::E => "E",
            DiatonicStep::F => "F",
            DiatonicStep::G => "G",
            DiatonicStep::A => "A",
            DiatonicStep::B => "B",
        }
    }

    /// Scale degree from C (0=C ... 6=B)
    pub fn index(&self) -> i32 {
        match self {
            DiatonicStep::C => 0,
            DiatonicStep::D => 1,
            DiatonicStep::E => 2,
            DiatonicStep::F => 3,
            DiatonicStep::G => 4,
            DiatonicStep::A => 5,
            DiatonicStep::B => 6,
        }
    }
}

/// Chromatic alteration, including quarter tones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alteration {
    DoubleFlat,
    SesquiFlat,
    Flat,
    SemiFlat,
    #[default]
    Natural,
    SemiSharp,
    Sharp,
    SesquiSharp,
    DoubleSharp,
}

impl Alteration {
    /// Semitone offset as written in MusicXML `<alter>`
    pub fn semitones(&self) -> f64 {
        match self {
            Alteration::DoubleFlat => -2.0,
            Alteration::SesquiFlat => -1.5,
            Alteration::Flat => -1.0,
            Alteration::SemiFlat => -0.5,
            Alteration::Natural => 0.0,
            Alteration::SemiSharp => 0.5,
            Alteration::Sharp => 1.0,
            Alteration::SesquiSharp => 1.5,
            Alteration::DoubleSharp => 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsrPitch {
    pub step: DiatonicStep,
    pub alteration: Alteration,
    /// Octave number (4 = middle C octave)
    pub octave: i8,
}

impl MsrPitch {
    pub fn new(step: DiatonicStep, alteration: Alteration, octave: i8) -> Self {
        MsrPitch {
            step,
            alteration,
            octave,
        }
    }

    /// Diatonic index counted from C0, used for interval arithmetic
    pub fn diatonic_number(&self) -> i32 {
        self.octave as i32 * 7 + self.step.index()
    }
}

// ============================================================================
// NOTE ATTACHMENTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoteKind {
    #[default]
    Regular,
    Rest,
    /// Rest filling a whole measure
    MeasureRest,
    /// Invisible placeholder advancing time in a voice
    Skip,
    Unpitched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccidentalKind {
    Sharp,
    Natural,
    Flat,
    DoubleSharp,
    SharpSharp,
    FlatFlat,
    NaturalSharp,
    NaturalFlat,
    QuarterFlat,
    QuarterSharp,
    ThreeQuartersFlat,
    ThreeQuartersSharp,
}

impl AccidentalKind {
    pub fn musicxml_name(&self) -> &'static str {
        match self {
            AccidentalKind::Sharp => "sharp",
            AccidentalKind::Natural => "natural",
            AccidentalKind::Flat => "flat",
            AccidentalKind::DoubleSharp => "double-sharp",
            AccidentalKind::SharpSharp => "sharp-sharp",
            AccidentalKind::FlatFlat => "flat-flat",
            AccidentalKind::NaturalSharp => "natural-sharp",
            AccidentalKind::NaturalFlat => "natural-flat",
            AccidentalKind::QuarterFlat => "quarter-flat",
            AccidentalKind::QuarterSharp => "quarter-sharp",
            AccidentalKind::ThreeQuartersFlat => "three-quarters-flat",
            AccidentalKind::ThreeQuartersSharp => "three-quarters-sharp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsrAccidental {
    pub kind: AccidentalKind,
    pub cautionary: bool,
    pub editorial: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StemDirection {
    Up,
    Down,
    None,
    Double,
}

impl StemDirection {
    pub fn musicxml_name(&self) -> &'static str {
        match self {
            StemDirection::Up => "up",
            StemDirection::Down => "down",
            StemDirection::None => "none",
            StemDirection::Double => "double",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamKind {
    Begin,
    Continue,
    End,
    ForwardHook,
    BackwardHook,
}

impl BeamKind {
    pub fn musicxml_name(&self) -> &'static str {
        match self {
            BeamKind::Begin => "begin",
            BeamKind::Continue => "continue",
            BeamKind::End => "end",
            BeamKind::ForwardHook => "forward hook",
            BeamKind::BackwardHook => "backward hook",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsrBeam {
    pub number: u8,
    pub kind: BeamKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieKind {
    Start,
    Continue,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlurKind {
    Start,
    Continue,
    Stop,
}

impl SlurKind {
    pub fn musicxml_name(&self) -> &'static str {
        match self {
            SlurKind::Start => "start",
            SlurKind::Continue => "continue",
            SlurKind::Stop => "stop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    Above,
    Below,
}

impl Placement {
    pub fn musicxml_name(&self) -> &'static str {
        match self {
            Placement::Above => "above",
            Placement::Below => "below",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsrSlur {
    pub number: u8,
    pub kind: SlurKind,
    pub placement: Option<Placement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArticulationKind {
    Accent,
    StrongAccent,
    Staccato,
    Staccatissimo,
    Spiccato,
    Tenuto,
    DetachedLegato,
    Stress,
    Unstress,
    BreathMark,
    Caesura,
    Scoop,
    Plop,
    Doit,
    Falloff,
}

impl ArticulationKind {
    pub fn musicxml_name(&self) -> &'static str {
        match self {
            ArticulationKind::Accent => "accent",
            ArticulationKind::StrongAccent => "strong-accent",
            ArticulationKind::Staccato => "staccato",
            ArticulationKind::Staccatissimo => "staccatissimo",
            ArticulationKind::Spiccato => "spiccato",
            ArticulationKind::Tenuto => "tenuto",
            ArticulationKind::DetachedLegato => "detached-legato",
            ArticulationKind::Stress => "stress",
            ArticulationKind::Unstress => "unstress",
            ArticulationKind::BreathMark => "breath-mark",
            ArticulationKind::Caesura => "caesura",
            ArticulationKind::Scoop => "scoop",
            ArticulationKind::Plop => "plop",
            ArticulationKind::Doit => "doit",
            ArticulationKind::Falloff => "falloff",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsrArticulation {
    pub kind: ArticulationKind,
    pub placement: Option<Placement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FermataKind {
    Upright,
    Inverted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrnamentKind {
    TrillMark,
    Turn,
    InvertedTurn,
    DelayedTurn,
    DelayedInvertedTurn,
    VerticalTurn,
    Mordent,
    InvertedMordent,
    Schleifer,
    Shake,
    /// Single-note tremolo with the given number of marks
    Tremolo(u8),
}

impl OrnamentKind {
    pub fn musicxml_name(&self) -> &'static str {
        match self {
            OrnamentKind::TrillMark => "trill-mark",
            OrnamentKind::Turn => "turn",
            OrnamentKind::InvertedTurn => "inverted-turn",
            OrnamentKind::DelayedTurn => "delayed-turn",
            OrnamentKind::DelayedInvertedTurn => "delayed-inverted-turn",
            OrnamentKind::VerticalTurn => "vertical-turn",
            OrnamentKind::Mordent => "mordent",
            OrnamentKind::InvertedMordent => "inverted-mordent",
            OrnamentKind::Schleifer => "schleifer",
            OrnamentKind::Shake => "shake",
            OrnamentKind::Tremolo(_) => "tremolo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsrOrnament {
    pub kind: OrnamentKind,
    pub placement: Option<Placement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TechnicalKind {
    UpBow,
    DownBow,
    Harmonic,
    OpenString,
    ThumbPosition,
    Stopped,
    SnapPizzicato,
    DoubleTongue,
    TripleTongue,
    Tap,
    Fingernails,
    Fingering(u8),
    String(u8),
    Fret(u8),
    Pluck(String),
}

impl TechnicalKind {
    pub fn musicxml_name(&self) -> &'static str {
        match self {
            TechnicalKind::UpBow => "up-bow",
            TechnicalKind::DownBow => "down-bow",
            TechnicalKind::Harmonic => "harmonic",
            TechnicalKind::OpenString => "open-string",
            TechnicalKind::ThumbPosition => "thumb-position",
            TechnicalKind::Stopped => "stopped",
            TechnicalKind::SnapPizzicato => "snap-pizzicato",
            TechnicalKind::DoubleTongue => "double-tongue",
            TechnicalKind::TripleTongue => "triple-tongue",
            TechnicalKind::Tap => "tap",
            TechnicalKind::Fingernails => "fingernails",
            TechnicalKind::Fingering(_) => "fingering",
            TechnicalKind::String(_) => "string",
            TechnicalKind::Fret(_) => "fret",
            TechnicalKind::Pluck(_) => "pluck",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DynamicKind {
    PPPPP,
    PPPP,
    PPP,
    PP,
    P,
    MP,
    MF,
    F,
    FF,
    FFF,
    FFFF,
    FFFFF,
    FP,
    FZ,
    PF,
    RF,
    RFZ,
    SF,
    SFP,
    SFPP,
    SFZ,
    SFFZ,
    N,
}

impl DynamicKind {
    /// Element name inside MusicXML `<dynamics>`, also the letters printed
    pub fn musicxml_name(&self) -> &'static str {
        match self {
            DynamicKind::PPPPP => "ppppp",
            DynamicKind::PPPP => "pppp",
            DynamicKind::PPP => "ppp",
            DynamicKind::PP => "pp",
            DynamicKind::P => "p",
            DynamicKind::MP => "mp",
            DynamicKind::MF => "mf",
            DynamicKind::F => "f",
            DynamicKind::FF => "ff",
            DynamicKind::FFF => "fff",
            DynamicKind::FFFF => "ffff",
            DynamicKind::FFFFF => "fffff",
            DynamicKind::FP => "fp",
            DynamicKind::FZ => "fz",
            DynamicKind::PF => "pf",
            DynamicKind::RF => "rf",
            DynamicKind::RFZ => "rfz",
            DynamicKind::SF => "sf",
            DynamicKind::SFP => "sfp",
            DynamicKind::SFPP => "sfpp",
            DynamicKind::SFZ => "sfz",
            DynamicKind::SFFZ => "sffz",
            DynamicKind::N => "n",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsrDynamic {
    pub kind: DynamicKind,
    pub placement: Option<Placement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WedgeKind {
    Crescendo,
    Diminuendo,
    Stop,
}

impl WedgeKind {
    pub fn musicxml_name(&self) -> &'static str {
        match self {
            WedgeKind::Crescendo => "crescendo",
            WedgeKind::Diminuendo => "diminuendo",
            WedgeKind::Stop => "stop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsrWedge {
    pub number: u8,
    pub kind: WedgeKind,
    pub placement: Option<Placement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsrWords {
    pub text: String,
    pub placement: Option<Placement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyllableKind {
    Single,
    Begin,
    Middle,
    End,
}

impl SyllableKind {
    pub fn musicxml_name(&self) -> &'static str {
        match self {
            SyllableKind::Single => "single",
            SyllableKind::Begin => "begin",
            SyllableKind::Middle => "middle",
            SyllableKind::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsrSyllable {
    /// Stanza (verse) number
    pub stanza: String,
    pub kind: SyllableKind,
    pub text: String,
    pub extend: bool,
}

// ============================================================================
// MEASURE-LEVEL ELEMENTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClefKind {
    Treble,
    TrebleMinus8,
    TreblePlus8,
    Soprano,
    MezzoSoprano,
    Alto,
    Tenor,
    Baritone,
    Bass,
    BassMinus8,
    BassPlus8,
    SubBass,
    French,
    Percussion,
    Tablature,
    None,
}

impl ClefKind {
    /// (sign, line, octave change)
    pub fn sign_line_octave(&self) -> (&'static str, Option<u8>, i8) {
        match self {
            ClefKind::Treble => ("G", Some(2), 0),
            ClefKind::TrebleMinus8 => ("G", Some(2), -1),
            ClefKind::TreblePlus8 => ("G", Some(2), 1),
            ClefKind::Soprano => ("C", Some(1), 0),
            ClefKind::MezzoSoprano => ("C", Some(2), 0),
            ClefKind::Alto => ("C", Some(3), 0),
            ClefKind::Tenor => ("C", Some(4), 0),
            ClefKind::Baritone => ("F", Some(3), 0),
            ClefKind::Bass => ("F", Some(4), 0),
            ClefKind::BassMinus8 => ("F", Some(4), -1),
            ClefKind::BassPlus8 => ("F", Some(4), 1),
            ClefKind::SubBass => ("F", Some(5), 0),
            ClefKind::French => ("G", Some(1), 0),
            ClefKind::Percussion => ("percussion", None, 0),
            ClefKind::Tablature => ("TAB", Some(5), 0),
            ClefKind::None => ("none", None, 0),
        }
    }

    /// Parse the names accepted in clef replacement options
    pub fn from_name(name: &str) -> Option<ClefKind> {
        let clef = match name.trim().to_ascii_lowercase().as_str() {
            "treble" => ClefKind::Treble,
            "treble-8" => ClefKind::TrebleMinus8,
            "treble+8" => ClefKind::TreblePlus8,
            "soprano" => ClefKind::Soprano,
            "mezzosoprano" => ClefKind::MezzoSoprano,
            "alto" => ClefKind::Alto,
            "tenor" => ClefKind::Tenor,
            "baritone" => ClefKind::Baritone,
            "bass" => ClefKind::Bass,
            "bass-8" => ClefKind::BassMinus8,
            "bass+8" => ClefKind::BassPlus8,
            "subbass" => ClefKind::SubBass,
            "french" => ClefKind::French,
            "percussion" => ClefKind::Percussion,
            "tab" => ClefKind::Tablature,
            "none" => ClefKind::None,
            _ => return None,
        };
        Some(clef)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsrClef {
    pub kind: ClefKind,
    pub staff_number: u32,
    pub input_line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyMode {
    #[default]
    Major,
    Minor,
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

impl KeyMode {
    pub fn musicxml_name(&self) -> &'static str {
        match self {
            KeyMode::Major => "major",
            KeyMode::Minor => "minor",
            KeyMode::Ionian => "ionian",
            KeyMode::Dorian => "dorian",
            KeyMode::Phrygian => "phrygian",
            KeyMode::Lydian => "lydian",
            KeyMode::Mixolydian => "mixolydian",
            KeyMode::Aeolian => "aeolian",
            KeyMode::Locrian => "locrian",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsrKey {
    /// Position on the circle of fifths (-7 to +7)
    pub fifths: i8,
    pub mode: KeyMode,
    pub input_line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeSymbol {
    Common,
    Cut,
    SingleNumber,
}

impl TimeSymbol {
    pub fn musicxml_name(&self) -> &'static str {
        match self {
            TimeSymbol::Common => "common",
            TimeSymbol::Cut => "cut",
            TimeSymbol::SingleNumber => "single-number",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsrTime {
    /// Beats, possibly additive ("3+2")
    pub beats: String,
    pub beat_type: u8,
    pub symbol: Option<TimeSymbol>,
    pub input_line: usize,
}

impl MsrTime {
    pub fn new(beats: u8, beat_type: u8) -> Self {
        MsrTime {
            beats: beats.to_string(),
            beat_type,
            symbol: None,
            input_line: 0,
        }
    }

    /// Total beats, summing additive parts
    pub fn beats_total(&self) -> u32 {
        self.beats
            .split('+')
            .filter_map(|part| part.trim().parse::<u32>().ok())
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarlineLocation {
    Left,
    Middle,
    Right,
}

impl BarlineLocation {
    pub fn musicxml_name(&self) -> &'static str {
        match self {
            BarlineLocation::Left => "left",
            BarlineLocation::Middle => "middle",
            BarlineLocation::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarStyle {
    Regular,
    Dotted,
    Dashed,
    Heavy,
    LightLight,
    LightHeavy,
    HeavyLight,
    HeavyHeavy,
    Tick,
    Short,
    None,
}

impl BarStyle {
    pub fn musicxml_name(&self) -> &'static str {
        match self {
            BarStyle::Regular => "regular",
            BarStyle::Dotted => "dotted",
            BarStyle::Dashed => "dashed",
            BarStyle::Heavy => "heavy",
            BarStyle::LightLight => "light-light",
            BarStyle::LightHeavy => "light-heavy",
            BarStyle::HeavyLight => "heavy-light",
            BarStyle::HeavyHeavy => "heavy-heavy",
            BarStyle::Tick => "tick",
            BarStyle::Short => "short",
            BarStyle::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatDirection {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsrRepeat {
    pub direction: RepeatDirection,
    pub times: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndingKind {
    Start,
    Stop,
    Discontinue,
}

impl EndingKind {
    pub fn musicxml_name(&self) -> &'static str {
        match self {
            EndingKind::Start => "start",
            EndingKind::Stop => "stop",
            EndingKind::Discontinue => "discontinue",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsrEnding {
    pub number: String,
    pub kind: EndingKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsrBarline {
    pub location: BarlineLocation,
    pub style: BarStyle,
    pub repeat: Option<MsrRepeat>,
    pub ending: Option<MsrEnding>,
    pub input_line: usize,
}

impl MsrBarline {
    pub fn new(location: BarlineLocation, style: BarStyle) -> Self {
        MsrBarline {
            location,
            style,
            repeat: None,
            ending: None,
            input_line: 0,
        }
    }

    /// Final double bar at the end of a measure
    pub fn final_bar() -> Self {
        MsrBarline::new(BarlineLocation::Right, BarStyle::LightHeavy)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrTempo {
    /// Beat unit as displayed (e.g. 1/4 for a quarter)
    pub beat_unit: Rational,
    pub beat_unit_dots: u8,
    pub per_minute: u32,
    pub words: Option<String>,
    pub placement: Option<Placement>,
    pub input_line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsrRehearsal {
    pub text: String,
    pub placement: Option<Placement>,
    pub input_line: usize,
}

/// Segno or coda sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MsrSign {
    Segno { input_line: usize },
    Coda { input_line: usize },
}

impl MsrSign {
    pub fn input_line(&self) -> usize {
        match self {
            MsrSign::Segno { input_line } | MsrSign::Coda { input_line } => *input_line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alteration_semitones() {
        assert_eq!(Alteration::Natural.semitones(), 0.0);
        assert_eq!(Alteration::SesquiFlat.semitones(), -1.5);
        assert_eq!(Alteration::DoubleSharp.semitones(), 2.0);
    }

    #[test]
    fn test_diatonic_number_crosses_octaves() {
        let b3 = MsrPitch::new(DiatonicStep::B, Alteration::Natural, 3);
        let c4 = MsrPitch::new(DiatonicStep::C, Alteration::Natural, 4);
        assert_eq!(c4.diatonic_number() - b3.diatonic_number(), 1);
    }

    #[test]
    fn test_clef_names() {
        assert_eq!(ClefKind::from_name("Bass"), Some(ClefKind::Bass));
        assert_eq!(ClefKind::from_name("treble-8"), Some(ClefKind::TrebleMinus8));
        assert_eq!(ClefKind::from_name("violin"), None);
        assert_eq!(ClefKind::Alto.sign_line_octave(), ("C", Some(3), 0));
    }

    #[test]
    fn test_additive_time_beats() {
        let mut time = MsrTime::new(5, 8);
        time.beats = "3+2".to_string();
        assert_eq!(time.beats_total(), 5);
    }
}
