//! MusicXML element kinds

crate::element_kinds! {
    /// Every element the MusicXML translator emits
    pub enum MusicXmlKind {
        ScorePartwise => "score-partwise",
        // header
        Work => "work",
        WorkNumber => "work-number",
        WorkTitle => "work-title",
        MovementNumber => "movement-number",
        MovementTitle => "movement-title",
        Identification => "identification",
        Creator => "creator",
        Rights => "rights",
        Encoding => "encoding",
        Software => "software",
        EncodingDate => "encoding-date",
        Defaults => "defaults",
        Scaling => "scaling",
        Millimeters => "millimeters",
        Tenths => "tenths",
        PageLayout => "page-layout",
        PageHeight => "page-height",
        PageWidth => "page-width",
        PageMargins => "page-margins",
        LeftMargin => "left-margin",
        RightMargin => "right-margin",
        TopMargin => "top-margin",
        BottomMargin => "bottom-margin",
        SystemLayout => "system-layout",
        SystemMargins => "system-margins",
        SystemDistance => "system-distance",
        TopSystemDistance => "top-system-distance",
        StaffLayout => "staff-layout",
        StaffDistance => "staff-distance",
        Appearance => "appearance",
        LineWidth => "line-width",
        NoteSize => "note-size",
        Credit => "credit",
        CreditPage => "credit-page",
        CreditWords => "credit-words",
        // part list
        PartList => "part-list",
        PartGroup => "part-group",
        GroupName => "group-name",
        GroupAbbreviation => "group-abbreviation",
        GroupSymbol => "group-symbol",
        GroupBarline => "group-barline",
        ScorePart => "score-part",
        PartName => "part-name",
        PartAbbreviation => "part-abbreviation",
        ScoreInstrument => "score-instrument",
        InstrumentName => "instrument-name",
        // parts and measures
        Part => "part",
        Measure => "measure",
        Print => "print",
        Attributes => "attributes",
        Divisions => "divisions",
        Key => "key",
        Fifths => "fifths",
        Mode => "mode",
        Time => "time",
        Beats => "beats",
        BeatType => "beat-type",
        Staves => "staves",
        Clef => "clef",
        Sign => "sign",
        Line => "line",
        ClefOctaveChange => "clef-octave-change",
        StaffDetails => "staff-details",
        StaffLines => "staff-lines",
        Barline => "barline",
        BarStyle => "bar-style",
        Repeat => "repeat",
        Ending => "ending",
        Backup => "backup",
        Forward => "forward",
        // directions
        Direction => "direction",
        DirectionType => "direction-type",
        Metronome => "metronome",
        BeatUnit => "beat-unit",
        BeatUnitDot => "beat-unit-dot",
        PerMinute => "per-minute",
        Words => "words",
        Rehearsal => "rehearsal",
        Segno => "segno",
        Coda => "coda",
        Dynamics => "dynamics",
        Wedge => "wedge",
        Voice => "voice",
        Staff => "staff",
        // dynamic marks
        DynamicPPPPP => "ppppp",
        DynamicPPPP => "pppp",
        DynamicPPP => "ppp",
        DynamicPP => "pp",
        DynamicP => "p",
        DynamicMP => "mp",
        DynamicMF => "mf",
        DynamicF => "f",
        DynamicFF => "ff",
        DynamicFFF => "fff",
        DynamicFFFF => "ffff",
        DynamicFFFFF => "fffff",
        DynamicFP => "fp",
        DynamicFZ => "fz",
        DynamicPF => "pf",
        DynamicRF => "rf",
        DynamicRFZ => "rfz",
        DynamicSF => "sf",
        DynamicSFP => "sfp",
        DynamicSFPP => "sfpp",
        DynamicSFZ => "sfz",
        DynamicSFFZ => "sffz",
        DynamicN => "n",
        // notes
        Note => "note",
        Grace => "grace",
        Chord => "chord",
        Pitch => "pitch",
        Step => "step",
        Alter => "alter",
        Octave => "octave",
        Unpitched => "unpitched",
        DisplayStep => "display-step",
        DisplayOctave => "display-octave",
        Rest => "rest",
        Duration => "duration",
        Tie => "tie",
        Type => "type",
        Dot => "dot",
        Accidental => "accidental",
        TimeModification => "time-modification",
        ActualNotes => "actual-notes",
        NormalNotes => "normal-notes",
        Stem => "stem",
        Beam => "beam",
        Lyric => "lyric",
        Syllabic => "syllabic",
        Text => "text",
        Extend => "extend",
        // notations
        Notations => "notations",
        Tied => "tied",
        Slur => "slur",
        Tuplet => "tuplet",
        Fermata => "fermata",
        Ornaments => "ornaments",
        TrillMark => "trill-mark",
        Turn => "turn",
        InvertedTurn => "inverted-turn",
        DelayedTurn => "delayed-turn",
        DelayedInvertedTurn => "delayed-inverted-turn",
        VerticalTurn => "vertical-turn",
        Mordent => "mordent",
        InvertedMordent => "inverted-mordent",
        Schleifer => "schleifer",
        Shake => "shake",
        Tremolo => "tremolo",
        Technical => "technical",
        UpBow => "up-bow",
        DownBow => "down-bow",
        Harmonic => "harmonic",
        OpenString => "open-string",
        ThumbPosition => "thumb-position",
        Stopped => "stopped",
        SnapPizzicato => "snap-pizzicato",
        DoubleTongue => "double-tongue",
        TripleTongue => "triple-tongue",
        Tap => "tap",
        Fingernails => "fingernails",
        Fingering => "fingering",
        String => "string",
        Fret => "fret",
        Pluck => "pluck",
        Articulations => "articulations",
        Accent => "accent",
        StrongAccent => "strong-accent",
        Staccato => "staccato",
        Staccatissimo => "staccatissimo",
        Spiccato => "spiccato",
        Tenuto => "tenuto",
        DetachedLegato => "detached-legato",
        Stress => "stress",
        Unstress => "unstress",
        BreathMark => "breath-mark",
        Caesura => "caesura",
        Scoop => "scoop",
        Plop => "plop",
        Doit => "doit",
        Falloff => "falloff",
    }
}

use crate::msr::{ArticulationKind, DynamicKind, OrnamentKind, TechnicalKind};

impl MusicXmlKind {
    pub fn for_dynamic(kind: DynamicKind) -> Self {
        match kind {
            DynamicKind::PPPPP => MusicXmlKind::DynamicPPPPP,
            DynamicKind::PPPP => MusicXmlKind::DynamicPPPP,
            DynamicKind::PPP => MusicXmlKind::DynamicPPP,
            DynamicKind::PP => MusicXmlKind::DynamicPP,
            DynamicKind::P => MusicXmlKind::DynamicP,
            DynamicKind::MP => MusicXmlKind::DynamicMP,
            DynamicKind::MF => MusicXmlKind::DynamicMF,
            DynamicKind::F => MusicXmlKind::DynamicF,
            DynamicKind::FF => MusicXmlKind::DynamicFF,
            DynamicKind::FFF => MusicXmlKind::DynamicFFF,
            DynamicKind::FFFF => MusicXmlKind::DynamicFFFF,
            DynamicKind::FFFFF => MusicXmlKind::DynamicFFFFF,
            DynamicKind::FP => MusicXmlKind::DynamicFP,
            DynamicKind::FZ => MusicXmlKind::DynamicFZ,
            DynamicKind::PF => MusicXmlKind::DynamicPF,
            DynamicKind::RF => MusicXmlKind::DynamicRF,
            DynamicKind::RFZ => MusicXmlKind::DynamicRFZ,
            DynamicKind::SF => MusicXmlKind::DynamicSF,
            DynamicKind::SFP => MusicXmlKind::DynamicSFP,
            DynamicKind::SFPP => MusicXmlKind::DynamicSFPP,
            DynamicKind::SFZ => MusicXmlKind::DynamicSFZ,
            DynamicKind::SFFZ => MusicXmlKind::DynamicSFFZ,
            DynamicKind::N => MusicXmlKind::DynamicN,
        }
    }

    pub fn for_articulation(kind: ArticulationKind) -> Self {
        match kind {
            ArticulationKind::Accent => MusicXmlKind::Accent,
            ArticulationKind::StrongAccent => MusicXmlKind::StrongAccent,
            ArticulationKind::Staccato => MusicXmlKind::Staccato,
            ArticulationKind::Staccatissimo => MusicXmlKind::Staccatissimo,
            ArticulationKind::Spiccato => MusicXmlKind::Spiccato,
            ArticulationKind::Tenuto => MusicXmlKind::Tenuto,
            ArticulationKind::DetachedLegato => MusicXmlKind::DetachedLegato,
            ArticulationKind::Stress => MusicXmlKind::Stress,
            ArticulationKind::Unstress => MusicXmlKind::Unstress,
            ArticulationKind::BreathMark => MusicXmlKind::BreathMark,
            ArticulationKind::Caesura => MusicXmlKind::Caesura,
            ArticulationKind::Scoop => MusicXmlKind::Scoop,
            ArticulationKind::Plop => MusicXmlKind::Plop,
            ArticulationKind::Doit => MusicXmlKind::Doit,
            ArticulationKind::Falloff => MusicXmlKind::Falloff,
        }
    }

    pub fn for_ornament(kind: OrnamentKind) -> Self {
        match kind {
            OrnamentKind::TrillMark => MusicXmlKind::TrillMark,
            OrnamentKind::Turn => MusicXmlKind::Turn,
            OrnamentKind::InvertedTurn => MusicXmlKind::InvertedTurn,
            OrnamentKind::DelayedTurn => MusicXmlKind::DelayedTurn,
            OrnamentKind::DelayedInvertedTurn => MusicXmlKind::DelayedInvertedTurn,
            OrnamentKind::VerticalTurn => MusicXmlKind::VerticalTurn,
            OrnamentKind::Mordent => MusicXmlKind::Mordent,
            OrnamentKind::InvertedMordent => MusicXmlKind::InvertedMordent,
            OrnamentKind::Schleifer => MusicXmlKind::Schleifer,
            OrnamentKind::Shake => MusicXmlKind::Shake,
            OrnamentKind::Tremolo(_) => MusicXmlKind::Tremolo,
        }
    }

    pub fn for_technical(kind: &TechnicalKind) -> Self {
        match kind {
            TechnicalKind::UpBow => MusicXmlKind::UpBow,
            TechnicalKind::DownBow => MusicXmlKind::DownBow,
            TechnicalKind::Harmonic => MusicXmlKind::Harmonic,
            TechnicalKind::OpenString => MusicXmlKind::OpenString,
            TechnicalKind::ThumbPosition => MusicXmlKind::ThumbPosition,
            TechnicalKind::Stopped => MusicXmlKind::Stopped,
            TechnicalKind::SnapPizzicato => MusicXmlKind::SnapPizzicato,
            TechnicalKind::DoubleTongue => MusicXmlKind::DoubleTongue,
            TechnicalKind::TripleTongue => MusicXmlKind::TripleTongue,
            TechnicalKind::Tap => MusicXmlKind::Tap,
            TechnicalKind::Fingernails => MusicXmlKind::Fingernails,
            TechnicalKind::Fingering(_) => MusicXmlKind::Fingering,
            TechnicalKind::String(_) => MusicXmlKind::String,
            TechnicalKind::Fret(_) => MusicXmlKind::Fret,
            TechnicalKind::Pluck(_) => MusicXmlKind::Pluck,
        }
    }
}
