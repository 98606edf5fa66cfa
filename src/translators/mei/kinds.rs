crate::element_kinds! {
    /// MEI elements produced by the MEI translator
    pub enum MeiKind {
        Mei => "mei",
        // header
        MeiHead => "meiHead",
        FileDesc => "fileDesc",
        TitleStmt => "titleStmt",
        Title => "title",
        RespStmt => "respStmt",
        PersName => "persName",
        PubStmt => "pubStmt",
        Availability => "availability",
        // music
        Music => "music",
        Body => "body",
        Mdiv => "mdiv",
        Score => "score",
        ScoreDef => "scoreDef",
        StaffGrp => "staffGrp",
        StaffDef => "staffDef",
        Label => "label",
        LabelAbbr => "labelAbbr",
        Clef => "clef",
        KeySig => "keySig",
        MeterSig => "meterSig",
        Section => "section",
        Measure => "measure",
        Staff => "staff",
        Layer => "layer",
        // events
        Note => "note",
        Rest => "rest",
        MRest => "mRest",
        Space => "space",
        Chord => "chord",
        Tuplet => "tuplet",
        GraceGrp => "graceGrp",
        Verse => "verse",
        Syl => "syl",
        // control events
        Dynam => "dynam",
    }
}
