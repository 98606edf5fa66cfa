crate::element_kinds! {
    /// Braille score representation nodes. Leaves hold Unicode braille.
    pub enum BsrKind {
        Score => "bsr-score",
        Page => "page",
        PageNumber => "page-number",
        Line => "line",
        Heading => "heading",
        PartName => "part-name",
        HandSign => "hand-sign",
        Signatures => "signatures",
        KeySignature => "key-signature",
        TimeSignature => "time-signature",
        Measure => "measure",
        Note => "note",
        Rest => "rest",
        Interval => "interval",
        Tie => "tie",
        TupletSign => "tuplet-sign",
        Dynamics => "dynamics",
        InAccord => "in-accord",
        Barline => "barline",
    }
}

impl BsrKind {
    /// Line children rendered as centered text
    pub fn is_centered(&self) -> bool {
        matches!(self, BsrKind::Heading)
    }
}
