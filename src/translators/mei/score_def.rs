//! MEI header and score definition
//!
//! Staves are numbered across the whole score in part order; the map built
//! here is what the event translator uses to place each MSR staff.

use std::collections::HashMap;

use super::kinds::MeiKind as K;
use crate::msr::*;
use crate::tree::Element;

type MeiElement = Element<K>;

/// Global MEI staff number of each (part id, MSR staff number)
pub type StaffNumbers = HashMap<(String, u32), u32>;

pub fn mei_head(identification: &MsrIdentification) -> MeiElement {
    let mut title_stmt = Element::new(K::TitleStmt);
    title_stmt.push_leaf(K::Title, identification.title().unwrap_or_default());
    if !identification.creators.is_empty() {
        let mut resp_stmt = Element::new(K::RespStmt);
        for creator in &identification.creators {
            resp_stmt.push(Element::leaf(K::PersName, creator.name.as_str()).with_attribute("role", &creator.kind));
        }
        title_stmt.push(resp_stmt);
    }

    let mut pub_stmt = Element::new(K::PubStmt);
    for rights in &identification.rights {
        pub_stmt.push_leaf(K::Availability, rights.as_str());
    }

    let mut file_desc = Element::new(K::FileDesc);
    file_desc.push(title_stmt);
    file_desc.push(pub_stmt);

    let mut head = Element::new(K::MeiHead);
    head.push(file_desc);
    head
}

pub fn clef_element(clef: ClefKind) -> MeiElement {
    let (sign, line, octave_change) = clef.sign_line_octave();
    let mut element = Element::new(K::Clef).with_attribute("shape", sign);
    if let Some(line) = line {
        element.add_attribute("line", line);
    }
    if octave_change != 0 {
        // one octave is 8, two are 15
        element.add_attribute("dis", 7 * octave_change.unsigned_abs() as u32 + 1);
        element.add_attribute("dis.place", if octave_change > 0 { "above" } else { "below" });
    }
    element
}

/// `@sig` value: "0", "2s", "3f"
pub fn key_sig_value(fifths: i8) -> String {
    match fifths {
        0 => "0".to_string(),
        f if f > 0 => format!("{}s", f),
        f => format!("{}f", -f),
    }
}

pub fn key_sig_element(key: &MsrKey) -> MeiElement {
    let mut element = Element::new(K::KeySig).with_attribute("sig", key_sig_value(key.fifths));
    if key.mode != KeyMode::Major {
        element.add_attribute("mode", key.mode.musicxml_name());
    }
    element
}

pub fn meter_sig_element(time: &MsrTime) -> MeiElement {
    let mut element = Element::new(K::MeterSig)
        .with_attribute("count", &time.beats)
        .with_attribute("unit", time.beat_type);
    match time.symbol {
        Some(TimeSymbol::Common) => element.add_attribute("sym", "common"),
        Some(TimeSymbol::Cut) => element.add_attribute("sym", "cut"),
        _ => {}
    }
    element
}

/// Clef, key and time found at the start of a staff's first measure
pub struct InitialAttributes<'a> {
    pub clef: Option<&'a MsrClef>,
    pub key: Option<&'a MsrKey>,
    pub time: Option<&'a MsrTime>,
}

pub fn initial_attributes(staff: &MsrStaff) -> InitialAttributes<'_> {
    let mut initial = InitialAttributes {
        clef: None,
        key: None,
        time: None,
    };
    let first_measure = staff.voices.first().and_then(|voice| voice.measures.first());
    if let Some(measure) = first_measure {
        for element in &measure.elements {
            match element {
                MsrMeasureElement::Clef(clef) if initial.clef.is_none() => initial.clef = Some(clef),
                MsrMeasureElement::Key(key) if initial.key.is_none() => initial.key = Some(key),
                MsrMeasureElement::Time(time) if initial.time.is_none() => initial.time = Some(time),
                MsrMeasureElement::Note(_) | MsrMeasureElement::Chord(_) | MsrMeasureElement::Tuplet(_) => break,
                _ => {}
            }
        }
    }
    initial
}

/// Builds `<scoreDef>` and numbers the staves
pub struct ScoreDefBuilder<'s> {
    clef_replacements: &'s HashMap<ClefKind, ClefKind>,
    staff_numbers: StaffNumbers,
    /// Clef in effect per global staff after the score definition
    pub initial_clefs: HashMap<u32, ClefKind>,
    next_staff: u32,
}

impl<'s> ScoreDefBuilder<'s> {
    pub fn new(clef_replacements: &'s HashMap<ClefKind, ClefKind>) -> Self {
        ScoreDefBuilder {
            clef_replacements,
            staff_numbers: HashMap::new(),
            initial_clefs: HashMap::new(),
            next_staff: 1,
        }
    }

    pub fn build(&mut self, score: &MsrScore) -> MeiElement {
        let mut group = Element::new(K::StaffGrp);
        self.append_entries(&mut group, &score.elements);
        let mut score_def = Element::new(K::ScoreDef);
        score_def.push(group);
        score_def
    }

    pub fn into_staff_numbers(self) -> (StaffNumbers, HashMap<u32, ClefKind>) {
        (self.staff_numbers, self.initial_clefs)
    }

    fn append_entries(&mut self, parent: &mut MeiElement, elements: &[MsrPartGroupElement]) {
        for element in elements {
            match element {
                MsrPartGroupElement::PartGroup(group) => {
                    let mut staff_grp = Element::new(K::StaffGrp);
                    if let Some(symbol) = group.symbol {
                        staff_grp.add_attribute(
                            "symbol",
                            match symbol {
                                PartGroupSymbol::Square => "bracketsq",
                                other => other.musicxml_name(),
                            },
                        );
                    }
                    staff_grp.add_attribute("bar.thru", group.barline);
                    if let Some(name) = &group.name {
                        staff_grp.push_leaf(K::Label, name.as_str());
                    }
                    if let Some(abbreviation) = &group.abbreviation {
                        staff_grp.push_leaf(K::LabelAbbr, abbreviation.as_str());
                    }
                    self.append_entries(&mut staff_grp, &group.elements);
                    parent.push(staff_grp);
                }
                MsrPartGroupElement::Part(part) => parent.push(self.part_entry(part)),
            }
        }
    }

    fn part_entry(&mut self, part: &MsrPart) -> MeiElement {
        if part.staves.len() == 1 {
            let mut staff_def = self.staff_def(part, &part.staves[0]);
            label_part(&mut staff_def, part);
            return staff_def;
        }
        let mut group = Element::new(K::StaffGrp)
            .with_attribute("symbol", "brace")
            .with_attribute("bar.thru", "true");
        label_part(&mut group, part);
        for staff in &part.staves {
            group.push(self.staff_def(part, staff));
        }
        group
    }

    fn staff_def(&mut self, part: &MsrPart, staff: &MsrStaff) -> MeiElement {
        let number = self.next_staff;
        self.next_staff += 1;
        self.staff_numbers.insert((part.id.clone(), staff.number), number);

        let mut staff_def = Element::new(K::StaffDef)
            .with_attribute("n", number)
            .with_attribute("lines", staff.lines);
        let initial = initial_attributes(staff);
        if let Some(clef) = initial.clef {
            let kind = self.clef_replacements.get(&clef.kind).copied().unwrap_or(clef.kind);
            self.initial_clefs.insert(number, kind);
            staff_def.push(clef_element(kind));
        }
        if let Some(key) = initial.key {
            staff_def.push(key_sig_element(key));
        }
        if let Some(time) = initial.time {
            staff_def.push(meter_sig_element(time));
        }
        staff_def
    }
}

fn label_part(element: &mut MeiElement, part: &MsrPart) {
    element.push_leaf(K::Label, part.name.as_str());
    if let Some(abbreviation) = &part.abbreviation {
        element.push_leaf(K::LabelAbbr, abbreviation.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(id: &str, staves: u32) -> MsrPart {
        let mut part = MsrPart::new(id, id);
        for number in 1..=staves {
            let measure = MeasureBuilder::new("1", number, 1)
                .clef(if number == 1 { ClefKind::Treble } else { ClefKind::Bass })
                .key(-3, KeyMode::Minor)
                .time(4, 4)
                .note(MsrNote::rest(Rational::new(1, 1)))
                .build();
            part.add_staff(MsrStaff::new(number).with_voice(MsrVoice::new(1, vec![measure])));
        }
        part
    }

    #[test]
    fn test_staves_numbered_across_parts() {
        let mut score = MsrScore::new();
        score.add_part(part("P1", 1));
        score.add_part(part("P2", 2));
        let replacements = HashMap::new();
        let mut builder = ScoreDefBuilder::new(&replacements);
        let score_def = builder.build(&score);
        let (numbers, clefs) = builder.into_staff_numbers();
        assert_eq!(numbers.get(&("P2".to_string(), 2)), Some(&3));
        assert_eq!(clefs.get(&3), Some(&ClefKind::Bass));

        let root_group = score_def.child(K::StaffGrp).unwrap();
        assert_eq!(root_group.children()[0].kind(), K::StaffDef);
        let piano = &root_group.children()[1];
        assert_eq!(piano.kind(), K::StaffGrp);
        assert_eq!(piano.attribute("symbol"), Some("brace"));
        assert_eq!(piano.children_of(K::StaffDef).count(), 2);
    }

    #[test]
    fn test_staff_def_attributes() {
        let mut score = MsrScore::new();
        score.add_part(part("P1", 1));
        let replacements = HashMap::new();
        let score_def = ScoreDefBuilder::new(&replacements).build(&score);
        let staff_def = score_def.child(K::StaffGrp).unwrap().child(K::StaffDef).unwrap();
        assert_eq!(staff_def.attribute("n"), Some("1"));
        assert_eq!(staff_def.attribute("lines"), Some("5"));
        assert_eq!(staff_def.child(K::Clef).unwrap().attribute("shape"), Some("G"));
        let key = staff_def.child(K::KeySig).unwrap();
        assert_eq!(key.attribute("sig"), Some("3f"));
        assert_eq!(key.attribute("mode"), Some("minor"));
        assert_eq!(staff_def.child(K::MeterSig).unwrap().attribute("count"), Some("4"));
    }

    #[test]
    fn test_octave_clef() {
        let clef = clef_element(ClefKind::TrebleMinus8);
        assert_eq!(clef.attribute("dis"), Some("8"));
        assert_eq!(clef.attribute("dis.place"), Some("below"));
    }
}
