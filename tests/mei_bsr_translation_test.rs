// MEI and braille translation of a grouped, multi-staff score

use msr_trees::msr::*;
use msr_trees::tree::ElementKind;
use msr_trees::{translate_to_bsr, translate_to_mei, BsrKind, Element, MeiKind, TranslationSettings};

fn whole(step: DiatonicStep, octave: i8) -> MsrNote {
    MsrNote::pitched(step, Alteration::Natural, octave, Rational::new(1, 1))
}

/// Violin alone, then a two-staff piano, both inside a bracketed group
fn chamber_score() -> MsrScore {
    let violin_measures = vec![
        MeasureBuilder::new("1", 1, 1)
            .clef(ClefKind::Treble)
            .time(4, 4)
            .note(whole(DiatonicStep::G, 4))
            .build(),
        MeasureBuilder::new("2", 1, 1)
            .key(1, KeyMode::Major)
            .note(whole(DiatonicStep::A, 4))
            .barline(MsrBarline::final_bar())
            .build(),
    ];
    let violin = MsrPart::new("P1", "Violin")
        .with_staff(MsrStaff::new(1).with_voice(MsrVoice::new(1, violin_measures)));

    let right_hand = vec![
        MeasureBuilder::new("1", 1, 1).clef(ClefKind::Treble).time(4, 4).note(whole(DiatonicStep::E, 5)).build(),
        MeasureBuilder::new("2", 1, 1).note(whole(DiatonicStep::F, 5)).build(),
    ];
    let left_hand = vec![
        MeasureBuilder::new("1", 2, 1).clef(ClefKind::Bass).time(4, 4).note(whole(DiatonicStep::C, 3)).build(),
        MeasureBuilder::new("2", 2, 1)
            .clef(ClefKind::Treble)
            .note(whole(DiatonicStep::D, 4))
            .build(),
    ];
    let piano = MsrPart::new("P2", "Piano")
        .with_staff(MsrStaff::new(1).with_voice(MsrVoice::new(1, right_hand)))
        .with_staff(MsrStaff::new(2).with_voice(MsrVoice::new(1, left_hand)));

    let mut group = MsrPartGroup::new(1, Some(PartGroupSymbol::Bracket));
    group.name = Some("Ensemble".to_string());
    group.add_part(violin);
    group.add_part(piano);

    let mut score = MsrScore::new();
    score.identification.movement_title = Some("Duo".to_string());
    score.add_part_group(group);
    score
}

fn all_of<K: ElementKind>(root: &Element<K>, kind: K) -> Vec<&Element<K>> {
    root.descendants().into_iter().filter(|node| node.kind() == kind).collect()
}

#[test]
fn test_mei_score_definition_mirrors_groups() {
    let root = translate_to_mei(&chamber_score(), &TranslationSettings::default()).expect("translation should succeed");

    let titles = all_of(&root, MeiKind::Title);
    assert_eq!(titles[0].text(), Some("Duo".to_string()));

    let staff_defs: Vec<&str> = all_of(&root, MeiKind::StaffDef)
        .iter()
        .filter_map(|staff_def| staff_def.attribute("n"))
        .collect();
    assert_eq!(staff_defs, vec!["1", "2", "3"]);

    let groups = all_of(&root, MeiKind::StaffGrp);
    // score group, bracket group, piano brace
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[1].attribute("symbol"), Some("bracket"));
    assert_eq!(groups[1].child_text(MeiKind::Label), Some("Ensemble".to_string()));
    assert_eq!(groups[2].attribute("symbol"), Some("brace"));
}

#[test]
fn test_mei_measures_gather_every_staff() {
    let root = translate_to_mei(&chamber_score(), &TranslationSettings::default()).expect("translation should succeed");

    let measures = all_of(&root, MeiKind::Measure);
    assert_eq!(measures.len(), 2);
    for measure in &measures {
        let staves: Vec<&str> = measure
            .children_of(MeiKind::Staff)
            .filter_map(|staff| staff.attribute("n"))
            .collect();
        assert_eq!(staves, vec!["1", "2", "3"]);
    }
    assert_eq!(measures[1].attribute("right"), Some("end"));

    // the key change is written before the second measure
    let section = all_of(&root, MeiKind::Section)[0];
    let tags: Vec<&str> = section.children().iter().map(|child| child.kind().tag_name()).collect();
    assert_eq!(tags, vec!["measure", "scoreDef", "measure"]);
    let change = section.children()[1].child(MeiKind::KeySig).expect("key change");
    assert_eq!(change.attribute("sig"), Some("1s"));

    // the left hand's clef change is an event in its layer
    let left_hand = measures[1]
        .children_of(MeiKind::Staff)
        .find(|staff| staff.attribute("n") == Some("3"))
        .expect("left hand staff");
    let layer = left_hand.child(MeiKind::Layer).expect("layer");
    assert_eq!(layer.children()[0].kind(), MeiKind::Clef);
    assert_eq!(layer.children()[0].attribute("shape"), Some("G"));
}

#[test]
fn test_mei_ids_are_unique_and_prefixed() {
    let mut settings = TranslationSettings::default();
    settings.mei.id_prefix = "e".to_string();
    let root = translate_to_mei(&chamber_score(), &settings).expect("translation should succeed");

    let mut ids: Vec<&str> = root
        .descendants()
        .into_iter()
        .filter_map(|node| node.attribute("xml:id"))
        .collect();
    assert!(ids.iter().all(|id| id.starts_with('e')));
    let count = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), count);
}

#[test]
fn test_braille_parts_follow_each_other() {
    let settings = TranslationSettings::default();
    let root = translate_to_bsr(&chamber_score(), &settings).expect("translation should succeed");

    let names: Vec<String> = all_of(&root, BsrKind::PartName).iter().filter_map(|name| name.text()).collect();
    assert_eq!(names.len(), 2);
    let hands: Vec<String> = all_of(&root, BsrKind::HandSign).iter().filter_map(|sign| sign.text()).collect();
    assert_eq!(hands, vec!["⠨⠜", "⠸⠜"]);

    // violin then piano, each part's measures in order
    assert_eq!(all_of(&root, BsrKind::Measure).len(), 6);
    assert_eq!(all_of(&root, BsrKind::Heading).len(), 1);
}

#[test]
fn test_braille_pages_respect_settings() {
    let mut settings = TranslationSettings::default();
    settings.braille.lines_per_page = 3;
    settings.braille.cells_per_line = 12;
    let root = translate_to_bsr(&chamber_score(), &settings).expect("translation should succeed");

    let pages: Vec<&Element<BsrKind>> = root.children_of(BsrKind::Page).collect();
    assert!(pages.len() > 1);
    for page in &pages {
        assert!(page.children_of(BsrKind::Line).count() <= 2, "one line is taken by the page number");
        assert!(page.child(BsrKind::PageNumber).is_some());
    }
}
