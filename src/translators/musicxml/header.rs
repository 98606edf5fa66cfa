//! Score header: work, identification, defaults, credits and part list

use super::kinds::MusicXmlKind as K;
use crate::msr::*;
use crate::tree::Element;

type XmlElement = Element<K>;

/// `<work>`, `<movement-number>` and `<movement-title>`, in schema order
pub fn work_elements(identification: &MsrIdentification) -> Vec<XmlElement> {
    let mut elements = Vec::new();

    if identification.work_number.is_some() || identification.work_title.is_some() {
        let mut work = Element::new(K::Work);
        if let Some(number) = &identification.work_number {
            work.push_leaf(K::WorkNumber, number.as_str());
        }
        if let Some(title) = &identification.work_title {
            work.push_leaf(K::WorkTitle, title.as_str());
        }
        elements.push(work);
    }
    if let Some(number) = &identification.movement_number {
        elements.push(Element::leaf(K::MovementNumber, number.as_str()));
    }
    if let Some(title) = &identification.movement_title {
        elements.push(Element::leaf(K::MovementTitle, title.as_str()));
    }

    elements
}

pub fn identification_element(identification: &MsrIdentification) -> XmlElement {
    let mut element = Element::new(K::Identification);

    for creator in &identification.creators {
        element.push(Element::leaf(K::Creator, creator.name.as_str()).with_attribute("type", &creator.kind));
    }
    for rights in &identification.rights {
        element.push_leaf(K::Rights, rights.as_str());
    }

    let mut encoding = Element::new(K::Encoding);
    if let Some(date) = &identification.encoding_date {
        encoding.push_leaf(K::EncodingDate, date.as_str());
    }
    for software in &identification.software {
        encoding.push_leaf(K::Software, software.as_str());
    }
    encoding.push_leaf(
        K::Software,
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
    );
    element.push(encoding);

    element
}

/// `<defaults>`, or `None` when the score carries no layout at all
pub fn defaults_element(score: &MsrScore) -> Option<XmlElement> {
    if score.scaling.is_none()
        && score.page_layout.is_none()
        && score.system_layout.is_none()
        && score.staff_layouts.is_empty()
        && score.appearance.is_none()
    {
        return None;
    }

    let scaling = score.scaling.unwrap_or_default();
    let mut defaults = Element::new(K::Defaults);

    let mut scaling_element = Element::new(K::Scaling);
    scaling_element.push_leaf(K::Millimeters, scaling.millimeters);
    scaling_element.push_leaf(K::Tenths, scaling.tenths);
    defaults.push(scaling_element);

    if let Some(page_layout) = &score.page_layout {
        defaults.push(page_layout_element(page_layout, &scaling));
    }
    if let Some(system_layout) = &score.system_layout {
        defaults.push(system_layout_element(system_layout, &scaling));
    }
    for staff_layout in &score.staff_layouts {
        let mut element = Element::new(K::StaffLayout);
        if let Some(number) = staff_layout.staff_number {
            element.add_attribute("number", number);
        }
        element.push_leaf(K::StaffDistance, scaling.to_tenths(&staff_layout.staff_distance));
        defaults.push(element);
    }
    if let Some(appearance) = &score.appearance {
        let mut element = Element::new(K::Appearance);
        for line_width in &appearance.line_widths {
            element.push(
                Element::leaf(K::LineWidth, scaling.to_tenths(&line_width.width))
                    .with_attribute("type", &line_width.kind),
            );
        }
        for note_size in &appearance.note_sizes {
            element.push(Element::leaf(K::NoteSize, note_size.size).with_attribute("type", &note_size.kind));
        }
        defaults.push(element);
    }

    Some(defaults)
}

fn page_layout_element(layout: &MsrPageLayout, scaling: &MsrScaling) -> XmlElement {
    let mut element = Element::new(K::PageLayout);
    if let Some(height) = &layout.height {
        element.push_leaf(K::PageHeight, scaling.to_tenths(height));
    }
    if let Some(width) = &layout.width {
        element.push_leaf(K::PageWidth, scaling.to_tenths(width));
    }
    if let Some(margins) = &layout.margins {
        let mut margins_element = Element::new(K::PageMargins).with_attribute("type", "both");
        margins_element.push_leaf(K::LeftMargin, scaling.to_tenths(&margins.left));
        margins_element.push_leaf(K::RightMargin, scaling.to_tenths(&margins.right));
        margins_element.push_leaf(K::TopMargin, scaling.to_tenths(&margins.top));
        margins_element.push_leaf(K::BottomMargin, scaling.to_tenths(&margins.bottom));
        element.push(margins_element);
    }
    element
}

pub fn system_layout_element(layout: &MsrSystemLayout, scaling: &MsrScaling) -> XmlElement {
    let mut element = Element::new(K::SystemLayout);
    if layout.left_margin.is_some() || layout.right_margin.is_some() {
        let mut margins = Element::new(K::SystemMargins);
        let zero = MsrLength::millimeters(0.0);
        margins.push_leaf(
            K::LeftMargin,
            scaling.to_tenths(layout.left_margin.as_ref().unwrap_or(&zero)),
        );
        margins.push_leaf(
            K::RightMargin,
            scaling.to_tenths(layout.right_margin.as_ref().unwrap_or(&zero)),
        );
        element.push(margins);
    }
    if let Some(distance) = &layout.system_distance {
        element.push_leaf(K::SystemDistance, scaling.to_tenths(distance));
    }
    if let Some(distance) = &layout.top_system_distance {
        element.push_leaf(K::TopSystemDistance, scaling.to_tenths(distance));
    }
    element
}

pub fn credit_element(credit: &MsrCredit) -> XmlElement {
    let mut element = Element::new(K::Credit).with_attribute("page", credit.page);
    for words in &credit.words {
        let mut words_element = Element::leaf(K::CreditWords, words.text.as_str());
        if let Some(x) = words.default_x {
            words_element.add_attribute("default-x", x);
        }
        if let Some(y) = words.default_y {
            words_element.add_attribute("default-y", y);
        }
        if let Some(size) = words.font_size {
            words_element.add_attribute("font-size", size);
        }
        if let Some(justify) = &words.justify {
            words_element.add_attribute("justify", justify);
        }
        if let Some(valign) = &words.valign {
            words_element.add_attribute("valign", valign);
        }
        element.push(words_element);
    }
    element
}

/// `<part-list>` with part groups bracketing their parts
pub fn part_list_element(score: &MsrScore) -> XmlElement {
    let mut part_list = Element::new(K::PartList);
    append_part_list_entries(&mut part_list, &score.elements);
    part_list
}

fn append_part_list_entries(part_list: &mut XmlElement, elements: &[MsrPartGroupElement]) {
    for element in elements {
        match element {
            MsrPartGroupElement::PartGroup(group) => {
                part_list.push(part_group_start(group));
                append_part_list_entries(part_list, &group.elements);
                part_list.push(
                    Element::new(K::PartGroup)
                        .with_attribute("type", "stop")
                        .with_attribute("number", group.number),
                );
            }
            MsrPartGroupElement::Part(part) => part_list.push(score_part(part)),
        }
    }
}

fn part_group_start(group: &MsrPartGroup) -> XmlElement {
    let mut element = Element::new(K::PartGroup)
        .with_attribute("type", "start")
        .with_attribute("number", group.number);
    if let Some(name) = &group.name {
        element.push_leaf(K::GroupName, name.as_str());
    }
    if let Some(abbreviation) = &group.abbreviation {
        element.push_leaf(K::GroupAbbreviation, abbreviation.as_str());
    }
    if let Some(symbol) = group.symbol {
        element.push_leaf(K::GroupSymbol, symbol.musicxml_name());
    }
    element.push_leaf(K::GroupBarline, if group.barline { "yes" } else { "no" });
    element
}

fn score_part(part: &MsrPart) -> XmlElement {
    let mut element = Element::new(K::ScorePart).with_attribute("id", &part.id);
    element.push_leaf(K::PartName, part.name.as_str());
    if let Some(abbreviation) = &part.abbreviation {
        element.push_leaf(K::PartAbbreviation, abbreviation.as_str());
    }
    if let Some(instrument) = &part.instrument_name {
        let mut score_instrument =
            Element::new(K::ScoreInstrument).with_attribute("id", format!("{}-I1", part.id));
        score_instrument.push_leaf(K::InstrumentName, instrument.as_str());
        element.push(score_instrument);
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ElementKind;

    #[test]
    fn test_part_groups_bracket_their_parts() {
        let mut score = MsrScore::new();
        let mut group = MsrPartGroup::new(1, Some(PartGroupSymbol::Brace));
        group.name = Some("Strings".to_string());
        group.add_part(MsrPart::new("P1", "Violin"));
        group.add_part(MsrPart::new("P2", "Cello"));
        score.add_part_group(group);
        score.add_part(MsrPart::new("P3", "Flute"));

        let part_list = part_list_element(&score);
        let summary: Vec<String> = part_list
            .children()
            .iter()
            .map(|child| match child.kind() {
                K::PartGroup => format!("group-{}", child.attribute("type").unwrap_or("?")),
                K::ScorePart => child.attribute("id").unwrap_or("?").to_string(),
                other => other.tag_name().to_string(),
            })
            .collect();
        assert_eq!(summary, vec!["group-start", "P1", "P2", "group-stop", "P3"]);
        assert_eq!(
            part_list.children()[0].child_text(K::GroupSymbol),
            Some("brace".to_string())
        );
    }

    #[test]
    fn test_defaults_convert_lengths_to_tenths() {
        let mut score = MsrScore::new();
        score.page_layout = Some(MsrPageLayout {
            height: Some(MsrLength::millimeters(297.0)),
            width: Some(MsrLength::millimeters(210.0)),
            margins: None,
        });
        let defaults = defaults_element(&score).unwrap();
        let page_layout = defaults.child(K::PageLayout).unwrap();
        assert_eq!(page_layout.child_text(K::PageHeight), Some("1650".to_string()));
        assert_eq!(
            defaults.child(K::Scaling).unwrap().child_text(K::Millimeters),
            Some("7.2".to_string())
        );
    }

    #[test]
    fn test_no_layout_no_defaults() {
        assert!(defaults_element(&MsrScore::new()).is_none());
    }

    #[test]
    fn test_work_and_creators() {
        let identification = MsrIdentification {
            work_title: Some("Sonata".to_string()),
            movement_title: Some("Allegro".to_string()),
            creators: vec![MsrCreator {
                kind: "composer".to_string(),
                name: "Anonymous".to_string(),
            }],
            ..Default::default()
        };
        let work = work_elements(&identification);
        assert_eq!(work.len(), 2);
        assert_eq!(work[0].child_text(K::WorkTitle), Some("Sonata".to_string()));

        let element = identification_element(&identification);
        let creator = element.child(K::Creator).unwrap();
        assert_eq!(creator.attribute("type"), Some("composer"));
        assert!(element.child(K::Encoding).unwrap().child(K::Software).is_some());
    }
}
