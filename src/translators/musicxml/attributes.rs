//! Pending `<attributes>` contents
//!
//! Divisions, keys, times, staves and clefs are collected as they are
//! visited and written as one `<attributes>` element the first time a note
//! (or the end of the measure) needs them. Values equal to the ones already
//! in effect for the part are dropped.

use std::collections::HashMap;

use super::kinds::MusicXmlKind as K;
use crate::msr::{ClefKind, KeyMode, MsrKey, MsrTime};
use crate::tree::Element;

type XmlElement = Element<K>;

#[derive(Debug, Default)]
pub struct PendingAttributes {
    divisions: Option<i32>,
    key: Option<MsrKey>,
    time: Option<MsrTime>,
    staves: Option<usize>,
    staff_lines: Vec<(u32, u8)>,
    clefs: Vec<(u32, ClefKind)>,

    // in effect for the current part
    current_key: Option<(i8, KeyMode)>,
    current_time: Option<(String, u8)>,
    current_clefs: HashMap<u32, ClefKind>,
}

impl PendingAttributes {
    /// Forget everything in effect, at the start of a part
    pub fn reset_for_part(&mut self) {
        *self = PendingAttributes::default();
    }

    pub fn set_divisions(&mut self, divisions_per_quarter_note: i32) {
        self.divisions = Some(divisions_per_quarter_note);
    }

    pub fn set_staves(&mut self, staves: usize) {
        self.staves = Some(staves);
    }

    pub fn set_staff_lines(&mut self, staff_number: u32, lines: u8) {
        self.staff_lines.push((staff_number, lines));
    }

    /// Returns false when the key is already in effect
    pub fn add_key(&mut self, key: &MsrKey) -> bool {
        let value = (key.fifths, key.mode);
        if self.current_key == Some(value) {
            log::debug!("key {:?} already in effect, line {}", value, key.input_line);
            return false;
        }
        self.current_key = Some(value);
        self.key = Some(*key);
        true
    }

    /// Returns false when the time is already in effect
    pub fn add_time(&mut self, time: &MsrTime) -> bool {
        let value = (time.beats.clone(), time.beat_type);
        if self.current_time.as_ref() == Some(&value) {
            log::debug!("time {}/{} already in effect, line {}", value.0, value.1, time.input_line);
            return false;
        }
        self.current_time = Some(value);
        self.time = Some(time.clone());
        true
    }

    /// Returns false when the staff already has this clef
    pub fn add_clef(&mut self, staff_number: u32, clef: ClefKind) -> bool {
        if self.current_clefs.get(&staff_number) == Some(&clef) {
            return false;
        }
        self.current_clefs.insert(staff_number, clef);
        self.clefs.retain(|(staff, _)| *staff != staff_number);
        self.clefs.push((staff_number, clef));
        true
    }

    pub fn is_empty(&self) -> bool {
        self.divisions.is_none()
            && self.key.is_none()
            && self.time.is_none()
            && self.staves.is_none()
            && self.staff_lines.is_empty()
            && self.clefs.is_empty()
    }

    /// Build the `<attributes>` element and clear the pending values.
    /// Clefs get a `number` attribute when the part has several staves.
    pub fn take_element(&mut self, multi_staff: bool) -> Option<XmlElement> {
        if self.is_empty() {
            return None;
        }
        let mut attributes = Element::new(K::Attributes);

        if let Some(divisions) = self.divisions.take() {
            attributes.push_leaf(K::Divisions, divisions);
        }

        if let Some(key) = self.key.take() {
            let mut key_element = Element::new(K::Key);
            key_element.push_leaf(K::Fifths, key.fifths);
            key_element.push_leaf(K::Mode, key.mode.musicxml_name());
            attributes.push(key_element);
        }

        if let Some(time) = self.time.take() {
            let mut time_element = Element::new(K::Time);
            if let Some(symbol) = time.symbol {
                time_element.add_attribute("symbol", symbol.musicxml_name());
            }
            time_element.push_leaf(K::Beats, time.beats.as_str());
            time_element.push_leaf(K::BeatType, time.beat_type);
            attributes.push(time_element);
        }

        if let Some(staves) = self.staves.take() {
            attributes.push_leaf(K::Staves, staves);
        }

        let mut clefs = std::mem::take(&mut self.clefs);
        clefs.sort_by_key(|(staff, _)| *staff);
        for (staff_number, clef) in clefs {
            attributes.push(clef_element(clef, multi_staff.then_some(staff_number)));
        }

        for (staff_number, lines) in std::mem::take(&mut self.staff_lines) {
            let mut details = Element::new(K::StaffDetails);
            if multi_staff {
                details.add_attribute("number", staff_number);
            }
            details.push_leaf(K::StaffLines, lines);
            attributes.push(details);
        }

        Some(attributes)
    }
}

fn clef_element(clef: ClefKind, number: Option<u32>) -> XmlElement {
    let (sign, line, octave_change) = clef.sign_line_octave();
    let mut element = Element::new(K::Clef);
    if let Some(number) = number {
        element.add_attribute("number", number);
    }
    element.push_leaf(K::Sign, sign);
    if let Some(line) = line {
        element.push_leaf(K::Line, line);
    }
    if octave_change != 0 {
        element.push_leaf(K::ClefOctaveChange, octave_change);
    }
    element
}
