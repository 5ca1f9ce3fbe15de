use crate::frames::Frame;
use indexmap::map::{IntoIter, Iter};
use indexmap::IndexMap;
use std::ops::Index;

/// The frames of a tag, grouped by identifier.
///
/// Tags are allowed to repeat an identifier (several comments, several
/// pictures), so every label maps to the full run of frames that carried it,
/// in the order they appeared. The labels themselves also keep their tag
/// order.
#[derive(Clone, Debug, Default)]
pub struct FrameMap {
    map: IndexMap<String, Vec<Frame>>,
}

impl FrameMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, frame: Frame) {
        self.map
            .entry(frame.label().to_string())
            .or_insert_with(Vec::new)
            .push(frame);
    }

    /// All frames recorded under `label`, in tag order.
    pub fn get(&self, label: &str) -> Option<&[Frame]> {
        Some(self.map.get(label)?.as_slice())
    }

    /// The first frame recorded under `label`, which for most identifiers is
    /// the only one.
    pub fn first(&self, label: &str) -> Option<&Frame> {
        self.map.get(label)?.first()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.map.contains_key(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.map.values().flatten()
    }

    /// The number of distinct labels in this map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Index<&str> for FrameMap {
    type Output = [Frame];

    fn index(&self, label: &str) -> &Self::Output {
        &self.map[label]
    }
}

impl IntoIterator for FrameMap {
    type Item = (String, Vec<Frame>);
    type IntoIter = IntoIter<String, Vec<Frame>>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl<'a> IntoIterator for &'a FrameMap {
    type Item = (&'a String, &'a Vec<Frame>);
    type IntoIter = Iter<'a, String, Vec<Frame>>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::{FrameBody, TextFrame};
    use crate::core::string::Encoding;

    fn text_frame(label: &str, text: &str) -> Frame {
        Frame::new(
            label.to_string(),
            None,
            FrameBody::Text(TextFrame {
                encoding: Encoding::Latin1,
                values: vec![text.to_string()],
            }),
        )
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let mut map = FrameMap::new();

        map.add(text_frame("TIT2", "Title"));
        map.add(text_frame("TPE1", "Artist"));
        map.add(text_frame("TIT2", "Other Title"));

        assert_eq!(map.len(), 2);
        assert_eq!(map["TIT2"].len(), 2);
        assert_eq!(map["TIT2"][0].to_string(), "Title");
        assert_eq!(map["TIT2"][1].to_string(), "Other Title");

        let labels: Vec<&str> = map.labels().collect();
        assert_eq!(labels, vec!["TIT2", "TPE1"]);
        assert_eq!(map.frames().count(), 3);
    }
}
