// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Input photo records.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The orientation of a photo. Horizontal photos form a slide on their own,
/// vertical photos must be paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "horizontal"),
            Orientation::Vertical => write!(f, "vertical"),
        }
    }
}

/// A photo with an externally assigned id and a set of tags.
///
/// Tags are stored sorted and deduplicated, which makes them usable directly
/// with [`crate::score::common_count`]. Deserialized photos go through
/// [`Photo::new`] as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "PhotoRecord"))]
pub struct Photo {
    id: u64,
    orientation: Orientation,
    tags: Vec<String>,
}

/// The wire shape of a [`Photo`], tags as given.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct PhotoRecord {
    id: u64,
    orientation: Orientation,
    tags: Vec<String>,
}

#[cfg(feature = "serde")]
impl From<PhotoRecord> for Photo {
    fn from(record: PhotoRecord) -> Self {
        Photo::new(record.id, record.orientation, record.tags)
    }
}

impl Photo {
    /// Creates a new photo. Duplicate tags are collapsed.
    pub fn new<I, S>(id: u64, orientation: Orientation, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        tags.sort_unstable();
        tags.dedup();
        Self {
            id,
            orientation,
            tags,
        }
    }

    /// Shorthand for a horizontal photo.
    #[inline]
    pub fn horizontal<I, S>(id: u64, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(id, Orientation::Horizontal, tags)
    }

    /// Shorthand for a vertical photo.
    #[inline]
    pub fn vertical<I, S>(id: u64, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(id, Orientation::Vertical, tags)
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The sorted, deduplicated tags of this photo.
    #[inline]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[inline]
    pub fn num_tags(&self) -> usize {
        self.tags.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_sorted_and_deduplicated() {
        let photo = Photo::horizontal(3, ["sun", "beach", "sun", "cat"]);
        assert_eq!(photo.tags(), &["beach", "cat", "sun"]);
        assert_eq!(photo.num_tags(), 3);
        assert_eq!(photo.id(), 3);
        assert_eq!(photo.orientation(), Orientation::Horizontal);
    }

    #[test]
    fn test_orientation_display() {
        assert_eq!(Orientation::Vertical.to_string(), "vertical");
        assert_eq!(Orientation::Horizontal.to_string(), "horizontal");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialized_tags_are_sorted_and_deduplicated() {
        let json = r#"{ "id": 4, "orientation": "vertical", "tags": ["z", "a", "a"] }"#;
        let photo: Photo = serde_json::from_str(json).unwrap();
        assert_eq!(photo.tags(), &["a", "z"]);
        assert_eq!(photo.num_tags(), 2);
        assert_eq!(photo, Photo::vertical(4, ["a", "z"]));

        let round_trip: Photo =
            serde_json::from_str(&serde_json::to_string(&photo).unwrap()).unwrap();
        assert_eq!(round_trip, photo);
    }
}
