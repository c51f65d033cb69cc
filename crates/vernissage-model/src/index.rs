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

//! Phantom-typed indices.
//!
//! `TypedIndex<T>` wraps a `usize` and carries a tag type `T` so that slide
//! positions and interned tag ids are distinct types at compile time while
//! compiling down to a plain `usize`.

/// A trait to tag typed indices with a name for debugging and display purposes.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A strongly typed index associated with the tag type `T`.
///
/// # Examples
///
/// ```rust
/// use vernissage_model::index::SlideIndex;
///
/// let slide = SlideIndex::new(3);
/// assert_eq!(slide.get(), 3);
/// assert_eq!(format!("{}", slide), "SlideIndex(3)");
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new `TypedIndex` from a raw `usize`.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the underlying `usize`.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    #[inline(always)]
    fn from(typed_index: TypedIndex<T>) -> Self {
        typed_index.index
    }
}

/// A tag type for slide indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct SlideIndexTag;

impl TypedIndexTag for SlideIndexTag {
    const NAME: &'static str = "SlideIndex";
}

/// The position of a slide in the model's slide list.
pub type SlideIndex = TypedIndex<SlideIndexTag>;

/// A tag type for interned tag indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TagIndexTag;

impl TypedIndexTag for TagIndexTag {
    const NAME: &'static str = "TagIndex";
}

/// An interned tag. Ordering of tag indices matches lexicographic ordering of tag names.
pub type TagIndex = TypedIndex<TagIndexTag>;
