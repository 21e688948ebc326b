//! Media gallery lightbox navigation.
//!
//! The open item is carried in the `media` query parameter, so the viewer
//! state lives entirely in the URL of the version page. Navigation wraps in
//! both directions.

/// An open lightbox over a gallery of `len` items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lightbox {
    index: usize,
    len: usize,
}

impl Lightbox {
    /// Open at `index`. `None` if the gallery is empty or the index is out
    /// of range.
    pub fn open(index: usize, len: usize) -> Option<Self> {
        (index < len).then_some(Self { index, len })
    }

    /// Open from a raw query value; unparsable or out-of-range values leave
    /// the lightbox closed.
    pub fn from_param(param: Option<&str>, len: usize) -> Option<Self> {
        let index = param?.trim().parse::<usize>().ok()?;
        Self::open(index, len)
    }

    /// Current zero-based index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Gallery size.
    pub fn total(&self) -> usize {
        self.len
    }

    /// One-based position for the "i / n" counter.
    pub fn position(&self) -> usize {
        self.index + 1
    }

    /// Next item, wrapping to the first.
    pub fn next(&self) -> Self {
        Self {
            index: (self.index + 1) % self.len,
            len: self.len,
        }
    }

    /// Previous item, wrapping to the last.
    pub fn previous(&self) -> Self {
        Self {
            index: (self.index + self.len - 1) % self.len,
            len: self.len,
        }
    }
}
