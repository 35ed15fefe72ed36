//! Drawable surfaces handed to the animation.

use crate::{DisplayList, DrawContext, Size};

/// A drawable surface: pixel dimensions plus a drawing context.
pub trait Surface {
    type Context: DrawContext;

    /// Current dimensions in pixels.
    fn size(&self) -> Size;

    /// Update the dimensions after the host was resized.
    fn set_size(&mut self, size: Size);

    fn context(&mut self) -> &mut Self::Context;
}

/// A surface that records each frame into a [`DisplayList`].
#[derive(Debug, Clone, Default)]
pub struct DisplaySurface {
    size: Size,
    list: DisplayList,
}

impl DisplaySurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            list: DisplayList::new(),
        }
    }

    /// Commands recorded for the most recent frame.
    pub fn display_list(&self) -> &DisplayList {
        &self.list
    }
}

impl Surface for DisplaySurface {
    type Context = DisplayList;

    fn size(&self) -> Size {
        self.size
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    fn context(&mut self) -> &mut DisplayList {
        &mut self.list
    }
}
