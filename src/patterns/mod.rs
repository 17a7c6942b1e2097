//! Demonstration pages, one function per pattern.
//!
//! Every page builds its own small scenario, writes a transcript of it to
//! [`PageContext::out`] and returns. Nothing is shared between pages.

pub mod behavioral;
pub mod creational;
pub mod structural;

use std::io::Write;

use crate::config::GalleryConfig;

pub struct PageContext<'a> {
    pub out: &'a mut dyn Write,
    pub config: &'a GalleryConfig,
}

impl<'a> PageContext<'a> {
    pub fn new(out: &'a mut dyn Write, config: &'a GalleryConfig) -> Self {
        Self { out, config }
    }
}

#[cfg(test)]
pub(crate) fn render<F>(page: F) -> String
where
    F: FnOnce(&mut PageContext<'_>) -> crate::error::Result<()>,
{
    render_with(&GalleryConfig::default(), page)
}

#[cfg(test)]
pub(crate) fn render_with<F>(config: &GalleryConfig, page: F) -> String
where
    F: FnOnce(&mut PageContext<'_>) -> crate::error::Result<()>,
{
    let mut buffer: Vec<u8> = Vec::new();
    {
        let mut ctx = PageContext::new(&mut buffer, config);
        page(&mut ctx).unwrap();
    }
    String::from_utf8(buffer).unwrap()
}
