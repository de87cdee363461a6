//! Built-in block tools

use std::fmt;

use blockdoc_core::{BlockAttributes, BlockBase, BlockData, FeatureBlock, RenderContext, Result};

pub mod code;
pub mod delimiter;
pub mod header;
pub mod image;
pub mod list;
pub mod paragraph;
pub mod quote;

pub use code::Code;
pub use delimiter::Delimiter;
pub use header::Header;
pub use image::{ImageSource, ImageTool};
pub use list::List;
pub use paragraph::Paragraph;
pub use quote::Quote;

/// Writes a block's markup from its data and outer-element attributes
pub type RenderFn =
    fn(&BlockData, &BlockAttributes, &RenderContext, &mut dyn fmt::Write) -> Result<()>;

/// Block whose markup is a function of its data alone
#[derive(Debug)]
pub struct DataBlock {
    base: BlockBase,
    render: RenderFn,
}

impl DataBlock {
    pub fn new(feature: &str, data: BlockData, render: RenderFn) -> Self {
        Self {
            base: BlockBase::new(feature, data),
            render,
        }
    }

    pub(crate) fn boxed(feature: &str, data: BlockData, render: RenderFn) -> Box<dyn FeatureBlock> {
        Box::new(Self::new(feature, data, render))
    }
}

impl FeatureBlock for DataBlock {
    fn base(&self) -> &BlockBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BlockBase {
        &mut self.base
    }

    fn render(&self, ctx: &RenderContext, out: &mut dyn fmt::Write) -> Result<()> {
        (self.render)(self.base.data(), &self.base.attributes, ctx, out)
    }
}

/// Media path of a built-in client script
pub(crate) fn script(name: &str) -> String {
    format!("blockdoc/tools/{name}.js")
}
