//! Built-in feature registrations, in one place
//!
//! Everything that lists, registers, or counts the built-in features
//! derives from [`builtin_registrations`].

use std::sync::Arc;

use blockdoc_core::{FeatureRegistration, FeatureRegistry};

use crate::links::{LinkResolver, Links};
use crate::tools::{self, Code, Delimiter, Header, ImageTool, List, Paragraph, Quote};
use crate::tunes::{self, Alignment, TextVariant};

/// Number of built-in features registered by [`register_builtins`].
pub const BUILTIN_COUNT: usize = 9;

/// Tools the alignment tune is offered for
const ALIGNABLE: [&str; 4] = [
    tools::paragraph::NAME,
    tools::header::NAME,
    tools::quote::NAME,
    tools::list::NAME,
];

/// Returns all built-in registrations in editor toolbox order.
///
/// The image tool has no [`tools::ImageSource`]; use
/// [`register_image_source`] to attach one.
pub fn builtin_registrations() -> Vec<FeatureRegistration> {
    vec![
        // Tools (7)
        FeatureRegistration::tool(Paragraph),
        FeatureRegistration::tool(Header),
        FeatureRegistration::tool(List),
        FeatureRegistration::tool(Quote),
        FeatureRegistration::tool(Code),
        FeatureRegistration::tool(Delimiter),
        FeatureRegistration::prefetching_tool(ImageTool::new()),
        // Tunes (2)
        FeatureRegistration::tune(Alignment),
        FeatureRegistration::tune(TextVariant),
    ]
}

/// Register every built-in feature and its tune associations
pub fn register_builtins(registry: &mut FeatureRegistry) {
    for reg in builtin_registrations() {
        registry.register(reg);
    }
    for tool in ALIGNABLE {
        registry.associate_tune(tool, tunes::alignment::NAME);
    }
    registry.mark_global_tune(tunes::text_variant::NAME);
}

/// A registry holding only the built-in features
pub fn builtin_registry() -> FeatureRegistry {
    let mut registry = FeatureRegistry::new();
    register_builtins(&mut registry);
    registry
}

/// Replace the image tool with one resolving `image_id`s through `source`
pub fn register_image_source(registry: &mut FeatureRegistry, source: Arc<dyn tools::ImageSource>) {
    registry.register(FeatureRegistration::prefetching_tool(
        ImageTool::new().with_source(source),
    ));
}

/// Register the `links` inline feature backed by `resolver`
pub fn register_links(registry: &mut FeatureRegistry, resolver: Arc<dyn LinkResolver>) {
    registry.register(FeatureRegistration::inline(Links::new(resolver)));
}
