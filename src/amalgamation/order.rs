//! Order resolution
//!
//! Decides which files are inlined, and in which order, for the header and
//! implementation sections of a library.
//!
//! ## Process
//!
//! 1.  **Order descriptor**: if `<order_dir>/SaneCpp<Library>.json` is in
//!     the tree and parses to anything but `null`, its `includeOrder` and
//!     `implementationOrder` arrays are used verbatim. A missing or
//!     non-array field, or a descriptor that is not an object, yields empty
//!     sections rather than a fallback.
//!
//! 2.  **Default derivation**: otherwise, the header order is the basenames
//!     of the library's public headers (`.h` outside `Internal/`) and the
//!     implementation order is the basenames of its `.cpp` files, both in
//!     tree-listing order.
//!
//! A descriptor that cannot be read or parsed, or that is `null`, is
//! treated as absent.

use log::{debug, warn};

use super::SourceTree;
use crate::config::BuildConfig;
use crate::path::{file_name, library_prefix};
use crate::repository::RepositoryContext;

/// Where an `OrderSpec` came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSource {
    /// Read from the library's order descriptor
    Descriptor,
    /// Derived from the tree listing
    Derived,
}

/// Bare filenames to inline, per section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    pub header_order: Vec<String>,
    pub implementation_order: Vec<String>,
    pub source: OrderSource,
}

/// Parses an order descriptor.
///
/// Returns `None` when `text` is not JSON or is `null`. Any other JSON value
/// is a descriptor: `includeOrder` and `implementationOrder` are taken when
/// they are arrays, and are empty otherwise (so `[]` or `5` yields two empty
/// sections). Non-string array entries are ignored.
pub fn parse_order_descriptor(text: &str) -> Option<OrderSpec> {
    let value: serde_json::Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            warn!("Ignoring malformed order descriptor: {}", e);
            return None;
        }
    };
    if value.is_null() {
        warn!("Ignoring null order descriptor");
        return None;
    }
    if !value.is_object() {
        warn!("Order descriptor is not a JSON object, using empty orders");
    }

    let string_array = |key: &str| -> Vec<String> {
        value
            .get(key)
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    };

    Some(OrderSpec {
        header_order: string_array("includeOrder"),
        implementation_order: string_array("implementationOrder"),
        source: OrderSource::Descriptor,
    })
}

/// Derives the default order from the tree listing
pub fn derive_default_order<'a, I>(library: &str, paths: I) -> OrderSpec
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = library_prefix(library);
    let library_files: Vec<&str> = paths
        .into_iter()
        .filter(|p| p.starts_with(&prefix))
        .filter(|p| p.ends_with(".h") || p.ends_with(".cpp") || p.ends_with(".inl"))
        .collect();

    let header_order = library_files
        .iter()
        .filter(|p| p.ends_with(".h") && !p.contains("/Internal/"))
        .map(|p| file_name(p).to_string())
        .collect();
    let implementation_order = library_files
        .iter()
        .filter(|p| p.ends_with(".cpp"))
        .map(|p| file_name(p).to_string())
        .collect();

    OrderSpec {
        header_order,
        implementation_order,
        source: OrderSource::Derived,
    }
}

/// Picks the descriptor order when `descriptor` parses, the derived order
/// otherwise.
pub fn resolve_order<'a, I>(library: &str, paths: I, descriptor: Option<&str>) -> OrderSpec
where
    I: IntoIterator<Item = &'a str>,
{
    descriptor
        .and_then(parse_order_descriptor)
        .unwrap_or_else(|| derive_default_order(library, paths))
}

/// Loads the order for `library`, reading its descriptor through `ctx` when
/// the tree lists one.
pub fn load_order(
    ctx: &dyn RepositoryContext,
    config: &BuildConfig,
    library: &str,
    tree: &SourceTree,
) -> OrderSpec {
    let order_path = config.order_path(library);
    let descriptor = if tree.contains(&order_path) {
        match ctx.read_file(&config.r#ref, &order_path) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Could not read order descriptor {}: {}", order_path, e);
                None
            }
        }
    } else {
        debug!("No order descriptor at {}, deriving order", order_path);
        None
    };

    resolve_order(library, tree.paths(), descriptor.as_deref())
}
