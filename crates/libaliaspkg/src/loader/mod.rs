//! Loading Go packages through the installed Go toolchain.

/// `go list` based package loading.
pub mod golist;
/// Toolchain lookups and Go version helpers.
pub mod toolchain;

pub use self::golist::load_package;
pub use self::toolchain::{find_tool, go_build_version, normalize_go_version, versioned_file_name};
