/// Dynamic decode and tree/JSON printing command.
pub mod decode;
/// Typed torrent metainfo decode and re-encode command.
pub mod meta;
/// Shared rendering helpers.
pub(crate) mod util;
