//! Bencode codec: dynamic value trees and typed decode/encode of host data structures.

/// Bencode grammar, dynamic values, typed targets, and record field mapping.
pub mod bencode;
