//! Optional `.zhfst` bundle loader (spec section 6.2), gated behind the `zhfst`
//! feature: a convenience collaborator for exercising the core against a real
//! dictionary archive, not part of the scored search core itself.

pub mod meta;
pub mod zip;

pub use self::meta::SpellerMetadata;
pub use self::zip::ZipSpellerArchive;
