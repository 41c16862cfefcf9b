/// Sources `.64` : décodage du texte et parcours des dossiers.

pub mod decode;
pub mod folder;

pub use decode::{EncodedSource, decode, decode_bytes};
