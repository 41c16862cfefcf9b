/// Export des résultats : images PNG et classeur d'histogrammes.
pub mod png;
pub mod xlsx;

pub use png::PngDumper;
pub use xlsx::XlsxExporter;
