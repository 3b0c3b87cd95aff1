pub mod grobid_client;
pub mod pdf_downloader;

pub use grobid_client::GrobidClient;
pub use pdf_downloader::PdfDownloader;
