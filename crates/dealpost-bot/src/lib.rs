//! Pipeline orchestration and the transport-edge contract.
//!
//! `pipeline` runs one URL through normalize → detect → fetch → extract →
//! derive → format; `handler` turns a whole inbound message (text, caption,
//! optional photo) into replies, including the OCR fallback and image
//! caption flows. The message transport itself (receiving and sending) is
//! an external collaborator and lives outside this workspace.

pub mod boundary;
pub mod handler;
pub mod pipeline;

pub use boundary::{NoOcr, NoScreenshot, OcrEngine, Screenshotter};
pub use handler::{
    handle_message, InboundMessage, Reply, MSG_EXTRACTION_FAILED, MSG_OUT_OF_STOCK,
    MSG_UNSUPPORTED,
};
pub use pipeline::{process_url, PostOutcome};
