//! Library side of the `awb-report` command: logging setup and run stages.

pub mod logging;
pub mod pipeline;
