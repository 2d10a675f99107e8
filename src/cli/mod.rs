pub mod convert;
pub mod quote;
pub mod setup;
pub mod shell;
pub mod sink;
pub mod ui;

pub use sink::TerminalSink;
